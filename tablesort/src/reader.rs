//! Pluggable cell reader.
//!
//! A single slot, owned by the UI thread: the last installed reader wins.
//! Cells the reader declines fall back to their rendered text.

use std::cell::RefCell;
use std::rc::Rc;

use tabledom::{Document, NodeId};

use crate::value::CellValue;

/// Reads a typed value from `cell` of `table`, or declines with `None`.
pub type ReadDataFn = Rc<dyn Fn(&Document, NodeId, NodeId) -> Option<CellValue>>;

thread_local! {
    static READER: RefCell<Option<ReadDataFn>> = const { RefCell::new(None) };
}

/// Install `reader`, replacing the previous one.
pub fn set_read_data_func<F>(reader: F)
where
    F: Fn(&Document, NodeId, NodeId) -> Option<CellValue> + 'static,
{
    READER.with(|slot| *slot.borrow_mut() = Some(Rc::new(reader)));
    log::debug!("[tablesort] cell reader installed");
}

/// The currently installed reader, if any.
pub fn read_data_func() -> Option<ReadDataFn> {
    READER.with(|slot| slot.borrow().clone())
}

pub fn clear_read_data_func() {
    READER.with(|slot| *slot.borrow_mut() = None);
}

/// Value of `cell`: the reader's answer when it gives one, the rendered text
/// otherwise. An existing cell is never absent; only missing cells are.
pub(crate) fn read_cell(
    reader: Option<&ReadDataFn>,
    doc: &Document,
    cell: NodeId,
    table: NodeId,
) -> CellValue {
    reader
        .and_then(|read| read(doc, cell, table))
        .filter(|value| !value.is_absent())
        .unwrap_or_else(|| CellValue::Text(doc.text(cell)))
}
