//! Click-to-sort for tables.
//!
//! Tables carrying the opt-in attribute (`table-sort` by default) get their
//! header cells bound as sort triggers. Each press on a header cell steps
//! that column through ascending, descending and original order, moving the
//! existing row elements into place.
//!
//! ```ignore
//! use tabledom::{Document, Element};
//! use tablesort::TableSort;
//!
//! let mut doc = Document::from_element(
//!     Element::table()
//!         .flag("table-sort")
//!         .child(Element::thead().child(Element::tr().child(Element::th("Name"))))
//!         .child(
//!             Element::tbody()
//!                 .child(Element::tr().child(Element::td("b")))
//!                 .child(Element::tr().child(Element::td("a"))),
//!         ),
//! );
//! let sorter = TableSort::new();
//! sorter.init_all(&mut doc);
//! let header = doc.select_str(None, "th").unwrap()[0];
//! doc.click(header);
//! ```

use std::rc::Rc;

use tabledom::{Document, NodeId};

mod bootstrap;
mod config;
mod engine;
mod error;
mod reader;
mod registry;
mod state;
mod value;

pub use bootstrap::bootstrap;
pub use config::SortConfig;
pub use engine::{compare_records, sort_records};
pub use error::SortError;
pub use reader::{clear_read_data_func, read_data_func, set_read_data_func, ReadDataFn};
pub use state::{RowRecord, RowTag, SortDirection, TableState};
pub use value::{natural_cmp, CellValue, ColumnKind};

/// Sorter handle. Cheap to clone; every bound header cell holds one.
#[derive(Debug, Clone, Default)]
pub struct TableSort {
    config: Rc<SortConfig>,
}

impl TableSort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SortConfig) -> Self {
        Self {
            config: Rc::new(config),
        }
    }

    pub fn config(&self) -> &SortConfig {
        &self.config
    }

    /// Registration and sort state of `table`, if it has been seen.
    pub fn state(doc: &Document, table: NodeId) -> Option<&TableState> {
        doc.data::<TableState>(table)
    }
}
