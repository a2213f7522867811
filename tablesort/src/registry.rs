//! Discovery of sortable tables and binding of their header cells.

use tabledom::{table, Document, NodeId};

use crate::TableSort;
use crate::error::SortError;
use crate::state::TableState;

impl TableSort {
    /// Initialize every sortable table in the document.
    ///
    /// Already initialized tables are left untouched, so this can be called
    /// again after new tables are added. Returns how many tables were newly
    /// initialized.
    pub fn init_all(&self, doc: &mut Document) -> usize {
        let root = doc.root();
        self.init_within(doc, root)
    }

    /// Initialize the sortable tables inside `scope` (the scope included).
    pub fn init_within(&self, doc: &mut Document, scope: NodeId) -> usize {
        let mut candidates = doc.descendants(scope);
        candidates.insert(0, scope);

        let attribute = self.config.marker_attribute.as_str();
        let tables: Vec<NodeId> = candidates
            .into_iter()
            .filter(|&n| doc.has_attr(n, attribute))
            .filter(|&n| {
                let is_table = doc.tag(n) == Some("table");
                if !is_table {
                    log::debug!("[tablesort] ignoring [{attribute}] on non-table {n}");
                }
                is_table
            })
            .collect();

        let mut initialized = 0;
        for table in tables {
            match self.init_table(doc, table) {
                Ok(true) => initialized += 1,
                Ok(false) => {}
                Err(err) => log::warn!("[tablesort] failed to initialize table {table}: {err}"),
            }
        }
        initialized
    }

    /// Register `table` and bind its header cells. Returns false when the
    /// table was already initialized.
    fn init_table(&self, doc: &mut Document, table: NodeId) -> Result<bool, SortError> {
        if doc.data_or_default::<TableState>(table)?.initialized {
            return Ok(false);
        }

        let (header_row, exclude_first_row) = detect_header(doc, table);
        let cells = header_row
            .map(|row| table::cells(doc, row))
            .unwrap_or_default();
        for (column, cell) in cells.iter().enumerate() {
            self.bind_header_cell(doc, *cell, column)?;
        }

        let state = doc.data_or_default::<TableState>(table)?;
        state.header_row = header_row;
        state.exclude_first_row = exclude_first_row;
        state.initialized = true;

        log::debug!(
            "[tablesort] initialized table {table}: {} column(s), exclude_first_row={exclude_first_row}",
            cells.len()
        );
        Ok(true)
    }

    /// Make `cell` the sort trigger for `column` of its table.
    pub fn bind_header_cell(&self, doc: &mut Document, cell: NodeId, column: usize) -> Result<(), SortError> {
        doc.set_style(cell, "cursor", self.config.cursor.as_str())?;
        doc.add_listener(cell, tabledom::EventKind::SelectStart, |_, cx| {
            cx.prevent_default();
        });

        let sorter = self.clone();
        doc.add_listener(cell, self.config.trigger, move |doc, cx| {
            if !cx.event.is_primary() {
                return;
            }
            cx.stop_propagation();

            let cell = cx.current_target;
            let Some(table) = doc.closest(cell, "table") else {
                log::warn!("[tablesort] header cell {cell} is not inside a table");
                return;
            };
            if let Err(err) = sorter.sort_by_cell(doc, table, column, cell) {
                log::warn!("[tablesort] sorting table {table} by column {column} failed: {err}");
            }
        });
        Ok(())
    }
}

/// The header row of `table`: the first row of a header section, or the
/// first row of the table when it has none. The flag tells whether the
/// fallback was used.
pub(crate) fn detect_header(doc: &Document, table: NodeId) -> (Option<NodeId>, bool) {
    match table::head_rows(doc, table).first() {
        Some(&row) => (Some(row), false),
        None => (table::rows(doc, table).first().map(|&(_, row)| row), true),
    }
}
