//! Per-table registration and sort state.
//!
//! Stored in the document's per-node side-table: [`TableState`] on the table
//! element, [`RowTag`] on each body row. Both go away with their element.

use tabledom::NodeId;

use crate::value::CellValue;

static ABSENT: CellValue = CellValue::Absent;

/// Position in the NONE → ASC → DESC → NONE cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    /// Original row order.
    #[default]
    None,
    Ascending,
    Descending,
}

impl SortDirection {
    /// One step along the cycle.
    pub fn next(self) -> Self {
        match self {
            SortDirection::None => SortDirection::Ascending,
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::None,
        }
    }

    pub fn is_sorted(self) -> bool {
        self != SortDirection::None
    }
}

/// Original-order index of a body row, assigned when row data is first
/// built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowTag(pub usize);

/// Cached sort keys of one body row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowRecord {
    /// Original position among the body rows.
    pub id: usize,
    pub values: Vec<CellValue>,
}

impl RowRecord {
    pub fn new(id: usize, values: Vec<CellValue>) -> Self {
        Self { id, values }
    }

    /// Value of `column`; absent when the row has no such cell.
    pub fn value(&self, column: usize) -> &CellValue {
        self.values.get(column).unwrap_or(&ABSENT)
    }
}

/// Registration and sort state of one sortable table.
#[derive(Debug, Clone, Default)]
pub struct TableState {
    pub(crate) initialized: bool,
    pub(crate) exclude_first_row: bool,
    pub(crate) header_row: Option<NodeId>,
    pub(crate) column: Option<usize>,
    pub(crate) direction: SortDirection,
    pub(crate) marked_cell: Option<NodeId>,
    pub(crate) rows: Option<Vec<RowRecord>>,
}

impl TableState {
    pub fn initialized(&self) -> bool {
        self.initialized
    }

    /// True when the table has no header section and its first row acts as
    /// the header.
    pub fn exclude_first_row(&self) -> bool {
        self.exclude_first_row
    }

    pub fn header_row(&self) -> Option<NodeId> {
        self.header_row
    }

    /// Sorted column, `None` while in original order.
    pub fn column(&self) -> Option<usize> {
        self.column
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Header cell currently bearing the direction marker.
    pub fn marked_cell(&self) -> Option<NodeId> {
        self.marked_cell
    }

    /// Cached row data in current sorted order, once built.
    pub fn rows(&self) -> Option<&[RowRecord]> {
        self.rows.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_cycle() {
        let start = SortDirection::default();
        assert_eq!(start, SortDirection::None);
        assert_eq!(start.next(), SortDirection::Ascending);
        assert_eq!(start.next().next(), SortDirection::Descending);
        assert_eq!(start.next().next().next(), SortDirection::None);
        assert!(!start.is_sorted());
        assert!(start.next().is_sorted());
    }

    #[test]
    fn test_missing_cell_is_absent() {
        let record = RowRecord::new(0, vec![CellValue::from("a")]);
        assert_eq!(record.value(0), &CellValue::from("a"));
        assert!(record.value(3).is_absent());
    }
}
