//! The sort routine: marker update, row data, ordering and reconciliation.

use std::cmp::Ordering;
use std::collections::HashMap;

use tabledom::{table, Document, Element, NodeId};

use crate::TableSort;
use crate::error::SortError;
use crate::reader::{read_cell, read_data_func};
use crate::registry::detect_header;
use crate::state::{RowRecord, RowTag, SortDirection, TableState};
use crate::value::{natural_cmp, ColumnKind};

impl TableSort {
    /// Sort `table` by `column` exactly as a press on that column's header
    /// cell would. Returns the direction the table ends up in.
    pub fn sort(&self, doc: &mut Document, table: NodeId, column: usize) -> Result<SortDirection, SortError> {
        check_table(doc, table)?;
        let header_row = registration(doc, table)?.header_row;
        let cell = header_row
            .and_then(|row| table::cells(doc, row).get(column).copied())
            .ok_or(SortError::NoHeaderCell { table, column })?;
        self.sort_by_cell(doc, table, column, cell)
    }

    /// Drop the cached row data of `table`. The next sort re-reads the rows
    /// and takes their current order as the original one.
    pub fn refresh(&self, doc: &mut Document, table: NodeId) -> Result<(), SortError> {
        check_table(doc, table)?;
        if let Some(state) = doc.data_mut::<TableState>(table) {
            state.rows = None;
        }
        log::debug!("[tablesort] row data of table {table} invalidated");
        Ok(())
    }

    /// The click routine behind every header cell.
    pub(crate) fn sort_by_cell(
        &self,
        doc: &mut Document,
        table: NodeId,
        column: usize,
        cell: NodeId,
    ) -> Result<SortDirection, SortError> {
        check_table(doc, table)?;
        let direction = self.update_marker(doc, table, column, cell)?;

        build_rows(doc, table)?;
        let mut rows = registration(doc, table)?.rows.take().unwrap_or_default();
        sort_records(&mut rows, column, direction);
        let placed = reconcile(doc, table, &rows);
        registration(doc, table)?.rows = Some(rows);
        placed?;

        log::debug!("[tablesort] table {table} sorted by column {column}: {direction:?}");
        Ok(direction)
    }

    /// Advance the direction and move the marker to `cell`.
    fn update_marker(
        &self,
        doc: &mut Document,
        table: NodeId,
        column: usize,
        cell: NodeId,
    ) -> Result<SortDirection, SortError> {
        let (marked, previous) = {
            let state = registration(doc, table)?;
            (state.marked_cell, state.direction)
        };

        if let Some(marked) = marked {
            self.remove_marker(doc, marked);
        }
        // A different column always restarts the cycle.
        let direction = if marked == Some(cell) {
            previous.next()
        } else {
            SortDirection::None.next()
        };

        let state = registration(doc, table)?;
        state.direction = direction;
        state.column = direction.is_sorted().then_some(column);
        state.marked_cell = direction.is_sorted().then_some(cell);

        if let Some(glyph) = self.glyph(direction) {
            let marker = doc.append_element(cell, Element::span(format!("\u{a0}{glyph}")))?;
            doc.add_class(marker, &self.config.marker_class)?;
        }
        Ok(direction)
    }

    fn glyph(&self, direction: SortDirection) -> Option<char> {
        match direction {
            SortDirection::None => None,
            SortDirection::Ascending => Some(self.config.ascending_glyph),
            SortDirection::Descending => Some(self.config.descending_glyph),
        }
    }

    fn remove_marker(&self, doc: &mut Document, cell: NodeId) {
        let class = self.config.marker_class.as_str();
        let marker = doc
            .descendants(cell)
            .into_iter()
            .find(|&n| doc.has_class(n, class));
        if let Some(marker) = marker {
            // The marker may already be gone if the host rewrote the cell.
            let _ = doc.remove(marker);
        }
    }
}

/// Order `rows` for `direction` on `column`.
///
/// Ascending uses the natural comparator (absent values last); descending
/// negates the whole comparison, absent rule included, so absent values come
/// first. `None` restores original order by id. The sort is stable.
pub fn sort_records(rows: &mut [RowRecord], column: usize, direction: SortDirection) {
    match direction {
        SortDirection::None => rows.sort_by_key(|r| r.id),
        SortDirection::Ascending | SortDirection::Descending => {
            let kind = ColumnKind::detect(rows.iter().map(|r| r.value(column)));
            rows.sort_by(|a, b| {
                let ord = natural_cmp(a.value(column), b.value(column), kind);
                if direction == SortDirection::Descending {
                    ord.reverse()
                } else {
                    ord
                }
            });
        }
    }
}

/// Comparator outcome for two records, as [`sort_records`] applies it.
pub fn compare_records(a: &RowRecord, b: &RowRecord, column: usize, kind: ColumnKind, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::None => a.id.cmp(&b.id),
        SortDirection::Ascending => natural_cmp(a.value(column), b.value(column), kind),
        SortDirection::Descending => natural_cmp(a.value(column), b.value(column), kind).reverse(),
    }
}

fn check_table(doc: &Document, table: NodeId) -> Result<(), SortError> {
    if !doc.exists(table) {
        return Err(SortError::Detached(table));
    }
    if doc.tag(table) != Some("table") {
        return Err(SortError::NotATable(table));
    }
    if !doc.is_attached(table) {
        return Err(SortError::Detached(table));
    }
    Ok(())
}

/// The registration state of `table`, created on first encounter. Header
/// detection runs here too when the initializer never saw the table.
fn registration(doc: &mut Document, table: NodeId) -> Result<&mut TableState, SortError> {
    let needs_header = {
        let state = doc.data_or_default::<TableState>(table)?;
        !state.initialized && state.header_row.is_none()
    };
    if needs_header {
        let (header_row, exclude_first_row) = detect_header(doc, table);
        let state = doc.data_or_default::<TableState>(table)?;
        state.header_row = header_row;
        state.exclude_first_row = exclude_first_row;
    }
    Ok(doc.data_or_default::<TableState>(table)?)
}

/// Build the row data of `table` unless it is cached.
fn build_rows(doc: &mut Document, table: NodeId) -> Result<(), SortError> {
    let (header_row, exclude_first_row) = {
        let state = registration(doc, table)?;
        if state.rows.is_some() {
            return Ok(());
        }
        (state.header_row, state.exclude_first_row)
    };

    let reader = read_data_func();
    let body = table::body_rows(doc, table);
    let mut records = Vec::with_capacity(body.len());
    for (id, row) in body.into_iter().enumerate() {
        doc.set_data(row, RowTag(id))?;
        // The stand-in header row is structure, not data.
        if exclude_first_row && Some(row) == header_row {
            continue;
        }
        let values = table::data_cells(doc, row)
            .into_iter()
            .map(|cell| read_cell(reader.as_ref(), doc, cell, table))
            .collect();
        records.push(RowRecord::new(id, values));
    }

    log::debug!("[tablesort] built {} row record(s) for table {table}", records.len());
    registration(doc, table)?.rows = Some(records);
    Ok(())
}

/// Move body rows into the order of `rows` without recreating them.
fn reconcile(doc: &mut Document, table: NodeId, rows: &[RowRecord]) -> Result<(), SortError> {
    let (header_row, exclude_first_row) = {
        let state = registration(doc, table)?;
        (state.header_row, state.exclude_first_row)
    };

    let body = table::body_rows(doc, table);
    let by_id: HashMap<usize, NodeId> = body
        .iter()
        .filter_map(|&row| doc.data::<RowTag>(row).map(|tag| (tag.0, row)))
        .collect();

    // Rows are placed after the stand-in header when it sits among the body
    // rows, otherwise where the first body row currently is.
    let header_anchor = header_row.filter(|h| exclude_first_row && body.contains(h));
    let first_slot = body.iter().copied().find(|&row| Some(row) != header_anchor);

    let mut prev: Option<NodeId> = None;
    // The last row falls into place once all others are positioned.
    for record in rows.iter().take(rows.len().saturating_sub(1)) {
        let Some(&row) = by_id.get(&record.id) else {
            log::trace!("[tablesort] row {} of table {table} is gone", record.id);
            continue;
        };
        match (prev, header_anchor, first_slot) {
            (Some(prev), _, _) => doc.insert_after(prev, row)?,
            (None, Some(header), _) => doc.insert_after(header, row)?,
            (None, None, Some(first)) => doc.insert_before(first, row)?,
            (None, None, None) => {}
        }
        log::trace!("[tablesort] placed row {} ({row})", record.id);
        prev = Some(row);
    }
    Ok(())
}
