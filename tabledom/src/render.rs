use unicode_width::UnicodeWidthStr;

use crate::document::Document;
use crate::node::NodeId;
use crate::table::{self, Section};

const SEPARATOR: &str = " | ";

pub fn display_width(s: &str) -> usize {
    s.width()
}

fn pad_to_width(s: &str, width: usize) -> String {
    let mut out = s.to_string();
    out.push_str(&" ".repeat(width.saturating_sub(display_width(s))));
    out
}

/// Display width of each column, measured over every row of the table.
pub fn column_widths(doc: &Document, table: NodeId) -> Vec<usize> {
    let mut widths: Vec<usize> = Vec::new();
    for (_, row) in table::rows(doc, table) {
        for (i, cell) in table::cells(doc, row).into_iter().enumerate() {
            let w = display_width(&doc.text(cell));
            match widths.get_mut(i) {
                Some(existing) => *existing = (*existing).max(w),
                None => widths.push(w),
            }
        }
    }
    widths
}

/// Render the table as an aligned text grid, one line per row. Header
/// sections are followed by a rule line.
pub fn render_table(doc: &Document, table: NodeId) -> String {
    let widths = column_widths(doc, table);
    let rows = table::rows(doc, table);
    let mut lines = Vec::with_capacity(rows.len() + 1);

    for (i, (section, row)) in rows.iter().enumerate() {
        let cells: Vec<String> = table::cells(doc, *row)
            .into_iter()
            .enumerate()
            .map(|(col, cell)| pad_to_width(&doc.text(cell), widths.get(col).copied().unwrap_or(0)))
            .collect();
        lines.push(cells.join(SEPARATOR).trim_end().to_string());

        let next_is_head = rows.get(i + 1).is_some_and(|(s, _)| *s == Section::Head);
        if *section == Section::Head && !next_is_head {
            let total = widths.iter().sum::<usize>()
                + SEPARATOR.len() * widths.len().saturating_sub(1);
            lines.push("-".repeat(total));
        }
    }

    lines.join("\n")
}

/// Column under horizontal offset `x` of a rendered line.
pub fn column_at(doc: &Document, table: NodeId, x: usize) -> Option<usize> {
    let mut start = 0;
    for (i, width) in column_widths(doc, table).into_iter().enumerate() {
        if x >= start && x < start + width + SEPARATOR.len() {
            return Some(i);
        }
        start += width + SEPARATOR.len();
    }
    None
}
