//! Table traversal helpers. Only a table's own sections and rows are
//! visited; rows of nested tables belong to their own table.

use crate::document::Document;
use crate::node::NodeId;

/// Section a row lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Head,
    Body,
    Foot,
    /// Row placed directly under the `table` element.
    Bare,
}

impl Section {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "thead" => Some(Section::Head),
            "tbody" => Some(Section::Body),
            "tfoot" => Some(Section::Foot),
            _ => None,
        }
    }
}

/// Every row of `table` in document order, with its section.
pub fn rows(doc: &Document, table: NodeId) -> Vec<(Section, NodeId)> {
    let mut out = Vec::new();
    for child in doc.element_children(table) {
        match doc.tag(child) {
            Some("tr") => out.push((Section::Bare, child)),
            Some(tag) => {
                if let Some(section) = Section::from_tag(tag) {
                    out.extend(doc.children_by_tag(child, "tr").into_iter().map(|r| (section, r)));
                }
            }
            None => {}
        }
    }
    out
}

/// Rows of the table's header sections.
pub fn head_rows(doc: &Document, table: NodeId) -> Vec<NodeId> {
    section_rows(doc, table, Section::Head)
}

/// Rows of the table's body: rows of its `tbody` sections, or rows placed
/// directly under the table when it has no `tbody`.
pub fn body_rows(doc: &Document, table: NodeId) -> Vec<NodeId> {
    let body = section_rows(doc, table, Section::Body);
    if body.is_empty() && first_body(doc, table).is_none() {
        section_rows(doc, table, Section::Bare)
    } else {
        body
    }
}

fn section_rows(doc: &Document, table: NodeId, section: Section) -> Vec<NodeId> {
    rows(doc, table)
        .into_iter()
        .filter(|(s, _)| *s == section)
        .map(|(_, r)| r)
        .collect()
}

/// The first `tbody` of the table, if any.
pub fn first_body(doc: &Document, table: NodeId) -> Option<NodeId> {
    doc.children_by_tag(table, "tbody").into_iter().next()
}

/// Cell elements (`th` and `td`) of a row.
pub fn cells(doc: &Document, row: NodeId) -> Vec<NodeId> {
    doc.element_children(row)
        .into_iter()
        .filter(|&c| matches!(doc.tag(c), Some("th" | "td")))
        .collect()
}

/// Data cells (`td` only) of a row.
pub fn data_cells(doc: &Document, row: NodeId) -> Vec<NodeId> {
    doc.children_by_tag(row, "td")
}
