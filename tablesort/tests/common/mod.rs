#![allow(dead_code)]

use tabledom::{table, Document, Element, NodeId};
use tablesort::RowTag;

/// Sortable table with a `thead` header row.
pub fn sortable(header: &[&str], rows: &[&[&str]]) -> Element {
    Element::table()
        .flag("table-sort")
        .child(Element::thead().child(header_row(header)))
        .child(Element::tbody().children(rows.iter().map(|r| data_row(r))))
}

/// Sortable table without a header section; the first body row holds `th`
/// cells and acts as the header.
pub fn headless(header: &[&str], rows: &[&[&str]]) -> Element {
    Element::table().flag("table-sort").child(
        Element::tbody()
            .child(header_row(header))
            .children(rows.iter().map(|r| data_row(r))),
    )
}

pub fn header_row(cells: &[&str]) -> Element {
    Element::tr().children(cells.iter().map(|c| Element::th(*c)))
}

pub fn data_row(cells: &[&str]) -> Element {
    Element::tr().children(cells.iter().map(|c| Element::td(*c)))
}

pub fn doc_with(table: Element) -> (Document, NodeId) {
    let doc = Document::from_element(Element::div().child(table));
    let table = doc.select_str(None, "table").unwrap()[0];
    (doc, table)
}

/// Header cells of the table's header row.
pub fn headers(doc: &Document, table: NodeId) -> Vec<NodeId> {
    doc.select_str(Some(table), "th").unwrap()
}

/// Text of column `col` for each body row, in DOM order. Rows without such a
/// cell yield "-".
pub fn column(doc: &Document, table: NodeId, col: usize) -> Vec<String> {
    table::body_rows(doc, table)
        .into_iter()
        .map(|row| {
            table::cells(doc, row)
                .get(col)
                .map(|&c| doc.text(c))
                .unwrap_or_else(|| "-".to_string())
        })
        .collect()
}

/// Original-order ids of the body rows, in DOM order.
pub fn row_ids(doc: &Document, table: NodeId) -> Vec<usize> {
    table::body_rows(doc, table)
        .into_iter()
        .filter_map(|row| doc.data::<RowTag>(row).map(|t| t.0))
        .collect()
}

/// Header cells currently bearing a marker.
pub fn marked(doc: &Document, table: NodeId) -> Vec<NodeId> {
    doc.select_str(Some(table), ".table-sort-marker")
        .unwrap()
        .into_iter()
        .filter_map(|m| doc.parent(m))
        .collect()
}
