mod common;

use common::{column, doc_with, headers, headless, marked, row_ids, sortable};
use tabledom::{Document, Element, EventKind, ReadyState};
use tablesort::{bootstrap, SortConfig, SortDirection, SortError, TableSort};

// ============================================================================
// Header Detection
// ============================================================================

#[test]
fn test_thead_row_is_header() {
    let (mut doc, table) = doc_with(sortable(&["Name", "Qty"], &[&["a", "1"]]));
    assert_eq!(TableSort::new().init_all(&mut doc), 1);

    let state = TableSort::state(&doc, table).unwrap();
    assert!(state.initialized());
    assert!(!state.exclude_first_row());
    for th in headers(&doc, table) {
        assert_eq!(doc.listener_count(th, EventKind::MouseDown), 1);
        assert_eq!(doc.listener_count(th, EventKind::SelectStart), 1);
    }
}

#[test]
fn test_first_row_is_header_without_thead() {
    let (mut doc, table) = doc_with(headless(&["Name"], &[&["b"], &["a"]]));
    TableSort::new().init_all(&mut doc);

    let state = TableSort::state(&doc, table).unwrap();
    assert!(state.exclude_first_row());
    let th = headers(&doc, table)[0];
    assert_eq!(state.header_row(), doc.parent(th));
    assert_eq!(doc.listener_count(th, EventKind::MouseDown), 1);
}

#[test]
fn test_td_header_cells_are_bound() {
    // A plain first row of td cells still acts as the header.
    let (mut doc, table) = doc_with(
        Element::table()
            .flag("table-sort")
            .child(Element::tr().child(Element::td("Name")))
            .child(Element::tr().child(Element::td("b")))
            .child(Element::tr().child(Element::td("a"))),
    );
    TableSort::new().init_all(&mut doc);
    let first = doc.select_str(Some(table), "td").unwrap()[0];
    assert_eq!(doc.listener_count(first, EventKind::MouseDown), 1);

    doc.click(first);
    // The header row stays first and now carries the ascending marker.
    assert_eq!(column(&doc, table, 0), vec!["Name\u{a0}\u{25BE}", "a", "b"]);
    assert_eq!(marked(&doc, table), vec![first]);
    assert_eq!(tabledom::table::body_rows(&doc, table)[0], doc.parent(first).unwrap());
}

#[test]
fn test_empty_table_binds_nothing() {
    let (mut doc, table) = doc_with(Element::table().flag("table-sort"));
    let sorter = TableSort::new();
    assert_eq!(sorter.init_all(&mut doc), 1);

    let state = TableSort::state(&doc, table).unwrap();
    assert!(state.initialized());
    assert_eq!(state.header_row(), None);
    assert_eq!(
        sorter.sort(&mut doc, table, 0),
        Err(SortError::NoHeaderCell { table, column: 0 })
    );
}

#[test]
fn test_header_without_body_rows_sorts_trivially() {
    let (mut doc, table) = doc_with(sortable(&["Name"], &[]));
    let sorter = TableSort::new();
    sorter.init_all(&mut doc);

    assert_eq!(sorter.sort(&mut doc, table, 0), Ok(SortDirection::Ascending));
    assert!(row_ids(&doc, table).is_empty());
    assert_eq!(TableSort::state(&doc, table).unwrap().rows(), Some(&[][..]));
}

// ============================================================================
// Idempotence
// ============================================================================

#[test]
fn test_repeated_init_binds_once() {
    let (mut doc, table) = doc_with(sortable(&["Name"], &[&["b"], &["a"], &["c"]]));
    let sorter = TableSort::new();
    assert_eq!(sorter.init_all(&mut doc), 1);
    assert_eq!(sorter.init_all(&mut doc), 0);

    let th = headers(&doc, table)[0];
    assert_eq!(doc.listener_count(th, EventKind::MouseDown), 1);

    // A doubly bound handler would advance twice per click.
    let outcome = doc.mouse_down(th, tabledom::MouseButton::Left);
    assert_eq!(outcome.handled, 1);
    assert_eq!(column(&doc, table, 0), vec!["a", "b", "c"]);
}

#[test]
fn test_init_picks_up_new_tables_only() {
    let (mut doc, first) = doc_with(sortable(&["Name"], &[&["b"], &["a"]]));
    let sorter = TableSort::new();
    sorter.init_all(&mut doc);

    let host = doc.parent(first).unwrap();
    let second = doc
        .append_element(host, sortable(&["Other"], &[&["y"], &["x"]]))
        .unwrap();
    assert_eq!(sorter.init_all(&mut doc), 1);

    assert_eq!(doc.listener_count(headers(&doc, first)[0], EventKind::MouseDown), 1);
    assert_eq!(doc.listener_count(headers(&doc, second)[0], EventKind::MouseDown), 1);

    doc.click(headers(&doc, second)[0]);
    assert_eq!(column(&doc, second, 0), vec!["x", "y"]);
    assert_eq!(column(&doc, first, 0), vec!["b", "a"]);
}

#[test]
fn test_init_within_scope() {
    let mut doc = Document::from_element(
        Element::div()
            .child(Element::div().id("left").child(sortable(&["A"], &[&["1"]])))
            .child(Element::div().id("right").child(sortable(&["B"], &[&["2"]]))),
    );
    let left = doc.select_str(None, "#left").unwrap()[0];
    let tables = doc.select_str(None, "table").unwrap();

    assert_eq!(TableSort::new().init_within(&mut doc, left), 1);
    assert!(TableSort::state(&doc, tables[0]).is_some());
    assert!(TableSort::state(&doc, tables[1]).is_none());
}

#[test]
fn test_unmarked_and_non_table_elements_are_ignored() {
    let mut doc = Document::from_element(
        Element::div()
            .flag("table-sort")
            .child(Element::table().child(Element::tr().child(Element::th("x")))),
    );
    assert_eq!(TableSort::new().init_all(&mut doc), 0);
    let th = doc.select_str(None, "th").unwrap()[0];
    assert_eq!(doc.listener_count(th, EventKind::MouseDown), 0);
}

#[test]
fn test_custom_marker_attribute() {
    let table = Element::table()
        .flag("data-sortable")
        .child(Element::thead().child(Element::tr().child(Element::th("N"))))
        .child(Element::tbody().child(Element::tr().child(Element::td("1"))));
    let (mut doc, _) = doc_with(table);

    assert_eq!(TableSort::new().init_all(&mut doc), 0);
    let sorter = TableSort::with_config(SortConfig::new().marker_attribute("data-sortable"));
    assert_eq!(sorter.init_all(&mut doc), 1);
}

// ============================================================================
// Bootstrap
// ============================================================================

#[test]
fn test_bootstrap_waits_for_ready() {
    let (mut doc, table) = doc_with(sortable(&["Name"], &[&["b"], &["a"]]));
    assert_eq!(doc.ready_state(), ReadyState::Loading);

    bootstrap(Some(&mut doc), TableSort::new()).unwrap();
    assert!(TableSort::state(&doc, table).is_none());

    doc.mark_ready();
    assert!(TableSort::state(&doc, table).unwrap().initialized());

    doc.click(headers(&doc, table)[0]);
    assert_eq!(column(&doc, table, 0), vec!["a", "b"]);
}

#[test]
fn test_bootstrap_on_ready_document_runs_now() {
    let (mut doc, table) = doc_with(sortable(&["Name"], &[&["b"], &["a"]]));
    doc.mark_ready();

    bootstrap(Some(&mut doc), TableSort::new()).unwrap();
    assert!(TableSort::state(&doc, table).unwrap().initialized());
}

#[test]
fn test_bootstrap_without_document_is_inert() {
    assert_eq!(
        bootstrap(None, TableSort::new()),
        Err(SortError::DocumentUnavailable)
    );
}
