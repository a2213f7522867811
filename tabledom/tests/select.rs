use tabledom::{Document, Element, NodeId, Selector};

fn page() -> Document {
    Document::from_element(
        Element::div()
            .id("page")
            .child(
                Element::table()
                    .id("people")
                    .flag("table-sort")
                    .child(Element::thead().child(Element::tr().child(Element::th("Name"))))
                    .child(
                        Element::tbody()
                            .child(Element::tr().class("odd").child(Element::td("ann")))
                            .child(Element::tr().child(Element::td("bob"))),
                    ),
            )
            .child(
                Element::table()
                    .id("plain")
                    .child(Element::tr().child(Element::td("x"))),
            ),
    )
}

fn ids(doc: &Document, nodes: &[NodeId]) -> Vec<String> {
    nodes
        .iter()
        .map(|&n| doc.attr(n, "id").map(str::to_string).unwrap_or_else(|| doc.text(n)))
        .collect()
}

// ============================================================================
// Document-wide Selection
// ============================================================================

#[test]
fn test_select_by_attribute() {
    let doc = page();
    let tables = doc.select_str(None, "[table-sort]").unwrap();
    assert_eq!(ids(&doc, &tables), vec!["people"]);
}

#[test]
fn test_select_by_tag_in_document_order() {
    let doc = page();
    let tables = doc.select_str(None, "table").unwrap();
    assert_eq!(ids(&doc, &tables), vec!["people", "plain"]);
}

#[test]
fn test_select_descendant_combinator() {
    let doc = page();
    let rows = doc.select_str(None, "tbody tr").unwrap();
    assert_eq!(ids(&doc, &rows), vec!["ann", "bob"]);
}

#[test]
fn test_select_class_and_list() {
    let doc = page();
    let odd = doc.select_str(None, "tr.odd").unwrap();
    assert_eq!(ids(&doc, &odd), vec!["ann"]);

    let mixed = doc.select_str(None, "th, tr.odd td").unwrap();
    assert_eq!(ids(&doc, &mixed), vec!["Name", "ann"]);
}

#[test]
fn test_select_attribute_value() {
    let doc = page();
    let found = doc.select_str(None, "table[id=\"plain\"]").unwrap();
    assert_eq!(ids(&doc, &found), vec!["plain"]);
    assert!(doc.select_str(None, "table[id=nope]").unwrap().is_empty());
}

// ============================================================================
// Scoped Selection
// ============================================================================

#[test]
fn test_scoped_selection_excludes_outside_nodes() {
    let doc = page();
    let people = doc.select_str(None, "#people").unwrap()[0];
    let cells = doc.select_str(Some(people), "td").unwrap();
    assert_eq!(ids(&doc, &cells), vec!["ann", "bob"]);
}

#[test]
fn test_scoped_selection_ancestors_may_be_outside_scope() {
    let doc = page();
    let people = doc.select_str(None, "#people").unwrap()[0];
    // "div" only matches outside the scope, like querySelectorAll.
    let cells = doc.select_str(Some(people), "div td").unwrap();
    assert_eq!(ids(&doc, &cells), vec!["ann", "bob"]);
}

#[test]
fn test_select_first() {
    let doc = page();
    let sel = Selector::parse("tr").unwrap();
    let first = doc.select_first(None, &sel).unwrap();
    assert_eq!(doc.text(first), "Name");
}

#[test]
fn test_universal_steps_require_intermediate_elements() {
    let doc = Document::from_element(
        Element::div().child(Element::new("p").child(Element::td("near"))).child(
            Element::new("section").child(Element::new("p").child(Element::td("far"))),
        ),
    );
    let found = doc.select_str(None, "div * * td").unwrap();
    assert_eq!(ids(&doc, &found), vec!["far"]);

    let found = doc.select_str(None, "div * td").unwrap();
    assert_eq!(ids(&doc, &found), vec!["near", "far"]);
}
