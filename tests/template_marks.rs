//! Integration tests for marker-pair scanning, matching, and mutation
//!
//! These exercise the full path a prompt editor takes: tokenize a template,
//! scan it for marker pairs, query by cursor position, and apply
//! structure-preserving edits followed by a rescan.

use promptmark::template::{AttrMap, ParserRegistry, TemplateDocument, TemplateParser};
use rstest::rstest;

const LIBRARY_DOC: &str = r##"{#LibraryBlock id="42"#}hello{#/LibraryBlock#}"##;

#[test]
fn single_mark_end_to_end() {
    let parser = TemplateParser::new("LibraryBlock");
    let doc = TemplateDocument::new(LIBRARY_DOC);

    let marks = parser.get_all_marks(&doc);
    assert_eq!(marks.len(), 1);

    let open_text = doc.slice(marks[0].open.from, marks[0].open.to);
    let data = parser.get_data(open_text).unwrap();
    assert_eq!(data.get("id"), Some("42"));

    insta::assert_snapshot!(parser.extract_template_content(LIBRARY_DOC), @"hello");
}

#[test]
fn sequential_marks_pair_in_document_order() {
    let parser = TemplateParser::new("InputSlot");
    let doc = TemplateDocument::new(concat!(
        r##"Write a poem about {#InputSlot placeholder="topic"#}cats{#/InputSlot#}"##,
        r##" in the style of {#InputSlot placeholder="style"#}haiku{#/InputSlot#}."##,
    ));

    let marks = parser.get_all_marks(&doc);
    assert_eq!(marks.len(), 2);
    // A1 pairs with close1, not close2.
    assert!(marks[0].close.to <= marks[1].open.from);
    assert_eq!(doc.slice(marks[0].open.to, marks[0].close.from), "cats");
    assert_eq!(doc.slice(marks[1].open.to, marks[1].close.from), "haiku");

    let specs = parser.mark_specs(&doc);
    assert_eq!(specs.specs.len(), 4);
    assert_eq!(specs.contents.len(), 2);
}

#[test]
fn unmatched_open_is_tolerated() {
    let parser = TemplateParser::new("LibraryBlock");
    let doc = TemplateDocument::new(r##"before {#LibraryBlock id="1"#} after, never closed"##);
    assert!(parser.get_all_marks(&doc).is_empty());
}

#[test]
fn mixed_marks_do_not_interfere() {
    let mut registry = ParserRegistry::new();
    let doc = TemplateDocument::new(concat!(
        r##"{#LibraryBlock id="1"#}lib{#/LibraryBlock#}"##,
        r##"{#InputSlot placeholder="p"#}slot{#/InputSlot#}"##,
    ));

    let library_marks = registry.get_or_create("LibraryBlock").get_all_marks(&doc);
    assert_eq!(library_marks.len(), 1);
    assert_eq!(
        doc.slice(library_marks[0].open.to, library_marks[0].close.from),
        "lib"
    );

    let slot_marks = registry.get_or_create("InputSlot").get_all_marks(&doc);
    assert_eq!(slot_marks.len(), 1);
    assert_eq!(
        doc.slice(slot_marks[0].open.to, slot_marks[0].close.from),
        "slot"
    );
}

// Offsets relative to the mark's span: boundaries are exclusive, interior
// offsets hit.
#[rstest]
#[case(0, false)]
#[case(1, true)]
#[case(24, true)] // inside the content
#[case(45, true)]
#[case(46, false)]
fn point_containment_boundaries(#[case] offset: usize, #[case] inside: bool) {
    let parser = TemplateParser::new("LibraryBlock");
    let doc = TemplateDocument::new(LIBRARY_DOC);
    assert_eq!(doc.len(), 46);
    assert_eq!(parser.position_in_mark(&doc, offset).is_some(), inside);
}

#[test]
fn cursor_edits_survive_rescan() {
    let parser = TemplateParser::new("LibraryBlock");
    let mut doc = TemplateDocument::new(LIBRARY_DOC);
    let cursor = 26; // inside "hello"

    let patch: AttrMap = [("version", "2")].into_iter().collect();
    parser.update_cursor_data(&mut doc, cursor, &patch);
    assert_eq!(
        doc.text(),
        r##"{#LibraryBlock id="42" version="2"#}hello{#/LibraryBlock#}"##
    );

    // The content is still addressable after the attribute rewrite.
    let mark = parser.get_all_marks(&doc)[0];
    let inside = mark.open.to + 1;
    parser.update_cursor_content(&mut doc, inside, "goodbye");
    assert_eq!(
        doc.text(),
        r##"{#LibraryBlock id="42" version="2"#}goodbye{#/LibraryBlock#}"##
    );

    let data = parser.cursor_data(&doc, mark.open.to + 1).unwrap();
    assert_eq!(data.get("id"), Some("42"));
    assert_eq!(data.get("version"), Some("2"));
}

#[test]
fn insert_template_into_selection() {
    let parser = TemplateParser::new("InputSlot");
    let mut doc = TemplateDocument::new("Write about dogs please");
    let data: AttrMap = [("placeholder", "topic")].into_iter().collect();
    let template = parser.generate_template("dogs", &data);

    // Replace the word "dogs" (offsets 12..16) with a marked slot.
    parser.insert_template_in_range(&mut doc, 12, 16, &template);
    assert_eq!(
        doc.text(),
        r##"Write about {#InputSlot placeholder="topic"#}dogs{#/InputSlot#} please"##
    );
    assert_eq!(parser.get_all_marks(&doc).len(), 1);
}

#[test]
fn extract_strips_all_marker_occurrences() {
    let parser = TemplateParser::new("InputSlot");
    let template = concat!(
        r##"{#InputSlot placeholder="a"#}one{#/InputSlot#}"##,
        " and ",
        r##"{#InputSlot placeholder="b"#}two{#/InputSlot#}"##,
    );
    insta::assert_snapshot!(parser.extract_template_content(template), @"one and two");
}
