//! Property-based tests for marker attribute handling
//!
//! Attribute round-trip is the contract the mutation helpers lean on:
//! regenerating an open marker from parsed attributes must be lossless, so
//! parse → merge → regenerate leaves untouched attributes intact. Values
//! here stay within what the marker grammar supports: no whitespace, no
//! quotes, no `#` (the original grammar never hardened those either).

use promptmark::template::{AttrMap, TemplateDocument, TemplateParser};
use proptest::prelude::*;

/// Generate valid attribute keys
fn attr_key_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}"
}

/// Generate valid attribute values (no quotes, whitespace, or hashes)
fn attr_value_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        // Plain identifiers
        "[a-zA-Z0-9_]{0,12}",
        // Version-ish values
        "[0-9]{1,4}\\.[0-9]{1,4}",
        // Id-ish values with separators
        "[a-z0-9]{1,8}(-[a-z0-9]{1,8}){0,2}",
    ]
}

/// Generate non-empty attribute maps with distinct keys
fn attr_map_strategy() -> impl Strategy<Value = AttrMap> {
    proptest::collection::hash_map(attr_key_strategy(), attr_value_strategy(), 1..6)
        .prop_map(|entries| entries.into_iter().collect())
}

proptest! {
    /// get_data inverts generate_open_template for any valid attribute map.
    #[test]
    fn round_trip_attributes(data in attr_map_strategy()) {
        let parser = TemplateParser::new("LibraryBlock");
        let open = parser.generate_open_template(&data);
        let parsed = parser.get_data(&open);
        prop_assert_eq!(parsed, Some(data));
    }

    /// A generated template always scans back to exactly one mark whose
    /// content range holds the original content.
    #[test]
    fn generated_template_scans_to_one_mark(
        data in attr_map_strategy(),
        content in "[a-zA-Z0-9 .,!?]{0,30}",
    ) {
        let parser = TemplateParser::new("InputSlot");
        let template = parser.generate_template(&content, &data);
        let doc = TemplateDocument::new(template);

        let marks = parser.get_all_marks(&doc);
        prop_assert_eq!(marks.len(), 1);
        let mark = marks[0];
        prop_assert_eq!(mark.from, 0);
        prop_assert_eq!(mark.to, doc.len());
        prop_assert_eq!(doc.slice(mark.open.to, mark.close.from), content.as_str());

        // Stripping the markers recovers the content.
        prop_assert_eq!(parser.extract_template_content(doc.text()), content);
    }

    /// Merging a patch and regenerating is idempotent: a second identical
    /// update does not change the document again.
    #[test]
    fn update_is_idempotent(
        data in attr_map_strategy(),
        patch in attr_map_strategy(),
    ) {
        let parser = TemplateParser::new("LibraryBlock");
        let template = parser.generate_template("content", &data);
        let mut doc = TemplateDocument::new(template);
        let cursor = doc.nodes()[0].to + 1; // inside "content"

        parser.update_cursor_data(&mut doc, cursor, &patch);
        let after_first = doc.text().to_string();

        let mark = parser.get_all_marks(&doc)[0];
        parser.update_cursor_data(&mut doc, mark.open.to + 1, &patch);
        prop_assert_eq!(doc.text(), after_first.as_str());
    }
}
