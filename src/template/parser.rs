//! Marker-pair parser
//!
//! Parses marker pairs of the form `{#Mark key="value"#}content{#/Mark#}`
//! out of a tokenized template document. One [`TemplateParser`] handles one
//! mark name; its patterns are compiled once at construction.
//!
//! Matching is first-open to first-available-close over next siblings only.
//! Nested pairs of the same mark name are not supported: an inner open would
//! still pair with the nearest following close. Marks produced by a scan are
//! therefore in document order and non-overlapping in practice.
//!
//! All queries are total: no match means `None`, mutations with no enclosing
//! mark are silent no-ops.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::attrs::AttrMap;
use super::document::{Node, TemplateDocument};

/// Attribute text is split on runs of whitespace before key/value parsing.
static ATTR_SPLIT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// A half-open byte interval into the template text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarkRange {
    pub from: usize,
    pub to: usize,
}

/// A complete matched marker pair.
///
/// `from`/`to` span the whole marked region, open marker through close
/// marker inclusive: `from == open.from`, `to == close.to`, and
/// `open.to <= close.from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarkRangeInfo {
    pub from: usize,
    pub to: usize,
    pub open: MarkRange,
    pub close: MarkRange,
}

impl MarkRangeInfo {
    /// The content range between the markers.
    pub fn content(&self) -> MarkRange {
        MarkRange {
            from: self.open.to,
            to: self.close.from,
        }
    }
}

/// Maps a click inside a marker span onto the whole marked region, so that
/// selecting any part of a marker selects the full block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectionEnlargerSpec {
    pub source: MarkRange,
    pub target: MarkRange,
}

/// Derived view over one scan: selection-enlarger specs, content ranges,
/// and the marks themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkSpecs {
    pub specs: Vec<SelectionEnlargerSpec>,
    pub contents: Vec<MarkRange>,
    pub marks: Vec<MarkRangeInfo>,
}

/// The pieces of a generated template, for callers that store open/close
/// markers and display text separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateParts {
    pub open: String,
    pub close: String,
    pub text_content: String,
    pub template: String,
}

/// Parser for one mark name.
#[derive(Debug)]
pub struct TemplateParser {
    mark: String,
    open_regex: Regex,
    close_regex: Regex,
    data_regex: Regex,
    strip_regex: Regex,
}

impl TemplateParser {
    /// Compile the patterns for a mark name. Mark names are used verbatim in
    /// marker text, so regex metacharacters are escaped.
    pub fn new(mark: &str) -> Self {
        let escaped = regex::escape(mark);
        Self {
            mark: mark.to_string(),
            open_regex: Regex::new(&format!(r"^\{{#\s*{escaped}")).unwrap(),
            close_regex: Regex::new(&format!(r"^\{{#\s*/{escaped}")).unwrap(),
            data_regex: Regex::new(&format!(r"\{{#{escaped}\s+([^#]+)#\}}")).unwrap(),
            strip_regex: Regex::new(&format!(
                r"\{{#{escaped}\s+[^#]+#\}}|\{{#/{escaped}#\}}"
            ))
            .unwrap(),
        }
    }

    pub fn mark(&self) -> &str {
        &self.mark
    }

    /// Check whether a node is an open marker for this mark.
    pub fn is_open_node(&self, node: &Node, doc: &TemplateDocument) -> bool {
        node.kind.is_comment() && self.open_regex.is_match(doc.slice(node.from, node.to))
    }

    /// Check whether a node is a close marker for this mark.
    pub fn is_close_node(&self, node: &Node, doc: &TemplateDocument) -> bool {
        node.kind.is_comment() && self.close_regex.is_match(doc.slice(node.from, node.to))
    }

    /// Walk the open node's next siblings for the matching close marker.
    /// Unmatched opens are tolerated and yield `None`.
    pub fn find_close_node(&self, doc: &TemplateDocument, open_index: usize) -> Option<usize> {
        let nodes = doc.nodes();
        (open_index + 1..nodes.len()).find(|&i| self.is_close_node(&nodes[i], doc))
    }

    /// Extract `key="value"` attributes from an open marker's text.
    ///
    /// Attribute text is whitespace-split; each part is split at its first
    /// `=`, with matching surrounding quotes (plain `"` or escaped `\"`)
    /// stripped from the value. Parts without `=` are skipped. `None` when
    /// the text is not an open marker with attributes at all.
    pub fn get_data(&self, template: &str) -> Option<AttrMap> {
        let captures = self.data_regex.captures(template)?;
        let attributes = captures.get(1)?.as_str().trim();
        let mut data = AttrMap::new();
        for part in ATTR_SPLIT_REGEX.split(attributes) {
            let Some(eq) = part.find('=') else { continue };
            let key = &part[..eq];
            let mut value = &part[eq + 1..];
            if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
                value = &value[1..value.len() - 1];
            } else if value.len() >= 4 && value.starts_with("\\\"") && value.ends_with("\\\"") {
                value = &value[2..value.len() - 2];
            }
            data.insert(key, value);
        }
        Some(data)
    }

    /// Scan the whole document for matched pairs, in document order.
    pub fn get_all_marks(&self, doc: &TemplateDocument) -> Vec<MarkRangeInfo> {
        let nodes = doc.nodes();
        let mut marks = Vec::new();
        for (index, node) in nodes.iter().enumerate() {
            if !self.is_open_node(node, doc) {
                continue;
            }
            if let Some(close_index) = self.find_close_node(doc, index) {
                let close = &nodes[close_index];
                marks.push(MarkRangeInfo {
                    from: node.from,
                    to: close.to,
                    open: MarkRange {
                        from: node.from,
                        to: node.to,
                    },
                    close: MarkRange {
                        from: close.from,
                        to: close.to,
                    },
                });
            }
        }
        marks
    }

    /// Selection-enlarger projection over a scan: clicking inside either
    /// marker selects the whole region; contents are the inner ranges.
    pub fn mark_specs(&self, doc: &TemplateDocument) -> MarkSpecs {
        let marks = self.get_all_marks(doc);
        let mut specs = Vec::with_capacity(marks.len() * 2);
        let mut contents = Vec::with_capacity(marks.len());
        for mark in &marks {
            let target = MarkRange {
                from: mark.from,
                to: mark.to,
            };
            specs.push(SelectionEnlargerSpec {
                source: mark.open,
                target,
            });
            specs.push(SelectionEnlargerSpec {
                source: mark.close,
                target,
            });
            contents.push(mark.content());
        }
        MarkSpecs {
            specs,
            contents,
            marks,
        }
    }

    /// The mark strictly containing an offset. Boundaries are exclusive:
    /// offsets touching `from` or `to` are outside.
    pub fn position_in_mark(&self, doc: &TemplateDocument, offset: usize) -> Option<MarkRangeInfo> {
        self.get_all_marks(doc)
            .into_iter()
            .find(|mark| mark.from < offset && offset < mark.to)
    }

    /// The mark containing a cursor head, if any.
    pub fn cursor_in_mark(&self, doc: &TemplateDocument, cursor: usize) -> Option<MarkRangeInfo> {
        self.position_in_mark(doc, cursor)
    }

    /// The mark containing a selection: both endpoints must be strictly
    /// interior to a mark; the mark containing `to` is returned.
    pub fn selection_in_mark(
        &self,
        doc: &TemplateDocument,
        from: usize,
        to: usize,
    ) -> Option<MarkRangeInfo> {
        self.position_in_mark(doc, from)
            .and(self.position_in_mark(doc, to))
    }

    /// Attributes of the open marker enclosing the cursor.
    pub fn cursor_data(&self, doc: &TemplateDocument, cursor: usize) -> Option<AttrMap> {
        let mark = self.cursor_in_mark(doc, cursor)?;
        self.get_data(doc.slice(mark.open.from, mark.open.to))
    }

    /// Content between the markers enclosing the cursor.
    pub fn cursor_content(&self, doc: &TemplateDocument, cursor: usize) -> Option<String> {
        let mark = self.cursor_in_mark(doc, cursor)?;
        Some(doc.slice(mark.open.to, mark.close.from).to_string())
    }

    /// Merge new attributes over the open marker enclosing the cursor and
    /// rewrite it in canonical form. Existing keys are updated in place, new
    /// keys appended. No enclosing mark is a silent no-op; an open marker
    /// whose attributes cannot be parsed is rewritten from `data` alone.
    pub fn update_cursor_data(&self, doc: &mut TemplateDocument, cursor: usize, data: &AttrMap) {
        let Some(mark) = self.cursor_in_mark(doc, cursor) else {
            return;
        };
        let open_text = doc.slice(mark.open.from, mark.open.to).to_string();
        match self.get_data(&open_text) {
            Some(mut merged) => {
                merged.merge(data);
                let new_text = self.generate_open_template(&merged);
                doc.replace_range(mark.open.from, mark.open.to, &new_text);
            }
            None => self.add_cursor_data(doc, cursor, data),
        }
    }

    /// Rewrite the open marker enclosing the cursor from `data`, merged over
    /// whatever attributes it already parses to.
    pub fn add_cursor_data(&self, doc: &mut TemplateDocument, cursor: usize, data: &AttrMap) {
        let Some(mark) = self.cursor_in_mark(doc, cursor) else {
            return;
        };
        let open_text = doc.slice(mark.open.from, mark.open.to).to_string();
        let mut merged = self.get_data(&open_text).unwrap_or_default();
        merged.merge(data);
        let new_text = self.generate_open_template(&merged);
        doc.replace_range(mark.open.from, mark.open.to, &new_text);
    }

    /// Replace the content between the markers enclosing the cursor.
    pub fn update_cursor_content(&self, doc: &mut TemplateDocument, cursor: usize, content: &str) {
        let Some(mark) = self.cursor_in_mark(doc, cursor) else {
            return;
        };
        doc.replace_range(mark.open.to, mark.close.from, content);
    }

    /// Insert a template at a cursor offset.
    pub fn insert_template_at(&self, doc: &mut TemplateDocument, cursor: usize, template: &str) {
        doc.insert(cursor, template);
    }

    /// Replace a selection range with a template.
    pub fn insert_template_in_range(
        &self,
        doc: &mut TemplateDocument,
        from: usize,
        to: usize,
        template: &str,
    ) {
        doc.replace_range(from, to, template);
    }

    /// Canonical open marker text for an attribute map: `{#Mark k="v" ...#}`,
    /// space-joined in map order. Deterministic regeneration is what makes
    /// parse → mutate → regenerate round-trip stable.
    pub fn generate_open_template(&self, data: &AttrMap) -> String {
        let attrs = data
            .iter()
            .map(|(key, value)| format!("{key}=\"{value}\""))
            .collect::<Vec<_>>()
            .join(" ");
        format!("{{#{} {}#}}", self.mark, attrs)
    }

    /// Canonical close marker text: `{#/Mark#}`.
    pub fn close_template(&self) -> String {
        format!("{{#/{}#}}", self.mark)
    }

    /// A full template: open marker, content, close marker.
    pub fn generate_template(&self, content: &str, data: &AttrMap) -> String {
        format!(
            "{}{}{}",
            self.generate_open_template(data),
            content,
            self.close_template()
        )
    }

    /// A full template plus its pieces and marker-stripped display text.
    pub fn generate_template_parts(&self, content: &str, data: &AttrMap) -> TemplateParts {
        let open = self.generate_open_template(data);
        let close = self.close_template();
        TemplateParts {
            template: format!("{open}{content}{close}"),
            text_content: self.extract_template_content(content),
            open,
            close,
        }
    }

    /// Strip every open/close marker occurrence from a template string,
    /// leaving display-only text. Purely textual: user content that happens
    /// to look like marker syntax is stripped too (accepted limitation).
    pub fn extract_template_content(&self, template: &str) -> String {
        self.strip_regex.replace_all(template, "").into_owned()
    }
}
