//! Parser registry
//!
//! Compiling a [`TemplateParser`] builds four regexes, so call sites that
//! share a mark name should share the instance. Sharing goes through an
//! explicit registry owned by the consumer and passed by reference, not a
//! process-wide singleton table: isolated registries keep tests and
//! embedders independent of each other.

use std::collections::HashMap;

use super::parser::TemplateParser;

/// Owned map from mark name to its compiled parser.
#[derive(Debug, Default)]
pub struct ParserRegistry {
    parsers: HashMap<String, TemplateParser>,
}

impl ParserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The parser for a mark name, compiling it on first request. Repeated
    /// calls with the same name return the same instance.
    pub fn get_or_create(&mut self, mark: &str) -> &TemplateParser {
        self.parsers
            .entry(mark.to_string())
            .or_insert_with(|| TemplateParser::new(mark))
    }

    /// The parser for a mark name, if already compiled.
    pub fn get(&self, mark: &str) -> Option<&TemplateParser> {
        self.parsers.get(mark)
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}
