//! Marker-pair parsing for prompt templates
//!
//! A template embeds reusable blocks with comment-style marker pairs:
//!
//! ```text
//! {#LibraryBlock id="42" version="3"#}block content{#/LibraryBlock#}
//! ```
//!
//! [`TemplateDocument`] tokenizes template text into a flat list of sibling
//! nodes; [`TemplateParser`] classifies comment nodes as open/close markers
//! for one mark name, matches pairs, extracts attributes, and performs
//! structure-preserving edits. [`ParserRegistry`] shares compiled parsers
//! across call sites without global state.

pub mod attrs;
pub mod document;
pub mod parser;
pub mod registry;
pub mod tokens;

pub use attrs::AttrMap;
pub use document::{Node, TemplateDocument};
pub use parser::{
    MarkRange, MarkRangeInfo, MarkSpecs, SelectionEnlargerSpec, TemplateParser, TemplateParts,
};
pub use registry::ParserRegistry;
pub use tokens::Token;
