//! # promptmark
//!
//! Parsing and data-reconciliation primitives for a prompt-engineering
//! product. Two independent, pure components live here:
//!
//! - [`template`] — marker-pair parsing for prompt templates: locating
//!   matched `{#Mark ...#} ... {#/Mark#}` pairs in tokenized template text,
//!   extracting attributes from open markers, and applying structure-
//!   preserving edits.
//! - [`contrast`] — flattening nested experiment-contrast API results into
//!   row records keyed by (group, turn), plus column-based lookups for
//!   table rendering.
//!
//! Both components are synchronous, allocation-light data transforms: no
//! I/O, no shared mutable state. Absent matches are `None`, never panics.

#![allow(rustdoc::invalid_html_tags)]

pub mod contrast;
pub mod template;
