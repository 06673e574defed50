//! Token definitions for prompt template text
//!
//! Templates mix plain text with Jinja-style constructs. Only two of them
//! matter to the marker parser: comments (`{# ... #}`), which carry the
//! open/close markers, and everything else, which the parser walks past.
//! The tokens are defined using the logos derive macro for efficient
//! tokenization; the set is total over arbitrary input (any character is
//! covered by `Text` or the lone-brace fallback).

use logos::Logos;

/// All token kinds produced when scanning template text.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Token {
    /// A comment span `{# ... #}`, ending at the first `#}`.
    /// Marker pairs are comments whose text matches the mark patterns.
    #[regex(r"\{#[^#]*(#+[^#}][^#]*)*#+\}")]
    Comment,

    /// A variable interpolation `{{ ... }}`, ending at the first `}}`.
    #[regex(r"\{\{[^}]*(\}[^}]+)*\}\}")]
    Variable,

    /// Plain text (anything not starting a brace construct).
    #[regex(r"[^{]+")]
    Text,

    /// A lone `{` that does not open a comment or variable.
    #[token("{")]
    Brace,
}

impl Token {
    /// Check if this token is a comment span (the only kind the marker
    /// parser classifies further).
    pub fn is_comment(&self) -> bool {
        matches!(self, Token::Comment)
    }
}
