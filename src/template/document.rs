//! Tokenized template documents
//!
//! [`TemplateDocument`] owns the template text plus the flat node list the
//! marker parser walks. Nodes are siblings in document order; there is no
//! nesting at this level, which matches the next-sibling navigation the
//! parser relies on.
//!
//! The node list is recomputed from scratch on every mutation (full rescan,
//! never an incremental patch). Prompt templates are small, so the rescan
//! cost is irrelevant next to the correctness it buys.

use logos::Logos;

use super::tokens::Token;

/// A leaf node in the tokenized document: a kind plus a half-open byte span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    pub kind: Token,
    pub from: usize,
    pub to: usize,
}

impl Node {
    pub fn len(&self) -> usize {
        self.to - self.from
    }

    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }

    /// Check if a byte offset falls inside this node's span.
    pub fn contains(&self, offset: usize) -> bool {
        self.from <= offset && offset < self.to
    }
}

/// Template text plus its tokenization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDocument {
    text: String,
    nodes: Vec<Node>,
}

impl TemplateDocument {
    /// Create a document and tokenize it eagerly.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let nodes = Self::scan(&text);
        Self { text, nodes }
    }

    fn scan(text: &str) -> Vec<Node> {
        let mut lexer = Token::lexer(text);
        let mut nodes = Vec::new();
        while let Some(result) = lexer.next() {
            let span = lexer.span();
            nodes.push(Node {
                // The token set is total; treat any residue as plain text.
                kind: result.unwrap_or(Token::Text),
                from: span.start,
                to: span.end,
            });
        }
        nodes
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// All nodes in document order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Slice the underlying text by byte offsets, clamped to the document
    /// and snapped back to char boundaries.
    pub fn slice(&self, from: usize, to: usize) -> &str {
        let from = self.snap(from.min(self.text.len()));
        let to = self.snap(to.clamp(from, self.text.len()));
        &self.text[from..to]
    }

    /// The node whose span contains the given offset, with its index.
    pub fn node_at(&self, offset: usize) -> Option<(usize, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .find(|(_, node)| node.contains(offset))
    }

    /// The node following `index` in document order, if any.
    pub fn next_sibling(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index + 1)
    }

    /// Replace a byte range with new text and rescan the whole document.
    /// Out-of-bounds or inverted ranges are clamped rather than rejected,
    /// mirroring editor-dispatch tolerance.
    pub fn replace_range(&mut self, from: usize, to: usize, insert: &str) {
        let from = self.snap(from.min(self.text.len()));
        let to = self.snap(to.clamp(from, self.text.len()));
        self.text.replace_range(from..to, insert);
        self.nodes = Self::scan(&self.text);
    }

    /// Insert text at a cursor offset.
    pub fn insert(&mut self, at: usize, text: &str) {
        self.replace_range(at, at, text);
    }

    fn snap(&self, mut offset: usize) -> usize {
        while offset > 0 && !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }
}
