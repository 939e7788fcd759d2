//! Highlight Engine: wraps case-insensitive occurrences of the search term
//! in text nodes with a highlight `<span>`.
//!
//! Only text leaves are rewritten. Element tags and attributes are never
//! touched, and subtrees rooted at an excluded tag (`script`, `style`, `svg`
//! by default) are not entered at all.

use super::matcher::LiteralMatcher;
use super::types::HighlightOptions;
use crate::dom::{Document, Element, Node};

/// Reusable highlighter. Keeps the compiled matcher between passes; the term
/// itself is always passed in by the caller.
#[derive(Default)]
pub struct HighlightEngine {
    matcher: LiteralMatcher,
    options: HighlightOptions,
}

impl HighlightEngine {
    pub fn new(options: HighlightOptions) -> Self {
        Self {
            matcher: LiteralMatcher::new(),
            options,
        }
    }

    pub fn options(&self) -> &HighlightOptions {
        &self.options
    }

    /// Highlight below `root` in place. Returns the number of wrapped matches.
    ///
    /// An empty term is a no-op.
    pub fn highlight(&mut self, root: &mut Node, term: &str) -> usize {
        if term.is_empty() {
            return 0;
        }
        match root {
            Node::Element(el) if !self.options.is_excluded(&el.tag) => {
                self.highlight_children(el, term)
            }
            _ => 0,
        }
    }

    /// Highlight every top-level node of `doc`.
    pub fn highlight_document(&mut self, doc: &mut Document, term: &str) -> usize {
        if term.is_empty() {
            return 0;
        }
        self.highlight_nodes(doc.nodes_mut(), term)
    }

    /// Parse, highlight, serialize. Returns `markup` untouched when the term
    /// is empty or matches nothing.
    pub fn highlight_markup(&mut self, markup: &str, term: &str) -> String {
        if term.is_empty() {
            return markup.to_string();
        }
        let mut doc = Document::parse(markup);
        if self.highlight_document(&mut doc, term) == 0 {
            return markup.to_string();
        }
        doc.to_html()
    }

    fn highlight_children(&mut self, el: &mut Element, term: &str) -> usize {
        self.highlight_nodes(&mut el.children, term)
    }

    fn highlight_nodes(&mut self, nodes: &mut Vec<Node>, term: &str) -> usize {
        let mut count = 0;
        let mut rebuilt: Vec<Node> = Vec::with_capacity(nodes.len());
        for node in nodes.drain(..) {
            match node {
                Node::Text(text) => {
                    count += self.split_text(text, term, &mut rebuilt);
                }
                Node::Element(mut el) => {
                    if !self.options.is_excluded(&el.tag) {
                        count += self.highlight_children(&mut el, term);
                    }
                    rebuilt.push(Node::Element(el));
                }
                other => rebuilt.push(other),
            }
        }
        *nodes = rebuilt;
        count
    }

    /// Push `text` into `out` as plain and wrapped pieces.
    fn split_text(&mut self, text: String, term: &str, out: &mut Vec<Node>) -> usize {
        let matches = self.matcher.find_all(&text, term);
        if matches.is_empty() {
            out.push(Node::Text(text));
            return 0;
        }
        let mut pos = 0;
        for m in &matches {
            if m.range.start > pos {
                out.push(Node::text(&text[pos..m.range.start]));
            }
            out.push(
                Element::new("span")
                    .with_attr("class", self.options.wrapper_class.as_str())
                    .with_child(Node::text(&text[m.range.clone()]))
                    .into(),
            );
            pos = m.range.end;
        }
        if pos < text.len() {
            out.push(Node::text(&text[pos..]));
        }
        matches.len()
    }
}

/// Highlight below `root` with default options.
pub fn highlight(root: &mut Node, term: &str) -> usize {
    HighlightEngine::default().highlight(root, term)
}

/// Highlight a markup string with default options.
pub fn highlight_markup(markup: &str, term: &str) -> String {
    HighlightEngine::default().highlight_markup(markup, term)
}
