//! Parsed markup documents.
//!
//! Rendering produces markup as a string; anything that needs to mutate it
//! afterwards (search highlighting, diagram substitution, event targeting)
//! parses it into a [`Document`] of [`Node`]s first.

mod node;
mod parse;
mod serialize;
mod target;

pub use node::{Element, Node};
pub use parse::parse_fragment;
pub use serialize::{element_to_html, to_html};
pub use target::{ElementInfo, EventTarget};

/// Errors raised when addressing nodes inside a [`Document`].
#[derive(Debug, thiserror::Error)]
pub enum DomError {
    #[error("no element at path {0:?}")]
    InvalidPath(Vec<usize>),
}

/// A parsed markup fragment: an ordered list of top-level nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// Parse a markup fragment.
    pub fn parse(markup: &str) -> Self {
        Self {
            nodes: parse_fragment(markup),
        }
    }

    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut Vec<Node> {
        &mut self.nodes
    }

    /// Serialize back to markup.
    pub fn to_html(&self) -> String {
        to_html(&self.nodes)
    }

    /// Concatenated text of every text node, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            node.collect_text(&mut out);
        }
        out
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        self.nodes
            .iter()
            .filter_map(Node::as_element)
            .find_map(|el| el.find_by_id(id))
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.nodes
            .iter_mut()
            .filter_map(Node::as_element_mut)
            .find_map(|el| el.find_by_id_mut(id))
    }

    /// First element in document order matching `pred`.
    pub fn find_first(&self, pred: impl Fn(&Element) -> bool) -> Option<&Element> {
        self.nodes
            .iter()
            .filter_map(Node::as_element)
            .find_map(|el| el.find_first(&pred))
    }

    /// Every element matching `pred`, in document order.
    pub fn find_all(&self, pred: impl Fn(&Element) -> bool) -> Vec<&Element> {
        let mut out = Vec::new();
        for el in self.nodes.iter().filter_map(Node::as_element) {
            el.find_all(&pred, &mut out);
        }
        out
    }

    /// Path (child indices from the top level) of the first element matching `pred`.
    pub fn find_path(&self, pred: impl Fn(&Element) -> bool) -> Option<Vec<usize>> {
        fn walk(
            nodes: &[Node],
            pred: &dyn Fn(&Element) -> bool,
            path: &mut Vec<usize>,
        ) -> bool {
            for (i, node) in nodes.iter().enumerate() {
                if let Node::Element(el) = node {
                    path.push(i);
                    if pred(el) || walk(&el.children, pred, path) {
                        return true;
                    }
                    path.pop();
                }
            }
            false
        }

        let mut path = Vec::new();
        walk(&self.nodes, &pred, &mut path).then_some(path)
    }

    /// Build the event target for the element at `path`: that element and
    /// every ancestor, innermost first.
    pub fn target_at(&self, path: &[usize]) -> Result<EventTarget, DomError> {
        let mut chain = Vec::with_capacity(path.len());
        let mut nodes = &self.nodes;
        for &idx in path {
            let el = nodes
                .get(idx)
                .and_then(Node::as_element)
                .ok_or_else(|| DomError::InvalidPath(path.to_vec()))?;
            chain.push(ElementInfo::of(el));
            nodes = &el.children;
        }
        if chain.is_empty() {
            return Err(DomError::InvalidPath(Vec::new()));
        }
        chain.reverse();
        Ok(EventTarget::new(chain))
    }
}
