//! Markup string → [`Node`] tree, via `scraper`'s HTML5 fragment parser.

use super::node::{Element, Node};
use scraper::{ElementRef, Html};

/// Parse a markup fragment into top-level nodes.
///
/// HTML5 error recovery applies: unclosed tags are closed, stray end tags
/// dropped. Never fails.
pub fn parse_fragment(markup: &str) -> Vec<Node> {
    let fragment = Html::parse_fragment(markup);
    // Fragments are parsed under a synthetic <html> root; its children are ours.
    convert_children(fragment.root_element())
}

fn convert_children(parent: ElementRef<'_>) -> Vec<Node> {
    let mut nodes = Vec::new();
    for child in parent.children() {
        if let Some(el) = ElementRef::wrap(child) {
            nodes.push(Node::Element(convert_element(el)));
            continue;
        }
        match child.value() {
            scraper::Node::Text(text) => {
                let content: &str = text;
                // Adjacent text nodes can appear after recovery; merge them.
                if let Some(Node::Text(prev)) = nodes.last_mut() {
                    prev.push_str(content);
                } else {
                    nodes.push(Node::Text(content.to_owned()));
                }
            }
            scraper::Node::Comment(comment) => {
                let content: &str = comment;
                nodes.push(Node::Comment(content.to_owned()));
            }
            _ => {}
        }
    }
    nodes
}

fn convert_element(el: ElementRef<'_>) -> Element {
    let value = el.value();
    Element {
        tag: value.name().to_owned(),
        attrs: value
            .attrs
            .iter()
            // Foreign content keeps its prefix: `xlink:href`, `xmlns:xlink`.
            .map(|(name, v)| {
                let key = match &name.prefix {
                    Some(prefix) => format!("{prefix}:{}", name.local),
                    None => name.local.to_string(),
                };
                (key, v.to_string())
            })
            .collect(),
        children: convert_children(el),
    }
}

