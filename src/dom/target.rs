//! Event targets: the element chain a pointer event bubbles through.

use super::node::Element;

/// Attributes of one element on an event's propagation path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ElementInfo {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
}

impl ElementInfo {
    /// Snapshot an element's tag and attributes.
    pub fn of(el: &Element) -> Self {
        Self {
            tag: el.tag.clone(),
            attrs: el.attrs.clone(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|list| list.split_whitespace().any(|c| c == class))
    }
}

/// The element that received an event plus its ancestors, innermost first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventTarget {
    chain: Vec<ElementInfo>,
}

impl EventTarget {
    /// Build from an innermost-first chain.
    pub fn new(chain: Vec<ElementInfo>) -> Self {
        Self { chain }
    }

    /// A target outside every known element (e.g. the bare window).
    pub fn outside() -> Self {
        Self::default()
    }

    /// Shorthand for a target whose ancestry is a list of ids, innermost first.
    pub fn within_ids(ids: &[&str]) -> Self {
        Self::new(
            ids.iter()
                .map(|id| ElementInfo {
                    tag: "div".to_string(),
                    attrs: vec![("id".to_string(), (*id).to_string())],
                })
                .collect(),
        )
    }

    /// Innermost-first propagation path.
    pub fn chain(&self) -> &[ElementInfo] {
        &self.chain
    }

    /// Whether the element with `id` is the target or one of its ancestors.
    pub fn is_within(&self, id: &str) -> bool {
        self.chain.iter().any(|el| el.id() == Some(id))
    }

    /// Nearest element on the path carrying `class`.
    pub fn closest_with_class(&self, class: &str) -> Option<&ElementInfo> {
        self.chain.iter().find(|el| el.has_class(class))
    }
}
