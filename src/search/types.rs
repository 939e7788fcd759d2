//! Types for search highlighting.

use std::ops::Range;

/// One occurrence of the search term inside a single text node.
///
/// Computed during a highlight pass and dropped when the pass ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HighlightMatch {
    /// Byte range within the text node.
    pub range: Range<usize>,
}

impl HighlightMatch {
    pub fn new(start: usize, end: usize) -> Self {
        Self { range: start..end }
    }
}

/// Wrapper styling and traversal limits for a highlight pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HighlightOptions {
    /// Class list of the `<span>` wrapped around each match.
    pub wrapper_class: String,
    /// Tags whose subtrees are never entered. Compared case-insensitively.
    pub excluded_tags: Vec<String>,
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Self::from_config(&chatmark_config::SearchConfig::default())
    }
}

impl HighlightOptions {
    pub fn from_config(config: &chatmark_config::SearchConfig) -> Self {
        Self {
            wrapper_class: config.highlight_class.clone(),
            excluded_tags: config.excluded_tags.clone(),
        }
    }

    pub fn is_excluded(&self, tag: &str) -> bool {
        self.excluded_tags
            .iter()
            .any(|t| t.eq_ignore_ascii_case(tag))
    }
}
