//! Case-insensitive literal matching.

use super::types::HighlightMatch;
use regex::{Regex, RegexBuilder};

/// Finds a literal term in text, ignoring case. The term is escaped, so
/// regex metacharacters in it match themselves.
#[derive(Default)]
pub struct LiteralMatcher {
    /// Cached compiled regex for the current term.
    cached_regex: Option<(String, Regex)>, // (term, compiled)
}

impl LiteralMatcher {
    pub fn new() -> Self {
        Self { cached_regex: None }
    }

    /// All non-overlapping matches of `term` in `text`. Empty for an empty term.
    pub fn find_all(&mut self, text: &str, term: &str) -> Vec<HighlightMatch> {
        if term.is_empty() || text.is_empty() {
            return Vec::new();
        }
        let regex = match self.get_or_compile_regex(term) {
            Ok(re) => re,
            Err(e) => {
                // Only reachable when the escaped pattern exceeds size limits.
                log::debug!("search term {:?} not compilable: {}", term, e);
                return Vec::new();
            }
        };
        regex
            .find_iter(text)
            .filter(|m| !m.is_empty())
            .map(|m| HighlightMatch::new(m.start(), m.end()))
            .collect()
    }

    /// Get cached regex or compile a new one.
    fn get_or_compile_regex(&mut self, term: &str) -> Result<&Regex, regex::Error> {
        let needs_recompile = match &self.cached_regex {
            Some((cached_term, _)) => cached_term != term,
            None => true,
        };

        if needs_recompile {
            let regex = RegexBuilder::new(&regex::escape(term))
                .case_insensitive(true)
                .build()?;
            self.cached_regex = Some((term.to_string(), regex));
        }

        Ok(&self
            .cached_regex
            .as_ref()
            .expect("cached_regex was just set to Some above if it was None")
            .1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_literal() {
        let mut m = LiteralMatcher::new();
        let found = m.find_all("Error, error, ERROR", "error");
        assert_eq!(found.len(), 3);
        assert_eq!(found[1].range, 7..12);
    }

    #[test]
    fn test_metacharacters_are_literal() {
        let mut m = LiteralMatcher::new();
        assert!(m.find_all("abc", "a.c").is_empty());
        assert_eq!(m.find_all("x a.c (y)", "a.c").len(), 1);
        assert_eq!(m.find_all("call f(x)", "f(x)").len(), 1);
    }

    #[test]
    fn test_empty_term_finds_nothing() {
        let mut m = LiteralMatcher::new();
        assert!(m.find_all("anything", "").is_empty());
    }

    #[test]
    fn test_cache_follows_term_changes() {
        let mut m = LiteralMatcher::new();
        assert_eq!(m.find_all("foo bar", "foo").len(), 1);
        assert_eq!(m.find_all("foo bar", "bar").len(), 1);
        assert!(m.find_all("foo bar", "baz").is_empty());
    }
}
