//! Delimiter Rewriter: `\[..\]` → `$$..$$` and `\(..\)` → `$..$`.
//!
//! The parser only understands dollar-delimited math, so bracket-style
//! delimiters are rewritten in the raw prose before inline tokenization.
//! Inline code spans are skipped by splitting on backticks: even segments
//! (outside code) and the trailing segment are rewritten, odd segments
//! (inside code) are left alone.
//!
//! An unmatched backtick or a multi-backtick code span flips the inside/outside
//! classification for the rest of the block. That is known behavior and is
//! kept as is.

use super::regexes::{re_bracket_display_math, re_paren_inline_math};
use super::stages::{Precondition, SourceStage};

/// Source stage converting bracket math delimiters to dollar delimiters.
#[derive(Debug, Clone, Copy, Default)]
pub struct DelimiterRewriter;

impl SourceStage for DelimiterRewriter {
    fn name(&self) -> &'static str {
        "latex_delimiters"
    }

    fn precondition(&self) -> Precondition {
        Precondition::BeforeInlineTokenization
    }

    fn rewrite(&self, text: &str) -> String {
        rewrite_delimiters(text)
    }
}

/// Rewrite bracket math delimiters outside inline code spans.
pub fn rewrite_delimiters(text: &str) -> String {
    if !text.contains('\\') {
        return text.to_string();
    }
    let segments: Vec<&str> = text.split('`').collect();
    let last = segments.len() - 1;
    segments
        .iter()
        .enumerate()
        .map(|(i, seg)| {
            if i % 2 == 0 || i == last {
                rewrite_segment(seg)
            } else {
                (*seg).to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("`")
}

fn rewrite_segment(segment: &str) -> String {
    let display = re_bracket_display_math()
        .replace_all(segment, |caps: &regex::Captures| format!("$${}$$", &caps[1]));
    re_paren_inline_math()
        .replace_all(&display, |caps: &regex::Captures| format!("${}$", &caps[1]))
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_paren_becomes_dollar() {
        assert_eq!(rewrite_delimiters(r"Hello \(x^2\) world"), "Hello $x^2$ world");
    }

    #[test]
    fn test_display_bracket_becomes_double_dollar() {
        assert_eq!(
            rewrite_delimiters("before \\[\na+b\n\\] after"),
            "before $$\na+b\n$$ after"
        );
    }

    #[test]
    fn test_code_span_content_is_untouched() {
        assert_eq!(
            rewrite_delimiters(r"`\(x\)` and \(y\)"),
            r"`\(x\)` and $y$"
        );
    }

    #[test]
    fn test_trailing_segment_after_odd_split_is_rewritten() {
        // Unmatched backtick: the final segment is still rewritten.
        assert_eq!(rewrite_delimiters(r"a ` \(z\)"), r"a ` $z$");
    }

    #[test]
    fn test_text_without_backslash_is_returned_as_is() {
        assert_eq!(rewrite_delimiters("plain `code` text"), "plain `code` text");
    }

    #[test]
    fn test_stage_metadata() {
        let stage = DelimiterRewriter;
        assert_eq!(stage.precondition(), Precondition::BeforeInlineTokenization);
        assert_eq!(stage.name(), "latex_delimiters");
    }
}
