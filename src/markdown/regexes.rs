//! Compiled regular expressions shared by the source stages and inline rules.
//!
//! Each accessor uses a `OnceLock` to compile the pattern at most once.

use regex::Regex;
use std::sync::OnceLock;

/// `\[ ... \]` display math, non-greedy, may span lines.
pub(super) fn re_bracket_display_math() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)\\\[(.*?)\\\]")
            .expect("re_bracket_display_math: pattern is valid and should always compile")
    })
}

/// `\( ... \)` inline math, non-greedy, may span lines.
pub(super) fn re_paren_inline_math() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)\\\((.*?)\\\)")
            .expect("re_paren_inline_math: pattern is valid and should always compile")
    })
}

/// Bare URLs with a scheme, or starting with `www.`.
pub(super) fn re_url() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?x)
            \b(?:
                (?:https?|ftps?)://[^\s<>{}|\\^`\[\]]+
                |
                www\.[^\s<>{}|\\^`\[\]]+
            )",
        )
        .expect("re_url: pattern is valid and should always compile")
    })
}

/// Characters allowed between the colons of an emoji shortcode.
pub(super) fn re_shortcode_body() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_+\-]+$")
            .expect("re_shortcode_body: pattern is valid and should always compile")
    })
}
