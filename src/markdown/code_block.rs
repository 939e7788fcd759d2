//! Code Block Augmenter (markup side): wraps a highlighted fenced block with
//! a copy control carrying the percent-encoded original source.
//!
//! The click side lives in [`crate::clipboard::CopyController`].

use std::fmt::Write;

/// Class identifying the copy control. Clicks are matched against it.
pub const COPY_BUTTON_CLASS: &str = "copy-btn";
/// Attribute holding the percent-encoded source.
pub const COPY_DATA_ATTR: &str = "data-code";

const COPY_ICON_SVG: &str = concat!(
    r#"<svg xmlns="http://www.w3.org/2000/svg" width="1.1em" height="1.1em" viewBox="0 0 32 32">"#,
    r#"<path fill="currentColor" d="M28 10v18H10V10h18m0-2H10a2 2 0 0 0-2 2v18a2 2 0 0 0 2 2h18a2 2 0 0 0 2-2V10a2 2 0 0 0-2-2Z"></path>"#,
    r#"<path fill="currentColor" d="M4 18H2V4a2 2 0 0 1 2-2h14v2H4Z"></path>"#,
    "</svg>"
);

/// `<pre><code>` for highlighted code. `language` may be empty.
pub fn code_element(highlighted: &str, language: &str) -> String {
    if language.is_empty() {
        format!("<pre><code class=\"hljs\">{highlighted}</code></pre>\n")
    } else {
        format!(
            "<pre><code class=\"hljs language-{}\">{highlighted}</code></pre>\n",
            html_escape::encode_double_quoted_attribute(language)
        )
    }
}

/// Percent-encode a fence body for the copy control's data attribute.
pub fn encode_payload(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

/// Wrap `code_html` (usually from [`code_element`]) with the copy control.
///
/// `label` is the text shown next to the icon ("Copy" or "Copied").
pub fn wrap_with_copy_control(code_html: &str, raw_source: &str, label: &str) -> String {
    let mut out = String::with_capacity(code_html.len() + raw_source.len() * 2 + 512);
    let _ = write!(
        out,
        "<div class=\"code-block relative\"><div class=\"{COPY_BUTTON_CLASS}\" {COPY_DATA_ATTR}=\"{}\">{COPY_ICON_SVG}<div class=\"copy-label\">{}</div></div>{code_html}</div>\n",
        encode_payload(raw_source),
        html_escape::encode_text(label),
    );
    out
}
