//! Bare-URL auto-linking for prose text.

use super::regexes::re_url;

/// Trailing characters that end a sentence rather than a URL.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', ')', '\'', '"'];

/// A URL found in a text run, by byte range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMatch {
    pub start: usize,
    pub end: usize,
    pub href: String,
}

/// Find bare URLs in `text`.
pub fn find_urls(text: &str) -> Vec<UrlMatch> {
    re_url()
        .find_iter(text)
        .filter_map(|m| {
            let raw = m.as_str().trim_end_matches(TRAILING_PUNCTUATION);
            if raw.is_empty() {
                return None;
            }
            let href = if raw.starts_with("www.") {
                format!("http://{raw}")
            } else {
                raw.to_string()
            };
            Some(UrlMatch {
                start: m.start(),
                end: m.start() + raw.len(),
                href,
            })
        })
        .collect()
}

/// Escape `text` into HTML with every bare URL wrapped in an anchor.
/// Returns `None` when the text holds no URL.
pub fn linkify_to_html(text: &str) -> Option<String> {
    let urls = find_urls(text);
    if urls.is_empty() {
        return None;
    }
    let mut out = String::with_capacity(text.len() + urls.len() * 24);
    let mut pos = 0;
    for url in urls {
        out.push_str(&html_escape::encode_text(&text[pos..url.start]));
        out.push_str("<a href=\"");
        out.push_str(&html_escape::encode_double_quoted_attribute(&url.href));
        out.push_str("\">");
        out.push_str(&html_escape::encode_text(&text[url.start..url.end]));
        out.push_str("</a>");
        pos = url.end;
    }
    out.push_str(&html_escape::encode_text(&text[pos..]));
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_https_url_is_linked() {
        assert_eq!(
            linkify_to_html("see https://example.com/a?b=1 now").as_deref(),
            Some(r#"see <a href="https://example.com/a?b=1">https://example.com/a?b=1</a> now"#)
        );
    }

    #[test]
    fn test_trailing_period_is_not_part_of_url() {
        let urls = find_urls("Go to www.example.com.");
        assert_eq!(urls.len(), 1);
        assert_eq!(urls[0].href, "http://www.example.com");
    }

    #[test]
    fn test_no_url_returns_none() {
        assert!(linkify_to_html("nothing & here").is_none());
    }
}
