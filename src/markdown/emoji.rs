//! `:shortcode:` emoji substitution.

use super::regexes::re_shortcode_body;
use std::borrow::Cow;

/// Replace known `:shortcode:`s with their emoji. Unknown shortcodes stay
/// literal; the scan resumes right after the first colon so `:nope:smile:`
/// still finds `:smile:`.
pub fn replace_shortcodes(text: &str) -> Cow<'_, str> {
    if !text.contains(':') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    let mut replaced = false;

    while let Some(start) = rest.find(':') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let emoji = after.find(':').and_then(|end| {
            let name = &after[..end];
            if !re_shortcode_body().is_match(name) {
                return None;
            }
            emojis::get_by_shortcode(name).map(|e| (e.as_str(), end))
        });
        match emoji {
            Some((glyph, end)) => {
                out.push_str(glyph);
                rest = &after[end + 1..];
                replaced = true;
            }
            None => {
                out.push(':');
                rest = after;
            }
        }
    }
    out.push_str(rest);

    if replaced {
        Cow::Owned(out)
    } else {
        Cow::Borrowed(text)
    }
}
