//! Text Normalizer: escapes punctuation that collides with diagram grammars.
//!
//! Applied to diagram sources only, just before they are handed to a
//! diagram compiler. Each character in [`ESCAPED_CHARS`] becomes a decimal
//! numeric character reference (`@` → `&#64;`).

/// Characters rewritten by [`normalize_diagram_source`].
pub const ESCAPED_CHARS: &[char] = &[
    '@', '，', '。', '！', '？', '、', '（', '）', '【', '】', '《', '》', '￥', '”', '“', '‘',
    '’', '；', '：', '×', '÷', '(', ')', '{', '}',
];

/// Replace every character in [`ESCAPED_CHARS`] with `&#<code>;`.
pub fn normalize_diagram_source(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    for ch in source.chars() {
        if ESCAPED_CHARS.contains(&ch) {
            out.push_str("&#");
            out.push_str(&u32::from(ch).to_string());
            out.push(';');
        } else {
            out.push(ch);
        }
    }
    out
}

/// Undo [`normalize_diagram_source`]: only the `&#<code>;` references for
/// [`ESCAPED_CHARS`] are decoded. Any other entity the author wrote stays
/// as written.
pub fn restore_diagram_source(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;
    while let Some(pos) = rest.find("&#") {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos + 2..];
        let restored = tail.split_once(';').and_then(|(code, _)| {
            let ch = code.parse::<u32>().ok().and_then(char::from_u32)?;
            ESCAPED_CHARS.contains(&ch).then_some((ch, code.len()))
        });
        match restored {
            Some((ch, len)) => {
                out.push(ch);
                rest = &tail[len + 1..];
            }
            None => {
                out.push_str("&#");
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}
