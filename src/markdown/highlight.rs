//! Keyword-based syntax highlighting for fenced code blocks.
//!
//! Produces escaped HTML with `hljs-*` classed spans so that existing
//! highlight.js themes style the output. The tokenizer does not build a parse
//! tree; it matches words against fixed keyword and builtin lists per
//! language.

use std::fmt::Write;

/// Language definition for keyword-based syntax highlighting.
pub(super) struct LanguageDef {
    pub(super) keywords: &'static [&'static str],
    pub(super) comment_prefix: &'static str,
    pub(super) builtins: &'static [&'static str],
}

/// Return the [`LanguageDef`] for a given language tag, or `None` if the
/// language is not recognised.
pub(super) fn get_language_def(language: &str) -> Option<LanguageDef> {
    match language.to_lowercase().as_str() {
        "rust" | "rs" => Some(LanguageDef {
            keywords: &[
                "fn", "let", "mut", "const", "static", "if", "else", "match", "for", "while",
                "loop", "return", "break", "continue", "struct", "enum", "impl", "trait", "pub",
                "use", "mod", "crate", "self", "super", "where", "async", "await", "move",
                "unsafe", "type", "as", "in", "ref", "true", "false",
            ],
            comment_prefix: "//",
            builtins: &[
                "Self", "Option", "Result", "Vec", "String", "Box", "Rc", "Arc", "Some", "None",
                "Ok", "Err",
            ],
        }),
        "python" | "py" => Some(LanguageDef {
            keywords: &[
                "def", "class", "if", "elif", "else", "for", "while", "return", "import", "from",
                "as", "try", "except", "finally", "with", "yield", "lambda", "pass", "break",
                "continue", "raise", "and", "or", "not", "in", "is", "True", "False", "None",
                "async", "await",
            ],
            comment_prefix: "#",
            builtins: &[
                "print", "len", "range", "int", "str", "float", "list", "dict", "set", "tuple",
                "bool", "type", "isinstance", "self",
            ],
        }),
        "javascript" | "js" | "typescript" | "ts" | "jsx" | "tsx" => Some(LanguageDef {
            keywords: &[
                "function", "const", "let", "var", "if", "else", "for", "while", "return",
                "class", "new", "this", "import", "export", "from", "default", "try", "catch",
                "finally", "throw", "async", "await", "yield", "switch", "case", "break",
                "continue", "typeof", "instanceof", "true", "false", "null", "undefined",
            ],
            comment_prefix: "//",
            builtins: &[
                "console", "Promise", "Array", "Object", "Map", "Set", "JSON", "Math", "String",
                "Number", "Boolean", "Error",
            ],
        }),
        "json" => Some(LanguageDef {
            keywords: &["true", "false", "null"],
            comment_prefix: "",
            builtins: &[],
        }),
        "yaml" | "yml" => Some(LanguageDef {
            keywords: &["true", "false", "null", "yes", "no"],
            comment_prefix: "#",
            builtins: &[],
        }),
        "shell" | "sh" | "bash" | "zsh" => Some(LanguageDef {
            keywords: &[
                "if", "then", "else", "elif", "fi", "for", "while", "do", "done", "case", "esac",
                "function", "return", "exit", "export", "local", "readonly", "in", "select",
                "until", "true", "false",
            ],
            comment_prefix: "#",
            builtins: &[
                "echo", "cd", "ls", "cat", "grep", "sed", "awk", "find", "sort", "uniq", "wc",
                "head", "tail", "mkdir", "rm", "cp", "mv", "chmod", "chown", "curl", "wget",
            ],
        }),
        "mermaid" => Some(LanguageDef {
            keywords: &[
                "graph", "flowchart", "subgraph", "end", "sequenceDiagram", "participant",
                "actor", "classDiagram", "stateDiagram", "erDiagram", "gantt", "pie", "journey",
                "loop", "alt", "opt", "else", "note", "TD", "TB", "BT", "LR", "RL",
            ],
            comment_prefix: "%%",
            builtins: &[],
        }),
        _ => None,
    }
}

/// Token classes emitted as `hljs-<class>` spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenClass {
    Keyword,
    BuiltIn,
    String,
    Number,
    Comment,
}

impl TokenClass {
    fn css(self) -> &'static str {
        match self {
            TokenClass::Keyword => "hljs-keyword",
            TokenClass::BuiltIn => "hljs-built_in",
            TokenClass::String => "hljs-string",
            TokenClass::Number => "hljs-number",
            TokenClass::Comment => "hljs-comment",
        }
    }
}

/// Highlight a whole code block.
///
/// The result is escaped HTML: its text content (all tags stripped,
/// entities decoded) equals `code` exactly.
pub fn highlight_code(code: &str, language: &str) -> String {
    let def = get_language_def(language);
    let mut out = String::with_capacity(code.len() + code.len() / 2);
    for line in code.split_inclusive('\n') {
        let (body, newline) = match line.strip_suffix('\n') {
            Some(body) => (body, "\n"),
            None => (line, ""),
        };
        highlight_code_line(body, def.as_ref(), &mut out);
        out.push_str(newline);
    }
    out
}

/// Whether [`highlight_code`] knows the language.
pub fn is_known_language(language: &str) -> bool {
    get_language_def(language).is_some()
}

fn push_plain(out: &mut String, text: &str) {
    out.push_str(&html_escape::encode_text(text));
}

fn push_token(out: &mut String, class: TokenClass, text: &str) {
    let _ = write!(
        out,
        "<span class=\"{}\">{}</span>",
        class.css(),
        html_escape::encode_text(text)
    );
}

/// Highlight a single code line (without its newline) into `out`.
fn highlight_code_line(line: &str, lang_def: Option<&LanguageDef>, out: &mut String) {
    let Some(def) = lang_def else {
        push_plain(out, line);
        return;
    };

    // Full-line comment.
    if !def.comment_prefix.is_empty() && line.trim_start().starts_with(def.comment_prefix) {
        push_token(out, TokenClass::Comment, line);
        return;
    }

    let mut chars = line.char_indices().peekable();

    while let Some(&(byte_pos, ch)) = chars.peek() {
        // String literal.
        if ch == '"' || ch == '\'' {
            let quote = ch;
            let start = byte_pos;
            chars.next();
            let mut escaped = false;
            while let Some(&(_, c)) = chars.peek() {
                chars.next();
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == quote {
                    break;
                }
            }
            let end = chars.peek().map(|&(i, _)| i).unwrap_or(line.len());
            push_token(out, TokenClass::String, &line[start..end]);
            continue;
        }

        // Trailing comment.
        if !def.comment_prefix.is_empty() && line[byte_pos..].starts_with(def.comment_prefix) {
            push_token(out, TokenClass::Comment, &line[byte_pos..]);
            return;
        }

        // Word (identifier, keyword, or number).
        if ch.is_alphanumeric() || ch == '_' {
            let start = byte_pos;
            while let Some(&(_, c)) = chars.peek() {
                if c.is_alphanumeric() || c == '_' || (c == '.' && ch.is_ascii_digit()) {
                    chars.next();
                } else {
                    break;
                }
            }
            let end = chars.peek().map(|&(i, _)| i).unwrap_or(line.len());
            let word = &line[start..end];

            let class = if def.keywords.contains(&word) {
                Some(TokenClass::Keyword)
            } else if def.builtins.contains(&word) {
                Some(TokenClass::BuiltIn)
            } else if ch.is_ascii_digit() {
                Some(TokenClass::Number)
            } else {
                None
            };

            match class {
                Some(class) => push_token(out, class, word),
                None => push_plain(out, word),
            }
            continue;
        }

        // Punctuation and whitespace.
        let start = byte_pos;
        chars.next();
        let end = chars.peek().map(|&(i, _)| i).unwrap_or(line.len());
        push_plain(out, &line[start..end]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_and_strings_get_spans() {
        let html = highlight_code("let s = \"hi\";", "rust");
        assert!(html.contains(r#"<span class="hljs-keyword">let</span>"#));
        assert!(html.contains(r#"<span class="hljs-string">"hi"</span>"#));
        assert!(!html.contains("&quot;"));
    }

    #[test]
    fn test_unknown_language_is_escaped_only() {
        assert_eq!(highlight_code("a < b && c", "brainfudge"), "a &lt; b &amp;&amp; c");
    }

    #[test]
    fn test_comment_line() {
        assert_eq!(
            highlight_code("# note", "python"),
            r#"<span class="hljs-comment"># note</span>"#
        );
    }

    #[test]
    fn test_numbers_are_classed() {
        let html = highlight_code("x = 3.14", "python");
        assert!(html.contains(r#"<span class="hljs-number">3.14</span>"#));
    }

    #[test]
    fn test_newlines_preserved() {
        let html = highlight_code("a\nb\n", "none");
        assert_eq!(html, "a\nb\n");
    }

    #[test]
    fn test_known_language_lookup_is_case_insensitive() {
        assert!(is_known_language("Rust"));
        assert!(is_known_language("mermaid"));
        assert!(!is_known_language(""));
    }
}
