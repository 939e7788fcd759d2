//! Math typesetting: LaTeX → MathML.
//!
//! Never fails. Input the typesetter rejects is emitted as escaped literal
//! source inside a `math-error` span, so one bad formula cannot disturb the
//! surrounding content.

use latex2mathml::{DisplayStyle, latex_to_mathml};

/// Inline (`$..$`) or display (`$$..$$`) math.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathStyle {
    Inline,
    Display,
}

impl MathStyle {
    fn class(self) -> &'static str {
        match self {
            MathStyle::Inline => "math math-inline",
            MathStyle::Display => "math math-display",
        }
    }

    fn delimiter(self) -> &'static str {
        match self {
            MathStyle::Inline => "$",
            MathStyle::Display => "$$",
        }
    }
}

/// Typeset one formula into a classed `<span>`.
pub fn render_math(latex: &str, style: MathStyle) -> String {
    let display = match style {
        MathStyle::Inline => DisplayStyle::Inline,
        MathStyle::Display => DisplayStyle::Block,
    };
    match latex_to_mathml(latex.trim(), display) {
        Ok(mathml) => format!("<span class=\"{}\">{}</span>", style.class(), mathml),
        Err(e) => {
            log::debug!("math fallback for {:?}: {}", latex, e);
            let delim = style.delimiter();
            format!(
                "<span class=\"math math-error\">{}{}{}</span>",
                delim,
                html_escape::encode_text(latex),
                delim
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_math_renders_mathml() {
        let html = render_math("x^2", MathStyle::Inline);
        assert!(html.starts_with(r#"<span class="math math-inline">"#));
        assert!(html.contains("<math"));
        assert!(html.contains("<msup>"));
    }

    #[test]
    fn test_display_math_class() {
        let html = render_math("a+b", MathStyle::Display);
        assert!(html.starts_with(r#"<span class="math math-display">"#));
    }

    #[test]
    fn test_malformed_math_falls_back_to_literal() {
        let html = render_math(r"\frac{a", MathStyle::Inline);
        assert!(html.starts_with(r#"<span class="math math-error">"#));
        assert!(html.contains(r"$\frac{a$"));
    }
}
