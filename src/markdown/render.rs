//! One render pass: source stages, then the pulldown-cmark event stream with
//! the image, fence, text, and math rules applied, then HTML.

use super::code_block::{code_element, wrap_with_copy_control};
use super::emoji::replace_shortcodes;
use super::highlight::highlight_code;
use super::linkify::linkify_to_html;
use super::math::{MathStyle, render_math};
use super::normalize::normalize_diagram_source;
use super::stages::run_stages;
use super::{MarkdownCompiler, RenderMode, RenderOptions};
use crate::diagrams::DiagramJob;
use pulldown_cmark::{CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd, TextMergeStream};
use std::borrow::Cow;
use std::time::Instant;

pub(super) fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_MATH
}

struct CodeCapture {
    language: String,
    fenced: bool,
    body: String,
}

struct ImageCapture {
    src: String,
    alt: String,
}

/// Per-pass state. Built fresh for every render; nothing survives the pass.
struct RenderPass<'c> {
    compiler: &'c MarkdownCompiler,
    options: RenderOptions,
    html_passthrough: bool,
    code: Option<CodeCapture>,
    image: Option<ImageCapture>,
    link_depth: usize,
    scheduled: usize,
}

/// Render `source` to HTML (without the root container).
pub(super) fn render_body(
    compiler: &MarkdownCompiler,
    source: &str,
    options: RenderOptions,
    html_passthrough: bool,
) -> String {
    let staged = run_stages(source, &compiler.stages);
    let parser = Parser::new_ext(&staged, parser_options());

    let mut pass = RenderPass {
        compiler,
        options,
        html_passthrough,
        code: None,
        image: None,
        link_depth: 0,
        scheduled: 0,
    };
    let events: Vec<Event<'_>> = TextMergeStream::new(parser)
        .filter_map(|event| pass.map_event(event))
        .collect();

    let mut html = String::with_capacity(staged.len() * 3 / 2);
    pulldown_cmark::html::push_html(&mut html, events.into_iter());

    crate::debug_log!(
        "MARKDOWN",
        "render pass: {} bytes in, {} bytes out, generating={}, jobs={}",
        source.len(),
        html.len(),
        options.is_generating,
        pass.scheduled
    );
    html
}

impl RenderPass<'_> {
    fn map_event<'a>(&mut self, event: Event<'a>) -> Option<Event<'a>> {
        match event {
            // Fence rule.
            Event::Start(Tag::CodeBlock(kind)) => {
                let (language, fenced) = match kind {
                    CodeBlockKind::Fenced(info) => (
                        info.split_whitespace().next().unwrap_or_default().to_string(),
                        true,
                    ),
                    CodeBlockKind::Indented => (String::new(), false),
                };
                self.code = Some(CodeCapture {
                    language,
                    fenced,
                    body: String::new(),
                });
                None
            }
            Event::Text(text) if self.code.is_some() => {
                if let Some(code) = self.code.as_mut() {
                    code.body.push_str(&text);
                }
                None
            }
            Event::End(TagEnd::CodeBlock) => {
                let code = self.code.take()?;
                Some(Event::Html(CowStr::from(self.render_code_block(code))))
            }

            // Image rule.
            Event::Start(Tag::Image { dest_url, .. }) if self.image.is_none() => {
                self.image = Some(ImageCapture {
                    src: dest_url.to_string(),
                    alt: String::new(),
                });
                None
            }
            Event::End(TagEnd::Image) if self.image.is_some() => {
                let image = self.image.take()?;
                Some(Event::InlineHtml(CowStr::from(self.render_image(&image))))
            }
            other if self.image.is_some() => {
                if let Some(image) = self.image.as_mut() {
                    match other {
                        Event::Text(t) | Event::Code(t) | Event::InlineMath(t) => {
                            image.alt.push_str(&t)
                        }
                        Event::SoftBreak | Event::HardBreak => image.alt.push(' '),
                        _ => {}
                    }
                }
                None
            }

            Event::Start(Tag::Link { .. }) => {
                self.link_depth += 1;
                Some(event)
            }
            Event::End(TagEnd::Link) => {
                self.link_depth = self.link_depth.saturating_sub(1);
                Some(event)
            }

            Event::Text(text) => Some(self.render_text(text)),
            Event::InlineMath(latex) => Some(Event::InlineHtml(CowStr::from(render_math(
                &latex,
                MathStyle::Inline,
            )))),
            Event::DisplayMath(latex) => Some(Event::InlineHtml(CowStr::from(render_math(
                &latex,
                MathStyle::Display,
            )))),
            Event::SoftBreak if self.compiler.config.breaks => Some(Event::HardBreak),
            Event::Html(raw) | Event::InlineHtml(raw) if !self.html_passthrough => {
                Some(Event::Text(raw))
            }
            other => Some(other),
        }
    }

    fn render_text<'a>(&self, text: CowStr<'a>) -> Event<'a> {
        let config = &self.compiler.config;
        let replaced = if config.emoji {
            match replace_shortcodes(&text) {
                Cow::Owned(s) => Some(s),
                Cow::Borrowed(_) => None,
            }
        } else {
            None
        };
        let text = replaced.map(CowStr::from).unwrap_or(text);
        if config.linkify
            && self.link_depth == 0
            && let Some(html) = linkify_to_html(&text)
        {
            return Event::InlineHtml(CowStr::from(html));
        }
        Event::Text(text)
    }

    fn render_image(&self, image: &ImageCapture) -> String {
        let config = &self.compiler.config;
        format!(
            "<img src=\"{}\" alt=\"{}\" class=\"{}\" style=\"{}\" referrerpolicy=\"no-referrer\"/>",
            html_escape::encode_double_quoted_attribute(&image.src),
            html_escape::encode_double_quoted_attribute(&image.alt),
            html_escape::encode_double_quoted_attribute(&config.image_class),
            html_escape::encode_double_quoted_attribute(&config.image_style),
        )
    }

    fn render_code_block(&mut self, code: CodeCapture) -> String {
        if !code.fenced {
            return format!(
                "<pre><code>{}</code></pre>\n",
                html_escape::encode_text(&code.body)
            );
        }

        let code_html = code_element(&highlight_code(&code.body, &code.language), &code.language);
        let interactive = self.options.mode == RenderMode::Interactive;

        if self.compiler.diagrams.is_diagram(&code.language) {
            // A streaming body is almost certainly incomplete: display only.
            if self.options.is_generating || !interactive {
                return code_html;
            }
            let Some(scheduler) = self.compiler.scheduler.as_ref() else {
                return code_html;
            };
            let job = DiagramJob::new(
                self.compiler.ids.next_id(),
                &code.language,
                normalize_diagram_source(&code.body),
            );
            let placeholder = format!(
                "<div id=\"{}\" class=\"overflow-auto\" data-diagram=\"{}\">{}</div>\n",
                job.target_element_id,
                job.language,
                code_html.trim_end()
            );
            scheduler.schedule(job);
            self.scheduled += 1;
            return placeholder;
        }

        if !interactive {
            return code_html;
        }
        let label = match self.compiler.feedback.as_ref() {
            Some(feedback) => feedback.label(Instant::now()),
            None => self.compiler.config.copy_label.as_str(),
        };
        wrap_with_copy_control(&code_html, &code.body, label)
    }
}
