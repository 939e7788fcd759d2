//! Ordered source-transform stages run before the markdown parser.
//!
//! A first `pulldown-cmark` pass locates the inline content of every block
//! (paragraphs, headings, table cells, tight list items). Each stage rewrites
//! those spans one at a time, so a stage never sees the body of a code or
//! HTML block and state like backtick parity never leaks from one block into
//! the next. Stages run in list order; each declares the pipeline point it
//! must precede.

use super::delimiters::DelimiterRewriter;
use super::render::parser_options;
use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use std::ops::Range;

/// Where in the pipeline a stage has to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    /// Must run before inline tokenization: later rewriting could no longer
    /// influence how inline spans are recognised.
    BeforeInlineTokenization,
}

/// One transform over the inline content of a source text.
pub trait SourceStage: Send + Sync {
    fn name(&self) -> &'static str;

    fn precondition(&self) -> Precondition;

    /// Rewrite the inline content of one block.
    fn rewrite(&self, text: &str) -> String;

    /// Rewrite every span of `source` listed in `spans`, leaving the rest
    /// byte-identical. `spans` must be sorted and disjoint.
    fn apply(&self, source: &str, spans: &[Range<usize>]) -> String {
        let mut out = source.to_string();
        // Back to front, so earlier offsets stay valid.
        for span in spans.iter().rev() {
            let rewritten = self.rewrite(&out[span.clone()]);
            out.replace_range(span.clone(), &rewritten);
        }
        out
    }
}

/// The stage list every compiler runs: `[DelimiterRewriter]`.
pub fn default_stages() -> Vec<Box<dyn SourceStage>> {
    vec![Box::new(DelimiterRewriter)]
}

/// Run `stages` in order over `source`.
pub fn run_stages(source: &str, stages: &[Box<dyn SourceStage>]) -> String {
    let mut text = source.to_string();
    for stage in stages {
        crate::debug_trace!("MARKDOWN", "running source stage {}", stage.name());
        // A previous stage may have moved block boundaries.
        let spans = inline_spans(&text);
        text = stage.apply(&text, &spans);
    }
    text
}

enum Frame {
    /// A block whose whole range is inline content (already recorded).
    Inline,
    /// A list item; inline content directly inside it (tight lists) runs
    /// from `start` to `end`.
    Item { start: usize, end: Option<usize> },
    /// Any other block; contributes nothing itself.
    Container,
}

fn is_inline_tag(tag: &Tag<'_>) -> bool {
    matches!(
        tag,
        Tag::Emphasis | Tag::Strong | Tag::Strikethrough | Tag::Link { .. } | Tag::Image { .. }
    )
}

fn is_inline_end(end: &TagEnd) -> bool {
    matches!(
        end,
        TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough | TagEnd::Link | TagEnd::Image
    )
}

/// Byte ranges of the inline content of every block in `source`, sorted and
/// disjoint.
///
/// Code blocks (fenced or indented) and HTML blocks never appear. An
/// unterminated fence runs to the end of the input, which is what a
/// still-streaming response looks like.
pub fn inline_spans(source: &str) -> Vec<Range<usize>> {
    let mut spans: Vec<Range<usize>> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();

    for (event, range) in Parser::new_ext(source, parser_options()).into_offset_iter() {
        match event {
            Event::Start(tag) if !is_inline_tag(&tag) => {
                // Item text before a nested block is its own span.
                if let Some(Frame::Item { start, end }) = stack.last_mut()
                    && let Some(text_end) = end.take()
                {
                    spans.push(*start..text_end);
                }
                match tag {
                    Tag::Paragraph | Tag::Heading { .. } | Tag::TableCell => {
                        spans.push(range);
                        stack.push(Frame::Inline);
                    }
                    Tag::Item => stack.push(Frame::Item {
                        start: range.start,
                        end: None,
                    }),
                    _ => stack.push(Frame::Container),
                }
            }
            Event::End(end) if !is_inline_end(&end) => {
                if let Some(Frame::Item {
                    start,
                    end: Some(text_end),
                }) = stack.pop()
                {
                    spans.push(start..text_end);
                }
                // Item text after a nested block starts where the block ended.
                if let Some(Frame::Item { start, .. }) = stack.last_mut() {
                    *start = range.end;
                }
            }
            Event::Html(_) | Event::Rule => {}
            // Inline events and inline tags.
            _ => {
                if let Some(Frame::Item { end, .. }) = stack.last_mut() {
                    *end = Some(range.end.max(end.unwrap_or(0)));
                }
            }
        }
    }

    spans.sort_by_key(|span| span.start);
    spans.dedup_by(|next, prev| next.start < prev.end);
    spans
}
