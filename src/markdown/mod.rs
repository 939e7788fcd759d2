//! Markdown Compiler: chat-message markdown to a single-root HTML fragment.
//!
//! A render pass runs the ordered source stages (see [`stages`]), parses with
//! `pulldown-cmark`, and applies these rendering rules on top of the default
//! HTML output:
//!
//! - **image**: width-capped, rounded, `referrerpolicy="no-referrer"`.
//! - **fence**: diagram tags become placeholders with a scheduled
//!   [`DiagramJob`](crate::diagrams::DiagramJob) once the message is complete
//!   (highlighted source only while streaming); other fences get syntax
//!   highlighting plus the copy control, unless the pass is in plain mode.
//! - **text**: `:shortcode:` emoji and bare-URL linking.
//! - **math**: `$..$` / `$$..$$` typeset to MathML with a literal fallback.
//!
//! Rendering never fails. A malformed span falls back to literal text and
//! leaves the rest of the message alone.

pub mod code_block;
pub mod delimiters;
pub mod emoji;
pub mod highlight;
pub mod linkify;
pub mod math;
pub mod normalize;
mod regexes;
mod render;
pub mod stages;

use crate::clipboard::CopyFeedback;
use crate::diagrams::{DiagramRegistry, DiagramScheduler, IdGenerator, UuidIdGenerator};
use crate::dom::Document;
use chatmark_config::{Config, DiagramConfig, MarkdownConfig};
use stages::{SourceStage, default_stages};
use std::sync::Arc;

/// Whether interactive affordances are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Copy controls and diagram placeholders.
    #[default]
    Interactive,
    /// Plain highlighted code, no copy control, no diagram jobs.
    Plain,
}

/// Per-call options for [`MarkdownCompiler::render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    /// The source is a prefix of a response that is still being generated.
    pub is_generating: bool,
    pub mode: RenderMode,
}

impl RenderOptions {
    /// A finished message: diagrams are scheduled.
    pub fn complete() -> Self {
        Self::default()
    }

    /// A message still streaming in: diagrams are shown as source only.
    pub fn streaming() -> Self {
        Self {
            is_generating: true,
            ..Self::default()
        }
    }

    pub fn plain() -> Self {
        Self {
            mode: RenderMode::Plain,
            ..Self::default()
        }
    }
}

/// A configured markdown compiler. Holds no per-render state, so one
/// instance can serve any number of passes.
pub struct MarkdownCompiler {
    config: MarkdownConfig,
    diagrams: DiagramRegistry,
    stages: Vec<Box<dyn SourceStage>>,
    scheduler: Option<DiagramScheduler>,
    ids: Arc<dyn IdGenerator>,
    feedback: Option<CopyFeedback>,
}

impl Default for MarkdownCompiler {
    fn default() -> Self {
        Self::new(MarkdownConfig::default(), &DiagramConfig::default())
    }
}

impl MarkdownCompiler {
    /// A compiler without a diagram scheduler: diagram fences display as
    /// highlighted source until [`MarkdownCompiler::with_scheduler`] is used.
    pub fn new(config: MarkdownConfig, diagrams: &DiagramConfig) -> Self {
        let registry = if diagrams.enabled {
            DiagramRegistry::from_tags(diagrams.languages.as_slice())
        } else {
            DiagramRegistry::empty()
        };
        Self {
            config,
            diagrams: registry,
            stages: default_stages(),
            scheduler: None,
            ids: Arc::new(UuidIdGenerator),
            feedback: None,
        }
    }

    /// Build from the full configuration, including copy feedback labels.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.markdown.clone(), &config.diagrams)
            .with_copy_feedback(CopyFeedback::from_config(&config.clipboard, &config.markdown))
    }

    pub fn with_scheduler(mut self, scheduler: DiagramScheduler) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Share the copied-feedback state so copy labels reflect recent clicks.
    pub fn with_copy_feedback(mut self, feedback: CopyFeedback) -> Self {
        self.feedback = Some(feedback);
        self
    }

    /// Replace the source stage list.
    pub fn with_stages(mut self, stages: Vec<Box<dyn SourceStage>>) -> Self {
        self.stages = stages;
        self
    }

    pub fn config(&self) -> &MarkdownConfig {
        &self.config
    }

    /// Render `source` into a single root container.
    pub fn render(&self, source: &str, options: RenderOptions) -> String {
        let body = render::render_body(self, source, options, self.config.html);
        self.wrap_root(&body)
    }

    /// [`MarkdownCompiler::render`], parsed for further surgery.
    pub fn render_document(&self, source: &str, options: RenderOptions) -> Document {
        Document::parse(&self.render(source, options))
    }

    /// Readable text of `source`: plain mode, HTML escaped, all markup stripped.
    pub fn to_plain_text(&self, source: &str) -> String {
        let body = render::render_body(self, source, RenderOptions::plain(), false);
        Document::parse(&body).text_content()
    }

    fn wrap_root(&self, body: &str) -> String {
        format!(
            "<div class=\"{}\">{}</div>",
            html_escape::encode_double_quoted_attribute(&self.config.root_class),
            body
        )
    }
}

/// Render with default configuration and no diagram scheduler.
pub fn render(source: &str, options: RenderOptions) -> String {
    MarkdownCompiler::default().render(source, options)
}

/// Plain text of `source` with default configuration.
pub fn to_plain_text(source: &str) -> String {
    MarkdownCompiler::default().to_plain_text(source)
}
