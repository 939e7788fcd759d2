//! Configuration structures for the message renderer.
//!
//! Maps one-to-one onto the sections of `config.yaml`:
//!
//! ```yaml
//! markdown:
//!   linkify: true
//! diagrams:
//!   languages: [mermaid]
//!   engine: auto
//! clipboard:
//!   copied_feedback_ms: 1000
//! search:
//!   highlight_class: "bg-active rounded-sm"
//! selection:
//!   anchor_offset_x: 10.0
//! log_level: info
//! ```

use crate::defaults;
use crate::error::ConfigError;
use crate::types::{DiagramEngine, LogLevel};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Markdown compiler switches.
    #[serde(default)]
    pub markdown: MarkdownConfig,

    /// Diagram fence compilation.
    #[serde(default)]
    pub diagrams: DiagramConfig,

    /// Code-block copy control behavior.
    #[serde(default)]
    pub clipboard: ClipboardConfig,

    /// Search highlight styling.
    #[serde(default)]
    pub search: SearchConfig,

    /// Floating selection toolbar placement.
    #[serde(default)]
    pub selection: SelectionConfig,

    /// Debug log level (overridden by `--log-level` and `RUST_LOG`).
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Config {
    /// Create a config with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from YAML text, then validate it.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml_ng::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check semantic constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(tag) = self
            .diagrams
            .languages
            .iter()
            .find(|tag| tag.trim().is_empty() || tag.chars().any(char::is_whitespace))
        {
            return Err(ConfigError::Validation(format!(
                "diagrams.languages: invalid fence tag {tag:?}"
            )));
        }
        if self.clipboard.copied_feedback_ms == 0 {
            return Err(ConfigError::Validation(
                "clipboard.copied_feedback_ms must be greater than zero".to_string(),
            ));
        }
        if self.search.highlight_class.trim().is_empty() {
            return Err(ConfigError::Validation(
                "search.highlight_class must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Markdown compiler switches.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkdownConfig {
    /// Pass inline and block HTML through to the output.
    #[serde(default = "defaults::default_true")]
    pub html: bool,

    /// Turn bare URLs in text into links.
    #[serde(default = "defaults::default_true")]
    pub linkify: bool,

    /// Render single newlines inside paragraphs as line breaks.
    #[serde(default = "defaults::default_true")]
    pub breaks: bool,

    /// Replace `:shortcode:` sequences with emoji.
    #[serde(default = "defaults::default_true")]
    pub emoji: bool,

    /// Class marker on the single root container of every rendered message.
    #[serde(default = "defaults::root_class")]
    pub root_class: String,

    /// Classes applied to rendered images (caps the display width).
    #[serde(default = "defaults::image_class")]
    pub image_class: String,

    /// Inline style applied to rendered images.
    #[serde(default = "defaults::image_style")]
    pub image_style: String,

    /// Copy control label before activation.
    #[serde(default = "defaults::copy_label")]
    pub copy_label: String,

    /// Copy control label while the copied feedback is showing.
    #[serde(default = "defaults::copied_label")]
    pub copied_label: String,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            html: true,
            linkify: true,
            breaks: true,
            emoji: true,
            root_class: defaults::root_class(),
            image_class: defaults::image_class(),
            image_style: defaults::image_style(),
            copy_label: defaults::copy_label(),
            copied_label: defaults::copied_label(),
        }
    }
}

/// Diagram fence compilation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiagramConfig {
    /// Whether diagram fences are compiled at all.
    #[serde(default = "defaults::default_true")]
    pub enabled: bool,

    /// Fence language tags treated as diagram sources.
    #[serde(default = "defaults::diagram_languages")]
    pub languages: Vec<String>,

    /// Compilation backend.
    #[serde(default)]
    pub engine: DiagramEngine,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            languages: defaults::diagram_languages(),
            engine: DiagramEngine::default(),
        }
    }
}

/// Code-block copy control behavior.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClipboardConfig {
    /// How long the "copied" label stays up after a successful copy.
    #[serde(default = "defaults::copied_feedback_ms")]
    pub copied_feedback_ms: u64,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            copied_feedback_ms: defaults::copied_feedback_ms(),
        }
    }
}

/// Search highlight styling.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Class list on the wrapper span around every match.
    #[serde(default = "defaults::highlight_class")]
    pub highlight_class: String,

    /// Tags whose subtrees are never searched or altered.
    #[serde(default = "defaults::excluded_tags")]
    pub excluded_tags: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            highlight_class: defaults::highlight_class(),
            excluded_tags: defaults::excluded_tags(),
        }
    }
}

/// Floating selection toolbar placement, relative to the pointer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Horizontal offset from the pointer to the toolbar's left edge.
    #[serde(default = "defaults::anchor_offset_x")]
    pub anchor_offset_x: f32,

    /// Vertical offset from the pointer to the toolbar's top edge.
    #[serde(default = "defaults::anchor_offset_y")]
    pub anchor_offset_y: f32,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            anchor_offset_x: defaults::anchor_offset_x(),
            anchor_offset_y: defaults::anchor_offset_y(),
        }
    }
}
