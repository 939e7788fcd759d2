//! Configuration system for chatmark.
//!
//! This crate provides configuration loading, saving, and default values
//! for the message renderer. It includes:
//!
//! - Markdown compiler switches (HTML passthrough, linkify, line breaks)
//! - Diagram compilation settings (language tags, engine selection)
//! - Clipboard feedback timing for code-block copy controls
//! - Search highlight styling and the traversal exclusion set
//! - Selection toolbar anchor offsets

pub mod config;
pub mod defaults;
pub mod error;
pub mod persistence;
mod types;

// Re-export main types for convenience
pub use config::{
    ClipboardConfig, Config, DiagramConfig, MarkdownConfig, SearchConfig, SelectionConfig,
};
pub use error::ConfigError;
pub use types::{DiagramEngine, LogLevel};
