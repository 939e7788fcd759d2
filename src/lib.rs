// Library exports for the chatmark renderer and its binary.
//
// # Mutex Usage Policy
//
//   - `parking_lot::Mutex`    - use for sync-only shared state (event hub
//                               listeners, copy feedback, selection state).
//                               Never hold one across an `.await`.
//
//   - `tokio::sync` channels  - use for state crossing into async code: the
//                               diagram job queue (`mpsc`) and the search-term
//                               store (`watch`).

/// Crate version, reported by the CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[macro_use]
pub mod debug;

pub mod cli;
pub mod clipboard;
pub mod diagrams;
pub mod dom;
pub mod markdown;
pub mod search;
pub mod selection;

// Re-export configuration types
pub use chatmark_config::{Config, DiagramEngine};

pub use diagrams::{DiagramCompiler, DiagramJob, DiagramQueue, DiagramScheduler, diagram_channel};
pub use dom::Document;
pub use markdown::{MarkdownCompiler, RenderMode, RenderOptions, render, to_plain_text};
pub use search::{HighlightEngine, SearchTermStore, highlight, highlight_markup};
pub use selection::{EventHub, SelectionCapture};
