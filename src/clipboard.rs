//! Code Block Augmenter (click side): copy-control activation, clipboard
//! writes, and the transient "copied" feedback.

use crate::markdown::code_block::{COPY_BUTTON_CLASS, COPY_DATA_ATTR};
use crate::selection::{EventHub, EventKind, ListenerGuard, PointerEvent, Scope, UiEvent};
use arboard::Clipboard;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Errors from a copy activation.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard not available: {0}")]
    Unavailable(String),

    #[error("failed to set clipboard text: {0}")]
    Write(String),

    #[error("copy control carries a malformed payload: {0}")]
    Decode(String),
}

/// The clipboard-write primitive.
pub trait ClipboardWriter: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// System clipboard via `arboard`. The handle is opened on first use.
#[derive(Default)]
pub struct ArboardClipboard {
    clipboard: Mutex<Option<Clipboard>>,
}

impl ArboardClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardWriter for ArboardClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut slot = self.clipboard.lock();
        if slot.is_none() {
            let clipboard =
                Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            *slot = Some(clipboard);
        }
        let Some(clipboard) = slot.as_mut() else {
            return Err(ClipboardError::Unavailable("no clipboard handle".to_string()));
        };
        clipboard
            .set_text(text.to_string())
            .map_err(|e| ClipboardError::Write(e.to_string()))?;
        log::debug!("copied {} chars to clipboard", text.len());
        Ok(())
    }
}

/// In-process clipboard, for headless hosts and tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Arc<Mutex<Option<String>>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().clone()
    }
}

impl ClipboardWriter for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        *self.contents.lock() = Some(text.to_string());
        Ok(())
    }
}

/// Transient "copied" state shared between the controller and the renderer
/// that draws the label.
#[derive(Debug, Clone)]
pub struct CopyFeedback {
    copied_at: Arc<Mutex<Option<Instant>>>,
    duration: Duration,
    copy_label: String,
    copied_label: String,
}

impl CopyFeedback {
    pub fn new(duration: Duration, copy_label: &str, copied_label: &str) -> Self {
        Self {
            copied_at: Arc::new(Mutex::new(None)),
            duration,
            copy_label: copy_label.to_string(),
            copied_label: copied_label.to_string(),
        }
    }

    /// Build from configuration sections.
    pub fn from_config(
        clipboard: &chatmark_config::ClipboardConfig,
        markdown: &chatmark_config::MarkdownConfig,
    ) -> Self {
        Self::new(
            Duration::from_millis(clipboard.copied_feedback_ms),
            &markdown.copy_label,
            &markdown.copied_label,
        )
    }

    /// Start the feedback window at `now`.
    pub fn mark_copied(&self, now: Instant) {
        *self.copied_at.lock() = Some(now);
    }

    /// Whether `now` is inside the feedback window.
    pub fn is_copied(&self, now: Instant) -> bool {
        self.copied_at
            .lock()
            .is_some_and(|at| now.saturating_duration_since(at) < self.duration)
    }

    /// Label text to show at `now`.
    pub fn label(&self, now: Instant) -> &str {
        if self.is_copied(now) {
            &self.copied_label
        } else {
            &self.copy_label
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

/// Handles clicks on copy controls.
pub struct CopyController {
    writer: Arc<dyn ClipboardWriter>,
    feedback: CopyFeedback,
}

impl CopyController {
    pub fn new(writer: Arc<dyn ClipboardWriter>, feedback: CopyFeedback) -> Self {
        Self { writer, feedback }
    }

    pub fn feedback(&self) -> &CopyFeedback {
        &self.feedback
    }

    /// Handle one click. Returns the copied text, or `None` when the click
    /// was not on a copy control (or any of its icon/label children).
    ///
    /// Feedback starts only after a successful write.
    pub fn handle_click(
        &self,
        event: &PointerEvent,
        now: Instant,
    ) -> Result<Option<String>, ClipboardError> {
        let Some(control) = event.target.closest_with_class(COPY_BUTTON_CLASS) else {
            return Ok(None);
        };
        let encoded = control.attr(COPY_DATA_ATTR).unwrap_or_default();
        let code = urlencoding::decode(encoded)
            .map_err(|e| ClipboardError::Decode(e.to_string()))?
            .into_owned();
        self.writer.write_text(&code)?;
        self.feedback.mark_copied(now);
        crate::debug_log!("CLIPBOARD", "copy control activated ({} bytes)", code.len());
        Ok(Some(code))
    }

    /// Register a window-scoped click listener. Write failures inside the
    /// listener are logged; call [`CopyController::handle_click`] directly to
    /// observe them.
    pub fn attach(self: &Arc<Self>, hub: &EventHub) -> ListenerGuard {
        let controller = Arc::clone(self);
        hub.add_listener(Scope::Window, EventKind::Click, move |event| {
            if let UiEvent::Click(pointer) = event
                && let Err(e) = controller.handle_click(pointer, Instant::now())
            {
                log::warn!("copy failed: {}", e);
            }
        })
    }
}
