//! Pointer and keyboard plumbing for rendered messages.
//!
//! [`EventHub`] routes [`UiEvent`]s to scoped listeners; [`SelectionCapture`]
//! uses it to drive the floating selection toolbar.

mod capture;
mod events;

pub use capture::{
    CaptureIds, ControlSize, SelectionCapture, SelectionEnv, SelectionOptions, SelectionState,
    SpeechTrigger, Viewport, compute_anchor,
};
pub use events::{
    EventHub, EventKind, Handler, KeyEvent, ListenerGuard, PointerEvent, Scope, UiEvent,
};

#[cfg(test)]
mod tests;
