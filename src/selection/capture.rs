//! Selection Capture: the floating speak/search toolbar shown after the user
//! selects text inside a rendered message.

use super::events::{EventHub, EventKind, ListenerGuard, Scope, UiEvent};
use crate::search::SearchTermStore;
use parking_lot::Mutex;
use std::sync::Arc;

/// Viewport size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Rendered size of the floating control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlSize {
    pub width: f64,
    pub height: f64,
}

/// What the host knows about the screen at event time.
pub trait SelectionEnv: Send + Sync {
    /// The current text selection; empty when nothing is selected.
    fn selected_text(&self) -> String;
    fn viewport(&self) -> Viewport;
    fn control_size(&self) -> ControlSize;
}

/// External speech trigger. Only the trigger point lives here.
pub trait SpeechTrigger {
    fn speak(&self, text: &str);
}

impl<F: Fn(&str)> SpeechTrigger for F {
    fn speak(&self, text: &str) {
        self(text)
    }
}

/// Selection state: `{ text, anchor, visible }`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    pub text: String,
    pub anchor_x: f64,
    pub anchor_y: f64,
    pub visible: bool,
}

/// Element ids the capture listens on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureIds {
    /// The rendered message container.
    pub container: String,
    /// The floating control.
    pub control: String,
}

impl CaptureIds {
    pub fn new(container: impl Into<String>, control: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            control: control.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionOptions {
    /// Whether the host shows the toolbar at all.
    pub toolbar_enabled: bool,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self::from_config(&chatmark_config::SelectionConfig::default())
    }
}

impl SelectionOptions {
    pub fn from_config(config: &chatmark_config::SelectionConfig) -> Self {
        Self {
            toolbar_enabled: true,
            offset_x: f64::from(config.anchor_offset_x),
            offset_y: f64::from(config.anchor_offset_y),
        }
    }
}

/// Anchor for the control near pointer `(x, y)`.
///
/// Placed at `(x + offset_x, y + offset_y)`. If the right edge would leave
/// the viewport it flips to the pointer's left side, then both axes are
/// clamped into the viewport.
pub fn compute_anchor(
    x: f64,
    y: f64,
    control: ControlSize,
    viewport: Viewport,
    options: &SelectionOptions,
) -> (f64, f64) {
    let mut left = x + options.offset_x;
    if left + control.width > viewport.width {
        left = x - control.width - options.offset_x;
    }
    let top = y + options.offset_y;

    let max_left = (viewport.width - control.width).max(0.0);
    let max_top = (viewport.height - control.height).max(0.0);
    (left.clamp(0.0, max_left), top.clamp(0.0, max_top))
}

/// Live selection capture bound to one rendered container.
///
/// Owns three listeners (container pointer-up, window pointer-up, window
/// key-down). Dropping the capture removes all of them.
pub struct SelectionCapture {
    state: Arc<Mutex<SelectionState>>,
    store: SearchTermStore,
    options: SelectionOptions,
    _guards: [ListenerGuard; 3],
}

impl SelectionCapture {
    pub fn attach(
        hub: &EventHub,
        ids: CaptureIds,
        env: Arc<dyn SelectionEnv>,
        store: SearchTermStore,
        options: SelectionOptions,
    ) -> Self {
        let state = Arc::new(Mutex::new(SelectionState::default()));

        let on_container_up = {
            let state = Arc::clone(&state);
            let store = store.clone();
            hub.add_listener(
                Scope::Element(ids.container.clone()),
                EventKind::PointerUp,
                move |event| {
                    if let UiEvent::PointerUp(pointer) = event {
                        if !store.is_bar_open() {
                            store.clear();
                        }
                        let text = env.selected_text();
                        let mut state = state.lock();
                        if text.is_empty() {
                            *state = SelectionState::default();
                            return;
                        }
                        let (anchor_x, anchor_y) = compute_anchor(
                            pointer.x,
                            pointer.y,
                            env.control_size(),
                            env.viewport(),
                            &options,
                        );
                        crate::debug_trace!(
                            "SELECTION",
                            "captured {} chars, anchor=({anchor_x}, {anchor_y})",
                            text.chars().count()
                        );
                        *state = SelectionState {
                            text,
                            anchor_x,
                            anchor_y,
                            visible: true,
                        };
                    }
                },
            )
        };

        let on_window_up = {
            let state = Arc::clone(&state);
            let ids = ids.clone();
            hub.add_listener(Scope::Window, EventKind::PointerUp, move |event| {
                let Some(target) = event.target() else {
                    return;
                };
                if !target.is_within(&ids.container) && !target.is_within(&ids.control) {
                    let mut state = state.lock();
                    if state.visible {
                        *state = SelectionState::default();
                    }
                }
            })
        };

        let on_key = {
            let state = Arc::clone(&state);
            hub.add_listener(Scope::Window, EventKind::KeyDown, move |event| {
                if let UiEvent::KeyDown(key) = event
                    && (key.is_shortcut("c") || key.is_shortcut("f"))
                {
                    *state.lock() = SelectionState::default();
                }
            })
        };

        Self {
            state,
            store,
            options,
            _guards: [on_container_up, on_window_up, on_key],
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state.lock().clone()
    }

    /// Whether the host should draw the toolbar now.
    pub fn is_toolbar_visible(&self) -> bool {
        self.options.toolbar_enabled && self.state.lock().visible
    }

    /// Speak the captured text, then dismiss.
    pub fn speak(&self, trigger: &dyn SpeechTrigger) {
        let text = self.state.lock().text.clone();
        trigger.speak(&text);
        self.hide();
    }

    /// Make the captured text the search term, then dismiss.
    pub fn search(&self) {
        let text = self.state.lock().text.clone();
        self.store.set_term(text);
        self.hide();
    }

    pub fn hide(&self) {
        *self.state.lock() = SelectionState::default();
    }

    /// Remove all listeners. Equivalent to dropping.
    pub fn detach(self) {}
}
