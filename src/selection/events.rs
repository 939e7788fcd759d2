//! UI events and a listener registry with scoped registrations.
//!
//! Every registration returns a [`ListenerGuard`]; dropping the guard
//! removes the listener, so a detached component cannot leave handlers
//! behind no matter which path it exits through.

use crate::dom::EventTarget;
use parking_lot::Mutex;
use std::sync::{Arc, Weak};

/// A pointer event in viewport coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
    pub target: EventTarget,
}

impl PointerEvent {
    pub fn new(x: f64, y: f64, target: EventTarget) -> Self {
        Self { x, y, target }
    }
}

/// A key press with its modifier state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>, ctrl: bool, meta: bool) -> Self {
        Self {
            key: key.into(),
            ctrl,
            meta,
        }
    }

    /// `ctrl+<key>` or `cmd+<key>`, compared case-insensitively.
    pub fn is_shortcut(&self, key: &str) -> bool {
        (self.ctrl || self.meta) && self.key.eq_ignore_ascii_case(key)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    PointerUp(PointerEvent),
    Click(PointerEvent),
    KeyDown(KeyEvent),
}

impl UiEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            UiEvent::PointerUp(_) => EventKind::PointerUp,
            UiEvent::Click(_) => EventKind::Click,
            UiEvent::KeyDown(_) => EventKind::KeyDown,
        }
    }

    /// The element chain for pointer events; `None` for keys.
    pub fn target(&self) -> Option<&EventTarget> {
        match self {
            UiEvent::PointerUp(p) | UiEvent::Click(p) => Some(&p.target),
            UiEvent::KeyDown(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerUp,
    Click,
    KeyDown,
}

/// Where a listener is registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Receives every event of its kind.
    Window,
    /// Receives events whose target is the element with this id or inside it.
    Element(String),
}

impl Scope {
    fn matches(&self, event: &UiEvent) -> bool {
        match self {
            Scope::Window => true,
            Scope::Element(id) => event.target().is_some_and(|t| t.is_within(id)),
        }
    }
}

pub type Handler = Arc<dyn Fn(&UiEvent) + Send + Sync>;

struct Listener {
    id: u64,
    scope: Scope,
    kind: EventKind,
    handler: Handler,
}

#[derive(Default)]
struct HubInner {
    next_id: u64,
    listeners: Vec<Listener>,
}

/// Listener registry shared by every component observing one view.
#[derive(Clone, Default)]
pub struct EventHub {
    inner: Arc<Mutex<HubInner>>,
}

impl std::fmt::Debug for EventHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHub")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler`; it stays registered until the guard is dropped.
    #[must_use = "dropping the guard removes the listener immediately"]
    pub fn add_listener<F>(&self, scope: Scope, kind: EventKind, handler: F) -> ListenerGuard
    where
        F: Fn(&UiEvent) + Send + Sync + 'static,
    {
        let mut inner = self.inner.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push(Listener {
            id,
            scope,
            kind,
            handler: Arc::new(handler),
        });
        ListenerGuard {
            hub: Arc::downgrade(&self.inner),
            id,
        }
    }

    /// Deliver `event` to every matching listener: element-scoped ones first,
    /// then window-scoped ones, each in registration order. Returns how many
    /// handlers ran.
    pub fn dispatch(&self, event: &UiEvent) -> usize {
        let kind = event.kind();
        // Collect under the lock, call without it: handlers may register or
        // drop listeners themselves.
        let handlers: Vec<Handler> = {
            let inner = self.inner.lock();
            let mut scoped = Vec::new();
            let mut window = Vec::new();
            for listener in inner
                .listeners
                .iter()
                .filter(|l| l.kind == kind && l.scope.matches(event))
            {
                match listener.scope {
                    Scope::Window => window.push(Arc::clone(&listener.handler)),
                    Scope::Element(_) => scoped.push(Arc::clone(&listener.handler)),
                }
            }
            scoped.extend(window);
            scoped
        };
        for handler in &handlers {
            handler(event);
        }
        handlers.len()
    }

    pub fn listener_count(&self) -> usize {
        self.inner.lock().listeners.len()
    }
}

/// Removes its listener when dropped.
#[derive(Debug)]
pub struct ListenerGuard {
    hub: Weak<Mutex<HubInner>>,
    id: u64,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(inner) = self.hub.upgrade() {
            inner.lock().listeners.retain(|l| l.id != self.id);
        }
    }
}
