use super::*;
use crate::dom::EventTarget;
use crate::search::SearchTermStore;
use parking_lot::Mutex;
use std::sync::Arc;

struct FakeEnv {
    selection: Mutex<String>,
}

impl FakeEnv {
    fn new(selection: &str) -> Arc<Self> {
        Arc::new(Self {
            selection: Mutex::new(selection.to_string()),
        })
    }

    fn select(&self, text: &str) {
        *self.selection.lock() = text.to_string();
    }
}

impl SelectionEnv for FakeEnv {
    fn selected_text(&self) -> String {
        self.selection.lock().clone()
    }

    fn viewport(&self) -> Viewport {
        Viewport {
            width: 800.0,
            height: 600.0,
        }
    }

    fn control_size(&self) -> ControlSize {
        ControlSize {
            width: 60.0,
            height: 24.0,
        }
    }
}

fn ids() -> CaptureIds {
    CaptureIds::new("content", "toolbar")
}

fn pointer_up(x: f64, y: f64, within: &[&str]) -> UiEvent {
    UiEvent::PointerUp(PointerEvent::new(x, y, EventTarget::within_ids(within)))
}

fn attach(hub: &EventHub, env: Arc<FakeEnv>, store: &SearchTermStore) -> SelectionCapture {
    SelectionCapture::attach(hub, ids(), env, store.clone(), SelectionOptions::default())
}

// ---------------------------------------------------------------------------
// Anchor placement
// ---------------------------------------------------------------------------

#[test]
fn test_anchor_offsets_from_pointer() {
    let anchor = compute_anchor(
        100.0,
        200.0,
        ControlSize {
            width: 60.0,
            height: 24.0,
        },
        Viewport {
            width: 800.0,
            height: 600.0,
        },
        &SelectionOptions::default(),
    );
    assert_eq!(anchor, (110.0, 180.0));
}

#[test]
fn test_anchor_flips_left_at_right_edge() {
    let anchor = compute_anchor(
        780.0,
        200.0,
        ControlSize {
            width: 60.0,
            height: 24.0,
        },
        Viewport {
            width: 800.0,
            height: 600.0,
        },
        &SelectionOptions::default(),
    );
    assert_eq!(anchor, (710.0, 180.0));
}

#[test]
fn test_anchor_is_clamped_into_viewport() {
    let anchor = compute_anchor(
        5.0,
        5.0,
        ControlSize {
            width: 60.0,
            height: 24.0,
        },
        Viewport {
            width: 50.0,
            height: 600.0,
        },
        &SelectionOptions::default(),
    );
    // Flipped left past zero, then clamped; top clamped to zero.
    assert_eq!(anchor, (0.0, 0.0));
}

// ---------------------------------------------------------------------------
// Event hub
// ---------------------------------------------------------------------------

#[test]
fn test_guard_drop_removes_listener() {
    let hub = EventHub::new();
    let guard = hub.add_listener(Scope::Window, EventKind::Click, |_| {});
    assert_eq!(hub.listener_count(), 1);
    drop(guard);
    assert_eq!(hub.listener_count(), 0);
}

#[test]
fn test_element_scope_only_sees_events_inside() {
    let hub = EventHub::new();
    let hits = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&hits);
    let _guard = hub.add_listener(
        Scope::Element("content".into()),
        EventKind::PointerUp,
        move |_| *counter.lock() += 1,
    );
    assert_eq!(hub.dispatch(&pointer_up(0.0, 0.0, &["para", "content"])), 1);
    assert_eq!(hub.dispatch(&pointer_up(0.0, 0.0, &["elsewhere"])), 0);
    assert_eq!(*hits.lock(), 1);
}

#[test]
fn test_kind_filtering() {
    let hub = EventHub::new();
    let _guard = hub.add_listener(Scope::Window, EventKind::KeyDown, |_| {});
    assert_eq!(hub.dispatch(&pointer_up(0.0, 0.0, &[])), 0);
    assert_eq!(
        hub.dispatch(&UiEvent::KeyDown(KeyEvent::new("a", false, false))),
        1
    );
}

#[test]
fn test_guard_outliving_hub_is_harmless() {
    let hub = EventHub::new();
    let guard = hub.add_listener(Scope::Window, EventKind::Click, |_| {});
    drop(hub);
    drop(guard);
}

// ---------------------------------------------------------------------------
// Selection capture
// ---------------------------------------------------------------------------

#[test]
fn test_attach_and_drop_balance_listeners() {
    let hub = EventHub::new();
    let store = SearchTermStore::new();
    for _ in 0..3 {
        let capture = attach(&hub, FakeEnv::new(""), &store);
        assert_eq!(hub.listener_count(), 3);
        capture.detach();
        assert_eq!(hub.listener_count(), 0);
    }
}

#[test]
fn test_pointer_up_with_selection_shows_toolbar() {
    let hub = EventHub::new();
    let store = SearchTermStore::new();
    let capture = attach(&hub, FakeEnv::new("selected words"), &store);

    hub.dispatch(&pointer_up(100.0, 200.0, &["content"]));
    let state = capture.state();
    assert!(state.visible);
    assert!(capture.is_toolbar_visible());
    assert_eq!(state.text, "selected words");
    assert_eq!((state.anchor_x, state.anchor_y), (110.0, 180.0));
}

#[test]
fn test_empty_selection_hides_toolbar() {
    let hub = EventHub::new();
    let store = SearchTermStore::new();
    let env = FakeEnv::new("text");
    let capture = attach(&hub, env.clone(), &store);

    hub.dispatch(&pointer_up(10.0, 50.0, &["content"]));
    assert!(capture.state().visible);
    env.select("");
    hub.dispatch(&pointer_up(10.0, 50.0, &["content"]));
    assert_eq!(capture.state(), SelectionState::default());
}

#[test]
fn test_pointer_up_clears_term_only_when_search_bar_closed() {
    let hub = EventHub::new();
    let store = SearchTermStore::new();
    let _capture = attach(&hub, FakeEnv::new(""), &store);

    store.set_term("old");
    store.set_bar_open(true);
    hub.dispatch(&pointer_up(0.0, 0.0, &["content"]));
    assert_eq!(store.term(), "old");

    store.set_bar_open(false);
    hub.dispatch(&pointer_up(0.0, 0.0, &["content"]));
    assert_eq!(store.term(), "");
}

#[test]
fn test_click_outside_hides_but_click_on_toolbar_does_not() {
    let hub = EventHub::new();
    let store = SearchTermStore::new();
    let capture = attach(&hub, FakeEnv::new("text"), &store);

    hub.dispatch(&pointer_up(10.0, 50.0, &["content"]));
    hub.dispatch(&pointer_up(10.0, 50.0, &["icon", "toolbar"]));
    assert!(capture.state().visible);

    hub.dispatch(&pointer_up(10.0, 50.0, &["sidebar"]));
    assert!(!capture.state().visible);
}

#[test]
fn test_copy_and_find_shortcuts_hide() {
    let hub = EventHub::new();
    let store = SearchTermStore::new();
    let capture = attach(&hub, FakeEnv::new("text"), &store);

    for key in [
        KeyEvent::new("c", true, false),
        KeyEvent::new("f", false, true),
    ] {
        hub.dispatch(&pointer_up(10.0, 50.0, &["content"]));
        assert!(capture.state().visible);
        hub.dispatch(&UiEvent::KeyDown(key));
        assert!(!capture.state().visible);
    }

    hub.dispatch(&pointer_up(10.0, 50.0, &["content"]));
    hub.dispatch(&UiEvent::KeyDown(KeyEvent::new("c", false, false)));
    assert!(capture.state().visible);
}

#[test]
fn test_speak_action_passes_text_and_dismisses() {
    let hub = EventHub::new();
    let store = SearchTermStore::new();
    let capture = attach(&hub, FakeEnv::new("read me"), &store);
    hub.dispatch(&pointer_up(10.0, 50.0, &["content"]));

    let spoken = Mutex::new(String::new());
    capture.speak(&|text: &str| *spoken.lock() = text.to_string());
    assert_eq!(*spoken.lock(), "read me");
    assert!(!capture.state().visible);
}

#[test]
fn test_search_action_sets_shared_term_and_dismisses() {
    let hub = EventHub::new();
    let store = SearchTermStore::new();
    let capture = attach(&hub, FakeEnv::new("needle"), &store);
    hub.dispatch(&pointer_up(10.0, 50.0, &["content"]));

    capture.search();
    assert_eq!(store.term(), "needle");
    assert!(!capture.state().visible);
}

#[test]
fn test_toolbar_disabled_hides_but_still_captures() {
    let hub = EventHub::new();
    let store = SearchTermStore::new();
    let options = SelectionOptions {
        toolbar_enabled: false,
        ..SelectionOptions::default()
    };
    let capture =
        SelectionCapture::attach(&hub, ids(), FakeEnv::new("x"), store.clone(), options);
    hub.dispatch(&pointer_up(10.0, 50.0, &["content"]));
    assert!(capture.state().visible);
    assert!(!capture.is_toolbar_visible());
}
