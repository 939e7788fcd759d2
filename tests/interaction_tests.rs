//! Integration tests for the interactive layer: selection capture feeding the
//! shared search term, memoized highlighting, and copy clicks delivered
//! through the event hub.

mod common;

use chatmark::clipboard::{CopyController, CopyFeedback, MemoryClipboard};
use chatmark::dom::{Element, EventTarget};
use chatmark::markdown::{MarkdownCompiler, RenderOptions};
use chatmark::search::{HighlightMemo, SearchTermStore};
use chatmark::selection::{
    CaptureIds, EventHub, PointerEvent, SelectionCapture, SelectionOptions, UiEvent,
};
use common::FakeSelectionEnv;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn pointer_up(within: &[&str]) -> UiEvent {
    UiEvent::PointerUp(PointerEvent::new(120.0, 300.0, EventTarget::within_ids(within)))
}

#[test]
fn selection_search_highlights_rendered_message() {
    let markup = MarkdownCompiler::default().render(
        "This is an error message.\n\n```text\nerror in code\n```\n",
        RenderOptions::complete(),
    );

    let hub = EventHub::new();
    let store = SearchTermStore::new();
    let capture = SelectionCapture::attach(
        &hub,
        CaptureIds::new("message-1", "selection-toolbar"),
        FakeSelectionEnv::new("error"),
        store.clone(),
        SelectionOptions::default(),
    );

    hub.dispatch(&pointer_up(&["message-1"]));
    assert!(capture.is_toolbar_visible());
    capture.search();
    assert!(!capture.is_toolbar_visible());

    let mut memo = HighlightMemo::default();
    let highlighted = memo.get(&markup, &store.term()).to_string();
    assert!(highlighted.contains("This is an <span class=\"bg-active rounded-sm\">error</span> message."));
    // Code text is highlightable too; only script/style/svg are skipped.
    assert_eq!(highlighted.matches("bg-active rounded-sm").count(), 2);

    // Same inputs: no second pass.
    memo.get(&markup, &store.term());
    assert_eq!(memo.passes(), 1);

    // Term cleared on the next pointer-up while the bar is closed.
    hub.dispatch(&pointer_up(&["message-1"]));
    assert_eq!(store.term(), "");
    assert_eq!(memo.get(&markup, &store.term()), markup);
    assert_eq!(memo.passes(), 2);
}

#[test]
fn repeated_mounts_do_not_accumulate_listeners() {
    let hub = EventHub::new();
    let store = SearchTermStore::new();
    let clipboard = MemoryClipboard::new();
    let controller = Arc::new(CopyController::new(
        Arc::new(clipboard),
        CopyFeedback::new(Duration::from_millis(1000), "Copy", "Copied"),
    ));

    for _ in 0..5 {
        let capture = SelectionCapture::attach(
            &hub,
            CaptureIds::new("message-1", "selection-toolbar"),
            FakeSelectionEnv::new("x"),
            store.clone(),
            SelectionOptions::default(),
        );
        let copy_guard = controller.attach(&hub);
        assert_eq!(hub.listener_count(), 4);
        drop(copy_guard);
        drop(capture);
    }
    assert_eq!(hub.listener_count(), 0);
}

#[test]
fn click_on_copy_label_through_hub_copies_source() {
    let doc = MarkdownCompiler::default().render_document(
        "```python\nprint('a %20 b')\n```",
        RenderOptions::complete(),
    );
    let mut path = doc
        .find_path(|el: &Element| el.has_class("copy-label"))
        .expect("label");
    let target = doc.target_at(&path).expect("label target");
    assert_eq!(target.closest_with_class("copy-btn").map(|e| e.tag.as_str()), Some("div"));

    let hub = EventHub::new();
    let clipboard = MemoryClipboard::new();
    let controller = Arc::new(CopyController::new(
        Arc::new(clipboard.clone()),
        CopyFeedback::new(Duration::from_millis(1000), "Copy", "Copied"),
    ));
    let _guard = controller.attach(&hub);

    let before = Instant::now();
    hub.dispatch(&UiEvent::Click(PointerEvent::new(0.0, 0.0, target)));
    assert_eq!(clipboard.contents().as_deref(), Some("print('a %20 b')\n"));
    assert!(controller.feedback().is_copied(before + Duration::from_millis(10)));

    // A click on the code itself is not a copy activation.
    path.pop();
    path.pop();
    path.push(1);
    let code_target = doc.target_at(&path).expect("pre target");
    assert_eq!(code_target.chain()[0].tag, "pre");
    let result = controller
        .handle_click(&PointerEvent::new(0.0, 0.0, code_target), Instant::now())
        .expect("no write attempted");
    assert_eq!(result, None);
}
