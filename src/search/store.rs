//! The process-wide search term.
//!
//! One store owns the term. The search bar and the selection toolbar write
//! it; every highlight pass reads its current value at call time and never
//! caches it. Subscribers are notified on change so hosts can re-highlight.

use std::sync::{Arc, OnceLock};
use tokio::sync::watch;

/// Snapshot of the shared search state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    /// Current term. Empty means "no highlighting".
    pub term: String,
    /// Whether the global search bar is open.
    pub bar_open: bool,
}

/// Shared, observable search term. Clones share the same state.
#[derive(Debug, Clone)]
pub struct SearchTermStore {
    tx: Arc<watch::Sender<SearchState>>,
}

impl Default for SearchTermStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchTermStore {
    /// A standalone store (tests, embedded hosts). Most callers want
    /// [`SearchTermStore::global`].
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SearchState::default());
        Self { tx: Arc::new(tx) }
    }

    /// The process-wide store.
    pub fn global() -> &'static SearchTermStore {
        static STORE: OnceLock<SearchTermStore> = OnceLock::new();
        STORE.get_or_init(SearchTermStore::new)
    }

    /// Current term.
    pub fn term(&self) -> String {
        self.tx.borrow().term.clone()
    }

    pub fn state(&self) -> SearchState {
        self.tx.borrow().clone()
    }

    /// Replace the term. Subscribers are only notified when it changes.
    pub fn set_term(&self, term: impl Into<String>) {
        let term = term.into();
        self.tx.send_if_modified(|state| {
            if state.term == term {
                return false;
            }
            log::debug!("search term set ({} chars)", term.chars().count());
            state.term = term;
            true
        });
    }

    pub fn clear(&self) {
        self.set_term(String::new());
    }

    pub fn is_bar_open(&self) -> bool {
        self.tx.borrow().bar_open
    }

    pub fn set_bar_open(&self, open: bool) {
        self.tx.send_if_modified(|state| {
            let changed = state.bar_open != open;
            state.bar_open = open;
            changed
        });
    }

    /// Receiver that wakes on every term or bar change.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.tx.subscribe()
    }
}
