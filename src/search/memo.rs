//! Skips highlight passes whose inputs did not change.

use super::highlight::HighlightEngine;

/// Caches the last highlighted output, keyed by markup and term.
#[derive(Default)]
pub struct HighlightMemo {
    engine: HighlightEngine,
    last: Option<(String, String, String)>, // (markup, term, output)
    passes: usize,
}

impl HighlightMemo {
    pub fn new(engine: HighlightEngine) -> Self {
        Self {
            engine,
            last: None,
            passes: 0,
        }
    }

    /// Highlighted `markup`, recomputed only when `markup` or `term` changed
    /// since the previous call.
    pub fn get(&mut self, markup: &str, term: &str) -> &str {
        let stale = match &self.last {
            Some((m, t, _)) => m != markup || t != term,
            None => true,
        };
        if stale {
            let output = self.engine.highlight_markup(markup, term);
            self.passes += 1;
            let entry = self
                .last
                .insert((markup.to_string(), term.to_string(), output));
            return &entry.2;
        }
        match &self.last {
            Some((_, _, output)) => output,
            None => "",
        }
    }

    /// Number of highlight passes actually run.
    pub fn passes(&self) -> usize {
        self.passes
    }
}
