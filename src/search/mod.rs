//! Search highlighting over rendered messages.
//!
//! [`SearchTermStore`] owns the live term; [`HighlightEngine`] applies it to
//! a rendered tree; [`HighlightMemo`] avoids redundant passes when neither
//! the markup nor the term changed.

mod highlight;
mod matcher;
mod memo;
mod store;
pub mod types;

pub use highlight::{HighlightEngine, highlight, highlight_markup};
pub use matcher::LiteralMatcher;
pub use memo::HighlightMemo;
pub use store::{SearchState, SearchTermStore};
pub use types::{HighlightMatch, HighlightOptions};
