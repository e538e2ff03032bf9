//! Autosuggest: corpus normalisation and tiered ranking.
//!
//! The index is rebuilt once per corpus load; ranking is a pure function of
//! (query, index) and is recomputed from scratch on every keystroke.

pub mod index;
pub mod ranking;

#[cfg(test)]
mod tests;

pub use index::{SuggestionIndex, SuggestionIndexRow, normalize_query};
pub use ranking::{MAX_SUGGESTIONS, RankedSuggestions, Tier, rank, rank_with_tiers};
