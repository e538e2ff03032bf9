//! Engine/UI focused snapshot of the types surface.
//! Prefer importing from this module instead of individual tree nodes when
//! wiring a host application.

pub use super::auth::Identity;
pub use super::filter_types::{
    BidType, FilterKey, RecordSource, SortBy, StatusTab, TriState,
};
pub use super::ids::RecordId;
pub use super::record::{Record, ResultPage};
pub use super::shortlist::ToggleOutcome;
