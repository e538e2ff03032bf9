//! Core data model definitions shared across Tenderscope crates.
#![allow(missing_docs)]

pub mod auth;
pub mod error;
pub mod filter_types;
pub mod ids;
pub mod prelude;
pub mod record;
pub mod shortlist;

// Intentionally curated re-exports for downstream consumers.
pub use auth::Identity;
pub use error::{ModelError, Result as ModelResult};
pub use filter_types::{
    BidType, FilterKey, RecordSource, SortBy, StatusTab, TriState,
};
pub use ids::RecordId;
pub use record::{Record, ResultPage};
pub use shortlist::{SERVER_ERROR_PREFIX, ToggleOutcome};
