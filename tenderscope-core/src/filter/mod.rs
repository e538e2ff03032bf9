//! The canonical filter the result fetch depends on, the rules for when
//! pagination resets, and its address-bar encoding.

pub mod builder;
pub mod composer;
pub mod types;
pub mod url;


pub use builder::CanonicalFilterBuilder;
pub use composer::FilterComposer;
pub use types::{CanonicalFilter, FilterChange};
pub use url::{HistoryMode, Hydrated, UrlSync, UrlUpdate, decode_query, encode_query};
