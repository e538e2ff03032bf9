//! # Tenderscope Core
//!
//! The filter, suggestion and reconciliation engine behind Tenderscope's
//! listing views. It turns raw keystrokes into a stable, race-safe,
//! URL-consistent result view:
//!
//! - [`suggest`]: corpus normalisation and tiered autosuggest ranking
//! - [`input`]: per-field raw/applied values, debounce and dropdown navigation
//! - [`filter`]: the canonical filter, pagination reset rules and URL codec
//! - [`fetch`]: sequence-token guarded result loading
//! - [`shortlist`]: optimistic shortlist flips with rollback
//! - [`session`]: the message/update state machine and its tokio runtime
//!
//! Everything outside the engine (rendering, routing, the actual query
//! backend) is reached through the traits in [`service`].
//!
//! ## Examples
//!
//! ```
//! use tenderscope_core::suggest::{SuggestionIndex, rank};
//!
//! let index: SuggestionIndex = [
//!     "Ministry of Defence",
//!     "Defence Research Organisation",
//!     "Home Affairs",
//! ]
//! .into_iter()
//! .map(String::from)
//! .collect();
//!
//! let ranked = rank("defe", &index, 4);
//! assert_eq!(
//!     ranked.as_slice(),
//!     ["Defence Research Organisation", "Ministry of Defence"]
//! );
//! ```

#![allow(missing_docs)]

pub mod config;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod input;
pub mod service;
pub mod session;
pub mod shortlist;
pub mod suggest;
pub mod types;

pub use config::{EngineConfig, FieldSpec, Surface, SurfaceConfig, SuggestionSource};
pub use error::{EngineError, ServiceError, ServiceResult};
pub use filter::{CanonicalFilter, HistoryMode, UrlUpdate};
pub use service::{CatalogService, Host, NullHost, SessionServices};
pub use session::{BrowseSession, Message, SessionHandle, SessionRuntime};
