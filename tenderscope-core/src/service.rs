//! Collaborator seams.
//!
//! The engine does not know how results are queried, where suggestions come
//! from or how a shortlist is stored. A host application implements
//! [`CatalogService`] for the data side and [`Host`] for the address bar and
//! input focus, and hands both to the session once at construction.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ServiceResult;
use crate::filter::{CanonicalFilter, UrlUpdate};
use crate::types::{FilterKey, Identity, Record, RecordId, ResultPage, ToggleOutcome};

/// Data operations the host performs on the engine's behalf.
#[async_trait]
pub trait CatalogService: Send + Sync + fmt::Debug {
    /// Run the listing query for `filter`. Fails only for transport or
    /// authorisation problems.
    async fn fetch_results(&self, filter: &CanonicalFilter) -> ServiceResult<ResultPage<Record>>;

    /// Remote lookup for fields whose candidates are not in the local corpus.
    async fn fetch_suggestions(&self, field: FilterKey, query: &str) -> ServiceResult<Vec<String>>;

    /// Every locally ranked field's candidates. Called once per session.
    async fn autosuggest_corpus(&self) -> ServiceResult<HashMap<FilterKey, Vec<String>>>;

    /// Persist a shortlist flip for `id`.
    async fn toggle_shortlist(&self, id: &RecordId) -> ServiceResult<ToggleOutcome>;

    /// The signed-in identity, if any.
    async fn check_authenticated(&self) -> ServiceResult<Option<Identity>>;
}

/// Presentation-side hooks. Called synchronously from the session loop.
#[cfg_attr(test, mockall::automock)]
pub trait Host: Send + Sync {
    /// Write the query string without a full navigation.
    fn write_url(&self, update: &UrlUpdate);

    /// Move keyboard focus to the input for `field`.
    fn focus(&self, field: FilterKey);
}

/// Collaborator handles for one session. Created once, read-only afterwards.
#[derive(Clone)]
pub struct SessionServices {
    pub catalog: Arc<dyn CatalogService>,
    pub host: Arc<dyn Host>,
}

impl SessionServices {
    pub fn new(catalog: Arc<dyn CatalogService>, host: Arc<dyn Host>) -> Self {
        Self { catalog, host }
    }
}

impl fmt::Debug for SessionServices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionServices")
            .field("catalog", &self.catalog)
            .finish_non_exhaustive()
    }
}

/// A [`Host`] that does nothing, for headless use (probes, batch tools).
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHost;

impl Host for NullHost {
    fn write_url(&self, _update: &UrlUpdate) {}

    fn focus(&self, _field: FilterKey) {}
}
