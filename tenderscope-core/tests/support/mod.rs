//! Shared harness for session integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use tenderscope_core::config::{EngineConfig, Surface};
use tenderscope_core::filter::{CanonicalFilter, UrlUpdate};
use tenderscope_core::service::{CatalogService, Host, SessionServices};
use tenderscope_core::session::{BrowseSession, SessionRuntime};
use tenderscope_core::types::{FilterKey, Identity, Record, RecordId, ResultPage, ToggleOutcome};
use tenderscope_core::{ServiceError, ServiceResult};

type ResultScript =
    Box<dyn Fn(&CanonicalFilter) -> (Duration, ServiceResult<ResultPage<Record>>) + Send + Sync>;
type ToggleScript = Box<dyn Fn(&RecordId) -> (Duration, ServiceResult<ToggleOutcome>) + Send + Sync>;

/// Catalog whose answers (and how long they take) are scripted per test.
pub struct ScriptedCatalog {
    results: ResultScript,
    toggles: ToggleScript,
    corpus: HashMap<FilterKey, Vec<String>>,
    sellers: Vec<String>,
    identity: Option<Identity>,
    pub fetched: Mutex<Vec<CanonicalFilter>>,
    pub suggestion_queries: Mutex<Vec<String>>,
    pub toggled: Mutex<Vec<RecordId>>,
}

impl std::fmt::Debug for ScriptedCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptedCatalog").finish_non_exhaustive()
    }
}

impl Default for ScriptedCatalog {
    fn default() -> Self {
        Self {
            results: Box::new(|_| (Duration::ZERO, Ok(ResultPage::empty()))),
            toggles: Box::new(|_| (Duration::ZERO, Ok(ToggleOutcome::persisted()))),
            corpus: HashMap::new(),
            sellers: Vec::new(),
            identity: None,
            fetched: Mutex::new(Vec::new()),
            suggestion_queries: Mutex::new(Vec::new()),
            toggled: Mutex::new(Vec::new()),
        }
    }
}

impl ScriptedCatalog {
    pub fn with_results<F>(mut self, script: F) -> Self
    where
        F: Fn(&CanonicalFilter) -> (Duration, ServiceResult<ResultPage<Record>>)
            + Send
            + Sync
            + 'static,
    {
        self.results = Box::new(script);
        self
    }

    pub fn with_toggles<F>(mut self, script: F) -> Self
    where
        F: Fn(&RecordId) -> (Duration, ServiceResult<ToggleOutcome>) + Send + Sync + 'static,
    {
        self.toggles = Box::new(script);
        self
    }

    pub fn with_corpus(mut self, field: FilterKey, values: &[&str]) -> Self {
        self.corpus
            .insert(field, values.iter().map(|value| value.to_string()).collect());
        self
    }

    pub fn with_sellers(mut self, values: &[&str]) -> Self {
        self.sellers = values.iter().map(|value| value.to_string()).collect();
        self
    }

    pub fn signed_in(mut self, user_id: &str) -> Self {
        self.identity = Some(Identity::new(user_id));
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetched.lock().unwrap().len()
    }

    pub fn last_fetched(&self) -> CanonicalFilter {
        self.fetched
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("at least one fetch")
    }
}

#[async_trait]
impl CatalogService for ScriptedCatalog {
    async fn fetch_results(
        &self,
        filter: &CanonicalFilter,
    ) -> ServiceResult<ResultPage<Record>> {
        self.fetched.lock().unwrap().push(filter.clone());
        let (delay, result) = (self.results)(filter);
        tokio::time::sleep(delay).await;
        result
    }

    async fn fetch_suggestions(
        &self,
        _field: FilterKey,
        query: &str,
    ) -> ServiceResult<Vec<String>> {
        self.suggestion_queries
            .lock()
            .unwrap()
            .push(query.to_string());
        let query = query.to_lowercase();
        Ok(self
            .sellers
            .iter()
            .filter(|seller| seller.to_lowercase().contains(&query))
            .cloned()
            .collect())
    }

    async fn autosuggest_corpus(&self) -> ServiceResult<HashMap<FilterKey, Vec<String>>> {
        Ok(self.corpus.clone())
    }

    async fn toggle_shortlist(&self, id: &RecordId) -> ServiceResult<ToggleOutcome> {
        self.toggled.lock().unwrap().push(id.clone());
        let (delay, result) = (self.toggles)(id);
        tokio::time::sleep(delay).await;
        result
    }

    async fn check_authenticated(&self) -> ServiceResult<Option<Identity>> {
        Ok(self.identity.clone())
    }
}

/// Host that remembers every address-bar write and focus request.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub urls: Mutex<Vec<UrlUpdate>>,
    pub focused: Mutex<Vec<FilterKey>>,
}

impl RecordingHost {
    pub fn urls(&self) -> Vec<UrlUpdate> {
        self.urls.lock().unwrap().clone()
    }
}

impl Host for RecordingHost {
    fn write_url(&self, update: &UrlUpdate) {
        self.urls.lock().unwrap().push(update.clone());
    }

    fn focus(&self, field: FilterKey) {
        self.focused.lock().unwrap().push(field);
    }
}

pub struct Harness {
    pub runtime: SessionRuntime,
    pub catalog: Arc<ScriptedCatalog>,
    pub host: Arc<RecordingHost>,
}

pub fn harness(surface: Surface, catalog: ScriptedCatalog) -> Harness {
    let catalog = Arc::new(catalog);
    let host = Arc::new(RecordingHost::default());
    let session = BrowseSession::new(Arc::new(EngineConfig::default()), surface)
        .expect("default config is valid");
    let runtime = SessionRuntime::new(
        session,
        SessionServices::new(catalog.clone(), host.clone()),
    );
    Harness {
        runtime,
        catalog,
        host,
    }
}

pub fn record(id: &str, shortlisted: bool) -> Record {
    Record::new(RecordId::new(id).expect("non-empty id")).shortlisted(shortlisted)
}

pub fn page_of(ids: &[&str], total: u64) -> ResultPage<Record> {
    ResultPage::new(ids.iter().map(|id| record(id, false)).collect(), total)
}

pub fn item_ids(runtime: &SessionRuntime) -> Vec<String> {
    runtime
        .session()
        .results()
        .items()
        .iter()
        .map(|record| record.id.to_string())
        .collect()
}

pub fn transport_error() -> ServiceError {
    ServiceError::Transport("connection reset".into())
}
