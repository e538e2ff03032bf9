use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::config::{EngineConfig, Surface, SuggestionSource};
use crate::error::{EngineError, Result};
use crate::fetch::FetchOrchestrator;
use crate::filter::{CanonicalFilter, FilterComposer, UrlSync};
use crate::input::FieldController;
use crate::shortlist::OptimisticShortlist;
use crate::suggest::SuggestionIndex;
use crate::types::{FilterKey, Identity, Record};

/// Recommended-only gate: enabling needs a signed-in identity, otherwise a
/// prompt is shown for a while instead.
#[derive(Debug, Clone, Default)]
pub struct AuthGate {
    pub(crate) identity: Option<Identity>,
    /// An enable request is waiting for the session check.
    pub(crate) pending_enable: bool,
    pub(crate) prompt_visible: bool,
    pub(crate) prompt_generation: u64,
}

impl AuthGate {
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn is_checking(&self) -> bool {
        self.pending_enable
    }

    pub fn prompt_visible(&self) -> bool {
        self.prompt_visible
    }
}

/// All state of one listing view. Mutated only by [`update`](super::update).
#[derive(Debug)]
pub struct BrowseSession {
    pub(crate) config: Arc<EngineConfig>,
    pub(crate) surface: Surface,
    pub(crate) fields: BTreeMap<FilterKey, FieldController>,
    pub(crate) indexes: HashMap<FilterKey, SuggestionIndex>,
    pub(crate) corpus_requested: bool,
    pub(crate) composer: FilterComposer,
    pub(crate) url: UrlSync,
    pub(crate) results: FetchOrchestrator<Record>,
    pub(crate) shortlist: OptimisticShortlist,
    pub(crate) auth: AuthGate,
}

impl BrowseSession {
    pub fn new(config: Arc<EngineConfig>, surface: Surface) -> Result<Self> {
        config.validate()?;

        let fields = config
            .surface(surface)
            .fields
            .iter()
            .map(|spec| {
                (
                    spec.key,
                    FieldController::new(*spec, config.remote_suggest, config.suggestion_limit),
                )
            })
            .collect();

        Ok(Self {
            surface,
            fields,
            indexes: HashMap::new(),
            corpus_requested: false,
            composer: FilterComposer::new(config.page_size),
            url: UrlSync::new(),
            results: FetchOrchestrator::new(),
            shortlist: OptimisticShortlist::new(),
            auth: AuthGate::default(),
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn filter(&self) -> &CanonicalFilter {
        self.composer.filter()
    }

    pub fn field(&self, key: FilterKey) -> Result<&FieldController> {
        self.fields.get(&key).ok_or(EngineError::UnknownField(key))
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldController> {
        self.fields.values()
    }

    pub fn results(&self) -> &FetchOrchestrator<Record> {
        &self.results
    }

    pub fn shortlist(&self) -> &OptimisticShortlist {
        &self.shortlist
    }

    pub fn auth(&self) -> &AuthGate {
        &self.auth
    }

    /// Last query string written to or read from the address bar.
    pub fn url(&self) -> Option<&str> {
        self.url.last()
    }

    pub fn index(&self, key: FilterKey) -> Option<&SuggestionIndex> {
        self.indexes.get(&key)
    }

    /// Whether any field on this surface ranks against the local corpus.
    pub(crate) fn needs_corpus(&self) -> bool {
        self.fields
            .values()
            .any(|field| field.spec().suggestions == SuggestionSource::Local)
    }
}
