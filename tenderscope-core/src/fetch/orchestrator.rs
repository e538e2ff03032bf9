use std::fmt;

use tracing::{debug, warn};

use crate::error::ServiceResult;
use crate::types::ResultPage;

/// Sequence number minted for every dispatched fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchToken(u64);

impl FetchToken {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FetchToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What happened to an arriving response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Stored; `total` is the match count the host reported.
    Applied { total: u64 },
    /// The fetch failed; results were cleared and an error recorded.
    Failed,
    /// A newer fetch has been dispatched since; the response was discarded.
    Stale,
}

/// Tracks the latest dispatched fetch and the result set it produced.
///
/// Requests are never cancelled. Each response is checked against the most
/// recently minted token on arrival and dropped if it is not that one, so
/// the rendered page always belongs to the last request the user caused.
#[derive(Debug, Clone)]
pub struct FetchOrchestrator<T> {
    issued: u64,
    latest: Option<FetchToken>,
    loading: bool,
    items: Vec<T>,
    total: u64,
    error: Option<String>,
    loaded_once: bool,
}

impl<T> Default for FetchOrchestrator<T> {
    fn default() -> Self {
        Self {
            issued: 0,
            latest: None,
            loading: false,
            items: Vec::new(),
            total: 0,
            error: None,
            loaded_once: false,
        }
    }
}

impl<T> FetchOrchestrator<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint the token for a fetch about to be dispatched.
    pub fn begin(&mut self) -> FetchToken {
        self.issued += 1;
        let token = FetchToken(self.issued);
        self.latest = Some(token);
        self.loading = true;
        token
    }

    /// Store `result` if `token` is still the latest fetch.
    pub fn complete(
        &mut self,
        token: FetchToken,
        result: ServiceResult<ResultPage<T>>,
    ) -> FetchOutcome {
        if self.latest != Some(token) {
            debug!(
                token = token.get(),
                latest = self.latest.map(FetchToken::get),
                "discarding stale response"
            );
            return FetchOutcome::Stale;
        }

        self.loading = false;
        self.loaded_once = true;
        match result {
            Ok(page) => {
                self.items = page.items;
                self.total = page.total;
                self.error = None;
                FetchOutcome::Applied { total: self.total }
            }
            Err(err) => {
                warn!(token = token.get(), error = %err, "result fetch failed");
                self.items.clear();
                self.total = 0;
                self.error = Some(err.to_string());
                FetchOutcome::Failed
            }
        }
    }

    pub fn latest(&self) -> Option<FetchToken> {
        self.latest
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Mutable view for optimistic edits to the rendered rows.
    pub fn items_mut(&mut self) -> &mut [T] {
        &mut self.items
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether any response has been stored yet, so `total` is meaningful.
    pub fn has_loaded(&self) -> bool {
        self.loaded_once
    }
}
