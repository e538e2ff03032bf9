//! Session messages

use std::collections::HashMap;

use crate::error::ServiceResult;
use crate::fetch::FetchToken;
use crate::input::NavKey;
use crate::types::{
    BidType, FilterKey, Identity, Record, RecordId, RecordSource, ResultPage, SortBy, StatusTab,
    ToggleOutcome, TriState,
};

/// Everything that can happen to a session.
#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    // Lifecycle
    /// First render: read the address bar, then load.
    Mount { query: String },
    /// Back/forward changed the address bar under us.
    UrlChanged { query: String },

    // Field interaction
    /// A keystroke in a text field.
    Input { field: FilterKey, value: String },
    /// The field gained focus.
    Focus(FilterKey),
    /// Outside click.
    Dismiss(FilterKey),
    /// Arrow keys, Enter, Escape inside a field.
    Navigate { field: FilterKey, key: NavKey },
    /// Mouse pick of a dropdown row.
    SelectSuggestion { field: FilterKey, index: usize },
    /// The field's clear button.
    Clear(FilterKey),

    // Toggles
    SetTab(StatusTab),
    SetEmd(TriState),
    SetBidRa(TriState),
    SetBidType(BidType),
    SetSource(Option<RecordSource>),
    SetSortBy(SortBy),
    /// Guarded by a session check when enabling.
    SetRecommendedOnly(bool),

    // Listing
    /// Pagination controls.
    GoToPage(u32),
    ToggleShortlist(RecordId),
    /// Re-issue the fetch for the current filter.
    Refresh,

    // Internal events
    DebounceElapsed { field: FilterKey, generation: u64 },
    SuggestDebounceElapsed { field: FilterKey, generation: u64 },
    CorpusLoaded(ServiceResult<HashMap<FilterKey, Vec<String>>>),
    RemoteSuggestionsLoaded {
        field: FilterKey,
        generation: u64,
        result: ServiceResult<Vec<String>>,
    },
    ResultsLoaded {
        token: FetchToken,
        result: ServiceResult<ResultPage<Record>>,
    },
    ShortlistPersisted {
        id: RecordId,
        result: ServiceResult<ToggleOutcome>,
    },
    AuthChecked(ServiceResult<Option<Identity>>),
    AuthPromptExpired { generation: u64 },
    ShortlistRefetchElapsed,
}

impl Message {
    /// Convert to string for debugging
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mount { .. } => "Mount",
            Self::UrlChanged { .. } => "UrlChanged",
            Self::Input { .. } => "Input",
            Self::Focus(_) => "Focus",
            Self::Dismiss(_) => "Dismiss",
            Self::Navigate { .. } => "Navigate",
            Self::SelectSuggestion { .. } => "SelectSuggestion",
            Self::Clear(_) => "Clear",
            Self::SetTab(_) => "SetTab",
            Self::SetEmd(_) => "SetEmd",
            Self::SetBidRa(_) => "SetBidRa",
            Self::SetBidType(_) => "SetBidType",
            Self::SetSource(_) => "SetSource",
            Self::SetSortBy(_) => "SetSortBy",
            Self::SetRecommendedOnly(_) => "SetRecommendedOnly",
            Self::GoToPage(_) => "GoToPage",
            Self::ToggleShortlist(_) => "ToggleShortlist",
            Self::Refresh => "Refresh",
            Self::DebounceElapsed { .. } => "DebounceElapsed",
            Self::SuggestDebounceElapsed { .. } => "SuggestDebounceElapsed",
            Self::CorpusLoaded(_) => "CorpusLoaded",
            Self::RemoteSuggestionsLoaded { .. } => "RemoteSuggestionsLoaded",
            Self::ResultsLoaded { .. } => "ResultsLoaded",
            Self::ShortlistPersisted { .. } => "ShortlistPersisted",
            Self::AuthChecked(_) => "AuthChecked",
            Self::AuthPromptExpired { .. } => "AuthPromptExpired",
            Self::ShortlistRefetchElapsed => "ShortlistRefetchElapsed",
        }
    }
}
