//! Address-bar encoding of the canonical filter.
//!
//! Only non-default values are written, so an untouched listing has an empty
//! query string and every shared link is as short as it can be. Decoding is
//! forgiving: unknown keys, unparsable values and empty values are skipped.

use tracing::debug;
use url::form_urlencoded;

use super::types::CanonicalFilter;
use crate::types::{
    BidType, FilterKey, ModelError, RecordSource, SortBy, StatusTab, TriState,
};

pub const EMD_PARAM: &str = "emd";
pub const BID_RA_PARAM: &str = "bidRa";
pub const RECOMMENDED_PARAM: &str = "recommended";
pub const PAGE_PARAM: &str = "page";

/// How a URL write interacts with browser history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    /// Overwrite the current entry (filter edits).
    Replace,
    /// Add an entry so Back returns to the previous page (pagination).
    Push,
}

/// A pending address-bar write. `query` carries no leading `?`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlUpdate {
    pub query: String,
    pub mode: HistoryMode,
}

impl UrlUpdate {
    /// The `location.search` form: empty, or the query prefixed with `?`.
    pub fn search(&self) -> String {
        if self.query.is_empty() {
            String::new()
        } else {
            format!("?{}", self.query)
        }
    }
}

/// Serialise the non-default parts of `filter`. Keys come out in a fixed
/// order so equal filters always encode identically.
pub fn encode_query(filter: &CanonicalFilter) -> String {
    let mut out = form_urlencoded::Serializer::new(String::new());

    for (key, value) in &filter.fields {
        out.append_pair(key.as_param(), value);
    }
    if filter.tab != StatusTab::default() {
        out.append_pair(StatusTab::PARAM, filter.tab.as_param());
    }
    if filter.emd != TriState::Any {
        out.append_pair(EMD_PARAM, filter.emd.as_param());
    }
    if filter.bid_ra != TriState::Any {
        out.append_pair(BID_RA_PARAM, filter.bid_ra.as_param());
    }
    if filter.bid_type != BidType::default() {
        out.append_pair(BidType::PARAM, filter.bid_type.as_param());
    }
    if let Some(source) = filter.source {
        out.append_pair(RecordSource::PARAM, source.as_param());
    }
    if filter.sort_by != SortBy::default() {
        out.append_pair(SortBy::PARAM, filter.sort_by.as_param());
    }
    if filter.recommended_only {
        out.append_pair(RECOMMENDED_PARAM, "true");
    }
    if filter.page > 1 {
        out.append_pair(PAGE_PARAM, &filter.page.to_string());
    }

    out.finish()
}

/// Parse a query string (with or without the leading `?`) into a filter.
/// Later duplicates win.
pub fn decode_query(query: &str, page_size: u32) -> CanonicalFilter {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut filter = CanonicalFilter::new(page_size);

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }

        if let Some(field) = FilterKey::from_param(&key) {
            filter.fields.insert(field, value.to_owned());
            continue;
        }

        let parsed = match &*key {
            StatusTab::PARAM => value.parse::<StatusTab>().map(|tab| filter.tab = tab),
            EMD_PARAM => TriState::parse_param(EMD_PARAM, value).map(|v| filter.emd = v),
            BID_RA_PARAM => {
                TriState::parse_param(BID_RA_PARAM, value).map(|v| filter.bid_ra = v)
            }
            BidType::PARAM => value.parse::<BidType>().map(|kind| filter.bid_type = kind),
            RecordSource::PARAM => value
                .parse::<RecordSource>()
                .map(|source| filter.source = Some(source)),
            SortBy::PARAM => value.parse::<SortBy>().map(|sort| filter.sort_by = sort),
            RECOMMENDED_PARAM => parse_flag(value).map(|on| filter.recommended_only = on),
            PAGE_PARAM => parse_page(value).map(|page| filter.page = page),
            other => {
                debug!(key = other, "ignoring unknown query parameter");
                Ok(())
            }
        };

        if let Err(err) = parsed {
            debug!(error = %err, "ignoring invalid query parameter");
        }
    }

    filter
}

fn parse_flag(value: &str) -> Result<bool, ModelError> {
    match value {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(ModelError::InvalidValue {
            key: RECOMMENDED_PARAM,
            value: other.to_string(),
        }),
    }
}

fn parse_page(value: &str) -> Result<u32, ModelError> {
    value
        .parse::<u32>()
        .ok()
        .filter(|page| *page > 0)
        .ok_or_else(|| ModelError::InvalidValue {
            key: PAGE_PARAM,
            value: value.to_string(),
        })
}

/// Result of reading the address bar.
#[derive(Debug, Clone)]
pub struct Hydrated {
    pub filter: CanonicalFilter,
    /// Set when the incoming query was not in canonical form.
    pub canonical: Option<UrlUpdate>,
}

/// Keeps the address bar in step with the canonical filter, suppressing
/// writes that would not change it.
#[derive(Debug, Clone, Default)]
pub struct UrlSync {
    last: Option<String>,
}

impl UrlSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Query string most recently written or read.
    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }

    /// Read the address bar. The decoded filter becomes the reference point
    /// for later writes.
    pub fn hydrate(&mut self, query: &str, page_size: u32) -> Hydrated {
        let incoming = query.strip_prefix('?').unwrap_or(query);
        let filter = decode_query(incoming, page_size);
        let encoded = encode_query(&filter);

        let canonical = (encoded != incoming).then(|| UrlUpdate {
            query: encoded.clone(),
            mode: HistoryMode::Replace,
        });
        self.last = Some(encoded);

        Hydrated { filter, canonical }
    }

    /// Read the address bar after the browser moved on its own (back or
    /// forward). The incoming text is taken as-is for later comparisons,
    /// since nothing is written back to canonicalise it.
    pub fn observe(&mut self, query: &str, page_size: u32) -> CanonicalFilter {
        let incoming = query.strip_prefix('?').unwrap_or(query);
        self.last = Some(incoming.to_owned());
        decode_query(incoming, page_size)
    }

    /// Encode `filter` and return the write to perform, if the address bar
    /// would actually change.
    pub fn publish(&mut self, filter: &CanonicalFilter, mode: HistoryMode) -> Option<UrlUpdate> {
        let encoded = encode_query(filter);
        if self.last.as_deref() == Some(encoded.as_str()) {
            return None;
        }
        self.last = Some(encoded.clone());
        Some(UrlUpdate {
            query: encoded,
            mode,
        })
    }
}
