use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::{BidType, FilterKey, RecordSource, SortBy, StatusTab, TriState};

/// Everything the result fetch depends on.
///
/// Text fields hold only non-empty applied values; a missing key means the
/// field is not filtering. `page` is 1-based and `page_size` is fixed for the
/// session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalFilter {
    pub fields: BTreeMap<FilterKey, String>,
    pub tab: StatusTab,
    pub emd: TriState,
    pub bid_ra: TriState,
    pub bid_type: BidType,
    pub source: Option<RecordSource>,
    pub recommended_only: bool,
    pub sort_by: SortBy,
    pub page: u32,
    pub page_size: u32,
}

impl CanonicalFilter {
    pub fn new(page_size: u32) -> Self {
        Self {
            fields: BTreeMap::new(),
            tab: StatusTab::default(),
            emd: TriState::default(),
            bid_ra: TriState::default(),
            bid_type: BidType::default(),
            source: None,
            recommended_only: false,
            sort_by: SortBy::default(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn value(&self, key: FilterKey) -> Option<&str> {
        self.fields.get(&key).map(String::as_str)
    }

    /// Zero-based index of the first record on the current page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }

    /// Number of pages for `total` matches; never less than one.
    pub fn page_count(&self, total: u64) -> u32 {
        let pages = total.div_ceil(u64::from(self.page_size)).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }
}

/// One edit to the canonical filter other than pagination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    /// New applied value for a text field; empty removes it.
    Field(FilterKey, String),
    Tab(StatusTab),
    Emd(TriState),
    BidRa(TriState),
    BidType(BidType),
    Source(Option<RecordSource>),
    RecommendedOnly(bool),
    SortBy(SortBy),
}

impl FilterChange {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Field(..) => "Field",
            Self::Tab(_) => "Tab",
            Self::Emd(_) => "Emd",
            Self::BidRa(_) => "BidRa",
            Self::BidType(_) => "BidType",
            Self::Source(_) => "Source",
            Self::RecommendedOnly(_) => "RecommendedOnly",
            Self::SortBy(_) => "SortBy",
        }
    }
}
