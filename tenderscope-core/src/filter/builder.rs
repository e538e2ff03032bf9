use super::types::CanonicalFilter;
use crate::types::{BidType, FilterKey, RecordSource, SortBy, StatusTab, TriState};

/// Fluent construction of a [`CanonicalFilter`], mostly for hosts that start
/// a session from saved searches and for tests.
#[derive(Debug, Clone)]
pub struct CanonicalFilterBuilder {
    filter: CanonicalFilter,
}

impl CanonicalFilterBuilder {
    pub fn new(page_size: u32) -> Self {
        Self {
            filter: CanonicalFilter::new(page_size),
        }
    }

    /// Set a text field; blank values are dropped.
    pub fn field(mut self, key: FilterKey, value: impl Into<String>) -> Self {
        let value = value.into();
        let value = value.trim();
        if value.is_empty() {
            self.filter.fields.remove(&key);
        } else {
            self.filter.fields.insert(key, value.to_owned());
        }
        self
    }

    pub fn tab(mut self, tab: StatusTab) -> Self {
        self.filter.tab = tab;
        self
    }

    pub fn emd(mut self, emd: TriState) -> Self {
        self.filter.emd = emd;
        self
    }

    pub fn bid_ra(mut self, bid_ra: TriState) -> Self {
        self.filter.bid_ra = bid_ra;
        self
    }

    pub fn bid_type(mut self, bid_type: BidType) -> Self {
        self.filter.bid_type = bid_type;
        self
    }

    pub fn source(mut self, source: RecordSource) -> Self {
        self.filter.source = Some(source);
        self
    }

    pub fn recommended_only(mut self) -> Self {
        self.filter.recommended_only = true;
        self
    }

    pub fn sort_by(mut self, sort_by: SortBy) -> Self {
        self.filter.sort_by = sort_by;
        self
    }

    /// Page number; `0` is treated as the first page.
    pub fn page(mut self, page: u32) -> Self {
        self.filter.page = page.max(1);
        self
    }

    pub fn build(self) -> CanonicalFilter {
        self.filter
    }
}
