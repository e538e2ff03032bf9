use tracing::debug;

use super::types::{CanonicalFilter, FilterChange};

/// Owns the canonical filter and decides when pagination resets.
///
/// Any real change to a field, toggle or sort order sends the view back to
/// page 1. Changing the page touches nothing else. Re-applying the current
/// value is not a change.
#[derive(Debug, Clone)]
pub struct FilterComposer {
    filter: CanonicalFilter,
}

impl FilterComposer {
    pub fn new(page_size: u32) -> Self {
        Self {
            filter: CanonicalFilter::new(page_size),
        }
    }

    pub fn filter(&self) -> &CanonicalFilter {
        &self.filter
    }

    pub fn page(&self) -> u32 {
        self.filter.page
    }

    /// Apply one edit. Returns whether the filter changed.
    pub fn apply(&mut self, change: FilterChange) -> bool {
        let kind = change.as_str();
        let changed = match change {
            FilterChange::Field(key, value) => {
                let value = value.trim();
                if value.is_empty() {
                    self.filter.fields.remove(&key).is_some()
                } else if self.filter.value(key) == Some(value) {
                    false
                } else {
                    self.filter.fields.insert(key, value.to_owned());
                    true
                }
            }
            FilterChange::Tab(tab) => replace(&mut self.filter.tab, tab),
            FilterChange::Emd(emd) => replace(&mut self.filter.emd, emd),
            FilterChange::BidRa(bid_ra) => replace(&mut self.filter.bid_ra, bid_ra),
            FilterChange::BidType(bid_type) => replace(&mut self.filter.bid_type, bid_type),
            FilterChange::Source(source) => replace(&mut self.filter.source, source),
            FilterChange::RecommendedOnly(on) => {
                replace(&mut self.filter.recommended_only, on)
            }
            FilterChange::SortBy(sort_by) => replace(&mut self.filter.sort_by, sort_by),
        };

        if changed {
            if self.filter.page != 1 {
                debug!(change = kind, from = self.filter.page, "page reset");
            }
            self.filter.page = 1;
        }
        changed
    }

    /// Move to `page` without touching anything else. Page 0 is rejected.
    pub fn set_page(&mut self, page: u32) -> bool {
        if page == 0 {
            return false;
        }
        replace(&mut self.filter.page, page)
    }

    /// Pull the page back inside `[1, page_count(total)]`. Returns the new
    /// page when it had to move.
    pub fn clamp_page(&mut self, total: u64) -> Option<u32> {
        let last = self.filter.page_count(total);
        if self.filter.page > last {
            debug!(page = self.filter.page, last, total, "page clamped");
            self.filter.page = last;
            Some(last)
        } else {
            None
        }
    }

    /// Swap in a filter decoded from the address bar. The session's page
    /// size always wins over whatever the incoming filter carries.
    pub fn replace(&mut self, filter: CanonicalFilter) -> bool {
        let filter = CanonicalFilter {
            page_size: self.filter.page_size,
            page: filter.page.max(1),
            ..filter
        };
        if filter == self.filter {
            return false;
        }
        self.filter = filter;
        true
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}
