use std::collections::BTreeMap;

use crate::ids::RecordId;

/// One row of the catalog as returned by the host's result fetch.
///
/// `attributes` is opaque display data (bid number, ministry, closing date, ...);
/// the engine only reads `id` and flips `is_shortlisted`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    pub id: RecordId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_shortlisted: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attributes: BTreeMap<String, String>,
}

impl Record {
    pub fn new(id: RecordId) -> Self {
        Self {
            id,
            is_shortlisted: false,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn shortlisted(mut self, value: bool) -> Self {
        self.is_shortlisted = value;
        self
    }
}

/// A page of results plus the total number of matches across all pages.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResultPage<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> ResultPage<T> {
    pub fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }

    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

impl<T> Default for ResultPage<T> {
    fn default() -> Self {
        Self::empty()
    }
}
