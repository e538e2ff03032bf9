use std::sync::Arc;

use tracing::debug;

/// One corpus entry: the display string and its case-folded comparison form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionIndexRow {
    pub raw: String,
    pub normalized: String,
}

impl SuggestionIndexRow {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let normalized = raw.to_lowercase();
        Self { raw, normalized }
    }
}

/// Normalise user input before ranking: surrounding whitespace is dropped and
/// the rest is case-folded the same way corpus rows are.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Comparable form of a field's suggestion corpus.
///
/// Remembers the corpus it was built from so [`refresh`] can skip
/// the rebuild when the host hands back the same corpus.
///
/// [`refresh`]: SuggestionIndex::refresh
#[derive(Debug, Clone, Default)]
pub struct SuggestionIndex {
    rows: Vec<SuggestionIndexRow>,
    source: Option<Arc<[String]>>,
}

impl SuggestionIndex {
    pub fn build(corpus: &[String]) -> Self {
        Self {
            rows: corpus.iter().map(SuggestionIndexRow::new).collect(),
            source: None,
        }
    }

    /// Rebuild from `corpus` unless it matches the corpus this index was
    /// built from. Returns whether a rebuild happened.
    pub fn refresh(&mut self, corpus: &Arc<[String]>) -> bool {
        if let Some(current) = &self.source
            && (Arc::ptr_eq(current, corpus) || **current == **corpus)
        {
            return false;
        }

        self.rows = corpus.iter().map(SuggestionIndexRow::new).collect();
        self.source = Some(Arc::clone(corpus));
        debug!(rows = self.rows.len(), "suggestion index rebuilt");
        true
    }

    pub fn rows(&self) -> &[SuggestionIndexRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromIterator<String> for SuggestionIndex {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().map(SuggestionIndexRow::new).collect(),
            source: None,
        }
    }
}
