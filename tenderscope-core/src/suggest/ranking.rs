//! Tiered ranking of suggestion candidates.
//!
//! Every row lands in the first tier it satisfies:
//!
//! 1. row starts with the whole query
//! 2. row starts with one of the query's tokens
//! 3. row contains the whole query
//! 4. row contains one of the query's tokens
//! 5. fuzzy: per-token score (`+2` contains, `+1.5` starts with, `+1` shares the
//!    first three characters of a token of four or more), kept when positive
//!
//! Tiers 1-4 keep corpus order, so earlier corpus entries win ties. Tier 5 is
//! ordered by score, highest first, falling back to corpus order. The
//! concatenation is deduplicated on the display string and capped.

use std::cmp::Ordering;
use std::collections::HashSet;

use super::index::{SuggestionIndex, SuggestionIndexRow, normalize_query};

/// Upper bound on dropdown entries.
pub const MAX_SUGGESTIONS: usize = 10;

const SCORE_CONTAINS: f32 = 2.0;
const SCORE_STARTS_WITH: f32 = 1.5;
const SCORE_STEM: f32 = 1.0;
const STEM_MIN_TOKEN_CHARS: usize = 4;
const STEM_CHARS: usize = 3;

/// Priority bucket a candidate was placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Prefix = 1,
    TokenPrefix = 2,
    Contains = 3,
    TokenContains = 4,
    Fuzzy = 5,
}

impl Tier {
    pub fn number(self) -> u8 {
        self as u8
    }
}

/// Ordered, duplicate-free suggestion list for one query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedSuggestions(Vec<String>);

impl RankedSuggestions {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    /// Keep at most `limit` entries.
    pub fn truncated(mut self, limit: usize) -> Self {
        self.0.truncate(limit);
        self
    }
}

impl From<Vec<String>> for RankedSuggestions {
    /// Wrap an externally produced list (remote suggestions), enforcing the
    /// same no-duplicates and cap guarantees as local ranking.
    fn from(values: Vec<String>) -> Self {
        let mut seen = HashSet::new();
        let mut out = Vec::with_capacity(values.len().min(MAX_SUGGESTIONS));
        for value in values {
            if out.len() == MAX_SUGGESTIONS {
                break;
            }
            if seen.insert(value.clone()) {
                out.push(value);
            }
        }
        Self(out)
    }
}

/// Rank `index` against `query`. Returns nothing when the normalised query is
/// shorter than `min_chars`.
pub fn rank(
    query: &str,
    index: &SuggestionIndex,
    min_chars: usize,
) -> RankedSuggestions {
    RankedSuggestions(
        rank_with_tiers(query, index, min_chars)
            .into_iter()
            .map(|(raw, _)| raw)
            .collect(),
    )
}

/// Same as [`rank`] but reports the tier each suggestion came from.
pub fn rank_with_tiers(
    query: &str,
    index: &SuggestionIndex,
    min_chars: usize,
) -> Vec<(String, Tier)> {
    let full = normalize_query(query);
    if full.chars().count() < min_chars {
        return Vec::new();
    }
    let tokens: Vec<&str> = full.split_whitespace().collect();

    let mut ordered: [Vec<&SuggestionIndexRow>; 4] = Default::default();
    let mut fuzzy: Vec<(&SuggestionIndexRow, f32)> = Vec::new();

    for row in index.rows() {
        match classify(&row.normalized, &full, &tokens) {
            Some((Tier::Fuzzy, score)) => fuzzy.push((row, score)),
            Some((tier, _)) => ordered[tier as usize - 1].push(row),
            None => {}
        }
    }

    // `sort_by` is stable: equal scores keep corpus order.
    fuzzy.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let tiers = [Tier::Prefix, Tier::TokenPrefix, Tier::Contains, Tier::TokenContains];
    let candidates = tiers
        .iter()
        .zip(ordered.iter())
        .flat_map(|(tier, rows)| rows.iter().map(move |row| (*row, *tier)))
        .chain(fuzzy.iter().map(|(row, _)| (*row, Tier::Fuzzy)));

    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = Vec::new();
    for (row, tier) in candidates {
        if out.len() == MAX_SUGGESTIONS {
            break;
        }
        if seen.insert(row.raw.as_str()) {
            out.push((row.raw.clone(), tier));
        }
    }
    out
}

/// Place one normalised row in its tier. Tier 5 carries the fuzzy score;
/// other tiers report `0.0`.
pub fn classify(
    normalized: &str,
    full_query: &str,
    tokens: &[&str],
) -> Option<(Tier, f32)> {
    if normalized.starts_with(full_query) {
        return Some((Tier::Prefix, 0.0));
    }
    if tokens.iter().any(|token| normalized.starts_with(*token)) {
        return Some((Tier::TokenPrefix, 0.0));
    }
    if normalized.contains(full_query) {
        return Some((Tier::Contains, 0.0));
    }
    if tokens.iter().any(|token| normalized.contains(*token)) {
        return Some((Tier::TokenContains, 0.0));
    }

    let score = fuzzy_score(normalized, tokens);
    (score > 0.0).then_some((Tier::Fuzzy, score))
}

fn fuzzy_score(normalized: &str, tokens: &[&str]) -> f32 {
    tokens
        .iter()
        .map(|token| {
            if normalized.contains(*token) {
                SCORE_CONTAINS
            } else if normalized.starts_with(*token) {
                SCORE_STARTS_WITH
            } else if token.chars().count() >= STEM_MIN_TOKEN_CHARS {
                let stem: String = token.chars().take(STEM_CHARS).collect();
                if normalized.contains(&stem) { SCORE_STEM } else { 0.0 }
            } else {
                0.0
            }
        })
        .sum()
}
