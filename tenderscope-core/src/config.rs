use std::collections::HashSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::suggest::MAX_SUGGESTIONS;
use crate::types::FilterKey;

/// Where a field's dropdown candidates come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionSource {
    /// Free-text field, no dropdown.
    #[default]
    None,
    /// Ranked locally against the corpus loaded once per session.
    Local,
    /// Asked of the host on every (debounced) keystroke.
    Remote,
}

/// Per-field tuning: how long to wait before applying, and how many
/// characters are needed before a value counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub key: FilterKey,
    /// Minimum characters for a non-empty value to be applied or ranked.
    #[serde(default)]
    pub min_chars: usize,
    /// Quiet period (milliseconds) before raw input is applied.
    pub debounce_ms: u64,
    #[serde(default)]
    pub suggestions: SuggestionSource,
}

impl FieldSpec {
    pub const fn new(
        key: FilterKey,
        min_chars: usize,
        debounce_ms: u64,
        suggestions: SuggestionSource,
    ) -> Self {
        Self {
            key,
            min_chars,
            debounce_ms,
            suggestions,
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn has_suggestions(&self) -> bool {
        self.suggestions != SuggestionSource::None
    }
}

/// Remote suggestion lookups (seller names) use their own, shorter debounce
/// and start earlier than the apply threshold.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteSuggestConfig {
    pub min_chars: usize,
    pub debounce_ms: u64,
}

impl RemoteSuggestConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for RemoteSuggestConfig {
    fn default() -> Self {
        Self {
            min_chars: 2,
            debounce_ms: 250,
        }
    }
}

/// Listing variants that share the engine but expose different fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    Tenders,
    Results,
    Explorer,
}

/// Field table for one surface.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SurfaceConfig {
    pub fields: Vec<FieldSpec>,
}

impl SurfaceConfig {
    pub fn field(&self, key: FilterKey) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.key == key)
    }

    pub fn tenders() -> Self {
        use FilterKey::*;
        use SuggestionSource::*;
        Self {
            fields: vec![
                FieldSpec::new(Global, 0, 400, None),
                FieldSpec::new(Item, 3, 500, Local),
                FieldSpec::new(Ministry, 4, 500, Local),
                FieldSpec::new(Department, 4, 500, Local),
                FieldSpec::new(Location, 4, 500, Local),
            ],
        }
    }

    pub fn results() -> Self {
        use FilterKey::*;
        use SuggestionSource::*;
        Self {
            fields: vec![
                FieldSpec::new(Global, 0, 400, None),
                FieldSpec::new(Item, 3, 500, Local),
                FieldSpec::new(Ministry, 4, 500, Local),
                FieldSpec::new(Department, 4, 500, Local),
                FieldSpec::new(Seller, 0, 500, Remote),
            ],
        }
    }

    pub fn explorer() -> Self {
        use FilterKey::*;
        use SuggestionSource::*;
        Self {
            fields: vec![
                FieldSpec::new(Global, 0, 400, None),
                FieldSpec::new(Item, 3, 500, Local),
                FieldSpec::new(Location, 4, 500, Local),
            ],
        }
    }

    fn validate(&self, surface: Surface) -> Result<()> {
        let mut seen = HashSet::new();
        for spec in &self.fields {
            if !seen.insert(spec.key) {
                return Err(EngineError::Config(format!(
                    "field {} listed twice on surface {surface:?}",
                    spec.key
                )));
            }
        }
        Ok(())
    }
}

/// Engine knobs. Every field carries a default so a partial config file only
/// needs to name what it overrides.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Results per page; constant for the lifetime of a session.
    pub page_size: u32,
    /// Maximum dropdown entries, at most [`MAX_SUGGESTIONS`].
    pub suggestion_limit: usize,
    /// Delay before re-fetching a shortlisted-only view after a successful toggle.
    pub shortlist_refetch_delay_ms: u64,
    /// How long the "sign in to see recommendations" prompt stays up.
    pub auth_prompt_ms: u64,
    pub remote_suggest: RemoteSuggestConfig,
    pub tenders: SurfaceConfig,
    pub results: SurfaceConfig,
    pub explorer: SurfaceConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            suggestion_limit: 10,
            shortlist_refetch_delay_ms: 400,
            auth_prompt_ms: 6_000,
            remote_suggest: RemoteSuggestConfig::default(),
            tenders: SurfaceConfig::tenders(),
            results: SurfaceConfig::results(),
            explorer: SurfaceConfig::explorer(),
        }
    }
}

impl EngineConfig {
    pub fn surface(&self, surface: Surface) -> &SurfaceConfig {
        match surface {
            Surface::Tenders => &self.tenders,
            Surface::Results => &self.results,
            Surface::Explorer => &self.explorer,
        }
    }

    pub fn shortlist_refetch_delay(&self) -> Duration {
        Duration::from_millis(self.shortlist_refetch_delay_ms)
    }

    pub fn auth_prompt(&self) -> Duration {
        Duration::from_millis(self.auth_prompt_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(EngineError::Config("page_size must be at least 1".into()));
        }
        if !(1..=MAX_SUGGESTIONS).contains(&self.suggestion_limit) {
            return Err(EngineError::Config(format!(
                "suggestion_limit must be between 1 and {MAX_SUGGESTIONS}"
            )));
        }
        self.tenders.validate(Surface::Tenders)?;
        self.results.validate(Surface::Results)?;
        self.explorer.validate(Surface::Explorer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tables_match_field_minimums() {
        let config = EngineConfig::default();
        let tenders = config.surface(Surface::Tenders);

        let item = tenders.field(FilterKey::Item).unwrap();
        assert_eq!((item.min_chars, item.debounce_ms), (3, 500));

        for key in [FilterKey::Ministry, FilterKey::Department, FilterKey::Location] {
            let spec = tenders.field(key).unwrap();
            assert_eq!((spec.min_chars, spec.debounce_ms), (4, 500));
            assert_eq!(spec.suggestions, SuggestionSource::Local);
        }

        let global = tenders.field(FilterKey::Global).unwrap();
        assert_eq!((global.min_chars, global.debounce_ms), (0, 400));
        assert!(!global.has_suggestions());

        let seller = config.surface(Surface::Results).field(FilterKey::Seller).unwrap();
        assert_eq!(seller.suggestions, SuggestionSource::Remote);
        assert_eq!(config.remote_suggest.min_chars, 2);
        assert_eq!(config.remote_suggest.debounce_ms, 250);
    }

    #[test]
    fn validate_rejects_duplicate_fields_and_zero_page_size() {
        let mut config = EngineConfig::default();
        assert!(config.validate().is_ok());

        config
            .explorer
            .fields
            .push(FieldSpec::new(FilterKey::Item, 3, 500, SuggestionSource::Local));
        assert!(matches!(config.validate(), Err(EngineError::Config(_))));

        let config = EngineConfig {
            page_size: 0,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn suggestion_limit_cannot_exceed_the_ranking_cap() {
        let at_cap = EngineConfig {
            suggestion_limit: MAX_SUGGESTIONS,
            ..EngineConfig::default()
        };
        assert!(at_cap.validate().is_ok());

        let above = EngineConfig {
            suggestion_limit: MAX_SUGGESTIONS + 5,
            ..EngineConfig::default()
        };
        let err = above.validate().unwrap_err();
        assert!(err.to_string().contains("between 1 and 10"));

        let zero = EngineConfig {
            suggestion_limit: 0,
            ..EngineConfig::default()
        };
        assert!(zero.validate().is_err());
    }
}
