use std::time::Duration;

use tracing::{debug, warn};

use crate::config::{FieldSpec, RemoteSuggestConfig, SuggestionSource};
use crate::error::ServiceResult;
use crate::suggest::{RankedSuggestions, SuggestionIndex, normalize_query, rank};
use crate::types::FilterKey;

/// Visible state of a field's dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropdownState {
    /// Closed.
    #[default]
    Idle,
    /// Showing suggestions, nothing highlighted.
    Open,
    /// Showing suggestions with the given row highlighted.
    Navigating(usize),
    /// A suggestion was just accepted; stays closed until the next keystroke.
    Locked,
}

/// Keys the dropdown reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Up,
    Down,
    Enter,
    Escape,
}

/// Progress of a remote suggestion lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuggestionStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    /// The lookup came back empty; remote fields say so instead of closing.
    NoMatches,
}

/// Side effects a controller asks its owner to perform.
///
/// The controller never touches timers or the network itself; the session
/// turns these into scheduled messages and collaborator calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEffect {
    /// (Re)start the apply timer. Elapsing with a stale generation is a no-op.
    ArmDebounce { generation: u64, delay: Duration },
    CancelDebounce,
    /// (Re)start the remote suggestion timer.
    ArmSuggest { generation: u64, delay: Duration },
    CancelSuggest,
    /// The applied value changed without waiting for the debounce window.
    Applied(String),
    /// Give keyboard focus back to the input.
    Refocus,
}

/// State of one filter input.
///
/// `raw` follows every keystroke; `applied` is what the canonical filter sees
/// and only moves after the debounce window, on suggestion acceptance, or on
/// clear.
#[derive(Debug, Clone)]
pub struct FieldController {
    spec: FieldSpec,
    remote: RemoteSuggestConfig,
    limit: usize,
    raw: String,
    applied: String,
    dropdown: DropdownState,
    suggestions: RankedSuggestions,
    status: SuggestionStatus,
    debounce_generation: u64,
    suggest_generation: u64,
}

impl FieldController {
    pub fn new(spec: FieldSpec, remote: RemoteSuggestConfig, limit: usize) -> Self {
        Self {
            spec,
            remote,
            limit,
            raw: String::new(),
            applied: String::new(),
            dropdown: DropdownState::Idle,
            suggestions: RankedSuggestions::empty(),
            status: SuggestionStatus::Idle,
            debounce_generation: 0,
            suggest_generation: 0,
        }
    }

    pub fn key(&self) -> FilterKey {
        self.spec.key
    }

    pub fn spec(&self) -> &FieldSpec {
        &self.spec
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn applied(&self) -> &str {
        &self.applied
    }

    pub fn dropdown(&self) -> DropdownState {
        self.dropdown
    }

    pub fn is_open(&self) -> bool {
        matches!(self.dropdown, DropdownState::Open | DropdownState::Navigating(_))
    }

    pub fn is_locked(&self) -> bool {
        self.dropdown == DropdownState::Locked
    }

    /// Highlighted row, if any.
    pub fn active_index(&self) -> Option<usize> {
        match self.dropdown {
            DropdownState::Navigating(index) => Some(index),
            _ => None,
        }
    }

    pub fn suggestions(&self) -> &RankedSuggestions {
        &self.suggestions
    }

    pub fn status(&self) -> SuggestionStatus {
        self.status
    }

    pub fn debounce_generation(&self) -> u64 {
        self.debounce_generation
    }

    /// A keystroke. Unlocks the dropdown, re-ranks local suggestions and
    /// restarts the apply timer.
    pub fn on_input(
        &mut self,
        value: impl Into<String>,
        index: Option<&SuggestionIndex>,
    ) -> Vec<FieldEffect> {
        self.raw = value.into();
        if self.is_locked() {
            self.dropdown = DropdownState::Idle;
        }

        self.debounce_generation += 1;
        let mut effects = vec![FieldEffect::ArmDebounce {
            generation: self.debounce_generation,
            delay: self.spec.debounce(),
        }];

        match self.spec.suggestions {
            SuggestionSource::None => {}
            SuggestionSource::Local => {
                self.rank_local(index);
                self.dropdown = if self.meets_min_chars() && !self.suggestions.is_empty() {
                    DropdownState::Open
                } else {
                    DropdownState::Idle
                };
            }
            SuggestionSource::Remote => {
                self.suggest_generation += 1;
                if self.query_chars() >= self.remote.min_chars {
                    self.status = SuggestionStatus::Loading;
                    self.dropdown = DropdownState::Open;
                    effects.push(FieldEffect::ArmSuggest {
                        generation: self.suggest_generation,
                        delay: self.remote.debounce(),
                    });
                } else {
                    self.suggestions = RankedSuggestions::empty();
                    self.status = SuggestionStatus::Idle;
                    self.dropdown = DropdownState::Idle;
                    effects.push(FieldEffect::CancelSuggest);
                }
            }
        }

        effects
    }

    /// The input gained focus: reopen the dropdown if there is something to show.
    pub fn on_focus(&mut self, index: Option<&SuggestionIndex>) {
        if self.is_locked() || self.is_open() {
            return;
        }
        match self.spec.suggestions {
            SuggestionSource::None => {}
            SuggestionSource::Local => {
                self.rank_local(index);
                if self.meets_min_chars() && !self.suggestions.is_empty() {
                    self.dropdown = DropdownState::Open;
                }
            }
            SuggestionSource::Remote => {
                if self.query_chars() >= self.remote.min_chars
                    && self.status != SuggestionStatus::Idle
                {
                    self.dropdown = DropdownState::Open;
                }
            }
        }
    }

    /// Escape or a click outside the field.
    pub fn dismiss(&mut self) {
        if self.is_open() {
            self.dropdown = DropdownState::Idle;
        }
    }

    pub fn navigate(&mut self, key: NavKey) -> Vec<FieldEffect> {
        match key {
            NavKey::Down => {
                self.select_next();
                Vec::new()
            }
            NavKey::Up => {
                self.select_previous();
                Vec::new()
            }
            NavKey::Enter => match self.active_index() {
                Some(index) => self.accept(index),
                None => Vec::new(),
            },
            NavKey::Escape => {
                self.dismiss();
                Vec::new()
            }
        }
    }

    /// Mouse selection of a dropdown row.
    pub fn select(&mut self, index: usize) -> Vec<FieldEffect> {
        if !self.is_open() || index >= self.suggestions.len() {
            debug!(field = %self.spec.key, index, "ignoring selection outside the dropdown");
            return Vec::new();
        }
        self.accept(index)
    }

    fn select_next(&mut self) {
        if self.suggestions.is_empty() {
            return;
        }
        let last = self.suggestions.len() - 1;
        self.dropdown = match self.dropdown {
            DropdownState::Open => DropdownState::Navigating(0),
            DropdownState::Navigating(i) => DropdownState::Navigating((i + 1).min(last)),
            other => other,
        };
    }

    fn select_previous(&mut self) {
        if self.suggestions.is_empty() {
            return;
        }
        self.dropdown = match self.dropdown {
            DropdownState::Open => DropdownState::Navigating(0),
            DropdownState::Navigating(i) => DropdownState::Navigating(i.saturating_sub(1)),
            other => other,
        };
    }

    /// Accept a suggestion: it becomes both raw and applied immediately and
    /// any pending apply timer is dropped.
    fn accept(&mut self, index: usize) -> Vec<FieldEffect> {
        let Some(value) = self.suggestions.get(index).map(str::to_owned) else {
            return Vec::new();
        };

        self.raw = value.clone();
        self.dropdown = DropdownState::Locked;
        self.debounce_generation += 1;

        let mut effects = vec![FieldEffect::CancelDebounce];
        if self.spec.suggestions == SuggestionSource::Remote {
            self.suggest_generation += 1;
            self.status = SuggestionStatus::Idle;
            effects.push(FieldEffect::CancelSuggest);
        }
        if self.applied != value {
            self.applied = value.clone();
            effects.push(FieldEffect::Applied(value));
        }
        effects
    }

    /// The apply timer elapsed. Returns the new applied value when it changed.
    pub fn commit_debounced(&mut self, generation: u64) -> Option<String> {
        if generation != self.debounce_generation {
            debug!(
                field = %self.spec.key,
                generation,
                current = self.debounce_generation,
                "stale debounce"
            );
            return None;
        }

        let candidate = self.raw.trim();
        if !candidate.is_empty() && candidate.chars().count() < self.spec.min_chars {
            return None;
        }
        if candidate == self.applied {
            return None;
        }

        self.applied = candidate.to_owned();
        Some(self.applied.clone())
    }

    /// The ✕ button: empties the field, closes the dropdown and refocuses.
    pub fn clear(&mut self) -> Vec<FieldEffect> {
        self.raw.clear();
        self.dropdown = DropdownState::Idle;
        self.suggestions = RankedSuggestions::empty();
        self.status = SuggestionStatus::Idle;
        self.debounce_generation += 1;
        self.suggest_generation += 1;

        let mut effects = vec![FieldEffect::CancelDebounce];
        if self.spec.suggestions == SuggestionSource::Remote {
            effects.push(FieldEffect::CancelSuggest);
        }
        if !self.applied.is_empty() {
            self.applied.clear();
            effects.push(FieldEffect::Applied(String::new()));
        }
        effects.push(FieldEffect::Refocus);
        effects
    }

    /// Load a value from the address bar. Both raw and applied take it and
    /// any in-flight timers become stale.
    pub fn hydrate(&mut self, value: &str) -> Vec<FieldEffect> {
        let value = value.trim();
        self.raw = value.to_owned();
        self.applied = value.to_owned();
        self.dropdown = DropdownState::Idle;
        self.suggestions = RankedSuggestions::empty();
        self.status = SuggestionStatus::Idle;
        self.debounce_generation += 1;
        self.suggest_generation += 1;

        let mut effects = vec![FieldEffect::CancelDebounce];
        if self.spec.suggestions == SuggestionSource::Remote {
            effects.push(FieldEffect::CancelSuggest);
        }
        effects
    }

    /// The remote suggestion timer elapsed. Returns the query to look up
    /// when the timer is still current.
    pub fn suggest_query(&self, generation: u64) -> Option<String> {
        if generation != self.suggest_generation {
            return None;
        }
        let query = self.raw.trim();
        (query.chars().count() >= self.remote.min_chars).then(|| query.to_owned())
    }

    /// Apply a remote lookup. Results for superseded input are dropped.
    /// Returns whether the response was current.
    pub fn set_remote_suggestions(
        &mut self,
        generation: u64,
        result: ServiceResult<Vec<String>>,
    ) -> bool {
        if generation != self.suggest_generation {
            debug!(field = %self.spec.key, generation, "dropping superseded suggestions");
            return false;
        }

        match result {
            Ok(values) => {
                self.suggestions = RankedSuggestions::from(values).truncated(self.limit);
                self.status = if self.suggestions.is_empty() {
                    SuggestionStatus::NoMatches
                } else {
                    SuggestionStatus::Ready
                };
                if let DropdownState::Navigating(i) = self.dropdown
                    && i >= self.suggestions.len()
                {
                    self.dropdown = DropdownState::Open;
                }
            }
            Err(err) => {
                warn!(field = %self.spec.key, error = %err, "suggestion lookup failed");
                self.suggestions = RankedSuggestions::empty();
                self.status = SuggestionStatus::Idle;
                self.dropdown = DropdownState::Idle;
            }
        }
        true
    }

    fn rank_local(&mut self, index: Option<&SuggestionIndex>) {
        self.suggestions = match index {
            Some(index) => rank(&self.raw, index, self.spec.min_chars).truncated(self.limit),
            None => RankedSuggestions::empty(),
        };
    }

    fn query_chars(&self) -> usize {
        normalize_query(&self.raw).chars().count()
    }

    fn meets_min_chars(&self) -> bool {
        self.query_chars() >= self.spec.min_chars
    }
}
