use std::time::Duration;

use super::*;
use crate::config::{FieldSpec, RemoteSuggestConfig, SuggestionSource};
use crate::error::ServiceError;
use crate::suggest::SuggestionIndex;
use crate::types::FilterKey;

fn ministry() -> FieldController {
    FieldController::new(
        FieldSpec::new(FilterKey::Ministry, 4, 500, SuggestionSource::Local),
        RemoteSuggestConfig::default(),
        10,
    )
}

fn seller() -> FieldController {
    FieldController::new(
        FieldSpec::new(FilterKey::Seller, 0, 500, SuggestionSource::Remote),
        RemoteSuggestConfig::default(),
        10,
    )
}

fn corpus() -> SuggestionIndex {
    [
        "Ministry of Defence",
        "Defence Research Organisation",
        "Ministry of Railways",
        "Home Affairs",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn armed_generation(effects: &[FieldEffect]) -> u64 {
    effects
        .iter()
        .find_map(|effect| match effect {
            FieldEffect::ArmDebounce { generation, .. } => Some(*generation),
            _ => None,
        })
        .expect("keystroke arms the debounce timer")
}

#[test]
fn keystroke_arms_debounce_with_field_delay() {
    let mut field = ministry();
    let effects = field.on_input("def", Some(&corpus()));
    assert_eq!(
        effects,
        vec![FieldEffect::ArmDebounce {
            generation: 1,
            delay: Duration::from_millis(500)
        }]
    );
    assert_eq!(field.raw(), "def");
    assert_eq!(field.applied(), "");
}

#[test]
fn dropdown_opens_only_at_min_chars_with_matches() {
    let index = corpus();
    let mut field = ministry();

    field.on_input("def", Some(&index));
    assert_eq!(field.dropdown(), DropdownState::Idle);
    assert!(field.suggestions().is_empty());

    field.on_input("defe", Some(&index));
    assert_eq!(field.dropdown(), DropdownState::Open);
    assert_eq!(
        field.suggestions().as_slice(),
        ["Defence Research Organisation", "Ministry of Defence"]
    );

    field.on_input("zzzz", Some(&index));
    assert_eq!(field.dropdown(), DropdownState::Idle);
}

#[test]
fn only_the_latest_debounce_commits() {
    let mut field = ministry();
    let first = armed_generation(&field.on_input("rail", None));
    let second = armed_generation(&field.on_input("railw", None));

    assert_eq!(field.commit_debounced(first), None);
    assert_eq!(field.commit_debounced(second).as_deref(), Some("railw"));
    assert_eq!(field.applied(), "railw");
}

#[test]
fn short_values_are_never_applied() {
    let mut field = ministry();
    let generation = armed_generation(&field.on_input("rai", None));
    assert_eq!(field.commit_debounced(generation), None);
    assert_eq!(field.applied(), "");
}

#[test]
fn emptying_the_input_applies_empty() {
    let mut field = ministry();
    let generation = armed_generation(&field.on_input("rail", None));
    field.commit_debounced(generation);

    let generation = armed_generation(&field.on_input("", None));
    assert_eq!(field.commit_debounced(generation).as_deref(), Some(""));
}

#[test]
fn unchanged_value_does_not_recommit() {
    let mut field = ministry();
    let generation = armed_generation(&field.on_input("rail", None));
    field.commit_debounced(generation);

    let generation = armed_generation(&field.on_input(" rail ", None));
    assert_eq!(field.commit_debounced(generation), None);
}

#[test]
fn arrow_keys_clamp_to_the_list() {
    let index = corpus();
    let mut field = ministry();
    field.on_input("defe", Some(&index));

    field.navigate(NavKey::Up);
    assert_eq!(field.active_index(), Some(0));

    field.navigate(NavKey::Down);
    field.navigate(NavKey::Down);
    field.navigate(NavKey::Down);
    assert_eq!(field.active_index(), Some(1));

    field.navigate(NavKey::Up);
    field.navigate(NavKey::Up);
    assert_eq!(field.active_index(), Some(0));
}

#[test]
fn enter_accepts_and_locks_without_waiting() {
    let index = corpus();
    let mut field = ministry();
    field.on_input("defe", Some(&index));

    assert!(field.navigate(NavKey::Enter).is_empty());

    field.navigate(NavKey::Down);
    field.navigate(NavKey::Down);
    let effects = field.navigate(NavKey::Enter);

    assert_eq!(
        effects,
        vec![
            FieldEffect::CancelDebounce,
            FieldEffect::Applied("Ministry of Defence".into())
        ]
    );
    assert_eq!(field.raw(), "Ministry of Defence");
    assert_eq!(field.applied(), "Ministry of Defence");
    assert!(field.is_locked());

    field.on_focus(Some(&index));
    assert!(field.is_locked());
}

#[test]
fn typing_after_acceptance_unlocks() {
    let index = corpus();
    let mut field = ministry();
    field.on_input("defe", Some(&index));
    field.select(0);
    assert!(field.is_locked());

    field.on_input("Defence Research Org", Some(&index));
    assert_eq!(field.dropdown(), DropdownState::Open);
}

#[test]
fn pending_debounce_is_stale_after_acceptance() {
    let index = corpus();
    let mut field = ministry();
    let generation = armed_generation(&field.on_input("defe", Some(&index)));
    field.select(1);

    assert_eq!(field.commit_debounced(generation), None);
    assert_eq!(field.applied(), "Ministry of Defence");
}

#[test]
fn escape_closes_without_applying() {
    let index = corpus();
    let mut field = ministry();
    field.on_input("defe", Some(&index));
    field.navigate(NavKey::Down);

    field.navigate(NavKey::Escape);
    assert_eq!(field.dropdown(), DropdownState::Idle);
    assert_eq!(field.applied(), "");
}

#[test]
fn selection_outside_the_list_is_ignored() {
    let index = corpus();
    let mut field = ministry();
    field.on_input("defe", Some(&index));
    assert!(field.select(7).is_empty());
    assert!(field.is_open());
}

#[test]
fn clear_resets_and_refocuses() {
    let index = corpus();
    let mut field = ministry();
    field.on_input("defe", Some(&index));
    field.select(0);

    let effects = field.clear();
    assert_eq!(
        effects,
        vec![
            FieldEffect::CancelDebounce,
            FieldEffect::Applied(String::new()),
            FieldEffect::Refocus
        ]
    );
    assert_eq!(field.raw(), "");
    assert_eq!(field.applied(), "");
    assert_eq!(field.dropdown(), DropdownState::Idle);
}

#[test]
fn clearing_an_empty_field_only_refocuses() {
    let mut field = ministry();
    assert_eq!(
        field.clear(),
        vec![FieldEffect::CancelDebounce, FieldEffect::Refocus]
    );
}

#[test]
fn hydrate_sets_both_values() {
    let mut field = ministry();
    let generation = armed_generation(&field.on_input("rail", None));
    field.hydrate(" Defence ");

    assert_eq!(field.raw(), "Defence");
    assert_eq!(field.applied(), "Defence");
    assert_eq!(field.commit_debounced(generation), None);
}

#[test]
fn remote_lookup_starts_at_two_characters() {
    let mut field = seller();

    let effects = field.on_input("a", None);
    assert!(effects.contains(&FieldEffect::CancelSuggest));
    assert_eq!(field.status(), SuggestionStatus::Idle);

    let effects = field.on_input("ac", None);
    assert!(effects.contains(&FieldEffect::ArmSuggest {
        generation: 2,
        delay: Duration::from_millis(250)
    }));
    assert_eq!(field.status(), SuggestionStatus::Loading);
    assert_eq!(field.suggest_query(2).as_deref(), Some("ac"));
    assert_eq!(field.suggest_query(1), None);
}

#[test]
fn remote_empty_result_reports_no_matches() {
    let mut field = seller();
    field.on_input("acme", None);

    assert!(field.set_remote_suggestions(1, Ok(Vec::new())));
    assert_eq!(field.status(), SuggestionStatus::NoMatches);
    assert!(field.is_open());
}

#[test]
fn superseded_remote_results_are_dropped() {
    let mut field = seller();
    field.on_input("ac", None);
    field.on_input("acm", None);

    assert!(!field.set_remote_suggestions(1, Ok(vec!["Acrylic Works".into()])));
    assert!(field.suggestions().is_empty());

    assert!(field.set_remote_suggestions(2, Ok(vec!["Acme Traders".into()])));
    assert_eq!(field.suggestions().as_slice(), ["Acme Traders"]);
    assert_eq!(field.status(), SuggestionStatus::Ready);
}

#[test]
fn remote_failure_leaves_list_empty() {
    let mut field = seller();
    field.on_input("acme", None);

    field.set_remote_suggestions(1, Err(ServiceError::Transport("offline".into())));
    assert!(field.suggestions().is_empty());
    assert!(!field.is_open());
}

#[test]
fn seller_applies_with_no_minimum() {
    let mut field = seller();
    let generation = armed_generation(&field.on_input("a", None));
    assert_eq!(field.commit_debounced(generation).as_deref(), Some("a"));
}
