use std::sync::Arc;

use proptest::prelude::*;

use super::ranking::{MAX_SUGGESTIONS, classify};
use super::*;

fn index(values: &[&str]) -> SuggestionIndex {
    values.iter().map(|value| value.to_string()).collect()
}

#[test]
fn prefix_beats_contains() {
    let idx = index(&[
        "Ministry of Defence",
        "Defence Research Organisation",
        "Home Affairs",
    ]);

    let ranked = rank_with_tiers("defe", &idx, 4);

    assert_eq!(
        ranked,
        vec![
            ("Defence Research Organisation".to_string(), Tier::Prefix),
            ("Ministry of Defence".to_string(), Tier::Contains),
        ]
    );
}

#[test]
fn short_queries_are_rejected() {
    let idx = index(&["Ministry of Railways"]);
    assert!(rank("rai", &idx, 4).is_empty());
    assert!(rank("  rai  ", &idx, 4).is_empty());
    assert_eq!(rank("rail", &idx, 4).as_slice(), ["Ministry of Railways"]);
}

#[test]
fn matching_is_case_insensitive_but_returns_raw() {
    let idx = index(&["CENTRAL PUBLIC WORKS DEPARTMENT"]);
    assert_eq!(
        rank("Central", &idx, 4).as_slice(),
        ["CENTRAL PUBLIC WORKS DEPARTMENT"]
    );
}

#[test]
fn token_tiers_follow_full_query_tiers() {
    let idx = index(&[
        "Water Resources",
        "Drinking Water Supply",
        "Ministry of Water Power",
        "Water Power Corporation",
        "Hydro Power",
    ]);

    let ranked = rank_with_tiers("water power", &idx, 4);

    assert_eq!(ranked[0], ("Water Power Corporation".to_string(), Tier::Prefix));
    assert_eq!(ranked[1], ("Water Resources".to_string(), Tier::TokenPrefix));
    assert_eq!(ranked[2], ("Ministry of Water Power".to_string(), Tier::Contains));
    assert_eq!(ranked[3], ("Drinking Water Supply".to_string(), Tier::TokenContains));
    assert_eq!(ranked[4], ("Hydro Power".to_string(), Tier::TokenContains));
    assert_eq!(ranked.len(), 5);
}

#[test]
fn fuzzy_tier_uses_three_char_stems_and_sorts_by_score() {
    let idx = index(&[
        "Pumping Station",    // "pum" stem of "pumps" only -> 1.0
        "Valves and Pumping", // "val" + "pum" -> 2.0
        "Electrical Works",   // no match
    ]);

    let ranked = rank_with_tiers("pumps valve", &idx, 3);

    // "valves and pumping" starts with the token "valve".
    assert_eq!(ranked[0], ("Valves and Pumping".to_string(), Tier::TokenPrefix));
    assert_eq!(ranked[1], ("Pumping Station".to_string(), Tier::Fuzzy));
    assert_eq!(ranked.len(), 2);
}

#[test]
fn fuzzy_scores_accumulate_over_tokens() {
    let tokens = ["cement", "bags"];
    assert_eq!(classify("ordinary cemetery", "cement bags", &tokens), Some((Tier::Fuzzy, 1.0)));
    assert_eq!(classify("cabinet", "bags", &["bags"]), None);
}

#[test]
fn higher_fuzzy_score_wins_regardless_of_corpus_order() {
    let idx = index(&["Steel Doors", "Steam Generator Framework"]);
    let ranked = rank_with_tiers("stems framing", &idx, 3);
    assert_eq!(
        ranked.iter().map(|(raw, _)| raw.as_str()).collect::<Vec<_>>(),
        ["Steam Generator Framework", "Steel Doors"]
    );
    assert!(ranked.iter().all(|(_, tier)| *tier == Tier::Fuzzy));
}

#[test]
fn caps_at_ten_in_corpus_order() {
    let values: Vec<String> = (0..15).map(|i| format!("Defence Unit {i:02}")).collect();
    let idx = SuggestionIndex::build(&values);

    let ranked = rank("defence", &idx, 4);

    assert_eq!(ranked.len(), MAX_SUGGESTIONS);
    assert_eq!(ranked.as_slice(), &values[..10]);
}

#[test]
fn duplicates_keep_first_occurrence() {
    let idx = index(&["Ministry of Defence", "Defence", "Ministry of Defence"]);
    assert_eq!(
        rank("defence", &idx, 4).as_slice(),
        ["Defence", "Ministry of Defence"]
    );
}

#[test]
fn remote_lists_are_deduplicated_and_capped() {
    let values: Vec<String> = (0..12)
        .flat_map(|i| [format!("Seller {i}"), format!("Seller {i}")])
        .collect();
    let ranked = RankedSuggestions::from(values);
    assert_eq!(ranked.len(), MAX_SUGGESTIONS);
    assert_eq!(ranked.get(1), Some("Seller 1"));
}

#[test]
fn refresh_rebuilds_only_for_a_new_corpus() {
    let corpus: Arc<[String]> = vec!["Ministry of Coal".to_string()].into();
    let mut idx = SuggestionIndex::default();

    assert!(idx.refresh(&corpus));
    assert!(!idx.refresh(&corpus));
    assert_eq!(idx.len(), 1);

    let same_again: Arc<[String]> = vec!["Ministry of Coal".to_string()].into();
    assert!(!idx.refresh(&same_again));

    let reloaded: Arc<[String]> = vec![
        "Ministry of Coal".to_string(),
        "Ministry of Mines".to_string(),
    ]
    .into();
    assert!(idx.refresh(&reloaded));
    assert_eq!(idx.rows()[1].normalized, "ministry of mines");
}

#[test]
fn empty_corpus_yields_empty_index() {
    let idx = SuggestionIndex::build(&[]);
    assert!(idx.is_empty());
    assert!(rank("anything", &idx, 0).is_empty());
}

proptest! {
    #[test]
    fn ranking_is_bounded_unique_and_pure(
        corpus in prop::collection::vec("[a-d ]{0,12}", 0..40),
        query in "[a-d ]{0,6}",
    ) {
        let idx = SuggestionIndex::build(&corpus);
        let first = rank(&query, &idx, 0);
        let second = rank(&query, &idx, 0);

        prop_assert_eq!(&first, &second);
        prop_assert!(first.len() <= MAX_SUGGESTIONS);

        let unique: std::collections::HashSet<_> = first.as_slice().iter().collect();
        prop_assert_eq!(unique.len(), first.len());
        for raw in first.as_slice() {
            prop_assert!(corpus.contains(raw));
        }
    }
}
