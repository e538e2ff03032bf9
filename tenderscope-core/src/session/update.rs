//! Session update logic

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::effects::{Effect, TimerKey};
use super::messages::Message;
use super::state::BrowseSession;
use crate::config::SuggestionSource;
use crate::error::EngineError;
use crate::fetch::FetchOutcome;
use crate::filter::{CanonicalFilter, FilterChange, HistoryMode, UrlUpdate};
use crate::input::FieldEffect;
use crate::shortlist::Reconciliation;
use crate::types::{FilterKey, StatusTab};

/// Apply one message and return the work it causes.
pub fn update(session: &mut BrowseSession, message: Message) -> Vec<Effect> {
    debug!(message = message.as_str(), "session update");

    match message {
        Message::Mount { query } => {
            let (filter, canonical) = read_address_bar(session, &query);
            let mut effects = hydrate(session, filter);
            effects.extend(canonical.map(Effect::WriteUrl));
            if session.needs_corpus() && !session.corpus_requested {
                session.corpus_requested = true;
                effects.push(Effect::LoadCorpus);
            }
            effects.push(fetch(session));
            effects
        }

        Message::UrlChanged { query } => {
            // The browser already moved; nothing is written back.
            let mut filter = session.url.observe(&query, session.config.page_size);
            drop_hidden_fields(session, &mut filter);
            let mut effects = hydrate(session, filter);
            effects.push(fetch(session));
            effects
        }

        Message::Input { field, value } => {
            let Some(controller) = session.fields.get_mut(&field) else {
                return unknown_field(field);
            };
            let effects = controller.on_input(value, session.indexes.get(&field));
            field_effects(session, field, effects)
        }

        Message::Focus(field) => {
            let Some(controller) = session.fields.get_mut(&field) else {
                return unknown_field(field);
            };
            controller.on_focus(session.indexes.get(&field));
            Vec::new()
        }

        Message::Dismiss(field) => {
            let Some(controller) = session.fields.get_mut(&field) else {
                return unknown_field(field);
            };
            controller.dismiss();
            Vec::new()
        }

        Message::Navigate { field, key } => {
            let Some(controller) = session.fields.get_mut(&field) else {
                return unknown_field(field);
            };
            let effects = controller.navigate(key);
            field_effects(session, field, effects)
        }

        Message::SelectSuggestion { field, index } => {
            let Some(controller) = session.fields.get_mut(&field) else {
                return unknown_field(field);
            };
            let effects = controller.select(index);
            field_effects(session, field, effects)
        }

        Message::Clear(field) => {
            let Some(controller) = session.fields.get_mut(&field) else {
                return unknown_field(field);
            };
            let effects = controller.clear();
            field_effects(session, field, effects)
        }

        Message::SetTab(tab) => apply_change(session, FilterChange::Tab(tab)),
        Message::SetEmd(emd) => apply_change(session, FilterChange::Emd(emd)),
        Message::SetBidRa(bid_ra) => apply_change(session, FilterChange::BidRa(bid_ra)),
        Message::SetBidType(kind) => apply_change(session, FilterChange::BidType(kind)),
        Message::SetSource(source) => apply_change(session, FilterChange::Source(source)),
        Message::SetSortBy(sort_by) => apply_change(session, FilterChange::SortBy(sort_by)),

        Message::SetRecommendedOnly(false) => {
            session.auth.pending_enable = false;
            apply_change(session, FilterChange::RecommendedOnly(false))
        }

        Message::SetRecommendedOnly(true) => {
            // Every enable goes through a fresh session check.
            if session.auth.pending_enable {
                return Vec::new();
            }
            session.auth.pending_enable = true;
            vec![Effect::CheckAuth]
        }

        Message::AuthChecked(result) => {
            let identity = match result {
                Ok(identity) => identity,
                Err(err) => {
                    warn!(error = %err, "session check failed");
                    None
                }
            };
            let pending = std::mem::take(&mut session.auth.pending_enable);
            session.auth.identity = identity;

            match (pending, session.auth.identity.is_some()) {
                (false, _) => Vec::new(),
                (true, true) => {
                    session.auth.prompt_visible = false;
                    apply_change(session, FilterChange::RecommendedOnly(true))
                }
                (true, false) => show_auth_prompt(session),
            }
        }

        Message::AuthPromptExpired { generation } => {
            if generation == session.auth.prompt_generation {
                session.auth.prompt_visible = false;
            }
            Vec::new()
        }

        Message::GoToPage(page) => {
            if page == 0 {
                debug!("ignoring request for page 0");
                return Vec::new();
            }
            let page = if session.results.has_loaded() && session.results.error().is_none() {
                page.min(session.composer.filter().page_count(session.results.total()))
            } else {
                page
            };
            if session.composer.set_page(page) {
                reload(session, HistoryMode::Push)
            } else {
                Vec::new()
            }
        }

        Message::Refresh => vec![fetch(session)],

        Message::DebounceElapsed { field, generation } => {
            let Some(controller) = session.fields.get_mut(&field) else {
                return unknown_field(field);
            };
            match controller.commit_debounced(generation) {
                Some(value) => apply_change(session, FilterChange::Field(field, value)),
                None => Vec::new(),
            }
        }

        Message::SuggestDebounceElapsed { field, generation } => {
            let Some(controller) = session.fields.get(&field) else {
                return unknown_field(field);
            };
            controller
                .suggest_query(generation)
                .map(|query| Effect::FetchSuggestions {
                    field,
                    query,
                    generation,
                })
                .into_iter()
                .collect()
        }

        Message::RemoteSuggestionsLoaded {
            field,
            generation,
            result,
        } => {
            let Some(controller) = session.fields.get_mut(&field) else {
                return unknown_field(field);
            };
            controller.set_remote_suggestions(generation, result);
            Vec::new()
        }

        Message::CorpusLoaded(Ok(corpus)) => {
            let mut rebuilt = 0;
            for (key, values) in corpus {
                let local = session
                    .fields
                    .get(&key)
                    .is_some_and(|field| field.spec().suggestions == SuggestionSource::Local);
                if !local {
                    continue;
                }
                let values: Arc<[String]> = values.into();
                if session.indexes.entry(key).or_default().refresh(&values) {
                    rebuilt += 1;
                }
            }
            info!(fields = session.indexes.len(), rebuilt, "suggestion corpus loaded");
            Vec::new()
        }

        Message::CorpusLoaded(Err(err)) => {
            warn!(error = %err, "suggestion corpus unavailable; dropdowns stay empty");
            Vec::new()
        }

        Message::ResultsLoaded { token, result } => {
            match session.results.complete(token, result) {
                FetchOutcome::Applied { total } => match session.composer.clamp_page(total) {
                    Some(page) => {
                        info!(page, total, "page out of range, clamping");
                        reload(session, HistoryMode::Replace)
                    }
                    None => Vec::new(),
                },
                FetchOutcome::Failed | FetchOutcome::Stale => Vec::new(),
            }
        }

        Message::ToggleShortlist(id) => {
            match session.shortlist.begin(session.results.items_mut(), &id) {
                Some(_) => vec![Effect::PersistShortlist(id)],
                None => {
                    warn!(record = %id, "toggle for a record that is not on this page");
                    Vec::new()
                }
            }
        }

        Message::ShortlistPersisted { id, result } => {
            let outcome = session
                .shortlist
                .reconcile(session.results.items_mut(), &id, result);
            let shortlisted_view = session.composer.filter().tab == StatusTab::Shortlisted;
            if outcome == Reconciliation::Confirmed && shortlisted_view {
                vec![Effect::schedule(
                    TimerKey::ShortlistRefetch,
                    session.config.shortlist_refetch_delay(),
                    Message::ShortlistRefetchElapsed,
                )]
            } else {
                Vec::new()
            }
        }

        Message::ShortlistRefetchElapsed => vec![fetch(session)],
    }
}

fn unknown_field(field: FilterKey) -> Vec<Effect> {
    warn!(error = %EngineError::UnknownField(field), "message ignored");
    Vec::new()
}

/// Decode the address bar, dropping fields this surface does not show.
/// Returns the filter and the replace-write needed to canonicalise the URL.
fn read_address_bar(
    session: &mut BrowseSession,
    query: &str,
) -> (CanonicalFilter, Option<UrlUpdate>) {
    let hydrated = session.url.hydrate(query, session.config.page_size);
    let mut filter = hydrated.filter;

    if !drop_hidden_fields(session, &mut filter) {
        return (filter, hydrated.canonical);
    }
    let canonical = session.url.publish(&filter, HistoryMode::Replace);
    (filter, canonical)
}

/// Remove values for fields this surface does not show. Returns whether any
/// were dropped.
fn drop_hidden_fields(session: &BrowseSession, filter: &mut CanonicalFilter) -> bool {
    let before = filter.fields.len();
    filter.fields.retain(|key, _| session.fields.contains_key(key));
    let dropped = filter.fields.len() != before;
    if dropped {
        debug!(surface = ?session.surface, "dropping fields not shown on this surface");
    }
    dropped
}

/// Load `filter` into the composer and every field controller.
fn hydrate(session: &mut BrowseSession, filter: CanonicalFilter) -> Vec<Effect> {
    let mut effects = Vec::new();
    for (key, controller) in session.fields.iter_mut() {
        let value = filter.value(*key).unwrap_or_default();
        effects.extend(
            controller
                .hydrate(value)
                .into_iter()
                .filter_map(|effect| timer_effect(*key, effect)),
        );
    }
    session.composer.replace(filter);
    effects
}

fn field_effects(
    session: &mut BrowseSession,
    field: FilterKey,
    effects: Vec<FieldEffect>,
) -> Vec<Effect> {
    let mut out = Vec::new();
    for effect in effects {
        match effect {
            FieldEffect::Applied(value) => {
                out.extend(apply_change(session, FilterChange::Field(field, value)));
            }
            FieldEffect::Refocus => out.push(Effect::Focus(field)),
            other => out.extend(timer_effect(field, other)),
        }
    }
    out
}

fn timer_effect(field: FilterKey, effect: FieldEffect) -> Option<Effect> {
    match effect {
        FieldEffect::ArmDebounce { generation, delay } => Some(Effect::schedule(
            TimerKey::Debounce(field),
            delay,
            Message::DebounceElapsed { field, generation },
        )),
        FieldEffect::CancelDebounce => Some(Effect::Cancel(TimerKey::Debounce(field))),
        FieldEffect::ArmSuggest { generation, delay } => Some(Effect::schedule(
            TimerKey::Suggest(field),
            delay,
            Message::SuggestDebounceElapsed { field, generation },
        )),
        FieldEffect::CancelSuggest => Some(Effect::Cancel(TimerKey::Suggest(field))),
        FieldEffect::Applied(_) | FieldEffect::Refocus => None,
    }
}

fn apply_change(session: &mut BrowseSession, change: FilterChange) -> Vec<Effect> {
    if session.composer.apply(change) {
        reload(session, HistoryMode::Replace)
    } else {
        Vec::new()
    }
}

/// Mirror the filter into the address bar and fetch it.
fn reload(session: &mut BrowseSession, mode: HistoryMode) -> Vec<Effect> {
    let mut effects: Vec<Effect> = session
        .url
        .publish(session.composer.filter(), mode)
        .map(Effect::WriteUrl)
        .into_iter()
        .collect();
    effects.push(fetch(session));
    effects
}

fn fetch(session: &mut BrowseSession) -> Effect {
    let token = session.results.begin();
    let filter = session.composer.filter().clone();
    debug!(token = token.get(), page = filter.page, "dispatching fetch");
    Effect::Fetch { token, filter }
}

fn show_auth_prompt(session: &mut BrowseSession) -> Vec<Effect> {
    session.auth.prompt_visible = true;
    session.auth.prompt_generation += 1;
    info!("recommended view needs a signed-in session");
    vec![Effect::schedule(
        TimerKey::AuthPrompt,
        session.config.auth_prompt(),
        Message::AuthPromptExpired {
            generation: session.auth.prompt_generation,
        },
    )]
}
