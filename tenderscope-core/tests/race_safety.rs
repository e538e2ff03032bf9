mod support;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use support::{ScriptedCatalog, harness, item_ids, page_of, transport_error};
use tenderscope_core::config::Surface;
use tenderscope_core::filter::{HistoryMode, UrlUpdate};
use tenderscope_core::session::Message;
use tenderscope_core::types::SortBy;

#[tokio::test(start_paused = true)]
async fn slow_older_response_never_overwrites_newer_one() {
    let catalog = ScriptedCatalog::default().with_results(|filter| match filter.sort_by {
        SortBy::Latest => (Duration::from_millis(300), Ok(page_of(&["A-1", "A-2"], 2))),
        _ => (Duration::from_millis(50), Ok(page_of(&["B-1"], 1))),
    });
    let mut h = harness(Surface::Tenders, catalog);

    h.runtime.dispatch(Message::Mount {
        query: String::new(),
    });
    h.runtime.dispatch(Message::SetSortBy(SortBy::ClosingSoon));

    h.runtime.run_for(Duration::from_millis(100)).await;
    assert_eq!(item_ids(&h.runtime), ["B-1"]);
    assert!(!h.runtime.session().results().is_loading());

    h.runtime.run_for(Duration::from_secs(1)).await;
    assert_eq!(item_ids(&h.runtime), ["B-1"]);
    assert_eq!(h.runtime.session().results().total(), 1);
}

#[tokio::test(start_paused = true)]
async fn loading_stays_on_until_the_latest_response() {
    let catalog = ScriptedCatalog::default().with_results(|filter| match filter.sort_by {
        SortBy::Latest => (Duration::from_millis(10), Ok(page_of(&["A-1"], 1))),
        _ => (Duration::from_millis(500), Ok(page_of(&["B-1"], 1))),
    });
    let mut h = harness(Surface::Tenders, catalog);

    h.runtime.dispatch(Message::Mount {
        query: String::new(),
    });
    h.runtime.dispatch(Message::SetSortBy(SortBy::Relevance));

    h.runtime.run_for(Duration::from_millis(100)).await;
    assert!(item_ids(&h.runtime).is_empty());
    assert!(h.runtime.session().results().is_loading());

    h.runtime.run_for(Duration::from_secs(1)).await;
    assert_eq!(item_ids(&h.runtime), ["B-1"]);
}

#[tokio::test(start_paused = true)]
async fn failure_is_shown_inline_and_refresh_recovers() {
    let calls = AtomicUsize::new(0);
    let catalog = ScriptedCatalog::default().with_results(move |_| {
        if calls.fetch_add(1, Ordering::SeqCst) == 0 {
            (Duration::ZERO, Err(transport_error()))
        } else {
            (Duration::ZERO, Ok(page_of(&["R-1"], 1)))
        }
    });
    let mut h = harness(Surface::Tenders, catalog);

    h.runtime.dispatch(Message::Mount {
        query: String::new(),
    });
    h.runtime.run_for(Duration::from_millis(10)).await;

    let results = h.runtime.session().results();
    assert!(results.items().is_empty());
    assert_eq!(results.total(), 0);
    assert_eq!(results.error(), Some("Transport error: connection reset"));
    assert_eq!(h.catalog.fetch_count(), 1, "no automatic retry");

    h.runtime.dispatch(Message::Refresh);
    h.runtime.run_for(Duration::from_millis(10)).await;
    assert_eq!(item_ids(&h.runtime), ["R-1"]);
    assert_eq!(h.runtime.session().results().error(), None);
}

#[tokio::test(start_paused = true)]
async fn deep_link_past_the_end_is_pulled_back() {
    let catalog = ScriptedCatalog::default().with_results(|filter| {
        let ids: &[&str] = if filter.page == 3 { &["P3-1"] } else { &[] };
        (Duration::ZERO, Ok(page_of(ids, 23)))
    });
    let mut h = harness(Surface::Tenders, catalog);

    h.runtime.dispatch(Message::Mount {
        query: "?page=5".into(),
    });
    h.runtime.run_for(Duration::from_millis(10)).await;

    assert_eq!(h.runtime.session().filter().page, 3);
    assert_eq!(h.catalog.fetch_count(), 2);
    assert_eq!(item_ids(&h.runtime), ["P3-1"]);
    assert_eq!(
        h.host.urls(),
        [UrlUpdate {
            query: "page=3".into(),
            mode: HistoryMode::Replace
        }]
    );
}

#[tokio::test(start_paused = true)]
async fn pagination_and_back_navigation() {
    let catalog =
        ScriptedCatalog::default().with_results(|_| (Duration::ZERO, Ok(page_of(&[], 100))));
    let mut h = harness(Surface::Tenders, catalog);

    h.runtime.dispatch(Message::Mount {
        query: "?item=pump".into(),
    });
    h.runtime.run_for(Duration::from_millis(1)).await;

    h.runtime.dispatch(Message::GoToPage(2));
    h.runtime.run_for(Duration::from_millis(1)).await;
    assert_eq!(
        h.host.urls(),
        [UrlUpdate {
            query: "item=pump&page=2".into(),
            mode: HistoryMode::Push
        }]
    );

    h.runtime.dispatch(Message::UrlChanged {
        query: "?item=pump".into(),
    });
    h.runtime.run_for(Duration::from_millis(1)).await;

    assert_eq!(h.runtime.session().filter().page, 1);
    assert_eq!(h.catalog.fetch_count(), 3);
    assert_eq!(h.host.urls().len(), 1, "back navigation writes nothing");
}
