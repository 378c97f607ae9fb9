use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use hn_search::loader::Loader;
use hn_search::{
    apply_display_order, sort, toggle_sort, FetchError, HackerNewsItem, Page, PageFetcher,
    ResultCache, SearchSession, SortMode, SortState,
};
use rstest::rstest;

/// Serves canned pages per (term, page) and fails for anything else.
#[derive(Default)]
struct CannedFetcher {
    pages: HashMap<(String, u32), Vec<HackerNewsItem>>,
    requested: Mutex<Vec<(String, u32)>>,
}

impl CannedFetcher {
    fn with_page(mut self, term: &str, page: u32, hits: Vec<HackerNewsItem>) -> Self {
        self.pages.insert((term.to_string(), page), hits);
        self
    }
}

impl PageFetcher for CannedFetcher {
    fn fetch_page(&self, search_term: &str, page: u32) -> hn_search::error::Result<Page> {
        self.requested
            .lock()
            .unwrap()
            .push((search_term.to_string(), page));
        self.pages
            .get(&(search_term.to_string(), page))
            .cloned()
            .map(|hits| Page::new(page, hits))
            .ok_or(FetchError::Status { status: 404 })
    }
}

fn story(id: &str, title: &str, points: u32) -> HackerNewsItem {
    HackerNewsItem::new(id)
        .with_title(title)
        .with_author(format!("author-{id}"))
        .with_url(format!("https://example.com/{id}"))
        .with_comments(points / 2)
        .with_points(points)
}

fn ids(items: &[HackerNewsItem]) -> Vec<&str> {
    items.iter().map(|item| item.id.as_str()).collect()
}

fn run(session: &mut SearchSession, loader: &mut Loader, request: Option<hn_search::FetchRequest>) {
    let request = request.expect("a fetch was requested");
    loader.spawn(request);
    let outcome = loader
        .wait(Duration::from_secs(5))
        .expect("fetch finished in time");
    session.complete(&outcome.request, outcome.result);
}

#[test]
fn search_paginate_sort_and_dismiss() {
    let fetcher = Arc::new(
        CannedFetcher::default()
            .with_page("react", 0, vec![story("a", "Hooks", 50), story("b", "Fiber", 120)])
            .with_page("react", 1, vec![story("c", "Suspense", 50)]),
    );
    let mut loader = Loader::new(fetcher.clone());
    let mut session = SearchSession::new("react");

    let first = session.submit();
    run(&mut session, &mut loader, first);
    let more = session.request_more();
    run(&mut session, &mut loader, more);

    let entry = session.current_entry();
    assert_eq!(ids(&entry.items), vec!["a", "b", "c"]);
    assert_eq!(entry.last_page, 1);

    let by_points = toggle_sort(SortState::default(), SortMode::Points);
    assert_eq!(ids(&session.visible_items(by_points)), vec!["b", "c", "a"]);

    let by_title = toggle_sort(by_points, SortMode::Title);
    assert_eq!(ids(&session.visible_items(by_title)), vec!["b", "a", "c"]);

    session.dismiss("a");
    assert_eq!(ids(&session.visible_items(by_title)), vec!["b", "c"]);
    assert_eq!(session.current_page(), 1);

    assert_eq!(
        fetcher.requested.lock().unwrap().as_slice(),
        &[("react".to_string(), 0), ("react".to_string(), 1)]
    );
}

#[test]
fn failed_page_leaves_results_in_place() {
    let fetcher = Arc::new(CannedFetcher::default().with_page("rust", 0, vec![story("r", "Ownership", 9)]));
    let mut loader = Loader::new(fetcher);
    let mut session = SearchSession::new("rust");

    let first = session.submit();
    run(&mut session, &mut loader, first);
    let before = session.cache().clone();

    // page 1 is not canned, so the fetcher fails
    let more = session.request_more();
    run(&mut session, &mut loader, more);

    assert_eq!(session.cache(), &before);
    assert!(session.error().is_some());
    assert!(!session.is_loading());
}

#[test]
fn switching_back_to_a_cached_search_skips_the_network() {
    let fetcher = Arc::new(
        CannedFetcher::default()
            .with_page("react", 0, vec![story("a", "Hooks", 1)])
            .with_page("vue", 0, vec![story("v", "Refs", 2)]),
    );
    let mut loader = Loader::new(fetcher.clone());
    let mut session = SearchSession::new("react");

    let first = session.submit();
    run(&mut session, &mut loader, first);
    session.search_term = "vue".into();
    let second = session.submit();
    run(&mut session, &mut loader, second);

    session.search_term = "react".into();
    assert!(session.submit().is_none());
    assert_eq!(ids(&session.current_entry().items), vec!["a"]);
    assert_eq!(fetcher.requested.lock().unwrap().len(), 2);
}

#[test]
fn merge_scenario_accumulates_react_pages() {
    let a = HackerNewsItem::new("A");
    let b = HackerNewsItem::new("B");
    let c = HackerNewsItem::new("C");

    let cache = ResultCache::new()
        .merge("react", Page::new(0, vec![a.clone(), b.clone()]))
        .merge("react", Page::new(1, vec![c.clone()]));

    assert_eq!(cache.get("react").items, vec![a, b, c]);
    assert_eq!(cache.get("react").last_page, 1);
}

#[rstest]
#[case(SortMode::Comments)]
#[case(SortMode::Points)]
fn reversed_count_modes_flip_twice(#[case] mode: SortMode) {
    let items = vec![story("1", "x", 10), story("2", "y", 20), story("3", "z", 10)];
    let forward = sort(&items, mode);
    assert_eq!(ids(&forward), vec!["2", "3", "1"]);

    let reversed = apply_display_order(&items, SortState::new(mode, true));
    assert_eq!(ids(&reversed), vec!["1", "3", "2"]);
}
