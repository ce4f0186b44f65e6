mod common;

use common::{journals_json, serve, Reply, Seen};
use hjrs_client::{
    CatalogClient, FilterDimension, Layout, PageSize, PageSlot, Phase, ReferenceCache,
    ScreenError, SearchRequest, SearchScreen, View,
};
use std::time::Duration;

fn client(base_url: &str) -> CatalogClient {
    CatalogClient::new().unwrap().with_base_url(base_url)
}

/// Catalog of 237 journals answering with the `{results, total}` shape.
fn paged_catalog(seen: &Seen) -> Reply {
    match seen.path() {
        "/api/reference/countries" => {
            Reply::json(r#"[{"country_id": 1, "country_name": "Pakistan"}, {"country_id": 2, "country_name": "United States"}]"#)
        }
        "/api/reference/subject-areas" => {
            Reply::json(r#"[{"subject_area_id": 9, "subject_area_name": "Physics"}]"#)
        }
        "/api/reference/publishing-years" => Reply::status(500),
        "/api/reference/categories" => Reply::json(r#"[{"category_id": 1, "category_letter": "W"}]"#),
        "/api/reference/publishers" => Reply::json("not json"),
        "/api/journals/filtered-search" => {
            let request = SearchRequest::from_query_string(seen.query()).unwrap();
            let size = request.page_size.get();
            let first = (request.page - 1) * size + 1;
            let count = size.min(237u32.saturating_sub(first - 1));
            Reply::json(format!(
                r#"{{"results": {}, "total": 237}}"#,
                journals_json(first, count)
            ))
        }
        _ => Reply::status(404),
    }
}

#[tokio::test]
async fn test_reference_load_tolerates_partial_failure() {
    let stub = serve(paged_catalog).await;
    let screen = SearchScreen::open(client(&stub.base_url)).await;
    let reference = screen.reference();

    assert_eq!(reference.get_options(FilterDimension::Country).len(), 2);
    assert_eq!(reference.get_options(FilterDimension::Category).len(), 1);
    assert!(reference.get_options(FilterDimension::Year).is_empty());
    assert!(reference.get_options(FilterDimension::Publisher).is_empty());
    assert_eq!(
        reference.get_options(FilterDimension::SubjectSubcategory),
        reference.get_options(FilterDimension::SubjectArea)
    );
    // one request per table, subcategories reuse subject areas
    assert_eq!(stub.requests().len(), 5);
}

#[tokio::test]
async fn test_search_and_paginate() {
    let stub = serve(paged_catalog).await;
    let mut screen = SearchScreen::with_reference(client(&stub.base_url), ReferenceCache::default());

    screen.toggle(FilterDimension::Country, "1");
    screen.search();
    assert!(screen.state().is_loading());
    screen.settle().await;

    let state = screen.state();
    assert_eq!(state.phase, Phase::Success);
    assert_eq!(state.result.total_count, 237);
    assert_eq!(state.page_count(), 10);
    assert!(!state.filters_expanded);
    assert_eq!(
        state.page_links(Layout::Desktop),
        vec![
            PageSlot::Page(1),
            PageSlot::Page(2),
            PageSlot::Page(3),
            PageSlot::Page(4),
            PageSlot::Ellipsis,
            PageSlot::Page(10)
        ]
    );

    screen.go_to(10);
    screen.settle().await;
    let state = screen.state();
    assert_eq!(state.current_page, 10);
    assert_eq!(state.result.items.len(), 12);
    assert_eq!(state.result.items[0].id().as_deref(), Some("226"));

    screen.set_page_size(PageSize::Hundred);
    screen.settle().await;
    let state = screen.state();
    assert_eq!(state.current_page, 1);
    assert_eq!(state.page_count(), 3);
    assert_eq!(state.result.items.len(), 100);

    assert_eq!(stub.requests_to("/api/journals/filtered-search").len(), 3);
}

#[tokio::test]
async fn test_select_and_deselect() {
    let stub = serve(paged_catalog).await;
    let mut screen = SearchScreen::with_reference(client(&stub.base_url), ReferenceCache::default());
    screen.toggle(FilterDimension::Category, "1");
    screen.search();
    screen.settle().await;

    let pick = screen.state().result.items[2].clone();
    screen.select(pick.clone());
    assert_eq!(screen.state().view(), View::Detail(&pick));
    screen.deselect();
    assert!(matches!(screen.state().view(), View::List(_)));
}

#[tokio::test]
async fn test_newer_search_wins_over_slow_one() {
    let stub = serve(|seen| {
        let request = SearchRequest::from_query_string(seen.query()).unwrap();
        let reply = Reply::json(format!(
            r#"{{"results": {}, "total": 100}}"#,
            journals_json((request.page - 1) * 25 + 1, 25)
        ));
        if request.page == 1 {
            reply.delayed(Duration::from_millis(300))
        } else {
            reply
        }
    })
    .await;
    let mut screen = SearchScreen::with_reference(client(&stub.base_url), ReferenceCache::default());

    screen.toggle(FilterDimension::Country, "1");
    screen.search();
    screen.dispatch(hjrs_client::Event::Search {
        page: 2,
        reset_selection: false,
    });
    screen.settle().await;
    // give an unaborted page-1 reply time to arrive, then drain it
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(!screen.next_completion().await);

    let state = screen.state();
    assert_eq!(state.current_page, 2);
    assert_eq!(state.result.items[0].id().as_deref(), Some("26"));
    assert_eq!(state.latest_seq(), 2);
}

#[tokio::test]
async fn test_empty_result_uses_error_channel() {
    let stub = serve(|_| Reply::json("[]")).await;
    let mut screen = SearchScreen::with_reference(client(&stub.base_url), ReferenceCache::default());
    screen.toggle(FilterDimension::Publisher, "4");
    screen.search();
    screen.settle().await;

    let state = screen.state();
    assert_eq!(state.error, Some(ScreenError::NoResults));
    assert_eq!(state.result.total_count, 0);
    assert!(state.page_links(Layout::Desktop).is_empty());
}

#[tokio::test]
async fn test_server_error_keeps_results() {
    let stub = serve(|seen| {
        let request = SearchRequest::from_query_string(seen.query()).unwrap();
        if request.page == 1 {
            Reply::json(format!(r#"{{"results": {}, "total": 60}}"#, journals_json(1, 25)))
        } else {
            Reply::status(500)
        }
    })
    .await;
    let mut screen = SearchScreen::with_reference(client(&stub.base_url), ReferenceCache::default());
    screen.toggle(FilterDimension::Year, "3");
    screen.search();
    screen.settle().await;
    screen.go_to(2);
    screen.settle().await;

    let state = screen.state();
    assert_eq!(state.phase, Phase::Failure);
    assert_eq!(
        state.error_message().as_deref(),
        Some("Failed to fetch search results")
    );
    assert_eq!(state.result.items.len(), 25);
    assert_eq!(state.current_page, 1);
}

#[tokio::test]
async fn test_clear_discards_in_flight() {
    let stub = serve(|_| Reply::json(journals_json(1, 5)).delayed(Duration::from_millis(200))).await;
    let mut screen = SearchScreen::with_reference(client(&stub.base_url), ReferenceCache::default());
    screen.toggle(FilterDimension::Country, "2");
    screen.search();
    screen.clear();

    assert!(!screen.has_in_flight());
    tokio::time::sleep(Duration::from_millis(300)).await;
    let state = screen.state();
    assert_eq!(state.phase, Phase::Idle);
    assert!(state.result.items.is_empty());
    assert_eq!(state.active_filter_count(), 0);
}
