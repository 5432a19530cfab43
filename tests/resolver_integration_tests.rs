//! End-to-end resolution tests against a mocked search endpoint.

mod common;

use common::fixtures::{challenge_page_html, search_results_html, test_config};
use common::wiremock_helpers::{mock_error_server, mock_search_server, mock_timeout_server};
use profilefinder::{CandidateOrigin, Resolver, SearchClient};

#[tokio::test]
async fn test_resolve_ranks_exact_slug_match_first() {
    let html = search_results_html(&[
        "/company/levi-strauss",
        "/company/acme-foods",
        "/supplier/global-trading",
    ]);
    let server = mock_search_server("Acme Foods", &html).await;
    let config = test_config(&server.uri());
    let search = SearchClient::new(&config).expect("client");
    let resolver = Resolver::from_config(&config);

    let ranked = resolver.resolve("Acme Foods", &search).await;

    assert!(!ranked.is_empty());
    assert_eq!(
        ranked[0].url,
        format!("{}/company/acme-foods", server.uri())
    );
    // The exact match is also the direct guess, which was discovered first.
    assert_eq!(ranked[0].origin, CandidateOrigin::DirectGuess);
}

#[tokio::test]
async fn test_resolve_drops_unrelated_search_hits() {
    let html = search_results_html(&[
        "/company/levi-strauss",
        "/company/acme-foods",
        "/supplier/global-trading",
    ]);
    let server = mock_search_server("Acme Foods", &html).await;
    let config = test_config(&server.uri());
    let search = SearchClient::new(&config).expect("client");
    let resolver = Resolver::from_config(&config);

    let ranked = resolver.resolve("Acme Foods", &search).await;

    assert!(ranked.iter().all(|c| c.url.contains("acme")));
}

#[tokio::test]
async fn test_resolve_search_error_degrades_to_direct_guess() {
    let server = mock_error_server(500).await;
    let config = test_config(&server.uri());
    let search = SearchClient::new(&config).expect("client");
    let resolver = Resolver::from_config(&config);

    let ranked = resolver.resolve("Acme Foods", &search).await;

    assert_eq!(ranked.len(), 1);
    assert_eq!(
        ranked[0].url,
        format!("{}/company/acme-foods", server.uri())
    );
    assert_eq!(ranked[0].origin, CandidateOrigin::DirectGuess);
}

#[tokio::test]
async fn test_resolve_challenge_page_degrades_to_direct_guess() {
    let server = mock_search_server("Acme Foods", &challenge_page_html()).await;
    let config = test_config(&server.uri());
    let search = SearchClient::new(&config).expect("client");
    let resolver = Resolver::from_config(&config);

    let ranked = resolver.resolve("Acme Foods", &search).await;

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].origin, CandidateOrigin::DirectGuess);
}

#[tokio::test]
async fn test_resolve_timeout_degrades_to_direct_guess() {
    let server = mock_timeout_server(1500).await;
    let mut config = test_config(&server.uri());
    config.http.request_timeout_secs = 1;
    let search = SearchClient::new(&config).expect("client");
    let resolver = Resolver::from_config(&config);

    let ranked = resolver.resolve("Acme Foods", &search).await;

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].origin, CandidateOrigin::DirectGuess);
}

#[tokio::test]
async fn test_resolve_empty_results_page_returns_direct_guess_only() {
    let server = mock_search_server("Acme Foods", &search_results_html(&[])).await;
    let config = test_config(&server.uri());
    let search = SearchClient::new(&config).expect("client");
    let resolver = Resolver::from_config(&config);

    let ranked = resolver.resolve("Acme Foods", &search).await;

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].origin, CandidateOrigin::DirectGuess);
}

#[tokio::test]
async fn test_resolve_unsluggable_name_returns_empty_list() {
    // No plausible slug and no search hits: resolution is an empty list,
    // not an error.
    let server = mock_search_server("!!!", &search_results_html(&[])).await;
    let config = test_config(&server.uri());
    let search = SearchClient::new(&config).expect("client");
    let resolver = Resolver::from_config(&config);

    let ranked = resolver.resolve("!!!", &search).await;

    assert!(ranked.is_empty());
}

#[tokio::test]
async fn test_resolve_idempotent_for_same_search_response() {
    let html = search_results_html(&[
        "/company/acme-foods",
        "/company/acme-foods-trading",
        "/company/acme-global",
    ]);
    let server = mock_search_server("Acme Foods", &html).await;
    let config = test_config(&server.uri());
    let search = SearchClient::new(&config).expect("client");
    let resolver = Resolver::from_config(&config);

    let first = resolver.resolve("Acme Foods", &search).await;
    let second = resolver.resolve("Acme Foods", &search).await;

    let order_a: Vec<&str> = first.iter().map(|c| c.url.as_str()).collect();
    let order_b: Vec<&str> = second.iter().map(|c| c.url.as_str()).collect();
    assert_eq!(order_a, order_b);
}

#[tokio::test]
async fn test_resolve_truncates_to_max_candidates() {
    let hrefs: Vec<String> = (0..20).map(|i| format!("/company/acme-{}", i)).collect();
    let href_refs: Vec<&str> = hrefs.iter().map(String::as_str).collect();
    let server = mock_search_server("Acme", &search_results_html(&href_refs)).await;
    let config = test_config(&server.uri());
    let search = SearchClient::new(&config).expect("client");
    let resolver = Resolver::from_config(&config);

    let ranked = resolver.resolve("Acme", &search).await;

    // 12 search links survive the page cap, plus the direct guess, truncated
    // to the configured candidate cap.
    assert_eq!(ranked.len(), config.resolver.max_candidates);
}

#[tokio::test]
async fn test_resolve_short_brand_bypasses_overlap_filter() {
    let html = search_results_html(&["/company/lucky-goldstar"]);
    let server = mock_search_server("LG", &html).await;
    let config = test_config(&server.uri());
    let search = SearchClient::new(&config).expect("client");
    let resolver = Resolver::from_config(&config);

    let ranked = resolver.resolve("LG", &search).await;

    assert!(ranked
        .iter()
        .any(|c| c.url.ends_with("/company/lucky-goldstar")));
}
