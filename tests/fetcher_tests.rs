//! Integration tests for the pagination loop.
//!
//! These tests run the fetcher against a local mock storefront and verify
//! page counting, pacing, rate-limit retries and the partial-result policy.

use std::time::{Duration, Instant};

use shopify_scraper::{FetchError, Fetcher, ScraperConfig, StopReason, StoreUrl, PAGE_LIMIT};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds a `/products.json` body holding products with ids `start..start + count`.
fn products_body(start: u64, count: usize) -> serde_json::Value {
    let products: Vec<_> = (start..start + count as u64)
        .map(|id| {
            serde_json::json!({
                "id": id,
                "title": format!("Product {id}"),
                "handle": format!("product-{id}"),
                "variants": [{ "id": id * 10, "price": "9.99" }],
                "images": []
            })
        })
        .collect();
    serde_json::json!({ "products": products })
}

/// Mounts a 200 response for `page` holding `count` products.
async fn mount_page(server: &MockServer, page: u32, start: u64, count: usize) {
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .and(query_param("limit", "250"))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_body(start, count)))
        .expect(1)
        .mount(server)
        .await;
}

fn test_config(page_delay: Duration, rate_limit_wait: Duration) -> ScraperConfig {
    ScraperConfig::builder()
        .page_delay(page_delay)
        .rate_limit_wait(rate_limit_wait)
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

fn create_fetcher(server: &MockServer, config: &ScraperConfig) -> Fetcher {
    Fetcher::new(StoreUrl::new(server.uri()).unwrap(), config).unwrap()
}

// ============================================================================
// Pagination
// ============================================================================

#[tokio::test]
async fn test_full_pages_then_partial_page_returns_all_in_order() {
    let server = MockServer::start().await;
    mount_page(&server, 1, 0, PAGE_LIMIT).await;
    mount_page(&server, 2, 250, PAGE_LIMIT).await;
    mount_page(&server, 3, 500, 7).await;

    let config = test_config(Duration::ZERO, Duration::ZERO);
    let outcome = create_fetcher(&server, &config).fetch_all().await;

    assert_eq!(outcome.products.len(), 2 * PAGE_LIMIT + 7);
    let ids: Vec<u64> = outcome.products.iter().filter_map(|p| p.id).collect();
    let expected: Vec<u64> = (0..507).collect();
    assert_eq!(ids, expected);
    assert!(matches!(outcome.stop, StopReason::PartialPage));
    assert_eq!(outcome.stats.requests, 3);
    assert_eq!(outcome.stats.pages, 3);
}

#[tokio::test]
async fn test_empty_first_page_returns_nothing() {
    let server = MockServer::start().await;
    mount_page(&server, 1, 0, 0).await;

    let config = test_config(Duration::ZERO, Duration::ZERO);
    let outcome = create_fetcher(&server, &config).fetch_all().await;

    assert!(outcome.products.is_empty());
    assert!(matches!(outcome.stop, StopReason::EmptyPage));
    assert!(outcome.is_complete());
    assert_eq!(outcome.stats.requests, 1);
    assert_eq!(outcome.stats.pages, 0);
}

#[tokio::test]
async fn test_exact_multiple_of_page_size_ends_on_empty_page() {
    let server = MockServer::start().await;
    mount_page(&server, 1, 0, PAGE_LIMIT).await;
    mount_page(&server, 2, 250, 0).await;

    let config = test_config(Duration::ZERO, Duration::ZERO);
    let outcome = create_fetcher(&server, &config).fetch_all().await;

    assert_eq!(outcome.products.len(), PAGE_LIMIT);
    assert!(matches!(outcome.stop, StopReason::EmptyPage));
    assert_eq!(outcome.stats.requests, 2);
}

#[tokio::test]
async fn test_two_pages_make_two_requests_and_one_delay() {
    let server = MockServer::start().await;
    mount_page(&server, 1, 0, PAGE_LIMIT).await;
    mount_page(&server, 2, 250, 10).await;

    let delay = Duration::from_millis(150);
    let config = test_config(delay, Duration::ZERO);

    let started = Instant::now();
    let outcome = create_fetcher(&server, &config).fetch_all().await;

    assert!(started.elapsed() >= delay);
    assert_eq!(outcome.products.len(), 260);
    assert_eq!(outcome.stats.requests, 2);
    assert_eq!(outcome.stats.page_delays, 1);
    assert_eq!(outcome.stats.rate_limit_waits, 0);
}

#[tokio::test]
async fn test_requests_carry_browser_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("accept", "application/json"))
        .and(header(
            "user-agent",
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_body(0, 1)))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(Duration::ZERO, Duration::ZERO);
    let outcome = create_fetcher(&server, &config).fetch_all().await;

    assert_eq!(outcome.products.len(), 1);
}

#[tokio::test]
async fn test_store_url_with_trailing_slash() {
    let server = MockServer::start().await;
    mount_page(&server, 1, 0, 2).await;

    let store = StoreUrl::new(format!("{}/", server.uri())).unwrap();
    let config = test_config(Duration::ZERO, Duration::ZERO);
    let outcome = Fetcher::new(store, &config).unwrap().fetch_all().await;

    assert_eq!(outcome.products.len(), 2);
}

#[tokio::test]
async fn test_mistyped_fields_do_not_stop_pagination() {
    let server = MockServer::start().await;

    let mut first = products_body(0, PAGE_LIMIT);
    first["products"][3]["variants"][0]["inventory_quantity"] = serde_json::json!(1.0);
    first["products"][7]["options"] = serde_json::json!([{ "name": "Size", "position": "1" }]);
    first["products"][9]["id"] = serde_json::json!("not-a-number");

    Mock::given(method("GET"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(first))
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, 2, 250, 5).await;

    let config = test_config(Duration::ZERO, Duration::ZERO);
    let outcome = create_fetcher(&server, &config).fetch_all().await;

    assert!(outcome.is_complete());
    assert_eq!(outcome.products.len(), PAGE_LIMIT + 5);
    assert!(outcome.products[3].variants[0].inventory_quantity.is_none());
    assert_eq!(outcome.products[7].options[0]["position"], "1");
    assert!(outcome.products[9].id.is_none());
    assert_eq!(outcome.stats.requests, 2);
}

// ============================================================================
// Rate limiting
// ============================================================================

#[tokio::test]
async fn test_rate_limited_once_then_retries_same_page() {
    let server = MockServer::start().await;

    // Mounted first, so it answers the first request only
    Mock::given(method("GET"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, 1, 0, 4).await;

    let wait = Duration::from_millis(150);
    let config = test_config(Duration::ZERO, wait);

    let started = Instant::now();
    let outcome = create_fetcher(&server, &config).fetch_all().await;

    assert!(started.elapsed() >= wait);
    assert_eq!(outcome.products.len(), 4);
    assert!(outcome.is_complete());
    assert_eq!(outcome.stats.requests, 2);
    assert_eq!(outcome.stats.rate_limit_waits, 1);
}

#[tokio::test]
async fn test_rate_limit_on_later_page_keeps_earlier_pages() {
    let server = MockServer::start().await;
    mount_page(&server, 1, 0, PAGE_LIMIT).await;

    Mock::given(method("GET"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    mount_page(&server, 2, 250, 1).await;

    let config = test_config(Duration::ZERO, Duration::from_millis(10));
    let outcome = create_fetcher(&server, &config).fetch_all().await;

    assert_eq!(outcome.products.len(), 251);
    assert_eq!(outcome.stats.requests, 4);
    assert_eq!(outcome.stats.rate_limit_waits, 2);
}

#[tokio::test]
async fn test_retry_cap_resets_after_successful_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_page(&server, 1, 0, PAGE_LIMIT).await;
    Mock::given(method("GET"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_page(&server, 2, 250, 3).await;

    let config = ScraperConfig::builder()
        .page_delay(Duration::ZERO)
        .rate_limit_wait(Duration::from_millis(10))
        .max_rate_limit_retries(1)
        .build()
        .unwrap();
    let outcome = create_fetcher(&server, &config).fetch_all().await;

    assert_eq!(outcome.products.len(), 253);
    assert!(outcome.is_complete());
    assert_eq!(outcome.stats.rate_limit_waits, 2);
}

// ============================================================================
// Terminal errors
// ============================================================================

#[tokio::test]
async fn test_not_found_on_first_page_returns_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(Duration::ZERO, Duration::ZERO);
    let outcome = create_fetcher(&server, &config).fetch_all().await;

    assert!(outcome.products.is_empty());
    assert!(matches!(outcome.error(), Some(FetchError::NotFound { .. })));
    assert_eq!(outcome.stats.requests, 1);
}

#[tokio::test]
async fn test_server_error_keeps_partial_results() {
    let server = MockServer::start().await;
    mount_page(&server, 1, 0, PAGE_LIMIT).await;

    Mock::given(method("GET"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(Duration::ZERO, Duration::ZERO);
    let outcome = create_fetcher(&server, &config).fetch_all().await;

    assert_eq!(outcome.products.len(), PAGE_LIMIT);
    match outcome.error() {
        Some(FetchError::HttpStatus { code, reason }) => {
            assert_eq!(*code, 500);
            assert_eq!(reason, "Internal Server Error");
        }
        other => panic!("Expected HttpStatus error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_keeps_partial_results() {
    let server = MockServer::start().await;
    mount_page(&server, 1, 0, PAGE_LIMIT).await;

    Mock::given(method("GET"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>Enter store password</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(Duration::ZERO, Duration::ZERO);
    let outcome = create_fetcher(&server, &config).fetch_all().await;

    assert_eq!(outcome.products.len(), PAGE_LIMIT);
    assert!(matches!(
        outcome.error(),
        Some(FetchError::MalformedResponse(_))
    ));
}

#[tokio::test]
async fn test_unreachable_store_is_network_error() {
    // Bind then drop a listener to get a port nothing is listening on
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let store = StoreUrl::new(format!("http://127.0.0.1:{port}")).unwrap();
    let config = test_config(Duration::ZERO, Duration::ZERO);
    let outcome = Fetcher::new(store, &config).unwrap().fetch_all().await;

    assert!(outcome.products.is_empty());
    assert!(matches!(outcome.error(), Some(FetchError::Network(_))));
    assert_eq!(outcome.stats.requests, 1);
}

#[tokio::test]
async fn test_slow_store_times_out_as_network_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(products_body(0, 1))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let config = ScraperConfig::builder()
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let outcome = create_fetcher(&server, &config).fetch_all().await;

    assert!(outcome.products.is_empty());
    match outcome.error() {
        Some(FetchError::Network(e)) => assert!(e.is_timeout()),
        other => panic!("Expected timeout, got {other:?}"),
    }
}
