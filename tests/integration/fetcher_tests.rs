//! HTTP fetcher behavior: headers, retries and error classification

use price_tracker::crawler::{browser_headers, HttpFetcher, PageFetcher, RetryPolicy};
use price_tracker::FetchError;
use std::net::TcpListener;
use std::time::Duration;
use wiremock::matchers::{header_exists, method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

/// Matches requests that do not advertise compressed encodings
struct NoAcceptEncoding;

impl Match for NoAcceptEncoding {
    fn matches(&self, request: &Request) -> bool {
        !request.headers.contains_key("accept-encoding")
    }
}

/// Matches a header by its exact raw value
///
/// wiremock's `header` matcher splits values on commas, which breaks on
/// quality lists such as `en-US,en;q=0.9`.
struct RawHeader(&'static str, &'static str);

impl Match for RawHeader {
    fn matches(&self, request: &Request) -> bool {
        request
            .headers
            .get(self.0)
            .and_then(|value| value.to_str().ok())
            == Some(self.1)
    }
}

/// Fetcher with a short timeout and millisecond backoff
fn fast_fetcher(max_retries: u32, timeout: Duration) -> HttpFetcher {
    let client = reqwest::Client::builder()
        .user_agent(price_tracker::crawler::BROWSER_USER_AGENT)
        .default_headers(browser_headers())
        .timeout(timeout)
        .build()
        .expect("Failed to build client");

    HttpFetcher::new(
        client,
        RetryPolicy {
            max_retries,
            backoff_unit: Duration::from_millis(1),
        },
    )
}

/// A localhost URL nothing is listening on
fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let addr = listener.local_addr().expect("No local address");
    drop(listener);
    format!("http://{}/dp/GONE", addr)
}

#[tokio::test]
async fn test_fetch_sends_browser_profile_without_compression() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dp/B01"))
        .and(header_exists("user-agent"))
        .and(RawHeader("accept-language", "en-US,en;q=0.9"))
        .and(RawHeader("cache-control", "max-age=0"))
        .and(NoAcceptEncoding)
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = fast_fetcher(3, Duration::from_secs(5));
    let body = fetcher
        .fetch(&format!("{}/dp/B01", mock_server.uri()))
        .await
        .expect("Fetch failed");

    assert_eq!(body, "<html>ok</html>");
}

#[tokio::test]
async fn test_http_error_status_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dp/MISSING"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = fast_fetcher(3, Duration::from_secs(5));
    let result = fetcher
        .fetch(&format!("{}/dp/MISSING", mock_server.uri()))
        .await;

    match result {
        Err(FetchError::Status { status, .. }) => assert_eq!(status, 404),
        other => panic!("Expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_timeouts_are_retried_until_exhausted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("too late")
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let fetcher = fast_fetcher(2, Duration::from_millis(100));
    let result = fetcher.fetch(&format!("{}/slow", mock_server.uri())).await;

    match result {
        Err(FetchError::RetriesExhausted { attempts, .. }) => assert_eq!(attempts, 3),
        other => panic!("Expected exhausted retries, got {:?}", other),
    }

    let received = mock_server
        .received_requests()
        .await
        .expect("Request recording disabled");
    assert_eq!(received.len(), 3);
}

#[tokio::test]
async fn test_transient_failure_recovers_on_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_string("recovered"))
        .mount(&mock_server)
        .await;

    let fetcher = fast_fetcher(3, Duration::from_millis(100));
    let body = fetcher
        .fetch(&format!("{}/flaky", mock_server.uri()))
        .await
        .expect("Retry should have succeeded");

    assert_eq!(body, "recovered");
}

#[tokio::test]
async fn test_connection_refused_exhausts_retries() {
    let fetcher = fast_fetcher(3, Duration::from_secs(5));
    let url = dead_url();

    match fetcher.fetch(&url).await {
        Err(FetchError::RetriesExhausted {
            url: failed, attempts, ..
        }) => {
            assert_eq!(failed, url);
            assert_eq!(attempts, 4);
        }
        other => panic!("Expected exhausted retries, got {:?}", other),
    }
}
