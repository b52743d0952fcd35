//! Integration tests for `ReqwestFetcher` against a local mock server.

use hmh_domain::traits::{FetchRequest, PageFetcher};
use hmh_fetch::{FetchError, ReqwestFetcher};
use std::time::Duration;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const AGENT: &str = "HelpMyHealthTest/1.0";

#[tokio::test]
async fn test_get_sends_params_and_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/results"))
        .and(query_param("q", "headache"))
        .and(header("User-Agent", AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_string("<main>ok</main>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = ReqwestFetcher::new(AGENT).expect("client");
    let request = FetchRequest::get(
        format!("{}/search/results", mock_server.uri()),
        Duration::from_secs(5),
    )
    .param("q", "headache");

    let body = fetcher.fetch(request).await.expect("body");
    assert_eq!(body, "<main>ok</main>");
}

#[tokio::test]
async fn test_post_form_sends_body_and_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/html/"))
        .and(header("Referer", "https://html.duckduckgo.com/"))
        .and(body_string_contains("q=site%3Anhs.uk+cough"))
        .respond_with(ResponseTemplate::new(200).set_body_string("results"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = ReqwestFetcher::new(AGENT).expect("client");
    let request = FetchRequest::post_form(
        format!("{}/html/", mock_server.uri()),
        Duration::from_secs(5),
    )
    .param("q", "site:nhs.uk cough")
    .header("Referer", "https://html.duckduckgo.com/");

    assert_eq!(fetcher.fetch(request).await.expect("body"), "results");
}

#[tokio::test]
async fn test_non_success_status_is_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(410))
        .mount(&mock_server)
        .await;

    let fetcher = ReqwestFetcher::new(AGENT).expect("client");
    let request = FetchRequest::get(format!("{}/gone", mock_server.uri()), Duration::from_secs(5));

    let err = fetcher.fetch(request).await.unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 410, .. }));
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("late")
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let fetcher = ReqwestFetcher::new(AGENT).expect("client");
    let request = FetchRequest::get(
        format!("{}/slow", mock_server.uri()),
        Duration::from_millis(200),
    );

    let err = fetcher.fetch(request).await.unwrap_err();
    assert!(matches!(err, FetchError::Timeout { .. }));
}
