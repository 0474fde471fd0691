//! Integration tests for the HTTP fetcher.

use jfr_lib::models::JobRef;
use jfr_lib::services::fetcher::{FetchError, FetchSettings, ReportFetcher};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::test_helpers::{SAMPLE_REPORT, job_url, mount_report};

fn fetcher() -> ReportFetcher {
    ReportFetcher::new(&FetchSettings {
        bypass_proxy: true,
        timeout: None,
    })
    .expect("failed to build fetcher")
}

#[tokio::test]
async fn test_fetch_test_report_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/job/alpha/12/testReport/api/json"))
        .and(query_param("pretty", "true"))
        .and(query_param(
            "tree",
            "suites[cases[className,name,status,errorDetails]]",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE_REPORT))
        .expect(1)
        .mount(&server)
        .await;

    let job = JobRef::parse(&job_url(&server, "alpha", 12)).unwrap();
    let body = fetcher().fetch_test_report(&job).await.expect("fetch failed");

    assert_eq!(body, SAMPLE_REPORT);
}

#[tokio::test]
async fn test_fetch_normalizes_job_url_without_slash() {
    let server = MockServer::start().await;
    mount_report(&server, "alpha", 3, 200, SAMPLE_REPORT).await;

    let raw = format!("{}/job/alpha/3", server.uri());
    let job = JobRef::parse(&raw).unwrap();

    assert!(fetcher().fetch_test_report(&job).await.is_ok());
}

#[tokio::test]
async fn test_fetch_not_found() {
    let server = MockServer::start().await;
    mount_report(&server, "missing", 1, 404, "Not Found").await;

    let job = JobRef::parse(&job_url(&server, "missing", 1)).unwrap();
    let result = fetcher().fetch_test_report(&job).await;

    match result {
        Err(FetchError::HttpStatus { status, url }) => {
            assert_eq!(status, 404);
            assert!(url.contains("/job/missing/1/testReport/api/json"));
        }
        other => panic!("expected HttpStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_server_error() {
    let server = MockServer::start().await;
    mount_report(&server, "broken", 1, 500, "").await;

    let job = JobRef::parse(&job_url(&server, "broken", 1)).unwrap();
    let result = fetcher().fetch_test_report(&job).await;

    assert!(matches!(result, Err(FetchError::HttpStatus { status: 500, .. })));
}

#[tokio::test]
async fn test_fetch_connection_refused() {
    // Port 1 is reserved and nothing listens on it.
    let result = fetcher().fetch("http://127.0.0.1:1/job/x/1/").await;

    assert!(matches!(result, Err(FetchError::Transport(_))));
}

#[tokio::test]
async fn test_fetch_sends_no_credentials() {
    let server = MockServer::start().await;
    mount_report(&server, "alpha", 1, 200, SAMPLE_REPORT).await;

    let job = JobRef::parse(&job_url(&server, "alpha", 1)).unwrap();
    fetcher().fetch_test_report(&job).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_fetch_rejects_invalid_utf8() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/job/bin/1/testReport/api/json"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xff, 0xfe, 0xfd]))
        .mount(&server)
        .await;

    let job = JobRef::parse(&job_url(&server, "bin", 1)).unwrap();
    let result = fetcher().fetch_test_report(&job).await;

    assert!(matches!(result, Err(FetchError::Encoding(_))));
}
