//! End-to-end runs over HTTP against a mock Hacker News
//!
//! These tests use wiremock to serve a front page and discussion pages and
//! drive the whole pipeline through the HTTP page driver.

use crate::support::{discussion_page, fixture, front_page, test_config};
use hn_digest::browser::{DriverError, HttpDriver, PageDriver};
use hn_digest::config::BrowserConfig;
use hn_digest::output::read_stories;
use hn_digest::{Coordinator, DigestError};
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/html; charset=utf-8")
        .set_body_string(body)
}

async fn mount_discussion(server: &MockServer, id: &str, comments: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/item"))
        .and(query_param("id", id))
        .respond_with(html(discussion_page(comments)))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_http_run_against_mock_site() {
    let mock_server = MockServer::start().await;

    let listing = front_page(&[
        fixture("8001", "Show HN: A tiny database", 321, "154&nbsp;comments"),
        fixture("8002", "Why pagers still exist", 42, "discuss"),
    ]);
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(listing))
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_discussion(&mock_server, "8001", &["Impressive &amp; small"]).await;
    mount_discussion(&mock_server, "8002", &[]).await;

    let temp_dir = TempDir::new().unwrap();
    let mut config = test_config(temp_dir.path());
    config.site.base_url = mock_server.uri();
    config.comments.retries = 1;

    let mut coordinator = Coordinator::new(config);
    let report = coordinator.run().await.expect("Digest failed");

    let stories = read_stories(&report.paths.json).unwrap();
    assert_eq!(stories.len(), 2);

    let first = &stories[0];
    assert_eq!(first.rank, 1);
    assert_eq!(first.id, "8001");
    assert_eq!(first.title, "Show HN: A tiny database");
    assert_eq!(first.url.as_deref(), Some("https://example.com/8001"));
    assert_eq!(
        first.discussion_url,
        Some(format!("{}/item?id=8001", mock_server.uri()))
    );
    assert_eq!(first.points, 321);
    assert_eq!(first.author, "user8001");
    assert_eq!(first.comment_count, 154);
    assert_eq!(first.top_comment.as_deref(), Some("Impressive & small"));

    let second = &stories[1];
    assert_eq!(second.comment_count, 0);
    assert_eq!(second.top_comment, None);

    let csv = std::fs::read_to_string(&report.paths.csv).unwrap();
    assert_eq!(csv.lines().count(), 3);
}

#[tokio::test]
async fn test_http_listing_error_is_fatal() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let output_dir = temp_dir.path().join("out");
    let mut config = test_config(&output_dir);
    config.site.base_url = mock_server.uri();

    let mut coordinator = Coordinator::new(config);
    let result = coordinator.run().await;

    match result {
        Err(DigestError::ListingUnavailable {
            source: DriverError::Navigation { message, .. },
            ..
        }) => assert_eq!(message, "HTTP 503"),
        other => panic!("expected a navigation failure, got {:?}", other.map(|_| ())),
    }
    assert!(!output_dir.exists());
}

#[tokio::test]
async fn test_http_driver_wait_reports_missing_selector() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/item"))
        .respond_with(html(discussion_page(&[])))
        .mount(&mock_server)
        .await;

    let mut driver = HttpDriver::new(&BrowserConfig::default()).unwrap();
    let url = format!("{}/item?id=1", mock_server.uri());

    driver.goto(&url).await.unwrap();
    assert_eq!(driver.current_url(), Some(url.as_str()));

    let result = driver
        .wait_for(".comment", Duration::from_millis(25))
        .await;
    assert!(matches!(result, Err(ref e) if e.is_timeout()));

    let content = driver.content().await.unwrap();
    assert!(content.contains("comment-tree"));

    driver.close().await.unwrap();
    assert_eq!(driver.current_url(), None);
}
