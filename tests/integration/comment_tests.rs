//! Top-comment fetching with retries

use crate::support::{discussion_page, discussion_url, ScriptedDriver, BASE_URL};
use hn_digest::crawler::{fetch_top_comment, RetryPolicy};
use std::time::Duration;
use tokio::time::Instant;

const TIMEOUT: Duration = Duration::from_millis(50);

#[tokio::test(start_paused = true)]
async fn test_missing_url_never_navigates() {
    let mut driver = ScriptedDriver::new();
    let log = driver.log();

    let comment = fetch_top_comment(&mut driver, None, TIMEOUT, &RetryPolicy::default()).await;

    assert_eq!(comment, None);
    assert!(log.lock().unwrap().visits.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_first_comment_is_returned_decoded() {
    let url = discussion_url(BASE_URL, "1");
    let mut driver = ScriptedDriver::new().with_page(
        &url,
        discussion_page(&["  Rust &amp;amp; Go are both fine &#x27;choices&#x27;  ", "Second"]),
    );

    let comment =
        fetch_top_comment(&mut driver, Some(&url), TIMEOUT, &RetryPolicy::default()).await;

    assert_eq!(comment.as_deref(), Some("Rust & Go are both fine 'choices'"));
}

#[tokio::test(start_paused = true)]
async fn test_timeouts_then_success() {
    let url = discussion_url(BASE_URL, "2");
    let mut driver = ScriptedDriver::new()
        .with_page(&url, discussion_page(&["Eventually loaded"]))
        .with_timeouts(&url, 2);
    let log = driver.log();

    let start = Instant::now();
    let comment =
        fetch_top_comment(&mut driver, Some(&url), TIMEOUT, &RetryPolicy::default()).await;

    assert_eq!(comment.as_deref(), Some("Eventually loaded"));
    assert_eq!(log.lock().unwrap().visits.len(), 3);
    // Backoff after attempts 0 and 1: 1s + 2s
    assert!(start.elapsed() >= Duration::from_secs(3));
    assert!(start.elapsed() < Duration::from_secs(4));
}

#[tokio::test(start_paused = true)]
async fn test_exhausted_retries_return_none() {
    let url = discussion_url(BASE_URL, "3");
    let mut driver = ScriptedDriver::new()
        .with_page(&url, discussion_page(&["Never seen"]))
        .with_timeouts(&url, 10);
    let log = driver.log();

    let policy = RetryPolicy {
        retries: 3,
        backoff_factor: 2.0,
    };
    let comment = fetch_top_comment(&mut driver, Some(&url), TIMEOUT, &policy).await;

    assert_eq!(comment, None);
    assert_eq!(log.lock().unwrap().visits.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_single_attempt_does_not_retry() {
    let url = discussion_url(BASE_URL, "4");
    let mut driver = ScriptedDriver::new()
        .with_page(&url, discussion_page(&["Too slow"]))
        .with_timeouts(&url, 1);
    let log = driver.log();

    let start = Instant::now();
    let comment =
        fetch_top_comment(&mut driver, Some(&url), TIMEOUT, &RetryPolicy::single_attempt()).await;

    assert_eq!(comment, None);
    assert_eq!(log.lock().unwrap().visits.len(), 1);
    assert!(start.elapsed() < Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn test_navigation_errors_are_retried() {
    let url = discussion_url(BASE_URL, "5");
    let mut driver = ScriptedDriver::new()
        .with_page(&url, discussion_page(&["Recovered"]))
        .with_navigation_errors(&url, 1);
    let log = driver.log();

    let comment =
        fetch_top_comment(&mut driver, Some(&url), TIMEOUT, &RetryPolicy::default()).await;

    assert_eq!(comment.as_deref(), Some("Recovered"));
    assert_eq!(log.lock().unwrap().visits.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_page_without_comments_returns_none() {
    let url = discussion_url(BASE_URL, "6");
    let mut driver = ScriptedDriver::new().with_page(&url, discussion_page(&[]));
    let log = driver.log();

    let comment =
        fetch_top_comment(&mut driver, Some(&url), TIMEOUT, &RetryPolicy::default()).await;

    assert_eq!(comment, None);
    // No comment element ever appears, so every attempt times out
    assert_eq!(log.lock().unwrap().visits.len(), 3);
}
