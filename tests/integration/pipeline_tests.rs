//! Full runs through the coordinator with a scripted driver

use crate::support::{
    discussion_page, discussion_url, fixture, front_page, test_config, ScriptedDriver, BASE_URL,
};
use hn_digest::crawler::{Pacer, Pacing};
use hn_digest::output::read_stories;
use hn_digest::{Coordinator, DigestError};
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::Instant;

fn three_story_driver() -> ScriptedDriver {
    let listing = front_page(&[
        fixture("101", "Alpha", 120, "45&nbsp;comments"),
        fixture("102", "Beta", 80, "discuss"),
        fixture("103", "Gamma", 10, "1&nbsp;comment"),
    ]);

    ScriptedDriver::new()
        .with_page(BASE_URL, listing)
        .with_page(
            &discussion_url(BASE_URL, "101"),
            discussion_page(&["Alpha's top comment", "Another"]),
        )
        .with_page(&discussion_url(BASE_URL, "102"), discussion_page(&[]))
        .with_page(
            &discussion_url(BASE_URL, "103"),
            discussion_page(&["Gamma line one\nGamma line two"]),
        )
}

#[tokio::test(start_paused = true)]
async fn test_full_run_writes_all_outputs() {
    let dir = TempDir::new().unwrap();
    let output_dir = dir.path().join("nested").join("output");
    let config = test_config(&output_dir);

    let driver = three_story_driver();
    let log = driver.log();

    let mut coordinator = Coordinator::new(config);
    let report = coordinator
        .run_with_driver(Box::new(driver))
        .await
        .expect("Run failed");

    assert!(log.lock().unwrap().closed);
    assert_eq!(report.statistics.story_count, 3);
    assert_eq!(report.statistics.comments_captured, 2);
    assert_eq!(report.statistics.most_commented_rank, Some(1));

    assert!(report.paths.json.exists());
    assert!(report.paths.csv.exists());
    assert!(report.paths.digest.exists());

    let stories = read_stories(&report.paths.json).unwrap();
    assert_eq!(stories.len(), 3);

    let ranks: Vec<u32> = stories.iter().map(|s| s.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3]);

    assert_eq!(stories[0].comment_count, 45);
    assert_eq!(stories[0].top_comment.as_deref(), Some("Alpha's top comment"));
    assert_eq!(stories[1].comment_count, 0);
    assert_eq!(stories[1].top_comment, None);
    assert_eq!(stories[2].comment_count, 1);
    assert_eq!(
        stories[2].top_comment.as_deref(),
        Some("Gamma line one\nGamma line two")
    );
    assert_eq!(stories[2].author, "user103");

    let digest = std::fs::read_to_string(&report.paths.digest).unwrap();
    assert!(digest.contains("- Most commented: **Alpha** (45 comments)"));
    assert!(digest.contains("> Gamma line one Gamma line two...\n"));
}

#[tokio::test(start_paused = true)]
async fn test_skip_comments_only_visits_listing() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(dir.path());
    config.comments.skip = true;
    config.pacing.min_delay = 2.0;
    config.pacing.max_delay = 4.0;

    let driver = three_story_driver();
    let log = driver.log();

    let start = Instant::now();
    let mut coordinator = Coordinator::new(config);
    let report = coordinator.run_with_driver(Box::new(driver)).await.unwrap();

    assert_eq!(log.lock().unwrap().visits, vec![BASE_URL.to_string()]);
    assert!(start.elapsed() < Duration::from_secs(1));

    let stories = read_stories(&report.paths.json).unwrap();
    assert_eq!(stories.len(), 3);
    assert!(stories.iter().all(|s| s.top_comment.is_none()));
}

#[tokio::test(start_paused = true)]
async fn test_limit_caps_extraction_and_fetches() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(dir.path());
    config.site.limit = 2;

    let driver = three_story_driver();
    let log = driver.log();

    let mut coordinator = Coordinator::new(config);
    let stories = {
        let mut driver = driver;
        coordinator.collect(&mut driver).await.unwrap()
    };

    assert_eq!(stories.len(), 2);
    assert_eq!(
        log.lock().unwrap().visits,
        vec![
            BASE_URL.to_string(),
            discussion_url(BASE_URL, "101"),
            discussion_url(BASE_URL, "102"),
            discussion_url(BASE_URL, "102"),
            discussion_url(BASE_URL, "102"),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_fixed_pacing_before_each_comment_fetch() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path());
    let listing = front_page(&[
        fixture("1", "One", 1, "2 comments"),
        fixture("2", "Two", 2, "3 comments"),
        fixture("3", "Three", 3, "4 comments"),
    ]);

    let mut driver = ScriptedDriver::new().with_page(BASE_URL, listing);
    for id in ["1", "2", "3"] {
        driver = driver.with_page(&discussion_url(BASE_URL, id), discussion_page(&["ok"]));
    }

    let pacer = Pacer::new(Pacing::Fixed(Duration::from_millis(600)));
    let mut coordinator = Coordinator::with_pacer(config, pacer);

    let start = Instant::now();
    let stories = coordinator.collect(&mut driver).await.unwrap();

    // One delay ahead of each of the three fetches, none after the last
    assert!(start.elapsed() >= Duration::from_millis(1800));
    assert!(start.elapsed() < Duration::from_millis(2400));
    assert!(stories.iter().all(|s| s.top_comment.as_deref() == Some("ok")));
}

#[tokio::test(start_paused = true)]
async fn test_listing_timeout_is_fatal_and_closes_driver() {
    let dir = TempDir::new().unwrap();
    let output_dir = dir.path().join("never-created");
    let config = test_config(&output_dir);

    let driver = ScriptedDriver::new().with_page(
        BASE_URL,
        "<html><body><p>Sorry, we're not able to serve your requests this quickly.</p></body></html>"
            .to_string(),
    );
    let log = driver.log();

    let mut coordinator = Coordinator::new(config);
    let result = coordinator.run_with_driver(Box::new(driver)).await;

    match result {
        Err(DigestError::ListingUnavailable { url, source }) => {
            assert_eq!(url, BASE_URL);
            assert!(source.is_timeout());
        }
        other => panic!("expected ListingUnavailable, got {:?}", other.map(|_| ())),
    }

    assert!(log.lock().unwrap().closed);
    assert!(!output_dir.exists());
}

#[tokio::test(start_paused = true)]
async fn test_comment_failures_do_not_abort_run() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path());
    let listing = front_page(&[
        fixture("1", "Flaky", 5, "9 comments"),
        fixture("2", "Fine", 6, "1 comment"),
    ]);

    // The first discussion page is missing entirely
    let driver = ScriptedDriver::new()
        .with_page(BASE_URL, listing)
        .with_page(&discussion_url(BASE_URL, "2"), discussion_page(&["works"]));

    let mut coordinator = Coordinator::new(config);
    let report = coordinator.run_with_driver(Box::new(driver)).await.unwrap();

    let stories = read_stories(&report.paths.json).unwrap();
    assert_eq!(stories[0].top_comment, None);
    assert_eq!(stories[1].top_comment.as_deref(), Some("works"));
}
