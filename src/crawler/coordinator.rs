//! Digest coordinator - main run orchestration logic
//!
//! This module wires the pipeline together:
//! - Opening the page driver
//! - Extracting the front-page listing
//! - Fetching top comments one story at a time, paced
//! - Closing the driver on every exit path
//! - Writing the outputs

use crate::browser::{open_driver, DriverError, PageDriver};
use crate::config::Config;
use crate::crawler::fetcher::{fetch_top_comment, RetryPolicy};
use crate::crawler::pacing::{Pacer, Pacing};
use crate::crawler::parser::{parse_listing, LISTING_READY_SELECTOR};
use crate::output::{compute_statistics, write_outputs, DigestStatistics, OutputPaths};
use crate::story::Story;
use crate::DigestError;
use std::time::Instant;

/// What a completed run produced
#[derive(Debug, Clone)]
pub struct DigestReport {
    pub paths: OutputPaths,
    pub statistics: DigestStatistics,
}

/// Main run coordinator
pub struct Coordinator {
    config: Config,
    pacer: Pacer,
    policy: RetryPolicy,
}

impl Coordinator {
    /// Creates a coordinator with pacing and retries taken from `config`
    pub fn new(config: Config) -> Self {
        let pacer = Pacer::new(Pacing::from_config(&config.pacing));
        Self::with_pacer(config, pacer)
    }

    /// Creates a coordinator with an explicit pacer
    pub fn with_pacer(config: Config, pacer: Pacer) -> Self {
        let policy = RetryPolicy::from_config(&config.comments);
        Self {
            config,
            pacer,
            policy,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs the whole pipeline with the configured driver
    pub async fn run(&mut self) -> Result<DigestReport, DigestError> {
        let driver = open_driver(&self.config.browser).await?;
        self.run_with_driver(driver).await
    }

    /// Runs the pipeline on an already opened driver
    ///
    /// The driver is closed after collection whether or not collection
    /// succeeded; outputs are only written for a successful collection.
    pub async fn run_with_driver(
        &mut self,
        mut driver: Box<dyn PageDriver>,
    ) -> Result<DigestReport, DigestError> {
        let start_time = Instant::now();

        let collected = self.collect(driver.as_mut()).await;

        if let Err(e) = driver.close().await {
            tracing::warn!("Failed to close page driver: {}", e);
        }
        drop(driver);

        let stories = collected?;

        tracing::info!(
            "Writing {} stories to {}",
            stories.len(),
            self.config.output.output_dir.display()
        );
        let paths = write_outputs(&stories, &self.config.output.output_dir)?;

        tracing::info!("Digest completed in {:?}", start_time.elapsed());

        Ok(DigestReport {
            paths,
            statistics: compute_statistics(&stories),
        })
    }

    /// Extracts the listing and, unless skipped, each story's top comment
    pub async fn collect(
        &mut self,
        driver: &mut dyn PageDriver,
    ) -> Result<Vec<Story>, DigestError> {
        let mut stories = self.fetch_listing(driver).await?;

        if self.config.comments.skip {
            tracing::info!("Skipping comment fetching");
        } else {
            self.fetch_comments(driver, &mut stories).await;
        }

        Ok(stories)
    }

    /// Loads the front page and extracts up to `limit` stories
    ///
    /// Failing to see the first story row is fatal: there is no fallback
    /// listing.
    pub async fn fetch_listing(
        &self,
        driver: &mut dyn PageDriver,
    ) -> Result<Vec<Story>, DigestError> {
        let site = &self.config.site;
        tracing::info!("Fetching top stories from {}", site.base_url);

        let listing_unavailable = |source: DriverError| DigestError::ListingUnavailable {
            url: site.base_url.clone(),
            source,
        };

        driver
            .goto(&site.base_url)
            .await
            .map_err(listing_unavailable)?;
        driver
            .wait_for(LISTING_READY_SELECTOR, site.timeout())
            .await
            .map_err(listing_unavailable)?;
        let html = driver.content().await.map_err(listing_unavailable)?;

        let stories = parse_listing(&html, &site.base_url, site.limit);
        tracing::info!("Extracted {} stories", stories.len());

        Ok(stories)
    }

    /// Fills `top_comment` for every story with a discussion page
    ///
    /// Each fetch is preceded by a pacing delay, so the first one waits
    /// after the listing load and nothing waits after the last.
    pub async fn fetch_comments(&mut self, driver: &mut dyn PageDriver, stories: &mut [Story]) {
        tracing::info!("Fetching top comments");

        let total = stories.len();
        let timeout = self.config.site.timeout();
        let mut fetched = 0;

        for story in stories.iter_mut() {
            let Some(url) = story.discussion_url.as_deref() else {
                tracing::debug!(rank = story.rank, "No discussion page, skipping");
                continue;
            };

            self.pacer.pause().await;

            tracing::info!(
                "Fetching comment {}/{}: {}",
                story.rank,
                total,
                truncate_title(&story.title, 50)
            );

            story.top_comment = fetch_top_comment(driver, Some(url), timeout, &self.policy).await;
            if story.top_comment.is_some() {
                fetched += 1;
            }
        }

        tracing::info!("Captured {} of {} top comments", fetched, total);
    }
}

/// Shortens a title for progress logging
fn truncate_title(title: &str, max_chars: usize) -> String {
    if title.chars().count() <= max_chars {
        title.to_string()
    } else {
        let head: String = title.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}

/// Runs a complete digest operation
///
/// This is the main entry point. It will:
/// 1. Launch the configured page driver
/// 2. Extract the front-page listing
/// 3. Fetch top comments (unless skipped)
/// 4. Close the driver
/// 5. Write `out.json`, `out.csv` and `digest.md`
///
/// # Arguments
///
/// * `config` - The validated configuration
///
/// # Returns
///
/// * `Ok(DigestReport)` - Paths of the written files and summary figures
/// * `Err(DigestError)` - The run failed
pub async fn run_digest(config: Config) -> Result<DigestReport, DigestError> {
    Coordinator::new(config).run().await
}
