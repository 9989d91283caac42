//! Top-comment fetcher
//!
//! This module handles the discussion-page phase:
//! - Navigating the shared page to a story's discussion URL
//! - Waiting for the first comment to render
//! - Retry with exponential backoff on timeouts and driver errors
//!
//! A story whose comment cannot be fetched simply keeps `top_comment`
//! empty; no failure here aborts the run.

use crate::browser::{DriverResult, PageDriver};
use crate::config::CommentConfig;
use crate::crawler::parser::{parse_top_comment, COMMENT_SELECTOR};
use std::time::Duration;

/// How many times to try a discussion page and how long to back off
///
/// | Condition | Action |
/// |-----------|--------|
/// | Comment rendered | Return its text |
/// | Wait timeout, attempts left | Sleep `backoff_factor^attempt` s, retry |
/// | Other driver error, attempts left | Same backoff, retry |
/// | Last attempt failed | Warn, return `None` |
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, at least 1
    pub retries: u32,

    /// Base of the backoff; attempt numbers are 0-indexed
    pub backoff_factor: f64,
}

impl RetryPolicy {
    /// One attempt, no backoff
    pub fn single_attempt() -> Self {
        Self {
            retries: 1,
            backoff_factor: 2.0,
        }
    }

    pub fn from_config(config: &CommentConfig) -> Self {
        Self {
            retries: config.retries.max(1),
            backoff_factor: config.backoff_factor,
        }
    }

    /// Delay after the failed 0-indexed `attempt`: 1s, 2s, 4s... for factor 2
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let secs = self.backoff_factor.powi(exponent);
        // Overflow and NaN saturate rather than panic
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 3,
            backoff_factor: 2.0,
        }
    }
}

/// Fetches the decoded text of the first comment on a discussion page
///
/// A missing URL returns `None` without touching the driver. A page that
/// renders a blank first comment also returns `None` and is not retried.
///
/// # Arguments
///
/// * `driver` - The shared page driver
/// * `url` - Discussion page URL, if the story has one
/// * `timeout` - Bound on the wait for the first comment
/// * `policy` - Attempt count and backoff
pub async fn fetch_top_comment(
    driver: &mut dyn PageDriver,
    url: Option<&str>,
    timeout: Duration,
    policy: &RetryPolicy,
) -> Option<String> {
    let url = url?;
    let attempts = policy.retries.max(1);

    for attempt in 0..attempts {
        tracing::debug!(url, "Fetching comment (attempt {}/{})", attempt + 1, attempts);

        let error = match load_top_comment(driver, url, timeout).await {
            Ok(comment) => return comment,
            Err(e) => e,
        };

        if error.is_timeout() {
            tracing::debug!(url, "Timeout on attempt {}", attempt + 1);
        } else {
            tracing::warn!(url, "Error fetching comment: {}", error);
        }

        if attempt + 1 == attempts {
            tracing::warn!(
                url,
                "Failed to fetch comment after {} attempt{}",
                attempts,
                if attempts == 1 { "" } else { "s" }
            );
            return None;
        }

        let wait = policy.backoff(attempt);
        tracing::debug!(url, "Waiting {:.1}s before retry", wait.as_secs_f64());
        tokio::time::sleep(wait).await;
    }

    None
}

/// One attempt: navigate, wait for the first comment, extract it
async fn load_top_comment(
    driver: &mut dyn PageDriver,
    url: &str,
    timeout: Duration,
) -> DriverResult<Option<String>> {
    driver.goto(url).await?;
    driver.wait_for(COMMENT_SELECTOR, timeout).await?;
    let html = driver.content().await?;
    Ok(parse_top_comment(&html))
}
