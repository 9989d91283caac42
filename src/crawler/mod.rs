//! Crawler module for the front page and discussion pages
//!
//! This module contains the core scraping logic, including:
//! - Listing and comment extraction from rendered HTML
//! - Top-comment fetching with retry logic
//! - Pacing between requests
//! - Overall run coordination

mod coordinator;
mod fetcher;
mod pacing;
mod parser;

pub use coordinator::{run_digest, Coordinator, DigestReport};
pub use fetcher::{fetch_top_comment, RetryPolicy};
pub use pacing::{Pacer, Pacing};
pub use parser::{
    join_discussion_url, leading_number, parse_listing, parse_top_comment, COMMENT_SELECTOR,
    LISTING_READY_SELECTOR, STORY_ROW_SELECTOR,
};
