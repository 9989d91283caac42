//! Markdown digest generation
//!
//! This module generates the human-readable digest: a summary block
//! followed by one section per story with an excerpt of its top comment.

use crate::output::stats::{average_points, most_commented};
use crate::output::traits::{OutputHandler, OutputResult};
use crate::story::Story;
use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Characters of the top comment quoted in the digest
pub const EXCERPT_CHARS: usize = 300;

pub const DIGEST_FILE_NAME: &str = "digest.md";

/// Writes `digest.md`, stamped with the time of writing
pub struct MarkdownOutput {
    generated_at: DateTime<Utc>,
}

impl MarkdownOutput {
    /// Stamps the digest with the current time
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    /// Stamps the digest with a fixed time
    pub fn at(generated_at: DateTime<Utc>) -> Self {
        Self { generated_at }
    }
}

impl Default for MarkdownOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputHandler for MarkdownOutput {
    fn file_name(&self) -> &'static str {
        DIGEST_FILE_NAME
    }

    fn write(&self, stories: &[Story], path: &Path) -> OutputResult<()> {
        let markdown = format_digest(stories, self.generated_at);

        let mut file = File::create(path)?;
        file.write_all(markdown.as_bytes())?;

        Ok(())
    }
}

/// Formats the story list as a markdown digest
///
/// # Arguments
///
/// * `stories` - Stories in rank order
/// * `generated_at` - Timestamp printed under the title
///
/// # Returns
///
/// A formatted markdown string
pub fn format_digest(stories: &[Story], generated_at: DateTime<Utc>) -> String {
    let mut md = String::new();

    // Title
    md.push_str("# Hacker News Daily Digest\n\n");
    md.push_str(&format!(
        "_Generated on {}_\n\n",
        generated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    // Summary
    md.push_str(&format!("- Stories: {}\n", stories.len()));
    md.push_str(&format!(
        "- Average points: {:.1}\n",
        average_points(stories)
    ));
    if let Some(story) = most_commented(stories) {
        md.push_str(&format!(
            "- Most commented: **{}** ({} comments)\n",
            story.title, story.comment_count
        ));
    }
    md.push_str("\n---\n\n");

    // One section per story
    for story in stories {
        md.push_str(&format!(
            "## {}. [{}]({})\n",
            story.rank,
            story.title,
            story.link_target()
        ));
        md.push_str(&format!(
            "- Points: {} | Author: {} | Comments: {}\n",
            story.points, story.author, story.comment_count
        ));
        if let Some(comment) = story.top_comment.as_deref().filter(|c| !c.is_empty()) {
            md.push_str(&format!("> {}...\n", comment_excerpt(comment)));
        }
        md.push('\n');
    }

    md
}

/// First [`EXCERPT_CHARS`] characters of a comment on a single line
pub fn comment_excerpt(comment: &str) -> String {
    comment
        .chars()
        .take(EXCERPT_CHARS)
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect()
}
