//! The story record extracted from the front page

use serde::{Deserialize, Serialize};

/// Field names in serialization order, used for the CSV header
pub const STORY_FIELDS: [&str; 9] = [
    "rank",
    "id",
    "title",
    "url",
    "discussion_url",
    "points",
    "author",
    "comment_count",
    "top_comment",
];

/// One ranked entry of the front-page listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    /// 1-based position in the listing
    pub rank: u32,

    /// Site-assigned item identifier
    pub id: String,

    /// Display text of the story link
    pub title: String,

    /// Target of the story link (absent for some self-posts)
    pub url: Option<String>,

    /// Absolute URL of the discussion page
    pub discussion_url: Option<String>,

    pub points: u32,

    /// Submitter username, empty for job postings
    pub author: String,

    pub comment_count: u32,

    /// Decoded text of the first comment, filled by the comment phase
    pub top_comment: Option<String>,
}

impl Story {
    /// Creates a record with every scraped field at its default value
    pub fn new(rank: u32) -> Self {
        Self {
            rank,
            id: String::new(),
            title: String::new(),
            url: None,
            discussion_url: None,
            points: 0,
            author: String::new(),
            comment_count: 0,
            top_comment: None,
        }
    }

    /// The link used for the digest heading
    pub fn link_target(&self) -> &str {
        self.url
            .as_deref()
            .or(self.discussion_url.as_deref())
            .unwrap_or("")
    }
}
