//! Summary statistics over the story list
//!
//! This module provides the figures shown at the top of the digest and
//! printed by the binary after a run.

use crate::story::Story;

/// Digest summary figures
#[derive(Debug, Clone, PartialEq)]
pub struct DigestStatistics {
    /// Number of stories extracted
    pub story_count: usize,

    /// Mean points, 0.0 for an empty list
    pub average_points: f64,

    /// Stories whose top comment was captured
    pub comments_captured: usize,

    /// Rank of the most commented story
    pub most_commented_rank: Option<u32>,
}

/// Computes summary statistics for a story list
pub fn compute_statistics(stories: &[Story]) -> DigestStatistics {
    DigestStatistics {
        story_count: stories.len(),
        average_points: average_points(stories),
        comments_captured: stories.iter().filter(|s| s.top_comment.is_some()).count(),
        most_commented_rank: most_commented(stories).map(|s| s.rank),
    }
}

/// Mean of `points`; an empty list averages to 0.0
pub fn average_points(stories: &[Story]) -> f64 {
    let total: u64 = stories.iter().map(|s| u64::from(s.points)).sum();
    total as f64 / stories.len().max(1) as f64
}

/// The story with the highest `comment_count`, first one on ties
pub fn most_commented(stories: &[Story]) -> Option<&Story> {
    stories.iter().fold(None, |best: Option<&Story>, story| match best {
        Some(current) if current.comment_count >= story.comment_count => Some(current),
        _ => Some(story),
    })
}

/// Prints statistics to stdout in a human-readable format
pub fn print_statistics(stats: &DigestStatistics) {
    println!("Stories: {}", stats.story_count);
    println!("Average points: {:.1}", stats.average_points);
    println!(
        "Top comments captured: {}/{}",
        stats.comments_captured, stats.story_count
    );
    if let Some(rank) = stats.most_commented_rank {
        println!("Most commented: #{}", rank);
    }
}
