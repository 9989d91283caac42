//! HTML extraction for listing and discussion pages
//!
//! This module turns rendered documents into records:
//! - Story rows and their subtext metadata from the front page
//! - The first comment from a discussion page
//!
//! Extraction never fails. A field that cannot be found or parsed takes
//! its zero value so one malformed row never costs the rest of the listing.

use crate::story::Story;
use scraper::{ElementRef, Html, Selector};

/// Present once the front page has rendered its first story
pub const LISTING_READY_SELECTOR: &str = "tr.athing.submission";

/// One per story on the front page
pub const STORY_ROW_SELECTOR: &str = "tr.athing";

/// One per comment on a discussion page, in display order
pub const COMMENT_SELECTOR: &str = ".comment";

const TITLE_LINK_SELECTOR: &str = "span.titleline > a";
const SUBTEXT_SELECTOR: &str = "td.subtext";
const SCORE_SELECTOR: &str = "span.score";
const AUTHOR_SELECTOR: &str = ".hnuser";
const LINK_SELECTOR: &str = "a";

/// Extracts up to `limit` stories from a front-page document
///
/// Ranks are assigned 1..N in document order. Discussion URLs are built by
/// joining `base_url` and the relative href of the last subtext link.
///
/// # Example
///
/// ```
/// use hn_digest::crawler::parse_listing;
///
/// let html = r#"<table>
///   <tr class="athing submission" id="42">
///     <td><span class="titleline"><a href="https://example.com">Example</a></span></td>
///   </tr>
///   <tr><td class="subtext">
///     <span class="score">10 points</span> by <a class="hnuser">pg</a>
///     <a href="item?id=42">3&nbsp;comments</a>
///   </td></tr>
/// </table>"#;
///
/// let stories = parse_listing(html, "https://news.ycombinator.com", 30);
/// assert_eq!(stories[0].points, 10);
/// assert_eq!(stories[0].comment_count, 3);
/// ```
pub fn parse_listing(html: &str, base_url: &str, limit: usize) -> Vec<Story> {
    let document = Html::parse_document(html);

    let Some(row_selector) = selector(STORY_ROW_SELECTOR) else {
        return Vec::new();
    };

    let stories = document
        .select(&row_selector)
        .take(limit)
        .enumerate()
        .map(|(index, row)| parse_row(row, index as u32 + 1, base_url))
        .collect();

    stories
}

/// Builds one record from a story row and its subtext row
fn parse_row(row: ElementRef<'_>, rank: u32, base_url: &str) -> Story {
    let mut story = Story::new(rank);

    story.id = row.value().attr("id").unwrap_or_default().to_string();

    if let Some(anchor) = first_match(row, TITLE_LINK_SELECTOR) {
        story.title = element_text(anchor).trim().to_string();
        story.url = anchor.value().attr("href").map(str::to_string);
    }

    let Some(subtext) = subtext_cell(row) else {
        tracing::trace!(rank, "No subtext row, using defaults");
        return story;
    };

    story.points = first_match(subtext, SCORE_SELECTOR)
        .map(|score| leading_number(&element_text(score)))
        .unwrap_or(0);

    story.author = first_match(subtext, AUTHOR_SELECTOR)
        .map(|author| element_text(author).trim().to_string())
        .unwrap_or_default();

    if let Some(last_link) = last_match(subtext, LINK_SELECTOR) {
        let text = element_text(last_link);
        // "discuss" links carry no count and stay at zero
        if text.contains("comment") {
            story.comment_count = leading_number(&text);
        }

        story.discussion_url = last_link
            .value()
            .attr("href")
            .filter(|href| !href.is_empty())
            .map(|href| join_discussion_url(base_url, href));
    }

    story
}

/// Finds the subtext cell in the `tr` following a story row
fn subtext_cell<'a>(row: ElementRef<'a>) -> Option<ElementRef<'a>> {
    let next_row = row
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sibling| sibling.value().name() == "tr")?;

    first_match(next_row, SUBTEXT_SELECTOR)
}

/// Joins the site root and a discussion href with a single '/'
///
/// The join is textual: absolute hrefs and leading slashes are not
/// normalized.
pub fn join_discussion_url(base_url: &str, href: &str) -> String {
    format!("{}/{}", base_url, href)
}

/// Parses the leading whitespace-delimited token as a count, else 0
///
/// `"128 points"` gives 128; `"discuss"`, `""` and `"-3 points"` give 0.
pub fn leading_number(text: &str) -> u32 {
    text.split_whitespace()
        .next()
        .and_then(|token| token.parse().ok())
        .unwrap_or(0)
}

/// Extracts the decoded text of the first comment on a discussion page
///
/// Returns `None` when the page has no comment or the comment is blank.
pub fn parse_top_comment(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let comment_selector = selector(COMMENT_SELECTOR)?;

    let comment = document.select(&comment_selector).next()?;
    let text = element_text(comment);

    let decoded = html_escape::decode_html_entities(text.trim());
    let decoded = decoded.trim();

    // Whitespace-only text counts as no comment, not as ""
    if decoded.is_empty() {
        None
    } else {
        Some(decoded.to_string())
    }
}

fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

fn first_match<'a>(element: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = selector(css)?;
    let found = element.select(&selector).next();
    found
}

fn last_match<'a>(element: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = selector(css)?;
    let found = element.select(&selector).last();
    found
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}
