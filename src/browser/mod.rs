//! Page drivers
//!
//! The pipeline needs only a narrow slice of a browser: navigate to a URL,
//! wait a bounded time for a CSS selector to match, and hand back the
//! rendered document. DOM querying happens afterwards with `scraper` over
//! that document, so extraction never depends on which driver produced it.
//!
//! Two backends implement [`PageDriver`]:
//! - [`ChromeDriver`] drives Chromium over the DevTools protocol
//! - [`HttpDriver`] fetches pages with a plain HTTP client

mod chrome;
mod http;

pub use chrome::ChromeDriver;
pub use http::{build_http_client, HttpDriver};

use crate::config::{BrowserConfig, DriverKind};
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::time::Duration;
use thiserror::Error;

/// Errors raised by a page driver
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Failed to launch browser: {0}")]
    Launch(String),

    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("Timed out after {timeout_ms}ms waiting for '{selector}'")]
    Timeout { selector: String, timeout_ms: u64 },

    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("No page has been loaded yet")]
    NoPage,

    #[error("Browser protocol error: {0}")]
    Protocol(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl DriverError {
    /// Whether this error is a bounded wait that expired
    pub fn is_timeout(&self) -> bool {
        matches!(self, DriverError::Timeout { .. })
    }

    pub(crate) fn timeout(selector: &str, timeout: Duration) -> Self {
        DriverError::Timeout {
            selector: selector.to_string(),
            timeout_ms: timeout.as_millis() as u64,
        }
    }
}

/// Result type alias for page driver operations
pub type DriverResult<T> = std::result::Result<T, DriverError>;

/// A single browser tab (or its HTTP equivalent) shared by the whole run
#[async_trait]
pub trait PageDriver: Send {
    /// Navigates the page to `url`
    async fn goto(&mut self, url: &str) -> DriverResult<()>;

    /// Waits up to `timeout` for `selector` to match on the current page
    async fn wait_for(&mut self, selector: &str, timeout: Duration) -> DriverResult<()>;

    /// Returns the current document as HTML
    async fn content(&mut self) -> DriverResult<String>;

    /// Releases the session; later calls on the driver may fail
    async fn close(&mut self) -> DriverResult<()>;
}

/// Opens the driver selected by the configuration
pub async fn open_driver(config: &BrowserConfig) -> DriverResult<Box<dyn PageDriver>> {
    match config.driver {
        DriverKind::Chrome => Ok(Box::new(ChromeDriver::launch(config).await?)),
        DriverKind::Http => Ok(Box::new(HttpDriver::new(config)?)),
    }
}

/// Parses a CSS selector, reporting failures as a driver error
pub(crate) fn parse_selector(selector: &str) -> DriverResult<Selector> {
    Selector::parse(selector).map_err(|e| DriverError::Selector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}

/// Checks whether `selector` matches anything in an HTML document
pub fn document_matches(html: &str, selector: &str) -> DriverResult<bool> {
    let selector = parse_selector(selector)?;
    let document = Html::parse_document(html);
    let found = document.select(&selector).next().is_some();
    Ok(found)
}
