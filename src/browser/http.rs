//! HTTP page driver
//!
//! This driver handles environments without a Chromium install:
//! - Building an HTTP client with the configured user agent
//! - GET requests to fetch page content
//! - Selector waits evaluated against the fetched document
//!
//! Hacker News renders server-side, so the fetched HTML carries the same
//! rows and comments a browser would show. Pages that build their DOM with
//! script will never satisfy a wait.

use crate::browser::{document_matches, DriverError, DriverResult, PageDriver};
use crate::config::BrowserConfig;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// A "page" backed by the body of the last successful GET
pub struct HttpDriver {
    client: Client,
    current_url: Option<String>,
    body: Option<String>,
}

impl HttpDriver {
    /// Creates a driver with a client configured from `config`
    pub fn new(config: &BrowserConfig) -> DriverResult<Self> {
        Ok(Self {
            client: build_http_client(&config.user_agent)?,
            current_url: None,
            body: None,
        })
    }

    /// URL of the currently loaded document
    pub fn current_url(&self) -> Option<&str> {
        self.current_url.as_deref()
    }
}

/// Builds an HTTP client presenting the given user agent
///
/// # Example
///
/// ```no_run
/// use hn_digest::browser::build_http_client;
/// use hn_digest::config::DEFAULT_USER_AGENT;
///
/// let client = build_http_client(DEFAULT_USER_AGENT).unwrap();
/// ```
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

#[async_trait]
impl PageDriver for HttpDriver {
    async fn goto(&mut self, url: &str) -> DriverResult<()> {
        tracing::debug!(url, "Fetching");
        self.current_url = Some(url.to_string());
        self.body = None;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_request_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DriverError::Navigation {
                url: url.to_string(),
                message: format!("HTTP {}", status.as_u16()),
            });
        }

        self.body = Some(response.text().await?);
        Ok(())
    }

    async fn wait_for(&mut self, selector: &str, timeout: Duration) -> DriverResult<()> {
        let body = self.body.as_deref().ok_or(DriverError::NoPage)?;

        // A fetched document never changes, so one check decides the wait
        if document_matches(body, selector)? {
            Ok(())
        } else {
            Err(DriverError::timeout(selector, timeout))
        }
    }

    async fn content(&mut self) -> DriverResult<String> {
        self.body.clone().ok_or(DriverError::NoPage)
    }

    async fn close(&mut self) -> DriverResult<()> {
        self.current_url = None;
        self.body = None;
        Ok(())
    }
}

/// Maps a request failure to a driver error naming the URL
fn classify_request_error(url: &str, e: reqwest::Error) -> DriverError {
    if e.is_timeout() {
        DriverError::Navigation {
            url: url.to_string(),
            message: "Request timeout".to_string(),
        }
    } else if e.is_connect() {
        DriverError::Navigation {
            url: url.to_string(),
            message: "Connection refused".to_string(),
        }
    } else {
        DriverError::Http(e)
    }
}
