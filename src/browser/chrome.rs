//! Chromium driver over the DevTools protocol

use crate::browser::{DriverError, DriverResult, PageDriver};
use crate::config::BrowserConfig;
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig as CdpBrowserConfig};
use chromiumoxide::Page;
use futures::{Stream, StreamExt};
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

/// How often a pending selector wait re-queries the DOM
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A Chromium instance with one open tab
///
/// Call [`PageDriver::close`] to shut the browser down cleanly. If the
/// driver is dropped without closing, the CDP handler task is aborted and
/// the browser process is killed when `Browser` drops.
pub struct ChromeDriver {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    page_load_timeout: Duration,
    closed: bool,
}

impl ChromeDriver {
    /// Launches Chromium and opens a blank tab
    pub async fn launch(config: &BrowserConfig) -> DriverResult<Self> {
        tracing::info!(
            headful = config.headful,
            "Launching Chromium ({})",
            if config.headful { "headful" } else { "headless" }
        );

        let mut builder = CdpBrowserConfig::builder()
            .no_sandbox()
            .arg(format!("--user-agent={}", config.user_agent));

        if config.headful {
            builder = builder.with_head();
        }

        if let Some(path) = &config.chrome_executable {
            builder = builder.chrome_executable(path);
        }

        let cdp_config = builder.build().map_err(DriverError::Launch)?;

        let (browser, handler) = Browser::launch(cdp_config)
            .await
            .map_err(|e| DriverError::Launch(e.to_string()))?;

        // The handler must be polled for any CDP command to complete
        let handler = tokio::spawn(drain_handler(handler));
        let page_load_timeout = config.page_load_timeout();

        let page = within(
            page_load_timeout,
            browser.new_page("about:blank"),
            DriverError::Protocol,
        )
        .await?;

        Ok(Self {
            browser,
            page,
            handler,
            page_load_timeout,
            closed: false,
        })
    }
}

#[async_trait]
impl PageDriver for ChromeDriver {
    async fn goto(&mut self, url: &str) -> DriverResult<()> {
        tracing::debug!(url, "Navigating");
        within(self.page_load_timeout, self.page.goto(url), |message| {
            DriverError::Navigation {
                url: url.to_string(),
                message,
            }
        })
        .await?;
        Ok(())
    }

    async fn wait_for(&mut self, selector: &str, timeout: Duration) -> DriverResult<()> {
        let page = &self.page;
        let poll = async {
            loop {
                if page.find_element(selector).await.is_ok() {
                    return;
                }
                tokio::time::sleep(POLL_INTERVAL).await;
            }
        };

        tokio::time::timeout(timeout, poll)
            .await
            .map_err(|_| DriverError::timeout(selector, timeout))
    }

    async fn content(&mut self) -> DriverResult<String> {
        within(
            self.page_load_timeout,
            self.page.content(),
            DriverError::Protocol,
        )
        .await
    }

    async fn close(&mut self) -> DriverResult<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        tracing::debug!("Closing Chromium");
        let result = within(
            self.page_load_timeout,
            self.browser.close(),
            DriverError::Protocol,
        )
        .await;

        match tokio::time::timeout(self.page_load_timeout, self.browser.wait()).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => tracing::warn!("Chromium did not exit cleanly: {}", e),
            Err(_) => tracing::warn!("Chromium did not exit in time"),
        }
        self.handler.abort();

        result.map(|_| ())
    }
}

/// Polls the CDP event stream until the connection ends
///
/// Individual errors, such as messages this client cannot decode, do not
/// end the session, so they are logged and skipped.
async fn drain_handler<S, T, E>(mut handler: S)
where
    S: Stream<Item = Result<T, E>> + Unpin,
    E: Display,
{
    while let Some(event) = handler.next().await {
        if let Err(e) = event {
            tracing::trace!("CDP handler error: {}", e);
        }
    }
}

/// Runs a CDP command with an upper bound on how long it may take
async fn within<T, E, F>(
    limit: Duration,
    command: F,
    on_error: impl FnOnce(String) -> DriverError,
) -> DriverResult<T>
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    match tokio::time::timeout(limit, command).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(on_error(e.to_string())),
        Err(_) => Err(on_error(format!(
            "no response within {}ms",
            limit.as_millis()
        ))),
    }
}

impl Drop for ChromeDriver {
    fn drop(&mut self) {
        if !self.closed {
            tracing::warn!("Chromium session dropped without close, tearing down");
            self.handler.abort();
        }
    }
}
