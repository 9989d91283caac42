use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Hacker News front page
pub const DEFAULT_BASE_URL: &str = "https://news.ycombinator.com";

/// Desktop Chrome user agent presented by both drivers
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Main configuration structure for hn-digest
///
/// Every section and key is optional in the TOML file; missing values take
/// the same defaults as the command line.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub browser: BrowserConfig,
    pub comments: CommentConfig,
    pub pacing: PacingConfig,
    pub output: OutputConfig,
}

/// Where to scrape and how much
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SiteConfig {
    /// Site root; discussion links are joined onto it
    pub base_url: String,

    /// Maximum number of stories to extract
    pub limit: usize,

    /// Per-wait selector timeout (milliseconds)
    pub timeout_ms: u64,
}

impl SiteConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            limit: 30,
            timeout_ms: 4000,
        }
    }
}

/// Which page driver backend to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriverKind {
    /// Chromium over the DevTools protocol
    #[default]
    Chrome,
    /// Plain HTTP fetches, no script execution
    Http,
}

impl std::fmt::Display for DriverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DriverKind::Chrome => write!(f, "chrome"),
            DriverKind::Http => write!(f, "http"),
        }
    }
}

/// Browser session configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BrowserConfig {
    pub driver: DriverKind,

    /// Show the browser window instead of running headless
    pub headful: bool,

    pub user_agent: String,

    /// Explicit Chromium binary; autodetected when unset
    pub chrome_executable: Option<PathBuf>,

    /// Bound on a single navigation or DOM snapshot (milliseconds)
    pub page_load_timeout_ms: u64,
}

impl BrowserConfig {
    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_millis(self.page_load_timeout_ms)
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            driver: DriverKind::Chrome,
            headful: false,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            chrome_executable: None,
            page_load_timeout_ms: 30_000,
        }
    }
}

/// Top-comment phase configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CommentConfig {
    /// Skip the comment phase entirely
    pub skip: bool,

    /// Attempts per discussion page (1 disables retrying)
    pub retries: u32,

    /// Base of the exponential backoff between attempts (seconds)
    pub backoff_factor: f64,
}

impl Default for CommentConfig {
    fn default() -> Self {
        Self {
            skip: false,
            retries: 3,
            backoff_factor: 2.0,
        }
    }
}

/// Delay between page fetches (seconds)
///
/// Equal bounds give a fixed delay; both zero disables pacing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PacingConfig {
    pub min_delay: f64,
    pub max_delay: f64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            min_delay: 2.0,
            max_delay: 4.0,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Directory receiving out.json, out.csv and digest.md
    pub output_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
        }
    }
}
