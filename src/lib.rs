//! hn-digest: a Hacker News front-page digest builder
//!
//! This crate drives a browser (or a plain HTTP client) to the Hacker News
//! front page, extracts the ranked stories, optionally captures the top
//! comment of each discussion, and writes JSON, CSV and Markdown outputs.

pub mod browser;
pub mod config;
pub mod crawler;
pub mod output;
pub mod story;

use thiserror::Error;

/// Main error type for hn-digest operations
#[derive(Debug, Error)]
pub enum DigestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Page driver error: {0}")]
    Driver(#[from] browser::DriverError),

    #[error("Listing page at {url} never became ready: {source}")]
    ListingUnavailable {
        url: String,
        source: browser::DriverError,
    },

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for hn-digest operations
pub type Result<T> = std::result::Result<T, DigestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_digest, Coordinator};
pub use story::Story;
