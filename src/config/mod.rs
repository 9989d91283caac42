//! Configuration module for hn-digest
//!
//! Settings come from built-in defaults, an optional TOML file, and finally
//! command-line overrides applied by the binary. The merged result is
//! validated before any page is fetched.
//!
//! # Example
//!
//! ```no_run
//! use hn_digest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("hn-digest.toml")).unwrap();
//! println!("Will extract up to {} stories", config.site.limit);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    BrowserConfig, CommentConfig, Config, DriverKind, OutputConfig, PacingConfig, SiteConfig,
    DEFAULT_BASE_URL, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
