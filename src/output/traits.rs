//! Output handler traits and types
//!
//! This module defines the trait interface for output handlers and the
//! error type they share.

use crate::story::Story;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Writes the story list to one artifact in the output directory
pub trait OutputHandler {
    /// File name inside the output directory
    fn file_name(&self) -> &'static str;

    /// Serializes `stories` to `path`, replacing any existing file
    fn write(&self, stories: &[Story], path: &Path) -> OutputResult<()>;
}
