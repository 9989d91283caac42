//! Output module for writing the collected stories
//!
//! This module handles:
//! - The structured JSON dump (`out.json`)
//! - The tabular CSV export (`out.csv`)
//! - The markdown digest (`digest.md`)
//! - Summary statistics over the story list

mod csv_output;
mod json_output;
mod markdown;
pub mod stats;
mod traits;

pub use csv_output::{CsvOutput, CSV_FILE_NAME};
pub use json_output::{read_stories, JsonOutput, JSON_FILE_NAME};
pub use markdown::{
    comment_excerpt, format_digest, MarkdownOutput, DIGEST_FILE_NAME, EXCERPT_CHARS,
};
pub use stats::{compute_statistics, print_statistics, DigestStatistics};
pub use traits::{OutputError, OutputHandler, OutputResult};

use crate::story::Story;
use std::path::{Path, PathBuf};

/// Locations of the files written by [`write_outputs`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub json: PathBuf,
    pub csv: PathBuf,
    pub digest: PathBuf,
}

impl OutputPaths {
    /// Paths of the three artifacts inside `output_dir`
    pub fn in_dir(output_dir: &Path) -> Self {
        Self {
            json: output_dir.join(JSON_FILE_NAME),
            csv: output_dir.join(CSV_FILE_NAME),
            digest: output_dir.join(DIGEST_FILE_NAME),
        }
    }
}

/// Writes all three artifacts for `stories` into `output_dir`
///
/// The directory is created if missing. Any filesystem or serialization
/// failure is returned; the run treats it as fatal.
///
/// # Arguments
///
/// * `stories` - The final story list in rank order
/// * `output_dir` - Directory receiving the files
///
/// # Returns
///
/// * `Ok(OutputPaths)` - Where each file was written
/// * `Err(OutputError)` - A file could not be written
pub fn write_outputs(stories: &[Story], output_dir: &Path) -> OutputResult<OutputPaths> {
    std::fs::create_dir_all(output_dir)?;

    let markdown = MarkdownOutput::new();
    let handlers: [&dyn OutputHandler; 3] = [&JsonOutput, &CsvOutput, &markdown];
    for handler in handlers {
        let path = output_dir.join(handler.file_name());
        tracing::debug!("Writing {}", path.display());
        handler.write(stories, &path)?;
    }

    Ok(OutputPaths::in_dir(output_dir))
}
