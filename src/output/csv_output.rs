//! Tabular CSV export of the story list

use crate::output::traits::{OutputHandler, OutputResult};
use crate::story::{Story, STORY_FIELDS};
use std::path::Path;

pub const CSV_FILE_NAME: &str = "out.csv";

/// Writes `out.csv`: a header row, then one row per story
///
/// The header is written explicitly so an empty run still produces it.
/// Absent values become empty fields.
pub struct CsvOutput;

impl OutputHandler for CsvOutput {
    fn file_name(&self) -> &'static str {
        CSV_FILE_NAME
    }

    fn write(&self, stories: &[Story], path: &Path) -> OutputResult<()> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)?;

        writer.write_record(STORY_FIELDS)?;
        for story in stories {
            writer.serialize(story)?;
        }
        writer.flush()?;

        Ok(())
    }
}
