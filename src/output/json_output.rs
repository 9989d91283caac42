//! Structured JSON dump of the story list

use crate::output::traits::{OutputHandler, OutputResult};
use crate::story::Story;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

pub const JSON_FILE_NAME: &str = "out.json";

/// Writes `out.json`: the full record array, pretty-printed
pub struct JsonOutput;

impl OutputHandler for JsonOutput {
    fn file_name(&self) -> &'static str {
        JSON_FILE_NAME
    }

    fn write(&self, stories: &[Story], path: &Path) -> OutputResult<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, stories)?;
        writer.flush()?;
        Ok(())
    }
}

/// Reads a record array previously written by [`JsonOutput`]
pub fn read_stories(path: &Path) -> OutputResult<Vec<Story>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
