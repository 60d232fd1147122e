use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One exported issue row. Empty `description` and `milestone` cells read as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRecord {
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub reporter: String,
    pub owner: String,
    pub component: String,
    pub priority: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestone: Option<String>,
}

pub type RecordIter<R> = csv::DeserializeRecordsIntoIter<R, SourceRecord>;

/// Stream records from any CSV source with a header row. Header names are trimmed,
/// cell values are kept verbatim.
pub fn read_records<R: Read>(source: R) -> RecordIter<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(source)
        .into_deserialize()
}

pub fn open_records(path: &Path) -> Result<RecordIter<BufReader<File>>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open input file {}", path.display()))?;
    Ok(read_records(BufReader::new(file)))
}
