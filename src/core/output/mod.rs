//! Output writing
//!
//! This module turns a collected record set into a file on disk. The
//! format is selected once per run; each source produces at most one file,
//! named after the source unless it declares an explicit output name. An
//! empty record set produces no file at all, and not even the output
//! directory is created for it.

pub mod csv;
pub mod headers;
pub mod json;

pub use headers::derive_headers;

use crate::domain::record::RecordSet;
use crate::domain::source::Source;
use crate::domain::Result;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Comma-separated values with a single header row
    Csv,

    /// Indented JSON array of mappings
    Json,
}

impl OutputFormat {
    /// File extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {s}. Valid formats: csv, json")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Writes one source's record set to the output directory
///
/// Returns the path of the written file, or `None` when the record set was
/// empty and nothing was written. The output directory is created on the
/// first actual write.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created or written.
pub fn write_record_set(
    output_dir: &Path,
    source: &Source,
    format: OutputFormat,
    records: &RecordSet,
) -> Result<Option<PathBuf>> {
    if records.is_empty() {
        return Ok(None);
    }

    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(source.output_file_name(format.extension()));

    match format {
        OutputFormat::Csv => {
            let headers = derive_headers(records);
            csv::write_csv(&path, &headers, records)?;
        }
        OutputFormat::Json => json::write_json(&path, records)?,
    }

    Ok(Some(path))
}
