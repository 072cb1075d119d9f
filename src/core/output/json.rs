//! JSON writing
//!
//! Writes a record set as one indented JSON array of mappings. Unlike the
//! tabular form, each record keeps its own key order and absent keys are
//! simply absent, so a JSON export round-trips the collected records
//! exactly.

use crate::domain::record::RecordSet;
use crate::domain::Result;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes a record set as an indented JSON file at `path`, replacing any
/// existing file
pub fn write_json(path: &Path, records: &RecordSet) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = BufWriter::new(file);

    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    records.records().serialize(&mut serializer)?;

    writer.flush()?;
    Ok(())
}
