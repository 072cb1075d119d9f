//! CSV writing
//!
//! One row per record under a single header row. Cells are rendered from
//! JSON values: strings appear bare, numbers and booleans in their display
//! form, and nested arrays or mappings as compact JSON. A key absent from a
//! record leaves its cell empty, as does an explicit null.

use crate::domain::record::RecordSet;
use crate::domain::Result;
use csv::Writer;
use serde_json::Value;
use std::path::Path;

/// Writes a record set as a CSV file at `path`, replacing any existing file
pub fn write_csv(path: &Path, headers: &[String], records: &RecordSet) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = Writer::from_writer(file);

    writer.write_record(headers)?;

    for record in records {
        let row: Vec<String> = headers
            .iter()
            .map(|header| render_cell(record.get(header)))
            .collect();
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

/// Renders one cell value
fn render_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    }
}
