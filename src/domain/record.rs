//! Flattened record types
//!
//! A [`Record`] is one flattened unit of exported data: a mapping from field
//! name to a closed set of value kinds (string, number, boolean, null, list,
//! mapping). Records keep the key order they were built with, which is why
//! `serde_json` runs with the `preserve_order` feature. A [`RecordSet`] is
//! the insertion-ordered sequence of Records accumulated for one source,
//! consumed exactly once by a writer.
//!
//! Every emitted Record carries two synthetic fields, applied by
//! [`tag_record`]: [`PARENT_ID_FIELD`] names the owning top-level document
//! and [`DOCUMENT_ID_FIELD`] identifies the record within it.

use serde_json::{Map, Value};

use super::ids::DocumentId;

/// Synthetic field naming the owning top-level document
pub const PARENT_ID_FIELD: &str = "parent_document_id";

/// Synthetic field identifying the record within its parent
pub const DOCUMENT_ID_FIELD: &str = "document_id";

/// One flattened unit of exported data
///
/// Field values span the full closed set of kinds `serde_json::Value`
/// offers; nested lists and mappings are allowed and are rendered as compact
/// JSON in tabular output.
pub type Record = Map<String, Value>;

/// An insertion-ordered sequence of [`Record`]s for one source
///
/// Created empty, grown by traversal, consumed once by the writer, then
/// discarded. There is no persistence beyond the output file.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordSet {
    records: Vec<Record>,
}

impl RecordSet {
    /// Creates an empty record set
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record, keeping insertion order
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Number of records collected so far
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no records were collected
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates the records in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Borrows the records as a slice
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Consumes self and returns the inner records
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl IntoIterator for RecordSet {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl FromIterator<Record> for RecordSet {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

/// Tags a record with its synthetic identifier fields
///
/// `parent_document_id` is inserted only when the data does not already
/// carry that key — an explicit value in the source wins. `document_id` is
/// always set; when the key already exists its value is replaced in place,
/// keeping the record's original key order.
pub fn tag_record(
    mut fields: Record,
    parent_id: &DocumentId,
    document_id: impl Into<String>,
) -> Record {
    if !fields.contains_key(PARENT_ID_FIELD) {
        fields.insert(
            PARENT_ID_FIELD.to_string(),
            Value::String(parent_id.to_string()),
        );
    }
    fields.insert(
        DOCUMENT_ID_FIELD.to_string(),
        Value::String(document_id.into()),
    );
    fields
}

/// Human-readable name of a value's kind, for log messages
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record_from(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_tag_record_inserts_both_fields() {
        let parent = DocumentId::new("p1").unwrap();
        let record = tag_record(record_from(json!({"score": 5})), &parent, "t1");

        assert_eq!(record[PARENT_ID_FIELD], json!("p1"));
        assert_eq!(record[DOCUMENT_ID_FIELD], json!("t1"));
        assert_eq!(record["score"], json!(5));
    }

    #[test]
    fn test_tag_record_preserves_existing_parent_id() {
        let parent = DocumentId::new("p1").unwrap();
        let record = tag_record(
            record_from(json!({"parent_document_id": "explicit", "score": 5})),
            &parent,
            "t1",
        );

        assert_eq!(record[PARENT_ID_FIELD], json!("explicit"));
    }

    #[test]
    fn test_tag_record_overwrites_document_id_in_place() {
        let parent = DocumentId::new("p1").unwrap();
        let record = tag_record(
            record_from(json!({"a": 1, "document_id": "stale", "b": 2})),
            &parent,
            "fresh",
        );

        assert_eq!(record[DOCUMENT_ID_FIELD], json!("fresh"));
        let keys: Vec<&str> = record.keys().map(String::as_str).collect();
        // document_id keeps its original position; parent_document_id appends
        assert_eq!(keys, vec!["a", "document_id", "b", "parent_document_id"]);
    }

    #[test]
    fn test_tag_record_appends_in_order() {
        let parent = DocumentId::new("p1").unwrap();
        let record = tag_record(record_from(json!({"z": 1, "a": 2})), &parent, "0");

        let keys: Vec<&str> = record.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "parent_document_id", "document_id"]);
    }

    #[test]
    fn test_record_set_accumulates_in_order() {
        let mut set = RecordSet::new();
        assert!(set.is_empty());

        set.push(record_from(json!({"n": 1})));
        set.push(record_from(json!({"n": 2})));

        assert_eq!(set.len(), 2);
        let values: Vec<i64> = set.iter().map(|r| r["n"].as_i64().unwrap()).collect();
        assert_eq!(values, vec![1, 2]);
    }

    #[test]
    fn test_record_set_from_iterator() {
        let set: RecordSet = vec![record_from(json!({"n": 1})), record_from(json!({"n": 2}))]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_value_kind_names() {
        assert_eq!(value_kind(&json!(null)), "null");
        assert_eq!(value_kind(&json!(true)), "boolean");
        assert_eq!(value_kind(&json!(1.5)), "number");
        assert_eq!(value_kind(&json!("s")), "string");
        assert_eq!(value_kind(&json!([1])), "array");
        assert_eq!(value_kind(&json!({"k": 1})), "mapping");
    }
}
