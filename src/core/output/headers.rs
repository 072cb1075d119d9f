//! Header derivation for tabular output
//!
//! A record set's header set is the union of every key across its records.
//! The two synthetic identifier columns are pinned to the front so related
//! rows line up across files; all other columns follow in lexicographic
//! order, independent of per-record key order.

use crate::domain::record::{RecordSet, DOCUMENT_ID_FIELD, PARENT_ID_FIELD};
use std::collections::BTreeSet;

/// Derives the ordered header set for a record set
pub fn derive_headers(records: &RecordSet) -> Vec<String> {
    let mut rest = BTreeSet::new();
    let mut has_parent = false;
    let mut has_document = false;

    for record in records {
        for key in record.keys() {
            match key.as_str() {
                PARENT_ID_FIELD => has_parent = true,
                DOCUMENT_ID_FIELD => has_document = true,
                _ => {
                    if !rest.contains(key) {
                        rest.insert(key.clone());
                    }
                }
            }
        }
    }

    let mut headers = Vec::with_capacity(rest.len() + 2);
    if has_parent {
        headers.push(PARENT_ID_FIELD.to_string());
    }
    if has_document {
        headers.push(DOCUMENT_ID_FIELD.to_string());
    }
    headers.extend(rest);
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::Record;
    use serde_json::json;

    fn record(pairs: &[(&str, serde_json::Value)]) -> Record {
        let mut record = Record::new();
        for (key, value) in pairs {
            record.insert((*key).to_string(), value.clone());
        }
        record
    }

    #[test]
    fn test_identifiers_pinned_then_lexicographic() {
        let mut records = RecordSet::new();
        records.push(record(&[
            ("zeta", json!(1)),
            ("parent_document_id", json!("p1")),
            ("document_id", json!("d1")),
            ("alpha", json!(2)),
        ]));

        assert_eq!(
            derive_headers(&records),
            vec!["parent_document_id", "document_id", "alpha", "zeta"]
        );
    }

    #[test]
    fn test_union_across_records() {
        let mut records = RecordSet::new();
        records.push(record(&[("a", json!(1)), ("b", json!(2))]));
        records.push(record(&[("b", json!(3)), ("c", json!(4))]));

        assert_eq!(derive_headers(&records), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_set_yields_no_headers() {
        assert!(derive_headers(&RecordSet::new()).is_empty());
    }

    #[test]
    fn test_identifiers_absent_when_untagged() {
        let mut records = RecordSet::new();
        records.push(record(&[("only", json!(true))]));

        assert_eq!(derive_headers(&records), vec!["only"]);
    }
}
