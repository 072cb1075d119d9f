//! Firestore REST API models
//!
//! This module defines the wire structures for the Firestore v1 REST API and
//! the decoder that unwraps its typed value envelopes into plain JSON values.
//! These models are separate from domain models and handle Firestore's
//! serialization format only.

use crate::domain::errors::StoreError;
use crate::domain::ids::DocumentId;
use crate::domain::record::Record;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One document resource as returned by the REST API
///
/// Fields arrive as typed envelopes, e.g.
/// `{"age": {"integerValue": "42"}}`. Parents that exist only as
/// subcollection anchors arrive with no `fields` member at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentResource {
    /// Full resource name:
    /// `projects/{project}/databases/{database}/documents/{path}`
    pub name: String,

    /// Typed field envelopes, in server order
    #[serde(default)]
    pub fields: Map<String, Value>,

    /// Creation timestamp
    #[serde(rename = "createTime", default)]
    pub create_time: Option<String>,

    /// Last update timestamp
    #[serde(rename = "updateTime", default)]
    pub update_time: Option<String>,
}

impl DocumentResource {
    /// Extracts the document identifier from the resource name
    ///
    /// The identifier is the final segment of the full resource path.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource name has no usable final segment.
    pub fn document_id(&self) -> Result<DocumentId, StoreError> {
        let segment = self.name.rsplit('/').next().unwrap_or("");
        DocumentId::new(segment).map_err(|e| StoreError::MalformedDocument {
            path: self.name.clone(),
            reason: e,
        })
    }

    /// Decodes the typed field envelopes into a plain field mapping
    ///
    /// Field order is preserved. A document with no fields decodes to an
    /// empty mapping.
    ///
    /// # Errors
    ///
    /// Returns an error if any envelope is structurally invalid or uses an
    /// unknown value kind.
    pub fn decode_fields(&self) -> Result<Record, StoreError> {
        let mut record = Record::new();
        for (key, envelope) in &self.fields {
            let value =
                decode_value(envelope).map_err(|reason| StoreError::MalformedDocument {
                    path: self.name.clone(),
                    reason: format!("field '{key}': {reason}"),
                })?;
            record.insert(key.clone(), value);
        }
        Ok(record)
    }
}

/// Response of the `documents.list` method
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListDocumentsResponse {
    /// Documents in this page
    #[serde(default)]
    pub documents: Vec<DocumentResource>,

    /// Token for the next page, absent on the last page
    #[serde(rename = "nextPageToken", default)]
    pub next_page_token: Option<String>,
}

/// Response of the `documents.listCollectionIds` method
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListCollectionIdsResponse {
    /// Collection IDs in this page
    #[serde(rename = "collectionIds", default)]
    pub collection_ids: Vec<String>,

    /// Token for the next page, absent on the last page
    #[serde(rename = "nextPageToken", default)]
    pub next_page_token: Option<String>,
}

/// Unwraps one typed value envelope into a plain JSON value
///
/// Firestore encodes every value as a single-key object naming its kind.
/// Arrays and maps nest further envelopes and are decoded recursively.
/// Int64 values arrive string-encoded and are parsed back to numbers; a
/// value outside the i64 range is kept as its raw string form.
fn decode_value(envelope: &Value) -> Result<Value, String> {
    let object = envelope
        .as_object()
        .ok_or_else(|| "value envelope is not an object".to_string())?;

    let (kind, inner) = match object.iter().next() {
        Some(entry) if object.len() == 1 => entry,
        Some(_) => {
            return Err(format!(
                "ambiguous value envelope with {} kinds",
                object.len()
            ))
        }
        None => return Err("empty value envelope".to_string()),
    };

    match kind.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" => match inner {
            Value::Bool(_) => Ok(inner.clone()),
            _ => Err("booleanValue is not a boolean".to_string()),
        },
        "integerValue" => match inner {
            Value::String(s) => match s.parse::<i64>() {
                Ok(n) => Ok(Value::from(n)),
                Err(_) => Ok(inner.clone()),
            },
            Value::Number(_) => Ok(inner.clone()),
            _ => Err("integerValue is neither a string nor a number".to_string()),
        },
        "doubleValue" => match inner {
            Value::Number(_) => Ok(inner.clone()),
            // NaN and infinities arrive as strings; JSON numbers
            // cannot represent them
            Value::String(_) => Ok(inner.clone()),
            _ => Err("doubleValue is neither a number nor a string".to_string()),
        },
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => match inner {
            Value::String(_) => Ok(inner.clone()),
            _ => Err(format!("{kind} is not a string")),
        },
        "geoPointValue" => match inner {
            Value::Object(_) => Ok(inner.clone()),
            _ => Err("geoPointValue is not an object".to_string()),
        },
        "arrayValue" => {
            let values = inner
                .as_object()
                .ok_or_else(|| "arrayValue is not an object".to_string())?
                .get("values")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            let decoded: Result<Vec<Value>, String> = values.iter().map(decode_value).collect();
            Ok(Value::Array(decoded?))
        }
        "mapValue" => {
            let fields = inner
                .as_object()
                .ok_or_else(|| "mapValue is not an object".to_string())?
                .get("fields")
                .and_then(Value::as_object);
            let mut decoded = Map::new();
            if let Some(fields) = fields {
                for (key, nested) in fields {
                    decoded.insert(key.clone(), decode_value(nested)?);
                }
            }
            Ok(Value::Object(decoded))
        }
        other => Err(format!("unsupported value kind '{other}'")),
    }
}
