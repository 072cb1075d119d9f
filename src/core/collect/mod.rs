//! Record collection
//!
//! This module walks one source's structure in the document store and
//! flattens it into a set of tagged records. Two shapes are supported:
//! documents in a subcollection under each parent, and arrays of mappings
//! embedded in each parent's fields.
//!
//! Failures are scoped: a failed collection listing aborts the source,
//! while a failed parent read or a malformed record is skipped with a
//! warning so the rest of the source still exports.

use crate::adapters::store::DocumentStore;
use crate::domain::record::{tag_record, value_kind, RecordSet};
use crate::domain::source::{ArrayLocation, FieldPath, Source, SourceShape};
use crate::domain::{Record, Result};
use serde_json::Value;
use tracing::{debug, warn};

/// Collects every record of one source into a flat, tagged record set
///
/// Parents are visited in listing order and each parent's records keep the
/// order the store returned them in. Every record is tagged with the
/// identifiers of its parent document and of itself.
///
/// # Errors
///
/// Returns an error if the parent collection cannot be listed; that aborts
/// this source. Failures under a single parent are logged and skipped.
pub async fn collect_source(store: &dyn DocumentStore, source: &Source) -> Result<RecordSet> {
    let parents = store.list_children(&source.collection).await?;

    debug!(
        source = %source.name,
        collection = %source.collection,
        parents = parents.len(),
        "Collecting source"
    );

    let mut records = RecordSet::new();

    for (index, parent) in parents.iter().enumerate() {
        crate::log_walk_progress!(index + 1, parents.len());

        match &source.shape {
            SourceShape::Subcollection { collection } => {
                let documents = match store
                    .fetch_documents(&source.collection, parent, collection)
                    .await
                {
                    Ok(documents) => documents,
                    Err(e) => {
                        warn!(
                            parent_id = %parent,
                            error = %e,
                            "Skipping parent: subcollection fetch failed"
                        );
                        continue;
                    }
                };

                for document in documents {
                    records.push(tag_record(document.fields, parent, document.id.as_str()));
                }
            }
            SourceShape::Array { location, summary } => {
                let node = match store.read_node(&source.collection, parent).await {
                    Ok(Some(node)) => node,
                    Ok(None) => {
                        debug!(parent_id = %parent, "Parent listed but no longer readable");
                        continue;
                    }
                    Err(e) => {
                        warn!(parent_id = %parent, error = %e, "Skipping parent: read failed");
                        continue;
                    }
                };

                let Some(elements) = locate_array(&node.fields, location) else {
                    debug!(
                        parent_id = %parent,
                        field = location.field(),
                        "Parent has no record array"
                    );
                    continue;
                };

                for (index, element) in elements.iter().enumerate() {
                    match element.as_object() {
                        Some(fields) => {
                            records.push(tag_record(fields.clone(), parent, index.to_string()));
                        }
                        None => {
                            warn!(
                                parent_id = %parent,
                                index = index,
                                kind = value_kind(element),
                                "Skipping non-mapping array element"
                            );
                        }
                    }
                }

                if let Some(path) = summary {
                    if let Some(summary_fields) = lookup_summary(&node.fields, path) {
                        records.push(tag_record(
                            summary_fields.clone(),
                            parent,
                            path.sentinel(),
                        ));
                    }
                }
            }
        }
    }

    debug!(
        source = %source.name,
        records = records.len(),
        "Source collected"
    );

    Ok(records)
}

/// Finds the record array in a parent's fields, if present
fn locate_array<'a>(fields: &'a Record, location: &ArrayLocation) -> Option<&'a Vec<Value>> {
    match location {
        ArrayLocation::Direct { field } => fields.get(field)?.as_array(),
        ArrayLocation::Wrapped { field, key } => {
            fields.get(field)?.as_object()?.get(key)?.as_array()
        }
    }
}

/// Resolves a summary path to a non-empty mapping, if present
///
/// Anything else at the path (a scalar, an array, an empty mapping, or
/// nothing at all) yields no summary record.
fn lookup_summary<'a>(fields: &'a Record, path: &FieldPath) -> Option<&'a Record> {
    let mut segments = path.segments().iter();
    let mut current = fields.get(segments.next()?)?;

    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }

    match current.as_object() {
        Some(mapping) if !mapping.is_empty() => Some(mapping),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::store::StoredDocument;
    use crate::domain::ids::{CollectionId, DocumentId};
    use crate::domain::record::{DOCUMENT_ID_FIELD, PARENT_ID_FIELD};
    use crate::domain::{QuarryError, StoreError};
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::{HashMap, HashSet};

    /// In-memory store serving canned documents, with per-parent failures
    #[derive(Default)]
    struct InMemoryStore {
        children: Vec<DocumentId>,
        subcollections: HashMap<String, Vec<StoredDocument>>,
        nodes: HashMap<String, StoredDocument>,
        fail_parents: HashSet<String>,
    }

    impl InMemoryStore {
        fn with_children(ids: &[&str]) -> Self {
            Self {
                children: ids
                    .iter()
                    .map(|id| DocumentId::new(*id).unwrap())
                    .collect(),
                ..Default::default()
            }
        }

        fn stored(id: &str, fields: serde_json::Value) -> StoredDocument {
            let fields = match fields {
                serde_json::Value::Object(map) => map,
                other => panic!("expected object, got {other:?}"),
            };
            StoredDocument::new(DocumentId::new(id).unwrap(), fields)
        }
    }

    #[async_trait]
    impl DocumentStore for InMemoryStore {
        async fn verify_connection(&self) -> Result<()> {
            Ok(())
        }

        async fn list_children(&self, _collection: &CollectionId) -> Result<Vec<DocumentId>> {
            Ok(self.children.clone())
        }

        async fn fetch_documents(
            &self,
            _collection: &CollectionId,
            parent: &DocumentId,
            _subcollection: &CollectionId,
        ) -> Result<Vec<StoredDocument>> {
            if self.fail_parents.contains(parent.as_str()) {
                return Err(QuarryError::Store(StoreError::RequestFailed {
                    status: 500,
                    message: "boom".to_string(),
                }));
            }
            Ok(self
                .subcollections
                .get(parent.as_str())
                .cloned()
                .unwrap_or_default())
        }

        async fn read_node(
            &self,
            _collection: &CollectionId,
            id: &DocumentId,
        ) -> Result<Option<StoredDocument>> {
            if self.fail_parents.contains(id.as_str()) {
                return Err(QuarryError::Store(StoreError::RequestFailed {
                    status: 500,
                    message: "boom".to_string(),
                }));
            }
            Ok(self.nodes.get(id.as_str()).cloned())
        }
    }

    fn subcollection_source() -> Source {
        Source {
            name: "trials".to_string(),
            collection: CollectionId::new("participants").unwrap(),
            shape: SourceShape::Subcollection {
                collection: CollectionId::new("trials").unwrap(),
            },
            output: None,
        }
    }

    fn array_source(summary: Option<&str>) -> Source {
        Source {
            name: "trial_entries".to_string(),
            collection: CollectionId::new("participants").unwrap(),
            shape: SourceShape::Array {
                location: ArrayLocation::Direct {
                    field: "trials".to_string(),
                },
                summary: summary.map(|s| FieldPath::parse(s).unwrap()),
            },
            output: None,
        }
    }

    #[tokio::test]
    async fn test_collect_subcollection_tags_and_orders() {
        let mut store = InMemoryStore::with_children(&["p1", "p2"]);
        store.subcollections.insert(
            "p1".to_string(),
            vec![
                InMemoryStore::stored("t1", json!({"score": 1})),
                InMemoryStore::stored("t2", json!({"score": 2})),
            ],
        );
        store.subcollections.insert(
            "p2".to_string(),
            vec![InMemoryStore::stored("t9", json!({"score": 9}))],
        );

        let records = collect_source(&store, &subcollection_source())
            .await
            .unwrap();

        assert_eq!(records.len(), 3);
        let tags: Vec<(&str, &str)> = records
            .iter()
            .map(|r| {
                (
                    r[PARENT_ID_FIELD].as_str().unwrap(),
                    r[DOCUMENT_ID_FIELD].as_str().unwrap(),
                )
            })
            .collect();
        assert_eq!(tags, vec![("p1", "t1"), ("p1", "t2"), ("p2", "t9")]);
    }

    #[tokio::test]
    async fn test_collect_subcollection_skips_failed_parent() {
        let mut store = InMemoryStore::with_children(&["p1", "p2"]);
        store.fail_parents.insert("p1".to_string());
        store.subcollections.insert(
            "p2".to_string(),
            vec![InMemoryStore::stored("t1", json!({"score": 1}))],
        );

        let records = collect_source(&store, &subcollection_source())
            .await
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records.iter().next().unwrap()[PARENT_ID_FIELD], json!("p2"));
    }

    #[tokio::test]
    async fn test_collect_array_positional_ids() {
        let mut store = InMemoryStore::with_children(&["p1"]);
        store.nodes.insert(
            "p1".to_string(),
            InMemoryStore::stored(
                "p1",
                json!({"trials": [{"score": 1}, {"score": 2}]}),
            ),
        );

        let records = collect_source(&store, &array_source(None)).await.unwrap();

        assert_eq!(records.len(), 2);
        let ids: Vec<&str> = records
            .iter()
            .map(|r| r[DOCUMENT_ID_FIELD].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["0", "1"]);
    }

    #[tokio::test]
    async fn test_collect_array_skips_non_mapping_elements() {
        let mut store = InMemoryStore::with_children(&["p1"]);
        store.nodes.insert(
            "p1".to_string(),
            InMemoryStore::stored("p1", json!({"trials": [42, {"score": 2}, "x"]})),
        );

        let records = collect_source(&store, &array_source(None)).await.unwrap();

        // The kept element keeps its array position
        assert_eq!(records.len(), 1);
        let record = records.iter().next().unwrap();
        assert_eq!(record[DOCUMENT_ID_FIELD], json!("1"));
        assert_eq!(record["score"], json!(2));
    }

    #[tokio::test]
    async fn test_collect_array_wrapped_location() {
        let mut store = InMemoryStore::with_children(&["p1"]);
        store.nodes.insert(
            "p1".to_string(),
            InMemoryStore::stored(
                "p1",
                json!({"session": {"entries": [{"score": 5}]}}),
            ),
        );

        let source = Source {
            shape: SourceShape::Array {
                location: ArrayLocation::Wrapped {
                    field: "session".to_string(),
                    key: "entries".to_string(),
                },
                summary: None,
            },
            ..array_source(None)
        };

        let records = collect_source(&store, &source).await.unwrap();
        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn test_collect_array_appends_summary() {
        let mut store = InMemoryStore::with_children(&["p1"]);
        store.nodes.insert(
            "p1".to_string(),
            InMemoryStore::stored(
                "p1",
                json!({
                    "trials": [{"score": 1}],
                    "summary": {"final": {"accuracy": 0.8}}
                }),
            ),
        );

        let records = collect_source(&store, &array_source(Some("summary.final")))
            .await
            .unwrap();

        assert_eq!(records.len(), 2);
        let summary = records.iter().last().unwrap();
        assert_eq!(summary[DOCUMENT_ID_FIELD], json!("final"));
        assert_eq!(summary["accuracy"], json!(0.8));
    }

    #[tokio::test]
    async fn test_collect_array_skips_empty_or_missing_summary() {
        let mut store = InMemoryStore::with_children(&["p1", "p2"]);
        store.nodes.insert(
            "p1".to_string(),
            InMemoryStore::stored(
                "p1",
                json!({"trials": [{"score": 1}], "summary": {"final": {}}}),
            ),
        );
        store.nodes.insert(
            "p2".to_string(),
            InMemoryStore::stored("p2", json!({"trials": [{"score": 2}]})),
        );

        let records = collect_source(&store, &array_source(Some("summary.final")))
            .await
            .unwrap();

        assert_eq!(records.len(), 2);
        for record in &records {
            assert!(record.contains_key("score"));
        }
    }

    #[tokio::test]
    async fn test_collect_array_parent_without_array_contributes_nothing() {
        let mut store = InMemoryStore::with_children(&["p1", "p2"]);
        store.nodes.insert(
            "p1".to_string(),
            InMemoryStore::stored("p1", json!({"group": "control"})),
        );
        store.nodes.insert(
            "p2".to_string(),
            InMemoryStore::stored("p2", json!({"trials": [{"score": 2}]})),
        );

        let records = collect_source(&store, &array_source(None)).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records.iter().next().unwrap()[PARENT_ID_FIELD], json!("p2"));
    }

    #[tokio::test]
    async fn test_collect_array_skips_unreadable_parent() {
        let mut store = InMemoryStore::with_children(&["p1", "p2", "p3"]);
        store.fail_parents.insert("p1".to_string());
        // p2 listed but has no node at all
        store.nodes.insert(
            "p3".to_string(),
            InMemoryStore::stored("p3", json!({"trials": [{"score": 3}]})),
        );

        let records = collect_source(&store, &array_source(None)).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records.iter().next().unwrap()[PARENT_ID_FIELD], json!("p3"));
    }

    #[tokio::test]
    async fn test_collect_preserves_existing_parent_tag() {
        let mut store = InMemoryStore::with_children(&["p1"]);
        store.nodes.insert(
            "p1".to_string(),
            InMemoryStore::stored(
                "p1",
                json!({"trials": [{"parent_document_id": "imported", "document_id": "stale"}]}),
            ),
        );

        let records = collect_source(&store, &array_source(None)).await.unwrap();

        let record = records.iter().next().unwrap();
        // A pre-existing parent tag wins; the document tag is always ours
        assert_eq!(record[PARENT_ID_FIELD], json!("imported"));
        assert_eq!(record[DOCUMENT_ID_FIELD], json!("0"));
    }

    #[tokio::test]
    async fn test_collect_empty_collection() {
        let store = InMemoryStore::with_children(&[]);
        let records = collect_source(&store, &subcollection_source())
            .await
            .unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_collect_propagates_listing_failure() {
        struct FailingStore;

        #[async_trait]
        impl DocumentStore for FailingStore {
            async fn verify_connection(&self) -> Result<()> {
                Ok(())
            }

            async fn list_children(&self, _c: &CollectionId) -> Result<Vec<DocumentId>> {
                Err(QuarryError::Store(StoreError::RequestFailed {
                    status: 503,
                    message: "unavailable".to_string(),
                }))
            }

            async fn fetch_documents(
                &self,
                _c: &CollectionId,
                _p: &DocumentId,
                _s: &CollectionId,
            ) -> Result<Vec<StoredDocument>> {
                unreachable!()
            }

            async fn read_node(
                &self,
                _c: &CollectionId,
                _id: &DocumentId,
            ) -> Result<Option<StoredDocument>> {
                unreachable!()
            }
        }

        let result = collect_source(&FailingStore, &subcollection_source()).await;
        assert!(result.is_err());
    }
}
