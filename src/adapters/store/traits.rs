//! Document store traits
//!
//! This module defines the read-only interface that document store adapters
//! must implement to serve the export traversal.

use crate::domain::ids::{CollectionId, DocumentId};
use crate::domain::record::Record;
use crate::domain::Result;
use async_trait::async_trait;

/// One document read from the store
///
/// Fields are decoded into plain JSON values, preserving the order the
/// server returned them in.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    /// Document identifier (the final segment of its path)
    pub id: DocumentId,

    /// Decoded field mapping
    pub fields: Record,
}

impl StoredDocument {
    /// Creates a stored document from an identifier and its fields
    pub fn new(id: DocumentId, fields: Record) -> Self {
        Self { id, fields }
    }
}

/// Document store trait for read-only traversal
///
/// This trait defines the four operations the export traversal needs. All
/// operations are reads; implementations must never mutate the store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Verify that the store is reachable and the credentials are accepted
    ///
    /// Called once at startup, before any traversal begins.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached or rejects the
    /// credentials.
    async fn verify_connection(&self) -> Result<()>;

    /// List the identifiers of every document in a top-level collection
    ///
    /// Includes parents that exist only as subcollection anchors without
    /// any fields of their own.
    ///
    /// # Arguments
    ///
    /// * `collection` - Top-level collection to enumerate
    ///
    /// # Errors
    ///
    /// Returns an error if the listing fails; a failure here aborts the
    /// source the caller is traversing.
    async fn list_children(&self, collection: &CollectionId) -> Result<Vec<DocumentId>>;

    /// Fetch every document in one parent's subcollection
    ///
    /// # Arguments
    ///
    /// * `collection` - Top-level collection holding the parent
    /// * `parent` - Parent document identifier
    /// * `subcollection` - Subcollection name under the parent
    ///
    /// # Returns
    ///
    /// Returns the documents in server order. An empty subcollection yields
    /// an empty vector, not an error.
    async fn fetch_documents(
        &self,
        collection: &CollectionId,
        parent: &DocumentId,
        subcollection: &CollectionId,
    ) -> Result<Vec<StoredDocument>>;

    /// Read a single document by identifier
    ///
    /// # Arguments
    ///
    /// * `collection` - Top-level collection holding the document
    /// * `id` - Document identifier
    ///
    /// # Returns
    ///
    /// Returns `Ok(Some(document))` if found, `Ok(None)` if the document
    /// does not exist.
    async fn read_node(
        &self,
        collection: &CollectionId,
        id: &DocumentId,
    ) -> Result<Option<StoredDocument>>;
}
