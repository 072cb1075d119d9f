//! Identifier audit
//!
//! This module screens a collection for document identifiers whose length
//! deviates from the expected one. Hand-entered or imported identifiers
//! tend to be the wrong length, and catching them before an export keeps
//! join keys consistent downstream. The audit only lists identifiers; it
//! never reads document fields.

use crate::adapters::store::DocumentStore;
use crate::domain::ids::{CollectionId, DocumentId};
use crate::domain::Result;
use tracing::debug;

/// Result of one identifier audit
#[derive(Debug, Clone)]
pub struct AuditReport {
    /// Collection that was screened
    pub collection: CollectionId,

    /// Expected identifier length in characters
    pub expected_length: usize,

    /// Number of identifiers screened
    pub total: usize,

    /// Identifiers whose length deviates, in listing order
    pub mismatched: Vec<DocumentId>,
}

impl AuditReport {
    /// Check whether every identifier had the expected length
    pub fn is_clean(&self) -> bool {
        self.mismatched.is_empty()
    }
}

/// Screens every document identifier in a collection
///
/// # Errors
///
/// Returns an error if the collection cannot be listed.
pub async fn audit_identifiers(
    store: &dyn DocumentStore,
    collection: &CollectionId,
    expected_length: usize,
) -> Result<AuditReport> {
    let ids = store.list_children(collection).await?;
    let total = ids.len();

    let mismatched: Vec<DocumentId> = ids
        .into_iter()
        .filter(|id| id.len() != expected_length)
        .collect();

    debug!(
        collection = %collection,
        total = total,
        mismatched = mismatched.len(),
        "Identifier audit finished"
    );

    Ok(AuditReport {
        collection: collection.clone(),
        expected_length,
        total,
        mismatched,
    })
}
