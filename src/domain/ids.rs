//! Domain identifier types with validation
//!
//! This module provides newtype wrappers for the identifiers that make up
//! document store paths. Each type ensures type safety and validates the
//! characters a path segment may carry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Collection identifier newtype wrapper
///
/// Represents the name of a collection or subcollection — a single path
/// segment, so it must not contain `/`.
///
/// # Examples
///
/// ```
/// use quarry::domain::ids::CollectionId;
/// use std::str::FromStr;
///
/// let collection = CollectionId::from_str("participants").unwrap();
/// assert_eq!(collection.as_str(), "participants");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollectionId(String);

impl CollectionId {
    /// Creates a new CollectionId from a string
    ///
    /// # Arguments
    ///
    /// * `id` - The collection name
    ///
    /// # Returns
    ///
    /// Returns `Ok(CollectionId)` if the name is valid, `Err` otherwise
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Collection ID cannot be empty".to_string());
        }
        if id.contains('/') {
            return Err(format!(
                "Collection ID must be a single path segment, got: {}",
                id
            ));
        }
        Ok(Self(id))
    }

    /// Returns the collection name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CollectionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for CollectionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Document identifier newtype wrapper
///
/// Represents a document's identifier within its collection. Document store
/// backends assign these (auto-ids or caller-chosen keys); Quarry only
/// requires them to be non-empty single path segments.
///
/// # Examples
///
/// ```
/// use quarry::domain::ids::DocumentId;
/// use std::str::FromStr;
///
/// let id = DocumentId::from_str("5f7b1a2c9d8e4f0312345678").unwrap();
/// assert_eq!(id.as_str(), "5f7b1a2c9d8e4f0312345678");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(String);

impl DocumentId {
    /// Creates a new DocumentId from a string
    ///
    /// # Arguments
    ///
    /// * `id` - The document identifier string
    ///
    /// # Returns
    ///
    /// Returns `Ok(DocumentId)` if the ID is valid, `Err` otherwise
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Document ID cannot be empty".to_string());
        }
        if id.contains('/') {
            return Err(format!(
                "Document ID must be a single path segment, got: {}",
                id
            ));
        }
        Ok(Self(id))
    }

    /// Returns the document ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Number of characters in the identifier
    ///
    /// Used by the audit command to screen identifiers against an
    /// expected length.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    /// True when the identifier has no characters
    ///
    /// Cannot occur for a validated DocumentId; provided to pair with
    /// [`len`](Self::len).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DocumentId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_id_creation() {
        let id = CollectionId::new("participants").unwrap();
        assert_eq!(id.as_str(), "participants");
    }

    #[test]
    fn test_collection_id_empty_fails() {
        assert!(CollectionId::new("").is_err());
        assert!(CollectionId::new("   ").is_err());
    }

    #[test]
    fn test_collection_id_slash_fails() {
        assert!(CollectionId::new("participants/trials").is_err());
    }

    #[test]
    fn test_collection_id_display() {
        let id = CollectionId::new("trials").unwrap();
        assert_eq!(format!("{}", id), "trials");
    }

    #[test]
    fn test_collection_id_from_str() {
        let id: CollectionId = "participants".parse().unwrap();
        assert_eq!(id.as_str(), "participants");
    }

    #[test]
    fn test_document_id_creation() {
        let id = DocumentId::new("5f7b1a2c9d8e4f0312345678").unwrap();
        assert_eq!(id.as_str(), "5f7b1a2c9d8e4f0312345678");
    }

    #[test]
    fn test_document_id_empty_fails() {
        assert!(DocumentId::new("").is_err());
        assert!(DocumentId::new("  ").is_err());
    }

    #[test]
    fn test_document_id_slash_fails() {
        assert!(DocumentId::new("a/b").is_err());
    }

    #[test]
    fn test_document_id_len() {
        let id = DocumentId::new("5f7b1a2c9d8e4f0312345678").unwrap();
        assert_eq!(id.len(), 24);
        assert!(!id.is_empty());
    }

    #[test]
    fn test_document_id_serialization() {
        let id = DocumentId::new("abc123").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: DocumentId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
