//! Domain models and types for Quarry.
//!
//! This module contains the core domain models, types, and rules the export
//! pipeline is built from. Nothing here touches the network or the
//! filesystem.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`CollectionId`], [`DocumentId`])
//! - **Record types** ([`Record`], [`RecordSet`] and the synthetic-field
//!   tagging in [`record`])
//! - **Source descriptors** ([`Source`], [`SourceShape`], [`ArrayLocation`])
//! - **Error types** ([`QuarryError`], [`StoreError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Quarry uses the newtype pattern for path segments so collection names and
//! document identifiers cannot be mixed up:
//!
//! ```rust
//! use quarry::domain::{CollectionId, DocumentId};
//!
//! # fn example() -> Result<(), String> {
//! let collection = CollectionId::new("participants")?;
//! let document = DocumentId::new("5f7b1a2c9d8e4f0312345678")?;
//!
//! // This won't compile - type safety prevents mixing identifiers
//! // let wrong: CollectionId = document;  // Compile error!
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T>`]:
//!
//! ```rust
//! use quarry::domain::{QuarryError, Result};
//!
//! fn example(raw: &str) -> Result<serde_json::Value> {
//!     // Errors are converted automatically by the ? operator
//!     let value = serde_json::from_str(raw)?;
//!     Ok(value)
//! }
//! ```

pub mod errors;
pub mod ids;
pub mod record;
pub mod result;
pub mod source;

// Re-export commonly used types for convenience
pub use errors::{QuarryError, StoreError};
pub use ids::{CollectionId, DocumentId};
pub use record::{tag_record, value_kind, Record, RecordSet, DOCUMENT_ID_FIELD, PARENT_ID_FIELD};
pub use result::Result;
pub use source::{ArrayLocation, FieldPath, Source, SourceShape};
