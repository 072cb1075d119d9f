//! Document store abstraction layer
//!
//! This module provides a trait-based abstraction for the hosted document
//! database, allowing the export traversal to run against the real Firestore
//! backend or an in-memory store in tests.

pub mod traits;

pub use traits::{DocumentStore, StoredDocument};
