//! Firestore adapter implementation
//!
//! This module provides the integration with the Firestore v1 REST API:
//! the client, the wire models, and the typed value decoder.

pub mod client;
pub mod models;

pub use client::FirestoreClient;
pub use models::{DocumentResource, ListCollectionIdsResponse, ListDocumentsResponse};
