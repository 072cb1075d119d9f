//! External system integrations for Quarry.
//!
//! This module provides adapters for integrating with external systems:
//!
//! - [`store`] - Document store abstraction layer (trait-based)
//! - [`firestore`] - Firestore REST API implementation
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external dependencies
//! and enable testing with mock implementations. The store layer uses
//! trait-based abstraction so the export traversal never depends on the
//! concrete backend.
//!
//! # Firestore Adapter
//!
//! ```rust,no_run
//! use quarry::adapters::firestore::FirestoreClient;
//! use quarry::adapters::store::DocumentStore;
//! use quarry::config::FirestoreConfig;
//! use quarry::domain::ids::CollectionId;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = FirestoreConfig {
//!     project_id: "my-project".to_string(),
//!     ..Default::default()
//! };
//!
//! let client = FirestoreClient::new(&config)?;
//! client.verify_connection().await?;
//!
//! let participants = CollectionId::new("participants")?;
//! let ids = client.list_children(&participants).await?;
//! println!("{} participants", ids.len());
//! # Ok(())
//! # }
//! ```

pub mod firestore;
pub mod store;
