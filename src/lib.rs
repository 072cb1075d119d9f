// Quarry - Firestore Collection Export Tool
// Copyright (c) 2025 Quarry Contributors
// Licensed under the MIT License

//! # Quarry - Firestore Collection Export
//!
//! Quarry is a batch export tool built in Rust that walks Google Firestore
//! collections and writes their contents to flat CSV or JSON files for
//! analysis, reporting, and archival.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Walking** parent collections and their subcollections via the Firestore REST API
//! - **Flattening** nested array fields into one record per element
//! - **Tagging** every record with the parent and document identifiers it came from
//! - **Writing** one CSV or JSON file per configured source
//!
//! ## Architecture
//!
//! Quarry follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (collect, export, output, audit)
//! - [`adapters`] - External integrations (Firestore REST API)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use quarry::adapters::firestore::FirestoreClient;
//! use quarry::config::load_config;
//! use quarry::core::export::{ExportOptions, ExportRunner};
//! use quarry::core::output::OutputFormat;
//! use std::path::PathBuf;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load configuration
//!     let config = load_config("quarry.toml")?;
//!     let sources = config.resolved_sources()?;
//!
//!     // Create the store client
//!     let client = FirestoreClient::new(&config.firestore)?;
//!
//!     // Execute export
//!     let options = ExportOptions {
//!         output_dir: PathBuf::from(&config.export.output_dir),
//!         format: OutputFormat::Csv,
//!         dry_run: false,
//!     };
//!     let runner = ExportRunner::new(Box::new(client), options);
//!     let summary = runner.execute(&sources).await?;
//!
//!     println!("Exported {} records", summary.total_records);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! ### Record Tagging
//!
//! Every exported record carries the identifier of the parent document it
//! was found under and its own identifier, so flat files stay joinable
//! after export:
//!
//! ```rust
//! use quarry::domain::ids::DocumentId;
//! use quarry::domain::record::tag_record;
//! use serde_json::Map;
//!
//! let parent = DocumentId::new("cust-1").unwrap();
//! let record = tag_record(Map::new(), &parent, "ord-9");
//!
//! assert_eq!(record["parent_document_id"], "cust-1");
//! assert_eq!(record["document_id"], "ord-9");
//! ```
//!
//! ### Stable CSV Headers
//!
//! CSV columns are derived from the union of every record's fields: the
//! two identifier columns come first, the rest follow in lexicographic
//! order, and records missing a field leave the cell empty:
//!
//! ```rust
//! use quarry::core::output::derive_headers;
//! use quarry::domain::record::RecordSet;
//! use serde_json::{Map, Value};
//!
//! let mut fields = Map::new();
//! fields.insert("parent_document_id".to_string(), Value::String("c1".into()));
//! fields.insert("total".to_string(), Value::from(10));
//!
//! let mut records = RecordSet::new();
//! records.push(fields);
//!
//! let headers = derive_headers(&records);
//! assert_eq!(headers, vec!["parent_document_id", "total"]);
//! ```
//!
//! ### Output Formats
//!
//! Each source is written as CSV or indented JSON, selected in the
//! configuration or overridden per run from the CLI:
//!
//! ```rust
//! use quarry::core::output::OutputFormat;
//!
//! let format: OutputFormat = "json".parse().unwrap();
//! assert_eq!(format.extension(), "json");
//! ```
//!
//! ## Error Handling
//!
//! Quarry uses the [`domain::QuarryError`] type for all errors, following
//! Rust best practices:
//!
//! ```rust,no_run
//! use quarry::domain::QuarryError;
//!
//! fn example() -> Result<(), QuarryError> {
//!     // Errors are automatically converted using the ? operator
//!     let config = quarry::config::load_config("quarry.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Quarry uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn, error};
//!
//! info!("Starting export");
//! warn!(source = "orders", "No records collected");
//! error!(error = "connection refused", "Export failed");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
