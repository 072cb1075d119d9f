//! Core business logic for Quarry.
//!
//! This module contains the core logic and orchestration for Quarry exports.
//!
//! # Modules
//!
//! - [`audit`] - Identifier length screening
//! - [`collect`] - Source traversal and record flattening
//! - [`export`] - Export run orchestration and reporting
//! - [`output`] - CSV and JSON file writing
//!
//! # Export Workflow
//!
//! The typical export workflow:
//!
//! 1. **Verify**: Check the store connection once, before any traversal
//! 2. **Collect**: Walk each source and flatten it into tagged records
//! 3. **Write**: Produce one CSV or JSON file per non-empty source
//! 4. **Report**: Generate the run summary
//!
//! # Example
//!
//! ```rust,no_run
//! use quarry::adapters::firestore::FirestoreClient;
//! use quarry::config::load_config;
//! use quarry::core::export::{ExportOptions, ExportRunner};
//! use quarry::core::output::OutputFormat;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Load configuration and resolve the source descriptors
//! let config = load_config("quarry.toml")?;
//! let sources = config.resolved_sources()?;
//!
//! // Create the runner with an injected store handle
//! let store = Box::new(FirestoreClient::new(&config.firestore)?);
//! let runner = ExportRunner::new(
//!     store,
//!     ExportOptions {
//!         output_dir: config.export.output_dir.clone().into(),
//!         format: config.export.format.parse::<OutputFormat>()?,
//!         dry_run: false,
//!     },
//! );
//!
//! // Execute the export
//! let summary = runner.execute(&sources).await?;
//!
//! println!("Exported: {}", summary.exported_sources);
//! println!("Empty: {}", summary.empty_sources);
//! println!("Failed: {}", summary.failed_sources);
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod collect;
pub mod export;
pub mod output;
