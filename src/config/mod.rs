//! Configuration management for Quarry.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation.
//!
//! # Overview
//!
//! Quarry uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Environment variable overrides (`QUARRY_*` prefix)
//! - Default values for optional settings
//! - Comprehensive validation
//! - Type-safe configuration structs
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use quarry::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Load configuration from file
//! let config = load_config("quarry.toml")?;
//!
//! // Access configuration sections
//! println!("Project: {}", config.firestore.project_id);
//! println!("Format: {}", config.export.format);
//! for source in &config.sources {
//!     println!("Source: {}", source.name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! The configuration is organized into sections:
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`FirestoreConfig`] - Firestore connection and authentication
//! - [`ExportConfig`] - Export settings (format, output directory)
//! - [`SourceConfig`] - One entry per data source, in run order
//! - [`AuditConfig`] - Identifier audit settings
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [firestore]
//! project_id = "my-project"
//! access_token = "${QUARRY_ACCESS_TOKEN}"
//!
//! [export]
//! format = "csv"
//! output_dir = "exports"
//!
//! [[sources]]
//! name = "trials"
//! collection = "participants"
//! shape = "subcollection"
//! subcollection = "trials"
//!
//! [[sources]]
//! name = "trial_entries"
//! collection = "participants"
//! shape = "array"
//! array_field = "trials"
//! summary_field = "summary.final"
//! ```
//!
//! # Environment Variables
//!
//! Use `${VAR_NAME}` syntax for environment variable substitution:
//!
//! ```bash
//! export QUARRY_ACCESS_TOKEN="$(gcloud auth print-access-token)"
//! ```
//!
//! # Validation
//!
//! Configuration is validated on load, and the source entries are resolved
//! into their traversal shapes at the same time:
//!
//! ```rust,no_run
//! use quarry::config::load_config;
//!
//! # fn example() {
//! match load_config("quarry.toml") {
//!     Ok(config) => println!("Configuration valid"),
//!     Err(e) => eprintln!("Configuration error: {}", e),
//! }
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, AuditConfig, ExportConfig, FirestoreConfig, LoggingConfig, QuarryConfig,
    SourceConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
