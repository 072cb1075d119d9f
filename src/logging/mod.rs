//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - JSON-formatted log files
//! - Configurable log levels
//! - Local file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use quarry::logging::init_logging;
//! use quarry::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! // Use tracing macros for logging
//! tracing::info!("Application started");
//! tracing::error!(error = "Something went wrong", "Error occurred");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the start of a source export
///
/// # Example
///
/// ```no_run
/// use quarry::log_source_start;
/// use quarry::domain::ids::CollectionId;
///
/// let collection = CollectionId::new("customers").unwrap();
/// log_source_start!("orders", &collection);
/// ```
#[macro_export]
macro_rules! log_source_start {
    ($source:expr, $collection:expr) => {
        tracing::info!(
            source = %$source,
            collection = %$collection,
            "Starting source export"
        );
    };
}

/// Log the completion of an export run
///
/// # Example
///
/// ```no_run
/// use quarry::log_export_complete;
/// use std::time::Duration;
///
/// let records = 42;
/// let duration = Duration::from_secs(10);
/// log_export_complete!(records, duration);
/// ```
#[macro_export]
macro_rules! log_export_complete {
    ($records:expr, $duration:expr) => {
        tracing::info!(
            records = $records,
            duration_ms = $duration.as_millis(),
            "Export completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use quarry::log_error_with_context;
/// use quarry::domain::QuarryError;
///
/// let error = QuarryError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log progress through a set of parent documents
///
/// # Example
///
/// ```no_run
/// use quarry::log_walk_progress;
///
/// log_walk_progress!(100, 1000);
/// ```
#[macro_export]
macro_rules! log_walk_progress {
    ($current:expr, $total:expr) => {
        tracing::debug!(
            current = $current,
            total = $total,
            progress_pct = ($current as f64 / $total as f64 * 100.0),
            "Walking parent documents"
        );
    };
}
