//! Domain error types
//!
//! This module defines the error hierarchy for Quarry. All errors are
//! domain-specific and don't expose third-party types. Errors are caught at
//! the narrowest scope that preserves forward progress: a malformed record is
//! skipped, a failed source aborts only that source, and only startup
//! conditions (configuration, credentials, connectivity) abort the run.

use thiserror::Error;

/// Main Quarry error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum QuarryError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Document store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Export process errors
    #[error("Export error: {0}")]
    Export(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Document store errors
///
/// Errors that occur when talking to the hosted document store.
/// These errors don't expose third-party HTTP client types.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to connect to the document store
    #[error("Failed to connect to document store: {0}")]
    ConnectionFailed(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Invalid response from the store
    #[error("Invalid response from document store: {0}")]
    InvalidResponse(String),

    /// Request rejected with an HTTP status
    #[error("Request failed: {status} - {message}")]
    RequestFailed { status: u16, message: String },

    /// Document or collection not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Document fields that could not be decoded
    #[error("Malformed document {path}: {reason}")]
    MalformedDocument { path: String, reason: String },

    /// Timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for QuarryError {
    fn from(err: std::io::Error) -> Self {
        QuarryError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for QuarryError {
    fn from(err: serde_json::Error) -> Self {
        QuarryError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for QuarryError {
    fn from(err: toml::de::Error) -> Self {
        QuarryError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from csv writer errors. The csv crate wraps the underlying
// I/O failure, which is the only way writing can fail here.
impl From<csv::Error> for QuarryError {
    fn from(err: csv::Error) -> Self {
        QuarryError::Io(err.to_string())
    }
}
