//! Export orchestration
//!
//! This module provides the export run logic for Quarry, including:
//! - Sequential per-source collection and writing
//! - Summary and reporting

pub mod runner;
pub mod summary;

pub use runner::{ExportOptions, ExportRunner};
pub use summary::{RunSummary, SourceError};
