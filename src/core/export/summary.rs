//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting the outcome of
//! one export run.

use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::time::Duration;
use uuid::Uuid;

/// Summary of one export run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Unique identifier of this run
    pub run_id: Uuid,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Number of sources attempted
    pub total_sources: usize,

    /// Sources that produced an output file (or would have, in a dry run)
    pub exported_sources: usize,

    /// Sources that yielded no records and therefore no file
    pub empty_sources: usize,

    /// Sources that aborted with an error
    pub failed_sources: usize,

    /// Records collected across all sources
    pub total_records: usize,

    /// Files written during the run
    pub files: Vec<PathBuf>,

    /// Duration of the run
    pub duration: Duration,

    /// Errors encountered, one per failed source
    pub errors: Vec<SourceError>,
}

impl RunSummary {
    /// Create a new empty run summary
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            total_sources: 0,
            exported_sources: 0,
            empty_sources: 0,
            failed_sources: 0,
            total_records: 0,
            files: Vec::new(),
            duration: Duration::from_secs(0),
            errors: Vec::new(),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record a failed source
    pub fn add_error(&mut self, source: impl Into<String>, message: impl Into<String>) {
        self.failed_sources += 1;
        self.errors.push(SourceError {
            source: source.into(),
            message: message.into(),
        });
    }

    /// Check if the run was successful (no failed sources)
    pub fn is_successful(&self) -> bool {
        self.failed_sources == 0 && self.errors.is_empty()
    }

    /// Get success rate over sources as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_sources == 0 {
            return 100.0;
        }
        ((self.total_sources - self.failed_sources) as f64 / self.total_sources as f64) * 100.0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            run_id = %self.run_id,
            total_sources = self.total_sources,
            exported = self.exported_sources,
            empty = self.empty_sources,
            failed = self.failed_sources,
            records = self.total_records,
            duration_secs = self.duration.as_secs(),
            success_rate = format!("{:.2}%", self.success_rate()),
            "Export run completed"
        );

        if !self.errors.is_empty() {
            tracing::warn!(
                error_count = self.errors.len(),
                "Export run completed with errors"
            );
            for error in &self.errors {
                tracing::warn!(
                    source = %error.source,
                    message = %error.message,
                    "Source error"
                );
            }
        }
    }
}

impl Default for RunSummary {
    fn default() -> Self {
        Self::new()
    }
}

/// Error that aborted one source
#[derive(Debug, Clone)]
pub struct SourceError {
    /// Name of the source that failed
    pub source: String,

    /// Error message
    pub message: String,
}
