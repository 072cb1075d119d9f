//! Export run orchestration
//!
//! This module drives one export run: verify the store connection once,
//! then collect and write every configured source in order, one at a time.
//! A failed source is recorded and the run moves on to the next source;
//! only startup failures abort the whole run.

use crate::adapters::store::DocumentStore;
use crate::core::collect::collect_source;
use crate::core::export::summary::RunSummary;
use crate::core::output::{write_record_set, OutputFormat};
use crate::domain::source::Source;
use crate::domain::Result;
use std::path::PathBuf;
use std::time::Instant;

/// Options for one export run
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Directory the output files are written into
    pub output_dir: PathBuf,

    /// Output format applied to every source
    pub format: OutputFormat,

    /// Collect and report without writing any files
    pub dry_run: bool,
}

/// Sequential export runner
///
/// The store handle is injected, so the runner works identically against
/// the live backend and the in-memory store used in tests.
pub struct ExportRunner {
    store: Box<dyn DocumentStore>,
    options: ExportOptions,
}

impl ExportRunner {
    /// Create a new export runner
    pub fn new(store: Box<dyn DocumentStore>, options: ExportOptions) -> Self {
        Self { store, options }
    }

    /// Execute the export
    ///
    /// This is the main entry point for the export process. It:
    /// 1. Verifies the store connection
    /// 2. For each source, in configured order:
    ///    - Collects its records into a flat, tagged set
    ///    - Writes the output file, unless the set is empty or this is a
    ///      dry run
    /// 3. Returns the run summary
    ///
    /// # Errors
    ///
    /// Returns an error if the connection check fails. Per-source failures
    /// do not abort the run; they are recorded in the summary.
    pub async fn execute(&self, sources: &[Source]) -> Result<RunSummary> {
        let start_time = Instant::now();
        let mut summary = RunSummary::new();
        summary.total_sources = sources.len();

        tracing::info!(
            run_id = %summary.run_id,
            sources = sources.len(),
            dry_run = self.options.dry_run,
            "Starting export run"
        );

        self.store.verify_connection().await?;

        for source in sources {
            crate::log_source_start!(&source.name, &source.collection);

            let records = match collect_source(self.store.as_ref(), source).await {
                Ok(records) => records,
                Err(e) => {
                    tracing::error!(
                        source = %source.name,
                        error = %e,
                        "Source failed, continuing with next"
                    );
                    summary.add_error(&source.name, e.to_string());
                    continue;
                }
            };

            summary.total_records += records.len();

            if records.is_empty() {
                tracing::info!(source = %source.name, "No records collected, skipping file");
                summary.empty_sources += 1;
                continue;
            }

            if self.options.dry_run {
                tracing::info!(
                    source = %source.name,
                    records = records.len(),
                    file = %source.output_file_name(self.options.format.extension()),
                    "Dry run, not writing file"
                );
                summary.exported_sources += 1;
                continue;
            }

            match write_record_set(
                &self.options.output_dir,
                source,
                self.options.format,
                &records,
            ) {
                Ok(Some(path)) => {
                    tracing::info!(
                        source = %source.name,
                        records = records.len(),
                        path = %path.display(),
                        "Wrote output file"
                    );
                    summary.exported_sources += 1;
                    summary.files.push(path);
                }
                Ok(None) => {
                    summary.empty_sources += 1;
                }
                Err(e) => {
                    tracing::error!(
                        source = %source.name,
                        error = %e,
                        "Failed to write output file"
                    );
                    summary.add_error(&source.name, e.to_string());
                }
            }
        }

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }
}
