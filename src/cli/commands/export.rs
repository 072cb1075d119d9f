//! Export command implementation
//!
//! This module implements the `export` command for exporting Firestore
//! collections to CSV or JSON files.

use crate::adapters::firestore::FirestoreClient;
use crate::config::load_config;
use crate::core::export::{ExportOptions, ExportRunner};
use crate::core::output::OutputFormat;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Dry run mode - collect and report without writing any files
    #[arg(long)]
    pub dry_run: bool,

    /// Override output format (csv or json)
    #[arg(long)]
    pub format: Option<String>,

    /// Override output directory
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Export only the named source(s) (comma-separated)
    #[arg(long)]
    pub source: Option<String>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        // Load configuration
        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // Apply CLI overrides
        if let Some(format) = &self.format {
            tracing::info!(format = %format, "Overriding output format from CLI");
            config.export.format = format.clone();
        }

        if let Some(output_dir) = &self.output_dir {
            tracing::info!(output_dir = %output_dir, "Overriding output directory from CLI");
            config.export.output_dir = output_dir.clone();
        }

        // Validate configuration after overrides
        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2); // Configuration error exit code
        }

        // Resolve the configured sources
        let mut sources = match config.resolved_sources() {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Invalid source configuration");
                eprintln!("Invalid source configuration: {e}");
                return Ok(2);
            }
        };

        // Restrict to the named sources, preserving configured order
        if let Some(names) = &self.source {
            let wanted: Vec<String> = names.split(',').map(|s| s.trim().to_string()).collect();
            for name in &wanted {
                if !sources.iter().any(|s| &s.name == name) {
                    let available: Vec<&str> =
                        sources.iter().map(|s| s.name.as_str()).collect();
                    eprintln!("Unknown source: {name} (available: {})", available.join(", "));
                    return Ok(2);
                }
            }
            tracing::info!(sources = ?wanted, "Restricting export to named sources from CLI");
            sources.retain(|s| wanted.contains(&s.name));
        }

        // The format string was validated above, so this cannot fail
        let format: OutputFormat = match config.export.format.parse() {
            Ok(f) => f,
            Err(e) => {
                eprintln!("Invalid output format: {e}");
                return Ok(2);
            }
        };

        // Dry run mode
        if self.dry_run {
            tracing::info!("Dry run mode enabled - no files will be written");
            println!("🔍 DRY RUN MODE - No files will be written");
            println!();
        }

        // Confirmation prompt (unless --yes or dry-run)
        if !self.yes && !self.dry_run {
            println!("Export Configuration:");
            println!("  Project: {}", config.firestore.project_id);
            println!("  Database: {}", config.firestore.database);
            println!("  Format: {format}");
            println!("  Output directory: {}", config.export.output_dir);
            println!("  Sources:");
            for source in &sources {
                println!(
                    "    - {} -> {}",
                    source.name,
                    source.output_file_name(format.extension())
                );
            }
            println!();
            print!("Proceed with export? [y/N]: ");
            use std::io::{self, Write};
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Export cancelled.");
                return Ok(0);
            }
        }

        // Create the store client
        let client = match FirestoreClient::new(&config.firestore) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create Firestore client");
                eprintln!("Failed to initialize export: {e}");
                return Ok(1); // Fatal error exit code
            }
        };

        let options = ExportOptions {
            output_dir: PathBuf::from(&config.export.output_dir),
            format,
            dry_run: self.dry_run,
        };

        // Execute export
        tracing::info!("Executing export");
        println!("🚀 Starting export...");
        println!();

        let runner = ExportRunner::new(Box::new(client), options);
        let summary = match runner.execute(&sources).await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(1); // Fatal error exit code
            }
        };

        crate::log_export_complete!(summary.total_records, summary.duration);

        // Display summary
        println!();
        println!("📊 Export Summary:");
        println!("  Total Sources: {}", summary.total_sources);
        println!("  Exported: {}", summary.exported_sources);
        println!("  Empty: {}", summary.empty_sources);
        println!("  Failed: {}", summary.failed_sources);
        println!("  Total Records: {}", summary.total_records);
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        println!("  Success Rate: {:.2}%", summary.success_rate());
        println!();

        if !summary.files.is_empty() {
            println!("📁 Files written:");
            for file in &summary.files {
                println!("  - {}", file.display());
            }
            println!();
        }

        if !summary.errors.is_empty() {
            println!("⚠️  Errors encountered:");
            for error in &summary.errors {
                println!("  - {}: {}", error.source, error.message);
            }
            println!();
        }

        // Determine exit code
        let exit_code = if summary.is_successful() {
            println!("✅ Export completed successfully!");
            0
        } else {
            println!("⚠️  Export completed with failures");
            1 // Partial success
        };

        Ok(exit_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_args_defaults() {
        let args = ExportArgs {
            yes: false,
            dry_run: false,
            format: None,
            output_dir: None,
            source: None,
        };

        assert!(!args.yes);
        assert!(!args.dry_run);
        assert!(args.format.is_none());
        assert!(args.output_dir.is_none());
        assert!(args.source.is_none());
    }

    #[test]
    fn test_export_args_with_overrides() {
        let args = ExportArgs {
            yes: true,
            dry_run: true,
            format: Some("json".to_string()),
            output_dir: Some("out".to_string()),
            source: Some("orders,line_items".to_string()),
        };

        assert!(args.yes);
        assert!(args.dry_run);
        assert_eq!(args.format, Some("json".to_string()));
        assert_eq!(args.output_dir, Some("out".to_string()));
        assert_eq!(args.source, Some("orders,line_items".to_string()));
    }

    #[tokio::test]
    async fn test_execute_missing_config_is_configuration_error() {
        let args = ExportArgs {
            yes: true,
            dry_run: false,
            format: None,
            output_dir: None,
            source: None,
        };

        let code = args.execute("/nonexistent/quarry.toml").await.unwrap();
        assert_eq!(code, 2);
    }
}
