//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "quarry.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Quarry configuration");
        println!();

        // Check if file already exists
        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        // Generate configuration content
        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        // Write to file
        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Set project_id to your Google Cloud project");
                println!("  3. If the database requires authentication, create a .env file:");
                println!("     - Set QUARRY_FIRESTORE_ACCESS_TOKEN to an OAuth2 access token");
                println!("  4. Validate configuration: quarry validate-config");
                println!("  5. Run export: quarry export");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(1) // Fatal error exit code
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Quarry Configuration File
# Firestore collection export tool

[application]
log_level = "info"

[firestore]
project_id = "your-project-id"
database = "(default)"
timeout_seconds = 60
page_size = 300

# OAuth2 bearer token, omit for an unauthenticated emulator
# access_token = "${QUARRY_FIRESTORE_ACCESS_TOKEN}"

[export]
format = "csv"
output_dir = "exports"

# One [[sources]] block per output file

[[sources]]
name = "orders"
collection = "customers"
shape = "subcollection"
subcollection = "orders"

# [[sources]]
# name = "line_items"
# collection = "orders"
# shape = "array"
# array_field = "items"

[audit]
expected_id_length = 24

[logging]
file_enabled = false
file_path = "logs"
rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# Quarry Configuration File
# Firestore collection export tool
#
# This file contains all configuration options with examples and explanations.
#
# Quarry walks the configured collections through the Firestore REST API
# and writes one flat CSV or JSON file per source.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# Firestore Connection
# ============================================================================
[firestore]
# Google Cloud project ID (required)
project_id = "your-project-id"

# Database ID ("(default)" unless you created a named database)
database = "(default)"

# REST API base URL; point this at an emulator for local runs
base_url = "https://firestore.googleapis.com/v1"

# OAuth2 bearer token (use environment variable)
# Leave commented for an emulator that accepts unauthenticated requests
# access_token = "${QUARRY_FIRESTORE_ACCESS_TOKEN}"

# Request timeout in seconds
timeout_seconds = 60

# Documents fetched per list page (1-1000)
page_size = 300

# ============================================================================
# Export Configuration
# ============================================================================
[export]
# Output format: "csv" or "json"
# - csv: one header row, one line per record, empty cells for absent fields
# - json: indented array of records, each keeping its own field order
format = "csv"

# Directory the output files are written into (created if missing)
output_dir = "exports"

# ============================================================================
# Sources
# ============================================================================
# Each [[sources]] block produces one output file. Two shapes are supported:
#
#   shape = "subcollection"  walks <collection>/<parent>/<subcollection>
#                            and emits one record per subcollection document
#
#   shape = "array"          reads <collection>/<parent> and emits one
#                            record per element of an array field

[[sources]]
# Name of the source (also the default output file name)
name = "orders"

# Top-level collection whose documents are walked
collection = "customers"

# Shape of the data under each parent document
shape = "subcollection"

# Subcollection read under every parent
subcollection = "orders"

# Optional: override the output file name (used verbatim, extension included)
# output = "customer_orders.csv"

[[sources]]
name = "line_items"
collection = "orders"
shape = "array"

# Field holding the array, as a dot-separated path
array_field = "items"

# Optional: key of the element list when each array slot wraps it in an
# object, e.g. items = [{ list = {...}, meta = {...} }]
# array_key = "list"

# Optional: path to a per-parent summary mapping, appended as one extra
# record whose document_id is the path's final segment
# summary_field = "totals.final"

# ============================================================================
# Identifier Audit
# ============================================================================
[audit]
# Collection the audit command screens (defaults to the first source's)
# collection = "customers"

# Expected document identifier length in characters
expected_id_length = 24

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable JSON log files alongside the console output
file_enabled = false

# Directory the rolled log files are written into
file_path = "logs"

# Log rotation (daily, hourly or never)
rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QuarryConfig;

    #[test]
    fn test_init_args_defaults() {
        let args = InitArgs {
            output: "quarry.toml".to_string(),
            with_examples: false,
            force: false,
        };

        assert_eq!(args.output, "quarry.toml");
        assert!(!args.with_examples);
        assert!(!args.force);
    }

    #[test]
    fn test_generate_minimal_config() {
        let config = InitArgs::generate_minimal_config();
        assert!(config.contains("[firestore]"));
        assert!(config.contains("[[sources]]"));
        assert!(config.contains("[export]"));
    }

    #[test]
    fn test_generate_config_with_examples() {
        let config = InitArgs::generate_config_with_examples();
        assert!(config.contains("# Quarry Configuration File"));
        assert!(config.contains("array_field"));
        assert!(config.contains("expected_id_length"));
    }

    #[test]
    fn test_minimal_config_is_valid() {
        let content = InitArgs::generate_minimal_config();
        let config: QuarryConfig = toml::from_str(&content).unwrap();
        config.validate().unwrap();
    }

    #[test]
    fn test_example_config_is_valid() {
        let content = InitArgs::generate_config_with_examples();
        let config: QuarryConfig = toml::from_str(&content).unwrap();
        config.validate().unwrap();
        assert_eq!(config.sources.len(), 2);
    }

    #[tokio::test]
    async fn test_execute_refuses_to_overwrite() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("quarry.toml");

        let args = InitArgs {
            output: path.to_str().unwrap().to_string(),
            with_examples: false,
            force: false,
        };

        assert_eq!(args.execute().await.unwrap(), 0);
        assert!(path.exists());

        // Second run without --force must not clobber the file
        assert_eq!(args.execute().await.unwrap(), 2);
    }
}
