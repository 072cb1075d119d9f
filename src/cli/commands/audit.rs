//! Audit command implementation
//!
//! This module implements the `audit` command for screening document
//! identifiers whose length deviates from the expected one.

use crate::adapters::firestore::FirestoreClient;
use crate::config::load_config;
use crate::core::audit::audit_identifiers;
use crate::domain::ids::CollectionId;
use clap::Args;

/// Arguments for the audit command
#[derive(Args, Debug)]
pub struct AuditArgs {
    /// Collection to screen (defaults to audit.collection from the config)
    #[arg(long)]
    pub collection: Option<String>,

    /// Expected identifier length (defaults to audit.expected_id_length)
    #[arg(long)]
    pub expected_length: Option<usize>,
}

impl AuditArgs {
    /// Execute the audit command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Auditing document identifiers");

        println!("🔎 Identifier Audit");
        println!();

        // Load configuration
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // Determine the collection to screen
        let collection = match &self.collection {
            Some(name) => match CollectionId::new(name.clone()) {
                Ok(c) => c,
                Err(e) => {
                    println!("❌ Invalid collection: {e}");
                    return Ok(2);
                }
            },
            None => match config.audit_collection() {
                Ok(c) => c,
                Err(e) => {
                    println!("❌ {e}");
                    return Ok(2);
                }
            },
        };

        let expected_length = self
            .expected_length
            .unwrap_or(config.audit.expected_id_length);

        // Create the store client
        let client = match FirestoreClient::new(&config.firestore) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to create Firestore client");
                println!("   Error: {e}");
                return Ok(1); // Fatal error exit code
            }
        };

        // Run the audit
        let report = match audit_identifiers(&client, &collection, expected_length).await {
            Ok(r) => r,
            Err(e) => {
                println!("❌ Audit failed");
                println!("   Error: {e}");
                return Ok(1);
            }
        };

        // Display the report
        println!("Collection: {}", report.collection);
        println!("Expected length: {}", report.expected_length);
        println!("Identifiers screened: {}", report.total);
        println!();

        if report.is_clean() {
            println!("✅ All identifiers have the expected length");
            return Ok(0);
        }

        println!("Found {} deviating identifier(s):", report.mismatched.len());
        println!();
        println!("{:<40} {:<10}", "Document ID", "Length");
        println!("{}", "-".repeat(50));

        for id in &report.mismatched {
            println!("{:<40} {:<10}", id.as_str(), id.len());
        }

        println!();
        println!("⚠️  Identifier audit found deviations");
        Ok(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_args_defaults() {
        let args = AuditArgs {
            collection: None,
            expected_length: None,
        };

        assert!(args.collection.is_none());
        assert!(args.expected_length.is_none());
    }

    #[test]
    fn test_audit_args_with_overrides() {
        let args = AuditArgs {
            collection: Some("customers".to_string()),
            expected_length: Some(20),
        };

        assert_eq!(args.collection, Some("customers".to_string()));
        assert_eq!(args.expected_length, Some(20));
    }

    #[tokio::test]
    async fn test_execute_missing_config_is_configuration_error() {
        let args = AuditArgs {
            collection: None,
            expected_length: None,
        };

        let code = args.execute("/nonexistent/quarry.toml").await.unwrap();
        assert_eq!(code, 2);
    }
}
