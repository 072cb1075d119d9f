//! Example demonstrating the Quarry logging system
//!
//! This example shows how to:
//! - Initialize structured logging
//! - Use logging macros
//! - Enable JSON file output with rotation
//!
//! Run with:
//! ```bash
//! cargo run --example logging_demo
//! ```

use quarry::config::LoggingConfig;
use quarry::domain::ids::CollectionId;
use quarry::logging::init_logging;
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Create a logging configuration with file output enabled
    let config = LoggingConfig {
        file_enabled: true,
        file_path: "/tmp/quarry_demo".to_string(),
        rotation: "daily".to_string(),
    };

    // Initialize logging (keep the guard alive for the duration of the program)
    let _guard = init_logging("debug", &config)?;

    // Log some basic messages
    tracing::info!("Quarry logging demo started");
    tracing::debug!("This is a debug message");
    tracing::warn!("This is a warning message");

    // Use structured logging with fields
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = "development",
        "Application initialized"
    );

    // Demonstrate export logging macros
    let collection = CollectionId::new("customers")?;

    quarry::log_source_start!("orders", &collection);

    // Simulate walking the parent documents
    for current in 1..=3u64 {
        std::thread::sleep(Duration::from_millis(50));
        quarry::log_walk_progress!(current, 3u64);
    }

    // Log completion
    let duration = Duration::from_millis(150);
    quarry::log_export_complete!(42, duration);

    // Demonstrate error logging
    let error = quarry::domain::QuarryError::Configuration("Example error".to_string());
    quarry::log_error_with_context!(&error, "Demonstrating error logging");

    // Log with correlation ID
    let correlation_id = uuid::Uuid::new_v4();
    tracing::info!(
        correlation_id = %correlation_id,
        operation = "export",
        "Operation completed with correlation ID"
    );

    tracing::info!("Quarry logging demo completed");

    println!("\n✅ Logging demo completed successfully!");
    println!("📁 Check logs in: /tmp/quarry_demo/quarry.log");
    println!("💡 Logs are in JSON format for production use");

    Ok(())
}
