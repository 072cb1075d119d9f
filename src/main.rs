// Quarry - Firestore Collection Export Tool
// Copyright (c) 2025 Quarry Contributors
// Licensed under the MIT License

use clap::Parser;
use quarry::cli::{Cli, Commands};
use quarry::config::load_config;
use quarry::log_error_with_context;
use quarry::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    // This is optional - if .env doesn't exist, it's silently ignored
    let _ = dotenvy::dotenv();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Logging settings come from the configuration file when it is
    // readable. When it is not, fall back to console-only defaults and
    // let the command surface the error itself.
    let file_config = load_config(&cli.config).ok();
    let logging_config = file_config
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default();
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| file_config.as_ref().map(|c| c.application.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());

    // The guard must stay alive until exit so file logs keep flushing
    let logging_guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(2);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Quarry - Firestore Collection Export Tool"
    );

    // Execute command and get exit code
    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            log_error_with_context!(&e, "Command execution failed");
            eprintln!("Error: {e}");
            1 // Fatal error exit code
        }
    };

    // process::exit skips destructors, so flush the file writer first
    drop(logging_guard);

    // Exit with appropriate code
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Export(args) => args.execute(&cli.config).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Audit(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}
