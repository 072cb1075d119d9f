//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Quarry using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Quarry - Firestore Collection Export Tool
#[derive(Parser, Debug)]
#[command(name = "quarry")]
#[command(version, about, long_about = None)]
#[command(author = "Quarry Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "quarry.toml", env = "QUARRY_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "QUARRY_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export configured sources to CSV or JSON files
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Screen document identifiers for unexpected lengths
    Audit(commands::audit::AuditArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
