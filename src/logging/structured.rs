//! Structured logging setup using tracing
//!
//! Console diagnostics are human-readable and go to stderr, so they never
//! interleave with the operator-facing run output the CLI prints on stdout.
//! When file logging is enabled, the same events are also written as JSON
//! lines through a non-blocking rolling appender.
//!
//! # Example
//!
//! ```no_run
//! use quarry::logging::init_logging;
//! use quarry::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//! ```

use crate::config::LoggingConfig;
use crate::domain::{QuarryError, Result};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Guard that must be kept alive for the duration of the program
///
/// Dropping it flushes whatever the non-blocking file writer still holds.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

impl LoggingGuard {
    fn new(file_guard: Option<WorkerGuard>) -> Self {
        Self {
            _file_guard: file_guard,
        }
    }
}

/// Initialize the logging system based on configuration
///
/// Installs the global subscriber, so this must run once, before any other
/// code emits events. `RUST_LOG` overrides the configured level when set.
///
/// # Arguments
///
/// * `log_level_str` - Log level as a string (trace, debug, info, warn, error)
/// * `config` - Logging configuration
///
/// # Returns
///
/// A [`LoggingGuard`] that must be kept alive for the duration of the program
///
/// # Errors
///
/// Returns a configuration error for an unknown log level or when the log
/// directory cannot be created.
pub fn init_logging(log_level_str: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let log_level = parse_log_level(log_level_str)?;
    let filter = || {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("quarry={log_level}")))
    };

    let console = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_filter(filter());

    let mut layers = vec![console.boxed()];

    let file_guard = if config.file_enabled {
        let (layer, guard) = file_layer(config, filter())?;
        layers.push(layer);
        Some(guard)
    } else {
        None
    };

    tracing_subscriber::registry().with(layers).init();

    tracing::info!(
        file_enabled = config.file_enabled,
        file_path = %config.file_path,
        "Logging initialized"
    );

    Ok(LoggingGuard::new(file_guard))
}

/// Builds the JSON-lines file layer and the guard that flushes it
///
/// Creates the log directory if it does not exist yet.
fn file_layer(
    config: &LoggingConfig,
    filter: EnvFilter,
) -> Result<(Box<dyn Layer<Registry> + Send + Sync>, WorkerGuard)> {
    std::fs::create_dir_all(&config.file_path).map_err(|e| {
        QuarryError::Configuration(format!(
            "Failed to create log directory {}: {}",
            config.file_path, e
        ))
    })?;

    let appender = RollingFileAppender::new(
        parse_rotation(&config.rotation),
        &config.file_path,
        "quarry.log",
    );
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = tracing_subscriber::fmt::layer()
        .json()
        .with_target(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(writer)
        .with_filter(filter);

    Ok((layer.boxed(), guard))
}

/// Maps the configured rotation name onto the appender's rotation
///
/// Unknown names fall back to daily; configuration validation rejects them
/// before this point on the normal path.
fn parse_rotation(rotation: &str) -> Rotation {
    match rotation {
        "hourly" => Rotation::HOURLY,
        "never" => Rotation::NEVER,
        _ => Rotation::DAILY,
    }
}

/// Parse log level from string
fn parse_log_level(level_str: &str) -> Result<Level> {
    match level_str.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(QuarryError::Configuration(format!(
            "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
            level_str
        ))),
    }
}
