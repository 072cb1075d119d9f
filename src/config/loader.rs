//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::QuarryConfig;
use super::secret::secret_string;
use crate::domain::errors::QuarryError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into QuarryConfig
/// 4. Applies environment variable overrides (QUARRY_* prefix)
/// 5. Validates the configuration
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use quarry::config::loader::load_config;
///
/// let config = load_config("quarry.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<QuarryConfig> {
    let path = path.as_ref();

    // Check if file exists
    if !path.exists() {
        return Err(QuarryError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    // Read file contents
    let contents = fs::read_to_string(path).map_err(|e| {
        QuarryError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    // Perform environment variable substitution
    let contents = substitute_env_vars(&contents)?;

    // Parse TOML
    let mut config: QuarryConfig = toml::from_str(&contents)
        .map_err(|e| QuarryError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    // Apply environment variable overrides
    apply_env_overrides(&mut config)?;

    // Validate configuration
    config.validate().map_err(|e| {
        QuarryError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Arguments
///
/// * `input` - String containing ${VAR} placeholders
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    // Process line by line to skip comments
    for line in input.lines() {
        let trimmed = line.trim_start();

        // Skip comment lines - don't process env vars in comments
        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        // Process non-comment lines for env var substitution
        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(QuarryError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using QUARRY_* prefix
///
/// Environment variables follow the pattern: QUARRY_<SECTION>_<KEY>
/// For example: QUARRY_FIRESTORE_PROJECT_ID, QUARRY_EXPORT_FORMAT
///
/// # Arguments
///
/// * `config` - Mutable reference to the configuration to update
fn apply_env_overrides(config: &mut QuarryConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("QUARRY_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Firestore overrides
    if let Ok(val) = std::env::var("QUARRY_FIRESTORE_PROJECT_ID") {
        config.firestore.project_id = val;
    }
    if let Ok(val) = std::env::var("QUARRY_FIRESTORE_DATABASE") {
        config.firestore.database = val;
    }
    if let Ok(val) = std::env::var("QUARRY_FIRESTORE_BASE_URL") {
        config.firestore.base_url = val;
    }
    if let Ok(val) = std::env::var("QUARRY_FIRESTORE_ACCESS_TOKEN") {
        config.firestore.access_token = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("QUARRY_FIRESTORE_TIMEOUT_SECONDS") {
        if let Ok(seconds) = val.parse() {
            config.firestore.timeout_seconds = seconds;
        }
    }
    if let Ok(val) = std::env::var("QUARRY_FIRESTORE_PAGE_SIZE") {
        if let Ok(size) = val.parse() {
            config.firestore.page_size = size;
        }
    }

    // Export overrides
    if let Ok(val) = std::env::var("QUARRY_EXPORT_FORMAT") {
        config.export.format = val;
    }
    if let Ok(val) = std::env::var("QUARRY_EXPORT_OUTPUT_DIR") {
        config.export.output_dir = val;
    }

    // Audit overrides
    if let Ok(val) = std::env::var("QUARRY_AUDIT_COLLECTION") {
        config.audit.collection = Some(val);
    }
    if let Ok(val) = std::env::var("QUARRY_AUDIT_EXPECTED_ID_LENGTH") {
        if let Ok(length) = val.parse() {
            config.audit.expected_id_length = length;
        }
    }

    // Logging overrides
    if let Ok(val) = std::env::var("QUARRY_LOGGING_FILE_ENABLED") {
        config.logging.file_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("QUARRY_LOGGING_FILE_PATH") {
        config.logging.file_path = val;
    }
    if let Ok(val) = std::env::var("QUARRY_LOGGING_ROTATION") {
        config.logging.rotation = val;
    }

    Ok(())
}
