//! Configuration schema types
//!
//! This module defines the configuration structure for Quarry. Source
//! entries are declared as plain TOML tables and resolved into the tagged
//! domain descriptors exactly once, when the configuration is loaded.

use crate::config::SecretString;
use crate::domain::ids::CollectionId;
use crate::domain::source::{ArrayLocation, FieldPath, Source, SourceShape};
use serde::{Deserialize, Serialize};

/// Main Quarry configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuarryConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Firestore connection configuration
    pub firestore: FirestoreConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Data sources to export, in run order
    #[serde(default)]
    pub sources: Vec<SourceConfig>,

    /// Identifier audit settings
    #[serde(default)]
    pub audit: AuditConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl QuarryConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.firestore.validate()?;
        self.export.validate()?;

        if self.sources.is_empty() {
            return Err("at least one [[sources]] entry is required".to_string());
        }
        for source in &self.sources {
            source.validate()?;
        }

        // Duplicate names would make two sources race for one output file
        let mut names: Vec<&str> = self.sources.iter().map(|s| s.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        if names.len() != self.sources.len() {
            return Err("source names must be unique".to_string());
        }

        self.audit.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Resolves every source entry into its domain descriptor
    ///
    /// Shapes are fixed here, once, at configuration-load time; the
    /// traversal never re-inspects them per record.
    pub fn resolved_sources(&self) -> Result<Vec<Source>, String> {
        self.sources.iter().map(|s| s.resolve()).collect()
    }

    /// Collection the audit command screens: the configured one, or the
    /// first source's top-level collection
    pub fn audit_collection(&self) -> Result<CollectionId, String> {
        match &self.audit.collection {
            Some(name) => CollectionId::new(name.clone())
                .map_err(|e| format!("audit.collection is invalid: {e}")),
            None => {
                let first = self
                    .sources
                    .first()
                    .ok_or_else(|| "no audit.collection set and no sources configured".to_string())?;
                CollectionId::new(first.collection.clone())
                    .map_err(|e| format!("sources[0].collection is invalid: {e}"))
            }
        }
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Firestore connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirestoreConfig {
    /// Google Cloud project ID
    pub project_id: String,

    /// Firestore database ID
    #[serde(default = "default_database")]
    pub database: String,

    /// Base URL of the REST API; override for an emulator
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Static OAuth bearer token for the Authorization header
    /// Stored securely in memory and automatically zeroized on drop;
    /// omit for an emulator that accepts unauthenticated requests
    #[serde(default)]
    pub access_token: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Documents fetched per list page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl FirestoreConfig {
    fn validate(&self) -> Result<(), String> {
        if self.project_id.is_empty() {
            return Err("firestore.project_id cannot be empty".to_string());
        }

        if self.database.is_empty() {
            return Err("firestore.database cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("firestore.base_url must start with http:// or https://".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("firestore.timeout_seconds must be > 0".to_string());
        }

        if !(1..=1000).contains(&self.page_size) {
            return Err(format!(
                "firestore.page_size must be between 1 and 1000, got {}",
                self.page_size
            ));
        }

        Ok(())
    }
}

impl Default for FirestoreConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            database: default_database(),
            base_url: default_base_url(),
            access_token: None,
            timeout_seconds: default_timeout_seconds(),
            page_size: default_page_size(),
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Output format (csv or json), applied to every source
    #[serde(default = "default_format")]
    pub format: String,

    /// Directory the output files are written into; created if absent
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_formats = ["csv", "json"];
        if !valid_formats.contains(&self.format.as_str()) {
            return Err(format!(
                "Invalid export.format '{}'. Must be one of: {}",
                self.format,
                valid_formats.join(", ")
            ));
        }

        if self.output_dir.is_empty() {
            return Err("export.output_dir cannot be empty".to_string());
        }

        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            output_dir: default_output_dir(),
        }
    }
}

/// One data source entry
///
/// `shape` selects which of the remaining fields apply:
/// - `"subcollection"` requires `subcollection`;
/// - `"array"` requires `array_field`, takes an optional `array_key` when
///   the array is nested under a fixed key inside the field's mapping, and
///   an optional dot-path `summary_field` for a per-parent summary record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Descriptor name; also the default output file stem
    pub name: String,

    /// Top-level collection holding the parent documents
    pub collection: String,

    /// Data shape under each parent (subcollection or array)
    pub shape: String,

    /// Subcollection name (shape = "subcollection")
    #[serde(default)]
    pub subcollection: Option<String>,

    /// Field holding the record array (shape = "array")
    #[serde(default)]
    pub array_field: Option<String>,

    /// Fixed key the array sits under inside the field's mapping
    #[serde(default)]
    pub array_key: Option<String>,

    /// Dot-path to a per-parent summary mapping (e.g. "summary.final")
    #[serde(default)]
    pub summary_field: Option<String>,

    /// Explicit output file name, overriding `<name>.<format>`
    #[serde(default)]
    pub output: Option<String>,
}

impl SourceConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("source name cannot be empty".to_string());
        }

        CollectionId::new(self.collection.clone())
            .map_err(|e| format!("source '{}': {}", self.name, e))?;

        match self.shape.as_str() {
            "subcollection" => {
                if self.subcollection.as_deref().unwrap_or("").is_empty() {
                    return Err(format!(
                        "source '{}': shape 'subcollection' requires a subcollection name",
                        self.name
                    ));
                }
                if self.array_field.is_some() || self.array_key.is_some() {
                    return Err(format!(
                        "source '{}': array_field/array_key are only valid for shape 'array'",
                        self.name
                    ));
                }
                if self.summary_field.is_some() {
                    return Err(format!(
                        "source '{}': summary_field is only valid for shape 'array'",
                        self.name
                    ));
                }
            }
            "array" => {
                if self.array_field.as_deref().unwrap_or("").is_empty() {
                    return Err(format!(
                        "source '{}': shape 'array' requires an array_field",
                        self.name
                    ));
                }
                if self.subcollection.is_some() {
                    return Err(format!(
                        "source '{}': subcollection is only valid for shape 'subcollection'",
                        self.name
                    ));
                }
                if let Some(key) = &self.array_key {
                    if key.trim().is_empty() {
                        return Err(format!("source '{}': array_key cannot be empty", self.name));
                    }
                }
                if let Some(path) = &self.summary_field {
                    FieldPath::parse(path).map_err(|e| format!("source '{}': {}", self.name, e))?;
                }
            }
            other => {
                return Err(format!(
                    "source '{}': invalid shape '{}'. Must be one of: subcollection, array",
                    self.name, other
                ));
            }
        }

        Ok(())
    }

    /// Resolves this entry into its immutable domain descriptor
    pub fn resolve(&self) -> Result<Source, String> {
        self.validate()?;

        let collection = CollectionId::new(self.collection.clone())
            .map_err(|e| format!("source '{}': {}", self.name, e))?;

        let shape = match self.shape.as_str() {
            "subcollection" => {
                let name = self.subcollection.as_deref().unwrap_or("");
                SourceShape::Subcollection {
                    collection: CollectionId::new(name)
                        .map_err(|e| format!("source '{}': {}", self.name, e))?,
                }
            }
            // validate() only lets "array" through here
            _ => {
                let field = self.array_field.clone().unwrap_or_default();
                let location = match &self.array_key {
                    Some(key) => ArrayLocation::Wrapped {
                        field,
                        key: key.clone(),
                    },
                    None => ArrayLocation::Direct { field },
                };
                let summary = match &self.summary_field {
                    Some(path) => Some(
                        FieldPath::parse(path)
                            .map_err(|e| format!("source '{}': {}", self.name, e))?,
                    ),
                    None => None,
                };
                SourceShape::Array { location, summary }
            }
        };

        Ok(Source {
            name: self.name.clone(),
            collection,
            shape,
            output: self.output.clone(),
        })
    }
}

/// Identifier audit configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Collection to screen; defaults to the first source's collection
    #[serde(default)]
    pub collection: Option<String>,

    /// Expected identifier length in characters
    #[serde(default = "default_expected_id_length")]
    pub expected_id_length: usize,
}

impl AuditConfig {
    fn validate(&self) -> Result<(), String> {
        if self.expected_id_length == 0 {
            return Err("audit.expected_id_length must be > 0".to_string());
        }
        if let Some(name) = &self.collection {
            CollectionId::new(name.clone()).map_err(|e| format!("audit.collection: {e}"))?;
        }
        Ok(())
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            collection: None,
            expected_id_length: default_expected_id_length(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable JSON-lines file logging alongside the console output
    #[serde(default)]
    pub file_enabled: bool,

    /// Directory the rolled log files are written into
    #[serde(default = "default_file_path")]
    pub file_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.rotation.as_str()) {
            return Err(format!(
                "Invalid logging.rotation '{}'. Must be one of: {}",
                self.rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.file_enabled && self.file_path.is_empty() {
            return Err("logging.file_path cannot be empty when file logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file_enabled: false,
            file_path: default_file_path(),
            rotation: default_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_database() -> String {
    "(default)".to_string()
}

fn default_base_url() -> String {
    "https://firestore.googleapis.com/v1".to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_page_size() -> u32 {
    300
}

fn default_format() -> String {
    "csv".to_string()
}

fn default_output_dir() -> String {
    "exports".to_string()
}

fn default_expected_id_length() -> usize {
    24
}

fn default_file_path() -> String {
    "logs".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subcollection_source() -> SourceConfig {
        SourceConfig {
            name: "trials".to_string(),
            collection: "participants".to_string(),
            shape: "subcollection".to_string(),
            subcollection: Some("trials".to_string()),
            array_field: None,
            array_key: None,
            summary_field: None,
            output: None,
        }
    }

    fn array_source() -> SourceConfig {
        SourceConfig {
            name: "trial_entries".to_string(),
            collection: "participants".to_string(),
            shape: "array".to_string(),
            subcollection: None,
            array_field: Some("trials".to_string()),
            array_key: None,
            summary_field: Some("summary.final".to_string()),
            output: None,
        }
    }

    fn valid_config() -> QuarryConfig {
        QuarryConfig {
            application: ApplicationConfig::default(),
            firestore: FirestoreConfig {
                project_id: "demo-project".to_string(),
                ..Default::default()
            },
            export: ExportConfig::default(),
            sources: vec![subcollection_source()],
            audit: AuditConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig {
            log_level: "info".to_string(),
        };

        assert!(config.validate().is_ok());

        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_firestore_config_validation() {
        let mut config = FirestoreConfig {
            project_id: "demo-project".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        config.project_id = String::new();
        assert!(config.validate().is_err());

        config.project_id = "demo-project".to_string();
        config.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        config.base_url = default_base_url();
        config.page_size = 0;
        assert!(config.validate().is_err());

        config.page_size = 1001;
        assert!(config.validate().is_err());

        config.page_size = 300;
        config.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_export_config_validation() {
        let mut config = ExportConfig::default();
        assert_eq!(config.format, "csv");
        assert!(config.validate().is_ok());

        config.format = "json".to_string();
        assert!(config.validate().is_ok());

        config.format = "xml".to_string();
        assert!(config.validate().is_err());

        config.format = "csv".to_string();
        config.output_dir = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_source_config_subcollection_validation() {
        let mut source = subcollection_source();
        assert!(source.validate().is_ok());

        source.subcollection = None;
        assert!(source.validate().is_err());

        source.subcollection = Some("trials".to_string());
        source.array_field = Some("trials".to_string());
        assert!(source.validate().is_err());
    }

    #[test]
    fn test_source_config_array_validation() {
        let mut source = array_source();
        assert!(source.validate().is_ok());

        source.array_field = None;
        assert!(source.validate().is_err());

        source.array_field = Some("trials".to_string());
        source.summary_field = Some("a..b".to_string());
        assert!(source.validate().is_err());

        source.summary_field = None;
        source.subcollection = Some("trials".to_string());
        assert!(source.validate().is_err());
    }

    #[test]
    fn test_source_config_invalid_shape() {
        let mut source = subcollection_source();
        source.shape = "tree".to_string();
        assert!(source.validate().is_err());
    }

    #[test]
    fn test_source_resolve_subcollection() {
        let source = subcollection_source().resolve().unwrap();
        assert_eq!(source.name, "trials");
        assert_eq!(source.collection.as_str(), "participants");
        assert!(matches!(
            source.shape,
            SourceShape::Subcollection { ref collection } if collection.as_str() == "trials"
        ));
    }

    #[test]
    fn test_source_resolve_array_direct() {
        let source = array_source().resolve().unwrap();
        match source.shape {
            SourceShape::Array { location, summary } => {
                assert_eq!(
                    location,
                    ArrayLocation::Direct {
                        field: "trials".to_string()
                    }
                );
                assert_eq!(summary.unwrap().sentinel(), "final");
            }
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn test_source_resolve_array_wrapped() {
        let mut config = array_source();
        config.array_key = Some("entries".to_string());
        let source = config.resolve().unwrap();
        match source.shape {
            SourceShape::Array { location, .. } => {
                assert_eq!(
                    location,
                    ArrayLocation::Wrapped {
                        field: "trials".to_string(),
                        key: "entries".to_string()
                    }
                );
            }
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn test_quarry_config_requires_sources() {
        let mut config = valid_config();
        assert!(config.validate().is_ok());

        config.sources.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_quarry_config_rejects_duplicate_names() {
        let mut config = valid_config();
        config.sources.push(subcollection_source());
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("unique"));
    }

    #[test]
    fn test_audit_collection_fallback() {
        let config = valid_config();
        assert_eq!(config.audit_collection().unwrap().as_str(), "participants");

        let mut config = valid_config();
        config.audit.collection = Some("sessions".to_string());
        assert_eq!(config.audit_collection().unwrap().as_str(), "sessions");
    }

    #[test]
    fn test_audit_config_validation() {
        let mut config = AuditConfig::default();
        assert_eq!(config.expected_id_length, 24);
        assert!(config.validate().is_ok());

        config.expected_id_length = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_config_validation() {
        let mut config = LoggingConfig::default();
        assert!(!config.file_enabled);
        assert!(config.validate().is_ok());

        config.rotation = "weekly".to_string();
        assert!(config.validate().is_err());

        config.rotation = "daily".to_string();
        config.file_enabled = true;
        config.file_path = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_values() {
        assert_eq!(default_log_level(), "info");
        assert_eq!(default_database(), "(default)");
        assert_eq!(default_base_url(), "https://firestore.googleapis.com/v1");
        assert_eq!(default_format(), "csv");
        assert_eq!(default_output_dir(), "exports");
        assert_eq!(default_expected_id_length(), 24);
        assert_eq!(default_page_size(), 300);
    }
}
