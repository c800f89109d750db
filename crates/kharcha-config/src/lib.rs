//! Configuration management for kharcha
//!
//! This module handles loading, validation, and management of
//! kharcha configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use error::ConfigError;

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8086
}

/// Storage backend enumeration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Single JSON blob file on disk
    File,
    /// Single remote JSON blob endpoint
    Remote,
    /// In-process store, nothing persisted
    Memory,
}

impl Default for StorageBackend {
    fn default() -> Self {
        StorageBackend::File
    }
}

impl std::str::FromStr for StorageBackend {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" => Ok(StorageBackend::File),
            "remote" => Ok(StorageBackend::Remote),
            "memory" => Ok(StorageBackend::Memory),
            _ => Err(format!("Invalid storage backend: {}", s)),
        }
    }
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::File => write!(f, "file"),
            StorageBackend::Remote => write!(f, "remote"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Which backend holds the transaction blob
    #[serde(default)]
    pub backend: StorageBackend,
    /// Data directory for the file backend
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
    /// Blob file name within the data directory
    #[serde(default = "default_blob_file")]
    pub file: String,
    /// Endpoint URL for the remote backend
    #[serde(default)]
    pub remote_url: Option<String>,
    /// Request timeout for the remote backend, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_data_path(),
            file: default_blob_file(),
            remote_url: None,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("./data")
}

fn default_blob_file() -> String {
    "transactions.json".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

/// Display and number formatting settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Currency symbol shown before amounts
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Number of decimal places
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
    /// Years offered in the filter dropdown: current year +/- this window
    #[serde(default = "default_year_window")]
    pub year_window: i32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            decimal_places: default_decimal_places(),
            year_window: default_year_window(),
        }
    }
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

fn default_decimal_places() -> u32 {
    2
}

fn default_year_window() -> i32 {
    5
}

/// Local time settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeConfig {
    /// Fixed UTC offset in minutes used for "now" defaults (IST = 330)
    #[serde(default = "default_utc_offset")]
    pub utc_offset_minutes: i32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: default_utc_offset(),
        }
    }
}

fn default_utc_offset() -> i32 {
    330
}

/// Pagination settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Records per page for lists
    #[serde(default = "default_records_per_page")]
    pub records_per_page: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            records_per_page: default_records_per_page(),
        }
    }
}

fn default_records_per_page() -> usize {
    50
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage settings
    #[serde(default)]
    pub storage: StorageConfig,
    /// Display settings
    #[serde(default)]
    pub display: DisplayConfig,
    /// Local time settings
    #[serde(default)]
    pub time: TimeConfig,
    /// Pagination settings
    #[serde(default)]
    pub pagination: PaginationConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound {
                    path: path.to_string_lossy().to_string(),
                }
            } else {
                ConfigError::IoError
            }
        })?;

        let config: Config = serde_yaml::from_str(&content).map_err(|_| ConfigError::InvalidYaml)?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.storage.backend == StorageBackend::Remote
            && self
                .storage
                .remote_url
                .as_deref()
                .map(|u| u.is_empty())
                .unwrap_or(true)
        {
            return Err(ConfigError::InvalidValue {
                field: "storage.remote_url".to_string(),
                reason: "Remote backend requires storage.remote_url".to_string(),
            });
        }

        if self.display.decimal_places > 10 {
            return Err(ConfigError::InvalidValue {
                field: "display.decimal_places".to_string(),
                reason: "Decimal places must be between 0 and 10".to_string(),
            });
        }

        if self.display.year_window < 0 || self.display.year_window > 50 {
            return Err(ConfigError::InvalidValue {
                field: "display.year_window".to_string(),
                reason: "Year window must be between 0 and 50".to_string(),
            });
        }

        if self.time.utc_offset_minutes < -1440 || self.time.utc_offset_minutes > 1440 {
            return Err(ConfigError::InvalidValue {
                field: "time.utc_offset_minutes".to_string(),
                reason: "UTC offset must be between -1440 and 1440 minutes".to_string(),
            });
        }

        if self.pagination.records_per_page == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pagination.records_per_page".to_string(),
                reason: "Records per page must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Get the full path to the transaction blob file
    pub fn blob_path(&self) -> PathBuf {
        self.storage.path.join(&self.storage.file)
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8086);
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.storage.file, "transactions.json");
        assert_eq!(config.display.currency_symbol, "₹");
        assert_eq!(config.display.decimal_places, 2);
        assert_eq!(config.display.year_window, 5);
        assert_eq!(config.time.utc_offset_minutes, 330);
        assert_eq!(config.pagination.records_per_page, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blob_path() {
        let config = Config::default();
        assert_eq!(config.blob_path(), PathBuf::from("./data/transactions.json"));
    }

    #[test]
    fn test_parse_partial_yaml() {
        let yaml = r#"
server:
  port: 9000
storage:
  backend: remote
  remote_url: "https://example.com/blob"
display:
  currency_symbol: "$"
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.storage.backend, StorageBackend::Remote);
        assert_eq!(
            config.storage.remote_url.as_deref(),
            Some("https://example.com/blob")
        );
        assert_eq!(config.display.currency_symbol, "$");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_remote_requires_url() {
        let mut config = Config::default();
        config.storage.backend = StorageBackend::Remote;
        config.storage.remote_url = None;
        assert!(config.validate().is_err());

        config.storage.remote_url = Some(String::new());
        assert!(config.validate().is_err());

        config.storage.remote_url = Some("https://example.com/blob".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_offset() {
        let mut config = Config::default();
        config.time.utc_offset_minutes = 2000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_storage_backend_from_str() {
        assert_eq!("file".parse::<StorageBackend>().unwrap(), StorageBackend::File);
        assert_eq!("remote".parse::<StorageBackend>().unwrap(), StorageBackend::Remote);
        assert_eq!("memory".parse::<StorageBackend>().unwrap(), StorageBackend::Memory);
        assert!("drive".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_default_template_parses() {
        let config: Config = serde_yaml::from_str(Config::generate_default()).unwrap();
        assert!(config.validate().is_ok());
    }
}
