//! # CLI Configuration
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BOOKSTORE_DB_PATH=/data/bookstore.db                               │
//! │     BOOKSTORE_REPORT_FORMAT=json                                       │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $BOOKSTORE_CONFIG, or                                              │
//! │     ~/.config/bookstore/bookstore.toml (Linux)                         │
//! │     ~/Library/Application Support/com.bookstore.ledger/... (macOS)     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     bookstore.db in the working directory, text report                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # bookstore.toml
//! database_path = "/var/lib/bookstore/bookstore.db"
//! report_format = "text"   # text | json
//! max_connections = 1
//! ```

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit config file.
pub const ENV_CONFIG_PATH: &str = "BOOKSTORE_CONFIG";

/// Environment variable overriding the database path.
pub const ENV_DB_PATH: &str = "BOOKSTORE_DB_PATH";

/// Environment variable overriding the report format.
pub const ENV_REPORT_FORMAT: &str = "BOOKSTORE_REPORT_FORMAT";

const CONFIG_FILE_NAME: &str = "bookstore.toml";

// =============================================================================
// Errors
// =============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file exists but could not be read.
    #[error("Could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`CliConfig`].
    #[error("Could not parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A setting has an unusable value.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// =============================================================================
// Report Format
// =============================================================================

/// How the sales report is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable blocks, one per sale.
    #[default]
    Text,

    /// The sale list as pretty-printed JSON.
    Json,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(ConfigError::Invalid(format!(
                "Unknown report format: '{}'. Valid options: text, json",
                other
            ))),
        }
    }
}

// =============================================================================
// CLI Config
// =============================================================================

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// SQLite database file. Created on first run.
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Format of the sales report.
    #[serde(default)]
    pub report_format: ReportFormat,

    /// Pool size. One is enough for a single interactive user.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_path() -> PathBuf {
    PathBuf::from("bookstore.db")
}

fn default_max_connections() -> u32 {
    1
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            database_path: default_database_path(),
            report_format: ReportFormat::default(),
            max_connections: default_max_connections(),
        }
    }
}

impl CliConfig {
    /// Loads configuration from file and environment.
    ///
    /// ## Loading Order
    /// 1. Start with defaults
    /// 2. Read the TOML file (`config_path`, `$BOOKSTORE_CONFIG`, then the
    ///    platform config dir), if it exists
    /// 3. Apply environment overrides
    /// 4. Validate
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let path = config_path
            .or_else(|| std::env::var_os(ENV_CONFIG_PATH).map(PathBuf::from))
            .or_else(Self::default_config_path);

        let mut config = match path {
            Some(path) if path.exists() => {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path).map_err(|source| {
                    ConfigError::Read {
                        path: path.clone(),
                        source,
                    }
                })?;
                Self::from_toml(&contents)?
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML document; missing keys take their defaults.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Platform config file location, if a home directory is known.
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "bookstore", "ledger")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "database_path must not be empty".into(),
            ));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "max_connections must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from a variable lookup (the process environment
    /// in production).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_DB_PATH) {
            debug!(path = %path, "Overriding database path from environment");
            self.database_path = PathBuf::from(path);
        }

        if let Some(format) = lookup(ENV_REPORT_FORMAT) {
            self.report_format = format.parse()?;
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
