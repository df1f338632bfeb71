//! Configuration for the signup wizard.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Wizard configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Registration backend configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Snapshot storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Registration backend base URL
    #[serde(default = "default_api_base_url")]
    pub base_url: String,

    /// Whether this run targets the production environment
    #[serde(default)]
    pub is_production: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Path to the snapshot file
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,

    /// Enable persistence (if false, state is in-memory only)
    #[serde(default = "default_true")]
    pub persist: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default implementations
impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            is_production: false,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            persist: true,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default value functions
fn default_api_base_url() -> String {
    signup_store::DEFAULT_API_BASE_URL.into()
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("data").join(format!("{}.json", signup_store::STORE_NAME))
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
