use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Prefix of every environment variable read by [`Config::from_environment`]
pub const ENV_PREFIX: &str = "ROCKETSHOES";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading error: {message}")]
    LoadError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_dir")]
    pub storage_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_enable_json_logging")]
    pub enable_json_logging: bool,
}

impl Config {
    pub fn from_environment() -> Result<Self, ConfigError> {
        let config = Config {
            api: load_section("api")?,
            storage: load_section("storage")?,
            observability: load_section("observability")?,
        };

        config.validate()?;

        debug!("Configuration: {:?}", config);
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.api.api_base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "API base URL cannot be empty".to_string(),
            });
        }

        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::ValidationError {
                message: format!("API base URL must be http(s): {}", base_url),
            });
        }

        if self.api.request_timeout_seconds == 0 {
            return Err(ConfigError::ValidationError {
                message: "Request timeout cannot be 0".to_string(),
            });
        }

        if self.storage.storage_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "Storage directory cannot be empty".to_string(),
            });
        }

        info!("Configuration validated");
        Ok(())
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

/// Deserialize one configuration section from `ROCKETSHOES_*` variables
fn load_section<T: for<'de> Deserialize<'de>>(section: &str) -> Result<T, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::Environment::with_prefix(ENV_PREFIX))
        .build()
        .map_err(|e| ConfigError::LoadError {
            message: format!("Failed to load {} config: {}", section, e),
        })?;

    settings
        .try_deserialize()
        .map_err(|e| ConfigError::LoadError {
            message: format!("Failed to deserialize {} config: {}", section, e),
        })
}

// Default value functions
pub(crate) fn default_api_base_url() -> String {
    "http://localhost:3333".to_string()
}

pub(crate) fn default_timeout() -> u64 {
    30
}

pub(crate) fn default_storage_dir() -> PathBuf {
    PathBuf::from(".rocketshoes")
}

pub(crate) fn default_service_name() -> String {
    "rocketshoes-cart".to_string()
}

pub(crate) fn default_log_level() -> String {
    "warn".to_string()
}

pub(crate) fn default_enable_json_logging() -> bool {
    false
}
