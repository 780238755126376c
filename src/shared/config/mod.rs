//! Application configuration module
//!
//! Provides configuration types for the application. Values come from an
//! optional TOML file and are overridden field by field by the builder.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// API base URL, e.g. `http://localhost:5000/api`
    pub server_url: Option<String>,
    /// Where the session record is persisted
    pub session_file: Option<PathBuf>,
    /// Per-request timeout
    pub request_timeout_secs: Option<u64>,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Parse a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: AppConfig =
            toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&source)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.server_url {
            let parsed =
                reqwest::Url::parse(url).map_err(|_| ConfigError::InvalidUrl(url.clone()))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ConfigError::InvalidUrl(url.clone()));
            }
        }
        if self.request_timeout_secs == Some(0) {
            return Err(ConfigError::MissingValue("request_timeout_secs"));
        }
        Ok(())
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    base: AppConfig,
}

impl AppConfigBuilder {
    /// Start from already loaded values (e.g. a config file)
    pub fn from_config(config: AppConfig) -> Self {
        Self { base: config }
    }

    /// Set the server URL
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.base.server_url = Some(url.into());
        self
    }

    pub fn session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.base.session_file = Some(path.into());
        self
    }

    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.base.request_timeout_secs = Some(secs);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        self.base.validate()?;
        Ok(self.base)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid config file: {0}")]
    Parse(String),
    #[error("cannot read config file: {0}")]
    Io(String),
}
