use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError};

/// Default API base URL
const DEFAULT_SERVER_URL: &str = "http://localhost:5000/api";

const DEFAULT_TIMEOUT_SECS: u64 = 15;

const SESSION_FILE_NAME: &str = "session.json";

/// Resolved client configuration.
///
/// Sources, lowest priority first: built-in defaults, the TOML file named by
/// `FEEDBACK_CONFIG`, then `FEEDBACK_API_URL`, `FEEDBACK_SESSION_FILE` and
/// `FEEDBACK_REQUEST_TIMEOUT_SECS`.
#[derive(Debug, Clone, Default)]
pub struct Config {
    app: AppConfig,
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        let app = builder.build()?;
        Ok(Self { app })
    }

    /// Load the configuration from the optional config file and environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let file = match std::env::var("FEEDBACK_CONFIG") {
            Ok(path) => AppConfig::load_file(Path::new(&path))?,
            Err(_) => AppConfig::default(),
        };

        let mut builder = AppConfigBuilder::from_config(file);
        if let Ok(url) = std::env::var("FEEDBACK_API_URL") {
            builder = builder.server_url(url);
        }
        if let Ok(path) = std::env::var("FEEDBACK_SESSION_FILE") {
            builder = builder.session_file(path);
        }
        if let Ok(secs) = std::env::var("FEEDBACK_REQUEST_TIMEOUT_SECS") {
            let secs = secs
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::Parse(format!("FEEDBACK_REQUEST_TIMEOUT_SECS={}", secs)))?;
            builder = builder.request_timeout_secs(secs);
        }

        Self::with_builder(builder)
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.server_url(), path)
    }

    pub fn server_url(&self) -> &str {
        self.app
            .server_url
            .as_deref()
            .unwrap_or(DEFAULT_SERVER_URL)
            .trim_end_matches('/')
    }

    /// Location of the persisted session record
    pub fn session_file(&self) -> PathBuf {
        if let Some(path) = &self.app.session_file {
            return path.clone();
        }
        let mut path = dirs::data_dir().unwrap_or_else(std::env::temp_dir);
        path.push("feedback-board");
        path.push(SESSION_FILE_NAME);
        path
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.app.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}
