//! # Configuration Module
//!
//! Loads the client configuration from `mindtrace.yaml` in the platform config
//! directory, then applies environment overrides.
//!
//! ## YAML Format
//!
//! ```yaml
//! api:
//!   base_url: "https://mindtrace.example.com"
//!   request_timeout_secs: 30
//! auth:
//!   id_token: "<firebase id token>"
//! ```
//!
//! ## Environment Overrides
//! - `MINDTRACE_API_URL` - backend base URL
//! - `MINDTRACE_ID_TOKEN` - bearer token sent with every request
//! - `MINDTRACE_TIMEOUT_SECS` - HTTP request timeout in seconds

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE_NAME: &str = "mindtrace.yaml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Sign-in settings. The ID token is issued by the identity provider outside this app.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub id_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Default location: `<platform config dir>/mindtrace.yaml`
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "MindTrace", "mindtrace")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Load from the default location with environment overrides applied
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::default_path() {
            Some(path) => Self::load_from(&path)?,
            None => {
                debug!("No platform config directory, using defaults");
                Self::default()
            }
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load from a YAML file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!("⚙️ No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: AppConfig = serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        info!("⚙️ Loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply `MINDTRACE_*` overrides using the given variable lookup
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("MINDTRACE_API_URL") {
            self.api.base_url = url;
        }

        if let Some(token) = lookup("MINDTRACE_ID_TOKEN") {
            self.auth.id_token = Some(token).filter(|t| !t.trim().is_empty());
        }

        if let Some(timeout) = lookup("MINDTRACE_TIMEOUT_SECS") {
            self.api.request_timeout_secs = timeout
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "MINDTRACE_TIMEOUT_SECS".to_string(),
                    value: timeout.clone(),
                })?;
        }

        Ok(())
    }
}
