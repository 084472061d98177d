//! Application configuration
//!
//! Built once at startup from an optional JSON file plus environment
//! variables, then passed by reference to whatever needs it. Environment
//! variables take precedence over file values.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use inference::{BackendConfig, BackendRegistry, ModelSettings, RetryPolicy};
use serde::{Deserialize, Serialize};
use shape_contract::GeometryPolicy;
use tokio::fs;

use crate::constants::{defaults, env};

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address to listen on
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Directory of the built frontend; not served when missing
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

fn default_bind() -> String {
    defaults::BIND.to_string()
}

fn default_static_dir() -> PathBuf {
    PathBuf::from(defaults::STATIC_DIR)
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            static_dir: default_static_dir(),
        }
    }
}

/// Full application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Provider backend name ("mistral" or "ollama")
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Provider connection settings
    #[serde(default)]
    pub backend: BackendConfig,
    /// Model and sampling settings
    #[serde(default)]
    pub model: ModelSettings,
    /// Retry policy for transient provider failures
    #[serde(default)]
    pub retry: RetryPolicy,
    /// Whether geometry violations reject generated output
    #[serde(default)]
    pub geometry: GeometryPolicy,
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
}

fn default_provider() -> String {
    defaults::PROVIDER.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            backend: BackendConfig::default(),
            model: ModelSettings::default(),
            retry: RetryPolicy::default(),
            geometry: GeometryPolicy::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment
    pub async fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok()).await
    }

    /// Load configuration using `lookup` in place of the environment
    pub async fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(env::CONFIG_FILE) {
            Some(path) => Self::load(Path::new(&path)).await?,
            None => Self::default(),
        };
        config.apply_overrides(&lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;

        let config = serde_json::from_str(&contents).map_err(ConfigError::Parse)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    fn apply_overrides<F>(&mut self, lookup: &F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(key) = get(env::API_KEY) {
            self.backend.api_key = Some(key);
        }
        if let Some(provider) = get(env::PROVIDER) {
            self.provider = provider.to_ascii_lowercase();
        }
        if let Some(model) = get(env::MODEL) {
            self.model.model = model;
        }
        if let Some(url) = get(env::BASE_URL) {
            self.backend.base_url = Some(url);
        }
        if let Some(bind) = get(env::BIND) {
            self.server.bind = bind;
        }
        if let Some(dir) = get(env::STATIC_DIR) {
            self.server.static_dir = PathBuf::from(dir);
        }
        if let Some(value) = get(env::TIMEOUT_SECS) {
            self.backend.request_timeout_secs = parse_var(env::TIMEOUT_SECS, &value)?;
        }
        if let Some(value) = get(env::MAX_ATTEMPTS) {
            self.retry.max_attempts = parse_var(env::MAX_ATTEMPTS, &value)?;
        }
        if let Some(value) = get(env::GEOMETRY) {
            self.geometry =
                value
                    .parse::<GeometryPolicy>()
                    .map_err(|reason| ConfigError::InvalidValue {
                        key: env::GEOMETRY.to_string(),
                        value,
                        reason,
                    })?;
        }
        Ok(())
    }

    /// Check the settings that would otherwise only fail on first use
    pub fn validate(&self) -> Result<(), ConfigError> {
        let registry = BackendRegistry::new();
        if !registry.is_available(&self.provider) {
            return Err(ConfigError::InvalidValue {
                key: env::PROVIDER.to_string(),
                value: self.provider.clone(),
                reason: format!("expected one of: {}", registry.available_names().join(", ")),
            });
        }

        let info = registry
            .list()
            .into_iter()
            .find(|info| info.name.eq_ignore_ascii_case(&self.provider));
        let needs_key = info.map(|info| info.requires_api_key).unwrap_or(false);
        let has_key = self
            .backend
            .api_key
            .as_deref()
            .map(|key| !key.trim().is_empty())
            .unwrap_or(false);
        if needs_key && !has_key {
            return Err(ConfigError::MissingApiKey {
                provider: self.provider.clone(),
                var: env::API_KEY,
            });
        }

        if self.model.model.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: env::MODEL.to_string(),
                value: self.model.model.clone(),
                reason: "model name is empty".to_string(),
            });
        }

        if self.backend.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: env::TIMEOUT_SECS.to_string(),
                value: "0".to_string(),
                reason: "timeout must be at least one second".to_string(),
            });
        }

        self.bind_addr()?;
        Ok(())
    }

    /// Parsed listen address
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server
            .bind
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidValue {
                key: env::BIND.to_string(),
                value: self.server.bind.clone(),
                reason: e.to_string(),
            })
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0:?}: {1}")]
    Io(PathBuf, std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(serde_json::Error),
    #[error("{var} is not set; the {provider} provider needs an API key")]
    MissingApiKey { provider: String, var: &'static str },
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}
