//! Configuration types for the inference library

use serde::{Deserialize, Serialize};

use crate::constants::defaults;

/// Connection settings used to construct a backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Override for the provider base URL (e.g., a proxy or a remote Ollama host)
    #[serde(default)]
    pub base_url: Option<String>,
    /// API key sent as a bearer token (required by hosted providers)
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Timeout for a single HTTP request in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout() -> u64 {
    defaults::REQUEST_TIMEOUT_SECS
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Model selection and sampling settings sent with each request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSettings {
    /// Model identifier (e.g., "mistral-large-latest", "llama3.2")
    pub model: String,
    /// Sampling temperature; provider default when unset
    #[serde(default)]
    pub temperature: Option<f32>,
    /// Maximum tokens to generate; provider default when unset
    #[serde(default)]
    pub max_tokens: Option<u32>,
    /// Request the provider's JSON output mode. Off by default: some
    /// providers only accept a top-level object in this mode.
    #[serde(default)]
    pub json_mode: bool,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            model: defaults::MODEL.to_string(),
            temperature: None,
            max_tokens: None,
            json_mode: false,
        }
    }
}
