//! Ollama backend implementation
//!
//! This backend integrates with a running Ollama daemon through its
//! OpenAI-compatible endpoint. No API key is needed.

use async_trait::async_trait;

use super::openai_compat::{build_client, normalize_base_url, post_chat};
use super::{BackendError, ChatBackend};
use crate::config::BackendConfig;
use crate::constants::{endpoints, urls};
use crate::types::ChatRequest;

/// Ollama backend using the Ollama daemon
///
/// This backend communicates with an Ollama server via HTTP. The daemon must
/// already be running (`ollama serve`) with the configured model pulled.
pub struct OllamaBackend {
    /// HTTP client for API requests
    http_client: reqwest::Client,
    /// Base URL of the Ollama server
    base_url: String,
}

impl OllamaBackend {
    /// Create a new Ollama backend
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        if config.api_key.is_some() {
            log::debug!("Ignoring API key for Ollama backend");
        }
        Ok(Self {
            http_client: build_client(config)?,
            base_url: normalize_base_url(config.base_url.as_deref().unwrap_or(urls::OLLAMA)),
        })
    }
}

#[async_trait]
impl ChatBackend for OllamaBackend {
    fn name(&self) -> &'static str {
        "ollama"
    }

    fn description(&self) -> &'static str {
        "Local Ollama daemon via its OpenAI-compatible API"
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn health_check(&self) -> bool {
        let health_url = format!("{}{}", self.base_url, endpoints::OLLAMA_TAGS);
        match self.http_client.get(&health_url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    async fn chat_completion(&self, request: &ChatRequest) -> Result<String, BackendError> {
        post_chat(&self.http_client, &self.base_url, None, request).await
    }
}
