//! Pluggable chat backend abstraction
//!
//! This module provides a trait-based abstraction over language-model
//! providers. All backends implement the same interface, so the gateway can
//! be configured with a hosted API or a local daemon without code changes.

mod openai_compat;
#[cfg(test)]
mod test_support;

pub mod mistral;
pub mod ollama;
pub mod registry;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::ChatRequest;

pub use mistral::MistralBackend;
pub use ollama::OllamaBackend;
pub use registry::{BackendFactory, BackendRegistry};

/// Error types for backend operations
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Model returned no text content")]
    EmptyResponse,

    #[error("Inference error: {0}")]
    Inference(String),
}

impl BackendError {
    /// Whether a fresh attempt could succeed without any change to the request.
    ///
    /// Connection failures, timeouts, rate limiting and server-side errors are
    /// transient. Everything else (bad credentials, malformed responses,
    /// missing content) is permanent.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, .. } => *status == 429 || *status >= 500,
            Self::Config(_) | Self::EmptyResponse | Self::Inference(_) => false,
        }
    }
}

/// Backend information for diagnostics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendInfo {
    /// Backend identifier (e.g., "mistral", "ollama")
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Whether an API key must be configured
    pub requires_api_key: bool,
}

/// The core trait that all chat backends must implement.
///
/// Implementations hold only read-only state (an HTTP client and its
/// settings) so a single instance is shared across concurrent requests.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    // ─── IDENTITY ───────────────────────────────────────────────────

    /// Short identifier for logs and diagnostics
    fn name(&self) -> &'static str;

    /// Description of this backend
    fn description(&self) -> &'static str;

    /// Base URL requests are sent to
    fn base_url(&self) -> &str;

    // ─── STATUS ─────────────────────────────────────────────────────

    /// Health check - verify the provider is reachable
    async fn health_check(&self) -> bool;

    // ─── INFERENCE ──────────────────────────────────────────────────

    /// Run one non-streaming chat completion and return the text of the
    /// first choice.
    async fn chat_completion(&self, request: &ChatRequest) -> Result<String, BackendError>;
}
