//! Inference Gateway - Single entry point for all model calls
//!
//! The gateway owns the configured backend, the model settings and the retry
//! policy. It is built once at startup and shared read-only between requests,
//! so concurrent calls never wait on each other.

use std::sync::Arc;

use crate::backend::{BackendError, ChatBackend};
use crate::config::ModelSettings;
use crate::retry::RetryPolicy;
use crate::types::{ChatMessage, ChatRequest, ResponseFormat};

/// Error types for gateway operations
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Gave up after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: u32, last: BackendError },
}

/// The single entry point for ALL model calls.
///
/// Application code should only interact with InferenceGateway, never
/// with backends directly.
pub struct InferenceGateway {
    /// The configured backend
    backend: Box<dyn ChatBackend>,
    /// Model and sampling settings
    settings: ModelSettings,
    /// Retry policy for transient failures
    retry: RetryPolicy,
}

impl InferenceGateway {
    /// Create a gateway with the default retry policy
    pub fn new(backend: Box<dyn ChatBackend>, settings: ModelSettings) -> Self {
        Self {
            backend,
            settings,
            retry: RetryPolicy::default(),
        }
    }

    /// Replace the retry policy
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Name of the configured backend
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Model identifier sent with each request
    pub fn model(&self) -> &str {
        &self.settings.model
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Health check the configured backend
    pub async fn health_check(&self) -> bool {
        self.backend.health_check().await
    }

    /// Build the two-message request: system instruction, then user text
    pub fn build_request(&self, system: &str, user: &str) -> ChatRequest {
        ChatRequest {
            model: self.settings.model.clone(),
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            stream: false,
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
            response_format: self
                .settings
                .json_mode
                .then(ResponseFormat::json_object),
        }
    }

    /// Run one completion, retrying transient failures with backoff.
    ///
    /// Permanent failures return immediately. The returned text is whatever
    /// the model produced; checking it is the caller's job.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, GatewayError> {
        let request = self.build_request(system, user);
        let attempts = self.retry.attempts();

        let mut attempt = 0;
        loop {
            match self.backend.chat_completion(&request).await {
                Ok(text) => {
                    if attempt > 0 {
                        log::info!(
                            "{} completion succeeded after {} retries",
                            self.backend.name(),
                            attempt
                        );
                    }
                    return Ok(text);
                }
                Err(e) if e.is_transient() && attempt + 1 < attempts => {
                    let delay = self.retry.backoff(attempt);
                    log::warn!(
                        "{} completion attempt {}/{} failed: {}. Retrying in {:?}",
                        self.backend.name(),
                        attempt + 1,
                        attempts,
                        e,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) if e.is_transient() && attempts > 1 => {
                    return Err(GatewayError::RetriesExhausted { attempts, last: e });
                }
                Err(e) => return Err(GatewayError::Backend(e)),
            }
        }
    }
}

/// Shared gateway type for application state
pub type SharedGateway = Arc<InferenceGateway>;
