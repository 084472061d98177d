//! Chat-completion client library
//!
//! This library provides a unified interface for the language-model providers
//! used to generate canvases:
//! - **Mistral**: hosted API with bearer-token authentication (default)
//! - **Ollama**: local daemon through its OpenAI-compatible endpoint
//!
//! # Example
//!
//! ```rust,ignore
//! use inference::{BackendConfig, BackendRegistry, InferenceGateway, ModelSettings};
//!
//! let config = BackendConfig {
//!     api_key: Some(token),
//!     ..Default::default()
//! };
//! let backend = BackendRegistry::new().create("mistral", &config)?;
//! let gateway = InferenceGateway::new(backend, ModelSettings::default());
//!
//! let text = gateway.complete(system_prompt, "draw a red circle").await?;
//! ```

pub mod backend;
pub mod config;
pub mod constants;
pub mod gateway;
pub mod retry;
pub mod types;

// Re-exports for convenience
pub use backend::{
    BackendError, BackendFactory, BackendInfo, BackendRegistry, ChatBackend, MistralBackend,
    OllamaBackend,
};
pub use config::{BackendConfig, ModelSettings};
pub use gateway::{GatewayError, InferenceGateway, SharedGateway};
pub use retry::RetryPolicy;
pub use types::{ChatMessage, ChatRequest, ChatResponse, ResponseFormat, Role};
