//! Inference constants
//!
//! Provider names, endpoints and client defaults in one place.

/// Provider identifiers accepted by the backend registry
pub mod providers {
    pub const MISTRAL: &str = "mistral";
    pub const OLLAMA: &str = "ollama";
}

/// Default base URLs per provider
pub mod urls {
    /// Hosted Mistral API
    pub const MISTRAL: &str = "https://api.mistral.ai";
    /// Local Ollama daemon
    pub const OLLAMA: &str = "http://127.0.0.1:11434";
}

/// Endpoint paths, relative to a provider base URL
pub mod endpoints {
    /// OpenAI-compatible chat completions (served by both providers)
    pub const CHAT_COMPLETIONS: &str = "/v1/chat/completions";
    /// Mistral model listing, used as a health probe
    pub const MISTRAL_MODELS: &str = "/v1/models";
    /// Ollama local model listing, used as a health probe
    pub const OLLAMA_TAGS: &str = "/api/tags";
}

/// Default values for client configuration
pub mod defaults {
    /// Default model identifier
    pub const MODEL: &str = "mistral-large-latest";
    /// Whole-request timeout for one model call
    pub const REQUEST_TIMEOUT_SECS: u64 = 60;
    /// Total attempts for one completion, including the first
    pub const MAX_ATTEMPTS: u32 = 3;
    /// Base backoff between attempts
    pub const BACKOFF_BASE_MS: u64 = 500;
    /// Upper bound for a single backoff
    pub const BACKOFF_MAX_MS: u64 = 8000;
}
