//! Application-wide constants
//!
//! Single source of truth for environment variable names, routes and
//! configuration defaults.

/// Environment variables read at startup
pub mod env {
    /// Optional path to a JSON configuration file
    pub const CONFIG_FILE: &str = "DRAWPROMPT_CONFIG";
    /// API key for the hosted provider
    pub const API_KEY: &str = "MISTRAL_TOKEN";
    /// Provider name ("mistral" or "ollama")
    pub const PROVIDER: &str = "DRAWPROMPT_PROVIDER";
    /// Model identifier
    pub const MODEL: &str = "DRAWPROMPT_MODEL";
    /// Provider base URL override
    pub const BASE_URL: &str = "DRAWPROMPT_BASE_URL";
    /// Socket address to listen on
    pub const BIND: &str = "DRAWPROMPT_BIND";
    /// Directory holding the built frontend
    pub const STATIC_DIR: &str = "DRAWPROMPT_STATIC_DIR";
    /// Per-request model timeout in seconds
    pub const TIMEOUT_SECS: &str = "DRAWPROMPT_TIMEOUT_SECS";
    /// Total model attempts for transient failures
    pub const MAX_ATTEMPTS: &str = "DRAWPROMPT_MAX_ATTEMPTS";
    /// Geometry policy for generated output ("enforce" or "advisory")
    pub const GEOMETRY: &str = "DRAWPROMPT_GEOMETRY";
}

/// Server defaults
pub mod defaults {
    /// Default provider
    pub const PROVIDER: &str = "mistral";
    /// Default listen address
    pub const BIND: &str = "127.0.0.1:8000";
    /// Default frontend bundle directory, relative to the working directory
    pub const STATIC_DIR: &str = "dist";
}

/// HTTP routes
pub mod routes {
    pub const API: &str = "/api";
    pub const API_SLASH: &str = "/api/";
    pub const HEALTH: &str = "/api/health";
}

/// Error details returned to clients
pub mod messages {
    pub const INVALID_CANVAS: &str = "Invalid current_canvas";
    pub const INTERNAL_ERROR: &str = "Internal error";
}

/// Logging limits
pub mod limits {
    /// Maximum characters of model output copied into a log line
    pub const LOGGED_OUTPUT_CHARS: usize = 500;
}
