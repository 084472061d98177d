//! Backend registry for runtime backend selection
//!
//! The registry maps provider names to factories so the application can pick
//! a backend from configuration.

use std::collections::HashMap;

use super::{BackendError, BackendInfo, ChatBackend, MistralBackend, OllamaBackend};
use crate::config::BackendConfig;
use crate::constants::providers;

/// Factory trait for creating backend instances
pub trait BackendFactory: Send + Sync {
    /// Create a new backend instance
    fn create(&self, config: &BackendConfig) -> Result<Box<dyn ChatBackend>, BackendError>;

    /// Get information about this backend
    fn info(&self) -> BackendInfo;
}

/// Factory for the Mistral backend
pub struct MistralFactory;

impl BackendFactory for MistralFactory {
    fn create(&self, config: &BackendConfig) -> Result<Box<dyn ChatBackend>, BackendError> {
        Ok(Box::new(MistralBackend::new(config)?))
    }

    fn info(&self) -> BackendInfo {
        BackendInfo {
            name: providers::MISTRAL.to_string(),
            description: "Hosted Mistral API".to_string(),
            requires_api_key: true,
        }
    }
}

/// Factory for the Ollama backend
pub struct OllamaFactory;

impl BackendFactory for OllamaFactory {
    fn create(&self, config: &BackendConfig) -> Result<Box<dyn ChatBackend>, BackendError> {
        Ok(Box::new(OllamaBackend::new(config)?))
    }

    fn info(&self) -> BackendInfo {
        BackendInfo {
            name: providers::OLLAMA.to_string(),
            description: "Local Ollama daemon".to_string(),
            requires_api_key: false,
        }
    }
}

/// Registry of available chat backends
pub struct BackendRegistry {
    factories: HashMap<String, Box<dyn BackendFactory>>,
}

impl BackendRegistry {
    /// Create a new registry with all built-in backends registered
    pub fn new() -> Self {
        let mut registry = Self {
            factories: HashMap::new(),
        };

        registry.register(providers::MISTRAL, Box::new(MistralFactory));
        registry.register(providers::OLLAMA, Box::new(OllamaFactory));

        registry
    }

    /// Register a backend factory
    pub fn register(&mut self, name: &str, factory: Box<dyn BackendFactory>) {
        self.factories.insert(name.to_string(), factory);
    }

    /// List all available backend names, sorted
    pub fn available_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Get information about all registered backends
    pub fn list(&self) -> Vec<BackendInfo> {
        self.factories.values().map(|f| f.info()).collect()
    }

    /// Create a backend instance by name (case-insensitive)
    pub fn create(
        &self,
        name: &str,
        config: &BackendConfig,
    ) -> Result<Box<dyn ChatBackend>, BackendError> {
        self.factories
            .get(&name.to_ascii_lowercase())
            .ok_or_else(|| {
                BackendError::Config(format!(
                    "Unknown backend '{}', expected one of: {}",
                    name,
                    self.available_names().join(", ")
                ))
            })?
            .create(config)
    }

    /// Check if a backend is available
    pub fn is_available(&self, name: &str) -> bool {
        self.factories.contains_key(&name.to_ascii_lowercase())
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::new()
    }
}
