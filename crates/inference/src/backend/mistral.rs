//! Mistral backend implementation
//!
//! Talks to the hosted Mistral API (or any OpenAI-compatible proxy in front
//! of it) using bearer-token authentication.

use async_trait::async_trait;

use super::openai_compat::{build_client, normalize_base_url, post_chat};
use super::{BackendError, ChatBackend};
use crate::config::BackendConfig;
use crate::constants::{endpoints, urls};
use crate::types::ChatRequest;

/// Backend for the hosted Mistral chat completions API
pub struct MistralBackend {
    /// HTTP client for API requests
    http_client: reqwest::Client,
    /// Base URL of the API
    base_url: String,
    /// Bearer token
    api_key: String,
}

impl MistralBackend {
    /// Create a new Mistral backend. Fails without an API key.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| BackendError::Config("Mistral API key is not set".to_string()))?;

        Ok(Self {
            http_client: build_client(config)?,
            base_url: normalize_base_url(config.base_url.as_deref().unwrap_or(urls::MISTRAL)),
            api_key,
        })
    }
}

#[async_trait]
impl ChatBackend for MistralBackend {
    fn name(&self) -> &'static str {
        "mistral"
    }

    fn description(&self) -> &'static str {
        "Hosted Mistral API with bearer-token authentication"
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn health_check(&self) -> bool {
        let url = format!("{}{}", self.base_url, endpoints::MISTRAL_MODELS);
        match self
            .http_client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    async fn chat_completion(&self, request: &ChatRequest) -> Result<String, BackendError> {
        post_chat(&self.http_client, &self.base_url, Some(&self.api_key), request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::test_support::spawn_provider;
    use crate::types::ChatMessage;
    use axum::{
        http::{HeaderMap, StatusCode},
        routing::{get, post},
        Json, Router,
    };

    fn config(base_url: Option<String>) -> BackendConfig {
        BackendConfig {
            base_url,
            api_key: Some("secret".to_string()),
            ..Default::default()
        }
    }

    fn request() -> ChatRequest {
        ChatRequest {
            model: "mistral-large-latest".to_string(),
            messages: vec![ChatMessage::system("rules"), ChatMessage::user("draw")],
            stream: false,
            max_tokens: None,
            temperature: None,
            response_format: None,
        }
    }

    #[test]
    fn test_requires_api_key() {
        let missing = BackendConfig::default();
        assert!(matches!(
            MistralBackend::new(&missing),
            Err(BackendError::Config(_))
        ));

        let blank = BackendConfig {
            api_key: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(MistralBackend::new(&blank).is_err());
    }

    #[test]
    fn test_default_base_url() {
        let backend = MistralBackend::new(&config(None)).unwrap();
        assert_eq!(backend.base_url(), "https://api.mistral.ai");
        assert_eq!(backend.name(), "mistral");
    }

    #[tokio::test]
    async fn test_chat_completion_sends_auth_and_messages() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|headers: HeaderMap, Json(body): Json<serde_json::Value>| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                if auth != "Bearer secret" {
                    return (StatusCode::UNAUTHORIZED, Json(serde_json::json!({})));
                }
                let roles: Vec<String> = body["messages"]
                    .as_array()
                    .unwrap()
                    .iter()
                    .map(|m| m["role"].as_str().unwrap().to_string())
                    .collect();
                (
                    StatusCode::OK,
                    Json(serde_json::json!({
                        "choices": [{"message": {"role": "assistant", "content": roles.join(",")}}]
                    })),
                )
            }),
        );
        let base_url = spawn_provider(app).await;

        let backend = MistralBackend::new(&config(Some(format!("{}/", base_url)))).unwrap();
        let text = backend.chat_completion(&request()).await.unwrap();
        assert_eq!(text, "system,user");
    }

    #[tokio::test]
    async fn test_api_error_is_reported_with_status() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "overloaded") }),
        );
        let base_url = spawn_provider(app).await;

        let backend = MistralBackend::new(&config(Some(base_url))).unwrap();
        match backend.chat_completion(&request()).await {
            Err(err @ BackendError::Api { status: 503, .. }) => assert!(err.is_transient()),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_content_is_empty_response() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|| async { Json(serde_json::json!({"choices": []})) }),
        );
        let base_url = spawn_provider(app).await;

        let backend = MistralBackend::new(&config(Some(base_url))).unwrap();
        assert!(matches!(
            backend.chat_completion(&request()).await,
            Err(BackendError::EmptyResponse)
        ));
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = Router::new().route("/v1/models", get(|| async { "{}" }));
        let base_url = spawn_provider(app).await;

        let backend = MistralBackend::new(&config(Some(base_url))).unwrap();
        assert!(backend.health_check().await);
    }
}
