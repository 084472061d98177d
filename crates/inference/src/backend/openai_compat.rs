//! Shared request/response handling for OpenAI-compatible chat endpoints

use std::time::Duration;

use crate::config::BackendConfig;
use crate::constants::endpoints;
use crate::types::{ChatRequest, ChatResponse};

use super::BackendError;

/// Build an HTTP client with the configured timeout
pub(crate) fn build_client(config: &BackendConfig) -> Result<reqwest::Client, BackendError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()
        .map_err(BackendError::Http)
}

/// Strip trailing slashes so endpoint paths can be appended directly
pub(crate) fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// POST a chat completion request and extract the first choice's text
pub(crate) async fn post_chat(
    client: &reqwest::Client,
    base_url: &str,
    api_key: Option<&str>,
    request: &ChatRequest,
) -> Result<String, BackendError> {
    let url = format!("{}{}", base_url, endpoints::CHAT_COMPLETIONS);

    let mut builder = client.post(&url).json(request);
    if let Some(key) = api_key {
        builder = builder.bearer_auth(key);
    }

    let response = builder.send().await.map_err(BackendError::Http)?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(BackendError::Api {
            status: status.as_u16(),
            body,
        });
    }

    let completion: ChatResponse = response
        .json()
        .await
        .map_err(|e| BackendError::Inference(format!("Failed to parse response: {}", e)))?;

    if let Some(choice) = completion.choices.first() {
        if let Some(reason) = choice.finish_reason.as_deref() {
            if reason != "stop" {
                log::debug!("Completion finished with reason '{}'", reason);
            }
        }
    }

    completion
        .first_text()
        .map(str::to_string)
        .ok_or(BackendError::EmptyResponse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url("http://host:1/"), "http://host:1");
        assert_eq!(normalize_base_url("http://host:1"), "http://host:1");
    }

    #[test]
    fn test_transient_classification() {
        let rate_limited = BackendError::Api {
            status: 429,
            body: String::new(),
        };
        let unavailable = BackendError::Api {
            status: 503,
            body: String::new(),
        };
        let unauthorized = BackendError::Api {
            status: 401,
            body: String::new(),
        };
        assert!(rate_limited.is_transient());
        assert!(unavailable.is_transient());
        assert!(!unauthorized.is_transient());
        assert!(!BackendError::EmptyResponse.is_transient());
        assert!(!BackendError::Inference("bad".to_string()).is_transient());
    }
}
