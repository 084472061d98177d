//! In-memory backend for pipeline and handler tests

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use inference::{
    BackendError, ChatBackend, ChatRequest, InferenceGateway, ModelSettings, RetryPolicy, Role,
    SharedGateway,
};

type ErrorFn = Box<dyn Fn() -> BackendError + Send + Sync>;

enum Reply {
    Text(String),
    Error(ErrorFn),
}

/// Backend that answers every request with the same reply
pub struct FixedBackend {
    reply: Reply,
    calls: Arc<AtomicU32>,
    system_prompts: Arc<Mutex<Vec<String>>>,
}

impl FixedBackend {
    pub fn text(output: &str) -> Self {
        Self::with_reply(Reply::Text(output.to_string()))
    }

    pub fn error(make: impl Fn() -> BackendError + Send + Sync + 'static) -> Self {
        Self::with_reply(Reply::Error(Box::new(make)))
    }

    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            calls: Arc::new(AtomicU32::new(0)),
            system_prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Arc<AtomicU32> {
        self.calls.clone()
    }

    pub fn seen_system_prompts(&self) -> Arc<Mutex<Vec<String>>> {
        self.system_prompts.clone()
    }
}

#[async_trait]
impl ChatBackend for FixedBackend {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn description(&self) -> &'static str {
        "canned replies"
    }

    fn base_url(&self) -> &str {
        "memory://"
    }

    async fn health_check(&self) -> bool {
        true
    }

    async fn chat_completion(&self, request: &ChatRequest) -> Result<String, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(system) = request.messages.iter().find(|m| m.role == Role::System) {
            self.system_prompts
                .lock()
                .unwrap()
                .push(system.content.clone());
        }
        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Error(make) => Err(make()),
        }
    }
}

pub fn gateway_with(backend: FixedBackend) -> SharedGateway {
    Arc::new(
        InferenceGateway::new(Box::new(backend), ModelSettings::default())
            .with_retry(RetryPolicy::none()),
    )
}
