use super::LlmClient;
use crate::model::LlmResponse;
use async_trait::async_trait;
use std::sync::Mutex;

type Responder = dyn Fn(&str) -> anyhow::Result<String> + Send + Sync;

/// Offline client answering each prompt through a closure.
///
/// Every prompt is recorded so callers can check call order.
pub struct FakeClient {
    responder: Box<Responder>,
    prompts: Mutex<Vec<String>>,
}

impl FakeClient {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&str) -> anyhow::Result<String> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Always replies with `text`.
    pub fn constant(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(move |_| Ok(text.clone()))
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl LlmClient for FakeClient {
    async fn complete(&self, prompt: &str) -> anyhow::Result<LlmResponse> {
        if let Ok(mut p) = self.prompts.lock() {
            p.push(prompt.to_string());
        }
        let text = (self.responder)(prompt)?;
        Ok(LlmResponse {
            text,
            provider: "fake".to_string(),
            model: "fake".to_string(),
            meta: serde_json::json!({}),
        })
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}
