// src/provider/client.rs — Single-shot, time-bounded completion
//
// The engine only needs `complete(prompt) -> text`. This wraps a provider
// with the model choice, generation settings, and a hard timeout. There is
// no retry: one attempt, then the caller falls back.

use std::sync::Arc;
use std::time::Duration;

use super::{ChatRequest, ModelProvider};
use crate::infra::config::ProviderConfig;
use crate::infra::errors::EvalError;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Clone)]
pub struct CompletionClient {
    provider: Arc<dyn ModelProvider>,
    model: String,
    timeout: Duration,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

impl CompletionClient {
    pub fn new(provider: Arc<dyn ModelProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            timeout: DEFAULT_TIMEOUT,
            max_tokens: None,
            temperature: None,
        }
    }

    pub fn from_config(provider: Arc<dyn ModelProvider>, config: &ProviderConfig) -> Self {
        Self::new(provider, config.model.clone())
            .with_timeout(Duration::from_secs(config.timeout_seconds))
            .with_max_tokens(config.max_tokens)
            .with_temperature(config.temperature)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Send one prompt, return the raw completion text.
    ///
    /// An elapsed timeout is reported as a transport error.
    pub async fn complete(&self, prompt: &str) -> Result<String, EvalError> {
        let request = ChatRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        tracing::debug!(
            provider = self.provider.id(),
            model = %self.model,
            prompt_chars = prompt.len(),
            "Requesting completion"
        );

        match tokio::time::timeout(self.timeout, self.provider.chat(request)).await {
            Ok(result) => result.map(|r| {
                tracing::debug!(
                    total_tokens = r.usage.total(),
                    stop_reason = ?r.stop_reason,
                    "Completion received"
                );
                r.content
            }),
            Err(_) => Err(EvalError::transport(
                self.provider.id(),
                format!("timed out after {}ms", self.timeout.as_millis()),
            )),
        }
    }
}
