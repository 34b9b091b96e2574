// src/provider/mod.rs — Completion provider layer

pub mod client;
pub mod google;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::infra::config::ProviderConfig;
use crate::infra::errors::EvalError;

/// Core trait that completion backends implement.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    fn id(&self) -> &str;
    fn name(&self) -> &str;

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, EvalError>;
}

/// One completion request: a single user turn.
#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    pub model: String,
    pub prompt: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone)]
pub struct ChatResponse {
    pub content: String,
    pub usage: TokenUsage,
    pub stop_reason: StopReason,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl TokenUsage {
    pub fn total(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub enum StopReason {
    EndTurn,
    MaxTokens,
    Safety,
    #[default]
    Unknown,
}

/// Stand-in used when no API key is configured: every call fails with an
/// auth error, so evaluations go straight to fallback scoring without
/// touching the network.
pub struct UnconfiguredProvider {
    reason: String,
}

impl UnconfiguredProvider {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl ModelProvider for UnconfiguredProvider {
    fn id(&self) -> &str {
        "unconfigured"
    }

    fn name(&self) -> &str {
        "Unconfigured"
    }

    async fn chat(&self, _request: ChatRequest) -> Result<ChatResponse, EvalError> {
        Err(EvalError::Auth {
            provider: "unconfigured".into(),
            message: self.reason.clone(),
        })
    }
}

/// Build the provider described by config, reading the API key from the
/// configured environment variable.
pub fn resolve_provider(config: &ProviderConfig) -> Arc<dyn ModelProvider> {
    match std::env::var(&config.api_key_env) {
        Ok(key) if !key.trim().is_empty() => {
            let provider = google::GoogleProvider::new(key).with_base_url(&config.base_url);
            Arc::new(provider)
        }
        _ => {
            tracing::warn!(
                env = %config.api_key_env,
                "No API key configured; evaluations will use fallback scoring"
            );
            Arc::new(UnconfiguredProvider::new(format!(
                "{} is not set",
                config.api_key_env
            )))
        }
    }
}
