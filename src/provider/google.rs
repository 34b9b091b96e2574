// src/provider/google.rs — Google Generative AI (Gemini) provider

use async_trait::async_trait;

use super::{ChatRequest, ChatResponse, ModelProvider, StopReason, TokenUsage};
use crate::infra::errors::EvalError;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const PROVIDER: &str = "google";

pub struct GoogleProvider {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl GoogleProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Build the Gemini request body: one user turn plus generation settings.
    fn build_request_body(&self, request: &ChatRequest) -> serde_json::Value {
        let mut body = serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": request.prompt }],
            }],
        });

        let mut gen_config = serde_json::json!({});
        if let Some(max_tokens) = request.max_tokens {
            gen_config["maxOutputTokens"] = serde_json::json!(max_tokens);
        }
        if let Some(temp) = request.temperature {
            gen_config["temperature"] = serde_json::json!(temp);
        }
        if gen_config != serde_json::json!({}) {
            body["generationConfig"] = gen_config;
        }

        body
    }
}

/// Map a non-success HTTP status onto the engine's error taxonomy.
fn status_error(status: reqwest::StatusCode, body: &str) -> EvalError {
    let message = format!("HTTP {}: {}", status, body);
    match status.as_u16() {
        401 | 403 => EvalError::Auth {
            provider: PROVIDER.into(),
            message,
        },
        // Gemini reports a bad key as 400 INVALID_ARGUMENT.
        400 if body.contains("API_KEY_INVALID") => EvalError::Auth {
            provider: PROVIDER.into(),
            message,
        },
        429 => EvalError::RateLimit {
            provider: PROVIDER.into(),
            retry_after_ms: 5000,
        },
        _ => EvalError::transport(PROVIDER, message),
    }
}

#[async_trait]
impl ModelProvider for GoogleProvider {
    fn id(&self) -> &str {
        PROVIDER
    }

    fn name(&self) -> &str {
        "Google"
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, EvalError> {
        let body = self.build_request_body(&request);

        let url = format!("{}/models/{}:generateContent", self.base_url, request.model);

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| EvalError::transport(PROVIDER, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &error_body));
        }

        let resp: serde_json::Value = response
            .json()
            .await
            .map_err(|e| EvalError::transport(PROVIDER, format!("Failed to parse response: {e}")))?;

        let content: String = resp["candidates"][0]["content"]["parts"]
            .as_array()
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|p| p["text"].as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if content.is_empty() {
            return Err(EvalError::transport(PROVIDER, "empty completion"));
        }

        let usage = TokenUsage {
            input_tokens: resp["usageMetadata"]["promptTokenCount"]
                .as_u64()
                .unwrap_or(0) as u32,
            output_tokens: resp["usageMetadata"]["candidatesTokenCount"]
                .as_u64()
                .unwrap_or(0) as u32,
        };

        let stop_reason = match resp["candidates"][0]["finishReason"].as_str() {
            Some("STOP") => StopReason::EndTurn,
            Some("MAX_TOKENS") => StopReason::MaxTokens,
            Some("SAFETY") => StopReason::Safety,
            _ => StopReason::Unknown,
        };

        tracing::debug!(
            input_tokens = usage.input_tokens,
            output_tokens = usage.output_tokens,
            "Gemini completion received"
        );

        Ok(ChatResponse {
            content,
            usage,
            stop_reason,
        })
    }
}
