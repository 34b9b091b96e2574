// src/infra/errors.rs — Error types for the evaluation engine

use thiserror::Error;

/// Everything that can go wrong on the AI-assisted evaluation path.
///
/// None of these reach the caller of `Evaluator::evaluate`; they select the
/// fallback path and are logged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Transport error from '{provider}': {message}")]
    Transport { provider: String, message: String },

    #[error("Authentication rejected by '{provider}': {message}")]
    Auth { provider: String, message: String },

    #[error("Rate limited by '{provider}', retry after {retry_after_ms}ms")]
    RateLimit {
        provider: String,
        retry_after_ms: u64,
    },

    #[error("Could not parse evaluation response: {0}")]
    Parse(String),

    #[error("No criterion scores present to aggregate")]
    Aggregation,
}

impl EvalError {
    pub fn transport(provider: impl Into<String>, message: impl Into<String>) -> Self {
        EvalError::Transport {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Short label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            EvalError::Transport { .. } => "transport",
            EvalError::Auth { .. } => "auth",
            EvalError::RateLimit { .. } => "rate_limit",
            EvalError::Parse(_) => "parse",
            EvalError::Aggregation => "aggregation",
        }
    }
}
