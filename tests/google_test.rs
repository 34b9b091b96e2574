// tests/google_test.rs — Integration test: Gemini client against a mock server

use std::sync::Arc;

use hackeval::evaluator::criteria::Criteria;
use hackeval::evaluator::fallback::FallbackConfig;
use hackeval::evaluator::types::{EvaluationSource, ProjectSubmission};
use hackeval::evaluator::Evaluator;
use hackeval::infra::errors::EvalError;
use hackeval::provider::client::CompletionClient;
use hackeval::provider::google::GoogleProvider;
use hackeval::provider::{ChatRequest, ModelProvider, StopReason};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/models/gemini-2.0-flash:generateContent";

fn provider(server: &MockServer) -> GoogleProvider {
    GoogleProvider::new("test-key".into()).with_base_url(&server.uri())
}

fn request(prompt: &str) -> ChatRequest {
    ChatRequest {
        model: "gemini-2.0-flash".into(),
        prompt: prompt.into(),
        max_tokens: Some(256),
        temperature: Some(0.2),
    }
}

fn completion(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }],
        "usageMetadata": { "promptTokenCount": 12, "candidatesTokenCount": 34 }
    })
}

#[tokio::test]
async fn test_generate_content_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{ "role": "user", "parts": [{ "text": "Judge this" }] }],
            "generationConfig": { "maxOutputTokens": 256 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("Looks great")))
        .expect(1)
        .mount(&server)
        .await;

    let response = provider(&server).chat(request("Judge this")).await.unwrap();

    assert_eq!(response.content, "Looks great");
    assert_eq!(response.usage.input_tokens, 12);
    assert_eq!(response.usage.output_tokens, 34);
    assert_eq!(response.stop_reason, StopReason::EndTurn);
}

#[tokio::test]
async fn test_unauthorized_is_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&server)
        .await;

    let err = provider(&server).chat(request("x")).await.unwrap_err();
    assert!(matches!(err, EvalError::Auth { .. }), "{err:?}");
}

#[tokio::test]
async fn test_too_many_requests_is_rate_limit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = provider(&server).chat(request("x")).await.unwrap_err();
    assert_eq!(
        err,
        EvalError::RateLimit {
            provider: "google".into(),
            retry_after_ms: 5000
        }
    );
}

#[tokio::test]
async fn test_empty_candidates_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let err = provider(&server).chat(request("x")).await.unwrap_err();
    assert_eq!(err.kind(), "transport");
}

#[tokio::test]
async fn test_server_error_evaluation_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let client = CompletionClient::new(Arc::new(provider(&server)), "gemini-2.0-flash");
    let evaluator = Evaluator::new(client, Criteria::default(), FallbackConfig::default());
    let result = evaluator
        .evaluate(&ProjectSubmission::new("Budget Buddy", "Coin Crew", "Budgeting app"))
        .await;

    assert_eq!(result.source, EvaluationSource::Fallback);
    assert!((0.0..=100.0).contains(&result.overall_score));
}

#[tokio::test]
async fn test_evaluation_through_gemini() {
    let server = MockServer::start().await;
    let answer = json!({
        "innovation_score": 80,
        "technical_score": 70,
        "impact_score": 90,
        "presentation_score": 60,
        "overall_assessment": "Strong entry."
    })
    .to_string();
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(&answer)))
        .mount(&server)
        .await;

    let client = CompletionClient::new(Arc::new(provider(&server)), "gemini-2.0-flash");
    let evaluator = Evaluator::new(client, Criteria::default(), FallbackConfig::default());
    let result = evaluator
        .evaluate(&ProjectSubmission::new("Budget Buddy", "Coin Crew", "Budgeting app"))
        .await;

    assert_eq!(result.source, EvaluationSource::Ai);
    assert_eq!(result.overall_score, 75.5);
}
