// tests/evaluator_test.rs — Integration test: evaluation engine end to end

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hackeval::evaluator::criteria::Criteria;
use hackeval::evaluator::fallback::{FallbackConfig, ScoreRange};
use hackeval::evaluator::insights::{INSIGHTS_UNAVAILABLE, NO_EVALUATIONS};
use hackeval::evaluator::types::{EvaluationSource, EvaluationSummary, ProjectSubmission};
use hackeval::evaluator::Evaluator;
use hackeval::infra::errors::EvalError;
use hackeval::provider::client::CompletionClient;
use hackeval::provider::{ChatRequest, ChatResponse, ModelProvider, StopReason, TokenUsage};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Provider that answers every request the same way and counts calls.
struct MockProvider {
    response: Result<String, EvalError>,
    delay: Duration,
    calls: AtomicUsize,
}

impl MockProvider {
    fn ok(text: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(text.to_string()),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        })
    }

    fn failing(error: EvalError) -> Arc<Self> {
        Arc::new(Self {
            response: Err(error),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        })
    }

    fn slow(text: &str, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(text.to_string()),
            delay,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelProvider for MockProvider {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock"
    }

    async fn chat(&self, _request: ChatRequest) -> Result<ChatResponse, EvalError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.response.clone().map(|content| ChatResponse {
            content,
            usage: TokenUsage::default(),
            stop_reason: StopReason::EndTurn,
        })
    }
}

fn evaluator(provider: Arc<MockProvider>) -> Evaluator {
    let client =
        CompletionClient::new(provider, "mock-model").with_timeout(Duration::from_millis(200));
    Evaluator::new(client, Criteria::default(), FallbackConfig::default())
        .with_rng(StdRng::seed_from_u64(42))
}

fn submission() -> ProjectSubmission {
    ProjectSubmission::new(
        "Budget Buddy",
        "Coin Crew",
        "Helps students track spending and plan a monthly budget.",
    )
    .with_raw("tech_stack", "Rust, SQLite")
}

const FULL_RESPONSE: &str = r#"Here is my evaluation:
```json
{
  "innovation_score": 80,
  "innovation_feedback": "Fresh take on budgeting.",
  "technical_score": 70,
  "technical_feedback": "Solid but simple.",
  "impact_score": 90,
  "impact_feedback": "Helps many students.",
  "presentation_score": 60,
  "presentation_feedback": "Demo was rushed.",
  "overall_assessment": "Promising project.",
  "strengths": ["Clear problem", "Working demo"],
  "improvements": ["Polish the UI"]
}
```"#;

#[tokio::test]
async fn test_ai_evaluation_uses_weighted_overall() {
    let provider = MockProvider::ok(FULL_RESPONSE);
    let e = evaluator(provider.clone());
    let s = submission();

    let result = e.evaluate(&s).await;

    assert_eq!(provider.calls(), 1);
    assert_eq!(result.source, EvaluationSource::Ai);
    assert_eq!(result.project_id, s.id);
    // 80*.25 + 70*.30 + 90*.25 + 60*.20
    assert_eq!(result.overall_score, 75.5);
    let names: Vec<&str> = result.scores.iter().map(|c| c.criterion.as_str()).collect();
    assert_eq!(names, vec!["innovation", "technical", "impact", "presentation"]);
    assert!(result
        .feedback
        .starts_with("Overall Assessment: Promising project."));
    assert!(result
        .feedback
        .contains("Innovation (80/100): Fresh take on budgeting."));
    assert!(result
        .feedback
        .ends_with("Areas for Improvement: Polish the UI"));
    assert_eq!(result.detailed_scores.strengths.len(), 2);
}

#[tokio::test]
async fn test_transport_failure_falls_back() {
    let provider = MockProvider::failing(EvalError::transport("mock", "connection reset"));
    let e = evaluator(provider.clone());

    let result = e.evaluate(&submission()).await;

    assert_eq!(provider.calls(), 1);
    assert_eq!(result.source, EvaluationSource::Fallback);
    assert_eq!(result.scores.len(), 4);
    assert!(result.feedback.starts_with("Evaluation completed with varied scoring."));
}

#[tokio::test]
async fn test_auth_and_rate_limit_fall_back() {
    for error in [
        EvalError::Auth {
            provider: "mock".into(),
            message: "bad key".into(),
        },
        EvalError::RateLimit {
            provider: "mock".into(),
            retry_after_ms: 5000,
        },
    ] {
        let result = evaluator(MockProvider::failing(error))
            .evaluate(&submission())
            .await;
        assert_eq!(result.source, EvaluationSource::Fallback);
    }
}

#[tokio::test]
async fn test_timeout_falls_back() {
    let provider = MockProvider::slow(FULL_RESPONSE, Duration::from_secs(5));
    let e = evaluator(provider.clone());

    let err = e.evaluate_with_ai(&submission()).await.unwrap_err();
    assert_eq!(err.kind(), "transport");

    let result = e.evaluate(&submission()).await;
    assert_eq!(result.source, EvaluationSource::Fallback);
}

#[tokio::test]
async fn test_unreadable_response_scores_default_record() {
    let e = evaluator(MockProvider::ok("I cannot evaluate this project."));
    let result = e.evaluate(&submission()).await;

    assert_eq!(result.source, EvaluationSource::Ai);
    assert_eq!(result.score("innovation"), Some(75.0));
    assert_eq!(result.score("technical"), Some(70.0));
    assert_eq!(result.score("impact"), Some(80.0));
    assert_eq!(result.score("presentation"), Some(75.0));
    // 75*.25 + 70*.30 + 80*.25 + 75*.20
    assert_eq!(result.overall_score, 74.75);
}

#[tokio::test]
async fn test_out_of_range_scores_are_clamped() {
    let e = evaluator(MockProvider::ok(
        r#"{"innovation_score": 140, "technical_score": -10, "impact_score": "90", "presentation_score": 100}"#,
    ));
    let result = e.evaluate(&submission()).await;

    assert_eq!(result.source, EvaluationSource::Ai);
    assert_eq!(result.score("innovation"), Some(100.0));
    assert_eq!(result.score("technical"), Some(0.0));
    assert!((0.0..=100.0).contains(&result.overall_score));
}

#[tokio::test]
async fn test_fallback_bonuses_apply() {
    let criteria = Criteria::default();
    let fallback = FallbackConfig {
        ranges: criteria
            .names()
            .map(|n| (n.to_string(), ScoreRange(70, 70)))
            .collect(),
        ..FallbackConfig::default()
    };
    let client = CompletionClient::new(
        MockProvider::failing(EvalError::transport("mock", "down")),
        "mock-model",
    );
    let e = Evaluator::new(client, criteria, fallback).with_rng(StdRng::seed_from_u64(1));

    let s = ProjectSubmission::new("Ledger", "Team", "x".repeat(250))
        .with_raw("tech_stack", "Python, OpenAI")
        .with_raw("challenge_category", "FinTech");
    let result = e.evaluate(&s).await;

    assert_eq!(result.source, EvaluationSource::Fallback);
    assert_eq!(result.score("innovation"), Some(70.0));
    assert_eq!(result.score("technical"), Some(75.0));
    assert_eq!(result.score("impact"), Some(75.0));
    assert_eq!(result.score("presentation"), Some(75.0));
    // Plain mean on the fallback path
    assert_eq!(result.overall_score, 73.75);
}

#[tokio::test]
async fn test_insights_without_evaluations_makes_no_call() {
    let provider = MockProvider::ok("unused");
    let e = evaluator(provider.clone());

    assert_eq!(e.insights(&[]).await, NO_EVALUATIONS);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_insights_returns_completion_text() {
    let provider = MockProvider::ok("Most teams built fintech tools.");
    let e = evaluator(provider.clone());
    let result = e.evaluate(&submission()).await;
    let summary = EvaluationSummary::from_result("Budget Buddy", "Coin Crew", &result);

    assert_eq!(
        e.insights(&[summary]).await,
        "Most teams built fintech tools."
    );
}

#[tokio::test]
async fn test_insights_failure_returns_apology() {
    let provider = MockProvider::failing(EvalError::transport("mock", "down"));
    let e = evaluator(provider.clone());
    let result = e.evaluate(&submission()).await;
    let summary = EvaluationSummary::from_result("Budget Buddy", "Coin Crew", &result);

    assert_eq!(e.insights(&[summary]).await, INSIGHTS_UNAVAILABLE);
}
