// src/evaluator/mod.rs — Evaluation engine

pub mod criteria;
pub mod fallback;
pub mod feedback;
pub mod insights;
pub mod parser;
pub mod prompt;
pub mod types;
pub mod utils;

use std::sync::Mutex;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::infra::errors::EvalError;
use crate::provider::client::CompletionClient;
use criteria::Criteria;
use fallback::FallbackConfig;
use types::*;

/// Turns submissions into scored verdicts.
///
/// `evaluate` always returns a complete result: any failure on the
/// AI-assisted path is replaced by heuristic fallback scoring.
pub struct Evaluator {
    client: CompletionClient,
    criteria: Criteria,
    fallback: FallbackConfig,
    rng: Mutex<Box<dyn RngCore + Send>>,
}

impl Evaluator {
    pub fn new(client: CompletionClient, criteria: Criteria, fallback: FallbackConfig) -> Self {
        Self {
            client,
            criteria,
            fallback,
            rng: Mutex::new(Box::new(StdRng::from_entropy())),
        }
    }

    /// Replace the randomness source used by fallback scoring.
    pub fn with_rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Mutex::new(Box::new(rng));
        self
    }

    /// Evaluate one submission. Never fails.
    pub async fn evaluate(&self, submission: &ProjectSubmission) -> EvaluationResult {
        match self.evaluate_with_ai(submission).await {
            Ok(result) => {
                tracing::info!(
                    project = %submission.id,
                    overall = result.overall_score,
                    "AI evaluation complete"
                );
                result
            }
            Err(e) => {
                tracing::warn!(
                    project = %submission.id,
                    error_kind = e.kind(),
                    "AI evaluation failed: {}, using fallback scoring",
                    e
                );
                self.evaluate_fallback(submission)
            }
        }
    }

    /// The AI-assisted path: prompt, complete, parse, aggregate, compose.
    pub async fn evaluate_with_ai(
        &self,
        submission: &ProjectSubmission,
    ) -> Result<EvaluationResult, EvalError> {
        let prompt = prompt::evaluation_prompt(submission, &self.criteria);
        let response = self.client.complete(&prompt).await?;
        tracing::debug!(response_chars = response.len(), "Evaluation response received");

        let mut record = parser::parse_eval_response(&response);
        record.retain_criteria(self.criteria.names());
        let overall_score = utils::weighted_overall(&record, &self.criteria)?;
        let scores = self.require_scores(&record)?;
        let feedback = feedback::compose_feedback(&record, &self.criteria);

        Ok(EvaluationResult {
            evaluation_id: uuid::Uuid::new_v4().to_string(),
            project_id: submission.id.clone(),
            scores,
            overall_score,
            feedback,
            detailed_scores: record,
            source: EvaluationSource::Ai,
            timestamp: Utc::now(),
        })
    }

    /// The heuristic path on its own.
    pub fn evaluate_fallback(&self, submission: &ProjectSubmission) -> EvaluationResult {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        fallback::fallback_evaluation(submission, &self.criteria, &self.fallback, &mut **rng)
    }

    /// Every criterion must have a score before a result can be built.
    fn require_scores(&self, record: &ScoredRecord) -> Result<Vec<CriterionScore>, EvalError> {
        self.criteria
            .iter()
            .map(|c| {
                record
                    .score(&c.name)
                    .map(|score| CriterionScore {
                        criterion: c.name.clone(),
                        score,
                    })
                    .ok_or_else(|| EvalError::Parse(format!("missing score for {}", c.name)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{ChatRequest, ChatResponse, ModelProvider, StopReason, TokenUsage};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct Canned(Result<String, EvalError>);

    #[async_trait]
    impl ModelProvider for Canned {
        fn id(&self) -> &str {
            "canned"
        }

        fn name(&self) -> &str {
            "Canned"
        }

        async fn chat(&self, _request: ChatRequest) -> Result<ChatResponse, EvalError> {
            self.0.clone().map(|content| ChatResponse {
                content,
                usage: TokenUsage::default(),
                stop_reason: StopReason::EndTurn,
            })
        }
    }

    fn evaluator(response: Result<String, EvalError>) -> Evaluator {
        let client = CompletionClient::new(Arc::new(Canned(response)), "test-model");
        Evaluator::new(client, Criteria::default(), FallbackConfig::default())
            .with_rng(StdRng::seed_from_u64(11))
    }

    fn submission() -> ProjectSubmission {
        ProjectSubmission::new("Budget Buddy", "Coin Crew", "Helps students budget.")
            .with_id("proj-1")
    }

    #[tokio::test]
    async fn test_ai_path_weighted() {
        let e = evaluator(Ok(
            "{\"innovation_score\":80,\"technical_score\":70,\"impact_score\":90,\"presentation_score\":60,\"overall_assessment\":\"Nice\"}".into(),
        ));
        let result = e.evaluate(&submission()).await;
        assert_eq!(result.source, EvaluationSource::Ai);
        assert_eq!(result.overall_score, 75.5);
        assert_eq!(result.project_id, "proj-1");
        assert_eq!(result.feedback, "Overall Assessment: Nice");
        assert_eq!(result.scores.len(), 4);
        assert_eq!(result.score("impact"), Some(90.0));
    }

    #[tokio::test]
    async fn test_non_criterion_scores_are_dropped() {
        let e = evaluator(Ok(
            "{\"innovation_score\":80,\"technical_score\":70,\"impact_score\":90,\"presentation_score\":60,\"overall_score\":95,\"overall_feedback\":\"Great\"}".into(),
        ));
        let result = e.evaluate(&submission()).await;
        assert_eq!(result.source, EvaluationSource::Ai);
        assert_eq!(result.overall_score, 75.5);
        assert_eq!(result.detailed_scores.score("overall"), None);
        assert_eq!(result.detailed_scores.feedback_for("overall"), None);
        assert_eq!(result.detailed_scores.scores.len(), 4);
        assert!(result.detailed_scores.to_value().get("overall_score").is_none());
    }

    #[tokio::test]
    async fn test_missing_score_goes_to_fallback() {
        let e = evaluator(Ok("{\"innovation_score\": 80}".into()));
        let err = e.evaluate_with_ai(&submission()).await.unwrap_err();
        assert_eq!(err, EvalError::Parse("missing score for technical".into()));

        let result = e.evaluate(&submission()).await;
        assert_eq!(result.source, EvaluationSource::Fallback);
    }

    #[tokio::test]
    async fn test_no_scores_is_aggregation_error() {
        let e = evaluator(Ok("{\"overall_assessment\": \"hmm\"}".into()));
        let err = e.evaluate_with_ai(&submission()).await.unwrap_err();
        assert_eq!(err, EvalError::Aggregation);
    }

    #[tokio::test]
    async fn test_unreadable_response_uses_default_record() {
        let e = evaluator(Ok("Sorry, I can't help with that.".into()));
        let result = e.evaluate(&submission()).await;
        assert_eq!(result.source, EvaluationSource::Ai);
        // 75*.25 + 70*.30 + 80*.25 + 75*.20
        assert_eq!(result.overall_score, 74.75);
        assert_eq!(result.detailed_scores, parser::default_record());
    }

    #[tokio::test]
    async fn test_fresh_ids_per_call() {
        let e = evaluator(Err(EvalError::transport("canned", "down")));
        let a = e.evaluate(&submission()).await;
        let b = e.evaluate(&submission()).await;
        assert_ne!(a.evaluation_id, b.evaluation_id);
    }
}
