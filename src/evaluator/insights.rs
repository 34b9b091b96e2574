// src/evaluator/insights.rs — Narrative trends report across evaluations

use super::prompt::insights_prompt;
use super::types::EvaluationSummary;
use super::Evaluator;

pub const NO_EVALUATIONS: &str = "No evaluations available for insights.";
pub const INSIGHTS_UNAVAILABLE: &str =
    "Insights generation encountered an issue. Please try again later.";

impl Evaluator {
    /// Ask the completion service for a trends report. Never fails.
    ///
    /// The completion text is returned verbatim.
    pub async fn insights(&self, summaries: &[EvaluationSummary]) -> String {
        if summaries.is_empty() {
            return NO_EVALUATIONS.to_string();
        }

        let prompt = insights_prompt(summaries);
        match self.client.complete(&prompt).await {
            Ok(report) => report,
            Err(e) => {
                tracing::warn!(error_kind = e.kind(), "Insights generation failed: {}", e);
                INSIGHTS_UNAVAILABLE.to_string()
            }
        }
    }
}
