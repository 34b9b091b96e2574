// src/cli/insights.rs — Cross-project trends report

use crate::evaluator::Evaluator;
use crate::store::EvaluationStore;

pub async fn run_insights(evaluator: &Evaluator, store: &dyn EvaluationStore) -> anyhow::Result<()> {
    let summaries = store.summaries()?;
    tracing::info!(projects = summaries.len(), "Generating insights");
    let report = evaluator.insights(&summaries).await;
    println!("{report}");
    Ok(())
}
