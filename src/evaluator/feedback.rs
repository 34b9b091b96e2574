// src/evaluator/feedback.rs — Human-readable feedback block

use super::criteria::Criteria;
use super::types::ScoredRecord;
use super::utils::{format_score, title_case};

/// Compose the feedback text shown to teams.
///
/// Blocks, separated by a blank line: overall assessment, one line per
/// criterion that has feedback (table order), strengths, improvements.
pub fn compose_feedback(record: &ScoredRecord, criteria: &Criteria) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(ref assessment) = record.overall_assessment {
        parts.push(format!("Overall Assessment: {assessment}"));
    }

    for c in criteria {
        if let Some(text) = record.feedback_for(&c.name) {
            let score = record
                .score(&c.name)
                .map(format_score)
                .unwrap_or_else(|| "?".into());
            parts.push(format!("{} ({}/100): {}", title_case(&c.name), score, text));
        }
    }

    if !record.strengths.is_empty() {
        parts.push(format!("Key Strengths: {}", record.strengths.join(", ")));
    }

    if !record.improvements.is_empty() {
        parts.push(format!(
            "Areas for Improvement: {}",
            record.improvements.join(", ")
        ));
    }

    parts.join("\n\n")
}
