// src/evaluator/prompt.rs — Evaluation and insights prompts

use std::fmt::Write;

use super::criteria::Criteria;
use super::types::{EvaluationSummary, ProjectSubmission};

fn or_na(value: &str) -> &str {
    if value.trim().is_empty() {
        "N/A"
    } else {
        value
    }
}

/// Build the judging prompt for one submission.
///
/// Deterministic: raw_data is a sorted map, so the embedded JSON is stable.
pub fn evaluation_prompt(submission: &ProjectSubmission, criteria: &Criteria) -> String {
    let raw_data =
        serde_json::to_string_pretty(&submission.raw_data).unwrap_or_else(|_| "{}".into());

    let mut prompt = String::new();
    prompt.push_str(
        "You are an expert hackathon judge. Evaluate the following project comprehensively.\n\n",
    );

    prompt.push_str("PROJECT DETAILS:\n");
    let _ = writeln!(prompt, "- Project Name: {}", or_na(&submission.name));
    let _ = writeln!(prompt, "- Team: {}", or_na(&submission.team));
    let _ = writeln!(prompt, "- Description: {}", or_na(&submission.description));
    let _ = writeln!(prompt, "- Additional Data: {raw_data}");

    prompt.push_str("\nEVALUATION CRITERIA (score each from 1-100):\n");
    for (i, c) in criteria.iter().enumerate() {
        let _ = writeln!(
            prompt,
            "{}. {} (Weight: {}%): {}",
            i + 1,
            c.name.to_uppercase(),
            (c.weight * 100.0).round() as i64,
            c.description
        );
    }

    prompt.push_str("\nRespond with a JSON object in exactly this format:\n{\n");
    for c in criteria {
        let _ = writeln!(prompt, "  \"{}_score\": <score 1-100>,", c.name);
    }
    for c in criteria {
        let _ = writeln!(prompt, "  \"{}_feedback\": \"<detailed feedback>\",", c.name);
    }
    prompt.push_str(
        "  \"strengths\": [\"<strength 1>\", \"<strength 2>\", \"<strength 3>\"],\n\
         \x20 \"improvements\": [\"<improvement 1>\", \"<improvement 2>\", \"<improvement 3>\"],\n\
         \x20 \"overall_assessment\": \"<comprehensive assessment>\"\n}\n\n",
    );
    prompt.push_str(
        "Be thorough, fair, and constructive. Consider that this is a hackathon project built with limited time.",
    );

    prompt
}

/// Build the trends-report prompt over a set of evaluated projects.
pub fn insights_prompt(summaries: &[EvaluationSummary]) -> String {
    let list: Vec<serde_json::Value> = summaries.iter().map(|s| s.to_value()).collect();
    let blob = serde_json::to_string_pretty(&list).unwrap_or_else(|_| "[]".into());

    format!(
        "Based on the following hackathon project evaluations, provide key insights and trends:\n\n\
         {blob}\n\n\
         Please provide:\n\
         1. Overall performance trends\n\
         2. Common strengths across projects\n\
         3. Areas where teams struggled\n\
         4. Recommendations for future hackathons\n\
         5. Top performing project characteristics\n\n\
         Format as a comprehensive analysis report."
    )
}
