// src/evaluator/utils.rs — Score aggregation and formatting helpers

use super::criteria::Criteria;
use super::types::ScoredRecord;
use crate::infra::errors::EvalError;

/// Weighted overall score over the criteria actually present in `record`,
/// rounded to two decimals.
///
/// Criteria missing from the record contribute to neither the numerator nor
/// the denominator.
pub fn weighted_overall(record: &ScoredRecord, criteria: &Criteria) -> Result<f64, EvalError> {
    let mut total_score = 0.0;
    let mut total_weight = 0.0;

    for c in criteria {
        if let Some(score) = record.score(&c.name) {
            total_score += score * c.weight;
            total_weight += c.weight;
        }
    }

    if total_weight <= 0.0 {
        return Err(EvalError::Aggregation);
    }

    Ok(round2(total_score / total_weight))
}

/// Like [`weighted_overall`], but 0 when nothing can be aggregated.
pub fn weighted_overall_or_zero(record: &ScoredRecord, criteria: &Criteria) -> f64 {
    weighted_overall(record, criteria).unwrap_or(0.0)
}

/// Unweighted mean, rounded to two decimals. Used by the fallback path.
pub fn mean_overall(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    round2(scores.iter().sum::<f64>() / scores.len() as f64)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `innovation` -> `Innovation`, `social_impact` -> `Social_Impact`.
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut at_word_start = true;
    for ch in name.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

/// Integral scores print without a fractional part.
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{}", score as i64)
    } else {
        format!("{score}")
    }
}
