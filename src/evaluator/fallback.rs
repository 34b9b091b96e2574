// src/evaluator/fallback.rs — Heuristic scoring when the AI path is unusable

use std::collections::BTreeMap;

use chrono::Utc;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use super::criteria::Criteria;
use super::types::{
    CriterionScore, EvaluationResult, EvaluationSource, ProjectSubmission, ScoredRecord,
};
use super::utils::{format_score, mean_overall, title_case};

/// Range used for a criterion that has no configured range.
const DEFAULT_RANGE: ScoreRange = ScoreRange(65, 85);

const FALLBACK_ASSESSMENT: &str =
    "Project submitted successfully. Varied evaluation applied based on project characteristics.";

/// Inclusive integer score range, written as `[min, max]` in config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRange(pub u32, pub u32);

impl ScoreRange {
    pub fn min(&self) -> u32 {
        self.0
    }

    pub fn max(&self) -> u32 {
        self.1
    }
}

/// Bonus applied when a raw_data field contains a keyword (case-insensitive).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub field: String,
    pub contains: String,
    pub criterion: String,
    pub bonus: u32,
}

/// Bonus applied when the description is longer than `min_chars` characters.
/// Omitted fields keep their defaults; `bonus = 0` turns the rule off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LengthRule {
    pub min_chars: usize,
    pub criterion: String,
    pub bonus: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackConfig {
    #[serde(default = "default_ranges")]
    pub ranges: BTreeMap<String, ScoreRange>,
    #[serde(default = "default_rules")]
    pub rules: Vec<KeywordRule>,
    #[serde(default)]
    pub long_description: LengthRule,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            ranges: default_ranges(),
            rules: default_rules(),
            long_description: LengthRule::default(),
        }
    }
}

fn default_ranges() -> BTreeMap<String, ScoreRange> {
    BTreeMap::from([
        ("innovation".to_string(), ScoreRange(65, 85)),
        ("technical".to_string(), ScoreRange(60, 80)),
        ("impact".to_string(), ScoreRange(70, 90)),
        ("presentation".to_string(), ScoreRange(65, 85)),
    ])
}

fn default_rules() -> Vec<KeywordRule> {
    vec![
        KeywordRule {
            field: "tech_stack".into(),
            contains: "ai".into(),
            criterion: "technical".into(),
            bonus: 5,
        },
        KeywordRule {
            field: "challenge_category".into(),
            contains: "fintech".into(),
            criterion: "impact".into(),
            bonus: 5,
        },
    ]
}

impl Default for LengthRule {
    fn default() -> Self {
        Self {
            min_chars: 200,
            criterion: "presentation".into(),
            bonus: 5,
        }
    }
}

impl FallbackConfig {
    pub fn range_for(&self, criterion: &str) -> ScoreRange {
        self.ranges.get(criterion).copied().unwrap_or(DEFAULT_RANGE)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, range) in &self.ranges {
            if range.min() > range.max() {
                anyhow::bail!(
                    "fallback range for '{}' is inverted: [{}, {}]",
                    name,
                    range.min(),
                    range.max()
                );
            }
            if range.max() > 100 {
                anyhow::bail!("fallback range for '{}' exceeds 100", name);
            }
        }
        for rule in &self.rules {
            if rule.contains.is_empty() {
                anyhow::bail!("fallback rule on '{}' has an empty keyword", rule.field);
            }
        }
        Ok(())
    }

    /// Draw a base score per criterion, in table order, then apply bonuses.
    pub fn score(
        &self,
        submission: &ProjectSubmission,
        criteria: &Criteria,
        rng: &mut dyn RngCore,
    ) -> BTreeMap<String, u32> {
        let mut scores: BTreeMap<String, u32> = criteria
            .iter()
            .map(|c| {
                let range = self.range_for(&c.name);
                let (lo, hi) = (range.min().min(range.max()), range.max().max(range.min()));
                (c.name.clone(), rng.gen_range(lo..=hi))
            })
            .collect();

        for rule in &self.rules {
            let matched = submission
                .raw(&rule.field)
                .map(|v| v.to_lowercase().contains(&rule.contains.to_lowercase()))
                .unwrap_or(false);
            if matched {
                bump(&mut scores, &rule.criterion, rule.bonus);
            }
        }

        let rule = &self.long_description;
        if rule.bonus > 0 && submission.description.chars().count() > rule.min_chars {
            bump(&mut scores, &rule.criterion, rule.bonus);
        }

        scores
    }
}

/// Bonuses only touch criteria that were drawn, and never push past 100.
fn bump(scores: &mut BTreeMap<String, u32>, criterion: &str, bonus: u32) {
    if let Some(score) = scores.get_mut(criterion) {
        *score = (*score + bonus).min(100);
    }
}

/// Complete, network-independent evaluation. Cannot fail.
///
/// The overall score is the plain mean of the criterion scores, not the
/// weighted aggregate used on the AI path.
pub fn fallback_evaluation(
    submission: &ProjectSubmission,
    criteria: &Criteria,
    config: &FallbackConfig,
    rng: &mut dyn RngCore,
) -> EvaluationResult {
    let drawn = config.score(submission, criteria, rng);

    let scores: Vec<CriterionScore> = criteria
        .iter()
        .filter_map(|c| {
            drawn.get(&c.name).map(|s| CriterionScore {
                criterion: c.name.clone(),
                score: f64::from(*s),
            })
        })
        .collect();

    let values: Vec<f64> = scores.iter().map(|s| s.score).collect();
    let overall_score = mean_overall(&values);

    let summary = scores
        .iter()
        .map(|s| format!("{}: {}/100", title_case(&s.criterion), format_score(s.score)))
        .collect::<Vec<_>>()
        .join(", ");
    let feedback = format!(
        "Evaluation completed with varied scoring. {summary}. \
         AI evaluation encountered an issue, but scores reflect project characteristics."
    );

    let detailed_scores = ScoredRecord {
        scores: scores
            .iter()
            .map(|s| (s.criterion.clone(), s.score))
            .collect(),
        overall_assessment: Some(FALLBACK_ASSESSMENT.into()),
        ..ScoredRecord::default()
    };

    EvaluationResult {
        evaluation_id: uuid::Uuid::new_v4().to_string(),
        project_id: submission.id.clone(),
        scores,
        overall_score,
        feedback,
        detailed_scores,
        source: EvaluationSource::Fallback,
        timestamp: Utc::now(),
    }
}
