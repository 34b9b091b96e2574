// src/evaluator/types.rs — Submission, scored record, and evaluation result

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A project handed in for judging. The engine only ever reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSubmission {
    pub id: String,
    pub name: String,
    pub team: String,
    pub description: String,
    #[serde(default)]
    pub raw_data: BTreeMap<String, String>,
}

impl ProjectSubmission {
    /// New submission with a freshly generated id.
    pub fn new(
        name: impl Into<String>,
        team: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            team: team.into(),
            description: description.into(),
            raw_data: BTreeMap::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Attach a raw_data entry. Empty values are dropped.
    pub fn with_raw(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.is_empty() {
            self.raw_data.insert(key.into(), value);
        }
        self
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.raw_data.get(key).map(String::as_str)
    }
}

/// Structured scores and feedback, either extracted from a completion or
/// synthesized by a default/fallback path.
///
/// Serialized flat, the way the completion is asked to answer:
/// `<criterion>_score`, `<criterion>_feedback`, `strengths`, `improvements`,
/// `overall_assessment`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoredRecord {
    pub scores: BTreeMap<String, f64>,
    pub feedback: BTreeMap<String, String>,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub overall_assessment: Option<String>,
}

const SCORE_SUFFIX: &str = "_score";
const FEEDBACK_SUFFIX: &str = "_feedback";

impl ScoredRecord {
    pub fn score(&self, criterion: &str) -> Option<f64> {
        self.scores.get(criterion).copied()
    }

    pub fn feedback_for(&self, criterion: &str) -> Option<&str> {
        self.feedback.get(criterion).map(String::as_str)
    }

    pub fn with_score(mut self, criterion: &str, score: f64) -> Self {
        self.scores.insert(criterion.to_string(), score);
        self
    }

    pub fn with_feedback(mut self, criterion: &str, text: impl Into<String>) -> Self {
        self.feedback.insert(criterion.to_string(), text.into());
        self
    }

    /// Drop scores and feedback keyed by anything outside `names`.
    pub fn retain_criteria<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        let keep: BTreeSet<&str> = names.into_iter().collect();
        self.scores.retain(|name, _| keep.contains(name.as_str()));
        self.feedback.retain(|name, _| keep.contains(name.as_str()));
    }

    /// Flat JSON object form.
    pub fn to_value(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for (name, score) in &self.scores {
            map.insert(format!("{name}{SCORE_SUFFIX}"), number_value(*score));
        }
        for (name, text) in &self.feedback {
            map.insert(format!("{name}{FEEDBACK_SUFFIX}"), text.clone().into());
        }
        if !self.strengths.is_empty() {
            map.insert("strengths".into(), self.strengths.clone().into());
        }
        if !self.improvements.is_empty() {
            map.insert("improvements".into(), self.improvements.clone().into());
        }
        if let Some(ref text) = self.overall_assessment {
            map.insert("overall_assessment".into(), text.clone().into());
        }
        serde_json::Value::Object(map)
    }

    /// Read the flat form leniently. Scores may be numbers or numeric
    /// strings and are clamped to 0..=100; anything unreadable is skipped.
    /// Returns `None` only when `value` is not an object.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        let obj = value.as_object()?;
        let mut record = ScoredRecord::default();

        for (key, v) in obj {
            match key.as_str() {
                "strengths" => record.strengths = string_list(v),
                "improvements" => record.improvements = string_list(v),
                "overall_assessment" => record.overall_assessment = text_value(v),
                _ => {
                    if let Some(name) = key.strip_suffix(SCORE_SUFFIX) {
                        if let Some(score) = score_value(v) {
                            record.scores.insert(name.to_string(), score);
                        }
                    } else if let Some(name) = key.strip_suffix(FEEDBACK_SUFFIX) {
                        if let Some(text) = text_value(v) {
                            record.feedback.insert(name.to_string(), text);
                        }
                    }
                }
            }
        }

        Some(record)
    }
}

impl Serialize for ScoredRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ScoredRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        ScoredRecord::from_value(&value)
            .ok_or_else(|| serde::de::Error::custom("scored record must be a JSON object"))
    }
}

/// Integral scores serialize as integers so stored records read naturally.
fn number_value(score: f64) -> serde_json::Value {
    if score.fract() == 0.0 && score.abs() < i64::MAX as f64 {
        serde_json::Value::from(score as i64)
    } else {
        serde_json::Value::from(score)
    }
}

fn score_value(v: &serde_json::Value) -> Option<f64> {
    let n = match v {
        serde_json::Value::Number(n) => n.as_f64()?,
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !n.is_finite() {
        return None;
    }
    Some(n.clamp(0.0, 100.0))
}

fn text_value(v: &serde_json::Value) -> Option<String> {
    match v {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn string_list(v: &serde_json::Value) -> Vec<String> {
    match v {
        serde_json::Value::Array(items) => items.iter().filter_map(text_value).collect(),
        serde_json::Value::String(s) if !s.is_empty() => vec![s.clone()],
        _ => Vec::new(),
    }
}

/// Which path produced an evaluation. The AI path aggregates with weights,
/// the fallback path with a plain mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationSource {
    Ai,
    Fallback,
}

impl EvaluationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluationSource::Ai => "ai",
            EvaluationSource::Fallback => "fallback",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ai" => Some(EvaluationSource::Ai),
            "fallback" => Some(EvaluationSource::Fallback),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionScore {
    pub criterion: String,
    pub score: f64,
}

/// The verdict for one `evaluate` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub evaluation_id: String,
    pub project_id: String,
    /// One entry per criterion, in criteria-table order.
    pub scores: Vec<CriterionScore>,
    pub overall_score: f64,
    pub feedback: String,
    pub detailed_scores: ScoredRecord,
    pub source: EvaluationSource,
    pub timestamp: DateTime<Utc>,
}

impl EvaluationResult {
    pub fn score(&self, criterion: &str) -> Option<f64> {
        self.scores
            .iter()
            .find(|s| s.criterion == criterion)
            .map(|s| s.score)
    }
}

/// Condensed view of one evaluated project, fed to the insights report.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationSummary {
    pub project_name: String,
    pub team_name: String,
    pub overall_score: f64,
    pub scores: Vec<CriterionScore>,
}

impl EvaluationSummary {
    pub fn from_result(project_name: &str, team_name: &str, result: &EvaluationResult) -> Self {
        Self {
            project_name: project_name.to_string(),
            team_name: team_name.to_string(),
            overall_score: result.overall_score,
            scores: result.scores.clone(),
        }
    }

    /// Flat JSON object: names, overall, then `<criterion>_score` fields.
    pub fn to_value(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        map.insert("project_name".into(), self.project_name.clone().into());
        map.insert("team_name".into(), self.team_name.clone().into());
        map.insert("overall_score".into(), self.overall_score.into());
        for s in &self.scores {
            map.insert(
                format!("{}{SCORE_SUFFIX}", s.criterion),
                number_value(s.score),
            );
        }
        serde_json::Value::Object(map)
    }
}
