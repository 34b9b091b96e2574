// src/store/mod.rs — Persistence for submissions and evaluations

pub mod memory;
pub mod schema;
pub mod sqlite;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::evaluator::types::{
    CriterionScore, EvaluationResult, EvaluationSummary, ProjectSubmission,
};
use crate::evaluator::utils::round2;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Submitted,
    Evaluated,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Submitted => "submitted",
            ProjectStatus::Evaluated => "evaluated",
        }
    }
}

/// A stored submission with its most recent evaluation, if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectRecord {
    pub submission: ProjectSubmission,
    pub submitted_at: DateTime<Utc>,
    pub latest: Option<EvaluationResult>,
}

impl ProjectRecord {
    pub fn status(&self) -> ProjectStatus {
        if self.latest.is_some() {
            ProjectStatus::Evaluated
        } else {
            ProjectStatus::Submitted
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub project_id: String,
    pub project_name: String,
    pub team_name: String,
    pub overall_score: f64,
    pub scores: Vec<CriterionScore>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub total_projects: usize,
    pub evaluated_projects: usize,
    pub average_score: f64,
}

/// Storage for submissions and their evaluations.
///
/// "Latest" evaluation means the one with the greatest timestamp.
pub trait EvaluationStore: Send {
    fn insert_project(&self, submission: &ProjectSubmission) -> anyhow::Result<()>;

    /// Fails when the evaluation's project is unknown.
    fn insert_evaluation(&self, evaluation: &EvaluationResult) -> anyhow::Result<()>;

    fn get_project(&self, project_id: &str) -> anyhow::Result<Option<ProjectRecord>>;

    /// All projects, most recently submitted first.
    fn list_projects(&self) -> anyhow::Result<Vec<ProjectRecord>>;

    /// Evaluated projects by latest overall score, highest first.
    fn leaderboard(&self, limit: Option<usize>) -> anyhow::Result<Vec<LeaderboardEntry>>;

    /// Input for the insights report: one summary per evaluated project.
    fn summaries(&self) -> anyhow::Result<Vec<EvaluationSummary>> {
        Ok(self
            .list_projects()?
            .iter()
            .filter_map(|p| {
                p.latest.as_ref().map(|e| {
                    EvaluationSummary::from_result(&p.submission.name, &p.submission.team, e)
                })
            })
            .collect())
    }

    fn stats(&self) -> anyhow::Result<Stats> {
        let projects = self.list_projects()?;
        let evaluated: Vec<f64> = projects
            .iter()
            .filter_map(|p| p.latest.as_ref().map(|e| e.overall_score))
            .collect();
        let average_score = if evaluated.is_empty() {
            0.0
        } else {
            round2(evaluated.iter().sum::<f64>() / evaluated.len() as f64)
        };
        Ok(Stats {
            total_projects: projects.len(),
            evaluated_projects: evaluated.len(),
            average_score,
        })
    }
}

/// Rank entries by overall score (ties by project name) and apply a limit.
pub(crate) fn rank_entries(
    mut entries: Vec<LeaderboardEntry>,
    limit: Option<usize>,
) -> Vec<LeaderboardEntry> {
    entries.sort_by(|a, b| {
        b.overall_score
            .total_cmp(&a.overall_score)
            .then_with(|| a.project_name.cmp(&b.project_name))
    });
    if let Some(n) = limit {
        entries.truncate(n);
    }
    for (i, e) in entries.iter_mut().enumerate() {
        e.rank = i + 1;
    }
    entries
}
