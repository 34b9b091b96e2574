// src/store/memory.rs — In-process store for demos and tests

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use super::{rank_entries, EvaluationStore, LeaderboardEntry, ProjectRecord};
use crate::evaluator::types::{EvaluationResult, ProjectSubmission};

#[derive(Default)]
struct Inner {
    projects: Vec<(ProjectSubmission, DateTime<Utc>)>,
    evaluations: Vec<EvaluationResult>,
}

/// Keeps everything in memory; contents are lost when the process exits.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl Inner {
    fn latest_for(&self, project_id: &str) -> Option<&EvaluationResult> {
        // Later inserts win ties, matching insertion order.
        self.evaluations
            .iter()
            .filter(|e| e.project_id == project_id)
            .fold(None, |best: Option<&EvaluationResult>, e| match best {
                Some(b) if b.timestamp > e.timestamp => Some(b),
                _ => Some(e),
            })
    }

    fn record(&self, submission: &ProjectSubmission, at: DateTime<Utc>) -> ProjectRecord {
        ProjectRecord {
            submission: submission.clone(),
            submitted_at: at,
            latest: self.latest_for(&submission.id).cloned(),
        }
    }
}

impl EvaluationStore for MemoryStore {
    fn insert_project(&self, submission: &ProjectSubmission) -> anyhow::Result<()> {
        let mut inner = self.lock();
        if inner.projects.iter().any(|(p, _)| p.id == submission.id) {
            anyhow::bail!("project {} already exists", submission.id);
        }
        inner.projects.push((submission.clone(), Utc::now()));
        tracing::info!(project = %submission.id, "Project stored (memory)");
        Ok(())
    }

    fn insert_evaluation(&self, evaluation: &EvaluationResult) -> anyhow::Result<()> {
        let mut inner = self.lock();
        if !inner
            .projects
            .iter()
            .any(|(p, _)| p.id == evaluation.project_id)
        {
            anyhow::bail!("unknown project {}", evaluation.project_id);
        }
        inner.evaluations.push(evaluation.clone());
        tracing::info!(
            project = %evaluation.project_id,
            overall = evaluation.overall_score,
            "Evaluation stored (memory)"
        );
        Ok(())
    }

    fn get_project(&self, project_id: &str) -> anyhow::Result<Option<ProjectRecord>> {
        let inner = self.lock();
        Ok(inner
            .projects
            .iter()
            .find(|(p, _)| p.id == project_id)
            .map(|(p, at)| inner.record(p, *at)))
    }

    fn list_projects(&self) -> anyhow::Result<Vec<ProjectRecord>> {
        let inner = self.lock();
        Ok(inner
            .projects
            .iter()
            .rev()
            .map(|(p, at)| inner.record(p, *at))
            .collect())
    }

    fn leaderboard(&self, limit: Option<usize>) -> anyhow::Result<Vec<LeaderboardEntry>> {
        let inner = self.lock();
        let entries = inner
            .projects
            .iter()
            .filter_map(|(p, _)| {
                inner.latest_for(&p.id).map(|e| LeaderboardEntry {
                    rank: 0,
                    project_id: p.id.clone(),
                    project_name: p.name.clone(),
                    team_name: p.team.clone(),
                    overall_score: e.overall_score,
                    scores: e.scores.clone(),
                })
            })
            .collect();
        Ok(rank_entries(entries, limit))
    }
}
