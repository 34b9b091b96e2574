// src/store/sqlite.rs — SQLite-backed store

use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};

use super::schema;
use super::{rank_entries, EvaluationStore, LeaderboardEntry, ProjectRecord};
use crate::evaluator::types::{EvaluationResult, EvaluationSource, ProjectSubmission};

/// Projects joined with their latest evaluation. Column order is shared by
/// `project_from_row`.
const PROJECT_SELECT: &str = "
    SELECT p.project_id, p.project_name, p.team_name, p.description, p.raw_data,
           p.submitted_at,
           e.evaluation_id, e.scores, e.overall_score, e.feedback,
           e.detailed_scores, e.evaluator_type, e.evaluated_at
    FROM projects p
    LEFT JOIN evaluations e ON e.evaluation_id = (
        SELECT e2.evaluation_id FROM evaluations e2
        WHERE e2.project_id = p.project_id
        ORDER BY e2.evaluated_at DESC, e2.rowid DESC
        LIMIT 1
    )";

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Wrap a connection and bring its schema up to date.
    pub fn new(conn: Connection) -> anyhow::Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        schema::run_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let conn = Connection::open(path)
            .with_context(|| format!("opening database {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Self::new(conn)
    }

    pub fn open_in_memory() -> anyhow::Result<Self> {
        Self::new(Connection::open_in_memory()?)
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

fn timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn conversion_error(
    idx: usize,
    e: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
}

fn json_col<T: serde::de::DeserializeOwned>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T> {
    let text: String = row.get(idx)?;
    serde_json::from_str(&text).map_err(|e| conversion_error(idx, e))
}

fn time_col(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let text: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&text)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| conversion_error(idx, e))
}

fn project_from_row(row: &Row<'_>) -> rusqlite::Result<ProjectRecord> {
    let submission = ProjectSubmission {
        id: row.get(0)?,
        name: row.get(1)?,
        team: row.get(2)?,
        description: row.get(3)?,
        raw_data: json_col(row, 4)?,
    };
    let submitted_at = time_col(row, 5)?;

    let evaluation_id: Option<String> = row.get(6)?;
    let latest = match evaluation_id {
        Some(evaluation_id) => {
            let source: String = row.get(11)?;
            Some(EvaluationResult {
                evaluation_id,
                project_id: submission.id.clone(),
                scores: json_col(row, 7)?,
                overall_score: row.get(8)?,
                feedback: row.get(9)?,
                detailed_scores: json_col(row, 10)?,
                source: EvaluationSource::parse(&source).unwrap_or(EvaluationSource::Ai),
                timestamp: time_col(row, 12)?,
            })
        }
        None => None,
    };

    Ok(ProjectRecord {
        submission,
        submitted_at,
        latest,
    })
}

impl EvaluationStore for SqliteStore {
    fn insert_project(&self, submission: &ProjectSubmission) -> anyhow::Result<()> {
        let raw_data = serde_json::to_string(&submission.raw_data)?;
        self.conn
            .execute(
                "INSERT INTO projects (project_id, project_name, team_name, description, raw_data, submitted_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    submission.id,
                    submission.name,
                    submission.team,
                    submission.description,
                    raw_data,
                    timestamp(&Utc::now()),
                ],
            )
            .with_context(|| format!("inserting project {}", submission.id))?;
        tracing::info!(project = %submission.id, "Project stored");
        Ok(())
    }

    fn insert_evaluation(&self, evaluation: &EvaluationResult) -> anyhow::Result<()> {
        self.conn
            .execute(
                "INSERT INTO evaluations (evaluation_id, project_id, scores, overall_score, feedback,
                                          detailed_scores, evaluator_type, evaluated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    evaluation.evaluation_id,
                    evaluation.project_id,
                    serde_json::to_string(&evaluation.scores)?,
                    evaluation.overall_score,
                    evaluation.feedback,
                    serde_json::to_string(&evaluation.detailed_scores)?,
                    evaluation.source.as_str(),
                    timestamp(&evaluation.timestamp),
                ],
            )
            .with_context(|| format!("inserting evaluation for project {}", evaluation.project_id))?;
        tracing::info!(
            project = %evaluation.project_id,
            evaluation = %evaluation.evaluation_id,
            overall = evaluation.overall_score,
            "Evaluation stored"
        );
        Ok(())
    }

    fn get_project(&self, project_id: &str) -> anyhow::Result<Option<ProjectRecord>> {
        let sql = format!("{PROJECT_SELECT} WHERE p.project_id = ?1");
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query_map(params![project_id], project_from_row)?;
        let record = rows.next().transpose()?;
        Ok(record)
    }

    fn list_projects(&self) -> anyhow::Result<Vec<ProjectRecord>> {
        let sql = format!("{PROJECT_SELECT} ORDER BY p.submitted_at DESC, p.rowid DESC");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], project_from_row)?;
        let records = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    fn leaderboard(&self, limit: Option<usize>) -> anyhow::Result<Vec<LeaderboardEntry>> {
        let sql = format!(
            "{PROJECT_SELECT} WHERE e.evaluation_id IS NOT NULL
             ORDER BY e.overall_score DESC, p.project_name ASC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], project_from_row)?;

        let mut entries = Vec::new();
        for record in rows {
            let record = record?;
            if let Some(latest) = record.latest {
                entries.push(LeaderboardEntry {
                    rank: 0,
                    project_id: record.submission.id,
                    project_name: record.submission.name,
                    team_name: record.submission.team,
                    overall_score: latest.overall_score,
                    scores: latest.scores,
                });
            }
        }

        Ok(rank_entries(entries, limit))
    }
}
