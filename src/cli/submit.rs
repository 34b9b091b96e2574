// src/cli/submit.rs — Submit and (re-)evaluate projects

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use super::report::print_evaluation;
use crate::evaluator::types::{EvaluationResult, ProjectSubmission};
use crate::evaluator::Evaluator;
use crate::store::EvaluationStore;

#[derive(Args, Debug, Clone)]
pub struct SubmitArgs {
    /// Project name
    #[arg(long)]
    pub name: String,

    /// Team name
    #[arg(long)]
    pub team: String,

    /// Project description
    #[arg(long, conflicts_with = "description_file")]
    pub description: Option<String>,

    /// Read the description from a file
    #[arg(long)]
    pub description_file: Option<PathBuf>,

    #[arg(long)]
    pub github_url: Option<String>,

    #[arg(long)]
    pub demo_url: Option<String>,

    /// Technologies used, e.g. "Rust, Postgres, AI"
    #[arg(long)]
    pub tech_stack: Option<String>,

    /// Challenge category, e.g. "fintech"
    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,

    /// Print the evaluation as JSON
    #[arg(long)]
    pub json: bool,
}

impl SubmitArgs {
    pub fn to_submission(&self) -> anyhow::Result<ProjectSubmission> {
        if self.name.trim().is_empty() {
            anyhow::bail!("project name must not be empty");
        }

        let description = match (&self.description, &self.description_file) {
            (Some(text), _) => text.clone(),
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("reading description from {}", path.display()))?,
            (None, None) => String::new(),
        };

        let raw = |v: &Option<String>| v.clone().unwrap_or_default();

        Ok(
            ProjectSubmission::new(self.name.trim(), self.team.trim(), description.trim())
                .with_raw("github_url", raw(&self.github_url))
                .with_raw("demo_url", raw(&self.demo_url))
                .with_raw("tech_stack", raw(&self.tech_stack))
                .with_raw("challenge_category", raw(&self.category))
                .with_raw("additional_notes", raw(&self.notes)),
        )
    }
}

/// Store a submission, evaluate it, store the evaluation.
pub async fn submit_and_evaluate(
    submission: &ProjectSubmission,
    evaluator: &Evaluator,
    store: &dyn EvaluationStore,
) -> anyhow::Result<EvaluationResult> {
    store.insert_project(submission)?;
    let result = evaluator.evaluate(submission).await;
    store
        .insert_evaluation(&result)
        .context("project stored but its evaluation could not be saved")?;
    Ok(result)
}

pub async fn run_submit(
    args: &SubmitArgs,
    evaluator: &Evaluator,
    store: &dyn EvaluationStore,
) -> anyhow::Result<()> {
    let submission = args.to_submission()?;
    let result = submit_and_evaluate(&submission, evaluator, store).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("Submitted '{}' as {}", submission.name, submission.id);
        println!();
        print_evaluation(&result);
    }
    Ok(())
}

pub async fn run_evaluate(
    project_id: &str,
    json: bool,
    evaluator: &Evaluator,
    store: &dyn EvaluationStore,
) -> anyhow::Result<()> {
    let project = store
        .get_project(project_id)?
        .ok_or_else(|| anyhow::anyhow!("project {} not found", project_id))?;

    let result = evaluator.evaluate(&project.submission).await;
    store.insert_evaluation(&result)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("Re-evaluated '{}'", project.submission.name);
        println!();
        print_evaluation(&result);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> SubmitArgs {
        SubmitArgs {
            name: "  Budget Buddy ".into(),
            team: "Coin Crew".into(),
            description: Some("Helps students budget.".into()),
            description_file: None,
            github_url: Some("https://github.com/example/budget".into()),
            demo_url: None,
            tech_stack: Some("Rust, AI".into()),
            category: Some("fintech".into()),
            notes: Some(String::new()),
            json: false,
        }
    }

    #[test]
    fn test_to_submission_maps_raw_data() {
        let s = args().to_submission().unwrap();
        assert_eq!(s.name, "Budget Buddy");
        assert_eq!(s.raw("tech_stack"), Some("Rust, AI"));
        assert_eq!(s.raw("challenge_category"), Some("fintech"));
        assert!(s.raw("demo_url").is_none());
        assert!(s.raw("additional_notes").is_none());
    }

    #[test]
    fn test_to_submission_rejects_blank_name() {
        let mut a = args();
        a.name = "   ".into();
        assert!(a.to_submission().is_err());
    }

    #[test]
    fn test_description_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("desc.md");
        std::fs::write(&path, "From a file\n").unwrap();
        let mut a = args();
        a.description = None;
        a.description_file = Some(path);
        assert_eq!(a.to_submission().unwrap().description, "From a file");
    }
}
