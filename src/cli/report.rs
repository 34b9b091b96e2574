// src/cli/report.rs — Show, list, leaderboard and stats output

use crate::evaluator::types::EvaluationResult;
use crate::evaluator::utils::{format_score, title_case};
use crate::store::{EvaluationStore, LeaderboardEntry, ProjectRecord};

/// Print one evaluation: overall, per-criterion scores, then the feedback text.
pub fn print_evaluation(result: &EvaluationResult) {
    println!(
        "  Overall:    {}/100 ({})",
        format_score(result.overall_score),
        result.source.as_str()
    );
    for s in &result.scores {
        println!(
            "  {:<12}{}/100",
            format!("{}:", title_case(&s.criterion)),
            format_score(s.score)
        );
    }
    println!("  Evaluated:  {}", result.timestamp.format("%Y-%m-%d %H:%M:%S UTC"));
    println!();
    for line in result.feedback.lines() {
        println!("  {line}");
    }
}

fn print_project(record: &ProjectRecord) {
    let s = &record.submission;
    println!("{} ({})", s.name, s.id);
    println!("  Team:       {}", s.team);
    println!("  Status:     {}", record.status().as_str());
    println!(
        "  Submitted:  {}",
        record.submitted_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    for (key, value) in &s.raw_data {
        println!("  {:<12}{}", format!("{}:", title_case(key)), value);
    }
    if !s.description.is_empty() {
        println!();
        println!("  {}", s.description);
    }
}

pub fn run_show(store: &dyn EvaluationStore, project_id: &str, json: bool) -> anyhow::Result<()> {
    let record = store
        .get_project(project_id)?
        .ok_or_else(|| anyhow::anyhow!("project {} not found", project_id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    print_project(&record);
    println!();
    match &record.latest {
        Some(result) => print_evaluation(result),
        None => println!("  (not evaluated yet)"),
    }
    Ok(())
}

pub fn run_list(store: &dyn EvaluationStore) -> anyhow::Result<()> {
    let projects = store.list_projects()?;
    if projects.is_empty() {
        println!("No projects submitted yet.");
        return Ok(());
    }

    println!(
        "{:<36}  {:<28} {:<22} {:>7}",
        "ID", "PROJECT", "TEAM", "SCORE"
    );
    for p in &projects {
        let score = p
            .latest
            .as_ref()
            .map(|e| format_score(e.overall_score))
            .unwrap_or_else(|| "-".into());
        println!(
            "{:<36}  {:<28} {:<22} {:>7}",
            p.submission.id,
            truncate(&p.submission.name, 28),
            truncate(&p.submission.team, 22),
            score
        );
    }
    Ok(())
}

pub fn format_leaderboard(entries: &[LeaderboardEntry]) -> String {
    let mut out = format!(
        "{:>4}  {:<28} {:<22} {:>7}\n",
        "RANK", "PROJECT", "TEAM", "SCORE"
    );
    for e in entries {
        out.push_str(&format!(
            "{:>4}  {:<28} {:<22} {:>7}\n",
            e.rank,
            truncate(&e.project_name, 28),
            truncate(&e.team_name, 22),
            format_score(e.overall_score)
        ));
    }
    out
}

pub fn run_leaderboard(store: &dyn EvaluationStore, limit: Option<usize>) -> anyhow::Result<()> {
    let entries = store.leaderboard(limit)?;
    if entries.is_empty() {
        println!("No evaluated projects yet.");
        return Ok(());
    }
    print!("{}", format_leaderboard(&entries));
    Ok(())
}

pub fn run_stats(store: &dyn EvaluationStore) -> anyhow::Result<()> {
    let stats = store.stats()?;
    println!("  Projects:   {}", stats.total_projects);
    println!("  Evaluated:  {}", stats.evaluated_projects);
    if stats.evaluated_projects > 0 {
        println!("  Avg score:  {}", format_score(stats.average_score));
    }
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}
