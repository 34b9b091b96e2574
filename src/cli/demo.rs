// src/cli/demo.rs — Sample projects for demos

use super::report::format_leaderboard;
use super::submit::submit_and_evaluate;
use super::Commands;
use crate::evaluator::types::ProjectSubmission;
use crate::evaluator::utils::format_score;
use crate::evaluator::Evaluator;
use crate::store::{EvaluationStore, MemoryStore};

struct Sample {
    name: &'static str,
    team: &'static str,
    description: &'static str,
    github: &'static str,
    demo: &'static str,
    tech_stack: &'static str,
    category: &'static str,
    notes: &'static str,
}

const SAMPLES: &[Sample] = &[
    Sample {
        name: "FinTech AI Assistant",
        team: "AI Finance Wizards",
        description: "An intelligent AI assistant that helps users manage their finances, provides investment advice, and automates budgeting. Uses machine learning to analyze spending patterns and suggest personalized financial strategies.",
        github: "https://github.com/example/fintech-ai",
        demo: "https://demo.fintech-ai.com",
        tech_stack: "Python, TensorFlow, React, OpenAI",
        category: "fintech",
        notes: "Focuses on democratizing financial advice through AI",
    },
    Sample {
        name: "Sustainable Energy Tracker",
        team: "GreenTech Innovators",
        description: "A comprehensive platform that tracks renewable energy usage, carbon footprint, and provides recommendations for sustainable living. Integrates with smart home devices and energy providers.",
        github: "https://github.com/example/sustainable-tracker",
        demo: "https://demo.sustainable-tracker.com",
        tech_stack: "Node.js, MongoDB, IoT, Machine Learning",
        category: "sustainability",
        notes: "Real-time energy monitoring and carbon offset recommendations",
    },
    Sample {
        name: "Social Impact Marketplace",
        team: "Social Impact Squad",
        description: "A platform connecting social entrepreneurs with investors and volunteers. Features include project funding, skill matching, and impact measurement tools.",
        github: "https://github.com/example/social-marketplace",
        demo: "https://demo.social-marketplace.com",
        tech_stack: "React, Node.js, PostgreSQL, Blockchain",
        category: "social-impact",
        notes: "Blockchain-based transparency and impact verification",
    },
    Sample {
        name: "AI-Powered Healthcare Diagnostics",
        team: "MedTech Pioneers",
        description: "An AI system that analyzes medical images and patient data to assist healthcare professionals in diagnosis. Uses deep learning for pattern recognition and early disease detection.",
        github: "https://github.com/example/healthcare-ai",
        demo: "https://demo.healthcare-ai.com",
        tech_stack: "Python, PyTorch, Medical Imaging APIs, HIPAA Compliance",
        category: "ai-ml",
        notes: "FDA compliance considerations and clinical trial data",
    },
    Sample {
        name: "Smart City Traffic Optimization",
        team: "UrbanTech Solutions",
        description: "An intelligent traffic management system that uses real-time data and AI to optimize traffic flow, reduce congestion, and improve urban mobility.",
        github: "https://github.com/example/traffic-optimization",
        demo: "https://demo.traffic-optimization.com",
        tech_stack: "Python, Computer Vision, IoT Sensors, Cloud Computing",
        category: "data-analytics",
        notes: "Integration with city infrastructure and emergency services",
    },
];

/// The built-in sample submissions, each with a fresh id.
pub fn demo_projects() -> Vec<ProjectSubmission> {
    SAMPLES
        .iter()
        .map(|s| {
            ProjectSubmission::new(s.name, s.team, s.description)
                .with_raw("github_url", s.github)
                .with_raw("demo_url", s.demo)
                .with_raw("tech_stack", s.tech_stack)
                .with_raw("challenge_category", s.category)
                .with_raw("additional_notes", s.notes)
        })
        .collect()
}

/// Submit and evaluate every sample project. Returns how many were stored.
pub async fn seed_demo(evaluator: &Evaluator, store: &dyn EvaluationStore) -> anyhow::Result<usize> {
    let mut stored = 0;
    for submission in demo_projects() {
        let result = submit_and_evaluate(&submission, evaluator, store).await?;
        tracing::info!(
            project = %submission.name,
            overall = result.overall_score,
            source = result.source.as_str(),
            "Demo project evaluated"
        );
        stored += 1;
    }
    Ok(stored)
}

/// In-memory store for a `--demo` run. The `demo` command seeds it itself,
/// so it starts empty for that command.
pub async fn demo_store(evaluator: &Evaluator, command: &Commands) -> anyhow::Result<MemoryStore> {
    let store = MemoryStore::new();
    if !matches!(command, Commands::Demo) {
        let seeded = seed_demo(evaluator, &store).await?;
        tracing::info!(projects = seeded, "Demo store seeded");
    }
    Ok(store)
}

pub async fn run_demo(evaluator: &Evaluator, store: &dyn EvaluationStore) -> anyhow::Result<()> {
    println!("Creating demo projects...");
    for submission in demo_projects() {
        let result = submit_and_evaluate(&submission, evaluator, store).await?;
        println!(
            "  {:<36} {:>6}/100 ({})",
            submission.name,
            format_score(result.overall_score),
            result.source.as_str()
        );
    }
    println!();
    print!("{}", format_leaderboard(&store.leaderboard(None)?));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::criteria::Criteria;
    use crate::evaluator::fallback::FallbackConfig;
    use crate::provider::client::CompletionClient;
    use crate::provider::UnconfiguredProvider;
    use std::sync::Arc;

    fn offline_evaluator() -> Evaluator {
        let provider = Arc::new(UnconfiguredProvider::new("no key in tests"));
        let client = CompletionClient::new(provider, "gemini-2.0-flash");
        Evaluator::new(client, Criteria::default(), FallbackConfig::default())
    }

    #[tokio::test]
    async fn test_demo_command_in_demo_mode_seeds_once() {
        let evaluator = offline_evaluator();
        let store = demo_store(&evaluator, &Commands::Demo).await.unwrap();
        run_demo(&evaluator, &store).await.unwrap();

        let board = store.leaderboard(None).unwrap();
        assert_eq!(board.len(), 5);
        let names: std::collections::HashSet<_> =
            board.iter().map(|e| e.project_name.as_str()).collect();
        assert_eq!(names.len(), 5);
    }

    #[tokio::test]
    async fn test_demo_mode_seeds_for_other_commands() {
        let evaluator = offline_evaluator();
        let store = demo_store(&evaluator, &Commands::Leaderboard { limit: None })
            .await
            .unwrap();
        assert_eq!(store.stats().unwrap().evaluated_projects, 5);
    }

    #[test]
    fn test_demo_projects_are_complete() {
        let projects = demo_projects();
        assert_eq!(projects.len(), 5);
        for p in &projects {
            assert!(!p.description.is_empty());
            assert!(p.raw("tech_stack").is_some());
            assert!(p.raw("challenge_category").is_some());
        }
        let ids: std::collections::HashSet<_> = projects.iter().map(|p| &p.id).collect();
        assert_eq!(ids.len(), 5);
    }
}
