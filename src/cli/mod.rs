// src/cli/mod.rs — CLI definition (clap derive)

pub mod demo;
pub mod insights;
pub mod migrate;
pub mod report;
pub mod submit;

use clap::{Parser, Subcommand};

use crate::evaluator::Evaluator;
use crate::infra::config::Config;
use crate::provider::client::CompletionClient;
use crate::provider::resolve_provider;

pub use submit::SubmitArgs;

#[derive(Parser)]
#[command(
    name = "hackeval",
    about = "AI-assisted hackathon project judging",
    version
)]
pub struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Use a throwaway in-memory store seeded with sample projects
    #[arg(long, global = true)]
    pub demo: bool,

    /// Log progress at info level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Submit a project and evaluate it
    Submit(SubmitArgs),
    /// Re-evaluate a stored project
    Evaluate {
        /// Project id
        project_id: String,
        /// Print the evaluation as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a project with its latest evaluation
    Show {
        /// Project id
        project_id: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List all projects, newest first
    List,
    /// Rank evaluated projects by overall score
    Leaderboard {
        /// Show only the top N entries
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Totals and average score
    Stats,
    /// Generate an AI trends report across all evaluations
    Insights,
    /// Submit and evaluate the sample projects
    Demo,
    /// Database migration status and rollback
    Migrate {
        #[arg(long)]
        status: bool,
        #[arg(long)]
        rollback: bool,
    },
}

impl Commands {
    /// Whether the command talks to the completion service.
    pub fn needs_evaluator(&self) -> bool {
        matches!(
            self,
            Commands::Submit(_) | Commands::Evaluate { .. } | Commands::Insights | Commands::Demo
        )
    }
}

/// Wire the configured provider, criteria and fallback rules into an engine.
pub fn build_evaluator(config: &Config) -> Evaluator {
    let provider = resolve_provider(&config.provider);
    let client = CompletionClient::from_config(provider, &config.provider);
    Evaluator::new(client, config.criteria.clone(), config.fallback.clone())
}
