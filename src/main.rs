// src/main.rs — hackeval entry point

use std::path::Path;

use clap::Parser;

use hackeval::cli::{self, Cli, Commands};
use hackeval::evaluator::Evaluator;
use hackeval::infra::config::Config;
use hackeval::infra::logger;
use hackeval::store::{EvaluationStore, SqliteStore};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG overrides the level chosen here
    logger::init_logging(if cli.verbose { "info" } else { "warn" });

    if let Err(e) = run(cli).await {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match cli.config {
        Some(ref path) => Config::load_from(Path::new(path))?,
        None => Config::load()?,
    };
    let db_path = config.storage.resolved_db_path();

    // Migrations work on the database file directly
    if let Commands::Migrate { status, rollback } = cli.command {
        return cli::migrate::run_migrate(&db_path, status, rollback);
    }

    let evaluator = if cli.demo || cli.command.needs_evaluator() {
        Some(cli::build_evaluator(&config))
    } else {
        None
    };

    let store: Box<dyn EvaluationStore> = if cli.demo {
        Box::new(cli::demo::demo_store(require(&evaluator)?, &cli.command).await?)
    } else {
        Box::new(SqliteStore::open(&db_path)?)
    };
    let store = store.as_ref();

    match cli.command {
        Commands::Submit(ref args) => {
            cli::submit::run_submit(args, require(&evaluator)?, store).await
        }
        Commands::Evaluate {
            ref project_id,
            json,
        } => cli::submit::run_evaluate(project_id, json, require(&evaluator)?, store).await,
        Commands::Show {
            ref project_id,
            json,
        } => cli::report::run_show(store, project_id, json),
        Commands::List => cli::report::run_list(store),
        Commands::Leaderboard { limit } => cli::report::run_leaderboard(store, limit),
        Commands::Stats => cli::report::run_stats(store),
        Commands::Insights => cli::insights::run_insights(require(&evaluator)?, store).await,
        Commands::Demo => cli::demo::run_demo(require(&evaluator)?, store).await,
        Commands::Migrate { .. } => Ok(()),
    }
}

fn require(evaluator: &Option<Evaluator>) -> anyhow::Result<&Evaluator> {
    evaluator
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("no evaluator configured for this command"))
}
