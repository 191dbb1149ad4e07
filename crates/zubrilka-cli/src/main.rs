//! Zubrilka CLI - Command-line interface for flashcard generation.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use zubrilka_cli::commands;
use zubrilka_cli::{Cli, Command};
use zubrilka_jobs::{JobManager, JobsConfig};
use zubrilka_pipeline::PipelineConfig;
use zubrilka_store::SqliteStore;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    // Log to stderr so command output stays parseable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let store = SqliteStore::new(&cli.db)?;
    let manager = JobManager::new(store, PipelineConfig::default(), JobsConfig::default())?;

    match cli.command {
        Command::Register(args) => commands::execute_register(args, &manager)?,
        Command::Process(args) => commands::execute_process(args, &manager).await?,
        Command::Status(args) => commands::execute_status(args, &manager)?,
        Command::Cards(args) => commands::execute_cards(args, &manager)?,
        Command::Cancel(args) => commands::execute_cancel(args, &manager)?,
    }

    Ok(())
}
