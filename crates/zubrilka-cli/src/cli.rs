//! CLI command definitions and argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Zubrilka CLI - Generate study flashcards from uploaded documents.
#[derive(Debug, Parser)]
#[command(name = "zubrilka")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// SQLite database path
    #[arg(long, global = true, default_value = "zubrilka.db")]
    pub db: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Register a document so it can be processed
    Register(RegisterArgs),

    /// Generate flashcards from a registered document
    Process(ProcessArgs),

    /// Show the progress of the latest generation attempt
    Status(StatusArgs),

    /// List the stored flashcards of a document
    Cards(CardsArgs),

    /// Cancel a running generation job
    Cancel(CancelArgs),
}

/// Arguments for the register command.
#[derive(Debug, Parser)]
pub struct RegisterArgs {
    /// Path to the document (PDF or plain text)
    pub path: PathBuf,

    /// Owner id; a new one is generated when omitted
    #[arg(short, long)]
    pub owner: Option<String>,
}

/// Arguments for the process command.
#[derive(Debug, Parser)]
pub struct ProcessArgs {
    /// Document id
    pub document: String,

    /// Owner id
    #[arg(short, long)]
    pub owner: String,

    /// Stop after this many cards (1-100)
    #[arg(short, long, default_value = "10")]
    pub max_cards: u32,

    /// Return immediately instead of waiting for the job to finish
    #[arg(long)]
    pub no_wait: bool,
}

/// Arguments for the status command.
#[derive(Debug, Parser)]
pub struct StatusArgs {
    /// Document id
    pub document: String,

    /// Owner id
    #[arg(short, long)]
    pub owner: String,
}

/// Arguments for the cards command.
#[derive(Debug, Parser)]
pub struct CardsArgs {
    /// Document id
    pub document: String,

    /// Owner id
    #[arg(short, long)]
    pub owner: String,

    /// Print cards as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the cancel command.
#[derive(Debug, Parser)]
pub struct CancelArgs {
    /// Status id of the job to cancel
    pub status: String,
}
