//! Zubrilka CLI library.
//!
//! Argument parsing and command execution for the `zubrilka` binary:
//! register a document, run card generation against a local SQLite
//! database, poll progress, list cards, cancel a running job.

pub mod cli;
pub mod commands;

pub use cli::{Cli, Command};
