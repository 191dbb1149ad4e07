//! Status command implementation.

use anyhow::Result;
use zubrilka_jobs::JobManager;
use zubrilka_store::SqliteStore;

use super::{parse_document_id, parse_owner_id};
use crate::cli::StatusArgs;

/// Execute the status command.
pub fn execute_status(args: StatusArgs, manager: &JobManager<SqliteStore>) -> Result<()> {
    let document_id = parse_document_id(&args.document)?;
    let owner_id = parse_owner_id(&args.owner)?;

    let snapshot = manager.poll(document_id, owner_id)?;

    println!("State: {}", snapshot.state);
    println!("Cards: {}", snapshot.cards_count);
    if snapshot.created_at > 0 {
        println!("Attempt started: {}", snapshot.created_at);
    }
    Ok(())
}
