//! Process command implementation.

use std::time::Duration;

use anyhow::Result;
use zubrilka_jobs::{JobManager, SubmitRequest};
use zubrilka_store::SqliteStore;

use super::{parse_document_id, parse_owner_id};
use crate::cli::ProcessArgs;

/// Execute the process command.
pub async fn execute_process(args: ProcessArgs, manager: &JobManager<SqliteStore>) -> Result<()> {
    let document_id = parse_document_id(&args.document)?;
    let owner_id = parse_owner_id(&args.owner)?;

    let status_id = manager
        .submit(SubmitRequest {
            document_id,
            owner_id,
            max_cards: args.max_cards,
        })
        .await?;
    println!("Job: {}", status_id);

    if args.no_wait {
        return Ok(());
    }

    loop {
        let snapshot = manager.poll(document_id, owner_id)?;
        if snapshot.state.is_terminal() {
            println!("State: {}", snapshot.state);
            println!("Cards: {}", snapshot.cards_count);
            return Ok(());
        }
        tokio::time::sleep(Duration::from_millis(200)).await;
    }
}
