//! Cancel command implementation.

use anyhow::Result;
use zubrilka_jobs::JobManager;
use zubrilka_store::SqliteStore;

use super::parse_status_id;
use crate::cli::CancelArgs;

/// Execute the cancel command.
pub fn execute_cancel(args: CancelArgs, manager: &JobManager<SqliteStore>) -> Result<()> {
    let status_id = parse_status_id(&args.status)?;

    manager.cancel(status_id)?;

    println!("Cancellation requested for job {}", status_id);
    Ok(())
}
