//! Register command implementation.

use anyhow::{Context, Result};
use zubrilka_domain::OwnerId;
use zubrilka_jobs::JobManager;
use zubrilka_store::SqliteStore;

use super::parse_owner_id;
use crate::cli::RegisterArgs;

/// Execute the register command.
pub fn execute_register(args: RegisterArgs, manager: &JobManager<SqliteStore>) -> Result<()> {
    let owner_id = match &args.owner {
        Some(owner) => parse_owner_id(owner)?,
        None => OwnerId::new(),
    };

    // The registry stores absolute paths; this also rejects files that
    // do not exist before anything lands in the database.
    let path = std::fs::canonicalize(&args.path)
        .with_context(|| format!("cannot resolve {}", args.path.display()))?;

    let document_id = manager.register_document(owner_id, path)?;

    println!("Document: {}", document_id);
    println!("Owner: {}", owner_id);
    Ok(())
}
