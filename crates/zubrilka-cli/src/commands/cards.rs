//! Cards command implementation.

use anyhow::Result;
use zubrilka_jobs::JobManager;
use zubrilka_store::SqliteStore;

use super::{parse_document_id, parse_owner_id};
use crate::cli::CardsArgs;

/// Execute the cards command.
pub fn execute_cards(args: CardsArgs, manager: &JobManager<SqliteStore>) -> Result<()> {
    let document_id = parse_document_id(&args.document)?;
    let owner_id = parse_owner_id(&args.owner)?;

    let cards = manager.list_cards(document_id, owner_id)?;

    if args.json {
        let entries: Vec<serde_json::Value> = cards
            .iter()
            .map(|card| {
                serde_json::json!({
                    "id": card.id.to_string(),
                    "question": card.question,
                    "answer": card.answer,
                    "context": card.context,
                    "page_index": card.page_index,
                    "created_at": card.created_at,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if cards.is_empty() {
        println!("No cards.");
        return Ok(());
    }

    for (i, card) in cards.iter().enumerate() {
        println!("{}. {}", i + 1, card.question);
        println!("   {}", card.answer);
        println!("   (page {}, id {})", card.page_index, card.id);
    }
    Ok(())
}
