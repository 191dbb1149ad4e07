//! Card-cache side file
//!
//! After a successful run the job layer can mirror the generated cards
//! to `<stem>.cards.json` next to the source document. The file is a
//! convenience for humans and external tooling; it is never read back,
//! and the rows in the store stay the single source of truth. A failed
//! write is logged and swallowed.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};
use zubrilka_domain::Flashcard;

/// One card as serialized into the cache file
#[derive(Debug, Serialize)]
struct CachedCard<'a> {
    id: String,
    question: &'a str,
    answer: &'a str,
    context: &'a str,
    page_index: usize,
    created_at: u64,
}

impl<'a> CachedCard<'a> {
    fn from_card(card: &'a Flashcard) -> Self {
        Self {
            id: card.id.to_string(),
            question: &card.question,
            answer: &card.answer,
            context: &card.context,
            page_index: card.page_index,
            created_at: card.created_at,
        }
    }
}

/// Cache file path for a document: `<stem>.cards.json` in its directory
pub fn cache_path(document_path: &Path) -> PathBuf {
    let stem = document_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("cards");
    document_path.with_file_name(format!("{}.cards.json", stem))
}

/// Mirror a card batch beside its document, returning the path on success
///
/// Never fails the caller: serialization or filesystem errors are logged
/// at warn and reported as `None`.
pub fn write_card_cache(document_path: &Path, cards: &[Flashcard]) -> Option<PathBuf> {
    let path = cache_path(document_path);
    let records: Vec<CachedCard<'_>> = cards.iter().map(CachedCard::from_card).collect();

    let json = match serde_json::to_string_pretty(&records) {
        Ok(json) => json,
        Err(e) => {
            warn!("failed to serialize card cache: {}", e);
            return None;
        }
    };
    if let Err(e) = std::fs::write(&path, json) {
        warn!("failed to write card cache {}: {}", path.display(), e);
        return None;
    }

    debug!("mirrored {} card(s) to {}", cards.len(), path.display());
    Some(path)
}
