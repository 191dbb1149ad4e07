//! Flashcard module - the product of a generation run

use crate::document::{DocumentId, OwnerId};
use std::fmt;

/// Unique identifier for a flashcard based on UUIDv7
///
/// UUIDv7 provides:
/// - Chronological sortability for temporal queries
/// - 128-bit uniqueness
/// - RFC 9562-standard format with broad ecosystem support
/// - No coordination required for distributed generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CardId(u128);

impl CardId {
    /// Generate a new UUIDv7-based CardId
    ///
    /// # Examples
    ///
    /// ```
    /// use zubrilka_domain::CardId;
    ///
    /// let id = CardId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a new CardId from a raw u128 value
    ///
    /// This is primarily for storage layer deserialization.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a CardId from a UUIDv7 string
    ///
    /// # Examples
    ///
    /// ```
    /// use zubrilka_domain::CardId;
    ///
    /// let id = CardId::new();
    /// let id_str = id.to_string();
    /// let parsed = CardId::from_string(&id_str).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid UUIDv7 string: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }

    /// Get the timestamp component of the UUIDv7 (milliseconds since Unix epoch)
    pub fn timestamp(&self) -> u64 {
        // UUIDv7: top 48 bits are Unix millisecond timestamp
        (self.0 >> 80) as u64
    }
}

impl Default for CardId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// A flashcard - one question/answer pair generated from a document
///
/// The answer is always a verbatim sentence from the source document; the
/// question is synthesized from that sentence. Cards are immutable once
/// created except for visibility toggling and soft deletion, which are
/// owned by the surrounding application.
#[derive(Debug, Clone, PartialEq)]
pub struct Flashcard {
    /// Unique identifier
    pub id: CardId,

    /// Document this card was generated from
    pub document_id: DocumentId,

    /// Owner of the source document
    pub owner_id: OwnerId,

    /// Synthesized question text, always terminated with `?`
    pub question: String,

    /// Verbatim source sentence
    pub answer: String,

    /// Short excerpt (prefix of the source sentence) for display context
    pub context: String,

    /// Zero-based page the source sentence came from
    pub page_index: usize,

    /// Hidden from listings when true
    pub hidden: bool,

    /// Soft-deleted when true; the store never lists deleted cards
    pub deleted: bool,

    /// When this card was created (unix seconds)
    pub created_at: u64,
}

impl Flashcard {
    /// Create a new visible, non-deleted flashcard
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: CardId,
        document_id: DocumentId,
        owner_id: OwnerId,
        question: String,
        answer: String,
        context: String,
        page_index: usize,
        created_at: u64,
    ) -> Self {
        Self {
            id,
            document_id,
            owner_id,
            question,
            answer,
            context,
            page_index,
            hidden: false,
            deleted: false,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id_ordering() {
        let id1 = CardId::from_value(1000);
        let id2 = CardId::from_value(2000);

        assert!(id1 < id2);
        assert!(id2 > id1);
    }

    #[test]
    fn test_card_id_chronological() {
        // UUIDv7s generated in sequence should be chronologically ordered
        let id1 = CardId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let id2 = CardId::new();

        assert!(id1 < id2, "Earlier UUIDv7 should be less than later UUIDv7");
        assert!(id1.timestamp() <= id2.timestamp(), "Timestamps should be ordered");
    }

    #[test]
    fn test_card_id_display_and_parse() {
        let id = CardId::new();
        let id_str = id.to_string();

        // UUIDv7 strings are 36 characters (8-4-4-4-12 with hyphens)
        assert_eq!(id_str.len(), 36);

        // Round-trip through string should preserve ID
        let parsed = CardId::from_string(&id_str).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_card_id_invalid_string() {
        assert!(CardId::from_string("not-a-valid-uuid").is_err());
        assert!(CardId::from_string("").is_err());
    }

    #[test]
    fn test_flashcard_defaults() {
        let card = Flashcard::new(
            CardId::new(),
            DocumentId::new(),
            OwnerId::new(),
            "К чему привело это?".to_string(),
            "Это привело к войне.".to_string(),
            "Это привело к войне.".to_string(),
            0,
            1_700_000_000,
        );

        assert!(!card.hidden);
        assert!(!card.deleted);
        assert_eq!(card.page_index, 0);
    }
}
