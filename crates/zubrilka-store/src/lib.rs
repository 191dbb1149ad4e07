//! Zubrilka Storage Layer
//!
//! SQLite-backed implementation of the `CardStore` trait. Three tables
//! created from `schema.sql` on open hold the document registry, the
//! generated flashcards, and one processing-status row per generation
//! attempt. Card batches are written in a single transaction: a batch
//! lands whole or not at all.
//!
//! # Thread Safety
//!
//! SQLite connections are not thread-safe. Async callers share a store
//! behind `Arc<Mutex<_>>`; the job layer does exactly this.

#![warn(missing_docs)]

pub mod cache;

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension, Row};
use thiserror::Error;
use zubrilka_domain::{
    unix_timestamp, CardId, CardStore, DocumentId, Flashcard, JobState, OwnerId,
    ProcessingStatus, SourceDocument, StatusId,
};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Rejected status transition
    #[error("Illegal transition: {0}")]
    IllegalTransition(String),
}

/// SQLite-based implementation of `CardStore`
///
/// # Thread Safety
///
/// Not `Sync`; share behind a mutex or give each thread its own store
/// over the same database file.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a store at the given database path
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open a throwaway in-memory store
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::new(":memory:")
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Convert an id value to bytes for storage
    fn id_to_bytes(value: u128) -> Vec<u8> {
        value.to_be_bytes().to_vec()
    }

    /// Convert stored bytes back to an id value
    fn bytes_to_id(bytes: &[u8]) -> Result<u128, StoreError> {
        if bytes.len() != 16 {
            return Err(StoreError::InvalidData(format!(
                "Expected 16 bytes for an id, got {}",
                bytes.len()
            )));
        }
        let mut arr = [0u8; 16];
        arr.copy_from_slice(bytes);
        Ok(u128::from_be_bytes(arr))
    }

    /// Read an id column inside a row-mapping closure
    fn read_id(row: &Row<'_>, idx: usize) -> Result<u128, rusqlite::Error> {
        let bytes: Vec<u8> = row.get(idx)?;
        Self::bytes_to_id(&bytes).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Blob, Box::new(e))
        })
    }

    fn row_to_document(row: &Row<'_>) -> Result<SourceDocument, rusqlite::Error> {
        Ok(SourceDocument {
            id: DocumentId::from_value(Self::read_id(row, 0)?),
            owner_id: OwnerId::from_value(Self::read_id(row, 1)?),
            path: PathBuf::from(row.get::<_, String>(2)?),
            deleted: row.get(3)?,
            created_at: row.get::<_, i64>(4)? as u64,
        })
    }

    fn row_to_card(row: &Row<'_>) -> Result<Flashcard, rusqlite::Error> {
        Ok(Flashcard {
            id: CardId::from_value(Self::read_id(row, 0)?),
            document_id: DocumentId::from_value(Self::read_id(row, 1)?),
            owner_id: OwnerId::from_value(Self::read_id(row, 2)?),
            question: row.get(3)?,
            answer: row.get(4)?,
            context: row.get(5)?,
            page_index: row.get::<_, i64>(6)? as usize,
            hidden: row.get(7)?,
            deleted: row.get(8)?,
            created_at: row.get::<_, i64>(9)? as u64,
        })
    }

    fn row_to_status(row: &Row<'_>) -> Result<ProcessingStatus, rusqlite::Error> {
        let state_str: String = row.get(3)?;
        let state = JobState::parse(&state_str).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                3,
                rusqlite::types::Type::Text,
                Box::new(StoreError::InvalidData(format!(
                    "Unknown job state: {}",
                    state_str
                ))),
            )
        })?;
        Ok(ProcessingStatus {
            id: StatusId::from_value(Self::read_id(row, 0)?),
            document_id: DocumentId::from_value(Self::read_id(row, 1)?),
            owner_id: OwnerId::from_value(Self::read_id(row, 2)?),
            state,
            cards_count: row.get::<_, i64>(4)? as u32,
            cancel_requested: row.get(5)?,
            error: row.get(6)?,
            created_at: row.get::<_, i64>(7)? as u64,
            updated_at: row.get::<_, i64>(8)? as u64,
        })
    }
}

impl CardStore for SqliteStore {
    type Error = StoreError;

    fn register_document(&mut self, document: SourceDocument) -> Result<DocumentId, Self::Error> {
        self.conn.execute(
            "INSERT INTO documents (id, owner_id, path, deleted, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                Self::id_to_bytes(document.id.value()),
                Self::id_to_bytes(document.owner_id.value()),
                document.path.to_string_lossy().into_owned(),
                document.deleted,
                document.created_at as i64,
            ],
        )?;
        Ok(document.id)
    }

    fn get_document(&self, id: DocumentId) -> Result<Option<SourceDocument>, Self::Error> {
        let document = self
            .conn
            .query_row(
                "SELECT id, owner_id, path, deleted, created_at
                 FROM documents WHERE id = ?1",
                params![Self::id_to_bytes(id.value())],
                Self::row_to_document,
            )
            .optional()?;
        Ok(document)
    }

    fn save_cards(&mut self, cards: &[Flashcard]) -> Result<usize, Self::Error> {
        let tx = self.conn.transaction()?;
        for card in cards {
            tx.execute(
                "INSERT INTO flashcards
                 (id, document_id, owner_id, question, answer, context,
                  page_index, hidden, deleted, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    Self::id_to_bytes(card.id.value()),
                    Self::id_to_bytes(card.document_id.value()),
                    Self::id_to_bytes(card.owner_id.value()),
                    card.question,
                    card.answer,
                    card.context,
                    card.page_index as i64,
                    card.hidden,
                    card.deleted,
                    card.created_at as i64,
                ],
            )?;
        }
        tx.commit()?;
        Ok(cards.len())
    }

    fn list_cards(
        &self,
        document_id: DocumentId,
        owner_id: OwnerId,
    ) -> Result<Vec<Flashcard>, Self::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT id, document_id, owner_id, question, answer, context,
                    page_index, hidden, deleted, created_at
             FROM flashcards
             WHERE document_id = ?1 AND owner_id = ?2 AND deleted = 0
             ORDER BY created_at DESC, id DESC",
        )?;
        let cards = stmt
            .query_map(
                params![
                    Self::id_to_bytes(document_id.value()),
                    Self::id_to_bytes(owner_id.value()),
                ],
                Self::row_to_card,
            )?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(cards)
    }

    fn create_status(&mut self, status: ProcessingStatus) -> Result<StatusId, Self::Error> {
        self.conn.execute(
            "INSERT INTO processing_statuses
             (id, document_id, owner_id, state, cards_count, cancel_requested,
              error, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                Self::id_to_bytes(status.id.value()),
                Self::id_to_bytes(status.document_id.value()),
                Self::id_to_bytes(status.owner_id.value()),
                status.state.as_str(),
                status.cards_count as i64,
                status.cancel_requested,
                status.error,
                status.created_at as i64,
                status.updated_at as i64,
            ],
        )?;
        Ok(status.id)
    }

    fn update_status(
        &mut self,
        id: StatusId,
        state: JobState,
        cards_count: u32,
        error: Option<String>,
    ) -> Result<(), Self::Error> {
        let current = self
            .read_status(id)?
            .ok_or_else(|| StoreError::NotFound(format!("status {}", id)))?;

        if !current.state.can_transition_to(state) {
            return Err(StoreError::IllegalTransition(format!(
                "{} -> {}",
                current.state, state
            )));
        }

        self.conn.execute(
            "UPDATE processing_statuses
             SET state = ?1, cards_count = ?2, error = ?3, updated_at = ?4
             WHERE id = ?5",
            params![
                state.as_str(),
                cards_count as i64,
                error,
                unix_timestamp() as i64,
                Self::id_to_bytes(id.value()),
            ],
        )?;
        Ok(())
    }

    fn read_status(&self, id: StatusId) -> Result<Option<ProcessingStatus>, Self::Error> {
        let status = self
            .conn
            .query_row(
                "SELECT id, document_id, owner_id, state, cards_count,
                        cancel_requested, error, created_at, updated_at
                 FROM processing_statuses WHERE id = ?1",
                params![Self::id_to_bytes(id.value())],
                Self::row_to_status,
            )
            .optional()?;
        Ok(status)
    }

    fn latest_status_for_document(
        &self,
        document_id: DocumentId,
    ) -> Result<Option<ProcessingStatus>, Self::Error> {
        let status = self
            .conn
            .query_row(
                "SELECT id, document_id, owner_id, state, cards_count,
                        cancel_requested, error, created_at, updated_at
                 FROM processing_statuses
                 WHERE document_id = ?1
                 ORDER BY created_at DESC, id DESC
                 LIMIT 1",
                params![Self::id_to_bytes(document_id.value())],
                Self::row_to_status,
            )
            .optional()?;
        Ok(status)
    }

    fn set_cancel_requested(&mut self, id: StatusId) -> Result<(), Self::Error> {
        let changed = self.conn.execute(
            "UPDATE processing_statuses
             SET cancel_requested = 1, updated_at = ?1
             WHERE id = ?2",
            params![unix_timestamp() as i64, Self::id_to_bytes(id.value())],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(format!("status {}", id)));
        }
        Ok(())
    }

    fn cancel_requested(&self, id: StatusId) -> Result<bool, Self::Error> {
        let flag = self
            .conn
            .query_row(
                "SELECT cancel_requested FROM processing_statuses WHERE id = ?1",
                params![Self::id_to_bytes(id.value())],
                |row| row.get(0),
            )
            .optional()?;
        flag.ok_or_else(|| StoreError::NotFound(format!("status {}", id)))
    }
}
