//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and
//! infrastructure. Implementations live in other crates.

use crate::{DocumentId, Flashcard, JobState, OwnerId, ProcessingStatus, SourceDocument, StatusId};

/// Trait for the storage collaborator backing card generation
///
/// Implemented by the infrastructure layer (zubrilka-store). All methods
/// are synchronous; async callers share an implementation behind
/// `Arc<Mutex<_>>` and hop to a blocking context for pipeline work.
pub trait CardStore {
    /// Error type for store operations
    type Error;

    /// Register an uploaded document so jobs can resolve it
    fn register_document(&mut self, document: SourceDocument) -> Result<DocumentId, Self::Error>;

    /// Look up a document registry entry
    fn get_document(&self, id: DocumentId) -> Result<Option<SourceDocument>, Self::Error>;

    /// Persist a batch of cards atomically
    ///
    /// All cards land or none do; a batch is never partially visible.
    /// Returns the number of cards written.
    fn save_cards(&mut self, cards: &[Flashcard]) -> Result<usize, Self::Error>;

    /// List the non-deleted cards for a document, newest first
    fn list_cards(
        &self,
        document_id: DocumentId,
        owner_id: OwnerId,
    ) -> Result<Vec<Flashcard>, Self::Error>;

    /// Record a new generation attempt
    fn create_status(&mut self, status: ProcessingStatus) -> Result<StatusId, Self::Error>;

    /// Move an attempt to a terminal state
    ///
    /// Implementations must enforce `JobState::can_transition_to`: a
    /// record that is already terminal rejects further updates.
    fn update_status(
        &mut self,
        id: StatusId,
        state: JobState,
        cards_count: u32,
        error: Option<String>,
    ) -> Result<(), Self::Error>;

    /// Read one attempt by id
    fn read_status(&self, id: StatusId) -> Result<Option<ProcessingStatus>, Self::Error>;

    /// Read a document's most recent attempt, if any
    fn latest_status_for_document(
        &self,
        document_id: DocumentId,
    ) -> Result<Option<ProcessingStatus>, Self::Error>;

    /// Persist a cancellation request against a live attempt
    fn set_cancel_requested(&mut self, id: StatusId) -> Result<(), Self::Error>;

    /// Whether cancellation was requested for an attempt
    fn cancel_requested(&self, id: StatusId) -> Result<bool, Self::Error>;
}
