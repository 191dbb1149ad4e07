//! Job status module - lifecycle of a card-generation attempt

use crate::document::{DocumentId, OwnerId};
use std::fmt;

/// Unique identifier for a processing-status record based on UUIDv7
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StatusId(u128);

impl StatusId {
    /// Generate a new UUIDv7-based StatusId
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a StatusId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a StatusId from a UUIDv7 string
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
        (self.0 >> 80) as u64
    }
}

impl Default for StatusId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StatusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// State of a card-generation job
///
/// Stored transitions are strictly monotonic:
/// `Processing → Completed` or `Processing → Failed`. `NotStarted` is
/// synthesized for callers polling a document with no attempts on record;
/// it is never written to storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobState {
    /// No generation attempt exists yet (synthesized, never stored)
    NotStarted,

    /// Job accepted and running; set at enqueue, before pipeline work
    Processing,

    /// Terminal: run finished, cards (possibly zero) persisted
    Completed,

    /// Terminal: run aborted with an error, nothing persisted
    Failed,
}

impl JobState {
    /// Get the state name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            JobState::NotStarted => "not_started",
            JobState::Processing => "processing",
            JobState::Completed => "completed",
            JobState::Failed => "failed",
        }
    }

    /// Parse a state from a string (internal use)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "not_started" => Some(JobState::NotStarted),
            "processing" => Some(JobState::Processing),
            "completed" => Some(JobState::Completed),
            "failed" => Some(JobState::Failed),
            _ => None,
        }
    }

    /// Whether this state accepts no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Completed | JobState::Failed)
    }

    /// Whether a stored record may move from this state to `next`
    ///
    /// Only `Processing` records move, and only forward. `NotStarted` is
    /// never stored, so nothing transitions out of it either.
    pub fn can_transition_to(&self, next: JobState) -> bool {
        matches!(
            (self, next),
            (JobState::Processing, JobState::Completed) | (JobState::Processing, JobState::Failed)
        )
    }
}

impl std::str::FromStr for JobState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid job state: {}", s))
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One card-generation attempt for a document
///
/// A document may accumulate several of these over its lifetime (one per
/// attempt); pollers only ever see the most recent one.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingStatus {
    /// Unique identifier
    pub id: StatusId,

    /// Document being processed
    pub document_id: DocumentId,

    /// Owner of the document
    pub owner_id: OwnerId,

    /// Current state
    pub state: JobState,

    /// Number of cards persisted by this attempt (0 until completion)
    pub cards_count: u32,

    /// Cooperative-cancellation flag, persisted for cross-process visibility
    pub cancel_requested: bool,

    /// Human-readable failure message, set only in `Failed`
    pub error: Option<String>,

    /// When this attempt was created (unix seconds)
    pub created_at: u64,

    /// When this record last changed (unix seconds)
    pub updated_at: u64,
}

impl ProcessingStatus {
    /// Create a new attempt, already in `Processing`
    ///
    /// Jobs transition into `Processing` at enqueue, before any pipeline
    /// work starts, so a freshly created record is never `NotStarted`.
    pub fn new(document_id: DocumentId, owner_id: OwnerId, created_at: u64) -> Self {
        Self {
            id: StatusId::new(),
            document_id,
            owner_id,
            state: JobState::Processing,
            cards_count: 0,
            cancel_requested: false,
            error: None,
            created_at,
            updated_at: created_at,
        }
    }
}

/// The polling view of a document's generation progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSnapshot {
    /// State of the most recent attempt, or `NotStarted`
    pub state: JobState,

    /// Cards persisted by that attempt
    pub cards_count: u32,

    /// When that attempt was created (unix seconds; 0 when synthesized)
    pub created_at: u64,
}

impl StatusSnapshot {
    /// The snapshot returned for a document with no attempts on record
    pub fn not_started() -> Self {
        Self {
            state: JobState::NotStarted,
            cards_count: 0,
            created_at: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_string_roundtrip() {
        for state in [
            JobState::NotStarted,
            JobState::Processing,
            JobState::Completed,
            JobState::Failed,
        ] {
            assert_eq!(JobState::parse(state.as_str()), Some(state));
            assert_eq!(state.as_str().parse::<JobState>().unwrap(), state);
        }
        assert!(JobState::parse("queued").is_none());
    }

    #[test]
    fn test_only_forward_transitions() {
        assert!(JobState::Processing.can_transition_to(JobState::Completed));
        assert!(JobState::Processing.can_transition_to(JobState::Failed));

        assert!(!JobState::Completed.can_transition_to(JobState::Processing));
        assert!(!JobState::Completed.can_transition_to(JobState::Failed));
        assert!(!JobState::Failed.can_transition_to(JobState::Completed));
        assert!(!JobState::NotStarted.can_transition_to(JobState::Processing));
        assert!(!JobState::Processing.can_transition_to(JobState::Processing));
    }

    #[test]
    fn test_terminal_states() {
        assert!(JobState::Completed.is_terminal());
        assert!(JobState::Failed.is_terminal());
        assert!(!JobState::Processing.is_terminal());
        assert!(!JobState::NotStarted.is_terminal());
    }

    #[test]
    fn test_new_attempt_is_processing() {
        let status = ProcessingStatus::new(DocumentId::new(), OwnerId::new(), 1_700_000_000);
        assert_eq!(status.state, JobState::Processing);
        assert_eq!(status.cards_count, 0);
        assert!(!status.cancel_requested);
        assert!(status.error.is_none());
        assert_eq!(status.created_at, status.updated_at);
    }

    #[test]
    fn test_not_started_snapshot() {
        let snapshot = StatusSnapshot::not_started();
        assert_eq!(snapshot.state, JobState::NotStarted);
        assert_eq!(snapshot.cards_count, 0);
        assert_eq!(snapshot.created_at, 0);
    }
}
