//! Zubrilka Domain Layer
//!
//! This crate contains the core domain model for Zubrilka: flashcards,
//! source documents, processing-job status, the ephemeral text types that
//! flow through the generation pipeline, and the trait interface that all
//! storage backends implement.
//!
//! ## Key Concepts
//!
//! - **Flashcard**: One question/answer pair; the answer is always a
//!   verbatim sentence from the source document
//! - **SourceDocument**: Referenced metadata for an uploaded document;
//!   upload and file storage belong to the surrounding application
//! - **ProcessingStatus**: One row per generation attempt with a strict
//!   `processing → completed | failed` lifecycle
//! - **TextChunk / Sentence**: Ephemeral units produced while walking a
//!   document; never persisted
//!
//! ## Architecture
//!
//! - Pure data and business rules only
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod card;
pub mod chunk;
pub mod document;
pub mod status;
pub mod time;
pub mod traits;

// Re-exports for convenience
pub use card::{CardId, Flashcard};
pub use chunk::{PageText, Sentence, TextChunk};
pub use document::{DocumentId, OwnerId, SourceDocument};
pub use status::{JobState, ProcessingStatus, StatusId, StatusSnapshot};
pub use time::unix_timestamp;
pub use traits::CardStore;
