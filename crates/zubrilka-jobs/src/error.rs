//! Error types for job orchestration

use thiserror::Error;

/// Errors that can occur while submitting or controlling jobs
#[derive(Error, Debug)]
pub enum JobError {
    /// Storage layer error
    #[error("Storage error: {0}")]
    Store(String),

    /// Submission parameters out of range
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Document unknown, deleted, or owned by someone else
    ///
    /// The three cases are deliberately indistinguishable so a caller
    /// cannot probe for other owners' documents.
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    /// Status record unknown
    #[error("Status not found: {0}")]
    StatusNotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Fold any displayable store error into [`JobError::Store`]
pub(crate) fn store_error<E: std::fmt::Display>(e: E) -> JobError {
    JobError::Store(e.to_string())
}
