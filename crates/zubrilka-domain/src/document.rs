//! Source document module - referenced metadata for uploaded documents
//!
//! Upload handling, file storage, and deletion endpoints belong to the
//! surrounding application. Zubrilka keeps just enough of a registry to
//! resolve a document to a path on disk and to refuse work on documents
//! that were soft-deleted after upload.

use std::fmt;
use std::path::PathBuf;

/// Unique identifier for a source document based on UUIDv7
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(u128);

impl DocumentId {
    /// Generate a new UUIDv7-based DocumentId
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a DocumentId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a DocumentId from a UUIDv7 string
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid UUIDv7 string: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// Unique identifier for a document owner based on UUIDv7
///
/// Owners are opaque to Zubrilka; authentication and account management
/// live in the surrounding application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OwnerId(u128);

impl OwnerId {
    /// Generate a new UUIDv7-based OwnerId
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create an OwnerId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse an OwnerId from a UUIDv7 string
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid UUIDv7 string: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for OwnerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// Registry entry for an uploaded document
#[derive(Debug, Clone, PartialEq)]
pub struct SourceDocument {
    /// Unique identifier
    pub id: DocumentId,

    /// Owner of the document
    pub owner_id: OwnerId,

    /// Absolute path of the stored file
    pub path: PathBuf,

    /// Soft-deleted when true; deleted documents accept no new jobs
    pub deleted: bool,

    /// When this document was registered (unix seconds)
    pub created_at: u64,
}

impl SourceDocument {
    /// Create a new, non-deleted document registry entry
    pub fn new(id: DocumentId, owner_id: OwnerId, path: PathBuf, created_at: u64) -> Self {
        Self {
            id,
            owner_id,
            path,
            deleted: false,
            created_at,
        }
    }
}
