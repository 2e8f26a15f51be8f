/// Core error types for Reel Vault
use thiserror::Error;

/// Result type alias using `ReelError`
pub type Result<T> = std::result::Result<T, ReelError>;

/// Core error type for Reel Vault
///
/// The taxonomy maps one-to-one onto transport status codes: validation
/// failures are never retried, conflicts are distinct from the benign
/// dedupe path (which is a success), and ownership mismatches are reported
/// as not-found so cross-owner existence never leaks.
#[derive(Error, Debug)]
pub enum ReelError {
    /// Missing/empty required field, malformed or disallowed input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Duplicate title, external URL, or playlist name
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Entity not found (or owned by another scope)
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind, e.g. "Video" or "Playlist"
        entity: String,
        /// Identifier that failed to resolve
        id: String,
    },

    /// I/O errors from the content store
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Database errors (for storage implementations)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Unexpected failures; detail stays internal
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ReelError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for ReelError {
    fn from(err: sqlx::Error) -> Self {
        Self::Storage(err.to_string())
    }
}
