//! Error types for the content store

use thiserror::Error;

/// Result type alias using `ContentError`
pub type Result<T> = std::result::Result<T, ContentError>;

/// Content store error types
#[derive(Debug, Error)]
pub enum ContentError {
    /// I/O failure while copying, probing, or unlinking
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Store-relative filename failed validation
    #[error("Invalid store filename: {0}")]
    InvalidFilename(String),

    /// Requested file is not present in the managed directory
    #[error("File not in store: {0}")]
    Missing(String),

    /// Unexpected failure (background task aborted, etc.)
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<ContentError> for reel_core::ReelError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::Io(e) => reel_core::ReelError::Io(e),
            ContentError::InvalidFilename(name) => {
                reel_core::ReelError::validation(format!("invalid store filename: {name}"))
            }
            ContentError::Missing(name) => reel_core::ReelError::not_found("Media file", name),
            ContentError::Unknown(msg) => reel_core::ReelError::internal(msg),
        }
    }
}
