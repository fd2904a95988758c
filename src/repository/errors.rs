//! # Repository Errors

use thiserror::Error;

use crate::domain::MangaId;

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Manga with id {0} not found")]
    NotFound(MangaId),

    /// No data bank configured, or the backing file has disappeared.
    /// Reported to clients like a missing record.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Highest stored id leaves no room for another
    #[error("No identifier left after {0}")]
    IdsExhausted(MangaId),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RepositoryError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            RepositoryError::NotFound(_) => 404,
            RepositoryError::StorageUnavailable(_) => 404,
            RepositoryError::IdsExhausted(_) => 500,
            RepositoryError::Io(_) => 500,
            RepositoryError::Serialization(_) => 500,
        }
    }
}

impl From<std::io::Error> for RepositoryError {
    fn from(e: std::io::Error) -> Self {
        RepositoryError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(e: serde_json::Error) -> Self {
        RepositoryError::Serialization(e.to_string())
    }
}
