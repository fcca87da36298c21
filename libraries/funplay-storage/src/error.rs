/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// Catalog document could not be parsed
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Error raised by a catalog query
    #[error(transparent)]
    Content(#[from] funplay_core::ContentError),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<sqlx::migrate::MigrateError> for StorageError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        Self::Migration(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidCatalog(err.to_string())
    }
}

impl From<StorageError> for funplay_core::ContentError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Content(inner) => inner,
            other => funplay_core::ContentError::storage(other.to_string()),
        }
    }
}
