//! Error types for playback session management

use thiserror::Error;

/// Playback errors
///
/// These never cross the [`SessionStore`](crate::SessionStore) boundary: the
/// store logs them and reports "no change" or "no session" instead.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The content store failed while building a queue
    #[error("Content store error: {0}")]
    Content(#[from] funplay_core::ContentError),

    /// Persisted session is structurally invalid
    #[error("Invalid persisted session: {0}")]
    InvalidSession(String),

    /// JSON encoding/decoding failure
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
