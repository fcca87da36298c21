/// CLI error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Video not found: {0}")]
    UnknownVideo(String),

    #[error("Could not start playback of {0}")]
    StartFailed(String),

    #[error("Storage error: {0}")]
    Storage(#[from] funplay_storage::StorageError),

    #[error("Content error: {0}")]
    Content(#[from] funplay_core::ContentError),

    #[error("Playback error: {0}")]
    Playback(#[from] funplay_playback::PlaybackError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
