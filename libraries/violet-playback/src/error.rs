//! Error types for playback management

use thiserror::Error;
use violet_core::{CoreError, SongId};

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Queue is empty
    #[error("Queue is empty")]
    QueueEmpty,

    /// Index out of bounds
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    /// Two queue entries share an id
    #[error("Duplicate song id in queue: {0}")]
    DuplicateSongId(SongId),

    /// Preference storage failed
    #[error("Preference storage error: {0}")]
    Preferences(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Preference file could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<CoreError> for PlaybackError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::DuplicateSongId(id) => PlaybackError::DuplicateSongId(id),
            other => PlaybackError::Preferences(other.to_string()),
        }
    }
}

/// Rejection reported by the media primitive for a play attempt
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaError {
    /// Blocked by platform policy (e.g. autoplay without user gesture)
    #[error("Playback not allowed: {0}")]
    NotAllowed(String),

    /// The source could not be decoded or fetched
    #[error("Source not supported: {0}")]
    NotSupported(String),

    /// The attempt was interrupted by a new load
    #[error("Playback aborted")]
    Aborted,

    /// Anything else the platform reports
    #[error("Media error: {0}")]
    Other(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
