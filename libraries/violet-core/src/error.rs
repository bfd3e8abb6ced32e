//! Core error types for Violet Player
use thiserror::Error;

use crate::types::SongId;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Violet Player
#[derive(Error, Debug)]
pub enum CoreError {
    /// Song not found
    #[error("Song not found: {0}")]
    SongNotFound(SongId),

    /// Two songs in one collection share an id
    #[error("Duplicate song id: {0}")]
    DuplicateSongId(SongId),

    /// A base URL could not be used for resolution
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
