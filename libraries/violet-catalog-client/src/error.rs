//! Error types for the catalog client.

use thiserror::Error;
use violet_core::SongId;

/// Errors that can occur while fetching the song catalog.
///
/// None of these reach the user: [`crate::CatalogClient::load_catalog`]
/// logs them and moves on to the next source.
#[derive(Error, Debug)]
pub enum CatalogClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned a non-success status
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Body was not a JSON array of songs
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Server returned an empty array
    #[error("Catalog is empty")]
    EmptyCatalog,

    /// Two songs in one response share an id
    #[error("Duplicate song id in catalog: {0}")]
    DuplicateId(SongId),

    /// Invalid API base or endpoint URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),
}

/// Result type for catalog client operations.
pub type Result<T> = std::result::Result<T, CatalogClientError>;
