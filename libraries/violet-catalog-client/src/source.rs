//! Candidate song sources tried by the catalog client.

use crate::error::{CatalogClientError, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use violet_core::Song;

/// One place a catalog can be fetched from.
///
/// Sources return songs as the remote side sent them. Validation and URL
/// normalization happen in the client so every source is treated the same.
#[async_trait]
pub trait SongSource: Send + Sync {
    /// Human-readable identifier used in logs and [`crate::CatalogOrigin`]
    fn name(&self) -> &str;

    /// Fetch the full song list.
    async fn fetch(&self) -> Result<Vec<Song>>;
}

/// `GET {url}` returning a JSON array of songs.
pub struct HttpSongSource {
    http: Client,
    url: String,
}

impl HttpSongSource {
    pub fn new(http: Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SongSource for HttpSongSource {
    fn name(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<Vec<Song>> {
        debug!(url = %self.url, "Fetching catalog");

        let response = self.http.get(&self.url).send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                CatalogClientError::ServerUnreachable(e.to_string())
            } else {
                CatalogClientError::Request(e)
            }
        })?;

        let status = response.status();

        if status.is_success() {
            let songs: Vec<Song> = response.json().await.map_err(|e| {
                CatalogClientError::ParseError(format!("Failed to parse song list: {}", e))
            })?;

            debug!(url = %self.url, songs = songs.len(), "Fetched catalog");
            Ok(songs)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(CatalogClientError::ServerError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }
}
