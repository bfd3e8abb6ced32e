//! Catalog client: ordered source cascade with a built-in fallback.

use crate::error::{CatalogClientError, Result};
use crate::source::{HttpSongSource, SongSource};
use crate::types::{Catalog, CatalogClientConfig, CatalogOrigin};
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};
use violet_core::{built_in_catalog, ensure_absolute, ensure_unique_ids, resolve_urls, CoreError, Song};

/// Loads the song catalog once at startup.
///
/// Sources are tried in order; the first one that yields a non-empty list
/// of uniquely identified songs wins outright. If every source fails, the
/// built-in catalog is returned. Failures are logged, never returned.
///
/// # Example
///
/// ```ignore
/// use violet_catalog_client::{CatalogClient, CatalogClientConfig};
///
/// let client = CatalogClient::new(CatalogClientConfig::default())?;
/// let catalog = client.load_catalog().await;
/// println!("{} songs from {:?}", catalog.songs.len(), catalog.origin);
/// ```
#[derive(Clone)]
pub struct CatalogClient {
    api_base: String,
    sources: Vec<Arc<dyn SongSource>>,
}

impl CatalogClient {
    /// Create a client that fetches from the configured HTTP endpoints.
    pub fn new(config: CatalogClientConfig) -> Result<Self> {
        let api_base = normalize_base(&config.api_base)?;

        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("VioletPlayer/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        let sources = config
            .endpoints
            .iter()
            .map(|endpoint| {
                let url = ensure_absolute(endpoint, &api_base);
                Arc::new(HttpSongSource::new(http.clone(), url)) as Arc<dyn SongSource>
            })
            .collect();

        Ok(Self { api_base, sources })
    }

    /// Create a client over arbitrary sources.
    ///
    /// `api_base` is still required to resolve relative song URLs.
    pub fn with_sources(api_base: &str, sources: Vec<Arc<dyn SongSource>>) -> Result<Self> {
        Ok(Self {
            api_base: normalize_base(api_base)?,
            sources,
        })
    }

    /// Base URL relative song URLs are resolved against.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Names of the sources in the order they are tried.
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|source| source.name()).collect()
    }

    /// Fetch the catalog, falling back through every source.
    ///
    /// Each source is attempted once. The result always has at least one song.
    pub async fn load_catalog(&self) -> Catalog {
        for source in &self.sources {
            match self.try_source(source.as_ref()).await {
                Ok(songs) => {
                    info!(source = source.name(), songs = songs.len(), "Catalog loaded");
                    return Catalog {
                        songs,
                        origin: CatalogOrigin::Remote {
                            source: source.name().to_string(),
                        },
                    };
                }
                Err(e) => {
                    warn!(source = source.name(), error = %e, "Catalog source failed");
                }
            }
        }

        info!("All catalog sources failed, using built-in catalog");
        Catalog {
            songs: built_in_catalog(&self.api_base),
            origin: CatalogOrigin::BuiltIn,
        }
    }

    /// Run [`load_catalog`](Self::load_catalog) on the tokio runtime.
    ///
    /// Returns immediately; poll the handle with
    /// [`PendingCatalog::try_take`] or await [`PendingCatalog::wait`].
    /// Must be called from within a tokio runtime.
    pub fn spawn_load(&self) -> PendingCatalog {
        let (tx, rx) = oneshot::channel();
        let client = self.clone();

        tokio::spawn(async move {
            let catalog = client.load_catalog().await;
            if tx.send(catalog).is_err() {
                debug!("Catalog load finished after the handle was dropped");
            }
        });

        PendingCatalog {
            rx,
            api_base: self.api_base.clone(),
        }
    }

    async fn try_source(&self, source: &dyn SongSource) -> Result<Vec<Song>> {
        let songs = source.fetch().await?;

        if songs.is_empty() {
            return Err(CatalogClientError::EmptyCatalog);
        }
        ensure_unique_ids(&songs).map_err(|e| match e {
            CoreError::DuplicateSongId(id) => CatalogClientError::DuplicateId(id),
            other => CatalogClientError::ParseError(other.to_string()),
        })?;

        Ok(songs
            .iter()
            .map(|song| resolve_urls(song, &self.api_base))
            .collect())
    }
}

/// Handle to a catalog load running in the background.
#[derive(Debug)]
pub struct PendingCatalog {
    rx: oneshot::Receiver<Catalog>,
    api_base: String,
}

impl PendingCatalog {
    /// Take the catalog if the load has finished.
    ///
    /// Never blocks. Returns `None` while loading and after the catalog has
    /// been taken.
    pub fn try_take(&mut self) -> Option<Catalog> {
        self.rx.try_recv().ok()
    }

    /// Wait for the load to finish.
    ///
    /// Falls back to the built-in catalog if the load task died.
    pub async fn wait(self) -> Catalog {
        match self.rx.await {
            Ok(catalog) => catalog,
            Err(_) => {
                warn!("Catalog load task ended without a result");
                Catalog {
                    songs: built_in_catalog(&self.api_base),
                    origin: CatalogOrigin::BuiltIn,
                }
            }
        }
    }
}

/// Validate an API base and strip trailing slashes.
fn normalize_base(api_base: &str) -> Result<String> {
    violet_core::normalize_base(api_base).map_err(|e| match e {
        CoreError::InvalidBaseUrl(msg) => CatalogClientError::InvalidUrl(msg),
        other => CatalogClientError::InvalidUrl(other.to_string()),
    })
}
