//! Types for configuring the client and reporting what it loaded.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use violet_core::Song;

/// Default catalog service location
pub const DEFAULT_API_BASE: &str = "http://localhost:5273";

/// Configuration for fetching the catalog.
#[derive(Debug, Clone)]
pub struct CatalogClientConfig {
    /// Base URL of the catalog service (e.g., "http://localhost:5273")
    ///
    /// Also the base that relative song URLs are resolved against.
    pub api_base: String,

    /// Endpoints tried in order, relative to `api_base` or absolute
    pub endpoints: Vec<String>,

    /// Per-request timeout
    pub timeout: Duration,
}

impl CatalogClientConfig {
    /// Config for `api_base` with the default endpoints.
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            ..Self::default()
        }
    }

    /// Replace the endpoint list.
    pub fn with_endpoints<I, S>(mut self, endpoints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.endpoints = endpoints.into_iter().map(Into::into).collect();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for CatalogClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            endpoints: vec!["/songs".to_string(), "/SongApi/songs".to_string()],
            timeout: Duration::from_secs(10),
        }
    }
}

/// Where a loaded catalog came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogOrigin {
    /// A remote source answered with a usable catalog
    Remote { source: String },

    /// Every source failed; the built-in catalog was used
    BuiltIn,
}

/// Result of a catalog load.
///
/// Exactly one source contributes all songs. URLs are absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub songs: Vec<Song>,
    pub origin: CatalogOrigin,
}

impl Catalog {
    /// Whether a remote source won.
    pub fn is_remote(&self) -> bool {
        matches!(self.origin, CatalogOrigin::Remote { .. })
    }

    /// Songs to swap into a live queue.
    ///
    /// `None` for the built-in catalog, which the player already starts with.
    pub fn into_replacement(self) -> Option<Vec<Song>> {
        if self.is_remote() {
            Some(self.songs)
        } else {
            None
        }
    }
}
