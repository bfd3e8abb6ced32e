//! Shared application state
use crate::services::CatalogService;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,

    /// Fixed origin for song URLs; `None` means per-request resolution
    pub public_base_url: Option<String>,
}

impl AppState {
    pub fn new(catalog: Arc<CatalogService>, public_base_url: Option<String>) -> Self {
        Self {
            catalog,
            public_base_url,
        }
    }
}
