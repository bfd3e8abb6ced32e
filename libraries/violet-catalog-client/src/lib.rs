//! Violet Player Catalog Client
//!
//! Fetches the song catalog from the catalog service and degrades to the
//! built-in catalog when the service is unavailable.
//!
//! # Features
//!
//! - **Source cascade**: an ordered list of endpoints, each tried once
//! - **Built-in fallback**: the four default songs when every source fails
//! - **URL normalization**: relative art and stream paths made absolute
//! - **Background load**: start the fetch without blocking startup
//!
//! # Example
//!
//! ```ignore
//! use violet_catalog_client::{CatalogClient, CatalogClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CatalogClient::new(CatalogClientConfig::default())?;
//!
//!     // Start loading while the built-in catalog is already playable
//!     let mut pending = client.spawn_load();
//!
//!     // ... later, from the UI loop
//!     if let Some(catalog) = pending.try_take() {
//!         if let Some(songs) = catalog.into_replacement() {
//!             println!("Loaded {} songs", songs.len());
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod source;
mod types;

// Re-export main types
pub use client::{CatalogClient, PendingCatalog};
pub use error::{CatalogClientError, Result};
pub use source::{HttpSongSource, SongSource};
pub use types::{Catalog, CatalogClientConfig, CatalogOrigin, DEFAULT_API_BASE};
