//! Violet Player Core
//!
//! Platform-agnostic core types, URL handling, and error handling for Violet Player.
//!
//! This crate provides the building blocks shared by the catalog service,
//! the catalog client, and the playback controller.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Song`, `SongId`, `NewSong`
//! - **URL Resolution**: turning server-relative asset paths into absolute URLs
//! - **Built-in Catalog**: the four songs every component can fall back to
//! - **Error Handling**: unified `CoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use violet_core::{resolve_urls, Song, SongId};
//!
//! let song = Song::new(SongId::new(7), "Night Drive", "Neon", 201, "/images/night.jpg");
//! let resolved = resolve_urls(&song, "http://localhost:5273");
//!
//! assert_eq!(resolved.album_art, "http://localhost:5273/images/night.jpg");
//! assert_eq!(
//!     resolved.stream_url.as_deref(),
//!     Some("http://localhost:5273/audio/track7.mp3")
//! );
//! ```

#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod time;
pub mod types;
pub mod url;

pub use catalog::{built_in_catalog, seed_records};
pub use error::{CoreError, Result};
pub use time::format_time;
pub use types::{ensure_unique_ids, NewSong, Song, SongId};
pub use self::url::{default_stream_path, ensure_absolute, has_scheme, normalize_base, resolve_urls};
