//! Built-in song catalog
//!
//! The catalog service seeds itself with these records, and the catalog client
//! falls back to them when no remote source answers.

use crate::types::{Song, SongId};
use crate::url::{default_stream_path, resolve_urls};

/// `(id, title, artist, duration, cover path)`
const SEED: [(i64, &str, &str, u32, &str); 4] = [
    (1, "Midnight Dreams", "Luna & Co", 234, "/images/catja.jpg"),
    (2, "Lavender Fields", "Ethereal Sounds", 189, "/images/cat2.jpg"),
    (3, "Purple Haze", "Violet Sky", 205, "/images/AVO.jpg"),
    (4, "Second Flower", "Purple whiskers", 177, "/images/cat5.jpg"),
];

/// The seed catalog with server-relative asset paths
pub fn seed_records() -> Vec<Song> {
    SEED.iter()
        .map(|&(id, title, artist, duration, cover)| {
            let id = SongId::new(id);
            Song::new(id, title, artist, duration, cover).with_stream_url(default_stream_path(id))
        })
        .collect()
}

/// The seed catalog with every URL resolved against `base`
pub fn built_in_catalog(base: &str) -> Vec<Song> {
    seed_records()
        .iter()
        .map(|song| resolve_urls(song, base))
        .collect()
}
