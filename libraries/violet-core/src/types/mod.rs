//! Domain types

mod ids;
mod song;

pub use ids::SongId;
pub use song::{ensure_unique_ids, NewSong, Song};
