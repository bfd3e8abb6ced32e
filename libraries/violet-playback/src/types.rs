//! Core types for playback management

use serde::{Deserialize, Serialize};
use violet_core::SongId;

/// Default volume when nothing has been persisted
pub const DEFAULT_VOLUME: u8 = 75;

/// Default origin used to resolve relative stream URLs
pub const DEFAULT_STREAM_BASE: &str = "http://localhost:5273";

/// Transport state of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportState {
    /// No queue loaded; transport operations are disabled
    Idle,

    /// Track loaded, not playing
    Paused,

    /// Currently playing
    Playing,
}

/// Point-in-time view of everything the presentation layer renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    pub transport: TransportState,

    /// Index into the queue (0 when the queue is empty)
    pub current_index: usize,

    pub current_song_id: Option<SongId>,

    pub is_playing: bool,

    /// Seconds
    pub current_time: f64,

    /// Seconds, 0 until metadata arrives
    pub duration: f64,

    /// 0-100
    pub volume: u8,

    pub is_liked: bool,
    pub is_shuffled: bool,
    pub is_repeating: bool,
}

/// Configuration for the playback controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Origin that relative stream URLs are resolved against
    pub stream_base: String,

    /// Fixed shuffle seed, mainly for reproducible tests
    pub shuffle_seed: Option<u64>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            stream_base: DEFAULT_STREAM_BASE.to_string(),
            shuffle_seed: None,
        }
    }
}
