//! Playback Events
//!
//! Event-based communication for UI synchronization. The controller pushes an
//! event for every state mutation; the presentation layer drains them and
//! re-renders.

use crate::types::TransportState;
use serde::{Deserialize, Serialize};
use violet_core::SongId;

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Transport moved between idle, paused and playing
    StateChanged {
        /// The new transport state
        state: TransportState,
    },

    /// A different queue entry became current
    TrackChanged {
        /// Index of the new current song
        index: usize,
        /// ID of the new current song
        song_id: SongId,
        /// ID of the song that was current before (if any)
        previous_song_id: Option<SongId>,
    },

    /// The whole queue was replaced
    QueueReplaced {
        /// New queue length
        length: usize,
    },

    /// Position changed (seek, time update, or reset)
    PositionChanged {
        /// Position in seconds
        seconds: f64,
    },

    /// Track duration became known
    DurationChanged {
        /// Duration in seconds
        seconds: f64,
    },

    /// Volume changed
    VolumeChanged {
        /// New volume level (0-100)
        level: u8,
    },

    /// Shuffle, repeat or like flag flipped
    ModesChanged {
        is_shuffled: bool,
        is_repeating: bool,
        is_liked: bool,
    },

    /// The media primitive refused to start playback
    PlayRejected {
        /// Song the attempt was for
        song_id: Option<SongId>,
        /// Platform-provided reason
        reason: String,
    },
}
