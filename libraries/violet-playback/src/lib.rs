//! Violet Player - Playback Control
//!
//! Platform-agnostic playback control for Violet Player.
//!
//! This crate provides:
//! - The playback controller state machine (idle / paused / playing)
//! - Track selection with wrap-around next/previous and random shuffle
//! - Repeat with a single retry on a refused restart
//! - Volume (0-100, linear gain) persisted through a preference store
//! - Epoch-guarded play attempts so stale results cannot touch a newer track
//! - Event queue for presentation-layer synchronization
//!
//! # Architecture
//!
//! `violet-playback` knows nothing about how audio is produced. The platform
//! supplies a [`MediaPrimitive`] (an HTML media element, a native player, a
//! test double) and forwards its notifications as [`MediaEvent`]s. Play
//! attempts are asynchronous: the controller hands the primitive a
//! [`PlayTicket`] and the platform reports the outcome with that ticket.
//!
//! # Example
//!
//! ```rust
//! use violet_core::{built_in_catalog, Song};
//! use violet_playback::{
//!     MediaEvent, NullMedia, PlaybackConfig, PlaybackController, PreferenceStore, Queue,
//!     TransportState,
//! };
//!
//! let queue = Queue::new(built_in_catalog("http://localhost:5273")).unwrap();
//! let mut controller = PlaybackController::new(
//!     NullMedia::new(),
//!     queue,
//!     PreferenceStore::in_memory(),
//!     PlaybackConfig::default(),
//! );
//!
//! controller.toggle_play_pause();
//!
//! // The platform reports that playback actually started
//! let ticket = controller.media().last_ticket().unwrap();
//! controller.handle_media_event(MediaEvent::PlaySettled { ticket, outcome: Ok(()) });
//! assert_eq!(controller.transport_state(), TransportState::Playing);
//!
//! controller.next();
//! assert_eq!(controller.current_index(), 1);
//! ```

mod controller;
mod error;
mod events;
mod media;
mod preferences;
mod queue;
mod shuffle;
pub mod types;
mod volume;

// Public exports
pub use controller::PlaybackController;
pub use error::{MediaError, PlaybackError, Result};
pub use events::PlaybackEvent;
pub use media::{MediaEvent, MediaPrimitive, NullMedia, PlayTicket};
pub use preferences::{
    BackgroundPreferences, FilePreferences, MemoryPreferences, PreferenceBackend, PreferenceStore,
    PREFERENCES_FILE, VOLUME_KEY,
};
pub use queue::Queue;
pub use shuffle::ShufflePicker;
pub use types::{PlaybackConfig, PlaybackState, TransportState, DEFAULT_VOLUME};
pub use volume::Volume;
