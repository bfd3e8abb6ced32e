//! Platform-agnostic media primitive trait
//!
//! Abstracts the platform audio engine (an HTML media element, a native
//! player, a test double). The controller is its only caller.

use crate::error::MediaError;

/// Identity of one play attempt
///
/// Carries the controller epoch at the time the attempt was issued. The
/// platform hands it back unchanged when the attempt settles, and the
/// controller drops settlements from superseded epochs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayTicket {
    epoch: u64,
    attempt: u64,
}

impl PlayTicket {
    pub(crate) fn new(epoch: u64, attempt: u64) -> Self {
        Self { epoch, attempt }
    }

    /// Epoch the attempt belongs to
    pub fn epoch(self) -> u64 {
        self.epoch
    }

    /// Sequence number, unique per controller
    pub fn attempt(self) -> u64 {
        self.attempt
    }
}

/// Platform audio engine
///
/// Implementors apply commands immediately except `play`, which only starts
/// an attempt. Its outcome must later be delivered through
/// [`MediaEvent::PlaySettled`] with the same ticket.
pub trait MediaPrimitive {
    /// Point the engine at a new source URL
    fn set_source(&mut self, url: &str);

    /// Begin loading the current source
    fn load(&mut self);

    /// Start an asynchronous play attempt
    fn play(&mut self, ticket: PlayTicket);

    /// Stop playback (synchronous)
    fn pause(&mut self);

    /// Current position in seconds
    fn position(&self) -> f64;

    /// Move to `seconds`
    fn set_position(&mut self, seconds: f64);

    /// Set output gain in `[0.0, 1.0]`
    fn set_volume(&mut self, gain: f64);
}

/// Notifications from the media primitive
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Periodic position report
    TimeUpdate { position: f64 },

    /// Source metadata available; `duration` may be NaN or infinite
    MetadataLoaded { duration: f64 },

    /// Reached end of the track
    Ended,

    /// A play attempt finished
    PlaySettled {
        ticket: PlayTicket,
        outcome: Result<(), MediaError>,
    },
}

/// Media primitive that accepts every command and never makes a sound
///
/// Useful as a placeholder before a platform engine is attached. Play
/// attempts are left pending; the owner decides how they settle.
#[derive(Debug, Default, Clone)]
pub struct NullMedia {
    position: f64,
    gain: f64,
    source: Option<String>,
    last_ticket: Option<PlayTicket>,
}

impl NullMedia {
    pub fn new() -> Self {
        Self::default()
    }

    /// Source URL last set
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Gain last applied
    pub fn gain(&self) -> f64 {
        self.gain
    }

    /// Ticket of the most recent play attempt
    pub fn last_ticket(&self) -> Option<PlayTicket> {
        self.last_ticket
    }
}

impl MediaPrimitive for NullMedia {
    fn set_source(&mut self, url: &str) {
        self.source = Some(url.to_string());
        self.position = 0.0;
    }

    fn load(&mut self) {}

    fn play(&mut self, ticket: PlayTicket) {
        self.last_ticket = Some(ticket);
    }

    fn pause(&mut self) {}

    fn position(&self) -> f64 {
        self.position
    }

    fn set_position(&mut self, seconds: f64) {
        self.position = seconds;
    }

    fn set_volume(&mut self, gain: f64) {
        self.gain = gain;
    }
}
