//! Playback controller - core orchestration
//!
//! Owns the playback state and the media primitive, and is the only place
//! either is mutated. User intents are applied to state synchronously; play
//! attempts are asynchronous and reconciled when the primitive reports back.

use crate::{
    error::MediaError,
    events::PlaybackEvent,
    media::{MediaEvent, MediaPrimitive, PlayTicket},
    preferences::PreferenceStore,
    queue::Queue,
    shuffle::ShufflePicker,
    types::{PlaybackConfig, PlaybackState, TransportState},
    volume::Volume,
};
use tracing::{debug, info, warn};
use violet_core::{default_stream_path, ensure_absolute, Song, SongId};

/// A play attempt that has not settled yet
#[derive(Debug, Clone, Copy)]
struct PendingPlay {
    ticket: PlayTicket,

    /// Further attempts allowed after a rejection
    retries_left: u8,
}

/// Central playback state machine
///
/// States:
/// - `Idle`: queue empty, transport operations are no-ops
/// - `Paused`: a track is loaded
/// - `Playing`: the primitive confirmed playback, or playback intent is
///   being carried into a new track
///
/// Every play attempt is tagged with the current epoch. Track changes,
/// pauses and queue replacements bump the epoch, so an attempt issued for a
/// track that is no longer current can never change state when it settles.
pub struct PlaybackController<M: MediaPrimitive> {
    media: M,
    queue: Queue,

    // PlaybackState
    current_index: usize,
    is_playing: bool,
    current_time: f64,
    duration: f64,
    volume: Volume,
    is_liked: bool,
    is_shuffled: bool,
    is_repeating: bool,

    // Async play bookkeeping
    epoch: u64,
    attempts: u64,
    pending_play: Option<PendingPlay>,

    preferences: PreferenceStore,
    shuffle: ShufflePicker,
    stream_base: String,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl<M: MediaPrimitive> PlaybackController<M> {
    /// Create a controller over `queue`
    ///
    /// Volume is restored from `preferences`. A non-empty queue has its first
    /// track loaded into the primitive, paused.
    pub fn new(media: M, queue: Queue, preferences: PreferenceStore, config: PlaybackConfig) -> Self {
        let volume = Volume::new(i64::from(preferences.read_volume()));
        let shuffle = match config.shuffle_seed {
            Some(seed) => ShufflePicker::seeded(seed),
            None => ShufflePicker::from_entropy(),
        };

        let mut controller = Self {
            media,
            queue,
            current_index: 0,
            is_playing: false,
            current_time: 0.0,
            duration: 0.0,
            volume,
            is_liked: false,
            is_shuffled: false,
            is_repeating: false,
            epoch: 0,
            attempts: 0,
            pending_play: None,
            preferences,
            shuffle,
            stream_base: config.stream_base,
            pending_events: Vec::new(),
        };

        controller.media.set_volume(controller.volume.gain());
        if !controller.queue.is_empty() {
            controller.load_current_source();
        }

        info!(
            queue_len = controller.queue.len(),
            volume = controller.volume.level(),
            "Playback controller ready"
        );

        controller
    }

    // ===== Queue =====

    /// Replace the queue wholesale
    ///
    /// Resets to the first track. If playback was active, the new first track
    /// is started; an empty queue moves to `Idle`.
    pub fn load_queue(&mut self, queue: Queue) {
        let before = self.transport_state();
        let was_playing = self.is_playing;
        let previous_song_id = self.current_song_id();

        self.invalidate_pending();
        self.queue = queue;
        self.current_index = 0;
        self.current_time = 0.0;
        self.duration = 0.0;

        info!(length = self.queue.len(), was_playing, "Queue replaced");
        self.emit(PlaybackEvent::QueueReplaced {
            length: self.queue.len(),
        });

        if self.queue.is_empty() {
            self.media.pause();
            self.is_playing = false;
        } else {
            self.load_current_source();
            self.emit_track_changed(previous_song_id);
            self.emit_position();
            if was_playing {
                self.start_play(0);
            }
        }

        self.emit_state_if_changed(before);
    }

    // ===== Transport =====

    /// Play when paused, pause when playing
    pub fn toggle_play_pause(&mut self) {
        if self.is_playing || self.pending_play.is_some() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Ask the primitive to start playback
    ///
    /// `is_playing` only becomes true once the attempt succeeds.
    pub fn play(&mut self) {
        if self.queue.is_empty() {
            debug!("Ignoring play with empty queue");
            return;
        }
        if self.is_playing || self.pending_play.is_some() {
            return;
        }
        self.start_play(0);
    }

    /// Stop playback synchronously
    ///
    /// Also cancels an in-flight play attempt.
    pub fn pause(&mut self) {
        if !self.is_playing && self.pending_play.is_none() {
            return;
        }
        let before = self.transport_state();

        self.invalidate_pending();
        self.media.pause();
        self.is_playing = false;

        self.emit_state_if_changed(before);
    }

    /// Make `index` the current track
    ///
    /// Out-of-range indices are ignored. Selecting the current index restarts
    /// it in place without reloading the source.
    pub fn select_track(&mut self, index: usize) {
        if index >= self.queue.len() {
            debug!(index, len = self.queue.len(), "Ignoring out-of-range track selection");
            return;
        }
        if index == self.current_index {
            self.restart_in_place();
            return;
        }

        let before = self.transport_state();
        let previous_song_id = self.current_song_id();

        self.invalidate_pending();
        self.current_index = index;
        self.current_time = 0.0;
        self.duration = 0.0;
        self.load_current_source();

        self.emit_track_changed(previous_song_id);
        self.emit_position();

        if self.is_playing {
            self.start_play(0);
        }

        self.emit_state_if_changed(before);
    }

    /// Advance to the next track
    ///
    /// With shuffle on, any index may be chosen, including the current one.
    pub fn next(&mut self) {
        if let Some(index) = self.next_index() {
            self.select_track(index);
        }
    }

    /// Go back one track, wrapping to the end
    pub fn previous(&mut self) {
        if let Ok(index) = self.queue.index_before(self.current_index) {
            self.select_track(index);
        }
    }

    // ===== Seek =====

    /// Move to `seconds` in the current track
    ///
    /// State is updated immediately, without waiting for the primitive.
    pub fn seek(&mut self, seconds: f64) {
        if self.queue.is_empty() || !seconds.is_finite() {
            return;
        }
        let seconds = seconds.max(0.0);

        self.media.set_position(seconds);
        self.current_time = seconds;
        self.emit_position();
    }

    // ===== Volume =====

    /// Set volume (clamped to 0-100) and persist it
    ///
    /// Persistence failures are logged and otherwise ignored.
    pub fn set_volume(&mut self, level: i64) {
        self.volume.set_level(level);
        self.media.set_volume(self.volume.gain());

        if let Err(e) = self.preferences.write_volume(i64::from(self.volume.level())) {
            warn!(error = %e, "Failed to persist volume");
        }

        self.emit(PlaybackEvent::VolumeChanged {
            level: self.volume.level(),
        });
    }

    // ===== Modes =====

    pub fn toggle_shuffle(&mut self) {
        self.is_shuffled = !self.is_shuffled;
        self.emit_modes();
    }

    pub fn toggle_repeat(&mut self) {
        self.is_repeating = !self.is_repeating;
        self.emit_modes();
    }

    /// Flip the like flag (session only)
    pub fn toggle_liked(&mut self) {
        self.is_liked = !self.is_liked;
        self.emit_modes();
    }

    // ===== Media events =====

    /// Dispatch a notification from the media primitive
    pub fn handle_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::TimeUpdate { position } => self.on_media_time_update(position),
            MediaEvent::MetadataLoaded { duration } => self.on_media_metadata_loaded(duration),
            MediaEvent::Ended => self.on_media_ended(),
            MediaEvent::PlaySettled { ticket, outcome } => self.on_play_settled(ticket, outcome),
        }
    }

    /// Mirror the primitive's position
    ///
    /// Not ordered against `seek`; whichever lands last wins.
    pub fn on_media_time_update(&mut self, position: f64) {
        if !position.is_finite() || position < 0.0 {
            return;
        }
        self.current_time = position;
        self.emit_position();
    }

    /// Record the real duration and re-apply volume
    ///
    /// Falls back to the song's declared duration when `native` is not a
    /// positive finite number.
    pub fn on_media_metadata_loaded(&mut self, native: f64) {
        self.duration = if native.is_finite() && native > 0.0 {
            native
        } else {
            self.current_song()
                .map(|song| f64::from(song.duration_seconds))
                .unwrap_or(0.0)
        };

        // Some engines reset gain when a new source loads
        self.media.set_volume(self.volume.gain());

        self.emit(PlaybackEvent::DurationChanged {
            seconds: self.duration,
        });
    }

    /// Track reached its end
    ///
    /// Repeat restarts the same track (one retry if the primitive refuses);
    /// otherwise behaves like [`next`](Self::next). When the next track is
    /// the current one and playback was running, a fresh play attempt is
    /// issued since the primitive has already stopped.
    pub fn on_media_ended(&mut self) {
        if self.queue.is_empty() {
            return;
        }
        if !self.is_repeating {
            match self.next_index() {
                Some(index) if index == self.current_index && self.is_playing => {
                    self.invalidate_pending();
                    self.restart_in_place();
                    self.start_play(0);
                }
                Some(index) => self.select_track(index),
                None => {}
            }
            return;
        }

        let before = self.transport_state();

        self.invalidate_pending();
        self.media.set_position(0.0);
        self.current_time = 0.0;
        self.emit_position();

        self.is_playing = true;
        self.start_play(1);

        self.emit_state_if_changed(before);
    }

    /// Outcome of a play attempt
    ///
    /// Settlements for anything but the current pending attempt are dropped.
    pub fn on_play_settled(&mut self, ticket: PlayTicket, outcome: Result<(), MediaError>) {
        let pending = match self.pending_play {
            Some(pending) if pending.ticket == ticket => pending,
            _ => {
                debug!(
                    ticket_epoch = ticket.epoch(),
                    current_epoch = self.epoch,
                    "Discarding stale play settlement"
                );
                return;
            }
        };
        self.pending_play = None;
        let before = self.transport_state();

        match outcome {
            Ok(()) => {
                debug!(index = self.current_index, "Playback started");
                self.is_playing = true;
            }
            Err(e) if pending.retries_left > 0 => {
                warn!(error = %e, "Play attempt rejected, retrying");
                self.start_play(pending.retries_left - 1);
            }
            Err(e) => {
                warn!(error = %e, index = self.current_index, "Play attempt rejected");
                self.is_playing = false;
                let song_id = self.current_song_id();
                self.emit(PlaybackEvent::PlayRejected {
                    song_id,
                    reason: e.to_string(),
                });
            }
        }

        self.emit_state_if_changed(before);
    }

    // ===== State Queries =====

    pub fn transport_state(&self) -> TransportState {
        if self.queue.is_empty() {
            TransportState::Idle
        } else if self.is_playing {
            TransportState::Playing
        } else {
            TransportState::Paused
        }
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_song(&self) -> Option<&Song> {
        self.queue.get(self.current_index).ok()
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Whether a play attempt is waiting for the primitive
    pub fn has_pending_play(&self) -> bool {
        self.pending_play.is_some()
    }

    /// Seconds
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Seconds, 0 until metadata has loaded
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Reported duration if known, else the declared one
    pub fn effective_duration(&self) -> f64 {
        if self.duration > 0.0 {
            self.duration
        } else {
            self.declared_duration()
        }
    }

    /// Upper bound for a progress bar
    pub fn progress_max(&self) -> f64 {
        self.duration.max(self.declared_duration())
    }

    pub fn volume(&self) -> u8 {
        self.volume.level()
    }

    pub fn is_liked(&self) -> bool {
        self.is_liked
    }

    pub fn is_shuffled(&self) -> bool {
        self.is_shuffled
    }

    pub fn is_repeating(&self) -> bool {
        self.is_repeating
    }

    /// Absolute cover URL of the current song
    pub fn album_art_url(&self) -> Option<String> {
        self.current_song()
            .map(|song| ensure_absolute(&song.album_art, &self.stream_base))
    }

    /// Read-only access to the media primitive
    pub fn media(&self) -> &M {
        &self.media
    }

    /// Snapshot of the full playback state
    pub fn snapshot(&self) -> PlaybackState {
        PlaybackState {
            transport: self.transport_state(),
            current_index: self.current_index,
            current_song_id: self.current_song_id(),
            is_playing: self.is_playing,
            current_time: self.current_time,
            duration: self.duration,
            volume: self.volume.level(),
            is_liked: self.is_liked,
            is_shuffled: self.is_shuffled,
            is_repeating: self.is_repeating,
        }
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns everything emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internals =====

    fn current_song_id(&self) -> Option<SongId> {
        self.current_song().map(|song| song.id)
    }

    fn declared_duration(&self) -> f64 {
        self.current_song()
            .map(|song| f64::from(song.duration_seconds))
            .unwrap_or(0.0)
    }

    /// Point the primitive at the current song and re-sync volume
    fn load_current_source(&mut self) {
        let Some(url) = self
            .current_song()
            .map(|song| stream_url(song, &self.stream_base))
        else {
            return;
        };

        debug!(index = self.current_index, url = %url, "Loading source");
        self.media.set_source(&url);
        self.media.load();
        self.media.set_volume(self.volume.gain());
    }

    /// Index `next` would move to; shuffle may return the current one
    fn next_index(&mut self) -> Option<usize> {
        if self.is_shuffled {
            self.shuffle.pick(self.queue.len())
        } else {
            self.queue.index_after(self.current_index).ok()
        }
    }

    fn restart_in_place(&mut self) {
        self.media.set_position(0.0);
        self.current_time = 0.0;
        self.emit_position();
    }

    /// Drop any in-flight attempt and start a new epoch
    fn invalidate_pending(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.pending_play = None;
    }

    fn start_play(&mut self, retries_left: u8) {
        self.attempts = self.attempts.wrapping_add(1);
        let ticket = PlayTicket::new(self.epoch, self.attempts);
        self.pending_play = Some(PendingPlay {
            ticket,
            retries_left,
        });

        debug!(
            epoch = ticket.epoch(),
            attempt = ticket.attempt(),
            index = self.current_index,
            "Issuing play attempt"
        );
        self.media.play(ticket);
    }

    fn emit(&mut self, event: PlaybackEvent) {
        self.pending_events.push(event);
    }

    fn emit_state_if_changed(&mut self, before: TransportState) {
        let state = self.transport_state();
        if state != before {
            self.emit(PlaybackEvent::StateChanged { state });
        }
    }

    fn emit_track_changed(&mut self, previous_song_id: Option<SongId>) {
        if let Some(song_id) = self.current_song_id() {
            self.emit(PlaybackEvent::TrackChanged {
                index: self.current_index,
                song_id,
                previous_song_id,
            });
        }
    }

    fn emit_position(&mut self) {
        self.emit(PlaybackEvent::PositionChanged {
            seconds: self.current_time,
        });
    }

    fn emit_modes(&mut self) {
        self.emit(PlaybackEvent::ModesChanged {
            is_shuffled: self.is_shuffled,
            is_repeating: self.is_repeating,
            is_liked: self.is_liked,
        });
    }
}

/// Absolute stream URL for `song`, falling back to the default track path
fn stream_url(song: &Song, base: &str) -> String {
    let path = song
        .stream_url
        .clone()
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| default_stream_path(song.id));
    ensure_absolute(&path, base)
}
