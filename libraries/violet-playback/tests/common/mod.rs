//! Shared helpers for playback integration tests

#![allow(dead_code)]

use violet_core::{Song, SongId};
use violet_playback::{
    MediaError, MediaEvent, MediaPrimitive, PlayTicket, PlaybackConfig, PlaybackController,
    PreferenceStore, Queue,
};

/// Media primitive that records every command it receives
#[derive(Debug, Default)]
pub struct RecordingMedia {
    pub sources: Vec<String>,
    pub loads: usize,
    pub tickets: Vec<PlayTicket>,
    pub pauses: usize,
    pub seeks: Vec<f64>,
    pub gains: Vec<f64>,
    position: f64,
}

impl RecordingMedia {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_ticket(&self) -> PlayTicket {
        *self.tickets.last().expect("no play attempt issued")
    }

    pub fn last_source(&self) -> &str {
        self.sources.last().map(String::as_str).unwrap_or_default()
    }

    pub fn last_gain(&self) -> f64 {
        self.gains.last().copied().unwrap_or_default()
    }
}

impl MediaPrimitive for RecordingMedia {
    fn set_source(&mut self, url: &str) {
        self.sources.push(url.to_string());
        self.position = 0.0;
    }

    fn load(&mut self) {
        self.loads += 1;
    }

    fn play(&mut self, ticket: PlayTicket) {
        self.tickets.push(ticket);
    }

    fn pause(&mut self) {
        self.pauses += 1;
    }

    fn position(&self) -> f64 {
        self.position
    }

    fn set_position(&mut self, seconds: f64) {
        self.position = seconds;
        self.seeks.push(seconds);
    }

    fn set_volume(&mut self, gain: f64) {
        self.gains.push(gain);
    }
}

pub fn song(id: i64) -> Song {
    Song::new(
        SongId::new(id),
        format!("Track {}", id),
        "Test Artist",
        200,
        format!("/images/cover{}.jpg", id),
    )
}

pub fn queue_of(len: i64) -> Queue {
    Queue::new((1..=len).map(song).collect()).expect("unique ids")
}

pub fn controller_with(len: i64) -> PlaybackController<RecordingMedia> {
    PlaybackController::new(
        RecordingMedia::new(),
        queue_of(len),
        PreferenceStore::in_memory(),
        PlaybackConfig::default(),
    )
}

/// Settle the most recent play attempt
pub fn settle_last(
    controller: &mut PlaybackController<RecordingMedia>,
    outcome: Result<(), MediaError>,
) {
    let ticket = controller.media().last_ticket();
    controller.handle_media_event(MediaEvent::PlaySettled { ticket, outcome });
}

/// Start playback and confirm it
pub fn start_playing(controller: &mut PlaybackController<RecordingMedia>) {
    controller.toggle_play_pause();
    settle_last(controller, Ok(()));
    assert!(controller.is_playing());
}

pub fn not_allowed() -> MediaError {
    MediaError::NotAllowed("play() request was refused".to_string())
}
