//! Song domain type
use crate::error::{CoreError, Result};
use crate::types::SongId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

/// A song record as exchanged with the catalog service
///
/// Immutable once loaded. URLs may be absolute or server-relative;
/// see [`crate::url::resolve_urls`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    /// Unique song identifier
    pub id: SongId,

    /// Song title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Declared duration in whole seconds
    ///
    /// Used until the media engine reports the real duration.
    #[serde(rename = "duration")]
    pub duration_seconds: u32,

    /// Cover art location
    pub album_art: String,

    /// Audio stream location
    ///
    /// `None` means the default `/audio/track{id}.mp3` location applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_url: Option<String>,
}

impl Song {
    /// Create a song without an explicit stream URL
    pub fn new(
        id: SongId,
        title: impl Into<String>,
        artist: impl Into<String>,
        duration_seconds: u32,
        album_art: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            artist: artist.into(),
            duration_seconds,
            album_art: album_art.into(),
            stream_url: None,
        }
    }

    /// Set the stream URL
    pub fn with_stream_url(mut self, stream_url: impl Into<String>) -> Self {
        self.stream_url = Some(stream_url.into());
        self
    }

    /// Declared duration as a `Duration`
    pub fn declared_duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.duration_seconds))
    }
}

/// Payload for creating a song
///
/// Same shape as [`Song`]; any client-supplied id is accepted on the wire
/// but ignored, because the service assigns ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSong {
    /// Ignored by the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SongId>,

    pub title: String,

    pub artist: String,

    #[serde(rename = "duration")]
    pub duration_seconds: u32,

    pub album_art: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_url: Option<String>,
}

impl NewSong {
    /// Turn the payload into a stored record under the assigned id
    pub fn into_song(self, id: SongId) -> Song {
        Song {
            id,
            title: self.title,
            artist: self.artist,
            duration_seconds: self.duration_seconds,
            album_art: self.album_art,
            stream_url: self.stream_url,
        }
    }
}

/// Check that no two songs share an id
pub fn ensure_unique_ids(songs: &[Song]) -> Result<()> {
    let mut seen = HashSet::with_capacity(songs.len());
    for song in songs {
        if !seen.insert(song.id) {
            return Err(CoreError::DuplicateSongId(song.id));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_service_shape() {
        let json = r#"{
            "id": 3,
            "title": "Purple Haze",
            "artist": "Violet Sky",
            "duration": 205,
            "albumArt": "/images/AVO.jpg",
            "streamUrl": "/audio/track3.mp3"
        }"#;

        let song: Song = serde_json::from_str(json).unwrap();
        assert_eq!(song.id, SongId::new(3));
        assert_eq!(song.duration_seconds, 205);
        assert_eq!(song.album_art, "/images/AVO.jpg");
        assert_eq!(song.stream_url.as_deref(), Some("/audio/track3.mp3"));
    }

    #[test]
    fn stream_url_is_optional() {
        let json = r#"{"id":1,"title":"t","artist":"a","duration":10,"albumArt":"x.jpg"}"#;
        let song: Song = serde_json::from_str(json).unwrap();
        assert!(song.stream_url.is_none());

        // And it is omitted again on the way out
        let back = serde_json::to_value(&song).unwrap();
        assert!(back.get("streamUrl").is_none());
        assert_eq!(back["duration"], 10);
    }

    #[test]
    fn new_song_ignores_supplied_id() {
        let json = r#"{"id":99,"title":"t","artist":"a","duration":10,"albumArt":"x.jpg"}"#;
        let payload: NewSong = serde_json::from_str(json).unwrap();
        assert_eq!(payload.id, Some(SongId::new(99)));

        let song = payload.into_song(SongId::new(5));
        assert_eq!(song.id, SongId::new(5));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let songs = vec![
            Song::new(SongId::new(1), "a", "a", 1, ""),
            Song::new(SongId::new(2), "b", "b", 1, ""),
            Song::new(SongId::new(1), "c", "c", 1, ""),
        ];

        match ensure_unique_ids(&songs) {
            Err(CoreError::DuplicateSongId(id)) => assert_eq!(id, SongId::new(1)),
            other => panic!("expected duplicate id error, got {:?}", other),
        }
        assert!(ensure_unique_ids(&songs[..2]).is_ok());
    }
}
