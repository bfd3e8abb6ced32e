//! In-memory song catalog
use tokio::sync::RwLock;
use tracing::{debug, info};
use violet_core::{default_stream_path, seed_records, CoreError, NewSong, Song, SongId};

/// Owns the authoritative song list
///
/// Records are stored with server-relative URLs. Resolution against a
/// request origin happens at the response boundary.
#[derive(Debug, Default)]
pub struct CatalogService {
    songs: RwLock<Vec<Song>>,
}

impl CatalogService {
    pub fn new(songs: Vec<Song>) -> Self {
        Self {
            songs: RwLock::new(songs),
        }
    }

    /// Catalog pre-filled with the four built-in songs
    pub fn with_seed() -> Self {
        Self::new(seed_records())
    }

    /// All songs in insertion order
    pub async fn list(&self) -> Vec<Song> {
        self.songs.read().await.clone()
    }

    pub async fn get(&self, id: SongId) -> Result<Song, CoreError> {
        self.songs
            .read()
            .await
            .iter()
            .find(|song| song.id == id)
            .cloned()
            .ok_or(CoreError::SongNotFound(id))
    }

    /// Store a new song under the next free id
    ///
    /// Any id in the payload is ignored. The id is one more than the
    /// current maximum, or 1 for an empty catalog.
    pub async fn create(&self, payload: NewSong) -> Result<Song, CoreError> {
        if payload.title.trim().is_empty() {
            return Err(CoreError::invalid_input("title must not be empty"));
        }

        let mut songs = self.songs.write().await;
        let id = songs
            .iter()
            .map(|song| song.id)
            .max()
            .map_or(SongId::new(1), SongId::next);

        if payload.id.is_some_and(|requested| requested != id) {
            debug!(requested = ?payload.id, assigned = %id, "Ignoring client-supplied song id");
        }

        let mut song = payload.into_song(id);
        if song.stream_url.as_deref().map_or(true, str::is_empty) {
            song.stream_url = Some(default_stream_path(id));
        }

        songs.push(song.clone());
        info!(id = %id, title = %song.title, "Song added to catalog");

        Ok(song)
    }

    pub async fn len(&self) -> usize {
        self.songs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.songs.read().await.is_empty()
    }
}
