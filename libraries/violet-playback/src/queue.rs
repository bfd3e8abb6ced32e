//! Song queue
//!
//! An ordered, wholesale-replaceable list of songs. The queue holds no
//! position of its own; the controller owns the current index and asks the
//! queue for wrap-around neighbours.

use crate::error::{PlaybackError, Result};
use violet_core::{ensure_unique_ids, Song};

/// Ordered songs available for playback
///
/// Invariant: ids are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Queue {
    songs: Vec<Song>,
}

impl Queue {
    /// Build a queue, rejecting duplicate ids
    pub fn new(songs: Vec<Song>) -> Result<Self> {
        ensure_unique_ids(&songs)?;
        Ok(Self { songs })
    }

    /// Empty queue
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of songs
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Whether the queue has no songs
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Song at `index`
    pub fn get(&self, index: usize) -> Result<&Song> {
        self.songs
            .get(index)
            .ok_or(PlaybackError::IndexOutOfBounds(index))
    }

    /// Index after `index`, wrapping to the start
    pub fn index_after(&self, index: usize) -> Result<usize> {
        if self.is_empty() {
            return Err(PlaybackError::QueueEmpty);
        }
        Ok((index + 1) % self.len())
    }

    /// Index before `index`, wrapping to the end
    pub fn index_before(&self, index: usize) -> Result<usize> {
        if self.is_empty() {
            return Err(PlaybackError::QueueEmpty);
        }
        let len = self.len();
        Ok((index % len + len - 1) % len)
    }

    /// All songs in order
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    /// Iterate songs in order
    pub fn iter(&self) -> std::slice::Iter<'_, Song> {
        self.songs.iter()
    }
}

impl<'a> IntoIterator for &'a Queue {
    type Item = &'a Song;
    type IntoIter = std::slice::Iter<'a, Song>;

    fn into_iter(self) -> Self::IntoIter {
        self.songs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use violet_core::SongId;

    fn song(id: i64) -> Song {
        Song::new(SongId::new(id), format!("Song {}", id), "Artist", 180, "")
    }

    #[test]
    fn rejects_duplicate_ids() {
        let result = Queue::new(vec![song(1), song(2), song(1)]);
        assert!(matches!(result, Err(PlaybackError::DuplicateSongId(id)) if id == SongId::new(1)));
    }

    #[test]
    fn wraps_forward_and_backward() {
        let queue = Queue::new(vec![song(1), song(2), song(3)]).unwrap();

        assert_eq!(queue.index_after(0).unwrap(), 1);
        assert_eq!(queue.index_after(2).unwrap(), 0);
        assert_eq!(queue.index_before(0).unwrap(), 2);
        assert_eq!(queue.index_before(1).unwrap(), 0);
    }

    #[test]
    fn single_song_wraps_to_itself() {
        let queue = Queue::new(vec![song(1)]).unwrap();
        assert_eq!(queue.index_after(0).unwrap(), 0);
        assert_eq!(queue.index_before(0).unwrap(), 0);
    }

    #[test]
    fn empty_queue_has_no_neighbours() {
        let queue = Queue::empty();
        assert!(matches!(queue.index_after(0), Err(PlaybackError::QueueEmpty)));
        assert!(matches!(queue.index_before(0), Err(PlaybackError::QueueEmpty)));
    }

    #[test]
    fn out_of_bounds_lookup() {
        let queue = Queue::new(vec![song(1)]).unwrap();
        assert!(queue.get(0).is_ok());
        assert!(matches!(queue.get(1), Err(PlaybackError::IndexOutOfBounds(1))));
    }
}
