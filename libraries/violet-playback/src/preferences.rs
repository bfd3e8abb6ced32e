//! Preference persistence
//!
//! Durable key/value storage scoped to the local device. The player keeps a
//! single setting in it (volume), read once at construction and written on
//! every change.
//!
//! [`FilePreferences`] writes synchronously. Wrap it in
//! [`BackgroundPreferences`] to keep disk IO off the thread that drives the
//! controller.
//!
//! # Example
//!
//! ```rust
//! use violet_playback::{MemoryPreferences, PreferenceStore};
//!
//! let backend = MemoryPreferences::new();
//! let mut store = PreferenceStore::new(Box::new(backend.clone()));
//! assert_eq!(store.read_volume(), 75);
//!
//! store.write_volume(42).unwrap();
//!
//! // A new store over the same backend sees the value
//! let store = PreferenceStore::new(Box::new(backend));
//! assert_eq!(store.read_volume(), 42);
//! ```

use crate::error::{PlaybackError, Result};
use crate::types::DEFAULT_VOLUME;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::mem;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

/// Key under which the volume is stored
pub const VOLUME_KEY: &str = "player.volume";

/// File name used by [`FilePreferences::in_dir`]
pub const PREFERENCES_FILE: &str = "preferences.json";

/// Key/value string storage
///
/// Called from the controller on every volume change, so `set` should be
/// cheap. Slow backends belong behind [`BackgroundPreferences`].
pub trait PreferenceBackend: Send {
    /// Read a value
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory backend
///
/// Clones share the same map, so a test can keep a handle and inspect what
/// a controller wrote, or start a "new session" over the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-populated with one entry
    pub fn with_entry(key: &str, value: &str) -> Self {
        let prefs = Self::new();
        if let Ok(mut values) = prefs.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
        prefs
    }
}

impl PreferenceBackend for MemoryPreferences {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|e| PlaybackError::Preferences(e.to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| PlaybackError::Preferences(e.to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON file backend
///
/// Stores all keys in one flat JSON object. Writes go to a sibling temp file
/// first and are renamed into place.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
}

impl FilePreferences {
    /// Backend over an explicit file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backend over `dir/preferences.json`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(PREFERENCES_FILE))
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl PreferenceBackend for FilePreferences {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        // A corrupt file is replaced rather than blocking every future write
        let mut values = self.read_all().unwrap_or_else(|e| {
            warn!(path = ?self.path, error = %e, "Discarding unreadable preferences file");
            BTreeMap::new()
        });
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(&values)?)?;
        fs::rename(&tmp, &self.path)?;

        debug!(path = ?self.path, key, "Preference written");
        Ok(())
    }
}

type SharedBackend = Arc<Mutex<Box<dyn PreferenceBackend>>>;
type PendingWrites = Arc<Mutex<BTreeMap<String, String>>>;

enum WriterMessage {
    Wake,
    Flush(Sender<()>),
}

/// Backend that writes through a worker thread
///
/// `set` records the value and returns; the wrapped backend is written on
/// the worker. Repeated writes to one key collapse into the latest value.
/// Reads see values that have not reached the wrapped backend yet.
/// Dropping it waits for outstanding writes.
pub struct BackgroundPreferences {
    backend: SharedBackend,
    pending: PendingWrites,
    tx: Option<Sender<WriterMessage>>,
    worker: Option<JoinHandle<()>>,
}

impl BackgroundPreferences {
    /// Start a worker over `backend`
    pub fn new(backend: impl PreferenceBackend + 'static) -> Result<Self> {
        let backend: SharedBackend = Arc::new(Mutex::new(Box::new(backend)));
        let pending = PendingWrites::default();
        let (tx, rx) = mpsc::channel();

        let worker = {
            let backend = Arc::clone(&backend);
            let pending = Arc::clone(&pending);
            thread::Builder::new()
                .name("violet-preferences".to_string())
                .spawn(move || writer_loop(&rx, &backend, &pending))?
        };

        Ok(Self {
            backend,
            pending,
            tx: Some(tx),
            worker: Some(worker),
        })
    }

    /// Block until every write issued so far reached the wrapped backend
    pub fn flush(&self) -> Result<()> {
        let (done_tx, done_rx) = mpsc::channel();
        self.send(WriterMessage::Flush(done_tx))?;
        done_rx.recv().map_err(|_| writer_stopped())
    }

    fn send(&self, message: WriterMessage) -> Result<()> {
        self.tx
            .as_ref()
            .ok_or_else(writer_stopped)?
            .send(message)
            .map_err(|_| writer_stopped())
    }
}

impl PreferenceBackend for BackgroundPreferences {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let pending = self
            .pending
            .lock()
            .map_err(|e| PlaybackError::Preferences(e.to_string()))?;
        if let Some(value) = pending.get(key) {
            return Ok(Some(value.clone()));
        }
        drop(pending);

        // The worker holds this lock from taking a batch until it is written
        let backend = self
            .backend
            .lock()
            .map_err(|e| PlaybackError::Preferences(e.to_string()))?;
        backend.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.pending
            .lock()
            .map_err(|e| PlaybackError::Preferences(e.to_string()))?
            .insert(key.to_string(), value.to_string());
        self.send(WriterMessage::Wake)
    }
}

impl Drop for BackgroundPreferences {
    fn drop(&mut self) {
        // Closing the channel lets the worker drain and exit
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("Preference writer panicked");
            }
        }
    }
}

impl std::fmt::Debug for BackgroundPreferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundPreferences")
            .field("running", &self.tx.is_some())
            .finish_non_exhaustive()
    }
}

fn writer_loop(rx: &Receiver<WriterMessage>, backend: &SharedBackend, pending: &PendingWrites) {
    while let Ok(message) = rx.recv() {
        let mut backend = backend.lock().unwrap_or_else(PoisonError::into_inner);
        let batch = mem::take(&mut *pending.lock().unwrap_or_else(PoisonError::into_inner));

        for (key, value) in &batch {
            if let Err(e) = backend.set(key, value) {
                warn!(key = %key, error = %e, "Background preference write failed");
            }
        }
        drop(backend);

        if let WriterMessage::Flush(done) = message {
            // The flusher may have given up waiting
            let _ = done.send(());
        }
    }
    debug!("Preference writer stopped");
}

fn writer_stopped() -> PlaybackError {
    PlaybackError::Preferences("preference writer stopped".to_string())
}

/// Typed access to the player's persisted settings
pub struct PreferenceStore {
    backend: Box<dyn PreferenceBackend>,
    default_volume: u8,
}

impl PreferenceStore {
    /// Store with the standard default volume (75)
    pub fn new(backend: Box<dyn PreferenceBackend>) -> Self {
        Self::with_default_volume(backend, DEFAULT_VOLUME)
    }

    /// Store with a custom fallback volume
    pub fn with_default_volume(backend: Box<dyn PreferenceBackend>, default_volume: u8) -> Self {
        Self {
            backend,
            default_volume: default_volume.min(100),
        }
    }

    /// Store that keeps values in memory only
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryPreferences::new()))
    }

    /// Last stored volume, or the default if absent or unparseable
    pub fn read_volume(&self) -> u8 {
        match self.backend.get(VOLUME_KEY) {
            Ok(Some(raw)) => parse_volume(&raw).unwrap_or_else(|| {
                debug!(raw = %raw, "Stored volume is not a number, using default");
                self.default_volume
            }),
            Ok(None) => self.default_volume,
            Err(e) => {
                warn!(error = %e, "Failed to read stored volume, using default");
                self.default_volume
            }
        }
    }

    /// Store `volume` clamped to 0-100
    pub fn write_volume(&mut self, volume: i64) -> Result<()> {
        let level = volume.clamp(0, 100);
        self.backend.set(VOLUME_KEY, &level.to_string())
    }
}

impl std::fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceStore")
            .field("default_volume", &self.default_volume)
            .finish_non_exhaustive()
    }
}

/// Parse a stored volume string
///
/// Any finite number is accepted, rounded, and clamped.
fn parse_volume(raw: &str) -> Option<u8> {
    let value: f64 = raw.trim().parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(value.round().clamp(0.0, 100.0) as u8)
}
