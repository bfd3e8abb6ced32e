//! ID types for Violet Player entities
use serde::{Deserialize, Serialize};
use std::fmt;

/// Song identifier
///
/// Integer ids assigned by the catalog service. Stable across fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SongId(i64);

impl SongId {
    /// Create a new song ID
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw integer value
    pub const fn get(self) -> i64 {
        self.0
    }

    /// The id following this one (used for server-side assignment)
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for SongId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}
