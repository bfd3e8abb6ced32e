//! Volume model
//!
//! The player works in integer percent (0-100); the media primitive takes a
//! linear gain in `[0.0, 1.0]`.

use crate::types::DEFAULT_VOLUME;

/// Volume level in percent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Volume {
    level: u8,
}

impl Volume {
    /// Create from any integer, clamping into 0-100
    pub fn new(level: i64) -> Self {
        Self {
            level: level.clamp(0, 100) as u8,
        }
    }

    /// Set level, clamping into 0-100
    pub fn set_level(&mut self, level: i64) {
        *self = Self::new(level);
    }

    /// Current level (0-100)
    pub fn level(self) -> u8 {
        self.level
    }

    /// Linear gain for the media primitive
    pub fn gain(self) -> f64 {
        f64::from(self.level) / 100.0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(i64::from(DEFAULT_VOLUME))
    }
}
