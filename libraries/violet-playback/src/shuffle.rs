//! Shuffle index selection
//!
//! Shuffle here does not reorder the queue. Each advance picks a uniformly
//! random index, and the current index is allowed to come up again.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of random queue indices
#[derive(Debug, Clone)]
pub struct ShufflePicker {
    rng: StdRng,
}

impl ShufflePicker {
    /// Picker seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic picker
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform index in `[0, len)`, `None` for an empty range
    pub fn pick(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(self.rng.gen_range(0..len))
        }
    }
}

impl Default for ShufflePicker {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn empty_range_yields_nothing() {
        let mut picker = ShufflePicker::seeded(1);
        assert_eq!(picker.pick(0), None);
    }

    #[test]
    fn picks_stay_in_range_and_cover_it() {
        let mut picker = ShufflePicker::seeded(42);
        let mut seen = HashSet::new();

        for _ in 0..500 {
            let index = picker.pick(4).unwrap();
            assert!(index < 4);
            seen.insert(index);
        }

        // 500 uniform draws over 4 slots hit every slot
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = ShufflePicker::seeded(7);
        let mut b = ShufflePicker::seeded(7);
        let xs: Vec<_> = (0..20).map(|_| a.pick(10)).collect();
        let ys: Vec<_> = (0..20).map(|_| b.pick(10)).collect();
        assert_eq!(xs, ys);
    }
}
