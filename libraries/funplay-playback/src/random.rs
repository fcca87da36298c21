//! Random sources for shuffle selection
//!
//! Shuffle picks go through [`RandomSource`] so tests can pin outcomes.

use rand::rngs::StdRng;
use rand::{thread_rng, Rng, SeedableRng};

/// Picks a uniformly random index
pub trait RandomSource: Send {
    /// Return an index in `0..len`; `len` is always at least 1
    fn pick(&mut self, len: usize) -> usize;
}

/// Thread-local RNG (default)
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&mut self, len: usize) -> usize {
        thread_rng().gen_range(0..len)
    }
}

/// Reproducible RNG seeded from a fixed value
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}
