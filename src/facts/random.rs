//! Randomness sources for fact selection.

use rand::Rng;

/// Draws an index uniformly from `[0, len)`.
///
/// Callers never pass `len == 0`.
pub trait RandomSource: Send + Sync + std::fmt::Debug {
    fn index(&self, len: usize) -> usize;
}

/// Thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn index(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Always returns the same index. Used to make fact selection deterministic.
#[derive(Debug, Clone, Copy)]
pub struct FixedIndex(pub usize);

impl RandomSource for FixedIndex {
    fn index(&self, _len: usize) -> usize {
        self.0
    }
}
