//! Injectable randomness for shuffling and backfill.
//!
//! Every randomized operation of the crate takes a [`RandomSource`] so the
//! caller decides where the entropy comes from. [`ThreadRandom`] is the
//! production source; any `FnMut(usize) -> usize` closure also works, which
//! is what the tests use to make picks deterministic.

use rand::Rng;

/// Picks indices for shuffling.
pub trait RandomSource {
    /// Returns an index in `0..upper`. Callers never pass `upper == 0`.
    fn next_index(&mut self, upper: usize) -> usize;
}

/// Uniform picks from `rand::thread_rng()`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_index(&mut self, upper: usize) -> usize {
        rand::thread_rng().gen_range(0..upper)
    }
}

impl<F> RandomSource for F
where
    F: FnMut(usize) -> usize,
{
    fn next_index(&mut self, upper: usize) -> usize {
        // Clamp so a sloppy closure cannot index out of bounds
        self(upper) % upper
    }
}

/// Fisher-Yates shuffle driven by `rng`.
pub fn shuffle<T, R: RandomSource + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.next_index(i + 1);
        items.swap(i, j);
    }
}
