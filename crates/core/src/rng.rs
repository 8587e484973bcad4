//! RNG module - injected random sources
//!
//! The engine never reaches for a global RNG. Every random draw (piece kinds,
//! item rarity, item choice) goes through a [`RandomSource`] owned by the
//! engine, so callers decide between a seeded, an entropy-backed, or a fully
//! scripted source.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// A source of uniform integers.
pub trait RandomSource {
    /// Uniform value in `[0, bound)`. Returns 0 when `bound` is 0.
    fn next_below(&mut self, bound: u32) -> u32;
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_below(&mut self, bound: u32) -> u32 {
        (**self).next_below(bound)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_below(&mut self, bound: u32) -> u32 {
        (**self).next_below(bound)
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Current internal state (reseeding with it continues the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl RandomSource for SimpleRng {
    fn next_below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        // Multiply-shift keeps the well-mixed high bits; the low bits of an
        // LCG have short periods.
        ((self.next_u32() as u64 * bound as u64) >> 32) as u32
    }
}

/// Adapter for any `rand` generator.
#[derive(Debug, Clone)]
pub struct RandSource<R>(pub R);

impl RandSource<StdRng> {
    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: RngCore> RandomSource for RandSource<R> {
    fn next_below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.0.gen_range(0..bound)
    }
}

/// Replays a fixed script of values, cycling when exhausted.
///
/// Each draw returns `script[i] % bound`. Useful for asserting exact outcomes:
/// a script of `[1]` makes every piece draw an `O`.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<u32>,
    pos: usize,
}

impl SequenceSource {
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        Self {
            values: values.into(),
            pos: 0,
        }
    }

    /// Number of values consumed so far
    pub fn consumed(&self) -> usize {
        self.pos
    }
}

impl RandomSource for SequenceSource {
    fn next_below(&mut self, bound: u32) -> u32 {
        if bound == 0 || self.values.is_empty() {
            return 0;
        }
        let v = self.values[self.pos % self.values.len()];
        self.pos += 1;
        v % bound
    }
}
