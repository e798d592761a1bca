//! Deterministic PRNG for spawn positions and visual jitter.
//!
//! The simulation draws every random number it needs from one
//! [`Xorshift64`], so a run is fully determined by its seed, its config,
//! and the pointer script fed to it.

use serde::{Deserialize, Serialize};

use crate::draw::Bounds;
use crate::vector::Vector2;

/// Xorshift64 generator with shifts (13, 7, 17).
///
/// A zero seed is replaced by a fixed non-zero constant, since zero is a
/// fixed point of the algorithm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    /// Creates a generator from `seed`. Seed 0 maps to the fallback constant.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Advances the state and returns it.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Upper 32 bits of the next value. Used to derive noise seeds.
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Uniform in [0, 1), built from the top 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in [min, max).
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Uniform point in `[0, width) x [0, height)`. Draws x first, then y.
    pub fn next_point(&mut self, bounds: Bounds) -> Vector2 {
        let x = self.next_f64() * bounds.width();
        let y = self.next_f64() * bounds.height();
        Vector2::new(x, y)
    }
}
