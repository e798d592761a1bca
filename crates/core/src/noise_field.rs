//! Coherent 3D noise used as the simulation's direction field.
//!
//! A [`NoiseField`] maps `(x, y, z)` to a value in [-1, 1]. The simulation
//! queries it at scaled particle coordinates with time on the third axis,
//! then turns the value into a heading.
//!
//! Implementations must be deterministic (same inputs and seed give the
//! same output) and continuous in their arguments.

use noise::{NoiseFn, OpenSimplex};

/// A deterministic scalar noise function over three dimensions.
pub trait NoiseField {
    /// Samples the field. The result lies in [-1, 1].
    fn sample3(&self, x: f64, y: f64, z: f64) -> f64;
}

/// OpenSimplex noise with a reseedable permutation table.
#[derive(Debug, Clone)]
pub struct SimplexNoise {
    noise: OpenSimplex,
    seed: u32,
}

impl SimplexNoise {
    /// Creates a noise field whose permutation state is derived from `seed`.
    pub fn new(seed: u32) -> Self {
        Self {
            noise: OpenSimplex::new(seed),
            seed,
        }
    }

    /// Rebuilds the permutation state from `seed`.
    pub fn reseed(&mut self, seed: u32) {
        *self = Self::new(seed);
    }

    /// The seed the current permutation state was built from.
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl NoiseField for SimplexNoise {
    fn sample3(&self, x: f64, y: f64, z: f64) -> f64 {
        // OpenSimplex can overshoot the unit range by a hair near lattice
        // extrema.
        self.noise.get([x, y, z]).clamp(-1.0, 1.0)
    }
}

/// A flat field returning the same value everywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantNoise(pub f64);

impl NoiseField for ConstantNoise {
    fn sample3(&self, _x: f64, _y: f64, _z: f64) -> f64 {
        self.0.clamp(-1.0, 1.0)
    }
}

impl<N: NoiseField + ?Sized> NoiseField for &N {
    fn sample3(&self, x: f64, y: f64, z: f64) -> f64 {
        (**self).sample3(x, y, z)
    }
}

impl<N: NoiseField + ?Sized> NoiseField for Box<N> {
    fn sample3(&self, x: f64, y: f64, z: f64) -> f64 {
        (**self).sample3(x, y, z)
    }
}
