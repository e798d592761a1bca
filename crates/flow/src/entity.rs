//! Particle and attractor records.

use flowfield_core::vector::Vector2;

/// Per-tick growth of an attractor's drawn radius.
pub const ATTRACTOR_SIZE_STEP: f64 = 0.15;
/// Per-tick growth of an attractor's influence radius.
pub const ATTRACTOR_THRESHOLD_STEP: f64 = 0.9;

/// A point carried by the flow field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vector2,
    pub velocity: Vector2,
    /// Position at the start of the current step; the trail segment's tail.
    pub last_position: Vector2,
}

impl Particle {
    /// A particle at rest at `position`.
    pub fn at(position: Vector2) -> Self {
        Self {
            position,
            velocity: Vector2::ZERO,
            last_position: position,
        }
    }
}

/// A transient point that pulls nearby particles in and consumes them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attractor {
    pub position: Vector2,
    /// Drawn radius; also the hit radius for removal toggles.
    pub size: f64,
    /// Influence radius.
    pub threshold: f64,
}

impl Attractor {
    /// A new attractor at `position` with zero size and influence.
    pub fn at(position: Vector2) -> Self {
        Self {
            position,
            size: 0.0,
            threshold: 0.0,
        }
    }

    /// Grows size and threshold by one tick's increment, saturating at the maxima.
    pub fn grow(&mut self, max_size: f64, max_threshold: f64) {
        if self.size < max_size {
            self.size = (self.size + ATTRACTOR_SIZE_STEP).min(max_size);
        }
        if self.threshold < max_threshold {
            self.threshold = (self.threshold + ATTRACTOR_THRESHOLD_STEP).min(max_threshold);
        }
    }

    /// Whether both radii have reached the given maxima.
    pub fn is_saturated(&self, max_size: f64, max_threshold: f64) -> bool {
        self.size >= max_size && self.threshold >= max_threshold
    }
}
