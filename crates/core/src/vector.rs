//! Two-dimensional vectors.
//!
//! [`Vector2`] is `glam::DVec2`, which already provides component-wise
//! arithmetic, `lerp`, and `distance`. [`VectorExt`] adds the handful of
//! operations the simulation needs on top: heading between two points,
//! in-place blending, and construction from an angle with per-axis scale.

pub use glam::DVec2 as Vector2;

/// Extra operations on [`Vector2`] used by the force blend.
pub trait VectorExt {
    /// Euclidean distance to `other`.
    fn distance_to(self, other: Vector2) -> f64;

    /// Angle of the vector pointing from `self` to `other`, in radians.
    ///
    /// `atan2(other.y - self.y, other.x - self.x)`. Coincident points give 0.
    fn heading_to(self, other: Vector2) -> f64;

    /// Moves `self` a fraction `t` of the way toward `target`, in place.
    fn lerp_toward(&mut self, target: Vector2, t: f64);

    /// `(cos(angle) * scale.x, sin(angle) * scale.y)`.
    fn from_polar(angle: f64, scale: Vector2) -> Vector2;
}

impl VectorExt for Vector2 {
    fn distance_to(self, other: Vector2) -> f64 {
        self.distance(other)
    }

    fn heading_to(self, other: Vector2) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    fn lerp_toward(&mut self, target: Vector2, t: f64) {
        *self = self.lerp(target, t);
    }

    fn from_polar(angle: f64, scale: Vector2) -> Vector2 {
        Vector2::new(angle.cos() * scale.x, angle.sin() * scale.y)
    }
}
