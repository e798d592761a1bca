//! Draw commands and the renderer contract.
//!
//! The simulation never touches pixels. Each step produces a [`Frame`]: the
//! translucent fill that fades the previous frame, followed by an ordered
//! list of [`DrawCommand`]s. A [`Renderer`] replays the frame with
//! painter's-algorithm compositing.

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::EngineError;
use crate::vector::Vector2;

/// Canvas extent in pixels. The origin is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    width: f64,
    height: f64,
}

impl Bounds {
    /// Creates bounds of the given size.
    ///
    /// Returns `EngineError::InvalidDimensions` if either extent is zero,
    /// negative, or not finite.
    pub fn new(width: f64, height: f64) -> Result<Self, EngineError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(EngineError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// The canvas center, used by renderers that recenter on resize.
    pub fn center(&self) -> Vector2 {
        Vector2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Whether `p` lies inside the canvas, allowing it to hang off the
    /// top and left edges by up to `margin`.
    pub fn contains(&self, p: Vector2, margin: f64) -> bool {
        p.x <= self.width && p.x >= -margin && p.y <= self.height && p.y >= -margin
    }
}

/// How a stroke is composited onto what is already drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Source-over alpha compositing.
    #[default]
    Normal,
    /// Colors add and saturate (the canvas "lighter" operation).
    Additive,
}

/// A soft halo drawn around a filled circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Glow {
    pub color: Rgba,
    /// Blur radius in pixels beyond the circle's edge.
    pub blur: f64,
}

/// One primitive for a renderer to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    Line {
        from: Vector2,
        to: Vector2,
        color: Rgba,
        width: f64,
        blend: BlendMode,
    },
    Arc {
        center: Vector2,
        radius: f64,
        fill: Rgba,
        stroke: Option<(Rgba, f64)>,
        glow: Option<Glow>,
    },
}

/// Everything a renderer needs to present one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// The tick this frame was produced by.
    pub tick: u64,
    /// Translucent fill painted over the whole canvas before any command.
    pub clear: Rgba,
    /// Particle segments first, then attractor circles.
    pub commands: Vec<DrawCommand>,
    /// Live particle count after the step.
    pub particle_count: usize,
}

impl Frame {
    /// Replays the frame on `renderer`: one `clear`, then each command in order.
    pub fn render_to<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        renderer.clear(self.clear);
        for command in &self.commands {
            match *command {
                DrawCommand::Line {
                    from,
                    to,
                    color,
                    width,
                    blend,
                } => renderer.draw_line(from, to, color, width, blend),
                DrawCommand::Arc {
                    center,
                    radius,
                    fill,
                    stroke,
                    glow,
                } => renderer.draw_arc(center, radius, fill, stroke, glow),
            }
        }
    }

    /// Number of line commands in the frame.
    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }

    /// Number of arc commands in the frame.
    pub fn arc_count(&self) -> usize {
        self.commands.len() - self.line_count()
    }
}

/// A drawing surface the simulation's frames can be replayed on.
pub trait Renderer {
    /// Current canvas extent.
    fn bounds(&self) -> Bounds;

    /// Paints `fill` over the entire canvas (source-over).
    fn clear(&mut self, fill: Rgba);

    /// Strokes a straight segment.
    fn draw_line(&mut self, from: Vector2, to: Vector2, color: Rgba, width: f64, blend: BlendMode);

    /// Fills a circle, with an optional outline `(color, width)` and halo.
    fn draw_arc(
        &mut self,
        center: Vector2,
        radius: f64,
        fill: Rgba,
        stroke: Option<(Rgba, f64)>,
        glow: Option<Glow>,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records calls as strings so tests can check order.
    struct Recorder {
        bounds: Bounds,
        calls: Vec<String>,
    }

    impl Renderer for Recorder {
        fn bounds(&self) -> Bounds {
            self.bounds
        }

        fn clear(&mut self, fill: Rgba) {
            self.calls.push(format!("clear {}", fill.to_css()));
        }

        fn draw_line(&mut self, from: Vector2, to: Vector2, _: Rgba, width: f64, blend: BlendMode) {
            self.calls.push(format!(
                "line {},{} -> {},{} w{width} {blend:?}",
                from.x, from.y, to.x, to.y
            ));
        }

        fn draw_arc(&mut self, c: Vector2, r: f64, _: Rgba, _: Option<(Rgba, f64)>, g: Option<Glow>) {
            self.calls
                .push(format!("arc {},{} r{r} glow={}", c.x, c.y, g.is_some()));
        }
    }

    fn sample_frame() -> Frame {
        Frame {
            tick: 3,
            clear: Rgba::new(0.0, 0.0, 0.0, 0.6),
            commands: vec![
                DrawCommand::Line {
                    from: Vector2::new(0.0, 0.0),
                    to: Vector2::new(1.0, 1.0),
                    color: Rgba::WHITE,
                    width: 2.0,
                    blend: BlendMode::Additive,
                },
                DrawCommand::Arc {
                    center: Vector2::new(5.0, 5.0),
                    radius: 3.0,
                    fill: Rgba::BLACK,
                    stroke: None,
                    glow: Some(Glow {
                        color: Rgba::WHITE,
                        blur: 8.0,
                    }),
                },
            ],
            particle_count: 1,
        }
    }

    #[test]
    fn bounds_rejects_degenerate_extents() {
        assert!(Bounds::new(0.0, 10.0).is_err());
        assert!(Bounds::new(10.0, -1.0).is_err());
        assert!(Bounds::new(f64::NAN, 10.0).is_err());
        assert!(Bounds::new(f64::INFINITY, 10.0).is_err());
        assert!(Bounds::new(640.0, 480.0).is_ok());
    }

    #[test]
    fn bounds_center_is_half_extent() {
        let b = Bounds::new(640.0, 480.0).unwrap();
        assert_eq!(b.center(), Vector2::new(320.0, 240.0));
    }

    #[test]
    fn bounds_contains_allows_margin_only_on_low_side() {
        let b = Bounds::new(100.0, 50.0).unwrap();
        assert!(b.contains(Vector2::new(100.0, 50.0), 2.0));
        assert!(b.contains(Vector2::new(-2.0, -2.0), 2.0));
        assert!(!b.contains(Vector2::new(-2.1, 10.0), 2.0));
        assert!(!b.contains(Vector2::new(100.1, 10.0), 2.0));
        assert!(!b.contains(Vector2::new(10.0, 50.1), 2.0));
        assert!(!b.contains(Vector2::new(f64::NAN, 10.0), 2.0));
    }

    #[test]
    fn render_to_clears_then_replays_in_order() {
        let mut r = Recorder {
            bounds: Bounds::new(10.0, 10.0).unwrap(),
            calls: Vec::new(),
        };
        sample_frame().render_to(&mut r);
        assert_eq!(r.calls.len(), 3);
        assert_eq!(r.calls[0], "clear rgba(0,0,0,0.6)");
        assert!(r.calls[1].starts_with("line 0,0 -> 1,1 w2 Additive"));
        assert!(r.calls[2].starts_with("arc 5,5 r3 glow=true"));
    }

    #[test]
    fn render_to_accepts_trait_objects() {
        let mut r = Recorder {
            bounds: Bounds::new(10.0, 10.0).unwrap(),
            calls: Vec::new(),
        };
        let dyn_r: &mut dyn Renderer = &mut r;
        sample_frame().render_to(dyn_r);
        assert_eq!(r.calls.len(), 3);
    }

    #[test]
    fn frame_counts_commands_by_kind() {
        let frame = sample_frame();
        assert_eq!(frame.line_count(), 1);
        assert_eq!(frame.arc_count(), 1);
    }

    #[test]
    fn blend_mode_serializes_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&BlendMode::Additive).unwrap(),
            "\"additive\""
        );
        assert_eq!(BlendMode::default(), BlendMode::Normal);
    }
}
