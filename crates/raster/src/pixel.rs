//! Software rasterizer for [`Frame`](flowfield_core::draw::Frame)s.
//!
//! This module is always available (no feature gate). It accumulates frames
//! into a premultiplied floating-point RGBA buffer and converts that buffer
//! to RGBA8 on demand, so the `png` snapshot path only has to encode bytes.
//!
//! Shapes are antialiased by coverage: a pixel's coverage is how far its
//! center lies inside the shape's edge, clamped to one pixel of ramp.

use std::ops::Range;

use flowfield_core::color::Rgba;
use flowfield_core::draw::{BlendMode, Bounds, Glow, Renderer};
use flowfield_core::error::EngineError;
use flowfield_core::vector::Vector2;

/// A CPU canvas that frames can be replayed on.
///
/// Pixels are stored premultiplied, row-major, starting transparent.
#[derive(Debug, Clone)]
pub struct RasterCanvas {
    bounds: Bounds,
    width: usize,
    height: usize,
    pixels: Vec<[f64; 4]>,
}

impl RasterCanvas {
    /// Creates a transparent canvas.
    ///
    /// Returns `EngineError::InvalidDimensions` if either side is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, EngineError> {
        let bounds = Bounds::new(f64::from(width), f64::from(height))?;
        let (width, height) = (width as usize, height as usize);
        Ok(Self {
            bounds,
            width,
            height,
            pixels: vec![[0.0; 4]; width * height],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Straight-alpha color of the pixel at `(x, y)`, or `None` off-canvas.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(unpremultiply(self.pixels[y * self.width + x]))
    }

    /// Converts the buffer to straight-alpha RGBA8, four bytes per pixel.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|&p| unpremultiply(p).to_rgba8())
            .collect()
    }

    /// Half-open pixel ranges covering the box `[min, max]`, clipped to the
    /// canvas. `None` if the box misses the canvas entirely.
    fn span(&self, min: Vector2, max: Vector2) -> Option<(Range<usize>, Range<usize>)> {
        let clip = |lo: f64, hi: f64, len: usize| {
            let start = lo.floor().max(0.0);
            let end = (hi.ceil() + 1.0).min(len as f64);
            (start < end).then(|| start as usize..end as usize)
        };
        Some((clip(min.x, max.x, self.width)?, clip(min.y, max.y, self.height)?))
    }

    /// Composites `color` at `coverage` onto pixel `(x, y)`.
    fn blend(&mut self, x: usize, y: usize, color: Rgba, coverage: f64, mode: BlendMode) {
        let alpha = (color.a * coverage).clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let src = [
            color.r.clamp(0.0, 1.0) * alpha,
            color.g.clamp(0.0, 1.0) * alpha,
            color.b.clamp(0.0, 1.0) * alpha,
            alpha,
        ];
        let dst = &mut self.pixels[y * self.width + x];
        match mode {
            BlendMode::Normal => {
                for (d, s) in dst.iter_mut().zip(src) {
                    *d = s + *d * (1.0 - alpha);
                }
            }
            BlendMode::Additive => {
                for (d, s) in dst.iter_mut().zip(src) {
                    *d = (*d + s).min(1.0);
                }
            }
        }
    }

    /// Soft halo from the circle's edge out to `radius + blur`, fading
    /// quadratically.
    fn draw_glow(&mut self, center: Vector2, radius: f64, glow: Glow) {
        if !(glow.blur.is_finite() && glow.blur > 0.0) {
            return;
        }
        let reach = radius + glow.blur;
        let Some((xs, ys)) = self.span(center - Vector2::splat(reach), center + Vector2::splat(reach))
        else {
            return;
        };
        for y in ys {
            for x in xs.clone() {
                let d = pixel_center(x, y).distance(center);
                if d >= reach {
                    continue;
                }
                let t = ((d - radius) / glow.blur).clamp(0.0, 1.0);
                self.blend(x, y, glow.color, (1.0 - t).powi(2), BlendMode::Normal);
            }
        }
    }
}

fn pixel_center(x: usize, y: usize) -> Vector2 {
    Vector2::new(x as f64 + 0.5, y as f64 + 0.5)
}

fn unpremultiply([r, g, b, a]: [f64; 4]) -> Rgba {
    if a <= 0.0 {
        Rgba::TRANSPARENT
    } else {
        Rgba::new(r / a, g / a, b / a, a)
    }
}

/// Distance from `p` to the segment `a..b`.
fn segment_distance(p: Vector2, a: Vector2, b: Vector2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Coverage of a pixel whose center lies `inside` pixels inside an edge.
fn coverage(inside: f64) -> f64 {
    (inside + 0.5).clamp(0.0, 1.0)
}

impl Renderer for RasterCanvas {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn clear(&mut self, fill: Rgba) {
        for y in 0..self.height {
            for x in 0..self.width {
                self.blend(x, y, fill, 1.0, BlendMode::Normal);
            }
        }
    }

    fn draw_line(&mut self, from: Vector2, to: Vector2, color: Rgba, width: f64, blend: BlendMode) {
        if !(from.is_finite() && to.is_finite() && width.is_finite() && width > 0.0) {
            return;
        }
        let half = width * 0.5;
        let pad = Vector2::splat(half);
        let Some((xs, ys)) = self.span(from.min(to) - pad, from.max(to) + pad) else {
            return;
        };
        for y in ys {
            for x in xs.clone() {
                let d = segment_distance(pixel_center(x, y), from, to);
                let c = coverage(half - d);
                if c > 0.0 {
                    self.blend(x, y, color, c, blend);
                }
            }
        }
    }

    fn draw_arc(
        &mut self,
        center: Vector2,
        radius: f64,
        fill: Rgba,
        stroke: Option<(Rgba, f64)>,
        glow: Option<Glow>,
    ) {
        if !(center.is_finite() && radius.is_finite() && radius >= 0.0) {
            return;
        }
        if let Some(glow) = glow {
            self.draw_glow(center, radius, glow);
        }

        let stroke_half = stroke.map_or(0.0, |(_, w)| w.max(0.0) * 0.5);
        let reach = Vector2::splat(radius + stroke_half);
        let Some((xs, ys)) = self.span(center - reach, center + reach) else {
            return;
        };
        for y in ys {
            for x in xs.clone() {
                let d = pixel_center(x, y).distance(center);
                let c = coverage(radius - d);
                if c > 0.0 {
                    self.blend(x, y, fill, c, BlendMode::Normal);
                }
                if let Some((color, _)) = stroke {
                    let c = coverage(stroke_half - (d - radius).abs());
                    if c > 0.0 {
                        self.blend(x, y, color, c, BlendMode::Normal);
                    }
                }
            }
        }
    }
}
