//! Color types for draw commands.
//!
//! [`Rgba`] is the straight-alpha color every renderer consumes. [`Hsla`]
//! is how the simulation picks colors (hue driven by the noise value) and
//! converts to `Rgba` on demand. Both format as CSS color strings, and
//! `Rgba` parses the CSS forms used in configuration (`#rrggbb`, `rgb()`,
//! `rgba()`, `hsl()`, `hsla()`).

use crate::error::EngineError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Straight-alpha RGBA color with all components in [0, 1].
///
/// Serializes as a CSS `rgba(r,g,b,a)` string with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

/// HSL color with alpha. Hue in degrees, saturation/lightness/alpha in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsla {
    pub h: f64,
    pub s: f64,
    pub l: f64,
    pub a: f64,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Builds a color from 8-bit channels and a unit alpha.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self::new(
            r as f64 / 255.0,
            g as f64 / 255.0,
            b as f64 / 255.0,
            a.clamp(0.0, 1.0),
        )
    }

    /// Parses a CSS color string.
    ///
    /// Accepts `#rrggbb`, `rgb(r, g, b)`, `rgba(r, g, b, a)`, `hsl(h, s%, l%)`
    /// and `hsla(h, s%, l%, a)`. Whitespace and case are ignored. Channel
    /// values outside their range are clamped.
    pub fn parse_css(input: &str) -> Result<Rgba, EngineError> {
        let compact: String = input
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();

        if let Some(hex) = compact.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| invalid(input));
        }

        let (name, args) = compact
            .strip_suffix(')')
            .and_then(|s| s.split_once('('))
            .ok_or_else(|| invalid(input))?;
        let parts: Vec<&str> = args.split(',').collect();

        match (name, parts.as_slice()) {
            ("rgb", [r, g, b]) => Ok(Rgba::new(
                channel(r, input)?,
                channel(g, input)?,
                channel(b, input)?,
                1.0,
            )),
            ("rgba", [r, g, b, a]) => Ok(Rgba::new(
                channel(r, input)?,
                channel(g, input)?,
                channel(b, input)?,
                unit(a, input)?,
            )),
            ("hsl", [h, s, l]) => Ok(Hsla::new(
                number(h, input)?,
                percent(s, input)?,
                percent(l, input)?,
                1.0,
            )
            .to_rgba()),
            ("hsla", [h, s, l, a]) => Ok(Hsla::new(
                number(h, input)?,
                percent(s, input)?,
                percent(l, input)?,
                unit(a, input)?,
            )
            .to_rgba()),
            _ => Err(invalid(input)),
        }
    }

    /// Formats as `rgba(r,g,b,a)` with channels quantized to 0..=255.
    pub fn to_css(self) -> String {
        let [r, g, b] = [self.r, self.g, self.b].map(to_u8);
        let a = (self.a.clamp(0.0, 1.0) * 1000.0).round() / 1000.0;
        format!("rgba({r},{g},{b},{a})")
    }

    /// Quantized 8-bit channels including alpha.
    pub fn to_rgba8(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a].map(to_u8)
    }
}

impl Hsla {
    pub const fn new(h: f64, s: f64, l: f64, a: f64) -> Self {
        Self { h, s, l, a }
    }

    /// Converts to RGBA using the standard HSL to RGB mapping.
    ///
    /// Hue wraps modulo 360; saturation, lightness and alpha are clamped.
    /// A NaN hue yields a gray of the given lightness.
    pub fn to_rgba(self) -> Rgba {
        let s = self.s.clamp(0.0, 1.0);
        let l = self.l.clamp(0.0, 1.0);
        let a = self.a.clamp(0.0, 1.0);
        let h = if self.h.is_finite() {
            self.h.rem_euclid(360.0)
        } else {
            0.0
        };
        let s = if self.h.is_finite() { s } else { 0.0 };

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let h_prime = h / 60.0;
        let x = c * (1.0 - (h_prime.rem_euclid(2.0) - 1.0).abs());
        let (r1, g1, b1) = match h_prime as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        Rgba::new(r1 + m, g1 + m, b1 + m, a)
    }

    /// Formats as `hsla(h,s%,l%,a)`.
    pub fn to_css(self) -> String {
        format!(
            "hsla({},{}%,{}%,{})",
            self.h,
            self.s * 100.0,
            self.l * 100.0,
            self.a
        )
    }
}

impl From<Hsla> for Rgba {
    fn from(c: Hsla) -> Self {
        c.to_rgba()
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_css())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgba::parse_css(&s).map_err(serde::de::Error::custom)
    }
}

fn invalid(input: &str) -> EngineError {
    EngineError::InvalidColor(input.to_string())
}

fn to_u8(c: f64) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Rgba::from_rgba8(r, g, b, 1.0))
}

fn number(s: &str, input: &str) -> Result<f64, EngineError> {
    s.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| invalid(input))
}

/// An 8-bit channel value (`0..=255`) mapped to [0, 1].
fn channel(s: &str, input: &str) -> Result<f64, EngineError> {
    Ok((number(s, input)? / 255.0).clamp(0.0, 1.0))
}

/// A unit value such as alpha, optionally written as a percentage.
fn unit(s: &str, input: &str) -> Result<f64, EngineError> {
    match s.strip_suffix('%') {
        Some(p) => Ok((number(p, input)? / 100.0).clamp(0.0, 1.0)),
        None => Ok(number(s, input)?.clamp(0.0, 1.0)),
    }
}

fn percent(s: &str, input: &str) -> Result<f64, EngineError> {
    let p = s.strip_suffix('%').ok_or_else(|| invalid(input))?;
    Ok((number(p, input)? / 100.0).clamp(0.0, 1.0))
}
