#![deny(unsafe_code)]
//! Core types and traits for the flowfield particle simulation.
//!
//! Provides `Vector2` and its extensions, the `NoiseField` trait with an
//! OpenSimplex implementation, `Rgba`/`Hsla` colors, draw commands and the
//! `Renderer` contract, pointer snapshots with the `InputSource` and
//! `DisplaySink` contracts, the `Xorshift64` PRNG, parameter helpers, and
//! the `Engine` trait.

pub mod color;
pub mod draw;
pub mod engine;
pub mod error;
pub mod noise_field;
pub mod params;
pub mod pointer;
pub mod prng;
pub mod vector;

pub use color::{Hsla, Rgba};
pub use draw::{BlendMode, Bounds, DrawCommand, Frame, Glow, Renderer};
pub use engine::Engine;
pub use error::EngineError;
pub use noise_field::{ConstantNoise, NoiseField, SimplexNoise};
pub use pointer::{DisplaySink, InputSource, PointerState};
pub use prng::Xorshift64;
pub use vector::{Vector2, VectorExt};
