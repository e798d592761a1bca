#![deny(unsafe_code)]
//! CPU rendering for flowfield frames.
//!
//! [`RasterCanvas`] implements the core `Renderer` contract on an in-memory
//! RGBA buffer, so a headless run can accumulate trails exactly as a live
//! canvas would. With the `png` feature, [`snapshot::write_png`] encodes the
//! buffer to disk.

pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

pub use pixel::RasterCanvas;

#[cfg(feature = "png")]
pub use snapshot::write_png;
