//! PNG snapshots of a [`RasterCanvas`].
//!
//! Feature-gated behind `png` (default on) so hosts that only need the
//! in-memory canvas do not pull in the `image` crate.

use std::path::Path;

use flowfield_core::error::EngineError;

use crate::pixel::RasterCanvas;

/// Writes the canvas as an RGBA PNG.
///
/// Returns `EngineError::InvalidDimensions` if the canvas extent overflows
/// `u32`, or `EngineError::Io` on encode or write failure.
pub fn write_png(canvas: &RasterCanvas, path: &Path) -> Result<(), EngineError> {
    let invalid = || EngineError::InvalidDimensions {
        width: canvas.width() as f64,
        height: canvas.height() as f64,
    };
    let w = u32::try_from(canvas.width()).map_err(|_| invalid())?;
    let h = u32::try_from(canvas.height()).map_err(|_| invalid())?;
    let img = image::RgbaImage::from_raw(w, h, canvas.to_rgba8())
        .ok_or_else(|| EngineError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| EngineError::Io(e.to_string()))
}
