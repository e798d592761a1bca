//! Error types for the flowfield core.
//!
//! The simulation step itself never fails. These errors cover the few
//! constructors that validate input and the I/O done by hosts.

use thiserror::Error;

/// Errors produced by flowfield operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Width or height was zero, negative, or not finite.
    #[error("invalid dimensions: width and height must be finite and positive, got {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },

    /// A CSS color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// An I/O failure while writing host output (e.g. a PNG snapshot).
    #[error("i/o error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_includes_both_extents() {
        let err = EngineError::InvalidDimensions {
            width: 0.0,
            height: 480.0,
        };
        let msg = format!("{err}");
        assert!(
            msg.contains("0x480"),
            "expected message containing the extents, got: {msg}"
        );
    }

    #[test]
    fn invalid_color_includes_message() {
        let err = EngineError::InvalidColor("rgba(1,2)".into());
        let msg = format!("{err}");
        assert!(msg.contains("rgba(1,2)"), "missing input in: {msg}");
    }

    #[test]
    fn io_includes_message() {
        let err = EngineError::Io("disk full".into());
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn engine_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EngineError>();
    }

    #[test]
    fn engine_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<EngineError>();
    }
}
