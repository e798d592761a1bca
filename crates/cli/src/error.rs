//! CLI errors and their exit codes.
//!
//! - 0:  success
//! - 2:  argument parse error (reported by clap)
//! - 10: simulation setup error (bad canvas size, bad color)
//! - 11: I/O error (writing the PNG)
//! - 12: input error (malformed `--params` JSON)
//! - 13: serialization error (printing JSON output)

use flowfield_core::EngineError;
use std::fmt;

/// A failed CLI run, carrying the exit code it maps to.
pub enum CliError {
    /// The simulation or canvas rejected its setup.
    Engine(EngineError),
    /// The PNG could not be written.
    Io(String),
    /// A flag value was unusable, e.g. `--params` that is not JSON.
    Input(String),
    /// JSON output could not be produced.
    Serialization(String),
}

impl CliError {
    /// Process exit code: 10 engine, 11 I/O, 12 input, 13 serialization.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Engine(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Engine(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "cannot write output: {msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "cannot serialize output: {msg}"),
        }
    }
}

/// Snapshot failures surface as `EngineError::Io` and keep their own exit code.
impl From<EngineError> for CliError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::Io(msg) => CliError::Io(msg),
            other => CliError::Engine(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_dimensions_exit_with_engine_code() {
        let err = CliError::from(EngineError::InvalidDimensions {
            width: 0.0,
            height: 480.0,
        });
        assert_eq!(err.exit_code(), 10);
        assert!(err.to_string().contains("0x480"));
    }

    #[test]
    fn snapshot_io_failure_exits_with_io_code() {
        let err = CliError::from(EngineError::Io("permission denied".into()));
        assert_eq!(err.exit_code(), 11);
        assert!(err.to_string().contains("permission denied"));
    }

    #[test]
    fn bad_color_is_an_engine_error() {
        let err = CliError::from(EngineError::InvalidColor("#12".into()));
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn malformed_params_exit_with_input_code() {
        assert_eq!(CliError::Input("invalid --params JSON".into()).exit_code(), 12);
    }

    #[test]
    fn serde_failure_exits_with_serialization_code() {
        let bad = serde_json::from_str::<serde_json::Value>("{nope").unwrap_err();
        assert_eq!(CliError::from(bad).exit_code(), 13);
    }
}
