//! Error type for engine operations that can reject their input

use thiserror::Error;

/// Errors returned by the simulator's mutating operations
///
/// Degenerate geometry and collisions are never errors; they are handled
/// inside the step (zero contribution, logged event).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("a body named `{0}` already exists")]
    DuplicateBody(String),

    #[error("body `{name}` is invalid: {reason}")]
    InvalidBody { name: String, reason: String },

    #[error("invalid value {value} for `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("a field grid of resolution {resolution} has too many points")]
    GridTooLarge { resolution: usize },
}

pub type Result<T> = std::result::Result<T, SimulationError>;
