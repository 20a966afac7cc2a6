//! Error handling logic

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, BlochError>;

/// Errors surfaced by the checked entry points of the crate.
///
/// The evaluation and playback paths are fail-open and never produce these.
/// They only appear from strict evaluation, from the `validation` checks and
/// from decoding wire payloads.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BlochError {
    /// A gate name that the gate library does not know.
    #[error("Unrecognized gate '{name}'")]
    UnrecognizedGate {
        /// The name as it was supplied.
        name: String,
    },

    /// A noise channel name that the noise library does not know.
    #[error("Unrecognized noise channel '{name}'")]
    UnrecognizedNoise {
        /// The name as it was supplied.
        name: String,
    },

    /// A probability parameter outside `[0, 1]`.
    #[error("Parameter '{name}' out of range [0, 1]: {value}")]
    ParameterOutOfRange {
        /// Parameter name (`gamma`, `lambda`, `p`).
        name: String,
        /// Offending value.
        value: f64,
    },

    /// NaN or infinite angle/probability.
    #[error("Parameter '{name}' is not finite")]
    NonFiniteParameter {
        /// Parameter name.
        name: String,
    },

    /// A vector, matrix or frame failed a physicality check.
    #[error("Not a physical state: {message}")]
    NotPhysical {
        /// What was violated.
        message: String,
    },

    /// JSON payload could not be decoded or encoded.
    #[error("Wire format error: {message}")]
    Wire {
        /// Message from the serializer.
        message: String,
    },
}

impl From<serde_json::Error> for BlochError {
    fn from(err: serde_json::Error) -> Self {
        BlochError::Wire { message: err.to_string() }
    }
}
