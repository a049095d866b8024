//! # Error Types
//!
//! Errors raised while parsing field elements and while assembling
//! witnesses. All errors use `thiserror` for derive-based `Display` and
//! `Error` implementations.

use thiserror::Error;

/// A numeric string did not parse as an integer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed integer {input:?}: {reason}")]
pub struct FormatError {
    /// The offending input, as received.
    pub input: String,
    /// What was wrong with it.
    pub reason: &'static str,
}

impl FormatError {
    pub(crate) fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

/// A witness could not be constructed or queried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WitnessError {
    /// The witness vector has no elements.
    #[error("witness is empty")]
    Empty,

    /// Index 0 of a witness must be the constant 1.
    #[error("witness[0] must be 1, found {found}")]
    MissingConstant {
        /// The value found at index 0.
        found: String,
    },

    /// A circuit input required by the evaluator was not assigned.
    #[error("missing input signal {0:?}")]
    MissingInput(String),

    /// An input was assigned that the circuit does not declare.
    #[error("circuit has no input signal {0:?}")]
    UnknownInput(String),

    /// The witness is shorter than the requested public portion.
    #[error("witness has {len} elements, cannot take {needed} public outputs")]
    TooShort {
        /// Number of public outputs requested.
        needed: usize,
        /// Actual witness length.
        len: usize,
    },
}
