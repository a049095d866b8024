//! Outcome contract: what a verifier answer must be for a scenario to pass.
//!
//! A genuine proof must verify `true`. Forged or unrelated calldata must
//! verify `false`, and only a call that *returned* `false` counts: a call
//! that errored says nothing about the proof and fails the scenario.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scenario::ScenarioError;

/// The verifier answer a scenario requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expectation {
    /// `verifyProof` must return `true`.
    Accept,
    /// `verifyProof` must return `false`.
    Reject,
}

impl Expectation {
    /// The boolean the verifier must return.
    pub fn expected_outcome(self) -> bool {
        matches!(self, Expectation::Accept)
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Accept => f.write_str("accept"),
            Expectation::Reject => f.write_str("reject"),
        }
    }
}

/// A scenario's result contradicted its expectation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OutcomeError {
    /// The verifier accepted calldata that must be rejected.
    #[error("verifier accepted calldata that must be rejected")]
    AcceptedInvalid,

    /// The verifier rejected a genuine proof.
    #[error("verifier rejected a genuine proof")]
    RejectedValid,

    /// The scenario aborted before the verifier answered.
    #[error("expected the verifier to {expected}, but the scenario aborted: {source}")]
    Aborted {
        /// What the scenario required.
        expected: Expectation,
        /// Why it never got an answer.
        #[source]
        source: ScenarioError,
    },
}

/// Check a scenario result against its expectation.
pub fn check_outcome(
    expected: Expectation,
    result: &Result<bool, ScenarioError>,
) -> Result<(), OutcomeError> {
    match (expected, result) {
        (Expectation::Accept, Ok(true)) | (Expectation::Reject, Ok(false)) => Ok(()),
        (Expectation::Accept, Ok(false)) => Err(OutcomeError::RejectedValid),
        (Expectation::Reject, Ok(true)) => Err(OutcomeError::AcceptedInvalid),
        (expected, Err(e)) => Err(OutcomeError::Aborted {
            expected,
            source: e.clone(),
        }),
    }
}
