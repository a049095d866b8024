//! # Collaborator Interfaces
//!
//! The witness evaluator, the prover backend and the on-chain verifier are
//! external collaborators. zkcall consumes them through these traits so a
//! scenario can run against snarkjs-backed adapters or against the
//! deterministic mock backend without changing the harness.
//!
//! ## Async Boundary
//!
//! Every collaborator call may suspend (a child process, an RPC round trip).
//! The methods return `impl Future + Send`; implementations are free to use
//! `async fn`. The core imposes no timeout: collaborators own that policy.
//!
//! ## Failure Semantics
//!
//! - [`BackendError`] is a witness or proof generation failure. It is
//!   surfaced unchanged and never retried, since generation is a pure
//!   function of its inputs.
//! - [`VerificationCallError`] means the verifier call itself failed. It is
//!   never conflated with a call that returned `false`.

use std::fmt;
use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use zkcall_core::{InputAssignment, PublicSignals, Witness, WitnessError};

use crate::export::export_calldata_string;
use crate::system::ProvingSystem;
use crate::transcode::{Calldata, Proof, TranscodeError};

// ─── Opaque References ──────────────────────────────────────────────

/// Caller-supplied identifier of a compiled circuit (a `.wasm` path, say).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArtifactRef(pub String);

/// Caller-supplied identifier of proving-key material (a `.zkey` path).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProvingKeyRef(pub String);

/// Caller-supplied identifier of a verifying key (`verification_key.json`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VerifyingKeyRef(pub String);

impl ArtifactRef {
    /// Wrap an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as given.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ProvingKeyRef {
    /// Wrap an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as given.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl VerifyingKeyRef {
    /// Wrap an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as given.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ProvingKeyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for VerifyingKeyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─── Outputs ────────────────────────────────────────────────────────

/// What `fullProve` hands back: the proof and the public signals it binds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofWithSignals {
    /// The proof, tagged with its system.
    pub proof: Proof,
    /// Public outputs in circuit declaration order.
    #[serde(rename = "publicSignals")]
    pub public_signals: PublicSignals,
}

// ─── Errors ─────────────────────────────────────────────────────────

/// The witness evaluator or prover backend reported a failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The input assignment does not fit the circuit.
    #[error(transparent)]
    Witness(#[from] WitnessError),

    /// No circuit is known under this artifact reference.
    #[error("unknown circuit artifact {0}")]
    UnknownArtifact(ArtifactRef),

    /// No key material is known under this reference.
    #[error("unknown key {0:?}")]
    UnknownKey(String),

    /// The proving key was produced for a different circuit.
    #[error("proving key {key} was not set up for artifact {artifact}")]
    KeyMismatch {
        /// The key that was supplied.
        key: ProvingKeyRef,
        /// The artifact it was supplied with.
        artifact: ArtifactRef,
    },

    /// A proof or key of one system was given to another system's backend.
    #[error("{expected} backend cannot handle {actual} material")]
    SystemMismatch {
        /// The backend's system.
        expected: ProvingSystem,
        /// The system of the supplied material.
        actual: ProvingSystem,
    },

    /// Any other generation failure, with the collaborator's message.
    #[error("proof generation failed: {0}")]
    GenerationFailed(String),
}

/// The verifier call errored instead of returning a boolean.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationCallError {
    /// The contract reverted (argument shape, input range, and so on).
    #[error("verifier call reverted: {0}")]
    Reverted(String),

    /// The arguments could not be ABI-encoded.
    #[error("calldata could not be encoded: {0}")]
    Encoding(#[from] TranscodeError),

    /// The call never reached the contract.
    #[error("transport failure: {0}")]
    Transport(String),
}

// ─── Traits ─────────────────────────────────────────────────────────

/// Computes the full witness for a circuit input assignment.
///
/// The result starts with the constant `1`, followed by the public outputs
/// in declaration order, followed by internal signals.
pub trait WitnessCalculator: Send + Sync {
    /// `calculateWitness(input)`.
    fn calculate_witness(
        &self,
        input: &InputAssignment,
    ) -> impl Future<Output = Result<Witness, BackendError>> + Send;
}

/// Generates and checks proofs for one proving system.
pub trait ProverBackend: Send + Sync {
    /// The system whose proofs this backend produces.
    fn system(&self) -> ProvingSystem;

    /// `fullProve(input, wasm, zkey)`: witness plus proof in one step.
    fn full_prove(
        &self,
        input: &InputAssignment,
        artifact: &ArtifactRef,
        proving_key: &ProvingKeyRef,
    ) -> impl Future<Output = Result<ProofWithSignals, BackendError>> + Send;

    /// Off-chain verification of a (proof, public signals) pair.
    fn verify(
        &self,
        verifying_key: &VerifyingKeyRef,
        signals: &PublicSignals,
        proof: &Proof,
    ) -> impl Future<Output = Result<bool, BackendError>> + Send;

    /// `exportSolidityCallData(proof, publicSignals)`.
    ///
    /// The default renders the textual layout snarkjs produces.
    fn export_calldata(
        &self,
        proof: &Proof,
        signals: &PublicSignals,
    ) -> Result<String, BackendError> {
        if proof.system() != self.system() {
            return Err(BackendError::SystemMismatch {
                expected: self.system(),
                actual: proof.system(),
            });
        }
        Ok(export_calldata_string(proof, signals))
    }
}

/// A deployed verifier contract with one `verifyProof` entry point.
///
/// Verification is a read: calling it twice with the same arguments must
/// return the same outcome.
pub trait OnChainVerifier: Send + Sync {
    /// The system whose entry point this contract exposes.
    fn system(&self) -> ProvingSystem;

    /// Call `verifyProof` with transcoded arguments.
    fn verify_proof(
        &self,
        calldata: &Calldata,
    ) -> impl Future<Output = Result<bool, VerificationCallError>> + Send;
}
