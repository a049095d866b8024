//! # zkcall-zkp: Proof-to-Calldata Transcoding
//!
//! Turns a proof and its public signals into the exact arguments an
//! on-chain `verifyProof` entry point expects, for Groth16 and PLONK.
//!
//! ## Architecture
//!
//! - **Systems** (`system.rs`): `ProvingSystem`, the closed set of proving
//!   systems. Every per-system decision matches on it.
//!
//! - **Proofs** (`groth16.rs`, `plonk.rs`): typed proofs and verifier
//!   argument tuples. Groth16 proofs import from snarkjs `proof.json`,
//!   including the Fq2 coefficient swap for `B`.
//!
//! - **Transcoding** (`transcode.rs`): the sealed `Transcoder` trait with
//!   one implementation per system, plus the export-string path for
//!   backends that only hand out text.
//!
//! - **Export / ABI** (`export.rs`, `abi.rs`): the snarkjs calldata export
//!   layout and the EVM transaction input (selector plus encoded
//!   arguments).
//!
//! - **Collaborators** (`traits.rs`): `WitnessCalculator`, `ProverBackend`
//!   and `OnChainVerifier`, the seams where snarkjs and a chain plug in.
//!
//! - **Mock** (`mock.rs`, feature `mock`): deterministic backend and
//!   verifier contracts for running scenarios without a trusted setup.
//!
//! ## Crate Policy
//!
//! - Proof coordinates are raw 256-bit words; only public inputs are
//!   scalar field elements.
//! - No `unsafe` code.

pub mod abi;
pub mod circuits;
pub mod export;
pub mod groth16;
#[cfg(feature = "mock")]
pub mod mock;
pub mod plonk;
pub mod system;
pub mod traits;
pub mod transcode;

pub use circuits::MultiplierCircuit;
pub use export::export_calldata_string;
pub use groth16::{G1Point, G2Point, Groth16Calldata, Groth16Proof, SnarkjsGroth16Proof};
#[cfg(feature = "mock")]
pub use mock::{MockBackend, MockGroth16Verifier, MockPlonkVerifier, MockVerifyingKey};
pub use plonk::{PlonkCalldata, PlonkProof};
pub use system::{ProvingSystem, UnknownSystemError};
pub use traits::{
    ArtifactRef, BackendError, OnChainVerifier, ProofWithSignals, ProverBackend, ProvingKeyRef,
    VerificationCallError, VerifyingKeyRef, WitnessCalculator,
};
pub use transcode::{Calldata, Proof, TranscodeError, Transcoder};
