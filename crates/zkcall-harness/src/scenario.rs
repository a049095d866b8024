//! # Scenario Typestate Machine
//!
//! One scenario drives a single input assignment through the proof
//! lifecycle. Each stage is a distinct type, so stages cannot be skipped or
//! replayed:
//!
//! ```text
//! InputsBound ──compute_witness()──▶ WitnessComputed ──generate_proof()──▶ ProofGenerated
//!                                                                              │
//!                                        build_calldata() / build_calldata_from_export()
//!                                                                              ▼
//!                  forged() ─────────────────────────────────────────────▶ CalldataBuilt
//!                                                                              │
//!                                                                         verify()
//!                                                                              ▼
//!                                                                           Verified
//! ```
//!
//! `forged()` enters at `CalldataBuilt` with calldata that no backend
//! produced (all-zero words, an unrelated blob). It is the entry point of
//! rejection scenarios.
//!
//! ## Failure
//!
//! Every transition consumes the scenario. A failure returns a
//! [`ScenarioError`] naming the stage that failed and the collaborator's
//! error, unchanged. Nothing is retried: every stage is a deterministic
//! function of its inputs.
//!
//! ```compile_fail
//! use zkcall_harness::scenario::*;
//! use zkcall_core::InputAssignment;
//! use zkcall_zkp::ProvingSystem;
//!
//! let scenario = Scenario::bind("s", ProvingSystem::Groth16, InputAssignment::new());
//! // ERROR: no method named `build_calldata` found for `Scenario<InputsBound>`
//! let _ = scenario.build_calldata();
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use zkcall_core::{InputAssignment, PublicSignals, Witness};
use zkcall_zkp::{
    ArtifactRef, BackendError, Calldata, OnChainVerifier, Proof, ProverBackend, ProvingKeyRef,
    ProvingSystem, TranscodeError, VerificationCallError, WitnessCalculator,
};

// ─── Stage Types ─────────────────────────────────────────────────────

/// Stage: circuit inputs bound, nothing computed yet.
#[derive(Debug, Clone)]
pub struct InputsBound {
    inputs: InputAssignment,
}

/// Stage: the witness evaluator produced a witness.
#[derive(Debug, Clone)]
pub struct WitnessComputed {
    inputs: InputAssignment,
    witness: Witness,
}

/// Stage: the backend produced a proof and public signals.
#[derive(Debug, Clone)]
pub struct ProofGenerated {
    proof: Proof,
    public_signals: PublicSignals,
}

/// Stage: verifier arguments are ready.
#[derive(Debug, Clone)]
pub struct CalldataBuilt {
    calldata: Calldata,
}

/// Stage: the verifier answered (terminal).
#[derive(Debug, Clone)]
pub struct Verified {
    calldata: Calldata,
    outcome: bool,
}

// ─── Sealed Trait ────────────────────────────────────────────────────

mod private {
    pub trait Sealed {}
    impl Sealed for super::InputsBound {}
    impl Sealed for super::WitnessComputed {}
    impl Sealed for super::ProofGenerated {}
    impl Sealed for super::CalldataBuilt {}
    impl Sealed for super::Verified {}
}

/// Marker trait for the five scenario stages.
pub trait ScenarioStage: private::Sealed + fmt::Debug {
    /// Canonical stage name, e.g. `"WITNESS_COMPUTED"`.
    fn name() -> &'static str;

    /// Whether no further transition exists.
    fn is_terminal() -> bool {
        false
    }
}

impl ScenarioStage for InputsBound {
    fn name() -> &'static str {
        "INPUTS_BOUND"
    }
}
impl ScenarioStage for WitnessComputed {
    fn name() -> &'static str {
        "WITNESS_COMPUTED"
    }
}
impl ScenarioStage for ProofGenerated {
    fn name() -> &'static str {
        "PROOF_GENERATED"
    }
}
impl ScenarioStage for CalldataBuilt {
    fn name() -> &'static str {
        "CALLDATA_BUILT"
    }
}
impl ScenarioStage for Verified {
    fn name() -> &'static str {
        "VERIFIED"
    }
    fn is_terminal() -> bool {
        true
    }
}

// ─── Transition Record ───────────────────────────────────────────────

/// One stage change in a scenario's log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Stage before the transition, `None` when a scenario is created.
    pub from_stage: Option<String>,
    /// Stage after the transition.
    pub to_stage: String,
    /// What happened.
    pub detail: String,
}

// ─── Errors ──────────────────────────────────────────────────────────

/// What went wrong inside a stage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StageFailure {
    /// Witness or proof generation failed.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// The proof could not be turned into calldata.
    #[error(transparent)]
    Transcode(#[from] TranscodeError),

    /// The verifier call errored instead of answering.
    #[error(transparent)]
    VerificationCall(#[from] VerificationCallError),

    /// The backend's public signals are not the witness's public outputs.
    #[error("public signals {signals:?} do not match the witness public outputs")]
    SignalMismatch {
        /// Signals reported by the backend.
        signals: Vec<String>,
    },

    /// A second verification of identical calldata answered differently.
    #[error("verifier answered {first} then {second} for identical calldata")]
    NotIdempotent {
        /// First outcome.
        first: bool,
        /// Second outcome.
        second: bool,
    },
}

/// A scenario aborted at `stage`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("scenario {scenario:?} failed at {stage}: {source}")]
pub struct ScenarioError {
    /// Scenario name.
    pub scenario: String,
    /// The stage whose transition failed.
    pub stage: &'static str,
    /// The underlying failure.
    #[source]
    pub source: StageFailure,
}

impl ScenarioError {
    /// Whether the verifier call itself failed (as opposed to an earlier stage).
    pub fn is_call_failure(&self) -> bool {
        matches!(self.source, StageFailure::VerificationCall(_))
    }
}

// ─── The Scenario ────────────────────────────────────────────────────

/// A single proof lifecycle run, parameterized by its current stage.
#[derive(Debug)]
pub struct Scenario<S: ScenarioStage> {
    name: String,
    system: ProvingSystem,
    witness: Option<Witness>,
    public_signals: Option<PublicSignals>,
    transition_log: Vec<TransitionRecord>,
    stage: S,
}

impl<S: ScenarioStage> Scenario<S> {
    /// Scenario name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Proving system under test.
    pub fn system(&self) -> ProvingSystem {
        self.system
    }

    /// Canonical name of the current stage.
    pub fn stage_name(&self) -> &'static str {
        S::name()
    }

    /// Whether the scenario has reached its terminal stage.
    pub fn is_terminal(&self) -> bool {
        S::is_terminal()
    }

    /// The witness, once computed.
    pub fn witness(&self) -> Option<&Witness> {
        self.witness.as_ref()
    }

    /// The backend's public signals, once a proof was generated.
    pub fn public_signals(&self) -> Option<&PublicSignals> {
        self.public_signals.as_ref()
    }

    /// Every stage change so far.
    pub fn transition_log(&self) -> &[TransitionRecord] {
        &self.transition_log
    }

    fn fail<T: ScenarioStage>(&self, source: impl Into<StageFailure>) -> ScenarioError {
        let source = source.into();
        tracing::warn!(
            scenario = %self.name,
            system = %self.system,
            stage = T::name(),
            error = %source,
            "scenario stage failed"
        );
        ScenarioError {
            scenario: self.name.clone(),
            stage: T::name(),
            source,
        }
    }

    fn transition_to<T: ScenarioStage>(mut self, stage: T, detail: String) -> Scenario<T> {
        tracing::info!(
            scenario = %self.name,
            system = %self.system,
            from = S::name(),
            to = T::name(),
            %detail,
            "scenario transition"
        );
        self.transition_log.push(TransitionRecord {
            from_stage: Some(S::name().to_string()),
            to_stage: T::name().to_string(),
            detail,
        });
        Scenario {
            name: self.name,
            system: self.system,
            witness: self.witness,
            public_signals: self.public_signals,
            transition_log: self.transition_log,
            stage,
        }
    }
}

fn created<T: ScenarioStage>(
    name: String,
    system: ProvingSystem,
    stage: T,
    detail: String,
) -> Scenario<T> {
    tracing::info!(scenario = %name, %system, stage = T::name(), "scenario created");
    Scenario {
        name,
        system,
        witness: None,
        public_signals: None,
        transition_log: vec![TransitionRecord {
            from_stage: None,
            to_stage: T::name().to_string(),
            detail,
        }],
        stage,
    }
}

// ─── Stage-Specific Impl Blocks ──────────────────────────────────────

impl Scenario<InputsBound> {
    /// Start a scenario with its circuit inputs.
    pub fn bind(name: impl Into<String>, system: ProvingSystem, inputs: InputAssignment) -> Self {
        let detail = format!("{} inputs bound", inputs.len());
        created(name.into(), system, InputsBound { inputs }, detail)
    }

    /// The bound inputs.
    pub fn inputs(&self) -> &InputAssignment {
        &self.stage.inputs
    }

    /// Run the witness evaluator (INPUTS_BOUND → WITNESS_COMPUTED).
    pub async fn compute_witness(
        self,
        calculator: &impl WitnessCalculator,
    ) -> Result<Scenario<WitnessComputed>, ScenarioError> {
        let witness = match calculator.calculate_witness(&self.stage.inputs).await {
            Ok(witness) => witness,
            Err(e) => return Err(self.fail::<WitnessComputed>(e)),
        };
        let detail = format!("witness of {} signals", witness.len());
        let inputs = self.stage.inputs.clone();
        let mut next = self.transition_to(
            WitnessComputed {
                inputs,
                witness: witness.clone(),
            },
            detail,
        );
        next.witness = Some(witness);
        Ok(next)
    }
}

impl Scenario<WitnessComputed> {
    /// The computed witness.
    pub fn computed_witness(&self) -> &Witness {
        &self.stage.witness
    }

    /// Run the prover (WITNESS_COMPUTED → PROOF_GENERATED).
    ///
    /// The returned public signals must equal the witness's public outputs
    /// element for element.
    pub async fn generate_proof(
        self,
        backend: &impl ProverBackend,
        artifact: &ArtifactRef,
        proving_key: &ProvingKeyRef,
    ) -> Result<Scenario<ProofGenerated>, ScenarioError> {
        if backend.system() != self.system {
            let mismatch = BackendError::SystemMismatch {
                expected: self.system,
                actual: backend.system(),
            };
            return Err(self.fail::<ProofGenerated>(mismatch));
        }
        let out = match backend
            .full_prove(&self.stage.inputs, artifact, proving_key)
            .await
        {
            Ok(out) => out,
            Err(e) => return Err(self.fail::<ProofGenerated>(e)),
        };
        if !out.public_signals.matches_witness(&self.stage.witness) {
            let mismatch = StageFailure::SignalMismatch {
                signals: out.public_signals.to_decimal_strings(),
            };
            return Err(self.fail::<ProofGenerated>(mismatch));
        }

        let detail = format!(
            "{} proof, {} public signals",
            out.proof.system(),
            out.public_signals.len()
        );
        let signals = out.public_signals.clone();
        let mut next = self.transition_to(
            ProofGenerated {
                proof: out.proof,
                public_signals: out.public_signals,
            },
            detail,
        );
        next.public_signals = Some(signals);
        Ok(next)
    }
}

impl Scenario<ProofGenerated> {
    /// The generated proof.
    pub fn proof(&self) -> &Proof {
        &self.stage.proof
    }

    /// Transcode through the typed path (PROOF_GENERATED → CALLDATA_BUILT).
    pub fn build_calldata(self) -> Result<Scenario<CalldataBuilt>, ScenarioError> {
        match Calldata::from_proof(&self.stage.proof, &self.stage.public_signals) {
            Ok(calldata) => {
                Ok(self.transition_to(CalldataBuilt { calldata }, "typed transcoding".into()))
            }
            Err(e) => Err(self.fail::<CalldataBuilt>(e)),
        }
    }

    /// Transcode through the backend's export string
    /// (PROOF_GENERATED → CALLDATA_BUILT).
    pub fn build_calldata_from_export(
        self,
        backend: &impl ProverBackend,
    ) -> Result<Scenario<CalldataBuilt>, ScenarioError> {
        let export = match backend.export_calldata(&self.stage.proof, &self.stage.public_signals) {
            Ok(export) => export,
            Err(e) => return Err(self.fail::<CalldataBuilt>(e)),
        };
        match Calldata::from_export(self.system, &export, &self.stage.public_signals) {
            Ok(calldata) => Ok(self.transition_to(
                CalldataBuilt { calldata },
                "export-string transcoding".into(),
            )),
            Err(e) => Err(self.fail::<CalldataBuilt>(e)),
        }
    }
}

impl Scenario<CalldataBuilt> {
    /// Start a scenario from calldata no backend produced.
    pub fn forged(name: impl Into<String>, calldata: Calldata) -> Self {
        let system = calldata.system();
        created(name.into(), system, CalldataBuilt { calldata }, "forged calldata".into())
    }

    /// The verifier arguments.
    pub fn calldata(&self) -> &Calldata {
        &self.stage.calldata
    }

    /// Call the verifier (CALLDATA_BUILT → VERIFIED).
    ///
    /// A call that errors aborts the scenario; only a returned boolean
    /// reaches `Verified`.
    pub async fn verify(
        self,
        verifier: &impl OnChainVerifier,
    ) -> Result<Scenario<Verified>, ScenarioError> {
        match verifier.verify_proof(&self.stage.calldata).await {
            Ok(outcome) => {
                tracing::info!(
                    scenario = %self.name,
                    system = %self.system,
                    outcome,
                    "verifier answered"
                );
                let calldata = self.stage.calldata.clone();
                let detail = format!("verifyProof returned {outcome}");
                Ok(self.transition_to(Verified { calldata, outcome }, detail))
            }
            Err(e) => Err(self.fail::<Verified>(e)),
        }
    }
}

impl Scenario<Verified> {
    /// The verifier's answer.
    pub fn outcome(&self) -> bool {
        self.stage.outcome
    }

    /// The arguments that were verified.
    pub fn calldata(&self) -> &Calldata {
        &self.stage.calldata
    }

    /// Call the verifier again with identical calldata and require the same
    /// answer.
    pub async fn recheck(&self, verifier: &impl OnChainVerifier) -> Result<(), ScenarioError> {
        let second = match verifier.verify_proof(&self.stage.calldata).await {
            Ok(second) => second,
            Err(e) => return Err(self.fail::<Verified>(e)),
        };
        if second != self.stage.outcome {
            return Err(self.fail::<Verified>(StageFailure::NotIdempotent {
                first: self.stage.outcome,
                second,
            }));
        }
        Ok(())
    }
}
