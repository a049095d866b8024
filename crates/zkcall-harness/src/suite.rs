//! # Scenario Suite
//!
//! Declares scenarios and runs them against the mock backend and mock
//! verifier contracts.
//!
//! ## Built-in Suite
//!
//! | Scenario                        | System  | Calldata                    | Expect |
//! |---------------------------------|---------|-----------------------------|--------|
//! | `multiplier2/groth16/genuine`   | Groth16 | typed, inputs `a=2,b=3`     | accept |
//! | `multiplier2/groth16/zeroed`    | Groth16 | all-zero, `n = 1`           | reject |
//! | `multiplier3/groth16/genuine`   | Groth16 | export string, `a=2,b=3,c=5`| accept |
//! | `multiplier3/groth16/zeroed`    | Groth16 | all-zero, `n = 1`           | reject |
//! | `multiplier3/plonk/genuine`     | PLONK   | export string, `a=2,b=3,c=5`| accept |
//! | `multiplier3/plonk/unrelated`   | PLONK   | fixed blob, signals `[0]`   | reject |
//!
//! Genuine scenarios also pin the witness head: `[1, 6]` for the two-input
//! multiplier and `[1, 30]` for the three-input one.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use zkcall_core::{FieldElement, InputAssignment};
use zkcall_zkp::{
    ArtifactRef, BackendError, Calldata, MockBackend, MockGroth16Verifier, MockPlonkVerifier,
    MockVerifyingKey, MultiplierCircuit, OnChainVerifier, ProvingKeyRef, ProvingSystem,
    VerificationCallError,
};

use crate::config::HarnessConfig;
use crate::fixtures;
use crate::outcome::{check_outcome, Expectation, OutcomeError};
use crate::scenario::{Scenario, ScenarioError, TransitionRecord, Verified};

// ─── Scenario Definitions ───────────────────────────────────────────

/// How a genuine scenario turns its proof into calldata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CalldataPath {
    /// Named-field transcoding of the typed proof.
    Typed,
    /// Parse the backend's calldata export string.
    Export,
}

/// What a scenario sends to the verifier.
#[derive(Debug, Clone)]
pub enum Plan {
    /// Prove `inputs` and verify the result.
    Prove {
        /// Circuit inputs.
        inputs: InputAssignment,
        /// Transcoding path.
        path: CalldataPath,
        /// Required leading witness values.
        witness_head: Vec<FieldElement>,
    },
    /// Send calldata no prover produced.
    Forge(Calldata),
}

/// One scenario of a suite.
#[derive(Debug, Clone)]
pub struct ScenarioDef {
    /// Unique name, used in logs and reports.
    pub name: String,
    /// Proving system under test.
    pub system: ProvingSystem,
    /// Circuit whose verifier the calldata is sent to.
    pub circuit: MultiplierCircuit,
    /// What is sent.
    pub plan: Plan,
    /// Required verifier answer.
    pub expectation: Expectation,
}

fn genuine(
    system: ProvingSystem,
    circuit: MultiplierCircuit,
    inputs: InputAssignment,
    path: CalldataPath,
    witness_head: Vec<FieldElement>,
) -> ScenarioDef {
    ScenarioDef {
        name: format!("{}/{system}/genuine", circuit.artifact()),
        system,
        circuit,
        plan: Plan::Prove {
            inputs,
            path,
            witness_head,
        },
        expectation: Expectation::Accept,
    }
}

fn forged(
    system: ProvingSystem,
    circuit: MultiplierCircuit,
    label: &str,
    calldata: Calldata,
) -> ScenarioDef {
    ScenarioDef {
        name: format!("{}/{system}/{label}", circuit.artifact()),
        system,
        circuit,
        plan: Plan::Forge(calldata),
        expectation: Expectation::Reject,
    }
}

/// The built-in suite: both verdicts for both proving systems.
pub fn builtin_suite() -> Vec<ScenarioDef> {
    let fe = |n: u64| FieldElement::from(n);
    let two_inputs = InputAssignment::new().with("a", 2u64).with("b", 3u64);
    let three_inputs = two_inputs.clone().with("c", 5u64);
    let hello = MultiplierCircuit::hello_world;
    let mul3 = MultiplierCircuit::multiplier3;

    vec![
        genuine(
            ProvingSystem::Groth16,
            hello(),
            two_inputs,
            CalldataPath::Typed,
            vec![fe(1), fe(6)],
        ),
        forged(ProvingSystem::Groth16, hello(), "zeroed", fixtures::zeroed_groth16(1)),
        genuine(
            ProvingSystem::Groth16,
            mul3(),
            three_inputs.clone(),
            CalldataPath::Export,
            vec![fe(1), fe(30)],
        ),
        forged(ProvingSystem::Groth16, mul3(), "zeroed", fixtures::zeroed_groth16(1)),
        genuine(
            ProvingSystem::Plonk,
            mul3(),
            three_inputs,
            CalldataPath::Export,
            vec![fe(1), fe(30)],
        ),
        forged(ProvingSystem::Plonk, mul3(), "unrelated", fixtures::unrelated_plonk()),
    ]
}

// ─── Reports ────────────────────────────────────────────────────────

/// Why a scenario did not pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScenarioFailure {
    /// The verifier answer (or its absence) contradicted the expectation.
    #[error(transparent)]
    Outcome(#[from] OutcomeError),

    /// The witness did not start with the required values.
    #[error("witness head {actual:?} differs from expected {expected:?}")]
    WitnessHead {
        /// Required leading values.
        expected: Vec<String>,
        /// Leading values found.
        actual: Vec<String>,
    },

    /// The verifier could not be deployed.
    #[error("verifier deployment failed: {0}")]
    Deployment(#[from] BackendError),
}

/// Result of one scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    /// Scenario name.
    pub name: String,
    /// Proving system.
    pub system: ProvingSystem,
    /// Required answer.
    pub expectation: Expectation,
    /// The verifier's answer, if the call returned one.
    pub outcome: Option<bool>,
    /// Failure description, `None` if the scenario passed.
    pub failure: Option<String>,
    /// Stage changes of a scenario that reached `VERIFIED`.
    pub transitions: Vec<TransitionRecord>,
}

impl ScenarioReport {
    /// Whether the scenario met its expectation.
    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }
}

/// Results of a suite run, in definition order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SuiteReport {
    /// One report per scenario.
    pub scenarios: Vec<ScenarioReport>,
}

impl SuiteReport {
    /// Whether every scenario passed.
    pub fn passed(&self) -> bool {
        self.scenarios.iter().all(ScenarioReport::passed)
    }

    /// The scenarios that did not pass.
    pub fn failures(&self) -> impl Iterator<Item = &ScenarioReport> {
        self.scenarios.iter().filter(|r| !r.passed())
    }
}

// ─── Verifier Deployments ───────────────────────────────────────────

/// A deployed mock verifier of either system.
#[derive(Debug, Clone)]
pub enum DeployedVerifier {
    /// `Groth16Verifier`.
    Groth16(MockGroth16Verifier),
    /// `PlonkVerifier`.
    Plonk(MockPlonkVerifier),
}

impl DeployedVerifier {
    /// Deploy the verifier matching `vk`'s system.
    pub fn deploy(vk: &MockVerifyingKey) -> Result<Self, BackendError> {
        match vk.system {
            ProvingSystem::Groth16 => MockGroth16Verifier::deploy(vk).map(Self::Groth16),
            ProvingSystem::Plonk => MockPlonkVerifier::deploy(vk).map(Self::Plonk),
        }
    }
}

impl OnChainVerifier for DeployedVerifier {
    fn system(&self) -> ProvingSystem {
        match self {
            DeployedVerifier::Groth16(v) => v.system(),
            DeployedVerifier::Plonk(v) => v.system(),
        }
    }

    async fn verify_proof(&self, calldata: &Calldata) -> Result<bool, VerificationCallError> {
        match self {
            DeployedVerifier::Groth16(v) => v.verify_proof(calldata).await,
            DeployedVerifier::Plonk(v) => v.verify_proof(calldata).await,
        }
    }
}

// ─── Runner ─────────────────────────────────────────────────────────

type SetupKey = (ProvingSystem, ArtifactRef);

/// Runs scenario suites against the mock backend.
#[derive(Debug)]
pub struct Harness {
    config: HarnessConfig,
    groth16: MockBackend,
    plonk: MockBackend,
    keys: BTreeMap<SetupKey, (ProvingKeyRef, MockVerifyingKey)>,
    shared: BTreeMap<SetupKey, DeployedVerifier>,
}

impl Harness {
    /// A harness with no setups performed yet.
    pub fn new(config: HarnessConfig) -> Self {
        Self {
            config,
            groth16: MockBackend::new(ProvingSystem::Groth16),
            plonk: MockBackend::new(ProvingSystem::Plonk),
            keys: BTreeMap::new(),
            shared: BTreeMap::new(),
        }
    }

    /// The configuration in effect.
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    fn backend(&self, system: ProvingSystem) -> &MockBackend {
        match system {
            ProvingSystem::Groth16 => &self.groth16,
            ProvingSystem::Plonk => &self.plonk,
        }
    }

    fn setup(&mut self, system: ProvingSystem, circuit: &MultiplierCircuit) {
        let key = (system, circuit.artifact().clone());
        if self.keys.contains_key(&key) {
            return;
        }
        let backend = match system {
            ProvingSystem::Groth16 => &mut self.groth16,
            ProvingSystem::Plonk => &mut self.plonk,
        };
        let material = backend.setup(circuit, "0001");
        self.keys.insert(key, material);
    }

    fn verifier_for(
        &mut self,
        key: &SetupKey,
        vk: &MockVerifyingKey,
    ) -> Result<DeployedVerifier, BackendError> {
        if self.config.fresh_verifier {
            return DeployedVerifier::deploy(vk);
        }
        if let Some(shared) = self.shared.get(key) {
            return Ok(shared.clone());
        }
        let deployed = DeployedVerifier::deploy(vk)?;
        self.shared.insert(key.clone(), deployed.clone());
        Ok(deployed)
    }

    /// Run every scenario in order. Later scenarios run even if earlier
    /// ones fail.
    pub async fn run(&mut self, defs: &[ScenarioDef]) -> SuiteReport {
        let mut report = SuiteReport::default();
        for def in defs {
            report.scenarios.push(self.run_scenario(def).await);
        }
        let failed = report.failures().count();
        tracing::info!(
            scenarios = report.scenarios.len(),
            failed,
            "scenario suite finished"
        );
        report
    }

    /// Run one scenario and check it against its expectation.
    pub async fn run_scenario(&mut self, def: &ScenarioDef) -> ScenarioReport {
        self.setup(def.system, &def.circuit);
        let key = (def.system, def.circuit.artifact().clone());
        let mut report = ScenarioReport {
            name: def.name.clone(),
            system: def.system,
            expectation: def.expectation,
            outcome: None,
            failure: None,
            transitions: Vec::new(),
        };
        let Some((proving_key, vk)) = self.keys.get(&key).cloned() else {
            report.failure = Some(format!("no setup for {}", def.circuit.artifact()));
            return report;
        };
        let verifier = match self.verifier_for(&key, &vk) {
            Ok(verifier) => verifier,
            Err(e) => {
                report.failure = Some(ScenarioFailure::from(e).to_string());
                return report;
            }
        };

        let result = self.drive(def, &proving_key, &verifier).await;
        let result = match result {
            Ok(verified) if self.config.idempotence_check => {
                match verified.recheck(&verifier).await {
                    Ok(()) => Ok(verified),
                    Err(e) => Err(e),
                }
            }
            other => other,
        };

        let mut failure = None;
        if let (Ok(verified), Plan::Prove { witness_head, .. }) = (&result, &def.plan) {
            let expected = decimal(witness_head);
            let actual = verified
                .witness()
                .map(|w| decimal(&w.values()[..witness_head.len().min(w.len())]))
                .unwrap_or_default();
            if actual != expected {
                failure = Some(ScenarioFailure::WitnessHead { expected, actual });
            }
        }
        if let Ok(verified) = &result {
            report.outcome = Some(verified.outcome());
            report.transitions = verified.transition_log().to_vec();
        }
        let answer = result.map(|verified| verified.outcome());
        if let Err(e) = check_outcome(def.expectation, &answer) {
            failure = Some(ScenarioFailure::Outcome(e));
        }

        match &failure {
            None => tracing::info!(
                scenario = %def.name,
                system = %def.system,
                expectation = %def.expectation,
                outcome = ?report.outcome,
                "scenario passed"
            ),
            Some(f) => tracing::warn!(
                scenario = %def.name,
                system = %def.system,
                expectation = %def.expectation,
                error = %f,
                "scenario failed"
            ),
        }
        report.failure = failure.map(|f| f.to_string());
        report
    }

    async fn drive(
        &self,
        def: &ScenarioDef,
        proving_key: &ProvingKeyRef,
        verifier: &DeployedVerifier,
    ) -> Result<Scenario<Verified>, ScenarioError> {
        let calldata_built = match &def.plan {
            Plan::Forge(calldata) => Scenario::forged(&def.name, calldata.clone()),
            Plan::Prove { inputs, path, .. } => {
                let backend = self.backend(def.system);
                let proved = Scenario::bind(&def.name, def.system, inputs.clone())
                    .compute_witness(&def.circuit)
                    .await?
                    .generate_proof(backend, def.circuit.artifact(), proving_key)
                    .await?;
                match path {
                    CalldataPath::Typed => proved.build_calldata()?,
                    CalldataPath::Export => proved.build_calldata_from_export(backend)?,
                }
            }
        };
        calldata_built.verify(verifier).await
    }
}

fn decimal(values: &[FieldElement]) -> Vec<String> {
    values.iter().map(FieldElement::to_decimal_string).collect()
}

/// Run the built-in suite with `config`.
pub async fn run_builtin(config: HarnessConfig) -> SuiteReport {
    Harness::new(config).run(&builtin_suite()).await
}
