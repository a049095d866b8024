//! # zkcall-harness: Proof Lifecycle Scenarios
//!
//! Drives circuit inputs through witness computation, proof generation,
//! transcoding and on-chain verification, and checks the verifier's answer
//! against what the scenario requires.
//!
//! ## Modules
//!
//! - **Scenario** (`scenario.rs`): `Scenario<S>`, a typestate machine
//!   `InputsBound → WitnessComputed → ProofGenerated → CalldataBuilt →
//!   Verified`. Skipping a stage is a compile error.
//!
//! - **Outcome** (`outcome.rs`): the accept/reject contract. A rejection
//!   scenario passes only when the call *returned* `false`.
//!
//! - **Suite** (`suite.rs`): scenario definitions, the built-in suite, and
//!   the runner over the mock backend.
//!
//! - **Fixtures** (`fixtures.rs`): fixed negative calldata.
//!
//! - **Config** (`config.rs`): `HarnessConfig::from_env()`.

pub mod config;
pub mod fixtures;
pub mod outcome;
pub mod scenario;
pub mod suite;

pub use config::{ConfigError, HarnessConfig, LogFormat};
pub use outcome::{check_outcome, Expectation, OutcomeError};
pub use scenario::{Scenario, ScenarioError, ScenarioStage, StageFailure, TransitionRecord};
pub use suite::{builtin_suite, run_builtin, Harness, ScenarioDef, ScenarioReport, SuiteReport};
