//! # Proof Lifecycle Scenarios
//!
//! The four concrete scenarios: witness heads for both multiplier circuits,
//! then accept and reject for each proving system, driven stage by stage
//! through the typestate scenario.

use zkcall_core::{FieldElement, InputAssignment};
use zkcall_harness::fixtures::{unrelated_plonk, zeroed_groth16, PLONK_UNRELATED_BLOB};
use zkcall_harness::{check_outcome, Expectation, Scenario};
use zkcall_zkp::{
    Calldata, MockBackend, MockGroth16Verifier, MockPlonkVerifier, MultiplierCircuit,
    OnChainVerifier, ProvingSystem, WitnessCalculator,
};

fn fe(n: u64) -> FieldElement {
    FieldElement::from(n)
}

fn ab() -> InputAssignment {
    InputAssignment::new().with("a", 2u64).with("b", 3u64)
}

fn abc() -> InputAssignment {
    ab().with("c", 5u64)
}

#[tokio::test]
async fn two_input_multiplier_witness_head() {
    let witness = MultiplierCircuit::hello_world()
        .calculate_witness(&ab())
        .await
        .unwrap();
    assert_eq!(witness[0], fe(1));
    assert_eq!(witness[1], fe(6));
}

#[tokio::test]
async fn three_input_multiplier_witness_head() {
    let witness = MultiplierCircuit::multiplier3()
        .calculate_witness(&abc())
        .await
        .unwrap();
    assert_eq!(witness[0], fe(1));
    assert_eq!(witness[1], fe(30));
}

#[tokio::test]
async fn groth16_genuine_accepts_and_zeroed_rejects() {
    let circuit = MultiplierCircuit::hello_world();
    let mut backend = MockBackend::new(ProvingSystem::Groth16);
    let (pk, vk) = backend.setup(&circuit, "0001");
    let verifier = MockGroth16Verifier::deploy(&vk).unwrap();

    let verified = Scenario::bind("groth16-genuine", ProvingSystem::Groth16, ab())
        .compute_witness(&circuit)
        .await
        .unwrap()
        .generate_proof(&backend, circuit.artifact(), &pk)
        .await
        .unwrap()
        .build_calldata_from_export(&backend)
        .unwrap()
        .verify(&verifier)
        .await;
    let accepted = verified.map(|v| v.outcome());
    assert_eq!(check_outcome(Expectation::Accept, &accepted), Ok(()));

    let rejected = Scenario::forged("groth16-zeroed", zeroed_groth16(1))
        .verify(&verifier)
        .await
        .map(|v| v.outcome());
    assert_eq!(check_outcome(Expectation::Reject, &rejected), Ok(()));
}

#[tokio::test]
async fn plonk_genuine_accepts_and_unrelated_blob_rejects() {
    let circuit = MultiplierCircuit::multiplier3();
    let mut backend = MockBackend::new(ProvingSystem::Plonk);
    let (pk, vk) = backend.setup(&circuit, "0001");
    let verifier = MockPlonkVerifier::deploy(&vk).unwrap();

    let verified = Scenario::bind("plonk-genuine", ProvingSystem::Plonk, abc())
        .compute_witness(&circuit)
        .await
        .unwrap()
        .generate_proof(&backend, circuit.artifact(), &pk)
        .await
        .unwrap()
        .build_calldata_from_export(&backend)
        .unwrap()
        .verify(&verifier)
        .await
        .unwrap();
    assert!(verified.outcome());
    assert_eq!(verified.public_signals().unwrap().as_slice(), &[fe(30)]);

    let forged = Scenario::forged("plonk-unrelated", unrelated_plonk());
    let Calldata::Plonk(args) = forged.calldata() else {
        panic!("expected plonk calldata");
    };
    assert_eq!(args.proof, PLONK_UNRELATED_BLOB);
    let rejected = forged.verify(&verifier).await.map(|v| v.outcome());
    assert_eq!(check_outcome(Expectation::Reject, &rejected), Ok(()));
}

#[tokio::test]
async fn verification_is_idempotent() {
    let circuit = MultiplierCircuit::multiplier3();
    for system in ProvingSystem::ALL {
        let mut backend = MockBackend::new(system);
        let (pk, vk) = backend.setup(&circuit, "0001");
        let verifier = zkcall_harness::suite::DeployedVerifier::deploy(&vk).unwrap();
        let built = Scenario::bind("idempotent", system, abc())
            .compute_witness(&circuit)
            .await
            .unwrap()
            .generate_proof(&backend, circuit.artifact(), &pk)
            .await
            .unwrap()
            .build_calldata()
            .unwrap();

        let first = verifier.verify_proof(built.calldata()).await.unwrap();
        let second = verifier.verify_proof(built.calldata()).await.unwrap();
        assert_eq!(first, second);
        let verified = built.verify(&verifier).await.unwrap();
        verified.recheck(&verifier).await.unwrap();
    }
}

#[tokio::test]
async fn verifiers_for_different_circuits_do_not_cross_accept() {
    let mut backend = MockBackend::new(ProvingSystem::Plonk);
    let hello = MultiplierCircuit::hello_world();
    let mul3 = MultiplierCircuit::multiplier3();
    let (pk, _) = backend.setup(&hello, "0001");
    let (_, other_vk) = backend.setup(&mul3, "0001");
    let other = MockPlonkVerifier::deploy(&other_vk).unwrap();

    let verified = Scenario::bind("cross", ProvingSystem::Plonk, ab())
        .compute_witness(&hello)
        .await
        .unwrap()
        .generate_proof(&backend, hello.artifact(), &pk)
        .await
        .unwrap()
        .build_calldata()
        .unwrap()
        .verify(&other)
        .await
        .unwrap();
    assert!(!verified.outcome());
}

#[tokio::test]
async fn builtin_suite_passes_end_to_end() {
    let report = zkcall_harness::run_builtin(zkcall_harness::HarnessConfig::default()).await;
    let failures: Vec<_> = report.failures().map(|r| (&r.name, &r.failure)).collect();
    assert!(failures.is_empty(), "{failures:?}");
}
