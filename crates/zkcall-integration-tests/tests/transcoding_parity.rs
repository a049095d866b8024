//! # Transcoding Parity
//!
//! The typed path and the export-string path must produce identical
//! verifier arguments, and both must be accepted by the verifier of the
//! setup that produced the proof.

use alloy_primitives::U256;
use proptest::prelude::*;

use zkcall_core::{FieldElement, InputAssignment, PublicSignals};
use zkcall_zkp::groth16::BASE_FIELD_MODULUS;
use zkcall_zkp::{
    export_calldata_string, Calldata, G1Point, G2Point, Groth16Proof, MockBackend,
    MultiplierCircuit, PlonkProof, Proof, ProverBackend, ProvingSystem, SnarkjsGroth16Proof,
};

#[tokio::test]
async fn backend_proofs_transcode_identically_on_both_paths() {
    let circuit = MultiplierCircuit::multiplier3();
    let inputs = InputAssignment::new()
        .with("a", 2u64)
        .with("b", 3u64)
        .with("c", 5u64);
    for system in ProvingSystem::ALL {
        let mut backend = MockBackend::new(system);
        let (pk, _) = backend.setup(&circuit, "0001");
        let out = backend
            .full_prove(&inputs, circuit.artifact(), &pk)
            .await
            .unwrap();
        let typed = Calldata::from_proof(&out.proof, &out.public_signals).unwrap();
        let export = backend.export_calldata(&out.proof, &out.public_signals).unwrap();
        let parsed = Calldata::from_export(system, &export, &out.public_signals).unwrap();
        assert_eq!(typed, parsed, "{system}");
        assert_eq!(
            typed.abi_encode().unwrap(),
            parsed.abi_encode().unwrap(),
            "{system}"
        );
    }
}

#[test]
fn snarkjs_json_and_export_agree_on_b_order() {
    let json = serde_json::json!({
        "pi_a": ["11", "12", "1"],
        "pi_b": [["21", "22"], ["23", "24"], ["1", "0"]],
        "pi_c": ["31", "32", "1"],
        "protocol": "groth16",
        "curve": "bn128"
    });
    let proof: Groth16Proof = serde_json::from_value(json.clone()).unwrap();
    let signals = PublicSignals::new(vec![FieldElement::from(6u64)]);
    let export = export_calldata_string(&Proof::Groth16(proof), &signals);
    let Calldata::Groth16(args) = Calldata::from_export(ProvingSystem::Groth16, &export, &signals).unwrap() else {
        panic!("expected groth16 calldata");
    };
    let w = |n: u64| U256::from(n);
    assert_eq!(args.b, [[w(22), w(21)], [w(24), w(23)]]);

    let back = serde_json::to_value(SnarkjsGroth16Proof::from(proof)).unwrap();
    assert_eq!(back, json);
}

#[test]
fn backend_rejects_exporting_foreign_proofs() {
    let backend = MockBackend::new(ProvingSystem::Groth16);
    let plonk = Proof::Plonk(PlonkProof::new(vec![1, 2, 3]));
    assert!(backend.export_calldata(&plonk, &PublicSignals::default()).is_err());
}

fn coordinate() -> impl Strategy<Value = U256> {
    any::<[u8; 32]>().prop_map(|bytes| U256::from_be_bytes(bytes).reduce_mod(BASE_FIELD_MODULUS))
}

fn groth16_proof() -> impl Strategy<Value = Groth16Proof> {
    proptest::collection::vec(coordinate(), 8).prop_map(|w| Groth16Proof {
        a: G1Point { x: w[0], y: w[1] },
        b: G2Point {
            x: [w[2], w[3]],
            y: [w[4], w[5]],
        },
        c: G1Point { x: w[6], y: w[7] },
    })
}

fn signals() -> impl Strategy<Value = PublicSignals> {
    proptest::collection::vec(any::<[u8; 32]>(), 0..4).prop_map(|words| {
        words
            .iter()
            .map(|w| FieldElement::from_be_bytes_mod_order(w))
            .collect()
    })
}

proptest! {
    /// Any Groth16 proof transcodes to the same tuple on both paths.
    #[test]
    fn groth16_paths_agree(proof in groth16_proof(), signals in signals()) {
        let proof = Proof::Groth16(proof);
        let typed = Calldata::from_proof(&proof, &signals).unwrap();
        let export = export_calldata_string(&proof, &signals);
        let parsed = Calldata::from_export(ProvingSystem::Groth16, &export, &signals).unwrap();
        prop_assert_eq!(typed, parsed);
    }

    /// Any non-empty PLONK blob survives the export path verbatim.
    #[test]
    fn plonk_paths_agree(blob in proptest::collection::vec(any::<u8>(), 1..256), signals in signals()) {
        let proof = Proof::Plonk(PlonkProof::new(blob));
        let typed = Calldata::from_proof(&proof, &signals).unwrap();
        let export = export_calldata_string(&proof, &signals);
        let parsed = Calldata::from_export(ProvingSystem::Plonk, &export, &signals).unwrap();
        prop_assert_eq!(typed, parsed);
    }
}
