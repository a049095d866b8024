//! # Mock Backend and Verifiers
//!
//! A deterministic stand-in for snarkjs and the generated verifier
//! contracts, used for fast scenario runs without a trusted setup.
//!
//! Proofs are SHA-256 expansions of a per-setup seed and the public
//! signals. They carry no zero-knowledge or soundness guarantees, but they
//! keep the properties the harness checks:
//!
//! - a proof verifies only against the setup that produced it and only
//!   with the public signals it was generated for;
//! - all-zero or unrelated proof material is rejected with `false`;
//! - an argument shape the deployed contract does not expose is a call
//!   failure, not a rejection.
//!
//! Groth16 proof words are reduced below the BN254 base field modulus so
//! they look like real affine coordinates. PLONK blobs are 25 words, the
//! length of a snarkjs PLONK proof.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use alloy_primitives::{hex, keccak256, Address, U256};
use sha2::{Digest, Sha256};

use zkcall_core::{InputAssignment, PublicSignals};

use crate::abi;
use crate::circuits::MultiplierCircuit;
use crate::groth16::{
    G1Point, G2Point, Groth16Proof, Groth16Transcoder, BASE_FIELD_MODULUS, PROOF_WORDS,
};
use crate::plonk::PlonkProof;
use crate::system::ProvingSystem;
use crate::traits::{
    ArtifactRef, BackendError, OnChainVerifier, ProofWithSignals, ProverBackend, ProvingKeyRef,
    VerificationCallError, VerifyingKeyRef,
};
use crate::transcode::{Calldata, Proof, Transcoder};

/// Number of 32-byte words in a mock PLONK proof.
pub const PLONK_PROOF_WORDS: usize = 25;

// ─── Keys ───────────────────────────────────────────────────────────

/// Verifying key produced by [`MockBackend::setup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockVerifyingKey {
    /// The system the key belongs to.
    pub system: ProvingSystem,
    /// Reference the backend resolves this key by.
    pub id: VerifyingKeyRef,
    /// The circuit the key was set up for.
    pub artifact: ArtifactRef,
    /// Number of public signals the verifier expects.
    pub public_outputs: usize,
    seed: [u8; 32],
}

impl MockVerifyingKey {
    /// Setup seed as hex, for logging.
    pub fn fingerprint(&self) -> String {
        hex::encode(&self.seed[..8])
    }

    /// The proof this key accepts for `signals`.
    pub fn expected_proof(&self, signals: &PublicSignals) -> Proof {
        match self.system {
            ProvingSystem::Groth16 => {
                let w: Vec<U256> = expand(&self.seed, b"groth16", signals, PROOF_WORDS)
                    .into_iter()
                    .map(|word| U256::from_be_bytes(word).reduce_mod(BASE_FIELD_MODULUS))
                    .collect();
                Proof::Groth16(Groth16Proof {
                    a: G1Point { x: w[0], y: w[1] },
                    b: G2Point {
                        x: [w[2], w[3]],
                        y: [w[4], w[5]],
                    },
                    c: G1Point { x: w[6], y: w[7] },
                })
            }
            ProvingSystem::Plonk => {
                let blob: Vec<u8> = expand(&self.seed, b"plonk", signals, PLONK_PROOF_WORDS)
                    .concat();
                Proof::Plonk(PlonkProof::new(blob))
            }
        }
    }
}

fn expand(seed: &[u8; 32], tag: &[u8], signals: &PublicSignals, words: usize) -> Vec<[u8; 32]> {
    (0..words as u32)
        .map(|index| {
            let mut hasher = Sha256::new();
            hasher.update(seed);
            hasher.update(tag);
            hasher.update(index.to_be_bytes());
            for signal in signals.as_slice() {
                hasher.update(signal.to_be_bytes());
            }
            hasher.finalize().into()
        })
        .collect()
}

// ─── Backend ────────────────────────────────────────────────────────

/// Deterministic prover backend for one proving system.
#[derive(Debug, Clone)]
pub struct MockBackend {
    system: ProvingSystem,
    circuits: BTreeMap<ArtifactRef, MultiplierCircuit>,
    proving_keys: BTreeMap<ProvingKeyRef, MockVerifyingKey>,
    verifying_keys: BTreeMap<VerifyingKeyRef, MockVerifyingKey>,
}

impl MockBackend {
    /// A backend with no circuits set up.
    pub fn new(system: ProvingSystem) -> Self {
        Self {
            system,
            circuits: BTreeMap::new(),
            proving_keys: BTreeMap::new(),
            verifying_keys: BTreeMap::new(),
        }
    }

    /// Run a setup for `circuit`, the analogue of `snarkjs <system> setup`.
    ///
    /// The same circuit and label always yield the same keys; a different
    /// label yields keys that reject each other's proofs.
    pub fn setup(
        &mut self,
        circuit: &MultiplierCircuit,
        label: &str,
    ) -> (ProvingKeyRef, MockVerifyingKey) {
        let artifact = circuit.artifact().clone();
        let mut hasher = Sha256::new();
        hasher.update(b"zkcall-mock-setup");
        hasher.update(self.system.name());
        hasher.update(artifact.as_str());
        hasher.update(label);
        let seed: [u8; 32] = hasher.finalize().into();

        let proving_key = ProvingKeyRef::new(format!("{artifact}_{label}.zkey"));
        let vk = MockVerifyingKey {
            system: self.system,
            id: VerifyingKeyRef::new(format!("{artifact}_{label}.vkey.json")),
            artifact: artifact.clone(),
            public_outputs: MultiplierCircuit::PUBLIC_OUTPUTS,
            seed,
        };
        tracing::debug!(
            system = %self.system,
            artifact = %artifact,
            key = %proving_key,
            fingerprint = %vk.fingerprint(),
            "mock setup complete"
        );

        self.circuits.insert(artifact, circuit.clone());
        self.proving_keys.insert(proving_key.clone(), vk.clone());
        self.verifying_keys.insert(vk.id.clone(), vk.clone());
        (proving_key, vk)
    }

    /// Look up a verifying key produced by [`setup`](Self::setup).
    pub fn verifying_key(&self, id: &VerifyingKeyRef) -> Option<&MockVerifyingKey> {
        self.verifying_keys.get(id)
    }
}

impl ProverBackend for MockBackend {
    fn system(&self) -> ProvingSystem {
        self.system
    }

    async fn full_prove(
        &self,
        input: &InputAssignment,
        artifact: &ArtifactRef,
        proving_key: &ProvingKeyRef,
    ) -> Result<ProofWithSignals, BackendError> {
        let circuit = self
            .circuits
            .get(artifact)
            .ok_or_else(|| BackendError::UnknownArtifact(artifact.clone()))?;
        let key = self
            .proving_keys
            .get(proving_key)
            .ok_or_else(|| BackendError::UnknownKey(proving_key.to_string()))?;
        if &key.artifact != artifact {
            return Err(BackendError::KeyMismatch {
                key: proving_key.clone(),
                artifact: artifact.clone(),
            });
        }

        let witness = circuit.evaluate(input)?;
        let public_signals = witness.public_signals(key.public_outputs)?;
        Ok(ProofWithSignals {
            proof: key.expected_proof(&public_signals),
            public_signals,
        })
    }

    async fn verify(
        &self,
        verifying_key: &VerifyingKeyRef,
        signals: &PublicSignals,
        proof: &Proof,
    ) -> Result<bool, BackendError> {
        let vk = self
            .verifying_keys
            .get(verifying_key)
            .ok_or_else(|| BackendError::UnknownKey(verifying_key.to_string()))?;
        if proof.system() != vk.system {
            return Err(BackendError::SystemMismatch {
                expected: vk.system,
                actual: proof.system(),
            });
        }
        Ok(signals.len() == vk.public_outputs && *proof == vk.expected_proof(signals))
    }
}

// ─── Verifier Contracts ─────────────────────────────────────────────

static DEPLOY_NONCE: AtomicU64 = AtomicU64::new(0);

fn deployment_address(vk: &MockVerifyingKey) -> Address {
    let nonce = DEPLOY_NONCE.fetch_add(1, Ordering::Relaxed);
    let mut preimage = vk.seed.to_vec();
    preimage.extend_from_slice(&nonce.to_be_bytes());
    Address::from_slice(&keccak256(&preimage)[12..])
}

fn check_deployable(vk: &MockVerifyingKey, system: ProvingSystem) -> Result<(), BackendError> {
    if vk.system == system {
        Ok(())
    } else {
        Err(BackendError::SystemMismatch {
            expected: system,
            actual: vk.system,
        })
    }
}

/// Encodes the call and checks its selector against the deployed
/// signature, as the EVM dispatcher would.
fn dispatch(
    calldata: &Calldata,
    signature: &str,
    address: Address,
) -> Result<(), VerificationCallError> {
    let data = calldata.abi_encode()?;
    if data.get(..4) != Some(&abi::selector(signature)[..]) {
        return Err(VerificationCallError::Reverted(format!(
            "{address} has no function {}; it exposes {signature}",
            calldata.signature()
        )));
    }
    Ok(())
}

/// A deployed `Groth16Verifier` for one verifying key.
#[derive(Debug, Clone)]
pub struct MockGroth16Verifier {
    vk: MockVerifyingKey,
    address: Address,
}

impl MockGroth16Verifier {
    /// Deploy a verifier for `vk`.
    ///
    /// # Errors
    ///
    /// [`BackendError::SystemMismatch`] if `vk` is not a Groth16 key.
    pub fn deploy(vk: &MockVerifyingKey) -> Result<Self, BackendError> {
        check_deployable(vk, ProvingSystem::Groth16)?;
        let address = deployment_address(vk);
        tracing::debug!(%address, vk = %vk.id, "deployed groth16 verifier");
        Ok(Self {
            vk: vk.clone(),
            address,
        })
    }

    /// Contract address of this deployment.
    pub fn address(&self) -> Address {
        self.address
    }
}

impl OnChainVerifier for MockGroth16Verifier {
    fn system(&self) -> ProvingSystem {
        ProvingSystem::Groth16
    }

    async fn verify_proof(&self, calldata: &Calldata) -> Result<bool, VerificationCallError> {
        let signature = abi::groth16_signature(self.vk.public_outputs);
        dispatch(calldata, &signature, self.address)?;
        let Calldata::Groth16(args) = calldata else {
            return Err(VerificationCallError::Reverted("not a groth16 call".into()));
        };

        let signals = PublicSignals::new(args.input.clone());
        let accepted = match self.vk.expected_proof(&signals) {
            Proof::Groth16(expected) => {
                let expected = Groth16Transcoder::transcode(&expected, &signals)?;
                expected.a == args.a && expected.b == args.b && expected.c == args.c
            }
            Proof::Plonk(_) => false,
        };
        tracing::debug!(address = %self.address, accepted, "groth16 verifyProof");
        Ok(accepted)
    }
}

/// A deployed `PlonkVerifier` for one verifying key.
#[derive(Debug, Clone)]
pub struct MockPlonkVerifier {
    vk: MockVerifyingKey,
    address: Address,
}

impl MockPlonkVerifier {
    /// Deploy a verifier for `vk`.
    ///
    /// # Errors
    ///
    /// [`BackendError::SystemMismatch`] if `vk` is not a PLONK key.
    pub fn deploy(vk: &MockVerifyingKey) -> Result<Self, BackendError> {
        check_deployable(vk, ProvingSystem::Plonk)?;
        let address = deployment_address(vk);
        tracing::debug!(%address, vk = %vk.id, "deployed plonk verifier");
        Ok(Self {
            vk: vk.clone(),
            address,
        })
    }

    /// Contract address of this deployment.
    pub fn address(&self) -> Address {
        self.address
    }
}

impl OnChainVerifier for MockPlonkVerifier {
    fn system(&self) -> ProvingSystem {
        ProvingSystem::Plonk
    }

    async fn verify_proof(&self, calldata: &Calldata) -> Result<bool, VerificationCallError> {
        dispatch(calldata, abi::PLONK_SIGNATURE, self.address)?;
        let Calldata::Plonk(args) = calldata else {
            return Err(VerificationCallError::Reverted("not a plonk call".into()));
        };

        // A dynamic signal array of the wrong length is rejected, not reverted.
        let accepted = args.pub_signals.len() == self.vk.public_outputs
            && match self.vk.expected_proof(&args.pub_signals) {
                Proof::Plonk(expected) => args.proof_bytes()? == expected.as_bytes(),
                Proof::Groth16(_) => false,
            };
        tracing::debug!(address = %self.address, accepted, "plonk verifyProof");
        Ok(accepted)
    }
}
