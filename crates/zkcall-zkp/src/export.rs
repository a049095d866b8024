//! Calldata export strings, in the textual layout snarkjs
//! `exportSolidityCallData` produces.
//!
//! - Groth16: `["0x..", "0x.."],[["0x..", "0x.."],["0x..", "0x.."]],["0x..", "0x.."],["0x..",...]`
//! - PLONK: `0x<proof>,["0x..",...]`
//!
//! Words are 64-digit zero-padded hex. These strings are what the
//! export-string transcoding path parses.

use alloy_primitives::{hex, U256};

use zkcall_core::PublicSignals;

use crate::groth16::Groth16Proof;
use crate::plonk::PlonkProof;
use crate::transcode::Proof;

fn p256(word: U256) -> String {
    format!("\"0x{}\"", hex::encode(word.to_be_bytes::<32>()))
}

fn inputs(signals: &PublicSignals) -> String {
    signals
        .as_slice()
        .iter()
        .map(|s| p256(s.as_u256()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Export string for a Groth16 proof.
///
/// `B` is written in verifier order, which [`Groth16Proof`] already holds.
pub fn groth16_export(proof: &Groth16Proof, signals: &PublicSignals) -> String {
    format!(
        "[{}, {}],[[{}, {}],[{}, {}]],[{}, {}],[{}]",
        p256(proof.a.x),
        p256(proof.a.y),
        p256(proof.b.x[0]),
        p256(proof.b.x[1]),
        p256(proof.b.y[0]),
        p256(proof.b.y[1]),
        p256(proof.c.x),
        p256(proof.c.y),
        inputs(signals),
    )
}

/// Export string for a PLONK proof.
pub fn plonk_export(proof: &PlonkProof, signals: &PublicSignals) -> String {
    format!("{},[{}]", proof.to_hex(), inputs(signals))
}

/// Export string for a proof of either system.
pub fn export_calldata_string(proof: &Proof, signals: &PublicSignals) -> String {
    match proof {
        Proof::Groth16(p) => groth16_export(p, signals),
        Proof::Plonk(p) => plonk_export(p, signals),
    }
}
