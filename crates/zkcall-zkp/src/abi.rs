//! # EVM ABI Encoding
//!
//! Turns a calldata tuple into the exact transaction input a verifier
//! contract receives: the 4-byte function selector followed by the
//! ABI-encoded arguments.
//!
//! ## Groth16
//!
//! Every argument is a static `uint256` array, so the encoding is the
//! selector followed by `8 + n` 32-byte words in argument order. The
//! selector depends on `n` because `uint256[n]` is part of the signature.
//!
//! ## PLONK
//!
//! `bytes` and `uint256[]` are dynamic: the head holds two offsets and the
//! tail holds each value's length and contents. The encoding is produced by
//! `alloy-sol-types` from the Solidity declaration.

use alloy_primitives::keccak256;
use alloy_sol_types::SolCall;

use crate::groth16::Groth16Calldata;
use crate::plonk::PlonkCalldata;
use crate::transcode::{Calldata, TranscodeError};

mod plonk_abi {
    alloy_sol_types::sol! {
        function verifyProof(bytes proof, uint256[] pubSignals) external view returns (bool);
    }
}

/// Canonical signature of the PLONK verifier entry point.
pub const PLONK_SIGNATURE: &str = "verifyProof(bytes,uint256[])";

/// Canonical signature of a Groth16 verifier with `input_len` public inputs.
pub fn groth16_signature(input_len: usize) -> String {
    format!("verifyProof(uint256[2],uint256[2][2],uint256[2],uint256[{input_len}])")
}

/// First four bytes of the keccak-256 hash of a canonical signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

impl Groth16Calldata {
    /// Selector of the verifier this tuple fits.
    pub fn selector(&self) -> [u8; 4] {
        selector(&groth16_signature(self.input.len()))
    }

    /// Selector plus `8 + n` big-endian words.
    pub fn abi_encode(&self) -> Vec<u8> {
        let words = self.words();
        let mut out = Vec::with_capacity(4 + 32 * words.len());
        out.extend_from_slice(&self.selector());
        for word in words {
            out.extend_from_slice(&word.to_be_bytes::<32>());
        }
        out
    }
}

impl PlonkCalldata {
    /// Selector of `verifyProof(bytes,uint256[])`.
    pub fn selector(&self) -> [u8; 4] {
        plonk_abi::verifyProofCall::SELECTOR
    }

    /// Selector plus the dynamic encoding of `(bytes, uint256[])`.
    ///
    /// # Errors
    ///
    /// Returns [`TranscodeError::MalformedProof`] if the proof argument is
    /// not valid hex.
    pub fn abi_encode(&self) -> Result<Vec<u8>, TranscodeError> {
        let call = plonk_abi::verifyProofCall {
            proof: self.proof_bytes()?.into(),
            pubSignals: self
                .pub_signals
                .as_slice()
                .iter()
                .map(|s| s.as_u256())
                .collect(),
        };
        Ok(call.abi_encode())
    }
}

impl Calldata {
    /// Transaction input for the verifier entry point.
    pub fn abi_encode(&self) -> Result<Vec<u8>, TranscodeError> {
        match self {
            Calldata::Groth16(c) => Ok(c.abi_encode()),
            Calldata::Plonk(c) => c.abi_encode(),
        }
    }

    /// Canonical signature of the targeted entry point.
    pub fn signature(&self) -> String {
        match self {
            Calldata::Groth16(c) => groth16_signature(c.input.len()),
            Calldata::Plonk(_) => PLONK_SIGNATURE.to_string(),
        }
    }
}
