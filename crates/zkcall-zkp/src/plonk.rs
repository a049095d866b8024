//! # PLONK Proofs and Calldata
//!
//! The PLONK verifier takes the whole proof as one opaque `bytes` argument:
//!
//! ```text
//! verifyProof(bytes proof, uint256[] pubSignals)
//! ```
//!
//! zkcall never looks inside the blob. snarkjs exports PLONK calldata as
//! `0x<proof hex>,["0x..", ...]`; the first comma-delimited segment is the
//! proof argument, already hex-encoded, and is passed on verbatim. Public
//! signals are taken from the backend, not re-parsed from the export.

use alloy_primitives::{hex, Bytes};
use serde::{Deserialize, Serialize};

use zkcall_core::PublicSignals;

use crate::system::ProvingSystem;
use crate::transcode::{TranscodeError, Transcoder};

/// An opaque PLONK proof.
///
/// The JSON form is a `0x`-prefixed hex string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlonkProof {
    blob: Bytes,
}

impl PlonkProof {
    /// Wrap raw proof bytes.
    pub fn new(blob: impl Into<Bytes>) -> Self {
        Self { blob: blob.into() }
    }

    /// The proof bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.blob
    }

    /// `0x`-prefixed lowercase hex of the proof bytes.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.blob))
    }
}

/// Arguments for `verifyProof(bytes, uint256[])`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlonkCalldata {
    /// The proof argument, `0x`-prefixed hex, exactly as exported.
    pub proof: String,
    /// Public signals, passed through unchanged.
    #[serde(rename = "pubSignals")]
    pub pub_signals: PublicSignals,
}

impl PlonkCalldata {
    /// Take the proof argument from a snarkjs PLONK calldata export.
    ///
    /// Only the first comma-delimited segment is used; the rest of the
    /// export is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`TranscodeError::MalformedProof`] if that segment is not a
    /// `0x`-prefixed, even-length hex string.
    pub fn from_export_string(
        export: &str,
        signals: &PublicSignals,
    ) -> Result<Self, TranscodeError> {
        let segment = export.split(',').next().unwrap_or_default();
        check_proof_hex(segment)?;
        Ok(Self {
            proof: segment.to_string(),
            pub_signals: signals.clone(),
        })
    }

    /// Decode the proof argument into bytes.
    ///
    /// # Errors
    ///
    /// Returns [`TranscodeError::MalformedProof`] if the proof is not valid
    /// `0x`-prefixed hex.
    pub fn proof_bytes(&self) -> Result<Vec<u8>, TranscodeError> {
        check_proof_hex(&self.proof)
    }
}

fn check_proof_hex(segment: &str) -> Result<Vec<u8>, TranscodeError> {
    let digits = segment.strip_prefix("0x").ok_or_else(|| {
        TranscodeError::MalformedProof(format!(
            "plonk proof must start with 0x, got {:?}",
            truncate(segment)
        ))
    })?;
    hex::decode(digits).map_err(|e| {
        TranscodeError::MalformedProof(format!("plonk proof is not valid hex: {e}"))
    })
}

fn truncate(s: &str) -> &str {
    s.char_indices().nth(16).map_or(s, |(i, _)| &s[..i])
}

/// Transcoder for the PLONK verifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlonkTranscoder;

impl Transcoder for PlonkTranscoder {
    const SYSTEM: ProvingSystem = ProvingSystem::Plonk;
    type Proof = PlonkProof;
    type Calldata = PlonkCalldata;

    fn transcode(
        proof: &PlonkProof,
        signals: &PublicSignals,
    ) -> Result<PlonkCalldata, TranscodeError> {
        if proof.as_bytes().is_empty() {
            return Err(TranscodeError::MalformedProof("plonk proof is empty".into()));
        }
        Ok(PlonkCalldata {
            proof: proof.to_hex(),
            pub_signals: signals.clone(),
        })
    }
}
