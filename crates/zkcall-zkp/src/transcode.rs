//! # Calldata Transcoding
//!
//! Converts a proof and its public signals into the positional argument
//! tuple of the proving system's on-chain `verifyProof` entry point.
//!
//! ## Two Paths, One Result
//!
//! - **Typed path** ([`Transcoder::transcode`]): a named-field mapping from
//!   the typed proof to the tuple. Row/column order is spelled out in one
//!   function per system, so a swapped coordinate is visible in review.
//! - **Export-string path** ([`Calldata::from_export`]): parses the textual
//!   calldata a prover backend exports. This is the path for backends that
//!   only hand out text; both paths must produce identical tuples.
//!
//! ## Sealed Trait
//!
//! [`Transcoder`] is sealed: the set of proving systems is closed and each
//! one has exactly one transcoder, selected by [`ProvingSystem`] rather
//! than by inspecting calldata text.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use zkcall_core::{FormatError, PublicSignals};

use crate::groth16::{Groth16Calldata, Groth16Proof, Groth16Transcoder};
use crate::plonk::{PlonkCalldata, PlonkProof, PlonkTranscoder};
use crate::system::ProvingSystem;

/// Error while turning a proof into verifier calldata.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranscodeError {
    /// A numeric item did not parse.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// The proof does not have the fixed shape its system requires.
    #[error("malformed proof: {0}")]
    MalformedProof(String),

    /// The inputs embedded in exported calldata differ from the backend's
    /// public signals.
    #[error("calldata inputs {calldata:?} do not match public signals {signals:?}")]
    SignalMismatch {
        /// Inputs as found in the calldata.
        calldata: Vec<String>,
        /// Public signals reported by the backend.
        signals: Vec<String>,
    },
}

mod private {
    pub trait Sealed {}
    impl Sealed for crate::groth16::Groth16Transcoder {}
    impl Sealed for crate::plonk::PlonkTranscoder {}
}

/// Maps one proving system's typed proof onto its verifier argument tuple.
pub trait Transcoder: private::Sealed {
    /// The system this transcoder serves.
    const SYSTEM: ProvingSystem;

    /// The typed proof consumed.
    type Proof;

    /// The argument tuple produced.
    type Calldata;

    /// Build the verifier arguments for `proof` and its public signals.
    ///
    /// # Errors
    ///
    /// Returns [`TranscodeError::MalformedProof`] if the proof cannot be
    /// laid out in the verifier's fixed shape.
    fn transcode(
        proof: &Self::Proof,
        signals: &PublicSignals,
    ) -> Result<Self::Calldata, TranscodeError>;
}

/// A proof of either supported system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "system", content = "proof", rename_all = "lowercase")]
pub enum Proof {
    /// Groth16 curve points.
    Groth16(Groth16Proof),
    /// PLONK proof blob.
    Plonk(PlonkProof),
}

impl Proof {
    /// The system this proof belongs to.
    pub fn system(&self) -> ProvingSystem {
        match self {
            Proof::Groth16(_) => ProvingSystem::Groth16,
            Proof::Plonk(_) => ProvingSystem::Plonk,
        }
    }
}

/// Verifier arguments for either supported system.
///
/// Transient: built per verification call and dropped afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "system", content = "calldata", rename_all = "lowercase")]
pub enum Calldata {
    /// `(a, b, c, input)` for the Groth16 verifier.
    Groth16(Groth16Calldata),
    /// `(proof, pubSignals)` for the PLONK verifier.
    Plonk(PlonkCalldata),
}

impl Calldata {
    /// Transcode a typed proof with the transcoder for its own system.
    pub fn from_proof(proof: &Proof, signals: &PublicSignals) -> Result<Self, TranscodeError> {
        match proof {
            Proof::Groth16(p) => Groth16Transcoder::transcode(p, signals).map(Calldata::Groth16),
            Proof::Plonk(p) => PlonkTranscoder::transcode(p, signals).map(Calldata::Plonk),
        }
    }

    /// Transcode a backend's calldata export string.
    ///
    /// For Groth16 the export already embeds the public inputs; they must
    /// equal `signals`. For PLONK only the first comma-delimited segment
    /// (the proof blob) is taken and `signals` are passed through.
    ///
    /// # Errors
    ///
    /// Returns [`TranscodeError::MalformedProof`] for short or non-hex
    /// exports, [`TranscodeError::Format`] for unparsable items, and
    /// [`TranscodeError::SignalMismatch`] when Groth16 inputs disagree
    /// with `signals`.
    pub fn from_export(
        system: ProvingSystem,
        export: &str,
        signals: &PublicSignals,
    ) -> Result<Self, TranscodeError> {
        match system {
            ProvingSystem::Groth16 => {
                let calldata = Groth16Calldata::from_export_string(export)?;
                if calldata.input.as_slice() != signals.as_slice() {
                    return Err(TranscodeError::SignalMismatch {
                        calldata: calldata.input.iter().map(|f| f.to_decimal_string()).collect(),
                        signals: signals.to_decimal_strings(),
                    });
                }
                Ok(Calldata::Groth16(calldata))
            }
            ProvingSystem::Plonk => {
                PlonkCalldata::from_export_string(export, signals).map(Calldata::Plonk)
            }
        }
    }

    /// The system whose verifier these arguments target.
    pub fn system(&self) -> ProvingSystem {
        match self {
            Calldata::Groth16(_) => ProvingSystem::Groth16,
            Calldata::Plonk(_) => ProvingSystem::Plonk,
        }
    }

    /// The public inputs carried by the arguments.
    pub fn public_inputs(&self) -> &[zkcall_core::FieldElement] {
        match self {
            Calldata::Groth16(c) => &c.input,
            Calldata::Plonk(c) => c.pub_signals.as_slice(),
        }
    }
}

/// Parse one calldata item the way JavaScript `BigInt` does for unsigned
/// input: decimal, or hex with a `0x` prefix. Values must fit 256 bits.
pub(crate) fn parse_word(item: &str) -> Result<U256, FormatError> {
    let (digits, radix) = match item.strip_prefix("0x").or_else(|| item.strip_prefix("0X")) {
        Some(hex_digits) => (hex_digits, 16),
        None => (item, 10),
    };
    let well_formed = !digits.is_empty()
        && digits.chars().all(|c| c.is_digit(radix as u32));
    if !well_formed {
        return Err(FormatError {
            input: item.to_string(),
            reason: "not an unsigned integer",
        });
    }
    U256::from_str_radix(digits, radix).map_err(|_| FormatError {
        input: item.to_string(),
        reason: "does not fit in 256 bits",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groth16::{G1Point, G2Point};
    use zkcall_core::FieldElement;

    fn w(n: u64) -> U256 {
        U256::from(n)
    }

    fn sample_groth16() -> Groth16Proof {
        Groth16Proof {
            a: G1Point { x: w(1), y: w(2) },
            b: G2Point {
                x: [w(3), w(4)],
                y: [w(5), w(6)],
            },
            c: G1Point { x: w(7), y: w(8) },
        }
    }

    #[test]
    fn typed_calldata_targets_the_proofs_own_system() {
        let signals = PublicSignals::new(vec![FieldElement::from(6u64)]);
        let proofs = [
            Proof::Groth16(sample_groth16()),
            Proof::Plonk(PlonkProof::new(vec![0xab; 32])),
        ];
        for proof in proofs {
            let calldata = Calldata::from_proof(&proof, &signals).unwrap();
            assert_eq!(calldata.system(), proof.system());
            assert_eq!(calldata.public_inputs(), signals.as_slice());
        }
    }

    #[test]
    fn parse_word_accepts_decimal_and_hex() {
        assert_eq!(parse_word("30").unwrap(), w(30));
        assert_eq!(parse_word("0x1e").unwrap(), w(30));
        assert_eq!(parse_word("0X1E").unwrap(), w(30));
    }

    #[test]
    fn parse_word_rejects_garbage() {
        assert!(parse_word("").is_err());
        assert!(parse_word("0x").is_err());
        assert!(parse_word("-1").is_err());
        assert!(parse_word("12z").is_err());
        // 2^256
        let too_wide =
            "115792089237316195423570985008687907853269984665640564039457584007913129639936";
        assert_eq!(parse_word(too_wide).unwrap_err().reason, "does not fit in 256 bits");
    }

    #[test]
    fn from_proof_dispatches_on_variant() {
        let signals = PublicSignals::new(vec![FieldElement::from(6u64)]);
        let calldata = Calldata::from_proof(&Proof::Groth16(sample_groth16()), &signals).unwrap();
        assert_eq!(calldata.system(), ProvingSystem::Groth16);
        assert_eq!(calldata.public_inputs(), signals.as_slice());

        let plonk = Proof::Plonk(PlonkProof::new(vec![0xab; 64]));
        let calldata = Calldata::from_proof(&plonk, &signals).unwrap();
        assert_eq!(calldata.system(), ProvingSystem::Plonk);
        assert_eq!(calldata.public_inputs(), signals.as_slice());
    }

    #[test]
    fn groth16_export_inputs_must_match_signals() {
        let signals = PublicSignals::new(vec![FieldElement::from(6u64)]);
        let export = crate::export::groth16_export(&sample_groth16(), &signals);
        assert!(Calldata::from_export(ProvingSystem::Groth16, &export, &signals).is_ok());

        let other = PublicSignals::new(vec![FieldElement::from(7u64)]);
        let err = Calldata::from_export(ProvingSystem::Groth16, &export, &other).unwrap_err();
        assert!(matches!(err, TranscodeError::SignalMismatch { .. }));
    }

    #[test]
    fn proof_json_is_tagged_by_system() {
        let proof = Proof::Plonk(PlonkProof::new(vec![0x01, 0x02]));
        let json = serde_json::to_value(&proof).unwrap();
        assert_eq!(json["system"], "plonk");
        let back: Proof = serde_json::from_value(json).unwrap();
        assert_eq!(back, proof);
    }
}
