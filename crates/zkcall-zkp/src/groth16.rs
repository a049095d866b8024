//! # Groth16 Proofs and Calldata
//!
//! Groth16 proofs are three BN254 curve points: `A` and `C` on G1, `B` on
//! G2. The Solidity verifier takes them as
//!
//! ```text
//! verifyProof(uint256[2] a, uint256[2][2] b, uint256[2] c, uint256[n] input)
//! ```
//!
//! ## Coordinate Order
//!
//! A G2 coordinate is an Fq2 element `c0 + c1·u`. snarkjs writes it to
//! `proof.json` as `[c0, c1]`, but the verifier's pairing precompile reads
//! `[c1, c0]`. [`G2Point`] stores the verifier order, and the swap happens
//! once, in the conversion from [`SnarkjsGroth16Proof`]. Getting this wrong
//! does not error: the verifier just rejects every proof.
//!
//! ## Coordinates Are Not Field Elements
//!
//! Point coordinates live in the base field Fq, whose modulus is larger than
//! the scalar field's. They are carried as raw 256-bit words and never
//! reduced modulo the scalar field; only the public inputs are
//! [`FieldElement`]s.

use alloy_primitives::U256;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use zkcall_core::{FieldElement, PublicSignals};

use crate::system::ProvingSystem;
use crate::transcode::{parse_word, TranscodeError, Transcoder};

/// The BN254 base field modulus
/// `21888242871839275222246405745257275088696311157297823662689037894645226208583`.
pub const BASE_FIELD_MODULUS: U256 = U256::from_limbs([
    0x3c20_8c16_d87c_fd47,
    0x9781_6a91_6871_ca8d,
    0xb850_45b6_8181_585d,
    0x3064_4e72_e131_a029,
]);

/// Number of proof words in Groth16 calldata: 2 (a) + 4 (b) + 2 (c).
pub const PROOF_WORDS: usize = 8;

/// An affine G1 point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct G1Point {
    /// x coordinate.
    pub x: U256,
    /// y coordinate.
    pub y: U256,
}

/// An affine G2 point with Fq2 coefficients in verifier order `[c1, c0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct G2Point {
    /// x coordinate, `[c1, c0]`.
    pub x: [U256; 2],
    /// y coordinate, `[c1, c0]`.
    pub y: [U256; 2],
}

/// A Groth16 proof.
///
/// The JSON form is the snarkjs `proof.json` layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SnarkjsGroth16Proof", into = "SnarkjsGroth16Proof")]
pub struct Groth16Proof {
    /// The `A` point.
    pub a: G1Point,
    /// The `B` point.
    pub b: G2Point,
    /// The `C` point.
    pub c: G1Point,
}

// ─── snarkjs proof.json ──────────────────────────────────────────────

/// A Groth16 proof exactly as snarkjs writes `proof.json`.
///
/// `pi_a` and `pi_c` are projective triples `[x, y, "1"]`; `pi_b` is
/// `[[x_c0, x_c1], [y_c0, y_c1], ["1", "0"]]`. All coordinates are decimal
/// strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnarkjsGroth16Proof {
    /// Projective `A`.
    pub pi_a: Vec<String>,
    /// Projective `B`, Fq2 coefficients in `[c0, c1]` order.
    pub pi_b: Vec<Vec<String>>,
    /// Projective `C`.
    pub pi_c: Vec<String>,
    /// Always `"groth16"`.
    #[serde(default = "default_protocol")]
    pub protocol: String,
    /// Always `"bn128"` for proofs zkcall handles.
    #[serde(default = "default_curve")]
    pub curve: String,
}

fn default_protocol() -> String {
    ProvingSystem::Groth16.name().to_string()
}

fn default_curve() -> String {
    "bn128".to_string()
}

fn coordinate(value: &str, what: &str) -> Result<U256, TranscodeError> {
    let word = parse_word(value)?;
    if word >= BASE_FIELD_MODULUS {
        return Err(TranscodeError::MalformedProof(format!(
            "{what} coordinate {value} is not below the base field modulus"
        )));
    }
    Ok(word)
}

fn g1_from_projective(coords: &[String], what: &str) -> Result<G1Point, TranscodeError> {
    match coords {
        [x, y] => Ok(G1Point {
            x: coordinate(x, what)?,
            y: coordinate(y, what)?,
        }),
        [x, y, z] if z == "1" => Ok(G1Point {
            x: coordinate(x, what)?,
            y: coordinate(y, what)?,
        }),
        [_, _, z] => Err(TranscodeError::MalformedProof(format!(
            "{what} is not affine (z = {z})"
        ))),
        _ => Err(TranscodeError::MalformedProof(format!(
            "{what} has {} coordinates, expected 3",
            coords.len()
        ))),
    }
}

fn fq2_swapped(pair: &[String], what: &str) -> Result<[U256; 2], TranscodeError> {
    match pair {
        [c0, c1] => Ok([coordinate(c1, what)?, coordinate(c0, what)?]),
        _ => Err(TranscodeError::MalformedProof(format!(
            "{what} has {} coefficients, expected 2",
            pair.len()
        ))),
    }
}

impl TryFrom<SnarkjsGroth16Proof> for Groth16Proof {
    type Error = TranscodeError;

    fn try_from(proof: SnarkjsGroth16Proof) -> Result<Self, Self::Error> {
        if proof.protocol != ProvingSystem::Groth16.name() {
            return Err(TranscodeError::MalformedProof(format!(
                "protocol is {:?}, expected \"groth16\"",
                proof.protocol
            )));
        }
        let b = match proof.pi_b.as_slice() {
            [x, y] => (x, y),
            [x, y, z] if z.len() == 2 && z[0] == "1" && z[1] == "0" => (x, y),
            [_, _, _] => {
                return Err(TranscodeError::MalformedProof("pi_b is not affine".into()))
            }
            other => {
                return Err(TranscodeError::MalformedProof(format!(
                    "pi_b has {} rows, expected 3",
                    other.len()
                )))
            }
        };
        Ok(Groth16Proof {
            a: g1_from_projective(&proof.pi_a, "pi_a")?,
            b: G2Point {
                x: fq2_swapped(b.0, "pi_b[0]")?,
                y: fq2_swapped(b.1, "pi_b[1]")?,
            },
            c: g1_from_projective(&proof.pi_c, "pi_c")?,
        })
    }
}

impl From<Groth16Proof> for SnarkjsGroth16Proof {
    fn from(proof: Groth16Proof) -> Self {
        let g1 = |p: G1Point| vec![p.x.to_string(), p.y.to_string(), "1".to_string()];
        // Back to snarkjs [c0, c1] order.
        let fq2 = |c: [U256; 2]| vec![c[1].to_string(), c[0].to_string()];
        SnarkjsGroth16Proof {
            pi_a: g1(proof.a),
            pi_b: vec![
                fq2(proof.b.x),
                fq2(proof.b.y),
                vec!["1".to_string(), "0".to_string()],
            ],
            pi_c: g1(proof.c),
            protocol: default_protocol(),
            curve: default_curve(),
        }
    }
}

// ─── Calldata ────────────────────────────────────────────────────────

/// Arguments for `verifyProof(uint256[2], uint256[2][2], uint256[2], uint256[n])`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Groth16Calldata {
    /// `[A.x, A.y]`.
    pub a: [U256; 2],
    /// `[[B.x.c1, B.x.c0], [B.y.c1, B.y.c0]]`, row-major.
    pub b: [[U256; 2]; 2],
    /// `[C.x, C.y]`.
    pub c: [U256; 2],
    /// Public inputs, one per public signal.
    pub input: Vec<FieldElement>,
}

impl Groth16Calldata {
    /// All-zero proof words with `input_len` zero inputs.
    ///
    /// Structurally valid for a verifier with `n = input_len`, but never a
    /// real proof.
    pub fn zeroed(input_len: usize) -> Self {
        Self {
            a: [U256::ZERO; 2],
            b: [[U256::ZERO; 2]; 2],
            c: [U256::ZERO; 2],
            input: vec![FieldElement::ZERO; input_len],
        }
    }

    /// Parse a snarkjs Groth16 calldata export string.
    ///
    /// Quotes, brackets and whitespace are stripped, the rest is split on
    /// commas and partitioned positionally: items 0–1 are `a`, 2–5 are `b`
    /// (row-major), 6–7 are `c`, and everything after is `input`.
    ///
    /// # Errors
    ///
    /// Returns [`TranscodeError::MalformedProof`] if fewer than eight items
    /// remain, and [`TranscodeError::Format`] if an item is not an integer,
    /// including an empty item anywhere but the end.
    pub fn from_export_string(export: &str) -> Result<Self, TranscodeError> {
        let cleaned: String = export
            .chars()
            .filter(|c| !matches!(c, '"' | '[' | ']') && !c.is_whitespace())
            .collect();
        let mut segments: Vec<&str> = cleaned.split(',').collect();
        // An empty trailing `[]` input array leaves one empty segment behind.
        // Any other empty item would shift every later position.
        if segments.last() == Some(&"") {
            segments.pop();
        }
        let items = segments
            .into_iter()
            .map(parse_word)
            .collect::<Result<Vec<_>, _>>()?;
        if items.len() < PROOF_WORDS {
            return Err(TranscodeError::MalformedProof(format!(
                "groth16 calldata has {} items, expected at least {PROOF_WORDS}",
                items.len()
            )));
        }
        Ok(Self {
            a: [items[0], items[1]],
            b: [[items[2], items[3]], [items[4], items[5]]],
            c: [items[6], items[7]],
            input: items[PROOF_WORDS..]
                .iter()
                .map(|w| FieldElement::reduce(*w))
                .collect(),
        })
    }

    /// Every argument word in ABI order: a, b (row-major), c, input.
    pub fn words(&self) -> Vec<U256> {
        let proof_words = [
            self.a[0], self.a[1], self.b[0][0], self.b[0][1], self.b[1][0], self.b[1][1],
            self.c[0], self.c[1],
        ];
        proof_words
            .into_iter()
            .chain(self.input.iter().map(FieldElement::as_u256))
            .collect()
    }
}

fn decimal_pair(words: &[U256; 2]) -> [String; 2] {
    [words[0].to_string(), words[1].to_string()]
}

impl Serialize for Groth16Calldata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut st = serializer.serialize_struct("Groth16Calldata", 4)?;
        st.serialize_field("a", &decimal_pair(&self.a))?;
        st.serialize_field("b", &[decimal_pair(&self.b[0]), decimal_pair(&self.b[1])])?;
        st.serialize_field("c", &decimal_pair(&self.c))?;
        st.serialize_field("input", &self.input)?;
        st.end()
    }
}

/// Transcoder for the Groth16 verifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct Groth16Transcoder;

impl Transcoder for Groth16Transcoder {
    const SYSTEM: ProvingSystem = ProvingSystem::Groth16;
    type Proof = Groth16Proof;
    type Calldata = Groth16Calldata;

    fn transcode(
        proof: &Groth16Proof,
        signals: &PublicSignals,
    ) -> Result<Groth16Calldata, TranscodeError> {
        Ok(Groth16Calldata {
            a: [proof.a.x, proof.a.y],
            b: [
                [proof.b.x[0], proof.b.x[1]],
                [proof.b.y[0], proof.b.y[1]],
            ],
            c: [proof.c.x, proof.c.y],
            input: signals.as_slice().to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(n: u64) -> U256 {
        U256::from(n)
    }

    fn snarkjs_fixture() -> SnarkjsGroth16Proof {
        serde_json::from_str(
            r#"{
                "pi_a": ["11", "12", "1"],
                "pi_b": [["21", "22"], ["23", "24"], ["1", "0"]],
                "pi_c": ["31", "32", "1"],
                "protocol": "groth16",
                "curve": "bn128"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn base_modulus_matches_decimal_constant() {
        assert_eq!(
            BASE_FIELD_MODULUS.to_string(),
            "21888242871839275222246405745257275088696311157297823662689037894645226208583"
        );
        assert!(BASE_FIELD_MODULUS > zkcall_core::FIELD_MODULUS);
    }

    #[test]
    fn snarkjs_import_swaps_fq2_coefficients() {
        let proof = Groth16Proof::try_from(snarkjs_fixture()).unwrap();
        assert_eq!(proof.a, G1Point { x: w(11), y: w(12) });
        assert_eq!(proof.b.x, [w(22), w(21)]);
        assert_eq!(proof.b.y, [w(24), w(23)]);
        assert_eq!(proof.c, G1Point { x: w(31), y: w(32) });
    }

    #[test]
    fn snarkjs_export_restores_original_layout() {
        let original = snarkjs_fixture();
        let proof = Groth16Proof::try_from(original.clone()).unwrap();
        assert_eq!(SnarkjsGroth16Proof::from(proof), original);
    }

    #[test]
    fn snarkjs_import_rejects_bad_shapes() {
        let mut wrong_protocol = snarkjs_fixture();
        wrong_protocol.protocol = "plonk".into();
        assert!(Groth16Proof::try_from(wrong_protocol).is_err());

        let mut projective = snarkjs_fixture();
        projective.pi_a[2] = "5".into();
        assert!(Groth16Proof::try_from(projective).is_err());

        let mut short_b = snarkjs_fixture();
        short_b.pi_b.truncate(1);
        assert!(Groth16Proof::try_from(short_b).is_err());

        let mut big = snarkjs_fixture();
        big.pi_c[0] = BASE_FIELD_MODULUS.to_string();
        assert!(matches!(
            Groth16Proof::try_from(big),
            Err(TranscodeError::MalformedProof(_))
        ));
    }

    #[test]
    fn typed_transcode_is_named_field_mapping() {
        let proof = Groth16Proof::try_from(snarkjs_fixture()).unwrap();
        let signals = PublicSignals::new(vec![FieldElement::from(6u64)]);
        let calldata = Groth16Transcoder::transcode(&proof, &signals).unwrap();
        assert_eq!(calldata.a, [w(11), w(12)]);
        assert_eq!(calldata.b, [[w(22), w(21)], [w(24), w(23)]]);
        assert_eq!(calldata.c, [w(31), w(32)]);
        assert_eq!(calldata.input, vec![FieldElement::from(6u64)]);
    }

    #[test]
    fn export_string_partitions_positionally() {
        let export = r#"["0x01", "0x02"],[["0x03", "0x04"],["0x05", "0x06"]],["0x07", "0x08"],["0x06","0x1e"]"#;
        let calldata = Groth16Calldata::from_export_string(export).unwrap();
        assert_eq!(calldata.a, [w(1), w(2)]);
        assert_eq!(calldata.b, [[w(3), w(4)], [w(5), w(6)]]);
        assert_eq!(calldata.c, [w(7), w(8)]);
        assert_eq!(
            calldata.input,
            vec![FieldElement::from(6u64), FieldElement::from(30u64)]
        );
    }

    #[test]
    fn export_string_without_inputs_is_allowed() {
        let export = r#"["1","2"],[["3","4"],["5","6"]],["7","8"],[]"#;
        let calldata = Groth16Calldata::from_export_string(export).unwrap();
        assert!(calldata.input.is_empty());
    }

    #[test]
    fn empty_item_inside_export_string_is_a_format_error() {
        for export in [
            r#"["1","2"],[["3",""],["5","6"]],["7","8"],["9","10"]"#,
            r#"["","2"],[["3","4"],["5","6"]],["7","8"],["9"]"#,
            r#"["1","2"],[["3","4"],["5","6"]],["7","8"],["","9"]"#,
        ] {
            assert!(
                matches!(
                    Groth16Calldata::from_export_string(export),
                    Err(TranscodeError::Format(_))
                ),
                "{export:?} should not parse"
            );
        }
    }

    #[test]
    fn trailing_empty_input_array_is_accepted() {
        let parsed =
            Groth16Calldata::from_export_string(r#"["1","2"],[["3","4"],["5","6"]],["7","8"],[]"#)
                .unwrap();
        assert_eq!(parsed.c, [w(7), w(8)]);
        assert!(parsed.input.is_empty());
    }

    #[test]
    fn short_export_string_is_malformed() {
        for export in ["", "[]", r#"["1","2"],[["3","4"],["5","6"]],["7"]"#] {
            assert!(
                matches!(
                    Groth16Calldata::from_export_string(export),
                    Err(TranscodeError::MalformedProof(_))
                ),
                "{export:?} should be malformed"
            );
        }
    }

    #[test]
    fn unparsable_item_is_format_error() {
        let export = r#"["1","2"],[["3","x"],["5","6"]],["7","8"],["9"]"#;
        assert!(matches!(
            Groth16Calldata::from_export_string(export),
            Err(TranscodeError::Format(_))
        ));
    }

    #[test]
    fn calldata_json_uses_decimal_strings() {
        let calldata = Groth16Calldata {
            a: [w(1), w(2)],
            b: [[w(3), w(4)], [w(5), w(6)]],
            c: [w(7), w(8)],
            input: vec![FieldElement::from(30u64)],
        };
        let json = serde_json::to_value(&calldata).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "a": ["1", "2"],
                "b": [["3", "4"], ["5", "6"]],
                "c": ["7", "8"],
                "input": ["30"]
            })
        );
    }

    #[test]
    fn words_follow_abi_order() {
        let calldata = Groth16Calldata {
            a: [w(1), w(2)],
            b: [[w(3), w(4)], [w(5), w(6)]],
            c: [w(7), w(8)],
            input: vec![FieldElement::from(9u64)],
        };
        let words: Vec<u64> = calldata.words().iter().map(|x| x.to::<u64>()).collect();
        assert_eq!(words, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn zeroed_has_requested_input_len() {
        let dummy = Groth16Calldata::zeroed(1);
        assert_eq!(dummy.input, vec![FieldElement::ZERO]);
        assert!(dummy.words().iter().all(|x| x.is_zero()));
    }
}
