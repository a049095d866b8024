//! # Field Element Codec
//!
//! `FieldElement` is an element of the BN254 scalar field, the field every
//! circom/snarkjs witness and public signal lives in.
//!
//! ## Invariant
//!
//! The inner word is always in `[0, p)`. There is no way to construct a
//! `FieldElement` without reduction, so two elements are equal exactly when
//! their words are equal.
//!
//! ## Text Forms
//!
//! - `to_decimal_string` / `from_decimal_str` are the transport form used
//!   by snarkjs JSON files and verifier arguments.
//! - `from_integer_literal` additionally accepts `0x` hex and a leading
//!   `-`, matching what JavaScript `BigInt(...)` accepts from calldata
//!   export strings.
//!
//! Inputs of any length are accepted; digits are folded in modulo `p`, so a
//! literal wider than 256 bits still reduces correctly.

use std::fmt;
use std::ops::{Add, Mul, Neg};
use std::str::FromStr;

use alloy_primitives::{hex, U256};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::FormatError;

/// The BN254 scalar field modulus
/// `21888242871839275222246405745257275088548364400416034343698204186575808495617`.
pub const FIELD_MODULUS: U256 = U256::from_limbs([
    0x43e1_f593_f000_0001,
    0x2833_e848_79b9_7091,
    0xb850_45b6_8181_585d,
    0x3064_4e72_e131_a029,
]);

/// An element of the BN254 scalar field, always reduced into `[0, p)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FieldElement(U256);

impl FieldElement {
    /// The additive identity.
    pub const ZERO: Self = Self(U256::ZERO);

    /// The multiplicative identity; also witness index 0.
    pub const ONE: Self = Self(U256::from_limbs([1, 0, 0, 0]));

    /// Reduce an arbitrary 256-bit word into the field.
    pub fn reduce(value: U256) -> Self {
        Self(value.reduce_mod(FIELD_MODULUS))
    }

    /// Reduce a signed magnitude: `-m` maps to `p - (m mod p)`.
    pub fn reduce_signed(negative: bool, magnitude: U256) -> Self {
        let reduced = Self::reduce(magnitude);
        if negative {
            -reduced
        } else {
            reduced
        }
    }

    /// Returns the element only if `value` is already canonical (`< p`).
    pub fn from_canonical(value: U256) -> Option<Self> {
        (value < FIELD_MODULUS).then_some(Self(value))
    }

    /// Interpret big-endian bytes of any length as an integer and reduce it.
    pub fn from_be_bytes_mod_order(bytes: &[u8]) -> Self {
        let radix = U256::from(256u64);
        let acc = bytes.iter().fold(U256::ZERO, |acc, b| {
            acc.mul_mod(radix, FIELD_MODULUS)
                .add_mod(U256::from(u64::from(*b)), FIELD_MODULUS)
        });
        Self(acc)
    }

    /// Parse an unsigned decimal string and reduce it.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError`] if the string is empty or contains anything
    /// other than ASCII digits.
    pub fn from_decimal_str(s: &str) -> Result<Self, FormatError> {
        fold_digits(s, s, 10).map(Self)
    }

    /// Parse an integer literal: optional `-`, then decimal digits or a
    /// `0x`/`0X` prefixed hex string.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError`] if no digits follow the sign/prefix or a
    /// character is not a digit of the detected radix.
    pub fn from_integer_literal(s: &str) -> Result<Self, FormatError> {
        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let value = match body
            .strip_prefix("0x")
            .or_else(|| body.strip_prefix("0X"))
        {
            Some(hex_digits) => fold_digits(s, hex_digits, 16)?,
            None => fold_digits(s, body, 10)?,
        };
        let element = Self(value);
        Ok(if negative { -element } else { element })
    }

    /// Decimal representation without leading zeros.
    pub fn to_decimal_string(&self) -> String {
        self.0.to_string()
    }

    /// `0x`-prefixed, 64-digit zero-padded hex representation.
    pub fn to_hex_word(&self) -> String {
        format!("0x{}", hex::encode(self.to_be_bytes()))
    }

    /// Big-endian 32-byte encoding, as used for an EVM `uint256` word.
    pub fn to_be_bytes(&self) -> [u8; 32] {
        self.0.to_be_bytes::<32>()
    }

    /// The reduced value as a 256-bit word.
    pub fn as_u256(&self) -> U256 {
        self.0
    }

    /// Whether this is the additive identity.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

fn fold_digits(original: &str, digits: &str, radix: u32) -> Result<U256, FormatError> {
    if digits.is_empty() {
        return Err(FormatError::new(original, "no digits"));
    }
    let base = U256::from(u64::from(radix));
    let mut acc = U256::ZERO;
    for c in digits.chars() {
        let d = c
            .to_digit(radix)
            .ok_or_else(|| FormatError::new(original, "invalid digit"))?;
        acc = acc
            .mul_mod(base, FIELD_MODULUS)
            .add_mod(U256::from(u64::from(d)), FIELD_MODULUS);
    }
    Ok(acc)
}

impl From<u64> for FieldElement {
    fn from(value: u64) -> Self {
        Self::reduce(U256::from(value))
    }
}

impl From<i64> for FieldElement {
    fn from(value: i64) -> Self {
        Self::reduce_signed(value < 0, U256::from(value.unsigned_abs()))
    }
}

impl From<U256> for FieldElement {
    fn from(value: U256) -> Self {
        Self::reduce(value)
    }
}

impl From<FieldElement> for U256 {
    fn from(value: FieldElement) -> Self {
        value.0
    }
}

impl Add for FieldElement {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.add_mod(rhs.0, FIELD_MODULUS))
    }
}

impl Mul for FieldElement {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self(self.0.mul_mod(rhs.0, FIELD_MODULUS))
    }
}

impl Neg for FieldElement {
    type Output = Self;

    fn neg(self) -> Self {
        if self.0.is_zero() {
            self
        } else {
            Self(FIELD_MODULUS - self.0)
        }
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FieldElement {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_integer_literal(s)
    }
}

impl Serialize for FieldElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_decimal_string())
    }
}

impl<'de> Deserialize<'de> for FieldElement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // snarkjs writes strings; hand-written input files often use numbers.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Unsigned(u64),
            Signed(i64),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Text(s) => Self::from_integer_literal(&s).map_err(serde::de::Error::custom),
            Repr::Unsigned(n) => Ok(Self::from(n)),
            Repr::Signed(n) => Ok(Self::from(n)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P_DECIMAL: &str =
        "21888242871839275222246405745257275088548364400416034343698204186575808495617";

    #[test]
    fn modulus_matches_decimal_constant() {
        assert_eq!(FIELD_MODULUS.to_string(), P_DECIMAL);
    }

    #[test]
    fn modulus_reduces_to_zero() {
        assert_eq!(FieldElement::from_decimal_str(P_DECIMAL).unwrap(), FieldElement::ZERO);
        assert_eq!(FieldElement::reduce(FIELD_MODULUS), FieldElement::ZERO);
    }

    #[test]
    fn literal_wider_than_256_bits_reduces() {
        // 10p + 7
        let literal = format!("{P_DECIMAL}7");
        assert_eq!(
            FieldElement::from_decimal_str(&literal).unwrap(),
            FieldElement::from(7u64)
        );
    }

    #[test]
    fn p_minus_one_is_canonical() {
        let p_minus_one = FIELD_MODULUS - U256::from(1u64);
        let fe = FieldElement::from_canonical(p_minus_one).unwrap();
        assert_eq!(fe.as_u256(), p_minus_one);
        assert!(FieldElement::from_canonical(FIELD_MODULUS).is_none());
    }

    #[test]
    fn negative_literal_wraps() {
        let minus_one = FieldElement::from_integer_literal("-1").unwrap();
        assert_eq!(minus_one.as_u256(), FIELD_MODULUS - U256::from(1u64));
        assert_eq!(minus_one + FieldElement::ONE, FieldElement::ZERO);
        assert_eq!(FieldElement::from(-1i64), minus_one);
    }

    #[test]
    fn negative_zero_is_zero() {
        assert_eq!(FieldElement::from_integer_literal("-0").unwrap(), FieldElement::ZERO);
    }

    #[test]
    fn hex_literal_parses() {
        assert_eq!(
            FieldElement::from_integer_literal("0x1e").unwrap(),
            FieldElement::from(30u64)
        );
        assert_eq!(
            FieldElement::from_integer_literal(
                "0x30644e72e131a029b85045b68181585d2833e84879b9709143e1f593f0000001"
            )
            .unwrap(),
            FieldElement::ZERO
        );
    }

    #[test]
    fn decimal_rejects_hex_and_garbage() {
        assert!(FieldElement::from_decimal_str("0x10").is_err());
        assert!(FieldElement::from_decimal_str("").is_err());
        assert!(FieldElement::from_decimal_str("12a").is_err());
        assert!(FieldElement::from_decimal_str(" 12").is_err());
        let err = FieldElement::from_integer_literal("0x").unwrap_err();
        assert_eq!(err.input, "0x");
    }

    #[test]
    fn multiplication_is_modular() {
        let a = FieldElement::from(2u64);
        let b = FieldElement::from(3u64);
        let c = FieldElement::from(5u64);
        assert_eq!((a * b).to_decimal_string(), "6");
        assert_eq!((a * b * c).to_decimal_string(), "30");
        let minus_one = -FieldElement::ONE;
        assert_eq!(minus_one * minus_one, FieldElement::ONE);
    }

    #[test]
    fn hex_word_is_padded() {
        let w = FieldElement::from(6u64).to_hex_word();
        assert_eq!(w.len(), 66);
        assert!(w.ends_with("06"));
        assert!(w.starts_with("0x0000"));
    }

    #[test]
    fn bytes_mod_order_matches_decimal() {
        let bytes = FieldElement::from(0x0102u64).to_be_bytes();
        assert_eq!(FieldElement::from_be_bytes_mod_order(&bytes), FieldElement::from(258u64));
        let wide = [0xffu8; 40];
        let fe = FieldElement::from_be_bytes_mod_order(&wide);
        assert!(fe.as_u256() < FIELD_MODULUS);
    }

    #[test]
    fn serde_uses_decimal_strings() {
        let fe = FieldElement::from(30u64);
        assert_eq!(serde_json::to_string(&fe).unwrap(), "\"30\"");
        let from_str: FieldElement = serde_json::from_str("\"30\"").unwrap();
        let from_num: FieldElement = serde_json::from_str("30").unwrap();
        let from_neg: FieldElement = serde_json::from_str("-1").unwrap();
        assert_eq!(from_str, fe);
        assert_eq!(from_num, fe);
        assert_eq!(from_neg, -FieldElement::ONE);
        assert!(serde_json::from_str::<FieldElement>("\"thirty\"").is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn any_word() -> impl Strategy<Value = U256> {
        any::<[u64; 4]>().prop_map(U256::from_limbs)
    }

    proptest! {
        /// Decimal encoding round-trips for every field element.
        #[test]
        fn decimal_roundtrip(word in any_word()) {
            let fe = FieldElement::reduce(word);
            let back = FieldElement::from_decimal_str(&fe.to_decimal_string()).unwrap();
            prop_assert_eq!(back, fe);
        }

        /// Hex words round-trip through the literal parser.
        #[test]
        fn hex_word_roundtrip(word in any_word()) {
            let fe = FieldElement::reduce(word);
            prop_assert_eq!(FieldElement::from_integer_literal(&fe.to_hex_word()).unwrap(), fe);
        }

        /// Reduction is idempotent and lands in range.
        #[test]
        fn reduce_is_idempotent(word in any_word()) {
            let once = FieldElement::reduce(word);
            prop_assert!(once.as_u256() < FIELD_MODULUS);
            prop_assert_eq!(FieldElement::reduce(once.as_u256()), once);
        }

        /// Negation is an additive inverse.
        #[test]
        fn negation_cancels(word in any_word()) {
            let fe = FieldElement::reduce(word);
            prop_assert_eq!(fe + (-fe), FieldElement::ZERO);
        }
    }
}
