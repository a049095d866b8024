//! # Witnesses and Public Signals
//!
//! A [`Witness`] is the full assignment a witness evaluator produces for one
//! circuit input assignment. Its layout is fixed by circom:
//!
//! ```text
//! index 0        the constant 1
//! 1 ..= k        public outputs, in declaration order
//! k+1 ..         public inputs and internal signals
//! ```
//!
//! [`PublicSignals`] is what a prover backend returns next to a proof. For
//! the circuits driven here the public signals are exactly the witness
//! positions `1 ..= k`; [`PublicSignals::matches_witness`] checks that
//! equivalence element by element.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::error::WitnessError;
use crate::field::FieldElement;

/// The ordered values of every circuit signal for one input assignment.
///
/// Immutable after construction; the constructor guarantees index 0 is `1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Witness(Vec<FieldElement>);

impl Witness {
    /// Build a witness from evaluator output.
    ///
    /// # Errors
    ///
    /// Returns [`WitnessError::Empty`] for an empty vector and
    /// [`WitnessError::MissingConstant`] if index 0 is not `1`.
    pub fn new(values: Vec<FieldElement>) -> Result<Self, WitnessError> {
        match values.first() {
            None => Err(WitnessError::Empty),
            Some(first) if *first != FieldElement::ONE => Err(WitnessError::MissingConstant {
                found: first.to_decimal_string(),
            }),
            Some(_) => Ok(Self(values)),
        }
    }

    /// All witness values, constant included.
    pub fn values(&self) -> &[FieldElement] {
        &self.0
    }

    /// Number of signals, constant included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false: a witness holds at least the constant.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&FieldElement> {
        self.0.get(index)
    }

    /// The `count` public outputs following the constant.
    ///
    /// # Errors
    ///
    /// Returns [`WitnessError::TooShort`] if the witness does not hold
    /// `count` values after index 0.
    pub fn public_outputs(&self, count: usize) -> Result<&[FieldElement], WitnessError> {
        self.0.get(1..=count).ok_or(WitnessError::TooShort {
            needed: count,
            len: self.0.len(),
        })
    }

    /// The public outputs as an owned [`PublicSignals`].
    pub fn public_signals(&self, count: usize) -> Result<PublicSignals, WitnessError> {
        self.public_outputs(count)
            .map(|outputs| PublicSignals(outputs.to_vec()))
    }
}

impl Index<usize> for Witness {
    type Output = FieldElement;

    fn index(&self, index: usize) -> &FieldElement {
        &self.0[index]
    }
}

impl<'de> Deserialize<'de> for Witness {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = Vec::<FieldElement>::deserialize(deserializer)?;
        Self::new(values).map_err(serde::de::Error::custom)
    }
}

/// The public outputs a prover backend reports alongside a proof.
///
/// Serializes as a JSON array of decimal strings, the `public.json` format.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublicSignals(Vec<FieldElement>);

impl PublicSignals {
    /// Wrap an ordered list of public values.
    pub fn new(values: Vec<FieldElement>) -> Self {
        Self(values)
    }

    /// The signals in order.
    pub fn as_slice(&self) -> &[FieldElement] {
        &self.0
    }

    /// Number of public signals.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no public signals.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decimal-string form of every signal.
    pub fn to_decimal_strings(&self) -> Vec<String> {
        self.0.iter().map(FieldElement::to_decimal_string).collect()
    }

    /// Whether these signals equal the witness's public portion, in order.
    pub fn matches_witness(&self, witness: &Witness) -> bool {
        witness
            .public_outputs(self.0.len())
            .map(|outputs| outputs == self.0.as_slice())
            .unwrap_or(false)
    }

    /// Consume into the inner vector.
    pub fn into_inner(self) -> Vec<FieldElement> {
        self.0
    }
}

impl From<Vec<FieldElement>> for PublicSignals {
    fn from(values: Vec<FieldElement>) -> Self {
        Self(values)
    }
}

impl FromIterator<FieldElement> for PublicSignals {
    fn from_iter<I: IntoIterator<Item = FieldElement>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
