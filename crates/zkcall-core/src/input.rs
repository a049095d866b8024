//! Circuit input assignments: named signals bound to field values.
//!
//! Values are reduced into the field when bound, the same way circom's
//! witness calculator treats its inputs. The JSON form is the snarkjs
//! `input.json` object (`{"a": "2", "b": "3"}`; numbers are accepted too).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::WitnessError;
use crate::field::FieldElement;

/// Mapping from input signal name to its assigned value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputAssignment(BTreeMap<String, FieldElement>);

impl InputAssignment {
    /// An empty assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldElement>) -> Self {
        self.insert(name, value);
        self
    }

    /// Bind `name` to `value`, replacing any previous binding.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldElement>) {
        self.0.insert(name.into(), value.into());
    }

    /// The value bound to `name`, if any.
    pub fn get(&self, name: &str) -> Option<&FieldElement> {
        self.0.get(name)
    }

    /// The value bound to `name`.
    ///
    /// # Errors
    ///
    /// Returns [`WitnessError::MissingInput`] if `name` is unbound.
    pub fn require(&self, name: &str) -> Result<FieldElement, WitnessError> {
        self.0
            .get(name)
            .copied()
            .ok_or_else(|| WitnessError::MissingInput(name.to_string()))
    }

    /// Iterate bindings in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldElement)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of bound signals.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, FieldElement)> for InputAssignment {
    fn from_iter<I: IntoIterator<Item = (S, FieldElement)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
