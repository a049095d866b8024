//! # Multiplier Circuits
//!
//! The product circuits the scenario suite proves: `out <== a * b` and
//! `out <== a * b * c`. Each has one public output and private inputs.
//!
//! Witness layout follows circom's signal order:
//!
//! ```text
//! [1, out, in_0, in_1, ..., in_{k-1}, p_2, ..., p_{k-1}]
//! ```
//!
//! where `p_i = in_0 * ... * in_{i-1}` are the intermediate products a
//! chain of binary multiplication constraints introduces.

use serde::{Deserialize, Serialize};

use zkcall_core::{FieldElement, InputAssignment, Witness, WitnessError};

use crate::traits::{ArtifactRef, BackendError, WitnessCalculator};

/// An `n`-input product circuit with a single public output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiplierCircuit {
    artifact: ArtifactRef,
    inputs: Vec<String>,
}

impl MultiplierCircuit {
    /// Number of public outputs every multiplier circuit declares.
    pub const PUBLIC_OUTPUTS: usize = 1;

    /// A circuit identified by `artifact` multiplying the named inputs.
    pub fn new<I, S>(artifact: impl Into<String>, inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            artifact: ArtifactRef::new(artifact),
            inputs: inputs.into_iter().map(Into::into).collect(),
        }
    }

    /// `c <== a * b`.
    pub fn hello_world() -> Self {
        Self::new("multiplier2", ["a", "b"])
    }

    /// `d <== a * b * c`.
    pub fn multiplier3() -> Self {
        Self::new("multiplier3", ["a", "b", "c"])
    }

    /// The artifact reference the backend knows this circuit by.
    pub fn artifact(&self) -> &ArtifactRef {
        &self.artifact
    }

    /// Input signal names in declaration order.
    pub fn input_names(&self) -> &[String] {
        &self.inputs
    }

    /// Compute the full witness for `input`.
    ///
    /// # Errors
    ///
    /// [`WitnessError::UnknownInput`] if `input` assigns a signal the
    /// circuit does not declare, [`WitnessError::MissingInput`] if a
    /// declared signal is unassigned.
    pub fn evaluate(&self, input: &InputAssignment) -> Result<Witness, WitnessError> {
        if let Some((name, _)) = input.iter().find(|(name, _)| !self.declares(name)) {
            return Err(WitnessError::UnknownInput(name.to_string()));
        }
        let values = self
            .inputs
            .iter()
            .map(|name| input.require(name))
            .collect::<Result<Vec<_>, _>>()?;

        let mut intermediates = Vec::with_capacity(values.len().saturating_sub(2));
        let mut product = FieldElement::ONE;
        for (i, value) in values.iter().enumerate() {
            if i >= 2 {
                intermediates.push(product);
            }
            product = product * *value;
        }

        let mut witness = Vec::with_capacity(2 + values.len() + intermediates.len());
        witness.push(FieldElement::ONE);
        witness.push(product);
        witness.extend(values);
        witness.extend(intermediates);
        Witness::new(witness)
    }

    fn declares(&self, name: &str) -> bool {
        self.inputs.iter().any(|declared| declared == name)
    }
}

impl WitnessCalculator for MultiplierCircuit {
    async fn calculate_witness(&self, input: &InputAssignment) -> Result<Witness, BackendError> {
        Ok(self.evaluate(input)?)
    }
}
