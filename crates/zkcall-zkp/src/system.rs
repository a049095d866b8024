//! # Proving Systems
//!
//! The closed set of proving systems zkcall can transcode for. Each variant
//! has exactly one transcoder and one on-chain entry-point signature:
//!
//! | System  | Proof shape              | Verifier entry point                                      |
//! |---------|--------------------------|-----------------------------------------------------------|
//! | Groth16 | A (G1), B (G2), C (G1)   | `verifyProof(uint256[2],uint256[2][2],uint256[2],uint256[n])` |
//! | PLONK   | opaque byte blob         | `verifyProof(bytes,uint256[])`                            |
//!
//! Adding a third system means adding a variant here; every `match` on
//! `ProvingSystem` then fails to compile until it is handled.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A proving system with its own proof layout and verifier signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProvingSystem {
    /// Pairing-based SNARK with a circuit-specific setup.
    Groth16,
    /// Universal-setup SNARK over KZG polynomial commitments.
    Plonk,
}

impl ProvingSystem {
    /// Every supported system, in a fixed order.
    pub const ALL: [ProvingSystem; 2] = [ProvingSystem::Groth16, ProvingSystem::Plonk];

    /// The snarkjs module name for this system.
    pub fn name(self) -> &'static str {
        match self {
            ProvingSystem::Groth16 => "groth16",
            ProvingSystem::Plonk => "plonk",
        }
    }
}

impl fmt::Display for ProvingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A proving-system name did not match any supported system.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown proving system {0:?} (expected \"groth16\" or \"plonk\")")]
pub struct UnknownSystemError(pub String);

impl FromStr for ProvingSystem {
    type Err = UnknownSystemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "groth16" => Ok(ProvingSystem::Groth16),
            "plonk" => Ok(ProvingSystem::Plonk),
            _ => Err(UnknownSystemError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for system in ProvingSystem::ALL {
            assert_eq!(system.name().parse::<ProvingSystem>().unwrap(), system);
        }
        assert_eq!("PLONK".parse::<ProvingSystem>().unwrap(), ProvingSystem::Plonk);
        assert!("fflonk".parse::<ProvingSystem>().is_err());
    }

    #[test]
    fn serde_uses_snarkjs_names() {
        assert_eq!(
            serde_json::to_string(&ProvingSystem::Groth16).unwrap(),
            "\"groth16\""
        );
        let p: ProvingSystem = serde_json::from_str("\"plonk\"").unwrap();
        assert_eq!(p, ProvingSystem::Plonk);
    }
}
