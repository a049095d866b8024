//! # zkcall-core: Foundational Types
//!
//! This crate is the leaf of the zkcall crate graph. It defines the values
//! that flow between the witness evaluator, the prover backend, the
//! calldata transcoder, and the on-chain verifier.
//!
//! ## Key Design Principles
//!
//! 1. **Reduced field elements only.** `FieldElement` wraps a 256-bit word
//!    that is always in `[0, p)` for the BN254 scalar field modulus `p`.
//!    Every constructor reduces, so equality is plain word equality.
//!
//! 2. **Decimal strings at the boundary.** Field elements serialize as
//!    decimal strings, the representation snarkjs uses for `public.json`
//!    and verifier arguments.
//!
//! 3. **Witness shape is checked on construction.** A `Witness` always
//!    starts with the constant `1`; the public outputs follow it in
//!    declaration order.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `zkcall-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod field;
pub mod input;
pub mod witness;

// Re-export primary types for ergonomic imports.
pub use error::{FormatError, WitnessError};
pub use field::{FieldElement, FIELD_MODULUS};
pub use input::InputAssignment;
pub use witness::{PublicSignals, Witness};
