//! # zkcall-cli: zkcall Command-Line Interface
//!
//! ## Subcommands
//!
//! - `calldata`: Transcode a snarkjs proof or calldata export into
//!   verifier arguments (JSON or ABI hex)
//! - `field`: Reduce an integer into the BN254 scalar field
//! - `run`: Execute the built-in scenario suite against the mock backend
//!
//! ## Crate Policy
//!
//! - Argument parsing lives next to each handler; `main.rs` only dispatches.
//! - Handlers return their output as a string so they can be tested
//!   without capturing stdout.
//! - Logs go to stderr; stdout carries only command output.

pub mod calldata;
pub mod field;
pub mod run;
