//! # Calldata Subcommand
//!
//! Transcodes snarkjs artifacts into verifier arguments:
//!
//! ```text
//! zkcall calldata --system groth16 --proof proof.json --public public.json
//! zkcall calldata --system plonk --export calldata.txt --public public.json --abi
//! ```
//!
//! `--proof` takes a snarkjs `proof.json` for Groth16, or the proof blob as
//! `0x` hex (bare or as a JSON string) for PLONK. `--export` takes the
//! output of `snarkjs zkesc`. The result is the argument tuple as JSON, or
//! with `--abi` the full transaction input as hex.

use std::fs;
use std::path::{Path, PathBuf};

use alloy_primitives::hex;
use anyhow::Context;
use clap::Args;

use zkcall_core::PublicSignals;
use zkcall_zkp::{Calldata, Groth16Proof, PlonkProof, Proof, ProvingSystem};

/// Arguments for the calldata subcommand.
#[derive(Args, Debug)]
pub struct CalldataArgs {
    /// Proving system of the proof: groth16 or plonk.
    #[arg(long)]
    pub system: ProvingSystem,

    /// Proof file.
    #[arg(long, conflicts_with = "export", required_unless_present = "export")]
    pub proof: Option<PathBuf>,

    /// Calldata export string file.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Public signals file (`public.json`).
    #[arg(long)]
    pub public: PathBuf,

    /// Print ABI-encoded transaction input instead of JSON.
    #[arg(long)]
    pub abi: bool,
}

fn read(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn read_proof(system: ProvingSystem, path: &Path) -> anyhow::Result<Proof> {
    let text = read(path)?;
    match system {
        ProvingSystem::Groth16 => {
            let proof: Groth16Proof = serde_json::from_str(&text)
                .with_context(|| format!("parsing groth16 proof {}", path.display()))?;
            Ok(Proof::Groth16(proof))
        }
        ProvingSystem::Plonk => {
            let trimmed = text.trim();
            let hex_text = serde_json::from_str::<String>(trimmed)
                .unwrap_or_else(|_| trimmed.to_string());
            let digits = hex_text.strip_prefix("0x").unwrap_or(&hex_text);
            let bytes = hex::decode(digits)
                .with_context(|| format!("plonk proof {} is not hex", path.display()))?;
            Ok(Proof::Plonk(PlonkProof::new(bytes)))
        }
    }
}

/// Execute the calldata subcommand and return what it prints.
pub fn run_calldata(args: &CalldataArgs) -> anyhow::Result<String> {
    let signals: PublicSignals = serde_json::from_str(&read(&args.public)?)
        .with_context(|| format!("parsing public signals {}", args.public.display()))?;

    let calldata = match (&args.proof, &args.export) {
        (Some(path), _) => {
            let proof = read_proof(args.system, path)?;
            Calldata::from_proof(&proof, &signals)?
        }
        (None, Some(path)) => Calldata::from_export(args.system, read(path)?.trim(), &signals)?,
        (None, None) => anyhow::bail!("one of --proof or --export is required"),
    };
    tracing::info!(
        system = %calldata.system(),
        inputs = calldata.public_inputs().len(),
        "calldata built"
    );

    if args.abi {
        Ok(format!("0x{}", hex::encode(calldata.abi_encode()?)))
    } else {
        Ok(serde_json::to_string_pretty(&calldata)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file(contents: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    fn args(
        system: ProvingSystem,
        proof: Option<&NamedTempFile>,
        export: Option<&NamedTempFile>,
        public: &NamedTempFile,
    ) -> CalldataArgs {
        CalldataArgs {
            system,
            proof: proof.map(|f| f.path().to_path_buf()),
            export: export.map(|f| f.path().to_path_buf()),
            public: public.path().to_path_buf(),
            abi: false,
        }
    }

    const SNARKJS_PROOF: &str = r#"{
        "pi_a": ["1", "2", "1"],
        "pi_b": [["3", "4"], ["5", "6"], ["1", "0"]],
        "pi_c": ["7", "8", "1"],
        "protocol": "groth16",
        "curve": "bn128"
    }"#;

    #[test]
    fn groth16_proof_file_swaps_b_coefficients() {
        let proof = file(SNARKJS_PROOF);
        let public = file(r#"["6"]"#);
        let out = run_calldata(&args(ProvingSystem::Groth16, Some(&proof), None, &public)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["system"], "groth16");
        assert_eq!(json["calldata"]["a"], serde_json::json!(["1", "2"]));
        assert_eq!(json["calldata"]["b"], serde_json::json!([["4", "3"], ["6", "5"]]));
        assert_eq!(json["calldata"]["input"], serde_json::json!(["6"]));
    }

    #[test]
    fn plonk_export_file_keeps_first_segment() {
        let export = file("0xabcd,[\"0x000000000000000000000000000000000000000000000000000000000000001e\"]\n");
        let public = file(r#"["30"]"#);
        let out = run_calldata(&args(ProvingSystem::Plonk, None, Some(&export), &public)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["calldata"]["proof"], "0xabcd");
        assert_eq!(json["calldata"]["pubSignals"], serde_json::json!(["30"]));
    }

    #[test]
    fn abi_flag_prints_transaction_input() {
        let proof = file("\"0x0102\"");
        let public = file(r#"["30"]"#);
        let mut a = args(ProvingSystem::Plonk, Some(&proof), None, &public);
        a.abi = true;
        let out = run_calldata(&a).unwrap();
        assert!(out.starts_with("0x"));
        // selector + 2 head words + length + 1 padded word + length + 1 element
        assert_eq!(out.len(), 2 + 2 * (4 + 32 * 6));
    }

    #[test]
    fn malformed_inputs_are_errors() {
        let proof = file(r#"{"pi_a": ["1"], "pi_b": [], "pi_c": []}"#);
        let public = file(r#"["6"]"#);
        assert!(run_calldata(&args(ProvingSystem::Groth16, Some(&proof), None, &public)).is_err());

        let export = file("1,2,3");
        assert!(run_calldata(&args(ProvingSystem::Groth16, None, Some(&export), &public)).is_err());

        let bad_public = file("not json");
        let good_proof = file(SNARKJS_PROOF);
        assert!(run_calldata(&args(ProvingSystem::Groth16, Some(&good_proof), None, &bad_public)).is_err());
    }
}
