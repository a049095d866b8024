//! # Field Subcommand
//!
//! Reduces an integer literal into the BN254 scalar field:
//!
//! ```text
//! $ zkcall field -- -1
//! 21888242871839275222246405745257275088548364400416034343698204186575808495616
//! ```

use clap::Args;

use zkcall_core::FieldElement;

/// Arguments for the field subcommand.
#[derive(Args, Debug)]
pub struct FieldArgs {
    /// Decimal or `0x` hex integer, optionally negative.
    #[arg(allow_hyphen_values = true)]
    pub value: String,

    /// Print the 32-byte hex word instead of decimal.
    #[arg(long)]
    pub hex: bool,
}

/// Execute the field subcommand and return what it prints.
pub fn run_field(args: &FieldArgs) -> anyhow::Result<String> {
    let element = FieldElement::from_integer_literal(args.value.trim())?;
    Ok(if args.hex {
        element.to_hex_word()
    } else {
        element.to_decimal_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(value: &str, hex: bool) -> anyhow::Result<String> {
        run_field(&FieldArgs {
            value: value.to_string(),
            hex,
        })
    }

    #[test]
    fn reduces_out_of_range_values() {
        assert_eq!(field("30", false).unwrap(), "30");
        assert_eq!(
            field("-1", false).unwrap(),
            "21888242871839275222246405745257275088548364400416034343698204186575808495616"
        );
        assert_eq!(
            field("21888242871839275222246405745257275088548364400416034343698204186575808495618", false).unwrap(),
            "1"
        );
    }

    #[test]
    fn hex_output_is_a_full_word() {
        let word = field("0x1e", true).unwrap();
        assert_eq!(word.len(), 66);
        assert!(word.ends_with("1e"));
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(field("twelve", false).is_err());
    }
}
