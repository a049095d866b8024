//! # zkcall CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use zkcall_harness::{HarnessConfig, LogFormat};

/// zkcall: proof-to-calldata transcoding for Groth16 and PLONK verifiers.
#[derive(Parser, Debug)]
#[command(name = "zkcall", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Build verifier calldata from snarkjs artifacts.
    Calldata(zkcall_cli::calldata::CalldataArgs),
    /// Reduce an integer into the scalar field.
    Field(zkcall_cli::field::FieldArgs),
    /// Run the built-in scenario suite.
    Run(zkcall_cli::run::RunArgs),
}

fn init_tracing(format: LogFormat) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_format = LogFormat::from_env();
    init_tracing(log_format.clone().unwrap_or_default());
    if let Err(e) = log_format {
        tracing::warn!(error = %e, "falling back to text logs");
    }

    match cli.command {
        Commands::Calldata(args) => {
            println!("{}", zkcall_cli::calldata::run_calldata(&args)?);
        }
        Commands::Field(args) => {
            println!("{}", zkcall_cli::field::run_field(&args)?);
        }
        Commands::Run(args) => {
            let config = HarnessConfig::from_env().context("loading harness configuration")?;
            let (output, passed) = zkcall_cli::run::run_suite(&args, config).await?;
            println!("{output}");
            if !passed {
                anyhow::bail!("scenario suite failed");
            }
        }
    }

    Ok(())
}
