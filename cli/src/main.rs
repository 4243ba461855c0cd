//! # Main: CLI Entry Point
//!
//! Routes `bigmath` subcommands to the integer engine.
//!
//! ## Global Options
//!
//! - `--config`: JSON file with engine defaults (certainty, radix, seed).
//! - `--seed` / `BIGMATH_SEED`: generator seed for `random` and `prime`.
//! - `--radix`: output radix (overrides the config default).
//! - `--input-radix`: read operands in this radix instead of auto-detecting.
//!
//! Logging goes to stderr; `RUST_LOG` sets verbosity and `LOG_FORMAT=json`
//! switches to JSON lines.

mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bigmath", about = "Arbitrary-precision integer calculator")]
pub struct Cli {
    /// Path to a JSON config file with engine defaults
    #[arg(long, env = "BIGMATH_CONFIG")]
    config: Option<PathBuf>,

    /// Generator seed (defaults to config, then the clock)
    #[arg(long, env = "BIGMATH_SEED")]
    seed: Option<u64>,

    /// Radix for printed results (2..=36)
    #[arg(long)]
    radix: Option<u32>,

    /// Radix for reading operands; prefixes are auto-detected when unset
    #[arg(long)]
    input_radix: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Apply a binary operator: calc <a> <op> <b>
    Calc {
        #[arg(allow_hyphen_values = true)]
        left: String,
        op: Op,
        #[arg(allow_hyphen_values = true)]
        right: String,
    },
    /// Modular exponentiation base^exp mod modulus
    Modpow {
        #[arg(allow_hyphen_values = true)]
        base: String,
        #[arg(allow_hyphen_values = true)]
        exponent: String,
        #[arg(allow_hyphen_values = true)]
        modulus: String,
    },
    /// Modular inverse of value mod modulus
    Modinv {
        #[arg(allow_hyphen_values = true)]
        value: String,
        #[arg(allow_hyphen_values = true)]
        modulus: String,
    },
    /// Print a value in another radix
    Convert {
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Target radix (2..=36)
        #[arg(long)]
        to: u32,
    },
    /// Miller-Rabin probable-prime test
    IsPrime {
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Certainty (defaults to config)
        #[arg(long)]
        certainty: Option<i32>,
    },
    /// Smallest probable prime above a value
    NextPrime {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Uniform random value with the given number of bits
    Random {
        #[arg(long)]
        bits: usize,
    },
    /// Random probable prime with the given number of bits
    Prime {
        #[arg(long)]
        bits: usize,
        /// Certainty (defaults to config)
        #[arg(long)]
        certainty: Option<i32>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Mod,
    Pow,
    Gcd,
    And,
    Or,
    Xor,
    Andnot,
    Shl,
    Shr,
}

fn main() -> Result<()> {
    // Initialize structured logging: LOG_FORMAT=json for machine consumption, human-readable otherwise
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    let cli = Cli::parse();
    let output = cli::run(&cli)?;
    println!("{}", output);
    Ok(())
}
