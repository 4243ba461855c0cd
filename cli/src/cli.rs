//! Subcommand implementations
//!
//! Each command returns the text to print so `main` stays a thin shell.

use anyhow::{bail, Context, Result};
use tracing::info;

use bigmath_core_rs::{BigInteger, EngineConfig, SystemSeedSource};

use crate::{Cli, Commands, Op};

/// Effective settings after layering CLI flags over the config file.
struct Settings {
    config: EngineConfig,
    input_radix: Option<u32>,
}

impl Settings {
    fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => EngineConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => EngineConfig::default(),
        };
        if let Some(seed) = cli.seed {
            config.seed = Some(seed);
        }
        if let Some(radix) = cli.radix {
            config.default_radix = radix;
        }
        config.validate()?;
        if let Some(radix) = cli.input_radix {
            if !(2..=36).contains(&radix) {
                bail!("input radix {} outside 2..=36", radix);
            }
        }
        Ok(Self {
            config,
            input_radix: cli.input_radix,
        })
    }

    fn parse(&self, text: &str) -> Result<BigInteger> {
        let value = match self.input_radix {
            Some(radix) => BigInteger::parse_radix(text, radix),
            None => BigInteger::parse(text),
        };
        value.with_context(|| format!("invalid integer {:?}", text))
    }

    fn format(&self, value: &BigInteger) -> String {
        value.to_str_radix(self.config.default_radix)
    }

    fn certainty(&self, flag: Option<i32>) -> i32 {
        flag.unwrap_or(self.config.default_certainty)
    }
}

pub fn run(cli: &Cli) -> Result<String> {
    let settings = Settings::resolve(cli)?;

    match &cli.command {
        Commands::Calc { left, op, right } => {
            let a = settings.parse(left)?;
            let b = settings.parse(right)?;
            let result = calc(&a, *op, &b)?;
            Ok(settings.format(&result))
        }
        Commands::Modpow {
            base,
            exponent,
            modulus,
        } => {
            let result = settings
                .parse(base)?
                .mod_pow(&settings.parse(exponent)?, &settings.parse(modulus)?)?;
            Ok(settings.format(&result))
        }
        Commands::Modinv { value, modulus } => {
            let result = settings
                .parse(value)?
                .mod_inverse(&settings.parse(modulus)?)?;
            Ok(settings.format(&result))
        }
        Commands::Convert { value, to } => {
            if !(2..=36).contains(to) {
                bail!("target radix {} outside 2..=36", to);
            }
            Ok(settings.parse(value)?.to_str_radix(*to))
        }
        Commands::IsPrime { value, certainty } => {
            let verdict = settings
                .parse(value)?
                .is_probable_prime(settings.certainty(*certainty));
            Ok(if verdict { "probably prime" } else { "composite" }.to_string())
        }
        Commands::NextPrime { value } => {
            let result = settings.parse(value)?.next_probable_prime();
            Ok(settings.format(&result))
        }
        Commands::Random { bits } => {
            let mut rng = settings.config.prng(&SystemSeedSource::new());
            Ok(settings.format(&BigInteger::random(*bits, &mut rng)))
        }
        Commands::Prime { bits, certainty } => {
            let certainty = settings.certainty(*certainty);
            let mut rng = settings.config.prng(&SystemSeedSource::new());
            let prime = BigInteger::random_prime(*bits, certainty, &mut rng);
            info!(bits, certainty, "generated probable prime");
            Ok(settings.format(&prime))
        }
    }
}

fn shift_amount(value: &BigInteger) -> Result<usize> {
    let amount = u64::try_from(value).context("shift amount must be a nonnegative machine integer")?;
    usize::try_from(amount).context("shift amount too large")
}

fn calc(a: &BigInteger, op: Op, b: &BigInteger) -> Result<BigInteger> {
    let result = match op {
        Op::Add => a.add(b),
        Op::Sub => a.subtract(b),
        Op::Mul => a.multiply(b),
        Op::Div => a.divide(b)?,
        Op::Rem => a.remainder(b)?,
        Op::Mod => a.modulo(b)?,
        Op::Pow => {
            let exponent = u64::try_from(b).context("exponent must be a nonnegative machine integer")?;
            let exponent = u32::try_from(exponent).context("exponent too large")?;
            a.pow(exponent)
        }
        Op::Gcd => a.gcd(b),
        Op::And => a.and(b),
        Op::Or => a.or(b),
        Op::Xor => a.xor(b),
        Op::Andnot => a.and_not(b),
        Op::Shl => a.shift_left(shift_amount(b)?),
        Op::Shr => a.shift_right(shift_amount(b)?),
    };
    Ok(result)
}
