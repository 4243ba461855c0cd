//! Engine defaults loadable from JSON
//!
//! Every field has a default, so an empty object `{}` is a valid config.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::integer::DEFAULT_CERTAINTY;
use crate::rng::{Prng, SeedSource};

/// Errors raised while loading or validating an [`EngineConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Default radix {0} outside 2..=36")]
    InvalidRadix(u32),

    #[error("Default certainty must be positive, got {0}")]
    InvalidCertainty(i32),
}

/// Defaults applied by front ends built on the engine
///
/// # Example
/// ```
/// use bigmath_core_rs::EngineConfig;
///
/// let config = EngineConfig::from_json_str(r#"{"seed": 7}"#).unwrap();
/// assert_eq!(config.seed, Some(7));
/// assert_eq!(config.default_radix, 10);
/// assert_eq!(config.default_certainty, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Miller-Rabin certainty for primality commands
    pub default_certainty: i32,

    /// Radix for printing results
    pub default_radix: u32,

    /// Generator seed; `None` draws one from the seed source
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_certainty: DEFAULT_CERTAINTY,
            default_radix: 10,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=36).contains(&self.default_radix) {
            return Err(ConfigError::InvalidRadix(self.default_radix));
        }
        if self.default_certainty <= 0 {
            return Err(ConfigError::InvalidCertainty(self.default_certainty));
        }
        Ok(())
    }

    /// Generator from the configured seed, or from `source` when unset
    pub fn prng(&self, source: &dyn SeedSource) -> Prng {
        match self.seed {
            Some(seed) => Prng::new(seed),
            None => Prng::from_seed_source(source),
        }
    }
}
