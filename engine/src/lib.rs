//! Bigmath Core - Rust Engine
//!
//! Arbitrary-precision integer arithmetic with a deterministic random number
//! generator feeding random magnitudes and primality witnesses.
//!
//! # Architecture
//!
//! - **rng**: 521-word feedback-shift generator and seed sources
//! - **integer**: sign-magnitude big integers (arithmetic, bitwise, radix,
//!   primality)
//! - **config**: serde-loadable engine defaults
//!
//! # Critical Invariants
//!
//! 1. Integer values are immutable and always canonical
//! 2. All randomness is deterministic for a given seed
//! 3. Failures are returned as typed errors, never as sentinel values

// Module declarations
pub mod config;
pub mod integer;
pub mod rng;

// Re-exports for convenience
pub use config::{ConfigError, EngineConfig};
pub use integer::{BigInteger, IntegerError, ParseIntegerError, Sign, DEFAULT_CERTAINTY};
pub use rng::{FixedSeedSource, Prng, SeedSource, SystemSeedSource};
