//! Deterministic random number generation
//!
//! Uses a 521-word feedback-shift register (M-sequence generator) for
//! reproducible draws. All randomness in the engine (random magnitudes,
//! Miller-Rabin witnesses) MUST go through this module.
//!
//! A [`Prng`] is single-owner mutable state. Sharing one instance across
//! threads requires external locking; giving each thread its own instance
//! is the expected pattern.

mod m521;
mod seed;

pub use m521::Prng;
pub use seed::{FixedSeedSource, SeedSource, SystemSeedSource};
