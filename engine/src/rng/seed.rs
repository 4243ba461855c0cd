//! Seed sources for time-based generator construction
//!
//! Two generators built in the same millisecond must not share a seed, so the
//! clock reading is mixed with a uniquifier that advances on every request.
//! The uniquifier lives in a source object owned by the host application
//! rather than in a hidden global.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Odd multiplier spreading consecutive uniquifier values across all 64 bits.
const UNIQUIFIER_SPREAD: u64 = 0x9E37_79B9_7F4A_7C15;

/// Supplies seeds for generators constructed without an explicit seed.
pub trait SeedSource {
    /// Produce the next seed. Successive calls should yield distinct values.
    fn next_seed(&self) -> u64;
}

/// Wall-clock seed source with an atomic uniquifier.
///
/// Safe to share across threads (`&SystemSeedSource` is `Sync`).
///
/// # Example
/// ```
/// use bigmath_core_rs::{Prng, SeedSource, SystemSeedSource};
///
/// let source = SystemSeedSource::new();
/// let a = source.next_seed();
/// let b = source.next_seed();
/// assert_ne!(a, b);
///
/// let mut rng = Prng::from_seed_source(&source);
/// let _ = rng.next_int();
/// ```
#[derive(Debug, Default)]
pub struct SystemSeedSource {
    uniquifier: AtomicU64,
}

impl SystemSeedSource {
    pub fn new() -> Self {
        Self {
            uniquifier: AtomicU64::new(0),
        }
    }

    /// Number of seeds handed out so far.
    pub fn issued(&self) -> u64 {
        self.uniquifier.load(Ordering::Relaxed)
    }
}

impl SeedSource for SystemSeedSource {
    fn next_seed(&self) -> u64 {
        let ticket = self.uniquifier.fetch_add(1, Ordering::Relaxed) + 1;
        // A clock before the epoch only loses the time component.
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        millis ^ ticket.wrapping_mul(UNIQUIFIER_SPREAD)
    }
}

/// Seed source that always returns the same seed.
///
/// Useful in tests and for replaying a run whose seed was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedSeedSource(pub u64);

impl SeedSource for FixedSeedSource {
    fn next_seed(&self) -> u64 {
        self.0
    }
}
