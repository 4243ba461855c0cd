//! 521-word feedback-shift random number generator
//!
//! # Algorithm
//!
//! The state is a cyclic register of 521 32-bit words. Seeding runs a linear
//! congruential warm-up to fill the first 17 words, extends to the full
//! register with `w[i] = (w[i-17] << 23) ^ (w[i-16] >> 9) ^ w[i-1]`, then
//! mixes four times before first use. A mix XORs every word with the word
//! 32 positions behind it (wrapping for the first 32 words). Draws read the
//! register in order and re-mix once it is exhausted.
//!
//! # Determinism
//!
//! Same seed → same sequence, across every draw kind. The golden vectors in
//! `tests/test_rng_determinism.rs` pin the exact output stream.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use super::seed::SeedSource;

/// Number of words in the feedback register.
const STATE_LEN: usize = 521;

/// Feedback lag used by the mix step.
const LAG: usize = 32;

/// Words filled by the LCG warm-up before the recurrence takes over.
const WARMUP_LEN: usize = 17;

/// LCG multiplier of the warm-up.
const LCG_MULTIPLIER: u32 = 1_566_083_941;

/// Mixes applied after seeding, before the first draw.
const SEED_MIXES: usize = 4;

/// Deterministic generator over a 521-word feedback-shift register
///
/// # Example
/// ```
/// use bigmath_core_rs::Prng;
///
/// let mut rng = Prng::new(12345);
/// let word = rng.next_u32();
/// let die = rng.next_int_bounded(6); // [0, 6)
/// assert!(die < 6);
/// # let _ = word;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PrngSnapshot")]
pub struct Prng {
    /// Feedback register
    state: Vec<u32>,
    /// Index of the next word to hand out; `STATE_LEN` means "mix first"
    cursor: usize,
    /// Second Box-Muller deviate waiting to be returned
    cached_gaussian: Option<f64>,
}

/// Wire form of [`Prng`], validated before it becomes a live generator.
#[derive(Deserialize)]
struct PrngSnapshot {
    state: Vec<u32>,
    cursor: usize,
    cached_gaussian: Option<f64>,
}

impl TryFrom<PrngSnapshot> for Prng {
    type Error = String;

    fn try_from(snapshot: PrngSnapshot) -> Result<Self, Self::Error> {
        if snapshot.state.len() != STATE_LEN {
            return Err(format!(
                "generator state must hold {} words, found {}",
                STATE_LEN,
                snapshot.state.len()
            ));
        }
        if snapshot.cursor > STATE_LEN {
            return Err(format!(
                "generator cursor {} exceeds state length {}",
                snapshot.cursor, STATE_LEN
            ));
        }
        Ok(Self {
            state: snapshot.state,
            cursor: snapshot.cursor,
            cached_gaussian: snapshot.cached_gaussian,
        })
    }
}

impl Prng {
    /// Create a generator from an explicit seed
    ///
    /// Only 32 bits of seed material feed the warm-up; a 64-bit seed is
    /// folded by XORing its halves, so seeds below 2^32 are used verbatim.
    pub fn new(seed: u64) -> Self {
        let mut rng = Self {
            state: vec![0; STATE_LEN],
            cursor: STATE_LEN,
            cached_gaussian: None,
        };
        rng.set_seed(seed);
        rng
    }

    /// Create a generator seeded from `source` (typically the clock)
    pub fn from_seed_source(source: &dyn SeedSource) -> Self {
        Self::new(source.next_seed())
    }

    /// Reinitialize all state from `seed`
    ///
    /// Discards any cached Gaussian deviate.
    pub fn set_seed(&mut self, seed: u64) {
        let mut lcg = (seed as u32) ^ ((seed >> 32) as u32);
        let mut word: u32 = 0;
        for i in 0..WARMUP_LEN {
            for _ in 0..32 {
                lcg = lcg.wrapping_mul(LCG_MULTIPLIER).wrapping_add(1);
                word = (word >> 1) | (lcg & 0x8000_0000);
            }
            self.state[i] = word;
        }

        let s = &mut self.state;
        s[WARMUP_LEN - 1] = (s[WARMUP_LEN - 1] << 23) ^ (s[0] >> 9) ^ s[WARMUP_LEN - 2];
        for i in WARMUP_LEN..STATE_LEN {
            s[i] = (s[i - 17] << 23) ^ (s[i - 16] >> 9) ^ s[i - 1];
        }

        for _ in 0..SEED_MIXES {
            self.mix();
        }
        self.cursor = 0;
        self.cached_gaussian = None;
        tracing::trace!(seed, "generator seeded");
    }

    /// One pass of the feedback mix over the whole register.
    fn mix(&mut self) {
        let s = &mut self.state;
        for i in 0..LAG {
            s[i] ^= s[i + STATE_LEN - LAG];
        }
        for i in LAG..STATE_LEN {
            s[i] ^= s[i - LAG];
        }
    }

    /// Generate the next raw 32-bit word
    pub fn next_u32(&mut self) -> u32 {
        if self.cursor >= STATE_LEN {
            self.mix();
            self.cursor = 0;
            tracing::trace!(words = STATE_LEN, "generator register refilled");
        }
        let word = self.state[self.cursor];
        self.cursor += 1;
        word
    }

    /// Draw an unsigned value carrying `bits` bits of entropy
    ///
    /// Widths up to 32 take the high-order bits of one word. Wider requests
    /// compose the high part from a first draw and the low 32 bits from a
    /// second one. A zero-width draw still consumes one word and returns 0.
    ///
    /// # Panics
    /// Panics if `bits > 64`
    pub fn next_bits(&mut self, bits: u32) -> u64 {
        assert!(bits <= 64, "cannot draw more than 64 bits at once");
        if bits <= 32 {
            let word = self.next_u32();
            if bits == 0 {
                0
            } else {
                u64::from(word >> (32 - bits))
            }
        } else {
            let high = self.next_bits(bits - 32);
            let low = u64::from(self.next_u32());
            (high << 32) | low
        }
    }

    /// Generate the next 64-bit word (two draws)
    pub fn next_u64(&mut self) -> u64 {
        self.next_bits(64)
    }

    /// Generate a signed 32-bit value over the full range
    pub fn next_int(&mut self) -> i32 {
        self.next_u32() as i32
    }

    /// Generate a signed 64-bit value over the full range
    pub fn next_long(&mut self) -> i64 {
        self.next_u64() as i64
    }

    /// Generate a value uniformly distributed in `[0, bound)`
    ///
    /// Words falling in the final partial copy of `[0, bound)` inside the
    /// 32-bit range are rejected and redrawn, so every result is equally
    /// likely.
    ///
    /// # Panics
    /// Panics if `bound == 0`
    pub fn next_int_bounded(&mut self, bound: u32) -> u32 {
        assert!(bound > 0, "bound must be positive");
        let span = 1u64 << 32;
        let limit = span - span % u64::from(bound);
        loop {
            let word = u64::from(self.next_u32());
            if word < limit {
                return (word % u64::from(bound)) as u32;
            }
        }
    }

    /// Generate a fair coin flip
    pub fn next_bool(&mut self) -> bool {
        self.next_bits(1) == 1
    }

    /// Generate f64 in range [0.0, 1.0)
    ///
    /// Builds a 53-bit mantissa from a 26-bit and a 27-bit draw.
    pub fn next_f64(&mut self) -> f64 {
        let high = self.next_bits(26);
        let low = self.next_bits(27);
        ((high << 27) + low) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Generate a standard normal deviate (mean 0, variance 1)
    ///
    /// Box-Muller produces deviates in pairs; the second one is cached and
    /// returned by the following call.
    pub fn next_gaussian(&mut self) -> f64 {
        if let Some(cached) = self.cached_gaussian.take() {
            return cached;
        }
        // 1 - u lies in (0, 1], keeping the logarithm finite.
        let u1 = 1.0 - self.next_f64();
        let u2 = self.next_f64();
        let radius = (-2.0 * u1.ln()).sqrt();
        let angle = TAU * u2;
        self.cached_gaussian = Some(radius * angle.sin());
        radius * angle.cos()
    }

    /// Fill `buffer` with random bytes, one 8-bit draw per byte
    pub fn next_bytes(&mut self, buffer: &mut [u8]) {
        for byte in buffer.iter_mut() {
            *byte = self.next_bits(8) as u8;
        }
    }
}
