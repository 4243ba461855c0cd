//! Random magnitudes and probabilistic primality
//!
//! Primality uses Miller-Rabin with witnesses drawn from a [`Prng`]. The
//! test is probabilistic (error at most `4^-rounds` per composite) and makes
//! no cryptographic claim.

use std::cmp::Ordering;

use super::magnitude::{self, Limb, LIMB_BITS};
use super::{BigInteger, Sign};
use crate::rng::Prng;

/// Certainty used by `next_probable_prime` and `probable_prime`.
pub const DEFAULT_CERTAINTY: i32 = 100;

/// Uniform magnitude with exactly `bits` bits of entropy.
///
/// Limbs are drawn least significant first; bits above `bits` in the top
/// limb are masked off.
fn random_magnitude(bits: usize, rng: &mut Prng) -> Vec<Limb> {
    let limb_bits = LIMB_BITS as usize;
    let len = (bits + limb_bits - 1) / limb_bits;
    let mut limbs: Vec<Limb> = (0..len).map(|_| rng.next_bits(LIMB_BITS) as Limb).collect();
    let spare = len * limb_bits - bits;
    if let Some(top) = limbs.last_mut() {
        *top &= Limb::MAX >> spare;
    }
    magnitude::normalize(&mut limbs);
    limbs
}

impl BigInteger {
    /// Uniform random value in `[0, 2^bits)`
    ///
    /// # Example
    /// ```
    /// use bigmath_core_rs::{BigInteger, Prng};
    ///
    /// let mut rng = Prng::new(42);
    /// let v = BigInteger::random(20, &mut rng);
    /// assert!(v.bit_length() <= 20);
    /// assert!(!v.is_negative());
    /// ```
    pub fn random(bits: usize, rng: &mut Prng) -> Self {
        Self::from_parts(Sign::Positive, random_magnitude(bits, rng))
    }

    /// Draw `random(bits)` candidates until one passes
    /// `is_probable_prime_with(certainty)`
    ///
    /// Values 0, 1 and 2 count as prime-like, so very small widths can
    /// return them. There is no attempt limit.
    pub fn random_prime(bits: usize, certainty: i32, rng: &mut Prng) -> Self {
        let mut attempts: u64 = 0;
        loop {
            attempts += 1;
            let candidate = Self::random(bits, rng);
            if candidate.is_probable_prime_with(certainty, rng) {
                tracing::debug!(bits, certainty, attempts, "random probable prime found");
                return candidate;
            }
        }
    }

    /// `random_prime` at [`DEFAULT_CERTAINTY`]
    pub fn probable_prime(bits: usize, rng: &mut Prng) -> Self {
        Self::random_prime(bits, DEFAULT_CERTAINTY, rng)
    }

    /// Verdict for inputs that need no witnesses.
    ///
    /// Works on the magnitude, so `-7` is treated like `7`.
    fn trivial_primality(&self, certainty: i32) -> Option<bool> {
        if magnitude::cmp(&self.magnitude, &[2]) != Ordering::Greater {
            return Some(true);
        }
        if certainty <= 0 || self.is_even() {
            return Some(false);
        }
        None
    }

    /// Miller-Rabin with witnesses drawn from `rng`
    ///
    /// Runs `ceil(certainty / 2)` rounds. For a fixed generator state the
    /// verdict is reproducible.
    pub fn is_probable_prime_with(&self, certainty: i32, rng: &mut Prng) -> bool {
        if let Some(verdict) = self.trivial_primality(certainty) {
            return verdict;
        }

        let n = &self.magnitude;
        let n_minus_one = magnitude::sub(n, &[1]);
        let s = magnitude::trailing_zeros(&n_minus_one).unwrap_or(0);
        let d = magnitude::shr(&n_minus_one, s);
        let bits = magnitude::bit_length(n);
        // Rounded up: certainty 1 still runs one round instead of none.
        let rounds = (certainty + 1) / 2;

        for _ in 0..rounds {
            let witness = loop {
                let a = random_magnitude(bits, rng);
                if !a.is_empty() && magnitude::cmp(&a, n) == Ordering::Less {
                    break a;
                }
            };
            let mut x = magnitude::mod_pow(&witness, &d, n);
            if x == [1] {
                continue;
            }
            let mut reached = false;
            for _ in 0..s {
                if x == n_minus_one {
                    reached = true;
                    break;
                }
                x = magnitude::mul_mod(&x, &x, n);
            }
            if !reached {
                return false;
            }
        }
        true
    }

    /// Miller-Rabin with witnesses seeded from the value itself
    ///
    /// The generator is seeded with the low 64 bits of the magnitude, so the
    /// same value always gets the same verdict.
    ///
    /// # Example
    /// ```
    /// use bigmath_core_rs::BigInteger;
    ///
    /// assert!(BigInteger::value_of(1_000_003).is_probable_prime(100));
    /// assert!(!BigInteger::value_of(1_000_001).is_probable_prime(100));
    /// ```
    pub fn is_probable_prime(&self, certainty: i32) -> bool {
        if let Some(verdict) = self.trivial_primality(certainty) {
            return verdict;
        }
        let mut rng = Prng::new(magnitude::low_u64(&self.magnitude));
        self.is_probable_prime_with(certainty, &mut rng)
    }

    /// First value above `self` passing `is_probable_prime(DEFAULT_CERTAINTY)`
    ///
    /// Steps by one with no upper bound.
    pub fn next_probable_prime(&self) -> Self {
        let one = Self::one();
        let mut candidate = self.add(&one);
        let mut steps: u64 = 1;
        while !candidate.is_probable_prime(DEFAULT_CERTAINTY) {
            candidate = candidate.add(&one);
            steps += 1;
        }
        tracing::debug!(steps, "next probable prime found");
        candidate
    }
}
