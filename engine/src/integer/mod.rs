//! Arbitrary-precision signed integers
//!
//! [`BigInteger`] stores a sign and a little-endian magnitude of 16-bit limbs.
//! Values are immutable: every operation returns a new canonical value and
//! never mutates its receiver or arguments. Internally an operation may clone
//! a magnitude into a scratch buffer and work on it in place.
//!
//! # Critical Invariants
//!
//! 1. No most-significant zero limb in a stored magnitude
//! 2. Zero is the empty magnitude with `Sign::Zero`
//! 3. Every nonzero value has sign `Positive` or `Negative`
//!
//! # Two bit views
//!
//! - `and`/`or`/`xor`/`not`/`and_not` see an infinite two's-complement
//!   pattern, like machine integers.
//! - Shifts and single-bit access (`test_bit`, `set_bit`, ...) see the raw
//!   magnitude and leave the sign alone.

mod arith;
mod bitwise;
mod error;
pub(crate) mod magnitude;
mod prime;
mod radix;

pub use error::{IntegerError, ParseIntegerError};
pub use prime::DEFAULT_CERTAINTY;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;

use magnitude::Limb;

/// Sign of a [`BigInteger`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Sign {
    Negative,
    #[default]
    Zero,
    Positive,
}

impl Sign {
    /// -1, 0 or +1
    pub fn signum(self) -> i32 {
        match self {
            Sign::Negative => -1,
            Sign::Zero => 0,
            Sign::Positive => 1,
        }
    }
}

impl std::ops::Neg for Sign {
    type Output = Sign;

    fn neg(self) -> Sign {
        match self {
            Sign::Negative => Sign::Positive,
            Sign::Zero => Sign::Zero,
            Sign::Positive => Sign::Negative,
        }
    }
}

impl std::ops::Mul for Sign {
    type Output = Sign;

    fn mul(self, other: Sign) -> Sign {
        match (self, other) {
            (Sign::Zero, _) | (_, Sign::Zero) => Sign::Zero,
            (a, b) if a == b => Sign::Positive,
            _ => Sign::Negative,
        }
    }
}

/// Arbitrary-precision signed integer
///
/// # Example
/// ```
/// use bigmath_core_rs::BigInteger;
///
/// let a = BigInteger::parse("12345678").unwrap();
/// let b = BigInteger::parse("-1234").unwrap();
/// assert_eq!(a.add(&b).to_string(), "12344444");
///
/// let p = BigInteger::value_of(2).pow(10);
/// assert_eq!(p, BigInteger::value_of(1024));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BigInteger {
    sign: Sign,
    /// Little-endian 16-bit limbs, canonical
    magnitude: Vec<Limb>,
}

impl BigInteger {
    /// Build a canonical value from a sign and a scratch magnitude
    ///
    /// Trailing zero limbs are dropped and an empty magnitude forces
    /// `Sign::Zero`. A nonzero magnitude paired with `Sign::Zero` is taken
    /// as positive.
    pub(crate) fn from_parts(sign: Sign, mut magnitude: Vec<Limb>) -> Self {
        magnitude::normalize(&mut magnitude);
        let sign = match (magnitude.is_empty(), sign) {
            (true, _) => Sign::Zero,
            (false, Sign::Zero) => Sign::Positive,
            (false, sign) => sign,
        };
        Self { sign, magnitude }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn one() -> Self {
        Self::value_of(1)
    }

    pub fn ten() -> Self {
        Self::value_of(10)
    }

    /// Create from a machine integer
    pub fn value_of(value: i64) -> Self {
        let sign = match value.cmp(&0) {
            Ordering::Less => Sign::Negative,
            Ordering::Equal => Sign::Zero,
            Ordering::Greater => Sign::Positive,
        };
        Self::from_parts(sign, magnitude::from_u64(value.unsigned_abs()))
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// -1, 0 or +1
    pub fn signum(&self) -> i32 {
        self.sign.signum()
    }

    /// Little-endian 16-bit limbs of the absolute value
    pub fn limbs(&self) -> &[u16] {
        &self.magnitude
    }

    pub fn is_zero(&self) -> bool {
        self.sign == Sign::Zero
    }

    pub fn is_negative(&self) -> bool {
        self.sign == Sign::Negative
    }

    pub fn is_positive(&self) -> bool {
        self.sign == Sign::Positive
    }

    pub fn is_even(&self) -> bool {
        self.magnitude.first().map_or(true, |&low| low & 1 == 0)
    }

    pub(crate) fn is_one(&self) -> bool {
        self.sign == Sign::Positive && self.magnitude == [1]
    }

    pub fn negate(&self) -> Self {
        Self {
            sign: -self.sign,
            magnitude: self.magnitude.clone(),
        }
    }

    pub fn abs(&self) -> Self {
        match self.sign {
            Sign::Negative => self.negate(),
            _ => self.clone(),
        }
    }

    // ========================================================================
    // Ordering
    // ========================================================================

    /// Compare absolute values
    pub fn compare_to_abs(&self, other: &Self) -> Ordering {
        magnitude::cmp(&self.magnitude, &other.magnitude)
    }

    /// Compare signed values
    ///
    /// Also backs [`Ord`], so `max`/`min` come from the standard trait.
    pub fn compare_to(&self, other: &Self) -> Ordering {
        if self.sign != other.sign {
            return self.sign.cmp(&other.sign);
        }
        match self.sign {
            Sign::Zero => Ordering::Equal,
            Sign::Positive => self.compare_to_abs(other),
            Sign::Negative => self.compare_to_abs(other).reverse(),
        }
    }

    // ========================================================================
    // Fixed-width extraction
    // ========================================================================

    /// Low 64 bits in two's complement, like a wrapping cast
    fn low_bits_signed(&self) -> u64 {
        let low = magnitude::low_u64(&self.magnitude);
        if self.is_negative() {
            low.wrapping_neg()
        } else {
            low
        }
    }

    /// Low 8 bits with sign applied (wrapping)
    pub fn byte_value(&self) -> i8 {
        self.low_bits_signed() as i8
    }

    /// Low 16 bits with sign applied (wrapping)
    pub fn short_value(&self) -> i16 {
        self.low_bits_signed() as i16
    }

    /// Low 32 bits with sign applied (wrapping)
    pub fn int_value(&self) -> i32 {
        self.low_bits_signed() as i32
    }

    /// Low 64 bits with sign applied (wrapping)
    pub fn long_value(&self) -> i64 {
        self.low_bits_signed() as i64
    }

    /// Nearest `f64` (ties to even), saturating to infinity for huge magnitudes
    pub fn to_f64(&self) -> f64 {
        let bits = magnitude::bit_length(&self.magnitude);
        let value = if bits <= 64 {
            magnitude::low_u64(&self.magnitude) as f64
        } else {
            // Top 64 bits plus a sticky bit for everything below them round
            // exactly once in the u64 -> f64 cast.
            let shift = bits - 64;
            let top = magnitude::low_u64(&magnitude::shr(&self.magnitude, shift));
            let sticky = magnitude::trailing_zeros(&self.magnitude).map_or(false, |tz| tz < shift);
            let scale = i32::try_from(shift).unwrap_or(i32::MAX);
            (top | u64::from(sticky)) as f64 * 2f64.powi(scale)
        };
        if self.is_negative() {
            -value
        } else {
            value
        }
    }
}

impl PartialOrd for BigInteger {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigInteger {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_to(other)
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(
            impl From<$t> for BigInteger {
                fn from(value: $t) -> Self {
                    Self::value_of(i64::from(value))
                }
            }
        )*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for BigInteger {
                fn from(value: $t) -> Self {
                    Self::from_parts(Sign::Positive, magnitude::from_u64(u64::from(value)))
                }
            }
        )*
    };
}

impl_from_signed!(i8, i16, i32, i64);
impl_from_unsigned!(u8, u16, u32, u64);

impl TryFrom<&BigInteger> for i64 {
    type Error = IntegerError;

    /// Exact conversion; values outside `i64` are rejected.
    fn try_from(value: &BigInteger) -> Result<Self, Self::Error> {
        if magnitude::bit_length(&value.magnitude) > 64 {
            return Err(IntegerError::Overflow);
        }
        let low = magnitude::low_u64(&value.magnitude);
        if value.is_negative() {
            if low > i64::MIN.unsigned_abs() {
                return Err(IntegerError::Overflow);
            }
            Ok(low.wrapping_neg() as i64)
        } else {
            i64::try_from(low).map_err(|_| IntegerError::Overflow)
        }
    }
}

impl TryFrom<&BigInteger> for u64 {
    type Error = IntegerError;

    /// Exact conversion; negative values and values above `u64::MAX` are rejected.
    fn try_from(value: &BigInteger) -> Result<Self, Self::Error> {
        if value.is_negative() || magnitude::bit_length(&value.magnitude) > 64 {
            return Err(IntegerError::Overflow);
        }
        Ok(magnitude::low_u64(&value.magnitude))
    }
}

// ============================================================================
// Serde: decimal string on the wire
// ============================================================================

impl Serialize for BigInteger {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BigInteger {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        BigInteger::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_canonical() {
        let zero = BigInteger::from_parts(Sign::Negative, vec![0, 0, 0]);
        assert_eq!(zero, BigInteger::zero());
        assert_eq!(zero.sign(), Sign::Zero);
        assert!(zero.limbs().is_empty());
    }

    #[test]
    fn test_value_of_extremes() {
        let min = BigInteger::value_of(i64::MIN);
        assert!(min.is_negative());
        assert_eq!(min.limbs(), &[0, 0, 0, 0x8000]);
        assert_eq!(min.long_value(), i64::MIN);
        assert_eq!(BigInteger::value_of(i64::MAX).long_value(), i64::MAX);
    }

    #[test]
    fn test_compare_to_orders_by_sign_then_magnitude() {
        let values: Vec<BigInteger> = [-1000, -3, 0, 2, 70000]
            .iter()
            .map(|&v| BigInteger::value_of(v))
            .collect();
        for pair in values.windows(2) {
            assert_eq!(pair[0].compare_to(&pair[1]), Ordering::Less);
            assert_eq!(pair[1].compare_to(&pair[0]), Ordering::Greater);
        }
        assert_eq!(
            BigInteger::value_of(-3).compare_to_abs(&BigInteger::value_of(2)),
            Ordering::Greater
        );
    }

    #[test]
    fn test_max_min() {
        let a = BigInteger::value_of(-5);
        let b = BigInteger::value_of(4);
        assert_eq!(a.clone().max(b.clone()), b);
        assert_eq!(a.clone().min(b), a);
    }

    #[test]
    fn test_fixed_width_extraction_wraps() {
        let v = BigInteger::value_of(0x1_2345_6789);
        assert_eq!(v.int_value(), 0x2345_6789);
        assert_eq!(v.short_value(), 0x6789);
        assert_eq!(v.byte_value(), 0x89u8 as i8);

        let neg = BigInteger::value_of(-1);
        assert_eq!(neg.int_value(), -1);
        assert_eq!(neg.byte_value(), -1);

        let neg = BigInteger::value_of(-300);
        assert_eq!(neg.byte_value(), (-300i64) as i8);
    }

    #[test]
    fn test_try_from_bounds() {
        assert_eq!(i64::try_from(&BigInteger::value_of(i64::MIN)), Ok(i64::MIN));
        assert_eq!(
            i64::try_from(&BigInteger::from(u64::MAX)),
            Err(IntegerError::Overflow)
        );
        assert_eq!(u64::try_from(&BigInteger::from(u64::MAX)), Ok(u64::MAX));
        assert_eq!(
            u64::try_from(&BigInteger::value_of(-1)),
            Err(IntegerError::Overflow)
        );
    }

    #[test]
    fn test_to_f64() {
        assert_eq!(BigInteger::value_of(-123456789).to_f64(), -123456789.0);
        assert_eq!(BigInteger::zero().to_f64(), 0.0);
        assert_eq!(BigInteger::from(u64::MAX).to_f64(), u64::MAX as f64);
    }

    #[test]
    fn test_to_f64_rounds_once() {
        // 2^100 + 2^47 + 1 lies just above the midpoint between 2^100 and
        // 2^100 + 2^48; limb-by-limb accumulation loses the low 1 and ties down.
        let above_half = BigInteger::one()
            .shift_left(100)
            .add(&BigInteger::one().shift_left(47))
            .add(&BigInteger::one());
        assert_eq!(above_half.to_f64(), 2f64.powi(100) + 2f64.powi(48));
        assert_eq!(above_half.negate().to_f64(), -(2f64.powi(100) + 2f64.powi(48)));

        let exact_half = BigInteger::one()
            .shift_left(100)
            .add(&BigInteger::one().shift_left(47));
        assert_eq!(exact_half.to_f64(), 2f64.powi(100));

        assert_eq!(BigInteger::one().shift_left(2000).to_f64(), f64::INFINITY);
    }

    #[test]
    fn test_sign_algebra() {
        assert_eq!(Sign::Negative * Sign::Negative, Sign::Positive);
        assert_eq!(Sign::Negative * Sign::Positive, Sign::Negative);
        assert_eq!(Sign::Zero * Sign::Negative, Sign::Zero);
        assert_eq!(-Sign::Zero, Sign::Zero);
    }
}
