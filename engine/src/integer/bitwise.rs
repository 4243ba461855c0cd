//! Bit-level operations
//!
//! Two separate views of a value:
//!
//! - **Two's complement** (`and`, `or`, `xor`, `not`, `and_not`, byte
//!   conversion): both operands are widened to a common limb count with at
//!   least one spare sign bit, combined limb by limb, and the result is read
//!   back as sign + magnitude.
//! - **Raw magnitude** (shifts, `test_bit`, `set_bit`, `clear_bit`,
//!   `flip_bit`, `bit_length`, `bit_count`, `lowest_set_bit`): bit indices
//!   address the absolute value and the sign is carried through untouched.
//!   `shift_right` of a negative value therefore truncates toward zero
//!   (`-5 >> 1 == -2`), unlike an arithmetic shift.

use std::ops::{BitAnd, BitOr, BitXor, Not, Shl, Shr};

use super::arith::forward_binop;
use super::magnitude::{self, Limb, LIMB_BITS};
use super::{BigInteger, Sign};

const SIGN_BIT: Limb = 1 << (LIMB_BITS - 1);

/// Two's-complement limbs of `value`, sign-extended to `len` limbs.
///
/// `len` must leave at least one bit above the magnitude.
fn to_twos_complement(value: &BigInteger, len: usize) -> Vec<Limb> {
    let mut limbs = value.magnitude.clone();
    limbs.resize(len, 0);
    if value.is_negative() {
        negate_in_place(&mut limbs);
    }
    limbs
}

/// Read a two's-complement limb pattern back as sign + magnitude.
fn from_twos_complement(mut limbs: Vec<Limb>) -> BigInteger {
    let negative = limbs.last().map_or(false, |&top| top & SIGN_BIT != 0);
    if negative {
        negate_in_place(&mut limbs);
        BigInteger::from_parts(Sign::Negative, limbs)
    } else {
        BigInteger::from_parts(Sign::Positive, limbs)
    }
}

/// Two's-complement negation within a fixed width: invert, then add one.
fn negate_in_place(limbs: &mut [Limb]) {
    let mut carry = true;
    for limb in limbs.iter_mut() {
        let (sum, overflow) = (!*limb).overflowing_add(carry as Limb);
        *limb = sum;
        carry = overflow;
    }
}

/// Limb count holding both operands plus a sign bit.
fn common_width(a: &BigInteger, b: &BigInteger) -> usize {
    let bits = magnitude::bit_length(&a.magnitude).max(magnitude::bit_length(&b.magnitude));
    bits / LIMB_BITS as usize + 1
}

fn combine(a: &BigInteger, b: &BigInteger, op: impl Fn(Limb, Limb) -> Limb) -> BigInteger {
    let width = common_width(a, b);
    let left = to_twos_complement(a, width);
    let right = to_twos_complement(b, width);
    let limbs = left.iter().zip(&right).map(|(&x, &y)| op(x, y)).collect();
    from_twos_complement(limbs)
}

impl BigInteger {
    // ========================================================================
    // Two's-complement logic
    // ========================================================================

    pub fn and(&self, other: &Self) -> Self {
        combine(self, other, |x, y| x & y)
    }

    pub fn or(&self, other: &Self) -> Self {
        combine(self, other, |x, y| x | y)
    }

    pub fn xor(&self, other: &Self) -> Self {
        combine(self, other, |x, y| x ^ y)
    }

    /// `self & !other`
    pub fn and_not(&self, other: &Self) -> Self {
        combine(self, other, |x, y| x & !y)
    }

    /// Bitwise complement, `-(self + 1)`
    pub fn not(&self) -> Self {
        self.add(&Self::one()).negate()
    }

    /// Minimal big-endian two's-complement bytes (at least one byte)
    ///
    /// # Example
    /// ```
    /// use bigmath_core_rs::BigInteger;
    ///
    /// assert_eq!(BigInteger::value_of(255).to_bytes_be(), vec![0x00, 0xFF]);
    /// assert_eq!(BigInteger::value_of(-129).to_bytes_be(), vec![0xFF, 0x7F]);
    /// ```
    pub fn to_bytes_be(&self) -> Vec<u8> {
        let width = magnitude::bit_length(&self.magnitude) / LIMB_BITS as usize + 1;
        let limbs = to_twos_complement(self, width);
        let mut bytes: Vec<u8> = limbs.iter().rev().flat_map(|limb| limb.to_be_bytes()).collect();
        // Drop sign-extension bytes that the next byte's top bit already implies.
        let redundant = bytes
            .windows(2)
            .take_while(|pair| {
                (pair[0] == 0x00 && pair[1] & 0x80 == 0) || (pair[0] == 0xFF && pair[1] & 0x80 != 0)
            })
            .count();
        bytes.drain(..redundant);
        bytes
    }

    /// Read big-endian two's-complement bytes; empty input is zero
    pub fn from_bytes_be(bytes: &[u8]) -> Self {
        let Some(&first) = bytes.first() else {
            return Self::zero();
        };
        let fill: u8 = if first & 0x80 != 0 { 0xFF } else { 0x00 };
        let width = bytes.len() / 2 + 1;
        let mut padded = vec![fill; width * 2 - bytes.len()];
        padded.extend_from_slice(bytes);
        let limbs: Vec<Limb> = padded
            .chunks_exact(2)
            .rev()
            .map(|pair| Limb::from_be_bytes([pair[0], pair[1]]))
            .collect();
        from_twos_complement(limbs)
    }

    // ========================================================================
    // Raw-magnitude view
    // ========================================================================

    /// Shift the magnitude left by `n` bits, keeping the sign
    pub fn shift_left(&self, n: usize) -> Self {
        Self::from_parts(self.sign, magnitude::shl(&self.magnitude, n))
    }

    /// Shift the magnitude right by `n` bits, keeping the sign
    ///
    /// Bits shifted out are lost from the magnitude, so negative values move
    /// toward zero. A magnitude shifted to nothing becomes canonical zero.
    pub fn shift_right(&self, n: usize) -> Self {
        Self::from_parts(self.sign, magnitude::shr(&self.magnitude, n))
    }

    /// Whether bit `n` of the magnitude is set
    pub fn test_bit(&self, n: usize) -> bool {
        magnitude::test_bit(&self.magnitude, n)
    }

    /// Set bit `n` of the magnitude; zero becomes positive
    pub fn set_bit(&self, n: usize) -> Self {
        Self::from_parts(self.sign, magnitude::with_bit(&self.magnitude, n, true))
    }

    /// Clear bit `n` of the magnitude
    pub fn clear_bit(&self, n: usize) -> Self {
        Self::from_parts(self.sign, magnitude::with_bit(&self.magnitude, n, false))
    }

    /// Invert bit `n` of the magnitude
    pub fn flip_bit(&self, n: usize) -> Self {
        Self::from_parts(self.sign, magnitude::with_bit_flipped(&self.magnitude, n))
    }

    /// Number of bits in the magnitude; zero has length 0
    pub fn bit_length(&self) -> usize {
        magnitude::bit_length(&self.magnitude)
    }

    /// Number of set bits in the magnitude
    pub fn bit_count(&self) -> usize {
        magnitude::count_ones(&self.magnitude)
    }

    /// Index of the lowest set bit of the magnitude, `None` for zero
    pub fn lowest_set_bit(&self) -> Option<usize> {
        magnitude::trailing_zeros(&self.magnitude)
    }
}

forward_binop!(BitAnd, bitand, and);
forward_binop!(BitOr, bitor, or);
forward_binop!(BitXor, bitxor, xor);

impl Not for &BigInteger {
    type Output = BigInteger;

    fn not(self) -> BigInteger {
        BigInteger::not(self)
    }
}

impl Not for BigInteger {
    type Output = BigInteger;

    fn not(self) -> BigInteger {
        BigInteger::not(&self)
    }
}

impl Shl<usize> for &BigInteger {
    type Output = BigInteger;

    fn shl(self, n: usize) -> BigInteger {
        self.shift_left(n)
    }
}

impl Shl<usize> for BigInteger {
    type Output = BigInteger;

    fn shl(self, n: usize) -> BigInteger {
        self.shift_left(n)
    }
}

impl Shr<usize> for &BigInteger {
    type Output = BigInteger;

    fn shr(self, n: usize) -> BigInteger {
        self.shift_right(n)
    }
}

impl Shr<usize> for BigInteger {
    type Output = BigInteger;

    fn shr(self, n: usize) -> BigInteger {
        self.shift_right(n)
    }
}
