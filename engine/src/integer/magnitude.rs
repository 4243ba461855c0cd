//! Limb-level algorithms on unsigned magnitudes
//!
//! A magnitude is a little-endian slice of 16-bit limbs. Functions here take
//! borrowed inputs and return fresh vectors; the `*_in_place` helpers mutate a
//! scratch buffer owned by the caller. Every returned vector is normalized
//! (no most-significant zero limb), so the empty vector is zero.

use std::cmp::Ordering;

pub(crate) type Limb = u16;
pub(crate) type DoubleLimb = u32;

pub(crate) const LIMB_BITS: u32 = Limb::BITS;

const LIMB_BITS_USIZE: usize = LIMB_BITS as usize;

/// Drop most-significant zero limbs.
pub(crate) fn normalize(limbs: &mut Vec<Limb>) {
    while limbs.last() == Some(&0) {
        limbs.pop();
    }
}

pub(crate) fn from_u64(mut value: u64) -> Vec<Limb> {
    let mut limbs = Vec::with_capacity(4);
    while value != 0 {
        limbs.push(value as Limb);
        value >>= LIMB_BITS;
    }
    limbs
}

/// Low 64 bits of the magnitude.
pub(crate) fn low_u64(limbs: &[Limb]) -> u64 {
    limbs
        .iter()
        .take(4)
        .rev()
        .fold(0u64, |acc, &limb| (acc << LIMB_BITS) | u64::from(limb))
}

/// Compare by length first, then limb by limb from the most significant.
pub(crate) fn cmp(a: &[Limb], b: &[Limb]) -> Ordering {
    a.len()
        .cmp(&b.len())
        .then_with(|| a.iter().rev().cmp(b.iter().rev()))
}

pub(crate) fn bit_length(limbs: &[Limb]) -> usize {
    match limbs.last() {
        None => 0,
        Some(&top) => {
            (limbs.len() - 1) * LIMB_BITS_USIZE + (LIMB_BITS - top.leading_zeros()) as usize
        }
    }
}

pub(crate) fn count_ones(limbs: &[Limb]) -> usize {
    limbs.iter().map(|limb| limb.count_ones() as usize).sum()
}

/// Index of the lowest set bit, `None` for zero.
pub(crate) fn trailing_zeros(limbs: &[Limb]) -> Option<usize> {
    limbs
        .iter()
        .position(|&limb| limb != 0)
        .map(|i| i * LIMB_BITS_USIZE + limbs[i].trailing_zeros() as usize)
}

pub(crate) fn test_bit(limbs: &[Limb], n: usize) -> bool {
    limbs
        .get(n / LIMB_BITS_USIZE)
        .map_or(false, |&limb| limb >> (n % LIMB_BITS_USIZE) & 1 == 1)
}

/// Return a copy with bit `n` forced to `value`.
pub(crate) fn with_bit(limbs: &[Limb], n: usize, value: bool) -> Vec<Limb> {
    let index = n / LIMB_BITS_USIZE;
    let mask: Limb = 1 << (n % LIMB_BITS_USIZE);
    let mut out = limbs.to_vec();
    if index >= out.len() {
        if !value {
            return out;
        }
        out.resize(index + 1, 0);
    }
    if value {
        out[index] |= mask;
    } else {
        out[index] &= !mask;
    }
    normalize(&mut out);
    out
}

/// Return a copy with bit `n` inverted.
pub(crate) fn with_bit_flipped(limbs: &[Limb], n: usize) -> Vec<Limb> {
    with_bit(limbs, n, !test_bit(limbs, n))
}

// ============================================================================
// Addition / Subtraction
// ============================================================================

pub(crate) fn add(a: &[Limb], b: &[Limb]) -> Vec<Limb> {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut out = Vec::with_capacity(long.len() + 1);
    let mut carry: DoubleLimb = 0;
    for (i, &limb) in long.iter().enumerate() {
        let sum = DoubleLimb::from(limb)
            + DoubleLimb::from(short.get(i).copied().unwrap_or(0))
            + carry;
        out.push(sum as Limb);
        carry = sum >> LIMB_BITS;
    }
    if carry != 0 {
        out.push(carry as Limb);
    }
    out
}

/// `a -= b`, requires `a >= b`.
pub(crate) fn sub_in_place(a: &mut Vec<Limb>, b: &[Limb]) {
    debug_assert!(cmp(a, b) != Ordering::Less, "magnitude subtraction underflow");
    let mut borrow: DoubleLimb = 0;
    for i in 0..a.len() {
        let rhs = b.get(i).copied().unwrap_or(0);
        if i >= b.len() && borrow == 0 {
            break;
        }
        let diff = DoubleLimb::from(a[i])
            .wrapping_sub(DoubleLimb::from(rhs))
            .wrapping_sub(borrow);
        a[i] = diff as Limb;
        borrow = diff >> (DoubleLimb::BITS - 1);
    }
    normalize(a);
}

/// `a - b`, requires `a >= b`.
pub(crate) fn sub(a: &[Limb], b: &[Limb]) -> Vec<Limb> {
    let mut out = a.to_vec();
    sub_in_place(&mut out, b);
    out
}

// ============================================================================
// Multiplication
// ============================================================================

/// Schoolbook product: every limb of `a` scales all of `b`, and the partial
/// product is accumulated at that limb's position.
pub(crate) fn mul(a: &[Limb], b: &[Limb]) -> Vec<Limb> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut out: Vec<Limb> = vec![0; a.len() + b.len()];
    for (i, &scale) in a.iter().enumerate() {
        if scale == 0 {
            continue;
        }
        let mut carry: DoubleLimb = 0;
        for (j, &limb) in b.iter().enumerate() {
            // Max: (2^16-1)^2 + 2 * (2^16-1) = 2^32 - 1
            let t = DoubleLimb::from(scale) * DoubleLimb::from(limb)
                + DoubleLimb::from(out[i + j])
                + carry;
            out[i + j] = t as Limb;
            carry = t >> LIMB_BITS;
        }
        out[i + b.len()] = carry as Limb;
    }
    normalize(&mut out);
    out
}

// ============================================================================
// Shifts
// ============================================================================

/// Double in place, rippling the carry upward.
pub(crate) fn shl1_in_place(limbs: &mut Vec<Limb>) {
    let mut carry: Limb = 0;
    for limb in limbs.iter_mut() {
        let next = *limb >> (LIMB_BITS - 1);
        *limb = (*limb << 1) | carry;
        carry = next;
    }
    if carry != 0 {
        limbs.push(carry);
    }
}

/// Halve in place, rippling the low bit downward.
pub(crate) fn shr1_in_place(limbs: &mut Vec<Limb>) {
    let mut carry: Limb = 0;
    for limb in limbs.iter_mut().rev() {
        let next = *limb & 1;
        *limb = (*limb >> 1) | (carry << (LIMB_BITS - 1));
        carry = next;
    }
    normalize(limbs);
}

pub(crate) fn shl(limbs: &[Limb], n: usize) -> Vec<Limb> {
    if limbs.is_empty() || n == 0 {
        return limbs.to_vec();
    }
    if n == 1 {
        let mut out = limbs.to_vec();
        shl1_in_place(&mut out);
        return out;
    }
    let whole = n / LIMB_BITS_USIZE;
    let bits = (n % LIMB_BITS_USIZE) as u32;
    let mut out: Vec<Limb> = Vec::with_capacity(whole + limbs.len() + 1);
    out.resize(whole, 0);
    if bits == 0 {
        out.extend_from_slice(limbs);
        return out;
    }
    let mut carry: DoubleLimb = 0;
    for &limb in limbs {
        let t = (DoubleLimb::from(limb) << bits) | carry;
        out.push(t as Limb);
        carry = t >> LIMB_BITS;
    }
    if carry != 0 {
        out.push(carry as Limb);
    }
    out
}

pub(crate) fn shr(limbs: &[Limb], n: usize) -> Vec<Limb> {
    if n == 1 {
        let mut out = limbs.to_vec();
        shr1_in_place(&mut out);
        return out;
    }
    let whole = n / LIMB_BITS_USIZE;
    if whole >= limbs.len() {
        return Vec::new();
    }
    let bits = (n % LIMB_BITS_USIZE) as u32;
    let src = &limbs[whole..];
    if bits == 0 {
        return src.to_vec();
    }
    let mut out: Vec<Limb> = src
        .iter()
        .enumerate()
        .map(|(i, &limb)| {
            let high = src.get(i + 1).map_or(0, |&next| next << (LIMB_BITS - bits));
            (limb >> bits) | high
        })
        .collect();
    normalize(&mut out);
    out
}

// ============================================================================
// Division
// ============================================================================

/// Binary long division, returns `(quotient, remainder)`.
///
/// The divisor is aligned to the dividend's bit length, then walked back down
/// one bit at a time; each position where the running remainder still covers
/// the shifted divisor contributes a quotient bit.
///
/// `b` must be nonzero.
pub(crate) fn divrem(a: &[Limb], b: &[Limb]) -> (Vec<Limb>, Vec<Limb>) {
    debug_assert!(!b.is_empty(), "magnitude division by zero");
    if cmp(a, b) == Ordering::Less {
        return (Vec::new(), a.to_vec());
    }
    let shift = bit_length(a) - bit_length(b);
    let mut divisor = shl(b, shift);
    let mut remainder = a.to_vec();
    let mut quotient: Vec<Limb> = vec![0; shift / LIMB_BITS_USIZE + 1];
    for position in (0..=shift).rev() {
        if cmp(&remainder, &divisor) != Ordering::Less {
            sub_in_place(&mut remainder, &divisor);
            quotient[position / LIMB_BITS_USIZE] |= 1 << (position % LIMB_BITS_USIZE);
        }
        shr1_in_place(&mut divisor);
    }
    normalize(&mut quotient);
    (quotient, remainder)
}

/// Short division by a single word, returns `(quotient, remainder)`.
///
/// `divisor` must be nonzero and below `2^(64 - LIMB_BITS)` so the running
/// remainder can take one more limb without overflow.
pub(crate) fn divrem_small(a: &[Limb], divisor: u64) -> (Vec<Limb>, u64) {
    debug_assert!(divisor != 0 && divisor >> (u64::BITS - LIMB_BITS) == 0);
    let mut quotient: Vec<Limb> = vec![0; a.len()];
    let mut remainder: u64 = 0;
    for (i, &limb) in a.iter().enumerate().rev() {
        let current = (remainder << LIMB_BITS) | u64::from(limb);
        quotient[i] = (current / divisor) as Limb;
        remainder = current % divisor;
    }
    normalize(&mut quotient);
    (quotient, remainder)
}

// ============================================================================
// Modular helpers
// ============================================================================

/// `a * b mod m`, `m` nonzero.
pub(crate) fn mul_mod(a: &[Limb], b: &[Limb], m: &[Limb]) -> Vec<Limb> {
    divrem(&mul(a, b), m).1
}

/// Square-and-multiply `base^exp mod m`, reducing after every product.
///
/// `base` must already be reduced below `m`; `m` must be nonzero.
pub(crate) fn mod_pow(base: &[Limb], exp: &[Limb], m: &[Limb]) -> Vec<Limb> {
    if m == [1] {
        return Vec::new();
    }
    let mut result: Vec<Limb> = vec![1];
    let mut square = base.to_vec();
    let bits = bit_length(exp);
    for i in 0..bits {
        if test_bit(exp, i) {
            result = mul_mod(&result, &square, m);
        }
        if i + 1 < bits {
            square = mul_mod(&square, &square, m);
        }
    }
    result
}
