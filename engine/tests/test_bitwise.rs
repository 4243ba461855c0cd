//! Bitwise logic and shift semantics
//!
//! Logic operators follow two's complement; shifts and bit access follow the
//! raw magnitude. The two families must not leak into each other.

use bigmath_core_rs::BigInteger;

fn big(text: &str) -> BigInteger {
    BigInteger::parse(text).unwrap()
}

fn int(v: i64) -> BigInteger {
    BigInteger::value_of(v)
}

// ============================================================================
// Test Group 1: Two's-complement logic
// ============================================================================

#[test]
fn test_and_with_negative_masks_low_bits() {
    // -1 is all ones in two's complement.
    let v = big("0x123456789abcdef0123456789");
    assert_eq!(v.and(&int(-1)), v);
    assert_eq!(v.and(&int(0xFFFF)), int(0x6789));
}

#[test]
fn test_or_of_negatives_stays_negative() {
    assert_eq!(int(-8).or(&int(-3)), int(-8 | -3));
    assert_eq!(big("-0x10000000000000000").or(&int(1)), big("-0xffffffffffffffff"));
}

#[test]
fn test_xor_sign_combinations() {
    assert_eq!(int(-1).xor(&int(0)), int(-1));
    assert_eq!(int(-1).xor(&int(-1)), BigInteger::zero());
    assert_eq!(int(-6).xor(&int(3)), int(-6 ^ 3));
}

#[test]
fn test_not_is_negated_successor() {
    assert_eq!(BigInteger::zero().not(), int(-1));
    assert_eq!(int(-1).not(), BigInteger::zero());
    let v = big("123456789012345678901234567890");
    assert_eq!(v.not(), v.add(&BigInteger::one()).negate());
}

#[test]
fn test_and_not_equals_and_of_not() {
    let x = big("-0xfedcba9876543210");
    let y = big("0x0f0f0f0f0f0f0f0f0f");
    assert_eq!(x.and_not(&y), x.and(&y.not()));
}

#[test]
fn test_de_morgan() {
    let x = big("-98765432109876543210");
    let y = big("12345678901234567890123");
    assert_eq!(x.and(&y).not(), x.not().or(&y.not()));
    assert_eq!(x.or(&y).not(), x.not().and(&y.not()));
}

#[test]
fn test_logic_at_limb_boundary() {
    // Magnitudes exactly filling a limb need the extra sign limb.
    assert_eq!(int(-32768).and(&int(-32768)), int(-32768));
    assert_eq!(int(-65536).or(&int(65535)), int(-1));
    assert_eq!(int(32768).xor(&int(-32768)), int(32768 ^ -32768));
}

// ============================================================================
// Test Group 2: Magnitude shifts (regression: sign is never touched)
// ============================================================================

#[test]
fn test_shift_right_negative_is_magnitude_only() {
    // An arithmetic shift would give -3 (floor); magnitude shift gives -2.
    assert_eq!(int(-5).shift_right(1), int(-2));
    assert_eq!(int(-5).shift_right(2), int(-1));
    assert_eq!(int(-5).shift_right(3), BigInteger::zero());
}

#[test]
fn test_shift_fast_paths_agree_with_multiplication() {
    let v = big("-0x1234567890abcdef1234");
    for n in [1usize, 5, 15, 16, 31, 32, 48, 100] {
        let expected = v.multiply(&BigInteger::value_of(2).pow(n as u32));
        assert_eq!(v.shift_left(n), expected, "shift_left({})", n);
        assert_eq!(v.shift_left(n).shift_right(n), v, "round trip {}", n);
    }
}

#[test]
fn test_shift_right_matches_truncating_division() {
    let v = big("-987654321987654321987654321");
    for n in [1usize, 7, 16, 33, 64] {
        let divisor = BigInteger::one().shift_left(n);
        assert_eq!(v.shift_right(n), v.divide(&divisor).unwrap(), "shift_right({})", n);
    }
}

#[test]
fn test_shift_right_past_length_is_zero() {
    assert_eq!(big("0xffffffffffff").shift_right(48), BigInteger::zero());
    assert_eq!(big("-0xffffffffffff").shift_right(1000), BigInteger::zero());
}

#[test]
fn test_shift_by_zero_is_identity() {
    let v = int(-42);
    assert_eq!(v.shift_left(0), v);
    assert_eq!(v.shift_right(0), v);
}

// ============================================================================
// Test Group 3: Single-bit access on the magnitude
// ============================================================================

#[test]
fn test_bit_access_ignores_sign() {
    let pos = int(10);
    let neg = int(-10);
    for n in 0..8 {
        assert_eq!(pos.test_bit(n), neg.test_bit(n), "bit {}", n);
    }
}

#[test]
fn test_set_clear_flip_high_bits() {
    let v = BigInteger::zero().set_bit(100);
    assert_eq!(v, BigInteger::one().shift_left(100));
    assert_eq!(v.bit_length(), 101);
    assert_eq!(v.clear_bit(100), BigInteger::zero());
    assert_eq!(v.flip_bit(0).bit_count(), 2);
    assert_eq!(int(-1).clear_bit(0), BigInteger::zero());
}

#[test]
fn test_lowest_set_bit() {
    assert_eq!(big("-0x100000000").lowest_set_bit(), Some(32));
    assert_eq!(int(1).lowest_set_bit(), Some(0));
    assert_eq!(BigInteger::zero().lowest_set_bit(), None);
}

// ============================================================================
// Test Group 4: Byte conversion
// ============================================================================

#[test]
fn test_bytes_of_large_negative() {
    let v = big("-0x1000000000000000000");
    assert_eq!(v.to_bytes_be(), vec![0xFF, 0x00, 0, 0, 0, 0, 0, 0, 0, 0]);
    assert_eq!(BigInteger::from_bytes_be(&v.to_bytes_be()), v);
}

#[test]
fn test_bytes_odd_length_input() {
    assert_eq!(BigInteger::from_bytes_be(&[0x01, 0x00, 0x00]), int(65536));
    assert_eq!(BigInteger::from_bytes_be(&[0xFF, 0x00, 0x00]), int(-65536));
}
