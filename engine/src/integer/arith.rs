//! Signed arithmetic on top of the limb algorithms
//!
//! Division truncates toward zero: the quotient's sign is the product of the
//! operand signs and the remainder takes the dividend's sign. `modulo` is the
//! Euclidean (always nonnegative) remainder and requires a positive modulus.

use std::cmp::Ordering;
use std::ops::{Add, Mul, Neg, Sub};

use super::magnitude;
use super::{BigInteger, IntegerError, Sign};

impl BigInteger {
    /// `self + other`
    pub fn add(&self, other: &Self) -> Self {
        add_signed(self, other.sign, &other.magnitude)
    }

    /// `self - other`
    pub fn subtract(&self, other: &Self) -> Self {
        add_signed(self, -other.sign, &other.magnitude)
    }

    /// `self * other`
    pub fn multiply(&self, other: &Self) -> Self {
        Self::from_parts(
            self.sign * other.sign,
            magnitude::mul(&self.magnitude, &other.magnitude),
        )
    }

    /// Truncating division, returns `(quotient, remainder)`
    ///
    /// # Errors
    /// `DivisionByZero` when `divisor` is zero
    ///
    /// # Example
    /// ```
    /// use bigmath_core_rs::BigInteger;
    ///
    /// let (q, r) = BigInteger::value_of(-7)
    ///     .divide_and_remainder(&BigInteger::value_of(2))
    ///     .unwrap();
    /// assert_eq!(q, BigInteger::value_of(-3));
    /// assert_eq!(r, BigInteger::value_of(-1));
    /// ```
    pub fn divide_and_remainder(&self, divisor: &Self) -> Result<(Self, Self), IntegerError> {
        if divisor.is_zero() {
            return Err(IntegerError::DivisionByZero);
        }
        let (quotient, remainder) = magnitude::divrem(&self.magnitude, &divisor.magnitude);
        Ok((
            Self::from_parts(self.sign * divisor.sign, quotient),
            Self::from_parts(self.sign, remainder),
        ))
    }

    /// Truncating quotient
    pub fn divide(&self, divisor: &Self) -> Result<Self, IntegerError> {
        self.divide_and_remainder(divisor).map(|(q, _)| q)
    }

    /// Remainder of truncating division (sign follows `self`)
    pub fn remainder(&self, divisor: &Self) -> Result<Self, IntegerError> {
        self.divide_and_remainder(divisor).map(|(_, r)| r)
    }

    /// Euclidean remainder in `[0, modulus)`
    ///
    /// # Errors
    /// `InvalidModulus` unless `modulus > 0`
    pub fn modulo(&self, modulus: &Self) -> Result<Self, IntegerError> {
        if !modulus.is_positive() {
            return Err(IntegerError::InvalidModulus);
        }
        let remainder = self.remainder(modulus)?;
        if remainder.is_negative() {
            Ok(remainder.add(modulus))
        } else {
            Ok(remainder)
        }
    }

    /// `self^exponent` by square-and-multiply
    pub fn pow(&self, exponent: u32) -> Self {
        let mut result = Self::one();
        let mut square = self.clone();
        let mut e = exponent;
        while e > 0 {
            if e & 1 == 1 {
                result = result.multiply(&square);
            }
            e >>= 1;
            if e > 0 {
                square = square.multiply(&square);
            }
        }
        result
    }

    /// `self^exponent mod modulus`, reduced after every product
    ///
    /// A negative exponent raises the modular inverse instead.
    ///
    /// # Errors
    /// - `InvalidModulus` unless `modulus > 0`
    /// - `NotInvertible` for a negative exponent when `gcd(self, modulus) != 1`
    pub fn mod_pow(&self, exponent: &Self, modulus: &Self) -> Result<Self, IntegerError> {
        if !modulus.is_positive() {
            return Err(IntegerError::InvalidModulus);
        }
        let base = if exponent.is_negative() {
            self.mod_inverse(modulus)?
        } else {
            self.modulo(modulus)?
        };
        Ok(Self::from_parts(
            Sign::Positive,
            magnitude::mod_pow(&base.magnitude, &exponent.magnitude, &modulus.magnitude),
        ))
    }

    /// Greatest common divisor, always nonnegative; `gcd(0, 0) = 0`
    pub fn gcd(&self, other: &Self) -> Self {
        let mut a = self.magnitude.clone();
        let mut b = other.magnitude.clone();
        while !b.is_empty() {
            let (_, r) = magnitude::divrem(&a, &b);
            a = std::mem::replace(&mut b, r);
        }
        Self::from_parts(Sign::Positive, a)
    }

    /// Extended Euclid: returns `(a, b, g)` with `a*self + b*other = g`
    ///
    /// `g` is the nonnegative gcd.
    ///
    /// # Example
    /// ```
    /// use bigmath_core_rs::BigInteger;
    ///
    /// let x = BigInteger::value_of(240);
    /// let y = BigInteger::value_of(46);
    /// let (a, b, g) = x.ext_gcd(&y);
    /// assert_eq!(g, BigInteger::value_of(2));
    /// assert_eq!(a.multiply(&x).add(&b.multiply(&y)), g);
    /// ```
    pub fn ext_gcd(&self, other: &Self) -> (Self, Self, Self) {
        let mut old_r = self.abs();
        let mut r = other.abs();
        let (mut old_s, mut s) = (Self::one(), Self::zero());
        let (mut old_t, mut t) = (Self::zero(), Self::one());

        while !r.is_zero() {
            let (q, rem) = magnitude::divrem(&old_r.magnitude, &r.magnitude);
            let q = Self::from_parts(Sign::Positive, q);
            old_r = std::mem::replace(&mut r, Self::from_parts(Sign::Positive, rem));
            let next_s = old_s.subtract(&q.multiply(&s));
            old_s = std::mem::replace(&mut s, next_s);
            let next_t = old_t.subtract(&q.multiply(&t));
            old_t = std::mem::replace(&mut t, next_t);
        }

        // The loop ran on absolute values; fold the signs back in.
        let a = if self.is_negative() { old_s.negate() } else { old_s };
        let b = if other.is_negative() { old_t.negate() } else { old_t };
        (a, b, old_r)
    }

    /// Inverse of `self` modulo `modulus`, in `[0, modulus)`
    ///
    /// # Errors
    /// - `InvalidModulus` unless `modulus > 0`
    /// - `NotInvertible` when `gcd(self, modulus) != 1`
    pub fn mod_inverse(&self, modulus: &Self) -> Result<Self, IntegerError> {
        if !modulus.is_positive() {
            return Err(IntegerError::InvalidModulus);
        }
        let reduced = self.modulo(modulus)?;
        let (a, _, g) = reduced.ext_gcd(modulus);
        if !g.is_one() {
            return Err(IntegerError::NotInvertible);
        }
        a.modulo(modulus)
    }
}

/// `lhs + (sign, magnitude)`
fn add_signed(lhs: &BigInteger, sign: Sign, magnitude: &[u16]) -> BigInteger {
    if sign == Sign::Zero {
        return lhs.clone();
    }
    if lhs.is_zero() {
        return BigInteger::from_parts(sign, magnitude.to_vec());
    }
    if lhs.sign == sign {
        return BigInteger::from_parts(sign, magnitude::add(&lhs.magnitude, magnitude));
    }
    match magnitude::cmp(&lhs.magnitude, magnitude) {
        Ordering::Equal => BigInteger::zero(),
        Ordering::Greater => {
            BigInteger::from_parts(lhs.sign, magnitude::sub(&lhs.magnitude, magnitude))
        }
        Ordering::Less => BigInteger::from_parts(sign, magnitude::sub(magnitude, &lhs.magnitude)),
    }
}

// ============================================================================
// Operator traits
// ============================================================================

macro_rules! forward_binop {
    ($imp:ident, $method:ident, $inherent:ident) => {
        impl $imp<&BigInteger> for &BigInteger {
            type Output = BigInteger;

            fn $method(self, other: &BigInteger) -> BigInteger {
                BigInteger::$inherent(self, other)
            }
        }

        impl $imp<BigInteger> for BigInteger {
            type Output = BigInteger;

            fn $method(self, other: BigInteger) -> BigInteger {
                BigInteger::$inherent(&self, &other)
            }
        }

        impl $imp<&BigInteger> for BigInteger {
            type Output = BigInteger;

            fn $method(self, other: &BigInteger) -> BigInteger {
                BigInteger::$inherent(&self, other)
            }
        }

        impl $imp<BigInteger> for &BigInteger {
            type Output = BigInteger;

            fn $method(self, other: BigInteger) -> BigInteger {
                BigInteger::$inherent(self, &other)
            }
        }
    };
}

pub(crate) use forward_binop;

forward_binop!(Add, add, add);
forward_binop!(Sub, sub, subtract);
forward_binop!(Mul, mul, multiply);

impl Neg for BigInteger {
    type Output = BigInteger;

    fn neg(self) -> BigInteger {
        BigInteger {
            sign: -self.sign,
            magnitude: self.magnitude,
        }
    }
}

impl Neg for &BigInteger {
    type Output = BigInteger;

    fn neg(self) -> BigInteger {
        self.negate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(v: i64) -> BigInteger {
        BigInteger::value_of(v)
    }

    #[test]
    fn test_add_mixed_signs() {
        assert_eq!(int(5).add(&int(-8)), int(-3));
        assert_eq!(int(-5).add(&int(8)), int(3));
        assert_eq!(int(-5).add(&int(-8)), int(-13));
        assert_eq!(int(70000).add(&int(-70000)), BigInteger::zero());
    }

    #[test]
    fn test_subtract_crosses_zero() {
        assert_eq!(int(3).subtract(&int(10)), int(-7));
        assert_eq!(int(-3).subtract(&int(-3)), BigInteger::zero());
        assert_eq!(BigInteger::zero().subtract(&int(4)), int(-4));
    }

    #[test]
    fn test_multiply_signs() {
        assert_eq!(int(-4).multiply(&int(6)), int(-24));
        assert_eq!(int(-4).multiply(&int(-6)), int(24));
        assert_eq!(int(-4).multiply(&BigInteger::zero()), BigInteger::zero());
    }

    #[test]
    fn test_truncating_division_signs() {
        let cases = [(7, 2, 3, 1), (-7, 2, -3, -1), (7, -2, -3, 1), (-7, -2, 3, -1)];
        for (a, b, q, r) in cases {
            let (quot, rem) = int(a).divide_and_remainder(&int(b)).unwrap();
            assert_eq!((quot, rem), (int(q), int(r)), "{} / {}", a, b);
        }
    }

    #[test]
    fn test_division_by_zero_fails() {
        assert_eq!(
            int(1).divide_and_remainder(&BigInteger::zero()),
            Err(IntegerError::DivisionByZero)
        );
        assert_eq!(int(1).divide(&BigInteger::zero()), Err(IntegerError::DivisionByZero));
    }

    #[test]
    fn test_modulo_is_nonnegative() {
        assert_eq!(int(-7).modulo(&int(3)), Ok(int(2)));
        assert_eq!(int(7).modulo(&int(3)), Ok(int(1)));
        assert_eq!(int(-6).modulo(&int(3)), Ok(BigInteger::zero()));
    }

    #[test]
    fn test_modulo_rejects_non_positive() {
        assert_eq!(int(100).modulo(&int(-3)), Err(IntegerError::InvalidModulus));
        assert_eq!(
            int(100).modulo(&BigInteger::zero()),
            Err(IntegerError::InvalidModulus)
        );
    }

    #[test]
    fn test_pow_edges() {
        assert_eq!(int(2).pow(10), int(1024));
        assert_eq!(int(-3).pow(3), int(-27));
        assert_eq!(int(0).pow(0), int(1));
        assert_eq!(int(5).pow(1), int(5));
    }

    #[test]
    fn test_mod_pow_negative_base_and_exponent() {
        // (-2)^3 mod 5 = -8 mod 5 = 2
        assert_eq!(int(-2).mod_pow(&int(3), &int(5)), Ok(int(2)));
        // 3^-1 mod 7 = 5
        assert_eq!(int(3).mod_pow(&int(-1), &int(7)), Ok(int(5)));
        assert_eq!(
            int(2).mod_pow(&int(-1), &int(4)),
            Err(IntegerError::NotInvertible)
        );
        assert_eq!(int(9).mod_pow(&int(9), &int(1)), Ok(BigInteger::zero()));
    }

    #[test]
    fn test_gcd() {
        assert_eq!(int(-12).gcd(&int(18)), int(6));
        assert_eq!(int(0).gcd(&int(-5)), int(5));
        assert_eq!(int(0).gcd(&int(0)), BigInteger::zero());
    }

    #[test]
    fn test_ext_gcd_negative_inputs() {
        for (x, y) in [(-240, 46), (240, -46), (-7, -3), (0, 9), (9, 0)] {
            let (x, y) = (int(x), int(y));
            let (a, b, g) = x.ext_gcd(&y);
            assert_eq!(g, x.gcd(&y));
            assert_eq!(a.multiply(&x).add(&b.multiply(&y)), g);
        }
    }

    #[test]
    fn test_mod_inverse() {
        assert_eq!(int(15).mod_inverse(&int(4)), Ok(int(3)));
        assert_eq!(int(-3).mod_inverse(&int(7)), Ok(int(2)));
        assert_eq!(int(6).mod_inverse(&int(9)), Err(IntegerError::NotInvertible));
        assert_eq!(int(6).mod_inverse(&int(-9)), Err(IntegerError::InvalidModulus));
    }

    #[test]
    fn test_operators_match_methods() {
        let (a, b) = (int(1234), int(-99));
        assert_eq!(&a + &b, BigInteger::add(&a, &b));
        assert_eq!(&a - &b, a.subtract(&b));
        assert_eq!(a.clone() * b.clone(), a.multiply(&b));
        assert_eq!(-a.clone(), int(-1234));
        assert_eq!(-&b, int(99));
    }
}
