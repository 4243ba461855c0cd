//! Conversion between integers and digit strings
//!
//! Both directions work in chunks: a chunk is a run of digits whose value
//! fits a `u64` accumulator with one limb of headroom, so chunk arithmetic
//! never overflows. Printing divides the magnitude by the chunk base
//! ("super-radix") and formats each chunk; parsing halves the chunk list to
//! peel off magnitude bits least significant first.

use std::fmt;
use std::str::FromStr;

use super::magnitude::{self, Limb, LIMB_BITS};
use super::{BigInteger, IntegerError, ParseIntegerError, Sign};

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Bits a chunk value may occupy.
///
/// A remainder below the super-radix gets shifted up by one limb during short
/// division, and the halving borrow doubles a chunk, so one limb plus one bit
/// of the accumulator stay free.
const CHUNK_BITS: u32 = u64::BITS - LIMB_BITS - 1;

/// Largest power of `radix` below `2^CHUNK_BITS`, and its digit count.
fn chunk_base(radix: u32) -> (u64, usize) {
    let bound = 1u64 << CHUNK_BITS;
    let radix = u64::from(radix);
    let (mut base, mut digits) = (radix, 1);
    while base * radix < bound {
        base *= radix;
        digits += 1;
    }
    (base, digits)
}

fn valid_radix(radix: u32) -> bool {
    (2..=36).contains(&radix)
}

impl BigInteger {
    /// Parse with radix auto-detection
    ///
    /// Whitespace anywhere is ignored. After an optional `+`/`-`, a `0x`
    /// prefix selects hexadecimal, `0b` binary, a leading `0` octal, and
    /// anything else decimal.
    ///
    /// # Example
    /// ```
    /// use bigmath_core_rs::BigInteger;
    ///
    /// assert_eq!(BigInteger::parse("-0x1F").unwrap(), BigInteger::value_of(-31));
    /// assert_eq!(BigInteger::parse("017").unwrap(), BigInteger::value_of(15));
    /// assert_eq!(BigInteger::parse(" 12 345 ").unwrap(), BigInteger::value_of(12345));
    /// assert!(BigInteger::parse("0x").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, IntegerError> {
        parse_digits(text, None)
    }

    /// Parse digits in an explicit radix (no prefix detection)
    pub fn parse_radix(text: &str, radix: u32) -> Result<Self, IntegerError> {
        parse_digits(text, Some(radix))
    }

    /// Format in `radix`: optional `-`, then digits `0-9a-z`
    ///
    /// # Panics
    /// Panics if `radix` is outside `2..=36`
    pub fn to_str_radix(&self, radix: u32) -> String {
        assert!(valid_radix(radix), "radix must be in 2..=36");
        let digits = magnitude_digits(&self.magnitude, radix);
        if self.is_negative() {
            format!("-{}", digits)
        } else {
            digits
        }
    }
}

fn parse_digits(text: &str, explicit_radix: Option<u32>) -> Result<BigInteger, IntegerError> {
    let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return Err(ParseIntegerError::Empty.into());
    }

    let (sign, body) = match cleaned.as_bytes()[0] {
        b'-' => (Sign::Negative, &cleaned[1..]),
        b'+' => (Sign::Positive, &cleaned[1..]),
        _ => (Sign::Positive, cleaned.as_str()),
    };

    let (radix, digits) = match explicit_radix {
        Some(radix) if !valid_radix(radix) => {
            return Err(ParseIntegerError::InvalidRadix(radix).into());
        }
        Some(radix) => (radix, body),
        None => detect_radix(body),
    };
    if digits.is_empty() {
        return Err(ParseIntegerError::MissingDigits.into());
    }

    let values = digits
        .chars()
        .map(|c| {
            c.to_digit(radix)
                .ok_or(ParseIntegerError::InvalidDigit { digit: c, radix })
        })
        .collect::<Result<Vec<u32>, _>>()?;

    Ok(BigInteger::from_parts(sign, magnitude_from_digits(&values, radix)))
}

/// Split off a radix prefix: `0x`, `0b`, or a leading `0` for octal.
fn detect_radix(body: &str) -> (u32, &str) {
    let prefix = body.get(..2).map(str::to_ascii_lowercase);
    match prefix.as_deref() {
        Some("0x") => (16, &body[2..]),
        Some("0b") => (2, &body[2..]),
        _ if body.len() > 1 && body.starts_with('0') => (8, &body[1..]),
        _ => (10, body),
    }
}

/// Build a magnitude from most-significant-first digit values.
fn magnitude_from_digits(digits: &[u32], radix: u32) -> Vec<Limb> {
    let (base, width) = chunk_base(radix);
    let head = digits.len() % width;
    let mut chunks: Vec<u64> = Vec::with_capacity(digits.len() / width + 1);
    let mut push_chunk = |group: &[u32]| {
        chunks.push(
            group
                .iter()
                .fold(0u64, |acc, &d| acc * u64::from(radix) + u64::from(d)),
        );
    };
    if head > 0 {
        push_chunk(&digits[..head]);
    }
    for group in digits[head..].chunks(width) {
        push_chunk(group);
    }

    let mut limbs: Vec<Limb> = Vec::new();
    let mut bit = 0usize;
    strip_leading_zero_chunks(&mut chunks);
    while !chunks.is_empty() {
        let mut borrow = 0u64;
        for chunk in chunks.iter_mut() {
            let current = borrow * base + *chunk;
            *chunk = current / 2;
            borrow = current % 2;
        }
        if borrow == 1 {
            let index = bit / LIMB_BITS as usize;
            if limbs.len() <= index {
                limbs.resize(index + 1, 0);
            }
            limbs[index] |= 1 << (bit % LIMB_BITS as usize);
        }
        bit += 1;
        strip_leading_zero_chunks(&mut chunks);
    }
    limbs
}

fn strip_leading_zero_chunks(chunks: &mut Vec<u64>) {
    let leading = chunks.iter().take_while(|&&c| c == 0).count();
    chunks.drain(..leading);
}

/// Digits of an unsigned magnitude, no sign and no leading zeros.
fn magnitude_digits(limbs: &[Limb], radix: u32) -> String {
    if limbs.is_empty() {
        return "0".to_string();
    }
    let (base, width) = chunk_base(radix);
    let mut chunks = Vec::new();
    let mut rest = limbs.to_vec();
    while !rest.is_empty() {
        let (quotient, chunk) = magnitude::divrem_small(&rest, base);
        chunks.push(chunk);
        rest = quotient;
    }

    let mut out = String::with_capacity(chunks.len() * width);
    for (i, &chunk) in chunks.iter().rev().enumerate() {
        let pad = if i == 0 { 0 } else { width };
        push_chunk_digits(&mut out, chunk, radix, pad);
    }
    out
}

fn push_chunk_digits(out: &mut String, mut chunk: u64, radix: u32, pad: usize) {
    let mut buf = Vec::with_capacity(pad.max(1));
    while chunk > 0 {
        buf.push(DIGITS[(chunk % u64::from(radix)) as usize]);
        chunk /= u64::from(radix);
    }
    while buf.len() < pad.max(1) {
        buf.push(b'0');
    }
    out.extend(buf.iter().rev().map(|&b| b as char));
}

impl FromStr for BigInteger {
    type Err = IntegerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BigInteger::parse(s)
    }
}

impl fmt::Display for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.is_negative(), "", &magnitude_digits(&self.magnitude, 10))
    }
}

impl fmt::LowerHex for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.is_negative(), "0x", &magnitude_digits(&self.magnitude, 16))
    }
}

impl fmt::Octal for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.is_negative(), "0o", &magnitude_digits(&self.magnitude, 8))
    }
}

impl fmt::Binary for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.is_negative(), "0b", &magnitude_digits(&self.magnitude, 2))
    }
}
