//! Errors raised by integer operations

use thiserror::Error;

/// Errors that can occur during integer arithmetic and conversion
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IntegerError {
    /// Division or remainder with a zero divisor.
    ///
    /// Reported explicitly rather than through a sentinel value.
    #[error("Division by zero")]
    DivisionByZero,

    #[error("Modulus must be positive")]
    InvalidModulus,

    #[error("Value is not invertible: gcd with modulus is not 1")]
    NotInvertible,

    #[error("Value does not fit in the target type")]
    Overflow,

    #[error("Parse error: {0}")]
    Parse(#[from] ParseIntegerError),
}

/// Reasons a string cannot be read as an integer
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseIntegerError {
    #[error("empty input")]
    Empty,

    /// A sign or radix prefix with nothing after it
    #[error("no digits after sign or prefix")]
    MissingDigits,

    #[error("invalid digit '{digit}' for radix {radix}")]
    InvalidDigit { digit: char, radix: u32 },

    #[error("radix {0} outside 2..=36")]
    InvalidRadix(u32),
}
