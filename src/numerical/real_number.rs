//! # Numeric contract of the Green's-function solver
//!
//! Every computation of the solver is written against the [`Real`] trait: a real number
//! with a working precision (in bits), the four arithmetic operations, ordering, `abs`,
//! `exp`, `pow` and decimal rendering. Two implementations ship with the crate:
//! - `f64`: fixed 53-bit precision, fast path for tests and benchmarks;
//! - `rug::Float`: MPFR-backed arbitrary precision, the precision is chosen per solve.
//!
//! Small integer constants used by the algorithm live in a read-only [`Literals`] table
//! built once per solve at the solve's precision.
//!
//! ## Usage Example
//! ```rust
//! use FifthOrderGreenBVP::numerical::real_number::Real;
//! use rug::Float;
//! let third = Float::from_int(1, 256) / Float::from_int(3, 256);
//! let eps = Float::from_decimal_str("1e-40", 256).unwrap();
//! assert!((third.clone() * Float::from_int(3, 256) - Float::from_int(1, 256)).abs() < eps);
//! ```
use rug::Float;
use rug::ops::Pow;
use std::fmt::{Debug, Display};
use std::ops::{Add, Div, Mul, Neg, Sub};
use thiserror::Error;

/// Returned when a decimal literal cannot be turned into a [`Real`].
#[derive(Debug, Clone, PartialEq, Error)]
#[error("cannot parse '{literal}' as a real number: {reason}")]
pub struct RealParseError {
    pub literal: String,
    pub reason: String,
}

/// Real number of configurable precision.
///
/// Arithmetic is available both between owned values and with a borrowed right-hand side
/// (`a * &b`), so hot loops can avoid needless clones of big numbers.
pub trait Real:
    Clone
    + Debug
    + Display
    + PartialOrd
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + for<'a> Add<&'a Self, Output = Self>
    + for<'a> Sub<&'a Self, Output = Self>
    + for<'a> Mul<&'a Self, Output = Self>
    + for<'a> Div<&'a Self, Output = Self>
{
    /// integer literal at the given precision (bits)
    fn from_int(value: i64, precision: u32) -> Self;
    /// decimal literal such as "0.5", "-0.25" or "1e-15" at the given precision (bits)
    fn from_decimal_str(literal: &str, precision: u32) -> Result<Self, RealParseError>;
    /// working precision in bits
    fn precision(&self) -> u32;
    fn abs(self) -> Self;
    fn exp(self) -> Self;
    /// self raised to the power `exponent`
    fn pow(self, exponent: &Self) -> Self;
    /// decimal representation with `digits` significant digits
    fn to_string_with_digits(&self, digits: usize) -> String;
    /// lossy projection used for logging and comparisons in tests
    fn to_f64(&self) -> f64;
}

impl Real for f64 {
    fn from_int(value: i64, _precision: u32) -> Self {
        value as f64
    }

    fn from_decimal_str(literal: &str, _precision: u32) -> Result<Self, RealParseError> {
        literal.trim().parse::<f64>().map_err(|e| RealParseError {
            literal: literal.to_string(),
            reason: e.to_string(),
        })
    }

    fn precision(&self) -> u32 {
        f64::MANTISSA_DIGITS
    }

    fn abs(self) -> Self {
        f64::abs(self)
    }

    fn exp(self) -> Self {
        f64::exp(self)
    }

    fn pow(self, exponent: &Self) -> Self {
        f64::powf(self, *exponent)
    }

    fn to_string_with_digits(&self, digits: usize) -> String {
        format!("{:.*e}", digits.saturating_sub(1), self)
    }

    fn to_f64(&self) -> f64 {
        *self
    }
}

impl Real for Float {
    fn from_int(value: i64, precision: u32) -> Self {
        Float::with_val(precision, value)
    }

    fn from_decimal_str(literal: &str, precision: u32) -> Result<Self, RealParseError> {
        match Float::parse(literal.trim()) {
            Ok(parsed) => Ok(Float::with_val(precision, parsed)),
            Err(e) => Err(RealParseError {
                literal: literal.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    fn precision(&self) -> u32 {
        self.prec()
    }

    fn abs(self) -> Self {
        Float::abs(self)
    }

    fn exp(self) -> Self {
        Float::exp(self)
    }

    fn pow(self, exponent: &Self) -> Self {
        <Float as Pow<&Float>>::pow(self, exponent)
    }

    fn to_string_with_digits(&self, digits: usize) -> String {
        self.to_string_radix(10, Some(digits.max(1)))
    }

    fn to_f64(&self) -> f64 {
        Float::to_f64(self)
    }
}

/// Read-only table of the integer literals the solver needs, all at one precision.
#[derive(Debug, Clone)]
pub struct Literals<T: Real> {
    pub precision: u32,
    pub zero: T,
    pub one: T,
    pub two: T,
    pub three: T,
    pub four: T,
    pub six: T,
    pub seven: T,
    pub eight: T,
    pub sixteen: T,
    pub twenty_four: T,
    pub thirty: T,
}

impl<T: Real> Literals<T> {
    pub fn new(precision: u32) -> Self {
        let lit = |v: i64| T::from_int(v, precision);
        Self {
            precision,
            zero: lit(0),
            one: lit(1),
            two: lit(2),
            three: lit(3),
            four: lit(4),
            six: lit(6),
            seven: lit(7),
            eight: lit(8),
            sixteen: lit(16),
            twenty_four: lit(24),
            thirty: lit(30),
        }
    }

    /// literal outside the table, built fresh at the table's precision
    pub fn int(&self, value: i64) -> T {
        T::from_int(value, self.precision)
    }
}
