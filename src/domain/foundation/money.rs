//! Amount value object for non-negative monetary values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

use super::ValidationError;

/// A non-negative, finite amount of money (BRL).
///
/// Amounts are validated where they enter the system; everything past that
/// boundary may assume the value is `>= 0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Amount(f64);

impl Amount {
    /// Zero.
    pub const ZERO: Self = Self(0.0);

    /// Largest accepted amount (one quadrillion reais).
    pub const MAX: Self = Self(1e15);

    /// Creates an Amount from a whole number of reais.
    pub const fn from_whole(value: u32) -> Self {
        Self(value as f64)
    }

    /// Creates an Amount, rejecting negative or non-finite values.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        Self::validated("amount", value)
    }

    /// Parses user input for a bucket.
    ///
    /// Blank input counts as zero. Both `1234.5` and `1234,5` are accepted;
    /// when both separators appear, `.` is read as the thousands separator
    /// (`1.234,50`).
    pub fn parse(field: &str, input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(Self::ZERO);
        }

        let normalized = if trimmed.contains(',') && trimmed.contains('.') {
            trimmed.replace('.', "").replace(',', ".")
        } else {
            trimmed.replace(',', ".")
        };

        let value: f64 = normalized.parse().map_err(|_| {
            ValidationError::invalid_format(field, format!("'{}' is not a number", trimmed))
        })?;

        Self::validated(field, value)
    }

    fn validated(field: &str, value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::invalid_format(field, "must be a finite number"));
        }
        if value < 0.0 {
            return Err(ValidationError::negative(field, value));
        }
        if value > Self::MAX.0 {
            return Err(ValidationError::invalid_format(field, "exceeds R$ 1.000.000.000.000.000"));
        }
        // Normalizes -0.0.
        Ok(Self(value.max(0.0)))
    }

    /// Returns the value as f64.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// True when strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.0 > 0.0
    }

    /// Formats the amount the way Brazilian locale output does:
    /// `.` groups thousands, `,` separates decimals, at most three
    /// fraction digits, no trailing zeros.
    pub fn to_pt_br(&self) -> String {
        let scaled = (self.0 * 1000.0).round() as u128;
        let integer = scaled / 1000;
        let fraction = scaled % 1000;

        let digits = integer.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        if fraction == 0 {
            grouped
        } else {
            let fraction = format!("{:03}", fraction);
            format!("{},{}", grouped, fraction.trim_end_matches('0'))
        }
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0 + rhs.0)
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl TryFrom<f64> for Amount {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Amount> for f64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R$ {}", self.to_pt_br())
    }
}
