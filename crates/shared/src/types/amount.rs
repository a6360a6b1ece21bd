//! Amount tolerance for decimal money.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal`; the tolerance only absorbs sub-cent
//! residue from splits supplied with more precision than the currency has.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default tolerance: one minor unit (0.01) of a two-decimal currency.
pub const DEFAULT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Default number of decimal places for allocated amounts.
pub const DEFAULT_SCALE: u32 = 2;

/// Threshold under which an amount counts as zero.
///
/// A value `x` is negligible when `|x| < tolerance` and significant when
/// `|x| > tolerance`; a value of exactly the tolerance is neither. Every
/// "is this settled" or "are these equal" comparison in the engine goes
/// through this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Tolerance(Decimal);

/// Error returned when constructing a tolerance from a non-positive value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Tolerance must be positive, got {0}")]
pub struct InvalidTolerance(pub Decimal);

impl Tolerance {
    /// Creates a tolerance, rejecting zero and negative values.
    pub fn new(value: Decimal) -> Result<Self, InvalidTolerance> {
        if value <= Decimal::ZERO {
            return Err(InvalidTolerance(value));
        }
        Ok(Self(value))
    }

    /// Returns the raw threshold.
    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }

    /// Returns true if `amount` is within tolerance of zero.
    #[must_use]
    pub fn is_negligible(self, amount: Decimal) -> bool {
        amount.abs() < self.0
    }

    /// Returns true if `amount` is strictly further from zero than the tolerance.
    #[must_use]
    pub fn exceeds(self, amount: Decimal) -> bool {
        amount.abs() > self.0
    }

    /// Returns true if `a` and `b` differ by at most the tolerance.
    #[must_use]
    pub fn approx_eq(self, a: Decimal, b: Decimal) -> bool {
        !self.exceeds(a - b)
    }

    /// Returns true if `amount` is greater than the tolerance.
    #[must_use]
    pub fn is_significant_credit(self, amount: Decimal) -> bool {
        amount > self.0
    }

    /// Returns true if `amount` is less than the negated tolerance.
    #[must_use]
    pub fn is_significant_debt(self, amount: Decimal) -> bool {
        amount < -self.0
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self(DEFAULT_TOLERANCE)
    }
}

impl TryFrom<Decimal> for Tolerance {
    type Error = InvalidTolerance;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Tolerance> for Decimal {
    fn from(tolerance: Tolerance) -> Self {
        tolerance.0
    }
}

impl std::fmt::Display for Tolerance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
