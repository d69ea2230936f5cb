//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The backend speaks JSON numbers in euros:                              │
//! │    { "unitPrice": 19.99, "quantity": 3, "discount": 0.1 }               │
//! │                                                                         │
//! │  Folding those as floats drifts:                                        │
//! │    19.99 × 3 − 0.1 = 59.870000000000005                                 │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Convert ONCE at the serde boundary (rounded to the nearest cent),    │
//! │    then do every sum, product and comparison on i64 cents.              │
//! │    1999 × 3 − 10 = 5987 cents, exactly.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shelf_core::money::Money;
//!
//! let price = Money::from_cents(1999); // €19.99
//! let line = price.multiply_quantity(3) - Money::from_cents(10);
//! assert_eq!(line.cents(), 5987);
//!
//! // Input fields arrive as text
//! assert_eq!(Money::parse_major("19.99"), Some(price));
//! assert_eq!(Money::parse_major("abc"), None);
//! ```

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

/// Number of minor units in one major unit (cents per euro).
const MINOR_PER_MAJOR: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: a line whose discount exceeds its gross is negative,
///   and the sale total is allowed to follow it
/// - **Wire format**: serialized as a JSON number in major units (`12.5`),
///   because that is what the backend stores and returns
///
/// ## Where Money Flows
/// ```text
/// SaleItemRecord.unit_price ─┐
/// SaleItemRecord.discount ───┼──► line_total() ──► recompute() ──► total_amount
/// SaleItemRecord.quantity ───┘
///
/// ProductFormData.price (text) ──► parse_major() ──► ProductPayload.price
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use shelf_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // €10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal major-unit amount into Money, rounding to the
    /// nearest cent.
    ///
    /// Returns `None` for NaN, infinities and values outside the i64 cent
    /// range.
    ///
    /// ## Example
    /// ```rust
    /// use shelf_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(12.5), Some(Money::from_cents(1250)));
    /// assert_eq!(Money::from_major(0.1 + 0.2), Some(Money::from_cents(30)));
    /// assert_eq!(Money::from_major(f64::NAN), None);
    /// ```
    pub fn from_major(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }

        let cents = (amount * MINOR_PER_MAJOR as f64).round();
        if cents < i64::MIN as f64 || cents > i64::MAX as f64 {
            return None;
        }

        Some(Money(cents as i64))
    }

    /// Parses a major-unit amount typed into a form field.
    ///
    /// Surrounding whitespace is ignored. Anything that is not a plain
    /// finite decimal number (`"12"`, `"12.50"`, `"-3"`, `"1e2"`) yields
    /// `None`.
    pub fn parse_major(input: &str) -> Option<Self> {
        input
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Money::from_major)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the value in major units, for the wire and for display only.
    #[inline]
    pub fn to_major(&self) -> f64 {
        self.0 as f64 / MINOR_PER_MAJOR as f64
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use shelf_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        // Use i128 so absurd line items clamp instead of overflowing
        Money(saturate(self.0 as i128 * qty as i128))
    }
}

/// Clamps a wide intermediate back into the i64 cent range.
#[inline]
const fn saturate(cents: i128) -> i64 {
    if cents > i64::MAX as i128 {
        i64::MAX
    } else if cents < i64::MIN as i128 {
        i64::MIN
    } else {
        cents as i64
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

// Arithmetic saturates at the i64 cent bounds.

/// Plain `12.50` / `-3.05` rendering without a currency symbol.
///
/// The symbol is a display setting; see `ClientConfig::format_currency`
/// in the client crate.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(
            f,
            "{}{}.{:02}",
            sign,
            abs / MINOR_PER_MAJOR as u64,
            abs % MINOR_PER_MAJOR as u64
        )
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

/// Serialized as a JSON number in major units.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_major())
    }
}

/// Strict: the value must be a finite number. Lenient decoding for
/// hand-edited line items lives in `serde_helpers`.
impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Money::from_major(amount)
            .ok_or_else(|| de::Error::custom(format!("amount out of range: {amount}")))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_major_rounds_to_cent() {
        assert_eq!(Money::from_major(19.99).map(|m| m.cents()), Some(1999));
        assert_eq!(Money::from_major(0.005).map(|m| m.cents()), Some(1));
        assert_eq!(Money::from_major(-2.5).map(|m| m.cents()), Some(-250));
        assert_eq!(Money::from_major(f64::INFINITY), None);
        assert_eq!(Money::from_major(1e300), None);
    }

    #[test]
    fn test_parse_major() {
        assert_eq!(Money::parse_major(" 10 "), Some(Money::from_cents(1000)));
        assert_eq!(Money::parse_major("0.01"), Some(Money::from_cents(1)));
        assert_eq!(Money::parse_major(""), None);
        assert_eq!(Money::parse_major("ten"), None);
        assert_eq!(Money::parse_major("NaN"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(250);

        assert_eq!((a + b).cents(), 1250);
        assert_eq!((a - b).cents(), 750);
        assert_eq!((a * 3).cents(), 3000);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 1500);
    }

    #[test]
    fn test_cent_arithmetic_is_exact() {
        let price = Money::from_major(19.99).unwrap_or_default();
        let discount = Money::from_major(0.1).unwrap_or_default();
        assert_eq!(price.multiply_quantity(3) - discount, Money::from_cents(5987));
    }

    #[test]
    fn test_arithmetic_saturates_at_bounds() {
        let huge = Money::from_cents(i64::MAX / 2);
        assert_eq!(huge.multiply_quantity(3), Money::from_cents(i64::MAX));
        assert_eq!(huge.multiply_quantity(-3), Money::from_cents(i64::MIN));
        assert_eq!(huge + huge + huge, Money::from_cents(i64::MAX));
        assert_eq!(Money::from_cents(i64::MIN) - huge, Money::from_cents(i64::MIN));

        let total: Money = vec![huge, huge, huge].into_iter().sum();
        assert_eq!(total, Money::from_cents(i64::MAX));
    }

    #[test]
    fn test_serde_uses_major_units() {
        let json = serde_json::to_string(&Money::from_cents(1250)).unwrap();
        assert_eq!(json, "12.5");

        let back: Money = serde_json::from_str("12.5").unwrap();
        assert_eq!(back.cents(), 1250);

        assert!(serde_json::from_str::<Money>("\"12.5\"").is_err());
    }
}
