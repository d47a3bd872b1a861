//! Money with precise decimal arithmetic
//!
//! This module provides a type-safe representation of monetary values using
//! rust_decimal for precise calculations without floating-point errors.
//!
//! The system is single-currency: every amount carries exactly two fractional
//! digits, established at construction with round-half-to-even (banker's
//! rounding). All arithmetic after that point is exact, so totals and change
//! never accumulate rounding drift.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};

/// A monetary amount with two fractional digits
///
/// `Money::new` normalizes the value to 2 decimal places using banker's
/// rounding (`round_dp`'s `MidpointNearestEven` default). Addition,
/// subtraction and integer multiplication preserve that scale exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Creates a Money value, rounding to 2 decimal places half-to-even
    pub fn new(amount: Decimal) -> Self {
        Self(amount.round_dp(2))
    }

    /// Creates Money from an integer amount of minor units (kopecks/cents)
    pub fn from_minor(minor_units: i64) -> Self {
        Self(Decimal::new(minor_units, 2))
    }

    /// A zero amount
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Returns the underlying decimal amount
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is strictly greater than zero
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Returns true if the amount is less than zero
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Returns the absolute value
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Formats the amount for a printed receipt
    ///
    /// Exactly two fractional digits, integer digits grouped in threes with
    /// a single space separator: `1516610.00` renders as `"1 516 610.00"`.
    /// This formatting applies uniformly to unit prices, subtotals, totals,
    /// payment amounts and change.
    pub fn format_grouped(&self) -> String {
        let fixed = self.two_dp_string();
        let (sign, unsigned) = match fixed.strip_prefix('-') {
            Some(rest) => ("-", rest.to_string()),
            None => ("", fixed),
        };
        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((i, f)) => (i.to_string(), f.to_string()),
            None => (unsigned, "00".to_string()),
        };

        let digits = int_part.len();
        let mut grouped = String::with_capacity(digits + digits / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (digits - i) % 3 == 0 {
                grouped.push(' ');
            }
            grouped.push(ch);
        }

        format!("{sign}{grouped}.{frac_part}")
    }

    /// Plain decimal text with exactly two fractional digits
    fn two_dp_string(&self) -> String {
        let mut value = self.0.round_dp(2);
        value.rescale(2);
        value.to_string()
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.two_dp_string())
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

/// Multiplication by a quantity, for line subtotals
impl Mul<i64> for Money {
    type Output = Self;

    fn mul(self, quantity: i64) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, m| acc + m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn new_rounds_half_to_even() {
        assert_eq!(Money::new(dec!(10.005)).amount(), dec!(10.00));
        assert_eq!(Money::new(dec!(10.015)).amount(), dec!(10.02));
        assert_eq!(Money::new(dec!(10.025)).amount(), dec!(10.02));
        assert_eq!(Money::new(dec!(10.035)).amount(), dec!(10.04));
    }

    #[test]
    fn from_minor_scales_to_two_places() {
        assert_eq!(Money::from_minor(1099).amount(), dec!(10.99));
        assert_eq!(Money::from_minor(-550).amount(), dec!(-5.50));
    }

    #[test]
    fn arithmetic_is_exact() {
        let a = Money::new(dec!(10.00));
        let b = Money::new(dec!(2.50));

        assert_eq!((a + b).amount(), dec!(12.50));
        assert_eq!((a - b).amount(), dec!(7.50));
        assert_eq!((b * 4).amount(), dec!(10.00));
    }

    #[test]
    fn sum_of_line_subtotals() {
        let items = [Money::new(dec!(298870.00)) * 3, Money::new(dec!(31000.00)) * 20];
        let total: Money = items.into_iter().sum();
        assert_eq!(total.amount(), dec!(1516610.00));
    }

    #[test]
    fn display_always_shows_two_fraction_digits() {
        assert_eq!(Money::new(dec!(40)).to_string(), "40.00");
        assert_eq!(Money::new(dec!(5.5)).to_string(), "5.50");
        assert_eq!(Money::new(dec!(0)).to_string(), "0.00");
    }

    #[test]
    fn grouped_formatting_inserts_space_separators() {
        assert_eq!(Money::new(dec!(1516610.00)).format_grouped(), "1 516 610.00");
        assert_eq!(Money::new(dec!(298870.00)).format_grouped(), "298 870.00");
        assert_eq!(Money::new(dec!(620000.00)).format_grouped(), "620 000.00");
        assert_eq!(Money::new(dec!(1000)).format_grouped(), "1 000.00");
        assert_eq!(Money::new(dec!(999.99)).format_grouped(), "999.99");
        assert_eq!(Money::new(dec!(0)).format_grouped(), "0.00");
    }

    #[test]
    fn grouped_formatting_handles_negative_amounts() {
        assert_eq!(Money::new(dec!(-1234.56)).format_grouped(), "-1 234.56");
    }

    #[test]
    fn sign_checks() {
        assert!(Money::new(dec!(0.01)).is_positive());
        assert!(!Money::zero().is_positive());
        assert!(Money::new(dec!(-0.01)).is_negative());
        assert!(Money::zero().is_zero());
    }

    #[test]
    fn serde_is_transparent() {
        let money = Money::new(dec!(40.00));
        let json = serde_json::to_string(&money).unwrap();
        assert_eq!(json, "\"40.00\"");

        let back: Money = serde_json::from_str("\"10.5\"").unwrap();
        assert_eq!(back.amount(), dec!(10.50));
    }
}
