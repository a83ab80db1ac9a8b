//! Type-safe price representation using decimal arithmetic.
//!
//! Küyen sells in Chilean pesos (CLP), which has no minor unit: amounts are
//! whole pesos. Prices serialize as plain JSON numbers so persisted carts
//! and catalog files stay compatible with the documented slot format.

use core::iter::Sum;
use core::ops::{Add, AddAssign};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// ISO 4217 code of the store currency.
pub const CURRENCY_CODE: &str = "CLP";

/// A price in Chilean pesos.
///
/// Wraps a [`Decimal`] so line totals never accumulate float error, while
/// still serializing as a JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// A price of zero pesos.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a whole-peso amount.
    #[must_use]
    pub fn from_pesos(pesos: i64) -> Self {
        Self(Decimal::from(pesos))
    }

    /// Create a price from a raw decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// The line total for `quantity` units at this price.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// Format for display the way the store does: `$89.990`.
    ///
    /// CLP uses `.` as the thousands separator and no decimal places.
    #[must_use]
    pub fn display(&self) -> String {
        let rounded = self.0.round();
        let negative = rounded.is_sign_negative();
        let digits = rounded.abs().to_string();

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 2);
        let chars: Vec<char> = digits.chars().collect();
        for (i, c) in chars.iter().enumerate() {
            if i > 0 && (chars.len() - i).is_multiple_of(3) {
                grouped.push('.');
            }
            grouped.push(*c);
        }

        if negative {
            format!("-${grouped}")
        } else {
            format!("${grouped}")
        }
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pesos() {
        let price = Price::from_pesos(89_990);
        assert_eq!(price.amount(), Decimal::from(89_990));
    }

    #[test]
    fn test_times() {
        let price = Price::from_pesos(10_000);
        assert_eq!(price.times(3), Price::from_pesos(30_000));
        assert_eq!(price.times(0), Price::ZERO);
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::from_pesos(1_000), Price::from_pesos(2_500)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_pesos(3_500));
    }

    #[test]
    fn test_display_grouping() {
        assert_eq!(Price::from_pesos(0).display(), "$0");
        assert_eq!(Price::from_pesos(990).display(), "$990");
        assert_eq!(Price::from_pesos(89_990).display(), "$89.990");
        assert_eq!(Price::from_pesos(1_234_567).display(), "$1.234.567");
    }

    #[test]
    fn test_serializes_as_json_number() {
        let price = Price::from_pesos(74_990);
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "74990.0");

        // Both integer and float JSON numbers deserialize
        let from_int: Price = serde_json::from_str("74990").unwrap();
        let from_float: Price = serde_json::from_str("74990.0").unwrap();
        assert_eq!(from_int, price);
        assert_eq!(from_float, price);
    }
}
