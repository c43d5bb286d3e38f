//! # Money Module
//!
//! Provides the `Money` type for handling prices safely.
//!
//! ## Whole Currency Units
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PRICES ARE WHOLE WON                                                   │
//! │                                                                         │
//! │  The won has no minor unit in everyday use, so a book priced            │
//! │  15,000원 is stored as the integer 15000. There is no fractional part   │
//! │  anywhere in the system, and no floating point ever touches a price.    │
//! │                                                                         │
//! │    Book.price ──► CartItem line total ──► Cart total ──► Purchase      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use folio_core::money::Money;
//!
//! let price = Money::from_won(15_000);
//! let line_total = price * 2;
//! assert_eq!(line_total.won(), 30_000);
//! assert_eq!(line_total.to_string(), "30,000원");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A price or total in whole won.
///
/// Serializes as a bare integer, which is the shape stored under the
/// `purchases_<userId>` keys and sent to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export, type = "number")]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole won.
    #[inline]
    pub const fn from_won(won: i64) -> Self {
        Money(won)
    }

    /// Returns the value in whole won.
    #[inline]
    pub const fn won(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity, saturating at the `i64` bounds.
    ///
    /// ## Example
    /// ```rust
    /// use folio_core::money::Money;
    ///
    /// let unit_price = Money::from_won(12_500);
    /// assert_eq!(unit_price.multiply_quantity(3).won(), 37_500);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }

    /// Formats the amount with thousands separators and the given suffix.
    ///
    /// ## Example
    /// ```rust
    /// use folio_core::money::Money;
    ///
    /// assert_eq!(Money::from_won(1_234_567).format_with_suffix(" KRW"), "1,234,567 KRW");
    /// assert_eq!(Money::from_won(-5_000).format_with_suffix("원"), "-5,000원");
    /// ```
    pub fn format_with_suffix(&self, suffix: &str) -> String {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{sign}{grouped}{suffix}")
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display renders the amount the way the storefront prints prices.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_suffix("원"))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
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

/// Multiplication by a line quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_won() {
        let money = Money::from_won(15_000);
        assert_eq!(money.won(), 15_000);
        assert!(!money.is_zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_won(0).to_string(), "0원");
        assert_eq!(Money::from_won(999).to_string(), "999원");
        assert_eq!(Money::from_won(1_000).to_string(), "1,000원");
        assert_eq!(Money::from_won(22_000).to_string(), "22,000원");
        assert_eq!(Money::from_won(1_000_000).to_string(), "1,000,000원");
        assert_eq!(Money::from_won(-15_500).to_string(), "-15,500원");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_won(1_000);
        let b = Money::from_won(500);

        assert_eq!((a + b).won(), 1_500);
        assert_eq!((a - b).won(), 500);
        assert_eq!((a * 3).won(), 3_000);

        let mut acc = Money::zero();
        acc += a;
        assert_eq!(acc, a);
    }

    #[test]
    fn test_sum() {
        let total: Money = [1_000, 2_000, 3_500]
            .into_iter()
            .map(Money::from_won)
            .sum();
        assert_eq!(total.won(), 6_500);

        let empty: Money = std::iter::empty().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_arithmetic_saturates() {
        let price = Money::from_won(3_000_000_000);
        assert_eq!(price.multiply_quantity(u32::MAX).won(), i64::MAX);

        let total: Money = [Money::from_won(i64::MAX), price].into_iter().sum();
        assert_eq!(total.won(), i64::MAX);

        assert_eq!((Money::from_won(i64::MIN) - price).won(), i64::MIN);
    }

    #[test]
    fn test_serializes_as_integer() {
        let json = serde_json::to_string(&Money::from_won(18_000)).unwrap();
        assert_eq!(json, "18000");

        let back: Money = serde_json::from_str("18000").unwrap();
        assert_eq!(back.won(), 18_000);
    }
}
