//! # Money Module
//!
//! Provides the `Money` type for prices and totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    19.99 * 2 + 12 = 51.980000000000004                                  │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    1999 * 2 + 1200 = 5198 cents, exactly                                │
//! │                                                                         │
//! │  Totals keep full precision; rounding to two decimals only ever         │
//! │  happens in Display / currency formatting.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use fullstack_core::money::Money;
//!
//! let price: Money = "19.99".parse().unwrap();
//! assert_eq!(price.cents(), 1999);
//!
//! let line_total = price.multiply_quantity(2);
//! assert_eq!(line_total.to_string(), "$39.98");
//! ```
//!
//! ## Overflow
//! Quantities are unbounded, so every operation that combines amounts
//! saturates at `i64::MAX` / `i64::MIN` cents instead of wrapping or panicking.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;
use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Where Money Flows
/// ```text
/// HostingPlan.monthly / DomainQuote.price
///        │
///        ▼
/// CartItem.price ──► CartItem.line_total ──► Cart.total ──► CartSummary
///                                                              │
///                                       Displayed as "$51.98" ◄┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use fullstack_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole currency units.
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major.saturating_mul(100))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion, truncated toward zero.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

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

    /// The largest representable amount; saturated results land here.
    pub const MAX: Money = Money(i64::MAX);

    /// Multiplies a unit price by a line quantity, saturating on overflow.
    ///
    /// ```rust
    /// use fullstack_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(1999);
    /// assert_eq!(unit_price.multiply_quantity(2).cents(), 3998);
    /// assert_eq!(unit_price.multiply_quantity(i64::MAX), Money::MAX);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Calculates tax at `rate`, rounding half up to the nearest cent.
    ///
    /// ```rust
    /// use fullstack_core::money::Money;
    /// use fullstack_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(5198);
    /// // 10% of $51.98 = $5.198 → $5.20
    /// assert_eq!(subtotal.calculate_tax(TaxRate::from_bps(1000)).cents(), 520);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 so large carts cannot overflow the intermediate product
        let tax_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(tax_cents.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses a plain decimal amount such as `"99.99"`, `"12"` or `"0.5"`.
///
/// At most two fractional digits are accepted; anything finer would have to
/// be rounded, and prices in the catalog never need that.
impl FromStr for Money {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let invalid = |reason: &str| CoreError::InvalidAmount {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let (negative, digits) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input),
        };

        let (whole, frac) = match digits.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (digits, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return Err(invalid("empty amount"));
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("must be a decimal number"));
        }
        if frac.len() > 2 {
            return Err(invalid("at most two decimal places"));
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid("amount too large"))?
        };
        let frac: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid("must be a decimal number"))? * 10,
            _ => frac.parse().map_err(|_| invalid("must be a decimal number"))?,
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac))
            .ok_or_else(|| invalid("amount too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `$12.34`. This is the only place amounts get rounded to
/// two decimals, and with integer cents there is nothing left to round.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.dollars().abs(), self.cents_part())
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
    fn test_from_cents() {
        let money = Money::from_cents(1999);
        assert_eq!(money.cents(), 1999);
        assert_eq!(money.dollars(), 19);
        assert_eq!(money.cents_part(), 99);
        assert_eq!(Money::from_major(12).cents(), 1200);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(5198).to_string(), "$51.98");
        assert_eq!(Money::from_cents(500).to_string(), "$5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_parse() {
        assert_eq!("99.99".parse::<Money>().unwrap().cents(), 9999);
        assert_eq!("12".parse::<Money>().unwrap().cents(), 1200);
        assert_eq!("0.5".parse::<Money>().unwrap().cents(), 50);
        assert_eq!(".75".parse::<Money>().unwrap().cents(), 75);
        assert_eq!(" 19.99 ".parse::<Money>().unwrap().cents(), 1999);
        assert_eq!("-3.10".parse::<Money>().unwrap().cents(), -310);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<Money>().is_err());
        assert!(".".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!("1.999".parse::<Money>().is_err());
        assert!("1,50".parse::<Money>().is_err());
        assert!(matches!(
            "99999999999999999999".parse::<Money>(),
            Err(CoreError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_sum_and_arithmetic() {
        let total: Money = vec![Money::from_cents(1200), Money::from_cents(3998)]
            .into_iter()
            .sum();
        assert_eq!(total.cents(), 5198);
        assert_eq!((total - Money::from_cents(1200)).cents(), 3998);

        let empty: Money = std::iter::empty().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_tax_rounds_half_up() {
        // 10% of $0.05 = 0.5 cent → 1 cent
        assert_eq!(Money::from_cents(5).calculate_tax(TaxRate::from_bps(1000)).cents(), 1);
        // 10% of $0.04 = 0.4 cent → 0 cents
        assert_eq!(Money::from_cents(4).calculate_tax(TaxRate::from_bps(1000)).cents(), 0);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::from_cents(1999).multiply_quantity(i64::MAX / 1000);
        assert_eq!(huge, Money::MAX);
        assert_eq!(huge + Money::from_cents(1), Money::MAX);

        let mut acc = Money::MAX;
        acc += Money::from_cents(500);
        assert_eq!(acc, Money::MAX);

        let total: Money = vec![Money::MAX, Money::MAX].into_iter().sum();
        assert_eq!(total, Money::MAX);

        assert_eq!(Money::from_cents(i64::MIN) - Money::from_cents(1), Money::from_cents(i64::MIN));
        assert_eq!(Money::MAX.calculate_tax(TaxRate::from_bps(20_000)), Money::MAX);
    }

    /// 19.99 × 2 + 12 drifts in binary floating point; integer cents do not.
    #[test]
    fn test_no_float_drift() {
        let total = Money::from_cents(1999).multiply_quantity(2) + Money::from_cents(1200);
        assert_eq!(total.cents(), 5198);
        assert_eq!(total.to_string(), "$51.98");
    }
}
