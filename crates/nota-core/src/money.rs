//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  In floating point:                                                 │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                       │
//! │                                                                     │
//! │  A transaction is recalculated on EVERY item add/remove. Binary    │
//! │  floats would drift a little more on each pass; over the life of   │
//! │  a tax document the stored totals would stop matching the items.   │
//! │                                                                     │
//! │  OUR SOLUTION: fixed-point integers                                 │
//! │    All amounts are i64 in the smallest currency unit (2 decimal    │
//! │    places). Recalculation is exact and reproducible.               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use nota_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(10_000_000); // Rp100.000,00
//!
//! // Arithmetic operations
//! let doubled = price * 2;
//! let total = price + Money::from_cents(500);
//!
//! // NEVER do this:
//! // let bad = Money::from_float(100000.0); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::types::{Quantity, TaxRate};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (1/100 of a rupiah).
///
/// ## Design Decisions
/// - **i64 (signed)**: allows negative intermediate values (corrections)
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support for JSON serialization
///
/// Every monetary field in the system flows through this type:
/// catalog prices, line totals, the subtotal, each tax amount, stamp
/// duty, and the grand total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use nota_core::money::Money;
    ///
    /// let price = Money::from_cents(1_250_000); // Rp12.500,00
    /// assert_eq!(price.cents(), 1_250_000);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Example
    /// ```rust
    /// use nota_core::money::Money;
    ///
    /// let price = Money::from_major_minor(12_500, 50);
    /// assert_eq!(price.cents(), 1_250_050);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (whole rupiah) portion.
    #[inline]
    pub const fn major_units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_units(&self) -> i64 {
        (self.0 % 100).abs()
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

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Applies a tax rate and returns the tax amount, rounded half-up
    /// to currency precision.
    ///
    /// ## Implementation
    /// Integer math in i128: `(cents * bps + 5000) / 10000`.
    /// The +5000 provides the rounding (5000/10000 = 0.5).
    ///
    /// ## Example
    /// ```rust
    /// use nota_core::money::Money;
    /// use nota_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(18_000_000); // Rp180.000,00
    /// let ppn = TaxRate::from_bps(1100);            // 11%
    ///
    /// // Rp180.000 × 11% = Rp19.800
    /// assert_eq!(subtotal.apply_rate(ppn).cents(), 1_980_000);
    /// ```
    pub fn apply_rate(&self, rate: TaxRate) -> Money {
        // i128 prevents overflow on large amounts
        let cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(cents as i64)
    }

    /// Multiplies money by a quantity expressed in milli-units.
    ///
    /// ## Example
    /// ```rust
    /// use nota_core::money::Money;
    /// use nota_core::types::Quantity;
    ///
    /// let unit_price = Money::from_cents(10_000_000); // Rp100.000,00
    /// let line = unit_price.multiply_quantity(Quantity::from_units(2));
    /// assert_eq!(line.cents(), 20_000_000);
    ///
    /// // Fractional quantities (1.5 kg) round to currency precision
    /// let half = unit_price.multiply_quantity(Quantity::from_millis(1500));
    /// assert_eq!(half.cents(), 15_000_000);
    /// ```
    pub fn multiply_quantity(&self, qty: Quantity) -> Money {
        let cents = (self.0 as i128 * qty.millis() as i128 + 500) / 1000;
        Money::from_cents(cents as i64)
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// ## Arguments
    /// * `discount_bps` - Discount in basis points (1000 = 10%)
    ///
    /// ## Example
    /// ```rust
    /// use nota_core::money::Money;
    ///
    /// let gross = Money::from_cents(20_000_000);
    /// let net = gross.apply_percentage_discount(1000); // 10% off
    /// assert_eq!(net.cents(), 18_000_000);
    /// ```
    pub fn apply_percentage_discount(&self, discount_bps: u32) -> Money {
        // Compute the discount amount with the same rounding as apply_rate,
        // then subtract
        let discount = (self.0 as i128 * discount_bps as i128 + 5000) / 10000;
        Money::from_cents(self.0 - discount as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs and debugging. Document templates format amounts
/// themselves to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}Rp{},{:02}",
            sign,
            self.major_units().abs(),
            self.minor_units()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for whole quantities).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
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
        let money = Money::from_cents(1_250_050);
        assert_eq!(money.cents(), 1_250_050);
        assert_eq!(money.major_units(), 12_500);
        assert_eq!(money.minor_units(), 50);
    }

    #[test]
    fn test_from_major_minor() {
        let money = Money::from_major_minor(12_500, 50);
        assert_eq!(money.cents(), 1_250_050);

        let negative = Money::from_major_minor(-5, 50);
        assert_eq!(negative.cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1_250_050)), "Rp12500,50");
        assert_eq!(format!("{}", Money::from_cents(500)), "Rp5,00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-Rp5,50");
        assert_eq!(format!("{}", Money::from_cents(0)), "Rp0,00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        let result: Money = a * 3;
        assert_eq!(result.cents(), 3000);
    }

    #[test]
    fn test_apply_rate_basic() {
        // Rp180.000 at 11% PPN = Rp19.800
        let amount = Money::from_cents(18_000_000);
        let rate = TaxRate::from_bps(1100);
        assert_eq!(amount.apply_rate(rate).cents(), 1_980_000);
    }

    #[test]
    fn test_apply_rate_with_rounding() {
        // Rp0,99 at 1.5% = 1.485 cents, rounds half-up to 1 cent
        let amount = Money::from_cents(99);
        let rate = TaxRate::from_bps(150);
        assert_eq!(amount.apply_rate(rate).cents(), 1);

        // Rp0,33 at 1.5% = 0.495 cents, rounds to 0
        let amount = Money::from_cents(33);
        assert_eq!(amount.apply_rate(rate).cents(), 0);
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_cents(10_000_000);
        let line = unit_price.multiply_quantity(Quantity::from_units(2));
        assert_eq!(line.cents(), 20_000_000);
    }

    #[test]
    fn test_multiply_fractional_quantity() {
        // 2.5 × Rp3,33 = Rp8,325 → rounds to Rp8,33
        let unit_price = Money::from_cents(333);
        let line = unit_price.multiply_quantity(Quantity::from_millis(2500));
        assert_eq!(line.cents(), 833);
    }

    #[test]
    fn test_percentage_discount() {
        let gross = Money::from_cents(20_000_000);
        let net = gross.apply_percentage_discount(1000); // 10%
        assert_eq!(net.cents(), 18_000_000);

        // 100% discount zeroes the line
        assert_eq!(gross.apply_percentage_discount(10000).cents(), 0);

        // 0% discount is identity
        assert_eq!(gross.apply_percentage_discount(0), gross);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_cents(100);
        assert!(positive.is_positive());

        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
        assert_eq!(negative.abs().cents(), 100);
    }
}
