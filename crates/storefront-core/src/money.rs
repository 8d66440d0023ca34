//! # Money Module
//!
//! Provides the `Money` and `DiscountRate` types used for cart arithmetic.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Catalog prices arrive as decimals:                                     │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │                                                                         │
//! │  A cart total built from those drifts a cent at a time, and            │
//! │  subtotal − discount stops matching the grand total.                   │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Prices are converted once, at the catalog boundary.                  │
//! │    Every total after that is exact integer math.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::{DiscountRate, Money};
//!
//! let price = Money::from_cents(5000); // $50.00
//! let line = price.multiply_quantity(2); // $100.00
//! let discount = line.discount_amount(DiscountRate::from_percentage(20.0));
//! assert_eq!(discount.cents(), 2000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::MAX_DISCOUNT_BPS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for USD).
///
/// ## Where Money is Used
/// ```text
/// CatalogProduct.price ──► ProductSnapshot.unit_price ──► CartLine.unit_price
///                                                              │
///                              CartLine.line_total ◄───────────┘
///                                      │
///               subtotal ─── discount_total ─── cart_total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal amount in major units (e.g. `549.99`) to Money.
    ///
    /// Only used where catalog JSON hands us a float. Returns `None` for
    /// NaN, infinities and values that do not fit in cents.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(549.99).map(|m| m.cents()), Some(54999));
    /// assert_eq!(Money::from_decimal(f64::NAN), None);
    /// ```
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }
        let cents = (amount * 100.0).round();
        if cents.abs() >= i64::MAX as f64 {
            return None;
        }
        Some(Money(cents as i64))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
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

    /// Multiplies a unit price by a quantity.
    ///
    /// Saturates instead of overflowing. Validated lines never get there:
    /// `MAX_UNIT_PRICE_CENTS * MAX_STOCK_LIMIT` is about `10^16`.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Returns the amount taken off by `rate`, rounded half-up to the cent.
    ///
    /// ## Implementation
    /// `(amount * bps + 5000) / 10000` in i128, so a 100% rate returns the
    /// full amount and the result never exceeds `self` for non-negative values.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::{DiscountRate, Money};
    ///
    /// let line = Money::from_cents(999);
    /// let off = line.discount_amount(DiscountRate::from_bps(1250)); // 12.5%
    /// // 999 × 12.5% = 124.875 → 125
    /// assert_eq!(off.cents(), 125);
    /// ```
    pub fn discount_amount(&self, rate: DiscountRate) -> Money {
        let amount = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money(amount as i64)
    }
}

/// Display shows money as dollars for logs and notifications.
///
/// Views format with the configured currency instead.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
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

// =============================================================================
// Discount Rate
// =============================================================================

/// A per-product discount in basis points.
///
/// ## Why Basis Points?
/// 1 basis point = 0.01%. Catalog discounts such as `12.96%` become `1296`
/// and stay exact from then on. The valid range is 0..=10000.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a discount rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a discount rate from a percentage, clamped into [0, 100].
    ///
    /// NaN is treated as no discount.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::DiscountRate;
    ///
    /// assert_eq!(DiscountRate::from_percentage(12.96).bps(), 1296);
    /// assert_eq!(DiscountRate::from_percentage(150.0).bps(), 10000);
    /// assert_eq!(DiscountRate::from_percentage(-3.0).bps(), 0);
    /// ```
    pub fn from_percentage(pct: f64) -> Self {
        if pct.is_nan() {
            return DiscountRate::zero();
        }
        let bps = (pct * 100.0).round().clamp(0.0, MAX_DISCOUNT_BPS as f64);
        DiscountRate(bps as u32)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
