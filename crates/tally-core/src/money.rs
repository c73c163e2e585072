//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  REPORT TOTALS MUST NOT DEPEND ON ROW ORDER                             │
//! │                                                                         │
//! │  Floating point:                                                        │
//! │    (0.1 + 0.2) + 0.3 != 0.1 + (0.2 + 0.3)                              │
//! │    → the same sales listed in a different order give another total     │
//! │                                                                         │
//! │  Integer cents:                                                         │
//! │    10 + 20 + 30 == 30 + 20 + 10 == 60 cents, always                    │
//! │    → VAT + exclusive == inclusive, exactly                             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::money::Money;
//!
//! let sales = [Money::from_cents(40000), Money::from_cents(60000)];
//! let total: Money = sales.iter().copied().sum();
//! assert_eq!(total.cents(), 100000);
//!
//! // Average over zero rows is zero, never a division error
//! assert_eq!(Money::average(total, 0), Money::zero());
//! assert_eq!(Money::average(total, 4).cents(), 25000);
//! ```
//!
//! ## Overflow
//! Arithmetic saturates at the `i64` bounds instead of panicking.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;
use crate::BPS_SCALE;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: losses, refunds and negative profit lines are normal
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money Flows
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Sale.total ─────────┐                                                  │
/// │  Return.total ───────┼──► revenue ──► gross profit ──► operating profit │
/// │  PurchaseOrder.total ┘        │                              │          │
/// │                               ▼                              ▼          │
/// │                          VAT split                   progressive tax    │
/// │                                                              │          │
/// │  Expense.amount ──────────────────────────────► net profit ◄─┘          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major units (e.g. 2000 → 2000.00).
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major.saturating_mul(100))
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).major(), 10);
    /// assert_eq!(Money::from_cents(-550).major(), -5);
    /// ```
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
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
        Money(self.0.saturating_abs())
    }

    /// Applies a basis-point rate to this amount, rounding half away from
    /// zero.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    /// use tally_core::types::TaxRate;
    ///
    /// let income = Money::from_cents(1000);
    /// let tax = income.calculate_tax(TaxRate::from_bps(825));
    /// // 10.00 × 8.25% = 0.825 → 0.83
    /// assert_eq!(tax.cents(), 83);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        Money(div_round(
            self.0 as i128 * rate.bps() as i128,
            BPS_SCALE as i128,
        ))
    }

    /// Splits a VAT-inclusive amount into its VAT and VAT-exclusive parts.
    ///
    /// ## Formula
    /// ```text
    /// vat       = A × r / (1 + r)      (rounded to the cent)
    /// exclusive = A − vat
    /// ```
    /// The exclusive part is derived by subtraction so that
    /// `vat + exclusive == inclusive` holds exactly for every amount.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    /// use tally_core::types::TaxRate;
    ///
    /// let split = Money::from_cents(1000).split_vat(TaxRate::from_bps(1800));
    /// // 10.00 × 18/118 = 1.5254… → 1.53
    /// assert_eq!(split.vat.cents(), 153);
    /// assert_eq!(split.exclusive.cents(), 847);
    /// ```
    pub fn split_vat(&self, rate: TaxRate) -> VatSplit {
        let vat = Money(div_round(
            self.0 as i128 * rate.bps() as i128,
            BPS_SCALE as i128 + rate.bps() as i128,
        ));

        VatSplit {
            inclusive: *self,
            vat,
            exclusive: *self - vat,
        }
    }

    /// Multiplies money by a quantity, saturating on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let unit_cost = Money::from_cents(299);
    /// assert_eq!(unit_cost.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// ## Arguments
    /// * `discount_bps` - Discount in basis points (1000 = 10%)
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let price = Money::from_cents(10000);
    /// assert_eq!(price.apply_percentage_discount(2000).cents(), 8000);
    /// ```
    pub fn apply_percentage_discount(&self, discount_bps: u32) -> Money {
        let discount_amount = div_round(
            self.0 as i128 * discount_bps as i128,
            BPS_SCALE as i128,
        );
        Money(self.0.saturating_sub(discount_amount))
    }

    /// Divides a total evenly over `count` rows, rounding to the cent.
    ///
    /// Returns zero when `count` is zero.
    pub fn average(total: Money, count: usize) -> Money {
        if count == 0 {
            return Money::zero();
        }
        Money(div_round(total.0 as i128, count as i128))
    }

    /// Returns `self` as a percentage of `base`, or 0.0 when `base` is zero.
    pub fn percent_of(&self, base: Money) -> f64 {
        if base.is_zero() {
            return 0.0;
        }
        self.0 as f64 / base.0 as f64 * 100.0
    }
}

/// Integer division rounding half away from zero, clamped to `i64`.
fn div_round(numerator: i128, denominator: i128) -> i64 {
    debug_assert!(denominator > 0);
    let half = denominator / 2;
    let rounded = if numerator >= 0 {
        numerator.saturating_add(half) / denominator
    } else {
        numerator.saturating_sub(half) / denominator
    };
    rounded.clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

// =============================================================================
// VAT Split
// =============================================================================

/// A VAT-inclusive amount broken into its VAT and VAT-exclusive parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VatSplit {
    /// Amount as recorded (VAT embedded).
    pub inclusive: Money,
    /// VAT embedded in the amount.
    pub vat: Money,
    /// Amount net of VAT.
    pub exclusive: Money,
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money with two decimals.
///
/// ## Note
/// This is for logs and the CLI. Currency symbols and localization are the
/// presentation layer's job.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
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

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(self.0.saturating_neg())
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

/// Reduction over a collection of amounts.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
