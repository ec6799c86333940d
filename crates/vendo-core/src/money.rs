//! # Money Module
//!
//! Monetary value types: [`Money`], [`Denomination`], and [`CashBundle`].
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: integer currency units                                   │
//! │    The machine only ever handles whole-unit bills (5, 10, 20, 50, 100) │
//! │    so every amount is an exact i64                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vendo_core::money::{CashBundle, Denomination, Money};
//!
//! // Counts in ascending denomination order [5, 10, 20, 50, 100]
//! let tendered = CashBundle::from_counts([0, 2, 0, 0, 0]);
//! assert_eq!(tendered.total(), Money::from_units(20));
//! assert_eq!(tendered.count(Denomination::Ten), 2);
//! ```

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in whole currency units.
///
/// ## Design Decisions
/// - **i64 (signed)**: differences (tendered − price) may be negative before
///   the funds check runs; the sign is how the controller detects a shortfall
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support for collaborator-facing payloads
///
/// EVERY monetary value in the system flows through this type: product
/// prices, set prices, tendered totals, change, reserve totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole currency units.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in whole currency units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
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
}

/// Display implementation shows the raw unit amount.
///
/// ## Note
/// This is for debugging and log lines. Collaborators format amounts with
/// locale and currency symbol themselves.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by quantity (set component pricing).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Denomination
// =============================================================================

/// One face value of currency the machine accepts and dispenses.
///
/// ## Why a Closed Enum?
/// The machine handles exactly five bill denominations. A closed enum makes
/// "a count per denomination" a total function and lets match statements
/// prove exhaustiveness at compile time. Other currency systems are a
/// non-goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Denomination {
    Five,
    Ten,
    Twenty,
    Fifty,
    Hundred,
}

impl Denomination {
    /// All denominations, smallest first. Matches the free-text cash input
    /// order `[5, 10, 20, 50, 100]`.
    pub const ASCENDING: [Denomination; 5] = [
        Denomination::Five,
        Denomination::Ten,
        Denomination::Twenty,
        Denomination::Fifty,
        Denomination::Hundred,
    ];

    /// All denominations, largest first. The greedy change breakdown walks
    /// this order.
    pub const DESCENDING: [Denomination; 5] = [
        Denomination::Hundred,
        Denomination::Fifty,
        Denomination::Twenty,
        Denomination::Ten,
        Denomination::Five,
    ];

    /// Returns the face value of this denomination.
    #[inline]
    pub const fn value(&self) -> Money {
        match self {
            Denomination::Five => Money::from_units(5),
            Denomination::Ten => Money::from_units(10),
            Denomination::Twenty => Money::from_units(20),
            Denomination::Fifty => Money::from_units(50),
            Denomination::Hundred => Money::from_units(100),
        }
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

// =============================================================================
// Cash Bundle
// =============================================================================

/// A quantity of physical cash: a bill count per denomination.
///
/// ## Where CashBundle is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Tendered cash  ──► PurchaseRequest ──► Calculator ──► Change bundle   │
/// │                                                                         │
/// │  House reserve  ──► MaintenanceManager (replenish / collect report)    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// ## Invariants
/// - Counts are `u32`: a bundle can never hold a negative number of bills,
///   by construction. Negative values in free-text input are rejected at the
///   parse boundary with [`CoreError::InvalidCashInput`].
/// - `total()` is always re-derivable from the counts; there is no cached
///   total to drift out of sync.
///
/// Bundles are per-transaction values (tendered cash, computed change) or
/// the standing house reserve; they are never shared between transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CashBundle {
    pub fives: u32,
    pub tens: u32,
    pub twenties: u32,
    pub fifties: u32,
    pub hundreds: u32,
}

impl CashBundle {
    /// An empty bundle (zero bills of every denomination).
    pub const EMPTY: CashBundle = CashBundle {
        fives: 0,
        tens: 0,
        twenties: 0,
        fifties: 0,
        hundreds: 0,
    };

    /// Creates an empty bundle.
    #[inline]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Creates a bundle from counts in ascending denomination order
    /// `[5, 10, 20, 50, 100]`.
    ///
    /// ## Example
    /// ```rust
    /// use vendo_core::money::{CashBundle, Money};
    ///
    /// let bundle = CashBundle::from_counts([1, 0, 0, 1, 0]); // 5 + 50
    /// assert_eq!(bundle.total(), Money::from_units(55));
    /// ```
    #[inline]
    pub const fn from_counts(counts: [u32; 5]) -> Self {
        CashBundle {
            fives: counts[0],
            tens: counts[1],
            twenties: counts[2],
            fifties: counts[3],
            hundreds: counts[4],
        }
    }

    /// Returns the bill count for one denomination.
    #[inline]
    pub const fn count(&self, denomination: Denomination) -> u32 {
        match denomination {
            Denomination::Five => self.fives,
            Denomination::Ten => self.tens,
            Denomination::Twenty => self.twenties,
            Denomination::Fifty => self.fifties,
            Denomination::Hundred => self.hundreds,
        }
    }

    /// Sets the bill count for one denomination.
    #[inline]
    pub fn set_count(&mut self, denomination: Denomination, count: u32) {
        match denomination {
            Denomination::Five => self.fives = count,
            Denomination::Ten => self.tens = count,
            Denomination::Twenty => self.twenties = count,
            Denomination::Fifty => self.fifties = count,
            Denomination::Hundred => self.hundreds = count,
        }
    }

    /// Calculates the total value of the bundle: Σ(count × face value).
    pub fn total(&self) -> Money {
        Denomination::ASCENDING
            .iter()
            .fold(Money::zero(), |acc, denomination| {
                acc + denomination.value() * i64::from(self.count(*denomination))
            })
    }

    /// Returns the total number of bills, regardless of denomination.
    pub fn bill_count(&self) -> u32 {
        self.fives + self.tens + self.twenties + self.fifties + self.hundreds
    }

    /// Checks whether the bundle holds no bills at all.
    pub fn is_empty(&self) -> bool {
        self.bill_count() == 0
    }
}

/// Display shows non-zero counts as `value×count`, e.g. `5×1 10×2`.
///
/// An empty bundle displays as `(no bills)`.
impl fmt::Display for CashBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "(no bills)");
        }
        let mut first = true;
        for denomination in Denomination::ASCENDING {
            let count = self.count(denomination);
            if count == 0 {
                continue;
            }
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{}×{}", denomination, count)?;
            first = false;
        }
        Ok(())
    }
}

/// Parses the free-text cash input format consumed from collaborator forms:
/// a comma-separated list of exactly 5 non-negative integers in denomination
/// order `[5, 10, 20, 50, 100]`.
///
/// Malformed input (wrong token count, non-integer token, negative value)
/// fails with [`CoreError::InvalidCashInput`] and never reaches the
/// calculator.
///
/// ## Example
/// ```rust
/// use vendo_core::money::{CashBundle, Money};
///
/// let tendered: CashBundle = "0,2,0,0,0".parse().unwrap();
/// assert_eq!(tendered.total(), Money::from_units(20));
///
/// assert!("1,2,3".parse::<CashBundle>().is_err());      // wrong count
/// assert!("1,2,x,0,0".parse::<CashBundle>().is_err());  // junk token
/// assert!("1,-2,0,0,0".parse::<CashBundle>().is_err()); // negative
/// ```
impl FromStr for CashBundle {
    type Err = CoreError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = input.split(',').collect();
        if tokens.len() != 5 {
            return Err(CoreError::InvalidCashInput {
                reason: format!("expected 5 comma-separated counts, got {}", tokens.len()),
            });
        }

        let mut counts = [0u32; 5];
        for (index, token) in tokens.iter().enumerate() {
            let token = token.trim();
            // i64 first so a negative count reports as negative, not as a
            // u32 parse failure
            let value: i64 = token.parse().map_err(|_| CoreError::InvalidCashInput {
                reason: format!("'{}' is not an integer", token),
            })?;
            if value < 0 {
                return Err(CoreError::InvalidCashInput {
                    reason: format!("count {} is negative", value),
                });
            }
            counts[index] = u32::try_from(value).map_err(|_| CoreError::InvalidCashInput {
                reason: format!("count {} is too large", value),
            })?;
        }

        Ok(CashBundle::from_counts(counts))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_arithmetic() {
        let a = Money::from_units(100);
        let b = Money::from_units(35);

        assert_eq!((a + b).units(), 135);
        assert_eq!((a - b).units(), 65);
        assert_eq!((b * 3).units(), 105);
        assert!((b - a).is_negative());
        assert_eq!((b - a).abs().units(), 65);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(format!("{}", Money::from_units(65)), "65");
        assert_eq!(format!("{}", Money::from_units(-5)), "-5");
        assert_eq!(format!("{}", Money::zero()), "0");
    }

    #[test]
    fn test_denomination_values() {
        assert_eq!(Denomination::Five.value().units(), 5);
        assert_eq!(Denomination::Ten.value().units(), 10);
        assert_eq!(Denomination::Twenty.value().units(), 20);
        assert_eq!(Denomination::Fifty.value().units(), 50);
        assert_eq!(Denomination::Hundred.value().units(), 100);
    }

    #[test]
    fn test_denomination_orders_are_inverses() {
        let mut descending = Denomination::DESCENDING;
        descending.reverse();
        assert_eq!(descending, Denomination::ASCENDING);
    }

    #[test]
    fn test_bundle_total() {
        let bundle = CashBundle::from_counts([1, 2, 3, 4, 5]);
        // 5 + 20 + 60 + 200 + 500
        assert_eq!(bundle.total(), Money::from_units(785));
        assert_eq!(bundle.bill_count(), 15);
    }

    #[test]
    fn test_empty_bundle() {
        let bundle = CashBundle::new();
        assert!(bundle.is_empty());
        assert_eq!(bundle.total(), Money::zero());
        assert_eq!(format!("{}", bundle), "(no bills)");
    }

    #[test]
    fn test_count_accessors() {
        let mut bundle = CashBundle::new();
        bundle.set_count(Denomination::Fifty, 7);
        assert_eq!(bundle.count(Denomination::Fifty), 7);
        assert_eq!(bundle.count(Denomination::Five), 0);
        assert_eq!(bundle.total(), Money::from_units(350));
    }

    #[test]
    fn test_bundle_display() {
        let bundle = CashBundle::from_counts([1, 2, 0, 0, 1]);
        assert_eq!(format!("{}", bundle), "5×1 10×2 100×1");
    }

    #[test]
    fn test_parse_valid_input() {
        let bundle: CashBundle = "0,2,0,0,0".parse().unwrap();
        assert_eq!(bundle, CashBundle::from_counts([0, 2, 0, 0, 0]));

        // Whitespace around tokens is tolerated
        let bundle: CashBundle = " 1, 0, 0, 0, 1 ".parse().unwrap();
        assert_eq!(bundle.total(), Money::from_units(105));
    }

    #[test]
    fn test_parse_wrong_token_count() {
        let err = "1,2,3".parse::<CashBundle>().unwrap_err();
        assert!(matches!(err, CoreError::InvalidCashInput { .. }));

        let err = "1,2,3,4,5,6".parse::<CashBundle>().unwrap_err();
        assert!(matches!(err, CoreError::InvalidCashInput { .. }));
    }

    #[test]
    fn test_parse_junk_token() {
        let err = "1,2,abc,4,5".parse::<CashBundle>().unwrap_err();
        assert!(matches!(err, CoreError::InvalidCashInput { .. }));

        let err = "".parse::<CashBundle>().unwrap_err();
        assert!(matches!(err, CoreError::InvalidCashInput { .. }));
    }

    #[test]
    fn test_parse_negative_count() {
        let err = "1,-2,0,0,0".parse::<CashBundle>().unwrap_err();
        match err {
            CoreError::InvalidCashInput { reason } => {
                assert!(reason.contains("negative"), "unexpected reason: {reason}")
            }
            other => panic!("expected InvalidCashInput, got {other:?}"),
        }
    }

    #[test]
    fn test_bundle_serialization() {
        let bundle = CashBundle::from_counts([1, 0, 2, 0, 0]);
        let json = serde_json::to_string(&bundle).unwrap();
        let back: CashBundle = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bundle);
    }
}
