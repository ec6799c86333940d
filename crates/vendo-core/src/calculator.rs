//! # Calculator Module
//!
//! Pure change-making math: totals a [`CashBundle`] and decomposes an amount
//! due into the fewest bills.
//!
//! ## Greedy Breakdown
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  change_for(185)                                                        │
//! │                                                                         │
//! │  100: 185 / 100 = 1   remaining 85                                      │
//! │   50:  85 /  50 = 1   remaining 35                                      │
//! │   20:  35 /  20 = 1   remaining 15                                      │
//! │   10:  15 /  10 = 1   remaining  5                                      │
//! │    5:   5 /   5 = 1   remaining  0                                      │
//! │                                                                         │
//! │  → {100:1, 50:1, 20:1, 10:1, 5:1}, remainder 0                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! {5, 10, 20, 50, 100} is a canonical coin system (each denomination is a
//! multiple of the next smaller one's divisor structure), so greedy
//! largest-first is provably the minimum bill count. This is the one
//! algorithmic core of the whole machine.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::{CashBundle, Denomination, Money};

// =============================================================================
// Change
// =============================================================================

/// The result of breaking an amount down into bills.
///
/// ## Remainder Policy
/// Amounts that are not a multiple of 5 cannot be dispensed exactly. The
/// sub-5 remainder is neither silently dropped nor an error at this layer:
/// it is carried explicitly so that
///
/// ```text
/// bundle.total() + remainder == requested amount    (always)
/// ```
///
/// The purchase flow treats a non-zero remainder as
/// [`CoreError::UnrepresentableAmount`] and refuses the sale before touching
/// stock; other callers (reporting, diagnostics) can inspect the remainder
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Change {
    /// The dispensable bills, fewest-count decomposition.
    pub bundle: CashBundle,
    /// What is left over below the smallest denomination; always `0..5`.
    pub remainder: Money,
}

impl Change {
    /// Checks whether the amount was fully representable in bills.
    #[inline]
    pub fn is_exact(&self) -> bool {
        self.remainder.is_zero()
    }
}

// =============================================================================
// Operations
// =============================================================================

/// Totals the tendered cash. Delegates to [`CashBundle::total`]; pure, no
/// error conditions.
#[inline]
pub fn total_of(bundle: &CashBundle) -> Money {
    bundle.total()
}

/// Decomposes `amount` into the fewest standard bills, largest denomination
/// first.
///
/// ## Errors
/// Fails with [`CoreError::NegativeChangeAmount`] when `amount` is negative
/// and with [`CoreError::ChangeAmountTooLarge`] when a denomination's bill
/// count would exceed `u32`. The purchase flow checks funds before calling
/// this, so a negative amount here is a caller bug, never a shortchanged
/// customer; an oversized amount refuses the sale outright instead of
/// under-dispensing with a truncated count.
///
/// ## Example
/// ```rust
/// use vendo_core::calculator;
/// use vendo_core::money::{CashBundle, Money};
///
/// let change = calculator::change_for(Money::from_units(63)).unwrap();
/// assert_eq!(change.bundle, CashBundle::from_counts([0, 1, 0, 1, 0]));
/// assert_eq!(change.remainder, Money::from_units(3));
/// ```
pub fn change_for(amount: Money) -> CoreResult<Change> {
    if amount.is_negative() {
        return Err(CoreError::NegativeChangeAmount { amount });
    }

    let mut bundle = CashBundle::new();
    let mut remaining = amount.units();
    for denomination in Denomination::DESCENDING {
        let value = denomination.value().units();
        let count = u32::try_from(remaining / value)
            .map_err(|_| CoreError::ChangeAmountTooLarge { amount })?;
        bundle.set_count(denomination, count);
        remaining %= value;
    }

    Ok(Change {
        bundle,
        remainder: Money::from_units(remaining),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
