//! # Error Types
//!
//! Domain-specific error types for vendo-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vendo-core errors (this file)                                         │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  GUI collaborator errors (outside this workspace)                      │
//! │  └── whatever the screen layer renders (serialized message)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → collaborator → user               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (selection number, amounts, ...)
//! 3. Errors are enum variants, never String
//! 4. Every variant is recoverable: the calling collaborator decides whether
//!    to re-prompt; nothing here aborts the process

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Free-text cash input could not be parsed.
    ///
    /// ## When This Occurs
    /// - Wrong number of comma-separated tokens (must be exactly 5)
    /// - A token is not an integer
    /// - A token is negative
    ///
    /// Malformed input is rejected here and never reaches the calculator.
    #[error("Invalid cash input: {reason}")]
    InvalidCashInput { reason: String },

    /// A change amount was negative.
    ///
    /// The greedy breakdown is only defined for non-negative amounts; the
    /// purchase flow checks funds first, so seeing this means a caller
    /// skipped that check.
    #[error("Cannot make change for negative amount {amount}")]
    NegativeChangeAmount { amount: Money },

    /// A change amount was too large to decompose into bills.
    ///
    /// Bill counts are `u32`. An amount whose decomposition needs more than
    /// `u32::MAX` bills of one denomination is beyond any physical machine;
    /// the breakdown fails rather than recording a truncated count, so
    /// `bundle.total() + remainder == amount` holds for every value this
    /// module ever returns.
    #[error("Cannot make change for {amount}: required bill count is out of range")]
    ChangeAmountTooLarge { amount: Money },

    /// A change amount cannot be dispensed exactly with the denominations on
    /// hand ({5, 10, 20, 50, 100}).
    ///
    /// ## When This Occurs
    /// - The amount due back is not a multiple of 5 (e.g. product priced 37,
    ///   tendered 100, due 63 → 60 dispensable, 3 stranded)
    ///
    /// The sale is refused rather than silently shortchanging the customer.
    #[error("Cannot dispense {amount} exactly: {remainder} cannot be represented in bills")]
    UnrepresentableAmount { amount: Money, remainder: Money },

    /// Tendered cash does not cover the product price.
    #[error("Insufficient funds: price {price}, tendered {tendered}, short {short}")]
    InsufficientFunds {
        price: Money,
        tendered: Money,
        short: Money,
    },

    /// Not enough stock to complete the sale.
    ///
    /// ## When This Occurs
    /// - A product's stock is 0 at purchase time
    /// - A product-set component has fewer units than the set requires
    ///   (`requested` > `available`)
    #[error("Out of stock for {name} (selection {selection_number}): available {available}, requested {requested}")]
    OutOfStock {
        selection_number: u32,
        name: String,
        available: u32,
        requested: u32,
    },

    /// No product registered under the given selection number.
    #[error("Product not found: selection number {0}")]
    ProductNotFound(u32),

    /// No product set registered under the given selection number.
    #[error("Product set not found: selection number {0}")]
    SetNotFound(u32),

    /// A selection number was registered twice in one catalog.
    #[error("Selection number {0} is already registered")]
    DuplicateSelection(u32),

    /// A product cannot be removed while a registered set includes it as a
    /// component.
    #[error("Product {0} is a component of a registered set and cannot be removed")]
    ProductReferencedBySet(u32),

    /// A selection number was placed into more than one slot cell.
    #[error("Selection number {selection_number} is already placed at slot {slot}, item {item}")]
    DuplicatePlacement {
        selection_number: u32,
        slot: usize,
        item: usize,
    },

    /// A slot coordinate was outside the configured grid.
    ///
    /// This is the programming-error class: the grid dimensions are fixed at
    /// machine creation, so an out-of-range index is a caller bug, not user
    /// input. It still surfaces as a value so collaborators can log it.
    #[error("Slot index out of range: ({slot}, {item}) in a {num_slots}x{num_items_per_slot} grid")]
    SlotIndexOutOfRange {
        slot: usize,
        item: usize,
        num_slots: usize,
        num_items_per_slot: usize,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientFunds {
            price: Money::from_units(100),
            tendered: Money::from_units(80),
            short: Money::from_units(20),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient funds: price 100, tendered 80, short 20"
        );

        let err = CoreError::OutOfStock {
            selection_number: 16,
            name: "Sliced Banana".to_string(),
            available: 0,
            requested: 1,
        };
        assert_eq!(
            err.to_string(),
            "Out of stock for Sliced Banana (selection 16): available 0, requested 1"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::TooLong {
            field: "name".to_string(),
            max: 100,
        };
        assert_eq!(err.to_string(), "name must be at most 100 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "selection number".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
