//! # Validation Module
//!
//! Input validation utilities for Vendo.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: GUI collaborator (setup wizard, maintenance screens)         │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - business rule validation                       │
//! │  ├── Runs whether or not the collaborator validated                    │
//! │  └── The only layer the core trusts                                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vendo_core::money::Money;
//! use vendo_core::validation::{validate_price, validate_product_name};
//!
//! validate_product_name("Vanilla Ice Cream").unwrap();
//! validate_price(Money::from_units(100)).unwrap();
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_ITEMS_PER_SLOT, MAX_SLOTS, MAX_STOCK_PER_PRODUCT};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 100 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a selection number.
///
/// ## Rules
/// - Must be ≥ 1 (0 is not a valid catalog key; absence is expressed with
///   `Option`, never a reserved number)
pub fn validate_selection_number(selection_number: u32) -> ValidationResult<()> {
    if selection_number == 0 {
        return Err(ValidationError::MustBePositive {
            field: "selection number".to_string(),
        });
    }

    Ok(())
}

/// Validates a price.
///
/// ## Rules
/// - Must be non-negative
/// - Zero is allowed (promotional free items)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a restock level.
///
/// ## Rules
/// - Must not exceed MAX_STOCK_PER_PRODUCT (999)
/// - Zero is allowed (draining a product from the machine)
pub fn validate_stock_level(level: u32) -> ValidationResult<()> {
    if level > MAX_STOCK_PER_PRODUCT {
        return Err(ValidationError::OutOfRange {
            field: "stock level".to_string(),
            min: 0,
            max: i64::from(MAX_STOCK_PER_PRODUCT),
        });
    }

    Ok(())
}

/// Validates the inventory grid dimensions at machine creation.
///
/// ## Rules
/// - Both dimensions must be ≥ 1
/// - Neither may exceed the physical maximum (MAX_SLOTS / MAX_ITEMS_PER_SLOT)
pub fn validate_grid_dimensions(
    num_slots: usize,
    num_items_per_slot: usize,
) -> ValidationResult<()> {
    if num_slots == 0 || num_slots > MAX_SLOTS {
        return Err(ValidationError::OutOfRange {
            field: "number of slots".to_string(),
            min: 1,
            max: MAX_SLOTS as i64,
        });
    }

    if num_items_per_slot == 0 || num_items_per_slot > MAX_ITEMS_PER_SLOT {
        return Err(ValidationError::OutOfRange {
            field: "items per slot".to_string(),
            min: 1,
            max: MAX_ITEMS_PER_SLOT as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Vanilla Ice Cream").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_selection_number() {
        assert!(validate_selection_number(1).is_ok());
        assert!(validate_selection_number(0).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_units(100)).is_ok());
        assert!(validate_price(Money::from_units(-5)).is_err());
    }

    #[test]
    fn test_validate_stock_level() {
        assert!(validate_stock_level(0).is_ok());
        assert!(validate_stock_level(999).is_ok());
        assert!(validate_stock_level(1000).is_err());
    }

    #[test]
    fn test_validate_grid_dimensions() {
        assert!(validate_grid_dimensions(8, 5).is_ok());
        assert!(validate_grid_dimensions(0, 5).is_err());
        assert!(validate_grid_dimensions(8, 0).is_err());
        assert!(validate_grid_dimensions(MAX_SLOTS + 1, 5).is_err());
        assert!(validate_grid_dimensions(8, MAX_ITEMS_PER_SLOT + 1).is_err());
    }
}
