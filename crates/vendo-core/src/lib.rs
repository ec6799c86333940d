//! # vendo-core: Pure Business Logic for Vendo
//!
//! This crate is the **heart** of Vendo. It contains all business logic for
//! the vending machine's transactional core as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Vendo Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              GUI Collaborators (outside this workspace)         │   │
//! │  │   Setup Wizard ──► Purchase Screen ──► Maintenance Screens     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    vendo-machine                                │   │
//! │  │    VendingMachine, Controller, MaintenanceManager              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vendo-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │calculator │  │  catalog  │  │   slots   │  │   │
//! │  │   │CashBundle │  │  greedy   │  │  Product  │  │   grid    │  │   │
//! │  │   │   Money   │  │  change   │  │ProductSet │  │placement  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO SCREENS • NO GLOBALS • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money, the closed denomination set, and cash bundles
//! - [`calculator`] - greedy fewest-bills change breakdown
//! - [`catalog`] - products, bundled product sets, and the owning catalog
//! - [`slots`] - the 2-D inventory grid
//! - [`validation`] - business rule validation
//! - [`error`] - domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every function is deterministic - same input =
//!    same output
//! 2. **No I/O**: screens, files, network access are FORBIDDEN here
//! 3. **Integer Money**: all monetary values are whole units (i64), no
//!    floating point anywhere
//! 4. **Explicit Errors**: all errors are typed, never strings or panics;
//!    not-found lookups return errors, never sentinels
//!
//! ## Example Usage
//!
//! ```rust
//! use vendo_core::calculator;
//! use vendo_core::money::{CashBundle, Money};
//!
//! // Customer tenders two 10s for a product priced 15
//! let tendered: CashBundle = "0,2,0,0,0".parse().unwrap();
//! let due = calculator::total_of(&tendered) - Money::from_units(15);
//!
//! let change = calculator::change_for(due).unwrap();
//! assert_eq!(change.bundle, CashBundle::from_counts([1, 0, 0, 0, 0]));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculator;
pub mod catalog;
pub mod error;
pub mod money;
pub mod slots;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use vendo_core::Money` instead of
// `use vendo_core::money::Money`

pub use calculator::Change;
pub use catalog::{Catalog, Product, ProductSet, SetComponent};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{CashBundle, Denomination, Money};
pub use slots::{SlotContent, Slots};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Stock level the restock-all maintenance sweep uses when the operator
/// does not pick one.
pub const DEFAULT_RESTOCK_LEVEL: u32 = 10;

/// Par count per denomination for the house cash reserve. The replenish
/// sweep tops denominations up to this count and the collect report flags
/// denominations above it.
pub const RESERVE_PAR_COUNT: u32 = 25;

/// Maximum stock a single product can hold.
///
/// ## Business Reason
/// Prevents accidental over-ordering during restock (e.g. typing 1000
/// instead of 10); no physical column holds more anyway.
pub const MAX_STOCK_PER_PRODUCT: u32 = 999;

/// Maximum number of slot rows a machine can be configured with.
pub const MAX_SLOTS: usize = 64;

/// Maximum number of item positions per slot.
pub const MAX_ITEMS_PER_SLOT: usize = 64;
