//! # vendo-machine: Machine State & Orchestration
//!
//! Owns the mutable state of one vending machine and exposes the two entry
//! points GUI collaborators call: the purchase controller and the
//! maintenance manager.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     vendo-machine (THIS CRATE)                          │
//! │                                                                         │
//! │   Collaborator calls                    Shared state                    │
//! │   ─────────────────                     ────────────                    │
//! │                                                                         │
//! │   VendingMachineController ──┐                                          │
//! │     .purchase(request)       ├──► MachineHandle ──► Mutex<Machine>     │
//! │                              │         │                                │
//! │   MaintenanceManager ────────┘         ▼                                │
//! │     .restock_all(..)              VendingMachine                        │
//! │     .set_price(..)                ├── Catalog   (vendo-core)            │
//! │     .replenish_reserve(..)        ├── Slots     (vendo-core)            │
//! │     .collect_excess(..)           └── CashBundle reserve               │
//! │                                                                         │
//! │  One lock per machine: a purchase or a maintenance sweep is always a   │
//! │  single critical section. No async, no suspension points - every       │
//! │  request computes to completion or fails synchronously.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`machine`] - the [`VendingMachine`] aggregate and its shared handle
//! - [`controller`] - the purchase flow (request → receipt or refusal)
//! - [`maintenance`] - restock, repricing, reserve bookkeeping
//!
//! ## Example Usage
//!
//! ```rust
//! use vendo_core::Catalog;
//! use vendo_machine::{
//!     MachineHandle, PurchaseRequest, PurchaseTarget, VendingMachine,
//!     VendingMachineController,
//! };
//!
//! let machine = VendingMachine::with_catalog(5, 4, Catalog::preset()).unwrap();
//! let controller = VendingMachineController::new(MachineHandle::new(machine));
//!
//! // Vanilla Ice Cream (selection 1, priced 100), tendered one 100 bill
//! let request = PurchaseRequest::parse(PurchaseTarget::Product(1), "0,0,0,0,1").unwrap();
//! let receipt = controller.purchase(&request).unwrap();
//! assert!(receipt.change.is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod controller;
pub mod machine;
pub mod maintenance;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use controller::{PurchaseReceipt, PurchaseRequest, PurchaseTarget, VendingMachineController};
pub use machine::{MachineHandle, VendingMachine};
pub use maintenance::{MaintenanceManager, ReserveReport};
