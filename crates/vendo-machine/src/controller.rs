//! # Purchase Controller
//!
//! Ties one purchase request to a computed result.
//!
//! ## Purchase Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    purchase(request)                                    │
//! │                                                                         │
//! │  resolve target ──────────── ProductNotFound / SetNotFound             │
//! │       │                                                                 │
//! │  price vs tendered ───────── InsufficientFunds   (no stock touched)    │
//! │       │                                                                 │
//! │  stock precheck ──────────── OutOfStock          (no stock touched)    │
//! │       │                                                                 │
//! │  change breakdown ────────── UnrepresentableAmount (no stock touched)  │
//! │       │                                                                 │
//! │  decrement stock (atomic for sets)                                      │
//! │       │                                                                 │
//! │  ▼ PurchaseReceipt { change, ... }                                      │
//! │                                                                         │
//! │  The whole column runs inside one machine lock; every refusal leaves   │
//! │  the machine exactly as it found it.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;
use uuid::Uuid;

use vendo_core::{calculator, CashBundle, CoreError, CoreResult, Money};

use crate::machine::{MachineHandle, VendingMachine};

// =============================================================================
// Purchase Request
// =============================================================================

/// What the customer selected: a product or a bundled set.
///
/// Products and sets have separate selection-number namespaces, so the
/// request carries which keypad the selection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case", tag = "kind", content = "selection_number")]
pub enum PurchaseTarget {
    Product(u32),
    Set(u32),
}

/// An immutable purchase attempt: a selected target plus the tendered cash.
/// Constructed once per attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PurchaseRequest {
    pub target: PurchaseTarget,
    pub tendered: CashBundle,
}

impl PurchaseRequest {
    /// Creates a request from an already-validated cash bundle.
    pub fn new(target: PurchaseTarget, tendered: CashBundle) -> Self {
        PurchaseRequest { target, tendered }
    }

    /// Creates a request from the free-text cash format collaborator forms
    /// collect (`"0,2,0,0,0"`). Malformed input fails with
    /// [`CoreError::InvalidCashInput`] before any machine state is touched.
    pub fn parse(target: PurchaseTarget, cash_input: &str) -> CoreResult<Self> {
        Ok(PurchaseRequest {
            target,
            tendered: cash_input.parse()?,
        })
    }
}

// =============================================================================
// Purchase Receipt
// =============================================================================

/// The record of one successful purchase, handed back to the collaborator
/// for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PurchaseReceipt {
    /// Globally unique receipt identifier (UUID v4).
    pub receipt_id: String,

    /// Name of the purchased product or set.
    pub name: String,

    /// Price charged (for sets, the combined set price).
    pub price: Money,

    /// Total value of the cash the customer tendered.
    pub tendered: Money,

    /// The change dispensed, fewest-bills decomposition.
    pub change: CashBundle,

    /// When the purchase completed.
    #[ts(as = "String")]
    pub completed_at: DateTime<Utc>,
}

// =============================================================================
// Controller
// =============================================================================

/// Orchestrates purchases against one machine.
pub struct VendingMachineController {
    machine: MachineHandle,
}

impl VendingMachineController {
    /// Creates a controller over a shared machine handle.
    pub fn new(machine: MachineHandle) -> Self {
        VendingMachineController { machine }
    }

    /// Executes one purchase to completion, or refuses it.
    ///
    /// ## Ordered Checks
    /// 1. the target must exist in the catalog
    /// 2. tendered total must cover the price (`InsufficientFunds`,
    ///    reporting how much is still owed)
    /// 3. stock must be available - for sets, the main product and every
    ///    component are validated before anything is decremented
    /// 4. the change due must be exactly dispensable in {5,10,20,50,100}
    ///    (`UnrepresentableAmount` otherwise - the machine refuses rather
    ///    than shortchanging)
    ///
    /// Only after all four pass is stock decremented and a receipt issued.
    /// Every refusal leaves machine state unchanged.
    pub fn purchase(&self, request: &PurchaseRequest) -> CoreResult<PurchaseReceipt> {
        self.machine.with_machine_mut(|machine| {
            let receipt = purchase_locked(machine, request);
            match &receipt {
                Ok(receipt) => info!(
                    receipt_id = %receipt.receipt_id,
                    name = %receipt.name,
                    price = %receipt.price,
                    change = %receipt.change,
                    "purchase completed"
                ),
                Err(error) => debug!(selected = ?request.target, %error, "purchase refused"),
            }
            receipt
        })
    }
}

/// The purchase flow proper. Runs with the machine lock held; the
/// validate → decrement → change sequence is one critical section.
fn purchase_locked(
    machine: &mut VendingMachine,
    request: &PurchaseRequest,
) -> CoreResult<PurchaseReceipt> {
    // 1. Resolve the target and its price
    let (name, price) = match request.target {
        PurchaseTarget::Product(selection_number) => {
            let product = machine.catalog().product(selection_number)?;
            (product.name.clone(), product.price)
        }
        PurchaseTarget::Set(selection_number) => {
            let set = machine.catalog().set(selection_number)?;
            (set.main.name.clone(), set.total_price(machine.catalog())?)
        }
    };

    // 2. Funds check, before anything mutates
    let tendered = calculator::total_of(&request.tendered);
    if tendered < price {
        return Err(CoreError::InsufficientFunds {
            price,
            tendered,
            short: price - tendered,
        });
    }

    // 3. Stock precheck, before the change gate: a sold-out selection
    //    reports OutOfStock even when the change due is also awkward
    match request.target {
        PurchaseTarget::Product(selection_number) => {
            let product = machine.catalog().product(selection_number)?;
            if !product.is_in_stock() {
                return Err(CoreError::OutOfStock {
                    selection_number,
                    name: product.name.clone(),
                    available: 0,
                    requested: 1,
                });
            }
        }
        PurchaseTarget::Set(selection_number) => {
            machine.catalog().check_set_stock(selection_number)?;
        }
    }

    // 4. Change must be exactly dispensable
    let due = tendered - price;
    let change = calculator::change_for(due)?;
    if !change.is_exact() {
        return Err(CoreError::UnrepresentableAmount {
            amount: due,
            remainder: change.remainder,
        });
    }

    // 5. Commit: decrement stock
    match request.target {
        PurchaseTarget::Product(selection_number) => {
            machine.catalog_mut().product_mut(selection_number)?.take_stock(1)?;
        }
        PurchaseTarget::Set(selection_number) => {
            machine.catalog_mut().take_set_stock(selection_number)?;
        }
    }

    Ok(PurchaseReceipt {
        receipt_id: Uuid::new_v4().to_string(),
        name,
        price,
        tendered,
        change: change.bundle,
        completed_at: Utc::now(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use vendo_core::{Catalog, Product, ProductSet};

    fn product(selection: u32, price: i64, stock: u32) -> Product {
        Product::new(
            selection,
            format!("Product {selection}"),
            Money::from_units(price),
            100,
            stock,
            true,
        )
        .unwrap()
    }

    fn controller_with(products: Vec<Product>) -> VendingMachineController {
        let machine = VendingMachine::create(products.len().max(1), 1, products).unwrap();
        VendingMachineController::new(MachineHandle::new(machine))
    }

    fn set_controller(component_stock: u32) -> (MachineHandle, VendingMachineController) {
        let mut catalog = Catalog::new();
        catalog.add_product(product(16, 50, component_stock)).unwrap();
        catalog.add_product(product(18, 15, component_stock)).unwrap();
        let mut set = ProductSet::new(
            Product::new(1, "Banana Split", Money::from_units(165), 250, 5, true).unwrap(),
        );
        set.add_component(16, 1).unwrap();
        set.add_component(18, 1).unwrap();
        catalog.add_set(set).unwrap();

        let handle =
            MachineHandle::new(VendingMachine::with_catalog(2, 1, catalog).unwrap());
        (handle.clone(), VendingMachineController::new(handle))
    }

    #[test]
    fn test_purchase_exact_tender() {
        let controller = controller_with(vec![product(1, 20, 5)]);
        let request = PurchaseRequest::parse(PurchaseTarget::Product(1), "0,2,0,0,0").unwrap();

        let receipt = controller.purchase(&request).unwrap();
        assert_eq!(receipt.price, Money::from_units(20));
        assert_eq!(receipt.tendered, Money::from_units(20));
        assert!(receipt.change.is_empty());
    }

    #[test]
    fn test_purchase_with_change() {
        // Tender 2×10 for a product priced 15 → change one 5 bill
        let controller = controller_with(vec![product(1, 15, 5)]);
        let request =
            PurchaseRequest::new(PurchaseTarget::Product(1), CashBundle::from_counts([0, 2, 0, 0, 0]));

        let receipt = controller.purchase(&request).unwrap();
        assert_eq!(receipt.change, CashBundle::from_counts([1, 0, 0, 0, 0]));
        assert_eq!(receipt.change.total(), Money::from_units(5));
    }

    #[test]
    fn test_purchase_decrements_stock() {
        let machine = VendingMachine::create(1, 1, vec![product(1, 15, 2)]).unwrap();
        let handle = MachineHandle::new(machine);
        let controller = VendingMachineController::new(handle.clone());

        let request =
            PurchaseRequest::new(PurchaseTarget::Product(1), CashBundle::from_counts([1, 1, 0, 0, 0]));
        controller.purchase(&request).unwrap();

        let stock = handle.with_machine(|m| m.catalog().product(1).unwrap().stock);
        assert_eq!(stock, 1);
    }

    #[test]
    fn test_insufficient_funds_is_idempotent() {
        let machine = VendingMachine::create(1, 1, vec![product(1, 100, 2)]).unwrap();
        let handle = MachineHandle::new(machine);
        let controller = VendingMachineController::new(handle.clone());

        let request =
            PurchaseRequest::new(PurchaseTarget::Product(1), CashBundle::from_counts([0, 2, 0, 0, 0]));
        let err = controller.purchase(&request).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientFunds { short, .. } if short == Money::from_units(80)
        ));

        // No stock mutation on refusal
        let stock = handle.with_machine(|m| m.catalog().product(1).unwrap().stock);
        assert_eq!(stock, 2);
    }

    #[test]
    fn test_out_of_stock_leaves_catalog_unchanged() {
        let machine = VendingMachine::create(1, 1, vec![product(1, 15, 0)]).unwrap();
        let handle = MachineHandle::new(machine);
        let controller = VendingMachineController::new(handle.clone());

        let request =
            PurchaseRequest::new(PurchaseTarget::Product(1), CashBundle::from_counts([0, 2, 0, 0, 0]));
        let err = controller.purchase(&request).unwrap_err();
        assert!(matches!(err, CoreError::OutOfStock { available: 0, .. }));

        let stock = handle.with_machine(|m| m.catalog().product(1).unwrap().stock);
        assert_eq!(stock, 0);
    }

    #[test]
    fn test_unrepresentable_change_refused_without_mutation() {
        // Price 37, tender one 100 → due 63 → remainder 3 → refused
        let machine = VendingMachine::create(1, 1, vec![product(1, 37, 5)]).unwrap();
        let handle = MachineHandle::new(machine);
        let controller = VendingMachineController::new(handle.clone());

        let request =
            PurchaseRequest::new(PurchaseTarget::Product(1), CashBundle::from_counts([0, 0, 0, 0, 1]));
        let err = controller.purchase(&request).unwrap_err();
        assert!(matches!(
            err,
            CoreError::UnrepresentableAmount { amount, remainder }
                if amount == Money::from_units(63) && remainder == Money::from_units(3)
        ));

        let stock = handle.with_machine(|m| m.catalog().product(1).unwrap().stock);
        assert_eq!(stock, 5);
    }

    #[test]
    fn test_sold_out_set_reported_before_change_shortfall() {
        // A sold-out component and undispensable change at once: the stock
        // refusal is reported, matching the check order
        let mut catalog = Catalog::new();
        catalog.add_product(product(16, 50, 0)).unwrap();
        let mut set = ProductSet::new(
            Product::new(1, "Sundae", Money::from_units(33), 250, 5, true).unwrap(),
        );
        set.add_component(16, 1).unwrap();
        catalog.add_set(set).unwrap();
        let controller = VendingMachineController::new(MachineHandle::new(
            VendingMachine::with_catalog(1, 1, catalog).unwrap(),
        ));

        // Set price 83, tender 100 → due 17, not a multiple of 5
        let request =
            PurchaseRequest::new(PurchaseTarget::Set(1), CashBundle::from_counts([0, 0, 0, 0, 1]));
        let err = controller.purchase(&request).unwrap_err();
        assert!(matches!(
            err,
            CoreError::OutOfStock { selection_number: 16, .. }
        ));
    }

    #[test]
    fn test_oversized_tender_refused_without_mutation() {
        // A tender so large that the change due needs more than u32::MAX
        // hundred bills: the sale is refused, never under-dispensed
        let machine = VendingMachine::create(1, 1, vec![product(1, 100, 5)]).unwrap();
        let handle = MachineHandle::new(machine);
        let controller = VendingMachineController::new(handle.clone());

        let request =
            PurchaseRequest::parse(PurchaseTarget::Product(1), "0,0,0,4294967295,4294967295")
                .unwrap();
        let err = controller.purchase(&request).unwrap_err();
        assert!(matches!(err, CoreError::ChangeAmountTooLarge { .. }));

        let stock = handle.with_machine(|m| m.catalog().product(1).unwrap().stock);
        assert_eq!(stock, 5);
    }

    #[test]
    fn test_unknown_selection() {
        let controller = controller_with(vec![product(1, 15, 5)]);
        let request =
            PurchaseRequest::new(PurchaseTarget::Product(99), CashBundle::from_counts([0, 2, 0, 0, 0]));
        assert!(matches!(
            controller.purchase(&request).unwrap_err(),
            CoreError::ProductNotFound(99)
        ));
    }

    #[test]
    fn test_set_purchase_decrements_main_and_components() {
        let (handle, controller) = set_controller(5);

        // Banana Split set price: 165 + 50 + 15 = 230 → tender 250
        let request =
            PurchaseRequest::new(PurchaseTarget::Set(1), CashBundle::from_counts([0, 0, 0, 1, 2]));
        let receipt = controller.purchase(&request).unwrap();
        assert_eq!(receipt.price, Money::from_units(230));
        assert_eq!(receipt.change, CashBundle::from_counts([0, 0, 1, 0, 0]));

        handle.with_machine(|m| {
            assert_eq!(m.catalog().set(1).unwrap().main.stock, 4);
            assert_eq!(m.catalog().product(16).unwrap().stock, 4);
            assert_eq!(m.catalog().product(18).unwrap().stock, 4);
        });
    }

    #[test]
    fn test_set_purchase_fails_atomically_on_short_component() {
        let (handle, controller) = set_controller(0);

        let request =
            PurchaseRequest::new(PurchaseTarget::Set(1), CashBundle::from_counts([0, 0, 0, 1, 2]));
        let err = controller.purchase(&request).unwrap_err();
        assert!(matches!(err, CoreError::OutOfStock { .. }));

        // Neither the main product nor any component changed
        handle.with_machine(|m| {
            assert_eq!(m.catalog().set(1).unwrap().main.stock, 5);
            assert_eq!(m.catalog().product(16).unwrap().stock, 0);
            assert_eq!(m.catalog().product(18).unwrap().stock, 0);
        });
    }

    #[test]
    fn test_receipt_round_trips_as_json() {
        let controller = controller_with(vec![product(1, 15, 5)]);
        let request = PurchaseRequest::parse(PurchaseTarget::Product(1), "0,2,0,0,0").unwrap();

        let receipt = controller.purchase(&request).unwrap();
        let json = serde_json::to_string(&receipt).unwrap();
        let back: PurchaseReceipt = serde_json::from_str(&json).unwrap();
        assert_eq!(back, receipt);
    }

    #[test]
    fn test_request_parse_rejects_bad_cash() {
        assert!(matches!(
            PurchaseRequest::parse(PurchaseTarget::Product(1), "1,2,3").unwrap_err(),
            CoreError::InvalidCashInput { .. }
        ));
    }
}
