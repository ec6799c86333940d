//! # Machine State
//!
//! The [`VendingMachine`] aggregate and its shared handle.
//!
//! ## Thread Safety
//! One machine is one `Mutex`. Every purchase and every maintenance
//! operation runs as a single critical section, so the read-modify-write
//! sequences on stock and reserve counts cannot interleave:
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   One Purchase, One Lock                                │
//! │                                                                         │
//! │  lock ──► resolve product ──► check funds ──► check stock               │
//! │       ──► compute change ──► decrement stock ──► unlock                 │
//! │                                                                         │
//! │  A second purchase attempt blocks until the first completes; there     │
//! │  is no partial-commit window in which both could sell the last unit.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use vendo_core::{CashBundle, Catalog, CoreResult, Product, Slots};

// =============================================================================
// Vending Machine
// =============================================================================

/// One logical vending machine: its catalog, its inventory grid, and its
/// house cash reserve.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VendingMachine {
    catalog: Catalog,
    slots: Slots,
    reserve: CashBundle,
}

impl VendingMachine {
    /// Creates a machine from the products chosen in the setup wizard.
    ///
    /// This is the `CreateCatalog` entry point: each supplied product is
    /// registered in a fresh catalog and placed into the grid in arrival
    /// order, one slot row per product (item position 0). The reserve
    /// starts empty; the first maintenance visit stocks it.
    ///
    /// ## Errors
    /// - validation errors on the grid dimensions
    /// - [`DuplicateSelection`] when two supplied products share a
    ///   selection number
    /// - [`SlotIndexOutOfRange`] when more products are supplied than the
    ///   grid has slot rows
    ///
    /// [`DuplicateSelection`]: vendo_core::CoreError::DuplicateSelection
    /// [`SlotIndexOutOfRange`]: vendo_core::CoreError::SlotIndexOutOfRange
    pub fn create(
        num_slots: usize,
        num_items_per_slot: usize,
        products: Vec<Product>,
    ) -> CoreResult<Self> {
        let mut catalog = Catalog::new();
        let mut slots = Slots::new(num_slots, num_items_per_slot)?;

        for (row, product) in products.into_iter().enumerate() {
            let selection_number = product.selection_number;
            catalog.add_product(product)?;
            slots.place(row, 0, selection_number)?;
        }

        Ok(VendingMachine {
            catalog,
            slots,
            reserve: CashBundle::EMPTY,
        })
    }

    /// Creates a machine from a prebuilt catalog (e.g. [`Catalog::preset`]),
    /// placing every registered product into the grid in catalog order.
    pub fn with_catalog(
        num_slots: usize,
        num_items_per_slot: usize,
        catalog: Catalog,
    ) -> CoreResult<Self> {
        let mut slots = Slots::new(num_slots, num_items_per_slot)?;

        let per_slot = num_items_per_slot;
        for (index, product) in catalog.products().enumerate() {
            slots.place(index / per_slot, index % per_slot, product.selection_number)?;
        }

        Ok(VendingMachine {
            catalog,
            slots,
            reserve: CashBundle::EMPTY,
        })
    }

    /// The machine's catalog.
    #[inline]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The machine's catalog, mutably. Crate-internal: collaborators go
    /// through the controller or the maintenance manager.
    #[inline]
    pub(crate) fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    /// The machine's inventory grid.
    #[inline]
    pub fn slots(&self) -> &Slots {
        &self.slots
    }

    #[inline]
    pub(crate) fn slots_mut(&mut self) -> &mut Slots {
        &mut self.slots
    }

    /// The machine's cash reserve.
    #[inline]
    pub fn reserve(&self) -> &CashBundle {
        &self.reserve
    }

    #[inline]
    pub(crate) fn reserve_mut(&mut self) -> &mut CashBundle {
        &mut self.reserve
    }
}

// =============================================================================
// Machine Handle
// =============================================================================

/// Shared handle to one machine.
///
/// ## Thread Safety
/// Uses `Arc<Mutex<VendingMachine>>` because:
/// - `Arc`: the controller and the maintenance manager share ownership
/// - `Mutex`: only one operation mutates the machine at a time
///
/// ## Why Not RwLock?
/// Machine operations are quick and most of them mutate state (stock,
/// reserve). A RwLock would add complexity with minimal benefit.
#[derive(Debug, Clone)]
pub struct MachineHandle {
    machine: Arc<Mutex<VendingMachine>>,
}

impl MachineHandle {
    /// Wraps a machine in a shareable handle.
    pub fn new(machine: VendingMachine) -> Self {
        MachineHandle {
            machine: Arc::new(Mutex::new(machine)),
        }
    }

    /// Executes a function with read access to the machine.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let total = handle.with_machine(|m| m.reserve().total());
    /// ```
    pub fn with_machine<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&VendingMachine) -> R,
    {
        let machine = self.machine.lock().expect("Machine mutex poisoned");
        f(&machine)
    }

    /// Executes a function with write access to the machine. The closure
    /// runs as one critical section.
    pub fn with_machine_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut VendingMachine) -> R,
    {
        let mut machine = self.machine.lock().expect("Machine mutex poisoned");
        f(&mut machine)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use vendo_core::{CoreError, Money, SlotContent};

    fn product(selection: u32, price: i64) -> Product {
        Product::new(
            selection,
            format!("Product {selection}"),
            Money::from_units(price),
            100,
            5,
            true,
        )
        .unwrap()
    }

    #[test]
    fn test_create_registers_and_places() {
        let machine =
            VendingMachine::create(3, 2, vec![product(1, 100), product(2, 50)]).unwrap();

        assert_eq!(machine.catalog().product_count(), 2);
        assert_eq!(
            machine.slots().content(0, 0).unwrap(),
            SlotContent::Occupied(1)
        );
        assert_eq!(
            machine.slots().content(1, 0).unwrap(),
            SlotContent::Occupied(2)
        );
        assert!(machine.reserve().is_empty());
    }

    #[test]
    fn test_create_rejects_duplicate_selection() {
        let err =
            VendingMachine::create(3, 2, vec![product(1, 100), product(1, 50)]).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateSelection(1)));
    }

    #[test]
    fn test_create_rejects_overfull_grid() {
        let err = VendingMachine::create(1, 1, vec![product(1, 100), product(2, 50)]).unwrap_err();
        assert!(matches!(err, CoreError::SlotIndexOutOfRange { .. }));
    }

    #[test]
    fn test_with_catalog_fills_row_major() {
        let machine = VendingMachine::with_catalog(5, 4, Catalog::preset()).unwrap();

        // 20 preset products fill a 5x4 grid exactly
        assert_eq!(machine.slots().occupied_count(), 20);
        assert_eq!(
            machine.slots().content(0, 3).unwrap(),
            SlotContent::Occupied(4)
        );
        assert_eq!(
            machine.slots().content(4, 3).unwrap(),
            SlotContent::Occupied(20)
        );
    }

    #[test]
    fn test_handle_shares_one_machine() {
        let handle = MachineHandle::new(
            VendingMachine::create(3, 2, vec![product(1, 100)]).unwrap(),
        );
        let clone = handle.clone();

        clone.with_machine_mut(|machine| {
            machine.catalog_mut().product_mut(1).unwrap().restock(42);
        });
        let stock = handle.with_machine(|machine| machine.catalog().product(1).unwrap().stock);
        assert_eq!(stock, 42);
    }
}
