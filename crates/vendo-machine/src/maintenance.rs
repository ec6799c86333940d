//! # Maintenance Manager
//!
//! Administrative operations over the catalog and the house cash reserve.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Maintenance Visit                                   │
//! │                                                                         │
//! │  restock_all(level) ───────► every product stock := level              │
//! │  set_price(sel, price) ────► one product repriced                      │
//! │  update_product(...) ──────► one product edited (validated)            │
//! │  remove_product(sel) ──────► one product deregistered, slot cleared    │
//! │  replenish_reserve(t, tgt) ► low denominations topped up to target     │
//! │  collect_excess(t) ────────► read-only report of over-threshold bills  │
//! │                                                                         │
//! │  collect_excess never mutates: pulling physical bills out of the       │
//! │  machine is a human action, the system only reports what to pull.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;
use ts_rs::TS;

use vendo_core::validation::{validate_price, validate_stock_level};
use vendo_core::{CoreResult, Denomination, Money};

use crate::machine::MachineHandle;

// =============================================================================
// Reserve Report
// =============================================================================

/// Read-only summary produced by the collect-excess sweep: total reserve
/// value plus every denomination holding strictly more bills than the
/// threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReserveReport {
    /// Total value of the whole reserve (not only the flagged part).
    pub total: Money,

    /// The threshold the sweep compared against.
    pub threshold: u32,

    /// Denominations with count > threshold, ascending, with their counts.
    pub flagged: Vec<(Denomination, u32)>,
}

impl ReserveReport {
    /// Checks whether any denomination exceeded the threshold.
    pub fn has_excess(&self) -> bool {
        !self.flagged.is_empty()
    }
}

/// Renders the report the way the maintenance screen shows it.
impl fmt::Display for ReserveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total cash in the machine: {}", self.total)?;
        writeln!(f, "Denominations over {} bills:", self.threshold)?;
        if self.flagged.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for (denomination, count) in &self.flagged {
            writeln!(f, "  {}: {}", denomination, count)?;
        }
        Ok(())
    }
}

// =============================================================================
// Maintenance Manager
// =============================================================================

/// The administrative facade over one machine. Shares the machine handle
/// with the purchase controller; every operation runs under the same lock.
pub struct MaintenanceManager {
    machine: MachineHandle,
}

impl MaintenanceManager {
    /// Creates a manager over a shared machine handle.
    pub fn new(machine: MachineHandle) -> Self {
        MaintenanceManager { machine }
    }

    /// Sets every registered product's stock (and every set's main-product
    /// stock) to `level`. Returns how many entries were restocked.
    ///
    /// No failure mode beyond level validation: restocking is a sweep, not
    /// a lookup.
    pub fn restock_all(&self, level: u32) -> CoreResult<usize> {
        validate_stock_level(level)?;
        let restocked = self.machine.with_machine_mut(|machine| {
            let catalog = machine.catalog_mut();
            let mut restocked = 0;
            for product in catalog.products_mut() {
                product.restock(level);
                restocked += 1;
            }
            for set in catalog.sets_mut() {
                set.main.restock(level);
                restocked += 1;
            }
            restocked
        });
        info!(level, restocked, "restocked all products");
        Ok(restocked)
    }

    /// Reprices one product, looked up by selection number.
    pub fn set_price(&self, selection_number: u32, price: Money) -> CoreResult<()> {
        validate_price(price)?;
        self.machine.with_machine_mut(|machine| -> CoreResult<()> {
            machine.catalog_mut().product_mut(selection_number)?.price = price;
            Ok(())
        })?;
        info!(selection_number, %price, "price updated");
        Ok(())
    }

    /// Edits one product's details (name, price, calories, individual-sale
    /// eligibility) in a single validated step.
    pub fn update_product(
        &self,
        selection_number: u32,
        name: &str,
        price: Money,
        calories: u32,
        sold_individually: bool,
    ) -> CoreResult<()> {
        self.machine.with_machine_mut(|machine| {
            machine
                .catalog_mut()
                .product_mut(selection_number)?
                .update_details(name, price, calories, sold_individually)
        })?;
        info!(selection_number, "product updated");
        Ok(())
    }

    /// Deregisters a product and empties its grid cell.
    ///
    /// Fails with [`CoreError::ProductNotFound`] for an unknown selection
    /// number and with [`CoreError::ProductReferencedBySet`] while a
    /// registered set still includes the product as a component.
    ///
    /// [`CoreError::ProductNotFound`]: vendo_core::CoreError::ProductNotFound
    /// [`CoreError::ProductReferencedBySet`]: vendo_core::CoreError::ProductReferencedBySet
    pub fn remove_product(&self, selection_number: u32) -> CoreResult<()> {
        self.machine.with_machine_mut(|machine| -> CoreResult<()> {
            machine.catalog_mut().remove_product(selection_number)?;
            if let Some((slot, item)) = machine.slots().locate(selection_number) {
                machine.slots_mut().clear(slot, item)?;
            }
            Ok(())
        })?;
        info!(selection_number, "product removed");
        Ok(())
    }

    /// Tops up every denomination whose reserve count is below `threshold`
    /// to exactly `target`. Denominations at or above the threshold are left
    /// untouched, so the sweep is idempotent.
    ///
    /// Returns the denominations that were topped up.
    pub fn replenish_reserve(&self, threshold: u32, target: u32) -> Vec<Denomination> {
        let replenished = self.machine.with_machine_mut(|machine| {
            let reserve = machine.reserve_mut();
            let mut replenished = Vec::new();
            for denomination in Denomination::ASCENDING {
                if reserve.count(denomination) < threshold {
                    reserve.set_count(denomination, target);
                    replenished.push(denomination);
                }
            }
            replenished
        });
        info!(
            threshold,
            target_count = target,
            topped_up = replenished.len(),
            "reserve replenished"
        );
        replenished
    }

    /// Reports the denominations holding strictly more than `threshold`
    /// bills, alongside the reserve total. Never mutates the reserve.
    pub fn collect_excess(&self, threshold: u32) -> ReserveReport {
        self.machine.with_machine(|machine| {
            let reserve = machine.reserve();
            let flagged = Denomination::ASCENDING
                .into_iter()
                .filter_map(|denomination| {
                    let count = reserve.count(denomination);
                    (count > threshold).then_some((denomination, count))
                })
                .collect();
            ReserveReport {
                total: reserve.total(),
                threshold,
                flagged,
            }
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
