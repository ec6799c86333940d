//! # Vendo Simulator
//!
//! Console walkthrough of one machine's life: create it from the preset
//! catalog, run a few purchases (including the refusal paths), then do a
//! maintenance visit.
//!
//! ## Usage
//! ```bash
//! cargo run -p vendo-machine --bin vendo-sim
//!
//! # Verbose: show refused purchases too
//! RUST_LOG=debug cargo run -p vendo-machine --bin vendo-sim
//! ```

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use vendo_core::{Catalog, Money, RESERVE_PAR_COUNT};
use vendo_machine::{
    MachineHandle, MaintenanceManager, PurchaseRequest, PurchaseTarget, VendingMachine,
    VendingMachineController,
};

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - show refused purchases
/// - Default: INFO level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // The preset: 20 products and 3 sets in a 5x4 grid
    let machine = VendingMachine::with_catalog(5, 4, Catalog::preset())?;
    let handle = MachineHandle::new(machine);
    let controller = VendingMachineController::new(handle.clone());
    let maintenance = MaintenanceManager::new(handle.clone());

    info!("machine created with the preset catalog");

    // A straightforward sale: Vanilla Ice Cream (100), tendered 2×50
    let receipt = controller.purchase(&PurchaseRequest::parse(
        PurchaseTarget::Product(1),
        "0,0,0,2,0",
    )?)?;
    println!(
        "Dispensed {} for {}, change: {}",
        receipt.name, receipt.price, receipt.change
    );

    // A sale with change: Corn Flakes (20), tendered one 50
    let receipt = controller.purchase(&PurchaseRequest::parse(
        PurchaseTarget::Product(17),
        "0,0,0,1,0",
    )?)?;
    println!(
        "Dispensed {} for {}, change: {}",
        receipt.name, receipt.price, receipt.change
    );

    // A bundled set: Banana Split (165 + 50 + 15 = 230), tendered 250
    let receipt = controller.purchase(&PurchaseRequest::parse(
        PurchaseTarget::Set(1),
        "0,0,0,1,2",
    )?)?;
    println!(
        "Dispensed set {} for {}, change: {}",
        receipt.name, receipt.price, receipt.change
    );

    // Refusal path: not enough money for a Milkshake set
    let refused = controller.purchase(&PurchaseRequest::parse(
        PurchaseTarget::Set(3),
        "0,0,0,0,1",
    )?);
    if let Err(error) = refused {
        warn!(%error, "purchase refused as expected");
    }

    // Maintenance visit
    let restocked = maintenance.restock_all(10)?;
    println!("Restocked {restocked} catalog entries to 10 units");

    maintenance.set_price(17, Money::from_units(25))?;
    println!("Corn Flakes repriced to 25");

    let replenished = maintenance.replenish_reserve(RESERVE_PAR_COUNT, RESERVE_PAR_COUNT);
    println!("Replenished {} denominations to par", replenished.len());

    let report = maintenance.collect_excess(RESERVE_PAR_COUNT);
    print!("{report}");

    Ok(())
}
