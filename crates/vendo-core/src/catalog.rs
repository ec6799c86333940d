//! # Catalog Module
//!
//! Purchasable products, bundled product sets, and the catalog that owns
//! them.
//!
//! ## Ownership Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Catalog                                        │
//! │                                                                         │
//! │   products: Vec<Product>        sets: Vec<ProductSet>                   │
//! │   ┌──────────────────┐          ┌───────────────────────────┐           │
//! │   │ 16 Sliced Banana │◄── key ──│ Banana Split              │           │
//! │   │ 18 Sprinkles     │◄── key ──│   main: own Product       │           │
//! │   │ 19 Cookie        │          │   components: [(16,1),    │           │
//! │   │ ...              │          │                (18,1)]    │           │
//! │   └──────────────────┘          └───────────────────────────┘           │
//! │                                                                         │
//! │   The catalog is the single owner of product data. Sets and slots      │
//! │   reference products by selection number, never by holding copies,     │
//! │   so a set purchase decrements the same stock a direct purchase does.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Catalog identity is the selection number, never the name. Products and
//! sets live in separate selection-number namespaces (a machine can have
//! product 1 "Vanilla Ice Cream" and set 1 "Banana Split" side by side).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::{validate_price, validate_product_name, validate_selection_number};

// =============================================================================
// Product
// =============================================================================

/// A product available for individual sale or as part of a set.
///
/// Mutable in place by maintenance operations (price, stock, name, calories,
/// individual-sale eligibility) and by a purchase (stock decrement).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique catalog key. Always ≥ 1: absence of a product is expressed
    /// with `Option` / [`SlotContent::Empty`], never a sentinel value.
    ///
    /// [`SlotContent::Empty`]: crate::slots::SlotContent::Empty
    pub selection_number: u32,

    /// Display name shown on the selection screen.
    pub name: String,

    /// Price in whole currency units.
    pub price: Money,

    /// Calorie count, for the nutrition display.
    pub calories: u32,

    /// Units currently on hand.
    pub stock: u32,

    /// Whether the product may be bought on its own (some ingredients are
    /// only sold inside a set).
    pub sold_individually: bool,

    /// Whether some registered set includes this product as a component.
    /// Maintained by [`Catalog::add_set`].
    pub part_of_set: bool,
}

impl Product {
    /// Creates a new product. Fails validation on an empty/over-long name,
    /// a zero selection number, or a negative price.
    pub fn new(
        selection_number: u32,
        name: impl Into<String>,
        price: Money,
        calories: u32,
        stock: u32,
        sold_individually: bool,
    ) -> CoreResult<Self> {
        let name = name.into();
        validate_selection_number(selection_number)?;
        validate_product_name(&name)?;
        validate_price(price)?;

        Ok(Product {
            selection_number,
            name,
            price,
            calories,
            stock,
            sold_individually,
            part_of_set: false,
        })
    }

    /// Checks whether at least one unit is on hand.
    #[inline]
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Removes `quantity` units from stock.
    ///
    /// The decrement is checked: taking more than is available fails with
    /// [`CoreError::OutOfStock`] and leaves the stock untouched.
    pub fn take_stock(&mut self, quantity: u32) -> CoreResult<()> {
        if self.stock < quantity {
            return Err(CoreError::OutOfStock {
                selection_number: self.selection_number,
                name: self.name.clone(),
                available: self.stock,
                requested: quantity,
            });
        }
        self.stock -= quantity;
        Ok(())
    }

    /// Sets the stock to an exact level (maintenance restock).
    #[inline]
    pub fn restock(&mut self, level: u32) {
        self.stock = level;
    }

    /// Edits the maintenance-adjustable fields in one validated step.
    pub fn update_details(
        &mut self,
        name: impl Into<String>,
        price: Money,
        calories: u32,
        sold_individually: bool,
    ) -> CoreResult<()> {
        let name = name.into();
        validate_product_name(&name)?;
        validate_price(price)?;

        self.name = name;
        self.price = price;
        self.calories = calories;
        self.sold_individually = sold_individually;
        Ok(())
    }
}

// =============================================================================
// Product Set
// =============================================================================

/// One included product inside a set: a catalog reference plus the quantity
/// the set consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SetComponent {
    /// Selection number of the included product in the owning catalog.
    pub selection_number: u32,
    /// How many units one set purchase consumes.
    pub quantity: u32,
}

/// A composite sale unit: a main product plus fixed quantities of included
/// products, sold at a combined price.
///
/// ## Invariants
/// - Each included product appears at most once as a component.
/// - Components reference catalog products by selection number; the set
///   never owns private product copies, so purchasing a set drains the same
///   inventory that individual purchases drain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductSet {
    /// The main product of the set. Sets have their own selection-number
    /// namespace, so `main.selection_number` identifies the set itself.
    pub main: Product,

    /// The included products and the quantity of each.
    components: Vec<SetComponent>,
}

impl ProductSet {
    /// Creates a set around a main product, with no components yet.
    pub fn new(main: Product) -> Self {
        ProductSet {
            main,
            components: Vec::new(),
        }
    }

    /// Adds an included product. A product may appear at most once per set;
    /// a repeat fails with [`CoreError::DuplicateSelection`].
    pub fn add_component(&mut self, selection_number: u32, quantity: u32) -> CoreResult<()> {
        if self
            .components
            .iter()
            .any(|component| component.selection_number == selection_number)
        {
            return Err(CoreError::DuplicateSelection(selection_number));
        }
        self.components.push(SetComponent {
            selection_number,
            quantity,
        });
        Ok(())
    }

    /// The set's selection number (the main product's).
    #[inline]
    pub fn selection_number(&self) -> u32 {
        self.main.selection_number
    }

    /// The included products of the set.
    #[inline]
    pub fn components(&self) -> &[SetComponent] {
        &self.components
    }

    /// Combined price: main price + Σ(component price × quantity).
    ///
    /// Fails with [`CoreError::ProductNotFound`] if a component references a
    /// product the catalog no longer has.
    pub fn total_price(&self, catalog: &Catalog) -> CoreResult<Money> {
        let mut total = self.main.price;
        for component in &self.components {
            let product = catalog.product(component.selection_number)?;
            total += product.price * i64::from(component.quantity);
        }
        Ok(total)
    }

    /// Combined calories: main calories + Σ(component calories × quantity).
    pub fn total_calories(&self, catalog: &Catalog) -> CoreResult<u32> {
        let mut total = self.main.calories;
        for component in &self.components {
            let product = catalog.product(component.selection_number)?;
            total += product.calories * component.quantity;
        }
        Ok(total)
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// The machine's product catalog: every registered product and set.
///
/// Constructed once at machine creation and passed by reference into the
/// slots, controller, and maintenance layers. There is deliberately no
/// global/static catalog state.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Catalog {
    products: Vec<Product>,
    sets: Vec<ProductSet>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Catalog::default()
    }

    /// Registers a product. Selection numbers are unique within a catalog;
    /// a repeat fails with [`CoreError::DuplicateSelection`].
    pub fn add_product(&mut self, product: Product) -> CoreResult<()> {
        if self.product(product.selection_number).is_ok() {
            return Err(CoreError::DuplicateSelection(product.selection_number));
        }
        self.products.push(product);
        Ok(())
    }

    /// Registers a product set.
    ///
    /// Validates that the set's selection number is free, that every
    /// component references a registered product, and marks each component
    /// product as `part_of_set`.
    pub fn add_set(&mut self, set: ProductSet) -> CoreResult<()> {
        if self.set(set.selection_number()).is_ok() {
            return Err(CoreError::DuplicateSelection(set.selection_number()));
        }
        for component in set.components() {
            // Fails fast on a dangling reference before the set is admitted
            self.product(component.selection_number)?;
        }
        for component in set.components() {
            if let Ok(product) = self.product_mut(component.selection_number) {
                product.part_of_set = true;
            }
        }
        self.sets.push(set);
        Ok(())
    }

    /// Deregisters a product, returning it.
    ///
    /// Removal is refused with [`CoreError::ProductReferencedBySet`] while
    /// any registered set includes the product as a component; the set must
    /// go first, so sets can never dangle.
    pub fn remove_product(&mut self, selection_number: u32) -> CoreResult<Product> {
        let index = self
            .products
            .iter()
            .position(|product| product.selection_number == selection_number)
            .ok_or(CoreError::ProductNotFound(selection_number))?;

        let referenced = self.sets.iter().any(|set| {
            set.components()
                .iter()
                .any(|component| component.selection_number == selection_number)
        });
        if referenced {
            return Err(CoreError::ProductReferencedBySet(selection_number));
        }

        Ok(self.products.remove(index))
    }

    /// Looks up a product by selection number.
    pub fn product(&self, selection_number: u32) -> CoreResult<&Product> {
        self.products
            .iter()
            .find(|product| product.selection_number == selection_number)
            .ok_or(CoreError::ProductNotFound(selection_number))
    }

    /// Looks up a product by selection number, mutably.
    pub fn product_mut(&mut self, selection_number: u32) -> CoreResult<&mut Product> {
        self.products
            .iter_mut()
            .find(|product| product.selection_number == selection_number)
            .ok_or(CoreError::ProductNotFound(selection_number))
    }

    /// Looks up a product set by its selection number.
    pub fn set(&self, selection_number: u32) -> CoreResult<&ProductSet> {
        self.sets
            .iter()
            .find(|set| set.selection_number() == selection_number)
            .ok_or(CoreError::SetNotFound(selection_number))
    }

    /// Looks up a product set by its selection number, mutably.
    pub fn set_mut(&mut self, selection_number: u32) -> CoreResult<&mut ProductSet> {
        self.sets
            .iter_mut()
            .find(|set| set.selection_number() == selection_number)
            .ok_or(CoreError::SetNotFound(selection_number))
    }

    /// All registered products, in registration order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// All registered products, mutably (maintenance sweeps).
    pub fn products_mut(&mut self) -> impl Iterator<Item = &mut Product> {
        self.products.iter_mut()
    }

    /// All registered sets, in registration order.
    pub fn sets(&self) -> impl Iterator<Item = &ProductSet> {
        self.sets.iter()
    }

    /// All registered sets, mutably.
    pub fn sets_mut(&mut self) -> impl Iterator<Item = &mut ProductSet> {
        self.sets.iter_mut()
    }

    /// Number of registered products.
    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    /// Number of registered sets.
    pub fn set_count(&self) -> usize {
        self.sets.len()
    }

    /// Validates, without mutating, that one set purchase's stock is on
    /// hand: 1 unit of the set's main product and `quantity` units of every
    /// component. Fails with [`CoreError::OutOfStock`] naming the first
    /// short line.
    pub fn check_set_stock(&self, set_selection_number: u32) -> CoreResult<()> {
        let set = self.set(set_selection_number)?;

        if !set.main.is_in_stock() {
            return Err(CoreError::OutOfStock {
                selection_number: set.selection_number(),
                name: set.main.name.clone(),
                available: 0,
                requested: 1,
            });
        }
        for component in set.components() {
            let product = self.product(component.selection_number)?;
            if product.stock < component.quantity {
                return Err(CoreError::OutOfStock {
                    selection_number: product.selection_number,
                    name: product.name.clone(),
                    available: product.stock,
                    requested: component.quantity,
                });
            }
        }
        Ok(())
    }

    /// Atomically takes the stock one set purchase consumes: 1 unit of the
    /// set's main product and `quantity` units of every component.
    ///
    /// ## Atomicity
    /// [`Catalog::check_set_stock`] validates every stock level before any
    /// is decremented. If any component (or the main product) lacks
    /// sufficient stock, the whole operation fails with
    /// [`CoreError::OutOfStock`] and no product's stock changes.
    pub fn take_set_stock(&mut self, set_selection_number: u32) -> CoreResult<()> {
        self.check_set_stock(set_selection_number)?;

        // Every take below is pre-validated and cannot fail
        let components: Vec<SetComponent> =
            self.set(set_selection_number)?.components().to_vec();
        let set = self.set_mut(set_selection_number)?;
        set.main.take_stock(1)?;
        for component in &components {
            self.product_mut(component.selection_number)?
                .take_stock(component.quantity)?;
        }
        Ok(())
    }
}

// =============================================================================
// Preset Catalog
// =============================================================================

impl Catalog {
    /// The factory preset: twenty ice-cream-stand products and three bundled
    /// sets (Banana Split, Ice Cream Sandwich, Milkshake).
    ///
    /// Collaborator setup screens start from this catalog and let the
    /// operator customize it before the machine is created.
    pub fn preset() -> Self {
        const FLAVORS: [&str; 15] = [
            "Vanilla",
            "Chocolate",
            "Coffee",
            "Toffee",
            "Caramel",
            "Honey",
            "Cookies and Cream",
            "Banana",
            "Strawberry",
            "Melon",
            "Coconut",
            "Raspberry",
            "Blueberry",
            "Orange",
            "Mango",
        ];

        let mut catalog = Catalog::new();
        let mut add = |selection, name: &str, price, calories, stock, sold_individually| {
            let product = Product::new(
                selection,
                name,
                Money::from_units(price),
                calories,
                stock,
                sold_individually,
            )
            .expect("preset product data is valid");
            catalog
                .add_product(product)
                .expect("preset selection numbers are unique");
        };

        for (index, flavor) in FLAVORS.iter().enumerate() {
            let selection = index as u32 + 1;
            add(
                selection,
                &format!("{flavor} Ice Cream"),
                100,
                250,
                10,
                true,
            );
        }
        add(16, "Sliced Banana", 50, 100, 10, false);
        add(17, "Corn Flakes", 20, 45, 10, false);
        add(18, "Sprinkles", 15, 25, 10, false);
        add(19, "Cookie", 50, 150, 10, true);
        add(20, "Milk", 25, 25, 10, false);

        let mut add_set = |selection, name: &str, price, calories, components: &[(u32, u32)]| {
            let main = Product::new(selection, name, Money::from_units(price), calories, 10, true)
                .expect("preset set data is valid");
            let mut set = ProductSet::new(main);
            for (component_selection, quantity) in components {
                set.add_component(*component_selection, *quantity)
                    .expect("preset components are unique");
            }
            catalog.add_set(set).expect("preset set data is valid");
        };

        add_set(1, "Banana Split", 165, 250, &[(16, 1), (18, 1)]);
        add_set(2, "Ice Cream Sandwich", 200, 250, &[(19, 2)]);
        add_set(3, "Milkshake", 175, 250, &[(16, 1), (20, 1)]);

        catalog
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
