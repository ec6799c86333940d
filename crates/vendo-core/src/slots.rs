//! # Slots Module
//!
//! The vending machine's physical inventory grid.
//!
//! ## Grid Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              Slots (num_slots × num_items_per_slot)                     │
//! │                                                                         │
//! │           item 0        item 1        item 2                            │
//! │  slot 0  [Occupied(1)] [Empty      ] [Empty      ]                      │
//! │  slot 1  [Occupied(2)] [Empty      ] [Empty      ]                      │
//! │  slot 2  [Empty      ] [Occupied(5)] [Empty      ]                      │
//! │                                                                         │
//! │  A cell holds a selection number referencing the catalog, or Empty.    │
//! │  A selection number occupies AT MOST one cell across the whole grid.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lookups by selection number are a linear scan: grid dimensions are small
//! and bounded by machine configuration, and placement is not a hot path.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::validation::validate_grid_dimensions;

// =============================================================================
// Slot Content
// =============================================================================

/// What one grid cell holds.
///
/// A tagged variant instead of sentinel product objects: emptiness is a
/// state of the cell, not a magic product value compared by identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case", tag = "kind", content = "selection_number")]
pub enum SlotContent {
    /// The cell holds no product.
    Empty,
    /// The cell holds the product with this catalog selection number.
    Occupied(u32),
}

impl SlotContent {
    /// Checks whether the cell is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        matches!(self, SlotContent::Empty)
    }

    /// The occupying selection number, if any.
    #[inline]
    pub const fn selection_number(&self) -> Option<u32> {
        match self {
            SlotContent::Empty => None,
            SlotContent::Occupied(selection_number) => Some(*selection_number),
        }
    }
}

// =============================================================================
// Slots
// =============================================================================

/// A rectangular inventory grid: `num_slots` rows × `num_items_per_slot`
/// columns, each cell holding at most one product reference.
///
/// Every accessor is bounds-checked and returns an explicit result; there
/// are no silent no-ops on bad coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Slots {
    cells: Vec<Vec<SlotContent>>,
    num_slots: usize,
    num_items_per_slot: usize,
}

impl Slots {
    /// Creates a grid with every cell empty.
    ///
    /// Fails validation when either dimension is zero or exceeds the
    /// configured maximum.
    pub fn new(num_slots: usize, num_items_per_slot: usize) -> CoreResult<Self> {
        validate_grid_dimensions(num_slots, num_items_per_slot)?;
        Ok(Slots {
            cells: vec![vec![SlotContent::Empty; num_items_per_slot]; num_slots],
            num_slots,
            num_items_per_slot,
        })
    }

    /// Number of slot rows.
    #[inline]
    pub fn num_slots(&self) -> usize {
        self.num_slots
    }

    /// Number of item positions per slot.
    #[inline]
    pub fn num_items_per_slot(&self) -> usize {
        self.num_items_per_slot
    }

    fn check_bounds(&self, slot: usize, item: usize) -> CoreResult<()> {
        if slot >= self.num_slots || item >= self.num_items_per_slot {
            return Err(CoreError::SlotIndexOutOfRange {
                slot,
                item,
                num_slots: self.num_slots,
                num_items_per_slot: self.num_items_per_slot,
            });
        }
        Ok(())
    }

    /// Returns the content of one cell.
    pub fn content(&self, slot: usize, item: usize) -> CoreResult<SlotContent> {
        self.check_bounds(slot, item)?;
        Ok(self.cells[slot][item])
    }

    /// Places a product reference into a cell.
    ///
    /// ## Errors
    /// - [`CoreError::SlotIndexOutOfRange`] on a bad coordinate
    /// - [`CoreError::DuplicatePlacement`] when the selection number already
    ///   occupies another cell (a configuration error, caught fail-fast)
    pub fn place(&mut self, slot: usize, item: usize, selection_number: u32) -> CoreResult<()> {
        self.check_bounds(slot, item)?;
        if let Some((occupied_slot, occupied_item)) = self.locate(selection_number) {
            return Err(CoreError::DuplicatePlacement {
                selection_number,
                slot: occupied_slot,
                item: occupied_item,
            });
        }
        self.cells[slot][item] = SlotContent::Occupied(selection_number);
        Ok(())
    }

    /// Empties one cell.
    pub fn clear(&mut self, slot: usize, item: usize) -> CoreResult<()> {
        self.check_bounds(slot, item)?;
        self.cells[slot][item] = SlotContent::Empty;
        Ok(())
    }

    /// Finds the cell occupied by a selection number, if any.
    pub fn locate(&self, selection_number: u32) -> Option<(usize, usize)> {
        self.cells.iter().enumerate().find_map(|(slot, row)| {
            row.iter().enumerate().find_map(|(item, cell)| {
                (cell.selection_number() == Some(selection_number)).then_some((slot, item))
            })
        })
    }

    /// Checks whether a selection number is placed anywhere in the grid.
    #[inline]
    pub fn contains(&self, selection_number: u32) -> bool {
        self.locate(selection_number).is_some()
    }

    /// Iterates the selection numbers of all occupied cells, row-major.
    pub fn occupied_selections(&self) -> impl Iterator<Item = u32> + '_ {
        self.cells
            .iter()
            .flatten()
            .filter_map(SlotContent::selection_number)
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.occupied_selections().count()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let slots = Slots::new(3, 4).unwrap();
        assert_eq!(slots.num_slots(), 3);
        assert_eq!(slots.num_items_per_slot(), 4);
        assert_eq!(slots.occupied_count(), 0);
        assert_eq!(slots.content(2, 3).unwrap(), SlotContent::Empty);
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(Slots::new(0, 4).is_err());
        assert!(Slots::new(3, 0).is_err());
    }

    #[test]
    fn test_place_and_lookup() {
        let mut slots = Slots::new(3, 4).unwrap();
        slots.place(1, 2, 7).unwrap();

        assert_eq!(slots.content(1, 2).unwrap(), SlotContent::Occupied(7));
        assert_eq!(slots.locate(7), Some((1, 2)));
        assert!(slots.contains(7));
        assert!(!slots.contains(8));
    }

    #[test]
    fn test_out_of_range_is_an_error() {
        let mut slots = Slots::new(3, 4).unwrap();

        let err = slots.content(3, 0).unwrap_err();
        assert!(matches!(err, CoreError::SlotIndexOutOfRange { slot: 3, .. }));

        let err = slots.place(0, 4, 7).unwrap_err();
        assert!(matches!(err, CoreError::SlotIndexOutOfRange { item: 4, .. }));
    }

    #[test]
    fn test_duplicate_placement_fails_fast() {
        let mut slots = Slots::new(3, 4).unwrap();
        slots.place(0, 0, 7).unwrap();

        let err = slots.place(2, 1, 7).unwrap_err();
        assert!(matches!(
            err,
            CoreError::DuplicatePlacement { selection_number: 7, slot: 0, item: 0 }
        ));
        // The original cell is untouched and the new one stays empty
        assert_eq!(slots.content(0, 0).unwrap(), SlotContent::Occupied(7));
        assert_eq!(slots.content(2, 1).unwrap(), SlotContent::Empty);
    }

    #[test]
    fn test_clear_then_replace() {
        let mut slots = Slots::new(2, 2).unwrap();
        slots.place(0, 0, 7).unwrap();
        slots.clear(0, 0).unwrap();
        assert!(!slots.contains(7));

        // After clearing, the selection number may be placed elsewhere
        slots.place(1, 1, 7).unwrap();
        assert_eq!(slots.locate(7), Some((1, 1)));
    }

    #[test]
    fn test_occupied_selections_row_major() {
        let mut slots = Slots::new(2, 2).unwrap();
        slots.place(0, 1, 5).unwrap();
        slots.place(1, 0, 9).unwrap();

        let occupied: Vec<u32> = slots.occupied_selections().collect();
        assert_eq!(occupied, vec![5, 9]);
        assert_eq!(slots.occupied_count(), 2);
    }
}
