//! The inventory abstraction seam.
//!
//! The reconciler depends only on this trait, never on a concrete engine
//! inventory. The store owns all items and is the sole source of truth for
//! live state; the reconciler only repositions, evicts, and re-places.

use super::item::{HeldItem, ItemKey, PlacedItem};
use super::page::PageSpec;
use super::position::{ItemSize, PagedPosition};

/// A single player's live inventory: a fixed set of pages, each holding
/// zero or more placed items.
pub trait InventoryStore {
    /// Static descriptions of every page, indexed by `PageIndex`
    fn pages(&self) -> &[PageSpec];

    /// Total number of items currently placed across all pages
    fn total_items(&self) -> usize;

    /// Look up one item by identity
    fn item(&self, key: ItemKey) -> Option<PlacedItem>;

    /// The item whose anchor is exactly the given cell, if any
    fn item_at(&self, pos: PagedPosition) -> Option<PlacedItem>;

    /// Every item whose footprint overlaps the given footprint. On
    /// single-item pages any occupant overlaps totally.
    fn items_overlapping(&self, pos: PagedPosition, size: ItemSize) -> Vec<PlacedItem>;

    /// Whether an item of the given size could sit at `pos`: in bounds and
    /// overlapping nothing except the keys in `ignoring`.
    fn fits(&self, pos: PagedPosition, size: ItemSize, ignoring: &[ItemKey]) -> bool;

    /// Move an existing item to a new position. Returns false if the item
    /// is unknown or the destination is invalid; the item stays put.
    fn move_item(&mut self, key: ItemKey, pos: PagedPosition) -> bool;

    /// Lift an item off its grid. The caller now holds it and must
    /// re-place or drop it.
    fn remove(&mut self, key: ItemKey) -> Option<HeldItem>;

    /// Place a held item at a position, returning its key on success.
    /// On failure the item is handed back so it cannot be lost.
    fn place(&mut self, held: HeldItem, pos: PagedPosition) -> Result<ItemKey, HeldItem>;

    /// Eject an item into the world near the player. `play_effect`
    /// requests the drop visual/audio effect.
    fn drop_to_world(&mut self, held: HeldItem, play_effect: bool);
}
