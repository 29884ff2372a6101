//! Item identity and placement views.

use serde::{Deserialize, Serialize};

use super::position::{CellRect, ItemSize, PagedPosition};

/// Stable identity of one item instance. Keys survive evictions and
/// re-placements; all cross-pass bookkeeping is keyed by `ItemKey`,
/// never by grid index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemKey(pub u64);

/// Reference to an item definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetId(pub u32);

/// Read-only view of one item as currently placed on a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedItem {
    pub key: ItemKey,
    pub asset: AssetId,
    pub size: ItemSize,
    pub pos: PagedPosition,
}

impl PlacedItem {
    /// The rotated footprint rectangle this item currently covers
    pub fn footprint(&self) -> CellRect {
        self.pos.footprint(self.size)
    }
}

/// An item temporarily lifted off the grid. Every held item must be
/// re-placed or dropped to the world; discarding one loses the item.
#[must_use = "a held item must be re-placed or dropped, not discarded"]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeldItem {
    pub key: ItemKey,
    pub asset: AssetId,
    pub size: ItemSize,
}
