//! In-memory reference implementation of [`InventoryStore`].

use rand::Rng;
use rustc_hash::FxHashMap;

use super::item::{AssetId, HeldItem, ItemKey, PlacedItem};
use super::page::{PageKind, PageSpec};
use super::position::{ItemSize, PagedPosition};
use super::store::InventoryStore;

/// Default drop velocity forward
const DROP_FORWARD_VELOCITY: f32 = 4.0;
/// Random velocity range for drops
const DROP_RANDOM_VELOCITY: f32 = 1.0;

/// Errors for invalid use of the inventory API. These indicate caller bugs
/// (bad page specs, placements that were never checked), not data drift.
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("invalid page index: {page}")]
    InvalidPage { page: u8 },

    #[error("zero-sized page: {width}x{height}")]
    ZeroSizedPage { width: u8, height: u8 },

    #[error("zero-sized item: {w}x{h}")]
    ZeroSizedItem { w: u8, h: u8 },

    #[error("placement out of bounds at page {page} ({x},{y})")]
    OutOfBounds { page: u8, x: u8, y: u8 },

    #[error("cell already occupied at page {page} ({x},{y})")]
    Occupied { page: u8, x: u8, y: u8 },
}

#[derive(Debug, Clone, Copy)]
struct StoredItem {
    asset: AssetId,
    size: ItemSize,
    pos: PagedPosition,
}

/// An item that was ejected into the world
#[derive(Debug, Clone, PartialEq)]
pub struct WorldDrop {
    pub key: ItemKey,
    pub asset: AssetId,
    pub size: ItemSize,
    /// Scatter velocity the world spawn should apply
    pub velocity: [f32; 3],
    /// Whether the drop effect was requested for this ejection
    pub effect: bool,
}

/// Concrete per-player inventory: a fixed set of pages with an
/// identity-keyed item table. Iteration follows insertion order so
/// queries are deterministic.
#[derive(Debug, Default)]
pub struct GridInventory {
    pages: Vec<PageSpec>,
    items: FxHashMap<ItemKey, StoredItem>,
    order: Vec<ItemKey>,
    next_key: u64,
    dropped: Vec<WorldDrop>,
}

impl GridInventory {
    /// Create an inventory from page descriptions
    pub fn new(pages: Vec<PageSpec>) -> Result<Self, InventoryError> {
        for spec in &pages {
            if spec.width == 0 || spec.height == 0 {
                return Err(InventoryError::ZeroSizedPage {
                    width: spec.width,
                    height: spec.height,
                });
            }
        }
        Ok(Self {
            pages,
            ..Self::default()
        })
    }

    /// Create a new item directly on a page, assigning it a fresh key
    pub fn spawn(
        &mut self,
        asset: AssetId,
        size: ItemSize,
        pos: PagedPosition,
    ) -> Result<ItemKey, InventoryError> {
        if size.w == 0 || size.h == 0 {
            return Err(InventoryError::ZeroSizedItem { w: size.w, h: size.h });
        }
        let spec = self
            .pages
            .get(pos.page.0 as usize)
            .ok_or(InventoryError::InvalidPage { page: pos.page.0 })?;
        if !spec.contains(pos.footprint(size)) {
            return Err(InventoryError::OutOfBounds {
                page: pos.page.0,
                x: pos.x,
                y: pos.y,
            });
        }
        if !self.overlapping_keys(pos, size, &[]).is_empty() {
            return Err(InventoryError::Occupied {
                page: pos.page.0,
                x: pos.x,
                y: pos.y,
            });
        }
        let key = ItemKey(self.next_key);
        self.next_key += 1;
        self.items.insert(key, StoredItem { asset, size, pos });
        self.order.push(key);
        Ok(key)
    }

    /// All placed items in insertion order
    pub fn items(&self) -> impl Iterator<Item = PlacedItem> + '_ {
        self.order.iter().filter_map(|&key| self.item(key))
    }

    /// Items ejected to the world since this inventory was created
    pub fn dropped(&self) -> &[WorldDrop] {
        &self.dropped
    }

    fn placed(&self, key: ItemKey, stored: &StoredItem) -> PlacedItem {
        PlacedItem {
            key,
            asset: stored.asset,
            size: stored.size,
            pos: stored.pos,
        }
    }

    /// Keys of items whose footprints overlap the given footprint,
    /// excluding `ignoring`, in insertion order
    fn overlapping_keys(
        &self,
        pos: PagedPosition,
        size: ItemSize,
        ignoring: &[ItemKey],
    ) -> Vec<ItemKey> {
        let Some(spec) = self.pages.get(pos.page.0 as usize) else {
            return Vec::new();
        };
        let rect = pos.footprint(size);
        self.order
            .iter()
            .copied()
            .filter(|key| !ignoring.contains(key))
            .filter(|key| {
                let Some(stored) = self.items.get(key) else {
                    return false;
                };
                if stored.pos.page != pos.page {
                    return false;
                }
                match spec.kind {
                    // Single-item pages: any coexistence is total overlap
                    PageKind::Slot => true,
                    PageKind::Grid => stored.pos.footprint(stored.size).intersects(rect),
                }
            })
            .collect()
    }
}

impl InventoryStore for GridInventory {
    fn pages(&self) -> &[PageSpec] {
        &self.pages
    }

    fn total_items(&self) -> usize {
        self.items.len()
    }

    fn item(&self, key: ItemKey) -> Option<PlacedItem> {
        self.items.get(&key).map(|stored| self.placed(key, stored))
    }

    fn item_at(&self, pos: PagedPosition) -> Option<PlacedItem> {
        self.order.iter().find_map(|&key| {
            let stored = self.items.get(&key)?;
            if stored.pos.same_cell(pos) {
                Some(self.placed(key, stored))
            } else {
                None
            }
        })
    }

    fn items_overlapping(&self, pos: PagedPosition, size: ItemSize) -> Vec<PlacedItem> {
        self.overlapping_keys(pos, size, &[])
            .into_iter()
            .filter_map(|key| self.item(key))
            .collect()
    }

    fn fits(&self, pos: PagedPosition, size: ItemSize, ignoring: &[ItemKey]) -> bool {
        let Some(spec) = self.pages.get(pos.page.0 as usize) else {
            return false;
        };
        spec.contains(pos.footprint(size)) && self.overlapping_keys(pos, size, ignoring).is_empty()
    }

    fn move_item(&mut self, key: ItemKey, pos: PagedPosition) -> bool {
        let Some(stored) = self.items.get(&key) else {
            return false;
        };
        if !self.fits(pos, stored.size, &[key]) {
            return false;
        }
        if let Some(stored) = self.items.get_mut(&key) {
            stored.pos = pos;
        }
        true
    }

    fn remove(&mut self, key: ItemKey) -> Option<HeldItem> {
        let stored = self.items.remove(&key)?;
        self.order.retain(|&k| k != key);
        Some(HeldItem {
            key,
            asset: stored.asset,
            size: stored.size,
        })
    }

    fn place(&mut self, held: HeldItem, pos: PagedPosition) -> Result<ItemKey, HeldItem> {
        if !self.fits(pos, held.size, &[]) {
            return Err(held);
        }
        let key = held.key;
        self.items.insert(
            key,
            StoredItem {
                asset: held.asset,
                size: held.size,
                pos,
            },
        );
        self.order.push(key);
        Ok(key)
    }

    fn drop_to_world(&mut self, held: HeldItem, play_effect: bool) {
        // Scatter the drop a little so stacked ejections don't overlap in world
        let mut rng = rand::thread_rng();
        let velocity = [
            rng.gen_range(-DROP_RANDOM_VELOCITY..DROP_RANDOM_VELOCITY),
            rng.gen_range(0.0..DROP_RANDOM_VELOCITY) + DROP_FORWARD_VELOCITY,
            rng.gen_range(-DROP_RANDOM_VELOCITY..DROP_RANDOM_VELOCITY),
        ];
        self.dropped.push(WorldDrop {
            key: held.key,
            asset: held.asset,
            size: held.size,
            velocity,
            effect: play_effect,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::page::PageIndex;
    use crate::inventory::position::Rotation;

    fn backpack() -> GridInventory {
        GridInventory::new(vec![PageSpec::grid(6, 4)]).expect("valid page spec")
    }

    fn at(x: u8, y: u8) -> PagedPosition {
        PagedPosition::new(PageIndex(0), x, y, Rotation::new(0))
    }

    #[test]
    fn test_spawn_and_lookup() {
        let mut inv = backpack();
        let key = inv
            .spawn(AssetId(7), ItemSize::new(2, 2), at(1, 1))
            .expect("spawn should succeed");

        let item = inv.item(key).expect("item should exist");
        assert_eq!(item.asset, AssetId(7));
        assert_eq!(item.pos, at(1, 1));
        assert_eq!(inv.total_items(), 1);
        assert!(inv.item_at(at(1, 1)).is_some());
        assert!(inv.item_at(at(2, 2)).is_none());
    }

    #[test]
    fn test_spawn_rejects_overlap_and_bounds() {
        let mut inv = backpack();
        inv.spawn(AssetId(1), ItemSize::new(2, 2), at(0, 0))
            .expect("first spawn should succeed");

        let overlap = inv.spawn(AssetId(2), ItemSize::new(2, 2), at(1, 1));
        assert!(matches!(overlap, Err(InventoryError::Occupied { .. })));

        let oob = inv.spawn(AssetId(3), ItemSize::new(3, 1), at(4, 0));
        assert!(matches!(oob, Err(InventoryError::OutOfBounds { .. })));
    }

    #[test]
    fn test_rotated_fit() {
        let mut inv = backpack();
        // 4x1 fits rotated as 1x4 against the left edge
        let pos = PagedPosition::new(PageIndex(0), 0, 0, Rotation::new(1));
        inv.spawn(AssetId(1), ItemSize::new(4, 1), pos)
            .expect("rotated spawn should succeed");
        assert!(!inv.fits(at(0, 3), ItemSize::new(1, 1), &[]));
        assert!(inv.fits(at(1, 0), ItemSize::new(1, 1), &[]));
    }

    #[test]
    fn test_slot_page_total_overlap() {
        let mut inv = GridInventory::new(vec![PageSpec::slot()]).expect("valid page spec");
        let rifle = inv
            .spawn(AssetId(10), ItemSize::new(5, 2), at(0, 0))
            .expect("slot page accepts oversized items");

        // Any second occupant conflicts, whatever its footprint
        assert!(!inv.fits(at(0, 0), ItemSize::new(1, 1), &[]));
        assert!(inv.fits(at(0, 0), ItemSize::new(1, 1), &[rifle]));
        let overlapping = inv.items_overlapping(at(0, 0), ItemSize::new(1, 1));
        assert_eq!(overlapping.len(), 1);
        assert_eq!(overlapping[0].key, rifle);
    }

    #[test]
    fn test_remove_place_keeps_identity() {
        let mut inv = backpack();
        let key = inv
            .spawn(AssetId(5), ItemSize::new(1, 2), at(0, 0))
            .expect("spawn should succeed");

        let held = inv.remove(key).expect("item should be removable");
        assert_eq!(inv.total_items(), 0);
        assert_eq!(held.key, key);

        let placed = inv.place(held, at(3, 1)).expect("placement should succeed");
        assert_eq!(placed, key);
        assert_eq!(inv.item(key).expect("item placed back").pos, at(3, 1));
    }

    #[test]
    fn test_place_returns_item_on_failure() {
        let mut inv = backpack();
        inv.spawn(AssetId(1), ItemSize::new(2, 2), at(0, 0))
            .expect("spawn should succeed");
        let key = inv
            .spawn(AssetId(2), ItemSize::new(2, 2), at(3, 0))
            .expect("spawn should succeed");

        let held = inv.remove(key).expect("item should be removable");
        let rejected = inv.place(held, at(1, 1)).expect_err("occupied placement must fail");
        assert_eq!(rejected.key, key);
        // The item is back in hand, not lost
        inv.place(rejected, at(3, 0)).expect("original spot still free");
    }

    #[test]
    fn test_drop_records_effect_flag() {
        let mut inv = backpack();
        let key = inv
            .spawn(AssetId(9), ItemSize::new(1, 1), at(0, 0))
            .expect("spawn should succeed");
        let held = inv.remove(key).expect("item should be removable");
        inv.drop_to_world(held, true);

        assert_eq!(inv.dropped().len(), 1);
        assert!(inv.dropped()[0].effect);
        assert_eq!(inv.dropped()[0].key, key);
    }
}
