//! Kit catalog types: the canonical layout a kit should restore to.

use serde::{Deserialize, Serialize};

use crate::inventory::{AssetId, ItemSize, PagedPosition};

/// Errors for malformed kit definitions
#[derive(Debug, thiserror::Error)]
pub enum KitError {
    #[error("duplicate canonical anchor at page {page} ({x},{y})")]
    DuplicateAnchor { page: u8, x: u8, y: u8 },
}

/// Where one kit item lives when the kit is freshly granted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KitPlacement {
    /// Worn clothing; no grid position, never reconciled
    Worn,
    /// A canonical grid anchor and rotation
    Grid(PagedPosition),
}

/// Immutable target for one logical kit item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KitSlot {
    pub asset: AssetId,
    pub size: ItemSize,
    pub placement: KitPlacement,
}

impl KitSlot {
    /// A grid-placed kit item
    pub fn at(asset: AssetId, size: ItemSize, pos: PagedPosition) -> Self {
        Self {
            asset,
            size,
            placement: KitPlacement::Grid(pos),
        }
    }

    /// A worn clothing item
    pub fn worn(asset: AssetId, size: ItemSize) -> Self {
        Self {
            asset,
            size,
            placement: KitPlacement::Worn,
        }
    }

    /// The canonical grid position, if this slot is grid-placed
    pub fn grid_position(&self) -> Option<PagedPosition> {
        match self.placement {
            KitPlacement::Grid(pos) => Some(pos),
            KitPlacement::Worn => None,
        }
    }
}

/// A named, admin-curated bundle of item definitions and their canonical
/// layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kit {
    pub name: String,
    pub slots: Vec<KitSlot>,
}

impl Kit {
    pub fn new(name: impl Into<String>, slots: Vec<KitSlot>) -> Self {
        Self {
            name: name.into(),
            slots,
        }
    }

    /// Check the catalog contract: no two grid-placed slots may share a
    /// canonical anchor cell. The reconciler assumes this holds but does
    /// not enforce it.
    pub fn validate(&self) -> Result<(), KitError> {
        for (i, slot) in self.slots.iter().enumerate() {
            let Some(pos) = slot.grid_position() else {
                continue;
            };
            for other in &self.slots[i + 1..] {
                if let Some(other_pos) = other.grid_position() {
                    if pos.same_cell(other_pos) {
                        return Err(KitError::DuplicateAnchor {
                            page: pos.page.0,
                            x: pos.x,
                            y: pos.y,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{PageIndex, Rotation};

    fn pos(x: u8, y: u8) -> PagedPosition {
        PagedPosition::new(PageIndex(0), x, y, Rotation::new(0))
    }

    #[test]
    fn test_validate_accepts_distinct_anchors() {
        let kit = Kit::new(
            "scout",
            vec![
                KitSlot::at(AssetId(1), ItemSize::new(1, 1), pos(0, 0)),
                KitSlot::at(AssetId(2), ItemSize::new(2, 1), pos(1, 0)),
                KitSlot::worn(AssetId(3), ItemSize::new(2, 2)),
            ],
        );
        kit.validate().expect("distinct anchors should validate");
    }

    #[test]
    fn test_validate_rejects_duplicate_anchor() {
        let kit = Kit::new(
            "broken",
            vec![
                KitSlot::at(AssetId(1), ItemSize::new(1, 1), pos(2, 2)),
                KitSlot::at(AssetId(2), ItemSize::new(1, 1), pos(2, 2)),
            ],
        );
        assert!(matches!(
            kit.validate(),
            Err(KitError::DuplicateAnchor { page: 0, x: 2, y: 2 })
        ));
    }
}
