//! The transformation log: recorded drift of kit items away from their
//! canonical slots.
//!
//! The log is read at the start of reconciliation to locate drifted items
//! and rewritten at the end to reflect post-reconciliation truth. Its
//! durable form is owned by the caller's persistence layer; this module
//! only guarantees the types serialize.

use serde::{Deserialize, Serialize};

use crate::inventory::{ItemKey, PagedPosition};

/// A recorded displacement of one item from its canonical slot to a
/// different live position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transformation {
    /// The canonical slot the item belongs to
    pub origin: PagedPosition,
    /// Where the item actually sits now
    pub current: PagedPosition,
    pub item: ItemKey,
}

/// A kit item that was ejected to the world instead of staying placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropRecord {
    pub origin: PagedPosition,
    pub item: ItemKey,
}

/// Per-player, per-kit drift records. Invariant: at most one entry exists
/// per item across both lists; an item is never simultaneously active and
/// dropped. All mutators enforce this.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformationLog {
    active: Vec<Transformation>,
    dropped: Vec<DropRecord>,
}

impl TransformationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Active (still-in-inventory) drift records
    pub fn active(&self) -> &[Transformation] {
        &self.active
    }

    /// Items recorded as ejected to the world
    pub fn dropped(&self) -> &[DropRecord] {
        &self.dropped
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.dropped.is_empty()
    }

    /// The active record whose origin anchors the given cell, if any.
    /// Matches by cell, not rotation: the persisted key is the slot's
    /// anchor position.
    pub fn find_by_origin(&self, origin: PagedPosition) -> Option<&Transformation> {
        self.active.iter().find(|t| t.origin.same_cell(origin))
    }

    /// The active record for a specific item, if any
    pub fn find_by_item(&self, item: ItemKey) -> Option<&Transformation> {
        self.active.iter().find(|t| t.item == item)
    }

    /// Record that `item` now rests at `current` instead of its canonical
    /// `origin`. If the item is back at its exact canonical position the
    /// record is cleared instead; a drifted item is drifted even when only
    /// its rotation differs.
    pub fn record_move(&mut self, item: ItemKey, origin: PagedPosition, current: PagedPosition) {
        self.clear(item);
        if origin == current {
            return;
        }
        self.active.push(Transformation {
            origin,
            current,
            item,
        });
    }

    /// Record that `item` was ejected to the world
    pub fn record_drop(&mut self, item: ItemKey, origin: PagedPosition) {
        self.clear(item);
        self.dropped.push(DropRecord { origin, item });
    }

    /// Remove every record for `item` from both lists
    pub fn clear(&mut self, item: ItemKey) {
        self.active.retain(|t| t.item != item);
        self.dropped.retain(|d| d.item != item);
    }
}
