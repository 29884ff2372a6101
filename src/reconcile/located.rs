//! Per-invocation working set for the reconciliation loop.

use crate::inventory::{HeldItem, ItemKey};

/// One kit-tracked item the reconciler is restoring. Built fresh per
/// invocation and discarded on return; positions are always re-derived
/// from the store by key, never cached.
#[derive(Debug)]
pub(crate) struct LocatedItem {
    /// Index of the owning slot in the kit's slot list
    pub slot_index: usize,
    pub key: ItemKey,
    /// `Some` while the item is temporarily evicted from the grid,
    /// awaiting re-placement at its canonical slot
    pub held: Option<HeldItem>,
}

impl LocatedItem {
    pub fn new(slot_index: usize, key: ItemKey) -> Self {
        Self {
            slot_index,
            key,
            held: None,
        }
    }
}
