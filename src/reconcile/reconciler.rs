//! The layout reconciliation algorithm.
//!
//! Given a kit's canonical layout, a player's live inventory, and the
//! recorded drift log, move every kit-tracked item back to its canonical
//! slot. Conflicts resolve by in-place move, direct swap, or eviction;
//! evicted foreign items re-enter anywhere they fit or are dropped to the
//! world as the absolute fallback. Business-logic conflicts never raise
//! errors; they degrade to skip, leave-misplaced, or drop.

use crate::inventory::{
    HeldItem, InventoryStore, ItemKey, ItemSize, PageIndex, PageKind, PagedPosition, PlacedItem,
    Rotation,
};
use crate::kit::{Kit, KitSlot};
use crate::transform::TransformationLog;

use super::located::LocatedItem;
use super::placement::find_free_position;

/// Outcome counters for one reconciliation run. Purely observational;
/// callers may ignore it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Kit items resting at their exact canonical position and rotation
    pub restored: usize,
    /// Kit items left somewhere other than their canonical slot
    pub misplaced: usize,
    /// Items ejected to the world for lack of space
    pub dropped: usize,
    /// Reconciliation passes executed
    pub passes: usize,
    /// Whether the safety counter ended the run before it settled
    pub bailed_out: bool,
}

/// Restore every kit-tracked item to its canonical slot, resolving
/// conflicts as needed. The store is mutated in place; the log is
/// rewritten to reflect post-reconciliation truth.
///
/// The caller must hold whatever per-player exclusivity the surrounding
/// system requires; this function is synchronous, performs no I/O, and
/// keeps no state across invocations.
pub fn reconcile<S: InventoryStore>(
    kit: &Kit,
    store: &mut S,
    log: &mut TransformationLog,
) -> ReconcileReport {
    let mut run = Reconciliation {
        kit,
        store,
        log,
        located: Vec::new(),
        foreign: Vec::new(),
        effect_played: false,
        report: ReconcileReport::default(),
    };
    run.run();
    run.report
}

struct Reconciliation<'a, S: InventoryStore> {
    kit: &'a Kit,
    store: &'a mut S,
    log: &'a mut TransformationLog,
    located: Vec<LocatedItem>,
    /// Evicted non-kit items awaiting re-insertion, with their
    /// pre-eviction position
    foreign: Vec<(HeldItem, PagedPosition)>,
    effect_played: bool,
    report: ReconcileReport,
}

impl<S: InventoryStore> Reconciliation<'_, S> {
    fn run(&mut self) {
        self.locate();

        // Safety counter: one pass per live item guards against conflict
        // chains that never settle
        let budget = self.store.total_items().max(1);
        loop {
            self.report.passes += 1;
            self.run_pass();
            if !self.pending() {
                break;
            }
            if self.report.passes >= budget {
                self.report.bailed_out = true;
                log::warn!(
                    "layout reconciliation for kit '{}' did not settle after {} passes, stopping",
                    self.kit.name,
                    self.report.passes
                );
                break;
            }
        }

        self.flush_held();
        self.flush_foreign();
        self.finish_bookkeeping();

        log::debug!(
            "reconciled kit '{}': {} restored, {} misplaced, {} dropped in {} passes",
            self.kit.name,
            self.report.restored,
            self.report.misplaced,
            self.report.dropped,
            self.report.passes
        );
    }

    /// Resolve each grid-placed kit slot to the live item restoring it.
    /// Tracked drift wins; otherwise whatever sits at the canonical anchor
    /// is presumed to be the kit item. Missing items are skipped.
    fn locate(&mut self) {
        for (slot_index, slot) in self.kit.slots.iter().enumerate() {
            let Some(target) = slot.grid_position() else {
                // Worn clothing has no position conflicts
                continue;
            };
            if self.locate_tracked(slot_index, slot, target) {
                continue;
            }
            self.locate_at_anchor(slot_index, slot, target);
        }
    }

    /// Resolve a slot through the drift log. Returns false when the slot
    /// is still unresolved and the anchor presumption should run.
    fn locate_tracked(&mut self, slot_index: usize, slot: &KitSlot, target: PagedPosition) -> bool {
        let Some(t) = self.log.find_by_origin(target).copied() else {
            return false;
        };
        match self.store.item(t.item) {
            Some(live) if live.asset == slot.asset => {
                self.claim(slot_index, live.key, target);
                true
            }
            Some(live) => {
                // A foreign item's own drift record can share this origin
                // cell; it is not this slot's item
                log::debug!(
                    "drift record at {:?} names item {:?} with asset {:?}, expected {:?}; ignoring it",
                    target,
                    t.item,
                    live.asset,
                    slot.asset
                );
                false
            }
            None => {
                log::debug!(
                    "tracked kit item {:?} for slot at {:?} is no longer in inventory",
                    t.item,
                    target
                );
                self.log.clear(t.item);
                true
            }
        }
    }

    /// Presume the item anchored at the canonical cell is the kit item,
    /// unless that item is tracked drift belonging to some other origin
    fn locate_at_anchor(&mut self, slot_index: usize, slot: &KitSlot, target: PagedPosition) {
        match self.store.item_at(target) {
            Some(live) => {
                if self.log.find_by_item(live.key).is_some() {
                    log::debug!(
                        "item {:?} at {:?} is tracked from another origin, leaving slot unresolved",
                        live.key,
                        target
                    );
                    return;
                }
                if live.asset != slot.asset {
                    log::debug!(
                        "item at {:?} has asset {:?}, expected {:?}; treating it as the kit item",
                        target,
                        live.asset,
                        slot.asset
                    );
                }
                self.claim(slot_index, live.key, target);
            }
            None => log::debug!("no live item found for kit slot at {:?}", target),
        }
    }

    fn claim(&mut self, slot_index: usize, key: ItemKey, target: PagedPosition) {
        if self.located.iter().any(|l| l.key == key) {
            log::debug!(
                "item {:?} already claimed by another slot, skipping slot at {:?}",
                key,
                target
            );
            return;
        }
        self.located.push(LocatedItem::new(slot_index, key));
    }

    /// One full pass over the working set, then a retry of every item the
    /// pass left evicted.
    fn run_pass(&mut self) {
        for i in 0..self.located.len() {
            if self.located[i].held.is_some() {
                continue;
            }
            let key = self.located[i].key;
            let Some(target) = self.slot_target(self.located[i].slot_index) else {
                continue;
            };
            // Position is re-derived from the store every pass; nothing is
            // cached across mutations
            let Some(live) = self.store.item(key) else {
                continue;
            };
            if live.pos == target {
                continue;
            }
            if self.store.fits(target, live.size, &[key]) {
                // Covers plain moves and rotation-only fixes alike
                if !self.store.move_item(key, target) {
                    log::debug!("move of {:?} to {:?} was rejected", key, target);
                }
                continue;
            }
            if self.try_swap(key, live, target) {
                continue;
            }
            self.evict_and_claim(key, live, target);
        }
        self.retry_held();
    }

    /// Try a direct exchange with a sole occupant of the canonical slot.
    /// Legal only when the occupant can take this item's current footprint
    /// exactly, possibly after a 90-degree transpose.
    fn try_swap(&mut self, key: ItemKey, live: PlacedItem, target: PagedPosition) -> bool {
        let occupants: Vec<PlacedItem> = self
            .store
            .items_overlapping(target, live.size)
            .into_iter()
            .filter(|p| p.key != key)
            .collect();
        if occupants.len() != 1 {
            return false;
        }
        let other = occupants[0];

        let other_rot = match self.page_kind(live.pos.page) {
            // Single-item pages take any occupant whole
            Some(PageKind::Slot) => Rotation::default(),
            Some(PageKind::Grid) => {
                let dims = live.size.rotated(live.pos.rot);
                match rotation_matching(other.size, dims) {
                    Some(rot) => rot,
                    None => return false,
                }
            }
            None => return false,
        };
        let other_dst = PagedPosition::new(live.pos.page, live.pos.x, live.pos.y, other_rot);

        let ignore = [key, other.key];
        if !self.store.fits(target, live.size, &ignore)
            || !self.store.fits(other_dst, other.size, &ignore)
        {
            return false;
        }

        let Some(ours) = self.store.remove(key) else {
            return false;
        };
        let Some(theirs) = self.store.remove(other.key) else {
            self.restore_or_queue(ours, live.pos);
            return false;
        };
        self.restore_or_queue(ours, target);
        self.restore_or_queue(theirs, other_dst);
        true
    }

    /// Evict everything overlapping the canonical slot, then claim it.
    /// Tracked evictees go back through the retry stage; foreign ones are
    /// queued for re-insertion after the loop settles.
    fn evict_and_claim(&mut self, key: ItemKey, live: PlacedItem, target: PagedPosition) {
        let occupants: Vec<PlacedItem> = self
            .store
            .items_overlapping(target, live.size)
            .into_iter()
            .filter(|p| p.key != key)
            .collect();
        for occ in occupants {
            let Some(held) = self.store.remove(occ.key) else {
                continue;
            };
            match self.entry_index(occ.key) {
                Some(i) => self.located[i].held = Some(held),
                None => self.foreign.push((held, occ.pos)),
            }
        }
        if !self.store.move_item(key, target) {
            // Stale catalog or an out-of-bounds slot; leave the item put
            log::debug!("kit item {:?} could not claim its canonical slot {:?}", key, target);
        }
    }

    /// Try each evicted tracked item at its own canonical slot, which may
    /// have been freed during the pass
    fn retry_held(&mut self) {
        for i in 0..self.located.len() {
            let Some(target) = self.slot_target(self.located[i].slot_index) else {
                continue;
            };
            let Some(held) = self.located[i].held.take() else {
                continue;
            };
            if let Err(back) = self.store.place(held, target) {
                self.located[i].held = Some(back);
            }
        }
    }

    fn pending(&self) -> bool {
        self.located.iter().any(|l| l.held.is_some())
    }

    /// After a bailout some tracked items may still be in hand; settle them
    /// somewhere rather than lose them
    fn flush_held(&mut self) {
        for i in 0..self.located.len() {
            let Some(held) = self.located[i].held.take() else {
                continue;
            };
            let origin = self.slot_target(self.located[i].slot_index);
            match origin {
                Some(target) => match self.store.place(held, target) {
                    Ok(_) => {}
                    Err(back) => self.reinsert_or_drop(back, target.page, origin),
                },
                None => self.reinsert_or_drop(held, PageIndex(0), None),
            }
        }
    }

    fn flush_foreign(&mut self) {
        let foreign = std::mem::take(&mut self.foreign);
        for (held, src) in foreign {
            // A prior drift record keeps its original origin; otherwise the
            // pre-eviction position becomes one
            let origin = self
                .log
                .find_by_item(held.key)
                .map(|t| t.origin)
                .unwrap_or(src);
            self.reinsert_or_drop(held, src.page, Some(origin));
        }
    }

    /// Re-insert a displaced item anywhere it fits, source page first, or
    /// drop it to the world as the absolute fallback
    fn reinsert_or_drop(
        &mut self,
        held: HeldItem,
        preferred: PageIndex,
        origin: Option<PagedPosition>,
    ) {
        match find_free_position(&*self.store, held.size, preferred) {
            Some(pos) => {
                let key = held.key;
                match self.store.place(held, pos) {
                    Ok(_) => {
                        if let Some(origin) = origin {
                            self.log.record_move(key, origin, pos);
                        } else if let Some(t) = self.log.find_by_item(key).copied() {
                            self.log.record_move(key, t.origin, pos);
                        }
                    }
                    Err(back) => self.drop_item(back, origin),
                }
            }
            None => self.drop_item(held, origin),
        }
    }

    fn drop_item(&mut self, held: HeldItem, origin: Option<PagedPosition>) {
        let key = held.key;
        let origin = origin.or_else(|| self.log.find_by_item(key).map(|t| t.origin));
        match origin {
            Some(origin) => self.log.record_drop(key, origin),
            None => self.log.clear(key),
        }
        // Only the first drop of an invocation plays the effect
        let play_effect = !self.effect_played;
        self.effect_played = true;
        log::debug!("dropping item {:?} to the world, no space left in inventory", key);
        self.store.drop_to_world(held, play_effect);
        self.report.dropped += 1;
    }

    /// Rewrite the log so it reflects where every kit-tracked item ended up
    fn finish_bookkeeping(&mut self) {
        for i in 0..self.located.len() {
            let key = self.located[i].key;
            let Some(target) = self.slot_target(self.located[i].slot_index) else {
                continue;
            };
            // Dropped items were already recorded on the way out
            let Some(live) = self.store.item(key) else {
                continue;
            };
            if live.pos == target {
                self.log.clear(key);
                self.report.restored += 1;
            } else {
                self.log.record_move(key, target, live.pos);
                self.report.misplaced += 1;
            }
        }
    }

    fn restore_or_queue(&mut self, held: HeldItem, pos: PagedPosition) {
        let key = held.key;
        if let Err(back) = self.store.place(held, pos) {
            match self.entry_index(key) {
                Some(i) => self.located[i].held = Some(back),
                None => self.foreign.push((back, pos)),
            }
        }
    }

    fn entry_index(&self, key: ItemKey) -> Option<usize> {
        self.located.iter().position(|l| l.key == key)
    }

    fn slot_target(&self, slot_index: usize) -> Option<PagedPosition> {
        self.kit.slots.get(slot_index)?.grid_position()
    }

    fn page_kind(&self, page: PageIndex) -> Option<PageKind> {
        self.store.pages().get(page.0 as usize).map(|spec| spec.kind)
    }
}

/// The rotation, if any, that gives `size` exactly the footprint `dims`
fn rotation_matching(size: ItemSize, dims: ItemSize) -> Option<Rotation> {
    [0u8, 1]
        .into_iter()
        .map(Rotation::new)
        .find(|&rot| size.rotated(rot) == dims)
}
