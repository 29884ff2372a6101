//! Inventory layout reconciliation for kit loadouts.
//!
//! A kit defines a canonical layout: which item goes on which page, at
//! which cell, with which rotation. Players rearrange their gear during
//! play, and each move is recorded as a transformation. When the kit is
//! re-equipped, [`reconcile`] walks the drift log and the live inventory
//! and deterministically restores every kit item to its canonical slot,
//! resolving collisions by in-place move, direct swap, or eviction, and
//! dropping items to the world only when no space exists anywhere.
//!
//! The crate never touches a game engine directly: the live inventory is
//! reached through the [`InventoryStore`] trait, with [`GridInventory`] as
//! the in-memory reference implementation. Reconciliation is synchronous,
//! single-player, and performs no I/O; every intermediate state it leaves
//! behind is a valid inventory state.

pub mod inventory;
pub mod kit;
pub mod reconcile;
pub mod transform;

pub use inventory::{
    AssetId, GridInventory, HeldItem, InventoryError, InventoryStore, ItemKey, ItemSize,
    PageIndex, PageKind, PageSpec, PagedPosition, PlacedItem, Rotation, WorldDrop,
};
pub use kit::{Kit, KitError, KitPlacement, KitSlot};
pub use reconcile::{reconcile, ReconcileReport};
pub use transform::{DropRecord, Transformation, TransformationLog};
