//! Inventory data model: pages, positions, items, and the store abstraction.

pub mod grid;
pub mod item;
pub mod page;
pub mod position;
pub mod store;

pub use grid::{GridInventory, InventoryError, WorldDrop};
pub use item::{AssetId, HeldItem, ItemKey, PlacedItem};
pub use page::{PageIndex, PageKind, PageSpec};
pub use position::{CellRect, ItemSize, PagedPosition, Rotation};
pub use store::InventoryStore;
