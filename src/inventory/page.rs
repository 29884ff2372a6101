//! Inventory page descriptors.

use serde::{Deserialize, Serialize};

use super::position::CellRect;

/// Index of a page within a player's inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageIndex(pub u8);

/// What kind of space a page provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageKind {
    /// Bounded w*h grid; items occupy rotated rectangular footprints
    Grid,
    /// Exactly-one-item page (primary/secondary weapon style). Any two
    /// occupants overlap totally regardless of footprint, and the single
    /// occupant is always anchored at the origin.
    Slot,
}

/// Static description of one inventory page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSpec {
    pub kind: PageKind,
    pub width: u8,
    pub height: u8,
}

impl PageSpec {
    /// A bounded rectangular grid page
    pub fn grid(width: u8, height: u8) -> Self {
        Self {
            kind: PageKind::Grid,
            width,
            height,
        }
    }

    /// A single-item page (primary/secondary style)
    pub fn slot() -> Self {
        Self {
            kind: PageKind::Slot,
            width: 1,
            height: 1,
        }
    }

    /// Whether a footprint rectangle lies entirely within this page's bounds.
    /// Slot pages ignore footprint dimensions; only the origin anchor is valid.
    pub fn contains(&self, rect: CellRect) -> bool {
        match self.kind {
            PageKind::Slot => rect.x == 0 && rect.y == 0,
            PageKind::Grid => {
                rect.x + rect.w <= self.width as u16 && rect.y + rect.h <= self.height as u16
            }
        }
    }
}
