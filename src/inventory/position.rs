//! Grid geometry primitives: rotations, item footprints, and paged positions.

use serde::{Deserialize, Serialize};

use super::page::PageIndex;

/// Number of distinct 90-degree rotation steps
pub const ROTATION_STEPS: u8 = 4;

/// Clockwise rotation of an item in 90-degree steps, normalized to 0..3.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rotation(u8);

impl Rotation {
    /// Create a rotation, normalizing the step count modulo 4
    pub fn new(steps: u8) -> Self {
        Self(steps % ROTATION_STEPS)
    }

    /// Number of 90-degree steps (0..3)
    pub fn steps(self) -> u8 {
        self.0
    }

    /// Whether this rotation transposes an item's footprint
    pub fn transposes(self) -> bool {
        self.0 % 2 == 1
    }
}

/// Base (unrotated) dimensions of an item, in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemSize {
    pub w: u8,
    pub h: u8,
}

impl ItemSize {
    pub fn new(w: u8, h: u8) -> Self {
        Self { w, h }
    }

    /// Footprint dimensions after applying a rotation
    pub fn rotated(self, rot: Rotation) -> ItemSize {
        if rot.transposes() {
            ItemSize { w: self.h, h: self.w }
        } else {
            self
        }
    }

    /// Total number of cells covered
    pub fn cells(self) -> u16 {
        self.w as u16 * self.h as u16
    }
}

/// Cell anchor of an item within one inventory page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PagedPosition {
    pub page: PageIndex,
    pub x: u8,
    pub y: u8,
    pub rot: Rotation,
}

impl PagedPosition {
    pub fn new(page: PageIndex, x: u8, y: u8, rot: Rotation) -> Self {
        Self { page, x, y, rot }
    }

    /// Whether two positions anchor the same cell, ignoring rotation
    pub fn same_cell(self, other: PagedPosition) -> bool {
        self.page == other.page && self.x == other.x && self.y == other.y
    }

    /// The rotated footprint rectangle anchored at this position
    pub fn footprint(self, size: ItemSize) -> CellRect {
        let dims = size.rotated(self.rot);
        CellRect {
            x: self.x as u16,
            y: self.y as u16,
            w: dims.w as u16,
            h: dims.h as u16,
        }
    }
}

/// Axis-aligned cell rectangle on one page, in widened coordinates so
/// bounds arithmetic cannot overflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl CellRect {
    /// Whether two rectangles share at least one cell
    pub fn intersects(self, other: CellRect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_normalization() {
        assert_eq!(Rotation::new(0).steps(), 0);
        assert_eq!(Rotation::new(4).steps(), 0);
        assert_eq!(Rotation::new(5).steps(), 1);
        assert_eq!(Rotation::new(255).steps(), 3);
    }

    #[test]
    fn test_rotated_footprint() {
        let size = ItemSize::new(3, 2);
        assert_eq!(size.rotated(Rotation::new(0)), ItemSize::new(3, 2));
        assert_eq!(size.rotated(Rotation::new(1)), ItemSize::new(2, 3));
        assert_eq!(size.rotated(Rotation::new(2)), ItemSize::new(3, 2));
        assert_eq!(size.rotated(Rotation::new(3)), ItemSize::new(2, 3));
    }

    #[test]
    fn test_rect_intersection() {
        let a = CellRect { x: 0, y: 0, w: 2, h: 2 };
        let b = CellRect { x: 1, y: 1, w: 2, h: 2 };
        let c = CellRect { x: 2, y: 0, w: 1, h: 1 };
        assert!(a.intersects(b));
        assert!(b.intersects(a));
        assert!(!a.intersects(c));
        assert!(c.intersects(b));
    }

    #[test]
    fn test_same_cell_ignores_rotation() {
        let page = PageIndex(2);
        let a = PagedPosition::new(page, 1, 3, Rotation::new(0));
        let b = PagedPosition::new(page, 1, 3, Rotation::new(1));
        assert!(a.same_cell(b));
        assert_ne!(a, b);
    }
}
