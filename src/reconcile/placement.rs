//! Free-slot search for re-inserting displaced items.

use crate::inventory::{InventoryStore, ItemSize, PageIndex, PagedPosition, Rotation};

/// Find anywhere `size` fits: the preferred page first, then the remaining
/// pages in index order, scanning rows top-to-bottom and trying rotation 0
/// before rotation 1. Returns `None` when every page is exhausted.
pub(crate) fn find_free_position<S: InventoryStore + ?Sized>(
    store: &S,
    size: ItemSize,
    preferred: PageIndex,
) -> Option<PagedPosition> {
    let page_count = store.pages().len();
    let pages = std::iter::once(preferred.0 as usize)
        .chain((0..page_count).filter(move |&i| i != preferred.0 as usize));

    for page_index in pages {
        let Some(spec) = store.pages().get(page_index).copied() else {
            continue;
        };
        let page = PageIndex(page_index as u8);
        for y in 0..spec.height {
            for x in 0..spec.width {
                for steps in 0..2 {
                    let rot = Rotation::new(steps);
                    // Transposing a square footprint changes nothing
                    if steps == 1 && size.rotated(rot) == size {
                        continue;
                    }
                    let pos = PagedPosition::new(page, x, y, rot);
                    if store.fits(pos, size, &[]) {
                        return Some(pos);
                    }
                }
            }
        }
    }
    None
}
