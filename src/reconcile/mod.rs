//! Layout reconciliation: restoring drifted kit items to their canonical
//! slots.

mod located;
mod placement;
mod reconciler;

pub use reconciler::{reconcile, ReconcileReport};
