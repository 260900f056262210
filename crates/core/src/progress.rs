//! Captioned-vs-total progress derived from the catalog.

use serde::Serialize;

use crate::catalog::Catalog;

/// Snapshot of how much of the catalog is captioned.
///
/// A pure function of the catalog; recomputed after every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub captioned: usize,
    pub total: usize,
}

impl Progress {
    pub fn of(catalog: &Catalog) -> Self {
        Self {
            captioned: catalog.captioned_count(),
            total: catalog.total(),
        }
    }

    /// Completion percentage in `[0, 100]`; `0` for an empty catalog.
    pub fn percent(self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.captioned as f64 / self.total as f64 * 100.0
        }
    }
}
