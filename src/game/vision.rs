//! Turn-scoped field-of-view cache.

use super::grid::{Grid, Loc, wrap_add};

/// Lazily computed visibility grid shared by every query within a turn.
///
/// The offset list depends only on the grid dimensions and view radius, both
/// fixed for the life of a game, so it is computed once and kept. The
/// visibility grid is dropped at the start of every update and rebuilt on the
/// first query of the turn, making invalidation an observable transition.
#[derive(Debug, Default)]
pub struct VisionCache {
    /// Relative offsets within the view radius, pre-normalized to the
    /// negative residue class so wrapped addition stays correct.
    offsets: Option<Vec<(i64, i64)>>,
    /// Row-major visibility flags, absent while stale.
    visible: Option<Vec<bool>>,
}

impl VisionCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the per-turn visibility grid.
    pub fn invalidate(&mut self) {
        self.visible = None;
    }

    /// Check whether the visibility grid must be rebuilt before a query.
    #[must_use]
    pub const fn is_stale(&self) -> bool {
        self.visible.is_none()
    }

    /// Rebuild the visibility grid from the current positions of our units.
    ///
    /// Cost is O(units × offsets); every later query this turn is a lookup.
    pub fn rebuild(&mut self, grid: &Grid, units: &[Loc], view_radius2: u32) {
        let offsets = self
            .offsets
            .get_or_insert_with(|| compute_offsets(grid, view_radius2));

        let mut visible = vec![false; usize::from(grid.rows()) * usize::from(grid.cols())];
        for &unit in units {
            for &(d_row, d_col) in offsets.iter() {
                let target = Loc::new(
                    wrap_add(unit.row, d_row, grid.rows()),
                    wrap_add(unit.col, d_col, grid.cols()),
                );
                visible[grid.index(target)] = true;
            }
        }
        self.visible = Some(visible);
    }

    /// Look up a location in the cached grid.
    ///
    /// Returns `false` while the cache is stale; callers rebuild first.
    #[must_use]
    pub fn contains(&self, grid: &Grid, loc: Loc) -> bool {
        self.visible
            .as_ref()
            .is_some_and(|visible| visible[grid.index(loc)])
    }
}

/// Precompute every offset within the view radius.
///
/// The bounding box has half-width ⌊√r²⌋; an offset survives when its squared
/// length is at most r². Each component is stored as its negative residue
/// (`(d mod size) − size`) so that adding it to a coordinate and reducing
/// modulo the size wraps correctly on maps of any dimension.
fn compute_offsets(grid: &Grid, view_radius2: u32) -> Vec<(i64, i64)> {
    let rows = i64::from(grid.rows());
    let cols = i64::from(grid.cols());
    let bound = i64::from(view_radius2.isqrt());

    let mut offsets = Vec::new();
    for d_row in -bound..=bound {
        for d_col in -bound..=bound {
            if d_row * d_row + d_col * d_col <= i64::from(view_radius2) {
                offsets.push((d_row.rem_euclid(rows) - rows, d_col.rem_euclid(cols) - cols));
            }
        }
    }
    offsets
}
