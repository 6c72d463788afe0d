use core::ops::RangeInclusive;
use std::collections::BTreeSet;

use crate::{PageCell, Rect};

/// A live view bound to its current logical index.
#[derive(Clone, Debug)]
pub struct ManagedCell {
    pub cell: PageCell,
    pub index: usize,
    pub frame: Rect,
}

/// The set of currently managed (index → view) associations.
///
/// Invariant: at most one cell per index. Indices are renumbered in place on
/// insert/remove; the registry itself never talks to the host or the pool.
#[derive(Clone, Debug, Default)]
pub struct ViewRegistry {
    cells: Vec<ManagedCell>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ManagedCell> {
        self.cells.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ManagedCell> {
        self.cells.iter_mut()
    }

    pub fn lookup(&self, index: usize) -> Option<&ManagedCell> {
        self.cells.iter().find(|c| c.index == index)
    }

    pub fn lookup_mut(&mut self, index: usize) -> Option<&mut ManagedCell> {
        self.cells.iter_mut().find(|c| c.index == index)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.lookup(index).is_some()
    }

    pub fn push(&mut self, cell: ManagedCell) {
        debug_assert!(
            !self.contains(cell.index),
            "registry already manages a view for index {}",
            cell.index
        );
        self.cells.push(cell);
    }

    /// Removes and returns the cell bound to `index`, if any.
    pub fn take(&mut self, index: usize) -> Option<ManagedCell> {
        let pos = self.cells.iter().position(|c| c.index == index)?;
        Some(self.cells.swap_remove(pos))
    }

    /// Adds `delta` to the index of every cell at or after `from`.
    pub fn shift_from(&mut self, from: usize, delta: isize) {
        for cell in &mut self.cells {
            if cell.index >= from {
                cell.index = cell.index.saturating_add_signed(delta);
            }
        }
    }

    /// Applies a set of removals in one pass.
    ///
    /// Cells whose index is in `removed` are extracted and returned; every
    /// survivor's index drops by the number of removed indices below it
    /// (closed-form renumbering, not per-removal shifting).
    pub fn renumber_for_removals(&mut self, removed: &BTreeSet<usize>) -> Vec<ManagedCell> {
        let mut out = Vec::new();
        let mut kept = Vec::with_capacity(self.cells.len());
        for mut cell in self.cells.drain(..) {
            if removed.contains(&cell.index) {
                out.push(cell);
            } else {
                cell.index -= removed.range(..cell.index).count();
                kept.push(cell);
            }
        }
        self.cells = kept;
        out
    }

    /// Extracts every cell whose index falls outside `range`.
    pub fn drain_outside(&mut self, range: &RangeInclusive<usize>) -> Vec<ManagedCell> {
        let mut out = Vec::new();
        let mut kept = Vec::with_capacity(self.cells.len());
        for cell in self.cells.drain(..) {
            if range.contains(&cell.index) {
                kept.push(cell);
            } else {
                out.push(cell);
            }
        }
        self.cells = kept;
        out
    }

    /// Extracts every cell. Used when the pager tears the window down.
    pub fn drain_all(&mut self) -> Vec<ManagedCell> {
        self.cells.drain(..).collect()
    }
}
