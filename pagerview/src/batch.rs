use std::collections::BTreeSet;

use crate::ViewId;

/// Where the pager is in the batch-mutation cycle.
///
/// `Idle → Accumulating → Flushing → Idle`. Re-entrant accumulation while
/// already `Accumulating` merges into the same pending batch; the flush runs
/// once, when the outermost accumulation scope closes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BatchState {
    #[default]
    Idle,
    Accumulating,
    Flushing,
}

/// Structural mutations accumulated between batch open and flush.
///
/// All indices are expressed in pre-mutation coordinates; the flush renumbers
/// them as it goes.
#[derive(Clone, Debug, Default)]
pub struct PendingBatch {
    inserted: BTreeSet<usize>,
    removed: BTreeSet<usize>,
    reloaded: BTreeSet<usize>,
    animated: bool,
}

impl PendingBatch {
    pub fn insert(&mut self, index: usize) {
        self.inserted.insert(index);
    }

    pub fn remove(&mut self, index: usize) {
        self.removed.insert(index);
    }

    pub fn reload(&mut self, index: usize) {
        self.reloaded.insert(index);
    }

    /// Animation is sticky: one animated call makes the whole flush animated.
    pub fn set_animated(&mut self, animated: bool) {
        self.animated = self.animated || animated;
    }

    pub fn is_animated(&self) -> bool {
        self.animated
    }

    pub fn is_empty(&self) -> bool {
        self.inserted.is_empty() && self.removed.is_empty() && self.reloaded.is_empty()
    }

    pub fn clear(&mut self) {
        self.inserted.clear();
        self.removed.clear();
        self.reloaded.clear();
        self.animated = false;
    }

    pub(crate) fn inserted(&self) -> &BTreeSet<usize> {
        &self.inserted
    }

    pub(crate) fn removed(&self) -> &BTreeSet<usize> {
        &self.removed
    }

    pub(crate) fn reloaded(&self) -> &BTreeSet<usize> {
        &self.reloaded
    }
}

/// The visual half of a flush.
///
/// The logical mutation (indices, registry, pool, content size, offset) is
/// already complete when a `Transition` is handed out; what remains is purely
/// visual: fade the listed views in/out over `duration_ms`, then call
/// [`crate::PagerView::finish_batch_updates`] exactly once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transition {
    pub fade_in: Vec<ViewId>,
    pub fade_out: Vec<ViewId>,
    pub duration_ms: u64,
}

impl Transition {
    pub fn is_empty(&self) -> bool {
        self.fade_in.is_empty() && self.fade_out.is_empty()
    }
}
