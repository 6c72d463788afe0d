use std::collections::HashMap;

use crate::{CacheTag, PageCell};

/// A multimap from cache tag to a stack of retired views.
///
/// The pool is a pure container: it never talks to the host. Callers destroy
/// whatever it hands back (`retire` overflow, `drain`).
#[derive(Clone, Debug, Default)]
pub struct ReusePool {
    buckets: HashMap<CacheTag, Vec<PageCell>>,
}

impl ReusePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offers a retired view to the pool.
    ///
    /// Returns the cell back when its bucket already holds `cap` entries, in
    /// which case the caller must destroy it instead of caching it.
    pub fn retire(&mut self, cell: PageCell, cap: usize) -> Option<PageCell> {
        let bucket = self.buckets.entry(cell.tag.clone()).or_default();
        if bucket.len() >= cap {
            pdebug!(tag = %cell.tag, cap, "reuse bucket full, dropping view");
            return Some(cell);
        }
        bucket.push(cell);
        None
    }

    /// Pops the most recently retired view with a matching tag.
    pub fn dequeue(&mut self, tag: &str) -> Option<PageCell> {
        let cell = self.buckets.get_mut(tag)?.pop();
        if let Some(cell) = &cell {
            ptrace!(tag = %cell.tag, id = cell.id.0, "dequeued from reuse pool");
        }
        cell
    }

    /// Empties every bucket, yielding the retired cells for destruction.
    pub fn drain(&mut self) -> Vec<PageCell> {
        let mut out = Vec::new();
        for (_, mut bucket) in self.buckets.drain() {
            out.append(&mut bucket);
        }
        out
    }

    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn bucket_len(&self, tag: &str) -> usize {
        self.buckets.get(tag).map_or(0, Vec::len)
    }
}
