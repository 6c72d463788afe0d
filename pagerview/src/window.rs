use core::ops::RangeInclusive;

use crate::VisibleBounds;

/// Index-window math.
///
/// These are pure functions: the pager re-derives the window from current
/// geometry and focus on every event instead of caching it.

/// How many pages can be at least partially visible on one side of the focus.
///
/// A viewport that fits `k` whole pages is treated as `k + 2` candidates
/// (one partial page peeking in on each edge), split evenly across both
/// sides, never less than one.
pub fn margin(viewport_main: f64, page_main: f64) -> usize {
    debug_assert!(page_main > 0.0, "margin requires a non-zero page size");
    let candidates = (viewport_main / page_main).floor() as usize + 2;
    ((candidates - 1) / 2).max(1)
}

/// Symmetric visible bounds for the given geometry.
pub fn visible_bounds(viewport_main: f64, page_main: f64) -> VisibleBounds {
    let m = margin(viewport_main, page_main);
    VisibleBounds {
        before: m,
        after: m,
    }
}

/// The closed range of indices that need a live view around `focus`.
///
/// Returns `None` when the collection is empty or `focus` is out of bounds.
/// The result always contains `focus` and is a subset of `0..count`.
pub fn range_around(
    count: usize,
    focus: usize,
    before: usize,
    after: usize,
) -> Option<RangeInclusive<usize>> {
    if count == 0 || focus >= count {
        return None;
    }
    let lo = focus - focus.min(before);
    let hi = focus + (count - 1 - focus).min(after);
    Some(lo..=hi)
}
