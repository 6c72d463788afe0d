use crate::batch::{BatchState, PendingBatch, Transition};
use crate::host::{DequeueScope, PagerDataSource, PagerHost};
use crate::options::{CompletionCallback, PagerOptions};
use crate::pool::ReusePool;
use crate::registry::{ManagedCell, ViewRegistry};
use crate::window;
use crate::{Placement, Rect, ViewId, VisibleBounds};

/// Offsets at or below this snap to the first page.
const SNAP_EPSILON: f64 = 1.0;

/// A paging container engine.
///
/// This type is headless: it owns no UI objects, only `ViewId` handles minted
/// by the host. The embedding drives it with discrete events (scroll offsets,
/// geometry updates, structural mutations) and realizes its commands through
/// the [`crate::PagerHost`] traits. Data is pulled synchronously from a
/// [`crate::PagerDataSource`].
///
/// All coordinates are in content space: page `i` spans
/// `[i × page_size, (i + 1) × page_size)` along the configured axis.
pub struct PagerView {
    options: PagerOptions,
    bounds: Rect,
    scroll_offset: f64,
    count: usize,
    selected: usize,
    registry: ViewRegistry,
    pool: ReusePool,
    reuse_enabled: bool,
    pending: PendingBatch,
    batch_state: BatchState,
    finishing: Option<Transition>,
    completions: Vec<CompletionCallback>,
}

impl PagerView {
    pub fn new(mut options: PagerOptions) -> Self {
        options.middle_item_scale_factor = options.middle_item_scale_factor.clamp(0.01, 1.0);
        let bounds = options.initial_bounds.unwrap_or_default();
        let reuse_enabled = options.reuse_cache_enabled;
        pdebug!(
            axis = ?options.axis,
            scale = options.middle_item_scale_factor,
            "PagerView::new"
        );
        Self {
            options,
            bounds,
            scroll_offset: 0.0,
            count: 0,
            selected: 0,
            registry: ViewRegistry::new(),
            pool: ReusePool::new(),
            reuse_enabled,
            pending: PendingBatch::default(),
            batch_state: BatchState::Idle,
            finishing: None,
            completions: Vec::new(),
        }
    }

    pub fn options(&self) -> &PagerOptions {
        &self.options
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn is_performing_batch_updates(&self) -> bool {
        self.batch_state != BatchState::Idle
    }

    pub fn registry(&self) -> &ViewRegistry {
        &self.registry
    }

    pub fn pool(&self) -> &ReusePool {
        &self.pool
    }

    /// One page's extent along the paging axis. Zero until bounds are known.
    pub fn page_size(&self) -> f64 {
        self.options.axis.main_of_size(self.bounds.size) * self.options.middle_item_scale_factor
    }

    /// The slot occupied by page `index`, in content coordinates.
    pub fn page_frame(&self, index: usize) -> Rect {
        let axis = self.options.axis;
        let page = self.page_size();
        let mut frame = Rect {
            origin: Default::default(),
            size: self.bounds.size,
        };
        axis.set_main_of_size(&mut frame.size, page);
        axis.set_main_of_point(&mut frame.origin, page * index as f64);
        frame
    }

    /// `page_frame` shrunk by the configured page insets.
    pub fn item_frame(&self, index: usize) -> Rect {
        self.page_frame(index).inset(self.options.page_insets)
    }

    /// Maximum number of pages that can be visible on each side of the focus
    /// for the current geometry.
    pub fn visible_index_bounds(&self) -> VisibleBounds {
        let page = self.page_size();
        if page <= 0.0 {
            return VisibleBounds {
                before: 1,
                after: 1,
            };
        }
        window::visible_bounds(self.options.axis.main_of_size(self.bounds.size), page)
    }

    // ---- geometry & configuration events ------------------------------------

    /// Updates the widget bounds. Re-lays the visible window out when the
    /// geometry actually changed.
    pub fn set_bounds(&mut self, ds: &mut dyn PagerDataSource, host: &mut dyn PagerHost, bounds: Rect) {
        if self.bounds == bounds {
            return;
        }
        self.bounds = bounds;
        let page = self.page_size();
        if page > 0.0 {
            host.set_content_size(self.count as f64 * page);
            self.position_views(ds, host, self.selected, None);
        }
    }

    pub fn set_page_insets(
        &mut self,
        ds: &mut dyn PagerDataSource,
        host: &mut dyn PagerHost,
        insets: crate::Insets,
    ) {
        if self.options.page_insets == insets {
            return;
        }
        self.options.page_insets = insets;
        if self.page_size() > 0.0 {
            self.position_views(ds, host, self.selected, None);
        }
    }

    /// Sets the fraction of the viewport one page occupies, clamped to
    /// `[0.01, 1.0]`.
    pub fn set_middle_item_scale_factor(
        &mut self,
        ds: &mut dyn PagerDataSource,
        host: &mut dyn PagerHost,
        scale_factor: f64,
    ) {
        let normalized = scale_factor.clamp(0.01, 1.0);
        if normalized == self.options.middle_item_scale_factor {
            return;
        }
        self.options.middle_item_scale_factor = normalized;
        let page = self.page_size();
        if page > 0.0 {
            host.set_content_size(self.count as f64 * page);
            self.position_views(ds, host, self.selected, None);
        }
    }

    pub fn set_reuse_cache_enabled(&mut self, enabled: bool) {
        self.options.reuse_cache_enabled = enabled;
        if self.batch_state == BatchState::Idle {
            self.reuse_enabled = enabled;
        }
    }

    // ---- reload & selection --------------------------------------------------

    /// Rebuilds from the data source: empties the reuse pool, re-queries the
    /// item count, resizes the content, reconciles the window, and snaps the
    /// scroll position to the (clamped) selected index.
    pub fn reload_data(
        &mut self,
        ds: &mut dyn PagerDataSource,
        host: &mut dyn PagerHost,
        selected_index: Option<usize>,
    ) {
        for cell in self.pool.drain() {
            host.destroy_view(cell.id);
        }

        self.count = ds.count();
        pdebug!(count = self.count, "reload_data");
        let page = self.page_size();
        if page > 0.0 {
            host.set_content_size(self.count as f64 * page);
        }

        if self.count == 0 {
            let cap = self.visible_index_bounds().max_visible();
            for managed in self.registry.drain_all() {
                self.retire_cell(host, managed.cell, cap);
            }
            return;
        }

        let focus = selected_index
            .unwrap_or(self.selected)
            .min(self.count - 1);
        self.position_views(ds, host, focus, None);
        self.set_selected(host, focus, false);
    }

    /// Issues a scroll command to the focus page's origin. The focus index
    /// itself updates when the host reports the resulting offset back via
    /// [`Self::on_scroll`].
    pub fn set_selected(&mut self, host: &mut dyn PagerHost, index: usize, animated: bool) {
        if self.page_size() <= 0.0 {
            return;
        }
        let origin = self
            .options
            .axis
            .main_of_point(self.page_frame(index).origin);
        host.set_scroll_offset(origin, animated);
    }

    /// Translates a continuous scroll offset into a focus index and
    /// reconciles the visible window when the focus moved.
    pub fn on_scroll(&mut self, ds: &mut dyn PagerDataSource, host: &mut dyn PagerHost, offset: f64) {
        self.scroll_offset = offset;
        let page = self.page_size();
        if page <= 0.0 {
            return;
        }

        let candidate = if offset <= SNAP_EPSILON {
            0
        } else {
            (offset / page).round() as usize
        };
        let candidate = match self.count {
            0 => 0,
            n => candidate.min(n - 1),
        };

        if candidate == self.selected {
            return;
        }
        ptrace!(offset, candidate, "focus change");
        self.position_views(ds, host, candidate, None);
        self.update_selected(host, candidate);
    }

    /// Sets the focus index and fires the selection notification and the
    /// host's feedback cue, once per distinct value.
    fn update_selected(&mut self, host: &mut dyn PagerHost, index: usize) {
        if index == self.selected {
            return;
        }
        self.selected = index;
        if index >= self.count {
            return;
        }
        let Some(managed) = self.registry.lookup(index) else {
            panic!("pagerview: selected view has no content at index {index}");
        };
        if let Some(on_select) = &self.options.on_select {
            on_select(managed.cell.id, index);
        }
        host.selection_feedback();
    }

    // ---- windowing -----------------------------------------------------------

    /// Reconciles the managed views against the visible window around
    /// `focus`: out-of-window views retire to the pool, missing in-window
    /// views are dequeued. With `placement == None`, surviving views are also
    /// snapped to their exact item frames.
    fn position_views(
        &mut self,
        ds: &mut dyn PagerDataSource,
        host: &mut dyn PagerHost,
        focus: usize,
        placement: Option<Placement>,
    ) {
        if self.page_size() <= 0.0 {
            return;
        }
        let bounds = self.visible_index_bounds();
        let Some(range) = window::range_around(self.count, focus, bounds.before, bounds.after)
        else {
            return;
        };

        let cap = bounds.max_visible();
        for managed in self.registry.drain_outside(&range) {
            self.retire_cell(host, managed.cell, cap);
        }

        for index in range {
            if self.registry.contains(index) {
                if placement.is_none() {
                    let desired = self.item_frame(index);
                    if let Some(managed) = self.registry.lookup_mut(index) {
                        if managed.frame != desired {
                            managed.frame = desired;
                            host.set_view_frame(managed.cell.id, desired);
                        }
                    }
                }
            } else {
                self.dequeue_and_position(ds, host, index, placement);
            }
        }
    }

    /// Pulls a view for `index` from the data source and binds it into the
    /// registry at the requested placement. Returns `None` when the data
    /// source has no view for the index.
    fn dequeue_and_position(
        &mut self,
        ds: &mut dyn PagerDataSource,
        host: &mut dyn PagerHost,
        index: usize,
        placement: Option<Placement>,
    ) -> Option<ViewId> {
        let mut frame = self.item_frame(index);
        let cell = {
            let mut scope = DequeueScope {
                pool: &mut self.pool,
                host,
                frame,
                index,
                reuse_enabled: self.reuse_enabled,
            };
            ds.view_for(&mut scope, index)
        };
        let Some(cell) = cell else {
            pwarn!(index, "data source returned no view");
            return None;
        };

        let axis = self.options.axis;
        match placement {
            None => {}
            Some(Placement::Middle) => {
                let focus_origin = axis.main_of_point(self.item_frame(self.selected).origin);
                axis.set_main_of_point(&mut frame.origin, focus_origin);
            }
            Some(Placement::OutOfBounds) => {
                let viewport = axis.main_of_size(self.bounds.size);
                let origin = axis.main_of_point(frame.origin);
                let pushed = if index >= self.selected {
                    origin + viewport
                } else {
                    origin - viewport
                };
                axis.set_main_of_point(&mut frame.origin, pushed);
            }
        }

        let id = cell.id;
        host.attach_view(id);
        host.set_view_frame(id, frame);
        self.registry.push(ManagedCell { cell, index, frame });
        Some(id)
    }

    /// Detaches a view and either pools it for reuse or destroys it.
    fn retire_cell(&mut self, host: &mut dyn PagerHost, cell: crate::PageCell, cap: usize) {
        host.detach_view(cell.id);
        if !self.reuse_enabled {
            host.destroy_view(cell.id);
            return;
        }
        if let Some(rejected) = self.pool.retire(cell, cap) {
            host.destroy_view(rejected.id);
        }
    }

    // ---- structural mutations ------------------------------------------------

    /// Schedules an insertion before `index` and flushes unless a batch is
    /// already accumulating.
    pub fn insert_item(
        &mut self,
        ds: &mut dyn PagerDataSource,
        host: &mut dyn PagerHost,
        index: usize,
        animated: bool,
    ) -> Option<Transition> {
        self.pending.set_animated(animated);
        self.pending.insert(index);
        self.flush_if_idle(ds, host)
    }

    /// Schedules a removal of `index` and flushes unless a batch is already
    /// accumulating.
    pub fn delete_item(
        &mut self,
        ds: &mut dyn PagerDataSource,
        host: &mut dyn PagerHost,
        index: usize,
        animated: bool,
    ) -> Option<Transition> {
        self.pending.set_animated(animated);
        self.pending.remove(index);
        self.flush_if_idle(ds, host)
    }

    /// Schedules a reload of `index` (fade the current view out, a freshly
    /// dequeued one in) and flushes unless a batch is already accumulating.
    pub fn reload_item(
        &mut self,
        ds: &mut dyn PagerDataSource,
        host: &mut dyn PagerHost,
        index: usize,
        animated: bool,
    ) -> Option<Transition> {
        self.pending.set_animated(animated);
        self.pending.reload(index);
        self.flush_if_idle(ds, host)
    }

    fn flush_if_idle(
        &mut self,
        ds: &mut dyn PagerDataSource,
        host: &mut dyn PagerHost,
    ) -> Option<Transition> {
        if self.batch_state != BatchState::Idle {
            return None;
        }
        self.perform_batch_updates(ds, host, |_| {}, None)
    }

    /// Accumulates the mutations recorded by `updates` into one batch and
    /// flushes them as a single coalesced change.
    ///
    /// Re-entrant calls while a batch is accumulating (or while a previous
    /// flush's transition is still settling) merge into the pending batch and
    /// return `None`; the single flush fires every queued completion.
    ///
    /// Returns the visual transition when the batch is animated and produced
    /// any fades; the caller must then drive it and call
    /// [`Self::finish_batch_updates`]. An unanimated or empty flush completes
    /// synchronously and returns `None`.
    pub fn perform_batch_updates(
        &mut self,
        ds: &mut dyn PagerDataSource,
        host: &mut dyn PagerHost,
        updates: impl FnOnce(&mut PendingBatch),
        completion: Option<CompletionCallback>,
    ) -> Option<Transition> {
        if let Some(completion) = completion {
            self.completions.push(completion);
        }
        if self.batch_state != BatchState::Idle {
            updates(&mut self.pending);
            return None;
        }

        self.batch_state = BatchState::Accumulating;
        self.reuse_enabled = false;
        updates(&mut self.pending);
        self.flush(ds, host)
    }

    fn flush(&mut self, ds: &mut dyn PagerDataSource, host: &mut dyn PagerHost) -> Option<Transition> {
        self.batch_state = BatchState::Flushing;
        let page = self.page_size();

        if self.pending.is_empty() || page <= 0.0 {
            self.pending.clear();
            self.finishing = Some(Transition::default());
            self.finish_batch_updates(host, true);
            return None;
        }

        let pending = core::mem::take(&mut self.pending);
        let animated = pending.is_animated();
        let old_count = self.count;
        assert!(
            pending.removed().len() <= self.count,
            "batch removes {} items but only {} exist",
            pending.removed().len(),
            self.count
        );
        pdebug!(
            inserted = pending.inserted().len(),
            removed = pending.removed().len(),
            reloaded = pending.reloaded().len(),
            animated,
            "batch flush"
        );

        let mut fade_in: Vec<(ViewId, usize)> = Vec::new();
        let mut fade_out: Vec<(ViewId, usize)> = Vec::new();

        // Removals first: closed-form renumbering of the survivors.
        for managed in self.registry.renumber_for_removals(pending.removed()) {
            fade_out.push((managed.cell.id, managed.index));
        }
        self.count -= pending.removed().len();

        // Insertions in ascending order, each shifting the state left by the
        // previous one. The focus is still the pre-batch focus here, so the
        // middle placement lands on the page the user is looking at.
        for &index in pending.inserted() {
            self.count += 1;
            self.registry.shift_from(index, 1);
            if let Some(id) = self.dequeue_and_position(ds, host, index, Some(Placement::Middle)) {
                fade_in.push((id, index));
            }
        }

        let new_selected = match self.count {
            0 => 0,
            n => self.selected.min(n - 1),
        };

        // Keep the page under the focus visually stationary despite index
        // shifts above it.
        let removed_before = pending.removed().iter().filter(|&&r| r <= new_selected).count();
        let inserted_before = pending.inserted().iter().filter(|&&i| i <= new_selected).count();
        let offset_diff = (inserted_before as f64 - removed_before as f64) * page;

        // Reloads, minus freshly inserted indices. An index with no managed
        // view simply has nothing to fade out (this also makes removal win
        // over reload: the removal above already emptied the slot).
        for &index in pending.reloaded().difference(pending.inserted()) {
            let Some(current) = self.registry.take(index) else {
                continue;
            };
            fade_out.push((current.cell.id, index));
            if let Some(id) = self.dequeue_and_position(ds, host, index, None) {
                fade_in.push((id, index));
            }
        }

        // Pre-position the post-mutation window so the transition has a
        // correct start state; entering views push in from beyond the edges.
        self.position_views(ds, host, new_selected, Some(Placement::OutOfBounds));

        // An inserted view can land outside the final window; pre-positioning
        // already evicted (and destroyed) it, so drop it from the fades.
        fade_in.retain(|&(id, _)| self.registry.iter().any(|m| m.cell.id == id));

        for &(id, index) in &fade_in {
            host.set_view_z_index(id, -(1000 + index as i32));
            host.set_view_alpha(id, 0.0);
        }
        for &(id, index) in &fade_out {
            host.set_view_z_index(id, -(1000 + index as i32));
        }

        self.update_selected(host, new_selected);

        if old_count != self.count {
            host.set_content_size(self.count as f64 * page);
        }
        if offset_diff != 0.0 {
            let max_offset = self.count.saturating_sub(1) as f64 * page;
            let corrected = (self.scroll_offset + offset_diff).clamp(0.0, max_offset);
            if corrected != self.scroll_offset {
                self.scroll_offset = corrected;
                host.set_scroll_offset(corrected, false);
            }
        }

        // Final reconcile at the new focus: everything still managed snaps to
        // its exact post-mutation frame.
        self.position_views(ds, host, self.selected, None);

        let transition = Transition {
            fade_in: fade_in.iter().map(|&(id, _)| id).collect(),
            fade_out: fade_out.iter().map(|&(id, _)| id).collect(),
            duration_ms: self.options.transition_duration_ms,
        };
        self.finishing = Some(transition.clone());

        if animated && !transition.is_empty() {
            Some(transition)
        } else {
            for id in &transition.fade_in {
                host.set_view_alpha(*id, 1.0);
            }
            for id in &transition.fade_out {
                host.set_view_alpha(*id, 0.0);
            }
            self.finish_batch_updates(host, true);
            None
        }
    }

    /// Settles the current flush: detaches and destroys the faded-out views,
    /// restores z order and the reuse cache, and fires every queued
    /// completion callback with `success`. Idempotent: only the first call
    /// after a flush has any effect.
    pub fn finish_batch_updates(&mut self, host: &mut dyn PagerHost, success: bool) {
        let Some(transition) = self.finishing.take() else {
            return;
        };
        for id in transition.fade_out {
            host.detach_view(id);
            host.destroy_view(id);
        }
        for id in transition.fade_in {
            host.set_view_z_index(id, 0);
        }
        self.batch_state = BatchState::Idle;
        self.reuse_enabled = self.options.reuse_cache_enabled;
        for completion in self.completions.drain(..) {
            completion(success);
        }
    }
}

impl core::fmt::Debug for PagerView {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PagerView")
            .field("options", &self.options)
            .field("bounds", &self.bounds)
            .field("scroll_offset", &self.scroll_offset)
            .field("count", &self.count)
            .field("selected", &self.selected)
            .field("managed", &self.registry.len())
            .field("pooled", &self.pool.len())
            .field("batch_state", &self.batch_state)
            .finish_non_exhaustive()
    }
}
