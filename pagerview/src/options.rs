use std::sync::Arc;

use crate::{Axis, Insets, Rect, ViewId};

/// Fired when the focus index settles on a new value.
///
/// Arguments are the focused view and its index.
pub type SelectionCallback = Arc<dyn Fn(ViewId, usize) + Send + Sync>;

/// Fired after a batch flush's visual transition finishes. The flag is
/// `true` when the transition ran to completion, `false` when it was
/// interrupted.
pub type CompletionCallback = Box<dyn FnOnce(bool)>;

pub(crate) const DEFAULT_TRANSITION_MS: u64 = 333;

/// Configuration for [`crate::PagerView`].
pub struct PagerOptions {
    /// The axis pages are laid out and swiped along.
    pub axis: Axis,
    /// Inset of every page's view from its page slot.
    pub page_insets: Insets,
    /// Fraction of the viewport one page occupies along the axis, clamped to
    /// `[0.01, 1.0]`. At `1.0` exactly one page fills the viewport.
    pub middle_item_scale_factor: f64,
    /// Duration of a batch flush's fade transition.
    pub transition_duration_ms: u64,
    /// Whether retired views are kept for reuse. Batch flushes temporarily
    /// override this to avoid reuse collisions mid-transition.
    pub reuse_cache_enabled: bool,
    /// Bounds known at construction time, if any. Geometry-dependent
    /// operations are silent no-ops until bounds are set.
    pub initial_bounds: Option<Rect>,
    /// Selection-changed notification sink.
    pub on_select: Option<SelectionCallback>,
}

impl PagerOptions {
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            page_insets: Insets::default(),
            middle_item_scale_factor: 1.0,
            transition_duration_ms: DEFAULT_TRANSITION_MS,
            reuse_cache_enabled: true,
            initial_bounds: None,
            on_select: None,
        }
    }

    pub fn with_page_insets(mut self, page_insets: Insets) -> Self {
        self.page_insets = page_insets;
        self
    }

    pub fn with_middle_item_scale_factor(mut self, scale_factor: f64) -> Self {
        self.middle_item_scale_factor = scale_factor.clamp(0.01, 1.0);
        self
    }

    pub fn with_transition_duration_ms(mut self, duration_ms: u64) -> Self {
        self.transition_duration_ms = duration_ms;
        self
    }

    pub fn with_reuse_cache_enabled(mut self, enabled: bool) -> Self {
        self.reuse_cache_enabled = enabled;
        self
    }

    pub fn with_initial_bounds(mut self, bounds: Option<Rect>) -> Self {
        self.initial_bounds = bounds;
        self
    }

    pub fn with_on_select(
        mut self,
        on_select: Option<impl Fn(ViewId, usize) + Send + Sync + 'static>,
    ) -> Self {
        self.on_select = on_select.map(|f| Arc::new(f) as _);
        self
    }
}

impl Clone for PagerOptions {
    fn clone(&self) -> Self {
        Self {
            axis: self.axis,
            page_insets: self.page_insets,
            middle_item_scale_factor: self.middle_item_scale_factor,
            transition_duration_ms: self.transition_duration_ms,
            reuse_cache_enabled: self.reuse_cache_enabled,
            initial_bounds: self.initial_bounds,
            on_select: self.on_select.clone(),
        }
    }
}

impl core::fmt::Debug for PagerOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PagerOptions")
            .field("axis", &self.axis)
            .field("page_insets", &self.page_insets)
            .field("middle_item_scale_factor", &self.middle_item_scale_factor)
            .field("transition_duration_ms", &self.transition_duration_ms)
            .field("reuse_cache_enabled", &self.reuse_cache_enabled)
            .field("initial_bounds", &self.initial_bounds)
            .finish_non_exhaustive()
    }
}
