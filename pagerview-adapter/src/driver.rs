use pagerview::{PagerDataSource, PagerHost, PagerView};

use crate::{Easing, Tween};

/// A framework-neutral scroll driver for a [`PagerView`].
///
/// The pager itself never advances the scroll position; it only reacts to
/// offsets reported through [`PagerView::on_scroll`]. This type produces
/// those offsets for adapter-driven smooth scrolling: start a tween toward a
/// page, then call [`ScrollDriver::tick`] each frame and hand the returned
/// offset to the real scroll container (when there is one).
#[derive(Clone, Copy, Debug, Default)]
pub struct ScrollDriver {
    tween: Option<Tween>,
}

impl ScrollDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn cancel(&mut self) {
        self.tween = None;
    }

    /// Call this when the UI reports a scroll offset change (e.g. user drag).
    ///
    /// This cancels any active tween.
    pub fn on_scroll(
        &mut self,
        pager: &mut PagerView,
        ds: &mut dyn PagerDataSource,
        host: &mut dyn PagerHost,
        offset: f64,
    ) {
        self.cancel();
        pager.on_scroll(ds, host, offset);
    }

    /// Starts a tween toward the resting offset of `index`.
    ///
    /// Returns the clamped target offset. A tween that is already running is
    /// retargeted from its current sample, so the motion stays continuous.
    pub fn start_tween_to_index(
        &mut self,
        pager: &PagerView,
        index: usize,
        now_ms: u64,
        duration_ms: u64,
        easing: Easing,
    ) -> f64 {
        let to = index as f64 * pager.page_size();
        self.start_tween_to_offset(pager, to, now_ms, duration_ms, easing)
    }

    /// Starts a tween toward `offset`, clamped to the scrollable range.
    pub fn start_tween_to_offset(
        &mut self,
        pager: &PagerView,
        offset: f64,
        now_ms: u64,
        duration_ms: u64,
        easing: Easing,
    ) -> f64 {
        let max = pager.count().saturating_sub(1) as f64 * pager.page_size();
        let to = offset.clamp(0.0, max);
        match &mut self.tween {
            Some(tween) => tween.retarget(now_ms, to, duration_ms),
            None => {
                self.tween = Some(Tween::new(pager.scroll_offset(), to, now_ms, duration_ms, easing));
            }
        }
        to
    }

    /// Advances the driver.
    ///
    /// While a tween is active, feeds the sampled offset to the pager and
    /// returns it so the adapter can mirror it into its scroll container.
    /// Returns `None` once the tween has settled.
    pub fn tick(
        &mut self,
        pager: &mut PagerView,
        ds: &mut dyn PagerDataSource,
        host: &mut dyn PagerHost,
        now_ms: u64,
    ) -> Option<f64> {
        let tween = self.tween?;
        let offset = tween.sample(now_ms);
        pager.on_scroll(ds, host, offset);
        if tween.is_done(now_ms) {
            self.tween = None;
        }
        Some(pager.scroll_offset())
    }
}
