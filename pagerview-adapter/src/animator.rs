use pagerview::{PagerHost, PagerView, Transition};

use crate::{Easing, Tween};

/// Drives the visual half of a batch flush.
///
/// [`PagerView::perform_batch_updates`] returns a [`Transition`] when the
/// batch is animated: the logical mutation is already applied, and the listed
/// views still need to fade in/out before the pager is settled with
/// [`PagerView::finish_batch_updates`]. This type runs that fade from a
/// frame/timer tick and guarantees the settle happens exactly once, also when
/// the animation is cancelled or replaced mid-flight.
#[derive(Debug, Default)]
pub struct BatchAnimator {
    active: Option<Active>,
}

#[derive(Debug)]
struct Active {
    transition: Transition,
    tween: Tween,
}

impl BatchAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Starts animating `transition`, fading the entering views from alpha 0
    /// to 1 and the leaving views from 1 to 0 over `transition.duration_ms`.
    ///
    /// A transition that is still running is settled first, as interrupted.
    pub fn begin(
        &mut self,
        pager: &mut PagerView,
        host: &mut dyn PagerHost,
        transition: Transition,
        now_ms: u64,
        easing: Easing,
    ) {
        if self.active.is_some() {
            self.settle(pager, host, false);
        }
        let tween = Tween::new(0.0, 1.0, now_ms, transition.duration_ms, easing);
        self.active = Some(Active { transition, tween });
    }

    /// Advances the fade. Returns `true` while the animation is still
    /// running; the tick that completes it settles the pager with
    /// `success = true` and returns `false`.
    pub fn tick(&mut self, pager: &mut PagerView, host: &mut dyn PagerHost, now_ms: u64) -> bool {
        let Some(active) = &self.active else {
            return false;
        };
        if active.tween.is_done(now_ms) {
            self.settle(pager, host, true);
            return false;
        }
        let t = active.tween.progress(now_ms);
        for &id in &active.transition.fade_in {
            host.set_view_alpha(id, t);
        }
        for &id in &active.transition.fade_out {
            host.set_view_alpha(id, 1.0 - t);
        }
        true
    }

    /// Stops a running animation and settles the pager as interrupted. The
    /// entering views snap to their final alpha; queued completion callbacks
    /// fire with `false`.
    pub fn cancel(&mut self, pager: &mut PagerView, host: &mut dyn PagerHost) {
        if self.active.is_some() {
            self.settle(pager, host, false);
        }
    }

    fn settle(&mut self, pager: &mut PagerView, host: &mut dyn PagerHost, success: bool) {
        let Some(active) = self.active.take() else {
            return;
        };
        // The mutation is already logically applied, so entering views end at
        // full alpha even when the fade is cut short. Leaving views are
        // destroyed by the settle and need no final alpha.
        for &id in &active.transition.fade_in {
            host.set_view_alpha(id, 1.0);
        }
        for &id in &active.transition.fade_out {
            host.set_view_alpha(id, 0.0);
        }
        pager.finish_batch_updates(host, success);
    }
}
