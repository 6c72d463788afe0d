use crate::pool::ReusePool;
use crate::{PageCell, Rect, ViewId};

/// View factory and placement capability supplied by the embedding UI layer.
///
/// The engine holds no ownership over the host: references are passed into
/// each operation and dropped when it returns.
pub trait ViewHost {
    /// Constructs a new view classified by `tag`, initially at `frame`.
    fn create_view(&mut self, tag: &str, frame: Rect) -> ViewId;
    /// Permanently destroys a view (evicted from an over-full pool bucket,
    /// or faded out by a batch).
    fn destroy_view(&mut self, id: ViewId);
    /// Adds the view to the scrollable content.
    fn attach_view(&mut self, id: ViewId);
    /// Removes the view from the scrollable content without destroying it.
    fn detach_view(&mut self, id: ViewId);
    fn set_view_frame(&mut self, id: ViewId, frame: Rect);
    fn set_view_alpha(&mut self, id: ViewId, alpha: f64);
    fn set_view_z_index(&mut self, id: ViewId, z: i32);
}

/// Scroll container commands and notifications.
pub trait ScrollHost {
    /// Sets the content extent along the paging axis.
    fn set_content_size(&mut self, main: f64);
    /// Sets the scroll offset along the paging axis. `animated` requests the
    /// host's own scroll animation; the engine's logical state is updated
    /// when the host reports the resulting offsets back via
    /// [`crate::PagerView::on_scroll`].
    fn set_scroll_offset(&mut self, offset: f64, animated: bool);
    /// Fired once per distinct focus change, e.g. for haptic feedback.
    fn selection_feedback(&mut self) {}
}

/// Everything the pager needs from its embedding, in one object.
pub trait PagerHost: ViewHost + ScrollHost {}

impl<T: ViewHost + ScrollHost + ?Sized> PagerHost for T {}

/// Pull-based data source, queried synchronously.
pub trait PagerDataSource {
    fn count(&mut self) -> usize;
    /// Produces the view for `index`, normally by calling
    /// [`DequeueScope::dequeue_reusable`]. `None` means the index has no
    /// page; the slot is simply left empty.
    fn view_for(&mut self, scope: &mut DequeueScope<'_>, index: usize) -> Option<PageCell>;
}

/// Handed to [`PagerDataSource::view_for`] so the data source can obtain a
/// recycled or freshly created view for the requested index.
pub struct DequeueScope<'a> {
    pub(crate) pool: &'a mut ReusePool,
    pub(crate) host: &'a mut dyn PagerHost,
    pub(crate) frame: Rect,
    pub(crate) index: usize,
    pub(crate) reuse_enabled: bool,
}

impl DequeueScope<'_> {
    /// The index the produced view will be bound to.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The frame the produced view will initially occupy.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Pops the most recently retired view with a matching tag, or creates a
    /// new one through the host's factory. Recycled views are repositioned
    /// to this scope's frame.
    pub fn dequeue_reusable(&mut self, tag: &str) -> PageCell {
        if self.reuse_enabled {
            if let Some(cell) = self.pool.dequeue(tag) {
                self.host.set_view_frame(cell.id, self.frame);
                return cell;
            }
        }
        let id = self.host.create_view(tag, self.frame);
        PageCell {
            id,
            tag: tag.to_owned(),
        }
    }
}
