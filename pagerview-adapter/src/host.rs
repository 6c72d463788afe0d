use std::collections::HashMap;

use pagerview::{Rect, ScrollHost, ViewHost, ViewId};

/// What a [`MemoryHost`] knows about one live view.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewRecord {
    pub tag: String,
    pub frame: Rect,
    pub alpha: f64,
    pub z_index: i32,
    pub attached: bool,
}

/// An in-memory [`ViewHost`] + [`ScrollHost`].
///
/// Useful for headless embeddings and for testing adapter code without a UI
/// toolkit: every view the pager creates becomes a [`ViewRecord`] that can be
/// inspected afterwards, and scroll commands are kept as plain numbers.
#[derive(Clone, Debug, Default)]
pub struct MemoryHost {
    views: HashMap<ViewId, ViewRecord>,
    next_id: u64,
    created: usize,
    destroyed: usize,
    content_size: f64,
    scroll_offset: f64,
    feedback_count: usize,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self, id: ViewId) -> Option<&ViewRecord> {
        self.views.get(&id)
    }

    pub fn views(&self) -> impl Iterator<Item = (ViewId, &ViewRecord)> {
        self.views.iter().map(|(&id, record)| (id, record))
    }

    /// Live views, attached or not.
    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Total views created over the host's lifetime.
    pub fn created(&self) -> usize {
        self.created
    }

    /// Total views destroyed over the host's lifetime.
    pub fn destroyed(&self) -> usize {
        self.destroyed
    }

    pub fn content_size(&self) -> f64 {
        self.content_size
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// How many times the pager asked for selection feedback.
    pub fn feedback_count(&self) -> usize {
        self.feedback_count
    }
}

impl ViewHost for MemoryHost {
    fn create_view(&mut self, tag: &str, frame: Rect) -> ViewId {
        self.next_id += 1;
        self.created += 1;
        let id = ViewId(self.next_id);
        self.views.insert(
            id,
            ViewRecord {
                tag: tag.to_owned(),
                frame,
                alpha: 1.0,
                z_index: 0,
                attached: false,
            },
        );
        id
    }

    fn destroy_view(&mut self, id: ViewId) {
        if self.views.remove(&id).is_some() {
            self.destroyed += 1;
        }
    }

    fn attach_view(&mut self, id: ViewId) {
        if let Some(record) = self.views.get_mut(&id) {
            record.attached = true;
        }
    }

    fn detach_view(&mut self, id: ViewId) {
        if let Some(record) = self.views.get_mut(&id) {
            record.attached = false;
        }
    }

    fn set_view_frame(&mut self, id: ViewId, frame: Rect) {
        if let Some(record) = self.views.get_mut(&id) {
            record.frame = frame;
        }
    }

    fn set_view_alpha(&mut self, id: ViewId, alpha: f64) {
        if let Some(record) = self.views.get_mut(&id) {
            record.alpha = alpha;
        }
    }

    fn set_view_z_index(&mut self, id: ViewId, z_index: i32) {
        if let Some(record) = self.views.get_mut(&id) {
            record.z_index = z_index;
        }
    }
}

impl ScrollHost for MemoryHost {
    fn set_content_size(&mut self, main: f64) {
        self.content_size = main;
    }

    fn set_scroll_offset(&mut self, offset: f64, _animated: bool) {
        self.scroll_offset = offset;
    }

    fn selection_feedback(&mut self) {
        self.feedback_count += 1;
    }
}
