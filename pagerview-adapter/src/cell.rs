use pagerview::{Insets, Rect};

/// Pairs an application payload with the inset its content keeps from the
/// page edges.
///
/// A page view usually hosts some content object inside it with a margin all
/// around. The pager only ever positions the outer page frame; this wrapper
/// carries the inset so the adapter can derive the inner content frame from
/// whatever outer frame the pager assigned.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentCell<T> {
    content: T,
    content_insets: Insets,
}

impl<T> ContentCell<T> {
    pub fn new(content: T) -> Self {
        Self {
            content,
            content_insets: Insets::default(),
        }
    }

    pub fn with_content_insets(mut self, insets: Insets) -> Self {
        self.content_insets = insets;
        self
    }

    pub fn content(&self) -> &T {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut T {
        &mut self.content
    }

    pub fn into_content(self) -> T {
        self.content
    }

    pub fn content_insets(&self) -> Insets {
        self.content_insets
    }

    pub fn set_content_insets(&mut self, insets: Insets) {
        self.content_insets = insets;
    }

    /// The inner frame for `outer`, the page frame assigned by the pager.
    pub fn content_frame(&self, outer: Rect) -> Rect {
        outer.inset(self.content_insets)
    }
}
