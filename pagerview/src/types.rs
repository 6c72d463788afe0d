/// The axis a pager scrolls along.
///
/// The accessor methods below play the role of axis key paths: every geometry
/// computation in this crate reads and writes `Point`/`Size` components
/// through them instead of matching on the axis at each call site.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn main_of_point(self, p: Point) -> f64 {
        match self {
            Self::Horizontal => p.x,
            Self::Vertical => p.y,
        }
    }

    pub fn set_main_of_point(self, p: &mut Point, value: f64) {
        match self {
            Self::Horizontal => p.x = value,
            Self::Vertical => p.y = value,
        }
    }

    pub fn main_of_size(self, s: Size) -> f64 {
        match self {
            Self::Horizontal => s.width,
            Self::Vertical => s.height,
        }
    }

    pub fn set_main_of_size(self, s: &mut Size, value: f64) {
        match self {
            Self::Horizontal => s.width = value,
            Self::Vertical => s.height = value,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Shrinks the rect by `insets` on each edge. Negative insets grow it.
    pub fn inset(self, insets: Insets) -> Self {
        Self::new(
            self.origin.x + insets.left,
            self.origin.y + insets.top,
            self.size.width - insets.left - insets.right,
            self.size.height - insets.top - insets.bottom,
        )
    }
}

/// Edge insets, in the same units as `Rect`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Insets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Insets {
    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }
}

/// An opaque handle to a host-owned view instance.
///
/// The engine never touches concrete UI objects; every view it manages is
/// identified by the id the host's factory returned from
/// [`crate::ViewHost::create_view`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewId(pub u64);

/// Classifies a view for recycling. Views only ever replace views that were
/// created with the same tag.
pub type CacheTag = String;

/// A live view instance together with its reuse tag.
///
/// The tag is assigned when the view is created and never changes afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageCell {
    pub id: ViewId,
    pub tag: CacheTag,
}

/// How a freshly dequeued view is initially positioned before a transition
/// moves it to its final page frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Placement {
    /// Start at the focus page's origin, so an inserted view does not flash
    /// at its final slot before the animation runs.
    Middle,
    /// Start one viewport beyond the trailing edge (index at or after the
    /// focus) or the leading edge (index before the focus).
    OutOfBounds,
}

/// Maximum number of simultaneously visible pages on each side of the focus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleBounds {
    pub before: usize,
    pub after: usize,
}

impl VisibleBounds {
    /// The pool bucket cap: focus page plus both margins.
    pub fn max_visible(self) -> usize {
        1 + self.before + self.after
    }
}
