//! A headless paging container engine.
//!
//! For adapter-level utilities (fade animators, scroll tweens, an in-memory
//! host), see the `pagerview-adapter` crate.
//!
//! This crate focuses on the core logic of a paged carousel over a large
//! (possibly unbounded) item count: deciding which logical indices need a
//! live view for the current scroll position, recycling off-screen views
//! through a tag-keyed pool, and applying coalesced insert/remove/reload
//! batches while keeping indices, view assignments, and the scroll offset
//! consistent.
//!
//! It is UI-agnostic. A GUI/TUI layer is expected to provide:
//! - widget bounds and scroll offsets
//! - a view factory with attach/detach/frame/alpha primitives
//! - a pull-based data source (`count`, `view_for`)
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod batch;
mod host;
mod options;
mod pager;
mod pool;
mod registry;
mod types;
pub mod window;

#[cfg(test)]
mod tests;

pub use batch::{BatchState, PendingBatch, Transition};
pub use host::{DequeueScope, PagerDataSource, PagerHost, ScrollHost, ViewHost};
pub use options::{CompletionCallback, PagerOptions, SelectionCallback};
pub use pager::PagerView;
pub use pool::ReusePool;
pub use registry::{ManagedCell, ViewRegistry};
pub use types::{
    Axis, CacheTag, Insets, PageCell, Placement, Point, Rect, Size, ViewId, VisibleBounds,
};
