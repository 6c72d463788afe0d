//! Adapter utilities for the `pagerview` crate.
//!
//! The `pagerview` crate is UI-agnostic and focuses on the core logic. This
//! crate provides small, framework-neutral helpers commonly needed by
//! adapters:
//!
//! - Running the fade transition a batch flush hands back ([`BatchAnimator`])
//! - Tween-based smooth scrolling between pages ([`ScrollDriver`])
//! - A fully in-memory host for headless embeddings and tests ([`MemoryHost`])
//!
//! This crate is intentionally framework-agnostic (no GUI/TUI bindings).
#![forbid(unsafe_code)]

mod animator;
mod cell;
mod driver;
mod host;
mod tween;


pub use animator::BatchAnimator;
pub use cell::ContentCell;
pub use driver::ScrollDriver;
pub use host::{MemoryHost, ViewRecord};
pub use tween::{Easing, Tween};
