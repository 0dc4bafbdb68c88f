//! The item-owning side of a recycling virtual list.
//!
//! `recycle-list` computes windows and reconciles nodes; this crate binds it to a scrollable
//! container:
//!
//! - [`ScrollContainer`]: what a host must provide (viewport, scroll offset, frames)
//! - [`ScrollCoordinator`]: scroll coalescing and the scrolling/idle state
//! - [`Controller`]: owns the items and exposes the list operations (set/append/prepend,
//!   update/remove, programmatic scrolling, stats, destroy)
//!
//! No UI toolkit is assumed. Tests and demos drive the controller with in-memory containers.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod host;
mod options;
mod scroll;
mod state;

#[cfg(test)]
mod tests;

pub use controller::Controller;
pub use host::{ScrollBehavior, ScrollContainer};
pub use options::{
    DescribeItemFn, EstimateHeightFn, ItemKeyFn, ItemRenderer, ListOptions, RenderItemFn,
};
pub use scroll::{Recompute, ScrollCoordinator, ScrollPhase};
pub use state::{Stats, VisibleRange};

pub use recycle_list::{ItemKey, ListConfig, RenderedNode, SizeMode, Surface, Window};

#[doc(hidden)]
pub use recycle_list::ListKey;
