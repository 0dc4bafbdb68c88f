//! A headless engine for recycling virtual lists.
//!
//! Long item sequences (feeds, logs, channel lists) are shown through a fixed-size viewport
//! without creating a display node per item. This crate holds the UI-agnostic parts:
//!
//! - [`SizeModel`]: row heights, offsets and total height, fixed or dynamic (Fenwick prefix
//!   sums for `O(log n)` offset queries)
//! - [`compute_range`]: scroll offset + viewport + overscan → inclusive [`Window`]
//! - [`RenderCache`] and [`NodePool`]: key → attached node map, reconciled against a window,
//!   recycling detached nodes through a bounded pool
//! - [`Surface`]: the trait a UI layer implements to create, attach and place nodes
//!
//! Scroll coordination and the item-owning controller live in the `recycle-list-adapter` crate.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod cache;
mod config;
mod fenwick;
mod key;
mod pool;
mod range;
mod size;
mod surface;
mod types;


pub use cache::{ReconcileReport, RenderCache, RenderedNode};
pub use config::{
    DEFAULT_IS_SCROLLING_RESET_DELAY_MS, DEFAULT_ITEM_HEIGHT, DEFAULT_OVERSCAN,
    DEFAULT_POOL_CAPACITY, ListConfig, SizeMode,
};
pub use pool::NodePool;
pub use range::compute_range;
pub use size::SizeModel;
pub use surface::Surface;
pub use types::{ItemKey, Window};

#[doc(hidden)]
pub use key::ListKey;
