//! Generic segment trees over pluggable aggregates.
//!
//! - [`SegmentTree`] answers range queries and supports point updates.
//! - [`LazySegmentTree`] additionally applies updates to whole ranges in
//!   `O(log n)`, deferring them until a later call descends below the
//!   nodes they were recorded at.
//!
//! Ranges are any [`RangeBounds<usize>`](std::ops::RangeBounds). Empty,
//! inverted or out-of-bounds ranges are caller bugs: the plain methods
//! panic and the `try_*` methods return a [`RangeError`].
//!
//! Neither tree is meant to be shared between threads while in use; clone
//! one instance per worker instead.

pub mod instances;
pub mod policy;

mod lazy;
mod range;
mod segment_tree;

pub use lazy::LazySegmentTree;
pub use policy::{Aggregate, LazyUpdate};
pub use range::RangeError;
pub use segment_tree::SegmentTree;
