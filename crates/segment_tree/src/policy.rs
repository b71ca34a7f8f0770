//! Contracts between the trees and the values they store.
//!
//! An [`Aggregate`] summarizes a contiguous slice of slots; a [`LazyUpdate`]
//! holds updates that were applied to a whole subtree but not yet pushed
//! into its children.

use std::ops::RangeInclusive;

/// Combinable summary of a contiguous index range.
///
/// `combine` must be associative. It need not be commutative: `self` is
/// always the left operand and `right` the right one.
pub trait Aggregate: Clone {
    /// Value of a single array slot.
    type Element;
    /// An operation together with its payload, e.g. `Add(5)`.
    type Update;

    fn from_leaf(element: &Self::Element) -> Self;

    fn combine(&self, right: &Self) -> Self;

    /// Aggregate obtained by applying `update` to every slot of `range`,
    /// where `self` is the current aggregate of that range.
    ///
    /// Updates whose effect scales with the number of slots (assigning `c`
    /// to `k` slots sums to `c * k`) must take the range length into account.
    fn apply_update(&self, update: &Self::Update, range: RangeInclusive<usize>) -> Self;
}

/// Pending updates of an internal node.
///
/// `Default` is the identity: no update pending.
///
/// Whenever two pending updates meet, the one that was issued later is
/// applied on top of the earlier one. A parent's pending state is always
/// newer than the state its children still hold.
pub trait LazyUpdate<A: Aggregate>: Clone + Default {
    /// Record `update` on top of the state already pending here.
    ///
    /// `current` is the node's aggregate before `update` is folded in.
    fn apply_update(&mut self, update: &A::Update, current: &A);

    /// Record the pending state of the parent on top of this one.
    ///
    /// Called once per flush of the parent. `current` is this node's
    /// aggregate before the parent's state is folded in.
    fn apply_from(&mut self, parent: &Self, current: &A);

    /// Aggregate of `range` once this pending state is applied to `node`.
    fn apply_to(&self, node: &A, range: RangeInclusive<usize>) -> A;

    fn reset(&mut self) {
        *self = Self::default();
    }

    fn is_pending(&self) -> bool;
}
