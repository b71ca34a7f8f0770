use std::ops::RangeBounds;

use crate::policy::{Aggregate, LazyUpdate};
use crate::range::{RangeError, left_child, mid, normalize_range, right_child};
use crate::segment_tree::SegmentTree;

/// Segment tree with lazily propagated range updates.
///
/// Every node's aggregate already reflects the updates pending at that
/// node; only its descendants are stale. Pending state is pushed one
/// level down right before a traversal enters the children. Leaves never
/// hold pending state.
#[derive(Clone, Debug)]
pub struct LazySegmentTree<A: Aggregate, L: LazyUpdate<A>> {
    tree: SegmentTree<A>,
    lazy: Vec<L>,
}

impl<A: Aggregate, L: LazyUpdate<A>> LazySegmentTree<A, L> {
    pub fn new(elements: &[A::Element]) -> Self {
        Self::with_tree(SegmentTree::new(elements))
    }

    /// Build from `len` leaf aggregates produced by `leaf(index)`.
    pub fn from_fn<F: FnMut(usize) -> A>(len: usize, leaf: F) -> Self {
        Self::with_tree(SegmentTree::from_fn(len, leaf))
    }

    fn with_tree(tree: SegmentTree<A>) -> Self {
        let lazy = vec![L::default(); tree.nodes.len()];
        Self { tree, lazy }
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Combined aggregate of `range`, left to right.
    ///
    /// # Panics
    ///
    /// Panics if `range` is empty, inverted or out of bounds.
    #[track_caller]
    pub fn query<R: RangeBounds<usize>>(&mut self, range: R) -> A {
        match self.try_query(range) {
            Ok(agg) => agg,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_query<R: RangeBounds<usize>>(&mut self, range: R) -> Result<A, RangeError> {
        let (l, r) = normalize_range(&range, self.len())?;
        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!("lazy_query", l, r);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let hi = self.len() - 1;
        Ok(self.query_node(0, 0, hi, l, r))
    }

    #[track_caller]
    pub fn get(&mut self, index: usize) -> A {
        self.query(index..=index)
    }

    /// Apply `update` to every slot of `range`.
    ///
    /// # Panics
    ///
    /// Panics if `range` is empty, inverted or out of bounds.
    #[track_caller]
    pub fn update<R: RangeBounds<usize>>(&mut self, range: R, update: A::Update) {
        if let Err(err) = self.try_update(range, update) {
            panic!("{err}");
        }
    }

    pub fn try_update<R: RangeBounds<usize>>(
        &mut self,
        range: R,
        update: A::Update,
    ) -> Result<(), RangeError> {
        let (l, r) = normalize_range(&range, self.len())?;
        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!("lazy_update", l, r);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let hi = self.len() - 1;
        self.update_node(0, 0, hi, l, r, &update);
        Ok(())
    }

    #[track_caller]
    pub fn apply(&mut self, index: usize, update: A::Update) {
        self.update(index..=index, update);
    }

    /// Replace slot `index` with `element`, discarding every update that
    /// was applied to it so far.
    #[track_caller]
    pub fn set(&mut self, index: usize, element: A::Element) {
        self.tree.check_index(index);
        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!("lazy_set", index);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let hi = self.len() - 1;
        self.set_node(0, 0, hi, index, &A::from_leaf(&element));
    }

    /// Fold `pending` into node `id`, which covers `[lo, hi]`.
    fn apply_pending(&mut self, id: usize, lo: usize, hi: usize, pending: &L) {
        let current = &self.tree.nodes[id];
        if lo != hi {
            self.lazy[id].apply_from(pending, current);
        }
        self.tree.nodes[id] = pending.apply_to(current, lo..=hi);
    }

    /// Push the state pending at internal node `id` into both children.
    fn flush(&mut self, id: usize, lo: usize, hi: usize) {
        if !self.lazy[id].is_pending() {
            return;
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(id, lo, hi, "flush");

        let pending = self.lazy[id].clone();
        self.lazy[id].reset();
        let m = mid(lo, hi);
        self.apply_pending(left_child(id), lo, m, &pending);
        self.apply_pending(right_child(id), m + 1, hi, &pending);
    }

    fn update_node(
        &mut self,
        id: usize,
        lo: usize,
        hi: usize,
        l: usize,
        r: usize,
        update: &A::Update,
    ) {
        if r < lo || hi < l {
            return;
        }
        if l <= lo && hi <= r {
            let current = &self.tree.nodes[id];
            if lo != hi {
                self.lazy[id].apply_update(update, current);
            }
            self.tree.nodes[id] = current.apply_update(update, lo..=hi);
            return;
        }

        self.flush(id, lo, hi);
        let m = mid(lo, hi);
        self.update_node(left_child(id), lo, m, l, r, update);
        self.update_node(right_child(id), m + 1, hi, l, r, update);
        self.tree.pull(id);
    }

    fn query_node(&mut self, id: usize, lo: usize, hi: usize, l: usize, r: usize) -> A {
        if l <= lo && hi <= r {
            return self.tree.nodes[id].clone();
        }

        self.flush(id, lo, hi);
        let m = mid(lo, hi);
        if r <= m {
            return self.query_node(left_child(id), lo, m, l, r);
        }
        if l > m {
            return self.query_node(right_child(id), m + 1, hi, l, r);
        }
        let left = self.query_node(left_child(id), lo, m, l, r);
        let right = self.query_node(right_child(id), m + 1, hi, l, r);
        left.combine(&right)
    }

    fn set_node(&mut self, id: usize, lo: usize, hi: usize, index: usize, leaf: &A) {
        if lo == hi {
            self.tree.nodes[id] = leaf.clone();
            return;
        }

        self.flush(id, lo, hi);
        let m = mid(lo, hi);
        if index <= m {
            self.set_node(left_child(id), lo, m, index, leaf);
        } else {
            self.set_node(right_child(id), m + 1, hi, index, leaf);
        }
        self.tree.pull(id);
    }
}
