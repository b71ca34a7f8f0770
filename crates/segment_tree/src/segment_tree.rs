use std::ops::RangeBounds;

use crate::policy::Aggregate;
use crate::range::{RangeError, left_child, mid, normalize_range, right_child};

/// Segment tree over `len` slots without lazy state.
///
/// Nodes live in a flat arena: the root is `0` and node `i` has children
/// `2 * i + 1` and `2 * i + 2`. Node `i` covering `[lo, hi]` splits at
/// `lo + (hi - lo) / 2`, the left child taking the lower half.
#[derive(Clone, Debug)]
pub struct SegmentTree<A: Aggregate> {
    len: usize,
    pub(crate) nodes: Vec<A>,
}

impl<A: Aggregate> SegmentTree<A> {
    pub fn new(elements: &[A::Element]) -> Self {
        Self::from_fn(elements.len(), |i| A::from_leaf(&elements[i]))
    }

    /// Build from `len` leaf aggregates produced by `leaf(index)`.
    pub fn from_fn<F: FnMut(usize) -> A>(len: usize, leaf: F) -> Self {
        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!("segment_tree_build", len);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let leaves: Vec<A> = (0..len).map(leaf).collect();
        let Some(first) = leaves.first() else {
            return Self {
                len: 0,
                nodes: Vec::new(),
            };
        };

        // Slots that no node maps to keep this filler and are never read.
        let mut nodes = vec![first.clone(); 2 * len.next_power_of_two()];
        Self::build(&mut nodes, &leaves, 0, 0, len - 1);
        Self { len, nodes }
    }

    fn build(nodes: &mut [A], leaves: &[A], id: usize, lo: usize, hi: usize) {
        if lo == hi {
            nodes[id] = leaves[lo].clone();
            return;
        }
        let m = mid(lo, hi);
        Self::build(nodes, leaves, left_child(id), lo, m);
        Self::build(nodes, leaves, right_child(id), m + 1, hi);
        nodes[id] = nodes[left_child(id)].combine(&nodes[right_child(id)]);
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Combined aggregate of `range`, left to right.
    ///
    /// # Panics
    ///
    /// Panics if `range` is empty, inverted or out of bounds.
    #[track_caller]
    pub fn query<R: RangeBounds<usize>>(&self, range: R) -> A {
        match self.try_query(range) {
            Ok(agg) => agg,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_query<R: RangeBounds<usize>>(&self, range: R) -> Result<A, RangeError> {
        let (l, r) = normalize_range(&range, self.len)?;
        Ok(self.query_node(0, 0, self.len - 1, l, r))
    }

    #[track_caller]
    pub fn get(&self, index: usize) -> A {
        self.query(index..=index)
    }

    /// Replace slot `index` with `element`.
    #[track_caller]
    pub fn set(&mut self, index: usize, element: A::Element) {
        self.check_index(index);
        let leaf = A::from_leaf(&element);
        self.update_leaf(0, 0, self.len - 1, index, &mut |_: &A| leaf.clone());
    }

    /// Apply `update` to slot `index` alone.
    #[track_caller]
    pub fn apply(&mut self, index: usize, update: A::Update) {
        self.check_index(index);
        self.update_leaf(0, 0, self.len - 1, index, &mut |leaf: &A| {
            leaf.apply_update(&update, index..=index)
        });
    }

    #[track_caller]
    pub(crate) fn check_index(&self, index: usize) {
        assert!(
            index < self.len,
            "index {index} is out of bounds for length {}",
            self.len
        );
    }

    /// Recompute node `id` from its two children.
    #[inline(always)]
    pub(crate) fn pull(&mut self, id: usize) {
        self.nodes[id] = self.nodes[left_child(id)].combine(&self.nodes[right_child(id)]);
    }

    fn query_node(&self, id: usize, lo: usize, hi: usize, l: usize, r: usize) -> A {
        if l <= lo && hi <= r {
            return self.nodes[id].clone();
        }
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

    fn update_leaf(
        &mut self,
        id: usize,
        lo: usize,
        hi: usize,
        index: usize,
        f: &mut dyn FnMut(&A) -> A,
    ) {
        if lo == hi {
            self.nodes[id] = f(&self.nodes[id]);
            return;
        }
        let m = mid(lo, hi);
        if index <= m {
            self.update_leaf(left_child(id), lo, m, index, f);
        } else {
            self.update_leaf(right_child(id), m + 1, hi, index, f);
        }
        self.pull(id);
    }
}

#[cfg(test)]
mod tests {
    use super::SegmentTree;
    use crate::instances::arg_min::{ArgMin, ArgMinUpdate};
    use crate::instances::sum::{Sum, SumUpdate};
    use crate::range::RangeError;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn arg_min_tree(values: &[i64]) -> SegmentTree<ArgMin> {
        SegmentTree::from_fn(values.len(), |i| ArgMin::new(i, values[i]))
    }

    fn brute_force_argmin(values: &[i64], l: usize, r: usize) -> usize {
        let mut best = l;
        for i in (l + 1)..=r {
            if values[i] < values[best] {
                best = i;
            }
        }
        best
    }

    #[test]
    fn single_leaf() {
        let mut tree = SegmentTree::<Sum>::new(&[42]);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.query(..), Sum(42));
        tree.apply(0, SumUpdate::Add(8));
        assert_eq!(tree.get(0), Sum(50));
        tree.set(0, 7);
        assert_eq!(tree.query(0..=0), Sum(7));
    }

    #[test]
    fn empty_tree_rejects_every_range() {
        let tree = SegmentTree::<Sum>::new(&[]);
        assert!(tree.is_empty());
        assert_eq!(
            tree.try_query(..),
            Err(RangeError::Empty { start: 0, end: 0 })
        );
        assert_eq!(
            tree.try_query(0..1),
            Err(RangeError::OutOfBounds { end: 1, len: 0 })
        );
    }

    #[test]
    fn sums_of_every_range() {
        let values = [1, 2, 3, 4, 5];
        let tree = SegmentTree::<Sum>::new(&values);
        assert_eq!(tree.query(0..=4), Sum(15));
        assert_eq!(tree.query(1..=3), Sum(9));
        for l in 0..values.len() {
            for r in l..values.len() {
                let expected: i64 = values[l..=r].iter().sum();
                assert_eq!(tree.query(l..=r), Sum(expected), "l={l} r={r}");
            }
        }
    }

    #[test]
    fn point_updates() {
        let mut tree = SegmentTree::<Sum>::new(&[5, 5, 5, 5, 5]);
        tree.apply(1, SumUpdate::Add(3));
        tree.apply(3, SumUpdate::Assign(0));
        tree.set(4, -2);
        assert_eq!(tree.query(..), Sum(16));
        assert_eq!(tree.query(1..4), Sum(13));
    }

    #[test]
    fn argmin_prefers_leftmost() {
        let values = [7, 7, 7, 7];
        let tree = arg_min_tree(&values);
        assert_eq!(tree.query(..).index, 0);
        assert_eq!(tree.query(1..).index, 1);
        assert_eq!(tree.query(2..=3).index, 2);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn query_past_the_end_panics() {
        let tree = SegmentTree::<Sum>::new(&[1, 2, 3]);
        tree.query(1..4);
    }

    #[test]
    #[should_panic(expected = "empty or inverted")]
    fn inverted_query_panics() {
        let tree = SegmentTree::<Sum>::new(&[1, 2, 3]);
        #[allow(clippy::reversed_empty_ranges)]
        let inverted = 2..=1;
        tree.query(inverted);
    }

    #[test]
    #[should_panic(expected = "index 3 is out of bounds for length 3")]
    fn set_past_the_end_panics() {
        let mut tree = SegmentTree::<Sum>::new(&[1, 2, 3]);
        tree.set(3, 0);
    }

    #[test]
    fn random_point_operations_match_vec() {
        let mut rng = StdRng::seed_from_u64(0x5EED_2026);

        for n in 1..48 {
            let mut values: Vec<i64> = (0..n).map(|_| rng.random_range(-8..=8)).collect();
            let mut tree = arg_min_tree(&values);

            for _ in 0..200 {
                match rng.random_range(0..3) {
                    0 => {
                        let i = rng.random_range(0..n);
                        let value = rng.random_range(-8..=8);
                        tree.set(i, (i, value));
                        values[i] = value;
                    }
                    1 => {
                        let i = rng.random_range(0..n);
                        let delta = rng.random_range(-4..=4);
                        tree.apply(i, ArgMinUpdate::Add(delta));
                        values[i] += delta;
                    }
                    _ => {
                        let l = rng.random_range(0..n);
                        let r = rng.random_range(l..n);
                        let expected = brute_force_argmin(&values, l, r);
                        let got = tree.query(l..=r);
                        assert_eq!(got.index, expected, "n={n} l={l} r={r}");
                        assert_eq!(got.value, values[expected]);
                    }
                }
            }
        }
    }
}
