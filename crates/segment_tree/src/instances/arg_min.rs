//! Leftmost minimum with range add and range assign.
//!
//! `combine` keeps the left operand on ties, so it is associative but not
//! commutative.

use std::ops::RangeInclusive;

use crate::policy::{Aggregate, LazyUpdate};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ArgMin {
    pub index: usize,
    pub value: i64,
}

impl ArgMin {
    pub fn new(index: usize, value: i64) -> Self {
        Self { index, value }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArgMinUpdate {
    Add(i64),
    Assign(i64),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ArgMinLazy {
    #[default]
    Clean,
    Add(i64),
    Assign(i64),
}

impl Aggregate for ArgMin {
    /// `(index, value)`; a leaf does not otherwise know where it sits, so
    /// `index` must be the slot the element is stored at. Debug builds
    /// check this whenever two nodes are combined.
    type Element = (usize, i64);
    type Update = ArgMinUpdate;

    #[inline(always)]
    fn from_leaf(&(index, value): &Self::Element) -> Self {
        Self { index, value }
    }

    #[inline(always)]
    fn combine(&self, right: &Self) -> Self {
        debug_assert!(
            self.index < right.index,
            "argmin index {} is not left of {}; element indices must match their slots",
            self.index,
            right.index
        );
        if right.value < self.value { *right } else { *self }
    }

    #[inline(always)]
    fn apply_update(&self, update: &Self::Update, range: RangeInclusive<usize>) -> Self {
        match *update {
            ArgMinUpdate::Add(delta) => Self {
                index: self.index,
                value: self.value + delta,
            },
            // Every slot ties, so the leftmost one wins.
            ArgMinUpdate::Assign(value) => Self {
                index: *range.start(),
                value,
            },
        }
    }
}

impl LazyUpdate<ArgMin> for ArgMinLazy {
    fn apply_update(&mut self, update: &ArgMinUpdate, _current: &ArgMin) {
        *self = match (*self, *update) {
            (_, ArgMinUpdate::Assign(value)) => Self::Assign(value),
            (Self::Clean, ArgMinUpdate::Add(delta)) => Self::Add(delta),
            (Self::Add(old), ArgMinUpdate::Add(delta)) => Self::Add(old + delta),
            (Self::Assign(old), ArgMinUpdate::Add(delta)) => Self::Assign(old + delta),
        };
    }

    fn apply_from(&mut self, parent: &Self, current: &ArgMin) {
        if let Some(update) = parent.as_update() {
            self.apply_update(&update, current);
        }
    }

    fn apply_to(&self, node: &ArgMin, range: RangeInclusive<usize>) -> ArgMin {
        match self.as_update() {
            Some(update) => node.apply_update(&update, range),
            None => *node,
        }
    }

    fn is_pending(&self) -> bool {
        self.as_update().is_some()
    }
}

impl ArgMinLazy {
    fn as_update(&self) -> Option<ArgMinUpdate> {
        match *self {
            Self::Clean => None,
            Self::Add(delta) => Some(ArgMinUpdate::Add(delta)),
            Self::Assign(value) => Some(ArgMinUpdate::Assign(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ArgMin, ArgMinLazy, ArgMinUpdate};
    use crate::policy::Aggregate;
    use crate::{LazySegmentTree, SegmentTree};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn brute_force_argmin(values: &[i64], l: usize, r: usize) -> ArgMin {
        let mut best = l;
        for i in (l + 1)..=r {
            if values[i] < values[best] {
                best = i;
            }
        }
        ArgMin::new(best, values[best])
    }

    #[test]
    fn ties_keep_the_left_operand() {
        let a = ArgMin::new(1, 5);
        let b = ArgMin::new(4, 5);
        assert_eq!(a.combine(&b), a);

        let tree = SegmentTree::<ArgMin>::from_fn(6, |i| ArgMin::new(i, 7));
        assert_eq!(tree.query(..), ArgMin::new(0, 7));
        assert_eq!(tree.query(3..), ArgMin::new(3, 7));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "element indices must match their slots")]
    fn misplaced_index_is_rejected() {
        let mut tree = LazySegmentTree::<ArgMin, ArgMinLazy>::new(&[(0, 3), (1, 1), (2, 4), (3, 1)]);
        tree.set(2, (0, -1));
    }

    #[test]
    fn assign_moves_argmin_to_range_start() {
        let values = [9, 8, 1, 8, 9];
        let mut tree = LazySegmentTree::<ArgMin, ArgMinLazy>::from_fn(values.len(), |i| {
            ArgMin::new(i, values[i])
        });
        assert_eq!(tree.query(..), ArgMin::new(2, 1));
        tree.update(1..=3, ArgMinUpdate::Assign(4));
        assert_eq!(tree.query(..), ArgMin::new(1, 4));
        assert_eq!(tree.query(2..), ArgMin::new(2, 4));
        tree.update(0..2, ArgMinUpdate::Add(-1));
        assert_eq!(tree.query(..), ArgMin::new(1, 3));
    }

    #[test]
    fn random_operations_match_vec() {
        let mut rng = StdRng::seed_from_u64(0x5EED_A261);

        for n in 1..33 {
            let mut values: Vec<i64> = (0..n).map(|_| rng.random_range(-5..=5)).collect();
            let mut tree = LazySegmentTree::<ArgMin, ArgMinLazy>::from_fn(n, |i| {
                ArgMin::new(i, values[i])
            });

            for _ in 0..300 {
                let l = rng.random_range(0..n);
                let r = rng.random_range(l..n);
                match rng.random_range(0..3) {
                    0 => {
                        let delta = rng.random_range(-3..=3);
                        tree.update(l..=r, ArgMinUpdate::Add(delta));
                        for value in &mut values[l..=r] {
                            *value += delta;
                        }
                    }
                    1 => {
                        let c = rng.random_range(-5..=5);
                        tree.update(l..=r, ArgMinUpdate::Assign(c));
                        values[l..=r].fill(c);
                    }
                    _ => {
                        let expected = brute_force_argmin(&values, l, r);
                        assert_eq!(tree.query(l..=r), expected, "n={n} l={l} r={r}");
                    }
                }
            }
        }
    }
}
