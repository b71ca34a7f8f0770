//! Running sums with range add and range assign.

use std::ops::RangeInclusive;

use crate::policy::{Aggregate, LazyUpdate};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Sum(pub i64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SumUpdate {
    Add(i64),
    Assign(i64),
}

/// Pending state of a [`Sum`] node.
///
/// An `Add` arriving on top of an `Assign` folds into the assigned value;
/// an `Assign` discards whatever was pending before it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SumLazy {
    #[default]
    Clean,
    Add(i64),
    Assign(i64),
}

#[inline(always)]
fn range_len(range: &RangeInclusive<usize>) -> i64 {
    (range.end() - range.start() + 1) as i64
}

impl Aggregate for Sum {
    type Element = i64;
    type Update = SumUpdate;

    #[inline(always)]
    fn from_leaf(element: &Self::Element) -> Self {
        Self(*element)
    }

    #[inline(always)]
    fn combine(&self, right: &Self) -> Self {
        Self(self.0 + right.0)
    }

    #[inline(always)]
    fn apply_update(&self, update: &Self::Update, range: RangeInclusive<usize>) -> Self {
        match *update {
            SumUpdate::Add(delta) => Self(self.0 + delta * range_len(&range)),
            SumUpdate::Assign(value) => Self(value * range_len(&range)),
        }
    }
}

impl LazyUpdate<Sum> for SumLazy {
    fn apply_update(&mut self, update: &SumUpdate, _current: &Sum) {
        *self = match (*self, *update) {
            (_, SumUpdate::Assign(value)) => Self::Assign(value),
            (Self::Clean, SumUpdate::Add(delta)) => Self::Add(delta),
            (Self::Add(old), SumUpdate::Add(delta)) => Self::Add(old + delta),
            (Self::Assign(old), SumUpdate::Add(delta)) => Self::Assign(old + delta),
        };
    }

    fn apply_from(&mut self, parent: &Self, current: &Sum) {
        match *parent {
            Self::Clean => {}
            Self::Add(delta) => self.apply_update(&SumUpdate::Add(delta), current),
            Self::Assign(value) => self.apply_update(&SumUpdate::Assign(value), current),
        }
    }

    fn apply_to(&self, node: &Sum, range: RangeInclusive<usize>) -> Sum {
        match *self {
            Self::Clean => *node,
            Self::Add(delta) => node.apply_update(&SumUpdate::Add(delta), range),
            Self::Assign(value) => node.apply_update(&SumUpdate::Assign(value), range),
        }
    }

    fn is_pending(&self) -> bool {
        !matches!(self, Self::Clean)
    }
}
