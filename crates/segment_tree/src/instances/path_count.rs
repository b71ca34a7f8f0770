//! Path counting modulo `1_000_000_007` under two non-commuting turns.
//!
//! Each slot counts the paths ending there whose last step arrived from the
//! left (`left`) and from the right (`right`). A [`Turn`] extends every path
//! of a slot by one more step, which is linear in `(left, right)`:
//!
//! ```text
//! Turn::Left   left += right     [1 1]
//!                                [0 1]
//! Turn::Right  right += left     [1 0]
//!                                [1 1]
//! ```
//!
//! Sums of slots transform by the same matrix, so pending turns compose as
//! 2×2 matrix products regardless of the range length.

use std::ops::{Mul, RangeInclusive};

use crate::policy::{Aggregate, LazyUpdate};

pub const MODULUS: u64 = 1_000_000_007;

/// Both counts are kept below [`MODULUS`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PathCount {
    left: u64,
    right: u64,
}

impl PathCount {
    /// A slot reached by exactly one path in each direction.
    pub const SEED: Self = Self { left: 1, right: 1 };

    pub fn new(left: u64, right: u64) -> Self {
        Self {
            left: left % MODULUS,
            right: right % MODULUS,
        }
    }

    pub fn left(&self) -> u64 {
        self.left
    }

    pub fn right(&self) -> u64 {
        self.right
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Turn {
    Left,
    Right,
}

/// Row-major `[[a, b], [c, d]]` acting on the column `(left, right)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Matrix2 {
    a: u64,
    b: u64,
    c: u64,
    d: u64,
}

impl Matrix2 {
    pub const IDENTITY: Self = Self {
        a: 1,
        b: 0,
        c: 0,
        d: 1,
    };

    pub fn transform(&self, v: &PathCount) -> PathCount {
        PathCount {
            left: (self.a * v.left + self.b * v.right) % MODULUS,
            right: (self.c * v.left + self.d * v.right) % MODULUS,
        }
    }
}

impl From<Turn> for Matrix2 {
    fn from(turn: Turn) -> Self {
        match turn {
            Turn::Left => Self {
                a: 1,
                b: 1,
                c: 0,
                d: 1,
            },
            Turn::Right => Self {
                a: 1,
                b: 0,
                c: 1,
                d: 1,
            },
        }
    }
}

impl Mul for Matrix2 {
    type Output = Self;

    /// `self * rhs` applies `rhs` first.
    fn mul(self, rhs: Self) -> Self {
        Self {
            a: (self.a * rhs.a + self.b * rhs.c) % MODULUS,
            b: (self.a * rhs.b + self.b * rhs.d) % MODULUS,
            c: (self.c * rhs.a + self.d * rhs.c) % MODULUS,
            d: (self.c * rhs.b + self.d * rhs.d) % MODULUS,
        }
    }
}

/// Product of the turns pending at a node, newest leftmost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathCountLazy(Matrix2);

impl Default for PathCountLazy {
    fn default() -> Self {
        Self(Matrix2::IDENTITY)
    }
}

impl Aggregate for PathCount {
    type Element = PathCount;
    type Update = Turn;

    #[inline(always)]
    fn from_leaf(element: &Self::Element) -> Self {
        *element
    }

    #[inline(always)]
    fn combine(&self, right: &Self) -> Self {
        Self {
            left: (self.left + right.left) % MODULUS,
            right: (self.right + right.right) % MODULUS,
        }
    }

    #[inline(always)]
    fn apply_update(&self, update: &Self::Update, _range: RangeInclusive<usize>) -> Self {
        Matrix2::from(*update).transform(self)
    }
}

impl LazyUpdate<PathCount> for PathCountLazy {
    fn apply_update(&mut self, update: &Turn, _current: &PathCount) {
        self.0 = Matrix2::from(*update) * self.0;
    }

    fn apply_from(&mut self, parent: &Self, _current: &PathCount) {
        self.0 = parent.0 * self.0;
    }

    fn apply_to(&self, node: &PathCount, _range: RangeInclusive<usize>) -> PathCount {
        self.0.transform(node)
    }

    fn is_pending(&self) -> bool {
        self.0 != Matrix2::IDENTITY
    }
}
