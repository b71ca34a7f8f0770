//! Sums modulo a prime under range affine maps `x ↦ a·x + b`.
//!
//! Affine maps do not commute, so pending maps must be composed in the
//! order they were issued.

use std::ops::RangeInclusive;

use crate::policy::{Aggregate, LazyUpdate};

pub const MODULUS: u64 = 998_244_353;

/// Sum of a range, always reduced below [`MODULUS`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ModSum(u64);

impl ModSum {
    pub fn new(value: u64) -> Self {
        Self(value % MODULUS)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Coefficients are reduced below [`MODULUS`] on construction, so every
/// product below fits in a `u64`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Affine {
    a: u64,
    b: u64,
}

impl Affine {
    pub const IDENTITY: Self = Self { a: 1, b: 0 };

    pub fn new(a: u64, b: u64) -> Self {
        Self {
            a: a % MODULUS,
            b: b % MODULUS,
        }
    }

    pub fn a(&self) -> u64 {
        self.a
    }

    pub fn b(&self) -> u64 {
        self.b
    }

    /// `self ∘ inner`: apply `inner` first, then `self`.
    #[inline(always)]
    pub fn compose(&self, inner: &Self) -> Self {
        // a = a_self * a_inner
        // b = a_self * b_inner + b_self
        Self {
            a: self.a * inner.a % MODULUS,
            b: (self.a * inner.b + self.b) % MODULUS,
        }
    }

    #[inline(always)]
    pub fn eval(&self, x: u64) -> u64 {
        (self.a * (x % MODULUS) + self.b) % MODULUS
    }
}

/// Pending composite map; the identity when nothing is pending.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AffineLazy(Affine);

impl Default for AffineLazy {
    fn default() -> Self {
        Self(Affine::IDENTITY)
    }
}

impl Aggregate for ModSum {
    type Element = u64;
    type Update = Affine;

    #[inline(always)]
    fn from_leaf(element: &Self::Element) -> Self {
        Self::new(*element)
    }

    #[inline(always)]
    fn combine(&self, right: &Self) -> Self {
        Self((self.0 + right.0) % MODULUS)
    }

    #[inline(always)]
    fn apply_update(&self, update: &Self::Update, range: RangeInclusive<usize>) -> Self {
        let len = (range.end() - range.start() + 1) as u64 % MODULUS;
        Self((update.a * self.0 + update.b * len) % MODULUS)
    }
}

impl LazyUpdate<ModSum> for AffineLazy {
    fn apply_update(&mut self, update: &Affine, _current: &ModSum) {
        self.0 = update.compose(&self.0);
    }

    fn apply_from(&mut self, parent: &Self, _current: &ModSum) {
        self.0 = parent.0.compose(&self.0);
    }

    fn apply_to(&self, node: &ModSum, range: RangeInclusive<usize>) -> ModSum {
        node.apply_update(&self.0, range)
    }

    fn is_pending(&self) -> bool {
        self.0 != Affine::IDENTITY
    }
}
