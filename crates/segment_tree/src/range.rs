use std::ops::{Bound, RangeBounds};

use thiserror::Error;

/// A range that does not describe a non-empty run of slots of the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RangeError {
    /// The half-open range `start..end` holds no slot.
    #[error("range {start}..{end} is empty or inverted")]
    Empty { start: usize, end: usize },
    /// The range reaches past the last slot.
    #[error("range end {end} is out of bounds for length {len}")]
    OutOfBounds { end: usize, len: usize },
}

/// Normalize `range` over `len` slots to inclusive `(lo, hi)` bounds.
pub(crate) fn normalize_range<R: RangeBounds<usize>>(
    range: &R,
    len: usize,
) -> Result<(usize, usize), RangeError> {
    let start = match range.start_bound() {
        Bound::Included(&start) => start,
        Bound::Excluded(&start) => start.checked_add(1).ok_or(RangeError::Empty {
            start,
            end: start,
        })?,
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&end) => end
            .checked_add(1)
            .ok_or(RangeError::OutOfBounds { end, len })?,
        Bound::Excluded(&end) => end,
        Bound::Unbounded => len,
    };

    if start >= end {
        return Err(RangeError::Empty { start, end });
    }
    if end > len {
        return Err(RangeError::OutOfBounds { end, len });
    }

    Ok((start, end - 1))
}

#[inline(always)]
pub(crate) fn mid(lo: usize, hi: usize) -> usize {
    debug_assert!(lo <= hi);
    lo + (hi - lo) / 2
}

#[inline(always)]
pub(crate) fn left_child(id: usize) -> usize {
    2 * id + 1
}

#[inline(always)]
pub(crate) fn right_child(id: usize) -> usize {
    2 * id + 2
}
