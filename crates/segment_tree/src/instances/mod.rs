//! Ready-made aggregate and pending-update pairs.

pub mod affine;
pub mod arg_min;
pub mod path_count;
pub mod sum;
