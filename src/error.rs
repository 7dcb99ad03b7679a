//! Errors returned by the `try_*` entry points.
//!
//! The plain `multiply_*` functions treat these conditions as caller bugs and
//! panic instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatrixError {
    /// `A.cols != B.rows`.
    #[error("cannot multiply {lhs_rows}x{lhs_cols} by {rhs_rows}x{rhs_cols}: inner dimensions differ")]
    InvalidDimensions {
        lhs_rows: usize,
        lhs_cols: usize,
        rhs_rows: usize,
        rhs_cols: usize,
    },

    #[error("buffer of {len} elements does not fit a {rows}x{cols} matrix")]
    BufferLength { rows: usize, cols: usize, len: usize },

    #[error("thread count must be at least 1")]
    InvalidThreadCount,

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
