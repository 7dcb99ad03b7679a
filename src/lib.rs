//! Dense row-major matrices and three interchangeable multiply kernels.
//!
//! The kernels all compute `C = A × B` for `A: m×k`, `B: k×n`:
//!
//! - [`multiply_sequential_v1`]: textbook i-j-k order, one dot product per cell.
//! - [`multiply_sequential_v2`]: i-k-j order, so the inner loop walks rows of
//!   `B` and `C` sequentially. Much friendlier to the cache.
//! - [`multiply_parallel`]: the i-k-j loop split into contiguous row blocks,
//!   one block per OS thread.
//!
//! ## Usage
//!
//! ```
//! use densemat::{Matrix, multiply_parallel, multiply_sequential_v2};
//!
//! let a = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
//! let b = Matrix::from_vec(2, 2, vec![5.0, 6.0, 7.0, 8.0]).unwrap();
//!
//! let c = multiply_sequential_v2(&a, &b);
//! assert_eq!(c.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
//!
//! let c_mt = multiply_parallel(&a, &b, 4);
//! assert_eq!(c, c_mt);
//! ```
//!
//! ## Contract violations
//!
//! Multiplying matrices whose inner dimensions differ is a programming error.
//! The plain functions panic; every kernel also has a `try_` form that returns
//! [`MatrixError`] instead.

use std::fmt::Debug;
use std::ops::{Add, AddAssign, Mul};

pub mod error;
pub mod matrix;
pub mod threaded;

pub use error::MatrixError;
pub use matrix::Matrix;
pub use matrix::naive_ijk::matmul_naive_ijk;
pub use matrix::naive_ikj::matmul_naive_ikj;
pub use matrix::transpose::transpose;
pub use threaded::{
    DEFAULT_NUM_THREADS, WorkerPool, multiply_parallel, multiply_pooled, try_multiply_parallel,
    try_multiply_pooled,
};

/// Numeric cell type. `Default` must be the additive zero.
pub trait Element:
    Copy + Default + PartialEq + Debug + Send + Sync + Add<Output = Self> + Mul<Output = Self> + AddAssign
{
}

impl<T> Element for T where
    T: Copy
        + Default
        + PartialEq
        + Debug
        + Send
        + Sync
        + Add<Output = T>
        + Mul<Output = T>
        + AddAssign
{
}

/// Matrix multiply using i-j-k loop order.
///
/// # Panics
///
/// Panics if `a.cols() != b.rows()`.
pub fn multiply_sequential_v1<T: Element>(a: &Matrix<T>, b: &Matrix<T>) -> Matrix<T> {
    try_multiply_sequential_v1(a, b).unwrap_or_else(|e| panic!("{e}"))
}

/// Same as [`multiply_sequential_v1`] but reports a shape mismatch as an error.
pub fn try_multiply_sequential_v1<T: Element>(
    a: &Matrix<T>,
    b: &Matrix<T>,
) -> Result<Matrix<T>, MatrixError> {
    check_inner_dimensions(a, b)?;

    let (m, k, n) = (a.rows(), a.cols(), b.cols());
    let mut c = Matrix::new(m, n);
    matmul_naive_ijk(a.as_slice(), b.as_slice(), c.as_mut_slice(), m, n, k);
    Ok(c)
}

/// Matrix multiply using i-k-j loop order.
///
/// This is the sequential baseline the parallel kernel is measured against.
///
/// # Panics
///
/// Panics if `a.cols() != b.rows()`.
pub fn multiply_sequential_v2<T: Element>(a: &Matrix<T>, b: &Matrix<T>) -> Matrix<T> {
    try_multiply_sequential_v2(a, b).unwrap_or_else(|e| panic!("{e}"))
}

/// Same as [`multiply_sequential_v2`] but reports a shape mismatch as an error.
pub fn try_multiply_sequential_v2<T: Element>(
    a: &Matrix<T>,
    b: &Matrix<T>,
) -> Result<Matrix<T>, MatrixError> {
    check_inner_dimensions(a, b)?;

    let (m, k, n) = (a.rows(), a.cols(), b.cols());
    let mut c = Matrix::new(m, n);
    matmul_naive_ikj(a.as_slice(), b.as_slice(), c.as_mut_slice(), m, n, k);
    Ok(c)
}

pub(crate) fn check_inner_dimensions<T>(a: &Matrix<T>, b: &Matrix<T>) -> Result<(), MatrixError> {
    if a.cols() != b.rows() {
        return Err(MatrixError::InvalidDimensions {
            lhs_rows: a.rows(),
            lhs_cols: a.cols(),
            rhs_rows: b.rows(),
            rhs_cols: b.cols(),
        });
    }
    Ok(())
}
