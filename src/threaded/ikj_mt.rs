//! Multi-threaded i-k-j GEMM on freshly spawned OS threads.

use std::thread;

use tracing::debug;

use super::partition::RowPartitioner;
use crate::matrix::naive_ikj::matmul_ikj_rows;
use crate::{Element, Matrix, MatrixError, check_inner_dimensions};

/// Multi-threaded matrix multiplication using the i-k-j loop order.
///
/// Zeroes `c`, then spawns `num_threads` scoped threads. Each thread claims
/// one contiguous block of output rows from a [`RowPartitioner`] and
/// accumulates into it; A and B are shared read-only. Returns once every
/// thread has joined. Threads are created per call, there is no pool.
///
/// A panic in any worker propagates to the caller.
///
/// # Arguments
///
/// * `num_threads` - Worker count, at least 1. Used as given, even when it
///   exceeds `m` (surplus workers get empty blocks).
///
/// # Panics
///
/// Panics if `num_threads == 0` or the slice lengths don't match `m, n, k`.
pub fn matmul_ikj_mt<T: Element>(
    a: &[T],
    b: &[T],
    c: &mut [T],
    m: usize,
    n: usize,
    k: usize,
    num_threads: usize,
) {
    assert_eq!(a.len(), m * k, "A: expected {}x{}={} elements", m, k, m * k);
    assert_eq!(b.len(), k * n, "B: expected {}x{}={} elements", k, n, k * n);

    c.fill(T::default());

    let partitioner = RowPartitioner::new(c, m, n, num_threads);
    debug!(m, n, k, num_threads, "dispatching row blocks");

    thread::scope(|s| {
        for _ in 0..num_threads {
            let partitioner = &partitioner;
            s.spawn(move || {
                if let Some(block) = partitioner.claim() {
                    matmul_ikj_rows(a, b, block.out, block.rows.start, n, k);
                }
            });
        }
    });
}

/// Multiplies `a × b` on `num_threads` threads spawned for this call.
///
/// Use [`super::DEFAULT_NUM_THREADS`] when you have no better number.
///
/// # Panics
///
/// Panics if `a.cols() != b.rows()` or `num_threads == 0`.
pub fn multiply_parallel<T: Element>(a: &Matrix<T>, b: &Matrix<T>, num_threads: usize) -> Matrix<T> {
    try_multiply_parallel(a, b, num_threads).unwrap_or_else(|e| panic!("{e}"))
}

/// Same as [`multiply_parallel`] but reports bad arguments as errors.
pub fn try_multiply_parallel<T: Element>(
    a: &Matrix<T>,
    b: &Matrix<T>,
    num_threads: usize,
) -> Result<Matrix<T>, MatrixError> {
    check_inner_dimensions(a, b)?;
    if num_threads == 0 {
        return Err(MatrixError::InvalidThreadCount);
    }

    let (m, k, n) = (a.rows(), a.cols(), b.cols());
    let mut c = Matrix::new(m, n);
    matmul_ikj_mt(a.as_slice(), b.as_slice(), c.as_mut_slice(), m, n, k, num_threads);
    Ok(c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::naive_ikj::matmul_naive_ikj;

    #[test]
    fn matches_sequential_on_uneven_rows() {
        let (m, n, k) = (37, 11, 19);
        let a: Vec<f64> = (0..m * k).map(|i| (i % 10) as f64).collect();
        let b: Vec<f64> = (0..k * n).map(|i| (i % 7) as f64).collect();

        let mut c_naive = vec![0.0; m * n];
        matmul_naive_ikj(&a, &b, &mut c_naive, m, n, k);

        for threads in [1, 2, 3, 4, 8, 64] {
            let mut c_mt = vec![-1.0; m * n];
            matmul_ikj_mt(&a, &b, &mut c_mt, m, n, k, threads);
            assert_eq!(c_naive, c_mt, "threads={threads}");
        }
    }

    #[test]
    fn zero_threads_is_an_error() {
        let a: Matrix<f64> = Matrix::new(2, 2);
        let b: Matrix<f64> = Matrix::new(2, 2);
        assert!(matches!(
            try_multiply_parallel(&a, &b, 0),
            Err(MatrixError::InvalidThreadCount)
        ));
    }

    #[test]
    #[should_panic(expected = "at least 1")]
    fn zero_threads_panics() {
        let a: Matrix<f64> = Matrix::new(2, 2);
        multiply_parallel(&a, &a, 0);
    }

    #[test]
    fn empty_output() {
        let a: Matrix<f64> = Matrix::new(0, 3);
        let b: Matrix<f64> = Matrix::new(3, 4);
        let c = multiply_parallel(&a, &b, 4);
        assert_eq!(c.shape(), (0, 4));
    }
}
