//! Multi-threaded i-k-j GEMM on a reusable rayon pool.
//!
//! Same row blocks and claim protocol as [`matmul_ikj_mt`](super::ikj_mt::matmul_ikj_mt),
//! but the threads outlive the call, so repeated multiplies skip thread
//! creation.

use std::fmt;

use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

use super::partition::RowPartitioner;
use crate::matrix::naive_ikj::matmul_ikj_rows;
use crate::{Element, Matrix, MatrixError, check_inner_dimensions};

/// A fixed-size pool of named worker threads.
pub struct WorkerPool {
    pool: ThreadPool,
    num_threads: usize,
}

impl WorkerPool {
    pub fn new(num_threads: usize) -> Result<Self, MatrixError> {
        // rayon reads 0 as "pick for me"; here it is a caller bug.
        if num_threads == 0 {
            return Err(MatrixError::InvalidThreadCount);
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("densemat-worker-{i}"))
            .build()?;
        debug!(num_threads, "worker pool ready");

        Ok(Self { pool, num_threads })
    }

    pub fn num_threads(&self) -> usize {
        self.num_threads
    }
}

impl fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerPool")
            .field("num_threads", &self.num_threads)
            .finish_non_exhaustive()
    }
}

/// Pool-backed counterpart of [`matmul_ikj_mt`](super::ikj_mt::matmul_ikj_mt).
///
/// Issues one task per pool thread; each claims a row block and runs the
/// i-k-j loop over it. Returns when all tasks are done.
pub fn matmul_ikj_pooled<T: Element>(
    a: &[T],
    b: &[T],
    c: &mut [T],
    m: usize,
    n: usize,
    k: usize,
    pool: &WorkerPool,
) {
    assert_eq!(a.len(), m * k, "A: expected {}x{}={} elements", m, k, m * k);
    assert_eq!(b.len(), k * n, "B: expected {}x{}={} elements", k, n, k * n);

    c.fill(T::default());

    let partitioner = RowPartitioner::new(c, m, n, pool.num_threads);
    debug!(m, n, k, num_threads = pool.num_threads, "dispatching row blocks to pool");

    pool.pool.scope(|s| {
        for _ in 0..pool.num_threads {
            let partitioner = &partitioner;
            s.spawn(move |_| {
                if let Some(block) = partitioner.claim() {
                    matmul_ikj_rows(a, b, block.out, block.rows.start, n, k);
                }
            });
        }
    });
}

/// Multiplies `a × b` on an existing [`WorkerPool`].
///
/// # Panics
///
/// Panics if `a.cols() != b.rows()`.
pub fn multiply_pooled<T: Element>(a: &Matrix<T>, b: &Matrix<T>, pool: &WorkerPool) -> Matrix<T> {
    try_multiply_pooled(a, b, pool).unwrap_or_else(|e| panic!("{e}"))
}

/// Same as [`multiply_pooled`] but reports a shape mismatch as an error.
pub fn try_multiply_pooled<T: Element>(
    a: &Matrix<T>,
    b: &Matrix<T>,
    pool: &WorkerPool,
) -> Result<Matrix<T>, MatrixError> {
    check_inner_dimensions(a, b)?;

    let (m, k, n) = (a.rows(), a.cols(), b.cols());
    let mut c = Matrix::new(m, n);
    matmul_ikj_pooled(a.as_slice(), b.as_slice(), c.as_mut_slice(), m, n, k, pool);
    Ok(c)
}
