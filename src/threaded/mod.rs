//! Multi-threaded GEMM.
//!
//! Both implementations split the output rows into one contiguous block per
//! worker (see [`partition`]) and run the i-k-j loop on each block.
//! Workers never share output cells, so only the block counter is locked.
//!
//! Available implementations:
//! - `ikj_mt`: fresh OS threads per call
//! - `pooled`: a reusable rayon pool

pub mod ikj_mt;
pub mod partition;
pub mod pooled;

pub use ikj_mt::{matmul_ikj_mt, multiply_parallel, try_multiply_parallel};
pub use pooled::{WorkerPool, matmul_ikj_pooled, multiply_pooled, try_multiply_pooled};

/// Default worker count for [`multiply_parallel`] and [`WorkerPool::new`]
/// when the caller has no better number.
pub const DEFAULT_NUM_THREADS: usize = 4;
