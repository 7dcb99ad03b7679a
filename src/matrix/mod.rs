//! The dense matrix container and the sequential kernels.
//!
//! The slice-level kernels take raw row-major buffers plus `m, n, k` so the
//! threaded code can run them on sub-blocks of the output. The [`Matrix`]
//! wrappers live in the crate root.

mod dense;
pub mod naive_ijk;
pub mod naive_ikj;
pub mod transpose;

pub use dense::Matrix;
