use crate::Element;

/// Cache-friendly matrix multiplication using i-k-j loop order.
///
/// By swapping the j and k loops, the innermost loop accesses both B and C
/// sequentially (stride 1). C is zeroed first and then accumulated into, so
/// any previous contents are discarded.
///
/// Summation order differs from [`matmul_naive_ijk`](super::naive_ijk::matmul_naive_ijk),
/// so floating-point results can differ in the last bits.
///
/// # Arguments
///
/// * `a` - Matrix A (m × k), row-major
/// * `b` - Matrix B (k × n), row-major
/// * `c` - Matrix C (m × n), row-major, overwritten with A * B
/// * `m` - Rows of A and C
/// * `n` - Columns of B and C
/// * `k` - Columns of A, rows of B
pub fn matmul_naive_ikj<T: Element>(a: &[T], b: &[T], c: &mut [T], m: usize, n: usize, k: usize) {
    assert_eq!(a.len(), m * k, "A: expected {}x{}={} elements", m, k, m * k);
    assert_eq!(b.len(), k * n, "B: expected {}x{}={} elements", k, n, k * n);
    assert_eq!(c.len(), m * n, "C: expected {}x{}={} elements", m, n, m * n);

    c.fill(T::default());
    matmul_ikj_rows(a, b, c, 0, n, k);
}

/// i-k-j accumulation over a contiguous block of output rows.
///
/// `c_block` holds output rows `row_start..row_start + c_block.len() / n`
/// and nothing else, so callers can hand disjoint blocks of one output
/// buffer to different threads. Accumulates (`C += A * B`); zeroing is the
/// caller's job.
///
/// # Arguments
///
/// * `a` - The whole of matrix A (m × k), row-major
/// * `b` - The whole of matrix B (k × n), row-major
/// * `c_block` - Output rows for this block, row-major, length a multiple of `n`
/// * `row_start` - Index of the first output row in `c_block`
pub fn matmul_ikj_rows<T: Element>(
    a: &[T],
    b: &[T],
    c_block: &mut [T],
    row_start: usize,
    n: usize,
    k: usize,
) {
    if n == 0 {
        return;
    }
    assert_eq!(
        c_block.len() % n,
        0,
        "C block: {} elements is not a whole number of {}-wide rows",
        c_block.len(),
        n
    );

    for (r, c_row) in c_block.chunks_exact_mut(n).enumerate() {
        let i = row_start + r;
        let a_row = &a[i * k..(i + 1) * k];

        for (p, &a_ip) in a_row.iter().enumerate() {
            let b_row = &b[p * n..(p + 1) * n];
            for (c_ij, &b_pj) in c_row.iter_mut().zip(b_row) {
                *c_ij += a_ip * b_pj;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroes_before_accumulating() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [5.0, 6.0, 7.0, 8.0];
        let mut c = [5.0; 4];

        matmul_naive_ikj(&a, &b, &mut c, 2, 2, 2);

        assert_eq!(c, [19.0, 22.0, 43.0, 50.0]);
    }

    #[test]
    fn row_block_only_touches_its_rows() {
        // 3×2 times 2×2, compute only row 1.
        let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let b = [1.0, 0.0, 0.0, 1.0];
        let mut c = [0.0; 6];

        matmul_ikj_rows(&a, &b, &mut c[2..4], 1, 2, 2);

        assert_eq!(c, [0.0, 0.0, 3.0, 4.0, 0.0, 0.0]);
    }

    #[test]
    #[should_panic(expected = "C: expected 3x2=6 elements")]
    fn short_output_buffer_panics() {
        // 3×2 times 2×2 needs 6 output cells; 4 would drop row 2.
        let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let b = [1.0, 0.0, 0.0, 1.0];
        let mut c = [0.0; 4];

        matmul_naive_ikj(&a, &b, &mut c, 3, 2, 2);
    }

    #[test]
    #[should_panic(expected = "not a whole number")]
    fn ragged_row_block_panics() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [1.0, 0.0, 0.0, 1.0];
        let mut c = [0.0; 3];

        matmul_ikj_rows(&a, &b, &mut c, 0, 2, 2);
    }

    #[test]
    fn empty_inner_dimension_yields_zeros() {
        let a: [f64; 0] = [];
        let b: [f64; 0] = [];
        let mut c = [7.0; 6];

        matmul_naive_ikj(&a, &b, &mut c, 2, 3, 0);

        assert_eq!(c, [0.0; 6]);
    }
}
