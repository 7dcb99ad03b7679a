use crate::Element;

/// Naive matrix multiplication using i-j-k loop order.
///
/// This is the textbook triple-loop implementation. Each output cell is a
/// dot product accumulated in a local and then stored, so `c` is overwritten
/// rather than accumulated into. The innermost loop walks B with stride `n`
/// (column-wise), which misses the cache on nearly every step once B stops
/// fitting in L1.
///
/// Use this as a correctness baseline, not for performance.
///
/// # Arguments
///
/// * `a` - Matrix A (m × k), row-major
/// * `b` - Matrix B (k × n), row-major
/// * `c` - Matrix C (m × n), row-major, overwritten with A * B
/// * `m` - Rows of A and C
/// * `n` - Columns of B and C
/// * `k` - Columns of A, rows of B
pub fn matmul_naive_ijk<T: Element>(a: &[T], b: &[T], c: &mut [T], m: usize, n: usize, k: usize) {
    assert_eq!(a.len(), m * k, "A: expected {}x{}={} elements", m, k, m * k);
    assert_eq!(b.len(), k * n, "B: expected {}x{}={} elements", k, n, k * n);
    assert_eq!(c.len(), m * n, "C: expected {}x{}={} elements", m, n, m * n);

    for i in 0..m {
        let a_row = &a[i * k..(i + 1) * k];
        for j in 0..n {
            let mut sum = T::default();
            for p in 0..k {
                sum += a_row[p] * b[p * n + j];
            }
            c[i * n + j] = sum;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overwrites_stale_output() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [5.0, 6.0, 7.0, 8.0];
        let mut c = [100.0; 4];

        matmul_naive_ijk(&a, &b, &mut c, 2, 2, 2);

        assert_eq!(c, [19.0, 22.0, 43.0, 50.0]);
    }

    #[test]
    #[should_panic(expected = "C: expected 3x2=6 elements")]
    fn short_output_buffer_panics() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let b = [1.0, 0.0, 0.0, 1.0];
        let mut c = [0.0; 4];

        matmul_naive_ijk(&a, &b, &mut c, 3, 2, 2);
    }

    #[test]
    #[should_panic(expected = "B: expected 2x2=4 elements")]
    fn short_rhs_panics() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [1.0, 0.0, 0.0];
        let mut c = [0.0; 4];

        matmul_naive_ijk(&a, &b, &mut c, 2, 2, 2);
    }

    #[test]
    fn integer_elements() {
        // 1×3 times 3×1
        let a = [1i64, 2, 3];
        let b = [4i64, 5, 6];
        let mut c = [0i64; 1];

        matmul_naive_ijk(&a, &b, &mut c, 1, 1, 3);

        assert_eq!(c, [32]);
    }
}
