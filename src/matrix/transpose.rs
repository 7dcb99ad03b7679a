use super::Matrix;

/// Writes the transpose of a row-major buffer into `dst`.
///
/// `src` is read as `rows` rows of `cols` cells; `dst` receives `cols` rows
/// of `rows` cells, with `dst[j * rows + i] = src[i * cols + j]`. Works for
/// any `Copy` cell type, not just numbers. Every cell of `dst` is written.
///
/// # Panics
///
/// Panics if either buffer is not exactly `rows * cols` long.
///
/// # Example
///
/// ```
/// use densemat::matrix::transpose::transpose_into;
///
/// // 3 rows of 2
/// let src = ['a', 'b', 'c', 'd', 'e', 'f'];
/// let mut dst = [' '; 6];
///
/// transpose_into(&src, &mut dst, 3, 2);
///
/// // 2 rows of 3
/// assert_eq!(dst, ['a', 'c', 'e', 'b', 'd', 'f']);
/// ```
pub fn transpose_into<T: Copy>(src: &[T], dst: &mut [T], rows: usize, cols: usize) {
    assert_eq!(src.len(), rows * cols, "src: expected {}x{}={} elements", rows, cols, rows * cols);
    assert_eq!(dst.len(), rows * cols, "dst: expected {}x{}={} elements", cols, rows, rows * cols);

    for i in 0..rows {
        for j in 0..cols {
            dst[j * rows + i] = src[i * cols + j];
        }
    }
}

/// Returns `m^T` as a new matrix; `m` is left untouched.
pub fn transpose<T: Copy + Default>(m: &Matrix<T>) -> Matrix<T> {
    let mut res = Matrix::new(m.cols(), m.rows());
    transpose_into(m.as_slice(), res.as_mut_slice(), m.rows(), m.cols());
    res
}

impl<T: Copy + Default> Matrix<T> {
    /// See [`transpose`].
    pub fn transpose(&self) -> Matrix<T> {
        transpose(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swaps_shape_and_cells() {
        let m = Matrix::from_vec(2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let t = m.transpose();

        assert_eq!(t.shape(), (3, 2));
        for i in 0..t.rows() {
            for j in 0..t.cols() {
                assert_eq!(t[(i, j)], m[(j, i)]);
            }
        }
    }

    #[test]
    fn involution() {
        let m = Matrix::from_vec(3, 4, (0..12).map(|x| x as f64 * 0.5).collect()).unwrap();
        assert_eq!(m.transpose().transpose(), m);
    }

    #[test]
    #[should_panic(expected = "dst: expected 3x2=6 elements")]
    fn short_destination_panics() {
        let src = [1, 2, 3, 4, 5, 6];
        let mut dst = [0; 5];
        transpose_into(&src, &mut dst, 2, 3);
    }

    #[test]
    fn empty_and_vector_shapes() {
        let empty: Matrix<f64> = Matrix::new(0, 5);
        assert_eq!(empty.transpose().shape(), (5, 0));

        let row = Matrix::from_vec(1, 3, vec![1, 2, 3]).unwrap();
        let col = transpose(&row);
        assert_eq!(col.shape(), (3, 1));
        assert_eq!(col.as_slice(), &[1, 2, 3]);
    }
}
