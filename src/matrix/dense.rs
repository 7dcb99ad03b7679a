use std::fmt;
use std::ops::{Index, IndexMut};

use crate::MatrixError;

/// Dense matrix stored row-major in one contiguous buffer.
///
/// Element `(i, j)` lives at flat offset `i * cols + j`, and the buffer always
/// holds exactly `rows * cols` elements. `Clone` is a deep copy; taking the
/// matrix with [`std::mem::take`] leaves an empty `0 × 0` matrix behind.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> Default for Matrix<T> {
    fn default() -> Self {
        Self {
            rows: 0,
            cols: 0,
            data: Vec::new(),
        }
    }
}

/// `rows * cols`, panicking instead of wrapping.
fn cell_count(rows: usize, cols: usize) -> usize {
    rows.checked_mul(cols)
        .unwrap_or_else(|| panic!("capacity overflow: {rows}x{cols} cells do not fit in usize"))
}

impl<T: Copy + Default> Matrix<T> {
    /// A `rows × cols` matrix filled with `T::default()` (zero for numbers).
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![T::default(); cell_count(rows, cols)],
        }
    }

    /// Changes the logical shape to `rows × cols`.
    ///
    /// The allocation is kept when it is big enough and grown otherwise; it
    /// is never shrunk. Every cell of the new shape reads `T::default()`
    /// afterwards, so nothing from the previous shape shows through.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        let len = cell_count(rows, cols);
        self.data.clear();
        self.data.resize(len, T::default());
        self.rows = rows;
        self.cols = cols;
    }

    /// Element-wise conversion into another cell type.
    pub fn convert<U: From<T>>(&self) -> Matrix<U> {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&x| U::from(x)).collect(),
        }
    }
}

impl<T: Copy + Default + From<u8>> Matrix<T> {
    /// The `n × n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::new(n, n);
        for i in 0..n {
            m.data[i * n + i] = T::from(1);
        }
        m
    }
}

impl<T> Matrix<T> {
    /// Wraps an existing row-major buffer.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, MatrixError> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(MatrixError::BufferLength {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of cells, `rows * cols`.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Capacity of the backing allocation, in elements.
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Reference to cell `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= rows` or `col >= cols`.
    pub fn at(&self, row: usize, col: usize) -> &T {
        &self.data[self.offset(row, col)]
    }

    /// Mutable reference to cell `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= rows` or `col >= cols`.
    pub fn at_mut(&mut self, row: usize, col: usize) -> &mut T {
        let offset = self.offset(row, col);
        &mut self.data[offset]
    }

    /// Non-panicking form of [`at`](Self::at).
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// The `cols` cells of row `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= rows`.
    pub fn row(&self, row: usize) -> &[T] {
        assert!(row < self.rows, "row {row} out of range for {} rows", self.rows);
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Mutable view of row `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= rows`.
    pub fn row_mut(&mut self, row: usize) -> &mut [T] {
        assert!(row < self.rows, "row {row} out of range for {} rows", self.rows);
        &mut self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Row-major iterator over all cells.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    /// Exchanges shape and contents with `other` without copying cells.
    pub fn swap(&mut self, other: &mut Matrix<T>) {
        std::mem::swap(self, other);
    }

    fn offset(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of range for {}x{} matrix",
            self.rows,
            self.cols
        );
        row * self.cols + col
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        self.at(row, col)
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        self.at_mut(row, col)
    }
}

impl<'a, T> IntoIterator for &'a Matrix<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            let row = &self.data[i * self.cols..(i + 1) * self.cols];
            for (j, x) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{x}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
