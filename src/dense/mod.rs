mod ops;
mod view;

pub use view::MatrixViewMut;

use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use crate::error::{LinalgError, Result};
use crate::traits::{split_cols, FloatScalar, MatrixMut, MatrixRef, Scalar};

/// Dynamically-sized heap-allocated matrix.
///
/// Column-major `Vec<T>` storage. Implements [`MatrixRef`] and
/// [`MatrixMut`], so every reduction in [`crate::linalg`] accepts it
/// directly.
///
/// ```
/// use decompose::DenseMatrix;
///
/// let a = DenseMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
/// assert_eq!(a[(0, 1)], 2.0);
/// assert_eq!(a.nrows(), 2);
///
/// let id = DenseMatrix::<f64>::identity(3);
/// assert_eq!(id[(2, 2)], 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix<T> {
    data: Vec<T>,
    nrows: usize,
    ncols: usize,
}

// ── Constructors ────────────────────────────────────────────────────

impl<T: Scalar> DenseMatrix<T> {
    /// `nrows x ncols` matrix of zeros.
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self {
            data: vec![T::zero(); nrows * ncols],
            nrows,
            ncols,
        }
    }

    /// `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        m.set_identity();
        m
    }

    /// Square matrix with `diag` on the diagonal.
    ///
    /// ```
    /// use decompose::DenseMatrix;
    /// let d = DenseMatrix::from_diagonal(&[3.0_f64, 4.0]);
    /// assert_eq!(d[(1, 1)], 4.0);
    /// assert_eq!(d[(0, 1)], 0.0);
    /// ```
    pub fn from_diagonal(diag: &[T]) -> Self {
        let n = diag.len();
        let mut m = Self::zeros(n, n);
        for (i, &d) in diag.iter().enumerate() {
            m[(i, i)] = d;
        }
        m
    }

    /// Build from a row-major slice.
    ///
    /// Panics if `row_major.len() != nrows * ncols`.
    ///
    /// ```
    /// use decompose::DenseMatrix;
    /// let m = DenseMatrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// assert_eq!(m[(0, 2)], 3.0);
    /// assert_eq!(m[(1, 0)], 4.0);
    /// ```
    pub fn from_rows(nrows: usize, ncols: usize, row_major: &[T]) -> Self {
        assert_eq!(
            row_major.len(),
            nrows * ncols,
            "slice length {} does not match {}x{} matrix",
            row_major.len(),
            nrows,
            ncols,
        );
        Self::from_fn(nrows, ncols, |i, j| row_major[i * ncols + j])
    }

    /// Take ownership of a column-major buffer.
    ///
    /// ```
    /// use decompose::DenseMatrix;
    /// // col0 = [1, 3], col1 = [2, 4]
    /// let m = DenseMatrix::from_col_major(2, 2, vec![1.0, 3.0, 2.0, 4.0]).unwrap();
    /// assert_eq!(m[(0, 1)], 2.0);
    /// ```
    pub fn from_col_major(nrows: usize, ncols: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != nrows * ncols {
            return Err(LinalgError::BufferLength {
                expected: nrows * ncols,
                got: data.len(),
            });
        }
        Ok(Self { data, nrows, ncols })
    }

    /// Reset to the identity (zeros off the diagonal for non-square shapes).
    pub fn set_identity(&mut self) {
        set_identity(self);
    }

    /// Transposed copy.
    pub fn transpose(&self) -> Self {
        Self::from_fn(self.ncols, self.nrows, |i, j| self[(j, i)])
    }

    /// Copy of the leading `nrows x ncols` block.
    pub fn top_left(&self, nrows: usize, ncols: usize) -> Self {
        assert!(nrows <= self.nrows && ncols <= self.ncols, "block out of range");
        Self::from_fn(nrows, ncols, |i, j| self[(i, j)])
    }

    /// The main diagonal.
    pub fn diagonal(&self) -> Vec<T> {
        (0..self.nrows.min(self.ncols)).map(|i| self[(i, i)]).collect()
    }

    /// Sum of the diagonal.
    pub fn trace(&self) -> T {
        self.diagonal().into_iter().fold(T::zero(), |acc, d| acc + d)
    }
}

impl<T> DenseMatrix<T> {
    /// Number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Whether the matrix is square.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// Whether either dimension is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nrows == 0 || self.ncols == 0
    }

    /// Column-major backing storage.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable column-major backing storage.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Column `j` as a contiguous slice.
    #[inline]
    pub fn column(&self, j: usize) -> &[T] {
        &self.data[j * self.nrows..(j + 1) * self.nrows]
    }

    /// Borrow as a [`MatrixViewMut`].
    pub fn view_mut(&mut self) -> MatrixViewMut<'_, T> {
        MatrixViewMut::from_parts(&mut self.data, self.nrows, self.ncols)
    }

    /// Consume into the column-major buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Build by calling `f(row, col)` for each element.
    ///
    /// ```
    /// use decompose::DenseMatrix;
    /// let m = DenseMatrix::from_fn(2, 2, |i, j| (i * 2 + j) as f64);
    /// assert_eq!(m[(1, 0)], 2.0);
    /// ```
    pub fn from_fn(nrows: usize, ncols: usize, f: impl Fn(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(nrows * ncols);
        for j in 0..ncols {
            for i in 0..nrows {
                data.push(f(i, j));
            }
        }
        Self { data, nrows, ncols }
    }
}

impl<T: FloatScalar> DenseMatrix<T> {
    /// Frobenius norm, accumulated with scaling so it cannot overflow.
    pub fn frobenius_norm(&self) -> T {
        crate::kernels::norm2(&self.data)
    }

    /// Largest absolute entry.
    pub fn max_abs(&self) -> T {
        self.data
            .iter()
            .fold(T::zero(), |acc, &x| if x.abs() > acc { x.abs() } else { acc })
    }

    /// Whether the matrix equals its transpose within `tol`.
    pub fn is_symmetric(&self, tol: T) -> bool {
        if !self.is_square() {
            return false;
        }
        for j in 0..self.ncols {
            for i in (j + 1)..self.nrows {
                if (self[(i, j)] - self[(j, i)]).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Whether `self` and `other` agree elementwise within `tol`.
    pub fn approx_eq(&self, other: &Self, tol: T) -> bool {
        self.nrows == other.nrows
            && self.ncols == other.ncols
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(&a, &b)| (a - b).abs() <= tol)
    }
}

/// Overwrite `m` with the identity pattern.
pub(crate) fn set_identity<T: Scalar>(m: &mut impl MatrixMut<T>) {
    for j in 0..m.ncols() {
        for x in m.col_as_mut_slice(j, 0).iter_mut() {
            *x = T::zero();
        }
        if j < m.nrows() {
            *m.get_mut(j, j) = T::one();
        }
    }
}

// ── MatrixRef / MatrixMut ───────────────────────────────────────────

impl<T> MatrixRef<T> for DenseMatrix<T> {
    #[inline]
    fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.ncols
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> &T {
        &self.data[col * self.nrows + row]
    }

    #[inline]
    fn col_as_slice(&self, col: usize, row_start: usize) -> &[T] {
        &self.data[col * self.nrows + row_start..(col + 1) * self.nrows]
    }
}

impl<T> MatrixMut<T> for DenseMatrix<T> {
    #[inline]
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T {
        &mut self.data[col * self.nrows + row]
    }

    #[inline]
    fn col_as_mut_slice(&mut self, col: usize, row_start: usize) -> &mut [T] {
        let nrows = self.nrows;
        &mut self.data[col * nrows + row_start..(col + 1) * nrows]
    }

    #[inline]
    fn col_pair_mut(&mut self, a: usize, b: usize, row_start: usize) -> (&mut [T], &mut [T]) {
        split_cols(&mut self.data, self.nrows, a, b, row_start)
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl<T> Index<(usize, usize)> for DenseMatrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(
            row < self.nrows && col < self.ncols,
            "index ({row}, {col}) out of bounds for {}x{} matrix",
            self.nrows,
            self.ncols
        );
        &self.data[col * self.nrows + row]
    }
}

impl<T> IndexMut<(usize, usize)> for DenseMatrix<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(
            row < self.nrows && col < self.ncols,
            "index ({row}, {col}) out of bounds for {}x{} matrix",
            self.nrows,
            self.ncols
        );
        &mut self.data[col * self.nrows + row]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeros_and_identity() {
        let z = DenseMatrix::<f64>::zeros(3, 4);
        assert_eq!(z.nrows(), 3);
        assert_eq!(z.ncols(), 4);
        assert!(z.as_slice().iter().all(|&x| x == 0.0));

        let id = DenseMatrix::<f64>::identity(3);
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(id[(i, j)], if i == j { 1.0 } else { 0.0 });
            }
        }
    }

    #[test]
    fn from_rows_is_row_major() {
        let m = DenseMatrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(m[(0, 0)], 1.0);
        assert_eq!(m[(0, 2)], 3.0);
        assert_eq!(m[(1, 0)], 4.0);
        assert_eq!(m.column(1), &[2.0, 5.0]);
    }

    #[test]
    #[should_panic(expected = "slice length")]
    fn from_rows_wrong_length() {
        let _ = DenseMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn from_col_major_checks_length() {
        let err = DenseMatrix::from_col_major(2, 2, alloc::vec![1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(err, LinalgError::BufferLength { expected: 4, got: 3 });
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn index_checks_bounds() {
        let m = DenseMatrix::<f64>::zeros(2, 2);
        let _ = m[(2, 0)];
    }

    #[test]
    fn try_get_bounds() {
        let m = DenseMatrix::from_rows(1, 2, &[5.0, 6.0]);
        assert_eq!(m.try_get(0, 1), Some(&6.0));
        assert_eq!(m.try_get(1, 0), None);
    }

    #[test]
    fn transpose_and_trace() {
        let m = DenseMatrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let t = m.transpose();
        assert_eq!(t.nrows(), 3);
        assert_eq!(t[(2, 1)], 6.0);
        let sq = DenseMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(sq.trace(), 5.0);
        assert_eq!(sq.diagonal(), alloc::vec![1.0, 4.0]);
    }

    #[test]
    fn symmetric_check() {
        let s = DenseMatrix::from_rows(2, 2, &[1.0, 2.0, 2.0, 1.0]);
        assert!(s.is_symmetric(0.0));
        let n = DenseMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 1.0]);
        assert!(!n.is_symmetric(1e-12));
    }

    #[test]
    fn col_pair_mut_writes_through() {
        let mut m = DenseMatrix::<f64>::zeros(2, 3);
        {
            let (a, b) = m.col_pair_mut(2, 0, 0);
            a[1] = 7.0;
            b[0] = 3.0;
        }
        assert_eq!(m[(1, 2)], 7.0);
        assert_eq!(m[(0, 0)], 3.0);
    }

    #[test]
    fn frobenius_norm() {
        let m = DenseMatrix::from_rows(2, 2, &[3.0_f64, 0.0, 0.0, 4.0]);
        assert!((m.frobenius_norm() - 5.0).abs() < 1e-15);
        assert_eq!(m.max_abs(), 4.0);
    }
}
