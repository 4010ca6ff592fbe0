use crate::error::{LinalgError, Result};
use crate::traits::{split_cols, MatrixMut, MatrixRef};

/// Mutable column-major view over a caller-owned buffer.
///
/// Lets callers run the in-place routines on storage they already own
/// without copying it into a [`DenseMatrix`](super::DenseMatrix).
///
/// ```
/// use decompose::{MatrixViewMut, MatrixRef};
///
/// let mut buf = [1.0_f64, 3.0, 2.0, 4.0];
/// let view = MatrixViewMut::new(&mut buf, 2, 2).unwrap();
/// assert_eq!(*view.get(0, 1), 2.0);
/// ```
#[derive(Debug)]
pub struct MatrixViewMut<'a, T> {
    data: &'a mut [T],
    nrows: usize,
    ncols: usize,
}

impl<'a, T> MatrixViewMut<'a, T> {
    /// Wrap `data` as an `nrows x ncols` column-major matrix.
    ///
    /// Fails with [`LinalgError::BufferLength`] if the buffer is not exactly
    /// `nrows * ncols` long.
    pub fn new(data: &'a mut [T], nrows: usize, ncols: usize) -> Result<Self> {
        if data.len() != nrows * ncols {
            return Err(LinalgError::BufferLength {
                expected: nrows * ncols,
                got: data.len(),
            });
        }
        Ok(Self::from_parts(data, nrows, ncols))
    }

    pub(crate) fn from_parts(data: &'a mut [T], nrows: usize, ncols: usize) -> Self {
        debug_assert_eq!(data.len(), nrows * ncols);
        Self { data, nrows, ncols }
    }
}

impl<T> MatrixRef<T> for MatrixViewMut<'_, T> {
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
        debug_assert!(row < self.nrows);
        &self.data[col * self.nrows + row]
    }

    #[inline]
    fn col_as_slice(&self, col: usize, row_start: usize) -> &[T] {
        &self.data[col * self.nrows + row_start..(col + 1) * self.nrows]
    }
}

impl<T> MatrixMut<T> for MatrixViewMut<'_, T> {
    #[inline]
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T {
        debug_assert!(row < self.nrows);
        &mut self.data[col * self.nrows + row]
    }

    #[inline]
    fn col_as_mut_slice(&mut self, col: usize, row_start: usize) -> &mut [T] {
        let nrows = self.nrows;
        &mut self.data[col * nrows + row_start..(col + 1) * nrows]
    }

    #[inline]
    fn col_pair_mut(&mut self, a: usize, b: usize, row_start: usize) -> (&mut [T], &mut [T]) {
        split_cols(self.data, self.nrows, a, b, row_start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_caller_buffer() {
        let mut buf = [0.0_f64; 6];
        {
            let mut v = MatrixViewMut::new(&mut buf, 2, 3).unwrap();
            *v.get_mut(1, 2) = 9.0;
            assert_eq!(v.shape(), (2, 3));
        }
        assert_eq!(buf[5], 9.0);
    }

    #[test]
    fn rejects_wrong_length() {
        let mut buf = [0.0_f64; 5];
        let err = MatrixViewMut::new(&mut buf, 2, 3).unwrap_err();
        assert_eq!(err, LinalgError::BufferLength { expected: 6, got: 5 });
    }
}
