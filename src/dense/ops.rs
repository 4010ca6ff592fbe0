use core::ops::{Mul, Sub};

use crate::traits::Scalar;

use super::DenseMatrix;

impl<T: Scalar> DenseMatrix<T> {
    /// Matrix product `self * rhs`.
    ///
    /// Panics on inner-dimension mismatch.
    ///
    /// ```
    /// use decompose::DenseMatrix;
    /// let a = DenseMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// let id = DenseMatrix::identity(2);
    /// assert_eq!(a.matmul(&id), a);
    /// ```
    pub fn matmul(&self, rhs: &DenseMatrix<T>) -> DenseMatrix<T> {
        assert_eq!(
            self.ncols, rhs.nrows,
            "dimension mismatch: {}x{} * {}x{}",
            self.nrows, self.ncols, rhs.nrows, rhs.ncols,
        );
        let m = self.nrows;
        let mut out = DenseMatrix::zeros(m, rhs.ncols);
        // C[:, j] += A[:, k] * B[k, j], streaming contiguous columns
        for j in 0..rhs.ncols {
            for k in 0..self.ncols {
                let b_kj = rhs.data[j * rhs.nrows + k];
                if b_kj == T::zero() {
                    continue;
                }
                let a_col = &self.data[k * m..(k + 1) * m];
                let c_col = &mut out.data[j * m..(j + 1) * m];
                for (c, &a) in c_col.iter_mut().zip(a_col) {
                    *c = *c + a * b_kj;
                }
            }
        }
        out
    }

    /// `selfᵀ * rhs` without forming the transpose.
    pub fn tr_matmul(&self, rhs: &DenseMatrix<T>) -> DenseMatrix<T> {
        assert_eq!(
            self.nrows, rhs.nrows,
            "dimension mismatch: ({}x{})ᵀ * {}x{}",
            self.nrows, self.ncols, rhs.nrows, rhs.ncols,
        );
        DenseMatrix::from_fn(self.ncols, rhs.ncols, |i, j| {
            self.column(i)
                .iter()
                .zip(rhs.column(j))
                .fold(T::zero(), |acc, (&a, &b)| acc + a * b)
        })
    }
}

impl<T: Scalar> Mul for &DenseMatrix<T> {
    type Output = DenseMatrix<T>;

    fn mul(self, rhs: &DenseMatrix<T>) -> DenseMatrix<T> {
        self.matmul(rhs)
    }
}

impl<T: Scalar> Sub for &DenseMatrix<T> {
    type Output = DenseMatrix<T>;

    fn sub(self, rhs: &DenseMatrix<T>) -> DenseMatrix<T> {
        assert_eq!(
            (self.nrows, self.ncols),
            (rhs.nrows, rhs.ncols),
            "dimension mismatch: {}x{} - {}x{}",
            self.nrows, self.ncols, rhs.nrows, rhs.ncols,
        );
        let data = self
            .data
            .iter()
            .zip(rhs.data.iter())
            .map(|(&a, &b)| a - b)
            .collect();
        DenseMatrix {
            data,
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }
}
