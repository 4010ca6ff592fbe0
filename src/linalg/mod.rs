//! The fallback decomposition engine.
//!
//! Each decomposition is a reduction to a structured form followed by an
//! iteration on that form:
//!
//! | Decomposition | Reduction | Iteration |
//! |---------------|-----------|-----------|
//! | SVD | [`bidiagonal`] | Golub–Kahan implicit-shift QR ([`svd`]) |
//! | symmetric eigen | [`tridiagonal`] | implicit QL, Wilkinson shift ([`symmetric_eigen`]) |
//! | general eigen | [`hessenberg`] | Francis double-shift QR ([`schur`]), back-substitution |
//!
//! General eigenvectors are recovered from the Schur form in [`eigen`].
//!
//! The reductions and iterations are written against [`MatrixMut`], so they
//! run on a [`DenseMatrix`](crate::DenseMatrix) or on a
//! [`MatrixViewMut`](crate::MatrixViewMut) over a caller buffer.

pub mod bidiagonal;
pub mod eigen;
pub mod hessenberg;
pub mod schur;
pub mod svd;
pub mod symmetric_eigen;
pub mod tridiagonal;

pub use eigen::{Eigen, EigenVectors, EigenvalueBlock};
pub use schur::Schur;
pub use svd::Svd;
pub use symmetric_eigen::SymmetricEigen;

use num_traits::ToPrimitive;

use crate::error::{LinalgError, Result};
use crate::traits::{FloatScalar, MatrixMut, MatrixRef};

/// Reject non-square input before any work is done.
#[inline]
pub(crate) fn check_square<T>(a: &impl MatrixRef<T>) -> Result<usize> {
    let (nrows, ncols) = a.shape();
    if nrows != ncols {
        return Err(LinalgError::NotSquare { nrows, ncols });
    }
    Ok(nrows)
}

/// Reject an output matrix whose extents differ from `expected`.
#[inline]
pub(crate) fn check_shape<T>(m: &impl MatrixRef<T>, expected: (usize, usize)) -> Result<()> {
    let got = m.shape();
    if got != expected {
        return Err(LinalgError::DimensionMismatch { expected, got });
    }
    Ok(())
}

/// Reject an output slice of the wrong length.
#[inline]
pub(crate) fn check_len<T>(s: &[T], expected: usize) -> Result<()> {
    if s.len() != expected {
        return Err(LinalgError::BufferLength {
            expected,
            got: s.len(),
        });
    }
    Ok(())
}

/// `|x| <= eps * (|a| + |b|)`, falling back to `eps * norm` when both
/// neighbours are exactly zero.
#[inline]
pub(crate) fn negligible<T: FloatScalar>(x: T, a: T, b: T, norm: T) -> bool {
    let mut scale = a.abs() + b.abs();
    if scale == T::zero() {
        scale = norm;
    }
    x.abs() <= T::eps() * scale
}

/// Exchange columns `a` and `b` over all rows.
#[inline]
pub(crate) fn swap_cols<T>(m: &mut impl MatrixMut<T>, a: usize, b: usize) {
    if a != b {
        let (x, y) = m.col_pair_mut(a, b, 0);
        x.swap_with_slice(y);
    }
}

/// Selection-sort `values` by `before`, calling `on_swap(i, k)` for every
/// exchange so the caller can permute vector columns alongside.
pub(crate) fn sort_values<T: FloatScalar>(
    values: &mut [T],
    before: impl Fn(T, T) -> bool,
    mut on_swap: impl FnMut(usize, usize),
) {
    let n = values.len();
    for i in 0..n {
        let mut best = i;
        for k in i + 1..n {
            if before(values[k], values[best]) {
                best = k;
            }
        }
        if best != i {
            values.swap(i, best);
            on_swap(i, best);
        }
    }
}

/// Power of two that brings `max |a_ij|` to roughly one.
///
/// One for a zero or non-finite matrix, and when the factor itself would
/// not be representable (subnormal input). Multiplying by the result is
/// exact, so scaled and unscaled runs round identically.
pub(crate) fn unit_scale<T: FloatScalar>(a: &impl MatrixRef<T>) -> T {
    let amax = (0..a.ncols()).fold(T::zero(), |acc, j| {
        a.col_as_slice(j, 0).iter().fold(acc, |m, x| m.max(x.abs()))
    });
    if amax == T::zero() || !amax.is_finite() {
        return T::one();
    }
    let Some(e) = amax.log2().floor().to_i32() else {
        return T::one();
    };
    let f = T::two().powi(-e);
    if f > T::zero() && f.is_finite() {
        f
    } else {
        T::one()
    }
}

/// Multiply every entry by `f`.
pub(crate) fn scale_entries<T: FloatScalar>(a: &mut impl MatrixMut<T>, f: T) {
    for j in 0..a.ncols() {
        for x in a.col_as_mut_slice(j, 0) {
            *x = *x * f;
        }
    }
}

/// Copy any matrix into an owned one.
pub(crate) fn to_dense<T: FloatScalar>(a: &impl MatrixRef<T>) -> crate::DenseMatrix<T> {
    crate::DenseMatrix::from_fn(a.nrows(), a.ncols(), |i, j| *a.get(i, j))
}
