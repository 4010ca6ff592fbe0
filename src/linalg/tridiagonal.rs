//! Householder reduction of a symmetric matrix to tridiagonal form.

use alloc::vec;

use crate::kernels::{axpy_neg, dot, Reflector};
use crate::traits::{FloatScalar, MatrixMut};

/// Reduce the symmetric matrix `a` (n×n) to tridiagonal `T = Qᵀ A Q`.
///
/// Only the lower triangle of `a` is read; the strict upper triangle is
/// overwritten with its mirror before the reduction so the input is
/// symmetric by construction. On return `diag` (length n) and `offdiag`
/// (length n-1, `offdiag[k] = T[k+1, k]`) hold the tridiagonal, and `a`
/// holds unspecified values.
///
/// When `vectors` is set, `q` must be the n×n identity on entry and
/// receives `Q`.
pub fn tridiagonalize<T: FloatScalar>(
    a: &mut impl MatrixMut<T>,
    diag: &mut [T],
    offdiag: &mut [T],
    q: &mut impl MatrixMut<T>,
    vectors: bool,
) {
    let n = a.nrows();
    assert_eq!(a.ncols(), n, "tridiagonalize needs a square matrix");
    assert_eq!(diag.len(), n);
    assert_eq!(offdiag.len(), n.saturating_sub(1));
    if n == 0 {
        return;
    }

    for j in 0..n {
        for i in j + 1..n {
            *a.get_mut(j, i) = *a.get(i, j);
        }
    }

    let mut hv = vec![T::zero(); n];
    let mut w = vec![T::zero(); n];
    let mut work = vec![T::zero(); n];

    for k in 0..n - 1 {
        diag[k] = *a.get(k, k);
        let len = n - k - 1;
        let alpha = *a.get(k + 1, k);
        let h = Reflector::generate(alpha, a.col_as_mut_slice(k, k + 2));
        offdiag[k] = h.beta;
        if h.is_identity() {
            continue;
        }
        let hv = &mut hv[..len];
        let w = &mut w[..len];
        hv[0] = T::one();
        hv[1..].copy_from_slice(a.col_as_slice(k, k + 2));

        // p = tau * A22 * v
        for x in w.iter_mut() {
            *x = T::zero();
        }
        for (j, &vj) in hv.iter().enumerate() {
            axpy_neg(w, -vj, a.col_as_slice(k + 1 + j, k + 1));
        }
        for x in w.iter_mut() {
            *x = *x * h.tau;
        }
        // w = p - (tau/2)(pᵀv) v
        let gamma = h.tau * T::half() * dot(w, hv);
        axpy_neg(w, gamma, hv);

        // A22 -= v wᵀ + w vᵀ
        for j in 0..len {
            let col = a.col_as_mut_slice(k + 1 + j, k + 1);
            axpy_neg(col, w[j], hv);
            axpy_neg(col, hv[j], w);
        }

        if vectors {
            h.apply_right(q, hv, k + 1, 0..n, &mut work);
        }
    }
    diag[n - 1] = *a.get(n - 1, n - 1);
}
