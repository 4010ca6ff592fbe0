//! Householder reduction of a tall matrix to upper bidiagonal form.

use alloc::vec;

use crate::kernels::Reflector;
use crate::traits::{FloatScalar, MatrixMut};

/// Reduce `a` (m×n, m ≥ n) to upper bidiagonal `B = Uᵀ A V`.
///
/// On return `diag` (length n) and `superdiag` (length n-1) hold `B`, and
/// `a` holds the reduced matrix with everything outside the two bands
/// cleared. When `vectors` is set, `u` (m×m) and `v` (n×n) must hold the
/// identity on entry and accumulate the left and right reflections so that
/// `A = U B Vᵀ`; otherwise they are not touched and may be empty.
///
/// Column `k` and row `k` are handled alternately: a left reflection zeroes
/// column `k` below the diagonal, then a right reflection zeroes row `k`
/// right of the superdiagonal. An already-zero segment gives the identity
/// reflection.
///
/// Panics if `m < n` or the band slices have the wrong length.
pub fn bidiagonalize<T: FloatScalar>(
    a: &mut impl MatrixMut<T>,
    diag: &mut [T],
    superdiag: &mut [T],
    u: &mut impl MatrixMut<T>,
    v: &mut impl MatrixMut<T>,
    vectors: bool,
) {
    let (m, n) = (a.nrows(), a.ncols());
    assert!(m >= n, "bidiagonalize needs m >= n, got {}x{}", m, n);
    assert_eq!(diag.len(), n);
    assert_eq!(superdiag.len(), n.saturating_sub(1));

    let mut hv = vec![T::zero(); m.max(n)];
    let mut work = vec![T::zero(); m.max(n)];

    for k in 0..n {
        // Left: zero A[k+1.., k]
        let alpha = *a.get(k, k);
        let h = Reflector::generate(alpha, a.col_as_mut_slice(k, k + 1));
        diag[k] = h.beta;
        let len = m - k;
        hv[0] = T::one();
        hv[1..len].copy_from_slice(a.col_as_slice(k, k + 1));
        h.apply_left(a, &hv[..len], k, k + 1..n);
        if vectors {
            h.apply_right(u, &hv[..len], k, 0..m, &mut work);
        }
        *a.get_mut(k, k) = h.beta;
        for x in a.col_as_mut_slice(k, k + 1) {
            *x = T::zero();
        }

        if k + 1 >= n {
            continue;
        }

        // Right: zero A[k, k+2..]
        let len = n - k - 1;
        for (i, x) in hv[..len].iter_mut().enumerate() {
            *x = *a.get(k, k + 1 + i);
        }
        let h = Reflector::generate(hv[0], &mut hv[1..len]);
        superdiag[k] = h.beta;
        hv[0] = T::one();
        h.apply_right(a, &hv[..len], k + 1, k + 1..m, &mut work);
        if vectors {
            h.apply_right(v, &hv[..len], k + 1, 0..n, &mut work);
        }
        *a.get_mut(k, k + 1) = h.beta;
        for j in k + 2..n {
            *a.get_mut(k, j) = T::zero();
        }
    }
}
