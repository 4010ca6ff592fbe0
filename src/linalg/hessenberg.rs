use alloc::vec;

use crate::kernels::Reflector;
use crate::traits::{FloatScalar, MatrixMut};

/// Reduce a square matrix to upper Hessenberg form via Householder similarity
/// transforms: `Qᵀ A Q = H`.
///
/// On return:
/// - `a` is overwritten with `H` (entries below the subdiagonal are exactly zero)
/// - `q` accumulates the orthogonal transform when `vectors` is set, and
///   must hold the identity on entry in that case
///
/// The result satisfies `A = Q H Qᵀ`.
pub fn hessenberg<T: FloatScalar>(
    a: &mut impl MatrixMut<T>,
    q: &mut impl MatrixMut<T>,
    vectors: bool,
) {
    let n = a.nrows();
    assert_eq!(n, a.ncols(), "hessenberg requires a square matrix");

    let mut hv = vec![T::zero(); n];
    let mut work = vec![T::zero(); n];

    for k in 0..n.saturating_sub(2) {
        let len = n - k - 1;
        let alpha = *a.get(k + 1, k);
        let h = Reflector::generate(alpha, a.col_as_mut_slice(k, k + 2));
        if h.is_identity() {
            continue;
        }
        let hv = &mut hv[..len];
        hv[0] = T::one();
        hv[1..].copy_from_slice(a.col_as_slice(k, k + 2));

        *a.get_mut(k + 1, k) = h.beta;
        for x in a.col_as_mut_slice(k, k + 2) {
            *x = T::zero();
        }

        // H·A from the left on rows k+1.., then A·H from the right on all rows
        h.apply_left(a, hv, k + 1, k + 1..n);
        h.apply_right(a, hv, k + 1, 0..n, &mut work);
        if vectors {
            h.apply_right(q, hv, k + 1, 0..n, &mut work);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DenseMatrix;

    #[test]
    fn hessenberg_4x4() {
        let a = DenseMatrix::from_rows(
            4,
            4,
            &[
                4.0_f64, 1.0, -2.0, 2.0, 1.0, 2.0, 0.0, 1.0, -2.0, 0.0, 3.0, -2.0, 2.0, 1.0, -2.0,
                -1.0,
            ],
        );
        let mut h = a.clone();
        let mut q = DenseMatrix::identity(4);
        hessenberg(&mut h, &mut q, true);

        for j in 0..4 {
            for i in j + 2..4 {
                assert_eq!(h[(i, j)], 0.0, "H[{},{}] not zero", i, j);
            }
        }
        assert!(q.tr_matmul(&q).approx_eq(&DenseMatrix::identity(4), 1e-12));
        let rebuilt = &(&q * &h) * &q.transpose();
        assert!(rebuilt.approx_eq(&a, 1e-12));
    }

    #[test]
    fn nonsymmetric_5x5() {
        let a = DenseMatrix::from_fn(5, 5, |i, j| ((i * 7 + j * 3) % 11) as f64 - 5.0);
        let mut h = a.clone();
        let mut q = DenseMatrix::identity(5);
        hessenberg(&mut h, &mut q, true);
        let rebuilt = &(&q * &h) * &q.transpose();
        assert!(rebuilt.approx_eq(&a, 1e-12));
        // Trace is invariant under similarity
        assert!((h.trace() - a.trace()).abs() < 1e-12);
    }

    #[test]
    fn already_hessenberg_untouched() {
        let a = DenseMatrix::from_rows(3, 3, &[1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0, 0.0, 7.0, 8.0]);
        let mut h = a.clone();
        let mut q = DenseMatrix::identity(3);
        hessenberg(&mut h, &mut q, true);
        assert_eq!(h, a);
        assert_eq!(q, DenseMatrix::identity(3));
    }
}
