//! Symmetric eigendecomposition: tridiagonalization + implicit QL.

use alloc::vec;
use alloc::vec::Vec;

use log::{debug, warn};

use super::tridiagonal::tridiagonalize;
use super::{check_len, check_shape, check_square, negligible, sort_values, swap_cols, to_dense};
use crate::config::DecompConfig;
use crate::dense::{set_identity, DenseMatrix};
use crate::error::{LinalgError, Operation, Result};
use crate::kernels::{hypot, rotate_pair, with_sign};
use crate::traits::{FloatScalar, MatrixMut, MatrixRef};

// ── SymmetricEigen wrapper ──────────────────────────────────────────

/// Eigendecomposition `A = Q Λ Qᵀ` of a real symmetric matrix.
///
/// Eigenvalues are sorted **ascending**; column `j` of `Q` is the unit
/// eigenvector for `eigenvalues()[j]` and `Q` is orthogonal. Only the lower
/// triangle of the input is read.
///
/// ```
/// use decompose::{DenseMatrix, SymmetricEigen};
///
/// let a = DenseMatrix::from_rows(2, 2, &[2.0_f64, 1.0, 1.0, 2.0]);
/// let eig = SymmetricEigen::new(&a).unwrap();
/// assert!((eig.eigenvalues()[0] - 1.0).abs() < 1e-12);
/// assert!((eig.eigenvalues()[1] - 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SymmetricEigen<T> {
    eigenvalues: Vec<T>,
    eigenvectors: DenseMatrix<T>,
}

impl<T: FloatScalar> SymmetricEigen<T> {
    pub fn new(a: &impl MatrixRef<T>) -> Result<Self> {
        Self::with_config(a, &DecompConfig::default())
    }

    /// Decompose with explicit iteration settings. Eigenvectors are always
    /// computed here; see [`eigenvalues_symmetric_with`] for values alone.
    pub fn with_config(a: &impl MatrixRef<T>, cfg: &DecompConfig) -> Result<Self> {
        let n = check_square(a)?;
        let mut work = to_dense(a);
        let mut w = vec![T::zero(); n];
        let mut q = DenseMatrix::zeros(n, n);
        eig_symmetric_into(&mut work, &mut w, &mut q, &cfg.compute_vectors(true))?;
        Ok(Self::from_parts(w, q))
    }

    pub(crate) fn from_parts(eigenvalues: Vec<T>, eigenvectors: DenseMatrix<T>) -> Self {
        Self {
            eigenvalues,
            eigenvectors,
        }
    }

    #[inline]
    pub fn eigenvalues(&self) -> &[T] {
        &self.eigenvalues
    }

    #[inline]
    pub fn eigenvectors(&self) -> &DenseMatrix<T> {
        &self.eigenvectors
    }

    /// `Q · diag(λ) · Qᵀ`.
    pub fn reconstruct(&self) -> DenseMatrix<T> {
        let mut ql = self.eigenvectors.clone();
        for (j, &lj) in self.eigenvalues.iter().enumerate() {
            for x in ql.col_as_mut_slice(j, 0) {
                *x = *x * lj;
            }
        }
        ql.matmul(&self.eigenvectors.transpose())
    }

    pub fn into_parts(self) -> (Vec<T>, DenseMatrix<T>) {
        (self.eigenvalues, self.eigenvectors)
    }
}

// ── Drivers ─────────────────────────────────────────────────────────

/// Eigenvalues of a symmetric matrix, ascending.
pub fn eigenvalues_symmetric<T: FloatScalar>(a: &impl MatrixRef<T>) -> Result<Vec<T>> {
    eigenvalues_symmetric_with(a, &DecompConfig::default())
}

pub fn eigenvalues_symmetric_with<T: FloatScalar>(
    a: &impl MatrixRef<T>,
    cfg: &DecompConfig,
) -> Result<Vec<T>> {
    let n = check_square(a)?;
    let mut work = to_dense(a);
    let mut w = vec![T::zero(); n];
    let mut none = DenseMatrix::zeros(0, 0);
    eig_symmetric_into(&mut work, &mut w, &mut none, &cfg.compute_vectors(false))?;
    Ok(w)
}

/// Symmetric eigendecomposition into caller-owned buffers.
///
/// `a` (n×n) is read through its lower triangle and used as workspace.
/// `w` receives the eigenvalues in ascending order. When
/// `cfg.compute_vectors` is set, `q` must be n×n and receives the
/// matching orthonormal eigenvectors as columns; otherwise it is ignored.
pub fn eig_symmetric_into<T: FloatScalar>(
    a: &mut impl MatrixMut<T>,
    w: &mut [T],
    q: &mut impl MatrixMut<T>,
    cfg: &DecompConfig,
) -> Result<()> {
    let n = check_square(a)?;
    check_len(w, n)?;
    let vectors = cfg.compute_vectors;
    if vectors {
        check_shape(q, (n, n))?;
        set_identity(q);
    }
    if n == 0 {
        return Ok(());
    }

    let mut e = vec![T::zero(); n - 1];
    tridiagonalize(a, w, &mut e, q, vectors);
    let sweeps = implicit_ql(w, &mut e, q, vectors, cfg)?;
    sort_values(w, |x, y| x < y, |i, k| {
        if vectors {
            swap_cols(q, i, k);
        }
    });
    debug!("symmetric eigen {}x{}: converged after {} sweeps", n, n, sweeps);
    Ok(())
}

// ── Implicit QL ─────────────────────────────────────────────────────

/// Diagonalize the symmetric tridiagonal `(d, e)` by implicit QL sweeps
/// with a Wilkinson shift.
///
/// `e` (length n-1, coupling `d[i]` and `d[i+1]`) is destroyed. Rotations
/// are accumulated into the columns of `q` when `vectors` is set. Values
/// are left unsorted. Returns the number of sweeps performed.
pub fn implicit_ql<T: FloatScalar>(
    d: &mut [T],
    e: &mut [T],
    q: &mut impl MatrixMut<T>,
    vectors: bool,
    cfg: &DecompConfig,
) -> Result<usize> {
    let n = d.len();
    if n <= 1 {
        return Ok(0);
    }
    debug_assert_eq!(e.len(), n - 1);

    // One trailing slot so the chase can park its last rotation result.
    let mut off = vec![T::zero(); n];
    off[..n - 1].copy_from_slice(e);

    let norm = d
        .iter()
        .chain(e.iter())
        .fold(T::zero(), |acc, &x| acc.max(x.abs()));
    let max_sweeps = cfg.max_sweeps(n);
    let mut sweeps = 0;

    for l in 0..n {
        loop {
            let mut m = l;
            while m + 1 < n && !negligible(off[m], d[m], d[m + 1], norm) {
                m += 1;
            }
            if m == l {
                break;
            }
            if sweeps >= max_sweeps {
                warn!(
                    "symmetric eigen: no convergence after {} sweeps at index {}",
                    sweeps, l
                );
                return Err(LinalgError::NoConvergence {
                    op: Operation::SymmetricEigen,
                    iterations: sweeps,
                });
            }
            sweeps += 1;

            // Wilkinson shift from the leading 2×2 of the block
            let two = T::two();
            let mut g = (d[l + 1] - d[l]) / (two * off[l]);
            let mut r = hypot(g, T::one());
            g = d[m] - d[l] + off[l] / (g + with_sign(r, g));

            let (mut s, mut c, mut p) = (T::one(), T::one(), T::zero());
            let mut underflow = false;
            for i in (l..m).rev() {
                let f = s * off[i];
                let b = c * off[i];
                r = hypot(f, g);
                off[i + 1] = r;
                if r == T::zero() {
                    // Recover from underflow: the block splits at i+1
                    d[i + 1] = d[i + 1] - p;
                    off[m] = T::zero();
                    underflow = true;
                    break;
                }
                s = f / r;
                c = g / r;
                g = d[i + 1] - p;
                r = (d[i] - g) * s + two * c * b;
                p = s * r;
                d[i + 1] = g + p;
                g = c * r - b;
                if vectors {
                    let (x, y) = q.col_pair_mut(i, i + 1, 0);
                    rotate_pair(x, y, c, -s);
                }
            }
            if underflow {
                continue;
            }
            d[l] = d[l] - p;
            off[l] = g;
            off[m] = T::zero();
        }
    }

    e.copy_from_slice(&off[..n - 1]);
    Ok(sweeps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MatrixViewMut;

    fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
        assert!(
            (a - b).abs() < tol,
            "{}: {} vs {} (diff {})",
            msg,
            a,
            b,
            (a - b).abs()
        );
    }

    fn check(a: &DenseMatrix<f64>) -> SymmetricEigen<f64> {
        let eig = SymmetricEigen::new(a).unwrap();
        let n = a.nrows();
        let q = eig.eigenvectors();
        assert!(q.tr_matmul(q).approx_eq(&DenseMatrix::identity(n), 1e-12));
        // A Q = Q Λ
        let aq = a.matmul(q);
        for j in 0..n {
            for i in 0..n {
                assert_near(aq[(i, j)], q[(i, j)] * eig.eigenvalues()[j], 1e-11, "A q = λ q");
            }
        }
        for pair in eig.eigenvalues().windows(2) {
            assert!(pair[0] <= pair[1], "not ascending: {:?}", eig.eigenvalues());
        }
        eig
    }

    #[test]
    fn identity() {
        let eig = check(&DenseMatrix::identity(3));
        assert_eq!(eig.eigenvalues(), &[1.0, 1.0, 1.0]);
    }

    #[test]
    fn diagonal_sorted_ascending() {
        let a = DenseMatrix::from_diagonal(&[5.0, -1.0, 3.0]);
        let eig = check(&a);
        assert_eq!(eig.eigenvalues(), &[-1.0, 3.0, 5.0]);
        // Eigenvectors are the permuted unit vectors
        assert_eq!(eig.eigenvectors()[(1, 0)].abs(), 1.0);
        assert_eq!(eig.eigenvectors()[(2, 1)].abs(), 1.0);
        assert_eq!(eig.eigenvectors()[(0, 2)].abs(), 1.0);
    }

    #[test]
    fn known_3x3() {
        // Eigenvalues 2 - √2, 2, 2 + √2
        let a = DenseMatrix::from_rows(3, 3, &[2.0, -1.0, 0.0, -1.0, 2.0, -1.0, 0.0, -1.0, 2.0]);
        let eig = check(&a);
        let s2 = 2.0_f64.sqrt();
        assert_near(eig.eigenvalues()[0], 2.0 - s2, 1e-12, "λ0");
        assert_near(eig.eigenvalues()[1], 2.0, 1e-12, "λ1");
        assert_near(eig.eigenvalues()[2], 2.0 + s2, 1e-12, "λ2");
    }

    #[test]
    fn repeated_eigenvalues() {
        // All-ones 4x4: eigenvalues 0, 0, 0, 4
        let a = DenseMatrix::from_fn(4, 4, |_, _| 1.0);
        let eig = check(&a);
        assert_near(eig.eigenvalues()[3], 4.0, 1e-12, "λmax");
        for &l in &eig.eigenvalues()[..3] {
            assert_near(l, 0.0, 1e-12, "zero eigenvalue");
        }
        assert!(eig.reconstruct().approx_eq(&a, 1e-12));
    }

    #[test]
    fn one_by_one_and_empty() {
        let eig = check(&DenseMatrix::from_rows(1, 1, &[-7.0]));
        assert_eq!(eig.eigenvalues(), &[-7.0]);
        assert_eq!(eig.eigenvectors()[(0, 0)], 1.0);

        let empty = SymmetricEigen::new(&DenseMatrix::<f64>::zeros(0, 0)).unwrap();
        assert!(empty.eigenvalues().is_empty());
    }

    #[test]
    fn zero_matrix() {
        let eig = check(&DenseMatrix::zeros(3, 3));
        assert_eq!(eig.eigenvalues(), &[0.0, 0.0, 0.0]);
        assert_eq!(eig.eigenvectors(), &DenseMatrix::identity(3));
    }

    #[test]
    fn values_only_and_into() {
        let a = DenseMatrix::from_rows(3, 3, &[4.0, 1.0, 2.0, 1.0, 3.0, 0.0, 2.0, 0.0, 5.0]);
        let full = check(&a);
        let vals = eigenvalues_symmetric(&a).unwrap();
        for (x, y) in vals.iter().zip(full.eigenvalues()) {
            assert_near(*x, *y, 1e-12, "values-only");
        }

        let mut buf = a.clone().into_vec();
        let mut view = MatrixViewMut::new(&mut buf, 3, 3).unwrap();
        let mut w = [0.0; 3];
        let mut q = DenseMatrix::zeros(3, 3);
        eig_symmetric_into(&mut view, &mut w, &mut q, &DecompConfig::default()).unwrap();
        for (x, y) in w.iter().zip(full.eigenvalues()) {
            assert_near(*x, *y, 1e-12, "into");
        }
    }

    #[test]
    fn rejects_bad_shapes() {
        let rect = DenseMatrix::<f64>::zeros(2, 3);
        assert_eq!(
            SymmetricEigen::new(&rect).unwrap_err(),
            LinalgError::NotSquare { nrows: 2, ncols: 3 }
        );

        let mut a = DenseMatrix::<f64>::identity(3);
        let mut w = [0.0; 3];
        let mut q = DenseMatrix::zeros(3, 2);
        assert_eq!(
            eig_symmetric_into(&mut a, &mut w, &mut q, &DecompConfig::default()),
            Err(LinalgError::DimensionMismatch {
                expected: (3, 3),
                got: (3, 2)
            })
        );
    }

    #[test]
    fn zero_budget_reports_no_convergence() {
        let a = DenseMatrix::from_rows(2, 2, &[2.0, 1.0, 1.0, 2.0]);
        let cfg = DecompConfig::default().sweeps_per_dim(0);
        assert_eq!(
            SymmetricEigen::with_config(&a, &cfg).unwrap_err(),
            LinalgError::NoConvergence {
                op: Operation::SymmetricEigen,
                iterations: 0
            }
        );
    }
}
