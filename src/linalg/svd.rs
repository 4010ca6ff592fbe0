//! Singular value decomposition by Golub–Kahan implicit-shift QR.
//!
//! The matrix is first reduced to upper bidiagonal form
//! ([`bidiagonalize`]), then the bidiagonal is driven to diagonal form by
//! implicit QR sweeps. Each sweep uses a Wilkinson shift taken from the
//! trailing 2×2 of `BᵀB` and chases the resulting bulge down the band with
//! Givens rotations, which are accumulated into `U` and `V`.
//!
//! Tall and wide inputs are both accepted: a wide matrix is decomposed
//! through its transpose and the roles of `U` and `V` are exchanged.

use alloc::vec;
use alloc::vec::Vec;

use log::{debug, warn};

use super::bidiagonal::bidiagonalize;
use super::{
    check_len, check_shape, negligible, scale_entries, sort_values, swap_cols, to_dense, unit_scale,
};
use crate::config::DecompConfig;
use crate::dense::{set_identity, DenseMatrix};
use crate::error::{LinalgError, Operation, Result};
use crate::kernels::{hypot, with_sign, Givens};
use crate::traits::{FloatScalar, MatrixMut, MatrixRef};

// ── SVD wrapper ─────────────────────────────────────────────────────

/// Thin singular value decomposition `A = U Σ Vᵀ`.
///
/// For an m×n matrix with `k = min(m, n)`: `U` is m×k with orthonormal
/// columns, `Σ` holds `k` non-negative values in descending order, and
/// `Vᵀ` is k×n with orthonormal rows.
///
/// ```
/// use decompose::{DenseMatrix, Svd};
///
/// let a = DenseMatrix::from_rows(3, 2, &[3.0_f64, 0.0, 0.0, 4.0, 0.0, 0.0]);
/// let svd = Svd::new(&a).unwrap();
/// assert!((svd.singular_values()[0] - 4.0).abs() < 1e-12);
/// assert!((svd.singular_values()[1] - 3.0).abs() < 1e-12);
/// assert!(svd.reconstruct().approx_eq(&a, 1e-12));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Svd<T> {
    u: DenseMatrix<T>,
    s: Vec<T>,
    vt: DenseMatrix<T>,
}

impl<T: FloatScalar> Svd<T> {
    /// Decompose with the default [`DecompConfig`].
    pub fn new(a: &impl MatrixRef<T>) -> Result<Self> {
        Self::with_config(a, &DecompConfig::default())
    }

    /// Decompose with explicit iteration settings.
    ///
    /// Singular vectors are always computed here; use
    /// [`singular_values_with`] for the values alone.
    pub fn with_config(a: &impl MatrixRef<T>, cfg: &DecompConfig) -> Result<Self> {
        let (m, n) = a.shape();
        let (u, s, v) = svd_full(a, cfg)?;
        let k = s.len();
        Ok(Self::from_parts(u.top_left(m, k), s, v.top_left(n, k).transpose()))
    }

    /// Build from already-computed thin factors.
    ///
    /// Used by native backends after translating their output.
    pub(crate) fn from_parts(u: DenseMatrix<T>, s: Vec<T>, vt: DenseMatrix<T>) -> Self {
        Self { u, s, vt }
    }

    /// Left singular vectors (m×k).
    #[inline]
    pub fn u(&self) -> &DenseMatrix<T> {
        &self.u
    }

    /// Singular values, descending.
    #[inline]
    pub fn singular_values(&self) -> &[T] {
        &self.s
    }

    /// Right singular vectors, transposed (k×n).
    #[inline]
    pub fn vt(&self) -> &DenseMatrix<T> {
        &self.vt
    }

    /// Right singular vectors as columns (n×k).
    pub fn v(&self) -> DenseMatrix<T> {
        self.vt.transpose()
    }

    /// Number of singular values above `max(m, n) · ε · σ_max`.
    pub fn rank(&self) -> usize {
        let dim = self.u.nrows().max(self.vt.ncols());
        let tol = T::eps() * T::lit(dim as f64) * self.norm2();
        self.rank_with_tol(tol)
    }

    /// Number of singular values strictly above `tol`.
    pub fn rank_with_tol(&self, tol: T) -> usize {
        self.s.iter().filter(|&&x| x > tol).count()
    }

    /// Spectral norm `σ_max` (zero for an empty matrix).
    pub fn norm2(&self) -> T {
        self.s.first().copied().unwrap_or_else(T::zero)
    }

    /// 2-norm condition number `σ_max / σ_min`.
    ///
    /// Infinite when the smallest singular value is zero, zero for an empty
    /// matrix.
    pub fn condition_number(&self) -> T {
        match (self.s.first(), self.s.last()) {
            (Some(&hi), Some(&lo)) if lo > T::zero() => hi / lo,
            (Some(_), Some(_)) => T::infinity(),
            _ => T::zero(),
        }
    }

    /// `U · diag(σ) · Vᵀ`.
    pub fn reconstruct(&self) -> DenseMatrix<T> {
        let mut us = self.u.clone();
        for (j, &sj) in self.s.iter().enumerate() {
            for x in us.col_as_mut_slice(j, 0) {
                *x = *x * sj;
            }
        }
        us.matmul(&self.vt)
    }

    /// `(U, σ, Vᵀ)`.
    pub fn into_parts(self) -> (DenseMatrix<T>, Vec<T>, DenseMatrix<T>) {
        (self.u, self.s, self.vt)
    }
}

// ── Drivers ─────────────────────────────────────────────────────────

/// Full decomposition: `U` (m×m), `σ` (min(m,n)), `V` (n×n) with
/// `A = U Σ Vᵀ`.
pub fn svd_full<T: FloatScalar>(
    a: &impl MatrixRef<T>,
    cfg: &DecompConfig,
) -> Result<(DenseMatrix<T>, Vec<T>, DenseMatrix<T>)> {
    let (m, n) = a.shape();
    let mut work = to_dense(a);
    let mut s = vec![T::zero(); m.min(n)];
    let mut u = DenseMatrix::identity(m);
    let mut v = DenseMatrix::identity(n);
    svd_into(&mut work, &mut s, &mut u, &mut v, &cfg.compute_vectors(true))?;
    Ok((u, s, v))
}

/// Singular values only, descending.
pub fn singular_values<T: FloatScalar>(a: &impl MatrixRef<T>) -> Result<Vec<T>> {
    singular_values_with(a, &DecompConfig::default())
}

/// Singular values only, with explicit iteration settings.
pub fn singular_values_with<T: FloatScalar>(
    a: &impl MatrixRef<T>,
    cfg: &DecompConfig,
) -> Result<Vec<T>> {
    let (m, n) = a.shape();
    let mut work = to_dense(a);
    let mut s = vec![T::zero(); m.min(n)];
    let mut none = DenseMatrix::zeros(0, 0);
    let mut none_v = DenseMatrix::zeros(0, 0);
    svd_into(
        &mut work,
        &mut s,
        &mut none,
        &mut none_v,
        &cfg.compute_vectors(false),
    )?;
    Ok(s)
}

/// SVD into caller-owned buffers.
///
/// `a` (m×n) is used as workspace and holds unspecified values on return.
/// `s` must have length `min(m, n)`. When `cfg.compute_vectors` is set,
/// `u` must be m×m and `v` n×n; they are overwritten with the full factors
/// of `A = U Σ Vᵀ`. Otherwise `u` and `v` are ignored.
///
/// ```
/// use decompose::{svd_into, DecompConfig, DenseMatrix, MatrixViewMut};
///
/// let mut buf = [3.0_f64, 0.0, 0.0, -2.0]; // column-major 2x2
/// let mut a = MatrixViewMut::new(&mut buf, 2, 2).unwrap();
/// let mut s = [0.0; 2];
/// let mut u = DenseMatrix::zeros(2, 2);
/// let mut v = DenseMatrix::zeros(2, 2);
/// svd_into(&mut a, &mut s, &mut u, &mut v, &DecompConfig::default()).unwrap();
/// assert_eq!(s, [3.0, 2.0]);
/// ```
pub fn svd_into<T: FloatScalar>(
    a: &mut impl MatrixMut<T>,
    s: &mut [T],
    u: &mut impl MatrixMut<T>,
    v: &mut impl MatrixMut<T>,
    cfg: &DecompConfig,
) -> Result<()> {
    let (m, n) = a.shape();
    check_len(s, m.min(n))?;
    let vectors = cfg.compute_vectors;
    if vectors {
        check_shape(u, (m, m))?;
        check_shape(v, (n, n))?;
        set_identity(u);
        set_identity(v);
    }

    // Squared entries enter the shift, so iterate near unit magnitude
    let f = unit_scale(a);
    if f != T::one() {
        scale_entries(a, f);
    }

    let sweeps = if m >= n {
        svd_tall(a, s, u, v, vectors, cfg)?
    } else {
        // Aᵀ = U' Σ V'ᵀ, so A = V' Σ U'ᵀ
        let mut at = DenseMatrix::from_fn(n, m, |i, j| *a.get(j, i));
        svd_tall(&mut at, s, v, u, vectors, cfg)?
    };
    if f != T::one() {
        let inv = f.recip();
        s.iter_mut().for_each(|x| *x = *x * inv);
    }
    debug!("svd {}x{}: converged after {} sweeps", m, n, sweeps);
    Ok(())
}

/// Bidiagonalize, iterate, then fix signs and order. Requires m ≥ n.
fn svd_tall<T: FloatScalar>(
    a: &mut impl MatrixMut<T>,
    s: &mut [T],
    u: &mut impl MatrixMut<T>,
    v: &mut impl MatrixMut<T>,
    vectors: bool,
    cfg: &DecompConfig,
) -> Result<usize> {
    let n = a.ncols();
    let mut e = vec![T::zero(); n.saturating_sub(1)];
    bidiagonalize(a, s, &mut e, u, v, vectors);
    let sweeps = golub_kahan(s, &mut e, u, v, vectors, cfg)?;

    for (j, sj) in s.iter_mut().enumerate() {
        if *sj < T::zero() {
            *sj = -*sj;
            if vectors {
                for x in v.col_as_mut_slice(j, 0) {
                    *x = -*x;
                }
            }
        }
    }
    sort_values(s, |x, y| x > y, |i, k| {
        if vectors {
            swap_cols(u, i, k);
            swap_cols(v, i, k);
        }
    });
    Ok(sweeps)
}

// ── Golub–Kahan bidiagonal QR ───────────────────────────────────────

/// Diagonalize the bidiagonal `(d, e)` in place.
///
/// `e` has length `d.len() - 1` and is zero on return. Rotations are
/// accumulated into the first `d.len()` columns of `u` and into `v` when
/// `vectors` is set. Values are left unsorted and may be negative.
///
/// Returns the number of QR sweeps performed, or
/// [`LinalgError::NoConvergence`] once `cfg.max_sweeps(n)` is exhausted.
pub fn golub_kahan<T: FloatScalar>(
    d: &mut [T],
    e: &mut [T],
    u: &mut impl MatrixMut<T>,
    v: &mut impl MatrixMut<T>,
    vectors: bool,
    cfg: &DecompConfig,
) -> Result<usize> {
    let n = d.len();
    if n <= 1 {
        return Ok(0);
    }
    debug_assert_eq!(e.len(), n - 1);

    let norm = d
        .iter()
        .chain(e.iter())
        .fold(T::zero(), |acc, &x| acc.max(x.abs()));
    let tiny = T::eps() * norm;
    let max_sweeps = cfg.max_sweeps(n);
    let mut sweeps = 0;
    let mut hi = n - 1;

    while hi > 0 {
        if negligible(e[hi - 1], d[hi - 1], d[hi], norm) {
            e[hi - 1] = T::zero();
            hi -= 1;
            continue;
        }

        // Unreduced block [lo, hi]
        let mut lo = hi - 1;
        while lo > 0 && !negligible(e[lo - 1], d[lo - 1], d[lo], norm) {
            lo -= 1;
        }
        if lo > 0 {
            e[lo - 1] = T::zero();
        }

        // A zero on the diagonal splits the block after a rotation chase
        if let Some(k) = (lo..=hi).find(|&k| d[k].abs() <= tiny) {
            d[k] = T::zero();
            if k < hi {
                chase_row(d, e, k, hi, u, vectors);
            } else {
                chase_col(d, e, lo, hi, v, vectors);
            }
            continue;
        }

        if sweeps >= max_sweeps {
            warn!(
                "svd: no convergence after {} sweeps ({} values undeflated)",
                sweeps,
                hi + 1
            );
            return Err(LinalgError::NoConvergence {
                op: Operation::Svd,
                iterations: sweeps,
            });
        }
        sweeps += 1;
        qr_sweep(d, e, lo, hi, u, v, vectors);
    }
    Ok(sweeps)
}

// ── Zero-diagonal chase ─────────────────────────────────────────────

/// `d[k] == 0` with `k < hi`: rotate row `k` against the rows below until
/// its superdiagonal entry has been pushed off the block.
fn chase_row<T: FloatScalar>(
    d: &mut [T],
    e: &mut [T],
    k: usize,
    hi: usize,
    u: &mut impl MatrixMut<T>,
    vectors: bool,
) {
    let mut z = e[k];
    e[k] = T::zero();
    for j in k + 1..=hi {
        let (g, r) = Givens::new(d[j], z);
        d[j] = r;
        if j < hi {
            z = -g.s * e[j];
            e[j] = g.c * e[j];
        }
        if vectors {
            g.rotate_cols(u, j, k);
        }
    }
}

/// `d[hi] == 0`: rotate column `hi` against the columns to its left until
/// the superdiagonal entry above it is gone.
fn chase_col<T: FloatScalar>(
    d: &mut [T],
    e: &mut [T],
    lo: usize,
    hi: usize,
    v: &mut impl MatrixMut<T>,
    vectors: bool,
) {
    let mut z = e[hi - 1];
    e[hi - 1] = T::zero();
    for j in (lo..hi).rev() {
        let (g, r) = Givens::new(d[j], z);
        d[j] = r;
        if j > lo {
            z = -g.s * e[j - 1];
            e[j - 1] = g.c * e[j - 1];
        }
        if vectors {
            g.rotate_cols(v, j, hi);
        }
    }
}

// ── Shifted sweep ───────────────────────────────────────────────────

/// Eigenvalue of the symmetric 2×2 `[[t11, t12], [t12, t22]]` closer to
/// `t22`.
#[inline]
fn wilkinson_shift<T: FloatScalar>(t11: T, t12: T, t22: T) -> T {
    if t12 == T::zero() {
        return t22;
    }
    let delta = (t11 - t22) * T::half();
    let denom = delta + with_sign(hypot(delta, t12), delta);
    t22 - t12 * t12 / denom
}

/// One implicit-shift QR sweep on the unreduced block `[lo, hi]`.
fn qr_sweep<T: FloatScalar>(
    d: &mut [T],
    e: &mut [T],
    lo: usize,
    hi: usize,
    u: &mut impl MatrixMut<T>,
    v: &mut impl MatrixMut<T>,
    vectors: bool,
) {
    // Shift and first rotation on the block scaled to unit size; only the
    // direction of (y, z) matters
    let sc = d[lo..=hi]
        .iter()
        .chain(&e[lo..hi])
        .fold(T::zero(), |acc, &x| acc.max(x.abs()));
    let above = if hi - 1 > lo { e[hi - 2] / sc } else { T::zero() };
    let (dp, ep, dh) = (d[hi - 1] / sc, e[hi - 1] / sc, d[hi] / sc);
    let t11 = dp * dp + above * above;
    let t12 = dp * ep;
    let t22 = dh * dh + ep * ep;
    let mu = wilkinson_shift(t11, t12, t22);

    let d0 = d[lo] / sc;
    let mut y = d0 * d0 - mu;
    let mut z = d0 * (e[lo] / sc);
    for k in lo..hi {
        // Right rotation on columns k, k+1
        let (g, r) = Givens::new(y, z);
        if k > lo {
            e[k - 1] = r;
        }
        let f = g.c * d[k] + g.s * e[k];
        e[k] = g.c * e[k] - g.s * d[k];
        let bulge = g.s * d[k + 1];
        d[k + 1] = g.c * d[k + 1];
        if vectors {
            g.rotate_cols(v, k, k + 1);
        }

        // Left rotation on rows k, k+1
        let (g, r) = Givens::new(f, bulge);
        d[k] = r;
        let ek = e[k];
        e[k] = g.c * ek + g.s * d[k + 1];
        d[k + 1] = g.c * d[k + 1] - g.s * ek;
        if k + 1 < hi {
            y = e[k];
            z = g.s * e[k + 1];
            e[k + 1] = g.c * e[k + 1];
        }
        if vectors {
            g.rotate_cols(u, k, k + 1);
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────

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

    fn assert_orthonormal_cols(q: &DenseMatrix<f64>, tol: f64) {
        let qtq = q.tr_matmul(q);
        assert!(
            qtq.approx_eq(&DenseMatrix::identity(q.ncols()), tol),
            "columns not orthonormal: {:?}",
            qtq
        );
    }

    fn check(a: &DenseMatrix<f64>) -> Svd<f64> {
        let svd = Svd::new(a).unwrap();
        let k = a.nrows().min(a.ncols());
        assert_eq!(svd.u().ncols(), k);
        assert_eq!(svd.vt().nrows(), k);
        let s = svd.singular_values();
        for i in 0..k {
            assert!(s[i] >= 0.0, "negative singular value {}", s[i]);
            if i + 1 < k {
                assert!(s[i] >= s[i + 1], "not descending: {:?}", s);
            }
        }
        assert_orthonormal_cols(svd.u(), 1e-12);
        assert_orthonormal_cols(&svd.v(), 1e-12);
        let scale = a.max_abs().max(1.0);
        assert!(
            svd.reconstruct().approx_eq(a, 1e-12 * scale),
            "reconstruction failed"
        );
        svd
    }

    fn is_signed_permutation(q: &DenseMatrix<f64>) -> bool {
        (0..q.ncols()).all(|j| {
            let col = q.column(j);
            col.iter().filter(|x| x.abs() == 1.0).count() == 1
                && col.iter().filter(|&&x| x == 0.0).count() == col.len() - 1
        })
    }

    #[test]
    fn identity() {
        let a = DenseMatrix::<f64>::identity(3);
        let svd = check(&a);
        assert_eq!(svd.singular_values(), &[1.0, 1.0, 1.0]);
    }

    #[test]
    fn diagonal_swaps_into_order() {
        let a = DenseMatrix::from_rows(2, 2, &[3.0, 0.0, 0.0, 4.0]);
        let svd = check(&a);
        assert_eq!(svd.singular_values(), &[4.0, 3.0]);
        assert!(is_signed_permutation(svd.u()));
        assert!(is_signed_permutation(svd.vt()));
    }

    #[test]
    fn diagonal_with_negative() {
        let a = DenseMatrix::from_rows(2, 2, &[-3.0, 0.0, 0.0, 2.0]);
        let svd = check(&a);
        assert_eq!(svd.singular_values(), &[3.0, 2.0]);
        assert!(is_signed_permutation(svd.u()));
        assert!(is_signed_permutation(svd.vt()));
    }

    #[test]
    fn known_2x2() {
        // Singular values of [[3, 2], [2, 3]] are 5 and 1
        let a = DenseMatrix::from_rows(2, 2, &[3.0, 2.0, 2.0, 3.0]);
        let svd = check(&a);
        assert_near(svd.singular_values()[0], 5.0, 1e-12, "s0");
        assert_near(svd.singular_values()[1], 1.0, 1e-12, "s1");
    }

    #[test]
    fn general_square() {
        let a = DenseMatrix::from_rows(
            4,
            4,
            &[
                4.0, 1.0, -1.0, 2.0, 1.0, 3.0, 0.5, -2.0, -1.0, 0.5, 5.0, 1.0, 2.0, -2.0, 1.0, 6.0,
            ],
        );
        let svd = check(&a);
        let fro2: f64 = svd.singular_values().iter().map(|s| s * s).sum();
        assert_near(fro2, a.frobenius_norm().powi(2), 1e-10, "sum of squares");
    }

    #[test]
    fn tall_and_wide() {
        let tall = DenseMatrix::from_rows(4, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let s_tall = check(&tall).singular_values().to_vec();
        let s_wide = check(&tall.transpose()).singular_values().to_vec();
        for (x, y) in s_tall.iter().zip(&s_wide) {
            assert_near(*x, *y, 1e-12, "transpose invariance");
        }
    }

    #[test]
    fn rank_deficient() {
        let a = DenseMatrix::from_rows(3, 2, &[1.0, 2.0, 2.0, 4.0, 3.0, 6.0]);
        let svd = check(&a);
        assert_near(svd.singular_values()[0], 70.0_f64.sqrt(), 1e-12, "s0");
        assert!(svd.singular_values()[1] < 1e-12);
        assert_eq!(svd.rank(), 1);
        assert!(svd.condition_number() > 1e12);
    }

    #[test]
    fn zero_diagonal_in_bidiagonal() {
        // Upper bidiagonal with an exact zero in the middle of the diagonal
        let a = DenseMatrix::from_rows(3, 3, &[1.0, 2.0, 0.0, 0.0, 0.0, 3.0, 0.0, 0.0, 4.0]);
        let svd = check(&a);
        assert!(svd.singular_values()[2].abs() < 1e-12);
        assert_eq!(svd.rank(), 2);
    }

    #[test]
    fn zero_diagonal_at_bottom() {
        let a = DenseMatrix::from_rows(2, 2, &[2.0, 1.0, 0.0, 0.0]);
        let svd = check(&a);
        assert_near(svd.singular_values()[0], 5.0_f64.sqrt(), 1e-12, "s0");
        assert_near(svd.singular_values()[1], 0.0, 1e-12, "s1");
    }

    #[test]
    fn one_by_one() {
        let a = DenseMatrix::from_rows(1, 1, &[-2.5]);
        let svd = check(&a);
        assert_eq!(svd.singular_values(), &[2.5]);
        assert_eq!(svd.u()[(0, 0)] * svd.vt()[(0, 0)], -1.0);
    }

    #[test]
    fn zero_matrix() {
        let a = DenseMatrix::<f64>::zeros(3, 2);
        let (u, s, v) = svd_full(&a, &DecompConfig::default()).unwrap();
        assert_eq!(s, vec![0.0, 0.0]);
        assert_eq!(u, DenseMatrix::identity(3));
        assert_eq!(v, DenseMatrix::identity(2));
    }

    #[test]
    fn empty_matrix() {
        let svd = Svd::new(&DenseMatrix::<f64>::zeros(0, 3)).unwrap();
        assert!(svd.singular_values().is_empty());
        assert_eq!(svd.u().nrows(), 0);
        assert_eq!(svd.vt().ncols(), 3);
        assert_eq!(svd.norm2(), 0.0);
        assert_eq!(svd.condition_number(), 0.0);
    }

    #[test]
    fn single_row() {
        let a = DenseMatrix::from_rows(1, 3, &[1.0, 2.0, 2.0]);
        let svd = check(&a);
        assert_near(svd.singular_values()[0], 3.0, 1e-12, "norm of row");
    }

    #[test]
    fn values_only_match_full() {
        let a = DenseMatrix::from_rows(3, 3, &[2.0, -1.0, 0.0, -1.0, 2.0, -1.0, 0.0, -1.0, 2.0]);
        let full = Svd::new(&a).unwrap();
        let vals = singular_values(&a).unwrap();
        for (x, y) in vals.iter().zip(full.singular_values()) {
            assert_near(*x, *y, 1e-12, "values-only");
        }
    }

    #[test]
    fn full_factors_are_square() {
        let a = DenseMatrix::from_rows(2, 3, &[1.0, 0.0, 2.0, 0.0, 3.0, 0.0]);
        let (u, s, v) = svd_full(&a, &DecompConfig::default()).unwrap();
        assert_eq!(u.nrows(), 2);
        assert_eq!(v.nrows(), 3);
        assert_orthonormal_cols(&u, 1e-12);
        assert_orthonormal_cols(&v, 1e-12);
        let mut sigma = DenseMatrix::zeros(2, 3);
        for (i, &si) in s.iter().enumerate() {
            sigma[(i, i)] = si;
        }
        let rebuilt = &(&u * &sigma) * &v.transpose();
        assert!(rebuilt.approx_eq(&a, 1e-12));
    }

    #[test]
    fn into_caller_buffers() {
        let mut buf = [1.0_f64, 3.0, 2.0, 4.0];
        let mut a = MatrixViewMut::new(&mut buf, 2, 2).unwrap();
        let mut s = [0.0; 2];
        let mut ubuf = [0.0; 4];
        let mut u = MatrixViewMut::new(&mut ubuf, 2, 2).unwrap();
        let mut v = DenseMatrix::zeros(2, 2);
        svd_into(&mut a, &mut s, &mut u, &mut v, &DecompConfig::default()).unwrap();
        let expected = Svd::new(&DenseMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0])).unwrap();
        assert_near(s[0], expected.singular_values()[0], 1e-12, "s0");
        assert_near(s[1], expected.singular_values()[1], 1e-12, "s1");
    }

    #[test]
    fn into_rejects_bad_extents() {
        let mut a = DenseMatrix::<f64>::identity(3);
        let mut u = DenseMatrix::zeros(3, 3);
        let mut v = DenseMatrix::zeros(3, 3);
        let cfg = DecompConfig::default();

        let mut short = [0.0; 2];
        assert_eq!(
            svd_into(&mut a, &mut short, &mut u, &mut v, &cfg),
            Err(LinalgError::BufferLength { expected: 3, got: 2 })
        );

        let mut s = [0.0; 3];
        let mut small_v = DenseMatrix::zeros(2, 3);
        let err = svd_into(&mut a, &mut s, &mut u, &mut small_v, &cfg).unwrap_err();
        assert_eq!(
            err,
            LinalgError::DimensionMismatch {
                expected: (3, 3),
                got: (2, 3)
            }
        );
        assert!(err.is_configuration());
    }

    #[test]
    fn zero_budget_reports_no_convergence() {
        let a = DenseMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let cfg = DecompConfig::default().sweeps_per_dim(0);
        let err = Svd::with_config(&a, &cfg).unwrap_err();
        assert_eq!(
            err,
            LinalgError::NoConvergence {
                op: Operation::Svd,
                iterations: 0
            }
        );
        assert!(!err.is_configuration());
    }

    #[test]
    fn extreme_magnitudes_f64() {
        // [[1, 1], [0, 1]] has singular values φ and 1/φ
        let phi = (1.0 + 5.0_f64.sqrt()) / 2.0;
        for scale in [1e-250, 1e-160, 1e80, 1e160, 1e250] {
            let a = DenseMatrix::from_rows(2, 2, &[scale, scale, 0.0, scale]);
            let svd = Svd::new(&a).unwrap();
            let s = svd.singular_values();
            assert_near(s[0] / scale, phi, 1e-12, "σ0");
            assert_near(s[1] / scale, phi.recip(), 1e-12, "σ1");
            assert!(svd.reconstruct().approx_eq(&a, 1e-12 * scale));

            let base = DenseMatrix::from_fn(4, 3, |i, j| ((i * 3 + j * 5) % 7) as f64 - 3.0);
            let reference = Svd::new(&base).unwrap();
            let b = DenseMatrix::from_fn(4, 3, |i, j| base[(i, j)] * scale);
            let vals = singular_values(&b).unwrap();
            for (x, y) in vals.iter().zip(reference.singular_values()) {
                assert_near(x / scale, *y, 1e-12, "scaled values");
            }
        }
    }

    #[test]
    fn extreme_magnitudes_f32() {
        let phi = (1.0 + 5.0_f32.sqrt()) / 2.0;
        for scale in [1e-20_f32, 1e10, 1e12, 1e20] {
            let a = DenseMatrix::from_rows(2, 2, &[scale, scale, 0.0, scale]);
            let svd = Svd::new(&a).unwrap();
            let s = svd.singular_values();
            assert!((s[0] / scale - phi).abs() < 1e-5, "σ0 at {}", scale);
            assert!((s[1] / scale - phi.recip()).abs() < 1e-5, "σ1 at {}", scale);
            assert!(svd.reconstruct().approx_eq(&a, 1e-5 * scale));
        }
    }

    #[test]
    fn f32_precision() {
        let a = DenseMatrix::from_rows(2, 2, &[3.0_f32, 2.0, 2.0, 3.0]);
        let svd = Svd::new(&a).unwrap();
        assert!((svd.singular_values()[0] - 5.0).abs() < 1e-5);
        assert!(svd.reconstruct().approx_eq(&a, 1e-5));
    }
}
