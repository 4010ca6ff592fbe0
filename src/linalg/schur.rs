use alloc::vec;
use alloc::vec::Vec;

use log::{debug, trace, warn};
use num_complex::Complex;

use super::eigen::{blocks_from_schur, EigenvalueBlock};
use super::hessenberg::hessenberg;
use super::{check_shape, check_square, negligible, scale_entries, to_dense, unit_scale};
use crate::config::DecompConfig;
use crate::dense::{set_identity, DenseMatrix};
use crate::error::{LinalgError, Operation, Result};
use crate::kernels::{norm2, with_sign, Givens, Reflector};
use crate::traits::{FloatScalar, MatrixMut, MatrixRef};

/// Helper: get element with dereference for calling Float methods.
#[inline]
fn g<T: Copy>(m: &impl MatrixRef<T>, i: usize, j: usize) -> T {
    *m.get(i, j)
}

// ── Francis double-shift QR ─────────────────────────────────────────

/// Francis double-shift QR iteration on an upper Hessenberg matrix.
///
/// Transforms `h` to real Schur form (quasi-upper-triangular) in place and
/// accumulates the orthogonal similarity transform into `q` when `vectors`
/// is set.
///
/// Real eigenvalues end up as 1×1 diagonal blocks. A deflated 2×2 block
/// with real eigenvalues is rotated to upper-triangular form, so every
/// remaining 2×2 block `[[a, b], [c, d]]` with `c != 0` holds a
/// complex-conjugate pair.
///
/// Every `cfg.exceptional_shift_period` sweeps without a deflation the
/// standard shift is replaced by an ad-hoc one to break cycles. Returns the
/// number of sweeps, or [`LinalgError::NoConvergence`] once
/// `cfg.max_sweeps(n)` is exhausted.
pub fn francis_qr<T: FloatScalar>(
    h: &mut impl MatrixMut<T>,
    q: &mut impl MatrixMut<T>,
    vectors: bool,
    cfg: &DecompConfig,
) -> Result<usize> {
    let n = h.nrows();
    if n <= 1 {
        return Ok(0);
    }

    let norm = (0..n).fold(T::zero(), |acc, j| acc.max(norm2(h.col_as_slice(j, 0))));
    let max_sweeps = cfg.max_sweeps(n);
    let mut work = vec![T::zero(); n];
    let mut sweeps = 0;
    let mut since_deflation = 0;
    let mut hi = n; // active window is h[lo..hi, lo..hi]

    while hi > 0 {
        let mut lo = hi - 1;
        while lo > 0 {
            if negligible(g(h, lo, lo - 1), g(h, lo - 1, lo - 1), g(h, lo, lo), norm) {
                *h.get_mut(lo, lo - 1) = T::zero();
                break;
            }
            lo -= 1;
        }

        if lo + 1 == hi {
            hi -= 1;
            since_deflation = 0;
            continue;
        }
        if lo + 2 == hi {
            standardize_block(h, q, lo, vectors);
            hi -= 2;
            since_deflation = 0;
            continue;
        }

        if sweeps >= max_sweeps {
            warn!(
                "eigen: no convergence after {} sweeps ({} rows undeflated)",
                sweeps, hi
            );
            return Err(LinalgError::NoConvergence {
                op: Operation::Eigen,
                iterations: sweeps,
            });
        }
        sweeps += 1;
        since_deflation += 1;
        let exceptional = cfg.is_exceptional(since_deflation);
        if exceptional {
            trace!("eigen: exceptional shift on window {}..{}", lo, hi);
        }
        francis_step(h, q, lo, hi, exceptional, vectors, &mut work);
    }
    Ok(sweeps)
}

/// One double-shift bulge chase over the window `h[lo..hi, lo..hi]`
/// (at least 3×3).
fn francis_step<T: FloatScalar>(
    h: &mut impl MatrixMut<T>,
    q: &mut impl MatrixMut<T>,
    lo: usize,
    hi: usize,
    exceptional: bool,
    vectors: bool,
    work: &mut [T],
) {
    let n = h.nrows();
    let p = hi - 1;

    // Entries feeding the first column, scaled by their largest magnitude so
    // the products below stay in range. Only the direction of (x, y, z) is
    // used.
    let head = [
        g(h, lo, lo),
        g(h, lo, lo + 1),
        g(h, lo + 1, lo),
        g(h, lo + 1, lo + 1),
        g(h, lo + 2, lo + 1),
    ];
    let trailing = [
        g(h, p - 1, p - 1),
        g(h, p - 1, p),
        g(h, p, p - 1),
        g(h, p, p),
        g(h, p - 1, p - 2),
    ];
    let sc = head
        .iter()
        .chain(&trailing)
        .fold(T::zero(), |acc, x| acc.max(x.abs()));
    let [h00, h01, h10, h11, h21] = head.map(|x| x / sc);
    let [a, b, c, d, c_above] = trailing.map(|x| x / sc);

    // Shifts enter only through their sum s and product t
    let (s, t) = if exceptional {
        let sh = c.abs() + c_above.abs();
        let x = T::lit(0.75) * sh + d;
        (x + x, x * x + T::lit(0.4375) * sh * sh)
    } else {
        (a + d, a * d - b * c)
    };

    // First column of (H - σ₁I)(H - σ₂I)
    let mut x = h00 * h00 + h01 * h10 - s * h00 + t;
    let mut y = h10 * (h00 + h11 - s);
    let mut z = h10 * h21;

    for k in lo..hi - 1 {
        let nr = (hi - k).min(3);
        let mut tail = [y, z];
        let r = Reflector::generate(x, &mut tail[..nr - 1]);
        let v = [T::one(), tail[0], tail[1]];
        let v = &v[..nr];

        let col_start = if k > lo { k - 1 } else { lo };
        r.apply_left(h, v, k, col_start..n);
        if k > lo {
            *h.get_mut(k, k - 1) = r.beta;
            for i in k + 1..k + nr {
                *h.get_mut(i, k - 1) = T::zero();
            }
        }
        r.apply_right(h, v, k, 0..(k + 4).min(hi), work);
        if vectors {
            r.apply_right(q, v, k, 0..n, work);
        }

        if k + 2 < hi {
            x = g(h, k + 1, k);
            y = g(h, k + 2, k);
            z = if k + 3 < hi { g(h, k + 3, k) } else { T::zero() };
        }
    }
}

// ── 2×2 blocks ──────────────────────────────────────────────────────

/// Rotate a deflated 2×2 block at `(i, i)` to upper-triangular form when
/// its eigenvalues are real; leave complex-pair blocks as they are.
fn standardize_block<T: FloatScalar>(
    h: &mut impl MatrixMut<T>,
    q: &mut impl MatrixMut<T>,
    i: usize,
    vectors: bool,
) {
    if g(h, i + 1, i) == T::zero() {
        return;
    }
    let ([a, b, c, d], _) = block_unit(h, i);
    let p = T::half() * (a - d);
    let disc = p * p + b * c;
    if disc < T::zero() {
        return;
    }

    // (λ₁ - d, c) is an eigenvector for λ₁ = d + p ± √disc, sign chosen to
    // avoid cancellation; the rotation maps it onto e₁.
    let shift = p + with_sign(disc.sqrt(), p);
    let (rot, _) = Givens::new(shift, c);
    let n = h.nrows();
    rot.rotate_rows(h, i, i + 1, i..n);
    rot.rotate_cols(h, i, i + 1);
    if vectors {
        rot.rotate_cols(q, i, i + 1);
    }
    *h.get_mut(i + 1, i) = T::zero();
}

/// The 2×2 block at `(i, i)` as `[a, b, c, d]` divided by its largest
/// magnitude, together with that magnitude (one for a zero block).
pub(crate) fn block_unit<T: FloatScalar>(h: &impl MatrixRef<T>, i: usize) -> ([T; 4], T) {
    let m = [g(h, i, i), g(h, i, i + 1), g(h, i + 1, i), g(h, i + 1, i + 1)];
    let sc = m.iter().fold(T::zero(), |acc, x| acc.max(x.abs()));
    if sc == T::zero() {
        (m, T::one())
    } else {
        (m.map(|x| x / sc), sc)
    }
}

// ── Schur wrapper ───────────────────────────────────────────────────

/// Real Schur decomposition `A = Q T Qᵀ`.
///
/// `T` is quasi-upper-triangular: 1×1 diagonal blocks carry real
/// eigenvalues and 2×2 blocks carry complex-conjugate pairs. `Q` is
/// orthogonal.
///
/// ```
/// use decompose::{DenseMatrix, Schur};
///
/// let a = DenseMatrix::from_rows(2, 2, &[0.0_f64, 1.0, -1.0, 0.0]);
/// let schur = Schur::new(&a).unwrap();
/// let ev = schur.eigenvalues();
/// assert!(ev[0].re.abs() < 1e-12 && (ev[0].im - 1.0).abs() < 1e-12);
/// assert!(schur.reconstruct().approx_eq(&a, 1e-12));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Schur<T> {
    t: DenseMatrix<T>,
    q: DenseMatrix<T>,
}

impl<T: FloatScalar> Schur<T> {
    pub fn new(a: &impl MatrixRef<T>) -> Result<Self> {
        Self::with_config(a, &DecompConfig::default())
    }

    /// Decompose with explicit iteration settings (`Q` is always formed).
    pub fn with_config(a: &impl MatrixRef<T>, cfg: &DecompConfig) -> Result<Self> {
        let n = check_square(a)?;
        let mut t = to_dense(a);
        let mut q = DenseMatrix::zeros(n, n);
        schur_into(&mut t, &mut q, &cfg.compute_vectors(true))?;
        Ok(Self { t, q })
    }

    /// The quasi-upper-triangular factor `T`.
    #[inline]
    pub fn schur_form(&self) -> &DenseMatrix<T> {
        &self.t
    }

    /// The orthogonal factor `Q`.
    #[inline]
    pub fn schur_vectors(&self) -> &DenseMatrix<T> {
        &self.q
    }

    /// Diagonal blocks of `T` in order.
    pub fn eigenvalue_blocks(&self) -> Vec<EigenvalueBlock<T>> {
        blocks_from_schur(&self.t)
    }

    /// Eigenvalues in Schur-diagonal order; each complex pair is listed
    /// as `(re, +im)` then `(re, -im)`.
    pub fn eigenvalues(&self) -> Vec<Complex<T>> {
        let mut out = Vec::with_capacity(self.t.nrows());
        for block in self.eigenvalue_blocks() {
            block.push_values(&mut out);
        }
        out
    }

    /// `Q T Qᵀ`.
    pub fn reconstruct(&self) -> DenseMatrix<T> {
        self.q.matmul(&self.t).matmul(&self.q.transpose())
    }

    pub fn into_parts(self) -> (DenseMatrix<T>, DenseMatrix<T>) {
        (self.t, self.q)
    }
}

// ── Drivers ─────────────────────────────────────────────────────────

/// Real Schur form into caller-owned buffers.
///
/// `a` (n×n) is overwritten with `T`. When `cfg.compute_vectors` is set,
/// `q` must be n×n and receives `Q`; otherwise it is ignored.
pub fn schur_into<T: FloatScalar>(
    a: &mut impl MatrixMut<T>,
    q: &mut impl MatrixMut<T>,
    cfg: &DecompConfig,
) -> Result<()> {
    let f = schur_scaled(a, q, cfg)?;
    if f != T::one() {
        scale_entries(a, f.recip());
    }
    Ok(())
}

/// [`schur_into`] without the final unscaling: on return `a` holds `f·T`
/// for the returned power of two `f`.
pub(crate) fn schur_scaled<T: FloatScalar>(
    a: &mut impl MatrixMut<T>,
    q: &mut impl MatrixMut<T>,
    cfg: &DecompConfig,
) -> Result<T> {
    let n = check_square(a)?;
    let vectors = cfg.compute_vectors;
    if vectors {
        check_shape(q, (n, n))?;
        set_identity(q);
    }
    let f = unit_scale(a);
    if f != T::one() {
        scale_entries(a, f);
    }
    hessenberg(a, q, vectors);
    let sweeps = francis_qr(a, q, vectors, cfg)?;
    debug!("schur {}x{}: converged after {} sweeps", n, n, sweeps);
    Ok(f)
}
