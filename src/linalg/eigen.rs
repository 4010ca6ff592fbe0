//! General (non-symmetric) eigendecomposition from the real Schur form.
//!
//! Eigenvalues are read off the 1×1 and 2×2 diagonal blocks of `T`.
//! Eigenvectors are found by back-substitution on `(T - λI) x = 0`, working
//! upward through the blocks above the eigenvalue's own block, and are then
//! mapped back with the Schur vectors `y = Q x`. Complex eigenvalues are
//! handled in `Complex<T>` arithmetic; the conjugate partner of a pair
//! reuses the conjugated vector.

use alloc::vec;
use alloc::vec::Vec;

use num_complex::Complex;
use num_traits::Zero;

use super::schur::{block_unit, schur_into, schur_scaled};
use super::{check_square, to_dense};
use crate::config::DecompConfig;
use crate::dense::DenseMatrix;
use crate::error::Result;
use crate::traits::{FloatScalar, MatrixRef};

// ── Eigenvalue blocks ───────────────────────────────────────────────

/// One diagonal block of the real Schur form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EigenvalueBlock<T> {
    /// 1×1 block holding a real eigenvalue.
    Real(T),
    /// 2×2 block holding the pair `re ± i·im` (`im > 0`).
    ComplexPair { re: T, im: T },
}

impl<T: FloatScalar> EigenvalueBlock<T> {
    /// Rows/columns the block occupies on the Schur diagonal.
    #[inline]
    pub fn dim(&self) -> usize {
        match self {
            EigenvalueBlock::Real(_) => 1,
            EigenvalueBlock::ComplexPair { .. } => 2,
        }
    }

    /// The block with its eigenvalues multiplied by `k`.
    pub(crate) fn scaled(self, k: T) -> Self {
        match self {
            EigenvalueBlock::Real(x) => EigenvalueBlock::Real(x * k),
            EigenvalueBlock::ComplexPair { re, im } => EigenvalueBlock::ComplexPair {
                re: re * k,
                im: im * k,
            },
        }
    }

    /// Append the block's eigenvalues; a pair goes in as `+im` then `-im`.
    pub(crate) fn push_values(&self, out: &mut Vec<Complex<T>>) {
        match *self {
            EigenvalueBlock::Real(x) => out.push(Complex::new(x, T::zero())),
            EigenvalueBlock::ComplexPair { re, im } => {
                out.push(Complex::new(re, im));
                out.push(Complex::new(re, -im));
            }
        }
    }
}

/// Walk the diagonal of a quasi-triangular `t`.
///
/// A nonzero subdiagonal entry marks a 2×2 complex-pair block.
pub(crate) fn blocks_from_schur<T: FloatScalar>(t: &impl MatrixRef<T>) -> Vec<EigenvalueBlock<T>> {
    let n = t.nrows();
    let mut blocks = Vec::with_capacity(n);
    let mut i = 0;
    while i < n {
        if i + 1 < n && *t.get(i + 1, i) != T::zero() {
            let ([a, b, c, d], sc) = block_unit(t, i);
            let p = T::half() * (a - d);
            let disc = p * p + b * c;
            blocks.push(EigenvalueBlock::ComplexPair {
                re: T::half() * (a + d) * sc,
                im: (-disc).max(T::zero()).sqrt() * sc,
            });
            i += 2;
        } else {
            blocks.push(EigenvalueBlock::Real(*t.get(i, i)));
            i += 1;
        }
    }
    blocks
}

// ── Eigen wrapper ───────────────────────────────────────────────────

/// Eigenvectors split into real and imaginary parts.
///
/// Column `j` of `re + i·im` is the unit-norm eigenvector for eigenvalue
/// `j`. For a real eigenvalue the imaginary column is zero; the two
/// columns of a conjugate pair are conjugates of each other.
#[derive(Debug, Clone, PartialEq)]
pub struct EigenVectors<T> {
    pub re: DenseMatrix<T>,
    pub im: DenseMatrix<T>,
}

impl<T: FloatScalar> EigenVectors<T> {
    /// Column `j` as complex numbers.
    pub fn column(&self, j: usize) -> Vec<Complex<T>> {
        self.re
            .column(j)
            .iter()
            .zip(self.im.column(j))
            .map(|(&r, &i)| Complex::new(r, i))
            .collect()
    }
}

/// Eigendecomposition of a general real square matrix.
///
/// Eigenvalues follow the block order of the real Schur diagonal; they are
/// not sorted. A complex-conjugate pair occupies two consecutive slots,
/// `(re, +im)` first.
///
/// ```
/// use decompose::{DenseMatrix, Eigen};
///
/// let a = DenseMatrix::from_rows(2, 2, &[0.0_f64, 1.0, -1.0, 0.0]);
/// let eig = Eigen::new(&a).unwrap();
/// let ev = eig.eigenvalues();
/// assert!((ev[0].im - 1.0).abs() < 1e-12);
/// assert!((ev[1].im + 1.0).abs() < 1e-12);
/// assert!(!eig.is_real());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Eigen<T> {
    values: Vec<Complex<T>>,
    blocks: Vec<EigenvalueBlock<T>>,
    vectors: EigenVectors<T>,
}

impl<T: FloatScalar> Eigen<T> {
    pub fn new(a: &impl MatrixRef<T>) -> Result<Self> {
        Self::with_config(a, &DecompConfig::default())
    }

    /// Decompose with explicit iteration settings (eigenvectors are always
    /// formed; see [`eigenvalues_with`] for values alone).
    pub fn with_config(a: &impl MatrixRef<T>, cfg: &DecompConfig) -> Result<Self> {
        let n = check_square(a)?;
        let mut t = to_dense(a);
        let mut q = DenseMatrix::zeros(n, n);
        let f = schur_scaled(&mut t, &mut q, &cfg.compute_vectors(true))?;

        // Back-substitution runs on the scaled T; vectors are scale-free
        let blocks = blocks_from_schur(&t);
        let vectors = schur_eigenvectors(&t, &q, &blocks);
        let inv = f.recip();
        let blocks = blocks.into_iter().map(|b| b.scaled(inv)).collect();
        Ok(Self::from_blocks(blocks, vectors))
    }

    pub(crate) fn from_blocks(blocks: Vec<EigenvalueBlock<T>>, vectors: EigenVectors<T>) -> Self {
        let mut values = Vec::with_capacity(vectors.re.ncols());
        for block in &blocks {
            block.push_values(&mut values);
        }
        Self {
            values,
            blocks,
            vectors,
        }
    }

    #[inline]
    pub fn eigenvalues(&self) -> &[Complex<T>] {
        &self.values
    }

    #[inline]
    pub fn blocks(&self) -> &[EigenvalueBlock<T>] {
        &self.blocks
    }

    #[inline]
    pub fn eigenvectors(&self) -> &EigenVectors<T> {
        &self.vectors
    }

    /// Eigenvector for `eigenvalues()[j]`.
    pub fn eigenvector(&self, j: usize) -> Vec<Complex<T>> {
        self.vectors.column(j)
    }

    /// `true` when every eigenvalue is real.
    pub fn is_real(&self) -> bool {
        self.blocks
            .iter()
            .all(|b| matches!(b, EigenvalueBlock::Real(_)))
    }
}

/// Eigenvalues of a general square matrix in Schur-diagonal order.
pub fn eigenvalues<T: FloatScalar>(a: &impl MatrixRef<T>) -> Result<Vec<Complex<T>>> {
    eigenvalues_with(a, &DecompConfig::default())
}

pub fn eigenvalues_with<T: FloatScalar>(
    a: &impl MatrixRef<T>,
    cfg: &DecompConfig,
) -> Result<Vec<Complex<T>>> {
    let n = check_square(a)?;
    let mut t = to_dense(a);
    let mut none = DenseMatrix::zeros(0, 0);
    schur_into(&mut t, &mut none, &cfg.compute_vectors(false))?;
    let mut out = Vec::with_capacity(n);
    for block in blocks_from_schur(&t) {
        block.push_values(&mut out);
    }
    Ok(out)
}

// ── Back-substitution ───────────────────────────────────────────────

/// Back-substitute `(T - λI) x = 0` for every block, map through `Q` and
/// normalise.
fn schur_eigenvectors<T: FloatScalar>(
    t: &DenseMatrix<T>,
    q: &DenseMatrix<T>,
    blocks: &[EigenvalueBlock<T>],
) -> EigenVectors<T> {
    let n = t.nrows();
    let mut starts = Vec::with_capacity(blocks.len());
    let mut pos = 0;
    for block in blocks {
        starts.push(pos);
        pos += block.dim();
    }

    // Perturbation used when λ is (numerically) also an eigenvalue of an
    // earlier block, so the solve stays finite.
    let mut small = T::eps() * t.frobenius_norm();
    if small == T::zero() {
        small = T::eps();
    }

    let mut re = DenseMatrix::zeros(n, n);
    let mut im = DenseMatrix::zeros(n, n);
    let mut x = vec![Complex::<T>::zero(); n];
    let mut y = vec![Complex::<T>::zero(); n];
    let tc = |i: usize, j: usize| Complex::new(t[(i, j)], T::zero());

    for (bi, block) in blocks.iter().enumerate() {
        let k = starts[bi];
        x.iter_mut().for_each(|v| *v = Complex::zero());
        let (lambda, top) = match *block {
            EigenvalueBlock::Real(l) => {
                x[k] = Complex::new(T::one(), T::zero());
                (Complex::new(l, T::zero()), k)
            }
            EigenvalueBlock::ComplexPair { re, im } => {
                // First row of the block: (a - λ) x₀ + b x₁ = 0
                let lambda = Complex::new(re, im);
                x[k] = tc(k, k + 1);
                x[k + 1] = lambda - tc(k, k);
                (lambda, k + 1)
            }
        };

        for bj in (0..bi).rev() {
            let i0 = starts[bj];
            let next = i0 + blocks[bj].dim();
            let rhs = |row: usize, x: &[Complex<T>]| -> Complex<T> {
                (next..=top).fold(Complex::zero(), |acc, j| acc - tc(row, j) * x[j])
            };
            match blocks[bj] {
                EigenvalueBlock::Real(_) => {
                    let denom = tc(i0, i0) - lambda;
                    x[i0] = if denom.norm() < small {
                        rhs(i0, &x) / small
                    } else {
                        rhs(i0, &x) / denom
                    };
                }
                EigenvalueBlock::ComplexPair { .. } => {
                    let m00 = tc(i0, i0) - lambda;
                    let m01 = tc(i0, i0 + 1);
                    let m10 = tc(i0 + 1, i0);
                    let m11 = tc(i0 + 1, i0 + 1) - lambda;
                    let r0 = rhs(i0, &x);
                    let r1 = rhs(i0 + 1, &x);
                    let det = m00 * m11 - m01 * m10;
                    let floor = small * (m00.norm() + m01.norm() + m10.norm() + m11.norm());
                    let (n0, n1) = (r0 * m11 - m01 * r1, m00 * r1 - m10 * r0);
                    if det.norm() < floor {
                        x[i0] = n0 / floor;
                        x[i0 + 1] = n1 / floor;
                    } else {
                        x[i0] = n0 / det;
                        x[i0 + 1] = n1 / det;
                    }
                }
            }
        }

        // y = Q x, then unit 2-norm
        y.iter_mut().for_each(|v| *v = Complex::zero());
        for (j, &xj) in x[..=top].iter().enumerate() {
            if xj.is_zero() {
                continue;
            }
            for (yi, &qij) in y.iter_mut().zip(q.column(j)) {
                *yi = *yi + xj * qij;
            }
        }
        let nrm = y
            .iter()
            .fold(T::zero(), |acc, v| acc + v.norm_sqr())
            .sqrt();
        if nrm > T::zero() {
            y.iter_mut().for_each(|v| *v = *v / nrm);
        }

        match block {
            EigenvalueBlock::Real(_) => {
                for (i, v) in y.iter().enumerate() {
                    re[(i, k)] = v.re;
                }
            }
            EigenvalueBlock::ComplexPair { .. } => {
                for (i, v) in y.iter().enumerate() {
                    re[(i, k)] = v.re;
                    im[(i, k)] = v.im;
                    re[(i, k + 1)] = v.re;
                    im[(i, k + 1)] = -v.im;
                }
            }
        }
    }

    EigenVectors { re, im }
}
