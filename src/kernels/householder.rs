use core::ops::Range;

use super::{axpy_neg, dot, hypot, norm2};
use crate::traits::{FloatScalar, MatrixMut};

/// Elementary reflector `H = I - tau * v * vᵀ` with `v[0] = 1`.
///
/// Built from a vector `x = [alpha, tail...]` so that `H x = [beta, 0, ...]`.
/// When the tail is already zero the reflector degenerates to the identity
/// (`tau = 0`) instead of dividing by a zero norm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reflector<T> {
    pub tau: T,
    pub beta: T,
}

impl<T: FloatScalar> Reflector<T> {
    /// Generate the reflector for `[alpha, tail]`.
    ///
    /// On return `tail` holds `v[1..]`.
    ///
    /// ```
    /// use decompose::kernels::Reflector;
    ///
    /// let mut tail = [4.0_f64];
    /// let h = Reflector::generate(3.0, &mut tail);
    /// assert!((h.beta + 5.0).abs() < 1e-15);
    ///
    /// let mut zero_tail = [0.0_f64, 0.0];
    /// let id = Reflector::generate(7.0, &mut zero_tail);
    /// assert!(id.is_identity());
    /// assert_eq!(id.beta, 7.0);
    /// ```
    pub fn generate(alpha: T, tail: &mut [T]) -> Self {
        let xnorm = norm2(tail);
        if xnorm == T::zero() {
            return Self {
                tau: T::zero(),
                beta: alpha,
            };
        }
        let beta = -super::with_sign(hypot(alpha, xnorm), alpha);
        let tau = (beta - alpha) / beta;
        let scale = T::one() / (alpha - beta);
        for x in tail.iter_mut() {
            *x = *x * scale;
        }
        Self { tau, beta }
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.tau == T::zero()
    }

    /// `M[row0..row0+len, cols] = H * M[row0..row0+len, cols]`.
    ///
    /// `v` is the full reflector vector (`v[0] = 1`).
    pub fn apply_left(&self, m: &mut impl MatrixMut<T>, v: &[T], row0: usize, cols: Range<usize>) {
        if self.is_identity() {
            return;
        }
        let len = v.len();
        debug_assert!(row0 + len <= m.nrows());
        for j in cols {
            let w = self.tau * dot(v, &m.col_as_slice(j, row0)[..len]);
            axpy_neg(&mut m.col_as_mut_slice(j, row0)[..len], w, v);
        }
    }

    /// `M[rows, col0..col0+len] = M[rows, col0..col0+len] * H`.
    ///
    /// `work` must hold at least `rows.len()` elements.
    pub fn apply_right(
        &self,
        m: &mut impl MatrixMut<T>,
        v: &[T],
        col0: usize,
        rows: Range<usize>,
        work: &mut [T],
    ) {
        if self.is_identity() || rows.is_empty() {
            return;
        }
        let (r0, r1) = (rows.start, rows.end);
        let w = &mut work[..r1 - r0];
        for x in w.iter_mut() {
            *x = T::zero();
        }
        // w = M[rows, cols] * v
        for (k, &vk) in v.iter().enumerate() {
            if vk == T::zero() {
                continue;
            }
            let col = &m.col_as_slice(col0 + k, 0)[r0..r1];
            axpy_neg(w, -vk, col);
        }
        // M[rows, cols] -= tau * w * vᵀ
        for (k, &vk) in v.iter().enumerate() {
            if vk == T::zero() {
                continue;
            }
            let col = &mut m.col_as_mut_slice(col0 + k, 0)[r0..r1];
            axpy_neg(col, self.tau * vk, w);
        }
    }
}
