use core::ops::Range;

use super::hypot;
use crate::traits::{FloatScalar, MatrixMut};

/// Plane rotation `G = [[c, s], [-s, c]]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Givens<T> {
    pub c: T,
    pub s: T,
}

impl<T: FloatScalar> Givens<T> {
    /// Rotation with `G * [a; b] = [r; 0]`; returns `(G, r)`.
    ///
    /// ```
    /// use decompose::kernels::Givens;
    /// let (g, r) = Givens::new(3.0_f64, 4.0);
    /// assert!((r - 5.0).abs() < 1e-15);
    /// assert!((-g.s * 3.0 + g.c * 4.0).abs() < 1e-15);
    /// ```
    #[inline]
    pub fn new(a: T, b: T) -> (Self, T) {
        if b == T::zero() {
            return (Self::identity(), a);
        }
        let r = hypot(a, b);
        (
            Self {
                c: a / r,
                s: b / r,
            },
            r,
        )
    }

    #[inline]
    pub fn identity() -> Self {
        Self {
            c: T::one(),
            s: T::zero(),
        }
    }

    /// `M[:, j], M[:, k] <- (c·x + s·y, c·y - s·x)` over all rows.
    ///
    /// This is `M * Gᵀ` restricted to columns `j` and `k`.
    #[inline]
    pub fn rotate_cols(&self, m: &mut impl MatrixMut<T>, j: usize, k: usize) {
        let (x, y) = m.col_pair_mut(j, k, 0);
        rotate_pair(x, y, self.c, self.s);
    }

    /// `M[i, cols], M[k, cols] <- (c·x + s·y, c·y - s·x)`, i.e. `G * M`
    /// restricted to rows `i` and `k`.
    #[inline]
    pub fn rotate_rows(&self, m: &mut impl MatrixMut<T>, i: usize, k: usize, cols: Range<usize>) {
        for j in cols {
            let x = *m.get(i, j);
            let y = *m.get(k, j);
            *m.get_mut(i, j) = self.c * x + self.s * y;
            *m.get_mut(k, j) = self.c * y - self.s * x;
        }
    }
}

/// In-place 2-D rotation of paired slices: `(x, y) <- (c·x + s·y, c·y - s·x)`.
#[inline]
pub fn rotate_pair<T: FloatScalar>(x: &mut [T], y: &mut [T], c: T, s: T) {
    debug_assert_eq!(x.len(), y.len());
    for (xi, yi) in x.iter_mut().zip(y.iter_mut()) {
        let (a, b) = (*xi, *yi);
        *xi = c * a + s * b;
        *yi = c * b - s * a;
    }
}
