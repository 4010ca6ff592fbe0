use core::fmt::Debug;
use num_traits::{Float, Num, NumCast, One, Zero};

/// Trait for types that can be stored in a matrix.
///
/// Blanket-implemented for all types satisfying the bounds.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Real floating-point element type accepted by every decomposition.
///
/// Covers `f32` and `f64`. Tolerances are expressed in terms of
/// [`FloatScalar::eps`] so the same code serves both precisions.
pub trait FloatScalar: Scalar + Float + NumCast + Send + Sync + 'static {
    /// Machine epsilon.
    #[inline]
    fn eps() -> Self {
        <Self as Float>::epsilon()
    }

    /// `2` in this type.
    #[inline]
    fn two() -> Self {
        Self::one() + Self::one()
    }

    /// `1/2` in this type.
    #[inline]
    fn half() -> Self {
        Self::one() / Self::two()
    }

    /// Convert a small literal into this type.
    ///
    /// Only used with constants that are exactly representable in `f32`.
    #[inline]
    fn lit(x: f64) -> Self {
        <Self as NumCast>::from(x).unwrap_or_else(Self::nan)
    }
}

impl<T: Scalar + Float + NumCast + Send + Sync + 'static> FloatScalar for T {}

/// Read-only access to a matrix-like type.
///
/// Storage is column-major: every column is a contiguous run of `nrows`
/// elements. Algorithms rely on this to hand column segments to the
/// slice kernels.
pub trait MatrixRef<T> {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
    fn get(&self, row: usize, col: usize) -> &T;

    /// Column `col` from `row_start` to the bottom of the matrix.
    fn col_as_slice(&self, col: usize, row_start: usize) -> &[T];

    /// Bounds-checked element access.
    #[inline]
    fn try_get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.nrows() && col < self.ncols() {
            Some(self.get(row, col))
        } else {
            None
        }
    }

    /// `(nrows, ncols)`.
    #[inline]
    fn shape(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }
}

/// Mutable access to a matrix-like type.
///
/// Extends `MatrixRef` with mutable element access, enabling the in-place
/// reductions to work on owned matrices and borrowed caller buffers alike.
pub trait MatrixMut<T>: MatrixRef<T> {
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T;

    fn col_as_mut_slice(&mut self, col: usize, row_start: usize) -> &mut [T];

    /// Two distinct columns, both starting at `row_start`.
    ///
    /// Panics if `a == b`.
    fn col_pair_mut(&mut self, a: usize, b: usize, row_start: usize) -> (&mut [T], &mut [T]);

    /// Swap two elements.
    #[inline]
    fn swap_elems(&mut self, a: (usize, usize), b: (usize, usize))
    where
        T: Copy,
    {
        let tmp = *self.get(a.0, a.1);
        *self.get_mut(a.0, a.1) = *self.get(b.0, b.1);
        *self.get_mut(b.0, b.1) = tmp;
    }
}

/// Split a column-major buffer into two disjoint column segments.
///
/// Shared by the [`MatrixMut::col_pair_mut`] implementations.
#[inline]
pub(crate) fn split_cols<T>(
    data: &mut [T],
    nrows: usize,
    a: usize,
    b: usize,
    row_start: usize,
) -> (&mut [T], &mut [T]) {
    assert_ne!(a, b, "col_pair_mut needs two distinct columns");
    let (lo, hi, swapped) = if a < b { (a, b, false) } else { (b, a, true) };
    let (head, tail) = data.split_at_mut(hi * nrows);
    let lo_col = &mut head[lo * nrows + row_start..(lo + 1) * nrows];
    let hi_col = &mut tail[row_start..nrows];
    if swapped {
        (hi_col, lo_col)
    } else {
        (lo_col, hi_col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_cols_disjoint() {
        // 3x3 column-major
        let mut data = [0.0_f64, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let (a, b) = split_cols(&mut data, 3, 2, 0, 1);
        assert_eq!(a, &[7.0, 8.0]);
        assert_eq!(b, &[1.0, 2.0]);
        a[0] = -1.0;
        b[1] = -2.0;
        assert_eq!(data[7], -1.0);
        assert_eq!(data[2], -2.0);
    }

    #[test]
    #[should_panic(expected = "distinct")]
    fn split_cols_same_column() {
        let mut data = [0.0_f64; 4];
        let _ = split_cols(&mut data, 2, 1, 1, 0);
    }

    #[test]
    fn float_helpers() {
        assert_eq!(<f64 as FloatScalar>::two(), 2.0);
        assert_eq!(<f32 as FloatScalar>::half(), 0.5);
        assert_eq!(<f64 as FloatScalar>::lit(0.75), 0.75);
        assert_eq!(<f64 as FloatScalar>::eps(), f64::EPSILON);
    }
}
