//! Primitive kernels shared by every reduction and iteration.
//!
//! Everything here works on slices or on column pairs of a [`MatrixMut`],
//! so the same code serves owned matrices and caller-owned views. Column
//! storage is contiguous, which is what keeps the slice kernels tight.
//!
//! [`MatrixMut`]: crate::traits::MatrixMut

mod givens;
mod householder;

pub use givens::{rotate_pair, Givens};
pub use householder::Reflector;

use crate::traits::FloatScalar;

/// Dot product of two equal-length slices.
///
/// Four independent accumulators break the add dependency chain so the
/// compiler can keep several lanes in flight.
#[inline]
pub fn dot<T: FloatScalar>(a: &[T], b: &[T]) -> T {
    debug_assert_eq!(a.len(), b.len());
    let n = a.len().min(b.len());
    let chunks = n / 4;
    let (mut s0, mut s1, mut s2, mut s3) = (T::zero(), T::zero(), T::zero(), T::zero());
    for c in 0..chunks {
        let i = c * 4;
        s0 = s0 + a[i] * b[i];
        s1 = s1 + a[i + 1] * b[i + 1];
        s2 = s2 + a[i + 2] * b[i + 2];
        s3 = s3 + a[i + 3] * b[i + 3];
    }
    let mut sum = (s0 + s1) + (s2 + s3);
    for i in (chunks * 4)..n {
        sum = sum + a[i] * b[i];
    }
    sum
}

/// `y -= alpha * x`.
#[inline]
pub fn axpy_neg<T: FloatScalar>(y: &mut [T], alpha: T, x: &[T]) {
    debug_assert_eq!(x.len(), y.len());
    for (yi, &xi) in y.iter_mut().zip(x) {
        *yi = *yi - alpha * xi;
    }
}

/// Euclidean norm of `x`, scaled so intermediate squares cannot overflow
/// or underflow.
///
/// ```
/// use decompose::kernels::norm2;
/// assert_eq!(norm2(&[3.0_f64, 4.0]), 5.0);
/// assert_eq!(norm2(&[1e200_f64, 1e200]), 1e200 * 2.0_f64.sqrt());
/// ```
pub fn norm2<T: FloatScalar>(x: &[T]) -> T {
    let mut scale = T::zero();
    let mut ssq = T::one();
    for &xi in x {
        if xi == T::zero() {
            continue;
        }
        let a = xi.abs();
        if scale < a {
            let r = scale / a;
            ssq = T::one() + ssq * r * r;
            scale = a;
        } else {
            let r = a / scale;
            ssq = ssq + r * r;
        }
    }
    scale * ssq.sqrt()
}

/// `sqrt(a² + b²)` without destructive overflow or underflow.
///
/// ```
/// use decompose::kernels::hypot;
/// assert_eq!(hypot(3.0_f64, -4.0), 5.0);
/// assert_eq!(hypot(0.0_f64, 0.0), 0.0);
/// ```
#[inline]
pub fn hypot<T: FloatScalar>(a: T, b: T) -> T {
    let (a, b) = (a.abs(), b.abs());
    let (big, small) = if a > b { (a, b) } else { (b, a) };
    if big == T::zero() {
        return T::zero();
    }
    let r = small / big;
    big * (T::one() + r * r).sqrt()
}

/// `|a|` carrying the sign of `b` (zero counts as positive).
#[inline]
pub(crate) fn with_sign<T: FloatScalar>(a: T, b: T) -> T {
    if b >= T::zero() {
        a.abs()
    } else {
        -a.abs()
    }
}
