//! Native backend on top of the `faer` crate.
//!
//! Inputs are converted to `f64`, decomposed by faer, and the factors are
//! translated back into the crate's ordering and sign conventions.

use alloc::format;
use alloc::vec::Vec;
use core::fmt::Debug;

use faer::{Mat, MatRef, Side};
use num_complex::Complex;
use num_traits::{NumCast, ToPrimitive};

use super::{Backend, Capabilities};
use crate::dense::DenseMatrix;
use crate::error::{LinalgError, Result};
use crate::linalg::{
    sort_values, swap_cols, Eigen, EigenVectors, EigenvalueBlock, Svd, SymmetricEigen,
};
use crate::traits::{FloatScalar, MatrixRef};

/// Routes all three decompositions to faer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Faer;

impl Backend for Faer {
    const NAME: &'static str = "faer";
    const CAPABILITIES: Capabilities = Capabilities::FULL;

    fn svd<T: FloatScalar>(a: &impl MatrixRef<T>) -> Result<Svd<T>> {
        let (m, n) = a.shape();
        let k = m.min(n);
        if k == 0 {
            return Ok(Svd::from_parts(
                DenseMatrix::zeros(m, 0),
                Vec::new(),
                DenseMatrix::zeros(0, n),
            ));
        }

        let mat = to_faer(a);
        let svd = mat.thin_svd().map_err(backend_error)?;
        let mut u = from_faer::<T>(svd.U());
        let mut v = from_faer::<T>(svd.V());
        let mut s: Vec<T> = svd.S().column_vector().iter().map(|&x| cast(x)).collect();

        // faer already sorts; keep the guarantee independent of its version
        sort_values(&mut s, |x, y| x > y, |i, j| {
            swap_cols(&mut u, i, j);
            swap_cols(&mut v, i, j);
        });
        Ok(Svd::from_parts(u, s, v.transpose()))
    }

    fn eig_symmetric<T: FloatScalar>(a: &impl MatrixRef<T>) -> Result<SymmetricEigen<T>> {
        let n = a.nrows();
        if n == 0 {
            return Ok(SymmetricEigen::from_parts(Vec::new(), DenseMatrix::zeros(0, 0)));
        }

        let mat = to_faer(a);
        let evd = mat.self_adjoint_eigen(Side::Lower).map_err(backend_error)?;
        let mut q = from_faer::<T>(evd.U());
        let mut w: Vec<T> = evd.S().column_vector().iter().map(|&x| cast(x)).collect();
        sort_values(&mut w, |x, y| x < y, |i, j| swap_cols(&mut q, i, j));
        Ok(SymmetricEigen::from_parts(w, q))
    }

    fn eig<T: FloatScalar>(a: &impl MatrixRef<T>) -> Result<Eigen<T>> {
        let n = a.nrows();
        if n == 0 {
            return Ok(Eigen::from_blocks(
                Vec::new(),
                EigenVectors {
                    re: DenseMatrix::zeros(0, 0),
                    im: DenseMatrix::zeros(0, 0),
                },
            ));
        }

        let mat = to_faer(a);
        let evd = mat.eigen().map_err(backend_error)?;
        let values: Vec<(f64, f64)> = evd
            .S()
            .column_vector()
            .iter()
            .map(|z| (z.re, z.im))
            .collect();
        let vecs = evd.U();
        let column = |j: usize| -> Vec<Complex<f64>> {
            (0..n)
                .map(|i| {
                    let z = vecs.get(i, j);
                    Complex::new(z.re, z.im)
                })
                .collect()
        };

        let mut blocks = Vec::with_capacity(n);
        let mut re = DenseMatrix::<T>::zeros(n, n);
        let mut im = DenseMatrix::<T>::zeros(n, n);
        let mut put = |j: usize, x: &[Complex<f64>], conj: bool| {
            let norm = x.iter().map(|z| z.norm_sqr()).sum::<f64>().sqrt();
            let scale = if norm > 0.0 { norm.recip() } else { 1.0 };
            for (i, z) in x.iter().enumerate() {
                re[(i, j)] = cast::<T>(z.re * scale);
                let zi = if conj { -z.im } else { z.im };
                im[(i, j)] = cast::<T>(zi * scale);
            }
        };

        let mut j = 0;
        while j < n {
            let (lr, li) = values[j];
            if li == 0.0 {
                blocks.push(EigenvalueBlock::Real(cast(lr)));
                put(j, &column(j), false);
                j += 1;
                continue;
            }
            if j + 1 >= n {
                return Err(LinalgError::Backend {
                    backend: Self::NAME,
                    message: format!("unpaired complex eigenvalue {lr} + {li}i"),
                });
            }
            // Store the pair as (re, +im) then (re, -im)
            let src = if li > 0.0 { j } else { j + 1 };
            let x = column(src);
            blocks.push(EigenvalueBlock::ComplexPair {
                re: cast(lr),
                im: cast(li.abs()),
            });
            put(j, &x, false);
            put(j + 1, &x, true);
            j += 2;
        }

        Ok(Eigen::from_blocks(blocks, EigenVectors { re, im }))
    }
}

fn to_faer<T: FloatScalar>(a: &impl MatrixRef<T>) -> Mat<f64> {
    Mat::from_fn(a.nrows(), a.ncols(), |i, j| a.get(i, j).to_f64().unwrap_or(f64::NAN))
}

fn from_faer<T: FloatScalar>(m: MatRef<'_, f64>) -> DenseMatrix<T> {
    DenseMatrix::from_fn(m.nrows(), m.ncols(), |i, j| cast(*m.get(i, j)))
}

#[inline]
fn cast<T: FloatScalar>(x: f64) -> T {
    <T as NumCast>::from(x).unwrap_or_else(T::nan)
}

fn backend_error(e: impl Debug) -> LinalgError {
    LinalgError::Backend {
        backend: Faer::NAME,
        message: format!("{e:?}"),
    }
}
