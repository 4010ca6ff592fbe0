use super::{Backend, Capabilities};
use crate::config::DecompConfig;
use crate::error::Result;
use crate::linalg::{Eigen, Svd, SymmetricEigen};
use crate::traits::{FloatScalar, MatrixRef};

/// The built-in engine in [`crate::linalg`], with default settings.
///
/// As a [`Backend`] it advertises nothing, so a `Dispatcher<Fallback>`
/// routes every operation to the same code these functions call.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fallback;

impl Backend for Fallback {
    const NAME: &'static str = "fallback";
    const CAPABILITIES: Capabilities = Capabilities::NONE;
}

impl Fallback {
    pub fn svd<T: FloatScalar>(a: &impl MatrixRef<T>) -> Result<Svd<T>> {
        Svd::with_config(a, &DecompConfig::default())
    }

    pub fn eig_symmetric<T: FloatScalar>(a: &impl MatrixRef<T>) -> Result<SymmetricEigen<T>> {
        SymmetricEigen::with_config(a, &DecompConfig::default())
    }

    pub fn eig<T: FloatScalar>(a: &impl MatrixRef<T>) -> Result<Eigen<T>> {
        Eigen::with_config(a, &DecompConfig::default())
    }
}

/// Thin SVD in the fallback engine with `cfg`, whatever backend is active.
pub fn svd_with<T: FloatScalar>(a: &impl MatrixRef<T>, cfg: &DecompConfig) -> Result<Svd<T>> {
    Svd::with_config(a, cfg)
}

/// Symmetric eigendecomposition in the fallback engine with `cfg`.
pub fn eig_symmetric_with<T: FloatScalar>(
    a: &impl MatrixRef<T>,
    cfg: &DecompConfig,
) -> Result<SymmetricEigen<T>> {
    SymmetricEigen::with_config(a, cfg)
}

/// General eigendecomposition in the fallback engine with `cfg`.
pub fn eig_with<T: FloatScalar>(a: &impl MatrixRef<T>, cfg: &DecompConfig) -> Result<Eigen<T>> {
    Eigen::with_config(a, cfg)
}
