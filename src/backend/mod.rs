//! Backend selection and capability dispatch.
//!
//! A [`Backend`] declares at compile time which decompositions it can run
//! natively through its [`Backend::CAPABILITIES`] constant. The
//! [`Dispatcher`] reads that constant and sends each operation either to
//! the backend or to the built-in fallback engine in [`crate::linalg`].
//! Because the capabilities are an associated `const`, the branch is
//! resolved once per monomorphization and not re-evaluated per call.
//!
//! The backend used by the crate-level [`svd`], [`eig`] and
//! [`eig_symmetric`] functions is [`ActiveBackend`], chosen by Cargo
//! feature:
//!
//! | Feature | `ActiveBackend` | Native operations |
//! |---------|-----------------|-------------------|
//! | (none)  | [`Fallback`]    | none, everything runs in the fallback engine |
//! | `faer`  | `Faer`          | SVD, symmetric and general eigendecomposition |

mod fallback;
#[cfg(feature = "faer")]
mod faer;

pub use self::fallback::{eig_symmetric_with, eig_with, svd_with, Fallback};
#[cfg(feature = "faer")]
pub use self::faer::Faer;

use core::marker::PhantomData;

use log::trace;

use crate::error::{LinalgError, Operation, Result};
use crate::linalg::{check_square, Eigen, Svd, SymmetricEigen};
use crate::traits::{FloatScalar, MatrixRef};

/// Which decompositions a backend provides natively.
///
/// ```
/// use decompose::backend::Capabilities;
/// use decompose::Operation;
///
/// let caps = Capabilities::NONE.with(Operation::Svd);
/// assert!(caps.supports(Operation::Svd));
/// assert!(!caps.supports(Operation::Eigen));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Capabilities {
    pub svd: bool,
    pub symmetric_eigen: bool,
    pub eigen: bool,
}

impl Capabilities {
    /// Nothing native, e.g. a library that only ships LU and Cholesky.
    pub const NONE: Self = Self {
        svd: false,
        symmetric_eigen: false,
        eigen: false,
    };

    pub const FULL: Self = Self {
        svd: true,
        symmetric_eigen: true,
        eigen: true,
    };

    /// Add one operation.
    pub const fn with(mut self, op: Operation) -> Self {
        match op {
            Operation::Svd => self.svd = true,
            Operation::SymmetricEigen => self.symmetric_eigen = true,
            Operation::Eigen => self.eigen = true,
        }
        self
    }

    pub const fn supports(&self, op: Operation) -> bool {
        match op {
            Operation::Svd => self.svd,
            Operation::SymmetricEigen => self.symmetric_eigen,
            Operation::Eigen => self.eigen,
        }
    }
}

/// Path an operation takes through the [`Dispatcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// The backend's own routine.
    Native,
    /// The built-in fallback engine.
    Fallback,
}

/// A linear-algebra library the dispatcher can route to.
///
/// Implementors override the methods for the operations they list in
/// [`CAPABILITIES`](Backend::CAPABILITIES). Native results must already be
/// translated to the crate's contract: thin `U`/`Vᵀ`, singular values
/// descending, symmetric eigenvalues ascending, complex pairs as
/// `(re, +im)` then `(re, -im)`.
///
/// The default methods report [`LinalgError::Unsupported`], so a backend
/// that claims an operation without implementing it fails with a
/// configuration error before any arithmetic.
pub trait Backend {
    /// Name used in errors and log output.
    const NAME: &'static str;
    const CAPABILITIES: Capabilities;

    fn svd<T: FloatScalar>(a: &impl MatrixRef<T>) -> Result<Svd<T>> {
        let _ = a;
        Err(unsupported::<Self>(Operation::Svd))
    }

    fn eig_symmetric<T: FloatScalar>(a: &impl MatrixRef<T>) -> Result<SymmetricEigen<T>> {
        let _ = a;
        Err(unsupported::<Self>(Operation::SymmetricEigen))
    }

    fn eig<T: FloatScalar>(a: &impl MatrixRef<T>) -> Result<Eigen<T>> {
        let _ = a;
        Err(unsupported::<Self>(Operation::Eigen))
    }
}

fn unsupported<B: Backend + ?Sized>(op: Operation) -> LinalgError {
    LinalgError::Unsupported {
        backend: B::NAME,
        op,
    }
}

/// Routes each decomposition to backend `B` or to the fallback engine.
///
/// ```
/// use decompose::backend::{Dispatcher, Fallback, Route};
/// use decompose::{DenseMatrix, Operation};
///
/// assert_eq!(Dispatcher::<Fallback>::route(Operation::Svd), Route::Fallback);
///
/// let a = DenseMatrix::from_rows(2, 2, &[2.0_f64, 0.0, 0.0, 1.0]);
/// let svd = Dispatcher::<Fallback>::svd(&a).unwrap();
/// assert_eq!(svd.singular_values(), &[2.0, 1.0]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Dispatcher<B>(PhantomData<B>);

impl<B: Backend> Dispatcher<B> {
    /// Path taken by `op` for this backend.
    pub const fn route(op: Operation) -> Route {
        if B::CAPABILITIES.supports(op) {
            Route::Native
        } else {
            Route::Fallback
        }
    }

    pub fn svd<T: FloatScalar>(a: &impl MatrixRef<T>) -> Result<Svd<T>> {
        match Self::route(Operation::Svd) {
            Route::Native => {
                trace!("svd {}x{}: native ({})", a.nrows(), a.ncols(), B::NAME);
                B::svd(a)
            }
            Route::Fallback => {
                trace!("svd {}x{}: fallback", a.nrows(), a.ncols());
                Fallback::svd(a)
            }
        }
    }

    pub fn eig_symmetric<T: FloatScalar>(a: &impl MatrixRef<T>) -> Result<SymmetricEigen<T>> {
        let n = check_square(a)?;
        match Self::route(Operation::SymmetricEigen) {
            Route::Native => {
                trace!("symmetric eigen {}x{}: native ({})", n, n, B::NAME);
                B::eig_symmetric(a)
            }
            Route::Fallback => {
                trace!("symmetric eigen {}x{}: fallback", n, n);
                Fallback::eig_symmetric(a)
            }
        }
    }

    pub fn eig<T: FloatScalar>(a: &impl MatrixRef<T>) -> Result<Eigen<T>> {
        let n = check_square(a)?;
        match Self::route(Operation::Eigen) {
            Route::Native => {
                trace!("eigen {}x{}: native ({})", n, n, B::NAME);
                B::eig(a)
            }
            Route::Fallback => {
                trace!("eigen {}x{}: fallback", n, n);
                Fallback::eig(a)
            }
        }
    }
}

/// Backend selected by Cargo features.
#[cfg(feature = "faer")]
pub type ActiveBackend = Faer;

/// Backend selected by Cargo features.
#[cfg(not(feature = "faer"))]
pub type ActiveBackend = Fallback;

/// Thin SVD through [`ActiveBackend`].
///
/// ```
/// use decompose::DenseMatrix;
///
/// let a = DenseMatrix::from_rows(2, 2, &[3.0_f64, 0.0, 0.0, 4.0]);
/// let svd = decompose::svd(&a).unwrap();
/// assert!((svd.singular_values()[0] - 4.0).abs() < 1e-12);
/// assert!((svd.singular_values()[1] - 3.0).abs() < 1e-12);
/// ```
pub fn svd<T: FloatScalar>(a: &impl MatrixRef<T>) -> Result<Svd<T>> {
    Dispatcher::<ActiveBackend>::svd(a)
}

/// Symmetric eigendecomposition through [`ActiveBackend`].
pub fn eig_symmetric<T: FloatScalar>(a: &impl MatrixRef<T>) -> Result<SymmetricEigen<T>> {
    Dispatcher::<ActiveBackend>::eig_symmetric(a)
}

/// General eigendecomposition through [`ActiveBackend`].
///
/// ```
/// use decompose::DenseMatrix;
///
/// let a = DenseMatrix::from_rows(2, 2, &[4.0_f64, 0.0, 3.0, -5.0]);
/// let eig = decompose::eig(&a).unwrap();
/// let mut re: Vec<f64> = eig.eigenvalues().iter().map(|z| z.re).collect();
/// re.sort_by(|a, b| a.partial_cmp(b).unwrap());
/// assert!((re[0] + 5.0).abs() < 1e-12 && (re[1] - 4.0).abs() < 1e-12);
/// ```
pub fn eig<T: FloatScalar>(a: &impl MatrixRef<T>) -> Result<Eigen<T>> {
    Dispatcher::<ActiveBackend>::eig(a)
}
