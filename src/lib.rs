//! # decompose
//!
//! Dense singular value and eigenvalue decompositions for real `f32`/`f64`
//! matrices, no-std compatible (needs `alloc`). A self-contained fallback
//! engine implements every decomposition; an optional native backend
//! (`faer`) takes over the operations it provides.
//!
//! ## Quick start
//!
//! ```
//! use decompose::DenseMatrix;
//!
//! let a = DenseMatrix::from_rows(3, 3, &[
//!     2.0_f64, -1.0, 0.0,
//!     -1.0, 2.0, -1.0,
//!     0.0, -1.0, 2.0,
//! ]);
//!
//! let svd = decompose::svd(&a).unwrap();
//! assert!(svd.reconstruct().approx_eq(&a, 1e-12));
//!
//! // Ascending: 2 - √2, 2, 2 + √2
//! let sym = decompose::eig_symmetric(&a).unwrap();
//! assert!((sym.eigenvalues()[1] - 2.0).abs() < 1e-12);
//!
//! let eig = decompose::eig(&a).unwrap();
//! assert!(eig.is_real());
//! ```
//!
//! ## Modules
//!
//! - [`dense`]: Owned column-major [`DenseMatrix<T>`] and the borrowed
//!   [`MatrixViewMut`] over a caller's buffer. Both implement
//!   [`MatrixRef`] / [`MatrixMut`], so every routine accepts either.
//!
//! - [`linalg`]: The fallback engine: Householder bidiagonalization with
//!   Golub–Kahan QR ([`Svd`]), tridiagonalization with implicit QL
//!   ([`SymmetricEigen`]), Hessenberg reduction with Francis double-shift QR
//!   ([`Schur`]) and back-substitution for general eigenvectors ([`Eigen`]).
//!   The `*_into` functions write into caller-owned buffers.
//!
//! - [`backend`]: The [`Backend`](backend::Backend) trait, compile-time
//!   [`Capabilities`](backend::Capabilities) and the
//!   [`Dispatcher`](backend::Dispatcher) that routes each operation to a
//!   native routine or the fallback engine.
//!
//! - [`kernels`]: Householder reflectors, Givens rotations and slice
//!   primitives shared by the reductions.
//!
//! - [`traits`]: Element and matrix-access traits:
//!   - [`Scalar`] / [`FloatScalar`]: element types (`f32`, `f64`)
//!   - [`MatrixRef`] / [`MatrixMut`]: generic column-major access
//!
//! Iterative routines take a [`DecompConfig`] for their sweep budget and
//! exceptional-shift period, and report [`LinalgError::NoConvergence`]
//! when the budget runs out.
//!
//! ## Cargo features
//!
//! | Feature | Default  | Description |
//! |---------|----------|-------------|
//! | `std`   | yes      | Hardware FPU via system libm |
//! | `libm`  | baseline | Pure-Rust software float fallback |
//! | `faer`  | no       | Route all three decompositions to `faer` (implies `std`) |
//! | `all`   | no       | All features: `std` + `faer` |

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod backend;
pub mod config;
pub mod dense;
pub mod error;
pub mod kernels;
pub mod linalg;
pub mod traits;

pub use backend::{eig, eig_symmetric, eig_symmetric_with, eig_with, svd, svd_with};
pub use config::DecompConfig;
pub use dense::{DenseMatrix, MatrixViewMut};
pub use error::{LinalgError, Operation, Result};
pub use linalg::eigen::{eigenvalues, eigenvalues_with};
pub use linalg::schur::schur_into;
pub use linalg::svd::{singular_values, singular_values_with, svd_full, svd_into};
pub use linalg::symmetric_eigen::{
    eig_symmetric_into, eigenvalues_symmetric, eigenvalues_symmetric_with,
};
pub use linalg::{Eigen, EigenVectors, EigenvalueBlock, Schur, Svd, SymmetricEigen};
pub use traits::{FloatScalar, MatrixMut, MatrixRef, Scalar};

pub use num_complex::Complex;
