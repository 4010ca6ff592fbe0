use core::fmt;

/// Decomposition requested from the engine or a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Singular value decomposition.
    Svd,
    /// Eigendecomposition of a symmetric matrix.
    SymmetricEigen,
    /// Eigendecomposition of a general square matrix.
    Eigen,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Svd => write!(f, "svd"),
            Operation::SymmetricEigen => write!(f, "symmetric eigendecomposition"),
            Operation::Eigen => write!(f, "eigendecomposition"),
        }
    }
}

/// Errors from decomposition routines.
///
/// Two classes are kept apart: configuration errors (wrong shapes, missing
/// backend routines) are detected before any arithmetic happens, while
/// [`LinalgError::NoConvergence`] means the input was well formed but the
/// iteration ran out of budget.
///
/// ```
/// use decompose::{DenseMatrix, LinalgError};
///
/// let a = DenseMatrix::from_rows(2, 3, &[1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0]);
/// let err = decompose::eig(&a).unwrap_err();
/// assert_eq!(err, LinalgError::NotSquare { nrows: 2, ncols: 3 });
/// assert!(err.is_configuration());
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LinalgError {
    /// An output or accumulator buffer has the wrong extents.
    #[error(
        "dimension mismatch: expected {}x{}, got {}x{}",
        .expected.0,
        .expected.1,
        .got.0,
        .got.1
    )]
    DimensionMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },

    /// A square matrix was required.
    #[error("matrix must be square, got {nrows}x{ncols}")]
    NotSquare { nrows: usize, ncols: usize },

    /// A flat buffer does not hold the number of elements its shape implies.
    #[error("buffer holds {got} elements, shape needs {expected}")]
    BufferLength { expected: usize, got: usize },

    /// The backend advertised an operation it does not implement.
    #[error("backend `{backend}` does not provide {op}")]
    Unsupported {
        backend: &'static str,
        op: Operation,
    },

    /// A native backend reported a failure of its own.
    #[error("backend `{backend}` failed: {message}")]
    Backend {
        backend: &'static str,
        message: alloc::string::String,
    },

    /// The iteration exhausted its sweep budget without deflating.
    #[error("{op} did not converge within {iterations} iterations")]
    NoConvergence { op: Operation, iterations: usize },
}

impl LinalgError {
    /// `true` for errors caused by the call setup rather than the numbers.
    pub fn is_configuration(&self) -> bool {
        !matches!(
            self,
            LinalgError::NoConvergence { .. } | LinalgError::Backend { .. }
        )
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, LinalgError>;
