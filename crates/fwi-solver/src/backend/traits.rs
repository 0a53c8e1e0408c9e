//! Backend trait definitions for the sparse direct solve.
//!
//! These traits abstract over the concrete library used for the global
//! real-valued linear solve. Element-level computations remain in nalgebra
//! (small, dense matrices); the assembled system crosses this boundary in
//! compressed-column form.

use nalgebra::DVector;
use nalgebra_sparse::CscMatrix;

/// Error type for backend operations.
#[derive(Debug, Clone)]
pub struct BackendError(pub String);

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for BackendError {}

impl From<String> for BackendError {
    fn from(s: String) -> Self {
        BackendError(s)
    }
}

impl From<&str> for BackendError {
    fn from(s: &str) -> Self {
        BackendError(s.to_string())
    }
}

/// A real linear system ready for solving: Ke * y = fe.
///
/// Produced by the complex-to-real transform, consumed by any `DirectSolver`
/// backend. The matrix is in compressed-column (CSC) form, the layout every
/// candidate direct solver accepts.
pub struct RealSystemData {
    /// System matrix in compressed-column form
    pub matrix: CscMatrix<f64>,
    /// Dense right-hand side
    pub rhs: DVector<f64>,
}

impl RealSystemData {
    /// Check that the matrix is square and matches the right-hand side.
    pub fn check_shape(&self) -> Result<(), BackendError> {
        if self.matrix.nrows() != self.matrix.ncols() {
            return Err(BackendError(format!(
                "system matrix is {}x{}, expected square",
                self.matrix.nrows(),
                self.matrix.ncols()
            )));
        }
        if self.rhs.len() != self.matrix.nrows() {
            return Err(BackendError(format!(
                "right-hand side has {} entries for a {}-row matrix",
                self.rhs.len(),
                self.matrix.nrows()
            )));
        }
        Ok(())
    }
}

/// Solver diagnostic info.
#[derive(Debug)]
pub struct SolveInfo {
    /// Number of iterations (1 for direct solvers)
    pub iterations: usize,
    /// Final residual norm (if available)
    pub residual_norm: Option<f64>,
    /// Human-readable solver name (e.g., "dense-LU", "MKL-PARDISO")
    pub solver_name: String,
}

/// Trait for a sparse direct-solver backend.
///
/// Implementations solve Ke * y = fe given the real system data. Singular or
/// ill-conditioned systems must surface as `BackendError`, never as a
/// garbage solution.
pub trait DirectSolver: Send + Sync {
    /// Solve Ke * y = fe and return the solution vector.
    fn solve_real(
        &self,
        system: &RealSystemData,
    ) -> Result<(DVector<f64>, SolveInfo), BackendError>;

    /// Human-readable name of this backend.
    fn name(&self) -> &str;
}
