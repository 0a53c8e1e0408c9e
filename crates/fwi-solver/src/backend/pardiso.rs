//! MKL PARDISO backend (feature-gated).
//!
//! PARDISO is the sparse direct solver the original inversion workflow used
//! for the real-augmented Helmholtz systems: a multithreaded supernodal
//! LU/LDLT factorization that consumes exactly the compressed-column layout
//! `RealSystemData` carries.
//!
//! # Requirements
//!
//! - Intel MKL installed on the system
//! - `MKLROOT` environment variable set
//! - Build with `cargo build --features pardiso`
//!
//! # Intended Usage
//!
//! ```ignore
//! // The PARDISO backend will:
//! // 1. Hand the CSC column pointers / row indices / values to
//! //    pardiso(..., mtype = 11 /* real unsymmetric */, ...)
//! //    phase 11 (analysis) and phase 22 (numerical factorization)
//! // 2. Run phase 33 (solve) against the dense right-hand side
//! // 3. Copy the solution into a DVector and release with phase -1
//! ```

use super::traits::*;
use nalgebra::DVector;

/// MKL PARDISO solver backend.
///
/// Placeholder until the MKL FFI binding is wired in; `solve_real` reports a
/// clear error so callers fall back to the native backend explicitly.
pub struct PardisoBackend;

impl PardisoBackend {
    pub fn new() -> Self {
        // Future: pardisoinit() call and iparm configuration
        Self
    }
}

impl Default for PardisoBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectSolver for PardisoBackend {
    fn solve_real(
        &self,
        system: &RealSystemData,
    ) -> Result<(DVector<f64>, SolveInfo), BackendError> {
        system.check_shape()?;

        // PARDISO solve workflow:
        //
        // 1. Analysis + factorization:
        //    pardiso(pt, maxfct, mnum, mtype, phase = 12,
        //            n, a, ia, ja, ..., iparm, msglvl, ...)
        //    with (ia, ja, a) taken from system.matrix.csc_data()
        //
        // 2. Solve:
        //    pardiso(..., phase = 33, ..., b = system.rhs.as_slice(), x, ...)
        //
        // 3. Release internal memory:
        //    pardiso(..., phase = -1, ...)

        Err(BackendError(
            "PARDISO backend not yet implemented. Build with the native backend or install MKL."
                .into(),
        ))
    }

    fn name(&self) -> &str {
        "pardiso"
    }
}
