//! Sparse direct-solver abstraction layer.
//!
//! The complex Helmholtz system never reaches a backend directly: it is first
//! rewritten as a real system of twice the dimension, and only that real
//! compressed-column matrix crosses this boundary. The trait layer keeps the
//! assembly and transform code independent of the concrete solver library.
//!
//! # Backends
//!
//! - **Native** (default): dense nalgebra LU. No external dependencies,
//!   suitable for test and small forward-model sizes.
//! - **PARDISO** (optional, `--features pardiso`): Intel MKL's sparse direct
//!   solver, the one the surrounding inversion workflow standardizes on.
//!
//! # Architecture
//!
//! ```text
//! Element kernels (nalgebra SMatrix — small, dense, complex)
//!         │
//!         ▼
//! Assembly (complex COO triplets + real load vector)
//!         │
//!         ▼
//! Complex-to-real transform (real COO, doubled dimension)
//!         │
//!         ▼
//! Backend trait layer (DirectSolver, CSC + dense RHS)
//!    ┌────┴─────┐
//!    ▼          ▼
//! DenseLu    Pardiso
//! Backend    Backend
//! ```

pub mod native;
pub mod pardiso;
pub mod traits;

pub use native::DenseLuBackend;
pub use pardiso::PardisoBackend;
pub use traits::*;

/// Returns the default solver backend based on enabled features.
///
/// With `--features pardiso`: returns `PardisoBackend`.
/// Without: returns `DenseLuBackend`.
pub fn default_backend() -> Box<dyn DirectSolver> {
    #[cfg(feature = "pardiso")]
    {
        Box::new(PardisoBackend::new())
    }
    #[cfg(not(feature = "pardiso"))]
    {
        Box::new(DenseLuBackend)
    }
}
