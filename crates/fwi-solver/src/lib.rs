//! Steady-state 2D Helmholtz finite-element solver core.
//!
//! The pipeline runs in four stages:
//!
//! 1. **Element kernels** ([`elements`]) integrate the complex 4x4 local
//!    matrix and real local load for each bilinear quadrilateral.
//! 2. **Assembly** ([`assembly`]) scatters the local contributions into a
//!    global sparse triplet matrix and dense load vector.
//! 3. **Real reformulation** ([`complex_system`]) rewrites the complex
//!    system as an equivalent real block system of twice the dimension.
//! 4. **Backends** ([`backend`]) solve the real sparse system and hand the
//!    solution back for extraction into the complex field.
//!
//! [`HelmholtzSolver`] drives the stages end to end and fires registered
//! callbacks when the field is ready.

pub mod assembly;
pub mod backend;
pub mod callbacks;
pub mod complex_system;
pub mod elements;
pub mod error;
pub mod helmholtz;

pub use assembly::HelmholtzSystem;
pub use backend::{default_backend, BackendError, DirectSolver, RealSystemData, SolveInfo};
pub use callbacks::{CallbackRegistry, SolveCompleted, ON_SOLVE_COMPLETE};
pub use complex_system::{extract_complex_solution, to_real_system};
pub use elements::{default_kernel, BilinearQuad, ElementKernel, FusedQuad};
pub use error::{Result, SolverError};
pub use helmholtz::{HelmholtzSolver, SolveReport};
