//! Steady-state Helmholtz solve pipeline.
//!
//! `HelmholtzSolver` ties the stages together: assemble the complex system
//! from the mesh, rewrite it as the real block system, hand that to a
//! sparse direct backend, and fold the real solution back into the complex
//! field. Registered callbacks fire once the field is available.

use crate::assembly::HelmholtzSystem;
use crate::backend::{default_backend, DirectSolver, RealSystemData, SolveInfo};
use crate::callbacks::{CallbackRegistry, SolveCompleted, ON_SOLVE_COMPLETE};
use crate::complex_system::{extract_complex_solution, to_real_system};
use crate::elements::{default_kernel, ElementKernel};
use crate::error::Result;
use fwi_mesh::QuadMesh;
use nalgebra::DVector;
use nalgebra_sparse::CscMatrix;
use num_complex::Complex64;
use serde::Serialize;

/// Summary of a completed solve, suitable for JSON reporting.
#[derive(Debug, Clone, Serialize)]
pub struct SolveReport {
    pub n_points: usize,
    pub n_elements: usize,
    pub omega: f64,
    pub kernel: String,
    pub backend: String,
    pub solver_name: String,
    pub iterations: usize,
    /// Residual norm if the backend computed one
    pub residual_norm: Option<f64>,
}

/// Orchestrates assembly, the real reformulation, and the backend solve.
pub struct HelmholtzSolver {
    kernel: Box<dyn ElementKernel>,
    backend: Box<dyn DirectSolver>,
    callbacks: CallbackRegistry,
}

impl Default for HelmholtzSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl HelmholtzSolver {
    /// Solver with the default element kernel and linear backend.
    pub fn new() -> Self {
        Self {
            kernel: default_kernel(),
            backend: default_backend(),
            callbacks: CallbackRegistry::new(),
        }
    }

    pub fn with_kernel(mut self, kernel: Box<dyn ElementKernel>) -> Self {
        self.kernel = kernel;
        self
    }

    pub fn with_backend(mut self, backend: Box<dyn DirectSolver>) -> Self {
        self.backend = backend;
        self
    }

    /// Register a handler for the solve-complete event. Handlers run in
    /// registration order after each successful solve.
    pub fn on_solve_complete<F>(mut self, handler: F) -> Self
    where
        F: Fn(&SolveCompleted) + Send + Sync + 'static,
    {
        self.callbacks.on(ON_SOLVE_COMPLETE, handler);
        self
    }

    /// Solve the steady-state problem on `mesh` at angular frequency
    /// `omega` and return the complex field, one value per mesh point.
    pub fn solve(&self, mesh: &QuadMesh, omega: f64) -> Result<DVector<Complex64>> {
        let (field, _) = self.solve_inner(mesh, omega)?;
        Ok(field)
    }

    /// Like [`solve`](Self::solve), but also return a report describing
    /// the run.
    pub fn solve_with_report(
        &self,
        mesh: &QuadMesh,
        omega: f64,
    ) -> Result<(DVector<Complex64>, SolveReport)> {
        let (field, info) = self.solve_inner(mesh, omega)?;
        let report = SolveReport {
            n_points: mesh.n_points(),
            n_elements: mesh.n_elements(),
            omega,
            kernel: self.kernel.name().to_string(),
            backend: self.backend.name().to_string(),
            solver_name: info.solver_name,
            iterations: info.iterations,
            residual_norm: info.residual_norm,
        };
        Ok((field, report))
    }

    fn solve_inner(&self, mesh: &QuadMesh, omega: f64) -> Result<(DVector<Complex64>, SolveInfo)> {
        let system = HelmholtzSystem::assemble(mesh, omega, self.kernel.as_ref())?;
        let (ke, fe) = to_real_system(&system.matrix, &system.load)?;

        // CSC conversion sums duplicate triplets from the element scatter.
        let data = RealSystemData {
            matrix: CscMatrix::from(&ke),
            rhs: fe,
        };
        let (ye, info) = self.backend.solve_real(&data)?;
        let field = extract_complex_solution(&ye)?;

        self.callbacks.dispatch(
            ON_SOLVE_COMPLETE,
            &SolveCompleted {
                field: &field,
                mesh,
                omega,
            },
        );
        Ok((field, info))
    }
}
