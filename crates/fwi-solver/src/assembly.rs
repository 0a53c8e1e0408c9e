//! Global assembly of the complex Helmholtz system.
//!
//! Assembles element contributions into the global system:
//! - K: complex sparse system matrix (COO triplets, duplicates summed on
//!   compression)
//! - f: real dense load vector
//!
//! ## Assembly Process
//!
//! 1. Validate mesh shapes (fail fast, before any element work)
//! 2. Compute every element's 4x4 local matrix / 4x1 local load via the
//!    configured kernel — the sweep is embarrassingly parallel and runs on
//!    rayon
//! 3. Scatter sequentially, in element order, so floating-point summation
//!    order is deterministic:
//!    - matrix: one triplet per ordered local node pair, at
//!      (connectivity[k], connectivity[l])
//!    - load: additive accumulation at connectivity[k]
//!
//! Shared nodes between adjacent elements superpose by triplet duplication;
//! the COO-to-CSC conversion sums duplicate (row, col) entries.

use crate::elements::{ElementKernel, KernelError};
use crate::error::{Result, SolverError};
use fwi_mesh::QuadMesh;
use nalgebra::DVector;
use nalgebra_sparse::CooMatrix;
use num_complex::Complex64;
use rayon::prelude::*;

/// The assembled complex linear system K * x = f for one solve request.
pub struct HelmholtzSystem {
    /// Complex system matrix (n_points x n_points), COO triplet form
    pub matrix: CooMatrix<Complex64>,
    /// Real load vector (n_points)
    pub load: DVector<f64>,
    /// Declared system dimension
    pub n_points: usize,
}

impl HelmholtzSystem {
    /// Assemble the global system from the mesh at angular frequency `omega`.
    ///
    /// Assembly over zero elements yields an all-zero matrix and vector of
    /// the declared dimension.
    ///
    /// # Errors
    /// - `SolverError::Mesh` if the mesh fails shape validation
    /// - `SolverError::DegenerateElement` if any element has a non-positive
    ///   Jacobian determinant at an integration point
    pub fn assemble(mesh: &QuadMesh, omega: f64, kernel: &dyn ElementKernel) -> Result<Self> {
        mesh.validate()?;

        let matrix = assemble_matrix(mesh, omega, kernel)?;
        let load = assemble_load(mesh, kernel)?;

        Ok(Self {
            matrix,
            load,
            n_points: mesh.n_points(),
        })
    }
}

fn tag_element(e: usize, err: KernelError) -> SolverError {
    match err {
        KernelError::DegenerateJacobian { det, .. } => {
            SolverError::DegenerateElement { element: e, det }
        }
    }
}

/// Assemble element matrix contributions into a global complex COO matrix.
fn assemble_matrix(
    mesh: &QuadMesh,
    omega: f64,
    kernel: &dyn ElementKernel,
) -> Result<CooMatrix<Complex64>> {
    // Independent per-element kernels; scatter stays sequential below.
    let locals = (0..mesh.n_elements())
        .into_par_iter()
        .map(|e| {
            kernel
                .local_matrix(&mesh.points_in_element(e), omega, mesh.mu[e], mesh.eta[e])
                .map_err(|err| tag_element(e, err))
        })
        .collect::<Result<Vec<_>>>()?;

    let n = mesh.n_points();
    let mut coo = CooMatrix::new(n, n);
    for (e, local) in locals.iter().enumerate() {
        let conn = mesh.connectivity[e];
        for (k, &row) in conn.iter().enumerate() {
            for (l, &col) in conn.iter().enumerate() {
                coo.push(row, col, local[(k, l)]);
            }
        }
    }

    Ok(coo)
}

/// Assemble element load contributions into a global dense vector.
fn assemble_load(mesh: &QuadMesh, kernel: &dyn ElementKernel) -> Result<DVector<f64>> {
    let locals = (0..mesh.n_elements())
        .into_par_iter()
        .map(|e| {
            kernel
                .local_load(&mesh.points_in_element(e), mesh.source_at_element(e))
                .map_err(|err| tag_element(e, err))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut f = DVector::zeros(mesh.n_points());
    for (e, local) in locals.iter().enumerate() {
        for (k, &node) in mesh.connectivity[e].iter().enumerate() {
            // Additive: a node shared by several elements sums their
            // contributions.
            f[node] += local[k];
        }
    }

    Ok(f)
}
