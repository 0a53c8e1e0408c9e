//! Error types for the forward-modeling solver.

use crate::backend::BackendError;
use fwi_mesh::MeshError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SolverError>;

/// A forward solve either fully succeeds or fails with one of these.
///
/// There is no retry or partial-result path: every variant aborts the solve
/// attempt and propagates to the caller.
#[derive(Error, Debug)]
pub enum SolverError {
    /// Zero or negative Jacobian determinant during element quadrature,
    /// indicating a degenerate or inverted element.
    #[error("degenerate element {element}: Jacobian determinant {det:.3e} at an integration point")]
    DegenerateElement { element: usize, det: f64 },

    /// Mismatched dimensions between assembled operators.
    #[error("shape mismatch in {context}: expected {expected}, found {found}")]
    ShapeMismatch {
        context: &'static str,
        expected: usize,
        found: usize,
    },

    /// Invalid mesh detected before assembly started.
    #[error("mesh error: {0}")]
    Mesh(#[from] MeshError),

    /// The external linear solve failed; surfaced unchanged.
    #[error("linear solve failed: {0}")]
    Backend(#[from] BackendError),
}
