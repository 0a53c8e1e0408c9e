//! Element kernels for the bilinear quadrilateral Helmholtz element.
//!
//! A kernel computes, for one element, the 4x4 complex local system matrix
//! (mass + damping + stiffness) and the 4x1 real local load vector, using
//! 2x2 Gauss-Legendre quadrature on the [-1,1]^2 reference element. Two
//! interchangeable implementations exist:
//!
//! - `BilinearQuad`: the reference implementation, small dense nalgebra
//!   matrices per integration point.
//! - `FusedQuad`: tabulated shape data and an unrolled scalar loop; same
//!   results, no matrix temporaries.

use nalgebra::{SMatrix, SVector};
use num_complex::Complex64;
use thiserror::Error;

pub mod bilinear;
pub mod fused;

pub use bilinear::BilinearQuad;
pub use fused::FusedQuad;

/// Jacobian determinants at or below this floor indicate a degenerate or
/// inverted element.
pub const DET_FLOOR: f64 = 1e-12;

/// Errors raised inside an element kernel.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KernelError {
    #[error("Jacobian determinant {det:.3e} at integration point {point}")]
    DegenerateJacobian { point: usize, det: f64 },
}

/// Element kernel interface.
///
/// Implementations are pure with respect to their inputs: same coordinates
/// and coefficients, same local matrix/vector. The only failure mode is a
/// degenerate Jacobian.
pub trait ElementKernel: Send + Sync {
    /// Compute the local complex system matrix `M_hat + C_hat + K_hat` for
    /// one element.
    ///
    /// # Arguments
    /// * `points` - the element's four node coordinates, CCW order
    /// * `omega` - angular frequency
    /// * `mu` - mass-proportional coefficient
    /// * `eta` - damping coefficient
    fn local_matrix(
        &self,
        points: &[[f64; 2]; 4],
        omega: f64,
        mu: f64,
        eta: f64,
    ) -> Result<SMatrix<Complex64, 4, 4>, KernelError>;

    /// Compute the local real load vector for a scalar source magnitude.
    fn local_load(
        &self,
        points: &[[f64; 2]; 4],
        source: f64,
    ) -> Result<SVector<f64, 4>, KernelError>;

    /// Human-readable name of this kernel.
    fn name(&self) -> &str;
}

/// The four Gauss points of the 2x2 product rule, in the same circulation
/// order as the element nodes. Each carries unit weight.
pub(crate) fn gauss_points() -> [(f64, f64); 4] {
    let g = 1.0 / f64::sqrt(3.0);
    [(-g, -g), (g, -g), (g, g), (-g, g)]
}

/// Bilinear shape functions at reference coordinates (r, s).
pub(crate) fn shape_functions(r: f64, s: f64) -> [f64; 4] {
    [
        (1.0 - r) * (1.0 - s) / 4.0,
        (1.0 + r) * (1.0 - s) / 4.0,
        (1.0 + r) * (1.0 + s) / 4.0,
        (1.0 - r) * (1.0 + s) / 4.0,
    ]
}

/// Reference-coordinate shape gradients at (r, s).
///
/// Row 0 holds dN_i/dr, row 1 holds dN_i/ds.
pub(crate) fn shape_derivatives(r: f64, s: f64) -> [[f64; 4]; 2] {
    [
        [
            -(1.0 - s) / 4.0,
            (1.0 - s) / 4.0,
            (1.0 + s) / 4.0,
            -(1.0 + s) / 4.0,
        ],
        [
            -(1.0 - r) / 4.0,
            -(1.0 + r) / 4.0,
            (1.0 + r) / 4.0,
            (1.0 - r) / 4.0,
        ],
    ]
}

/// Returns the default element kernel based on enabled features.
///
/// With `--features fused-kernel`: returns `FusedQuad`.
/// Without: returns the reference `BilinearQuad`.
pub fn default_kernel() -> Box<dyn ElementKernel> {
    #[cfg(feature = "fused-kernel")]
    {
        Box::new(FusedQuad::new())
    }
    #[cfg(not(feature = "fused-kernel"))]
    {
        Box::new(BilinearQuad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_functions_partition_of_unity() {
        // Sum of shape functions should equal 1.0 at any point
        for &(r, s) in &[(0.0, 0.0), (0.5, -0.3), (-1.0, 1.0), (0.9, 0.9)] {
            let n = shape_functions(r, s);
            let sum: f64 = n.iter().sum();
            assert!(
                (sum - 1.0).abs() < 1e-12,
                "shape functions sum = {} at ({}, {})",
                sum,
                r,
                s
            );
        }
    }

    #[test]
    fn shape_functions_at_nodes() {
        // N_i should be 1 at node i, 0 at all other nodes
        let node_coords = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
        for (i, &(r, s)) in node_coords.iter().enumerate() {
            let n = shape_functions(r, s);
            for (j, &n_j) in n.iter().enumerate() {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!(
                    (n_j - expected).abs() < 1e-12,
                    "N[{}] = {} at node {}",
                    j,
                    n_j,
                    i
                );
            }
        }
    }

    #[test]
    fn shape_derivative_rows_sum_to_zero() {
        // d/dr and d/ds of the partition of unity are zero
        let d = shape_derivatives(0.37, -0.58);
        for row in &d {
            let sum: f64 = row.iter().sum();
            assert!(sum.abs() < 1e-12);
        }
    }

    #[test]
    fn gauss_points_lie_inside_reference_element() {
        for (r, s) in gauss_points() {
            assert!(r.abs() < 1.0 && s.abs() < 1.0);
            assert!((r.abs() - 1.0 / f64::sqrt(3.0)).abs() < 1e-15);
            assert!((s.abs() - 1.0 / f64::sqrt(3.0)).abs() < 1e-15);
        }
    }
}
