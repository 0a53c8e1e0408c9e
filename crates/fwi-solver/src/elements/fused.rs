//! Table-driven fused Helmholtz kernel.
//!
//! Drop-in replacement for the reference `BilinearQuad` aimed at large
//! element sweeps: shape values and reference gradients at the four fixed
//! Gauss points are tabulated once at construction, and the quadrature loop
//! runs over plain `f64` accumulators with no matrix temporaries. The mass,
//! damping, and stiffness contributions are folded into a single pass per
//! integration point.
//!
//! Numerically equivalent to the reference kernel (see the equivalence test
//! below); selected via `default_kernel()` when the `fused-kernel` feature
//! is enabled.

use super::{gauss_points, shape_derivatives, shape_functions, ElementKernel, KernelError, DET_FLOOR};
use nalgebra::{SMatrix, SVector};
use num_complex::Complex64;

/// Fused element kernel with precomputed Gauss-point shape tables.
pub struct FusedQuad {
    /// Shape values per (gauss point, node)
    n: [[f64; 4]; 4],
    /// dN/dr per (gauss point, node)
    dr: [[f64; 4]; 4],
    /// dN/ds per (gauss point, node)
    ds: [[f64; 4]; 4],
}

impl FusedQuad {
    pub fn new() -> Self {
        let mut n = [[0.0; 4]; 4];
        let mut dr = [[0.0; 4]; 4];
        let mut ds = [[0.0; 4]; 4];
        for (p, (r, s)) in gauss_points().into_iter().enumerate() {
            n[p] = shape_functions(r, s);
            let grad = shape_derivatives(r, s);
            dr[p] = grad[0];
            ds[p] = grad[1];
        }
        Self { n, dr, ds }
    }

    /// Jacobian entries at Gauss point `p`: (dx/dr, dy/dr, dx/ds, dy/ds).
    fn jacobian_at(&self, p: usize, points: &[[f64; 2]; 4]) -> (f64, f64, f64, f64) {
        let (mut j00, mut j01, mut j10, mut j11) = (0.0, 0.0, 0.0, 0.0);
        for i in 0..4 {
            j00 += self.dr[p][i] * points[i][0];
            j01 += self.dr[p][i] * points[i][1];
            j10 += self.ds[p][i] * points[i][0];
            j11 += self.ds[p][i] * points[i][1];
        }
        (j00, j01, j10, j11)
    }
}

impl Default for FusedQuad {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementKernel for FusedQuad {
    fn local_matrix(
        &self,
        points: &[[f64; 2]; 4],
        omega: f64,
        mu: f64,
        eta: f64,
    ) -> Result<SMatrix<Complex64, 4, 4>, KernelError> {
        let mut re = [[0.0; 4]; 4];
        let mut im = [[0.0; 4]; 4];

        for p in 0..4 {
            let (j00, j01, j10, j11) = self.jacobian_at(p, points);
            let det = j00 * j11 - j01 * j10;
            if det <= DET_FLOOR {
                return Err(KernelError::DegenerateJacobian { point: p, det });
            }

            // Physical gradients via the cofactor inverse, one node at a time
            let mut bx = [0.0; 4];
            let mut by = [0.0; 4];
            for i in 0..4 {
                bx[i] = (j11 * self.dr[p][i] - j01 * self.ds[p][i]) / det;
                by[i] = (-j10 * self.dr[p][i] + j00 * self.ds[p][i]) / det;
            }

            let mass_scale = -(omega * omega) * mu * det;
            let damp_scale = omega * eta * det;
            for i in 0..4 {
                for j in 0..4 {
                    let gram = self.n[p][i] * self.n[p][j];
                    re[i][j] += gram * mass_scale + (bx[i] * bx[j] + by[i] * by[j]) * det;
                    im[i][j] += gram * damp_scale;
                }
            }
        }

        Ok(SMatrix::from_fn(|i, j| Complex64::new(re[i][j], im[i][j])))
    }

    fn local_load(
        &self,
        points: &[[f64; 2]; 4],
        source: f64,
    ) -> Result<SVector<f64, 4>, KernelError> {
        let mut f = [0.0; 4];
        for p in 0..4 {
            let (j00, j01, j10, j11) = self.jacobian_at(p, points);
            let det = j00 * j11 - j01 * j10;
            if det <= DET_FLOOR {
                return Err(KernelError::DegenerateJacobian { point: p, det });
            }
            for i in 0..4 {
                f[i] += self.n[p][i] * source * det;
            }
        }
        Ok(SVector::from_row_slice(&f))
    }

    fn name(&self) -> &str {
        "fused-tabulated"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::BilinearQuad;

    #[test]
    fn matches_reference_kernel_on_skewed_quad() {
        let points = [[0.3, -0.1], [2.2, 0.4], [1.9, 2.1], [-0.4, 1.6]];
        let (omega, mu, eta) = (3.1, 0.7, 0.25);

        let reference = BilinearQuad.local_matrix(&points, omega, mu, eta).unwrap();
        let fused = FusedQuad::new().local_matrix(&points, omega, mu, eta).unwrap();

        for i in 0..4 {
            for j in 0..4 {
                assert!(
                    (reference[(i, j)] - fused[(i, j)]).norm() < 1e-12,
                    "kernel mismatch at ({}, {}): {} vs {}",
                    i,
                    j,
                    reference[(i, j)],
                    fused[(i, j)]
                );
            }
        }
    }

    #[test]
    fn matches_reference_load() {
        let points = [[0.0, 0.0], [2.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        let reference = BilinearQuad.local_load(&points, 5.0).unwrap();
        let fused = FusedQuad::new().local_load(&points, 5.0).unwrap();
        for i in 0..4 {
            assert!((reference[i] - fused[i]).abs() < 1e-13);
        }
    }

    #[test]
    fn rejects_degenerate_element() {
        let collinear = [[0.0, 0.0], [1.0, 1.0], [2.0, 2.0], [3.0, 3.0]];
        let kernel = FusedQuad::new();
        assert!(kernel.local_matrix(&collinear, 1.0, 1.0, 0.0).is_err());
        assert!(kernel.local_load(&collinear, 1.0).is_err());
    }
}
