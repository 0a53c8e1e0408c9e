//! Reference bilinear quadrilateral Helmholtz kernel.
//!
//! Node ordering (reference element, CCW):
//! ```text
//!   4----------3
//!   |          |
//!   |          |      r, s in [-1, 1]
//!   |          |
//!   1----------2
//! ```
//!
//! At each of the four Gauss points this kernel forms the Jacobian of the
//! bilinear map, its 2x2 cofactor inverse, and the physical shape gradients,
//! then accumulates
//!
//! - mass:      `M_hat += -omega^2 * mu * (N^T N) * dJ`
//! - damping:   `C_hat += i * omega * eta * (N^T N) * dJ`
//! - stiffness: `K_hat += (B^T B) * dJ`
//!
//! The returned local matrix `M_hat + C_hat + K_hat` is symmetric because
//! every term is a scalar multiple of a Gram matrix.

use super::{gauss_points, shape_derivatives, shape_functions, ElementKernel, KernelError, DET_FLOOR};
use nalgebra::{Matrix2, SMatrix, SVector};
use num_complex::Complex64;

/// Reference element kernel using small dense nalgebra matrices.
pub struct BilinearQuad;

impl BilinearQuad {
    /// Jacobian of the reference-to-physical map at one integration point:
    /// `J = gradN^T * points` (2x2).
    fn jacobian(grad: &[[f64; 4]; 2], points: &[[f64; 2]; 4]) -> Matrix2<f64> {
        let mut j = Matrix2::zeros();
        for i in 0..4 {
            j[(0, 0)] += grad[0][i] * points[i][0];
            j[(0, 1)] += grad[0][i] * points[i][1];
            j[(1, 0)] += grad[1][i] * points[i][0];
            j[(1, 1)] += grad[1][i] * points[i][1];
        }
        j
    }
}

impl ElementKernel for BilinearQuad {
    fn local_matrix(
        &self,
        points: &[[f64; 2]; 4],
        omega: f64,
        mu: f64,
        eta: f64,
    ) -> Result<SMatrix<Complex64, 4, 4>, KernelError> {
        let w = 1.0;
        let mut m_hat = SMatrix::<f64, 4, 4>::zeros();
        let mut c_hat = SMatrix::<f64, 4, 4>::zeros();
        let mut k_hat = SMatrix::<f64, 4, 4>::zeros();

        for (p, (r, s)) in gauss_points().into_iter().enumerate() {
            let n_vals = shape_functions(r, s);
            let grad = shape_derivatives(r, s);

            let j = Self::jacobian(&grad, points);
            let det = j.determinant();
            if det <= DET_FLOOR {
                return Err(KernelError::DegenerateJacobian { point: p, det });
            }

            // 2x2 cofactor inverse; B = (1/dJ) * adj(J) * gradN^T
            let adj = Matrix2::new(j[(1, 1)], -j[(0, 1)], -j[(1, 0)], j[(0, 0)]);
            let grad_ref = SMatrix::<f64, 2, 4>::from_fn(|row, col| grad[row][col]);
            let b = adj * grad_ref / det;

            let n = SMatrix::<f64, 1, 4>::from_row_slice(&n_vals);
            let n_gram = n.transpose() * n;

            m_hat += n_gram * (w * -(omega * omega) * mu * det);
            c_hat += n_gram * (w * omega * eta * det);
            k_hat += b.transpose() * b * (w * det);
        }

        Ok(SMatrix::from_fn(|i, j| {
            Complex64::new(m_hat[(i, j)] + k_hat[(i, j)], c_hat[(i, j)])
        }))
    }

    fn local_load(
        &self,
        points: &[[f64; 2]; 4],
        source: f64,
    ) -> Result<SVector<f64, 4>, KernelError> {
        let w = 1.0;
        let mut f = SVector::<f64, 4>::zeros();

        for (p, (r, s)) in gauss_points().into_iter().enumerate() {
            let n_vals = shape_functions(r, s);
            let grad = shape_derivatives(r, s);

            let det = Self::jacobian(&grad, points).determinant();
            if det <= DET_FLOOR {
                return Err(KernelError::DegenerateJacobian { point: p, det });
            }

            for i in 0..4 {
                f[i] += w * n_vals[i] * source * det;
            }
        }

        Ok(f)
    }

    fn name(&self) -> &str {
        "bilinear-reference"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIT_SQUARE: [[f64; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

    /// Exact mass Gram matrix of the bilinear basis on the unit square,
    /// integral of N_i * N_j.
    fn unit_square_mass() -> SMatrix<f64, 4, 4> {
        SMatrix::<f64, 4, 4>::from_row_slice(&[
            4.0, 2.0, 1.0, 2.0, //
            2.0, 4.0, 2.0, 1.0, //
            1.0, 2.0, 4.0, 2.0, //
            2.0, 1.0, 2.0, 4.0,
        ]) / 36.0
    }

    /// Exact stiffness matrix of the bilinear basis on the unit square,
    /// integral of grad N_i . grad N_j.
    fn unit_square_stiffness() -> SMatrix<f64, 4, 4> {
        SMatrix::<f64, 4, 4>::from_row_slice(&[
            4.0, -1.0, -2.0, -1.0, //
            -1.0, 4.0, -1.0, -2.0, //
            -2.0, -1.0, 4.0, -1.0, //
            -1.0, -2.0, -1.0, 4.0,
        ]) / 6.0
    }

    #[test]
    fn unit_square_matches_analytic_values() {
        let omega = 2.0;
        let mu = 3.0;
        let eta = 0.5;
        let k = BilinearQuad
            .local_matrix(&UNIT_SQUARE, omega, mu, eta)
            .unwrap();

        let mass = unit_square_mass();
        let stiff = unit_square_stiffness();
        for i in 0..4 {
            for j in 0..4 {
                let expected_re = stiff[(i, j)] - omega * omega * mu * mass[(i, j)];
                let expected_im = omega * eta * mass[(i, j)];
                assert!(
                    (k[(i, j)].re - expected_re).abs() < 1e-14,
                    "real part mismatch at ({}, {}): {} vs {}",
                    i,
                    j,
                    k[(i, j)].re,
                    expected_re
                );
                assert!(
                    (k[(i, j)].im - expected_im).abs() < 1e-14,
                    "imag part mismatch at ({}, {}): {} vs {}",
                    i,
                    j,
                    k[(i, j)].im,
                    expected_im
                );
            }
        }
    }

    #[test]
    fn local_matrix_is_symmetric_on_skewed_quad() {
        let points = [[0.0, 0.0], [2.1, 0.3], [2.4, 1.9], [-0.2, 1.4]];
        let k = BilinearQuad.local_matrix(&points, 1.7, 0.8, 0.2).unwrap();
        for i in 0..4 {
            for j in 0..4 {
                assert!(
                    (k[(i, j)] - k[(j, i)]).norm() < 1e-13,
                    "not symmetric at ({}, {})",
                    i,
                    j
                );
            }
        }
    }

    #[test]
    fn unit_square_load_splits_evenly() {
        let source = 8.0;
        let f = BilinearQuad.local_load(&UNIT_SQUARE, source).unwrap();
        for i in 0..4 {
            assert!((f[i] - source / 4.0).abs() < 1e-14, "f[{}] = {}", i, f[i]);
        }
    }

    #[test]
    fn load_sum_equals_source_times_area() {
        // Trapezoid with area 1.5; partition of unity makes the load sum
        // integrate the source exactly.
        let points = [[0.0, 0.0], [2.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        let source = 3.0;
        let f = BilinearQuad.local_load(&points, source).unwrap();
        let total: f64 = f.iter().sum();
        assert!((total - source * 1.5).abs() < 1e-13, "total = {}", total);
    }

    #[test]
    fn zero_area_element_is_degenerate() {
        let collinear = [[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [3.0, 0.0]];
        let err = BilinearQuad
            .local_matrix(&collinear, 1.0, 1.0, 0.0)
            .unwrap_err();
        assert!(matches!(err, KernelError::DegenerateJacobian { .. }));
    }

    #[test]
    fn bowtie_element_is_degenerate() {
        // Self-intersecting quad: top corners swapped
        let bowtie = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];
        assert!(BilinearQuad.local_matrix(&bowtie, 1.0, 1.0, 0.0).is_err());
        assert!(BilinearQuad.local_load(&bowtie, 1.0).is_err());
    }
}
