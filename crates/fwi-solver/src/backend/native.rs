//! Native fallback backend using dense nalgebra LU.
//!
//! This is the default backend when no external sparse direct solver is
//! available. It expands the compressed-column matrix to dense storage and
//! factorizes with nalgebra's LU, which is fine for the mesh sizes used in
//! tests and small forward models (up to a few thousand nodes).

use super::traits::*;
use nalgebra::{DMatrix, DVector};

/// Dense-LU solver backend.
///
/// For production-size inversion meshes, prefer an external sparse direct
/// solver behind the `pardiso` feature.
pub struct DenseLuBackend;

impl DirectSolver for DenseLuBackend {
    fn solve_real(
        &self,
        system: &RealSystemData,
    ) -> Result<(DVector<f64>, SolveInfo), BackendError> {
        system.check_shape()?;
        let n = system.matrix.nrows();

        // Expand CSC storage to a dense matrix
        let mut k = DMatrix::zeros(n, n);
        for (r, c, v) in system.matrix.triplet_iter() {
            k[(r, c)] = *v;
        }

        let y = k
            .lu()
            .solve(&system.rhs)
            .ok_or(BackendError("singular matrix in LU decomposition".into()))?;

        Ok((
            y,
            SolveInfo {
                iterations: 1,
                residual_norm: None,
                solver_name: "dense-LU".to_string(),
            },
        ))
    }

    fn name(&self) -> &str {
        "native-dense-lu"
    }
}
