//! Complex-to-real reformulation of the assembled linear system.
//!
//! The external direct solvers work in real arithmetic, so the complex
//! system `(Kr + i*Ki)(xr + i*xi) = f` (f real) is rewritten as the real
//! block system of twice the dimension:
//!
//! ```text
//! [ Kr  -Ki ] [xr]   [f]
//! [ Ki   Kr ] [xi] = [0]
//! ```
//!
//! The zero second block reflects that the load vector here is restricted to
//! real values; a complex-source extension would carry `[fr; fi]` instead.
//! The transform is exact and reversible: `extract_complex_solution` is the
//! inverse of the stacking.

use crate::error::{Result, SolverError};
use nalgebra::DVector;
use nalgebra_sparse::CooMatrix;
use num_complex::Complex64;

/// Rewrite the complex system `K * x = f` as an equivalent real system of
/// dimension `2n`, as COO triplets plus a dense right-hand side.
///
/// Zero real or imaginary components are not emitted, so a purely real
/// matrix produces empty off-diagonal blocks.
///
/// # Errors
/// `SolverError::ShapeMismatch` if `K` is not square or `f` does not match
/// its row count.
pub fn to_real_system(
    k: &CooMatrix<Complex64>,
    f: &DVector<f64>,
) -> Result<(CooMatrix<f64>, DVector<f64>)> {
    let n = k.nrows();
    if k.ncols() != n {
        return Err(SolverError::ShapeMismatch {
            context: "complex system matrix",
            expected: n,
            found: k.ncols(),
        });
    }
    if f.len() != n {
        return Err(SolverError::ShapeMismatch {
            context: "load vector",
            expected: n,
            found: f.len(),
        });
    }

    let mut ke = CooMatrix::new(2 * n, 2 * n);
    for (row, col, v) in k.triplet_iter() {
        if v.re != 0.0 {
            ke.push(row, col, v.re);
            ke.push(n + row, n + col, v.re);
        }
        if v.im != 0.0 {
            ke.push(row, n + col, -v.im);
            ke.push(n + row, col, v.im);
        }
    }

    let mut fe = DVector::zeros(2 * n);
    fe.rows_mut(0, n).copy_from(f);

    Ok((ke, fe))
}

/// Recover the complex solution from the real-augmented solution vector:
/// `x[i] = ye[i] + i * ye[n + i]`.
///
/// # Errors
/// `SolverError::ShapeMismatch` if `ye` has odd length.
pub fn extract_complex_solution(ye: &DVector<f64>) -> Result<DVector<Complex64>> {
    if ye.len() % 2 != 0 {
        return Err(SolverError::ShapeMismatch {
            context: "real-augmented solution",
            expected: ye.len() + 1,
            found: ye.len(),
        });
    }

    let n = ye.len() / 2;
    Ok(DVector::from_fn(n, |i, _| Complex64::new(ye[i], ye[n + i])))
}
