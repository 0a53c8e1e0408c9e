//! Structured quadrilateral mesh generators.
//!
//! Fixture-grade meshes for tests and the command-line driver; real surveys
//! load their geometry elsewhere.

use crate::mesh::{QuadMesh, QuadMeshBuilder};

/// Generate a structured `nx` x `ny` grid of quadrilaterals covering
/// `[0, width] x [0, height]`, with uniform material coefficients and zero
/// source everywhere.
///
/// Nodes are numbered row-major from the bottom-left corner; each element's
/// connectivity runs counter-clockwise starting at its bottom-left node, so
/// all Jacobians are positive.
///
/// # Panics
/// Panics if `nx` or `ny` is zero or a dimension is non-positive.
pub fn rectangular_grid(nx: usize, ny: usize, width: f64, height: f64, mu: f64, eta: f64) -> QuadMesh {
    assert!(nx > 0 && ny > 0, "grid must have at least one element per axis");
    assert!(width > 0.0 && height > 0.0, "grid dimensions must be positive");

    let dx = width / nx as f64;
    let dy = height / ny as f64;

    let mut builder = QuadMeshBuilder::new();
    for j in 0..=ny {
        for i in 0..=nx {
            builder.add_point(i as f64 * dx, j as f64 * dy);
        }
    }

    let stride = nx + 1;
    for j in 0..ny {
        for i in 0..nx {
            let n0 = j * stride + i;
            let conn = [n0, n0 + 1, n0 + 1 + stride, n0 + stride];
            // Indices were just generated in range; the builder cannot fail.
            builder
                .add_element(conn, mu, eta, 0.0)
                .expect("structured grid connectivity is always valid");
        }
    }

    builder.build()
}

/// A single unit-square element with the given coefficients and source.
pub fn unit_square(mu: f64, eta: f64, source: f64) -> QuadMesh {
    let mut builder = QuadMeshBuilder::new();
    builder.add_point(0.0, 0.0);
    builder.add_point(1.0, 0.0);
    builder.add_point(1.0, 1.0);
    builder.add_point(0.0, 1.0);
    builder
        .add_element([0, 1, 2, 3], mu, eta, source)
        .expect("unit square connectivity is always valid");
    builder.build()
}
