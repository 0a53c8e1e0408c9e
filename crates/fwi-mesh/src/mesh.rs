//! Mesh data structures for 2D quadrilateral finite-element solves.
//!
//! Nodes are stored as contiguous 0-based coordinate pairs and elements as
//! 4-tuples of node indices in counter-clockwise order, so an element's local
//! node slot maps directly to a global matrix row/column. Material and source
//! fields are per-element scalars aligned with the connectivity list.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Errors raised while building or validating a mesh.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    #[error("element {element} references node {node} but the mesh has {n_points} points")]
    IndexOutOfRange {
        element: usize,
        node: usize,
        n_points: usize,
    },

    #[error("per-element field `{field}` has {found} entries but the mesh has {expected} elements")]
    FieldLengthMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("element {element} repeats node {node}")]
    RepeatedNode { element: usize, node: usize },
}

/// A 2D quadrilateral mesh with per-element material and source fields.
///
/// Immutable for the duration of one solve. Node indices in `connectivity`
/// are 0-based and must reference `points`; winding must be consistent
/// (counter-clockwise) across all elements so that element Jacobians stay
/// positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuadMesh {
    /// Node coordinates (x, y)
    pub points: Vec<[f64; 2]>,
    /// Element connectivity: 4 node indices per element, CCW order
    pub connectivity: Vec<[usize; 4]>,
    /// Mass-proportional coefficient per element
    pub mu: Vec<f64>,
    /// Damping coefficient per element
    pub eta: Vec<f64>,
    /// Source magnitude per element
    pub source: Vec<f64>,
}

impl QuadMesh {
    /// Number of nodes in the mesh.
    pub fn n_points(&self) -> usize {
        self.points.len()
    }

    /// Number of elements in the mesh.
    pub fn n_elements(&self) -> usize {
        self.connectivity.len()
    }

    /// Physical coordinates of the four nodes of element `e`, in
    /// connectivity order.
    pub fn points_in_element(&self, e: usize) -> [[f64; 2]; 4] {
        let conn = self.connectivity[e];
        [
            self.points[conn[0]],
            self.points[conn[1]],
            self.points[conn[2]],
            self.points[conn[3]],
        ]
    }

    /// Source magnitude for element `e`.
    pub fn source_at_element(&self, e: usize) -> f64 {
        self.source[e]
    }

    /// Validate connectivity and per-element field shapes.
    ///
    /// Checks, in order:
    /// - `mu`, `eta`, and `source` each have one entry per element
    /// - every connectivity index references an existing node
    /// - no element lists the same node twice
    ///
    /// Assembly must reject a mesh that fails any of these before doing any
    /// element work.
    pub fn validate(&self) -> Result<(), MeshError> {
        let n_elements = self.connectivity.len();
        for (field, len) in [
            ("mu", self.mu.len()),
            ("eta", self.eta.len()),
            ("source", self.source.len()),
        ] {
            if len != n_elements {
                return Err(MeshError::FieldLengthMismatch {
                    field,
                    expected: n_elements,
                    found: len,
                });
            }
        }

        for (e, conn) in self.connectivity.iter().enumerate() {
            let mut seen = HashSet::new();
            for &node in conn {
                if node >= self.points.len() {
                    return Err(MeshError::IndexOutOfRange {
                        element: e,
                        node,
                        n_points: self.points.len(),
                    });
                }
                if !seen.insert(node) {
                    return Err(MeshError::RepeatedNode { element: e, node });
                }
            }
        }

        Ok(())
    }

    /// Get mesh statistics for reporting.
    pub fn statistics(&self) -> MeshStatistics {
        let (mut min, mut max) = ([f64::INFINITY; 2], [f64::NEG_INFINITY; 2]);
        for p in &self.points {
            for d in 0..2 {
                min[d] = min[d].min(p[d]);
                max[d] = max[d].max(p[d]);
            }
        }

        MeshStatistics {
            n_points: self.n_points(),
            n_elements: self.n_elements(),
            bounding_box: if self.points.is_empty() {
                None
            } else {
                Some((min, max))
            },
        }
    }
}

/// Mesh statistics for reporting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeshStatistics {
    pub n_points: usize,
    pub n_elements: usize,
    /// (min, max) corner coordinates, `None` for an empty mesh
    pub bounding_box: Option<([f64; 2], [f64; 2])>,
}

/// Incremental mesh construction with per-element validation.
///
/// Points must be added before the elements that reference them; each
/// `add_element` call checks its indices immediately so errors carry the
/// offending element.
#[derive(Debug, Default)]
pub struct QuadMeshBuilder {
    points: Vec<[f64; 2]>,
    connectivity: Vec<[usize; 4]>,
    mu: Vec<f64>,
    eta: Vec<f64>,
    source: Vec<f64>,
}

impl QuadMeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node and return its index.
    pub fn add_point(&mut self, x: f64, y: f64) -> usize {
        self.points.push([x, y]);
        self.points.len() - 1
    }

    /// Add an element with its material coefficients and source magnitude.
    pub fn add_element(
        &mut self,
        conn: [usize; 4],
        mu: f64,
        eta: f64,
        source: f64,
    ) -> Result<usize, MeshError> {
        let element = self.connectivity.len();
        let mut seen = HashSet::new();
        for &node in &conn {
            if node >= self.points.len() {
                return Err(MeshError::IndexOutOfRange {
                    element,
                    node,
                    n_points: self.points.len(),
                });
            }
            if !seen.insert(node) {
                return Err(MeshError::RepeatedNode { element, node });
            }
        }

        self.connectivity.push(conn);
        self.mu.push(mu);
        self.eta.push(eta);
        self.source.push(source);
        Ok(element)
    }

    pub fn build(self) -> QuadMesh {
        QuadMesh {
            points: self.points,
            connectivity: self.connectivity,
            mu: self.mu,
            eta: self.eta,
            source: self.source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_element_strip() -> QuadMesh {
        // Two unit squares sharing the edge between nodes 1 and 4:
        //
        //   3----4----5
        //   |    |    |
        //   0----1----2
        let mut builder = QuadMeshBuilder::new();
        for &(x, y) in &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (0.0, 1.0), (1.0, 1.0), (2.0, 1.0)] {
            builder.add_point(x, y);
        }
        builder.add_element([0, 1, 4, 3], 1.0, 0.0, 0.0).unwrap();
        builder.add_element([1, 2, 5, 4], 1.0, 0.0, 0.0).unwrap();
        builder.build()
    }

    #[test]
    fn builder_assigns_sequential_indices() {
        let mut builder = QuadMeshBuilder::new();
        assert_eq!(builder.add_point(0.0, 0.0), 0);
        assert_eq!(builder.add_point(1.0, 0.0), 1);
        assert_eq!(builder.add_point(1.0, 1.0), 2);
        assert_eq!(builder.add_point(0.0, 1.0), 3);
        let e = builder.add_element([0, 1, 2, 3], 1.0, 0.5, 2.0).unwrap();
        assert_eq!(e, 0);

        let mesh = builder.build();
        assert_eq!(mesh.n_points(), 4);
        assert_eq!(mesh.n_elements(), 1);
        assert_eq!(mesh.source_at_element(0), 2.0);
    }

    #[test]
    fn builder_rejects_missing_node() {
        let mut builder = QuadMeshBuilder::new();
        builder.add_point(0.0, 0.0);
        builder.add_point(1.0, 0.0);
        let err = builder.add_element([0, 1, 2, 3], 1.0, 0.0, 0.0).unwrap_err();
        assert_eq!(
            err,
            MeshError::IndexOutOfRange {
                element: 0,
                node: 2,
                n_points: 2
            }
        );
    }

    #[test]
    fn builder_rejects_repeated_node() {
        let mut builder = QuadMeshBuilder::new();
        for _ in 0..4 {
            builder.add_point(0.0, 0.0);
        }
        let err = builder.add_element([0, 1, 1, 2], 1.0, 0.0, 0.0).unwrap_err();
        assert!(matches!(err, MeshError::RepeatedNode { node: 1, .. }));
    }

    #[test]
    fn points_in_element_follows_connectivity_order() {
        let mesh = two_element_strip();
        let pts = mesh.points_in_element(1);
        assert_eq!(pts, [[1.0, 0.0], [2.0, 0.0], [2.0, 1.0], [1.0, 1.0]]);
    }

    #[test]
    fn validate_accepts_well_formed_mesh() {
        assert!(two_element_strip().validate().is_ok());
    }

    #[test]
    fn validate_catches_field_length_mismatch() {
        let mut mesh = two_element_strip();
        mesh.eta.pop();
        let err = mesh.validate().unwrap_err();
        assert_eq!(
            err,
            MeshError::FieldLengthMismatch {
                field: "eta",
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn validate_catches_dangling_connectivity() {
        let mut mesh = two_element_strip();
        mesh.connectivity[1][2] = 99;
        assert!(matches!(
            mesh.validate().unwrap_err(),
            MeshError::IndexOutOfRange { element: 1, node: 99, .. }
        ));
    }

    #[test]
    fn statistics_reports_extents() {
        let stats = two_element_strip().statistics();
        assert_eq!(stats.n_points, 6);
        assert_eq!(stats.n_elements, 2);
        assert_eq!(stats.bounding_box, Some(([0.0, 0.0], [2.0, 1.0])));
    }
}
