//! Quadrilateral mesh model for 2D frequency-domain wave solves.
//!
//! This crate holds the mesh data structure consumed by the forward-modeling
//! solver: node coordinates, 4-node element connectivity, and per-element
//! material/source fields. It also provides structured-grid generators used
//! by tests and the command-line driver.

pub mod generators;
pub mod mesh;

pub use generators::{rectangular_grid, unit_square};
pub use mesh::{MeshError, MeshStatistics, QuadMesh, QuadMeshBuilder};
