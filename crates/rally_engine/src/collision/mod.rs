//! Line-segment collision geometry
//!
//! Narrow collision primitives used by the vehicle simulation: finite line
//! segments probed against triangles and triangle meshes.
//!
//! # Module Organization
//!
//! - [`line`] - Probe segments and hit records
//! - [`triangle`] - Triangles with cached normals and the segment test
//! - [`mesh`] - Triangle soups with a closest-hit query
//!
//! All queries are pure and infallible: degenerate inputs (segments parallel
//! to a plane, zero-area triangles) resolve to "no collision" through epsilon
//! guards rather than errors.

pub mod line;
pub mod mesh;
pub mod triangle;

// Re-export commonly used types
pub use line::{Line, LineCollision};
pub use mesh::Mesh;
pub use triangle::Triangle;
