//! Points, triangles and portals of a navigation mesh.
//!
//! Triangles never own coordinates: they hold three [`MeshKey`]s into the
//! mesh's point arena, and [`TriangleShape`] is the resolved geometry used for
//! area, centroid and containment queries.

pub mod point;
pub mod portal;
pub mod triangle;

pub use point::NavPoint;
pub use portal::Portal;
pub use triangle::{NavTriangle, TriangleShape};

pub use crate::mesh::keys::MeshKey;
