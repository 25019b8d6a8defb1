use crate::float_types::Real;
use crate::mesh::keys::MeshKey;
use nalgebra::Point3;

/// The shared edge between two adjacent triangles.
///
/// Both key pairs are stored in ascending order, so the portal for an
/// unordered triangle pair is the same value whichever side built it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Portal {
    triangles: [MeshKey; 2],
    points: [MeshKey; 2],
}

impl Portal {
    pub fn new(triangle_a: MeshKey, triangle_b: MeshKey, point_a: MeshKey, point_b: MeshKey) -> Self {
        Portal {
            triangles: ordered(triangle_a, triangle_b),
            points: ordered(point_a, point_b),
        }
    }

    #[inline]
    pub const fn triangles(&self) -> [MeshKey; 2] {
        self.triangles
    }

    #[inline]
    pub const fn points(&self) -> [MeshKey; 2] {
        self.points
    }

    pub fn connects(&self, triangle: MeshKey) -> bool {
        self.triangles.contains(&triangle)
    }

    /// The triangle on the other side of `triangle`, if it is one of the two
    pub fn other(&self, triangle: MeshKey) -> Option<MeshKey> {
        match self.triangles {
            [a, b] if a == triangle => Some(b),
            [a, b] if b == triangle => Some(a),
            _ => None,
        }
    }

    /// Resolve the edge endpoints through a point lookup
    pub fn edge(
        &self,
        position_of: impl Fn(MeshKey) -> Option<Point3<Real>>,
    ) -> Option<(Point3<Real>, Point3<Real>)> {
        Some((position_of(self.points[0])?, position_of(self.points[1])?))
    }

    /// Midpoint of the shared edge
    pub fn midpoint(&self, position_of: impl Fn(MeshKey) -> Option<Point3<Real>>) -> Option<Point3<Real>> {
        let (a, b) = self.edge(position_of)?;
        Some(nalgebra::center(&a, &b))
    }
}

#[inline]
fn ordered(a: MeshKey, b: MeshKey) -> [MeshKey; 2] {
    if a <= b { [a, b] } else { [b, a] }
}
