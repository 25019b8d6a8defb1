use crate::float_types::Real;
use crate::mesh::keys::MeshKey;
use nalgebra::Point3;

/// A mesh vertex, shared by every triangle that references its key
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavPoint {
    key: MeshKey,
    pub position: Point3<Real>,
}

impl NavPoint {
    /// Create a point with sanitized coordinates (non-finite components become 0)
    pub fn new(key: MeshKey, x: Real, y: Real, z: Real) -> Self {
        let sanitize = |v: Real| if v.is_finite() { v } else { 0.0 };
        NavPoint {
            key,
            position: Point3::new(sanitize(x), sanitize(y), sanitize(z)),
        }
    }

    #[inline]
    pub const fn key(&self) -> MeshKey {
        self.key
    }

    /// Squared distance (avoids sqrt for performance)
    pub fn distance_squared_to(&self, other: &Point3<Real>) -> Real {
        (self.position - other).norm_squared()
    }

    /// Distance between positions
    pub fn distance_to(&self, other: &Point3<Real>) -> Real {
        (self.position - other).norm()
    }
}
