use crate::float_types::{Real, tolerance};
use crate::geometry::portal::Portal;
use crate::mesh::keys::MeshKey;
use nalgebra::{Point3, Unit, Vector3};
use std::collections::BTreeMap;

/// A navigable triangle: three point keys plus its portals to neighbours.
///
/// Neighbours are kept in a `BTreeMap` so iteration order, and therefore graph
/// construction and search tie-breaks, does not depend on hashing.
#[derive(Debug, Clone, PartialEq)]
pub struct NavTriangle {
    key: MeshKey,
    points: [MeshKey; 3],
    heuristic_center: Option<Point3<Real>>,
    pub(crate) neighbors: BTreeMap<MeshKey, Portal>,
}

impl NavTriangle {
    pub fn new(key: MeshKey, points: [MeshKey; 3]) -> Self {
        NavTriangle {
            key,
            points,
            heuristic_center: None,
            neighbors: BTreeMap::new(),
        }
    }

    #[inline]
    pub const fn key(&self) -> MeshKey {
        self.key
    }

    #[inline]
    pub const fn points(&self) -> [MeshKey; 3] {
        self.points
    }

    pub fn uses_point(&self, point: MeshKey) -> bool {
        self.points.contains(&point)
    }

    /// Keys of the points this triangle shares with `other`, ascending and deduplicated
    pub fn common_points(&self, other: &NavTriangle) -> Vec<MeshKey> {
        let mut common: Vec<MeshKey> = self
            .points
            .iter()
            .copied()
            .filter(|p| other.uses_point(*p))
            .collect();
        common.sort_unstable();
        common.dedup();
        common
    }

    pub fn neighbors(&self) -> impl Iterator<Item = (MeshKey, &Portal)> + '_ {
        self.neighbors.iter().map(|(k, p)| (*k, p))
    }

    pub fn neighbor_keys(&self) -> impl Iterator<Item = MeshKey> + '_ {
        self.neighbors.keys().copied()
    }

    pub fn neighbor_count(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_neighbor(&self, other: MeshKey) -> bool {
        self.neighbors.contains_key(&other)
    }

    pub fn portal_to(&self, other: MeshKey) -> Option<&Portal> {
        self.neighbors.get(&other)
    }

    /// The heuristic center, if one was set explicitly
    pub const fn heuristic_center_override(&self) -> Option<Point3<Real>> {
        self.heuristic_center
    }

    pub(crate) fn set_heuristic_center(&mut self, center: Option<Point3<Real>>) {
        self.heuristic_center = center;
    }
}

/// Resolved geometry of a triangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleShape {
    pub a: Point3<Real>,
    pub b: Point3<Real>,
    pub c: Point3<Real>,
}

impl TriangleShape {
    pub const fn new(a: Point3<Real>, b: Point3<Real>, c: Point3<Real>) -> Self {
        TriangleShape { a, b, c }
    }

    pub fn centroid(&self) -> Point3<Real> {
        Point3::from((self.a.coords + self.b.coords + self.c.coords) / 3.0)
    }

    /// Surface area in 3D
    pub fn area(&self) -> Real {
        0.5 * (self.b - self.a).cross(&(self.c - self.a)).norm()
    }

    /// Signed area of the projection onto the ground (XZ) plane
    pub fn projected_area(&self) -> Real {
        0.5 * ((self.b.x - self.a.x) * (self.c.z - self.a.z)
            - (self.c.x - self.a.x) * (self.b.z - self.a.z))
    }

    /// Unit normal, or `None` for a degenerate triangle
    pub fn normal(&self) -> Option<Unit<Vector3<Real>>> {
        let n = (self.b - self.a).cross(&(self.c - self.a));
        Unit::try_new(n, tolerance())
    }

    /// Barycentric weights of `(x, z)` in the ground projection.
    /// `None` when the projection is degenerate (a vertical or collapsed triangle).
    fn barycentric_xz(&self, x: Real, z: Real) -> Option<[Real; 3]> {
        let (a, b, c) = (self.a, self.b, self.c);
        let det = (b.z - c.z) * (a.x - c.x) + (c.x - b.x) * (a.z - c.z);
        if det.abs() < tolerance() {
            return None;
        }
        let l1 = ((b.z - c.z) * (x - c.x) + (c.x - b.x) * (z - c.z)) / det;
        let l2 = ((c.z - a.z) * (x - c.x) + (a.x - c.x) * (z - c.z)) / det;
        Some([l1, l2, 1.0 - l1 - l2])
    }

    /// Whether the ground projection contains `point` (edges inclusive)
    pub fn contains_xz(&self, point: &Point3<Real>) -> bool {
        let eps = tolerance();
        self.barycentric_xz(point.x, point.z)
            .is_some_and(|w| w.iter().all(|&l| l >= -eps))
    }

    /// Height of the triangle's plane above `(x, z)`, if the projection contains it
    pub fn height_at(&self, x: Real, z: Real) -> Option<Real> {
        let eps = tolerance();
        let w = self.barycentric_xz(x, z)?;
        if w.iter().any(|&l| l < -eps) {
            return None;
        }
        Some(w[0] * self.a.y + w[1] * self.b.y + w[2] * self.c.y)
    }

    /// Ground containment plus a vertical band around the surface
    pub fn contains(&self, point: &Point3<Real>, vertical_tolerance: Real) -> bool {
        self.height_at(point.x, point.z)
            .is_some_and(|h| (point.y - h).abs() <= vertical_tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat() -> TriangleShape {
        TriangleShape::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 2.0),
        )
    }

    #[test]
    fn area_and_centroid() {
        let t = flat();
        assert!((t.area() - 2.0).abs() < 1e-9);
        let c = t.centroid();
        assert!((c.x - 2.0 / 3.0).abs() < 1e-9);
        assert!((c.z - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn ground_containment_includes_edges() {
        let t = flat();
        assert!(t.contains_xz(&Point3::new(0.5, 10.0, 0.5)));
        assert!(t.contains_xz(&Point3::new(1.0, 0.0, 0.0)));
        assert!(!t.contains_xz(&Point3::new(1.5, 0.0, 1.5)));
    }

    #[test]
    fn height_follows_slope() {
        let ramp = TriangleShape::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(4.0, 4.0, 0.0),
            Point3::new(0.0, 0.0, 4.0),
        );
        let h = ramp.height_at(2.0, 1.0).expect("inside");
        assert!((h - 2.0).abs() < 1e-9);
        assert!(ramp.contains(&Point3::new(2.0, 2.5, 1.0), 1.0));
        assert!(!ramp.contains(&Point3::new(2.0, 8.0, 1.0), 1.0));
    }

    #[test]
    fn vertical_triangle_contains_nothing() {
        let wall = TriangleShape::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        assert!(!wall.contains_xz(&Point3::new(0.2, 0.2, 0.0)));
        assert!(wall.normal().is_some());
    }
}
