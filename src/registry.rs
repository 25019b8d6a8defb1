//! The set of meshes known to the host, and the location-based query interface.

use crate::errors::{EntityKind, NavError};
use crate::float_types::Real;
use crate::mesh::NavMesh;
use crate::search::SearchLimits;
use crate::world::Location;
use nalgebra::Point3;

/// Ordered collection of navigation meshes.
///
/// Meshes may overlap. Lookups by location return the **first** mesh in
/// insertion order whose range contains the location.
#[derive(Debug, Clone, Default)]
pub struct NavMeshRegistry {
    meshes: Vec<NavMesh>,
}

impl NavMeshRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mesh. A mesh with the same id is replaced in place, keeping its
    /// lookup priority; the replaced mesh is returned.
    pub fn insert(&mut self, mesh: NavMesh) -> Option<NavMesh> {
        match self.meshes.iter_mut().find(|m| m.id() == mesh.id()) {
            Some(slot) => Some(std::mem::replace(slot, mesh)),
            None => {
                self.meshes.push(mesh);
                None
            },
        }
    }

    pub fn remove(&mut self, id: &str) -> Result<NavMesh, NavError> {
        let i = self
            .meshes
            .iter()
            .position(|m| m.id() == id)
            .ok_or_else(|| NavError::not_found(EntityKind::Mesh, id))?;
        Ok(self.meshes.remove(i))
    }

    pub fn get(&self, id: &str) -> Option<&NavMesh> {
        self.meshes.iter().find(|m| m.id() == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut NavMesh> {
        self.meshes.iter_mut().find(|m| m.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NavMesh> + '_ {
        self.meshes.iter()
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// The first mesh covering `location`
    pub fn mesh_at(&self, location: &Location) -> Option<&NavMesh> {
        self.meshes.iter().find(|m| m.is_in_range(location))
    }

    pub fn mesh_at_mut(&mut self, location: &Location) -> Option<&mut NavMesh> {
        self.meshes.iter_mut().find(|m| m.is_in_range(location))
    }

    /// Waypoints from `from` to `to`, see [`find_path_with`](Self::find_path_with)
    pub fn find_path(&self, from: &Location, to: &Location) -> Result<Vec<Point3<Real>>, NavError> {
        self.find_path_with(from, to, &SearchLimits::default())
    }

    /// Waypoints from `from` to `to`: the start position, the midpoint of
    /// every portal crossed, then the goal position.
    ///
    /// Both locations must be covered by the same mesh (the one covering
    /// `from`), otherwise the result is [`NavError::NoCoverage`]. Each
    /// endpoint is resolved to the triangle it stands on, falling back to the
    /// triangle with the nearest centroid.
    pub fn find_path_with(
        &self,
        from: &Location,
        to: &Location,
        limits: &SearchLimits,
    ) -> Result<Vec<Point3<Real>>, NavError> {
        let mesh = self.mesh_at(from).ok_or(NavError::NoCoverage)?;
        if !mesh.is_in_range(to) {
            return Err(NavError::NoCoverage);
        }

        let resolve = |p: &Point3<Real>| mesh.triangle_at(p).or_else(|| mesh.nearest_triangle(p));
        let start = resolve(&from.position).ok_or(NavError::NoPath)?;
        let goal = resolve(&to.position).ok_or(NavError::NoPath)?;

        let path = mesh.find_path_with(start, goal, limits)?;

        let mut waypoints = Vec::with_capacity(path.len() + 1);
        waypoints.push(from.position);
        for pair in path.nodes().windows(2) {
            let portal = mesh
                .triangle(pair[0])
                .and_then(|t| t.portal_to(pair[1]))
                .ok_or(NavError::NoPath)?;
            if let Some(mid) = portal.midpoint(|k| mesh.position_of(k)) {
                waypoints.push(mid);
            }
        }
        waypoints.push(to.position);
        Ok(waypoints)
    }
}
