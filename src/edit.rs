//! Per-caller mesh editing sessions.
//!
//! An [`EditSession`] holds one editor's selection and move state; there is
//! no global editor registry. Each operation resolves the mesh covering the
//! editor's location; a failed operation leaves that mesh unchanged and
//! returns an [`EditError`] with a readable reason.

use crate::float_types::Real;
use crate::mesh::NavMesh;
use crate::mesh::keys::MeshKey;
use crate::registry::NavMeshRegistry;
use crate::world::Location;
use nalgebra::Point3;

/// Maximum distance between the editor and a point it selects
pub const POINT_SELECTION_MAX_DISTANCE: Real = 1.5;

/// A failed edit, worded for the person editing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{action} failed. {reason}")]
pub struct EditError {
    pub action: &'static str,
    pub reason: String,
}

impl EditError {
    fn new(action: &'static str, reason: impl Into<String>) -> Self {
        EditError {
            action,
            reason: reason.into(),
        }
    }
}

const NO_MESH: &str = "No NavMesh is covering this area.";
const NO_POINT: &str = "No point is nearby.";

/// Selection and move state of one editor
#[derive(Debug, Clone)]
pub struct EditSession {
    selected: Vec<MeshKey>,
    moving: Option<MeshKey>,
    snap_to_block_center: bool,
}

impl Default for EditSession {
    fn default() -> Self {
        EditSession {
            selected: Vec::new(),
            moving: None,
            snap_to_block_center: true,
        }
    }
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected points, oldest first
    pub fn selected(&self) -> &[MeshKey] {
        &self.selected
    }

    pub const fn moving_point(&self) -> Option<MeshKey> {
        self.moving
    }

    pub const fn snaps_to_block_center(&self) -> bool {
        self.snap_to_block_center
    }

    /// Flip block-center snapping; returns the new setting
    pub fn toggle_snap(&mut self) -> bool {
        self.snap_to_block_center = !self.snap_to_block_center;
        self.snap_to_block_center
    }

    /// Where a point placed from `at` ends up
    pub fn placement(&self, at: &Location) -> Point3<Real> {
        let p = at.position;
        if self.snap_to_block_center {
            Point3::new(p.x.floor() + 0.5, p.y.floor(), p.z.floor() + 0.5)
        } else {
            p
        }
    }

    /// Status line naming the mesh under the editor
    pub fn mesh_name(&self, registry: &NavMeshRegistry, at: &Location) -> String {
        match registry.mesh_at(at) {
            Some(mesh) => format!("Mesh: '{}'", mesh.id()),
            None => "No mesh in range".to_string(),
        }
    }

    /// Create a point at the editor's (snapped) location, optionally selecting it
    pub fn create_point(
        &mut self,
        registry: &mut NavMeshRegistry,
        at: &Location,
        select: bool,
    ) -> Result<MeshKey, EditError> {
        const ACTION: &str = "Creating point";
        let position = self.placement(at);
        let mesh = registry
            .mesh_at_mut(at)
            .ok_or_else(|| EditError::new(ACTION, NO_MESH))?;
        let key = mesh.create_point(position.x, position.y, position.z);
        if select {
            self.selected.push(key);
        }
        Ok(key)
    }

    /// Delete the nearest point (and its triangles)
    pub fn delete_point(
        &mut self,
        registry: &mut NavMeshRegistry,
        at: &Location,
    ) -> Result<MeshKey, EditError> {
        const ACTION: &str = "Deleting point";
        let mesh = registry
            .mesh_at_mut(at)
            .ok_or_else(|| EditError::new(ACTION, NO_MESH))?;
        let point = nearest_point(mesh, at).ok_or_else(|| EditError::new(ACTION, NO_POINT))?;
        mesh.remove_point(point);
        self.selected.retain(|k| *k != point);
        if self.moving == Some(point) {
            self.moving = None;
        }
        Ok(point)
    }

    pub fn select_point(
        &mut self,
        registry: &NavMeshRegistry,
        at: &Location,
    ) -> Result<MeshKey, EditError> {
        const ACTION: &str = "Selecting point";
        let mesh = registry
            .mesh_at(at)
            .ok_or_else(|| EditError::new(ACTION, NO_MESH))?;
        let point = nearest_point(mesh, at).ok_or_else(|| EditError::new(ACTION, NO_POINT))?;
        if self.selected.contains(&point) {
            return Err(EditError::new(ACTION, "The point is already selected."));
        }
        self.selected.push(point);
        Ok(point)
    }

    pub fn deselect_point(
        &mut self,
        registry: &NavMeshRegistry,
        at: &Location,
    ) -> Result<MeshKey, EditError> {
        const ACTION: &str = "Deselecting point";
        let mesh = registry
            .mesh_at(at)
            .ok_or_else(|| EditError::new(ACTION, NO_MESH))?;
        let point = nearest_point(mesh, at).ok_or_else(|| EditError::new(ACTION, NO_POINT))?;
        let i = self
            .selected
            .iter()
            .position(|k| *k == point)
            .ok_or_else(|| EditError::new(ACTION, "The point is not selected."))?;
        self.selected.remove(i);
        Ok(point)
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Create a triangle from the selection.
    ///
    /// With three points selected they are used as-is; with two, a third point
    /// is created at the editor's location. Afterwards the oldest selected
    /// point is dropped, so repeated calls lay down a triangle strip.
    pub fn create_triangle(
        &mut self,
        registry: &mut NavMeshRegistry,
        at: &Location,
    ) -> Result<MeshKey, EditError> {
        const ACTION: &str = "Creating triangle";
        match self.selected.len() {
            n if n > 3 => {
                return Err(EditError::new(ACTION, format!("Too many points selected ({n}).")));
            },
            n if n < 2 => {
                return Err(EditError::new(ACTION, format!("Not enough points selected ({n}).")));
            },
            _ => {},
        }

        let position = self.placement(at);
        let mesh = registry
            .mesh_at_mut(at)
            .ok_or_else(|| EditError::new(ACTION, NO_MESH))?;

        let (third, created) = match self.selected.get(2) {
            Some(&third) => (third, None),
            None => {
                let point = mesh.create_point(position.x, position.y, position.z);
                (point, Some(point))
            },
        };

        match mesh.create_triangle(self.selected[0], self.selected[1], third) {
            Ok(triangle) => {
                if let Some(point) = created {
                    self.selected.push(point);
                }
                self.selected.remove(0);
                Ok(triangle)
            },
            Err(err) => {
                if let Some(point) = created {
                    mesh.remove_point(point);
                }
                Err(EditError::new(ACTION, err.to_string()))
            },
        }
    }

    /// Delete the triangle the editor stands on
    pub fn delete_triangle(
        &mut self,
        registry: &mut NavMeshRegistry,
        at: &Location,
    ) -> Result<MeshKey, EditError> {
        const ACTION: &str = "Deleting triangle";
        let mesh = registry
            .mesh_at_mut(at)
            .ok_or_else(|| EditError::new(ACTION, NO_MESH))?;
        let triangle = mesh
            .triangle_at(&at.position)
            .ok_or_else(|| EditError::new(ACTION, "No triangle found at your position."))?;
        mesh.delete_triangle(triangle);
        Ok(triangle)
    }

    /// Start moving the nearest point, or stop if a point is already moving.
    /// Returns the point now moving, `None` after stopping.
    pub fn toggle_move(
        &mut self,
        registry: &NavMeshRegistry,
        at: &Location,
    ) -> Result<Option<MeshKey>, EditError> {
        const ACTION: &str = "Moving point";
        if self.moving.take().is_some() {
            return Ok(None);
        }
        let mesh = registry
            .mesh_at(at)
            .ok_or_else(|| EditError::new(ACTION, NO_MESH))?;
        let point = nearest_point(mesh, at).ok_or_else(|| EditError::new(ACTION, NO_POINT))?;
        self.moving = Some(point);
        Ok(Some(point))
    }

    /// Drag the moving point (if any) to the editor's location; call once per tick
    pub fn update(&mut self, registry: &mut NavMeshRegistry, at: &Location) -> Result<(), EditError> {
        const ACTION: &str = "Moving point";
        let Some(point) = self.moving else {
            return Ok(());
        };
        let position = self.placement(at);
        let mesh = registry
            .mesh_at_mut(at)
            .ok_or_else(|| EditError::new(ACTION, NO_MESH))?;
        mesh.move_point(point, position).map_err(|err| {
            self.moving = None;
            EditError::new(ACTION, err.to_string())
        })
    }

    /// Describe the triangle under the editor
    pub fn info(&self, registry: &NavMeshRegistry, at: &Location) -> Result<String, EditError> {
        const ACTION: &str = "Giving info";
        let mesh = registry
            .mesh_at(at)
            .ok_or_else(|| EditError::new(ACTION, NO_MESH))?;
        let key = mesh
            .triangle_at(&at.position)
            .ok_or_else(|| EditError::new(ACTION, "No triangle nearby."))?;
        let neighbors = mesh.triangle(key).map_or(0, |t| t.neighbor_count());
        Ok(format!(
            "Triangle '{key}' in graph '{}': {neighbors} neighbors",
            mesh.id()
        ))
    }
}

fn nearest_point(mesh: &NavMesh, at: &Location) -> Option<MeshKey> {
    mesh.nearest_point(&at.position, POINT_SELECTION_MAX_DISTANCE)
}
