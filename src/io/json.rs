use super::{IoError, SerializedNavMesh};
use crate::mesh::NavMesh;
use std::path::Path;

impl SerializedNavMesh {
    /// Pretty-printed JSON document
    pub fn to_json(&self) -> Result<String, IoError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, IoError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl NavMesh {
    /// Serialize this mesh as a JSON document.
    ///
    /// ```rust
    /// # use navmesh::mesh::NavMesh;
    /// # use nalgebra::Point3;
    /// let mut mesh = NavMesh::new("plaza", "overworld", Point3::origin(), 32.0);
    /// let a = mesh.create_point(0.0, 0.0, 0.0);
    /// let b = mesh.create_point(1.0, 0.0, 0.0);
    /// let c = mesh.create_point(0.0, 0.0, 1.0);
    /// mesh.create_triangle(a, b, c).unwrap();
    ///
    /// let json = mesh.to_json().unwrap();
    /// let loaded = NavMesh::from_json("plaza", &json).unwrap();
    /// assert_eq!(loaded.triangle_count(), 1);
    /// ```
    pub fn to_json(&self) -> Result<String, IoError> {
        self.to_serialized().to_json()
    }

    /// Build a mesh named `id` from a JSON document
    pub fn from_json(id: &str, json: &str) -> Result<NavMesh, IoError> {
        SerializedNavMesh::from_json(json)?.into_nav_mesh(id)
    }

    /// Write this mesh to `path` as JSON
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Read a mesh named `id` from the JSON file at `path`
    pub fn load_json(id: &str, path: impl AsRef<Path>) -> Result<NavMesh, IoError> {
        let json = std::fs::read_to_string(path)?;
        NavMesh::from_json(id, &json)
    }
}
