//! Mesh persistence.
//!
//! A [`SerializedNavMesh`] is the document form of a mesh: world name, range,
//! points with ids and triangles referencing point ids. Ids are opaque
//! strings; well-formed keys are kept on load, anything else is replaced by a
//! fresh key. Referential integrity is checked before any mesh is built.

#[cfg(feature = "json-io")]
mod json;

use crate::errors::{EntityKind, NavError};
use crate::float_types::Real;
use crate::geometry::NavPoint;
use crate::mesh::NavMesh;
use crate::mesh::keys::{KeyGenerator, MeshKey};
use crate::world::WorldId;
use hashbrown::{HashMap, HashSet};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Generic I/O and format‑conversion errors.
///
/// The JSON variant only exists with the `json-io` feature.
#[derive(Debug)]
pub enum IoError {
    StdIo(std::io::Error),
    #[cfg(feature = "json-io")]
    /// Error bubbled up from `serde_json` while reading or writing a document.
    Json(serde_json::Error),
    /// The document describes a mesh that cannot exist.
    Mesh(NavError),
    MalformedInput(String),
}

impl std::fmt::Display for IoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use IoError::*;

        match self {
            StdIo(error) => write!(f, "std::io::Error: {error}"),
            #[cfg(feature = "json-io")]
            Json(error) => write!(f, "JSON error: {error}"),
            Mesh(error) => write!(f, "Invalid mesh document: {error}"),
            MalformedInput(msg) => write!(f, "Input is malformed: {msg}"),
        }
    }
}

impl std::error::Error for IoError {}

impl From<std::io::Error> for IoError {
    fn from(value: std::io::Error) -> Self {
        Self::StdIo(value)
    }
}

impl From<NavError> for IoError {
    fn from(value: NavError) -> Self {
        Self::Mesh(value)
    }
}

#[cfg(feature = "json-io")]
impl From<serde_json::Error> for IoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// A point record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedPoint {
    pub id: String,
    pub x: Real,
    pub y: Real,
    pub z: Real,
}

/// A triangle record referencing three point ids
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedTriangle {
    pub id: String,
    pub points: [String; 3],
}

/// Document form of a [`NavMesh`]. The mesh id is not part of the document;
/// it is supplied on load (typically the file name).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedNavMesh {
    pub world_name: String,
    pub range_center: [Real; 3],
    pub range: Real,
    #[serde(default)]
    pub points: Vec<SerializedPoint>,
    #[serde(default)]
    pub triangles: Vec<SerializedTriangle>,
}

impl From<&NavMesh> for SerializedNavMesh {
    fn from(mesh: &NavMesh) -> Self {
        let c = mesh.range_center();
        SerializedNavMesh {
            world_name: mesh.world().name().to_string(),
            range_center: [c.x, c.y, c.z],
            range: mesh.range(),
            points: mesh
                .points()
                .map(|p| SerializedPoint {
                    id: p.key().to_string(),
                    x: p.position.x,
                    y: p.position.y,
                    z: p.position.z,
                })
                .collect(),
            triangles: mesh
                .triangles()
                .map(|t| SerializedTriangle {
                    id: t.key().to_string(),
                    points: t.points().map(|k| k.to_string()),
                })
                .collect(),
        }
    }
}

impl SerializedNavMesh {
    /// Build the mesh this document describes.
    ///
    /// Fails as a whole on duplicate ids, dangling point references or
    /// repeated corners; no partial mesh is ever returned.
    pub fn into_nav_mesh(self, id: &str) -> Result<NavMesh, IoError> {
        let [cx, cy, cz] = self.range_center;
        if !(cx.is_finite() && cy.is_finite() && cz.is_finite() && self.range.is_finite()) {
            return Err(IoError::MalformedInput(format!(
                "mesh '{id}' has a non-finite range"
            )));
        }

        let mut keys = DocumentKeys::new(id);

        let mut points = Vec::with_capacity(self.points.len());
        for p in &self.points {
            let key = keys.assign(&p.id)?;
            points.push(NavPoint::new(key, p.x, p.y, p.z));
        }

        let mut triangles = Vec::with_capacity(self.triangles.len());
        for t in &self.triangles {
            let mut corners = [MeshKey::from_bits(0); 3];
            for (corner, point_id) in corners.iter_mut().zip(&t.points) {
                *corner = keys
                    .point(point_id)
                    .ok_or_else(|| NavError::not_found(EntityKind::Point, point_id))?;
            }
            triangles.push((keys.assign(&t.id)?, corners));
        }

        let mesh = NavMesh::from_parts(
            id,
            WorldId::new(self.world_name),
            Point3::new(cx, cy, cz),
            self.range,
            points,
            triangles,
        )?;
        log::debug!(
            "loaded mesh '{}' with {} points and {} triangles",
            mesh.id(),
            mesh.point_count(),
            mesh.triangle_count()
        );
        Ok(mesh)
    }
}

impl NavMesh {
    /// Document form of this mesh
    pub fn to_serialized(&self) -> SerializedNavMesh {
        SerializedNavMesh::from(self)
    }
}

/// Document id → mesh key assignment during a load
struct DocumentKeys {
    by_id: HashMap<String, MeshKey>,
    used: HashSet<MeshKey>,
    generator: KeyGenerator,
}

impl DocumentKeys {
    fn new(mesh_id: &str) -> Self {
        DocumentKeys {
            by_id: HashMap::new(),
            used: HashSet::new(),
            generator: KeyGenerator::for_mesh(mesh_id),
        }
    }

    /// Key for a new document id: the id itself if it is a free well-formed key
    fn assign(&mut self, id: &str) -> Result<MeshKey, NavError> {
        if self.by_id.contains_key(id) {
            return Err(NavError::DuplicateKey(id.to_string()));
        }
        let key = match id.parse::<MeshKey>() {
            Ok(key) if !self.used.contains(&key) => key,
            _ => {
                let used = &self.used;
                self.generator.unused(|k| used.contains(&k))
            },
        };
        self.used.insert(key);
        self.by_id.insert(id.to_string(), key);
        Ok(key)
    }

    fn point(&self, id: &str) -> Option<MeshKey> {
        self.by_id.get(id).copied()
    }
}
