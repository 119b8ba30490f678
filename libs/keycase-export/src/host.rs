//! JSON payload for the host that materializes meshes and rounds edges.

use config::constants::is_valid_bevel_weight;
use keycase_kernel::{BevelMap, MeshData};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ExportError, ExportResult};
use crate::polyhedron::validate_faces;

/// One rounded edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BevelEntry {
    pub a: u32,
    pub b: u32,
    pub weight: f64,
}

/// A named mesh with its bevel annotations.
///
/// # Example
///
/// ```rust
/// use keycase_export::host::HostMesh;
/// use keycase_kernel::{BevelMap, MeshData};
///
/// let data = MeshData {
///     points: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
///     faces: vec![vec![0, 1, 2]],
/// };
/// let mut bevels = BevelMap::new();
/// bevels.record(1, 0, 0.5).unwrap();
/// let host = HostMesh::new("plate", &data, &bevels);
/// let json = host.to_json().unwrap();
/// assert_eq!(HostMesh::from_json(&json).unwrap(), host);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostMesh {
    pub name: String,
    pub points: Vec<[f64; 3]>,
    pub faces: Vec<Vec<u32>>,
    #[serde(default)]
    pub bevel_weights: Vec<BevelEntry>,
}

impl HostMesh {
    /// Packs mesh data and bevel weights under `name`.
    pub fn new(name: impl Into<String>, mesh: &MeshData, bevels: &BevelMap) -> Self {
        Self {
            name: name.into(),
            points: mesh.points.clone(),
            faces: mesh.faces.clone(),
            bevel_weights: bevels
                .iter()
                .map(|(key, weight)| BevelEntry {
                    a: key.low(),
                    b: key.high(),
                    weight,
                })
                .collect(),
        }
    }

    /// The `(points, faces)` part.
    pub fn mesh_data(&self) -> MeshData {
        MeshData {
            points: self.points.clone(),
            faces: self.faces.clone(),
        }
    }

    /// Rebuilds the bevel map.
    pub fn bevel_map(&self) -> ExportResult<BevelMap> {
        let mut map = BevelMap::new();
        for e in &self.bevel_weights {
            map.record(e.a, e.b, e.weight)
                .map_err(|_| ExportError::InvalidWeight {
                    a: e.a,
                    b: e.b,
                    weight: e.weight,
                })?;
        }
        Ok(map)
    }

    /// Checks faces and bevel entries against the point list.
    pub fn validate(&self) -> ExportResult<()> {
        validate_faces(&self.mesh_data())?;
        let len = self.points.len();
        for e in &self.bevel_weights {
            for index in [e.a, e.b] {
                if index as usize >= len {
                    return Err(ExportError::IndexOutOfRange {
                        context: format!("bevel ({}, {})", e.a, e.b),
                        index,
                        len,
                    });
                }
            }
            if !is_valid_bevel_weight(e.weight) || e.a == e.b {
                return Err(ExportError::InvalidWeight {
                    a: e.a,
                    b: e.b,
                    weight: e.weight,
                });
            }
        }
        Ok(())
    }

    /// Serializes after validation.
    pub fn to_json(&self) -> ExportResult<String> {
        self.validate()?;
        let json = serde_json::to_string(self)?;
        debug!(
            name = %self.name,
            points = self.points.len(),
            faces = self.faces.len(),
            bevels = self.bevel_weights.len(),
            "encoded host mesh"
        );
        Ok(json)
    }

    /// Parses and validates a payload.
    pub fn from_json(json: &str) -> ExportResult<Self> {
        let host: HostMesh = serde_json::from_str(json)?;
        host.validate()?;
        Ok(host)
    }
}
