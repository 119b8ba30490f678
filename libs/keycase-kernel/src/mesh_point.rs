//! Handles to points stored in a [`Mesh`](crate::Mesh).
//!
//! Construction steps pass `MeshPoint`s around instead of raw coordinates so
//! faces always reference the exact vertex another step created ("the
//! near-top-left corner of cell (2, 3)").

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::point::Point;

/// Identity of a mesh, unique within the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MeshId(pub(crate) u64);

impl MeshId {
    /// Raw identifier.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MeshId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mesh#{}", self.0)
    }
}

/// A point already stored in a mesh.
///
/// The cached coordinates are the ones the point had when the handle was
/// issued; after a bulk `Mesh::transform` use `Mesh::point` for the current
/// position. Equality and ordering use the owning mesh and the index only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MeshPoint {
    mesh: MeshId,
    index: u32,
    point: Point,
}

impl MeshPoint {
    pub(crate) fn new(mesh: MeshId, index: u32, point: Point) -> Self {
        Self { mesh, index, point }
    }

    /// Mesh that issued this handle.
    #[inline]
    pub fn mesh_id(&self) -> MeshId {
        self.mesh
    }

    /// Index into the owning mesh's point list.
    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Coordinates cached when the handle was issued.
    #[inline]
    pub fn point(&self) -> Point {
        self.point
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.point.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.point.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.point.z
    }
}

impl PartialEq for MeshPoint {
    fn eq(&self, other: &Self) -> bool {
        self.mesh == other.mesh && self.index == other.index
    }
}

impl Eq for MeshPoint {}

impl PartialOrd for MeshPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MeshPoint {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.mesh, self.index).cmp(&(other.mesh, other.index))
    }
}

impl std::hash::Hash for MeshPoint {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.mesh.hash(state);
        self.index.hash(state);
    }
}
