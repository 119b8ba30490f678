//! # Mesh Data Structure
//!
//! Append-only indexed point/face store. Points get stable indices on
//! insertion and are never removed; faces are triangles or quads wound
//! counter-clockwise when viewed from outside the solid.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{KernelError, KernelResult};
use crate::mesh_point::{MeshId, MeshPoint};
use crate::point::{Point, PointExt};
use crate::transform::Transform;

static NEXT_MESH_ID: AtomicU64 = AtomicU64::new(1);

// =============================================================================
// FACE
// =============================================================================

/// A triangle or quad referencing mesh point indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    Tri([u32; 3]),
    Quad([u32; 4]),
}

impl Face {
    /// Vertex indices in winding order.
    #[inline]
    pub fn indices(&self) -> &[u32] {
        match self {
            Face::Tri(ix) => ix,
            Face::Quad(ix) => ix,
        }
    }

    /// Number of corners (3 or 4).
    #[inline]
    pub fn len(&self) -> usize {
        self.indices().len()
    }

    /// Always false; faces have at least three corners.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Same face with opposite winding.
    #[must_use]
    pub fn reversed(&self) -> Self {
        match *self {
            Face::Tri([a, b, c]) => Face::Tri([c, b, a]),
            Face::Quad([a, b, c, d]) => Face::Quad([d, c, b, a]),
        }
    }

    /// Directed edges `(from, to)` around the face.
    pub fn edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let ix = self.indices();
        let n = ix.len();
        (0..n).map(move |i| (ix[i], ix[(i + 1) % n]))
    }

    fn from_slice(indices: &[u32]) -> KernelResult<Self> {
        match *indices {
            [a, b, c] => Ok(Face::Tri([a, b, c])),
            [a, b, c, d] => Ok(Face::Quad([a, b, c, d])),
            _ => Err(KernelError::invalid_parameter(
                "face",
                format!("faces have 3 or 4 corners, got {}", indices.len()),
            )),
        }
    }
}

// =============================================================================
// MESH DATA (interchange contract)
// =============================================================================

/// The `(points, faces)` contract handed to renderers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshData {
    /// Point coordinates in index order.
    pub points: Vec<[f64; 3]>,
    /// Faces as index loops of length 3 or 4.
    pub faces: Vec<Vec<u32>>,
}

impl MeshData {
    /// Number of points.
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Number of faces.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
}

// =============================================================================
// MESH
// =============================================================================

/// An indexed polygon mesh under construction.
///
/// # Example
///
/// ```rust
/// use keycase_kernel::Mesh;
///
/// let mut mesh = Mesh::new();
/// let a = mesh.add_xyz(0.0, 0.0, 0.0);
/// let b = mesh.add_xyz(1.0, 0.0, 0.0);
/// let c = mesh.add_xyz(0.0, 1.0, 0.0);
/// mesh.add_tri(&a, &b, &c).unwrap();
/// assert_eq!(mesh.face_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Mesh {
    id: MeshId,
    points: Vec<Point>,
    faces: Vec<Face>,
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

impl Mesh {
    /// Creates an empty mesh with a fresh identity.
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    /// Creates a mesh with pre-allocated capacity.
    pub fn with_capacity(point_count: usize, face_count: usize) -> Self {
        Self {
            id: MeshId(NEXT_MESH_ID.fetch_add(1, Ordering::Relaxed)),
            points: Vec::with_capacity(point_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Identity used to validate handles.
    #[inline]
    pub fn id(&self) -> MeshId {
        self.id
    }

    /// Returns the number of points.
    #[inline]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Returns the number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns true if the mesh has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All points in index order.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// All faces in insertion order.
    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    // -------------------------------------------------------------------------
    // Points
    // -------------------------------------------------------------------------

    /// Appends a point and returns its handle.
    pub fn add_point(&mut self, point: Point) -> MeshPoint {
        let index = self.points.len() as u32;
        self.points.push(point);
        MeshPoint::new(self.id, index, point)
    }

    /// Appends the point `(x, y, z)`.
    pub fn add_xyz(&mut self, x: f64, y: f64, z: f64) -> MeshPoint {
        self.add_point(Point::new(x, y, z))
    }

    /// Appends `local` after placing it with `placement`.
    pub fn add_placed(&mut self, placement: &Transform, local: Point) -> MeshPoint {
        self.add_point(placement.apply(local))
    }

    /// Handle for an existing index.
    pub fn handle(&self, index: u32) -> KernelResult<MeshPoint> {
        let point = self.point_at(index)?;
        Ok(MeshPoint::new(self.id, index, point))
    }

    /// Current coordinates of a handle's point.
    pub fn point(&self, handle: &MeshPoint) -> KernelResult<Point> {
        self.check_handle(handle)?;
        self.point_at(handle.index())
    }

    /// Replaces the coordinates stored at a handle's index.
    ///
    /// Every face and handle referring to that index sees the new position;
    /// no other point is affected. Returns a refreshed handle.
    pub fn set_point(&mut self, handle: &MeshPoint, point: Point) -> KernelResult<MeshPoint> {
        self.check_handle(handle)?;
        self.points[handle.index() as usize] = point;
        Ok(MeshPoint::new(self.id, handle.index(), point))
    }

    fn point_at(&self, index: u32) -> KernelResult<Point> {
        self.points
            .get(index as usize)
            .copied()
            .ok_or(KernelError::IndexOutOfRange {
                index,
                len: self.points.len(),
            })
    }

    fn check_handle(&self, handle: &MeshPoint) -> KernelResult<()> {
        if handle.mesh_id() != self.id {
            return Err(KernelError::ForeignPoint {
                index: handle.index(),
                owner: handle.mesh_id().get(),
                mesh: self.id.get(),
            });
        }
        if handle.index() as usize >= self.points.len() {
            return Err(KernelError::IndexOutOfRange {
                index: handle.index(),
                len: self.points.len(),
            });
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Faces
    // -------------------------------------------------------------------------

    /// Appends a triangle; returns the face index.
    pub fn add_tri(&mut self, a: &MeshPoint, b: &MeshPoint, c: &MeshPoint) -> KernelResult<usize> {
        for h in [a, b, c] {
            self.check_handle(h)?;
        }
        self.faces.push(Face::Tri([a.index(), b.index(), c.index()]));
        Ok(self.faces.len() - 1)
    }

    /// Appends a quad; returns the face index.
    pub fn add_quad(
        &mut self,
        a: &MeshPoint,
        b: &MeshPoint,
        c: &MeshPoint,
        d: &MeshPoint,
    ) -> KernelResult<usize> {
        for h in [a, b, c, d] {
            self.check_handle(h)?;
        }
        self.faces
            .push(Face::Quad([a.index(), b.index(), c.index(), d.index()]));
        Ok(self.faces.len() - 1)
    }

    /// Appends a face from raw indices (3 or 4 of them).
    pub fn add_face(&mut self, indices: &[u32]) -> KernelResult<usize> {
        for &index in indices {
            self.point_at(index)?;
        }
        let face = Face::from_slice(indices)?;
        self.faces.push(face);
        Ok(self.faces.len() - 1)
    }

    /// Appends a triangle fan from `hub` across consecutive `ring` points.
    ///
    /// The wall builder never emits fans; they are for callers joining extra
    /// geometry (a lid, a support post) at one shared vertex. With `closed`,
    /// the last ring point connects back to the first. Returns the number of
    /// triangles emitted.
    pub fn add_fan(
        &mut self,
        hub: &MeshPoint,
        ring: &[MeshPoint],
        closed: bool,
    ) -> KernelResult<usize> {
        if ring.len() < 2 {
            return Err(KernelError::invalid_parameter(
                "ring",
                format!("a fan needs at least 2 ring points, got {}", ring.len()),
            ));
        }
        let segments = if closed { ring.len() } else { ring.len() - 1 };
        for i in 0..segments {
            let a = &ring[i];
            let b = &ring[(i + 1) % ring.len()];
            self.add_tri(hub, a, b)?;
        }
        Ok(segments)
    }

    // -------------------------------------------------------------------------
    // Bulk operations
    // -------------------------------------------------------------------------

    /// Transforms every point in place.
    ///
    /// A handedness-flipping transform also reverses every face so normals
    /// keep pointing outward.
    pub fn transform(&mut self, transform: &Transform) {
        for p in &mut self.points {
            *p = p.transformed(transform);
        }
        if transform.is_mirrored() {
            self.reverse_faces();
        }
        debug!(
            mesh = %self.id,
            points = self.points.len(),
            mirrored = transform.is_mirrored(),
            "transformed mesh"
        );
    }

    /// Negates X of every point and reverses every face's winding.
    ///
    /// Applying it twice restores points and faces exactly.
    pub fn mirror_x(&mut self) {
        for p in &mut self.points {
            p.x = -p.x;
        }
        self.reverse_faces();
        debug!(mesh = %self.id, points = self.points.len(), "mirrored mesh across YZ");
    }

    fn reverse_faces(&mut self) {
        for face in &mut self.faces {
            *face = face.reversed();
        }
    }

    /// Appends another mesh; returns the index offset applied to its points.
    pub fn merge(&mut self, other: &Mesh) -> u32 {
        let offset = self.points.len() as u32;
        self.points.extend_from_slice(&other.points);
        self.faces.extend(other.faces.iter().map(|face| match *face {
            Face::Tri([a, b, c]) => Face::Tri([a + offset, b + offset, c + offset]),
            Face::Quad([a, b, c, d]) => {
                Face::Quad([a + offset, b + offset, c + offset, d + offset])
            }
        }));
        debug!(mesh = %self.id, from = %other.id, offset, "merged mesh");
        offset
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Unit normal of a face (Newell's method, robust for non-planar quads).
    pub fn face_normal(&self, face_index: usize) -> KernelResult<Point> {
        let face = self.faces.get(face_index).ok_or_else(|| {
            KernelError::invalid_parameter("face_index", format!("no face {face_index}"))
        })?;
        let mut normal = Point::ZERO;
        for (a, b) in face.edges() {
            let p = self.point_at(a)?;
            let q = self.point_at(b)?;
            normal.x += (p.y - q.y) * (p.z + q.z);
            normal.y += (p.z - q.z) * (p.x + q.x);
            normal.z += (p.x - q.x) * (p.y + q.y);
        }
        normal.unit()
    }

    /// Count of faces using each undirected edge, keyed `(min, max)`.
    pub fn edge_face_counts(&self) -> BTreeMap<(u32, u32), usize> {
        let mut counts = BTreeMap::new();
        for face in &self.faces {
            for (a, b) in face.edges() {
                *counts.entry((a.min(b), a.max(b))).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Every undirected edge borders exactly two faces.
    pub fn is_watertight(&self) -> bool {
        let counts = self.edge_face_counts();
        !counts.is_empty() && counts.values().all(|&c| c == 2)
    }

    /// No directed edge is used twice, i.e. neighbouring faces agree on
    /// winding.
    pub fn is_consistently_wound(&self) -> bool {
        let mut seen = std::collections::BTreeSet::new();
        self.faces
            .iter()
            .flat_map(|face| face.edges().collect::<Vec<_>>())
            .all(|edge| seen.insert(edge))
    }

    /// Signed enclosed volume; positive when faces wind outward.
    pub fn signed_volume(&self) -> f64 {
        let mut six_volume = 0.0;
        for face in &self.faces {
            let ix = face.indices();
            let p0 = self.points[ix[0] as usize];
            for w in ix[1..].windows(2) {
                let p1 = self.points[w[0] as usize];
                let p2 = self.points[w[1] as usize];
                six_volume += p0.dot(p1.cross(p2));
            }
        }
        six_volume / 6.0
    }

    /// Checks face indices are in range and distinct within each face.
    pub fn validate(&self) -> KernelResult<()> {
        for (face_index, face) in self.faces.iter().enumerate() {
            let ix = face.indices();
            for (i, &index) in ix.iter().enumerate() {
                self.point_at(index)?;
                if ix[..i].contains(&index) {
                    return Err(KernelError::invalid_parameter(
                        "face",
                        format!("face {face_index} repeats point {index}"),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Axis-aligned bounding box as `(min, max)`.
    pub fn bounding_box(&self) -> (Point, Point) {
        let Some((first, rest)) = self.points.split_first() else {
            return (Point::ZERO, Point::ZERO);
        };
        rest.iter()
            .fold((*first, *first), |(min, max), p| (min.min(*p), max.max(*p)))
    }

    /// Snapshot of the interchange contract.
    pub fn to_data(&self) -> MeshData {
        MeshData {
            points: self.points.iter().map(|p| p.to_array()).collect(),
            faces: self.faces.iter().map(|f| f.indices().to_vec()).collect(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
