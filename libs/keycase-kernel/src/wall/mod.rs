//! # Offset Walls
//!
//! Turns an ordered boundary of outer top points into a double-walled shell:
//! outer skin, inner skin and floor strip, plus an optional top rim and end
//! caps.
//!
//! ## Algorithm Overview
//!
//! For every boundary point `p[i]`:
//! 1. Build the vertical wall plane of each adjacent edge and shift it inward
//!    by the wall thickness
//! 2. Intersect the two shifted planes (the miter line) with the floor plane
//!    to get the inner floor corner
//! 3. Lift that corner onto the top surface with `z_intersect` to get the
//!    inner top corner
//! 4. Emit outer, inner and floor faces for every segment, recording bevel
//!    weights for the edge classes the caller enabled
//!
//! The solid lies to the LEFT of the direction of travel, so closed loops run
//! counter-clockwise seen from +Z. All geometry is computed and checked before
//! anything is appended to the mesh: a failed build leaves the mesh and the
//! bevel map untouched.

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::ops::Range;

use config::constants::{
    is_valid_bevel_weight, GlobalConfig, DEFAULT_BEVEL_WEIGHT, DEFAULT_FLOOR_Z,
    DEFAULT_WALL_THICKNESS, EPSILON, POINT_TOLERANCE,
};
use tracing::{debug, trace};

use crate::bevel::BevelMap;
use crate::error::{KernelError, KernelResult};
use crate::mesh::Mesh;
use crate::mesh_point::MeshPoint;
use crate::plane::Plane;
use crate::point::{Point, UP};

// =============================================================================
// PARAMETERS
// =============================================================================

/// How an open boundary terminates at its first or last point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EndCap {
    /// Offset the end point perpendicular to its only edge.
    Square,
    /// Miter the inner corner against this plane (e.g. a neighbouring part).
    /// The end point itself must lie on the plane.
    Plane(Plane),
}

/// Surface the inner top corners are lifted onto.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TopSurface {
    /// Each inner top corner sits at the height of its outer top point.
    Level,
    /// Inner top corners lie on this plane.
    Plane(Plane),
}

/// Bevel weights per edge class; `None` leaves the class unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeBevels {
    /// Vertical edges of the outer skin at each boundary point.
    pub outer_vertical: Option<f64>,
    /// Vertical edges of the inner skin.
    pub inner_vertical: Option<f64>,
    /// Top edges of the outer skin.
    pub outer_top: Option<f64>,
    /// Top edges of the inner skin.
    pub inner_top: Option<f64>,
    /// Bottom edges of the outer skin.
    pub outer_floor: Option<f64>,
    /// Bottom edges of the inner skin.
    pub inner_floor: Option<f64>,
}

impl EdgeBevels {
    /// No rounded edges.
    pub fn none() -> Self {
        Self::default()
    }

    /// Only the outer vertical edges, with `weight`.
    pub fn outer_corners(weight: f64) -> Self {
        Self {
            outer_vertical: Some(weight),
            ..Self::default()
        }
    }

    fn weights(&self) -> [(&'static str, Option<f64>); 6] {
        [
            ("outer_vertical", self.outer_vertical),
            ("inner_vertical", self.inner_vertical),
            ("outer_top", self.outer_top),
            ("inner_top", self.inner_top),
            ("outer_floor", self.outer_floor),
            ("inner_floor", self.inner_floor),
        ]
    }
}

/// Wall construction parameters.
///
/// # Example
///
/// ```rust
/// use keycase_kernel::wall::{EdgeBevels, WallParams};
///
/// let params = WallParams::new(2.5)
///     .with_rim(true)
///     .with_bevels(EdgeBevels::outer_corners(0.6));
/// assert_eq!(params.thickness, 2.5);
/// assert!(params.cap_rim);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallParams {
    /// Horizontal distance between the outer and inner skin.
    pub thickness: f64,
    /// Height of the floor plane.
    pub floor_z: f64,
    /// Rule for the inner top corners.
    pub top: TopSurface,
    /// Close the top of the wall between outer and inner top edges.
    pub cap_rim: bool,
    /// Close both ends of an open wall.
    pub cap_ends: bool,
    /// Bevel weights per edge class.
    pub bevels: EdgeBevels,
    /// Tolerance for floor contact, zero-area loops, parallel walls and
    /// crossed offsets.
    pub tolerance: f64,
}

impl Default for WallParams {
    fn default() -> Self {
        Self {
            thickness: DEFAULT_WALL_THICKNESS,
            floor_z: DEFAULT_FLOOR_Z,
            top: TopSurface::Level,
            cap_rim: false,
            cap_ends: false,
            bevels: EdgeBevels::outer_corners(DEFAULT_BEVEL_WEIGHT),
            tolerance: EPSILON,
        }
    }
}

impl WallParams {
    /// Default parameters with the given thickness.
    pub fn new(thickness: f64) -> Self {
        Self {
            thickness,
            ..Self::default()
        }
    }

    /// Default parameters with the configured wall thickness and tolerance.
    pub fn from_config(config: &GlobalConfig) -> Self {
        Self::new(config.wall_thickness).with_tolerance(config.tolerance)
    }

    #[must_use]
    pub fn with_floor(mut self, floor_z: f64) -> Self {
        self.floor_z = floor_z;
        self
    }

    #[must_use]
    pub fn with_top(mut self, top: TopSurface) -> Self {
        self.top = top;
        self
    }

    #[must_use]
    pub fn with_rim(mut self, cap_rim: bool) -> Self {
        self.cap_rim = cap_rim;
        self
    }

    #[must_use]
    pub fn with_end_caps(mut self, cap_ends: bool) -> Self {
        self.cap_ends = cap_ends;
        self
    }

    #[must_use]
    pub fn with_bevels(mut self, bevels: EdgeBevels) -> Self {
        self.bevels = bevels;
        self
    }

    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    fn validate(&self) -> KernelResult<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(KernelError::invalid_parameter(
                "tolerance",
                format!("tolerance must be positive, got {}", self.tolerance),
            ));
        }
        if !self.thickness.is_finite() || self.thickness <= self.tolerance {
            return Err(KernelError::invalid_parameter(
                "thickness",
                format!("wall thickness must be a positive length, got {}", self.thickness),
            ));
        }
        if !self.floor_z.is_finite() {
            return Err(KernelError::invalid_parameter(
                "floor_z",
                format!("floor height must be finite, got {}", self.floor_z),
            ));
        }
        for (name, weight) in self.bevels.weights() {
            if let Some(w) = weight {
                if !is_valid_bevel_weight(w) {
                    return Err(KernelError::invalid_parameter(
                        name,
                        format!("bevel weight must be within 0.0..=1.0, got {w}"),
                    ));
                }
            }
        }
        Ok(())
    }
}

// =============================================================================
// BOUNDARY
// =============================================================================

/// Whether a boundary wraps around.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoopKind {
    /// The last point connects back to the first.
    Closed,
    /// A wall with two free ends.
    Open { start: EndCap, end: EndCap },
}

/// Ordered outer top points of a wall.
#[derive(Debug, Clone, PartialEq)]
pub struct WallLoop {
    points: Vec<MeshPoint>,
    kind: LoopKind,
    corner_bevels: BTreeMap<usize, f64>,
}

impl WallLoop {
    /// A closed, counter-clockwise boundary.
    pub fn closed(points: Vec<MeshPoint>) -> Self {
        Self {
            points,
            kind: LoopKind::Closed,
            corner_bevels: BTreeMap::new(),
        }
    }

    /// An open boundary with explicit end rules.
    pub fn open(points: Vec<MeshPoint>, start: EndCap, end: EndCap) -> Self {
        Self {
            points,
            kind: LoopKind::Open { start, end },
            corner_bevels: BTreeMap::new(),
        }
    }

    /// Overrides the outer vertical bevel weight at boundary point `index`.
    #[must_use]
    pub fn with_corner_bevel(mut self, index: usize, weight: f64) -> Self {
        self.corner_bevels.insert(index, weight);
        self
    }

    pub fn points(&self) -> &[MeshPoint] {
        &self.points
    }

    pub fn kind(&self) -> LoopKind {
        self.kind
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.kind, LoopKind::Closed)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Segments as `(from, to)` boundary positions.
    fn segments(&self) -> Vec<(usize, usize)> {
        let n = self.points.len();
        if self.is_closed() {
            (0..n).map(|i| (i, (i + 1) % n)).collect()
        } else {
            (1..n).map(|i| (i - 1, i)).collect()
        }
    }

    fn neighbours(&self, i: usize) -> (Option<usize>, Option<usize>) {
        let n = self.points.len();
        if self.is_closed() {
            (Some((i + n - 1) % n), Some((i + 1) % n))
        } else {
            ((i > 0).then(|| i - 1), (i + 1 < n).then(|| i + 1))
        }
    }
}

// =============================================================================
// OUTPUT
// =============================================================================

/// The four points recorded for one boundary position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallCorner {
    pub outer_top: MeshPoint,
    pub outer_floor: MeshPoint,
    pub inner_floor: MeshPoint,
    pub inner_top: MeshPoint,
}

/// Points and faces produced for one boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct WallShell {
    pub outer_top: Vec<MeshPoint>,
    pub outer_floor: Vec<MeshPoint>,
    pub inner_floor: Vec<MeshPoint>,
    pub inner_top: Vec<MeshPoint>,
    /// Indices of the faces this build appended.
    pub faces: Range<usize>,
}

impl WallShell {
    /// Corner points at boundary position `i`.
    pub fn corner(&self, i: usize) -> Option<WallCorner> {
        Some(WallCorner {
            outer_top: *self.outer_top.get(i)?,
            outer_floor: *self.outer_floor.get(i)?,
            inner_floor: *self.inner_floor.get(i)?,
            inner_top: *self.inner_top.get(i)?,
        })
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
}

// =============================================================================
// BUILDER
// =============================================================================

/// Computed coordinates for one boundary position.
#[derive(Debug, Clone, Copy)]
struct CornerGeometry {
    outer_top: Point,
    inner_floor: Point,
    inner_top: Point,
    outer_on_floor: bool,
    inner_on_floor: bool,
}

/// Builds walls into a shared mesh and bevel map.
///
/// # Example
///
/// ```rust
/// use keycase_kernel::wall::{WallBuilder, WallLoop, WallParams};
/// use keycase_kernel::{BevelMap, Mesh};
///
/// let mut mesh = Mesh::new();
/// let mut bevels = BevelMap::new();
/// let boundary = WallLoop::closed(vec![
///     mesh.add_xyz(-10.0, -10.0, 5.0),
///     mesh.add_xyz(10.0, -10.0, 5.0),
///     mesh.add_xyz(10.0, 10.0, 5.0),
///     mesh.add_xyz(-10.0, 10.0, 5.0),
/// ]);
/// let shell = WallBuilder::new(&mut mesh, &mut bevels)
///     .build(&boundary, &WallParams::new(2.0))
///     .unwrap();
/// assert_eq!(shell.face_count(), 12);
/// ```
pub struct WallBuilder<'a> {
    mesh: &'a mut Mesh,
    bevels: &'a mut BevelMap,
}

impl<'a> WallBuilder<'a> {
    pub fn new(mesh: &'a mut Mesh, bevels: &'a mut BevelMap) -> Self {
        Self { mesh, bevels }
    }

    /// Builds one wall.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` for bad thickness, floor height or bevel weights
    /// - `InvalidBoundary` for too few points, a clockwise or zero-area
    ///   closed loop, or points below the floor
    /// - `ForeignPoint` / `IndexOutOfRange` for handles this mesh did not issue
    /// - `DegeneratePlane` for repeated consecutive points
    /// - `ParallelPlanes` where the boundary doubles back on itself
    /// - `VerticalPlane` for a vertical top plane
    /// - `CrossedOffset` when an inner segment runs against its outer edge
    pub fn build(&mut self, boundary: &WallLoop, params: &WallParams) -> KernelResult<WallShell> {
        params.validate()?;
        let outer = self.resolve_boundary(boundary, params)?;
        let corners = compute_corners(boundary, &outer, params)?;
        check_crossings(boundary, &corners, params.tolerance)?;
        self.check_corner_bevels(boundary)?;

        let face_start = self.mesh.face_count();
        let shell = self.emit_points(boundary, &corners);
        self.emit_faces(boundary, &shell, params)?;
        let bevel_count = self.record_bevels(boundary, &shell, params)?;

        let shell = WallShell {
            faces: face_start..self.mesh.face_count(),
            ..shell
        };
        debug!(
            mesh = %self.mesh.id(),
            boundary_points = boundary.len(),
            closed = boundary.is_closed(),
            thickness = params.thickness,
            faces = shell.face_count(),
            bevels = bevel_count,
            "built offset wall"
        );
        Ok(shell)
    }

    /// Current coordinates of every boundary point, validated.
    fn resolve_boundary(
        &self,
        boundary: &WallLoop,
        params: &WallParams,
    ) -> KernelResult<Vec<Point>> {
        let min_points = if boundary.is_closed() { 3 } else { 2 };
        if boundary.len() < min_points {
            return Err(KernelError::invalid_boundary(format!(
                "{} boundary needs at least {min_points} points, got {}",
                if boundary.is_closed() { "closed" } else { "open" },
                boundary.len()
            )));
        }

        let mut outer = Vec::with_capacity(boundary.len());
        for (i, handle) in boundary.points().iter().enumerate() {
            let p = self.mesh.point(handle)?;
            if p.z < params.floor_z - params.tolerance {
                return Err(KernelError::invalid_boundary(format!(
                    "point {i} at z = {} lies below the floor at z = {}",
                    p.z, params.floor_z
                )));
            }
            outer.push(p);
        }

        if boundary.is_closed() {
            let area = signed_area_xy(&outer);
            if area.abs() < params.tolerance {
                return Err(KernelError::invalid_boundary("closed boundary encloses no area"));
            }
            if area < 0.0 {
                return Err(KernelError::invalid_boundary(
                    "closed boundary runs clockwise; the solid must lie to the left",
                ));
            }
        }
        Ok(outer)
    }

    fn check_corner_bevels(&self, boundary: &WallLoop) -> KernelResult<()> {
        for (&i, &w) in &boundary.corner_bevels {
            if i >= boundary.len() {
                return Err(KernelError::invalid_parameter(
                    "corner_bevels",
                    format!("corner {i} is outside a boundary of {} points", boundary.len()),
                ));
            }
            if !is_valid_bevel_weight(w) {
                return Err(KernelError::invalid_parameter(
                    "corner_bevels",
                    format!("bevel weight must be within 0.0..=1.0, got {w}"),
                ));
            }
        }
        Ok(())
    }

    fn emit_points(&mut self, boundary: &WallLoop, corners: &[CornerGeometry]) -> WallShell {
        let n = corners.len();
        let mut shell = WallShell {
            outer_top: boundary.points().to_vec(),
            outer_floor: Vec::with_capacity(n),
            inner_floor: Vec::with_capacity(n),
            inner_top: Vec::with_capacity(n),
            faces: 0..0,
        };
        for (i, c) in corners.iter().enumerate() {
            let outer_floor = if c.outer_on_floor {
                shell.outer_top[i]
            } else {
                self.mesh.add_xyz(c.outer_top.x, c.outer_top.y, c.inner_floor.z)
            };
            let inner_floor = self.mesh.add_point(c.inner_floor);
            let inner_top = if c.inner_on_floor {
                inner_floor
            } else {
                self.mesh.add_point(c.inner_top)
            };
            shell.outer_floor.push(outer_floor);
            shell.inner_floor.push(inner_floor);
            shell.inner_top.push(inner_top);
        }
        shell
    }

    fn emit_faces(
        &mut self,
        boundary: &WallLoop,
        s: &WallShell,
        params: &WallParams,
    ) -> KernelResult<()> {
        for (a, b) in boundary.segments() {
            // outer skin, seen from outside: bottom-left, bottom-right, top-right, top-left
            self.emit(&[s.outer_floor[a], s.outer_floor[b], s.outer_top[b], s.outer_top[a]])?;
            // inner skin, seen from the cavity
            self.emit(&[s.inner_floor[b], s.inner_floor[a], s.inner_top[a], s.inner_top[b]])?;
            // floor strip, facing down
            self.emit(&[s.outer_floor[a], s.inner_floor[a], s.inner_floor[b], s.outer_floor[b]])?;
            if params.cap_rim {
                self.emit(&[s.outer_top[a], s.outer_top[b], s.inner_top[b], s.inner_top[a]])?;
            }
        }
        if params.cap_ends && !boundary.is_closed() {
            let last = boundary.len() - 1;
            self.emit(&[s.inner_floor[0], s.outer_floor[0], s.outer_top[0], s.inner_top[0]])?;
            self.emit(&[
                s.inner_top[last],
                s.outer_top[last],
                s.outer_floor[last],
                s.inner_floor[last],
            ])?;
        }
        Ok(())
    }

    /// Appends a face, dropping corners that collapsed onto their neighbour.
    ///
    /// Four distinct corners give a quad, three a triangle; anything less has
    /// no area and is skipped.
    fn emit(&mut self, corners: &[MeshPoint; 4]) -> KernelResult<()> {
        let mut distinct: Vec<MeshPoint> = Vec::with_capacity(4);
        for (i, c) in corners.iter().enumerate() {
            let next = &corners[(i + 1) % corners.len()];
            if c != next {
                distinct.push(*c);
            }
        }
        match distinct.as_slice() {
            [a, b, c, d] => {
                self.mesh.add_quad(a, b, c, d)?;
            }
            [a, b, c] => {
                self.mesh.add_tri(a, b, c)?;
            }
            _ => {
                let indices: Vec<u32> = corners.iter().map(MeshPoint::index).collect();
                trace!(?indices, "skipped collapsed face");
            }
        }
        Ok(())
    }

    fn record_bevels(
        &mut self,
        boundary: &WallLoop,
        s: &WallShell,
        params: &WallParams,
    ) -> KernelResult<usize> {
        let before = self.bevels.len();
        let bevels = params.bevels;

        for i in 0..boundary.len() {
            let outer_weight = boundary
                .corner_bevels
                .get(&i)
                .copied()
                .or(bevels.outer_vertical);
            self.record(&s.outer_top[i], &s.outer_floor[i], outer_weight)?;
            self.record(&s.inner_top[i], &s.inner_floor[i], bevels.inner_vertical)?;
        }
        for (a, b) in boundary.segments() {
            self.record(&s.outer_top[a], &s.outer_top[b], bevels.outer_top)?;
            self.record(&s.inner_top[a], &s.inner_top[b], bevels.inner_top)?;
            self.record(&s.outer_floor[a], &s.outer_floor[b], bevels.outer_floor)?;
            self.record(&s.inner_floor[a], &s.inner_floor[b], bevels.inner_floor)?;
        }
        Ok(self.bevels.len().saturating_sub(before))
    }

    fn record(&mut self, a: &MeshPoint, b: &MeshPoint, weight: Option<f64>) -> KernelResult<()> {
        match weight {
            Some(w) if a != b => self.bevels.record_edge(a, b, w),
            _ => Ok(()),
        }
    }
}

/// Builds a wall with a fresh [`WallBuilder`].
pub fn build_wall(
    mesh: &mut Mesh,
    bevels: &mut BevelMap,
    boundary: &WallLoop,
    params: &WallParams,
) -> KernelResult<WallShell> {
    WallBuilder::new(mesh, bevels).build(boundary, params)
}

// =============================================================================
// GEOMETRY
// =============================================================================

/// Shoelace area of the XY projection; positive when counter-clockwise.
fn signed_area_xy(points: &[Point]) -> f64 {
    let n = points.len();
    let twice: f64 = (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum();
    twice / 2.0
}

/// Vertical plane through the edge `a -> b`, normal pointing to the right
/// of travel (away from the solid).
fn wall_plane(a: Point, b: Point) -> KernelResult<Plane> {
    Plane::from_points(a, b, a + UP)
}

fn compute_corners(
    boundary: &WallLoop,
    outer: &[Point],
    params: &WallParams,
) -> KernelResult<Vec<CornerGeometry>> {
    let floor = Plane::horizontal(params.floor_z);
    let t = params.thickness;
    let tol = params.tolerance;

    let mut corners = Vec::with_capacity(outer.len());
    for (i, &p) in outer.iter().enumerate() {
        let (prev, next) = boundary.neighbours(i);
        let incoming = prev.map(|j| wall_plane(outer[j], p)).transpose()?;
        let outgoing = next.map(|j| wall_plane(p, outer[j])).transpose()?;

        let inner_floor = match (incoming, outgoing) {
            (Some(inc), Some(out)) => miter_corner(i, p, [&inc, &out], &floor, t, tol)?,
            (None, Some(out)) => end_corner(p, &out, start_cap(boundary), &floor, t, tol)?,
            (Some(inc), None) => end_corner(p, &inc, end_cap(boundary), &floor, t, tol)?,
            (None, None) => {
                return Err(KernelError::invalid_boundary(format!("point {i} has no neighbours")));
            }
        };

        let top_z = match params.top {
            TopSurface::Level => p.z,
            TopSurface::Plane(plane) => plane.z_intersect(inner_floor.x, inner_floor.y)?,
        };
        if top_z < params.floor_z - tol {
            return Err(KernelError::invalid_boundary(format!(
                "inner top of point {i} at z = {top_z} lies below the floor at z = {}",
                params.floor_z
            )));
        }

        corners.push(CornerGeometry {
            outer_top: p,
            inner_floor,
            inner_top: Point::new(inner_floor.x, inner_floor.y, top_z),
            outer_on_floor: (p.z - params.floor_z).abs() < tol,
            inner_on_floor: (top_z - params.floor_z).abs() < tol,
        });
    }
    Ok(corners)
}

/// Inner floor corner where the `[incoming, outgoing]` walls meet.
fn miter_corner(
    i: usize,
    p: Point,
    [incoming, outgoing]: [&Plane; 2],
    floor: &Plane,
    t: f64,
    tol: f64,
) -> KernelResult<Point> {
    let inner_in = incoming.shifted_along_normal(-t);
    let inner_out = outgoing.shifted_along_normal(-t);
    match inner_in.intersect_plane_within(&inner_out, tol) {
        Some(miter) => on_floor(floor, miter.point, miter.direction, tol),
        None if incoming.normal().dot(outgoing.normal()) > 0.0 => {
            trace!(point = i, "collinear edges, plain offset");
            Ok(offset_on_floor(p, outgoing, floor, t))
        }
        None => Err(KernelError::parallel(format!(
            "boundary doubles back on itself at point {i}"
        ))),
    }
}

/// Inner floor corner at the free end of an open wall.
fn end_corner(
    p: Point,
    wall: &Plane,
    cap: EndCap,
    floor: &Plane,
    t: f64,
    tol: f64,
) -> KernelResult<Point> {
    match cap {
        EndCap::Square => Ok(offset_on_floor(p, wall, floor, t)),
        EndCap::Plane(end) => {
            if !end.contains(p, POINT_TOLERANCE) {
                return Err(KernelError::invalid_boundary(format!(
                    "end point {p:?} does not lie on its end plane"
                )));
            }
            let inner = wall.shifted_along_normal(-t);
            let miter = inner.intersect_plane_within(&end, tol).ok_or_else(|| {
                KernelError::parallel("end plane is parallel to the wall")
            })?;
            on_floor(floor, miter.point, miter.direction, tol)
        }
    }
}

/// Where a miter line through `point` meets the floor.
fn on_floor(floor: &Plane, point: Point, direction: Point, tol: f64) -> KernelResult<Point> {
    floor
        .intersect_line_within(point, point + direction, tol)
        .ok_or_else(|| KernelError::parallel("miter line runs parallel to the floor"))
}

fn offset_on_floor(p: Point, wall: &Plane, floor: &Plane, t: f64) -> Point {
    let q = p - wall.normal() * t;
    Point::new(q.x, q.y, floor.point().z)
}

fn start_cap(boundary: &WallLoop) -> EndCap {
    match boundary.kind {
        LoopKind::Open { start, .. } => start,
        LoopKind::Closed => EndCap::Square,
    }
}

fn end_cap(boundary: &WallLoop) -> EndCap {
    match boundary.kind {
        LoopKind::Open { end, .. } => end,
        LoopKind::Closed => EndCap::Square,
    }
}

/// Rejects inner segments whose direction opposes their outer edge.
fn check_crossings(boundary: &WallLoop, corners: &[CornerGeometry], tol: f64) -> KernelResult<()> {
    for (a, b) in boundary.segments() {
        let outer = corners[b].outer_top - corners[a].outer_top;
        let inner = corners[b].inner_floor - corners[a].inner_floor;
        if outer.x * inner.x + outer.y * inner.y <= tol {
            return Err(KernelError::CrossedOffset { segment: a });
        }
    }
    Ok(())
}
