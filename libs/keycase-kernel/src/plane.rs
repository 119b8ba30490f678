//! # Planes and Lines
//!
//! Plane representation used for wall offsetting and miter construction.
//! A plane is stored as an anchor point plus a unit normal; planes built from
//! three points keep the first point as anchor.

use config::constants::{approx_zero, EPSILON};
use serde::{Deserialize, Serialize};

use crate::error::{KernelError, KernelResult};
use crate::point::{Point, PointExt};

// =============================================================================
// LINE
// =============================================================================

/// An infinite line through `point` along the unit vector `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// A point on the line.
    pub point: Point,
    /// Unit direction.
    pub direction: Point,
}

impl Line {
    /// Creates a line through two distinct points.
    ///
    /// # Errors
    ///
    /// `DegenerateVector` when the points coincide.
    pub fn through(a: Point, b: Point) -> KernelResult<Self> {
        Ok(Self {
            point: a,
            direction: (b - a).unit()?,
        })
    }

    /// Point at parameter `t` (distance along the direction).
    #[inline]
    pub fn point_at(&self, t: f64) -> Point {
        self.point + self.direction * t
    }

    /// Distance from `p` to the line.
    pub fn distance_to(&self, p: Point) -> f64 {
        (p - self.point).cross(self.direction).length()
    }
}

// =============================================================================
// PLANE
// =============================================================================

/// A plane through `point` with unit `normal`.
///
/// # Example
///
/// ```rust
/// use keycase_kernel::{Plane, Point};
///
/// let floor = Plane::from_points(
///     Point::new(0.0, 0.0, 0.0),
///     Point::new(1.0, 0.0, 0.0),
///     Point::new(0.0, 1.0, 0.0),
/// )
/// .unwrap();
/// let raised = floor.shifted_along_normal(5.0);
/// assert!((raised.z_intersect(3.0, 4.0).unwrap() - 5.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    point: Point,
    normal: Point,
}

impl Plane {
    /// Creates a plane from three points.
    ///
    /// The normal is `cross(p1 - p0, p2 - p0)`, so the points are
    /// counter-clockwise when viewed from the side the normal points to.
    ///
    /// # Errors
    ///
    /// `DegeneratePlane` when the points are collinear or coincident.
    pub fn from_points(p0: Point, p1: Point, p2: Point) -> KernelResult<Self> {
        let normal = (p1 - p0).cross(p2 - p0);
        if normal.length() < EPSILON {
            return Err(KernelError::degenerate_plane(format!(
                "points {p0:?}, {p1:?}, {p2:?} are collinear"
            )));
        }
        Ok(Self {
            point: p0,
            normal: normal.normalize(),
        })
    }

    /// Creates a plane from an anchor point and a normal (normalized here).
    ///
    /// # Errors
    ///
    /// `DegeneratePlane` for a zero-length normal.
    pub fn from_point_normal(point: Point, normal: Point) -> KernelResult<Self> {
        let normal = normal
            .unit()
            .map_err(|_| KernelError::degenerate_plane("zero-length normal"))?;
        Ok(Self { point, normal })
    }

    /// The horizontal plane `z = height`, normal pointing up.
    pub fn horizontal(height: f64) -> Self {
        Self {
            point: Point::new(0.0, 0.0, height),
            normal: Point::Z,
        }
    }

    /// Anchor point.
    #[inline]
    pub fn point(&self) -> Point {
        self.point
    }

    /// Unit normal.
    #[inline]
    pub fn normal(&self) -> Point {
        self.normal
    }

    /// Same plane with the normal reversed.
    #[must_use]
    pub fn flipped(&self) -> Self {
        Self {
            point: self.point,
            normal: -self.normal,
        }
    }

    /// Parallel plane moved by `distance` along the normal.
    #[must_use]
    pub fn shifted_along_normal(&self, distance: f64) -> Self {
        Self {
            point: self.point + self.normal * distance,
            normal: self.normal,
        }
    }

    /// Signed distance from `p` to the plane, positive on the normal side.
    #[inline]
    pub fn signed_distance(&self, p: Point) -> f64 {
        self.normal.dot(p - self.point)
    }

    /// Returns true if `p` lies on the plane within `tolerance`.
    #[inline]
    pub fn contains(&self, p: Point, tolerance: f64) -> bool {
        self.signed_distance(p).abs() <= tolerance
    }

    /// Solves the plane equation for `z` at `(x, y)`.
    ///
    /// # Errors
    ///
    /// `VerticalPlane` when the normal has no Z component.
    pub fn z_intersect(&self, x: f64, y: f64) -> KernelResult<f64> {
        let n = self.normal;
        if approx_zero(n.z) {
            return Err(KernelError::VerticalPlane { x, y });
        }
        let q = self.point;
        Ok(q.z - (n.x * (x - q.x) + n.y * (y - q.y)) / n.z)
    }

    /// Intersects the line through `p0` and `p1` with this plane.
    ///
    /// Returns `None` when the line is parallel to the plane (or `p0 == p1`).
    pub fn intersect_line(&self, p0: Point, p1: Point) -> Option<Point> {
        self.intersect_line_within(p0, p1, EPSILON)
    }

    /// [`Plane::intersect_line`] with an explicit parallelism tolerance.
    pub fn intersect_line_within(&self, p0: Point, p1: Point, tolerance: f64) -> Option<Point> {
        let direction = p1 - p0;
        let denom = self.normal.dot(direction);
        if denom.abs() < tolerance {
            return None;
        }
        let t = self.normal.dot(self.point - p0) / denom;
        Some(p0 + direction * t)
    }

    /// Like [`Plane::intersect_line`], mapping `None` to `ParallelPlanes`.
    pub fn try_intersect_line(&self, p0: Point, p1: Point) -> KernelResult<Point> {
        self.intersect_line(p0, p1).ok_or_else(|| {
            KernelError::parallel(format!("line {p0:?} -> {p1:?} is parallel to plane"))
        })
    }

    /// Intersects two planes.
    ///
    /// Returns `None` when the planes are parallel (or coincide).
    pub fn intersect_plane(&self, other: &Plane) -> Option<Line> {
        self.intersect_plane_within(other, EPSILON)
    }

    /// [`Plane::intersect_plane`] with an explicit parallelism tolerance on
    /// the length of `n1 × n2`.
    pub fn intersect_plane_within(&self, other: &Plane, tolerance: f64) -> Option<Line> {
        let n1 = self.normal;
        let n2 = other.normal;
        let direction = n1.cross(n2);
        let len_sq = direction.length_squared();
        if len_sq.sqrt() < tolerance {
            return None;
        }
        // Solve relative to this plane's anchor: it satisfies the first
        // equation exactly, leaving a single correction along `d × n1`.
        let h2 = n2.dot(other.point - self.point);
        let point = self.point + direction.cross(n1) * (h2 / len_sq);
        Some(Line {
            point,
            direction: direction / len_sq.sqrt(),
        })
    }

    /// Like [`Plane::intersect_plane`], mapping `None` to `ParallelPlanes`.
    pub fn try_intersect_plane(&self, other: &Plane) -> KernelResult<Line> {
        self.intersect_plane(other).ok_or_else(|| {
            KernelError::parallel(format!(
                "normals {:?} and {:?} are parallel",
                self.normal, other.normal
            ))
        })
    }

    /// Returns true if both planes describe the same oriented surface.
    pub fn approx_eq(&self, other: &Plane, tolerance: f64) -> bool {
        self.normal.approx_eq(other.normal, tolerance)
            && self.contains(other.point, tolerance)
            && other.contains(self.point, tolerance)
    }
}

// =============================================================================
// TESTS
// =============================================================================
