//! # Affine Transforms
//!
//! Placement transforms for keyboard cells and whole parts.
//!
//! Every builder method post-multiplies onto the existing matrix, so chained
//! calls behave like nested local frames:
//!
//! ```text
//! Transform::identity().translate(10, 0, 0).rotate(0, 0, 90)
//!     == T · R        (a point is rotated first, then translated)
//! ```
//!
//! i.e. the rotation happens about the already-translated origin. Cell
//! placement code relies on this order everywhere.

use config::constants::approx_zero;
use glam::{DMat4, DVec3, DVec4};
use serde::{Deserialize, Serialize};

use crate::error::{KernelError, KernelResult};
use crate::point::{Point, PointExt};

/// A 4×4 affine matrix. The bottom row is always `[0, 0, 0, 1]`.
///
/// # Example
///
/// ```rust
/// use keycase_kernel::{Point, Transform};
///
/// let tf = Transform::identity().translate(10.0, 0.0, 0.0).rotate(0.0, 0.0, 90.0);
/// let p = tf.apply(Point::new(1.0, 0.0, 0.0));
/// assert!((p - Point::new(10.0, 1.0, 0.0)).length() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform(DMat4);

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// The identity transform.
    pub fn identity() -> Self {
        Self(DMat4::IDENTITY)
    }

    /// Builds a transform from row-major rows.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if the bottom row is not `[0, 0, 0, 1]`.
    pub fn from_rows(rows: [[f64; 4]; 4]) -> KernelResult<Self> {
        if rows[3] != [0.0, 0.0, 0.0, 1.0] {
            return Err(KernelError::invalid_parameter(
                "rows",
                format!("bottom row must be [0, 0, 0, 1], got {:?}", rows[3]),
            ));
        }
        Ok(Self(DMat4::from_cols_array_2d(&rows).transpose()))
    }

    /// Returns the matrix as row-major rows.
    pub fn rows(&self) -> [[f64; 4]; 4] {
        self.0.transpose().to_cols_array_2d()
    }

    /// Returns the underlying glam matrix.
    #[inline]
    pub fn matrix(&self) -> DMat4 {
        self.0
    }

    /// Matrix product `self · other`.
    ///
    /// `other` acts in the local frame established by `self`.
    #[must_use]
    pub fn compose(&self, other: &Transform) -> Self {
        Self(self.0 * other.0)
    }

    /// Post-multiplies a translation.
    #[must_use]
    pub fn translate(self, dx: f64, dy: f64, dz: f64) -> Self {
        self.compose(&Self(DMat4::from_translation(DVec3::new(dx, dy, dz))))
    }

    /// Post-multiplies a rotation given in degrees.
    ///
    /// The rotation turns about X first, then Y, then Z, all about the fixed
    /// local axes: the matrix is `Rz · Ry · Rx`, right-handed.
    #[must_use]
    pub fn rotate(self, rx: f64, ry: f64, rz: f64) -> Self {
        let rotation = DMat4::from_rotation_z(rz.to_radians())
            * DMat4::from_rotation_y(ry.to_radians())
            * DMat4::from_rotation_x(rx.to_radians());
        self.compose(&Self(rotation))
    }

    /// Post-multiplies a rotation of `degrees` about `axis`.
    ///
    /// # Errors
    ///
    /// `DegenerateVector` for a zero-length axis.
    pub fn rotate_around_axis(self, axis: Point, degrees: f64) -> KernelResult<Self> {
        let axis = axis.unit()?;
        Ok(self.compose(&Self(DMat4::from_axis_angle(axis, degrees.to_radians()))))
    }

    /// Post-multiplies a non-uniform scale.
    #[must_use]
    pub fn scale(self, sx: f64, sy: f64, sz: f64) -> Self {
        self.compose(&Self(DMat4::from_scale(DVec3::new(sx, sy, sz))))
    }

    /// Mirrors the local frame across its YZ plane by negating the X column.
    ///
    /// Mirroring flips handedness; meshes placed through a mirrored transform
    /// need their face order reversed (see `Mesh::mirror_x`).
    #[must_use]
    pub fn mirror_x(self) -> Self {
        let mut m = self.0;
        m.x_axis = -m.x_axis;
        Self(m)
    }

    /// Returns true if this transform flips handedness.
    pub fn is_mirrored(&self) -> bool {
        self.0.determinant() < 0.0
    }

    /// Inverse transform.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` when the matrix is singular (e.g. a zero scale).
    pub fn inverse(&self) -> KernelResult<Self> {
        let det = self.0.determinant();
        if approx_zero(det) {
            return Err(KernelError::invalid_parameter(
                "transform",
                format!("singular matrix (determinant {det})"),
            ));
        }
        Ok(Self(self.0.inverse()))
    }

    /// Applies the transform to a point (homogeneous `w = 1`).
    #[inline]
    pub fn apply(&self, point: Point) -> Point {
        self.0.transform_point3(point)
    }

    /// Applies the linear part only (direction vectors).
    #[inline]
    pub fn apply_vector(&self, vector: Point) -> Point {
        self.0.transform_vector3(vector)
    }

    /// Where this transform places the local origin.
    #[inline]
    pub fn point(&self) -> Point {
        self.0.w_axis.truncate()
    }

    /// Checks the affine invariant on the bottom row.
    pub fn is_affine(&self) -> bool {
        self.0.row(3) == DVec4::W
    }
}
