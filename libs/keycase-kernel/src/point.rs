//! Thin wrapper around `glam::DVec3` shared across kernel modules.
//!
//! Points are plain `Copy` values. Arithmetic (`+`, `-`, `* k`), `dot`,
//! `cross` and `length` come straight from glam; the [`PointExt`] trait adds
//! the fallible and transform-aware operations the kernel needs.

use config::constants::approx_zero;

use crate::error::{KernelError, KernelResult};
use crate::transform::Transform;

pub use glam::DVec3 as Point;

/// Unit vector pointing up, used to build vertical wall planes.
pub const UP: Point = Point::Z;

/// Kernel operations on [`Point`] values.
pub trait PointExt: Sized {
    /// Returns the unit vector in the same direction.
    ///
    /// # Errors
    ///
    /// `DegenerateVector` when the length is below `EPSILON`.
    ///
    /// # Examples
    /// ```
    /// use keycase_kernel::{Point, PointExt};
    /// let u = Point::new(3.0, 0.0, 4.0).unit().unwrap();
    /// assert!((u.length() - 1.0).abs() < 1e-12);
    /// ```
    fn unit(self) -> KernelResult<Self>;

    /// Scales every coordinate by `k`.
    fn scale(self, k: f64) -> Self;

    /// Applies an affine transform, treating the point as `w = 1`.
    fn transformed(self, transform: &Transform) -> Self;

    /// Coordinate-wise comparison within `tolerance`.
    fn approx_eq(self, other: Self, tolerance: f64) -> bool;
}

impl PointExt for Point {
    fn unit(self) -> KernelResult<Self> {
        let len = self.length();
        if approx_zero(len) {
            return Err(KernelError::degenerate_vector(self));
        }
        Ok(self / len)
    }

    #[inline]
    fn scale(self, k: f64) -> Self {
        self * k
    }

    #[inline]
    fn transformed(self, transform: &Transform) -> Self {
        transform.apply(self)
    }

    #[inline]
    fn approx_eq(self, other: Self, tolerance: f64) -> bool {
        self.abs_diff_eq(other, tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn unit_of_zero_vector_fails() {
        let err = Point::ZERO.unit().unwrap_err();
        assert!(matches!(err, KernelError::DegenerateVector { .. }));
    }

    #[test]
    fn unit_preserves_direction() {
        let u = Point::new(0.0, -5.0, 0.0).unit().unwrap();
        assert_eq!(u, Point::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn arithmetic_is_value_based() {
        let a = Point::new(1.0, 2.0, 3.0);
        let b = Point::new(4.0, 5.0, 6.0);
        let mut c = a;
        c.x = 10.0;
        // `a` is a copy, never aliased
        assert_eq!(a.x, 1.0);
        assert_eq!(a + b, Point::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Point::new(3.0, 3.0, 3.0));
        assert_eq!(a.scale(2.0), Point::new(2.0, 4.0, 6.0));
        assert_relative_eq!(a.dot(b), 32.0);
        assert_eq!(Point::X.cross(Point::Y), Point::Z);
    }

    #[test]
    fn transformed_applies_translation() {
        let tf = Transform::identity().translate(1.0, 2.0, 3.0);
        let p = Point::new(1.0, 1.0, 1.0).transformed(&tf);
        assert!(p.approx_eq(Point::new(2.0, 3.0, 4.0), 1e-12));
    }
}
