//! # Kernel Errors
//!
//! Error types for geometry and mesh construction.
//!
//! ## Error Policy
//!
//! - NO fallback geometry when a construction step fails
//! - Every failure propagates to the caller, which adjusts its parameters or
//!   abandons the part
//! - Errors carry the values needed to locate the offending input

use thiserror::Error;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while building geometry.
///
/// ## Example
///
/// ```rust
/// use keycase_kernel::{KernelError, Plane, Point};
///
/// let collinear = Plane::from_points(
///     Point::new(0.0, 0.0, 0.0),
///     Point::new(1.0, 0.0, 0.0),
///     Point::new(2.0, 0.0, 0.0),
/// );
/// assert!(matches!(collinear, Err(KernelError::DegeneratePlane { .. })));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KernelError {
    /// A zero-length vector was normalized.
    #[error("Degenerate vector: cannot normalize ({x}, {y}, {z})")]
    DegenerateVector { x: f64, y: f64, z: f64 },

    /// Plane construction points are collinear or coincident.
    #[error("Degenerate plane: {message}")]
    DegeneratePlane { message: String },

    /// Plane/plane or plane/line intersection has no unique solution.
    #[error("Parallel planes: {message}")]
    ParallelPlanes { message: String },

    /// Height query on a plane whose normal has no Z component.
    #[error("Vertical plane: cannot solve for z at ({x}, {y})")]
    VerticalPlane { x: f64, y: f64 },

    /// A face or handle references a point the mesh does not contain.
    #[error("Index out of range: {index} (point count: {len})")]
    IndexOutOfRange { index: u32, len: usize },

    /// A point handle was issued by a different mesh.
    #[error("Point {index} belongs to mesh {owner}, not mesh {mesh}")]
    ForeignPoint { index: u32, owner: u64, mesh: u64 },

    /// A grid cell was read before it was populated.
    #[error("Key not present: cell ({col}, {row})")]
    KeyNotPresent { col: usize, row: usize },

    /// The boundary handed to the wall builder is unusable.
    #[error("Invalid boundary: {message}")]
    InvalidBoundary { message: String },

    /// A construction parameter is outside its accepted range.
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter { name: &'static str, message: String },

    /// The inner offset of a wall segment crossed over to the wrong side.
    #[error("Crossed offset at segment {segment}: inner wall reverses the outer edge direction")]
    CrossedOffset { segment: usize },
}

impl KernelError {
    /// Creates a degenerate vector error.
    pub fn degenerate_vector(v: glam::DVec3) -> Self {
        Self::DegenerateVector {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }

    /// Creates a degenerate plane error.
    pub fn degenerate_plane(message: impl Into<String>) -> Self {
        Self::DegeneratePlane {
            message: message.into(),
        }
    }

    /// Creates a parallel planes error.
    pub fn parallel(message: impl Into<String>) -> Self {
        Self::ParallelPlanes {
            message: message.into(),
        }
    }

    /// Creates an invalid boundary error.
    pub fn invalid_boundary(message: impl Into<String>) -> Self {
        Self::InvalidBoundary {
            message: message.into(),
        }
    }

    /// Creates an invalid parameter error.
    pub fn invalid_parameter(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            message: message.into(),
        }
    }
}

// =============================================================================
// RESULT TYPE ALIAS
// =============================================================================

/// Result type alias for kernel operations.
pub type KernelResult<T> = Result<T, KernelError>;

// =============================================================================
// TESTS
// =============================================================================
