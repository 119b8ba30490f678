//! Export errors.

use thiserror::Error;

/// Errors raised while rendering or decoding mesh payloads.
#[derive(Debug, Error)]
pub enum ExportError {
    /// A face does not have 3 or 4 corners.
    #[error("Invalid face {face}: expected 3 or 4 corners, got {len}")]
    InvalidFace { face: usize, len: usize },

    /// A face or bevel entry references a point that does not exist.
    #[error("Index out of range in {context}: {index} (point count: {len})")]
    IndexOutOfRange {
        context: String,
        index: u32,
        len: usize,
    },

    /// A bevel weight outside `0.0..=1.0`.
    #[error("Invalid bevel weight {weight} on edge ({a}, {b})")]
    InvalidWeight { a: u32, b: u32, weight: f64 },

    /// A convexity hint of zero.
    #[error("Convexity must be at least 1")]
    InvalidConvexity,

    /// Writing polyhedron text failed.
    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;
