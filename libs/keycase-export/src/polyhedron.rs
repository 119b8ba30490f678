//! # OpenSCAD Polyhedron Output
//!
//! Writes a `MeshData` as a single `polyhedron()` call.
//!
//! OpenSCAD wants faces clockwise when viewed from outside, the opposite of
//! the kernel's convention, so every face is written in reverse order.

use std::fmt::{self, Write as _};

use config::constants::{GlobalConfig, DEFAULT_CONVEXITY, EXPORT_PRECISION};
use keycase_kernel::MeshData;
use tracing::debug;

use crate::error::{ExportError, ExportResult};

/// Formatting options for polyhedron output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScadOptions {
    /// Convexity hint passed to OpenSCAD's preview renderer.
    pub convexity: u32,
    /// Digits after the decimal point.
    pub precision: usize,
}

impl Default for ScadOptions {
    fn default() -> Self {
        Self {
            convexity: DEFAULT_CONVEXITY,
            precision: EXPORT_PRECISION,
        }
    }
}

impl ScadOptions {
    /// Options taking the convexity hint from a validated config.
    pub fn from_config(config: &GlobalConfig) -> Self {
        Self {
            convexity: config.convexity,
            ..Self::default()
        }
    }
}

/// Renders `mesh` as OpenSCAD source.
///
/// # Errors
///
/// `InvalidConvexity`, `InvalidFace` or `IndexOutOfRange` when the input
/// cannot form a polyhedron, `Format` if writing the text fails.
///
/// # Example
///
/// ```rust
/// use keycase_export::polyhedron::{to_scad, ScadOptions};
/// use keycase_kernel::MeshData;
///
/// let tri = MeshData {
///     points: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
///     faces: vec![vec![0, 1, 2]],
/// };
/// let scad = to_scad(&tri, &ScadOptions::default()).unwrap();
/// assert!(scad.contains("faces=[[2,1,0]]"));
/// ```
pub fn to_scad(mesh: &MeshData, options: &ScadOptions) -> ExportResult<String> {
    if options.convexity == 0 {
        return Err(ExportError::InvalidConvexity);
    }
    validate_faces(mesh)?;

    let mut out = String::with_capacity(mesh.points.len() * 40 + mesh.faces.len() * 20);
    write_polyhedron(&mut out, mesh, options)?;

    debug!(
        points = mesh.point_count(),
        faces = mesh.face_count(),
        bytes = out.len(),
        "rendered polyhedron"
    );
    Ok(out)
}

fn write_polyhedron(
    out: &mut impl fmt::Write,
    mesh: &MeshData,
    options: &ScadOptions,
) -> fmt::Result {
    let p = options.precision;
    out.write_str("polyhedron(\n  points=[")?;
    for (i, [x, y, z]) in mesh.points.iter().enumerate() {
        if i > 0 {
            out.write_char(',')?;
        }
        write!(out, "[{},{},{}]", number(*x, p), number(*y, p), number(*z, p))?;
    }
    out.write_str("],\n  faces=[")?;
    for (i, face) in mesh.faces.iter().enumerate() {
        if i > 0 {
            out.write_char(',')?;
        }
        out.write_char('[')?;
        for (j, index) in face.iter().rev().enumerate() {
            if j > 0 {
                out.write_char(',')?;
            }
            write!(out, "{index}")?;
        }
        out.write_char(']')?;
    }
    write!(out, "],\n  convexity={}\n);\n", options.convexity)
}

/// Checks every face has 3 or 4 in-range corners.
pub(crate) fn validate_faces(mesh: &MeshData) -> ExportResult<()> {
    let len = mesh.points.len();
    for (face, indices) in mesh.faces.iter().enumerate() {
        if !(3..=4).contains(&indices.len()) {
            return Err(ExportError::InvalidFace {
                face,
                len: indices.len(),
            });
        }
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= len) {
            return Err(ExportError::IndexOutOfRange {
                context: format!("face {face}"),
                index,
                len,
            });
        }
    }
    Ok(())
}

/// Fixed-precision decimal with trailing zeros trimmed and no negative zero.
fn number(value: f64, precision: usize) -> String {
    let mut s = format!("{value:.precision$}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}
