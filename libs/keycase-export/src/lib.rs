//! # Keycase Export
//!
//! Renderers for the kernel's `(points, faces)` contract.
//!
//! ## Architecture
//!
//! ```text
//! keycase-kernel (Mesh + BevelMap) → Part → OpenSCAD text | host JSON
//! ```
//!
//! Parts are independent, so [`render_parts`] renders them in parallel.

pub mod error;
pub mod host;
pub mod polyhedron;

use keycase_kernel::{BevelMap, Mesh, MeshData};
use rayon::prelude::*;
use tracing::info;

pub use error::{ExportError, ExportResult};
pub use host::{BevelEntry, HostMesh};
pub use polyhedron::{to_scad, ScadOptions};

/// A finished part ready for output.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub name: String,
    pub mesh: MeshData,
    pub bevels: BevelMap,
}

impl Part {
    /// Snapshots a mesh and its bevel weights.
    pub fn from_mesh(name: impl Into<String>, mesh: &Mesh, bevels: &BevelMap) -> Self {
        Self {
            name: name.into(),
            mesh: mesh.to_data(),
            bevels: bevels.clone(),
        }
    }
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// OpenSCAD `polyhedron()` source; bevel weights are not representable.
    Scad(ScadOptions),
    /// [`HostMesh`] JSON.
    HostJson,
}

/// One rendered part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPart {
    pub name: String,
    pub body: String,
}

/// Renders a single part.
pub fn render_part(part: &Part, format: Format) -> ExportResult<RenderedPart> {
    let body = match format {
        Format::Scad(options) => to_scad(&part.mesh, &options)?,
        Format::HostJson => HostMesh::new(part.name.clone(), &part.mesh, &part.bevels).to_json()?,
    };
    Ok(RenderedPart {
        name: part.name.clone(),
        body,
    })
}

/// Renders every part in parallel, preserving input order.
///
/// # Errors
///
/// The first failing part's error.
///
/// # Example
///
/// ```rust
/// use keycase_export::{render_parts, Format, Part, ScadOptions};
/// use keycase_kernel::{BevelMap, Mesh};
///
/// let mut mesh = Mesh::new();
/// let a = mesh.add_xyz(0.0, 0.0, 0.0);
/// let b = mesh.add_xyz(1.0, 0.0, 0.0);
/// let c = mesh.add_xyz(0.0, 1.0, 0.0);
/// mesh.add_tri(&a, &b, &c).unwrap();
/// let parts = vec![Part::from_mesh("plate", &mesh, &BevelMap::new())];
///
/// let out = render_parts(&parts, Format::Scad(ScadOptions::default())).unwrap();
/// assert_eq!(out[0].name, "plate");
/// ```
pub fn render_parts(parts: &[Part], format: Format) -> ExportResult<Vec<RenderedPart>> {
    let rendered: Vec<RenderedPart> = parts
        .par_iter()
        .map(|part| render_part(part, format))
        .collect::<ExportResult<_>>()?;
    info!(
        parts = rendered.len(),
        bytes = rendered.iter().map(|r| r.body.len()).sum::<usize>(),
        "rendered parts"
    );
    Ok(rendered)
}
