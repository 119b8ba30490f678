//! # Keycase Kernel
//!
//! Geometric kernel for building keyboard case meshes.
//!
//! ## Architecture
//!
//! ```text
//! Grid2D<Transform> (key placements)
//!     → MeshPoint boundary (Mesh::add_placed)
//!     → wall::WallBuilder (offset walls + BevelMap)
//!     → MeshData (renderers)
//! ```
//!
//! ## Conventions
//!
//! - Right-handed coordinates, Z up, floor normally at `z = 0`
//! - Faces wind counter-clockwise seen from outside the solid
//! - Angles are degrees; every tolerance comes from `config::constants`
//! - Transform builders post-multiply, so chained calls are nested local frames
//!
//! ## Usage
//!
//! ```rust
//! use keycase_kernel::wall::{build_wall, WallLoop, WallParams};
//! use keycase_kernel::{BevelMap, Mesh, Point, Transform};
//!
//! let plate = Transform::identity().translate(0.0, 0.0, 8.0);
//! let mut mesh = Mesh::new();
//! let corners = [(-20.0, -20.0), (20.0, -20.0), (20.0, 20.0), (-20.0, 20.0)];
//! let boundary = corners
//!     .iter()
//!     .map(|&(x, y)| mesh.add_placed(&plate, Point::new(x, y, 0.0)))
//!     .collect();
//!
//! let mut bevels = BevelMap::new();
//! let params = WallParams::new(2.0);
//! let shell = build_wall(&mut mesh, &mut bevels, &WallLoop::closed(boundary), &params)?;
//! assert_eq!(shell.face_count(), 12);
//! # Ok::<(), keycase_kernel::KernelError>(())
//! ```

pub mod bevel;
pub mod error;
pub mod grid;
pub mod mesh;
pub mod mesh_point;
pub mod plane;
pub mod point;
pub mod transform;
pub mod wall;

pub use bevel::{BevelMap, EdgeKey};
pub use error::{KernelError, KernelResult};
pub use grid::Grid2D;
pub use mesh::{Face, Mesh, MeshData};
pub use mesh_point::{MeshId, MeshPoint};
pub use plane::{Line, Plane};
pub use point::{Point, PointExt, UP};
pub use transform::Transform;
pub use wall::{build_wall, WallBuilder, WallLoop, WallParams, WallShell};
