//! Indexed mesh data store with validity reconciliation.
//!
//! [`MeshData`] keeps points, lines and triangles under stable ids, with
//! sparse attribute overlays (normals, UVs, colors) keyed by those ids.
//! [`FullyPopulate`](operations::FullyPopulate) fills the overlays and
//! [`MakeValid`](operations::MakeValid) reconciles the whole store after
//! arbitrary edits.

pub mod color;
pub mod error;
pub mod io;
pub mod math;
pub mod mesh;
pub mod operations;

pub use color::ColorRgb;
pub use error::{FormatError, MeshDataError, MeshError, OperationError, Result};
pub use mesh::{LineId, MeshData, PointId, TriangleId};
