//! Operations over [`MeshData`](crate::mesh::MeshData).
//!
//! Each operation is a small value built with `new`/`with_*` and run with
//! `execute`, so its configuration can be stored and reused.

pub mod creation;
mod populate;
pub mod transform;
pub mod validity;

pub use populate::{FullyPopulate, PopulateDefaults, PopulateReport};
pub use validity::{MakeValid, ValidityParams, ValidityReport};
