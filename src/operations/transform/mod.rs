//! Rigid and affine placement of a mesh.
//!
//! Points are transformed directly and normals by the inverse transpose, so
//! they stay perpendicular to the surface under non-uniform maps. Lines,
//! triangles and colors are untouched, except that [`Mirror`] flips triangle
//! winding.

mod general;
mod mirror;
mod rotate;
mod scale;
mod translate;

pub use general::GeneralTransform;
pub use mirror::Mirror;
pub use rotate::Rotate;
pub use scale::Scale;
pub use translate::Translate;
