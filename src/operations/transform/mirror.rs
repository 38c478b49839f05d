use crate::error::{OperationError, Result};
use crate::math::{Matrix4, Point3, Vector3, TOLERANCE};
use crate::mesh::MeshData;

use super::GeneralTransform;

/// Mirrors a mesh across a plane defined by a point and normal.
///
/// Triangle winding is reversed so that faces keep pointing outwards.
pub struct Mirror {
    plane_origin: Point3,
    plane_normal: Vector3,
}

impl Mirror {
    /// Creates a new `Mirror` operation.
    #[must_use]
    pub fn new(plane_origin: Point3, plane_normal: Vector3) -> Self {
        Self {
            plane_origin,
            plane_normal,
        }
    }

    /// Executes the mirror, modifying the mesh in-place.
    ///
    /// # Errors
    ///
    /// Returns an error if the plane normal is zero-length.
    pub fn execute(&self, mesh: &mut MeshData) -> Result<()> {
        let len = self.plane_normal.norm();
        if len < TOLERANCE {
            return Err(
                OperationError::InvalidInput("mirror plane normal must be non-zero".into()).into(),
            );
        }
        let n = self.plane_normal / len;

        // Householder reflection about the plane through the origin
        let mut reflect = Matrix4::identity();
        reflect
            .fixed_view_mut::<3, 3>(0, 0)
            .copy_from(&(nalgebra::Matrix3::identity() - 2.0 * n * n.transpose()));

        let t_neg = Matrix4::new_translation(&(-self.plane_origin.coords));
        let t_pos = Matrix4::new_translation(&self.plane_origin.coords);
        GeneralTransform::new(t_pos * reflect * t_neg).execute(mesh);

        for tri in mesh.triangles.values_mut() {
            std::mem::swap(&mut tri.b, &mut tri.c);
        }
        Ok(())
    }
}
