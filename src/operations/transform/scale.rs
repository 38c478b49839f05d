use crate::error::{OperationError, Result};
use crate::math::{Matrix4, Point3, TOLERANCE};
use crate::mesh::MeshData;

use super::GeneralTransform;

/// Scales a mesh uniformly from a center point.
pub struct Scale {
    center: Point3,
    factor: f64,
}

impl Scale {
    /// Creates a new `Scale` operation.
    #[must_use]
    pub fn new(center: Point3, factor: f64) -> Self {
        Self { center, factor }
    }

    /// Executes the scaling, modifying the mesh in-place.
    ///
    /// # Errors
    ///
    /// Returns an error if the factor is zero or not finite.
    pub fn execute(&self, mesh: &mut MeshData) -> Result<()> {
        if !self.factor.is_finite() || self.factor.abs() < TOLERANCE {
            return Err(OperationError::InvalidInput(format!(
                "scale factor must be finite and non-zero, got {}",
                self.factor
            ))
            .into());
        }

        let t_neg = Matrix4::new_translation(&(-self.center.coords));
        let scale = Matrix4::new_scaling(self.factor);
        let t_pos = Matrix4::new_translation(&self.center.coords);
        GeneralTransform::new(t_pos * scale * t_neg).execute(mesh);
        Ok(())
    }
}
