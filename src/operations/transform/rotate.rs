use nalgebra::{Isometry3, Unit, UnitQuaternion};

use crate::error::{OperationError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};
use crate::mesh::MeshData;

use super::GeneralTransform;

/// Rotates every point and normal about an axis through `origin`.
pub struct Rotate {
    origin: Point3,
    axis: Vector3,
    angle: f64,
}

impl Rotate {
    /// Creates a new `Rotate` operation.
    ///
    /// * `angle` - Rotation angle in radians.
    #[must_use]
    pub fn new(origin: Point3, axis: Vector3, angle: f64) -> Self {
        Self {
            origin,
            axis,
            angle,
        }
    }

    /// Executes the rotation, modifying the mesh in-place.
    ///
    /// # Errors
    ///
    /// Returns an error if the axis direction is zero-length.
    pub fn execute(&self, mesh: &mut MeshData) -> Result<()> {
        let Some(axis) = Unit::try_new(self.axis, TOLERANCE) else {
            return Err(OperationError::InvalidInput(format!(
                "rotation axis {:?} has no direction",
                self.axis
            ))
            .into());
        };
        let rotation = UnitQuaternion::from_axis_angle(&axis, self.angle);
        let placement = Isometry3::rotation_wrt_point(rotation, self.origin);

        GeneralTransform::new(placement.to_homogeneous()).execute(mesh);
        Ok(())
    }
}
