use nalgebra::Rotation3;

use super::MeshData;
use crate::math::{Matrix4, Vector3};
use crate::operations::transform::GeneralTransform;

/// A named mesh placed within a larger model.
///
/// The placement is applied as rotation, then offset, then scale.
#[derive(Debug, Clone, PartialEq)]
pub struct SubMesh {
    pub name: String,
    pub mesh: MeshData,
    /// Uniform scale, applied after the offset and rotation.
    pub scale: f64,
    pub offset: Vector3,
    /// Roll, pitch and yaw in radians, about X, Y and Z.
    pub rotation: Vector3,
}

impl Default for SubMesh {
    fn default() -> Self {
        Self {
            name: "SubMesh".to_owned(),
            mesh: MeshData::new(),
            scale: 1.0,
            offset: Vector3::zeros(),
            rotation: Vector3::zeros(),
        }
    }
}

impl SubMesh {
    /// Creates an unplaced sub-mesh.
    #[must_use]
    pub fn new(name: impl Into<String>, mesh: MeshData) -> Self {
        Self {
            name: name.into(),
            mesh,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    #[must_use]
    pub fn with_offset(mut self, offset: Vector3) -> Self {
        self.offset = offset;
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, roll: f64, pitch: f64, yaw: f64) -> Self {
        self.rotation = Vector3::new(roll, pitch, yaw);
        self
    }

    /// Returns the placement as a single 4x4 matrix.
    #[must_use]
    pub fn placement(&self) -> Matrix4 {
        let rotation =
            Rotation3::from_euler_angles(self.rotation.x, self.rotation.y, self.rotation.z)
                .to_homogeneous();
        let translation = Matrix4::new_translation(&self.offset);
        let scale = Matrix4::new_scaling(self.scale);
        scale * translation * rotation
    }

    /// Returns a copy of the mesh with the placement baked into its points
    /// and normals.
    #[must_use]
    pub fn to_world(&self) -> MeshData {
        let mut world = self.mesh.clone();
        GeneralTransform::new(self.placement()).execute(&mut world);
        world
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use approx::assert_relative_eq;

    use super::*;
    use crate::math::Point3;

    #[test]
    fn default_placement_is_identity() {
        let sub = SubMesh::default();
        assert_relative_eq!(sub.placement(), Matrix4::identity());
        assert_eq!(sub.name, "SubMesh");
    }

    #[test]
    fn placement_rotates_then_offsets_then_scales() {
        let mut mesh = MeshData::new();
        let a = mesh.add_point(Point3::new(1.0, 0.0, 0.0));
        mesh.set_normal(a, Vector3::x()).unwrap();

        let sub = SubMesh::new("part", mesh)
            .with_rotation(0.0, 0.0, FRAC_PI_2)
            .with_offset(Vector3::new(0.0, 0.0, 1.0))
            .with_scale(2.0);
        let world = sub.to_world();

        // (1,0,0) -> yaw 90 -> (0,1,0) -> +z -> (0,1,1) -> x2 -> (0,2,2)
        assert_relative_eq!(*world.point(a).unwrap(), Point3::new(0.0, 2.0, 2.0), epsilon = 1e-12);
        assert_relative_eq!(*world.normal(a).unwrap(), Vector3::y(), epsilon = 1e-12);
        assert_relative_eq!(*sub.mesh.point(a).unwrap(), Point3::new(1.0, 0.0, 0.0));
    }
}
