use crate::math::{Matrix4, Vector3};
use crate::mesh::MeshData;

use super::GeneralTransform;

/// Translates every point of a mesh by a displacement vector.
pub struct Translate {
    displacement: Vector3,
}

impl Translate {
    /// Creates a new `Translate` operation.
    #[must_use]
    pub fn new(displacement: Vector3) -> Self {
        Self { displacement }
    }

    /// Executes the translation, modifying the mesh in-place.
    pub fn execute(&self, mesh: &mut MeshData) {
        GeneralTransform::new(Matrix4::new_translation(&self.displacement)).execute(mesh);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::Point3;

    #[test]
    fn moves_every_point() {
        let mut mesh = MeshData::new();
        let a = mesh.add_point(Point3::new(0.0, 0.0, 0.0));
        let b = mesh.add_point(Point3::new(1.0, 2.0, 3.0));

        Translate::new(Vector3::new(10.0, 0.0, -1.0)).execute(&mut mesh);

        assert_relative_eq!(*mesh.point(a).unwrap(), Point3::new(10.0, 0.0, -1.0));
        assert_relative_eq!(*mesh.point(b).unwrap(), Point3::new(11.0, 2.0, 2.0));
    }
}
