use tracing::trace;

use crate::math::{Matrix4, Point3, TOLERANCE};
use crate::mesh::MeshData;

/// Applies an arbitrary 4x4 transformation matrix to every point of a mesh.
///
/// Normals are transformed by the inverse-transpose of the linear part and
/// re-normalized. A singular matrix falls back to the plain linear part.
/// Lines, triangles, UVs and colors are unaffected.
pub struct GeneralTransform {
    matrix: Matrix4,
}

impl GeneralTransform {
    /// Creates a new `GeneralTransform` operation.
    #[must_use]
    pub fn new(matrix: Matrix4) -> Self {
        Self { matrix }
    }

    /// Executes the transformation, modifying the mesh in-place.
    pub fn execute(&self, mesh: &mut MeshData) {
        for position in mesh.points.values_mut() {
            *position = transform_point(&self.matrix, position);
        }

        let linear = self.matrix.fixed_view::<3, 3>(0, 0).into_owned();
        let normal_matrix = linear
            .try_inverse()
            .map_or(linear, |inverse| inverse.transpose());
        for normal in mesh.normals.values_mut() {
            let transformed = normal_matrix * *normal;
            let len = transformed.norm();
            if len > TOLERANCE {
                *normal = transformed / len;
            }
        }

        trace!(points = mesh.point_count(), "transformed mesh");
    }
}

/// Transforms a point by a 4x4 matrix (homogeneous coordinates).
fn transform_point(matrix: &Matrix4, point: &Point3) -> Point3 {
    let v = matrix * nalgebra::Vector4::new(point.x, point.y, point.z, 1.0);
    if (v.w - 1.0).abs() > TOLERANCE && v.w.abs() > TOLERANCE {
        Point3::new(v.x / v.w, v.y / v.w, v.z / v.w)
    } else {
        Point3::new(v.x, v.y, v.z)
    }
}
