mod make_box;
mod make_cone;
mod make_cylinder;
mod make_hemisphere;
mod make_mag_sphere;

pub use make_box::{MakeCube, MakeSizedBox};
pub use make_cone::{ConeStyle, MakeCone, MakeHorizCone};
pub use make_cylinder::MakeCylinder;
pub use make_hemisphere::MakeHemisphere;
pub use make_mag_sphere::MakeMagSphere;

use crate::color::ColorRgb;
use crate::error::Result;
use crate::math::{Point3, Vector3};
use crate::mesh::{MeshData, PointId};

/// Finds a direction perpendicular to the given unit vector.
fn perpendicular_dir(axis: &Vector3) -> Vector3 {
    let candidate = if axis.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    let perp = axis.cross(&candidate);
    perp / perp.norm()
}

/// Adds a point carrying only a vertex color.
fn add_colored_point(mesh: &mut MeshData, position: Point3, color: ColorRgb) -> Result<PointId> {
    let id = mesh.try_add_point(position)?;
    mesh.set_vertex_color(id, color)?;
    Ok(id)
}

/// Asserts that every non-degenerate triangle winds counter-clockwise when
/// seen from outside, taking "outside" as away from `center`.
#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) fn assert_faces_outward(mesh: &MeshData, center: &Point3) {
    for (id, tri) in mesh.triangles() {
        let [a, b, c] = [tri.a, tri.b, tri.c].map(|p| *mesh.point(p).unwrap());
        let normal = (b - a).cross(&(c - a));
        if normal.norm() < 1e-12 {
            continue;
        }
        let centroid = Point3::from((a.coords + b.coords + c.coords) / 3.0);
        assert!(
            normal.dot(&(centroid - center)) > 0.0,
            "triangle {id} faces inward"
        );
    }
}
