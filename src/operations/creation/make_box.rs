use crate::color::ColorRgb;
use crate::error::{OperationError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};
use crate::mesh::{MeshData, PointId};

#[rustfmt::skip]
/// Edges of a box as pairs of corner indices: bottom ring, top ring, pillars.
const EDGES: [[usize; 2]; 12] = [
    [0, 1], [1, 5], [5, 4], [4, 0],
    [2, 3], [3, 7], [7, 6], [6, 2],
    [0, 3], [1, 2], [4, 7], [5, 6],
];

#[rustfmt::skip]
/// Faces of a box, two triangles per side, counter-clockwise seen from
/// outside.
const FACES: [[usize; 3]; 12] = [
    [0, 2, 1], [0, 3, 2],
    [4, 5, 6], [4, 6, 7],
    [0, 1, 5], [0, 5, 4],
    [1, 2, 6], [1, 6, 5],
    [2, 3, 7], [2, 7, 6],
    [3, 0, 4], [3, 4, 7],
];

/// Creates an axis-aligned box with independent extents on each side.
///
/// The box has 8 corner points, 12 edges and 12 triangles, all in one color.
/// Corner normals point away from the origin.
pub struct MakeSizedBox {
    up: f64,
    down: f64,
    left: f64,
    right: f64,
    front: f64,
    back: f64,
    color: ColorRgb,
}

impl MakeSizedBox {
    /// Creates a new `MakeSizedBox` operation.
    ///
    /// `up`/`down` extend along Y, `left`/`right` along X and
    /// `front`/`back` along Z, each measured from the origin.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        up: f64,
        down: f64,
        left: f64,
        right: f64,
        front: f64,
        back: f64,
        color: ColorRgb,
    ) -> Self {
        Self {
            up,
            down,
            left,
            right,
            front,
            back,
            color,
        }
    }

    /// Executes the operation, adding the box to `mesh`.
    ///
    /// Returns the ids of the eight corners: the four front corners
    /// counter-clockwise from lower-left, then the four back corners.
    ///
    /// # Errors
    ///
    /// Returns an error if the box has no extent along some axis.
    pub fn execute(&self, mesh: &mut MeshData) -> Result<[PointId; 8]> {
        let spans = [
            ("height", self.up + self.down),
            ("width", self.left + self.right),
            ("depth", self.front + self.back),
        ];
        for (name, span) in spans {
            if !span.is_finite() || span < TOLERANCE {
                return Err(OperationError::InvalidInput(format!(
                    "box {name} must be positive, got {span}"
                ))
                .into());
            }
        }

        let corners = [
            Point3::new(-self.left, -self.down, -self.front),
            Point3::new(self.right, -self.down, -self.front),
            Point3::new(self.right, self.up, -self.front),
            Point3::new(-self.left, self.up, -self.front),
            Point3::new(-self.left, -self.down, self.back),
            Point3::new(self.right, -self.down, self.back),
            Point3::new(self.right, self.up, self.back),
            Point3::new(-self.left, self.up, self.back),
        ];

        let ids = corners.map(|corner| {
            let normal = corner.coords.try_normalize(TOLERANCE).unwrap_or_else(Vector3::y);
            mesh.add_point_with_attributes(corner, normal, self.color)
        });
        for [a, b] in EDGES {
            mesh.add_line_with_colors(ids[a], ids[b], self.color, self.color);
        }
        for [a, b, c] in FACES {
            let tri = mesh.add_triangle(ids[a], ids[b], ids[c]);
            mesh.set_triangle_color(tri, self.color);
        }
        Ok(ids)
    }
}

/// Creates a cube centred on the origin, extending `size` along each
/// half-axis.
pub struct MakeCube {
    size: f64,
    color: ColorRgb,
}

impl MakeCube {
    /// Creates a new `MakeCube` operation.
    #[must_use]
    pub fn new(size: f64, color: ColorRgb) -> Self {
        Self { size, color }
    }

    /// Executes the operation, adding the cube to `mesh`.
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is not positive.
    pub fn execute(&self, mesh: &mut MeshData) -> Result<[PointId; 8]> {
        let s = self.size;
        MakeSizedBox::new(s, s, s, s, s, s, self.color).execute(mesh)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::operations::creation::assert_faces_outward;

    #[test]
    fn cube_has_expected_topology() {
        let mut mesh = MeshData::with_name("Cube");
        let red = ColorRgb::rgb(255, 0, 0);
        let ids = MakeCube::new(1.0, red).execute(&mut mesh).unwrap();

        assert_eq!(mesh.point_count(), 8);
        assert_eq!(mesh.line_count(), 12);
        assert_eq!(mesh.triangle_count(), 12);
        assert!(mesh.vertex_colors().all(|(_, c)| *c == red));
        assert_relative_eq!(*mesh.point(ids[6]).unwrap(), Point3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(
            mesh.normal(ids[0]).unwrap().norm(),
            1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn faces_wind_counter_clockwise_from_outside() {
        let mut mesh = MeshData::new();
        MakeSizedBox::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, ColorRgb::WHITE)
            .execute(&mut mesh)
            .unwrap();

        let center = Point3::new(0.5, -0.5, 0.5);
        assert_faces_outward(&mesh, &center);
    }

    #[test]
    fn cube_is_already_valid() {
        let mut mesh = MeshData::new();
        MakeCube::new(2.0, ColorRgb::WHITE).execute(&mut mesh).unwrap();
        assert!(mesh.make_valid().is_clean());
    }

    #[test]
    fn sized_box_uses_each_extent() {
        let mut mesh = MeshData::new();
        let ids = MakeSizedBox::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, ColorRgb::BLACK)
            .execute(&mut mesh)
            .unwrap();

        assert_relative_eq!(*mesh.point(ids[0]).unwrap(), Point3::new(-3.0, -2.0, -5.0));
        assert_relative_eq!(*mesh.point(ids[6]).unwrap(), Point3::new(4.0, 1.0, 6.0));
    }

    #[test]
    fn flat_box_returns_error() {
        let mut mesh = MeshData::new();
        let result = MakeSizedBox::new(1.0, -1.0, 1.0, 1.0, 1.0, 1.0, ColorRgb::WHITE)
            .execute(&mut mesh);
        assert!(result.is_err());
        assert_eq!(mesh.point_count(), 0);
        assert!(MakeCube::new(0.0, ColorRgb::WHITE).execute(&mut mesh).is_err());
    }
}
