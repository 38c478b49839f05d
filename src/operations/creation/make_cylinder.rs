use std::f64::consts::TAU;

use crate::color::ColorRgb;
use crate::error::{OperationError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};
use crate::mesh::{MeshData, PointId};

/// Creates a cylinder or frustum between two end points.
///
/// Each end is a ring of `sides` points with radial normals. The side wall
/// is two triangles per side; with closed ends each end also gets a centre
/// point and a triangle fan. Lines run along the wall and around both rings.
pub struct MakeCylinder {
    start: Point3,
    end: Point3,
    start_radius: f64,
    end_radius: f64,
    sides: usize,
    color: ColorRgb,
    closed_ends: bool,
}

impl MakeCylinder {
    /// Creates a new `MakeCylinder` operation with open ends.
    #[must_use]
    pub fn new(
        start: Point3,
        end: Point3,
        start_radius: f64,
        end_radius: f64,
        sides: usize,
        color: ColorRgb,
    ) -> Self {
        Self {
            start,
            end,
            start_radius,
            end_radius,
            sides,
            color,
            closed_ends: false,
        }
    }

    #[must_use]
    pub fn with_closed_ends(mut self, closed: bool) -> Self {
        self.closed_ends = closed;
        self
    }

    /// Executes the operation, adding the cylinder to `mesh`.
    ///
    /// Returns the start ring ids followed by the end ring ids.
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than three sides, the ends
    /// coincide, or a radius is negative or not finite.
    #[allow(clippy::cast_precision_loss)]
    pub fn execute(&self, mesh: &mut MeshData) -> Result<Vec<PointId>> {
        if self.sides < 3 {
            return Err(OperationError::InvalidInput(format!(
                "cylinder needs at least 3 sides, got {}",
                self.sides
            ))
            .into());
        }
        for radius in [self.start_radius, self.end_radius] {
            if !radius.is_finite() || radius < 0.0 {
                return Err(OperationError::InvalidInput(format!(
                    "cylinder radius must be non-negative, got {radius}"
                ))
                .into());
            }
        }
        let axis = (self.end - self.start).try_normalize(TOLERANCE).ok_or_else(|| {
            OperationError::InvalidInput("cylinder length must be non-zero".into())
        })?;

        // side x forward == axis, so the rings run counter-clockwise about it
        let up = if axis.dot(&Vector3::y()).abs() < 0.99 {
            Vector3::y()
        } else {
            Vector3::x()
        };
        let side = axis.cross(&up).normalize();
        let forward = axis.cross(&side);

        let n = self.sides;
        let mut start_ring = Vec::with_capacity(n);
        let mut end_ring = Vec::with_capacity(n);
        for i in 0..n {
            let angle = TAU * i as f64 / n as f64;
            let radial = side * angle.cos() + forward * angle.sin();
            start_ring.push(mesh.add_point_with_attributes(
                self.start + radial * self.start_radius,
                radial,
                self.color,
            ));
            end_ring.push(mesh.add_point_with_attributes(
                self.end + radial * self.end_radius,
                radial,
                self.color,
            ));
        }

        for i in 0..n {
            let next = (i + 1) % n;
            self.add_face(mesh, start_ring[i], start_ring[next], end_ring[next]);
            self.add_face(mesh, start_ring[i], end_ring[next], end_ring[i]);
        }

        if self.closed_ends {
            let start_center = mesh.add_point_with_attributes(self.start, -axis, self.color);
            let end_center = mesh.add_point_with_attributes(self.end, axis, self.color);
            for i in 0..n {
                let next = (i + 1) % n;
                self.add_face(mesh, start_center, start_ring[next], start_ring[i]);
                self.add_face(mesh, end_center, end_ring[i], end_ring[next]);
            }
        }

        for (&a, &b) in start_ring.iter().zip(&end_ring) {
            mesh.add_line_with_colors(a, b, self.color, self.color);
        }
        for ring in [&start_ring, &end_ring] {
            for i in 0..n {
                let next = ring[(i + 1) % n];
                mesh.add_line_with_colors(ring[i], next, self.color, self.color);
            }
        }

        start_ring.extend(end_ring);
        Ok(start_ring)
    }

    fn add_face(&self, mesh: &mut MeshData, a: PointId, b: PointId, c: PointId) {
        let tri = mesh.add_triangle(a, b, c);
        mesh.set_triangle_color(tri, self.color);
    }
}
