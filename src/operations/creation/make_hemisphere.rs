use std::f64::consts::{FRAC_PI_2, TAU};

use crate::color::ColorRgb;
use crate::error::{OperationError, Result};
use crate::math::{Point3, TOLERANCE};
use crate::mesh::{MeshData, PointId};

/// Creates the upper half of a sphere centred on the origin, pole on +Y.
///
/// Latitude rings run from the pole down to the equator, each with twice as
/// many longitude steps as there are latitude rings. The pole is a single
/// point and rings have no seam duplicate.
pub struct MakeHemisphere {
    radius: f64,
    lat_segments: usize,
    color: ColorRgb,
}

impl MakeHemisphere {
    /// Creates a new `MakeHemisphere` operation.
    #[must_use]
    pub fn new(radius: f64, lat_segments: usize, color: ColorRgb) -> Self {
        Self {
            radius,
            lat_segments,
            color,
        }
    }

    /// Executes the operation, adding the hemisphere to `mesh`.
    ///
    /// Returns the pole id followed by the ring ids, ring by ring.
    ///
    /// # Errors
    ///
    /// Returns an error if `lat_segments` is below 2 or the radius is not
    /// positive.
    #[allow(clippy::cast_precision_loss)]
    pub fn execute(&self, mesh: &mut MeshData) -> Result<Vec<PointId>> {
        if self.lat_segments < 2 {
            return Err(OperationError::InvalidInput(format!(
                "hemisphere needs at least 2 latitude segments, got {}",
                self.lat_segments
            ))
            .into());
        }
        if !self.radius.is_finite() || self.radius < TOLERANCE {
            return Err(OperationError::InvalidInput(format!(
                "hemisphere radius must be positive, got {}",
                self.radius
            ))
            .into());
        }

        let r = self.radius;
        let lat = self.lat_segments;
        let lon = lat * 2;

        let pole = Point3::new(0.0, r, 0.0);
        let mut ids = vec![mesh.add_point_with_attributes(pole, pole.coords / r, self.color)];
        for i in 1..=lat {
            let a1 = FRAC_PI_2 * i as f64 / lat as f64;
            for j in 0..lon {
                let a2 = TAU * j as f64 / lon as f64;
                let q = Point3::new(r * a1.sin() * a2.cos(), r * a1.cos(), r * a1.sin() * a2.sin());
                ids.push(mesh.add_point_with_attributes(q, q.coords / r, self.color));
            }
        }

        let ring = |i: usize| &ids[1 + (i - 1) * lon..1 + i * lon];

        for j in 0..lon {
            let first = ring(1);
            self.add_face(mesh, ids[0], first[(j + 1) % lon], first[j]);
        }
        for i in 1..lat {
            let (upper, lower) = (ring(i), ring(i + 1));
            for j in 0..lon {
                let next = (j + 1) % lon;
                self.add_face(mesh, upper[j], upper[next], lower[next]);
                self.add_face(mesh, upper[j], lower[next], lower[j]);
            }
        }

        for i in 1..=lat {
            let current = ring(i);
            for j in 0..lon {
                let next = current[(j + 1) % lon];
                mesh.add_line_with_colors(current[j], next, self.color, self.color);
            }
        }
        for j in 0..lon {
            mesh.add_line_with_colors(ids[0], ring(1)[j], self.color, self.color);
            for i in 1..lat {
                mesh.add_line_with_colors(ring(i)[j], ring(i + 1)[j], self.color, self.color);
            }
        }

        Ok(ids)
    }

    fn add_face(&self, mesh: &mut MeshData, a: PointId, b: PointId, c: PointId) {
        let tri = mesh.add_triangle(a, b, c);
        mesh.set_triangle_color(tri, self.color);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::operations::creation::assert_faces_outward;

    #[test]
    fn hemisphere_counts() {
        let mut mesh = MeshData::new();
        let ids = MakeHemisphere::new(2.0, 4, ColorRgb::WHITE)
            .execute(&mut mesh)
            .unwrap();

        // 1 pole + 4 rings of 8
        assert_eq!(ids.len(), 33);
        assert_eq!(mesh.point_count(), 33);
        assert_eq!(mesh.triangle_count(), 8 + 2 * 8 * 3);
        assert_eq!(mesh.line_count(), 2 * 4 * 8);
        assert!(mesh.make_valid().is_clean());
    }

    #[test]
    fn points_lie_on_the_upper_half_sphere() {
        let mut mesh = MeshData::new();
        let ids = MakeHemisphere::new(1.5, 3, ColorRgb::WHITE)
            .execute(&mut mesh)
            .unwrap();

        assert_relative_eq!(*mesh.point(ids[0]).unwrap(), Point3::new(0.0, 1.5, 0.0));
        for (id, q) in mesh.points() {
            assert_relative_eq!(q.coords.norm(), 1.5, epsilon = 1e-12);
            assert!(q.y > -1e-12);
            assert_relative_eq!(*mesh.normal(id).unwrap(), q.coords / 1.5, epsilon = 1e-12);
        }
        // last ring is the equator
        assert_relative_eq!(mesh.point(ids[ids.len() - 1]).unwrap().y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn hemisphere_faces_outward() {
        let mut mesh = MeshData::new();
        MakeHemisphere::new(1.0, 5, ColorRgb::WHITE)
            .execute(&mut mesh)
            .unwrap();
        assert_faces_outward(&mesh, &Point3::origin());
    }

    #[test]
    fn hemisphere_rejects_bad_input() {
        let mut mesh = MeshData::new();
        assert!(MakeHemisphere::new(1.0, 1, ColorRgb::WHITE).execute(&mut mesh).is_err());
        assert!(MakeHemisphere::new(0.0, 4, ColorRgb::WHITE).execute(&mut mesh).is_err());
        assert_eq!(mesh.point_count(), 0);
    }
}
