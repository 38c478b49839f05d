use std::f64::consts::{FRAC_PI_2, PI, TAU};

use nalgebra::DMatrix;

use crate::color::ColorRgb;
use crate::error::{OperationError, Result};
use crate::math::{Point2, Point3, Vector3, TOLERANCE};
use crate::mesh::{MeshData, PointId};

/// Creates a sphere whose radius varies over its surface, colored by
/// magnitude.
///
/// Rows of `radii` are elevation steps from +90 degrees (the +Y pole) down
/// to -90 degrees. Columns are azimuth steps around Y starting at +X; the
/// last column closes the loop and is not sampled. Each point is colored
/// between `low` and `high` by where its radius falls in the overall range,
/// and gets a UV of `(column, row)` as fractions of the grid.
///
/// Pole rows produce coincident points, which
/// [`MakeValid`](crate::operations::MakeValid) merges into one.
pub struct MakeMagSphere {
    center: Point3,
    radii: DMatrix<f64>,
    low: ColorRgb,
    high: ColorRgb,
}

impl MakeMagSphere {
    /// Creates a new `MakeMagSphere` operation.
    #[must_use]
    pub fn new(center: Point3, radii: DMatrix<f64>, low: ColorRgb, high: ColorRgb) -> Self {
        Self {
            center,
            radii,
            low,
            high,
        }
    }

    /// Executes the operation, adding the sphere to `mesh`.
    ///
    /// Returns the point ids row by row.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid has fewer than 2 rows or 4 columns, or
    /// holds a radius that is not finite.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn execute(&self, mesh: &mut MeshData) -> Result<Vec<PointId>> {
        let (rows, cols) = self.radii.shape();
        if rows < 2 || cols < 4 {
            return Err(OperationError::InvalidInput(format!(
                "radius grid must be at least 2x4, got {rows}x{cols}"
            ))
            .into());
        }
        if !self.radii.iter().all(|r| r.is_finite()) {
            return Err(
                OperationError::InvalidInput("radius grid must be finite".into()).into(),
            );
        }

        let vert = rows - 1;
        let horiz = cols - 1;
        let min = self.radii.min();
        let range = self.radii.max() - min;

        let mut ids = Vec::with_capacity(rows * horiz);
        for i in 0..rows {
            let elevation = FRAC_PI_2 - PI * i as f64 / vert as f64;
            for j in 0..horiz {
                let azimuth = TAU * j as f64 / horiz as f64;
                let radius = self.radii[(i, j)];
                let flat = radius * elevation.cos();
                let offset =
                    Vector3::new(flat * azimuth.cos(), radius * elevation.sin(), flat * azimuth.sin());

                let fraction = if range < TOLERANCE {
                    0.0
                } else {
                    (radius - min) / range
                };
                let color = self.low.lerp(self.high, fraction as f32);
                let normal = offset.try_normalize(TOLERANCE).unwrap_or_else(Vector3::y);

                let id = mesh.add_point_with_attributes(self.center + offset, normal, color);
                mesh.set_uv(id, Point2::new(j as f64 / horiz as f64, i as f64 / vert as f64))?;
                ids.push(id);
            }
        }

        for row in 0..vert {
            let upper = &ids[row * horiz..(row + 1) * horiz];
            let lower = &ids[(row + 1) * horiz..(row + 2) * horiz];
            for j in 0..horiz {
                let next = (j + 1) % horiz;
                mesh.add_triangle(upper[j], upper[next], lower[next]);
                mesh.add_triangle(upper[j], lower[next], lower[j]);
                self.add_line(mesh, upper[j], upper[next]);
                self.add_line(mesh, upper[j], lower[j]);
            }
        }

        Ok(ids)
    }

    /// Adds a line colored by its endpoints.
    fn add_line(&self, mesh: &mut MeshData, a: PointId, b: PointId) {
        let color = |id| mesh.vertex_color(id).copied().unwrap_or(self.low);
        let (start, end) = (color(a), color(b));
        mesh.add_line_with_colors(a, b, start, end);
    }
}
