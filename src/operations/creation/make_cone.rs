use std::f64::consts::TAU;

use crate::color::ColorRgb;
use crate::error::{OperationError, Result};
use crate::math::{Point3, TOLERANCE};
use crate::mesh::{MeshData, PointId};

use super::{add_colored_point, perpendicular_dir};

/// Creates a wireframe cone from an apex and the centre of its circular
/// base.
///
/// The base is a ring of `segments` points in the plane perpendicular to
/// the axis. Lines run from the base centre to every ring point, around the
/// ring, and from the apex to every ring point. No triangles are made.
pub struct MakeCone {
    apex: Point3,
    base_center: Point3,
    base_radius: f64,
    segments: usize,
    color: ColorRgb,
}

impl MakeCone {
    /// Creates a new `MakeCone` operation.
    #[must_use]
    pub fn new(
        apex: Point3,
        base_center: Point3,
        base_radius: f64,
        segments: usize,
        color: ColorRgb,
    ) -> Self {
        Self {
            apex,
            base_center,
            base_radius,
            segments,
            color,
        }
    }

    /// Executes the operation, adding the cone to `mesh`.
    ///
    /// Returns the apex id, the base centre id, then the ring ids.
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than three segments, the radius is
    /// not positive, or the apex coincides with the base centre.
    pub fn execute(&self, mesh: &mut MeshData) -> Result<Vec<PointId>> {
        check_segments(self.segments)?;
        if !self.base_radius.is_finite() || self.base_radius < TOLERANCE {
            return Err(
                OperationError::InvalidInput("cone base radius must be positive".into()).into(),
            );
        }
        let axis = (self.base_center - self.apex)
            .try_normalize(TOLERANCE)
            .ok_or_else(|| OperationError::InvalidInput("cone axis must be non-zero".into()))?;

        let u = perpendicular_dir(&axis);
        let v = axis.cross(&u);
        let ring: Vec<Point3> = ring_offsets(self.segments)
            .map(|(cos, sin)| self.base_center + (u * cos + v * sin) * self.base_radius)
            .collect();

        wire_cone(mesh, self.apex, self.base_center, &ring, true, self.color)
    }
}

/// Which parts of a [`MakeHorizCone`] are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConeStyle {
    /// Apex lines plus the base spokes and rim.
    #[default]
    Cone,
    /// Apex lines only; the base is left open.
    Cropped,
}

/// Creates a wireframe cone lying along +X with an elliptical base.
///
/// The apex sits at the origin and the base centre at `(length, 0, 0)`. The
/// base ellipse lies in the YZ plane with `major_axis` along Y and
/// `minor_axis` along Z.
pub struct MakeHorizCone {
    length: f64,
    major_axis: f64,
    minor_axis: f64,
    segments: usize,
    color: ColorRgb,
    style: ConeStyle,
}

impl MakeHorizCone {
    /// Creates a new `MakeHorizCone` operation with [`ConeStyle::Cone`].
    #[must_use]
    pub fn new(
        length: f64,
        major_axis: f64,
        minor_axis: f64,
        segments: usize,
        color: ColorRgb,
    ) -> Self {
        Self {
            length,
            major_axis,
            minor_axis,
            segments,
            color,
            style: ConeStyle::Cone,
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: ConeStyle) -> Self {
        self.style = style;
        self
    }

    /// Executes the operation, adding the cone to `mesh`.
    ///
    /// Returns the apex id, the base centre id, then the ring ids.
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than three segments or any
    /// dimension is not finite.
    pub fn execute(&self, mesh: &mut MeshData) -> Result<Vec<PointId>> {
        check_segments(self.segments)?;
        let dims = [self.length, self.major_axis, self.minor_axis];
        if !dims.iter().all(|d| d.is_finite()) {
            return Err(OperationError::InvalidInput(format!(
                "cone dimensions must be finite, got {dims:?}"
            ))
            .into());
        }

        let base_center = Point3::new(self.length, 0.0, 0.0);
        let ring: Vec<Point3> = ring_offsets(self.segments)
            .map(|(cos, sin)| Point3::new(self.length, self.major_axis * cos, self.minor_axis * sin))
            .collect();

        let with_base = self.style == ConeStyle::Cone;
        wire_cone(mesh, Point3::origin(), base_center, &ring, with_base, self.color)
    }
}

fn check_segments(segments: usize) -> Result<()> {
    if segments < 3 {
        return Err(OperationError::InvalidInput(format!(
            "cone needs at least 3 segments, got {segments}"
        ))
        .into());
    }
    Ok(())
}

/// Unit circle samples `(cos, sin)` at `segments` even steps from angle 0.
#[allow(clippy::cast_precision_loss)]
fn ring_offsets(segments: usize) -> impl Iterator<Item = (f64, f64)> {
    (0..segments).map(move |i| {
        let angle = TAU * i as f64 / segments as f64;
        (angle.cos(), angle.sin())
    })
}

fn wire_cone(
    mesh: &mut MeshData,
    apex: Point3,
    base_center: Point3,
    ring: &[Point3],
    with_base: bool,
    color: ColorRgb,
) -> Result<Vec<PointId>> {
    let apex = add_colored_point(mesh, apex, color)?;
    let center = add_colored_point(mesh, base_center, color)?;
    let mut ids = vec![apex, center];
    for p in ring {
        ids.push(add_colored_point(mesh, *p, color)?);
    }

    let rim = &ids[2..];
    if with_base {
        for (i, &current) in rim.iter().enumerate() {
            let next = rim[(i + 1) % rim.len()];
            mesh.add_line_with_colors(center, current, color, color);
            mesh.add_line_with_colors(current, next, color, color);
        }
    }
    for &p in rim {
        mesh.add_line_with_colors(apex, p, color, color);
    }
    Ok(ids)
}
