use std::collections::BTreeMap;

use super::{LineColor, LineId, MeshData, MeshLine, MeshTriangle, PointId, TriangleId};
use crate::color::ColorRgb;
use crate::error::MeshError;
use crate::math::{Point2, Point3, Vector3};

/// A detached snapshot of every entity and overlay in a mesh.
///
/// Serialization adapters decode into this shape and hand it to
/// [`MeshData::replace_all`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshRecords {
    pub name: String,
    pub points: BTreeMap<PointId, Point3>,
    pub lines: BTreeMap<LineId, MeshLine>,
    pub triangles: BTreeMap<TriangleId, MeshTriangle>,
    pub normals: BTreeMap<PointId, Vector3>,
    pub uvs: BTreeMap<PointId, Point2>,
    pub vertex_colors: BTreeMap<PointId, ColorRgb>,
    pub line_colors: BTreeMap<LineId, LineColor>,
    pub triangle_colors: BTreeMap<TriangleId, ColorRgb>,
}

impl MeshData {
    /// Copies every entity and overlay out of the mesh.
    #[must_use]
    pub fn records(&self) -> MeshRecords {
        MeshRecords {
            name: self.name().to_owned(),
            points: self.points.clone(),
            lines: self.lines.clone(),
            triangles: self.triangles.clone(),
            normals: self.normals.clone(),
            uvs: self.uvs.clone(),
            vertex_colors: self.vertex_colors.clone(),
            line_colors: self.line_colors.clone(),
            triangle_colors: self.triangle_colors.clone(),
        }
    }

    /// Replaces the whole contents of the mesh with `records`.
    ///
    /// Entities keep their ids and the id counters move past the largest
    /// ingested id. Per-point overlays go through the strict setters, so an
    /// overlay whose point is absent from `records` is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::PointNotFound`] for the first per-point overlay
    /// entry that has no point. The mesh is left unchanged in that case.
    pub fn replace_all(&mut self, records: MeshRecords) -> Result<(), MeshError> {
        let mut staged = self.clone();
        staged.clear();
        staged.set_name(records.name);

        for (id, position) in records.points {
            staged.insert_point(id, position);
        }
        for (id, line) in records.lines {
            staged.insert_line(id, line);
        }
        for (id, triangle) in records.triangles {
            staged.insert_triangle(id, triangle);
        }
        for (id, normal) in records.normals {
            staged.set_normal(id, normal)?;
        }
        for (id, uv) in records.uvs {
            staged.set_uv(id, uv)?;
        }
        for (id, color) in records.vertex_colors {
            staged.set_vertex_color(id, color)?;
        }
        for (id, color) in records.line_colors {
            staged.set_line_color(id, color.start, color.end);
        }
        for (id, color) in records.triangle_colors {
            staged.set_triangle_color(id, color);
        }

        *self = staged;
        Ok(())
    }
}
