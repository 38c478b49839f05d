use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::color::ColorRgb;
use crate::math::{Point2, Vector3};
use crate::mesh::{LineColor, MeshData};

/// Fallback values inserted for missing overlay entries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulateDefaults {
    /// Default: the up vector `(0, 1, 0)`.
    pub normal: Vector3,
    /// Default: `(0, 0)`.
    pub uv: Point2,
    /// Default: opaque white.
    pub vertex_color: ColorRgb,
    /// Default: opaque white at both ends.
    pub line_color: LineColor,
    /// Default: opaque white.
    pub triangle_color: ColorRgb,
}

impl Default for PopulateDefaults {
    fn default() -> Self {
        Self {
            normal: Vector3::y(),
            uv: Point2::origin(),
            vertex_color: ColorRgb::WHITE,
            line_color: LineColor::uniform(ColorRgb::WHITE),
            triangle_color: ColorRgb::WHITE,
        }
    }
}

impl PopulateDefaults {
    #[must_use]
    pub fn with_normal(mut self, normal: Vector3) -> Self {
        self.normal = normal;
        self
    }

    #[must_use]
    pub fn with_uv(mut self, uv: Point2) -> Self {
        self.uv = uv;
        self
    }

    #[must_use]
    pub fn with_vertex_color(mut self, color: ColorRgb) -> Self {
        self.vertex_color = color;
        self
    }

    #[must_use]
    pub fn with_line_color(mut self, color: LineColor) -> Self {
        self.line_color = color;
        self
    }

    #[must_use]
    pub fn with_triangle_color(mut self, color: ColorRgb) -> Self {
        self.triangle_color = color;
        self
    }
}

/// Number of overlay entries inserted by a [`FullyPopulate`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopulateReport {
    pub normals: usize,
    pub uvs: usize,
    pub vertex_colors: usize,
    pub line_colors: usize,
    pub triangle_colors: usize,
}

impl PopulateReport {
    /// Total entries inserted across all overlays.
    #[must_use]
    pub fn total(&self) -> usize {
        self.normals + self.uvs + self.vertex_colors + self.line_colors + self.triangle_colors
    }
}

/// Gives every point, line and triangle a complete set of overlays.
///
/// Pure addition: existing entries are never overwritten or removed, so a
/// second run is a no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullyPopulate {
    defaults: PopulateDefaults,
}

impl FullyPopulate {
    /// Creates a new `FullyPopulate` operation with the standard fallbacks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets custom fallback values.
    #[must_use]
    pub fn with_defaults(mut self, defaults: PopulateDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Executes the operation, returning how many entries were inserted.
    pub fn execute(&self, mesh: &mut MeshData) -> PopulateReport {
        let d = &self.defaults;
        let mut report = PopulateReport::default();

        for id in mesh.points.keys() {
            if !mesh.normals.contains_key(id) {
                mesh.normals.insert(*id, d.normal);
                report.normals += 1;
            }
            if !mesh.uvs.contains_key(id) {
                mesh.uvs.insert(*id, d.uv);
                report.uvs += 1;
            }
            if !mesh.vertex_colors.contains_key(id) {
                mesh.vertex_colors.insert(*id, d.vertex_color);
                report.vertex_colors += 1;
            }
        }
        trace!(
            normals = report.normals,
            uvs = report.uvs,
            vertex_colors = report.vertex_colors,
            "populated point overlays"
        );

        for id in mesh.lines.keys() {
            if !mesh.line_colors.contains_key(id) {
                mesh.line_colors.insert(*id, d.line_color);
                report.line_colors += 1;
            }
        }
        for id in mesh.triangles.keys() {
            if !mesh.triangle_colors.contains_key(id) {
                mesh.triangle_colors.insert(*id, d.triangle_color);
                report.triangle_colors += 1;
            }
        }

        debug!(added = report.total(), "fully populated mesh {:?}", mesh.name());
        report
    }
}
