//! Human-readable JSON encoding of a mesh.
//!
//! Every entity and overlay is an object keyed by id, with each value a
//! compact string (`"X:1.000, Y:2.000, Z:3.000"`, `"0, 1"`, `"#F00"`, ...).
//! Decoding preserves ids.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::text::{format_point, format_uv, format_vector, parse_point, parse_uv, parse_vector};
use crate::color::ColorRgb;
use crate::error::FormatError;
use crate::mesh::{
    format_triangle_color, parse_triangle_color, LineColor, MeshData, MeshLine, MeshRecords,
    MeshTriangle,
};

/// Options for [`to_json`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonOptions {
    /// Write without indentation or line breaks.
    pub dense: bool,
    /// Decimal places for positions and normals.
    pub position_decimals: usize,
    /// Decimal places for texture coordinates.
    pub uv_decimals: usize,
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self {
            dense: false,
            position_decimals: 3,
            uv_decimals: 4,
        }
    }
}

impl JsonOptions {
    #[must_use]
    pub fn with_dense(mut self, dense: bool) -> Self {
        self.dense = dense;
        self
    }

    #[must_use]
    pub fn with_position_decimals(mut self, decimals: usize) -> Self {
        self.position_decimals = decimals;
        self
    }

    #[must_use]
    pub fn with_uv_decimals(mut self, decimals: usize) -> Self {
        self.uv_decimals = decimals;
        self
    }
}

type Table = BTreeMap<i32, String>;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct JsonMesh {
    name: String,
    vertices: Table,
    lines: Table,
    triangles: Table,
    normals: Table,
    uvs: Table,
    vertex_colors: Table,
    line_colors: Table,
    triangle_colors: Table,
}

fn write_table<K, V>(map: &BTreeMap<K, V>, mut format: impl FnMut(&V) -> String) -> Table
where
    K: Copy + Into<i32>,
{
    map.iter().map(|(id, value)| ((*id).into(), format(value))).collect()
}

fn read_table<K, V>(
    table: Table,
    parse: impl Fn(&str) -> Result<V, FormatError>,
) -> Result<BTreeMap<K, V>, FormatError>
where
    K: Ord + From<i32>,
{
    table
        .into_iter()
        .map(|(id, value)| Ok((K::from(id), parse(&value)?)))
        .collect()
}

/// Encodes a mesh as JSON text.
///
/// Normals, UVs and vertex colors of points that no longer exist are not
/// written, so the output always decodes.
///
/// # Errors
///
/// Returns [`FormatError::Json`] if serialization fails.
pub fn to_json(mesh: &MeshData, options: &JsonOptions) -> Result<String, FormatError> {
    let mut records = mesh.records();
    let points = &records.points;
    let before = records.normals.len() + records.uvs.len() + records.vertex_colors.len();
    records.normals.retain(|id, _| points.contains_key(id));
    records.uvs.retain(|id, _| points.contains_key(id));
    records.vertex_colors.retain(|id, _| points.contains_key(id));
    let kept = records.normals.len() + records.uvs.len() + records.vertex_colors.len();
    if kept < before {
        debug!(dropped = before - kept, "skipping point overlays without a point");
    }

    let pd = options.position_decimals;
    let doc = JsonMesh {
        name: records.name,
        vertices: write_table(&records.points, |p| format_point(p, pd)),
        lines: write_table(&records.lines, ToString::to_string),
        triangles: write_table(&records.triangles, ToString::to_string),
        normals: write_table(&records.normals, |n| format_vector(n, pd)),
        uvs: write_table(&records.uvs, |uv| format_uv(uv, options.uv_decimals)),
        vertex_colors: write_table(&records.vertex_colors, ToString::to_string),
        line_colors: write_table(&records.line_colors, ToString::to_string),
        triangle_colors: write_table(&records.triangle_colors, |c| format_triangle_color(*c)),
    };

    let text = if options.dense {
        serde_json::to_string(&doc)?
    } else {
        serde_json::to_string_pretty(&doc)?
    };
    Ok(text)
}

/// Decodes a mesh from JSON text, replacing any previous contents.
///
/// Missing keys decode as empty; unknown keys are ignored.
///
/// # Errors
///
/// Returns a [`FormatError`] for malformed JSON, unparsable value strings
/// or a per-point overlay entry without a point.
pub fn from_json(text: &str) -> Result<MeshData, FormatError> {
    let doc: JsonMesh = serde_json::from_str(text)?;
    let records = MeshRecords {
        name: doc.name,
        points: read_table(doc.vertices, parse_point)?,
        lines: read_table(doc.lines, str::parse::<MeshLine>)?,
        triangles: read_table(doc.triangles, str::parse::<MeshTriangle>)?,
        normals: read_table(doc.normals, parse_vector)?,
        uvs: read_table(doc.uvs, parse_uv)?,
        vertex_colors: read_table(doc.vertex_colors, str::parse::<ColorRgb>)?,
        line_colors: read_table(doc.line_colors, str::parse::<LineColor>)?,
        triangle_colors: read_table(doc.triangle_colors, parse_triangle_color)?,
    };

    let mut mesh = MeshData::new();
    mesh.replace_all(records)?;
    Ok(mesh)
}
