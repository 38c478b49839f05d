//! Compact little-endian binary encoding of a mesh.
//!
//! Layout, in order: name (7-bit varint length + UTF-8), then for points,
//! lines, triangles, normals, UVs, vertex colors, line colors and triangle
//! colors an `i32` count followed by the records. Floats are `f32` or `f64`
//! depending on [`Precision`]; the stream carries no tag, so writer and
//! reader must agree on it.
//!
//! Ids are written as ordinals (position in ascending id order). A
//! reference to a point that does not exist is written as `-1`.

use std::collections::{BTreeMap, HashMap};
use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::ColorRgb;
use crate::error::{FormatError, MeshError};
use crate::math::{Point2, Point3, Vector3};
use crate::mesh::{LineId, MeshData, PointId, TriangleId};
use crate::operations::PopulateDefaults;

/// Floating-point width of coordinates on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    /// 4-byte `f32` values.
    Single,
    /// 8-byte `f64` values.
    #[default]
    Double,
}

/// Options for [`to_bytes`] and [`from_bytes`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BinaryOptions {
    pub precision: Precision,
    /// Values written for points that lack a normal, UV or vertex color
    /// while other points have one.
    pub fallbacks: PopulateDefaults,
}

impl BinaryOptions {
    #[must_use]
    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    #[must_use]
    pub fn with_fallbacks(mut self, fallbacks: PopulateDefaults) -> Self {
        self.fallbacks = fallbacks;
        self
    }
}

// --- Encoding ---

struct ByteWriter {
    buf: Vec<u8>,
    precision: Precision,
}

impl ByteWriter {
    fn i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    fn count(&mut self, kind: &'static str, count: usize) -> Result<(), FormatError> {
        let value = i32::try_from(count).map_err(|_| FormatError::TooManyRecords { kind, count })?;
        self.i32(value);
        Ok(())
    }

    #[allow(clippy::cast_possible_truncation)]
    fn float(&mut self, value: f64) {
        match self.precision {
            Precision::Single => self.buf.extend_from_slice(&(value as f32).to_le_bytes()),
            Precision::Double => self.buf.extend_from_slice(&value.to_le_bytes()),
        }
    }

    fn color(&mut self, c: ColorRgb) {
        self.buf.extend_from_slice(&[c.r, c.g, c.b, c.a]);
    }

    /// Length-prefixed string with a 7-bit variable-length length.
    #[allow(clippy::cast_possible_truncation)]
    fn string(&mut self, s: &str) {
        let mut len = s.len();
        while len >= 0x80 {
            self.buf.push((len as u8) | 0x80);
            len >>= 7;
        }
        self.buf.push(len as u8);
        self.buf.extend_from_slice(s.as_bytes());
    }
}

/// Assigns ordinals to ids in ascending order.
fn ordinals<K: Ord + Copy + std::hash::Hash>(ids: impl Iterator<Item = K>) -> HashMap<K, i32> {
    ids.zip(0..).collect()
}

/// Writes a per-point overlay aligned with the point order.
///
/// An overlay with no entry for any current point is written empty;
/// otherwise every point gets a value, gaps taking `fallback`.
fn write_point_overlay<T: Copy>(
    w: &mut ByteWriter,
    kind: &'static str,
    points: &BTreeMap<PointId, Point3>,
    overlay: &BTreeMap<PointId, T>,
    fallback: T,
    mut write: impl FnMut(&mut ByteWriter, T),
) -> Result<(), FormatError> {
    let present = points.keys().filter(|id| overlay.contains_key(id)).count();
    let dropped = overlay.len() - present;
    if dropped > 0 {
        debug!(kind, dropped, "skipping overlay entries without a point");
    }
    if present == 0 {
        return w.count(kind, 0);
    }
    if present < points.len() {
        debug!(kind, filled = points.len() - present, "filling overlay gaps with fallback");
    }

    w.count(kind, points.len())?;
    for id in points.keys() {
        write(w, overlay.get(id).copied().unwrap_or(fallback));
    }
    Ok(())
}

/// Encodes a mesh into bytes.
///
/// # Errors
///
/// Returns [`FormatError::TooManyRecords`] if a count exceeds `i32::MAX`.
pub fn to_bytes(mesh: &MeshData, options: &BinaryOptions) -> Result<Vec<u8>, FormatError> {
    let mut w = ByteWriter {
        buf: Vec::new(),
        precision: options.precision,
    };
    let point_ord = ordinals(mesh.points.keys().copied());
    let line_ord = ordinals(mesh.lines.keys().copied());
    let tri_ord = ordinals(mesh.triangles.keys().copied());
    let wire_point = |id: PointId| point_ord.get(&id).copied().unwrap_or(-1);

    w.string(mesh.name());

    w.count("point", mesh.point_count())?;
    for (_, p) in mesh.points() {
        w.float(p.x);
        w.float(p.y);
        w.float(p.z);
    }

    w.count("line", mesh.line_count())?;
    for (_, line) in mesh.lines() {
        w.i32(wire_point(line.a));
        w.i32(wire_point(line.b));
    }

    w.count("triangle", mesh.triangle_count())?;
    for (_, tri) in mesh.triangles() {
        w.i32(wire_point(tri.a));
        w.i32(wire_point(tri.b));
        w.i32(wire_point(tri.c));
    }

    let fallbacks = &options.fallbacks;
    write_point_overlay(&mut w, "normal", &mesh.points, &mesh.normals, fallbacks.normal, |w, n| {
        w.float(n.x);
        w.float(n.y);
        w.float(n.z);
    })?;
    write_point_overlay(&mut w, "uv", &mesh.points, &mesh.uvs, fallbacks.uv, |w, uv| {
        w.float(uv.x);
        w.float(uv.y);
    })?;
    write_point_overlay(
        &mut w,
        "vertex color",
        &mesh.points,
        &mesh.vertex_colors,
        fallbacks.vertex_color,
        ByteWriter::color,
    )?;

    let line_colors: Vec<_> = mesh
        .line_colors()
        .filter_map(|(id, color)| line_ord.get(&id).map(|ord| (*ord, *color)))
        .collect();
    if line_colors.len() < mesh.line_color_count() {
        debug!(
            dropped = mesh.line_color_count() - line_colors.len(),
            "skipping line colors without a line"
        );
    }
    w.count("line color", line_colors.len())?;
    for (ord, color) in line_colors {
        w.i32(ord);
        w.color(color.start);
        w.color(color.end);
    }

    let triangle_colors: Vec<_> = mesh
        .triangle_colors()
        .filter_map(|(id, color)| tri_ord.get(&id).map(|ord| (*ord, *color)))
        .collect();
    if triangle_colors.len() < mesh.triangle_color_count() {
        debug!(
            dropped = mesh.triangle_color_count() - triangle_colors.len(),
            "skipping triangle colors without a triangle"
        );
    }
    w.count("triangle color", triangle_colors.len())?;
    for (ord, color) in triangle_colors {
        w.i32(ord);
        w.color(color);
    }

    Ok(w.buf)
}

/// Encodes a mesh into a writer.
///
/// # Errors
///
/// Returns an error if encoding fails or the writer fails.
pub fn write_binary<W: Write>(
    mesh: &MeshData,
    mut writer: W,
    options: &BinaryOptions,
) -> Result<(), FormatError> {
    writer.write_all(&to_bytes(mesh, options)?)?;
    writer.flush()?;
    Ok(())
}

// --- Decoding ---

struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
    precision: Precision,
}

impl<'a> ByteReader<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], FormatError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|end| *end <= self.data.len())
            .ok_or(FormatError::UnexpectedEof { position: self.pos })?;
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], FormatError> {
        let mut out = [0; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn i32(&mut self) -> Result<i32, FormatError> {
        Ok(i32::from_le_bytes(self.array()?))
    }

    fn count(&mut self, kind: &'static str) -> Result<i32, FormatError> {
        let count = self.i32()?;
        if count < 0 {
            return Err(FormatError::InvalidCount {
                kind,
                count: i64::from(count),
            });
        }
        Ok(count)
    }

    fn float(&mut self) -> Result<f64, FormatError> {
        Ok(match self.precision {
            Precision::Single => f64::from(f32::from_le_bytes(self.array()?)),
            Precision::Double => f64::from_le_bytes(self.array()?),
        })
    }

    fn color(&mut self) -> Result<ColorRgb, FormatError> {
        let [r, g, b, a] = self.array()?;
        Ok(ColorRgb::rgba(r, g, b, a))
    }

    fn string(&mut self) -> Result<String, FormatError> {
        let mut len: usize = 0;
        let mut shift = 0;
        loop {
            let [byte] = self.array()?;
            len |= usize::from(byte & 0x7F) << shift;
            if byte & 0x80 == 0 {
                break;
            }
            shift += 7;
            if shift > 28 {
                return Err(FormatError::record("name length", format!("{len}+")));
            }
        }
        Ok(String::from_utf8(self.take(len)?.to_vec())?)
    }
}

/// Decodes a mesh from bytes.
///
/// Records are ingested through the regular mutation API; ids are
/// assigned afresh starting from zero, matching the ordinals on the wire.
///
/// # Errors
///
/// Returns a [`FormatError`] for truncated input, negative counts, invalid
/// UTF-8 in the name, more per-point overlay entries than points, or a
/// line/triangle color referring to a record that was not decoded.
pub fn from_bytes(data: &[u8], options: &BinaryOptions) -> Result<MeshData, FormatError> {
    let mut r = ByteReader {
        data,
        pos: 0,
        precision: options.precision,
    };
    let mut mesh = MeshData::with_name(r.string()?);

    for _ in 0..r.count("point")? {
        let (x, y, z) = (r.float()?, r.float()?, r.float()?);
        mesh.try_add_point(Point3::new(x, y, z))?;
    }
    for _ in 0..r.count("line")? {
        let (a, b) = (r.i32()?, r.i32()?);
        mesh.try_add_line(PointId(a), PointId(b))?;
    }
    for _ in 0..r.count("triangle")? {
        let (a, b, c) = (r.i32()?, r.i32()?, r.i32()?);
        mesh.try_add_triangle(PointId(a), PointId(b), PointId(c))?;
    }

    for i in 0..r.count("normal")? {
        let (x, y, z) = (r.float()?, r.float()?, r.float()?);
        mesh.set_normal(PointId(i), Vector3::new(x, y, z))?;
    }
    for i in 0..r.count("uv")? {
        let (x, y) = (r.float()?, r.float()?);
        mesh.set_uv(PointId(i), Point2::new(x, y))?;
    }
    for i in 0..r.count("vertex color")? {
        let color = r.color()?;
        mesh.set_vertex_color(PointId(i), color)?;
    }

    for _ in 0..r.count("line color")? {
        let id = LineId(r.i32()?);
        let (start, end) = (r.color()?, r.color()?);
        if !mesh.contains_line(id) {
            return Err(MeshError::LineNotFound(id).into());
        }
        mesh.set_line_color(id, start, end);
    }
    for _ in 0..r.count("triangle color")? {
        let id = TriangleId(r.i32()?);
        let color = r.color()?;
        if !mesh.contains_triangle(id) {
            return Err(MeshError::TriangleNotFound(id).into());
        }
        mesh.set_triangle_color(id, color);
    }

    if r.pos < data.len() {
        debug!(trailing = data.len() - r.pos, "ignoring trailing bytes");
    }
    Ok(mesh)
}

/// Decodes a mesh from a reader, consuming it to the end.
///
/// # Errors
///
/// Returns an error if reading fails or the content is invalid.
pub fn read_binary<R: Read>(mut reader: R, options: &BinaryOptions) -> Result<MeshData, FormatError> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    from_bytes(&data, options)
}
