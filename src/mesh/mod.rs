mod id;
mod line;
mod records;
mod sub_mesh;
mod triangle;

pub use id::{LineId, PointId, TriangleId};
pub use line::{LineColor, MeshLine};
pub use records::MeshRecords;
pub use sub_mesh::SubMesh;
pub use triangle::{format_triangle_color, parse_triangle_color, MeshTriangle};

use std::collections::BTreeMap;

use crate::color::ColorRgb;
use crate::error::MeshError;
use crate::math::{Point2, Point3, Vector3};

/// Id-keyed store of mesh entities and their attribute overlays.
///
/// Points, lines and triangles each live in their own id space. Lines and
/// triangles reference points by [`PointId`]; the add path does not check
/// that those points exist; [`MakeValid`](crate::operations::MakeValid)
/// prunes broken references afterwards. Overlays are keyed by the id of the
/// entity they describe and may be sparse until
/// [`FullyPopulate`](crate::operations::FullyPopulate) fills them.
///
/// All maps iterate in ascending id order, which is also insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    name: String,
    pub(crate) points: BTreeMap<PointId, Point3>,
    pub(crate) lines: BTreeMap<LineId, MeshLine>,
    pub(crate) triangles: BTreeMap<TriangleId, MeshTriangle>,
    pub(crate) normals: BTreeMap<PointId, Vector3>,
    pub(crate) uvs: BTreeMap<PointId, Point2>,
    pub(crate) vertex_colors: BTreeMap<PointId, ColorRgb>,
    pub(crate) line_colors: BTreeMap<LineId, LineColor>,
    pub(crate) triangle_colors: BTreeMap<TriangleId, ColorRgb>,
    // Wider than the ids so that ingesting `i32::MAX` still moves past it.
    next_point: i64,
    next_line: i64,
    next_triangle: i64,
}

/// Returns the id a counter points at, or an error once the id space is
/// used up.
fn allocate(counter: i64, kind: &'static str) -> Result<i32, MeshError> {
    i32::try_from(counter).map_err(|_| MeshError::IdsExhausted(kind))
}

fn advance(counter: &mut i64, raw: i32) {
    *counter = (*counter).max(i64::from(raw) + 1);
}

impl MeshData {
    /// Creates a new, empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new, empty mesh with a name.
    #[must_use]
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns the mesh name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the mesh.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Removes every entity and overlay. Id counters keep running so ids
    /// are never handed out twice by the same mesh.
    pub fn clear(&mut self) {
        self.points.clear();
        self.lines.clear();
        self.triangles.clear();
        self.normals.clear();
        self.uvs.clear();
        self.vertex_colors.clear();
        self.line_colors.clear();
        self.triangle_colors.clear();
    }

    // --- Points ---

    /// Inserts a point and returns its ID.
    ///
    /// # Panics
    ///
    /// Panics once every point id up to `i32::MAX` has been handed out.
    /// [`try_add_point`](Self::try_add_point) reports that as an error.
    pub fn add_point(&mut self, position: Point3) -> PointId {
        match self.try_add_point(position) {
            Ok(id) => id,
            Err(e) => panic!("{e}"),
        }
    }

    /// Inserts a point and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::IdsExhausted`] once the point ids are used up.
    pub fn try_add_point(&mut self, position: Point3) -> Result<PointId, MeshError> {
        let id = PointId(allocate(self.next_point, "point")?);
        self.insert_point(id, position);
        Ok(id)
    }

    /// Inserts a point together with its normal and vertex color.
    pub fn add_point_with_attributes(
        &mut self,
        position: Point3,
        normal: Vector3,
        color: ColorRgb,
    ) -> PointId {
        let id = self.add_point(position);
        self.normals.insert(id, normal);
        self.vertex_colors.insert(id, color);
        id
    }

    /// Inserts a point under an explicit id, advancing the counter past it.
    pub(crate) fn insert_point(&mut self, id: PointId, position: Point3) {
        advance(&mut self.next_point, id.0);
        self.points.insert(id, position);
    }

    /// Overwrites the position of an existing point.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::PointNotFound`] if the point is not stored.
    pub fn set_point(&mut self, id: PointId, position: Point3) -> Result<(), MeshError> {
        *self
            .points
            .get_mut(&id)
            .ok_or(MeshError::PointNotFound(id))? = position;
        Ok(())
    }

    /// Returns the position of a point, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::PointNotFound`] if the point is not stored.
    pub fn point(&self, id: PointId) -> Result<&Point3, MeshError> {
        self.points.get(&id).ok_or(MeshError::PointNotFound(id))
    }

    /// Removes a point. Overlays and references are left for
    /// [`MakeValid`](crate::operations::MakeValid) to reconcile.
    pub fn remove_point(&mut self, id: PointId) -> Option<Point3> {
        self.points.remove(&id)
    }

    /// Returns `true` if the point is stored.
    #[must_use]
    pub fn contains_point(&self, id: PointId) -> bool {
        self.points.contains_key(&id)
    }

    /// Number of stored points.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Iterates points in ascending id order.
    pub fn points(&self) -> impl Iterator<Item = (PointId, &Point3)> {
        self.points.iter().map(|(id, p)| (*id, p))
    }

    // --- Per-point overlays ---

    /// Sets the normal of an existing point.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::PointNotFound`] if the point is not stored.
    pub fn set_normal(&mut self, id: PointId, normal: Vector3) -> Result<(), MeshError> {
        self.require_point(id)?;
        self.normals.insert(id, normal);
        Ok(())
    }

    /// Sets the texture coordinate of an existing point.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::PointNotFound`] if the point is not stored.
    pub fn set_uv(&mut self, id: PointId, uv: Point2) -> Result<(), MeshError> {
        self.require_point(id)?;
        self.uvs.insert(id, uv);
        Ok(())
    }

    /// Sets the color of an existing point.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::PointNotFound`] if the point is not stored.
    pub fn set_vertex_color(&mut self, id: PointId, color: ColorRgb) -> Result<(), MeshError> {
        self.require_point(id)?;
        self.vertex_colors.insert(id, color);
        Ok(())
    }

    /// Returns the normal of a point, if set.
    #[must_use]
    pub fn normal(&self, id: PointId) -> Option<&Vector3> {
        self.normals.get(&id)
    }

    /// Returns the texture coordinate of a point, if set.
    #[must_use]
    pub fn uv(&self, id: PointId) -> Option<&Point2> {
        self.uvs.get(&id)
    }

    /// Returns the color of a point, if set.
    #[must_use]
    pub fn vertex_color(&self, id: PointId) -> Option<&ColorRgb> {
        self.vertex_colors.get(&id)
    }

    /// Number of normal entries, including ones whose point is gone.
    #[must_use]
    pub fn normal_count(&self) -> usize {
        self.normals.len()
    }

    /// Number of texture coordinate entries.
    #[must_use]
    pub fn uv_count(&self) -> usize {
        self.uvs.len()
    }

    /// Number of vertex color entries.
    #[must_use]
    pub fn vertex_color_count(&self) -> usize {
        self.vertex_colors.len()
    }

    /// Iterates normals in ascending point id order.
    pub fn normals(&self) -> impl Iterator<Item = (PointId, &Vector3)> {
        self.normals.iter().map(|(id, n)| (*id, n))
    }

    /// Iterates texture coordinates in ascending point id order.
    pub fn uvs(&self) -> impl Iterator<Item = (PointId, &Point2)> {
        self.uvs.iter().map(|(id, uv)| (*id, uv))
    }

    /// Iterates vertex colors in ascending point id order.
    pub fn vertex_colors(&self) -> impl Iterator<Item = (PointId, &ColorRgb)> {
        self.vertex_colors.iter().map(|(id, c)| (*id, c))
    }

    fn require_point(&self, id: PointId) -> Result<(), MeshError> {
        if self.points.contains_key(&id) {
            Ok(())
        } else {
            Err(MeshError::PointNotFound(id))
        }
    }

    // --- Lines ---

    /// Inserts a line between two point ids and returns its ID.
    ///
    /// The endpoints are not required to exist yet.
    ///
    /// # Panics
    ///
    /// Panics once every line id up to `i32::MAX` has been handed out.
    /// [`try_add_line`](Self::try_add_line) reports that as an error.
    pub fn add_line(&mut self, a: PointId, b: PointId) -> LineId {
        match self.try_add_line(a, b) {
            Ok(id) => id,
            Err(e) => panic!("{e}"),
        }
    }

    /// Inserts a line between two point ids and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::IdsExhausted`] once the line ids are used up.
    pub fn try_add_line(&mut self, a: PointId, b: PointId) -> Result<LineId, MeshError> {
        let id = LineId(allocate(self.next_line, "line")?);
        self.insert_line(id, MeshLine::new(a, b));
        Ok(id)
    }

    /// Inserts a line together with its start and end colors.
    pub fn add_line_with_colors(
        &mut self,
        a: PointId,
        b: PointId,
        start: ColorRgb,
        end: ColorRgb,
    ) -> LineId {
        let id = self.add_line(a, b);
        self.set_line_color(id, start, end);
        id
    }

    /// Adds two new points and a colored line between them.
    ///
    /// Each endpoint receives the matching vertex color and an up normal.
    pub fn add_line_between(
        &mut self,
        start: Point3,
        end: Point3,
        start_color: ColorRgb,
        end_color: ColorRgb,
    ) -> LineId {
        let a = self.add_point_with_attributes(start, Vector3::y(), start_color);
        let b = self.add_point_with_attributes(end, Vector3::y(), end_color);
        self.add_line_with_colors(a, b, start_color, end_color)
    }

    pub(crate) fn insert_line(&mut self, id: LineId, line: MeshLine) {
        advance(&mut self.next_line, id.0);
        self.lines.insert(id, line);
    }

    /// Returns a line, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::LineNotFound`] if the line is not stored.
    pub fn line(&self, id: LineId) -> Result<&MeshLine, MeshError> {
        self.lines.get(&id).ok_or(MeshError::LineNotFound(id))
    }

    /// Removes a line. Its color entry is left for `MakeValid`.
    pub fn remove_line(&mut self, id: LineId) -> Option<MeshLine> {
        self.lines.remove(&id)
    }

    /// Returns `true` if the line is stored.
    #[must_use]
    pub fn contains_line(&self, id: LineId) -> bool {
        self.lines.contains_key(&id)
    }

    /// Number of stored lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Iterates lines in ascending id order.
    pub fn lines(&self) -> impl Iterator<Item = (LineId, &MeshLine)> {
        self.lines.iter().map(|(id, l)| (*id, l))
    }

    /// Sets the colors of a line, replacing any previous entry.
    pub fn set_line_color(&mut self, id: LineId, start: ColorRgb, end: ColorRgb) {
        self.line_colors.insert(id, LineColor::new(start, end));
    }

    /// Returns the start and end colors of a line, if set.
    #[must_use]
    pub fn line_color(&self, id: LineId) -> Option<&LineColor> {
        self.line_colors.get(&id)
    }

    /// Number of line color entries.
    #[must_use]
    pub fn line_color_count(&self) -> usize {
        self.line_colors.len()
    }

    /// Iterates line colors in ascending line id order.
    pub fn line_colors(&self) -> impl Iterator<Item = (LineId, &LineColor)> {
        self.line_colors.iter().map(|(id, c)| (*id, c))
    }

    // --- Triangles ---

    /// Inserts a triangle over three point ids and returns its ID.
    ///
    /// The corners are not required to exist yet.
    ///
    /// # Panics
    ///
    /// Panics once every triangle id up to `i32::MAX` has been handed out.
    /// [`try_add_triangle`](Self::try_add_triangle) reports that as an error.
    pub fn add_triangle(&mut self, a: PointId, b: PointId, c: PointId) -> TriangleId {
        match self.try_add_triangle(a, b, c) {
            Ok(id) => id,
            Err(e) => panic!("{e}"),
        }
    }

    /// Inserts a triangle over three point ids and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::IdsExhausted`] once the triangle ids are used up.
    pub fn try_add_triangle(
        &mut self,
        a: PointId,
        b: PointId,
        c: PointId,
    ) -> Result<TriangleId, MeshError> {
        let id = TriangleId(allocate(self.next_triangle, "triangle")?);
        self.insert_triangle(id, MeshTriangle::new(a, b, c));
        Ok(id)
    }

    /// Adds three new points, their three edges, and a triangle, all in one
    /// color.
    pub fn add_triangle_from_positions(
        &mut self,
        a: Point3,
        b: Point3,
        c: Point3,
        color: ColorRgb,
    ) -> TriangleId {
        let ia = self.add_point_with_attributes(a, Vector3::y(), color);
        let ib = self.add_point_with_attributes(b, Vector3::y(), color);
        let ic = self.add_point_with_attributes(c, Vector3::y(), color);

        self.add_line_with_colors(ia, ib, color, color);
        self.add_line_with_colors(ib, ic, color, color);
        self.add_line_with_colors(ic, ia, color, color);

        let id = self.add_triangle(ia, ib, ic);
        self.set_triangle_color(id, color);
        id
    }

    pub(crate) fn insert_triangle(&mut self, id: TriangleId, triangle: MeshTriangle) {
        advance(&mut self.next_triangle, id.0);
        self.triangles.insert(id, triangle);
    }

    /// Returns a triangle, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::TriangleNotFound`] if the triangle is not stored.
    pub fn triangle(&self, id: TriangleId) -> Result<&MeshTriangle, MeshError> {
        self.triangles
            .get(&id)
            .ok_or(MeshError::TriangleNotFound(id))
    }

    /// Removes a triangle. Its color entry is left for `MakeValid`.
    pub fn remove_triangle(&mut self, id: TriangleId) -> Option<MeshTriangle> {
        self.triangles.remove(&id)
    }

    /// Returns `true` if the triangle is stored.
    #[must_use]
    pub fn contains_triangle(&self, id: TriangleId) -> bool {
        self.triangles.contains_key(&id)
    }

    /// Number of stored triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Iterates triangles in ascending id order.
    pub fn triangles(&self) -> impl Iterator<Item = (TriangleId, &MeshTriangle)> {
        self.triangles.iter().map(|(id, t)| (*id, t))
    }

    /// Sets the color of a triangle, replacing any previous entry.
    pub fn set_triangle_color(&mut self, id: TriangleId, color: ColorRgb) {
        self.triangle_colors.insert(id, color);
    }

    /// Returns the color of a triangle, if set.
    #[must_use]
    pub fn triangle_color(&self, id: TriangleId) -> Option<&ColorRgb> {
        self.triangle_colors.get(&id)
    }

    /// Number of triangle color entries.
    #[must_use]
    pub fn triangle_color_count(&self) -> usize {
        self.triangle_colors.len()
    }

    /// Iterates triangle colors in ascending triangle id order.
    pub fn triangle_colors(&self) -> impl Iterator<Item = (TriangleId, &ColorRgb)> {
        self.triangle_colors.iter().map(|(id, c)| (*id, c))
    }

    // --- Convenience ---

    /// Fills every missing overlay with the default fallback values.
    pub fn fully_populate(&mut self) -> crate::operations::PopulateReport {
        crate::operations::FullyPopulate::new().execute(self)
    }

    /// Prunes broken references and duplicates with default parameters.
    pub fn make_valid(&mut self) -> crate::operations::ValidityReport {
        crate::operations::MakeValid::new().execute(self)
    }
}

/// Parses exactly `N` comma-separated integer ids.
fn parse_ids<const N: usize>(s: &str) -> Option<[PointId; N]> {
    let mut ids = [PointId(0); N];
    let mut parts = s.split(',');
    for slot in &mut ids {
        *slot = PointId(parts.next()?.trim().parse().ok()?);
    }
    parts.next().is_none().then_some(ids)
}
