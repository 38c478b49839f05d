use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::math::{points_within_tolerance, Point3};
use crate::mesh::{MeshData, PointId};

/// Configuration for [`MakeValid`].
///
/// # Example
///
/// ```
/// use meshdata::operations::ValidityParams;
///
/// let params = ValidityParams::default().with_tolerance(0.01);
/// assert!(params.merge_duplicate_points);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidityParams {
    /// Per-axis distance within which two points are merged.
    ///
    /// A negative tolerance merges nothing.
    /// Default: `1e-6`
    pub tolerance: f64,

    /// Whether near-duplicate points are merged at all.
    ///
    /// Default: `true`
    pub merge_duplicate_points: bool,
}

impl Default for ValidityParams {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            merge_duplicate_points: true,
        }
    }
}

impl ValidityParams {
    /// Set the duplicate-point merge distance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set whether near-duplicate points are merged.
    #[must_use]
    pub fn with_merge_duplicate_points(mut self, merge: bool) -> Self {
        self.merge_duplicate_points = merge;
        self
    }
}

/// Entries removed by each [`MakeValid`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidityReport {
    pub orphaned_points: usize,
    pub merged_points: usize,
    pub orphaned_point_overlays: usize,
    pub orphaned_lines: usize,
    pub duplicate_lines: usize,
    pub orphaned_line_colors: usize,
    pub orphaned_triangles: usize,
    pub duplicate_triangles: usize,
    pub orphaned_triangle_colors: usize,
}

impl ValidityReport {
    /// Total entries removed across all passes.
    #[must_use]
    pub fn total(&self) -> usize {
        self.orphaned_points
            + self.merged_points
            + self.orphaned_point_overlays
            + self.orphaned_lines
            + self.duplicate_lines
            + self.orphaned_line_colors
            + self.orphaned_triangles
            + self.duplicate_triangles
            + self.orphaned_triangle_colors
    }

    /// Returns `true` if the run changed nothing.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }
}

/// Removes broken references, duplicates and ownerless overlays.
///
/// Points are reconciled first because line and triangle validity depends
/// on point existence; each overlay is pruned right after its owning entity
/// type. The operation only ever removes entries and a second run is a
/// no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeValid {
    params: ValidityParams,
}

impl MakeValid {
    /// Creates a new `MakeValid` operation with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets custom parameters.
    #[must_use]
    pub fn with_params(mut self, params: ValidityParams) -> Self {
        self.params = params;
        self
    }

    /// Executes every pass in order and reports what was removed.
    pub fn execute(&self, mesh: &mut MeshData) -> ValidityReport {
        let mut report = ValidityReport {
            orphaned_points: remove_orphaned_points(mesh),
            ..ValidityReport::default()
        };
        if self.params.merge_duplicate_points {
            report.merged_points = remove_duplicate_points(mesh, self.params.tolerance);
        }
        report.orphaned_point_overlays = remove_orphaned_point_overlays(mesh);
        report.orphaned_lines = remove_orphaned_lines(mesh);
        report.duplicate_lines = remove_duplicate_lines(mesh);
        report.orphaned_line_colors = remove_orphaned_line_colors(mesh);
        report.orphaned_triangles = remove_orphaned_triangles(mesh);
        report.duplicate_triangles = remove_duplicate_triangles(mesh);
        report.orphaned_triangle_colors = remove_orphaned_triangle_colors(mesh);

        debug!(removed = report.total(), "validated mesh {:?}", mesh.name());
        report
    }
}

/// Removes points that no intact line or triangle references and that carry
/// no vertex color.
///
/// A line or triangle with a missing endpoint does not keep its other
/// endpoints alive: it is removed by a later pass, and counting it here
/// would leave orphans behind for the next run.
pub fn remove_orphaned_points(mesh: &mut MeshData) -> usize {
    let exists = |id: &PointId| mesh.points.contains_key(id);

    let mut used = HashSet::new();
    for line in mesh.lines.values() {
        if line.points().all(|id| exists(&id)) {
            used.extend(line.points());
        }
    }
    for tri in mesh.triangles.values() {
        if tri.points().all(|id| exists(&id)) {
            used.extend(tri.points());
        }
    }

    let before = mesh.points.len();
    let colored = &mesh.vertex_colors;
    mesh.points
        .retain(|id, _| used.contains(id) || colored.contains_key(id));
    let removed = before - mesh.points.len();
    trace!(removed, "removed orphaned points");
    removed
}

/// Merges points lying within `tolerance` of an earlier point on every
/// axis, remapping line and triangle references to the surviving id.
///
/// Points are visited in ascending id order; the first of a group survives.
pub fn remove_duplicate_points(mesh: &mut MeshData, tolerance: f64) -> usize {
    let mut unique: Vec<(PointId, Point3)> = Vec::with_capacity(mesh.points.len());
    let mut remap: BTreeMap<PointId, PointId> = BTreeMap::new();

    for (&id, position) in &mesh.points {
        match unique
            .iter()
            .find(|(_, kept)| points_within_tolerance(position, kept, tolerance))
        {
            Some(&(kept_id, _)) => {
                remap.insert(id, kept_id);
            }
            None => unique.push((id, *position)),
        }
    }

    if remap.is_empty() {
        return 0;
    }

    mesh.points.retain(|id, _| !remap.contains_key(id));
    let resolve = |id: PointId| remap.get(&id).copied().unwrap_or(id);
    for line in mesh.lines.values_mut() {
        *line = line.map_points(resolve);
    }
    for tri in mesh.triangles.values_mut() {
        *tri = tri.map_points(resolve);
    }

    trace!(merged = remap.len(), tolerance, "merged duplicate points");
    remap.len()
}

/// Removes normal, UV and vertex-color entries whose point is gone.
pub fn remove_orphaned_point_overlays(mesh: &mut MeshData) -> usize {
    let points = &mesh.points;
    let before = mesh.normals.len() + mesh.uvs.len() + mesh.vertex_colors.len();
    mesh.normals.retain(|id, _| points.contains_key(id));
    mesh.uvs.retain(|id, _| points.contains_key(id));
    mesh.vertex_colors.retain(|id, _| points.contains_key(id));
    let removed = before - (mesh.normals.len() + mesh.uvs.len() + mesh.vertex_colors.len());
    trace!(removed, "removed orphaned point overlays");
    removed
}

/// Removes lines with an endpoint that is not a current point.
pub fn remove_orphaned_lines(mesh: &mut MeshData) -> usize {
    let points = &mesh.points;
    let before = mesh.lines.len();
    mesh.lines
        .retain(|_, line| line.points().all(|id| points.contains_key(&id)));
    let removed = before - mesh.lines.len();
    trace!(removed, "removed orphaned lines");
    removed
}

/// Removes lines whose unordered endpoint pair was already seen.
pub fn remove_duplicate_lines(mesh: &mut MeshData) -> usize {
    let mut seen = HashSet::new();
    let before = mesh.lines.len();
    mesh.lines.retain(|_, line| seen.insert(line.unordered_key()));
    let removed = before - mesh.lines.len();
    trace!(removed, "removed duplicate lines");
    removed
}

/// Removes line colors whose line is gone.
pub fn remove_orphaned_line_colors(mesh: &mut MeshData) -> usize {
    let lines = &mesh.lines;
    let before = mesh.line_colors.len();
    mesh.line_colors.retain(|id, _| lines.contains_key(id));
    let removed = before - mesh.line_colors.len();
    trace!(removed, "removed orphaned line colors");
    removed
}

/// Removes triangles with a corner that is not a current point.
pub fn remove_orphaned_triangles(mesh: &mut MeshData) -> usize {
    let points = &mesh.points;
    let before = mesh.triangles.len();
    mesh.triangles
        .retain(|_, tri| tri.points().all(|id| points.contains_key(&id)));
    let removed = before - mesh.triangles.len();
    trace!(removed, "removed orphaned triangles");
    removed
}

/// Removes triangles whose sorted corner triple was already seen.
pub fn remove_duplicate_triangles(mesh: &mut MeshData) -> usize {
    let mut seen = HashSet::new();
    let before = mesh.triangles.len();
    mesh.triangles.retain(|_, tri| seen.insert(tri.sorted_key()));
    let removed = before - mesh.triangles.len();
    trace!(removed, "removed duplicate triangles");
    removed
}

/// Removes triangle colors whose triangle is gone.
pub fn remove_orphaned_triangle_colors(mesh: &mut MeshData) -> usize {
    let triangles = &mesh.triangles;
    let before = mesh.triangle_colors.len();
    mesh.triangle_colors.retain(|id, _| triangles.contains_key(id));
    let removed = before - mesh.triangle_colors.len();
    trace!(removed, "removed orphaned triangle colors");
    removed
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::color::ColorRgb;
    use crate::math::Vector3;
    use crate::mesh::{LineId, MeshLine, MeshTriangle, TriangleId};

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn quad() -> (MeshData, [PointId; 4]) {
        let mut mesh = MeshData::new();
        let ids = [
            mesh.add_point(p(0.0, 0.0, 0.0)),
            mesh.add_point(p(1.0, 0.0, 0.0)),
            mesh.add_point(p(1.0, 1.0, 0.0)),
            mesh.add_point(p(0.0, 1.0, 0.0)),
        ];
        mesh.add_line(ids[0], ids[1]);
        mesh.add_line(ids[1], ids[2]);
        mesh.add_line(ids[2], ids[3]);
        mesh.add_line(ids[3], ids[0]);
        mesh.add_triangle(ids[0], ids[1], ids[2]);
        mesh.add_triangle(ids[0], ids[2], ids[3]);
        (mesh, ids)
    }

    #[test]
    fn clean_mesh_is_untouched() {
        let (mut mesh, _) = quad();
        let before = mesh.clone();
        assert!(MakeValid::new().execute(&mut mesh).is_clean());
        assert_eq!(mesh, before);
    }

    #[test]
    fn unreferenced_point_is_removed_unless_colored() {
        let (mut mesh, _) = quad();
        let loose = mesh.add_point(p(5.0, 5.0, 5.0));
        let painted = mesh.add_point(p(6.0, 6.0, 6.0));
        mesh.set_vertex_color(painted, ColorRgb::BLACK).unwrap();
        mesh.set_normal(loose, Vector3::x()).unwrap();

        let report = MakeValid::new().execute(&mut mesh);

        assert_eq!(report.orphaned_points, 1);
        assert_eq!(report.orphaned_point_overlays, 1);
        assert!(!mesh.contains_point(loose));
        assert!(mesh.contains_point(painted));
        assert!(mesh.normal(loose).is_none());
    }

    #[test]
    fn duplicate_points_merge_into_first() {
        let mut mesh = MeshData::new();
        let a = mesh.add_point(p(0.0, 0.0, 0.0));
        let b = mesh.add_point(p(1.0, 0.0, 0.0));
        let a2 = mesh.add_point(p(0.0, 0.0, 1e-9));
        let c = mesh.add_point(p(0.0, 1.0, 0.0));
        mesh.set_uv(a2, crate::math::Point2::new(1.0, 1.0)).unwrap();
        mesh.add_line(a, c);
        let line = mesh.add_line(a2, b);
        let tri = mesh.add_triangle(a2, b, c);

        let report = MakeValid::new().execute(&mut mesh);

        assert_eq!(report.merged_points, 1);
        assert!(!mesh.contains_point(a2));
        assert_eq!(mesh.line(line).unwrap(), &MeshLine::new(a, b));
        assert_eq!(mesh.triangle(tri).unwrap(), &MeshTriangle::new(a, b, c));
        assert!(mesh.uv(a2).is_none());
    }

    #[test]
    fn merging_can_be_disabled() {
        let mut mesh = MeshData::new();
        let a = mesh.add_point(p(0.0, 0.0, 0.0));
        let b = mesh.add_point(p(0.0, 0.0, 0.0));
        mesh.add_line(a, b);

        let params = ValidityParams::default().with_merge_duplicate_points(false);
        let report = MakeValid::new().with_params(params).execute(&mut mesh);

        assert_eq!(report.merged_points, 0);
        assert_eq!(mesh.point_count(), 2);
    }

    #[test]
    fn merge_creates_duplicate_lines_that_are_then_removed() {
        let mut mesh = MeshData::new();
        let a = mesh.add_point(p(0.0, 0.0, 0.0));
        let b = mesh.add_point(p(1.0, 0.0, 0.0));
        let b2 = mesh.add_point(p(1.0, 0.0, 0.0));
        mesh.add_line(a, b);
        let dup = mesh.add_line(b2, a);
        mesh.set_line_color(dup, ColorRgb::BLACK, ColorRgb::BLACK);

        let report = MakeValid::new().execute(&mut mesh);

        assert_eq!(report.merged_points, 1);
        assert_eq!(report.duplicate_lines, 1);
        assert_eq!(report.orphaned_line_colors, 1);
        assert_eq!(mesh.line_count(), 1);
    }

    #[test]
    fn broken_references_are_removed_with_their_colors() {
        let (mut mesh, ids) = quad();
        let bad_line = mesh.add_line(ids[0], PointId(99));
        mesh.set_line_color(bad_line, ColorRgb::BLACK, ColorRgb::BLACK);
        let bad_tri = mesh.add_triangle(ids[0], ids[1], PointId(42));
        mesh.set_triangle_color(bad_tri, ColorRgb::BLACK);
        mesh.set_triangle_color(TriangleId(500), ColorRgb::BLACK);
        mesh.set_line_color(LineId(500), ColorRgb::BLACK, ColorRgb::BLACK);

        let report = MakeValid::new().execute(&mut mesh);

        assert_eq!(report.orphaned_lines, 1);
        assert_eq!(report.orphaned_triangles, 1);
        assert_eq!(report.orphaned_line_colors, 2);
        assert_eq!(report.orphaned_triangle_colors, 2);
        assert_eq!(mesh.line_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn dangling_line_does_not_keep_its_endpoint_alive() {
        let mut mesh = MeshData::new();
        let a = mesh.add_point(p(0.0, 0.0, 0.0));
        mesh.add_line(a, PointId(99));

        MakeValid::new().execute(&mut mesh);
        let once = mesh.clone();
        let report = MakeValid::new().execute(&mut mesh);

        assert_eq!(once.point_count(), 0);
        assert_eq!(once.line_count(), 0);
        assert!(report.is_clean());
    }

    #[test]
    fn duplicate_topology_keeps_first_seen() {
        let (mut mesh, ids) = quad();
        let dup_line = mesh.add_line(ids[1], ids[0]);
        let dup_tri = mesh.add_triangle(ids[2], ids[0], ids[1]);

        let report = MakeValid::new().execute(&mut mesh);

        assert_eq!(report.duplicate_lines, 1);
        assert_eq!(report.duplicate_triangles, 1);
        assert!(!mesh.contains_line(dup_line));
        assert!(!mesh.contains_triangle(dup_tri));
        assert!(mesh.contains_line(LineId(0)));
        assert!(mesh.contains_triangle(TriangleId(0)));
    }

    #[test]
    fn params_load_from_json() {
        let params: ValidityParams = serde_json::from_str(r#"{ "tolerance": 0.5 }"#).unwrap();
        assert!((params.tolerance - 0.5).abs() < f64::EPSILON);
        assert!(params.merge_duplicate_points);
    }
}
