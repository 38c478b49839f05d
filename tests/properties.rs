//! Property-based tests for reconciliation and serialization.
//!
//! Random meshes are built through the public mutation API, including
//! dangling references, near-duplicate points and ownerless overlays.
//!
//! Run with: cargo test --test properties

#![allow(clippy::unwrap_used)]

use std::collections::{HashMap, HashSet};

use meshdata::io::{from_bytes, from_json, to_bytes, to_json, BinaryOptions, JsonOptions};
use meshdata::math::{Point3, Vector3};
use meshdata::mesh::{LineId, MeshData, PointId, TriangleId};
use meshdata::operations::{FullyPopulate, MakeValid};
use meshdata::ColorRgb;
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// Positions on a coarse half-unit grid so coincident points are common.
fn arb_position() -> impl Strategy<Value = Point3> {
    prop::array::uniform3(-2i8..=2).prop_map(|[x, y, z]| {
        Point3::new(f64::from(x) * 0.5, f64::from(y) * 0.5, f64::from(z) * 0.5)
    })
}

/// A mesh assembled from random edits. Point references range a little past
/// the points that exist, and some points are removed afterwards.
fn arb_mesh() -> impl Strategy<Value = MeshData> {
    (
        prop::collection::vec(arb_position(), 0..12),
        prop::collection::vec(prop::array::uniform2(-1i32..14), 0..16),
        prop::collection::vec(prop::array::uniform3(-1i32..14), 0..16),
        prop::collection::vec(0i32..12, 0..4),
        prop::collection::vec(0i32..14, 0..6),
        prop::collection::vec(0i32..20, 0..6),
    )
        .prop_map(|(positions, lines, triangles, removed, colored, line_colors)| {
            let mut mesh = MeshData::with_name("random");
            for position in positions {
                let id = mesh.add_point(position);
                mesh.set_normal(id, Vector3::x()).unwrap();
            }
            for [a, b] in lines {
                mesh.add_line(PointId(a), PointId(b));
            }
            for [a, b, c] in triangles {
                let tri = mesh.add_triangle(PointId(a), PointId(b), PointId(c));
                mesh.set_triangle_color(tri, ColorRgb::rgb(0, 0, 255));
            }
            for id in colored {
                if mesh.contains_point(PointId(id)) {
                    mesh.set_vertex_color(PointId(id), ColorRgb::BLACK).unwrap();
                }
            }
            for id in line_colors {
                mesh.set_line_color(LineId(id), ColorRgb::WHITE, ColorRgb::BLACK);
            }
            for id in removed {
                mesh.remove_point(PointId(id));
            }
            mesh
        })
}

fn counts(mesh: &MeshData) -> [usize; 3] {
    [mesh.point_count(), mesh.line_count(), mesh.triangle_count()]
}

// =============================================================================
// MakeValid
// =============================================================================

proptest! {
    #[test]
    fn proptest_make_valid_is_idempotent(mut mesh in arb_mesh()) {
        MakeValid::new().execute(&mut mesh);
        let once = mesh.clone();

        let report = MakeValid::new().execute(&mut mesh);

        prop_assert!(report.is_clean(), "second run removed {:?}", report);
        prop_assert_eq!(mesh, once);
    }

    #[test]
    fn proptest_make_valid_never_grows(mut mesh in arb_mesh()) {
        let before = counts(&mesh);
        MakeValid::new().execute(&mut mesh);
        let after = counts(&mesh);

        for (b, a) in before.iter().zip(&after) {
            prop_assert!(a <= b);
        }
    }

    #[test]
    fn proptest_make_valid_leaves_no_broken_references(mut mesh in arb_mesh()) {
        MakeValid::new().execute(&mut mesh);

        for (_, line) in mesh.lines() {
            prop_assert!(mesh.contains_point(line.a) && mesh.contains_point(line.b));
        }
        for (_, tri) in mesh.triangles() {
            prop_assert!(tri.points().all(|id| mesh.contains_point(id)));
        }
        for (id, _) in mesh.normals() {
            prop_assert!(mesh.contains_point(id));
        }
        for (id, _) in mesh.vertex_colors() {
            prop_assert!(mesh.contains_point(id));
        }
        for (id, _) in mesh.line_colors() {
            prop_assert!(mesh.contains_line(id));
        }
        for (id, _) in mesh.triangle_colors() {
            prop_assert!(mesh.contains_triangle(id));
        }
    }

    #[test]
    fn proptest_make_valid_leaves_no_duplicates(mut mesh in arb_mesh()) {
        MakeValid::new().execute(&mut mesh);

        let mut lines = HashSet::new();
        for (_, line) in mesh.lines() {
            prop_assert!(lines.insert(line.unordered_key()));
        }
        let mut triangles = HashSet::new();
        for (_, tri) in mesh.triangles() {
            prop_assert!(triangles.insert(tri.sorted_key()));
        }
        let positions: Vec<_> = mesh.points().map(|(_, p)| *p).collect();
        for (i, a) in positions.iter().enumerate() {
            for b in &positions[i + 1..] {
                prop_assert!(a != b);
            }
        }
    }
}

// =============================================================================
// FullyPopulate
// =============================================================================

proptest! {
    #[test]
    fn proptest_fully_populate_is_complete_and_idempotent(mut mesh in arb_mesh()) {
        let normals_before: HashMap<_, _> = mesh.normals().map(|(id, n)| (id, *n)).collect();

        FullyPopulate::new().execute(&mut mesh);

        for (id, _) in mesh.points() {
            prop_assert!(mesh.normal(id).is_some());
            prop_assert!(mesh.uv(id).is_some());
            prop_assert!(mesh.vertex_color(id).is_some());
        }
        for (id, _) in mesh.lines() {
            prop_assert!(mesh.line_color(id).is_some());
        }
        for (id, _) in mesh.triangles() {
            prop_assert!(mesh.triangle_color(id).is_some());
        }
        for (id, normal) in normals_before {
            prop_assert_eq!(mesh.normal(id), Some(&normal));
        }

        let populated = mesh.clone();
        prop_assert_eq!(FullyPopulate::new().execute(&mut mesh).total(), 0);
        prop_assert_eq!(mesh, populated);
    }
}

// =============================================================================
// Serialization
// =============================================================================

proptest! {
    #[test]
    fn proptest_binary_round_trip_keeps_order(mut mesh in arb_mesh()) {
        mesh.make_valid();
        mesh.fully_populate();

        let options = BinaryOptions::default();
        let back = from_bytes(&to_bytes(&mesh, &options).unwrap(), &options).unwrap();

        prop_assert_eq!(counts(&back), counts(&mesh));
        prop_assert!(back.points().map(|(_, p)| *p).eq(mesh.points().map(|(_, p)| *p)));

        let ordinal: HashMap<PointId, PointId> =
            mesh.points().zip(0..).map(|((id, _), i)| (id, PointId(i))).collect();
        for ((_, original), (_, decoded)) in mesh.lines().zip(back.lines()) {
            prop_assert_eq!(original.map_points(|id| ordinal[&id]), *decoded);
        }
        for ((_, original), (_, decoded)) in mesh.triangles().zip(back.triangles()) {
            prop_assert_eq!(original.map_points(|id| ordinal[&id]), *decoded);
        }
        prop_assert_eq!(back.line_color_count(), mesh.line_count());
        prop_assert_eq!(back.triangle_color(TriangleId(0)).is_some(), mesh.triangle_count() > 0);
    }

    #[test]
    fn proptest_json_round_trip_keeps_ids(mut mesh in arb_mesh()) {
        mesh.make_valid();
        let back = from_json(&to_json(&mesh, &JsonOptions::default()).unwrap()).unwrap();
        prop_assert_eq!(back.records(), mesh.records());
    }
}
