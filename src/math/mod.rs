/// 2D point type, used for texture coordinates.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 4x4 transformation matrix.
pub type Matrix4 = nalgebra::Matrix4<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Returns `true` if `a` and `b` differ by at most `tolerance`.
#[must_use]
pub fn equals_within_tolerance(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}

/// Component-wise tolerance comparison of two points.
#[must_use]
pub fn points_within_tolerance(a: &Point3, b: &Point3, tolerance: f64) -> bool {
    equals_within_tolerance(a.x, b.x, tolerance)
        && equals_within_tolerance(a.y, b.y, tolerance)
        && equals_within_tolerance(a.z, b.z, tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerance_is_inclusive() {
        assert!(equals_within_tolerance(1.0, 1.5, 0.5));
        assert!(!equals_within_tolerance(1.0, 1.5001, 0.5));
    }

    #[test]
    fn negative_tolerance_never_matches() {
        assert!(!equals_within_tolerance(1.0, 1.0, -1.0));
    }

    #[test]
    fn points_compare_per_axis() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(0.1, -0.1, 0.1);
        assert!(points_within_tolerance(&a, &b, 0.1 + TOLERANCE));
        assert!(!points_within_tolerance(&a, &Point3::new(0.0, 0.0, 0.2), 0.1));
    }
}
