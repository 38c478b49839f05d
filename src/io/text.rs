//! Human-readable vector strings such as `"X:1.000, Y:2.000, Z:3.000"`.

use std::fmt::Write as _;

use crate::error::FormatError;
use crate::math::{Point2, Point3, Vector3};

const XYZ: [&str; 3] = ["X", "Y", "Z"];
const XY: [&str; 2] = ["X", "Y"];

fn format_labelled(values: &[f64], labels: &[&str], decimals: usize) -> String {
    let mut out = String::new();
    for (i, (label, value)) in labels.iter().zip(values).enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{label}:{value:.decimals$}");
    }
    out
}

fn parse_labelled<const N: usize>(s: &str, labels: [&str; N]) -> Result<[f64; N], FormatError> {
    let invalid = || FormatError::InvalidVector(s.to_owned());
    let mut values = [0.0; N];
    let mut parts = s.split(',');
    for (slot, label) in values.iter_mut().zip(labels) {
        let (name, value) = parts.next().ok_or_else(invalid)?.split_once(':').ok_or_else(invalid)?;
        if !name.trim().eq_ignore_ascii_case(label) {
            return Err(invalid());
        }
        *slot = value.trim().parse().map_err(|_| invalid())?;
    }
    if parts.next().is_some() {
        return Err(invalid());
    }
    Ok(values)
}

/// Formats a position as `"X:.., Y:.., Z:.."` with `decimals` places.
#[must_use]
pub fn format_point(p: &Point3, decimals: usize) -> String {
    format_labelled(&[p.x, p.y, p.z], &XYZ, decimals)
}

/// Formats a direction as `"X:.., Y:.., Z:.."` with `decimals` places.
#[must_use]
pub fn format_vector(v: &Vector3, decimals: usize) -> String {
    format_labelled(&[v.x, v.y, v.z], &XYZ, decimals)
}

/// Formats a texture coordinate as `"X:.., Y:.."` with `decimals` places.
#[must_use]
pub fn format_uv(uv: &Point2, decimals: usize) -> String {
    format_labelled(&[uv.x, uv.y], &XY, decimals)
}

/// Parses a `"X:.., Y:.., Z:.."` string into a position.
///
/// # Errors
///
/// Returns [`FormatError::InvalidVector`] for a wrong field count, wrong
/// labels or unparsable numbers.
pub fn parse_point(s: &str) -> Result<Point3, FormatError> {
    let [x, y, z] = parse_labelled(s, XYZ)?;
    Ok(Point3::new(x, y, z))
}

/// Parses a `"X:.., Y:.., Z:.."` string into a direction.
///
/// # Errors
///
/// Returns [`FormatError::InvalidVector`] as for [`parse_point`].
pub fn parse_vector(s: &str) -> Result<Vector3, FormatError> {
    parse_point(s).map(|p| p.coords)
}

/// Parses a `"X:.., Y:.."` string into a texture coordinate.
///
/// # Errors
///
/// Returns [`FormatError::InvalidVector`] as for [`parse_point`].
pub fn parse_uv(s: &str) -> Result<Point2, FormatError> {
    let [x, y] = parse_labelled(s, XY)?;
    Ok(Point2::new(x, y))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn formats_with_fixed_decimals() {
        assert_eq!(format_point(&Point3::new(1.0, -2.5, 0.0), 3), "X:1.000, Y:-2.500, Z:0.000");
        assert_eq!(format_uv(&Point2::new(0.25, 1.0), 4), "X:0.2500, Y:1.0000");
    }

    #[test]
    fn parses_with_loose_spacing() {
        let p = parse_point("x: 1.5 ,Y:2,  Z :-3e2").unwrap();
        assert_relative_eq!(p, Point3::new(1.5, 2.0, -300.0));
        assert_relative_eq!(parse_uv("X:1.0, Y:2.0").unwrap(), Point2::new(1.0, 2.0));
    }

    #[test]
    fn rejects_malformed_vectors() {
        assert!(parse_point("").is_err());
        assert!(parse_point("X:1, Y:2").is_err());
        assert!(parse_point("X:1, Y:2, Z:3, W:4").is_err());
        assert!(parse_point("X:1, Z:2, Y:3").is_err());
        assert!(parse_point("X:1, Y:two, Z:3").is_err());
        assert!(parse_uv("1.0, 2.0").is_err());
    }
}
