use std::fmt;
use std::str::FromStr;

use super::PointId;
use crate::color::ColorRgb;
use crate::error::FormatError;

/// A triangle over three points, referenced by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshTriangle {
    pub a: PointId,
    pub b: PointId,
    pub c: PointId,
}

impl MeshTriangle {
    #[must_use]
    pub fn new(a: PointId, b: PointId, c: PointId) -> Self {
        Self { a, b, c }
    }

    /// Returns the corners sorted ascending, identifying the triangle
    /// regardless of rotation or winding.
    #[must_use]
    pub fn sorted_key(&self) -> [PointId; 3] {
        let mut key = [self.a, self.b, self.c];
        key.sort_unstable();
        key
    }

    /// Returns the triangle with each corner passed through `f`.
    #[must_use]
    pub fn map_points(self, mut f: impl FnMut(PointId) -> PointId) -> Self {
        Self::new(f(self.a), f(self.b), f(self.c))
    }

    /// Returns an iterator over the three corners.
    pub fn points(&self) -> impl Iterator<Item = PointId> {
        [self.a, self.b, self.c].into_iter()
    }
}

impl fmt::Display for MeshTriangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.a, self.b, self.c)
    }
}

impl FromStr for MeshTriangle {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ids = super::parse_ids::<3>(s).ok_or_else(|| FormatError::record("triangle", s))?;
        Ok(Self::new(ids[0], ids[1], ids[2]))
    }
}

/// Formats a triangle color as `"color: #RGB"`.
#[must_use]
pub fn format_triangle_color(color: ColorRgb) -> String {
    format!("color: {color}")
}

/// Parses a `"color: #RGB"` string.
///
/// # Errors
///
/// Returns a [`FormatError`] if the label is missing or the color is invalid.
pub fn parse_triangle_color(s: &str) -> Result<ColorRgb, FormatError> {
    super::line::labelled_value(s, "color")
        .ok_or_else(|| FormatError::record("triangle color", s))?
        .parse()
}
