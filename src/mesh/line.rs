use std::fmt;
use std::str::FromStr;

use super::PointId;
use crate::color::ColorRgb;
use crate::error::FormatError;

/// A line segment between two points, referenced by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshLine {
    /// Start point.
    pub a: PointId,
    /// End point.
    pub b: PointId,
}

impl MeshLine {
    #[must_use]
    pub fn new(a: PointId, b: PointId) -> Self {
        Self { a, b }
    }

    /// Returns the endpoints as an order-independent key.
    #[must_use]
    pub fn unordered_key(&self) -> (PointId, PointId) {
        (self.a.min(self.b), self.a.max(self.b))
    }

    /// Returns the line with each endpoint passed through `f`.
    #[must_use]
    pub fn map_points(self, mut f: impl FnMut(PointId) -> PointId) -> Self {
        Self::new(f(self.a), f(self.b))
    }

    /// Returns an iterator over both endpoints.
    pub fn points(&self) -> impl Iterator<Item = PointId> {
        [self.a, self.b].into_iter()
    }
}

impl fmt::Display for MeshLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.a, self.b)
    }
}

impl FromStr for MeshLine {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ids = super::parse_ids::<2>(s).ok_or_else(|| FormatError::record("line", s))?;
        Ok(Self::new(ids[0], ids[1]))
    }
}

/// Colors at the start and end of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LineColor {
    pub start: ColorRgb,
    pub end: ColorRgb,
}

impl LineColor {
    #[must_use]
    pub fn new(start: ColorRgb, end: ColorRgb) -> Self {
        Self { start, end }
    }

    /// A line colored uniformly.
    #[must_use]
    pub fn uniform(color: ColorRgb) -> Self {
        Self::new(color, color)
    }
}

impl fmt::Display for LineColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "start: {}, end: {}", self.start, self.end)
    }
}

impl FromStr for LineColor {
    type Err = FormatError;

    /// Parses `"start: #RGB, end: #RGB"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FormatError::record("line color", s);
        let (start_part, end_part) = s.split_once(',').ok_or_else(invalid)?;
        let start = labelled_value(start_part, "start").ok_or_else(invalid)?;
        let end = labelled_value(end_part, "end").ok_or_else(invalid)?;
        Ok(Self::new(start.parse()?, end.parse()?))
    }
}

impl serde::Serialize for LineColor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for LineColor {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Returns the trimmed value of a `"label: value"` pair if the label matches.
pub(crate) fn labelled_value<'a>(part: &'a str, label: &str) -> Option<&'a str> {
    let (name, value) = part.split_once(':')?;
    name.trim()
        .eq_ignore_ascii_case(label)
        .then_some(value.trim())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn unordered_key_ignores_direction() {
        let l1 = MeshLine::new(PointId(3), PointId(1));
        let l2 = MeshLine::new(PointId(1), PointId(3));
        assert_eq!(l1.unordered_key(), l2.unordered_key());
    }

    #[test]
    fn line_text_form() {
        let line = MeshLine::new(PointId(4), PointId(7));
        assert_eq!(line.to_string(), "4, 7");
        assert_eq!(" 4 ,7 ".parse::<MeshLine>().unwrap(), line);
        assert!("4".parse::<MeshLine>().is_err());
        assert!("4, 7, 9".parse::<MeshLine>().is_err());
        assert!("a, b".parse::<MeshLine>().is_err());
    }

    #[test]
    fn line_color_text_form() {
        let color = LineColor::new(ColorRgb::WHITE, ColorRgb::rgb(255, 0, 0));
        let text = color.to_string();
        assert_eq!(text, "start: #FFF, end: #F00");
        assert_eq!(text.parse::<LineColor>().unwrap(), color);
        assert!("start: #FFF".parse::<LineColor>().is_err());
        assert!("begin: #FFF, end: #FFF".parse::<LineColor>().is_err());
        assert!("start: #FFF, end: nope".parse::<LineColor>().is_err());
    }
}
