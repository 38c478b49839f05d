mod hex;

pub use hex::{parse_hex, to_hex_long, to_hex_short};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::FormatError;

/// An 8-bit-per-channel RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorRgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ColorRgb {
    /// Fully transparent black.
    pub const ZERO: Self = Self::rgba(0, 0, 0, 0);
    /// Opaque white, the fallback color for every overlay.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Creates an opaque color from byte channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Creates a color from byte channels including alpha.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from unit-range float channels, clamping to `[0, 1]`.
    #[must_use]
    pub fn from_floats(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::rgba(
            float_to_byte(r),
            float_to_byte(g),
            float_to_byte(b),
            float_to_byte(a),
        )
    }

    /// Returns the channels as unit-range floats `[r, g, b, a]`.
    #[must_use]
    pub fn to_floats(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a].map(|c| f32::from(c) / 255.0)
    }

    /// Linearly interpolates between two colors.
    ///
    /// `t = 0` yields `self`, `t = 1` yields `other`; `t` is clamped.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let from = self.to_floats();
        let to = other.to_floats();
        let mix = |i: usize| from[i] + (to[i] - from[i]) * t;
        Self::from_floats(mix(0), mix(1), mix(2), mix(3))
    }
}

impl Default for ColorRgb {
    fn default() -> Self {
        Self::WHITE
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn float_to_byte(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl fmt::Display for ColorRgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_hex_short(*self))
    }
}

impl FromStr for ColorRgb {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex(s)
    }
}

impl Serialize for ColorRgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&to_hex_short(*self))
    }
}

impl<'de> Deserialize<'de> for ColorRgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_hex(&s).map_err(serde::de::Error::custom)
    }
}
