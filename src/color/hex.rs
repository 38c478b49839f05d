//! Hex-string encoding of [`ColorRgb`].
//!
//! Accepted inputs are 3 (`RGB`), 4 (`RGBA`), 6 (`RRGGBB`) or 8 (`RRGGBBAA`)
//! hex digits, with or without a leading `#`. Shorthand digits expand by
//! repetition, so `F` means `FF`. Alpha defaults to opaque when absent.

use std::fmt::Write as _;

use super::ColorRgb;
use crate::error::FormatError;

/// Formats a color in the shortest lossless hex form.
///
/// Opaque colors drop the alpha channel; colors whose channels are all
/// doubled nibbles (`0x00`, `0x11`, .., `0xFF`) use one digit per channel.
#[must_use]
pub fn to_hex_short(color: ColorRgb) -> String {
    let channels: &[u8] = if color.a == 255 {
        &[color.r, color.g, color.b]
    } else {
        &[color.r, color.g, color.b, color.a]
    };

    let mut out = String::with_capacity(9);
    out.push('#');
    if channels.iter().all(|c| c % 17 == 0) {
        for c in channels {
            let _ = write!(out, "{:X}", c / 17);
        }
    } else {
        for c in channels {
            let _ = write!(out, "{c:02X}");
        }
    }
    out
}

/// Formats a color as `#RRGGBBAA`.
#[must_use]
pub fn to_hex_long(color: ColorRgb) -> String {
    format!(
        "#{:02X}{:02X}{:02X}{:02X}",
        color.r, color.g, color.b, color.a
    )
}

/// Parses a 3/4/6/8-digit hex color string.
///
/// # Errors
///
/// Returns [`FormatError::InvalidColor`] for any other length or a
/// non-hex digit.
pub fn parse_hex(input: &str) -> Result<ColorRgb, FormatError> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    let invalid = || FormatError::InvalidColor(input.to_owned());

    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let nibble = |i: usize| -> Result<u8, FormatError> {
        u8::from_str_radix(&digits[i..=i], 16)
            .map(|n| n * 17)
            .map_err(|_| invalid())
    };
    let byte = |i: usize| -> Result<u8, FormatError> {
        u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16).map_err(|_| invalid())
    };

    match digits.len() {
        3 => Ok(ColorRgb::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
        4 => Ok(ColorRgb::rgba(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
        6 => Ok(ColorRgb::rgb(byte(0)?, byte(1)?, byte(2)?)),
        8 => Ok(ColorRgb::rgba(byte(0)?, byte(1)?, byte(2)?, byte(3)?)),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn short_form_picks_minimal_length() {
        assert_eq!(to_hex_short(ColorRgb::rgb(255, 0, 0)), "#F00");
        assert_eq!(to_hex_short(ColorRgb::rgba(255, 34, 17, 34)), "#F212");
        assert_eq!(to_hex_short(ColorRgb::rgba(255, 32, 16, 255)), "#FF2010");
        assert_eq!(to_hex_short(ColorRgb::rgba(250, 33, 17, 134)), "#FA211186");
    }

    #[test]
    fn long_form_always_has_alpha() {
        assert_eq!(to_hex_long(ColorRgb::WHITE), "#FFFFFFFF");
    }

    #[test]
    fn parses_every_length() {
        assert_eq!(parse_hex("F00").unwrap(), ColorRgb::rgb(255, 0, 0));
        assert_eq!(parse_hex("#F234").unwrap(), ColorRgb::rgba(255, 34, 51, 68));
        assert_eq!(parse_hex("FF2356").unwrap(), ColorRgb::rgb(255, 35, 86));
        assert_eq!(
            parse_hex("FA211086").unwrap(),
            ColorRgb::rgba(250, 33, 16, 134)
        );
        assert_eq!(parse_hex("  #abc ").unwrap(), ColorRgb::rgb(170, 187, 204));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_hex("").is_err());
        assert!(parse_hex("#12345").is_err());
        assert!(parse_hex("GGG").is_err());
        assert!(parse_hex("#+1F").is_err());
    }

    #[test]
    fn short_form_parses_back() {
        for color in [
            ColorRgb::ZERO,
            ColorRgb::WHITE,
            ColorRgb::rgba(1, 2, 3, 4),
            ColorRgb::rgba(17, 34, 51, 200),
        ] {
            assert_eq!(parse_hex(&to_hex_short(color)).unwrap(), color);
        }
    }
}
