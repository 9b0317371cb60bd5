use csscolorparser::Color;

use super::{hex, Srgb};
use crate::error::{FormatError, FormatErrorKind};

/// Parse a palette color value into opaque sRGB.
///
/// `#rrggbb` / `rrggbb` go through the strict hex decoder, so a malformed
/// 6-digit hex is still a `FormatError`. `#rgb` shorthand is expanded. Any
/// other CSS notation (rgb(), hsl(), named colors, ...) is handed to
/// csscolorparser. Translucent colors and keywords like `transparent` or
/// `currentColor` are rejected: they have no contrast on their own.
pub fn parse_color(value: &str) -> Result<Srgb, FormatError> {
    let trimmed = value.trim();

    match trimmed.to_ascii_lowercase().as_str() {
        "transparent" | "inherit" | "currentcolor" | "initial" | "unset" => {
            return Err(FormatError::new(value, FormatErrorKind::Unsupported));
        }
        _ => {}
    }

    if let Some(raw) = trimmed.strip_prefix('#') {
        match raw.len() {
            6 => return hex::decode(trimmed),
            3 => {
                let expanded: String = raw.chars().flat_map(|c| [c, c]).collect();
                return hex::decode(&expanded)
                    .map_err(|e| FormatError::new(value, e.kind));
            }
            // #rgba / #rrggbbaa go to csscolorparser for the alpha check
            4 | 8 => {}
            // all hex digits but a length no CSS form uses
            _ if raw.bytes().all(|b| b.is_ascii_hexdigit()) => return hex::decode(trimmed),
            _ => {}
        }
    } else if trimmed.len() == 6 && trimmed.bytes().all(|b| b.is_ascii_hexdigit()) {
        return hex::decode(trimmed);
    }

    match trimmed.parse::<Color>() {
        Ok(color) => {
            let [r, g, b, a] = color.to_rgba8();
            if a < 255 {
                Err(FormatError::new(value, FormatErrorKind::Unsupported))
            } else {
                Ok(Srgb { r, g, b })
            }
        }
        Err(_) => Err(FormatError::new(value, FormatErrorKind::Unsupported)),
    }
}

/// Parse any accepted color value and return it as `#rrggbb`.
pub fn to_hex(value: &str) -> Result<String, FormatError> {
    parse_color(value).map(hex::encode)
}
