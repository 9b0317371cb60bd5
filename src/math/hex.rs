use super::Srgb;
use crate::error::{FormatError, FormatErrorKind};

/// Parse `#rrggbb` or `rrggbb` (case-insensitive) into sRGB channels.
/// Anything other than exactly 6 hex digits after an optional `#` is an error.
pub fn decode(hex: &str) -> Result<Srgb, FormatError> {
    let raw = hex.strip_prefix('#').unwrap_or(hex);
    if raw.len() != 6 {
        return Err(FormatError::new(hex, FormatErrorKind::Length));
    }
    // from_str_radix accepts a leading '+', so validate digits up front.
    if !raw.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(FormatError::new(hex, FormatErrorKind::InvalidDigit));
    }

    let channel = |i: usize| {
        u8::from_str_radix(&raw[i..i + 2], 16)
            .map_err(|_| FormatError::new(hex, FormatErrorKind::InvalidDigit))
    };
    Ok(Srgb {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}

/// Format as lowercase `#rrggbb`.
pub fn encode(color: Srgb) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

/// Canonical form of a hex color: `#` prefixed, lowercase.
pub fn normalize(hex: &str) -> Result<String, FormatError> {
    decode(hex).map(encode)
}
