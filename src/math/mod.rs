//! Pure color math: hex codec, WCAG luminance/contrast and OKHSL conversion.
//!
//! Everything in here is stateless and allocation-free apart from hex
//! strings, so it is safe to call from any thread.

pub mod checker;
pub mod color_parse;
pub mod hex;
pub mod okhsl;
pub mod oklab;
pub mod wcag;

use serde::{Deserialize, Serialize};

/// 8-bit-per-channel gamma-encoded sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Srgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Srgb {
    pub const BLACK: Srgb = Srgb::new(0, 0, 0);
    pub const WHITE: Srgb = Srgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn is_gray(self) -> bool {
        self.r == self.g && self.g == self.b
    }
}

impl From<(u8, u8, u8)> for Srgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

impl From<Srgb> for (u8, u8, u8) {
    fn from(c: Srgb) -> Self {
        (c.r, c.g, c.b)
    }
}

/// OKHSL color. `h` is a fraction of a full turn in [0, 1), `s` and `l` are in
/// [0, 1]. Saturation may exceed 1 by a fraction of a percent for colors that
/// sit on the sRGB gamut boundary, because the boundary itself is approximated.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Okhsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Okhsl {
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Same hue and saturation, lightness replaced (clamped to [0, 1]).
    pub fn with_lightness(self, l: f64) -> Self {
        Self {
            l: if l.is_nan() { 0.0 } else { l.clamp(0.0, 1.0) },
            ..self
        }
    }
}

pub use checker::{check_contrast, ratio_from_colors, ContrastCheck};
pub use hex::{decode, encode, normalize};
pub use okhsl::{from_srgb, to_srgb};
pub use wcag::{contrast_ratio, relative_luminance};
