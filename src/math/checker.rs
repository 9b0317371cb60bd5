use serde::{Deserialize, Serialize};

use super::okhsl::to_srgb;
use super::wcag::{check_wcag_thresholds, contrast_ratio, relative_luminance, WcagLevel, WcagResult};
use super::Okhsl;

/// WCAG contrast ratio between two OKHSL colors, each rendered to 8-bit sRGB
/// first (the ratio the user actually sees on screen).
pub fn ratio_from_colors(hsl1: Okhsl, hsl2: Okhsl) -> f64 {
    contrast_ratio(
        relative_luminance(to_srgb(hsl1)),
        relative_luminance(to_srgb(hsl2)),
    )
}

/// Contrast of one foreground against a background, with pass/fail flags.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastCheck {
    /// Unrounded ratio, in [1, 21].
    pub ratio: f64,
    /// Ratio rounded to 2 decimals; thresholds are judged on `ratio`.
    pub ratio_rounded: f64,
    pub is_large_text: bool,
    pub wcag: WcagResult,
}

impl ContrastCheck {
    pub fn passes(&self, level: WcagLevel) -> bool {
        self.wcag.passes(level)
    }
}

/// Check contrast for a single foreground/background pair.
pub fn check_contrast(fg: Okhsl, bg: Okhsl, is_large_text: bool) -> ContrastCheck {
    let ratio = ratio_from_colors(fg, bg);
    ContrastCheck {
        ratio,
        ratio_rounded: (ratio * 100.0).round() / 100.0,
        is_large_text,
        wcag: check_wcag_thresholds(ratio, is_large_text),
    }
}
