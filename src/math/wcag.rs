use serde::{Deserialize, Serialize};

use super::Srgb;

/// Convert sRGB channel (0-255) to linear light value.
/// WCAG 2.x threshold: if V <= 0.03928: V/12.92, else ((V+0.055)/1.055)^2.4
fn srgb_to_linear(channel: u8) -> f64 {
    let v = channel as f64 / 255.0;
    if v <= 0.03928 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// Calculate relative luminance per WCAG 2.1.
/// L = 0.2126 * R + 0.7152 * G + 0.0722 * B (linear channels)
pub fn relative_luminance(color: Srgb) -> f64 {
    0.2126 * srgb_to_linear(color.r)
        + 0.7152 * srgb_to_linear(color.g)
        + 0.0722 * srgb_to_linear(color.b)
}

/// WCAG 2.1 contrast ratio between two relative luminances.
/// ratio = (L1 + 0.05) / (L2 + 0.05) where L1 >= L2
pub fn contrast_ratio(l1: f64, l2: f64) -> f64 {
    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Conformance level a contrast ratio is judged against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WcagLevel {
    #[default]
    #[serde(rename = "AA", alias = "aa")]
    Aa,
    #[serde(rename = "AAA", alias = "aaa")]
    Aaa,
}

impl WcagLevel {
    /// Minimum ratio for this level.
    pub fn min_ratio(self, is_large_text: bool) -> f64 {
        match (self, is_large_text) {
            (WcagLevel::Aa, false) => 4.5,
            (WcagLevel::Aa, true) => 3.0,
            (WcagLevel::Aaa, false) => 7.0,
            (WcagLevel::Aaa, true) => 4.5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WcagLevel::Aa => "AA",
            WcagLevel::Aaa => "AAA",
        }
    }
}

impl std::str::FromStr for WcagLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AA" => Ok(WcagLevel::Aa),
            "AAA" => Ok(WcagLevel::Aaa),
            other => Err(format!("unknown WCAG level {other:?} (expected AA or AAA)")),
        }
    }
}

/// Determine pass/fail for all WCAG thresholds.
pub fn check_wcag_thresholds(ratio: f64, is_large_text: bool) -> WcagResult {
    if is_large_text {
        WcagResult {
            pass_aa: ratio >= 3.0,
            pass_aa_large: ratio >= 3.0,
            pass_aaa: ratio >= 4.5,
            pass_aaa_large: ratio >= 4.5,
        }
    } else {
        WcagResult {
            pass_aa: ratio >= 4.5,
            pass_aa_large: ratio >= 3.0,
            pass_aaa: ratio >= 7.0,
            pass_aaa_large: ratio >= 4.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WcagResult {
    pub pass_aa: bool,
    pub pass_aa_large: bool,
    pub pass_aaa: bool,
    pub pass_aaa_large: bool,
}

impl WcagResult {
    pub fn passes(&self, level: WcagLevel) -> bool {
        match level {
            WcagLevel::Aa => self.pass_aa,
            WcagLevel::Aaa => self.pass_aaa,
        }
    }
}
