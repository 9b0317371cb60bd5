//! Plain structs passed across the JS boundary.
//!
//! With the `napi` feature these become JS objects; without it they are
//! ordinary serde types for Rust callers.

use serde::{Deserialize, Serialize};

/// OKHSL triple as a JS object.
#[cfg_attr(feature = "napi", napi(object))]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OkhslColor {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl From<crate::math::Okhsl> for OkhslColor {
    fn from(c: crate::math::Okhsl) -> Self {
        Self { h: c.h, s: c.s, l: c.l }
    }
}

impl From<OkhslColor> for crate::math::Okhsl {
    fn from(c: OkhslColor) -> Self {
        crate::math::Okhsl::new(c.h, c.s, c.l)
    }
}

/// One palette row as the UI renders it.
#[cfg_attr(feature = "napi", napi(object))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryScore {
    pub id: String,
    /// Current color, `#rrggbb`
    pub hex: String,
    pub original_hex: String,
    pub color: OkhslColor,
    pub slider_position: u32,
    /// Contrast against the background, rounded to 2 decimals.
    pub ratio: f64,
    /// e.g. "4.48:1"
    pub ratio_text: String,
    pub pass_aa: bool,
    pub pass_aa_large: bool,
    pub pass_aaa: bool,
    pub pass_aaa_large: bool,
    /// Passes the requested threshold for the requested text size.
    pub meets_threshold: bool,
    pub modified: bool,
}

/// Scoring of a whole palette against its background.
#[cfg_attr(feature = "napi", napi(object))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    pub background_hex: String,
    pub threshold: String,
    pub entries: Vec<EntryScore>,
    pub failing_count: u32,
}

/// Scoring options as sent from JS; missing fields take the defaults.
#[cfg_attr(feature = "napi", napi(object))]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreOptionsJs {
    /// "AA" | "AAA"
    pub threshold: Option<String>,
    pub large_text: Option<bool>,
}

/// Two decimals and a `:1` suffix, the way contrast is usually shown.
pub fn format_ratio(ratio: f64) -> String {
    format!("{ratio:.2}:1")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_ratio_two_decimals() {
        assert_eq!(format_ratio(21.0), "21.00:1");
        assert_eq!(format_ratio(4.478089), "4.48:1");
        assert_eq!(format_ratio(1.0), "1.00:1");
    }

    #[test]
    fn okhsl_conversion_roundtrip() {
        let c = crate::math::Okhsl::new(0.1, 0.2, 0.3);
        let js: OkhslColor = c.into();
        assert_eq!(crate::math::Okhsl::from(js), c);
    }

    #[test]
    fn score_options_use_camel_case() {
        let json = serde_json::to_value(ScoreOptionsJs {
            threshold: Some("AAA".to_string()),
            large_text: Some(true),
        })
        .unwrap();
        assert_eq!(json["largeText"], true);
    }

    #[test]
    fn entry_score_serializes_camel_case() {
        let score = EntryScore {
            id: "muted".to_string(),
            hex: "#777777".to_string(),
            original_hex: "#777777".to_string(),
            color: OkhslColor {
                h: 0.0,
                s: 0.0,
                l: 0.5,
            },
            slider_position: 250,
            ratio: 4.48,
            ratio_text: format_ratio(4.478),
            pass_aa: false,
            pass_aa_large: true,
            pass_aaa: false,
            pass_aaa_large: false,
            meets_threshold: false,
            modified: false,
        };
        let json = serde_json::to_value(&score).unwrap();
        assert_eq!(json["originalHex"], "#777777");
        assert_eq!(json["sliderPosition"], 250);
        assert_eq!(json["ratioText"], "4.48:1");
        assert_eq!(json["passAaLarge"], true);
        assert_eq!(json["meetsThreshold"], false);
        assert_eq!(json["color"]["l"], 0.5);
        assert!(json.get("original_hex").is_none());
    }
}
