use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::math::checker::check_contrast;
use crate::math::wcag::WcagLevel;
use crate::math::Okhsl;
use crate::palette::{lightness_to_slider, Palette, PaletteEntry};
use crate::types::{format_ratio, EntryScore, ScoreOptionsJs, ScoreReport};

/// How palette entries are judged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoreOptions {
    pub threshold: WcagLevel,
    pub large_text: bool,
}

impl TryFrom<&ScoreOptionsJs> for ScoreOptions {
    type Error = String;

    fn try_from(js: &ScoreOptionsJs) -> Result<Self, Self::Error> {
        let threshold = match js.threshold.as_deref() {
            Some(level) => level.parse()?,
            None => WcagLevel::default(),
        };
        Ok(Self {
            threshold,
            large_text: js.large_text.unwrap_or(false),
        })
    }
}

/// Score every palette entry against the palette background.
///
/// Entries are scored in parallel with Rayon; the output keeps palette
/// order. Each entry is independent (no shared mutable state), so this is
/// the hot path when a background edit forces a full re-score.
pub fn score_palette(palette: &Palette, options: &ScoreOptions) -> ScoreReport {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!(
        "score_palette",
        entries = palette.entries().len(),
        threshold = options.threshold.as_str()
    )
    .entered();

    let background = palette.background().current;
    let steps = palette.slider_steps();

    let entries: Vec<EntryScore> = palette
        .entries()
        .par_iter()
        .map(|entry| score_entry(entry, background, steps, options))
        .collect();

    let failing_count = entries.iter().filter(|e| !e.meets_threshold).count() as u32;

    ScoreReport {
        background_hex: palette.background().current_hex(),
        threshold: options.threshold.as_str().to_string(),
        entries,
        failing_count,
    }
}

/// Score a single entry against `background`.
pub fn score_entry(
    entry: &PaletteEntry,
    background: Okhsl,
    slider_steps: u32,
    options: &ScoreOptions,
) -> EntryScore {
    let check = check_contrast(entry.current, background, options.large_text);

    EntryScore {
        id: entry.id.clone(),
        hex: entry.current_hex(),
        original_hex: entry.original_hex(),
        color: entry.current.into(),
        slider_position: lightness_to_slider(entry.current.l, slider_steps),
        ratio: check.ratio_rounded,
        ratio_text: format_ratio(check.ratio),
        pass_aa: check.wcag.pass_aa,
        pass_aa_large: check.wcag.pass_aa_large,
        pass_aaa: check.wcag.pass_aaa,
        pass_aaa_large: check.wcag.pass_aaa_large,
        meets_threshold: check.passes(options.threshold),
        modified: entry.is_modified(),
    }
}

/// Hex of every entry whose current color fails `options`.
pub fn failing_hexes(palette: &Palette, options: &ScoreOptions) -> Vec<(String, String)> {
    score_palette(palette, options)
        .entries
        .into_iter()
        .filter(|e| !e.meets_threshold)
        .map(|e| (e.id, e.hex))
        .collect()
}
