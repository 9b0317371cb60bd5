//! Node entry points (`napi` feature).

use napi::{Error, Result, Status};

use crate::engine::{score_entry, score_palette, ScoreOptions};
use crate::math::{self, color_parse, hex, wcag, Okhsl};
use crate::palette::{Palette, PaletteOptions};
use crate::types::{format_ratio, EntryScore, OkhslColor, ScoreOptionsJs, ScoreReport};

fn invalid_arg(err: impl std::fmt::Display) -> Error {
    Error::new(Status::InvalidArg, err.to_string())
}

fn score_options(options: Option<ScoreOptionsJs>) -> Result<ScoreOptions> {
    ScoreOptions::try_from(&options.unwrap_or_default()).map_err(invalid_arg)
}

#[napi]
pub fn health_check() -> String {
    "okhsl-contrast-native ok".to_string()
}

#[napi]
pub fn hex_to_okhsl(value: String) -> Result<OkhslColor> {
    let rgb = hex::decode(&value).map_err(invalid_arg)?;
    Ok(math::from_srgb(rgb).into())
}

#[napi]
pub fn okhsl_to_hex(color: OkhslColor) -> String {
    hex::encode(math::to_srgb(color.into()))
}

/// Strict `#rrggbb` normalization (lowercase, `#` prefixed).
#[napi]
pub fn normalize_hex(value: String) -> Result<String> {
    hex::normalize(&value).map_err(invalid_arg)
}

/// Any supported CSS color value to `#rrggbb`.
#[napi]
pub fn css_to_hex(value: String) -> Result<String> {
    color_parse::to_hex(&value).map_err(invalid_arg)
}

#[napi]
pub fn relative_luminance(value: String) -> Result<f64> {
    let rgb = hex::decode(&value).map_err(invalid_arg)?;
    Ok(wcag::relative_luminance(rgb))
}

#[napi]
pub fn contrast_ratio(l1: f64, l2: f64) -> f64 {
    wcag::contrast_ratio(l1, l2)
}

#[napi]
pub fn contrast_ratio_okhsl(a: OkhslColor, b: OkhslColor) -> f64 {
    math::ratio_from_colors(a.into(), b.into())
}

#[napi]
pub fn contrast_ratio_hex(fg: String, bg: String) -> Result<f64> {
    let fg = hex::decode(&fg).map_err(invalid_arg)?;
    let bg = hex::decode(&bg).map_err(invalid_arg)?;
    Ok(wcag::contrast_ratio(
        wcag::relative_luminance(fg),
        wcag::relative_luminance(bg),
    ))
}

#[napi]
pub fn format_contrast(ratio: f64) -> String {
    format_ratio(ratio)
}

/// One-shot import + score, for validating an exported palette.
#[napi]
pub fn score_palette_json(json: String, options: Option<ScoreOptionsJs>) -> Result<ScoreReport> {
    let palette = Palette::from_json(&json, &PaletteOptions::default()).map_err(invalid_arg)?;
    Ok(score_palette(&palette, &score_options(options)?))
}

/// Palette editing session owned by the UI controller.
#[napi(js_name = "Palette")]
pub struct JsPalette {
    inner: Palette,
    options: ScoreOptions,
}

#[napi]
impl JsPalette {
    /// `options` is `{ defaultBackground?, sliderSteps? }`.
    #[napi(factory)]
    pub fn from_json(json: String, options: Option<serde_json::Value>) -> Result<Self> {
        let palette_options: PaletteOptions = match options {
            Some(value) => serde_json::from_value(value).map_err(invalid_arg)?,
            None => PaletteOptions::default(),
        };
        let inner = Palette::from_json(&json, &palette_options).map_err(invalid_arg)?;
        Ok(Self {
            inner,
            options: ScoreOptions::default(),
        })
    }

    #[napi]
    pub fn set_score_options(&mut self, options: ScoreOptionsJs) -> Result<()> {
        self.options = score_options(Some(options))?;
        Ok(())
    }

    #[napi]
    pub fn ids(&self) -> Vec<String> {
        self.inner.entries().iter().map(|e| e.id.clone()).collect()
    }

    #[napi]
    pub fn background_hex(&self) -> String {
        self.inner.background().current_hex()
    }

    #[napi]
    pub fn slider_steps(&self) -> u32 {
        self.inner.slider_steps()
    }

    #[napi]
    pub fn set_lightness(&mut self, id: String, lightness: f64) -> Result<EntryScore> {
        self.inner.set_lightness(&id, lightness).map_err(invalid_arg)?;
        self.score(id)
    }

    #[napi]
    pub fn set_slider(&mut self, id: String, position: u32) -> Result<EntryScore> {
        self.inner.set_slider(&id, position).map_err(invalid_arg)?;
        self.score(id)
    }

    #[napi]
    pub fn set_hex(&mut self, id: String, value: String) -> Result<EntryScore> {
        self.inner.set_hex(&id, &value).map_err(invalid_arg)?;
        self.score(id)
    }

    #[napi]
    pub fn set_color(&mut self, id: String, color: OkhslColor) -> Result<EntryScore> {
        self.inner
            .set_color(&id, Okhsl::from(color))
            .map_err(invalid_arg)?;
        self.score(id)
    }

    #[napi]
    pub fn reset(&mut self, id: String) -> Result<EntryScore> {
        self.inner.reset(&id).map_err(invalid_arg)?;
        self.score(id)
    }

    #[napi]
    pub fn reset_all(&mut self) -> ScoreReport {
        self.inner.reset_all();
        self.score_all()
    }

    /// A background change moves every ratio, so the whole palette is
    /// re-scored.
    #[napi]
    pub fn set_background_hex(&mut self, value: String) -> Result<ScoreReport> {
        self.inner.set_background_hex(&value).map_err(invalid_arg)?;
        Ok(self.score_all())
    }

    /// Score one entry (or the background, against itself) with the session
    /// options.
    #[napi]
    pub fn score(&self, id: String) -> Result<EntryScore> {
        let entry = self
            .inner
            .entry(&id)
            .ok_or_else(|| invalid_arg(format!("no palette entry named {id:?}")))?;
        Ok(score_entry(
            entry,
            self.inner.background().current,
            self.inner.slider_steps(),
            &self.options,
        ))
    }

    #[napi]
    pub fn score_all(&self) -> ScoreReport {
        score_palette(&self.inner, &self.options)
    }

    #[napi]
    pub fn to_json(&self) -> String {
        self.inner.to_json_pretty()
    }
}
