//! Palette editing context.
//!
//! A [`Palette`] is the state a palette editor owns: the background color and
//! every named entry, each with the color it was imported with and the color
//! it currently has. Colors are kept as OKHSL so lightness edits never drift
//! the hue or saturation; sRGB/hex are derived on demand.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::PaletteError;
use crate::math::checker::{check_contrast, ContrastCheck};
use crate::math::{color_parse, from_srgb, hex, to_srgb, Okhsl, Srgb};

/// Reserved palette key holding the contrast reference color.
pub const BACKGROUND_KEY: &str = "background";
/// Background used when a palette has no `"background"` key.
pub const DEFAULT_BACKGROUND: &str = "#fafafa";
/// Lightness slider resolution (positions `0..=500`).
pub const DEFAULT_SLIDER_STEPS: u32 = 500;

/// Caller-supplied palette settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaletteOptions {
    pub default_background: String,
    pub slider_steps: u32,
}

impl Default for PaletteOptions {
    fn default() -> Self {
        Self {
            default_background: DEFAULT_BACKGROUND.to_string(),
            slider_steps: DEFAULT_SLIDER_STEPS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub id: String,
    pub original: Okhsl,
    pub current: Okhsl,
}

impl PaletteEntry {
    pub fn new(id: impl Into<String>, color: Srgb) -> Self {
        let hsl = from_srgb(color);
        Self {
            id: id.into(),
            original: hsl,
            current: hsl,
        }
    }

    pub fn current_srgb(&self) -> Srgb {
        to_srgb(self.current)
    }

    pub fn current_hex(&self) -> String {
        hex::encode(self.current_srgb())
    }

    pub fn original_hex(&self) -> String {
        hex::encode(to_srgb(self.original))
    }

    pub fn is_modified(&self) -> bool {
        self.current != self.original
    }

    /// Replace the current color. A gray has no hue of its own, so it
    /// inherits the entry's previous hue; dragging lightness afterwards then
    /// stays on the same hue line.
    fn assign(&mut self, color: Srgb) {
        let mut hsl = from_srgb(color);
        if hsl.s == 0.0 {
            hsl.h = self.current.h;
        }
        self.current = hsl;
    }
}

/// Background plus named entries, in import order.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    background: PaletteEntry,
    entries: Vec<PaletteEntry>,
    slider_steps: u32,
}

impl Palette {
    pub fn new(background: Srgb, slider_steps: u32) -> Self {
        Self {
            background: PaletteEntry::new(BACKGROUND_KEY, background),
            entries: Vec::new(),
            slider_steps: slider_steps.max(1),
        }
    }

    /// Import a flat JSON object of `name -> color`.
    ///
    /// The `"background"` key sets the background; every other key becomes
    /// an entry, in document order. Values accept hex and CSS color syntax
    /// (see [`color_parse::parse_color`]).
    pub fn from_json(json: &str, options: &PaletteOptions) -> Result<Self, PaletteError> {
        let value: Value = serde_json::from_str(json)?;
        let Value::Object(map) = value else {
            return Err(PaletteError::NotAnObject);
        };
        Self::from_map(&map, options)
    }

    fn from_map(map: &Map<String, Value>, options: &PaletteOptions) -> Result<Self, PaletteError> {
        // An explicit "background" key wins; the default is only parsed
        // when it is actually used.
        let default_bg = if map.contains_key(BACKGROUND_KEY) {
            Srgb::WHITE
        } else {
            color_parse::parse_color(&options.default_background).map_err(|source| {
                PaletteError::Color {
                    key: BACKGROUND_KEY.to_string(),
                    source,
                }
            })?
        };
        let mut palette = Palette::new(default_bg, options.slider_steps);

        for (key, value) in map {
            let Value::String(text) = value else {
                return Err(PaletteError::NotAString { key: key.clone() });
            };
            let color = color_parse::parse_color(text).map_err(|source| PaletteError::Color {
                key: key.clone(),
                source,
            })?;

            if key == BACKGROUND_KEY {
                palette.background = PaletteEntry::new(BACKGROUND_KEY, color);
            } else {
                palette.push(key.clone(), color);
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            entries = palette.entries.len(),
            background = %palette.background.current_hex(),
            "palette imported"
        );

        Ok(palette)
    }

    /// Export current colors as `{"background": "#rrggbb", name: "#rrggbb", ...}`.
    pub fn to_json(&self) -> String {
        Value::Object(self.to_map()).to_string()
    }

    pub fn to_json_pretty(&self) -> String {
        // A map of strings always serializes.
        serde_json::to_string_pretty(&Value::Object(self.to_map())).unwrap_or_default()
    }

    fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(
            BACKGROUND_KEY.to_string(),
            Value::String(self.background.current_hex()),
        );
        for entry in &self.entries {
            map.insert(entry.id.clone(), Value::String(entry.current_hex()));
        }
        map
    }

    /// Append an entry, or replace the one with the same id.
    pub fn push(&mut self, id: impl Into<String>, color: Srgb) {
        let entry = PaletteEntry::new(id, color);
        match self.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn background(&self) -> &PaletteEntry {
        &self.background
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn slider_steps(&self) -> u32 {
        self.slider_steps
    }

    /// Look up an entry; `"background"` names the background.
    pub fn entry(&self, id: &str) -> Option<&PaletteEntry> {
        if id == BACKGROUND_KEY {
            return Some(&self.background);
        }
        self.entries.iter().find(|e| e.id == id)
    }

    fn entry_mut(&mut self, id: &str) -> Result<&mut PaletteEntry, PaletteError> {
        if id == BACKGROUND_KEY {
            return Ok(&mut self.background);
        }
        self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| PaletteError::UnknownEntry { id: id.to_string() })
    }

    fn require(&self, id: &str) -> Result<&PaletteEntry, PaletteError> {
        self.entry(id)
            .ok_or_else(|| PaletteError::UnknownEntry { id: id.to_string() })
    }

    /// Set lightness (clamped to [0, 1]); hue and saturation are untouched.
    pub fn set_lightness(&mut self, id: &str, lightness: f64) -> Result<&PaletteEntry, PaletteError> {
        let entry = self.entry_mut(id)?;
        entry.current = entry.current.with_lightness(lightness);
        #[cfg(feature = "tracing")]
        tracing::trace!(id, lightness = entry.current.l, "lightness set");
        Ok(entry)
    }

    /// Set lightness from a slider position in `0..=slider_steps`.
    pub fn set_slider(&mut self, id: &str, position: u32) -> Result<&PaletteEntry, PaletteError> {
        let steps = self.slider_steps;
        let lightness = position.min(steps) as f64 / steps as f64;
        self.set_lightness(id, lightness)
    }

    /// Slider position matching the entry's current lightness.
    pub fn slider_position(&self, id: &str) -> Result<u32, PaletteError> {
        let entry = self.require(id)?;
        Ok(lightness_to_slider(entry.current.l, self.slider_steps))
    }

    /// Replace the current color from a `#rrggbb` value (color-picker input).
    pub fn set_hex(&mut self, id: &str, value: &str) -> Result<&PaletteEntry, PaletteError> {
        let color = hex::decode(value).map_err(|source| PaletteError::Color {
            key: id.to_string(),
            source,
        })?;
        let entry = self.entry_mut(id)?;
        entry.assign(color);
        #[cfg(feature = "tracing")]
        tracing::trace!(id, hex = value, "color set");
        Ok(entry)
    }

    pub fn set_color(&mut self, id: &str, color: Okhsl) -> Result<&PaletteEntry, PaletteError> {
        let entry = self.entry_mut(id)?;
        entry.current = color;
        Ok(entry)
    }

    pub fn set_background_hex(&mut self, value: &str) -> Result<&PaletteEntry, PaletteError> {
        self.set_hex(BACKGROUND_KEY, value)
    }

    /// Restore the imported color.
    pub fn reset(&mut self, id: &str) -> Result<&PaletteEntry, PaletteError> {
        let entry = self.entry_mut(id)?;
        entry.current = entry.original;
        Ok(entry)
    }

    pub fn reset_all(&mut self) {
        self.background.current = self.background.original;
        for entry in &mut self.entries {
            entry.current = entry.original;
        }
    }

    /// Contrast of an entry's current color against the current background.
    pub fn contrast_of(&self, id: &str, is_large_text: bool) -> Result<ContrastCheck, PaletteError> {
        let entry = self.require(id)?;
        Ok(check_contrast(entry.current, self.background.current, is_large_text))
    }
}

impl Default for Palette {
    fn default() -> Self {
        // #fafafa
        Palette::new(Srgb::new(250, 250, 250), DEFAULT_SLIDER_STEPS)
    }
}

impl std::str::FromStr for Palette {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Palette::from_json(s, &PaletteOptions::default())
    }
}

/// Nearest slider position for a lightness in [0, 1].
pub fn lightness_to_slider(lightness: f64, steps: u32) -> u32 {
    if lightness.is_nan() {
        return 0;
    }
    (lightness.clamp(0.0, 1.0) * steps as f64).round() as u32
}
