//! Color core for a palette contrast editor: hex codec, OKHSL conversion,
//! WCAG luminance and contrast scoring, plus the palette context a UI layer
//! drives. Builds as a Node addon with the `napi` feature.

#[cfg(feature = "napi")]
#[macro_use]
extern crate napi_derive;

pub mod engine;
pub mod error;
pub mod math;
pub mod palette;
pub mod types;

#[cfg(feature = "napi")]
pub mod bindings;

pub use error::{FormatError, FormatErrorKind, PaletteError};
pub use math::{Okhsl, Srgb};
pub use palette::{Palette, PaletteEntry, PaletteOptions};
