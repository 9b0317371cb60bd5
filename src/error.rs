use std::fmt;

/// Why a color string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatErrorKind {
    /// Not exactly 6 digits after the optional `#`.
    Length,
    /// A character outside `[0-9a-fA-F]`.
    InvalidDigit,
    /// Lenient parsing failed, or the color is translucent / a CSS keyword.
    Unsupported,
}

/// A color string that could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatError {
    pub input: String,
    pub kind: FormatErrorKind,
}

impl FormatError {
    pub(crate) fn new(input: &str, kind: FormatErrorKind) -> Self {
        Self {
            input: input.to_string(),
            kind,
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            FormatErrorKind::Length => {
                write!(f, "invalid hex color {:?}: expected 6 hex digits", self.input)
            }
            FormatErrorKind::InvalidDigit => {
                write!(f, "invalid hex color {:?}: non-hex character", self.input)
            }
            FormatErrorKind::Unsupported => {
                write!(f, "unsupported color value {:?}", self.input)
            }
        }
    }
}

impl std::error::Error for FormatError {}

/// Errors raised while importing or editing a palette.
#[derive(Debug)]
pub enum PaletteError {
    /// The palette text is not valid JSON.
    Json(serde_json::Error),
    /// The palette JSON is valid but not a flat object.
    NotAnObject,
    /// A palette value is not a string.
    NotAString { key: String },
    /// A palette value could not be decoded as a color.
    Color { key: String, source: FormatError },
    /// No entry with this id exists.
    UnknownEntry { id: String },
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteError::Json(err) => write!(f, "palette is not valid JSON: {err}"),
            PaletteError::NotAnObject => write!(f, "palette must be a JSON object of key -> color"),
            PaletteError::NotAString { key } => {
                write!(f, "palette entry {key:?} must be a color string")
            }
            PaletteError::Color { key, source } => {
                write!(f, "palette entry {key:?}: {source}")
            }
            PaletteError::UnknownEntry { id } => write!(f, "no palette entry named {id:?}"),
        }
    }
}

impl std::error::Error for PaletteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PaletteError::Json(err) => Some(err),
            PaletteError::Color { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for PaletteError {
    fn from(err: serde_json::Error) -> Self {
        PaletteError::Json(err)
    }
}
