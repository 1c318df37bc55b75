//! Highlight color resolution
//!
//! Moon+ Reader stores highlight colors as signed 32-bit ARGB integers.
//! Only the five palette colors the reader offers are mapped; anything else
//! falls back to the table's default color.

use crate::error::ColorError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An opaque RGB color, displayed as `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Components scaled to the 0-1 range used by PDF color arrays
    pub fn to_unit_floats(self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    /// Parse `#RRGGBB` or `RRGGBB` (either case)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex(s.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ColorError::InvalidHex(s.to_string()))
        };

        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl From<Rgb> for String {
    fn from(rgb: Rgb) -> Self {
        rgb.to_string()
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Fallback for codes outside the palette
pub const DEFAULT_COLOR: Rgb = Rgb::new(0x00, 0x00, 0x00);

/// Moon+ Reader palette codes
const PALETTE: &[(i32, Rgb)] = &[
    (1996532479, Rgb::new(0xFF, 0xFF, 0x00)),  // yellow
    (-1996554240, Rgb::new(0x00, 0xFF, 0x00)), // green
    (2013265664, Rgb::new(0x00, 0x00, 0xFF)),  // blue
    (-256, Rgb::new(0xFF, 0x00, 0x00)),        // red
    (16711680, Rgb::new(0xFF, 0x00, 0xFF)),    // magenta
];

/// Static palette lookup with a configurable fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorTable {
    default: Rgb,
}

impl ColorTable {
    pub const fn new() -> Self {
        Self::with_default(DEFAULT_COLOR)
    }

    pub const fn with_default(default: Rgb) -> Self {
        Self { default }
    }

    pub fn default_color(&self) -> Rgb {
        self.default
    }

    /// Known palette entries in display order
    pub fn entries() -> &'static [(i32, Rgb)] {
        PALETTE
    }

    /// Resolve a stored color code; never fails
    pub fn resolve(&self, code: i32) -> Rgb {
        PALETTE
            .iter()
            .find(|(known, _)| *known == code)
            .map(|(_, rgb)| *rgb)
            .unwrap_or(self.default)
    }
}

impl Default for ColorTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve a color code against the built-in table and `DEFAULT_COLOR`
pub fn resolve_color(code: i32) -> Rgb {
    ColorTable::new().resolve(code)
}
