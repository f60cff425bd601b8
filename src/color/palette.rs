use crate::foundation::error::{TextfxError, TextfxResult};
use crate::foundation::math::{Lerp, lerp_u8};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// 24-bit color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Lerp for Rgb {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
        }
    }
}

const SYSTEM_COLORS: [Rgb; 16] = [
    Rgb::new(0, 0, 0),
    Rgb::new(128, 0, 0),
    Rgb::new(0, 128, 0),
    Rgb::new(128, 128, 0),
    Rgb::new(0, 0, 128),
    Rgb::new(128, 0, 128),
    Rgb::new(0, 128, 128),
    Rgb::new(192, 192, 192),
    Rgb::new(128, 128, 128),
    Rgb::new(255, 0, 0),
    Rgb::new(0, 255, 0),
    Rgb::new(255, 255, 0),
    Rgb::new(0, 0, 255),
    Rgb::new(255, 0, 255),
    Rgb::new(0, 255, 255),
    Rgb::new(255, 255, 255),
];

const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

/// Resolve an xterm-256 palette index to RGB.
pub fn xterm_to_rgb(index: u8) -> Rgb {
    match index {
        0..=15 => SYSTEM_COLORS[usize::from(index)],
        16..=231 => {
            let i = index - 16;
            Rgb::new(
                CUBE_LEVELS[usize::from(i / 36)],
                CUBE_LEVELS[usize::from((i / 6) % 6)],
                CUBE_LEVELS[usize::from(i % 6)],
            )
        }
        232..=255 => {
            let v = 8 + (index - 232) * 10;
            Rgb::new(v, v, v)
        }
    }
}

/// A terminal color given either as a palette index or as RGB.
///
/// Equality and hashing use the resolved RGB value, so `Indexed(9)` equals `Rgb(255, 0, 0)`.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(untagged)]
pub enum Color {
    Indexed(u8),
    Rgb(Rgb),
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb(Rgb::new(r, g, b))
    }

    pub fn to_rgb(self) -> Rgb {
        match self {
            Self::Indexed(i) => xterm_to_rgb(i),
            Self::Rgb(rgb) => rgb,
        }
    }

    pub fn is_indexed(self) -> bool {
        matches!(self, Self::Indexed(_))
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.to_rgb() == other.to_rgb()
    }
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_rgb().hash(state);
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::Rgb(rgb)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Rgb { r, g, b } = self.to_rgb();
        write!(f, "{r:02x}{g:02x}{b:02x}")
    }
}

impl FromStr for Color {
    type Err = TextfxError;

    /// Parse `RRGGBB` or `#RRGGBB` (case-insensitive).
    fn from_str(s: &str) -> TextfxResult<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(TextfxError::validation(format!(
                "hex color must be RRGGBB or #RRGGBB, got \"{s}\""
            )));
        }
        fn hex_byte(pair: &str) -> TextfxResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| TextfxError::validation(format!("invalid hex byte \"{pair}\"")))
        }
        Ok(Self::rgb(
            hex_byte(&hex[0..2])?,
            hex_byte(&hex[2..4])?,
            hex_byte(&hex[4..6])?,
        ))
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Index(u8),
            Hex(String),
            Arr([u8; 3]),
            Obj { r: u8, g: u8, b: u8 },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Index(i) => Ok(Self::Indexed(i)),
            Repr::Hex(s) => s.parse().map_err(serde::de::Error::custom),
            Repr::Arr([r, g, b]) | Repr::Obj { r, g, b } => Ok(Self::rgb(r, g, b)),
        }
    }
}

/// Foreground/background pair; `None` leaves the terminal default in place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorPair {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
}

impl ColorPair {
    pub const fn new(fg: Option<Color>, bg: Option<Color>) -> Self {
        Self { fg, bg }
    }

    pub const fn fg(fg: Color) -> Self {
        Self { fg: Some(fg), bg: None }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/palette.rs"]
mod tests;
