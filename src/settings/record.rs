//! Appearance preferences record

use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_FONT: &str = "Arial";
pub const DEFAULT_TEXT_COLOR: &str = "black";
pub const DEFAULT_BG_COLOR: &str = "#00FF00";

/// Display font size restricted to the sizes offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct FontSize(u32);

impl FontSize {
    pub const ALLOWED: [u32; 13] = [10, 15, 20, 25, 30, 35, 40, 45, 50, 55, 60, 70, 80];

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for FontSize {
    fn default() -> Self {
        FontSize(40)
    }
}

impl TryFrom<u32> for FontSize {
    type Error = InvalidFontSize;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if Self::ALLOWED.contains(&value) {
            Ok(FontSize(value))
        } else {
            Err(InvalidFontSize(value))
        }
    }
}

impl From<FontSize> for u32 {
    fn from(size: FontSize) -> Self {
        size.0
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rejected font size
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("font size {0} is not one of {allowed:?}", allowed = FontSize::ALLOWED)]
pub struct InvalidFontSize(pub u32);

/// Check a color value: `#RRGGBB` or a named color such as `black` or `light blue`
pub fn is_valid_color(value: &str) -> bool {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        return hex.len() == 6 && hex.bytes().all(|b| b.is_ascii_hexdigit());
    }
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_alphabetic() || b == b' ')
}

/// Persisted appearance preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsRecord {
    #[serde(rename = "font")]
    pub font_family: String,
    pub font_size: FontSize,
    pub text_color: String,
    #[serde(rename = "bg_color")]
    pub background_color: String,
}

impl Default for SettingsRecord {
    fn default() -> Self {
        Self {
            font_family: DEFAULT_FONT.to_string(),
            font_size: FontSize::default(),
            text_color: DEFAULT_TEXT_COLOR.to_string(),
            background_color: DEFAULT_BG_COLOR.to_string(),
        }
    }
}
