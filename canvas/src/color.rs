//! Hex color values used for layer fill and border.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EditorError;

/// A color in canonical lowercase `#rrggbb` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    /// Parse `#RGB` or `#RRGGBB` (leading `#` optional, any case).
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidColor`] if `raw` is not a hex color.
    pub fn parse(raw: &str) -> Result<Self, EditorError> {
        let trimmed = raw.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(EditorError::InvalidColor(raw.to_owned()));
        }
        let expanded = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 => hex.to_owned(),
            _ => return Err(EditorError::InvalidColor(raw.to_owned())),
        };
        Ok(Self(format!("#{}", expanded.to_ascii_lowercase())))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for HexColor {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = EditorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(value: HexColor) -> Self {
        value.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// White, the default layer fill.
#[must_use]
pub fn white() -> HexColor {
    HexColor(crate::consts::DEFAULT_FILL.to_owned())
}

/// Black, the default layer border.
#[must_use]
pub fn black() -> HexColor {
    HexColor(crate::consts::DEFAULT_BORDER.to_owned())
}
