//! Text layers: one independently positioned overlay on the template image.

#[cfg(test)]
#[path = "layer_test.rs"]
mod layer_test;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::color::{self, HexColor};
use crate::consts::{DEFAULT_FONT_SIZE_PX, DEFAULT_OPACITY_PERCENT, DEFAULT_POSITION_PX};
use crate::error::EditorError;
use crate::geom::{Point, Rect};
use crate::handle::{Handle, Surface};

/// Unique identifier for a text layer.
pub type LayerId = Uuid;

/// Visual style of a text layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerStyle {
    /// Screen-space font size in pixels. Always positive.
    pub font_size_px: u32,
    /// Text fill color.
    pub color: HexColor,
    /// Text stroke color, shown while the global border is enabled.
    pub border_color: HexColor,
    /// Opacity in percent, `0..=100`.
    pub opacity_percent: u8,
}

impl Default for LayerStyle {
    fn default() -> Self {
        Self {
            font_size_px: DEFAULT_FONT_SIZE_PX,
            color: color::white(),
            border_color: color::black(),
            opacity_percent: DEFAULT_OPACITY_PERCENT,
        }
    }
}

/// A single-property edit to the active layer.
///
/// Deserializes from `{"field": "...", "value": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum LayerUpdate {
    Text(String),
    Size(u32),
    Color(HexColor),
    /// Values above 100 are clamped.
    #[serde(deserialize_with = "clamped_percent")]
    Opacity(u8),
    #[serde(alias = "border")]
    BorderColor(HexColor),
}

impl LayerUpdate {
    /// Build an edit from a control name and its raw value.
    ///
    /// Numeric fields also accept their value as a decimal string, the way
    /// form inputs report it.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidUpdate`] for unknown fields or values of
    /// the wrong shape.
    pub fn from_field(field: &str, value: serde_json::Value) -> Result<Self, EditorError> {
        let value = match (field, value) {
            ("size" | "opacity", serde_json::Value::String(raw)) => raw
                .trim()
                .parse::<u64>()
                .map(serde_json::Value::from)
                .map_err(|e| EditorError::InvalidUpdate(format!("{field}: {e}")))?,
            (_, value) => value,
        };
        serde_json::from_value(serde_json::json!({ "field": field, "value": value }))
            .map_err(|e| EditorError::InvalidUpdate(format!("{field}: {e}")))
    }
}

/// Read any non-negative integer as a percentage, saturating at 100.
fn clamped_percent<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let raw = u64::deserialize(deserializer)?;
    u8::try_from(raw.min(100)).map_err(serde::de::Error::custom)
}

/// One text overlay plus the handle that draws it.
///
/// Fields are private so every change goes through a method that also
/// updates the handle.
#[derive(Debug)]
pub struct TextLayer {
    id: LayerId,
    text: String,
    style: LayerStyle,
    position: Point,
    active: bool,
    handle: Box<dyn Handle>,
}

impl TextLayer {
    /// Create a layer with default style at the default position and draw it.
    pub(crate) fn new(surface: &mut dyn Surface, text: String, border_enabled: bool) -> Self {
        let id = Uuid::new_v4();
        let handle = surface.create_handle(id);
        let mut layer = Self {
            id,
            text,
            style: LayerStyle::default(),
            position: Point::new(DEFAULT_POSITION_PX, DEFAULT_POSITION_PX),
            active: false,
            handle,
        };
        layer.mirror_all(border_enabled);
        layer
    }

    #[must_use]
    pub fn id(&self) -> LayerId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn style(&self) -> &LayerStyle {
        &self.style
    }

    /// Container-relative top-left position.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Rendered bounding box in page coordinates, as reported by the handle.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.handle.bounds()
    }

    /// Apply an edit and mirror it. Returns `false` if the value was rejected.
    pub(crate) fn apply(&mut self, update: LayerUpdate, border_enabled: bool) -> bool {
        match update {
            LayerUpdate::Text(text) => {
                self.handle.set_text(&text);
                self.text = text;
            }
            LayerUpdate::Size(0) => return false,
            LayerUpdate::Size(px) => {
                self.style.font_size_px = px;
                self.handle.set_font_size(px);
            }
            LayerUpdate::Color(color) => {
                self.handle.set_color(&color);
                self.style.color = color;
            }
            LayerUpdate::Opacity(percent) => {
                let percent = percent.min(100);
                self.style.opacity_percent = percent;
                self.handle.set_opacity(percent);
            }
            LayerUpdate::BorderColor(color) => {
                self.style.border_color = color;
                if border_enabled {
                    self.handle.set_stroke(Some(&self.style.border_color));
                }
            }
        }
        true
    }

    pub(crate) fn set_position(&mut self, position: Point) {
        self.position = position;
        self.handle.set_position(position);
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
        self.handle.set_active(active);
    }

    pub(crate) fn set_border_enabled(&mut self, enabled: bool) {
        self.handle.set_stroke(enabled.then_some(&self.style.border_color));
    }

    fn mirror_all(&mut self, border_enabled: bool) {
        self.handle.set_text(&self.text);
        self.handle.set_font_size(self.style.font_size_px);
        self.handle.set_color(&self.style.color);
        self.handle.set_opacity(self.style.opacity_percent);
        self.set_border_enabled(border_enabled);
        self.handle.set_position(self.position);
        self.handle.set_active(self.active);
    }
}
