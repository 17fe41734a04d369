//! Screen-space to backend-space conversion.
//!
//! The template image is shown scaled to fit the editor, but the rendering
//! service works in the image's natural pixel grid. Every layer position is
//! first expressed relative to the displayed image's top-left corner and then
//! multiplied by `natural_width / displayed_width`. Font sizes get the same
//! factor plus [`FONT_SIZE_CORRECTION`].
//!
//! The factor is derived from the geometry passed in on every call and is
//! never cached; layout can change between submissions.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use serde::{Deserialize, Serialize};

use crate::consts::FONT_SIZE_CORRECTION;
use crate::error::EditorError;
use crate::geom::{Point, Rect};

/// Geometry of the displayed template image.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageGeometry {
    /// Rendered box of the image in page coordinates.
    pub displayed: Rect,
    /// Intrinsic pixel width. Zero until the image has loaded.
    pub natural_width: f64,
    /// Intrinsic pixel height. Zero until the image has loaded.
    pub natural_height: f64,
}

impl ImageGeometry {
    #[must_use]
    pub fn new(displayed: Rect, natural_width: f64, natural_height: f64) -> Self {
        Self { displayed, natural_width, natural_height }
    }

    /// Whether the image has loaded and is laid out with a non-zero width.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.natural_width > 0.0 && self.displayed.size.width > 0.0
    }

    /// Ratio of natural width to displayed width.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::ImageNotLoaded`] when the ratio would be zero
    /// or undefined.
    pub fn scale_factor(&self) -> Result<f64, EditorError> {
        if !self.is_loaded() {
            return Err(EditorError::ImageNotLoaded);
        }
        Ok(self.natural_width / self.displayed.size.width)
    }
}

/// A layer's position and font size in the template's natural pixel grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendPlacement {
    pub x_pos: i64,
    pub y_pos: i64,
    pub size: u32,
}

/// Convert a layer's page-space origin and font size into backend space,
/// using a scale factor taken from [`ImageGeometry::scale_factor`].
#[must_use]
pub fn place(layer_origin: Point, font_size_px: u32, image_origin: Point, scale: f64) -> BackendPlacement {
    let local = layer_origin.offset_from(image_origin);
    let size = round_half_up(f64::from(font_size_px) * scale * FONT_SIZE_CORRECTION).max(0);
    BackendPlacement {
        x_pos: round_half_up(local.x * scale),
        y_pos: round_half_up(local.y * scale),
        size: u32::try_from(size).unwrap_or(u32::MAX),
    }
}

/// Round to the nearest integer, ties toward positive infinity.
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
