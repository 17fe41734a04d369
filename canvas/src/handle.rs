//! View-host abstraction: the surface layers are drawn on and the per-layer
//! visual handles it hands out.
//!
//! The editor core never touches a concrete view. Each [`TextLayer`] owns one
//! boxed [`Handle`] created by the [`Surface`] and mirrors every mutation onto
//! it synchronously. Dropping the handle releases the visual element, so a
//! layer's view lives exactly as long as the layer does.
//!
//! [`TextLayer`]: crate::layer::TextLayer

use std::fmt;

use crate::color::HexColor;
use crate::geom::{Point, Rect};
use crate::layer::LayerId;
use crate::transform::ImageGeometry;

/// The on-screen representation of one text layer.
///
/// Implementations release their visual element in `Drop`.
pub trait Handle: fmt::Debug {
    fn set_text(&mut self, text: &str);
    fn set_font_size(&mut self, px: u32);
    fn set_color(&mut self, color: &HexColor);
    fn set_opacity(&mut self, percent: u8);
    /// Set the text stroke color, or remove the stroke with `None`.
    fn set_stroke(&mut self, stroke: Option<&HexColor>);
    /// Move the handle to a container-relative top-left position.
    fn set_position(&mut self, position: Point);
    fn set_active(&mut self, active: bool);
    /// Rendered bounding box in page coordinates.
    fn bounds(&self) -> Rect;
}

/// The editing container that hosts layer handles and the template image.
pub trait Surface {
    /// Create a blank handle for a new layer.
    fn create_handle(&mut self, id: LayerId) -> Box<dyn Handle>;
    /// Rendered bounding box of the editing container in page coordinates.
    fn container(&self) -> Rect;
    /// Current geometry of the displayed template image.
    fn image(&self) -> ImageGeometry;
}
