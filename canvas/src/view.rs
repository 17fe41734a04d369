//! Headless view host.
//!
//! `HeadlessSurface` keeps the state a browser would keep in the DOM: the
//! container box, the displayed template image, and one element per live
//! handle. Text extent is estimated from glyph count and font size, which is
//! close enough for clamping and hit-testing when no real renderer exists.
//! Clones share the same view, so a driver can keep one clone to change the
//! layout while the editor owns another.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::color::{self, HexColor};
use crate::consts::{GLYPH_ADVANCE_EM, LINE_HEIGHT_EM};
use crate::geom::{Point, Rect, Size};
use crate::handle::{Handle, Surface};
use crate::layer::LayerId;
use crate::transform::ImageGeometry;

/// Snapshot of one rendered text element.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub text: String,
    pub font_size_px: u32,
    pub color: HexColor,
    pub opacity_percent: u8,
    pub stroke: Option<HexColor>,
    /// Container-relative top-left.
    pub position: Point,
    pub active: bool,
}

impl Element {
    fn blank() -> Self {
        Self {
            text: String::new(),
            font_size_px: 0,
            color: color::white(),
            opacity_percent: 100,
            stroke: None,
            position: Point::default(),
            active: false,
        }
    }
}

#[derive(Debug, Default)]
struct ViewState {
    container: Rect,
    image: ImageGeometry,
    elements: HashMap<LayerId, Element>,
}

/// In-memory [`Surface`] implementation.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    view: Rc<RefCell<ViewState>>,
}

impl HeadlessSurface {
    /// Create a surface whose container occupies `container` in page space.
    #[must_use]
    pub fn new(container: Rect) -> Self {
        let state = ViewState { container, ..ViewState::default() };
        Self { view: Rc::new(RefCell::new(state)) }
    }

    pub fn set_container(&self, container: Rect) {
        self.view.borrow_mut().container = container;
    }

    /// Replace the displayed image geometry (load, resize, relayout).
    pub fn set_image(&self, image: ImageGeometry) {
        self.view.borrow_mut().image = image;
    }

    /// Snapshot of the element drawn for `id`, if its handle is alive.
    #[must_use]
    pub fn element(&self, id: LayerId) -> Option<Element> {
        self.view.borrow().elements.get(&id).cloned()
    }

    /// Number of live handles.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.view.borrow().elements.len()
    }
}

impl Surface for HeadlessSurface {
    fn create_handle(&mut self, id: LayerId) -> Box<dyn Handle> {
        self.view.borrow_mut().elements.insert(id, Element::blank());
        Box::new(HeadlessHandle { id, view: Rc::clone(&self.view) })
    }

    fn container(&self) -> Rect {
        self.view.borrow().container
    }

    fn image(&self) -> ImageGeometry {
        self.view.borrow().image
    }
}

/// Estimated rendered size of `text` at `font_size_px`.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn measure_text(text: &str, font_size_px: u32) -> Size {
    let size = f64::from(font_size_px);
    let widest = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
    let lines = text.lines().count().max(1);
    Size::new(widest as f64 * size * GLYPH_ADVANCE_EM, lines as f64 * size * LINE_HEIGHT_EM)
}

#[derive(Debug)]
struct HeadlessHandle {
    id: LayerId,
    view: Rc<RefCell<ViewState>>,
}

impl HeadlessHandle {
    fn with_element(&self, f: impl FnOnce(&mut Element)) {
        if let Some(el) = self.view.borrow_mut().elements.get_mut(&self.id) {
            f(el);
        }
    }
}

impl Handle for HeadlessHandle {
    fn set_text(&mut self, text: &str) {
        self.with_element(|el| text.clone_into(&mut el.text));
    }

    fn set_font_size(&mut self, px: u32) {
        self.with_element(|el| el.font_size_px = px);
    }

    fn set_color(&mut self, color: &HexColor) {
        self.with_element(|el| el.color = color.clone());
    }

    fn set_opacity(&mut self, percent: u8) {
        self.with_element(|el| el.opacity_percent = percent);
    }

    fn set_stroke(&mut self, stroke: Option<&HexColor>) {
        self.with_element(|el| el.stroke = stroke.cloned());
    }

    fn set_position(&mut self, position: Point) {
        self.with_element(|el| el.position = position);
    }

    fn set_active(&mut self, active: bool) {
        self.with_element(|el| el.active = active);
    }

    fn bounds(&self) -> Rect {
        let view = self.view.borrow();
        let Some(el) = view.elements.get(&self.id) else {
            return Rect::default();
        };
        let origin = view.container.origin.translate(el.position);
        Rect { origin, size: measure_text(&el.text, el.font_size_px) }
    }
}

impl Drop for HeadlessHandle {
    fn drop(&mut self) {
        self.view.borrow_mut().elements.remove(&self.id);
    }
}
