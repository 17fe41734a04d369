//! Layer store: the ordered set of text layers for one session and the
//! identity of the active one.
//!
//! Layers keep insertion order, which is also the order their text lines are
//! submitted in. At most one layer is active; the active id always refers to
//! a layer in the store. Every mutation is mirrored onto the layer's handle
//! before the method returns.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use crate::consts::FIRST_LAYER_TEXT;
use crate::geom::Point;
use crate::handle::Surface;
use crate::layer::{LayerId, LayerUpdate, TextLayer};

/// Ordered collection of text layers.
#[derive(Debug)]
pub struct LayerStore {
    layers: Vec<TextLayer>,
    active: Option<LayerId>,
    placeholder_counter: u32,
    border_enabled: bool,
}

impl LayerStore {
    /// Create an empty store. Prefer [`LayerStore::reset`] to get the
    /// session's initial layer.
    #[must_use]
    pub fn new(border_enabled: bool) -> Self {
        Self { layers: Vec::new(), active: None, placeholder_counter: 1, border_enabled }
    }

    /// Append a layer with default style and make it the only active one.
    ///
    /// Without `text`, the placeholder counter is advanced and the layer gets
    /// `YOUR TEXT <n>`.
    pub fn create_layer(&mut self, surface: &mut dyn Surface, text: Option<String>) -> &TextLayer {
        let text = text.unwrap_or_else(|| {
            self.placeholder_counter += 1;
            format!("{FIRST_LAYER_TEXT} {}", self.placeholder_counter)
        });
        let layer = TextLayer::new(surface, text, self.border_enabled);
        let id = layer.id();
        self.layers.push(layer);
        self.set_active(id);
        let last = self.layers.len() - 1;
        &self.layers[last]
    }

    /// Make `id` the only active layer. Unknown ids are ignored.
    pub fn set_active(&mut self, id: LayerId) -> bool {
        if !self.layers.iter().any(|l| l.id() == id) {
            return false;
        }
        for layer in &mut self.layers {
            let active = layer.id() == id;
            if layer.is_active() != active {
                layer.set_active(active);
            }
        }
        self.active = Some(id);
        true
    }

    /// Apply an edit to the active layer. Returns `false` if there is no
    /// active layer or the value was rejected.
    pub fn update_active(&mut self, update: LayerUpdate) -> bool {
        let border_enabled = self.border_enabled;
        match self.active_mut() {
            Some(layer) => layer.apply(update, border_enabled),
            None => false,
        }
    }

    /// Remove the active layer, releasing its handle, and clear the active
    /// pointer. Returns the removed id.
    pub fn delete_active(&mut self) -> Option<LayerId> {
        let id = self.active.take()?;
        self.layers.retain(|l| l.id() != id);
        Some(id)
    }

    /// Drop every layer, reset the placeholder counter and create the
    /// session's initial layer.
    pub fn reset(&mut self, surface: &mut dyn Surface) {
        self.layers.clear();
        self.active = None;
        self.placeholder_counter = 1;
        self.create_layer(surface, Some(FIRST_LAYER_TEXT.to_owned()));
    }

    /// Move a layer to a container-relative position.
    pub fn move_layer(&mut self, id: LayerId, position: Point) -> bool {
        match self.layers.iter_mut().find(|l| l.id() == id) {
            Some(layer) => {
                layer.set_position(position);
                true
            }
            None => false,
        }
    }

    /// Show or hide the text stroke on every layer.
    pub fn set_border_enabled(&mut self, enabled: bool) {
        self.border_enabled = enabled;
        for layer in &mut self.layers {
            layer.set_border_enabled(enabled);
        }
    }

    // --- Queries ---

    /// Layers in insertion order.
    #[must_use]
    pub fn layers(&self) -> &[TextLayer] {
        &self.layers
    }

    #[must_use]
    pub fn get(&self, id: LayerId) -> Option<&TextLayer> {
        self.layers.iter().find(|l| l.id() == id)
    }

    #[must_use]
    pub fn active_id(&self) -> Option<LayerId> {
        self.active
    }

    #[must_use]
    pub fn active(&self) -> Option<&TextLayer> {
        self.active.and_then(|id| self.get(id))
    }

    #[must_use]
    pub fn placeholder_counter(&self) -> u32 {
        self.placeholder_counter
    }

    #[must_use]
    pub fn border_enabled(&self) -> bool {
        self.border_enabled
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    fn active_mut(&mut self) -> Option<&mut TextLayer> {
        let id = self.active?;
        self.layers.iter_mut().find(|l| l.id() == id)
    }
}
