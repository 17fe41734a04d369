#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::geom::Point;
use crate::layer::LayerId;
use crate::store::LayerStore;

/// Return the topmost layer whose rendered bounds contain the page-space
/// point. Later layers are drawn above earlier ones.
#[must_use]
pub fn hit_test(page_pt: Point, store: &LayerStore) -> Option<LayerId> {
    store
        .layers()
        .iter()
        .rev()
        .find(|layer| layer.bounds().contains(page_pt))
        .map(crate::layer::TextLayer::id)
}
