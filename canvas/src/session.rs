//! Templates and the per-template editing session.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::drag::DragController;
use crate::handle::Surface;
use crate::store::LayerStore;

/// Opaque template identifier, echoed back to the service unchanged.
///
/// The service may use string or numeric ids; both round-trip as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TemplateId {
    Number(i64),
    Text(String),
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for TemplateId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// A template image offered by the rendering service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: TemplateId,
    pub name: String,
    /// Image source URL.
    pub url: String,
}

/// Editing state bound to one selected template.
///
/// Replaced wholesale when another template is selected; dropping it
/// releases every layer handle.
#[derive(Debug)]
pub struct EditorSession {
    template: Template,
    pub layers: LayerStore,
    pub drag: DragController,
}

impl EditorSession {
    /// Open a session on `template` with its single initial layer.
    pub fn open(template: Template, surface: &mut dyn Surface, border_enabled: bool) -> Self {
        let mut layers = LayerStore::new(border_enabled);
        layers.reset(surface);
        Self { template, layers, drag: DragController::new() }
    }

    #[must_use]
    pub fn template(&self) -> &Template {
        &self.template
    }
}
