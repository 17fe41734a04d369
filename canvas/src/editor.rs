use crate::drag::DragState;
use crate::error::EditorError;
use crate::geom::Point;
use crate::handle::Surface;
use crate::hit::hit_test;
use crate::layer::{LayerId, LayerUpdate};
use crate::session::{EditorSession, Template};
use crate::submission::{self, GlobalOptions, SubmissionPayload};

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

/// The editor: the view surface, the current session and global options.
///
/// All state lives here and is reached through `&mut Editor`; there is no
/// process-wide mutable state. Operations that need a session are no-ops
/// until a template has been selected.
pub struct Editor {
    surface: Box<dyn Surface>,
    session: Option<EditorSession>,
    options: GlobalOptions,
}

impl Editor {
    #[must_use]
    pub fn new(surface: Box<dyn Surface>) -> Self {
        Self { surface, session: None, options: GlobalOptions::default() }
    }

    // --- Collaborator entry points ---

    /// Replace the session with a fresh one on `template`. All previous
    /// layers and their handles are released first.
    pub fn on_template_selected(&mut self, template: Template) {
        self.session = None;
        self.session = Some(EditorSession::open(template, self.surface.as_mut(), self.options.border_enabled));
    }

    /// Build the submission for the current layers.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NoTemplate`] without a session and
    /// [`EditorError::ImageNotLoaded`] before the image has loaded.
    pub fn build_submission(&self, options: &GlobalOptions) -> Result<SubmissionPayload, EditorError> {
        let session = self.session.as_ref().ok_or(EditorError::NoTemplate)?;
        submission::build(session, options, &self.surface.image())
    }

    // --- Layer edits ---

    /// Add a layer and make it active. `None` without a session.
    pub fn add_layer(&mut self, text: Option<String>) -> Option<LayerId> {
        let session = self.session.as_mut()?;
        Some(session.layers.create_layer(self.surface.as_mut(), text).id())
    }

    pub fn set_active(&mut self, id: LayerId) -> bool {
        self.session
            .as_mut()
            .is_some_and(|s| s.layers.set_active(id))
    }

    pub fn update_active(&mut self, update: LayerUpdate) -> bool {
        self.session
            .as_mut()
            .is_some_and(|s| s.layers.update_active(update))
    }

    pub fn delete_active(&mut self) -> Option<LayerId> {
        self.session.as_mut()?.layers.delete_active()
    }

    /// Toggle the text stroke for all current and future layers.
    pub fn set_border_enabled(&mut self, enabled: bool) {
        self.options.border_enabled = enabled;
        if let Some(session) = self.session.as_mut() {
            session.layers.set_border_enabled(enabled);
        }
    }

    // --- Pointer input ---

    /// Start dragging the topmost layer under `page_pt`, if any.
    pub fn on_pointer_down(&mut self, page_pt: Point) -> Option<LayerId> {
        let session = self.session.as_mut()?;
        let id = hit_test(page_pt, &session.layers)?;
        session.drag.pointer_down(&mut session.layers, id, page_pt);
        Some(id)
    }

    /// Move the dragged layer. Returns its new container-relative position.
    pub fn on_pointer_move(&mut self, page_pt: Point) -> Option<Point> {
        let container = self.surface.container();
        let session = self.session.as_mut()?;
        session.drag.pointer_move(&mut session.layers, container, page_pt)
    }

    /// Pointer released anywhere in the document.
    pub fn on_pointer_up(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.drag.pointer_up();
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn session(&self) -> Option<&EditorSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn options(&self) -> GlobalOptions {
        self.options
    }

    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.session
            .as_ref()
            .map_or(DragState::Idle, |s| s.drag.state())
    }

    /// Id of the layer at insertion index `index`.
    #[must_use]
    pub fn layer_at(&self, index: usize) -> Option<LayerId> {
        self.session
            .as_ref()?
            .layers
            .layers()
            .get(index)
            .map(crate::layer::TextLayer::id)
    }
}
