//! Errors surfaced by the editor core.

/// Errors produced by editor operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditorError {
    /// Submission was requested before any template was selected.
    #[error("no template selected")]
    NoTemplate,

    /// The displayed template image has no natural size yet.
    #[error("image not loaded yet")]
    ImageNotLoaded,

    /// A color value was not `#rgb` or `#rrggbb`.
    #[error("invalid color: {0:?}")]
    InvalidColor(String),

    /// A layer edit named an unknown field or carried a bad value.
    #[error("invalid layer update: {0}")]
    InvalidUpdate(String),
}

impl EditorError {
    /// Whether this error means the user must wait or act before retrying.
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::NoTemplate | Self::ImageNotLoaded)
    }
}
