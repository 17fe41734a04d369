//! Top-level error type for the binary.

use canvas::EditorError;

use crate::api::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A precondition or input check in the editor core failed.
    #[error(transparent)]
    Editor(#[from] EditorError),
    /// The rendering service could not be reached or answered badly.
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("script line {line}: {source}")]
    Script { line: usize, source: serde_json::Error },
    #[error("no layer at index {0}")]
    NoSuchLayer(usize),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}
