//! Scripted headless driver.
//!
//! Replays editor events from JSON lines against a [`HeadlessSurface`] and
//! the live rendering service, one op per line:
//!
//! ```text
//! {"op":"layout","container":{"x":0,"y":0,"width":500,"height":400},"natural_width":1000,"natural_height":800}
//! {"op":"add_layer","text":"TOP TEXT"}
//! {"op":"update","field":"size","value":60}
//! {"op":"submit"}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. A malformed line
//! stops the run; an editor error is reported and the run continues. Unmet
//! preconditions (no template, image not loaded) are reported as `blocked:`
//! so the operator knows to act before retrying.

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use std::io::{BufRead, Write};

use canvas::geom::{Point, Rect};
use canvas::layer::{LayerId, LayerUpdate};
use canvas::session::TemplateId;
use canvas::transform::ImageGeometry;
use canvas::view::HeadlessSurface;
use serde::Deserialize;
use tracing::debug;

use crate::app::App;
use crate::error::AppError;
use crate::poller::JobState;

/// Page-space rectangle as written in scripts.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl From<Bounds> for Rect {
    fn from(b: Bounds) -> Self {
        Rect::new(b.x, b.y, b.width, b.height)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptOp {
    /// Place the container and the displayed image. The image defaults to
    /// filling the container; a zero natural size means "not loaded yet".
    Layout {
        container: Bounds,
        #[serde(default)]
        image: Option<Bounds>,
        #[serde(default)]
        natural_width: f64,
        #[serde(default)]
        natural_height: f64,
    },
    SelectTemplate {
        id: TemplateId,
    },
    AddLayer {
        #[serde(default)]
        text: Option<String>,
    },
    Activate {
        index: usize,
    },
    Update {
        field: String,
        value: serde_json::Value,
    },
    DeleteActive,
    Border {
        enabled: bool,
    },
    PointerDown {
        x: f64,
        y: f64,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp,
    Submit,
    CloseResult,
}

/// Run every op in `input`, writing a transcript to `out`.
///
/// # Errors
///
/// Fails on a line that is not a valid op, or when reading input or
/// writing output fails.
pub async fn run_script(app: &mut App, surface: &HeadlessSurface, input: impl BufRead, out: &mut impl Write) -> Result<(), AppError> {
    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let op: ScriptOp = serde_json::from_str(line).map_err(|source| AppError::Script { line: index + 1, source })?;
        debug!(line = index + 1, ?op, "script op");

        match apply(app, surface, op, out).await {
            Ok(()) => {}
            Err(AppError::Editor(e)) if e.is_precondition() => writeln!(out, "blocked: {e}")?,
            Err(e @ (AppError::Editor(_) | AppError::NoSuchLayer(_))) => writeln!(out, "error: {e}")?,
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

async fn apply(app: &mut App, surface: &HeadlessSurface, op: ScriptOp, out: &mut impl Write) -> Result<(), AppError> {
    match op {
        ScriptOp::Layout { container, image, natural_width, natural_height } => {
            surface.set_container(container.into());
            let displayed = image.unwrap_or(container).into();
            surface.set_image(ImageGeometry::new(displayed, natural_width, natural_height));
        }
        ScriptOp::SelectTemplate { id } => {
            if app.select_template(&id) {
                writeln!(out, "template {id}")?;
            } else {
                writeln!(out, "template {id} (not in catalog)")?;
            }
        }
        ScriptOp::AddLayer { text } => match app.editor_mut().add_layer(text) {
            Some(id) => writeln!(out, "layer {} added", layer_index(app, id).unwrap_or_default())?,
            None => return Err(canvas::EditorError::NoTemplate.into()),
        },
        ScriptOp::Activate { index } => {
            let id = app.editor().layer_at(index).ok_or(AppError::NoSuchLayer(index))?;
            app.editor_mut().set_active(id);
        }
        ScriptOp::Update { field, value } => {
            let update = LayerUpdate::from_field(&field, value)?;
            if !app.editor_mut().update_active(update) {
                writeln!(out, "update {field} ignored")?;
            }
        }
        ScriptOp::DeleteActive => {
            if app.editor_mut().delete_active().is_none() {
                writeln!(out, "nothing to delete")?;
            }
        }
        ScriptOp::Border { enabled } => app.editor_mut().set_border_enabled(enabled),
        ScriptOp::PointerDown { x, y } => match app.editor_mut().on_pointer_down(Point::new(x, y)) {
            Some(id) => writeln!(out, "drag layer {}", layer_index(app, id).unwrap_or_default())?,
            None => writeln!(out, "no layer at ({x}, {y})")?,
        },
        ScriptOp::PointerMove { x, y } => {
            if let Some(pos) = app.editor_mut().on_pointer_move(Point::new(x, y)) {
                writeln!(out, "moved to ({}, {})", pos.x, pos.y)?;
            }
        }
        ScriptOp::PointerUp => app.editor_mut().on_pointer_up(),
        ScriptOp::Submit => {
            let options = app.editor().options();
            app.on_submit_requested(options)?;
            while let Some(state) = app.next_job_update().await {
                match state {
                    JobState::Polling { task_id, polls: 0 } => writeln!(out, "task {task_id}")?,
                    JobState::Polling { .. } => {}
                    JobState::Completed { url: Some(url), .. } => writeln!(out, "{} {url}", state.describe())?,
                    _ => writeln!(out, "{}", state.describe())?,
                }
            }
        }
        ScriptOp::CloseResult => {
            if app.close_result() {
                writeln!(out, "result closed")?;
            }
        }
    }
    Ok(())
}

fn layer_index(app: &App, id: LayerId) -> Option<usize> {
    app.editor()
        .session()?
        .layers
        .layers()
        .iter()
        .position(|layer| layer.id() == id)
}
