//! Backend request assembly.

#[cfg(test)]
#[path = "submission_test.rs"]
mod submission_test;

use serde::{Deserialize, Serialize};

use crate::color::HexColor;
use crate::error::EditorError;
use crate::session::{EditorSession, TemplateId};
use crate::transform::{ImageGeometry, place};

/// Options that apply to every layer rather than one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalOptions {
    /// Draw a stroke around all text.
    pub border_enabled: bool,
}

impl Default for GlobalOptions {
    fn default() -> Self {
        Self { border_enabled: true }
    }
}

/// One text layer in backend space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextLine {
    pub text: String,
    pub color: HexColor,
    pub size: u32,
    pub x_pos: i64,
    pub y_pos: i64,
    pub opacity: u8,
    pub border_color_hex: HexColor,
}

/// Body of `POST /memes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub template_id: TemplateId,
    pub text_border: bool,
    pub text_lines: Vec<TextLine>,
}

/// Build the request for the session's current layers, in insertion order.
///
/// The scale factor is taken from `image` as it is right now.
///
/// # Errors
///
/// Returns [`EditorError::ImageNotLoaded`] if the image has not loaded.
pub fn build(session: &EditorSession, options: &GlobalOptions, image: &ImageGeometry) -> Result<SubmissionPayload, EditorError> {
    let scale = image.scale_factor()?;
    let text_lines = session
        .layers
        .layers()
        .iter()
        .map(|layer| {
            let style = layer.style();
            let placement = place(layer.bounds().origin, style.font_size_px, image.displayed.origin, scale);
            TextLine {
                text: layer.text().to_owned(),
                color: style.color.clone(),
                size: placement.size,
                x_pos: placement.x_pos,
                y_pos: placement.y_pos,
                opacity: style.opacity_percent,
                border_color_hex: style.border_color.clone(),
            }
        })
        .collect();

    Ok(SubmissionPayload {
        template_id: session.template().id.clone(),
        text_border: options.border_enabled,
        text_lines,
    })
}
