//! Shared constants for the canvas crate.

// ── Layer defaults ──────────────────────────────────────────────

/// Font size of a freshly created layer, in screen pixels.
pub const DEFAULT_FONT_SIZE_PX: u32 = 50;

/// Fill color of a freshly created layer.
pub const DEFAULT_FILL: &str = "#ffffff";

/// Border (text stroke) color of a freshly created layer.
pub const DEFAULT_BORDER: &str = "#000000";

/// Opacity of a freshly created layer, in percent.
pub const DEFAULT_OPACITY_PERCENT: u8 = 100;

/// Text stroke width applied to a handle while the global border is on.
pub const STROKE_WIDTH_PX: f64 = 2.0;

/// Container-relative top-left of a freshly created layer.
pub const DEFAULT_POSITION_PX: f64 = 20.0;

/// Text of the layer every session starts with.
pub const FIRST_LAYER_TEXT: &str = "YOUR TEXT";

// ── Backend calibration ─────────────────────────────────────────

/// Correction applied to scaled font sizes so the renderer's font metrics
/// match what the editor shows. Calibrated against the rendering service;
/// do not derive or tune.
pub const FONT_SIZE_CORRECTION: f64 = 0.8;

// ── Headless text metrics ───────────────────────────────────────

/// Estimated glyph advance as a fraction of the font size.
pub const GLYPH_ADVANCE_EM: f64 = 0.6;

/// Estimated line height as a fraction of the font size.
pub const LINE_HEIGHT_EM: f64 = 1.2;
