//! Text-overlay editor core for the template captioning tool.
//!
//! This crate owns everything between raw pointer/control input and the
//! request sent to the rendering service: the ordered set of text layers on
//! a template, the drag gesture that moves them, the conversion from the
//! scaled on-screen preview to the template's natural pixel grid, and the
//! assembly of the submission payload. It does no I/O. The view is reached
//! only through the [`handle::Surface`] and [`handle::Handle`] traits.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`editor`] | Top-level [`editor::Editor`] holding surface, session and options |
//! | [`session`] | Templates and the per-template [`session::EditorSession`] |
//! | [`store`] | Ordered layer store with the active-layer pointer |
//! | [`layer`] | Text layers, their style and typed edits |
//! | [`drag`] | Drag gesture state machine with container clamping |
//! | [`hit`] | Hit-testing pointer positions against layer bounds |
//! | [`transform`] | Screen-space to backend-space conversion |
//! | [`submission`] | Backend request payload |
//! | [`handle`] | View-host traits |
//! | [`view`] | Headless view host |
//! | [`color`] | Hex color values |
//! | [`geom`] | Points, sizes and rectangles |
//! | [`consts`] | Defaults and calibration constants |
//! | [`error`] | Editor errors |

pub mod color;
pub mod consts;
pub mod drag;
pub mod editor;
pub mod error;
pub mod geom;
pub mod handle;
pub mod hit;
pub mod layer;
pub mod session;
pub mod store;
pub mod submission;
pub mod transform;
pub mod view;

pub use editor::Editor;
pub use error::EditorError;
