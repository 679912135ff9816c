//! Editing glue between pointer input and the map
//!
//! This module contains:
//! - The pick/paint state machine driven by pointer events
//! - Scripted strokes that replay a straight drag

/// Pointer event dispatch and session state
pub mod session;
/// Straight-line strokes and their event sequences
pub mod stroke;

pub use session::{EditSession, InputEvent, SessionState, TilesetPicker};
pub use stroke::Stroke;
