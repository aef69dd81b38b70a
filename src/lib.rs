//! RONDEL - Circular progress indicator widget for egui
//!
//! A single reusable visual control: a circular track, an animated progress
//! arc and an optional centered text label. Embed it in any egui application;
//! the demo binary (`rondel-demo`) shows a minimal host.

pub mod widgets;

// Re-export the widget types for embedding applications
pub use widgets::ring::{CircularProgress, RingGeometry};
