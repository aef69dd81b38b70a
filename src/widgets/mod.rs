//! UI Widgets - modular, reusable UI components
//!
//! Each widget is self-contained and painted through `egui::Painter`

pub mod ring;
