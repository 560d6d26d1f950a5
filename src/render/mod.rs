//! Window, GPU context and the egui overlay that draws the tracker.

pub mod app;
pub mod context;
pub mod renderer;
pub mod ui;
