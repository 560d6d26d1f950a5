//! Domain models: catalog, progress state, derived stats and settings.

pub mod catalog;
pub mod progress;
pub mod settings;
pub mod stats;
