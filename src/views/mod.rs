//! Everything the user sees: pure view models and the egui screen.

pub mod derive;
pub mod tracker;
