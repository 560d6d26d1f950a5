//! "Skip to level" selector at the bottom of the sidebar.

use egui::{RichText, Ui};

pub struct SkipPanel {
    selected: Option<String>,
}

impl SkipPanel {
    pub fn new() -> Self {
        Self { selected: None }
    }

    /// Returns the chosen level when the user presses the skip button.
    pub fn render(&mut self, ui: &mut Ui, options: &[String]) -> Option<String> {
        if self
            .selected
            .as_ref()
            .is_none_or(|sel| !options.contains(sel))
        {
            self.selected = options.first().cloned();
        }

        let mut requested = None;

        ui.label(RichText::new("Skip to level").strong());
        ui.horizontal(|ui| {
            egui::ComboBox::from_id_salt("skip_level")
                .selected_text(self.selected.as_deref().unwrap_or("-"))
                .show_ui(ui, |ui| {
                    for name in options {
                        ui.selectable_value(&mut self.selected, Some(name.clone()), name);
                    }
                });

            if ui
                .add_enabled(self.selected.is_some(), egui::Button::new("Skip"))
                .on_hover_text("Mark every earlier level as complete")
                .clicked()
            {
                requested = self.selected.clone();
            }
        });

        requested
    }
}

impl Default for SkipPanel {
    fn default() -> Self {
        Self::new()
    }
}
