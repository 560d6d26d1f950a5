//! Modal dialogs: map notes and reset confirmation.

use egui::{Color32, Id, Modal, RichText};

use crate::views::derive::NotesModalView;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotesEvent {
    Save(String),
    Close,
}

/// Notes being edited for one map.
pub struct NotesEditor {
    pub map_id: String,
    draft: String,
}

impl NotesEditor {
    pub fn open(view: &NotesModalView) -> Self {
        Self {
            map_id: view.map_id.clone(),
            draft: view.note.clone(),
        }
    }

    pub fn render(&mut self, ctx: &egui::Context, view: &NotesModalView) -> Option<NotesEvent> {
        let mut event = None;

        let response = Modal::new(Id::new("notes_modal")).show(ctx, |ui| {
            ui.set_width(420.0);
            ui.heading(&view.title);
            ui.separator();

            info_line(ui, "Star Rating", &view.star_rating);
            info_line(ui, "BPM", &view.bpm);
            ui.label(&view.attributes);
            info_line(ui, "Length", &view.length);

            ui.add_space(8.0);
            ui.add(
                egui::TextEdit::multiline(&mut self.draft)
                    .hint_text("Add your notes about this map...")
                    .desired_rows(8)
                    .desired_width(f32::INFINITY),
            );

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Save Notes").clicked() {
                    event = Some(NotesEvent::Save(self.draft.clone()));
                }
                if ui.button("Cancel").clicked() {
                    event = Some(NotesEvent::Close);
                }
            });
        });

        if event.is_none() && response.should_close() {
            event = Some(NotesEvent::Close);
        }
        event
    }
}

fn info_line(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(format!("{label}:")).strong());
        ui.label(value);
    });
}

/// Asks before wiping progress. `Some(true)` means confirmed.
pub fn confirm_reset(ctx: &egui::Context) -> Option<bool> {
    let mut answer = None;

    let response = Modal::new(Id::new("confirm_reset")).show(ctx, |ui| {
        ui.set_width(320.0);
        ui.heading("Reset progress");
        ui.label("Are you sure you want to reset all progress? This cannot be undone.");
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui
                .button(RichText::new("Reset").color(Color32::from_rgb(239, 83, 80)))
                .clicked()
            {
                answer = Some(true);
            }
            if ui.button("Cancel").clicked() {
                answer = Some(false);
            }
        });
    });

    if answer.is_none() && response.should_close() {
        answer = Some(false);
    }
    answer
}
