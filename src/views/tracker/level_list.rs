//! Sidebar list of levels with their progress.

use egui::text::{LayoutJob, TextFormat};
use egui::{Button, Color32, FontId, Ui, Vec2};

use crate::views::derive::LevelRowView;

const SKIPPED_TEXT: Color32 = Color32::from_gray(130);

pub struct LevelList;

impl LevelList {
    /// Returns the level the user clicked, if any.
    pub fn render(ui: &mut Ui, rows: &[LevelRowView]) -> Option<String> {
        let mut clicked = None;

        egui::ScrollArea::vertical()
            .id_salt("level_list")
            .auto_shrink([false, true])
            .max_height((ui.available_height() - 90.0).max(120.0))
            .show(ui, |ui| {
                for row in rows {
                    let button = Button::new(row_text(row))
                        .selected(row.active)
                        .min_size(Vec2::new(ui.available_width(), 40.0));

                    if ui.add(button).clicked() {
                        clicked = Some(row.name.clone());
                    }
                }
            });

        clicked
    }
}

fn row_text(row: &LevelRowView) -> LayoutJob {
    let name_color = if row.skipped {
        SKIPPED_TEXT
    } else {
        Color32::WHITE
    };

    let mut job = LayoutJob::default();
    job.append(
        &row.name,
        0.0,
        TextFormat {
            font_id: FontId::proportional(15.0),
            color: name_color,
            italics: row.skipped,
            ..Default::default()
        },
    );
    job.append(
        &format!("\n{}", row.progress_label),
        0.0,
        TextFormat {
            font_id: FontId::proportional(11.0),
            color: Color32::LIGHT_GRAY,
            ..Default::default()
        },
    );
    job
}
