//! Overall progress header and the export/import/reset toolbar.

use egui::{Color32, ProgressBar, RichText, Ui};

use crate::views::derive::OverallView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarEvent {
    Export,
    Import,
    Reset,
}

pub struct OverallHeader;

impl OverallHeader {
    pub fn render(ui: &mut Ui, overall: &OverallView) -> Option<ToolbarEvent> {
        let mut event = None;

        ui.horizontal(|ui| {
            ui.heading(RichText::new("Dan Course Tracker").strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .button(RichText::new("Reset").color(Color32::from_rgb(239, 83, 80)))
                    .clicked()
                {
                    event = Some(ToolbarEvent::Reset);
                }
                if ui.button("Import").clicked() {
                    event = Some(ToolbarEvent::Import);
                }
                if ui.button("Export").clicked() {
                    event = Some(ToolbarEvent::Export);
                }
            });
        });

        ui.add_space(4.0);
        ui.add(
            ProgressBar::new(overall.bar_fraction())
                .text(format!("{}%", overall.percentage))
                .desired_height(18.0),
        );

        ui.horizontal(|ui| {
            ui.label(RichText::new(overall.headline()).strong());
            ui.separator();
            counter(ui, "Completed", overall.completed);
            counter(ui, "Total", overall.total);
            counter(ui, "Remaining", overall.remaining);
        });

        event
    }
}

fn counter(ui: &mut Ui, label: &str, value: usize) {
    ui.label(RichText::new(format!("{label}:")).color(Color32::GRAY));
    ui.label(RichText::new(value.to_string()).strong());
    ui.add_space(8.0);
}
