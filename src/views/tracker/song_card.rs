//! Renders one map of the current level as a card.

use egui::{Color32, Frame, RichText, Stroke, Ui};

use crate::views::derive::SongCardView;
use crate::views::tracker::stat_widgets;

const CARD_FILL: Color32 = Color32::from_rgba_premultiplied(38, 38, 38, 230);
const CARD_DONE_FILL: Color32 = Color32::from_rgba_premultiplied(30, 52, 36, 230);
const DONE_STROKE: Color32 = Color32::from_rgb(76, 175, 80);
const MOD_BADGE: Color32 = Color32::from_rgb(156, 39, 176);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardEvent {
    ToggleCompletion,
    OpenNotes,
}

pub struct SongCard;

impl SongCard {
    pub fn render(ui: &mut Ui, card: &SongCardView) -> Option<CardEvent> {
        let mut event = None;

        let (fill, stroke) = if card.completed {
            (CARD_DONE_FILL, Stroke::new(1.5, DONE_STROKE))
        } else {
            (CARD_FILL, Stroke::new(1.0, Color32::from_gray(60)))
        };

        Frame::default()
            .corner_radius(6.0)
            .inner_margin(10.0)
            .outer_margin(4.0)
            .fill(fill)
            .stroke(stroke)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());

                ui.horizontal(|ui| {
                    let mut checked = card.completed;
                    if ui.checkbox(&mut checked, "").changed() {
                        event = Some(CardEvent::ToggleCompletion);
                    }

                    ui.hyperlink_to(RichText::new(&card.name).size(16.0).strong(), &card.url);

                    if let Some(label) = &card.mod_label {
                        Frame::default()
                            .corner_radius(4.0)
                            .inner_margin(egui::Margin::symmetric(6, 2))
                            .fill(MOD_BADGE)
                            .show(ui, |ui| {
                                ui.label(RichText::new(label).small().color(Color32::WHITE));
                            });
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let text = if card.has_note { "📝 Notes •" } else { "📝 Notes" };
                        if ui.button(text).clicked() {
                            event = Some(CardEvent::OpenNotes);
                        }
                    });
                });

                ui.add_space(6.0);

                ui.columns(4, |cols| {
                    stat_column(&mut cols[0], "Stars", |ui| {
                        stat_widgets::star_rating(ui, &card.sr_label, &card.stars)
                    });
                    stat_column(&mut cols[1], "BPM", |ui| {
                        stat_widgets::bpm_pendulum(ui, card.bpm, card.pendulum_period)
                    });
                    stat_column(&mut cols[2], "CS", |ui| {
                        stat_widgets::cs_circle(ui, &card.cs_label, card.circle_diameter)
                    });
                    stat_column(&mut cols[3], "Length", |ui| {
                        stat_widgets::length_bar(ui, &card.length, card.length_bar_width)
                    });
                });
            });

        event
    }
}

fn stat_column(ui: &mut Ui, label: &str, add_contents: impl FnOnce(&mut Ui)) {
    ui.vertical(|ui| {
        ui.label(RichText::new(label).small().color(Color32::GRAY));
        add_contents(ui);
    });
}
