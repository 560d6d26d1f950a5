//! Small painters for the four stats shown on a song card.

use egui::{Color32, RichText, Sense, Stroke, Ui, Vec2};
use std::f32::consts::PI;

use crate::views::derive::StarGlyph;

const STAR_GOLD: Color32 = Color32::from_rgb(255, 204, 51);
const STAR_HALF: Color32 = Color32::from_rgb(180, 140, 40);
const STAR_EMPTY: Color32 = Color32::from_gray(90);
const ACCENT: Color32 = Color32::from_rgb(102, 178, 255);

/// Max pendulum deflection either side of vertical.
const PENDULUM_SWING: f32 = PI / 6.0;

pub fn star_rating(ui: &mut Ui, sr_label: &str, stars: &[StarGlyph]) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 1.0;
        ui.label(RichText::new(sr_label).strong());
        ui.add_space(4.0);
        for glyph in stars {
            let (text, color) = match glyph {
                StarGlyph::Full => ("★", STAR_GOLD),
                StarGlyph::Half => ("★", STAR_HALF),
                StarGlyph::Empty => ("☆", STAR_EMPTY),
            };
            ui.label(RichText::new(text).color(color));
        }
    });
}

/// A pendulum swinging once per beat, next to the BPM value.
pub fn bpm_pendulum(ui: &mut Ui, bpm: u32, period_secs: f32) {
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(Vec2::new(24.0, 28.0), Sense::hover());
        if ui.is_rect_visible(rect) {
            let angle = if period_secs > 0.0 {
                let t = ui.input(|i| i.time) as f32;
                ui.ctx().request_repaint();
                PENDULUM_SWING * (PI * t / period_secs).sin()
            } else {
                0.0
            };

            let pivot = rect.center_top();
            let arm = rect.height() - 6.0;
            let bob = pivot + Vec2::new(angle.sin() * arm, angle.cos() * arm);
            let painter = ui.painter();
            painter.line_segment([pivot, bob], Stroke::new(1.5, Color32::LIGHT_GRAY));
            painter.circle_filled(bob, 4.0, ACCENT);
        }
        ui.label(RichText::new(bpm.to_string()).strong());
    });
}

/// Hit circle drawn at the size implied by CS.
pub fn cs_circle(ui: &mut Ui, cs_label: &str, diameter: f32) {
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(Vec2::splat(40.0), Sense::hover());
        if ui.is_rect_visible(rect) {
            ui.painter()
                .circle_stroke(rect.center(), diameter / 2.0, Stroke::new(2.0, ACCENT));
        }
        ui.label(RichText::new(cs_label).strong());
    });
}

pub fn length_bar(ui: &mut Ui, length: &str, width: f32) {
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(Vec2::new(width, 6.0), Sense::hover());
        if ui.is_rect_visible(rect) {
            ui.painter().rect_filled(rect, 3.0, ACCENT);
        }
        ui.label(RichText::new(length).strong());
    });
}
