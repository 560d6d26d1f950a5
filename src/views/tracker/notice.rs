//! Dismissible notice banner.

use egui::{Align2, Area, Color32, Frame, Id, RichText};

use crate::shared::messages::{Notice, NoticeKind};

/// Returns `true` when the user dismissed the notice.
pub fn render_notice(ctx: &egui::Context, notice: &Notice) -> bool {
    let fill = match notice.kind {
        NoticeKind::Info => Color32::from_rgb(46, 90, 60),
        NoticeKind::Error => Color32::from_rgb(120, 40, 40),
    };
    let mut dismissed = false;

    Area::new(Id::new("notice").with(notice.id))
        .anchor(Align2::CENTER_TOP, [0.0, 12.0])
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            Frame::default()
                .corner_radius(6.0)
                .inner_margin(10.0)
                .fill(fill)
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(&notice.text).color(Color32::WHITE));
                        ui.add_space(12.0);
                        if ui.small_button("OK").clicked() {
                            dismissed = true;
                        }
                    });
                });
        });

    dismissed
}
