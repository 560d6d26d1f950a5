//! The tracker screen: sidebar, header, level page and dialogs.
//!
//! Everything shown is derived from the latest snapshot each frame. The
//! screen only keeps transient UI state (open dialogs, the skip selection)
//! and turns clicks into `TrackerAction`s for the logic thread.

mod dialogs;
mod header;
mod level_list;
mod notice;
mod skip_panel;
mod song_card;
mod stat_widgets;

use egui::{Color32, RichText};
use std::path::PathBuf;

use crate::shared::messages::TrackerAction;
use crate::shared::snapshot::TrackerSnapshot;
use crate::storage::snapshot::export_file_name;
use crate::views::derive::{derive_view, notes_modal_view};

use dialogs::{NotesEditor, NotesEvent, confirm_reset};
use header::{OverallHeader, ToolbarEvent};
use level_list::LevelList;
use notice::render_notice;
use skip_panel::SkipPanel;
use song_card::{CardEvent, SongCard};

pub struct TrackerScreen {
    skip_panel: SkipPanel,
    notes_editor: Option<NotesEditor>,
    confirm_reset_open: bool,
}

impl TrackerScreen {
    pub fn new() -> Self {
        Self {
            skip_panel: SkipPanel::new(),
            notes_editor: None,
            confirm_reset_open: false,
        }
    }

    pub fn render(
        &mut self,
        ctx: &egui::Context,
        snapshot: &TrackerSnapshot,
    ) -> Vec<TrackerAction> {
        let mut actions = Vec::new();
        let view = derive_view(&snapshot.catalog, &snapshot.progress);

        egui::TopBottomPanel::top("overall_header")
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(10.0))
            .show(ctx, |ui| match OverallHeader::render(ui, &view.overall) {
                Some(ToolbarEvent::Export) => {
                    if let Some(path) = pick_export_path() {
                        actions.push(TrackerAction::Export(path));
                    }
                }
                Some(ToolbarEvent::Import) => {
                    if let Some(path) = pick_import_path() {
                        actions.push(TrackerAction::Import(path));
                    }
                }
                Some(ToolbarEvent::Reset) => self.confirm_reset_open = true,
                None => {}
            });

        egui::SidePanel::left("levels")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| {
                ui.add_space(6.0);
                ui.heading("Levels");
                ui.separator();

                if let Some(level) = LevelList::render(ui, &view.levels) {
                    actions.push(TrackerAction::ShowLevel(level));
                }

                ui.separator();
                if let Some(level) = self.skip_panel.render(ui, &view.skip_options) {
                    actions.push(TrackerAction::SkipToLevel(level));
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(level) = &view.current_level else {
                ui.centered_and_justified(|ui| {
                    let hint = if view.levels.is_empty() {
                        "No levels loaded. Check the catalog path in settings.toml."
                    } else {
                        "Select a level to start tracking"
                    };
                    ui.label(RichText::new(hint).size(18.0).color(Color32::GRAY));
                });
                return;
            };

            ui.heading(RichText::new(level).size(24.0).strong());
            ui.add_space(6.0);

            egui::ScrollArea::vertical()
                .id_salt("song_cards")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for card in &view.cards {
                        match SongCard::render(ui, card) {
                            Some(CardEvent::ToggleCompletion) => actions
                                .push(TrackerAction::ToggleCompletion(card.map_id.clone())),
                            Some(CardEvent::OpenNotes) => {
                                self.notes_editor = notes_modal_view(
                                    &snapshot.catalog,
                                    &snapshot.progress,
                                    &card.map_id,
                                )
                                .map(|modal| NotesEditor::open(&modal));
                            }
                            None => {}
                        }
                    }
                });
        });

        self.render_dialogs(ctx, snapshot, &mut actions);

        if let Some(notice) = &snapshot.notice
            && render_notice(ctx, notice)
        {
            actions.push(TrackerAction::DismissNotice(notice.id));
        }

        actions
    }

    fn render_dialogs(
        &mut self,
        ctx: &egui::Context,
        snapshot: &TrackerSnapshot,
        actions: &mut Vec<TrackerAction>,
    ) {
        if let Some(editor) = &mut self.notes_editor {
            let modal = notes_modal_view(&snapshot.catalog, &snapshot.progress, &editor.map_id);
            let event = match &modal {
                Some(modal) => editor.render(ctx, modal),
                None => Some(NotesEvent::Close),
            };
            match event {
                Some(NotesEvent::Save(text)) => {
                    actions.push(TrackerAction::SetNote {
                        map_id: editor.map_id.clone(),
                        text,
                    });
                    self.notes_editor = None;
                }
                Some(NotesEvent::Close) => self.notes_editor = None,
                None => {}
            }
        }

        if self.confirm_reset_open
            && let Some(confirmed) = confirm_reset(ctx)
        {
            self.confirm_reset_open = false;
            if confirmed {
                actions.push(TrackerAction::ResetAll);
            }
        }
    }
}

impl Default for TrackerScreen {
    fn default() -> Self {
        Self::new()
    }
}

fn pick_export_path() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Export progress")
        .set_file_name(export_file_name(chrono::Local::now().date_naive()))
        .add_filter("JSON", &["json"])
        .save_file()
}

fn pick_import_path() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Import progress")
        .add_filter("JSON", &["json"])
        .pick_file()
}
