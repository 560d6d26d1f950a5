//! Tracker state owned by the logic thread.
//!
//! Every action runs to completion here: mutate the progress, save it,
//! and leave a notice for the user when there is something to report.

use std::sync::Arc;

use crate::models::catalog::BeatmapCatalog;
use crate::models::progress::ProgressState;
use crate::shared::messages::{Notice, NoticeKind, TrackerAction};
use crate::shared::snapshot::{RenderState, TrackerSnapshot};
use crate::storage::Persistence;
use crate::storage::snapshot::{import_file, write_export};

pub struct TrackerState {
    catalog: Arc<BeatmapCatalog>,
    progress: ProgressState,
    persistence: Persistence,
    notice: Option<Notice>,
    next_notice_id: u64,
}

impl TrackerState {
    /// Restores saved progress and wraps the catalog for sharing.
    pub fn new(catalog: BeatmapCatalog, persistence: Persistence) -> Self {
        let progress = persistence.load();
        log::info!(
            "LOGIC: Restored {} completed maps, {} notes, {} skipped levels",
            progress.completed.len(),
            progress.notes.len(),
            progress.skipped_levels.len()
        );

        Self {
            catalog: Arc::new(catalog),
            progress,
            persistence,
            notice: None,
            next_notice_id: 0,
        }
    }

    pub fn handle_action(&mut self, action: TrackerAction) {
        match action {
            TrackerAction::ShowLevel(level) => {
                if self.catalog.level(&level).is_some() {
                    self.progress.show_level(&level);
                } else {
                    log::warn!("LOGIC: Unknown level {:?}", level);
                }
            }
            TrackerAction::ToggleCompletion(map_id) => {
                let done = self.progress.toggle_completion(&map_id);
                log::debug!("LOGIC: {} -> completed={}", map_id, done);
                self.persist();
            }
            TrackerAction::SetNote { map_id, text } => {
                self.progress.set_note(&map_id, text);
                self.persist();
            }
            TrackerAction::SkipToLevel(level) => {
                match self.progress.skip_to_level(&self.catalog, &level) {
                    Ok(outcome) => {
                        log::info!(
                            "LOGIC: Skipped {:?}, {} maps newly completed",
                            outcome.skipped_levels,
                            outcome.newly_completed
                        );
                        self.persist();
                        self.notify(
                            NoticeKind::Info,
                            format!(
                                "Skipped to {}! All previous levels marked as complete.",
                                outcome.target
                            ),
                        );
                    }
                    Err(e) => self.notify(NoticeKind::Error, e.to_string()),
                }
            }
            TrackerAction::ResetAll => {
                self.progress.reset_all();
                if let Err(e) = self.persistence.clear() {
                    log::error!("LOGIC: Failed to clear saved progress: {}", e);
                }
                self.notify(NoticeKind::Info, "Progress has been reset.".to_string());
            }
            TrackerAction::Export(path) => match write_export(&path, &self.progress) {
                Ok(()) => self.notify(
                    NoticeKind::Info,
                    format!("Progress exported to {}", path.display()),
                ),
                Err(e) => {
                    log::error!("LOGIC: {}", e);
                    self.notify(NoticeKind::Error, e.to_string());
                }
            },
            TrackerAction::Import(path) => match import_file(&path) {
                Ok(snapshot) => {
                    snapshot.apply(&mut self.progress);
                    self.persist();
                    self.notify(
                        NoticeKind::Info,
                        "Progress imported successfully!".to_string(),
                    );
                }
                Err(e) => {
                    log::warn!("LOGIC: Import of {:?} rejected: {}", path, e);
                    self.notify(NoticeKind::Error, e.to_string());
                }
            },
            TrackerAction::DismissNotice(id) => {
                if self.notice.as_ref().is_some_and(|n| n.id == id) {
                    self.notice = None;
                }
            }
        }
    }

    pub fn create_snapshot(&self) -> RenderState {
        RenderState::Tracker(TrackerSnapshot {
            catalog: Arc::clone(&self.catalog),
            progress: self.progress.clone(),
            notice: self.notice.clone(),
        })
    }

    /// Final save before the thread exits.
    pub fn shutdown(&mut self) {
        self.persist();
    }

    fn persist(&mut self) {
        if let Err(e) = self.persistence.save(&self.progress) {
            log::error!("LOGIC: Failed to save progress: {}", e);
        }
    }

    fn notify(&mut self, kind: NoticeKind, text: String) {
        self.next_notice_id += 1;
        self.notice = Some(Notice {
            id: self.next_notice_id,
            kind,
            text,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::tests::three_dans;
    use crate::storage::MemoryStore;
    use std::fs;

    fn tracker() -> TrackerState {
        TrackerState::new(three_dans(), Persistence::new(MemoryStore::new()))
    }

    fn snapshot(state: &TrackerState) -> TrackerSnapshot {
        match state.create_snapshot() {
            RenderState::Tracker(snap) => snap,
            RenderState::Empty => panic!("expected a tracker snapshot"),
        }
    }

    #[test]
    fn test_toggle_is_saved_immediately() {
        let mut state = tracker();
        state.handle_action(TrackerAction::ToggleCompletion("a1".into()));
        state.handle_action(TrackerAction::SetNote {
            map_id: "a1".into(),
            text: "cleared with 96%".into(),
        });

        let saved = state.persistence.load();
        assert!(saved.is_completed("a1"));
        assert_eq!(saved.note("a1"), "cleared with 96%");
    }

    #[test]
    fn test_invalid_skip_reports_notice_and_keeps_state() {
        let mut state = tracker();
        state.handle_action(TrackerAction::SkipToLevel("Dan1".into()));

        let snap = snapshot(&state);
        assert!(snap.progress.completed.is_empty());
        assert!(snap.progress.skipped_levels.is_empty());
        let notice = snap.notice.unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);

        state.handle_action(TrackerAction::DismissNotice(notice.id));
        assert!(snapshot(&state).notice.is_none());
    }

    #[test]
    fn test_dismiss_only_clears_the_matching_notice() {
        let mut state = tracker();
        state.handle_action(TrackerAction::SkipToLevel("Dan1".into()));
        let stale = snapshot(&state).notice.unwrap();

        state.handle_action(TrackerAction::SkipToLevel("Dan2".into()));
        state.handle_action(TrackerAction::DismissNotice(stale.id));

        let current = snapshot(&state).notice.unwrap();
        assert_ne!(current.id, stale.id);
        assert_eq!(
            current.text,
            "Skipped to Dan2! All previous levels marked as complete."
        );

        state.handle_action(TrackerAction::DismissNotice(current.id));
        assert!(snapshot(&state).notice.is_none());
    }

    #[test]
    fn test_skip_navigates_and_notifies() {
        let mut state = tracker();
        state.handle_action(TrackerAction::SkipToLevel("Dan3".into()));

        let snap = snapshot(&state);
        assert_eq!(snap.progress.completed.len(), 4);
        assert_eq!(snap.progress.view.current_level.as_deref(), Some("Dan3"));
        assert_eq!(
            snap.notice.unwrap().text,
            "Skipped to Dan3! All previous levels marked as complete."
        );
        assert_eq!(state.persistence.load().skipped_levels.len(), 2);
    }

    #[test]
    fn test_show_level_ignores_unknown_names() {
        let mut state = tracker();
        state.handle_action(TrackerAction::ShowLevel("Dan2".into()));
        state.handle_action(TrackerAction::ShowLevel("Nope".into()));
        assert_eq!(
            snapshot(&state).progress.view.current_level.as_deref(),
            Some("Dan2")
        );
    }

    #[test]
    fn test_bad_import_leaves_progress_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "<html>not json</html>").unwrap();

        let mut state = tracker();
        state.handle_action(TrackerAction::ToggleCompletion("b1".into()));
        let before = snapshot(&state).progress;

        state.handle_action(TrackerAction::Import(path));

        let snap = snapshot(&state);
        assert_eq!(snap.progress, before);
        assert_eq!(snap.notice.unwrap().kind, NoticeKind::Error);
    }

    #[test]
    fn test_export_then_import_in_another_tracker() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dan-progress.json");

        let mut source = tracker();
        source.handle_action(TrackerAction::ToggleCompletion("c2".into()));
        source.handle_action(TrackerAction::SetNote {
            map_id: "c2".into(),
            text: "finally".into(),
        });
        source.handle_action(TrackerAction::Export(path.clone()));

        let mut target = tracker();
        target.handle_action(TrackerAction::ToggleCompletion("a1".into()));
        target.handle_action(TrackerAction::Import(path));

        let snap = snapshot(&target);
        assert_eq!(snap.progress.completed, snapshot(&source).progress.completed);
        assert_eq!(snap.progress.notes, snapshot(&source).progress.notes);
        assert_eq!(snap.notice.unwrap().text, "Progress imported successfully!");
        assert!(target.persistence.load().is_completed("c2"));
    }

    #[test]
    fn test_reset_clears_state_and_store() {
        let mut state = tracker();
        state.handle_action(TrackerAction::SkipToLevel("Dan2".into()));
        state.handle_action(TrackerAction::ResetAll);

        assert_eq!(snapshot(&state).progress, ProgressState::default());
        assert_eq!(state.persistence.load(), ProgressState::default());
    }
}
