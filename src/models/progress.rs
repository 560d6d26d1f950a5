//! Tracker progress: completed maps, notes, skipped levels and view state.
//!
//! `ProgressState` is the single owner of everything the user can change.
//! The logic thread mutates it in response to actions and hands clones to
//! the renderer through snapshots.

use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

use crate::models::catalog::BeatmapCatalog;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    /// Skipping is only allowed to a known level after the first one.
    #[error("Cannot skip to {level:?}: pick a level after the first one")]
    InvalidSkipTarget { level: String },
}

/// UI navigation state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub current_level: Option<String>,
    /// Persisted with the progress record, never read when drawing.
    pub expanded_cards: BTreeSet<String>,
}

/// Result of a successful skip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipOutcome {
    pub target: String,
    pub skipped_levels: Vec<String>,
    /// Maps that were not completed before the skip.
    pub newly_completed: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressState {
    pub completed: BTreeSet<String>,
    pub notes: BTreeMap<String, String>,
    pub skipped_levels: BTreeSet<String>,
    pub view: ViewState,
}

impl ProgressState {
    pub fn is_completed(&self, map_id: &str) -> bool {
        self.completed.contains(map_id)
    }

    pub fn is_skipped(&self, level: &str) -> bool {
        self.skipped_levels.contains(level)
    }

    /// Flips completion of `map_id` and returns the new membership.
    pub fn toggle_completion(&mut self, map_id: &str) -> bool {
        if self.completed.remove(map_id) {
            false
        } else {
            self.completed.insert(map_id.to_string());
            true
        }
    }

    /// Upserts the note for `map_id`. An empty note is kept as "no note".
    pub fn set_note(&mut self, map_id: &str, text: impl Into<String>) {
        self.notes.insert(map_id.to_string(), text.into());
    }

    pub fn note(&self, map_id: &str) -> &str {
        self.notes.get(map_id).map(String::as_str).unwrap_or("")
    }

    pub fn show_level(&mut self, level: &str) {
        self.view.current_level = Some(level.to_string());
    }

    /// Completes every map of the levels before `target` and marks those
    /// levels as skipped. The target level's own maps are left untouched.
    pub fn skip_to_level(
        &mut self,
        catalog: &BeatmapCatalog,
        target: &str,
    ) -> Result<SkipOutcome, TrackerError> {
        let index = match catalog.level_index(target) {
            Some(i) if i > 0 => i,
            _ => {
                return Err(TrackerError::InvalidSkipTarget {
                    level: target.to_string(),
                });
            }
        };

        let mut newly_completed = 0;
        let mut skipped_levels = Vec::with_capacity(index);
        for level in &catalog.levels()[..index] {
            for id in level.map_ids() {
                if self.completed.insert(id.to_string()) {
                    newly_completed += 1;
                }
            }
            self.skipped_levels.insert(level.name.clone());
            skipped_levels.push(level.name.clone());
        }

        self.show_level(target);

        Ok(SkipOutcome {
            target: target.to_string(),
            skipped_levels,
            newly_completed,
        })
    }

    /// Clears completion, notes, skip markers and view state.
    pub fn reset_all(&mut self) {
        *self = Self::default();
    }

    /// Replaces completion and notes wholesale. `None` leaves a field as is.
    pub fn replace_imported(
        &mut self,
        completed: Option<BTreeSet<String>>,
        notes: Option<BTreeMap<String, String>>,
    ) {
        if let Some(completed) = completed {
            self.completed = completed;
        }
        if let Some(notes) = notes {
            self.notes = notes;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::tests::three_dans;

    #[test]
    fn test_toggle_twice_restores_membership() {
        let mut state = ProgressState::default();
        state.completed.insert("keep".to_string());
        let before = state.completed.clone();

        assert!(state.toggle_completion("a1"));
        assert!(state.is_completed("a1"));
        assert!(!state.toggle_completion("a1"));
        assert_eq!(state.completed, before);
    }

    #[test]
    fn test_set_note_upserts_and_allows_empty() {
        let mut state = ProgressState::default();
        state.set_note("a1", "hard jumps at 1:20");
        assert_eq!(state.note("a1"), "hard jumps at 1:20");
        state.set_note("a1", "");
        assert_eq!(state.note("a1"), "");
        assert!(state.notes.contains_key("a1"));
        assert_eq!(state.note("missing"), "");
    }

    #[test]
    fn test_skip_to_third_dan() {
        let catalog = three_dans();
        let mut state = ProgressState::default();

        let outcome = state.skip_to_level(&catalog, "Dan3").unwrap();

        for id in ["a1", "a2", "b1", "b2"] {
            assert!(state.is_completed(id), "{id} should be completed");
        }
        assert!(!state.is_completed("c1"));
        assert!(!state.is_completed("c2"));
        assert!(state.is_skipped("Dan1"));
        assert!(state.is_skipped("Dan2"));
        assert!(!state.is_skipped("Dan3"));
        assert_eq!(outcome.newly_completed, 4);
        assert_eq!(outcome.skipped_levels, vec!["Dan1", "Dan2"]);
        assert_eq!(state.view.current_level.as_deref(), Some("Dan3"));
    }

    #[test]
    fn test_skip_leaves_target_completion_alone() {
        let catalog = three_dans();
        let mut state = ProgressState::default();
        state.toggle_completion("b1");
        state.toggle_completion("a1");

        let outcome = state.skip_to_level(&catalog, "Dan2").unwrap();

        assert!(state.is_completed("b1"));
        assert!(!state.is_completed("b2"));
        assert!(!state.is_completed("c1"));
        assert_eq!(outcome.newly_completed, 1);
    }

    #[test]
    fn test_skip_to_first_or_unknown_level_is_rejected() {
        let catalog = three_dans();
        let mut state = ProgressState::default();
        state.toggle_completion("c1");
        let before = state.clone();

        assert_eq!(
            state.skip_to_level(&catalog, "Dan1"),
            Err(TrackerError::InvalidSkipTarget {
                level: "Dan1".to_string()
            })
        );
        assert!(state.skip_to_level(&catalog, "Dan9").is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn test_reset_clears_everything() {
        let catalog = three_dans();
        let mut state = ProgressState::default();
        state.skip_to_level(&catalog, "Dan2").unwrap();
        state.set_note("c1", "later");
        state.view.expanded_cards.insert("c1".to_string());

        state.reset_all();

        assert_eq!(state, ProgressState::default());
    }

    #[test]
    fn test_replace_imported_respects_missing_fields() {
        let mut state = ProgressState::default();
        state.toggle_completion("a1");
        state.set_note("a1", "old");

        state.replace_imported(None, Some(BTreeMap::from([("b1".into(), "new".into())])));
        assert!(state.is_completed("a1"));
        assert_eq!(state.note("a1"), "");
        assert_eq!(state.note("b1"), "new");

        state.replace_imported(Some(BTreeSet::from(["c2".to_string()])), None);
        assert!(!state.is_completed("a1"));
        assert!(state.is_completed("c2"));
        assert_eq!(state.note("b1"), "new");
    }
}
