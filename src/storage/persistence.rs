//! Maps `ProgressState` onto the key-value records.
//!
//! Three records are kept:
//! - `danProgress`: `{ "completed": [ids], "expanded": [ids] }`
//! - `danNotes`: `{ id: text }`
//! - `danSkipped`: `[level names]`
//!
//! Every save overwrites all of them. Loading tolerates missing or broken
//! records one key at a time.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

use super::{KeyValueStore, StorageError};
use crate::models::progress::{ProgressState, ViewState};

pub const PROGRESS_KEY: &str = "danProgress";
pub const NOTES_KEY: &str = "danNotes";
pub const SKIPPED_KEY: &str = "danSkipped";

/// Older data kept skip markers inside the notes record as `skipped_<level>: true`.
const LEGACY_SKIP_PREFIX: &str = "skipped_";

#[derive(Debug, Default, Serialize, Deserialize)]
struct ProgressRecord {
    #[serde(default)]
    completed: Vec<String>,
    #[serde(default)]
    expanded: Vec<String>,
}

/// Splits a raw notes object into real notes and legacy skip markers.
///
/// String values are always notes, even under a `skipped_` key. A `true`
/// under a `skipped_` key is a skip marker. Anything else is dropped.
pub(crate) fn split_notes(
    raw: BTreeMap<String, Value>,
) -> (BTreeMap<String, String>, BTreeSet<String>) {
    let mut notes = BTreeMap::new();
    let mut skipped = BTreeSet::new();

    for (key, value) in raw {
        match value {
            Value::String(text) => {
                notes.insert(key, text);
            }
            Value::Bool(true) if key.starts_with(LEGACY_SKIP_PREFIX) => {
                skipped.insert(key[LEGACY_SKIP_PREFIX.len()..].to_string());
            }
            other => {
                log::warn!("STORAGE: Dropping non-text note {:?} = {}", key, other);
            }
        }
    }

    (notes, skipped)
}

pub struct Persistence {
    store: Box<dyn KeyValueStore>,
}

impl Persistence {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Overwrites every record with the current state.
    ///
    /// Records are independent files, so there is no transaction across
    /// them. Every record is attempted even when an earlier one fails, which
    /// keeps the stored records as close to `state` as possible; the first
    /// error is returned.
    pub fn save(&mut self, state: &ProgressState) -> Result<(), StorageError> {
        let progress = ProgressRecord {
            completed: state.completed.iter().cloned().collect(),
            expanded: state.view.expanded_cards.iter().cloned().collect(),
        };
        let results = [
            self.write(PROGRESS_KEY, &progress),
            self.write(NOTES_KEY, &state.notes),
            self.write(SKIPPED_KEY, &state.skipped_levels),
        ];

        let mut first_err = None;
        for e in results.into_iter().filter_map(Result::err) {
            if first_err.is_none() {
                first_err = Some(e);
            } else {
                log::warn!("STORAGE: {}", e);
            }
        }
        if let Some(e) = first_err {
            return Err(e);
        }

        log::debug!(
            "STORAGE: Saved {} completed, {} notes, {} skipped",
            state.completed.len(),
            state.notes.len(),
            state.skipped_levels.len()
        );
        Ok(())
    }

    /// Reads the records back. Missing or malformed records become empty.
    pub fn load(&self) -> ProgressState {
        let progress: ProgressRecord = self.read(PROGRESS_KEY).unwrap_or_default();
        let raw_notes: BTreeMap<String, Value> = self.read(NOTES_KEY).unwrap_or_default();
        let mut skipped_levels: BTreeSet<String> = self.read(SKIPPED_KEY).unwrap_or_default();

        let (notes, legacy_skipped) = split_notes(raw_notes);
        if !legacy_skipped.is_empty() {
            log::info!(
                "STORAGE: Migrating {} legacy skip markers out of notes",
                legacy_skipped.len()
            );
            skipped_levels.extend(legacy_skipped);
        }

        ProgressState {
            completed: progress.completed.into_iter().collect(),
            notes,
            skipped_levels,
            view: ViewState {
                current_level: None,
                expanded_cards: progress.expanded.into_iter().collect(),
            },
        }
    }

    /// Removes every record, leaving the store as on first run.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        for key in [PROGRESS_KEY, NOTES_KEY, SKIPPED_KEY] {
            self.store.remove(key)?;
        }
        log::info!("STORAGE: Cleared all progress records");
        Ok(())
    }

    fn write<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value).map_err(|source| StorageError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.store.set(key, &json)
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("STORAGE: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("STORAGE: Ignoring malformed {:?} record: {}", key, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn sample_state() -> ProgressState {
        let mut state = ProgressState::default();
        state.toggle_completion("a1");
        state.toggle_completion("b2");
        state.set_note("a1", "FC next time");
        state.skipped_levels.insert("Dan1".to_string());
        state.view.expanded_cards.insert("b2".to_string());
        state.show_level("Dan2");
        state
    }

    #[test]
    fn test_first_run_loads_empty() {
        let persistence = Persistence::new(MemoryStore::new());
        assert_eq!(persistence.load(), ProgressState::default());
    }

    #[test]
    fn test_save_then_load() {
        let mut persistence = Persistence::new(MemoryStore::new());
        let state = sample_state();
        persistence.save(&state).unwrap();

        let loaded = persistence.load();
        assert_eq!(loaded.completed, state.completed);
        assert_eq!(loaded.notes, state.notes);
        assert_eq!(loaded.skipped_levels, state.skipped_levels);
        assert_eq!(loaded.view.expanded_cards, state.view.expanded_cards);
        assert_eq!(loaded.view.current_level, None);
    }

    #[test]
    fn test_malformed_record_only_loses_its_own_key() {
        let store = MemoryStore::new()
            .with_record(PROGRESS_KEY, r#"{"completed": ["a1", "a2"]}"#)
            .with_record(NOTES_KEY, "{not json")
            .with_record(SKIPPED_KEY, r#"["Dan1"]"#);
        let loaded = Persistence::new(store).load();

        assert_eq!(loaded.completed.len(), 2);
        assert!(loaded.notes.is_empty());
        assert!(loaded.skipped_levels.contains("Dan1"));
        assert!(loaded.view.expanded_cards.is_empty());
    }

    #[test]
    fn test_legacy_skip_markers_are_migrated() {
        let store = MemoryStore::new().with_record(
            NOTES_KEY,
            r#"{"a1": "notes", "skipped_Dan1": true, "skipped_weird": "a real note", "x": 3}"#,
        );
        let loaded = Persistence::new(store).load();

        assert_eq!(loaded.skipped_levels, BTreeSet::from(["Dan1".to_string()]));
        assert_eq!(loaded.note("a1"), "notes");
        assert_eq!(loaded.note("skipped_weird"), "a real note");
        assert!(!loaded.notes.contains_key("skipped_Dan1"));
        assert!(!loaded.notes.contains_key("x"));
    }

    #[test]
    fn test_save_writes_split_records() {
        let mut persistence = Persistence::new(MemoryStore::new());
        persistence.save(&sample_state()).unwrap();

        let notes: Value =
            serde_json::from_str(&persistence.store.get(NOTES_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(notes, serde_json::json!({"a1": "FC next time"}));

        let progress: Value =
            serde_json::from_str(&persistence.store.get(PROGRESS_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(
            progress,
            serde_json::json!({"completed": ["a1", "b2"], "expanded": ["b2"]})
        );
    }

    /// Rejects writes to one key, delegating everything else.
    struct RejectingStore {
        inner: MemoryStore,
        rejected: &'static str,
    }

    impl KeyValueStore for RejectingStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            if key == self.rejected {
                return Err(StorageError::Io {
                    key: key.to_string(),
                    source: std::io::Error::other("disk full"),
                });
            }
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> Result<(), StorageError> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_failed_record_does_not_stop_the_others() {
        let mut persistence = Persistence::new(RejectingStore {
            inner: MemoryStore::new(),
            rejected: NOTES_KEY,
        });
        let state = sample_state();

        let err = persistence.save(&state).unwrap_err();
        assert!(matches!(err, StorageError::Io { ref key, .. } if key == NOTES_KEY));

        let loaded = persistence.load();
        assert_eq!(loaded.completed, state.completed);
        assert_eq!(loaded.skipped_levels, state.skipped_levels);
        assert!(loaded.notes.is_empty());
    }

    #[test]
    fn test_clear_resets_to_first_run() {
        let mut persistence = Persistence::new(MemoryStore::new());
        persistence.save(&sample_state()).unwrap();
        persistence.clear().unwrap();
        assert_eq!(persistence.load(), ProgressState::default());
    }
}
