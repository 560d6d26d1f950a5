//! Portable JSON snapshot for export/import.
//!
//! The export carries completion and notes only:
//! `{ "completed": [ids], "notes": { id: text }, "version": "1.0" }`.
//! Skipped levels and view state stay local.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use thiserror::Error;

use super::persistence::split_notes;
use crate::models::progress::ProgressState;

pub const EXPORT_VERSION: &str = "1.0";

#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The chosen file could not be read or is not a snapshot document.
    #[error("Error importing file. Please make sure it's a valid JSON file. ({reason})")]
    ImportParse { reason: String },
    #[error("failed to write export {path}: {source}")]
    ExportIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode export: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub completed: Vec<String>,
    pub notes: BTreeMap<String, String>,
    pub version: String,
}

impl ExportDocument {
    pub fn from_state(state: &ProgressState) -> Self {
        Self {
            completed: state.completed.iter().cloned().collect(),
            notes: state.notes.clone(),
            version: EXPORT_VERSION.to_string(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// `dan-progress-<YYYY-MM-DD>.json`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("dan-progress-{}.json", date.format("%Y-%m-%d"))
}

pub fn write_export(path: &Path, state: &ProgressState) -> Result<(), SnapshotError> {
    let json = ExportDocument::from_state(state).to_json_pretty()?;
    fs::write(path, json).map_err(|source| SnapshotError::ExportIo {
        path: path.display().to_string(),
        source,
    })?;
    log::info!("STORAGE: Exported progress to {:?}", path);
    Ok(())
}

/// Lenient view of an export document: every field is optional.
#[derive(Debug, Deserialize)]
struct ImportDocument {
    #[serde(default)]
    completed: Option<Vec<String>>,
    #[serde(default)]
    notes: Option<BTreeMap<String, Value>>,
    #[serde(default)]
    version: Option<Value>,
}

/// A parsed snapshot, ready to be applied in one step.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImportedSnapshot {
    pub completed: Option<BTreeSet<String>>,
    pub notes: Option<BTreeMap<String, String>>,
    /// Skip markers found in notes written by older versions.
    pub legacy_skipped: BTreeSet<String>,
    pub version: Option<String>,
}

impl ImportedSnapshot {
    /// Replaces completion and notes wholesale; absent fields are left alone.
    pub fn apply(self, state: &mut ProgressState) {
        state.replace_imported(self.completed, self.notes);
        state.skipped_levels.extend(self.legacy_skipped);
    }
}

pub fn import_snapshot(text: &str) -> Result<ImportedSnapshot, SnapshotError> {
    let parse_err = |e: serde_json::Error| SnapshotError::ImportParse {
        reason: e.to_string(),
    };
    let value: Value = serde_json::from_str(text).map_err(parse_err)?;
    if !value.is_object() {
        return Err(SnapshotError::ImportParse {
            reason: "expected a JSON object".to_string(),
        });
    }
    let doc: ImportDocument = serde_json::from_value(value).map_err(parse_err)?;

    let version = doc.version.map(|v| match v {
        Value::String(s) => s,
        other => other.to_string(),
    });

    let (notes, legacy_skipped) = match doc.notes {
        Some(raw) => {
            let (notes, skipped) = split_notes(raw);
            (Some(notes), skipped)
        }
        None => (None, BTreeSet::new()),
    };

    Ok(ImportedSnapshot {
        completed: doc.completed.map(|ids| ids.into_iter().collect()),
        notes,
        legacy_skipped,
        version,
    })
}

pub fn import_file(path: &Path) -> Result<ImportedSnapshot, SnapshotError> {
    let text = fs::read_to_string(path).map_err(|e| SnapshotError::ImportParse {
        reason: format!("{}: {}", path.display(), e),
    })?;
    let snapshot = import_snapshot(&text)?;
    log::info!(
        "STORAGE: Read snapshot {:?} (version {})",
        path,
        snapshot.version.as_deref().unwrap_or("none")
    );
    Ok(snapshot)
}
