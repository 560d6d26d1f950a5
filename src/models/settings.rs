//! Application settings persisted as `settings.toml`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default settings file, next to the executable's working directory.
pub const SETTINGS_FILE: &str = "settings.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to write settings {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode settings: {0}")]
    Encode(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// JSON catalog of levels and maps.
    pub catalog_path: PathBuf,
    /// Directory holding the progress records.
    pub data_dir: PathBuf,
    pub window_width: f64,
    pub window_height: f64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("data/dan_maps.json"),
            data_dir: PathBuf::from("data/progress"),
            window_width: 1280.0,
            window_height: 800.0,
        }
    }
}

impl AppSettings {
    /// Loads `settings.toml`, writing the defaults on first run.
    pub fn load() -> Self {
        Self::load_from(Path::new(SETTINGS_FILE))
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(settings) => settings,
                Err(e) => {
                    log::error!("SETTINGS: Failed to parse {:?}: {}", path, e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("SETTINGS: No settings at {:?}, using defaults", path);
                let settings = Self::default();
                if let Err(e) = settings.save_to(path) {
                    log::warn!("SETTINGS: Could not write defaults: {}", e);
                }
                settings
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let io_err = |source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        };

        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, content).map_err(io_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_run_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");

        let settings = AppSettings::load_from(&path);
        assert_eq!(settings, AppSettings::default());
        assert!(path.exists());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "data_dir = \"elsewhere\"\n").unwrap();

        let settings = AppSettings::load_from(&path);
        assert_eq!(settings.data_dir, PathBuf::from("elsewhere"));
        assert_eq!(settings.catalog_path, AppSettings::default().catalog_path);
    }

    #[test]
    fn test_save_reports_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        fs::write(&blocker, "").unwrap();

        let err = AppSettings::default()
            .save_to(&blocker.join("settings.toml"))
            .unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config").join("settings.toml");
        let settings = AppSettings {
            window_width: 1600.0,
            ..AppSettings::default()
        };
        settings.save_to(&path).unwrap();
        assert_eq!(AppSettings::load_from(&path), settings);
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "window_width = \"wide\"").unwrap();

        assert_eq!(AppSettings::load_from(&path), AppSettings::default());
    }
}
