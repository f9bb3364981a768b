use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::capture::BatchExportOptions;
use crate::geometry::shape_string::DEFAULT_PRECISION;

/// Directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "poiforge";
pub const SETTINGS_FILE: &str = "settings.json";

#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// User preferences persisted between runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory of the last export, used as the default next time
    pub last_export_dir: Option<PathBuf>,
    pub save_geojson: bool,
    pub save_shapefile: bool,
    /// Decimal places when writing provider shape strings
    pub shape_precision: usize,
    /// Start capturing detected POIs as soon as the app opens
    pub capture_on_startup: bool,
    pub show_log_timestamps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            last_export_dir: None,
            save_geojson: true,
            save_shapefile: true,
            shape_precision: DEFAULT_PRECISION,
            capture_on_startup: false,
            show_log_timestamps: false,
        }
    }
}

/// `<config dir>/poiforge`, when the platform has a config dir
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME))
}

impl Settings {
    pub fn save_to_dir(&self, dir: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::create_dir_all(dir)?;
        std::fs::write(dir.join(SETTINGS_FILE), json)?;
        Ok(())
    }

    /// Load settings, falling back to defaults when no file exists yet
    pub fn load_from_dir(dir: &Path) -> Result<Self, SettingsError> {
        let path = dir.join(SETTINGS_FILE);
        if path.exists() {
            let json = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&json)?)
        } else {
            Ok(Settings::default())
        }
    }

    /// Load from the platform config dir; any failure yields defaults
    pub fn load_or_default() -> Self {
        let Some(dir) = config_dir() else {
            return Settings::default();
        };
        match Settings::load_from_dir(&dir) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Failed to load settings from {}: {}", dir.display(), e);
                Settings::default()
            }
        }
    }

    /// Export directory to suggest: last used, else the working directory
    pub fn export_dir(&self) -> PathBuf {
        self.last_export_dir
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Batch options pre-filled from these preferences
    pub fn batch_options(&self, base_name: impl Into<String>) -> BatchExportOptions {
        BatchExportOptions {
            directory: self.export_dir(),
            base_name: base_name.into(),
            save_geojson: self.save_geojson,
            save_shapefile: self.save_shapefile,
        }
    }

    /// Remember choices from a finished batch export
    pub fn remember_batch(&mut self, options: &BatchExportOptions) {
        self.last_export_dir = Some(options.directory.clone());
        self.save_geojson = options.save_geojson;
        self.save_shapefile = options.save_shapefile;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let settings = Settings::load_from_dir(dir.path()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.shape_precision, 6);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("nested");
        let mut settings = Settings::default();
        settings.last_export_dir = Some(PathBuf::from("/data/exports"));
        settings.save_shapefile = false;
        settings.save_to_dir(&nested).unwrap();

        let loaded = Settings::load_from_dir(&nested).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILE), r#"{"shape_precision": 3}"#).unwrap();
        let loaded = Settings::load_from_dir(dir.path()).unwrap();
        assert_eq!(loaded.shape_precision, 3);
        assert!(loaded.save_geojson);
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILE), "not json").unwrap();
        assert!(matches!(Settings::load_from_dir(dir.path()), Err(SettingsError::Json(_))));
    }

    #[test]
    fn test_remember_batch() {
        let mut settings = Settings::default();
        let mut options = settings.batch_options("gaode_3");
        options.directory = PathBuf::from("/exports");
        options.save_geojson = false;
        settings.remember_batch(&options);
        assert_eq!(settings.export_dir(), PathBuf::from("/exports"));
        assert!(!settings.batch_options("x").save_geojson);
    }
}
