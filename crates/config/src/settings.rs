// Application settings
// Loaded from ~/.config/gridcanvas/settings.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Why a settings file could not be used. `load()` never surfaces this;
/// it falls back to defaults. The path-based variants return it.
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "settings file unreadable: {}", e),
            SettingsError::Parse(e) => write!(f, "settings file invalid: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Grid geometry
    #[serde(rename = "grid.defaultColumnWidth")]
    pub default_column_width: f64,

    #[serde(rename = "grid.defaultRowHeight")]
    pub default_row_height: f64,

    #[serde(rename = "grid.rows")]
    pub rows: usize,

    #[serde(rename = "grid.columns")]
    pub columns: usize,

    // Interaction
    #[serde(rename = "scroll.arrowStep")]
    pub arrow_scroll_step: f64,

    #[serde(rename = "scroll.autoScrollSpeed")]
    pub auto_scroll_speed: f64,

    #[serde(rename = "scroll.edgeThreshold")]
    pub edge_threshold: f64,

    #[serde(rename = "resize.minColumnWidth")]
    pub min_column_width: f64,

    #[serde(rename = "resize.minRowHeight")]
    pub min_row_height: f64,

    // History
    #[serde(rename = "history.maxEntries")]
    pub history_max_entries: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_column_width: 80.0,
            default_row_height: 24.0,
            rows: 100_000,
            columns: 5_000,
            arrow_scroll_step: 50.0,
            auto_scroll_speed: 20.0,
            edge_threshold: 10.0,
            min_column_width: 20.0,
            min_row_height: 15.0,
            history_max_entries: 1000,
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gridcanvas");
        config_dir.join("settings.json")
    }

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("Error loading settings.json: {}", e);
                eprintln!("Using default settings");
                Self::default()
            }
        }
    }

    /// Load settings from a specific file. Lines starting with `//` are
    /// stripped so the file can carry comments.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path).map_err(SettingsError::Io)?;
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");
        serde_json::from_str(&cleaned).map_err(SettingsError::Parse)
    }

    /// Save current settings to disk
    pub fn save(&self) -> Result<(), SettingsError> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(SettingsError::Io)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(SettingsError::Parse)?;
        fs::write(path, json).map_err(SettingsError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.default_column_width, 80.0);
        assert_eq!(s.default_row_height, 24.0);
        assert_eq!(s.rows, 100_000);
        assert_eq!(s.columns, 5_000);
        assert_eq!(s.history_max_entries, 1000);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut s = Settings::default();
        s.default_column_width = 120.0;
        s.history_max_entries = 50;
        s.save_to(&path).unwrap();
        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded, s);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"grid.defaultRowHeight": 32}"#).unwrap();
        let s = Settings::load_from(&path).unwrap();
        assert_eq!(s.default_row_height, 32.0);
        assert_eq!(s.default_column_width, 80.0);
    }

    #[test]
    fn test_comment_lines_are_stripped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "// grid tuning\n{\"scroll.arrowStep\": 25}\n").unwrap();
        let s = Settings::load_from(&path).unwrap();
        assert_eq!(s.arrow_scroll_step, 25.0);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{nope").unwrap();
        assert!(matches!(
            Settings::load_from(&path),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Settings::load_from(&dir.path().join("absent.json")),
            Err(SettingsError::Io(_))
        ));
    }
}
