//! Save settings persistence — load/save config to JSON file.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::AUTOSAVE_INTERVAL_SECS;
use crate::error::{SaveError, SaveResult};
use crate::feature::Feature;

/// Persisted save settings. Stored at `Documents/Sylvie/settings.json`.
#[derive(Resource, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SaveSettings {
    /// Directory holding save files. None = `default_save_dir()`.
    pub save_dir: Option<PathBuf>,
    /// Run `try_load_game` on startup.
    pub load_on_startup: bool,
    /// Autosave interval in seconds (0 = disabled).
    pub autosave_secs: f32,
    /// Features requested by each autosave.
    pub autosave_features: Vec<Feature>,
}

impl Default for SaveSettings {
    fn default() -> Self {
        Self {
            save_dir: None,
            load_on_startup: true,
            autosave_secs: AUTOSAVE_INTERVAL_SECS,
            autosave_features: vec![Feature::SylviePosition],
        }
    }
}

impl SaveSettings {
    /// Settings that keep saves under `dir`, with autosave off.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            save_dir: Some(dir.into()),
            autosave_secs: 0.0,
            ..Default::default()
        }
    }

    /// Directory saves are written to and read from.
    pub fn resolved_save_dir(&self) -> PathBuf {
        self.save_dir.clone().unwrap_or_else(default_save_dir)
    }
}

fn documents_dir() -> PathBuf {
    let home = std::env::var("USERPROFILE")
        .or_else(|_| std::env::var("HOME"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join("Documents").join("Sylvie")
}

/// Fixed base directory for save files. Created lazily by the first write.
pub fn default_save_dir() -> PathBuf {
    documents_dir().join("saves")
}

fn settings_path() -> PathBuf {
    documents_dir().join("settings.json")
}

pub fn save_settings(settings: &SaveSettings) {
    if let Err(e) = save_settings_to(settings, &settings_path()) {
        warn!("Failed to save settings: {}", e);
    }
}

pub fn save_settings_to(settings: &SaveSettings, path: &Path) -> SaveResult<()> {
    let json = serde_json::to_string_pretty(settings)?;
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| SaveError::io(dir, e))?;
    }
    std::fs::write(path, json).map_err(|e| SaveError::io(path, e))
}

pub fn load_settings() -> SaveSettings {
    load_settings_from(&settings_path())
}

/// Missing or unreadable settings fall back to defaults.
pub fn load_settings_from(path: &Path) -> SaveSettings {
    match std::fs::read_to_string(path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
            warn!("Ignoring malformed settings {}: {}", path.display(), e);
            SaveSettings::default()
        }),
        Err(_) => SaveSettings::default(),
    }
}
