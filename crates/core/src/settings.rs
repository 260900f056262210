//! Persisted user preferences.
//!
//! Settings are stored as a flat string-keyed JSON object
//! (`apiKey`, `folderPath`, `model`, `skipExisting`, `includeTrigger`),
//! booleans encoded as the literal strings `"true"`/`"false"`. The store
//! loads once at startup, defaults each absent field independently, and
//! writes through on every change.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::{resolve_model, DEFAULT_MODEL};

const KEY_API_KEY: &str = "apiKey";
const KEY_FOLDER_PATH: &str = "folderPath";
const KEY_MODEL: &str = "model";
const KEY_SKIP_EXISTING: &str = "skipExisting";
const KEY_INCLUDE_TRIGGER: &str = "includeTrigger";

// ---------------------------------------------------------------------------
// Settings record
// ---------------------------------------------------------------------------

/// User preferences restored at startup and edited through the API.
///
/// `model` always names a known priced model; unrecognized values are
/// replaced by the default when the record is normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(rename = "apiKey")]
    pub api_key: String,
    pub model: String,
    #[serde(rename = "folderPath")]
    pub folder_path: String,
    #[serde(rename = "skipExisting")]
    pub skip_existing: bool,
    #[serde(rename = "includeTrigger")]
    pub include_trigger: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            folder_path: String::new(),
            skip_existing: true,
            include_trigger: false,
        }
    }
}

impl Settings {
    /// Force the model selection onto a known priced model.
    pub fn normalize(mut self) -> Self {
        self.model = resolve_model(&self.model).to_string();
        self
    }

    /// Build a record from a persisted string map, defaulting each
    /// absent field independently.
    fn from_map(map: &BTreeMap<String, String>) -> Self {
        let defaults = Settings::default();
        Settings {
            api_key: map.get(KEY_API_KEY).cloned().unwrap_or(defaults.api_key),
            model: map.get(KEY_MODEL).cloned().unwrap_or(defaults.model),
            folder_path: map
                .get(KEY_FOLDER_PATH)
                .cloned()
                .unwrap_or(defaults.folder_path),
            skip_existing: map
                .get(KEY_SKIP_EXISTING)
                .map(|v| v == "true")
                .unwrap_or(defaults.skip_existing),
            include_trigger: map
                .get(KEY_INCLUDE_TRIGGER)
                .map(|v| v == "true")
                .unwrap_or(defaults.include_trigger),
        }
        .normalize()
    }

    fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert(KEY_API_KEY.to_string(), self.api_key.clone());
        map.insert(KEY_MODEL.to_string(), self.model.clone());
        map.insert(KEY_FOLDER_PATH.to_string(), self.folder_path.clone());
        map.insert(
            KEY_SKIP_EXISTING.to_string(),
            if self.skip_existing { "true" } else { "false" }.to_string(),
        );
        map.insert(
            KEY_INCLUDE_TRIGGER.to_string(),
            if self.include_trigger { "true" } else { "false" }.to_string(),
        );
        map
    }
}

// ---------------------------------------------------------------------------
// SettingsStore
// ---------------------------------------------------------------------------

/// File-backed settings store with write-through persistence.
pub struct SettingsStore {
    path: PathBuf,
    current: Mutex<Settings>,
}

impl SettingsStore {
    /// Load settings from `path`, falling back to defaults when the file
    /// is absent or unreadable.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let current = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
                Ok(map) => Settings::from_map(&map),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Settings file unreadable, using defaults");
                    Settings::default()
                }
            },
            Err(_) => Settings::default(),
        };
        Self {
            path,
            current: Mutex::new(current),
        }
    }

    /// Current settings snapshot.
    pub fn get(&self) -> Settings {
        self.current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Replace the settings and write them to disk immediately.
    ///
    /// Returns the normalized record as stored.
    pub fn update(&self, settings: Settings) -> Result<Settings, CoreError> {
        let settings = settings.normalize();
        let map = settings.to_map();
        let body = serde_json::to_string_pretty(&map)
            .map_err(|e| CoreError::Internal(format!("Failed to encode settings: {e}")))?;
        std::fs::write(&self.path, body)
            .map_err(|e| CoreError::Internal(format!("Failed to write settings: {e}")))?;

        let mut current = self
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *current = settings.clone();
        Ok(settings)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
