//! User preference persistence for the rubric editor.
//!
//! A tiny JSON-backed store that records lightweight configuration such as
//! the preferred theme. The file lives in the standard configuration directory
//! (`~/.config/rubrics/preferences.json` on most platforms) unless
//! `RUBRICS_PREFERENCES_PATH` points elsewhere.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::path_processing::path_from_env_or_config;

/// Environment variable allowing callers to override the preferences file path.
pub const PREFERENCES_PATH_ENV: &str = "RUBRICS_PREFERENCES_PATH";

/// Default filename for the JSON payload.
pub const PREFERENCES_FILE_NAME: &str = "preferences.json";

/// Error surfaced when reading or writing preferences fails.
#[derive(Debug, Error)]
pub enum PreferencesError {
    /// I/O failure (for example, permissions or missing directory).
    #[error("preferences I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization or deserialization failure.
    #[error("preferences serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Persisted preference values.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct PreferencesPayload {
    /// Canonical identifier of the theme selected for the TUI.
    pub preferred_theme: Option<String>,
}

/// Preferences store backed by a JSON file.
#[derive(Debug, Default)]
pub struct UserPreferences {
    path: PathBuf,
    payload: Mutex<PreferencesPayload>,
    persist_to_disk: bool,
}

impl UserPreferences {
    /// Opens the store at the default location.
    pub fn new() -> Result<Self, PreferencesError> {
        Self::with_path(path_from_env_or_config(PREFERENCES_PATH_ENV, PREFERENCES_FILE_NAME))
    }

    /// Opens the store at an explicit path. A missing file yields defaults.
    pub fn with_path(path: impl Into<PathBuf>) -> Result<Self, PreferencesError> {
        let path = path.into();
        let payload = load_payload(&path)?;
        Ok(Self {
            path,
            payload: Mutex::new(payload),
            persist_to_disk: true,
        })
    }

    /// Build an in-memory store used as a fallback when the config directory cannot be accessed.
    pub fn ephemeral() -> Self {
        Self {
            path: PathBuf::new(),
            payload: Mutex::new(PreferencesPayload::default()),
            persist_to_disk: false,
        }
    }

    /// Path to the underlying JSON file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the canonical identifier of the preferred theme, if one was saved.
    pub fn preferred_theme(&self) -> Option<String> {
        self.payload.lock().expect("preferences lock poisoned").preferred_theme.clone()
    }

    /// Persist a new preferred theme identifier.
    pub fn set_preferred_theme(&self, theme_id: Option<String>) -> Result<(), PreferencesError> {
        let mut payload = self.payload.lock().expect("preferences lock poisoned");
        payload.preferred_theme = theme_id;
        if self.persist_to_disk {
            self.save_locked(&payload)?;
        }
        Ok(())
    }

    fn save_locked(&self, payload: &PreferencesPayload) -> Result<(), PreferencesError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(payload)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

fn load_payload(path: &Path) -> Result<PreferencesPayload, PreferencesError> {
    match fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(payload) => Ok(payload),
            Err(error) => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "Failed to parse preferences file; using defaults"
                );
                Ok(PreferencesPayload::default())
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(PreferencesPayload::default()),
        Err(error) => Err(PreferencesError::Io(error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_round_trips_through_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join(PREFERENCES_FILE_NAME);

        let preferences = UserPreferences::with_path(&path).expect("open");
        assert_eq!(preferences.preferred_theme(), None);
        preferences.set_preferred_theme(Some("nord".into())).expect("save");

        let reopened = UserPreferences::with_path(&path).expect("reopen");
        assert_eq!(reopened.preferred_theme().as_deref(), Some("nord"));
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(PREFERENCES_FILE_NAME);
        fs::write(&path, "{not json").expect("write");

        let preferences = UserPreferences::with_path(&path).expect("open");
        assert_eq!(preferences.preferred_theme(), None);
    }

    #[test]
    fn ephemeral_store_never_touches_disk() {
        let preferences = UserPreferences::ephemeral();
        preferences.set_preferred_theme(Some("dracula".into())).expect("set");
        assert_eq!(preferences.preferred_theme().as_deref(), Some("dracula"));
        assert_eq!(preferences.path(), Path::new(""));
    }

    #[test]
    fn environment_override_selects_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("prefs.json");
        temp_env::with_var(PREFERENCES_PATH_ENV, Some(path.to_str().expect("utf-8 path")), || {
            let preferences = UserPreferences::new().expect("open");
            assert_eq!(preferences.path(), path.as_path());
        });
    }
}
