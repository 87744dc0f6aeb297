//! User preference persistence for the swatchy CLI.
//!
//! This module provides a tiny JSON-backed store that records the
//! presentation defaults applied when command-line flags are absent:
//! palette size, output format, and optional generator tuning
//! overrides. The file is written to the standard configuration
//! directory (`~/.config/swatchy/preferences.json` on most platforms)
//! and is safe to read/write from multiple threads thanks to the
//! internal `Mutex`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::serde::ts_seconds_option;
use chrono::{DateTime, Utc};
use dirs_next::config_dir;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use swatchy_engine::GeneratorTuning;

/// Environment variable allowing callers to override the preferences file path.
pub const PREFERENCES_PATH_ENV: &str = "SWATCHY_PREFERENCES_PATH";

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

/// How the CLI renders a generated palette.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// ANSI true-color tiles with hex and hsl labels.
    #[default]
    Swatch,
    /// One hex + hsl line per color.
    Plain,
    /// JSON array of HSL triples.
    Json,
}

/// Persisted preference values.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct PreferencesPayload {
    /// Palette size used when the command line does not specify one.
    pub default_size: Option<usize>,
    /// Output format used when the command line does not specify one.
    pub preferred_format: Option<OutputFormat>,
    /// Generator tuning overrides applied underneath CLI flags.
    pub tuning: Option<GeneratorTuning>,
    /// When the payload was last written.
    #[serde(default, with = "ts_seconds_option")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Thread-safe preferences store backed by a JSON file.
#[derive(Debug, Default)]
pub struct UserPreferences {
    path: PathBuf,
    payload: Mutex<PreferencesPayload>,
    persist_to_disk: bool,
}

impl UserPreferences {
    /// Open the store at the default (or env-overridden) path. A
    /// missing or unparsable file yields an empty payload.
    pub fn new() -> Result<Self, PreferencesError> {
        let resolved_path = default_preferences_path();
        let payload = load_payload(&resolved_path)?;
        Ok(Self {
            path: resolved_path,
            payload: Mutex::new(payload),
            persist_to_disk: true,
        })
    }

    /// Path to the underlying JSON file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot of the current payload.
    pub fn payload(&self) -> PreferencesPayload {
        self.payload.lock().expect("preferences lock poisoned").clone()
    }

    /// Replace the stored defaults and persist them with a fresh
    /// timestamp.
    pub fn save_defaults(
        &self,
        default_size: Option<usize>,
        preferred_format: Option<OutputFormat>,
        tuning: Option<GeneratorTuning>,
    ) -> Result<(), PreferencesError> {
        let mut payload = self.payload.lock().expect("preferences lock poisoned");
        payload.default_size = default_size;
        payload.preferred_format = preferred_format;
        payload.tuning = tuning;
        payload.updated_at = Some(Utc::now());
        if self.persist_to_disk {
            self.save_locked(&payload)?;
        }
        Ok(())
    }

    /// Build an in-memory store used as a fallback when the config
    /// directory cannot be accessed.
    pub fn ephemeral() -> Self {
        Self {
            path: PathBuf::new(),
            payload: Mutex::new(PreferencesPayload::default()),
            persist_to_disk: false,
        }
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

fn default_preferences_path() -> PathBuf {
    if let Ok(path) = env::var(PREFERENCES_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("swatchy")
        .join(PREFERENCES_FILE_NAME)
}

fn load_payload(path: &Path) -> Result<PreferencesPayload, PreferencesError> {
    if !path.exists() {
        return Ok(PreferencesPayload::default());
    }
    let data = fs::read_to_string(path)?;
    if data.trim().is_empty() {
        return Ok(PreferencesPayload::default());
    }
    match serde_json::from_str(&data) {
        Ok(payload) => Ok(payload),
        Err(err) => {
            warn!(%err, path = %path.display(), "failed to parse preferences; using defaults");
            Ok(PreferencesPayload::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trips_payload_through_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        temp_env::with_var(PREFERENCES_PATH_ENV, Some(path.to_str().unwrap()), || {
            let store = UserPreferences::new().unwrap();
            store
                .save_defaults(Some(7), Some(OutputFormat::Json), Some(GeneratorTuning::default()))
                .unwrap();

            let reloaded = UserPreferences::new().unwrap();
            let payload = reloaded.payload();
            assert_eq!(payload.default_size, Some(7));
            assert_eq!(payload.preferred_format, Some(OutputFormat::Json));
            assert_eq!(payload.tuning, Some(GeneratorTuning::default()));
            assert!(payload.updated_at.is_some());
        });
    }

    #[test]
    fn unparsable_file_degrades_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, "{ not json").unwrap();
        temp_env::with_var(PREFERENCES_PATH_ENV, Some(path.to_str().unwrap()), || {
            let store = UserPreferences::new().unwrap();
            let payload = store.payload();
            assert_eq!(payload.default_size, None);
            assert_eq!(payload.preferred_format, None);
        });
    }

    #[test]
    fn missing_file_yields_an_empty_payload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("never-written.json");
        temp_env::with_var(PREFERENCES_PATH_ENV, Some(path.to_str().unwrap()), || {
            let store = UserPreferences::new().unwrap();
            assert!(store.payload().default_size.is_none());
            assert!(!path.exists());
        });
    }

    #[test]
    fn ephemeral_store_never_touches_disk() {
        let store = UserPreferences::ephemeral();
        store.save_defaults(Some(9), None, None).unwrap();
        assert_eq!(store.payload().default_size, Some(9));
        assert_eq!(store.path(), Path::new(""));
    }
}
