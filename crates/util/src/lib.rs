//! Utility support for the swatchy workspace.
//!
//! Currently this is preference persistence: a small JSON-backed store
//! for the presentation defaults the CLI applies when flags are absent.

pub mod preferences;

pub use preferences::{
    OutputFormat, PREFERENCES_PATH_ENV, PreferencesError, PreferencesPayload, UserPreferences,
};
