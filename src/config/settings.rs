//! Application settings and configuration types.
//!
//! Settings are persisted to `settings.json` in the platform config
//! directory (`~/.config/webdeck/` or equivalent) and loaded at
//! application startup. A missing file yields the defaults.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default window location: the bundled app page pointing at the public
/// backend.
pub const DEFAULT_WINDOW_LOCATION: &str = "file:///app/index.html?env=https%3A%2F%2Fapp.wire.com";

/// Name of the settings file inside the config directory.
pub const SETTINGS_FILE: &str = "settings.json";

/// Errors raised while loading or saving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No home directory to place the config directory in.
    #[error("could not determine the config directory")]
    NoConfigDir,
}

/// Result type for settings persistence.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level application settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where the deck runs and which backend it targets.
    pub environment: EnvironmentSettings,
    /// Embedded webview behaviour.
    pub webviews: WebviewSettings,
    /// Visual appearance settings.
    pub appearance: AppearanceSettings,
    /// Language of the deck's own UI text.
    pub locale: Locale,
}

impl Settings {
    /// Path of the settings file in the platform config directory.
    pub fn default_path() -> ConfigResult<PathBuf> {
        ProjectDirs::from("com", "panbanda", "webdeck")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load settings from `path`, falling back to defaults when the file
    /// does not exist.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(Self::default());
        }

        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load settings from the platform config directory.
    pub fn load_default() -> ConfigResult<Self> {
        Self::load(&Self::default_path()?)
    }

    /// Write settings to `path` as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let data = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, data).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Where the deck runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentSettings {
    /// URL the deck runs under. Its `env` query parameter names the
    /// backend every webview loads.
    pub window_location: String,
}

impl Default for EnvironmentSettings {
    fn default() -> Self {
        Self {
            window_location: DEFAULT_WINDOW_LOCATION.to_string(),
        }
    }
}

/// Embedded webview behaviour.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebviewSettings {
    /// Let the engine throttle hidden webviews.
    pub background_throttling: bool,
    /// Answer backend swap prompts with yes without asking.
    pub auto_authorize_backend_swap: bool,
}

/// Visual appearance configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceSettings {
    /// Color theme.
    pub theme: Theme,
}

/// Color theme selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Dark color scheme.
    Dark,
    /// Light color scheme.
    Light,
    /// Follow system preference.
    #[default]
    System,
}

/// UI language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    De,
}
