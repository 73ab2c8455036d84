//! Configuration and settings management.
//!
//! This module provides application settings types and persistence.
//! Settings are stored in the user's config directory as JSON.

mod settings;

pub use settings::{
    AppearanceSettings, ConfigError, ConfigResult, EnvironmentSettings, Locale, Settings, Theme,
    WebviewSettings, DEFAULT_WINDOW_LOCATION, SETTINGS_FILE,
};
