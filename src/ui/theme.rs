//! Theme definitions for webdeck

use gpui::{rgb, Hsla};

use crate::config;

/// Color palette for the application
#[derive(Clone, Debug)]
pub struct ThemeColors {
    // Backgrounds
    pub background: Hsla,
    pub surface: Hsla,
    pub surface_elevated: Hsla,

    // Text
    pub text_primary: Hsla,
    pub text_secondary: Hsla,

    // Third-party backend banner
    pub notice: Hsla,
    pub notice_text: Hsla,
}

impl ThemeColors {
    /// Dark theme colors
    pub fn dark() -> Self {
        Self {
            // Backgrounds
            background: rgb(0x1a1a1a).into(),
            surface: rgb(0x242424).into(),
            surface_elevated: rgb(0x2e2e2e).into(),

            // Text
            text_primary: rgb(0xffffff).into(),
            text_secondary: rgb(0xa0a0a0).into(),

                    notice: rgb(0xffc107).into(),
            notice_text: rgb(0x1a1a1a).into(),
        }
    }

    /// Light theme colors
    pub fn light() -> Self {
        Self {
            // Backgrounds
            background: rgb(0xffffff).into(),
            surface: rgb(0xf5f5f5).into(),
            surface_elevated: rgb(0xffffff).into(),

            // Text
            text_primary: rgb(0x1a1a1a).into(),
            text_secondary: rgb(0x666666).into(),

                    notice: rgb(0xfbbc04).into(),
            notice_text: rgb(0x1a1a1a).into(),
        }
    }
}

/// Theme mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

/// Application theme
#[derive(Clone, Debug)]
pub struct Theme {
    pub mode: ThemeMode,
    pub colors: ThemeColors,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create dark theme
    pub fn dark() -> Self {
        Self {
            mode: ThemeMode::Dark,
            colors: ThemeColors::dark(),
        }
    }

    /// Create light theme
    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,
            colors: ThemeColors::light(),
        }
    }

    /// Theme for the configured preference. `System` renders dark.
    pub fn from_setting(setting: config::Theme) -> Self {
        match setting {
            config::Theme::Light => Self::light(),
            config::Theme::Dark | config::Theme::System => Self::dark(),
        }
    }
}
