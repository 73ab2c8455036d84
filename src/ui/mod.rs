//! UI components and views
//!
//! This module contains the gpui-based user interface for webdeck.
//! The UI is organized into:
//! - `theme`: Color schemes and styling
//! - `locale`: Localised strings
//! - `components`: Reusable UI primitives
//! - `views`: Full-screen application views

pub mod components;
pub mod locale;
pub mod theme;
pub mod views;

pub use theme::{Theme, ThemeColors, ThemeMode};
pub use views::WebviewsView;
