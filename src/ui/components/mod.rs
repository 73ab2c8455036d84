//! Reusable UI components.
//!
//! Components are stateless, with styling driven by the theme system.

pub mod close_button;
pub mod notice;

pub use close_button::CloseButton;
pub use notice::Notice;
