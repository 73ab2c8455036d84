//! Application views
//!
//! Views are the top-level UI components. Each view manages its own state
//! and handles user interactions.

mod webviews;

pub use webviews::WebviewsView;
