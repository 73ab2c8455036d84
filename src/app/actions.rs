//! Application actions for keyboard shortcuts and commands.

use gpui::{actions, KeyBinding};

// CloseWebview closes the visible webview if it may be closed.
actions!(webdeck, [Quit, CloseWebview]);

/// Default keybindings.
pub fn default_keybindings() -> Vec<KeyBinding> {
    vec![
        KeyBinding::new("cmd-q", Quit, None),
        KeyBinding::new("cmd-w", CloseWebview, Some("Webviews")),
    ]
}
