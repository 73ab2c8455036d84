//! Application state and lifecycle management

mod actions;
pub mod events;
mod host;
mod state;

use std::sync::Arc;

use anyhow::{Context as _, Result};
use gpui::{AppContext, Application, WindowOptions};

use crate::config::Settings;
use crate::services::{Environment, IpcDispatcher, WebviewDeck, WebviewRegistry};
use crate::ui::{Theme, WebviewsView};

pub use actions::{default_keybindings, CloseWebview, Quit};
pub use host::{DesktopHost, HeadlessWebview, HeadlessWebviewFactory};
pub use state::AccountStore;

/// Main application entry point
pub struct App;

impl App {
    /// Run the application
    pub fn run() -> Result<()> {
        let settings = Settings::load_default().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load settings, using defaults");
            Settings::default()
        });
        let environment = Environment::new(&settings.environment.window_location)
            .context("invalid window location in settings")?;

        let store = Arc::new(AccountStore::with_initial_account());
        let account_updates = store.subscribe();
        let host = Arc::new(DesktopHost::new(&settings.webviews));
        let (factory, inbox) = HeadlessWebviewFactory::new();

        let dispatcher = IpcDispatcher::new(store.clone(), host, WebviewRegistry::new());
        let deck = WebviewDeck::new(
            store.snapshot(),
            environment,
            settings.webviews.background_throttling,
            Arc::new(factory),
            dispatcher,
        );
        let theme = Theme::from_setting(settings.appearance.theme);
        let locale = settings.locale;

        Application::new().run(move |cx: &mut gpui::App| {
            cx.bind_keys(default_keybindings());
            cx.on_action(|_: &Quit, cx| cx.quit());

            if let Err(e) = cx.open_window(WindowOptions::default(), |_window, cx| {
                cx.new(|cx| WebviewsView::new(deck, account_updates, inbox, theme, locale, cx))
            }) {
                tracing::error!(error = %e, "Failed to open window");
                cx.quit();
            }
        });

        Ok(())
    }
}
