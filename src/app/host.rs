//! Desktop host and headless webviews.
//!
//! [`DesktopHost`] answers the deck's host calls from settings and keeps
//! the last badge total. [`HeadlessWebviewFactory`] creates webviews that
//! record what the deck tells them and forward messages they emit to a
//! single inbox the UI drains.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use futures::channel::mpsc;
use serde_json::Value;

use super::events::{InboundMessage, IpcMessage};
use crate::config::WebviewSettings;
use crate::domain::{AccountId, BackendOptions, SessionId};
use crate::services::{
    EmbeddedView, HostBridge, HostError, HostResult, WebviewFactory, WebviewProps,
};

/// Host bindings of the desktop process.
#[derive(Debug, Default)]
pub struct DesktopHost {
    auto_authorize_backend_swap: bool,
    badge_count: AtomicU32,
}

impl DesktopHost {
    pub fn new(settings: &WebviewSettings) -> Self {
        Self {
            auto_authorize_backend_swap: settings.auto_authorize_backend_swap,
            badge_count: AtomicU32::new(0),
        }
    }

    /// The last badge total reported.
    pub fn badge_count(&self) -> u32 {
        self.badge_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl HostBridge for DesktopHost {
    fn send_badge_count(&self, total: u32) {
        let previous = self.badge_count.swap(total, Ordering::Relaxed);
        if previous != total {
            tracing::info!(total, "Badge count changed");
        }
    }

    async fn authorize_backend_swap(&self, options: &BackendOptions) -> HostResult<bool> {
        tracing::info!(
            backend = %options.title,
            authorized = self.auto_authorize_backend_swap,
            "Backend swap requested"
        );
        Ok(self.auto_authorize_backend_swap)
    }

    /// Stand-in: records the request in the log only. No partition store
    /// is wired, so the session data of `session_id` stays on disk.
    async fn send_delete_account(&self, id: &AccountId, session_id: &SessionId) -> HostResult<()> {
        tracing::info!(account_id = %id, session_id = %session_id, "Deleting account session");
        Ok(())
    }
}

/// A webview without a rendering engine.
///
/// Remembers the URL it was told to load and the messages sent to it.
#[derive(Debug)]
pub struct HeadlessWebview {
    account_id: AccountId,
    url: Mutex<String>,
    received: Mutex<Vec<(String, Value)>>,
    inbox: mpsc::UnboundedSender<InboundMessage>,
}

impl HeadlessWebview {
    /// The URL currently loaded.
    pub fn url(&self) -> String {
        self.url
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Messages the deck sent to this webview, oldest first.
    pub fn received(&self) -> Vec<(String, Value)> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Emits a message as if the page had sent it.
    pub fn emit(&self, message: IpcMessage) -> HostResult<()> {
        self.inbox
            .unbounded_send(InboundMessage {
                account_id: self.account_id.clone(),
                message,
            })
            .map_err(|_| HostError::Unavailable("webview inbox closed".to_string()))
    }
}

impl EmbeddedView for HeadlessWebview {
    fn send(&self, channel: &str, payload: Value) {
        tracing::debug!(account_id = %self.account_id, channel, "Message to webview");
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((channel.to_string(), payload));
    }

    fn load_url(&self, url: &str) {
        tracing::debug!(account_id = %self.account_id, url, "Webview navigating");
        *self.url.lock().unwrap_or_else(PoisonError::into_inner) = url.to_string();
    }
}

/// Creates [`HeadlessWebview`]s that share one inbox.
#[derive(Debug)]
pub struct HeadlessWebviewFactory {
    inbox: mpsc::UnboundedSender<InboundMessage>,
    created: Mutex<HashMap<AccountId, Arc<HeadlessWebview>>>,
}

impl HeadlessWebviewFactory {
    /// Creates a factory and the receiving end of its inbox.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<InboundMessage>) {
        let (tx, rx) = mpsc::unbounded();
        let factory = Self {
            inbox: tx,
            created: Mutex::new(HashMap::new()),
        };
        (factory, rx)
    }

    /// The most recent webview created for an account.
    pub fn view(&self, account_id: &AccountId) -> Option<Arc<HeadlessWebview>> {
        self.created
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(account_id)
            .cloned()
    }
}

impl WebviewFactory for HeadlessWebviewFactory {
    fn create(&self, account_id: &AccountId, props: &WebviewProps) -> Arc<dyn EmbeddedView> {
        let view = Arc::new(HeadlessWebview {
            account_id: account_id.clone(),
            url: Mutex::new(props.src.clone()),
            received: Mutex::new(Vec::new()),
            inbox: self.inbox.clone(),
        });
        self.created
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(account_id.clone(), view.clone());
        view
    }
}
