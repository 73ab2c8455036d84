//! Embedded webview handles.
//!
//! The deck keeps an explicit map from account id to the webview showing
//! that account, so outbound calls (`send`, `load_url`) are addressed by
//! account rather than looked up in the widget tree.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;

use crate::domain::{AccountId, SessionId};

/// Construction properties of an embedded webview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebviewProps {
    /// URL the webview loads.
    pub src: String,
    /// Session partition the webview's storage lives in.
    pub partition: SessionId,
    /// Whether the engine may throttle the webview while hidden.
    pub background_throttling: bool,
}

/// An embedded browser view showing one account.
pub trait EmbeddedView: Send + Sync {
    /// Sends a message to the page on `channel`.
    fn send(&self, channel: &str, payload: Value);

    /// Navigates the view to `url`.
    fn load_url(&self, url: &str);
}

/// Creates embedded webviews.
pub trait WebviewFactory: Send + Sync {
    fn create(&self, account_id: &AccountId, props: &WebviewProps) -> Arc<dyn EmbeddedView>;
}

/// Shared map of account id to webview handle.
///
/// Clones share the same map.
#[derive(Clone, Default)]
pub struct WebviewRegistry {
    views: Arc<Mutex<HashMap<AccountId, Arc<dyn EmbeddedView>>>>,
}

impl WebviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<AccountId, Arc<dyn EmbeddedView>>> {
        self.views.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers the webview of an account, replacing any previous one.
    pub fn insert(&self, account_id: AccountId, view: Arc<dyn EmbeddedView>) {
        self.lock().insert(account_id, view);
    }

    /// Returns the webview of an account.
    pub fn get(&self, account_id: &AccountId) -> Option<Arc<dyn EmbeddedView>> {
        self.lock().get(account_id).cloned()
    }

    pub fn contains(&self, account_id: &AccountId) -> bool {
        self.lock().contains_key(account_id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Sends a message to an account's webview.
    ///
    /// Returns false if the account has no webview.
    pub fn send(&self, account_id: &AccountId, channel: &str, payload: Value) -> bool {
        // Clone the handle out so the view is not called under the lock.
        match self.get(account_id) {
            Some(view) => {
                view.send(channel, payload);
                true
            }
            None => false,
        }
    }

    /// Navigates an account's webview.
    ///
    /// Returns false if the account has no webview.
    pub fn load_url(&self, account_id: &AccountId, url: &str) -> bool {
        match self.get(account_id) {
            Some(view) => {
                view.load_url(url);
                true
            }
            None => false,
        }
    }

    /// Drops webviews of accounts not in `keep`.
    ///
    /// Returns the ids that were dropped.
    pub fn retain(&self, keep: &[AccountId]) -> Vec<AccountId> {
        let mut views = self.lock();
        let dropped: Vec<AccountId> = views
            .keys()
            .filter(|id| !keep.contains(id))
            .cloned()
            .collect();
        for id in &dropped {
            views.remove(id);
        }
        dropped
    }
}

impl std::fmt::Debug for WebviewRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebviewRegistry")
            .field("views", &self.len())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    /// Records every call made on it.
    #[derive(Default)]
    pub(crate) struct RecordingView {
        pub sent: Mutex<Vec<(String, Value)>>,
        pub loaded: Mutex<Vec<String>>,
    }

    impl EmbeddedView for RecordingView {
        fn send(&self, channel: &str, payload: Value) {
            self.sent
                .lock()
                .unwrap()
                .push((channel.to_string(), payload));
        }

        fn load_url(&self, url: &str) {
            self.loaded.lock().unwrap().push(url.to_string());
        }
    }

    #[test]
    fn send_reaches_registered_view() {
        let registry = WebviewRegistry::new();
        let view = Arc::new(RecordingView::default());
        registry.insert(AccountId::from("acc-1"), view.clone());

        assert!(registry.send(&AccountId::from("acc-1"), "ping", json!(1)));
        assert_eq!(
            view.sent.lock().unwrap().as_slice(),
            &[("ping".to_string(), json!(1))]
        );
    }

    #[test]
    fn calls_to_unknown_account_are_reported() {
        let registry = WebviewRegistry::new();
        assert!(!registry.send(&AccountId::from("nope"), "ping", Value::Null));
        assert!(!registry.load_url(&AccountId::from("nope"), "https://app.wire.com/"));
    }

    #[test]
    fn load_url_reaches_registered_view() {
        let registry = WebviewRegistry::new();
        let view = Arc::new(RecordingView::default());
        registry.insert(AccountId::from("acc-1"), view.clone());

        registry.load_url(&AccountId::from("acc-1"), "https://app.wire.com/auth");
        assert_eq!(
            view.loaded.lock().unwrap().as_slice(),
            &["https://app.wire.com/auth".to_string()]
        );
    }

    #[test]
    fn retain_drops_removed_accounts() {
        let registry = WebviewRegistry::new();
        registry.insert(AccountId::from("acc-1"), Arc::new(RecordingView::default()));
        registry.insert(AccountId::from("acc-2"), Arc::new(RecordingView::default()));

        let dropped = registry.retain(&[AccountId::from("acc-2")]);

        assert_eq!(dropped, vec![AccountId::from("acc-1")]);
        assert!(!registry.contains(&AccountId::from("acc-1")));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn clones_share_views() {
        let registry = WebviewRegistry::new();
        let clone = registry.clone();
        clone.insert(AccountId::from("acc-1"), Arc::new(RecordingView::default()));

        assert!(registry.contains(&AccountId::from("acc-1")));
        assert!(!registry.is_empty());
    }
}
