//! Application state management.
//!
//! The account list of the running application. The webview deck reads
//! snapshots of it and asks for changes through [`AccountOwner`]; every
//! change is published to subscribers as a fresh snapshot.

use std::sync::{Mutex, MutexGuard, PoisonError};

use futures::channel::mpsc;

use crate::domain::{Account, AccountId, BackendOptions, SessionId};
use crate::services::{AccountOwner, AccountPatch};

/// Ordered account list shared between the deck and the rest of the app.
#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: Mutex<Vec<Account>>,
    subscribers: Mutex<Vec<mpsc::UnboundedSender<Vec<Account>>>>,
}

impl AccountStore {
    /// Create a store holding `accounts`.
    pub fn new(accounts: Vec<Account>) -> Self {
        Self {
            accounts: Mutex::new(accounts),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Create a store with a single account waiting to sign in.
    pub fn with_initial_account() -> Self {
        Self::new(vec![fresh_account()])
    }

    /// A copy of the current account list.
    pub fn snapshot(&self) -> Vec<Account> {
        self.lock().clone()
    }

    /// Receive a snapshot after every change.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<Vec<Account>> {
        let (tx, rx) = mpsc::unbounded();
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        rx
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Account>> {
        self.accounts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply `change` to the list and publish the result.
    fn mutate(&self, change: impl FnOnce(&mut Vec<Account>)) {
        let snapshot = {
            let mut accounts = self.lock();
            change(&mut *accounts);
            accounts.clone()
        };

        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        subscribers.retain(|tx| tx.unbounded_send(snapshot.clone()).is_ok());
    }

    /// Apply `change` to one account, logging if it is unknown.
    fn mutate_account(&self, id: &AccountId, change: impl FnOnce(&mut Account)) {
        self.mutate(|accounts| match accounts.iter_mut().find(|a| &a.id == id) {
            Some(account) => change(account),
            None => tracing::warn!(account_id = %id, "Unknown account"),
        });
    }
}

/// A new, visible account waiting to sign in.
fn fresh_account() -> Account {
    Account::adding(AccountId::generate(), SessionId::generate())
}

/// Show the last account if none is visible.
fn ensure_visible(accounts: &mut [Account]) {
    if accounts.iter().any(|a| a.visible) {
        return;
    }
    if let Some(last) = accounts.last_mut() {
        last.visible = true;
    }
}

impl AccountOwner for AccountStore {
    fn update_account_badge_count(&self, id: &AccountId, count: u32) {
        self.mutate_account(id, |account| account.badge_count = count);
    }

    fn delete_account(&self, id: &AccountId) {
        tracing::info!(account_id = %id, "Deleting account");
        self.mutate(|accounts| {
            accounts.retain(|a| &a.id != id);
            ensure_visible(accounts);
        });
    }

    fn add_account_with_custom_backend(&self, options: BackendOptions) {
        tracing::info!(backend = %options.title, "Adding account with custom backend");
        let account = fresh_account().backend_options(options);
        self.mutate(|accounts| {
            for other in accounts.iter_mut() {
                other.visible = false;
            }
            accounts.push(account);
        });
    }

    fn update_account_data(&self, id: &AccountId, patch: AccountPatch) {
        self.mutate_account(id, |account| patch.apply(account));
    }

    fn switch_account(&self, id: &AccountId) {
        self.mutate(|accounts| {
            if !accounts.iter().any(|a| &a.id == id) {
                tracing::warn!(account_id = %id, "Cannot switch to unknown account");
                return;
            }
            for account in accounts.iter_mut() {
                account.visible = &account.id == id;
            }
        });
    }

    fn update_account_lifecycle(&self, id: &AccountId, channel: &str) {
        self.mutate_account(id, |account| account.lifecycle = Some(channel.to_string()));
    }

    fn reset_identity(&self, id: &AccountId) {
        self.mutate_account(id, |account| {
            account.user_id = None;
            account.name = None;
            account.accent_id = None;
            account.picture = None;
            account.team_id = None;
            account.team_role = None;
            account.extra.clear();
            account.is_adding = true;
        });
    }

    fn abort_account_creation(&self, id: &AccountId) {
        tracing::info!(account_id = %id, "Aborting account creation");
        self.mutate(|accounts| {
            accounts.retain(|a| &a.id != id);
            if accounts.is_empty() {
                accounts.push(fresh_account());
            }
            ensure_visible(accounts);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BackendEndpoints;
    use futures::StreamExt;
    use pretty_assertions::assert_eq;

    fn options() -> BackendOptions {
        BackendOptions {
            title: "Acme".to_string(),
            endpoints: BackendEndpoints {
                backend_url: "https://nginz-https.acme.test/".to_string(),
                backend_ws_url: "wss://nginz-ssl.acme.test/".to_string(),
                black_list_url: "https://clientblacklist.acme.test/prod".to_string(),
                teams_url: "https://teams.acme.test/".to_string(),
                accounts_url: "https://account.acme.test/".to_string(),
                website_url: "https://acme.test/".to_string(),
            },
        }
    }

    fn store() -> AccountStore {
        AccountStore::new(vec![
            Account::signed_in("acc-1", "s-1", "u-1"),
            Account::signed_in("acc-2", "s-2", "u-2").visible(false),
        ])
    }

    fn visible_ids(store: &AccountStore) -> Vec<String> {
        store
            .snapshot()
            .into_iter()
            .filter(|a| a.visible)
            .map(|a| a.id.to_string())
            .collect()
    }

    #[test]
    fn initial_account_is_adding_and_visible() {
        let store = AccountStore::with_initial_account();
        let accounts = store.snapshot();

        assert_eq!(accounts.len(), 1);
        assert!(accounts[0].is_adding);
        assert!(accounts[0].visible);
    }

    #[test]
    fn badge_count_is_stored() {
        let store = store();
        store.update_account_badge_count(&AccountId::from("acc-2"), 9);

        assert_eq!(store.snapshot()[1].badge_count, 9);
    }

    #[test]
    fn add_with_custom_backend_hides_others() {
        let store = store();
        store.add_account_with_custom_backend(options());

        let accounts = store.snapshot();
        assert_eq!(accounts.len(), 3);
        let added = &accounts[2];
        assert!(added.is_adding);
        assert!(added.visible);
        assert_eq!(added.backend_options, Some(options()));
        assert_eq!(visible_ids(&store), vec![added.id.to_string()]);
    }

    #[test]
    fn switch_leaves_one_visible() {
        let store = store();
        store.switch_account(&AccountId::from("acc-2"));

        assert_eq!(visible_ids(&store), vec!["acc-2".to_string()]);
    }

    #[test]
    fn switch_to_unknown_account_changes_nothing() {
        let store = store();
        store.switch_account(&AccountId::from("ghost"));

        assert_eq!(visible_ids(&store), vec!["acc-1".to_string()]);
    }

    #[test]
    fn patch_completes_addition() {
        let store = AccountStore::new(vec![Account::adding("acc-1", "s-1")]);
        store.update_account_data(
            &AccountId::from("acc-1"),
            AccountPatch {
                user_id: Some("u-1".to_string()),
                name: Some("Alice".to_string()),
                ..Default::default()
            },
        );

        let account = &store.snapshot()[0];
        assert!(!account.is_adding);
        assert_eq!(account.name.as_deref(), Some("Alice"));
    }

    #[test]
    fn lifecycle_is_recorded() {
        let store = store();
        store.update_account_lifecycle(&AccountId::from("acc-1"), "EVENT_TYPE.LIFECYCLE.SIGNED_IN");

        assert_eq!(
            store.snapshot()[0].lifecycle.as_deref(),
            Some("EVENT_TYPE.LIFECYCLE.SIGNED_IN")
        );
    }

    #[test]
    fn reset_identity_returns_to_adding() {
        let store = store();
        store.reset_identity(&AccountId::from("acc-1"));

        let account = &store.snapshot()[0];
        assert!(account.is_adding);
        assert!(!account.has_identity());
        assert_eq!(account.session_id, SessionId::from("s-1"));
    }

    #[test]
    fn abort_shows_remaining_account() {
        let store = store();
        store.abort_account_creation(&AccountId::from("acc-1"));

        let accounts = store.snapshot();
        assert_eq!(accounts.len(), 1);
        assert_eq!(visible_ids(&store), vec!["acc-2".to_string()]);
    }

    #[test]
    fn abort_of_last_account_adds_a_fresh_one() {
        let store = AccountStore::new(vec![Account::adding("acc-1", "s-1")]);
        store.abort_account_creation(&AccountId::from("acc-1"));

        let accounts = store.snapshot();
        assert_eq!(accounts.len(), 1);
        assert_ne!(accounts[0].id, AccountId::from("acc-1"));
        assert!(accounts[0].is_adding);
        assert!(accounts[0].visible);
    }

    #[test]
    fn delete_then_add_replaces_account() {
        let store = AccountStore::new(vec![Account::adding("acc-1", "s-1")]);
        store.delete_account(&AccountId::from("acc-1"));
        assert!(store.snapshot().is_empty());

        store.add_account_with_custom_backend(options());
        assert_eq!(store.snapshot().len(), 1);
    }

    #[tokio::test]
    async fn subscribers_receive_snapshots() {
        let store = store();
        let mut updates = store.subscribe();

        store.switch_account(&AccountId::from("acc-2"));

        let snapshot = updates.next().await.unwrap();
        assert!(snapshot[1].visible);
        assert!(!snapshot[0].visible);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let store = store();
        drop(store.subscribe());

        store.switch_account(&AccountId::from("acc-2"));
        assert!(store.subscribers.lock().unwrap().is_empty());
    }
}
