//! Webview deck state.
//!
//! Holds the account list last received from the owner, the derived
//! closability map, and the webview handle of every account. The gpui view
//! renders from [`WebviewDeck::items`] and redraws only when
//! [`WebviewDeck::set_accounts`] says so.

use std::sync::Arc;

use super::closability::{can_delete_map, can_delete_webview, CanDeleteMap};
use super::dispatch::{IpcDispatcher, WebviewError, WebviewResult};
use super::environment::Environment;
use super::registry::{WebviewFactory, WebviewProps, WebviewRegistry};
use crate::app::events::IpcMessage;
use crate::domain::{Account, AccountId};

/// URL loaded when no environment URL can be built.
pub const BLANK_URL: &str = "about:blank";

/// Render data of one account's webview.
#[derive(Debug, Clone, PartialEq)]
pub struct WebviewItem {
    pub account_id: AccountId,
    pub props: WebviewProps,
    pub visible: bool,
    /// Backend title for the third-party backend notice, when shown.
    pub third_party_notice: Option<String>,
    /// Whether the close affordance is shown.
    pub closable: bool,
}

/// A webview message detached from the deck, ready to dispatch.
#[derive(Clone)]
pub struct PendingMessage {
    dispatcher: IpcDispatcher,
    account: Account,
    accounts: Vec<Account>,
    message: IpcMessage,
}

impl PendingMessage {
    pub fn account_id(&self) -> &AccountId {
        &self.account.id
    }

    pub fn channel(&self) -> &str {
        &self.message.channel
    }

    /// Routes the message. Returns whether the channel was recognised.
    pub async fn run(self) -> WebviewResult<bool> {
        self.dispatcher
            .dispatch(&self.account, &self.accounts, &self.message)
            .await
    }
}

/// Model behind the webview list view.
pub struct WebviewDeck {
    accounts: Vec<Account>,
    can_delete: CanDeleteMap,
    environment: Environment,
    background_throttling: bool,
    factory: Arc<dyn WebviewFactory>,
    dispatcher: IpcDispatcher,
}

impl WebviewDeck {
    /// Creates the deck and a webview for every account.
    pub fn new(
        accounts: Vec<Account>,
        environment: Environment,
        background_throttling: bool,
        factory: Arc<dyn WebviewFactory>,
        dispatcher: IpcDispatcher,
    ) -> Self {
        let can_delete = can_delete_map(&accounts);
        let deck = Self {
            accounts,
            can_delete,
            environment,
            background_throttling,
            factory,
            dispatcher,
        };
        deck.sync_views();
        deck
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn account(&self, id: &AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| &a.id == id)
    }

    /// The current closability map.
    pub fn can_delete(&self) -> &CanDeleteMap {
        &self.can_delete
    }

    /// Whether the webview of `id` is currently closable.
    pub fn is_closable(&self, id: &AccountId) -> bool {
        self.can_delete.get(id).copied().unwrap_or(false)
    }

    pub fn views(&self) -> &WebviewRegistry {
        self.dispatcher.views()
    }

    /// A dispatcher for handling messages outside the deck, e.g. in a
    /// spawned task.
    pub fn dispatcher(&self) -> IpcDispatcher {
        self.dispatcher.clone()
    }

    /// Environment URL of `account` at list position `index`.
    ///
    /// Accounts added after the first one go straight to the login form.
    fn src_for(&self, account: &Account, index: usize) -> String {
        let force_login = account.is_adding && index > 0;
        self.environment
            .url_for(account, force_login)
            .unwrap_or_else(|e| {
                tracing::warn!(
                    event = "ui.webviews.environment_url_failed",
                    account_id = %account.id,
                    error = %e
                );
                BLANK_URL.to_string()
            })
    }

    fn props_for(&self, account: &Account, index: usize) -> WebviewProps {
        WebviewProps {
            src: self.src_for(account, index),
            partition: account.session_id.clone(),
            background_throttling: self.background_throttling,
        }
    }

    /// Creates webviews for new accounts and drops those of removed ones.
    fn sync_views(&self) {
        let views = self.dispatcher.views();
        for (index, account) in self.accounts.iter().enumerate() {
            if views.contains(&account.id) {
                continue;
            }
            let props = self.props_for(account, index);
            tracing::debug!(
                event = "ui.webviews.view_created",
                account_id = %account.id,
                src = %props.src
            );
            views.insert(account.id.clone(), self.factory.create(&account.id, &props));
        }

        let keep: Vec<AccountId> = self.accounts.iter().map(|a| a.id.clone()).collect();
        for dropped in views.retain(&keep) {
            tracing::debug!(event = "ui.webviews.view_dropped", account_id = %dropped);
        }
    }

    /// Accounts in `next` whose SSO code changed while being added, with
    /// the URL their webview must reload.
    pub fn sso_reloads(&self, next: &[Account]) -> Vec<(AccountId, String)> {
        next.iter()
            .filter(|account| account.is_adding)
            .filter(|account| {
                self.account(&account.id)
                    .is_some_and(|current| current.sso_code != account.sso_code)
            })
            .filter_map(|account| match self.environment.url_for(account, false) {
                Ok(url) => Some((account.id.clone(), url)),
                Err(e) => {
                    tracing::warn!(
                        event = "ui.webviews.sso_reload_failed",
                        account_id = %account.id,
                        error = %e
                    );
                    None
                }
            })
            .collect()
    }

    /// Whether moving to `next` with closability `next_can_delete` needs a
    /// redraw.
    ///
    /// Only new accounts, visibility flips and closability changes count.
    pub fn should_redraw(&self, next: &[Account], next_can_delete: &CanDeleteMap) -> bool {
        for account in next {
            let Some(current) = self.account(&account.id) else {
                return true;
            };
            if current.visible != account.visible {
                return true;
            }
        }
        *next_can_delete != self.can_delete
    }

    /// Replaces the account list with the owner's latest one.
    ///
    /// Reloads webviews whose SSO code changed, creates and drops webviews
    /// to match the list, and recomputes closability. Returns whether the
    /// view needs a redraw.
    pub fn set_accounts(&mut self, next: Vec<Account>) -> bool {
        for (account_id, url) in self.sso_reloads(&next) {
            tracing::info!(event = "ui.webviews.sso_reload", account_id = %account_id);
            self.dispatcher.views().load_url(&account_id, &url);
        }

        let next_can_delete = can_delete_map(&next);
        let redraw = self.should_redraw(&next, &next_can_delete);

        self.accounts = next;
        self.can_delete = next_can_delete;
        self.sync_views();
        redraw
    }

    /// Recomputes the closability flag of one account.
    ///
    /// Returns true if the flag changed.
    pub fn refresh_can_delete(&mut self, id: &AccountId) -> bool {
        let flag = can_delete_webview(&self.accounts, id);
        self.can_delete.insert(id.clone(), flag) != Some(flag)
    }

    /// Captures what handling a message from `account_id` needs, so the
    /// dispatch can run without borrowing the deck.
    pub fn prepare(
        &self,
        account_id: &AccountId,
        message: &IpcMessage,
    ) -> WebviewResult<PendingMessage> {
        let account = self
            .account(account_id)
            .cloned()
            .ok_or_else(|| WebviewError::AccountNotFound(account_id.clone()))?;

        Ok(PendingMessage {
            dispatcher: self.dispatcher.clone(),
            account,
            accounts: self.accounts.clone(),
            message: message.clone(),
        })
    }

    /// Finishes a dispatched message.
    ///
    /// After a recognised channel the account's closability flag is
    /// recomputed. Returns whether that flag changed.
    pub fn complete(&mut self, account_id: &AccountId, recognized: bool) -> bool {
        recognized && self.refresh_can_delete(account_id)
    }

    /// Handles a message from the webview of `account_id`.
    ///
    /// Same sequence the view runs across a spawned task: [`Self::prepare`],
    /// [`PendingMessage::run`], then [`Self::complete`].
    pub async fn on_ipc_message(
        &mut self,
        account_id: &AccountId,
        message: &IpcMessage,
    ) -> WebviewResult<bool> {
        let recognized = self.prepare(account_id, message)?.run().await?;
        Ok(self.complete(account_id, recognized))
    }

    /// Handles a click on an account's close affordance.
    pub async fn on_webview_close(&self, account_id: &AccountId) -> WebviewResult<()> {
        let account = self
            .account(account_id)
            .ok_or_else(|| WebviewError::AccountNotFound(account_id.clone()))?;
        self.dispatcher.delete_webview(account).await
    }

    /// Render data for every account, in list order.
    pub fn items(&self) -> Vec<WebviewItem> {
        self.accounts
            .iter()
            .enumerate()
            .map(|(index, account)| {
                let third_party_notice = account
                    .backend_options
                    .as_ref()
                    .filter(|_| account.visible && account.is_adding && !account.has_identity())
                    .map(|options| options.title.clone());

                WebviewItem {
                    account_id: account.id.clone(),
                    props: self.props_for(account, index),
                    visible: account.visible,
                    third_party_notice,
                    closable: self.is_closable(&account.id) && account.visible,
                }
            })
            .collect()
    }
}

impl std::fmt::Debug for WebviewDeck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebviewDeck")
            .field("accounts", &self.accounts.len())
            .field("can_delete", &self.can_delete)
            .finish()
    }
}
