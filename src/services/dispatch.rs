//! Inbound webview message routing.
//!
//! Routes messages from an account's webview to the owner hooks and host
//! bindings. Only the host calls suspend; owner hooks run synchronously.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use super::backend::{validate_backend_options, BackendError};
use super::environment::EnvironmentError;
use super::host::{HostBridge, HostError};
use super::owner::{AccountOwner, AccountPatch};
use super::registry::WebviewRegistry;
use crate::app::events::{channel, IpcEvent, IpcMessage};
use crate::domain::{Account, AccountId};

/// Errors raised while handling webview messages.
#[derive(Debug, Error)]
pub enum WebviewError {
    /// Custom backend options failed validation.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// An environment URL could not be built.
    #[error(transparent)]
    Environment(#[from] EnvironmentError),

    /// A host call failed.
    #[error(transparent)]
    Host(#[from] HostError),

    /// A reply payload could not be encoded.
    #[error("failed to encode reply: {0}")]
    Encode(#[from] serde_json::Error),

    /// The account is not in the current list.
    #[error("account not found: {0}")]
    AccountNotFound(AccountId),
}

/// Result type for webview operations.
pub type WebviewResult<T> = Result<T, WebviewError>;

/// Sums the badge counts of `accounts`, with `updated` overriding the
/// stored count of one account.
pub fn accumulate_badge_count(accounts: &[Account], updated: Option<(&AccountId, u32)>) -> u32 {
    accounts
        .iter()
        .map(|account| match updated {
            Some((id, count)) if *id == account.id => count,
            _ => account.badge_count,
        })
        .fold(0u32, u32::saturating_add)
}

/// Routes webview messages to the owner and host.
///
/// Cheap to clone; clones share the owner, host and registry.
#[derive(Clone)]
pub struct IpcDispatcher {
    owner: Arc<dyn AccountOwner>,
    host: Arc<dyn HostBridge>,
    views: WebviewRegistry,
}

impl IpcDispatcher {
    pub fn new(
        owner: Arc<dyn AccountOwner>,
        host: Arc<dyn HostBridge>,
        views: WebviewRegistry,
    ) -> Self {
        Self { owner, host, views }
    }

    pub fn views(&self) -> &WebviewRegistry {
        &self.views
    }

    /// Handles one message from `account`'s webview.
    ///
    /// `accounts` is the account list at the time the message arrived.
    /// Returns whether the channel was recognised; unrecognised channels are
    /// ignored.
    pub async fn dispatch(
        &self,
        account: &Account,
        accounts: &[Account],
        message: &IpcMessage,
    ) -> WebviewResult<bool> {
        let event = message.decode();
        let recognized = event.is_recognized();
        tracing::debug!(
            event = "ui.webviews.ipc_received",
            account_id = %account.id,
            channel = %message.channel
        );

        match event {
            IpcEvent::CreateWithCustomBackend(raw) => {
                self.create_with_custom_backend(account, raw.as_ref())
                    .await?;
            }
            IpcEvent::GetBackendOptions => {
                let payload = match &account.backend_options {
                    Some(options) => serde_json::to_value(options)?,
                    None => Value::Null,
                };
                if !self
                    .views
                    .send(&account.id, channel::GET_OPTIONS_RESPONSE, payload)
                {
                    tracing::warn!(
                        event = "ui.webviews.reply_dropped",
                        account_id = %account.id,
                        "No webview registered for account"
                    );
                }
            }
            IpcEvent::UpdateInfo(raw) => match AccountPatch::from_value(&raw) {
                Some(patch) => self.owner.update_account_data(&account.id, patch),
                None => tracing::warn!(
                    event = "ui.webviews.invalid_account_data",
                    account_id = %account.id,
                    payload = %raw
                ),
            },
            IpcEvent::NotificationClick => self.owner.switch_account(&account.id),
            IpcEvent::Lifecycle(lifecycle) => {
                self.owner.update_account_lifecycle(&account.id, lifecycle)
            }
            IpcEvent::SignedOut { clear_data: true } => self.delete_webview(account).await?,
            IpcEvent::SignedOut { clear_data: false } => self.owner.reset_identity(&account.id),
            IpcEvent::UnreadCount(Some(count)) => {
                self.report_unread_count(account, accounts, count)
            }
            IpcEvent::UnreadCount(None) => tracing::warn!(
                event = "ui.webviews.invalid_unread_count",
                account_id = %account.id,
                args = ?message.args
            ),
            IpcEvent::Unknown(channel) => tracing::debug!(
                event = "ui.webviews.ipc_ignored",
                account_id = %account.id,
                channel = %channel
            ),
        }

        Ok(recognized)
    }

    /// Deletes an account's session and abandons its creation.
    pub async fn delete_webview(&self, account: &Account) -> WebviewResult<()> {
        tracing::info!(
            event = "ui.webviews.delete_started",
            account_id = %account.id
        );
        self.host
            .send_delete_account(&account.id, &account.session_id)
            .await?;
        self.owner.abort_account_creation(&account.id);
        Ok(())
    }

    async fn create_with_custom_backend(
        &self,
        account: &Account,
        raw: Option<&Value>,
    ) -> WebviewResult<()> {
        let options = validate_backend_options(raw)?;

        if !self.host.authorize_backend_swap(&options).await? {
            tracing::info!(
                event = "ui.webviews.backend_swap_declined",
                account_id = %account.id,
                backend = %options.title
            );
            return Ok(());
        }

        tracing::info!(
            event = "ui.webviews.backend_swap_authorized",
            account_id = %account.id,
            backend = %options.title
        );
        self.owner.delete_account(&account.id);
        self.host
            .send_delete_account(&account.id, &account.session_id)
            .await?;
        self.owner.add_account_with_custom_backend(options);
        Ok(())
    }

    fn report_unread_count(&self, account: &Account, accounts: &[Account], count: u32) {
        self.owner.update_account_badge_count(&account.id, count);
        let total = accumulate_badge_count(accounts, Some((&account.id, count)));
        tracing::debug!(
            event = "ui.webviews.badge_count",
            account_id = %account.id,
            count,
            total
        );
        self.host.send_badge_count(total);
    }
}

impl std::fmt::Debug for IpcDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IpcDispatcher")
            .field("views", &self.views)
            .finish()
    }
}
