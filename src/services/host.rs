//! Host bindings.
//!
//! Calls the deck makes into the surrounding desktop process: OS badge
//! count, backend swap authorisation, and session deletion.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{AccountId, BackendOptions, SessionId};

/// Errors reported by the host.
#[derive(Debug, Error)]
pub enum HostError {
    /// The host process could not be reached.
    #[error("host unavailable: {0}")]
    Unavailable(String),

    /// The host rejected the request.
    #[error("host request failed: {0}")]
    Failed(String),
}

/// Result type for host calls.
pub type HostResult<T> = Result<T, HostError>;

/// Bindings provided by the desktop host process.
#[async_trait]
pub trait HostBridge: Send + Sync {
    /// Shows `total` unread messages on the application badge.
    fn send_badge_count(&self, total: u32);

    /// Asks the user whether to switch to the given custom backend.
    async fn authorize_backend_swap(&self, options: &BackendOptions) -> HostResult<bool>;

    /// Deletes the persisted session data of an account.
    async fn send_delete_account(&self, id: &AccountId, session_id: &SessionId) -> HostResult<()>;
}
