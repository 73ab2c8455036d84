//! IPC events exchanged with the embedded webviews.
//!
//! Webviews talk to the deck through named channels carrying a list of
//! JSON arguments. [`IpcMessage`] is the raw form; [`IpcEvent`] is the
//! decoded form the dispatcher matches on.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::AccountId;

/// Channel identifiers used by the webviews.
pub mod channel {
    pub const CREATE_WITH_CUSTOM_BACKEND: &str = "EVENT_TYPE.ACCOUNT.CREATE_WITH_CUSTOM_BACKEND";
    pub const UPDATE_INFO: &str = "EVENT_TYPE.ACCOUNT.UPDATE_INFO";
    pub const NOTIFICATION_CLICK: &str = "EVENT_TYPE.ACTION.NOTIFICATION_CLICK";
    pub const GET_BACKEND_OPTIONS: &str = "EVENT_TYPE.CUSTOM_BACKEND.GET_URL";
    /// Outbound reply to [`GET_BACKEND_OPTIONS`].
    pub const GET_OPTIONS_RESPONSE: &str = "EVENT_TYPE.CUSTOM_BACKEND.GET_OPTIONS_RESPONSE";
    pub const SIGNED_IN: &str = "EVENT_TYPE.LIFECYCLE.SIGNED_IN";
    pub const SIGN_OUT: &str = "EVENT_TYPE.LIFECYCLE.SIGN_OUT";
    pub const SIGNED_OUT: &str = "EVENT_TYPE.LIFECYCLE.SIGNED_OUT";
    pub const UNREAD_COUNT: &str = "EVENT_TYPE.LIFECYCLE.UNREAD_COUNT";
}

/// A raw message received from a webview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpcMessage {
    pub channel: String,
    #[serde(default)]
    pub args: Vec<Value>,
}

impl IpcMessage {
    pub fn new(channel: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            channel: channel.into(),
            args,
        }
    }

    /// A message without arguments.
    pub fn bare(channel: impl Into<String>) -> Self {
        Self::new(channel, Vec::new())
    }

    fn first_arg(&self) -> Option<&Value> {
        self.args.first()
    }

    /// Decode the message into a typed event.
    pub fn decode(&self) -> IpcEvent {
        match self.channel.as_str() {
            channel::CREATE_WITH_CUSTOM_BACKEND => IpcEvent::CreateWithCustomBackend(
                self.first_arg().filter(|v| !v.is_null()).cloned(),
            ),
            channel::GET_BACKEND_OPTIONS => IpcEvent::GetBackendOptions,
            channel::UPDATE_INFO => {
                IpcEvent::UpdateInfo(self.first_arg().cloned().unwrap_or(Value::Null))
            }
            channel::NOTIFICATION_CLICK => IpcEvent::NotificationClick,
            channel::SIGNED_IN => IpcEvent::Lifecycle(channel::SIGNED_IN),
            channel::SIGN_OUT => IpcEvent::Lifecycle(channel::SIGN_OUT),
            channel::SIGNED_OUT => IpcEvent::SignedOut {
                clear_data: self.first_arg().is_some_and(is_truthy),
            },
            channel::UNREAD_COUNT => IpcEvent::UnreadCount(
                self.first_arg()
                    .and_then(Value::as_u64)
                    .map(|count| count.min(u64::from(u32::MAX)) as u32),
            ),
            other => IpcEvent::Unknown(other.to_string()),
        }
    }
}

/// A decoded webview event.
#[derive(Debug, Clone, PartialEq)]
pub enum IpcEvent {
    /// Request to recreate the account against a custom backend.
    CreateWithCustomBackend(Option<Value>),
    /// Request for the account's stored backend options.
    GetBackendOptions,
    /// Account data patch.
    UpdateInfo(Value),
    /// A notification of this account was clicked.
    NotificationClick,
    /// Signed-in or sign-out lifecycle transition, tagged with its channel.
    Lifecycle(&'static str),
    /// The account signed out.
    SignedOut { clear_data: bool },
    /// New unread count. `None` if the argument was not a count.
    UnreadCount(Option<u32>),
    /// A channel the deck does not handle.
    Unknown(String),
}

impl IpcEvent {
    /// Returns true for channels the deck handles.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, IpcEvent::Unknown(_))
    }
}

/// A message together with the account whose webview sent it.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundMessage {
    pub account_id: AccountId,
    pub message: IpcMessage,
}

/// JavaScript truthiness, as the webviews encode flags loosely.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
