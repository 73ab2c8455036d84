//! Account domain types.
//!
//! An account record is owned by the parent container. The webview deck
//! only reads it and asks the owner for changes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{AccountId, SessionId};

/// A messenger account with its own webview and session partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for this account.
    pub id: AccountId,
    /// Session partition of the account's webview.
    #[serde(rename = "sessionID")]
    pub session_id: SessionId,
    /// Backend user id, set once the account has signed in.
    #[serde(rename = "userID", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Pending single-sign-on code.
    #[serde(rename = "ssoCode", default, skip_serializing_if = "Option::is_none")]
    pub sso_code: Option<String>,
    /// Whether the account is still being added (not yet signed in).
    #[serde(rename = "isAdding", default)]
    pub is_adding: bool,
    /// Whether this account's webview is the one shown.
    #[serde(default)]
    pub visible: bool,
    /// Custom backend the account is bound to, if any.
    #[serde(
        rename = "backendOptions",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub backend_options: Option<BackendOptions>,
    /// Unread count reported by the webview.
    #[serde(rename = "badgeCount", default)]
    pub badge_count: u32,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "accentID", default, skip_serializing_if = "Option::is_none")]
    pub accent_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(rename = "teamID", default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    #[serde(rename = "teamRole", default, skip_serializing_if = "Option::is_none")]
    pub team_role: Option<String>,
    /// Last lifecycle channel reported for this account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifecycle: Option<String>,
    /// Account data reported by the webview without a typed field.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Account {
    /// Creates an account that is being added and shown.
    pub fn adding(id: impl Into<AccountId>, session_id: impl Into<SessionId>) -> Self {
        Self {
            id: id.into(),
            session_id: session_id.into(),
            user_id: None,
            sso_code: None,
            is_adding: true,
            visible: true,
            backend_options: None,
            badge_count: 0,
            name: None,
            accent_id: None,
            picture: None,
            team_id: None,
            team_role: None,
            lifecycle: None,
            extra: Map::new(),
        }
    }

    /// Creates a signed-in account for `user_id`.
    pub fn signed_in(
        id: impl Into<AccountId>,
        session_id: impl Into<SessionId>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            user_id: Some(user_id.into()),
            is_adding: false,
            ..Self::adding(id, session_id)
        }
    }

    /// Sets the visibility.
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Sets the SSO code.
    pub fn sso_code(mut self, code: impl Into<String>) -> Self {
        self.sso_code = Some(code.into());
        self
    }

    /// Binds the account to a custom backend.
    pub fn backend_options(mut self, options: BackendOptions) -> Self {
        self.backend_options = Some(options);
        self
    }

    /// Sets the unread count.
    pub fn badge_count(mut self, count: u32) -> Self {
        self.badge_count = count;
        self
    }

    /// Returns true if the account has a backend user identity.
    pub fn has_identity(&self) -> bool {
        self.user_id.is_some()
    }
}

/// A custom backend an account can be bound to instead of the default one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendOptions {
    /// Human readable backend name, shown in the third-party notice.
    #[serde(default)]
    pub title: String,
    pub endpoints: BackendEndpoints,
}

/// Service endpoints of a backend. All six are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendEndpoints {
    #[serde(rename = "backendURL")]
    pub backend_url: String,
    #[serde(rename = "backendWSURL")]
    pub backend_ws_url: String,
    #[serde(rename = "blackListURL")]
    pub black_list_url: String,
    #[serde(rename = "teamsURL")]
    pub teams_url: String,
    #[serde(rename = "accountsURL")]
    pub accounts_url: String,
    #[serde(rename = "websiteURL")]
    pub website_url: String,
}
