//! Owner callback contract.
//!
//! The account list is owned by a parent container. The webview deck never
//! edits account records itself; it asks the owner through these hooks.

use serde_json::{Map, Value};

use crate::domain::{Account, AccountId, BackendOptions};

/// Hooks the parent container provides to the webview deck.
pub trait AccountOwner: Send + Sync {
    /// Stores the unread count reported by an account's webview.
    fn update_account_badge_count(&self, id: &AccountId, count: u32);

    /// Removes an account.
    fn delete_account(&self, id: &AccountId);

    /// Adds a new account bound to a custom backend.
    fn add_account_with_custom_backend(&self, options: BackendOptions);

    /// Merges identity data reported by a webview into an account.
    fn update_account_data(&self, id: &AccountId, patch: AccountPatch);

    /// Makes `id` the visible account.
    fn switch_account(&self, id: &AccountId);

    /// Records a lifecycle transition, tagged with the channel that reported it.
    fn update_account_lifecycle(&self, id: &AccountId, channel: &str);

    /// Drops the account's identity while keeping its webview.
    fn reset_identity(&self, id: &AccountId);

    /// Abandons an account that was being added.
    fn abort_account_creation(&self, id: &AccountId);
}

/// Account data reported by a webview.
///
/// Known identity keys are decoded into typed fields when their value has
/// the expected type. Every other key, and any known key with an
/// unexpected value, is kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountPatch {
    pub name: Option<String>,
    pub accent_id: Option<u32>,
    pub picture: Option<String>,
    pub team_id: Option<String>,
    pub team_role: Option<String>,
    pub user_id: Option<String>,
    pub extra: Map<String, Value>,
}

impl AccountPatch {
    /// Parses a patch from a webview argument.
    ///
    /// Returns `None` if the argument is not an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let mut patch = Self::default();

        for (key, value) in object {
            let decoded = match key.as_str() {
                "name" => string(value).map(|v| patch.name = Some(v)),
                "accentID" => accent_id(value).map(|v| patch.accent_id = Some(v)),
                "picture" => string(value).map(|v| patch.picture = Some(v)),
                "teamID" => string(value).map(|v| patch.team_id = Some(v)),
                "teamRole" => string(value).map(|v| patch.team_role = Some(v)),
                "userID" => string(value).map(|v| patch.user_id = Some(v)),
                _ => None,
            };
            if decoded.is_none() {
                patch.extra.insert(key.clone(), value.clone());
            }
        }

        Some(patch)
    }

    /// Applies the patch to an account.
    ///
    /// Receiving a user id completes the account's addition.
    pub fn apply(self, account: &mut Account) {
        if let Some(name) = self.name {
            account.name = Some(name);
        }
        if let Some(accent_id) = self.accent_id {
            account.accent_id = Some(accent_id);
        }
        if let Some(picture) = self.picture {
            account.picture = Some(picture);
        }
        if let Some(team_id) = self.team_id {
            account.team_id = Some(team_id);
        }
        if let Some(team_role) = self.team_role {
            account.team_role = Some(team_role);
        }
        if let Some(user_id) = self.user_id {
            account.user_id = Some(user_id);
            account.is_adding = false;
        }
        account.extra.extend(self.extra);
    }
}

fn string(value: &Value) -> Option<String> {
    value.as_str().map(str::to_owned)
}

/// Accent ids arrive as numbers or numeric strings.
fn accent_id(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn patch_from_webview_payload() {
        let patch = AccountPatch::from_value(&json!({
            "name": "Alice",
            "accentID": 2,
            "teamID": "team-1",
            "userID": "user-1",
            "unrelated": true
        }))
        .unwrap();

        assert_eq!(patch.name.as_deref(), Some("Alice"));
        assert_eq!(patch.accent_id, Some(2));
        assert_eq!(patch.user_id.as_deref(), Some("user-1"));
        assert_eq!(patch.extra.get("unrelated"), Some(&json!(true)));
    }

    #[test]
    fn non_object_payload_is_rejected() {
        assert!(AccountPatch::from_value(&json!("Alice")).is_none());
    }

    #[test]
    fn numeric_string_accent_id() {
        let patch = AccountPatch::from_value(&json!({ "accentID": "4" })).unwrap();
        assert_eq!(patch.accent_id, Some(4));
        assert!(patch.extra.is_empty());
    }

    #[test]
    fn mistyped_field_is_kept_aside() {
        let patch = AccountPatch::from_value(&json!({
            "userID": "user-1",
            "name": 42
        }))
        .unwrap();

        assert_eq!(patch.user_id.as_deref(), Some("user-1"));
        assert_eq!(patch.name, None);
        assert_eq!(patch.extra.get("name"), Some(&json!(42)));
    }

    #[test]
    fn user_id_completes_addition() {
        let mut account = Account::adding("acc-1", "s-1");
        AccountPatch {
            name: Some("Alice".to_string()),
            user_id: Some("user-1".to_string()),
            ..Default::default()
        }
        .apply(&mut account);

        assert!(!account.is_adding);
        assert_eq!(account.user_id.as_deref(), Some("user-1"));
        assert_eq!(account.name.as_deref(), Some("Alice"));
    }

    #[test]
    fn patch_without_user_id_keeps_adding_state() {
        let mut account = Account::adding("acc-1", "s-1");
        AccountPatch {
            picture: Some("asset-1".to_string()),
            ..Default::default()
        }
        .apply(&mut account);

        assert!(account.is_adding);
        assert_eq!(account.picture.as_deref(), Some("asset-1"));
    }

    #[test]
    fn extra_keys_reach_the_account() {
        let mut account = Account::adding("acc-1", "s-1");
        AccountPatch::from_value(&json!({ "darkMode": true }))
            .unwrap()
            .apply(&mut account);

        assert_eq!(account.extra.get("darkMode"), Some(&json!(true)));
    }
}
