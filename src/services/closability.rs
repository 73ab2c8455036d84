//! Webview closability policy.
//!
//! An account's webview may be closed by the user only while the account
//! is still being added, so that closing never throws away an established
//! session.

use std::collections::HashMap;

use crate::domain::{Account, AccountId};

/// Closability flag per account id.
pub type CanDeleteMap = HashMap<AccountId, bool>;

/// Returns true if the webview of `account_id` may be closed.
///
/// The account must be in `accounts`, be mid-addition, and either have no
/// user identity yet or be the only account while bound to a custom
/// backend.
pub fn can_delete_webview(accounts: &[Account], account_id: &AccountId) -> bool {
    let Some(account) = accounts.iter().find(|a| &a.id == account_id) else {
        return false;
    };

    if accounts.len() <= 1 && account.is_adding && account.backend_options.is_some() {
        return true;
    }

    account.is_adding && !account.has_identity()
}

/// Computes the closability flag of every account.
pub fn can_delete_map(accounts: &[Account]) -> CanDeleteMap {
    accounts
        .iter()
        .map(|account| (account.id.clone(), can_delete_webview(accounts, &account.id)))
        .collect()
}
