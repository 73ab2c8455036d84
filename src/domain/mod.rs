//! Domain layer types for webdeck.
//!
//! Account records, custom backend options, and the identifier newtypes
//! shared by services and views.

mod account;
mod types;

pub use account::{Account, BackendEndpoints, BackendOptions};
pub use types::{AccountId, SessionId};
