//! Webview deck services.
//!
//! This module contains the logic behind the webview list: URL
//! construction, closability, message routing and the deck state itself.
//! Nothing here depends on the UI toolkit.
//!
//! # Architecture
//!
//! ```text
//! UI Layer (WebviewsView)
//!          |
//!          v
//!    WebviewDeck  <-- state, redraw decisions
//!          |
//!          v
//!    IpcDispatcher  --> AccountOwner (account list)
//!          |        --> HostBridge (desktop process)
//!          v
//!    WebviewRegistry (embedded views)
//! ```
//!
//! # Services Overview
//!
//! - [`Environment`]: Builds the URL each account's webview loads
//! - [`IpcDispatcher`]: Routes webview messages to the owner and host
//! - [`WebviewDeck`]: Account list, closability and render data

mod backend;
mod closability;
mod deck;
mod dispatch;
mod environment;
mod host;
mod owner;
mod registry;

pub use backend::{validate_backend_options, BackendError, BackendResult, REQUIRED_ENDPOINTS};
pub use closability::{can_delete_map, can_delete_webview, CanDeleteMap};
pub use deck::{PendingMessage, WebviewDeck, WebviewItem, BLANK_URL};
pub use dispatch::{accumulate_badge_count, IpcDispatcher, WebviewError, WebviewResult};
pub use environment::{Environment, EnvironmentError, EnvironmentResult, AUTH_PATH};
pub use host::{HostBridge, HostError, HostResult};
pub use owner::{AccountOwner, AccountPatch};
pub use registry::{EmbeddedView, WebviewFactory, WebviewProps, WebviewRegistry};
