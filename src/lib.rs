//! webdeck - A multi-account desktop messenger shell
//!
//! This crate provides the core functionality for webdeck: one embedded
//! webview per account, the routing of messages those webviews send, and
//! the rules for when an account's webview may be closed.

pub mod app;
pub mod config;
pub mod domain;
pub mod services;
pub mod ui;

pub use app::App;
