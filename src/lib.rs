//! # accessdesk
//!
//! A small admin tool for granting users access to reporting groups, usable
//! both as a standalone binary and as a library.
//!
//! ## Library Usage
//!
//! ```toml
//! [dependencies]
//! accessdesk = { version = "0.0.1", default-features = false }
//! ```
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use accessdesk::auth::AdminPassword;
//! use accessdesk::config::SettingsStore;
//! use accessdesk::server::{AppState, create_router};
//! use accessdesk::store::SqliteConnector;
//!
//! let settings_store = SettingsStore::new("./config/config.json", None);
//! let settings = settings_store.load().unwrap();
//! let state = Arc::new(AppState::new(
//!     settings_store,
//!     settings,
//!     Arc::new(SqliteConnector::new(".")),
//!     AdminPassword::from_env(),
//! ));
//! state.reconnect().ok();
//! let router = create_router(state);
//! // Serve with axum...
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Includes CLI module. Disable with `default-features = false`.

pub mod auth;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod crypto;
pub mod error;
pub mod server;
pub mod store;
pub mod types;
