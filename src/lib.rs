//! # kosync
//!
//! A reading progress sync server for KOReader-compatible e-book readers,
//! usable both as a standalone binary and as a library.
//!
//! Devices register an account, then report and fetch their position per
//! document. Each request carries the username and password in the
//! `x-auth-user` / `x-auth-key` headers; there are no sessions.
//!
//! ## Library Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use kosync::auth::PasswordHasher;
//! use kosync::server::{AppState, create_router};
//! use kosync::store::{SqliteStore, Store};
//!
//! let store = SqliteStore::new("./data/koreader-sync.db")?;
//! store.initialize()?;
//!
//! let state = Arc::new(AppState::new(Arc::new(store), PasswordHasher::new("salt")?)?);
//! let router = create_router(state);
//! // Serve with axum...
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Builds the `kosync` binary. Disable with `default-features = false`.

pub mod auth;
pub mod config;
pub mod error;
pub mod server;
pub mod store;
pub mod sync;
pub mod types;
