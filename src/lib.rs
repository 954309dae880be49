/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! # Tasks Client
//!
//! Async client for the tasks REST API (tasks, subtasks, categories and JWT
//! authentication).
//!
//! Every request goes through [`model::http::HttpClient`], which attaches the
//! stored access token and, when the backend answers `401 Unauthorized`,
//! performs one coordinated token refresh. Requests failing while that refresh
//! is in flight are parked and replayed with the new token once it arrives, so
//! callers never see the refresh happen.
//!
//! ## Example
//!
//! ```ignore
//! use tasks_client::prelude::*;
//!
//! let client = Client::new(Config::new()).await?;
//! client.auth().login("ada@example.com", "secret").await?;
//!
//! let pending = client
//!     .list_tasks(&TaskFilters::default().with_status(TaskStatus::Pending))
//!     .await?;
//! ```

/// Client, session manager, configuration and resource services
pub mod application;
/// Global constants
pub mod constants;
/// Error types
pub mod error;
/// Wire models and the authenticated transport
pub mod model;
/// Commonly used re-exports
pub mod prelude;
/// Auth state machine and refresh coordination
pub mod session;
/// Token persistence
pub mod storage;
/// Environment and logging helpers
pub mod utils;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version
#[must_use]
pub fn version() -> &'static str {
    VERSION
}
